//! # Fragment Assembly
//!
//! Turns descriptors into geometry by placing one precomputed fragment per
//! block. Fragments are authored once, for the (+,+,+) octant with their
//! axis along +Y, in voxel units relative to the descriptor anchor. Placing
//! one means:
//!
//! 1. rotate so +Y lands on the descriptor axis,
//! 2. reflect into the descriptor's octant,
//! 3. translate to the anchor,
//! 4. reverse triangle winding if steps 1-2 flipped handedness.
//!
//! A block type with no fragment is skipped with a warning and the rest of
//! the pass carries on.

use std::collections::BTreeMap;

use chamfer_core::{Axis, Direction, Orientation};

use crate::descriptor::{BlockDescriptor, BlockType, MaterialBuckets};

/// Indexed triangle geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshFragment {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Triangle list, three indices per triangle.
    pub indices: Vec<u32>,
}

impl MeshFragment {
    /// Creates a fragment.
    #[must_use]
    pub fn new(positions: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    /// True if there are no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn append_placed(&mut self, fragment: &Self, placement: &Placement) {
        let base = self.positions.len() as u32;
        self.positions
            .extend(fragment.positions.iter().map(|&p| placement.apply(p)));
        for tri in fragment.indices.chunks_exact(3) {
            if placement.flips_winding {
                self.indices.extend([base + tri[0], base + tri[2], base + tri[1]]);
            } else {
                self.indices.extend([base + tri[0], base + tri[1], base + tri[2]]);
            }
        }
    }
}

/// Source of fragments by block type.
pub trait FragmentLibrary {
    /// The fragment for `block_type`, if one is registered.
    fn fragment(&self, block_type: BlockType) -> Option<&MeshFragment>;
}

/// Map-backed fragment library.
#[derive(Debug, Clone, Default)]
pub struct FragmentMap {
    fragments: BTreeMap<BlockType, MeshFragment>,
}

impl FragmentMap {
    /// Creates an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a fragment.
    pub fn insert(&mut self, block_type: BlockType, fragment: MeshFragment) -> Option<MeshFragment> {
        self.fragments.insert(block_type, fragment)
    }

    /// Number of registered block types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

impl FragmentLibrary for FragmentMap {
    fn fragment(&self, block_type: BlockType) -> Option<&MeshFragment> {
        self.fragments.get(&block_type)
    }
}

/// Result of an assembly pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssemblyOutput {
    /// One concatenated mesh per material.
    pub meshes: BTreeMap<u8, MeshFragment>,
    /// Blocks placed.
    pub placed: usize,
    /// Blocks skipped for lack of a fragment.
    pub skipped: usize,
}

/// Orientation carrying canonical +Y onto `axis` without leaving the
/// positive octant.
#[must_use]
pub fn axis_orientation(axis: Option<Axis>) -> Orientation {
    let basis = match axis {
        None | Some(Axis::Y) => return Orientation::IDENTITY,
        Some(Axis::X) => (Direction::Forward, Direction::Right, Direction::Up),
        Some(Axis::Z) => (Direction::Up, Direction::Forward, Direction::Right),
    };
    Orientation::from_basis(basis.0, basis.1, basis.2).unwrap_or(Orientation::IDENTITY)
}

struct Placement {
    matrix: [[i32; 3]; 3],
    sign: [f32; 3],
    offset: [f32; 3],
    flips_winding: bool,
}

impl Placement {
    fn for_descriptor(d: &BlockDescriptor) -> Self {
        let orientation = axis_orientation(d.axis);
        let mirror = i32::from(d.sign[0]) * i32::from(d.sign[1]) * i32::from(d.sign[2]);
        Self {
            matrix: orientation.to_matrix(),
            sign: d.sign.map(f32::from),
            offset: d.anchor_position(),
            flips_winding: orientation.determinant() * mirror < 0,
        }
    }

    fn apply(&self, p: [f32; 3]) -> [f32; 3] {
        let mut out = [0.0; 3];
        for (i, row) in self.matrix.iter().enumerate() {
            let rotated: f32 = row.iter().zip(p).map(|(&m, v)| m as f32 * v).sum();
            out[i] = rotated * self.sign[i] + self.offset[i];
        }
        out
    }
}

/// Places a fragment for every descriptor in `blocks`.
pub fn assemble(blocks: &MaterialBuckets, library: &impl FragmentLibrary) -> AssemblyOutput {
    let mut output = AssemblyOutput::default();
    let mut warned = [false; BlockType::COUNT];

    for (material, descriptors) in blocks.iter() {
        for d in descriptors {
            let Some(fragment) = library.fragment(d.block_type) else {
                if !warned[d.block_type.index()] {
                    warned[d.block_type.index()] = true;
                    tracing::warn!(block_type = %d.block_type, "no mesh fragment registered, skipping");
                }
                output.skipped += 1;
                continue;
            };
            output
                .meshes
                .entry(material)
                .or_default()
                .append_placed(fragment, &Placement::for_descriptor(d));
            output.placed += 1;
        }
    }

    tracing::debug!(
        placed = output.placed,
        skipped = output.skipped,
        materials = output.meshes.len(),
        "assembly complete"
    );
    output
}
