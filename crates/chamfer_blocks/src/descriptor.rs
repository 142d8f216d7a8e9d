//! Block descriptors: the classifier's output.
//!
//! A descriptor names one classified octant. Positions are kept at
//! quarter-voxel granularity so octant centres and cell edges are both
//! integral: cell `c` spans `4c..4c+4` on each axis, its centre is `4c + 2`
//! and the centre of octant `s` is `4c + 2 + s`.

use std::fmt;

use chamfer_core::{Axis, Coord};

/// Topology category of one octant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BlockType {
    /// Convex corner: no axis neighbour.
    Corner,
    /// Every axis neighbour present, no diagonals: three concave creases.
    Cross,
    /// Concave corner.
    NegativeCorner,
    /// Concave edge.
    NegativeEdge,
    /// Flat face.
    Side,
    /// Face running into a concave edge.
    SideToNegativeEdge,
    /// Convex edge.
    Edge,
    /// Convex edge bending onto a perpendicular edge.
    EdgeToEdge,
    /// Face rising into a convex edge.
    SideToPositiveEdge,
    /// Marker where two chamfered edges touch diagonally.
    BreakPoint,
}

impl BlockType {
    /// Number of block types.
    pub const COUNT: usize = 10;

    /// All block types in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Corner,
        Self::Cross,
        Self::NegativeCorner,
        Self::NegativeEdge,
        Self::Side,
        Self::SideToNegativeEdge,
        Self::Edge,
        Self::EdgeToEdge,
        Self::SideToPositiveEdge,
        Self::BreakPoint,
    ];

    /// Position in [`Self::ALL`].
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// True if descriptors of this type carry an axis. Corner, Cross and
    /// NegativeCorner are symmetric under the octant's own reflections.
    #[inline]
    #[must_use]
    pub const fn has_axis(self) -> bool {
        !matches!(self, Self::Corner | Self::Cross | Self::NegativeCorner)
    }

    /// Stable lowercase name, used in logs and fragment files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Corner => "corner",
            Self::Cross => "cross",
            Self::NegativeCorner => "negative_corner",
            Self::NegativeEdge => "negative_edge",
            Self::Side => "side",
            Self::SideToNegativeEdge => "side_to_negative_edge",
            Self::Edge => "edge",
            Self::EdgeToEdge => "edge_to_edge",
            Self::SideToPositiveEdge => "side_to_positive_edge",
            Self::BreakPoint => "break_point",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One classified octant, ready for fragment placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockDescriptor {
    /// Topology category.
    pub block_type: BlockType,
    /// Octant sign per axis, each `1` or `-1`.
    pub sign: [i8; 3],
    /// Fragment axis: the face normal for side-like blocks, the edge
    /// direction for edge-like ones. `None` for axis-free types.
    pub axis: Option<Axis>,
    /// Placement point in quarter-voxel units.
    pub anchor: Coord,
    /// Material of the owning cell.
    pub material: u8,
}

impl BlockDescriptor {
    /// The cell that produced this descriptor.
    #[must_use]
    pub fn cell(&self) -> Coord {
        let s = self.sign.map(i32::from);
        Coord::new(
            (self.anchor.x - s[0]).div_euclid(4),
            (self.anchor.y - s[1]).div_euclid(4),
            (self.anchor.z - s[2]).div_euclid(4),
        )
    }

    /// Anchor in voxel units.
    #[must_use]
    pub fn anchor_position(&self) -> [f32; 3] {
        [
            self.anchor.x as f32 / 4.0,
            self.anchor.y as f32 / 4.0,
            self.anchor.z as f32 / 4.0,
        ]
    }
}

/// Quarter-voxel centre of octant `sign` of `cell`.
#[inline]
#[must_use]
pub fn octant_anchor(cell: Coord, sign: [i8; 3]) -> Coord {
    Coord::new(
        4 * cell.x + 2 + i32::from(sign[0]),
        4 * cell.y + 2 + i32::from(sign[1]),
        4 * cell.z + 2 + i32::from(sign[2]),
    )
}

/// Quarter-voxel point on the cell edge running along `axis` on the octant's
/// side, halfway through the octant.
#[must_use]
pub fn edge_anchor(cell: Coord, sign: [i8; 3], axis: Axis) -> Coord {
    let mut anchor = octant_anchor(cell, sign);
    for other in [axis.next(), axis.prev()] {
        let s = i32::from(sign[other.index()]);
        anchor = anchor.with(other, anchor.get(other) + s);
    }
    anchor
}

/// Descriptor lists, one per material.
///
/// The bucket vectors are kept across passes so their capacity is reused.
#[derive(Debug, Clone)]
pub struct MaterialBuckets {
    buckets: Vec<Vec<BlockDescriptor>>,
}

impl Default for MaterialBuckets {
    fn default() -> Self {
        Self {
            buckets: vec![Vec::new(); 256],
        }
    }
}

impl MaterialBuckets {
    /// Creates 256 empty buckets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties every bucket, keeping allocations.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }

    /// Appends a descriptor to its material's bucket.
    #[inline]
    pub fn push(&mut self, descriptor: BlockDescriptor) {
        self.buckets[usize::from(descriptor.material)].push(descriptor);
    }

    /// Descriptors for one material.
    #[must_use]
    pub fn get(&self, material: u8) -> &[BlockDescriptor] {
        &self.buckets[usize::from(material)]
    }

    /// Non-empty buckets in material order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[BlockDescriptor])> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .filter(|(_, b)| !b.is_empty())
            .map(|(m, b)| (m as u8, b.as_slice()))
    }

    /// Every descriptor, materials in ascending order.
    pub fn descriptors(&self) -> impl Iterator<Item = &BlockDescriptor> + '_ {
        self.buckets.iter().flatten()
    }

    /// Total descriptor count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// True if no descriptors were produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Number of descriptors of one type.
    #[must_use]
    pub fn count(&self, block_type: BlockType) -> usize {
        self.descriptors()
            .filter(|d| d.block_type == block_type)
            .count()
    }

    /// Per-type counts indexed by [`BlockType::index`].
    #[must_use]
    pub fn histogram(&self) -> [usize; BlockType::COUNT] {
        let mut counts = [0; BlockType::COUNT];
        for d in self.descriptors() {
            counts[d.block_type.index()] += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchors() {
        let cell = Coord::new(1, 0, -1);
        assert_eq!(octant_anchor(cell, [1, -1, 1]), Coord::new(7, 1, -1));
        // Edge along Z sits on the cell's x/y boundary.
        assert_eq!(edge_anchor(cell, [1, -1, 1], Axis::Z), Coord::new(8, 0, -1));
    }

    #[test]
    fn test_cell_from_anchor() {
        let d = BlockDescriptor {
            block_type: BlockType::Side,
            sign: [-1, -1, 1],
            axis: Some(Axis::Y),
            anchor: octant_anchor(Coord::new(-2, 3, 0), [-1, -1, 1]),
            material: 4,
        };
        assert_eq!(d.cell(), Coord::new(-2, 3, 0));

        let edge = BlockDescriptor {
            block_type: BlockType::BreakPoint,
            anchor: edge_anchor(Coord::new(1, 1, 1), [1, 1, 1], Axis::Z),
            sign: [1, 1, 1],
            ..d
        };
        assert_eq!(edge.cell(), Coord::new(1, 1, 1));
        assert_eq!(d.anchor_position(), [-1.75, 3.25, 0.75]);
    }

    #[test]
    fn test_buckets() {
        let mut buckets = MaterialBuckets::new();
        let d = |material, block_type| BlockDescriptor {
            block_type,
            sign: [1, 1, 1],
            axis: None,
            anchor: Coord::ZERO,
            material,
        };
        buckets.push(d(9, BlockType::Corner));
        buckets.push(d(2, BlockType::Cross));
        buckets.push(d(9, BlockType::Corner));

        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets.get(9).len(), 2);
        let materials: Vec<u8> = buckets.iter().map(|(m, _)| m).collect();
        assert_eq!(materials, vec![2, 9]);
        assert_eq!(buckets.count(BlockType::Corner), 2);
        assert_eq!(buckets.histogram()[BlockType::Cross.index()], 1);

        buckets.clear();
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_axis_free_types() {
        let free: Vec<BlockType> = BlockType::ALL
            .into_iter()
            .filter(|t| !t.has_axis())
            .collect();
        assert_eq!(
            free,
            vec![BlockType::Corner, BlockType::Cross, BlockType::NegativeCorner]
        );
        for (i, t) in BlockType::ALL.into_iter().enumerate() {
            assert_eq!(t.index(), i);
        }
    }
}
