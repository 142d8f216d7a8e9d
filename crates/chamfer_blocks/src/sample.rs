//! Neighbour sampling.
//!
//! For each visited cell the classifier reads its 3x3x3 neighbourhood once
//! into two 27-bit masks, then derives the seven neighbours each octant
//! needs by bit lookups. Nothing here is stored between cells.

use chamfer_core::{Axis, Coord, Volume, Voxel};

use crate::config::ClassifierConfig;

/// Bit index of neighbour offset `(dx, dy, dz)`, each in `-1..=1`.
#[inline]
const fn bit(dx: i32, dy: i32, dz: i32) -> u32 {
    ((dx + 1) + 3 * (dy + 1) + 9 * (dz + 1)) as u32
}

/// The 3x3x3 neighbourhood of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighbourSample {
    /// Neighbours that count as "same" under the active test.
    same: u32,
    /// Neighbours holding any filled voxel.
    occupied: u32,
}

impl NeighbourSample {
    /// Builds a sample from raw masks. Bit `(dx+1) + 3(dy+1) + 9(dz+1)`.
    #[must_use]
    pub const fn from_masks(same: u32, occupied: u32) -> Self {
        Self {
            same: same & 0x7FF_FFFF,
            occupied: occupied & 0x7FF_FFFF,
        }
    }

    /// Samples the neighbourhood of `cell`.
    ///
    /// Off-volume neighbours are empty when `open_on_sides` is set, otherwise
    /// they read the nearest in-bounds cell. A neighbour is only "same" if it
    /// shares `cell`'s material when both `separate_materials` and
    /// `mesh_material_boundaries` are set; otherwise a neighbour of another
    /// material is solid wall, so the seam between materials stays hidden on
    /// faces, edges and corners alike.
    #[must_use]
    pub fn gather(volume: &Volume, cell: Coord, config: &ClassifierConfig) -> Self {
        let extents = volume.extents();
        let centre = volume.try_get(cell).unwrap_or(Voxel::EMPTY);
        let split = config.separate_materials && config.mesh_material_boundaries;
        let mut same = 0;
        let mut occupied = 0;
        for dz in -1..=1 {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let p = Coord::new(cell.x + dx, cell.y + dy, cell.z + dz);
                    let voxel = match volume.try_get(p) {
                        Some(v) => v,
                        None if config.open_on_sides || extents.is_empty() => Voxel::EMPTY,
                        None => volume.try_get(extents.clamp(p)).unwrap_or(Voxel::EMPTY),
                    };
                    if voxel.is_filled() {
                        let b = 1 << bit(dx, dy, dz);
                        occupied |= b;
                        if !split || voxel.material() == centre.material() {
                            same |= b;
                        }
                    }
                }
            }
        }
        Self { same, occupied }
    }

    /// True if the neighbour at the offset counts as "same".
    #[inline]
    #[must_use]
    pub const fn is_same(&self, dx: i32, dy: i32, dz: i32) -> bool {
        (self.same & (1 << bit(dx, dy, dz))) != 0
    }

    /// True if the neighbour at the offset holds any filled voxel.
    #[inline]
    #[must_use]
    pub const fn is_occupied(&self, dx: i32, dy: i32, dz: i32) -> bool {
        (self.occupied & (1 << bit(dx, dy, dz))) != 0
    }

    /// True if all 26 neighbours count as "same".
    #[must_use]
    pub const fn is_enclosed(&self) -> bool {
        (self.same | (1 << bit(0, 0, 0))) == 0x7FF_FFFF
    }

    /// The seven neighbours relevant to the octant with the given signs.
    #[must_use]
    pub fn octant(&self, sign: [i8; 3]) -> OctantSample {
        let s = sign.map(i32::from);
        let along = |axis: Axis| {
            let mut o = [0; 3];
            o[axis.index()] = s[axis.index()];
            o
        };
        let across = |axis: Axis| {
            let mut o = s;
            o[axis.index()] = 0;
            o
        };
        let mut sample = OctantSample::default();
        for axis in Axis::ALL {
            let [x, y, z] = along(axis);
            sample.axis[axis.index()] = self.is_same(x, y, z);
            let [x, y, z] = across(axis);
            sample.cross[axis.index()] = self.is_same(x, y, z);
        }
        sample.corner = self.is_same(s[0], s[1], s[2]);
        sample
    }
}

/// Neighbours of one octant, expressed in the octant's own frame.
///
/// All lookups are toward the octant: `axis[X]` is the neighbour one step
/// along X in the octant's X sign, and so on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OctantSample {
    /// Axis-adjacent neighbours, indexed by axis.
    pub axis: [bool; 3],
    /// Face-diagonal neighbours, indexed by the axis they do NOT step along.
    pub cross: [bool; 3],
    /// The corner-diagonal neighbour.
    pub corner: bool,
}

impl OctantSample {
    /// Number of axis neighbours present.
    #[inline]
    #[must_use]
    pub fn neighbour_count(&self) -> usize {
        self.axis.iter().filter(|&&n| n).count()
    }

    /// Number of face-diagonal neighbours present.
    #[inline]
    #[must_use]
    pub fn cross_count(&self) -> usize {
        self.cross.iter().filter(|&&n| n).count()
    }

    /// Face-diagonal neighbour stepping along `a` and `b`.
    #[inline]
    #[must_use]
    pub const fn cross_of(&self, a: Axis, b: Axis) -> bool {
        self.cross[a.third(b).index()]
    }
}
