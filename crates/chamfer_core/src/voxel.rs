//! Packed voxel codec.
//!
//! A voxel is packed into 4 bytes:
//!
//! ```text
//! bit  31     30..22      21..14     13..8         7..0
//!     [fill] [extra: 9] [shape: 8] [orient: 6] [material: 8]
//! ```
//!
//! The fill bit alone decides `is_filled`; the all-zero value is the empty
//! sentinel [`Voxel::EMPTY`]. Field writes mask to the field width, so an
//! oversized value wraps instead of spilling into its neighbours.

use bytemuck::{Pod, Zeroable};

use crate::orientation::Orientation;

const MATERIAL_SHIFT: u32 = 0;
const MATERIAL_MASK: u32 = 0xFF;
const ORIENTATION_SHIFT: u32 = 8;
const ORIENTATION_MASK: u32 = 0x3F;
const SHAPE_SHIFT: u32 = 14;
const SHAPE_MASK: u32 = 0xFF;
const EXTRA_SHIFT: u32 = 22;
const EXTRA_MASK: u32 = 0x1FF;
const FILLED_BIT: u32 = 1 << 31;

/// Largest value the extra-data field holds.
pub const MAX_EXTRA: u16 = EXTRA_MASK as u16;

/// Largest value the orientation field holds (valid orientations stop at 47).
pub const MAX_ORIENTATION_FIELD: u8 = ORIENTATION_MASK as u8;

/// Decoded voxel fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VoxelFields {
    /// Whether the cell is occupied.
    pub filled: bool,
    /// Material / palette index.
    pub material: u8,
    /// Shape (mesh family) id.
    pub shape: u8,
    /// Orientation field, `0..48` for valid orientations.
    pub orientation: u8,
    /// Shape-specific payload, 9 bits.
    pub extra: u16,
}

/// One cell of a volume.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Voxel(u32);

impl Voxel {
    /// The empty cell.
    pub const EMPTY: Self = Self(0);

    /// Packs fields into a voxel. Each field is masked to its width.
    #[inline]
    #[must_use]
    pub const fn encode(fields: VoxelFields) -> Self {
        let mut bits = ((fields.material as u32) & MATERIAL_MASK) << MATERIAL_SHIFT
            | ((fields.orientation as u32) & ORIENTATION_MASK) << ORIENTATION_SHIFT
            | ((fields.shape as u32) & SHAPE_MASK) << SHAPE_SHIFT
            | ((fields.extra as u32) & EXTRA_MASK) << EXTRA_SHIFT;
        if fields.filled {
            bits |= FILLED_BIT;
        }
        Self(bits)
    }

    /// Unpacks every field.
    #[inline]
    #[must_use]
    pub const fn decode(self) -> VoxelFields {
        VoxelFields {
            filled: self.is_filled(),
            material: self.material(),
            shape: self.shape(),
            orientation: self.orientation(),
            extra: self.extra(),
        }
    }

    /// A filled voxel of `material` with default shape and orientation.
    #[inline]
    #[must_use]
    pub const fn filled(material: u8) -> Self {
        Self::encode(VoxelFields {
            filled: true,
            material,
            shape: 0,
            orientation: 0,
            extra: 0,
        })
    }

    /// Wraps a raw packed value.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw packed value.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True if the cell is occupied.
    #[inline]
    #[must_use]
    pub const fn is_filled(self) -> bool {
        self.0 & FILLED_BIT != 0
    }

    /// True if the cell is unoccupied.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        !self.is_filled()
    }

    /// Material index.
    #[inline]
    #[must_use]
    pub const fn material(self) -> u8 {
        ((self.0 >> MATERIAL_SHIFT) & MATERIAL_MASK) as u8
    }

    /// Shape id.
    #[inline]
    #[must_use]
    pub const fn shape(self) -> u8 {
        ((self.0 >> SHAPE_SHIFT) & SHAPE_MASK) as u8
    }

    /// Raw orientation field.
    #[inline]
    #[must_use]
    pub const fn orientation(self) -> u8 {
        ((self.0 >> ORIENTATION_SHIFT) & ORIENTATION_MASK) as u8
    }

    /// Extra payload.
    #[inline]
    #[must_use]
    pub const fn extra(self) -> u16 {
        ((self.0 >> EXTRA_SHIFT) & EXTRA_MASK) as u16
    }

    /// The orientation field as a transform, reduced modulo 48.
    #[inline]
    #[must_use]
    pub const fn orientation_transform(self) -> Orientation {
        Orientation::from_index(self.orientation() as i32)
    }

    /// Copy with the fill bit set or cleared. Other fields are kept.
    #[inline]
    #[must_use]
    pub const fn with_filled(self, filled: bool) -> Self {
        if filled {
            Self(self.0 | FILLED_BIT)
        } else {
            Self(self.0 & !FILLED_BIT)
        }
    }

    /// Copy with a new material.
    #[inline]
    #[must_use]
    pub const fn with_material(self, material: u8) -> Self {
        self.with_field(MATERIAL_SHIFT, MATERIAL_MASK, material as u32)
    }

    /// Copy with a new shape id.
    #[inline]
    #[must_use]
    pub const fn with_shape(self, shape: u8) -> Self {
        self.with_field(SHAPE_SHIFT, SHAPE_MASK, shape as u32)
    }

    /// Copy with a new orientation field, wrapped modulo 64.
    #[inline]
    #[must_use]
    pub const fn with_orientation(self, orientation: u8) -> Self {
        self.with_field(ORIENTATION_SHIFT, ORIENTATION_MASK, orientation as u32)
    }

    /// Copy with a new extra payload, wrapped modulo 512.
    #[inline]
    #[must_use]
    pub const fn with_extra(self, extra: u16) -> Self {
        self.with_field(EXTRA_SHIFT, EXTRA_MASK, extra as u32)
    }

    /// Sets the fill bit in place.
    #[inline]
    pub fn set_filled(&mut self, filled: bool) {
        *self = self.with_filled(filled);
    }

    /// Sets the material in place.
    #[inline]
    pub fn set_material(&mut self, material: u8) {
        *self = self.with_material(material);
    }

    /// Sets the shape id in place.
    #[inline]
    pub fn set_shape(&mut self, shape: u8) {
        *self = self.with_shape(shape);
    }

    /// Sets the orientation field in place, wrapped modulo 64.
    #[inline]
    pub fn set_orientation(&mut self, orientation: u8) {
        *self = self.with_orientation(orientation);
    }

    /// Sets the extra payload in place, wrapped modulo 512.
    #[inline]
    pub fn set_extra(&mut self, extra: u16) {
        *self = self.with_extra(extra);
    }

    #[inline]
    const fn with_field(self, shift: u32, mask: u32, value: u32) -> Self {
        Self((self.0 & !(mask << shift)) | ((value & mask) << shift))
    }
}

impl From<VoxelFields> for Voxel {
    fn from(fields: VoxelFields) -> Self {
        Self::encode(fields)
    }
}

impl From<Voxel> for VoxelFields {
    fn from(voxel: Voxel) -> Self {
        voxel.decode()
    }
}
