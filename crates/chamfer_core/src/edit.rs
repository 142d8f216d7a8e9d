//! Per-cell edit actions and the caller-owned edit context.

use crate::orientation::Orientation;
use crate::voxel::{Voxel, VoxelFields};

/// How an edit combines the payload with the cell's current contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditAction {
    /// Replace the cell with the payload.
    Overwrite,
    /// Write the payload only into empty cells.
    FillEmptyOnly,
    /// Give filled cells the payload's material; shape, orientation and extra
    /// data are kept. Empty cells and empty payloads leave the cell alone.
    RepaintFilledOnly,
    /// Empty the cell. The payload is ignored.
    Clear,
}

impl EditAction {
    /// The value the cell holds after applying this action.
    #[inline]
    #[must_use]
    pub const fn apply(self, current: Voxel, payload: Voxel) -> Voxel {
        match self {
            Self::Overwrite => payload,
            Self::FillEmptyOnly => {
                if current.is_empty() {
                    payload
                } else {
                    current
                }
            }
            Self::RepaintFilledOnly => {
                if current.is_filled() && payload.is_filled() {
                    current.with_material(payload.material())
                } else {
                    current
                }
            }
            Self::Clear => Voxel::EMPTY,
        }
    }
}

/// The editor's current selection, passed explicitly into edits.
///
/// There is no process-wide "active material"; callers own one of these and
/// turn it into a payload with [`EditContext::payload`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditContext {
    /// Material to paint with.
    pub material: u8,
    /// Shape id to place.
    pub shape: u8,
    /// Orientation to place shapes with.
    pub orientation: Orientation,
    /// Shape-specific payload.
    pub extra: u16,
}

impl EditContext {
    /// Context painting plain cubes of `material`.
    #[must_use]
    pub fn with_material(material: u8) -> Self {
        Self {
            material,
            ..Self::default()
        }
    }

    /// The filled voxel this context places.
    #[must_use]
    pub const fn payload(&self) -> Voxel {
        Voxel::encode(VoxelFields {
            filled: true,
            material: self.material,
            shape: self.shape,
            orientation: self.orientation.index(),
            extra: self.extra,
        })
    }
}
