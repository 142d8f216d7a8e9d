//! # Chamfer Core
//!
//! The editable voxel model underneath the chamfer mesher:
//! - [`Voxel`]: one packed `u32` per cell (filled, material, shape, orientation, extra)
//! - [`Orientation`]: the 48 rotations and reflections of the cube
//! - [`Volume`]: a dense grid with ranged edits, copies, turns, mirrors and resizes
//!
//! ## Rules
//!
//! 1. **Out of range is not an error** - reads return [`Voxel::EMPTY`], writes are dropped
//! 2. **One notification per operation** - subscribers see a single [`VolumeChange`]
//! 3. **No hidden state** - the editor's selection travels in an [`EditContext`]
//!
//! ## Example
//!
//! ```rust
//! use chamfer_core::{Coord, EditAction, EditContext, Volume};
//!
//! let mut volume = Volume::new(4, 4, 4);
//! let ctx = EditContext::with_material(3);
//! volume.set_range(Coord::new(0, 0, 0), Coord::new(3, 0, 3), EditAction::Overwrite, ctx.payload());
//! assert_eq!(volume.filled_count(), 16);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod coord;
pub mod direction;
pub mod edit;
pub mod notify;
pub mod orientation;
pub mod transform;
pub mod volume;
pub mod voxel;

pub use coord::{Coord, Extents};
pub use direction::{Axis, Direction};
pub use edit::{EditAction, EditContext};
pub use notify::{ChangeKind, VolumeChange};
pub use orientation::{Orientation, ORIENTATION_COUNT};
pub use transform::{resized_extents, ResizeMode};
pub use volume::Volume;
pub use voxel::{Voxel, VoxelFields, MAX_EXTRA, MAX_ORIENTATION_FIELD};
