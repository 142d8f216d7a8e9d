//! # CHAMFER
//!
//! Voxel volumes rendered as chamfered surfaces.
//!
//! ## Data Flow
//!
//! ```text
//! ┌───────────────┐  VolumeChange   ┌───────────────┐  MaterialBuckets  ┌───────────────┐
//! │ chamfer_core  │ ──────────────> │ chamfer_blocks│ ────────────────> │   assemble    │
//! │               │                 │               │                   │               │
//! │ • Voxel codec │                 │ • Neighbours  │                   │ • Fragments   │
//! │ • Orientation │                 │ • Octant table│                   │ • Placement   │
//! │ • Volume edits│                 │ • Descriptors │                   │ • Per material│
//! └───────▲───────┘                 └───────────────┘                   └───────────────┘
//!         │
//! ┌───────┴───────┐
//! │chamfer_assets │
//! │ • VOX import  │
//! │ • VOX export  │
//! └───────────────┘
//! ```
//!
//! ## Modules
//!
//! - `pipeline`: A volume plus classifier, reclassified on demand

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod pipeline;

pub use chamfer_assets as assets;
pub use chamfer_blocks as blocks;
pub use chamfer_core as core;

pub use chamfer_assets::{import_volume, ImportOptions, VoxLoader, VoxWriter};
pub use chamfer_blocks::{
    assemble, classify, BlockDescriptor, BlockType, ClassifierConfig, FragmentMap,
    MaterialBuckets, MeshFragment,
};
pub use chamfer_core::{
    Axis, Coord, Direction, EditAction, Extents, Orientation, ResizeMode, Volume, Voxel,
};
pub use pipeline::Pipeline;
