//! # Chamfer Assets
//!
//! Reading and writing voxel volumes in the chunked VOX interchange format.
//!
//! ## Example
//!
//! ```rust
//! use chamfer_assets::{import_volume, ImportOptions, VoxWriter};
//! use chamfer_core::{Volume, Voxel};
//!
//! let mut volume = Volume::new(2, 2, 2);
//! volume.fill(Voxel::filled(0));
//! let bytes = VoxWriter::new().write(&volume).unwrap();
//! let back = import_volume(&bytes, &ImportOptions::default()).unwrap();
//! assert_eq!(back, volume);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod chunk;
pub mod error;
pub mod vox_loader;
pub mod vox_writer;

pub use chunk::Chunk;
pub use error::{VoxError, VoxResult};
pub use vox_loader::{
    import_volume, ImportOptions, ImportedVolume, VoxFile, VoxLoader, VoxModel, VoxPalette,
    VoxVoxel, VOX_MAGIC, VOX_VERSION,
};
pub use vox_writer::VoxWriter;
