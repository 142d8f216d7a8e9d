//! # Chamfer Blocks
//!
//! Octant classification for chamfered voxel surfaces.
//!
//! Every filled cell is split into eight octants. Each octant looks at the
//! seven neighbours on its side of the cell and is tagged with a topology
//! category (corner, edge, side and their concave and transitional
//! variants). The resulting [`BlockDescriptor`]s say which precomputed mesh
//! fragment goes where; [`assemble`] does that placement.
//!
//! ## Example
//!
//! ```rust
//! use chamfer_blocks::{BlockType, Classifier, ClassifierConfig};
//! use chamfer_core::{Coord, EditAction, Volume, Voxel};
//!
//! let mut volume = Volume::new(3, 3, 3);
//! volume.set(Coord::new(1, 1, 1), EditAction::Overwrite, Voxel::filled(1));
//!
//! let mut classifier = Classifier::new(ClassifierConfig::default());
//! let blocks = classifier.classify(&volume);
//! assert_eq!(blocks.count(BlockType::Corner), 8);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod assembly;
pub mod classifier;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod sample;
pub mod table;

pub use assembly::{assemble, AssemblyOutput, FragmentLibrary, FragmentMap, MeshFragment};
pub use classifier::{classify, ClassifyStats, Classifier, OCTANTS};
pub use config::ClassifierConfig;
pub use descriptor::{BlockDescriptor, BlockType, MaterialBuckets};
pub use error::{BlocksError, BlocksResult};
pub use sample::{NeighbourSample, OctantSample};
pub use table::{classify_octant, OctantClass, TableFlags};
