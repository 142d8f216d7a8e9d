//! Classifier configuration.
//!
//! ```toml
//! merge_close_edges = true
//! open_on_sides = false
//! separate_materials = true
//! mesh_material_boundaries = true
//! ```
//!
//! Omitted keys take their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BlocksError, BlocksResult};

/// Flags steering one classification pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Emit break-point markers where two chamfered edges meet diagonally.
    pub merge_close_edges: bool,
    /// Treat cells outside the volume as empty. When off, sampling clamps to
    /// the nearest in-bounds cell and boundary chamfers disappear.
    pub open_on_sides: bool,
    /// Classify each material as its own shape. Without
    /// `mesh_material_boundaries` the seam between two materials stays
    /// hidden, so the geometry matches the joined volume.
    pub separate_materials: bool,
    /// With `separate_materials`, neighbours only count when they share the
    /// cell's material, so each material is chamfered as its own shape and
    /// the boundary between two materials is meshed on both sides.
    pub mesh_material_boundaries: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            merge_close_edges: true,
            open_on_sides: true,
            separate_materials: false,
            mesh_material_boundaries: false,
        }
    }
}

impl ClassifierConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`BlocksError::InvalidConfig`] if the text is not valid TOML
    /// or a key has the wrong type.
    pub fn from_toml_str(text: &str) -> BlocksResult<Self> {
        toml::from_str(text).map_err(|e| BlocksError::InvalidConfig(e.to_string()))
    }

    /// Loads a config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`BlocksError::Io`] if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> BlocksResult<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.as_ref().display(), ?config, "classifier config loaded");
        Ok(config)
    }

    /// Serializes back to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`BlocksError::InvalidConfig`] if serialization fails.
    pub fn to_toml_string(&self) -> BlocksResult<String> {
        toml::to_string(self).map_err(|e| BlocksError::InvalidConfig(e.to_string()))
    }
}
