//! VOX File Writer
//!
//! Writes a volume as a single-model VOX file: header, then a MAIN chunk
//! holding one SIZE and one XYZI record, plus RGBA when a palette is set.
//! Every filled cell is listed with its material index as the colour byte;
//! shape, orientation and extra data are not representable and are dropped.

use std::fs;
use std::path::Path;

use chamfer_core::Volume;

use crate::chunk::Chunk;
use crate::error::{VoxError, VoxResult};
use crate::vox_loader::{VoxPalette, MAX_MODEL_EXTENT, VOX_MAGIC, VOX_VERSION};

/// VOX file writer.
#[derive(Debug, Clone, Default)]
pub struct VoxWriter {
    y_up: bool,
    palette: Option<VoxPalette>,
}

impl VoxWriter {
    /// Creates a writer with Z-up axes and no palette.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Treats the volume as Y-up, swapping Y and Z on the way out. Mirrors
    /// `ImportOptions::y_up`.
    #[must_use]
    pub fn with_y_up(mut self, y_up: bool) -> Self {
        self.y_up = y_up;
        self
    }

    /// Includes an RGBA palette record.
    #[must_use]
    pub fn with_palette(mut self, palette: VoxPalette) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Encodes `volume`.
    ///
    /// # Errors
    ///
    /// Returns [`VoxError::InvalidFormat`] if any extent exceeds 256, since
    /// voxel coordinates are single bytes.
    pub fn write(&self, volume: &Volume) -> VoxResult<Vec<u8>> {
        let extents = volume.extents();
        let (w, h, d) = (extents.width, extents.height, extents.depth);
        if [w, h, d].iter().any(|&e| e > MAX_MODEL_EXTENT) {
            return Err(VoxError::InvalidFormat(format!(
                "volume {extents} exceeds {MAX_MODEL_EXTENT} on some axis"
            )));
        }
        let size = if self.y_up { [w, d, h] } else { [w, h, d] };

        let mut size_content = Vec::with_capacity(12);
        for s in size {
            size_content.extend_from_slice(&s.to_le_bytes());
        }

        let filled = volume.filled_count();
        let mut xyzi = Vec::with_capacity(4 + 4 * filled);
        xyzi.extend_from_slice(&(filled as u32).to_le_bytes());
        for (c, voxel) in volume.iter_filled() {
            let (x, y, z) = if self.y_up { (c.x, c.z, c.y) } else { (c.x, c.y, c.z) };
            xyzi.extend_from_slice(&[x as u8, y as u8, z as u8, voxel.material()]);
        }

        let mut children = vec![Chunk::new(*b"SIZE", size_content), Chunk::new(*b"XYZI", xyzi)];
        if let Some(palette) = &self.palette {
            let mut rgba = Vec::with_capacity(1024);
            for i in 0..=255u8 {
                rgba.extend_from_slice(&palette.get(i));
            }
            children.push(Chunk::new(*b"RGBA", rgba));
        }

        let main = Chunk::with_children(*b"MAIN", children);
        let mut out = Vec::with_capacity(8 + main.encoded_len() as usize);
        out.extend_from_slice(&VOX_MAGIC);
        out.extend_from_slice(&VOX_VERSION.to_le_bytes());
        main.write_to(&mut out)?;

        tracing::debug!(%extents, voxels = filled, bytes = out.len(), "VOX model written");
        Ok(out)
    }

    /// Encodes `volume` and writes it to `path`.
    ///
    /// # Errors
    ///
    /// As [`Self::write`], plus [`VoxError::Io`] if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>, volume: &Volume) -> VoxResult<()> {
        let bytes = self.write(volume)?;
        fs::write(path, bytes)?;
        Ok(())
    }
}
