//! VOX File Loader
//!
//! Parser for the chunked binary voxel interchange format.
//!
//! ## VOX Format Reference
//!
//! ```text
//! VOX File Structure:
//! ├── "VOX " (4 bytes) - Magic number
//! ├── Version (4 bytes) - File version (150)
//! └── MAIN Chunk
//!     ├── SIZE Chunk - Model dimensions (3 x u32)
//!     ├── XYZI Chunk - u32 count, then count x (x, y, z, material) bytes
//!     ├── ...        - Further SIZE/XYZI pairs, one per model
//!     └── RGBA Chunk - Palette (optional, 256 x RGBA)
//! ```
//!
//! Chunks are walked recursively and unknown tags are ignored. The material
//! byte becomes the voxel's material index as-is; every listed voxel is
//! filled.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chamfer_assets::{ImportOptions, VoxLoader};
//!
//! let file = VoxLoader::load("assets/models/arch.vox")?;
//! let imported = file.to_volume(&ImportOptions::default())?;
//! ```

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use chamfer_core::{Coord, Extents, Volume, Voxel};
use serde::{Deserialize, Serialize};

use crate::chunk::{content_u32, read_chunk_id, read_u32, Chunk, HEADER_SIZE};
use crate::error::{VoxError, VoxResult};

/// VOX file magic number.
pub const VOX_MAGIC: [u8; 4] = *b"VOX ";

/// Version written by this crate.
pub const VOX_VERSION: u32 = 150;

/// Oldest accepted version.
pub const MIN_VERSION: u32 = 150;

/// Newest accepted version.
pub const MAX_VERSION: u32 = 200;

/// Largest accepted model extent on any axis. Voxel coordinates are bytes,
/// so nothing beyond this could ever be populated, and a hostile `SIZE`
/// cannot force a huge dense allocation.
pub const MAX_MODEL_EXTENT: u32 = 256;

/// How a file model becomes a volume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Swap file Y and Z, turning a Z-up file into a Y-up volume.
    pub y_up: bool,
    /// Which model to import when the file holds several.
    pub model_index: usize,
}

/// Single voxel entry from a VOX file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoxVoxel {
    /// X position.
    pub x: u8,
    /// Y position.
    pub y: u8,
    /// Z position.
    pub z: u8,
    /// Material index.
    pub color_index: u8,
}

/// One SIZE + XYZI pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxModel {
    /// Declared extents in file axes.
    pub size: [u32; 3],
    /// Voxel entries in file order. Entries may lie outside `size`.
    pub voxels: Vec<VoxVoxel>,
}

impl VoxModel {
    /// Volume extents for this model.
    #[must_use]
    pub fn extents(&self, y_up: bool) -> Extents {
        let [x, y, z] = self.size;
        let extents = if y_up {
            Extents::new(x, z, y)
        } else {
            Extents::new(x, y, z)
        };
        if extents.is_empty() {
            Extents::ZERO
        } else {
            extents
        }
    }
}

/// RGBA palette, stored exactly as the file lists it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxPalette {
    /// 256 entries of `[r, g, b, a]`.
    pub colors: Vec<[u8; 4]>,
}

impl VoxPalette {
    /// Entry at `index`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: u8) -> [u8; 4] {
        self.colors
            .get(usize::from(index))
            .copied()
            .unwrap_or([0; 4])
    }
}

/// Parsed VOX file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxFile {
    /// Model name (from filename).
    pub name: String,
    /// Version field from the header.
    pub version: u32,
    /// Models in file order.
    pub models: Vec<VoxModel>,
    /// Palette, if the file carries one.
    pub palette: Option<VoxPalette>,
}

/// A volume built from a file model.
#[derive(Debug, Clone)]
pub struct ImportedVolume {
    /// The populated volume.
    pub volume: Volume,
    /// Voxel entries written.
    pub placed: usize,
    /// Voxel entries skipped for lying outside the declared extents.
    pub skipped: usize,
}

impl VoxFile {
    /// Total voxel entries across all models.
    #[must_use]
    pub fn voxel_count(&self) -> usize {
        self.models.iter().map(|m| m.voxels.len()).sum()
    }

    /// Builds a volume from the model chosen by `options`.
    ///
    /// # Errors
    ///
    /// Returns [`VoxError::InvalidFormat`] if `options.model_index` names no
    /// model.
    pub fn to_volume(&self, options: &ImportOptions) -> VoxResult<ImportedVolume> {
        let model = self.models.get(options.model_index).ok_or_else(|| {
            VoxError::InvalidFormat(format!(
                "model {} requested, file has {}",
                options.model_index,
                self.models.len()
            ))
        })?;

        let extents = model.extents(options.y_up);
        let mut voxels = vec![Voxel::EMPTY; extents.volume()];
        let mut placed = 0;
        let mut skipped = 0;
        for v in &model.voxels {
            let (x, y, z) = (i32::from(v.x), i32::from(v.y), i32::from(v.z));
            let coord = if options.y_up {
                Coord::new(x, z, y)
            } else {
                Coord::new(x, y, z)
            };
            match extents.index_of(coord) {
                Some(i) => {
                    voxels[i] = Voxel::filled(v.color_index);
                    placed += 1;
                }
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::warn!(
                name = %self.name,
                skipped,
                %extents,
                "voxel entries outside declared size were skipped"
            );
        }
        let volume = Volume::from_voxels(extents, voxels).ok_or_else(|| {
            VoxError::InvalidFormat(format!("voxel storage does not match extents {extents}"))
        })?;
        tracing::debug!(name = %self.name, %extents, placed, "VOX model imported");

        Ok(ImportedVolume {
            volume,
            placed,
            skipped,
        })
    }
}

/// VOX file loader.
pub struct VoxLoader;

impl VoxLoader {
    /// Loads a VOX file from disk.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or has invalid format.
    pub fn load<P: AsRef<Path>>(path: P) -> VoxResult<VoxFile> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed")
            .to_string();

        let file = File::open(path)?;
        let mut reader = io::BufReader::new(file);

        Self::parse(&mut reader, name)
    }

    /// Loads a VOX file from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns error if data has invalid format.
    pub fn load_from_bytes(data: &[u8], name: impl Into<String>) -> VoxResult<VoxFile> {
        let mut cursor = io::Cursor::new(data);
        Self::parse(&mut cursor, name.into())
    }

    /// Parses VOX data from a reader.
    ///
    /// # Errors
    ///
    /// Returns [`VoxError::InvalidFormat`] for a bad magic number,
    /// [`VoxError::UnsupportedVersion`] outside 150..=200,
    /// [`VoxError::MissingChunk`] when no SIZE or XYZI record is present,
    /// and [`VoxError::InvalidChunk`] for malformed records.
    pub fn parse<R: Read + Seek>(reader: &mut R, name: String) -> VoxResult<VoxFile> {
        let magic = read_chunk_id(reader)?;
        if magic != VOX_MAGIC {
            return Err(VoxError::InvalidFormat(format!(
                "expected 'VOX ', got '{}'",
                String::from_utf8_lossy(&magic)
            )));
        }

        let version = read_u32(reader)?;
        if !(MIN_VERSION..=MAX_VERSION).contains(&version) {
            return Err(VoxError::UnsupportedVersion(version));
        }

        let start = reader.stream_position()?;
        let end = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(start))?;

        let mut roots = Vec::new();
        while end - reader.stream_position()? >= HEADER_SIZE {
            roots.push(Chunk::read(reader, end, 0)?);
        }

        let mut records = Vec::new();
        for root in &roots {
            root.visit(&mut |c| records.push(c));
        }

        let mut models = Vec::new();
        let mut pending_size = None;
        let mut palette = None;
        for chunk in records {
            match &chunk.id {
                b"SIZE" => pending_size = Some(parse_size(chunk)?),
                b"XYZI" => {
                    let size = pending_size.take().ok_or(VoxError::MissingChunk("SIZE"))?;
                    models.push(VoxModel {
                        size,
                        voxels: parse_voxels(chunk)?,
                    });
                }
                b"RGBA" => palette = Some(parse_palette(chunk)?),
                _ => {}
            }
        }

        if models.is_empty() {
            return Err(VoxError::MissingChunk(if pending_size.is_some() {
                "XYZI"
            } else {
                "SIZE"
            }));
        }

        let file = VoxFile {
            name,
            version,
            models,
            palette,
        };
        tracing::debug!(
            name = %file.name,
            version,
            models = file.models.len(),
            voxels = file.voxel_count(),
            "VOX file parsed"
        );
        Ok(file)
    }
}

/// Parses `data` and imports the model chosen by `options` in one step.
///
/// # Errors
///
/// As [`VoxLoader::parse`] and [`VoxFile::to_volume`].
pub fn import_volume(data: &[u8], options: &ImportOptions) -> VoxResult<Volume> {
    let file = VoxLoader::load_from_bytes(data, "memory")?;
    Ok(file.to_volume(options)?.volume)
}

fn parse_size(chunk: &Chunk) -> VoxResult<[u32; 3]> {
    let field = |i: usize| {
        content_u32(&chunk.content, i * 4)
            .ok_or_else(|| VoxError::InvalidChunk("SIZE shorter than 12 bytes".to_string()))
    };
    let size = [field(0)?, field(1)?, field(2)?];
    if size.iter().any(|&s| s > MAX_MODEL_EXTENT) {
        return Err(VoxError::InvalidChunk(format!(
            "SIZE {size:?} exceeds {MAX_MODEL_EXTENT}"
        )));
    }
    Ok(size)
}

fn parse_voxels(chunk: &Chunk) -> VoxResult<Vec<VoxVoxel>> {
    let count = content_u32(&chunk.content, 0)
        .ok_or_else(|| VoxError::InvalidChunk("XYZI missing voxel count".to_string()))?;
    let needed = 4 + 4 * u64::from(count);
    if (chunk.content.len() as u64) < needed {
        return Err(VoxError::InvalidChunk(format!(
            "XYZI lists {count} voxels in {} bytes",
            chunk.content.len()
        )));
    }
    Ok(chunk.content[4..needed as usize]
        .chunks_exact(4)
        .map(|b| VoxVoxel {
            x: b[0],
            y: b[1],
            z: b[2],
            color_index: b[3],
        })
        .collect())
}

fn parse_palette(chunk: &Chunk) -> VoxResult<VoxPalette> {
    if chunk.content.len() < 256 * 4 {
        return Err(VoxError::InvalidChunk(format!(
            "RGBA holds {} bytes, expected 1024",
            chunk.content.len()
        )));
    }
    let colors = chunk.content[..256 * 4]
        .chunks_exact(4)
        .map(|b| [b[0], b[1], b[2], b[3]])
        .collect();
    Ok(VoxPalette { colors })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_with(children: Vec<Chunk>) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&VOX_MAGIC);
        out.extend_from_slice(&VOX_VERSION.to_le_bytes());
        Chunk::with_children(*b"MAIN", children)
            .write_to(&mut out)
            .unwrap();
        out
    }

    fn size_chunk(x: u32, y: u32, z: u32) -> Chunk {
        let mut content = Vec::new();
        for v in [x, y, z] {
            content.extend_from_slice(&v.to_le_bytes());
        }
        Chunk::new(*b"SIZE", content)
    }

    fn xyzi_chunk(voxels: &[[u8; 4]]) -> Chunk {
        let mut content = (voxels.len() as u32).to_le_bytes().to_vec();
        for v in voxels {
            content.extend_from_slice(v);
        }
        Chunk::new(*b"XYZI", content)
    }

    #[test]
    fn test_load_from_bytes_invalid() {
        let result = VoxLoader::load_from_bytes(b"invalid data", "test");
        assert!(matches!(result, Err(VoxError::InvalidFormat(_))));
    }

    #[test]
    fn test_truncated_header() {
        let result = VoxLoader::load_from_bytes(b"VOX ", "test");
        assert!(matches!(result, Err(VoxError::Io(_))));
    }

    #[test]
    fn test_unsupported_version() {
        let mut bytes = file_with(vec![size_chunk(1, 1, 1), xyzi_chunk(&[])]);
        bytes[4..8].copy_from_slice(&100u32.to_le_bytes());
        assert!(matches!(
            VoxLoader::load_from_bytes(&bytes, "old"),
            Err(VoxError::UnsupportedVersion(100))
        ));
    }

    #[test]
    fn test_missing_records() {
        let no_size = file_with(vec![xyzi_chunk(&[[0, 0, 0, 1]])]);
        assert!(matches!(
            VoxLoader::load_from_bytes(&no_size, "x"),
            Err(VoxError::MissingChunk("SIZE"))
        ));

        let no_xyzi = file_with(vec![size_chunk(2, 2, 2)]);
        assert!(matches!(
            VoxLoader::load_from_bytes(&no_xyzi, "x"),
            Err(VoxError::MissingChunk("XYZI"))
        ));

        let empty = file_with(Vec::new());
        assert!(matches!(
            VoxLoader::load_from_bytes(&empty, "x"),
            Err(VoxError::MissingChunk("SIZE"))
        ));
    }

    #[test]
    fn test_out_of_bounds_entries_skipped() {
        let bytes = file_with(vec![
            size_chunk(2, 2, 2),
            xyzi_chunk(&[[0, 0, 0, 3], [2, 0, 0, 3], [1, 1, 5, 3], [1, 1, 1, 4]]),
        ]);
        let file = VoxLoader::load_from_bytes(&bytes, "partial").unwrap();
        let imported = file.to_volume(&ImportOptions::default()).unwrap();
        assert_eq!(imported.placed, 2);
        assert_eq!(imported.skipped, 2);
        assert_eq!(imported.volume.get(0, 0, 0).material(), 3);
        assert_eq!(imported.volume.get(1, 1, 1).material(), 4);
        assert_eq!(imported.volume.filled_count(), 2);
    }

    #[test]
    fn test_y_up_swaps_axes() {
        let bytes = file_with(vec![size_chunk(1, 3, 2), xyzi_chunk(&[[0, 2, 1, 7]])]);
        let options = ImportOptions {
            y_up: true,
            ..ImportOptions::default()
        };
        let volume = import_volume(&bytes, &options).unwrap();
        assert_eq!(volume.extents(), Extents::new(1, 2, 3));
        assert_eq!(volume.get(0, 1, 2).material(), 7);
    }

    #[test]
    fn test_multiple_models_and_palette() {
        let mut rgba = Vec::new();
        for i in 0..=255u8 {
            rgba.extend_from_slice(&[i, 0, 0, 255]);
        }
        let bytes = file_with(vec![
            size_chunk(1, 1, 1),
            xyzi_chunk(&[[0, 0, 0, 1]]),
            size_chunk(3, 1, 1),
            xyzi_chunk(&[[2, 0, 0, 9]]),
            Chunk::new(*b"RGBA", rgba),
        ]);
        let file = VoxLoader::load_from_bytes(&bytes, "multi").unwrap();
        assert_eq!(file.models.len(), 2);
        assert_eq!(file.voxel_count(), 2);
        assert_eq!(file.palette.as_ref().map(|p| p.get(9)), Some([9, 0, 0, 255]));

        let second = file
            .to_volume(&ImportOptions {
                model_index: 1,
                ..ImportOptions::default()
            })
            .unwrap();
        assert_eq!(second.volume.width(), 3);
        assert_eq!(second.volume.get(2, 0, 0).material(), 9);

        let missing = file.to_volume(&ImportOptions {
            model_index: 2,
            ..ImportOptions::default()
        });
        assert!(matches!(missing, Err(VoxError::InvalidFormat(_))));
    }

    #[test]
    fn test_oversized_model_rejected() {
        let bytes = file_with(vec![size_chunk(257, 1, 1), xyzi_chunk(&[])]);
        assert!(matches!(
            VoxLoader::load_from_bytes(&bytes, "huge"),
            Err(VoxError::InvalidChunk(_))
        ));
        let bytes = file_with(vec![size_chunk(1, 1, 4_000_000_000), xyzi_chunk(&[])]);
        assert!(matches!(
            VoxLoader::load_from_bytes(&bytes, "hostile"),
            Err(VoxError::InvalidChunk(_))
        ));

        let bytes = file_with(vec![size_chunk(256, 1, 1), xyzi_chunk(&[])]);
        let file = VoxLoader::load_from_bytes(&bytes, "widest").unwrap();
        let volume = file.to_volume(&ImportOptions::default()).unwrap().volume;
        assert_eq!(volume.width(), 256);
    }

    #[test]
    fn test_short_xyzi_rejected() {
        let mut content = 3u32.to_le_bytes().to_vec();
        content.extend_from_slice(&[0, 0, 0, 1]);
        let bytes = file_with(vec![size_chunk(1, 1, 1), Chunk::new(*b"XYZI", content)]);
        assert!(matches!(
            VoxLoader::load_from_bytes(&bytes, "short"),
            Err(VoxError::InvalidChunk(_))
        ));
    }

    #[test]
    fn test_unknown_chunks_ignored() {
        let bytes = file_with(vec![
            Chunk::new(*b"nTRN", vec![1, 2, 3]),
            size_chunk(1, 1, 1),
            Chunk::with_children(*b"GRP ", vec![xyzi_chunk(&[[0, 0, 0, 2]])]),
        ]);
        let volume = import_volume(&bytes, &ImportOptions::default()).unwrap();
        assert!(volume.get(0, 0, 0).is_filled());
    }
}
