//! Chunked container records.
//!
//! ```text
//! Chunk:
//! ├── id (4 bytes)             - ASCII tag, e.g. "SIZE"
//! ├── content size (4 bytes)   - N, little-endian
//! ├── children size (4 bytes)  - M, little-endian
//! ├── content (N bytes)
//! └── children (M bytes)       - further chunks, parsed recursively
//! ```

use std::borrow::Cow;
use std::io::{Read, Seek};

use crate::error::{VoxError, VoxResult};

/// Bytes taken by a chunk header.
pub const HEADER_SIZE: u64 = 12;

/// Deepest nesting accepted when reading.
pub const MAX_DEPTH: usize = 64;

/// One record of the container with its parsed children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Four-byte tag.
    pub id: [u8; 4],
    /// Raw content bytes.
    pub content: Vec<u8>,
    /// Child records, in file order.
    pub children: Vec<Chunk>,
}

impl Chunk {
    /// Creates a leaf chunk.
    #[must_use]
    pub fn new(id: [u8; 4], content: Vec<u8>) -> Self {
        Self {
            id,
            content,
            children: Vec::new(),
        }
    }

    /// Creates a chunk with children and no content.
    #[must_use]
    pub fn with_children(id: [u8; 4], children: Vec<Chunk>) -> Self {
        Self {
            id,
            content: Vec::new(),
            children,
        }
    }

    /// Tag as text, for messages.
    #[must_use]
    pub fn id_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.id)
    }

    /// Visits this chunk and every descendant, depth first, in file order.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Chunk)) {
        f(self);
        for child in &self.children {
            child.visit(&mut *f);
        }
    }

    /// First chunk with `id` in depth-first file order, this one included.
    #[must_use]
    pub fn find(&self, id: [u8; 4]) -> Option<&Chunk> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Encoded size of the children.
    #[must_use]
    pub fn children_len(&self) -> u64 {
        self.children.iter().map(Chunk::encoded_len).sum()
    }

    /// Encoded size of the whole chunk.
    #[must_use]
    pub fn encoded_len(&self) -> u64 {
        HEADER_SIZE + self.content.len() as u64 + self.children_len()
    }

    /// Appends the encoded chunk.
    ///
    /// # Errors
    ///
    /// Returns [`VoxError::InvalidFormat`] if a size does not fit in 32 bits.
    pub fn write_to(&self, out: &mut Vec<u8>) -> VoxResult<()> {
        let content_len = u32::try_from(self.content.len())
            .map_err(|_| VoxError::InvalidFormat(format!("{} content too large", self.id_str())))?;
        let children_len = u32::try_from(self.children_len())
            .map_err(|_| VoxError::InvalidFormat(format!("{} children too large", self.id_str())))?;
        out.extend_from_slice(&self.id);
        out.extend_from_slice(&content_len.to_le_bytes());
        out.extend_from_slice(&children_len.to_le_bytes());
        out.extend_from_slice(&self.content);
        for child in &self.children {
            child.write_to(out)?;
        }
        Ok(())
    }

    /// Reads one chunk, and recursively its children, ending no later than
    /// byte `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`VoxError::InvalidChunk`] if the chunk overruns `limit` or
    /// nests deeper than [`MAX_DEPTH`], and [`VoxError::Io`] on short reads.
    pub fn read<R: Read + Seek>(reader: &mut R, limit: u64, depth: usize) -> VoxResult<Self> {
        if depth > MAX_DEPTH {
            return Err(VoxError::InvalidChunk(format!(
                "chunks nested deeper than {MAX_DEPTH}"
            )));
        }
        let id = read_chunk_id(reader)?;
        let content_len = u64::from(read_u32(reader)?);
        let children_len = u64::from(read_u32(reader)?);
        let start = reader.stream_position()?;
        let children_end = start + content_len + children_len;
        if children_end > limit {
            return Err(VoxError::InvalidChunk(format!(
                "{} claims {} bytes, only {} remain",
                String::from_utf8_lossy(&id),
                content_len + children_len,
                limit.saturating_sub(start)
            )));
        }

        let mut content = vec![0u8; content_len as usize];
        reader.read_exact(&mut content)?;

        let mut children = Vec::new();
        loop {
            let pos = reader.stream_position()?;
            if pos >= children_end {
                break;
            }
            if children_end - pos < HEADER_SIZE {
                return Err(VoxError::InvalidChunk(format!(
                    "{} has {} stray bytes among its children",
                    String::from_utf8_lossy(&id),
                    children_end - pos
                )));
            }
            children.push(Self::read(reader, children_end, depth + 1)?);
        }

        Ok(Self {
            id,
            content,
            children,
        })
    }
}

/// Reads a little-endian u32.
pub(crate) fn read_u32<R: Read>(reader: &mut R) -> VoxResult<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Reads a 4-byte chunk ID.
pub(crate) fn read_chunk_id<R: Read>(reader: &mut R) -> VoxResult<[u8; 4]> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

/// Little-endian u32 at `offset` within chunk content.
pub(crate) fn content_u32(content: &[u8], offset: usize) -> Option<u32> {
    let bytes = content.get(offset..offset + 4)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
