//! Entry encoding
//!
//! The write path packs key and value into a single buffer before handing a
//! reference to the memtable.
//!
//! ## Format
//! ```text
//! ┌──────────────┬─────────┬───────────┐
//! │ KeyLen (4)   │   Key   │   Value   │
//! └──────────────┴─────────┴───────────┘
//! ```
//! KeyLen is little-endian u32.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{MemTableError, Result};

/// Size of the key length prefix
pub const ENTRY_HEADER_SIZE: usize = 4;

/// Encode a key/value pair into a single buffer.
///
/// Fails if the key length does not fit the u32 header.
pub fn encode_entry(key: &[u8], value: &[u8]) -> Result<Bytes> {
    let key_len = encode_key_len(key.len())?;
    let mut buf = BytesMut::with_capacity(ENTRY_HEADER_SIZE + key.len() + value.len());
    buf.put_u32_le(key_len);
    buf.put_slice(key);
    buf.put_slice(value);
    Ok(buf.freeze())
}

fn encode_key_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| MemTableError::KeyTooLarge(len))
}

/// Split an encoded entry into (key, value)
pub fn decode_entry(entry: &[u8]) -> Result<(&[u8], &[u8])> {
    if entry.len() < ENTRY_HEADER_SIZE {
        return Err(MemTableError::MalformedEntry {
            len: entry.len(),
            needed: ENTRY_HEADER_SIZE,
        });
    }

    let (header, rest) = entry.split_at(ENTRY_HEADER_SIZE);
    let key_len = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;

    if rest.len() < key_len {
        return Err(MemTableError::MalformedEntry {
            len: entry.len(),
            needed: ENTRY_HEADER_SIZE + key_len,
        });
    }

    Ok(rest.split_at(key_len))
}

/// Extract only the key of an encoded entry
pub fn decode_key(entry: &[u8]) -> Result<&[u8]> {
    decode_entry(entry).map(|(key, _)| key)
}

/// Owner of encoded entry bytes.
///
/// Stands in for the engine's arena: entries stay put for as long as the
/// arena lives, and memtables only borrow them.
#[derive(Debug, Default)]
pub struct EntryArena {
    entries: Vec<Bytes>,
    allocated: usize,
}

impl EntryArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode and store an entry, returning its index
    pub fn add(&mut self, key: &[u8], value: &[u8]) -> Result<usize> {
        let entry = encode_entry(key, value)?;
        self.allocated += entry.len();
        self.entries.push(entry);
        Ok(self.entries.len() - 1)
    }

    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.entries.get(index).map(|e| &e[..])
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.iter().map(|e| &e[..])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total encoded bytes held by the arena
    pub fn allocated_bytes(&self) -> usize {
        self.allocated
    }
}
