//! The byte layout shared by encoders and decoders.
//!
//! Every encoded buffer starts with a little-endian `u32` type id naming its scheme. The
//! bit-set scheme follows it with a little-endian `u32` value count, and then with the
//! packed `u64` words, also little-endian.

use alloc::vec::Vec;

use crate::{Error, Result};

/// Bytes occupied by a type id.
pub const TYPE_ID_SIZE: usize = core::mem::size_of::<u32>();
/// Bytes occupied by a type id and a value count.
pub const HEADER_SIZE: usize = TYPE_ID_SIZE + core::mem::size_of::<u32>();
/// Bytes occupied by one packed word.
pub const WORD_SIZE: usize = core::mem::size_of::<u64>();
/// Values packed into one word.
pub const BITS_PER_WORD: usize = 64;

/// The number of words needed to pack `count` values.
#[inline(always)]
pub fn word_count(count: usize) -> usize {
    count.div_ceil(BITS_PER_WORD)
}

/// Reads a little-endian `u32` from the first four bytes of `bytes`.
#[inline(always)]
pub(crate) fn read_u32(bytes: &[u8]) -> u32 {
    u32::from_le(bytemuck::pod_read_unaligned(&bytes[..4]))
}

/// Reads a little-endian `u64` from the first eight bytes of `bytes`.
#[inline(always)]
pub(crate) fn read_u64(bytes: &[u8]) -> u64 {
    u64::from_le(bytemuck::pod_read_unaligned(&bytes[..WORD_SIZE]))
}

/// Appends `words`, which must already be in little-endian order, to `bytes`.
#[inline(always)]
pub(crate) fn extend_words(bytes: &mut Vec<u8>, words: &[u64]) {
    bytes.extend_from_slice(bytemuck::cast_slice(words));
}

/// Reads the type id at the front of an encoded buffer.
pub fn peek_type_id(bytes: &[u8]) -> Result<u32> {
    if bytes.len() < TYPE_ID_SIZE {
        return Err(Error::TruncatedHeader { len: bytes.len(), needed: TYPE_ID_SIZE });
    }
    Ok(read_u32(bytes))
}

/// The header of a bit-set encoded buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Header {
    /// Identifies the scheme that wrote the buffer.
    pub type_id: u32,
    /// The number of encoded values.
    pub count: u32,
}

impl Header {
    /// Reads a header from the front of `bytes`.
    pub fn read(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::TruncatedHeader { len: bytes.len(), needed: HEADER_SIZE });
        }
        Ok(Header {
            type_id: read_u32(bytes),
            count: read_u32(&bytes[TYPE_ID_SIZE..]),
        })
    }

    /// Appends the header to `bytes`.
    pub fn write(&self, bytes: &mut Vec<u8>) {
        bytes.extend_from_slice(&self.type_id.to_le_bytes());
        bytes.extend_from_slice(&self.count.to_le_bytes());
    }

    /// Total bytes of a buffer holding this header and its words.
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + WORD_SIZE * word_count(self.count as usize)
    }
}
