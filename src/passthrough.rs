//! The pass-through scheme, which stores one byte per boolean.
//!
//! This is the uncompressed baseline that other schemes are measured against. The buffer
//! is the type id followed by the raw column bytes, and its length alone frames the values.

use alloc::vec::Vec;

use crate::bytes::{self, TYPE_ID_SIZE};
use crate::{ColumnType, Decoder, Encoder, Error, Result, Scheme};

/// Identifies pass-through encoded buffers.
pub const TYPE_ID: u32 = 0;

/// Whether the pass-through scheme can encode columns of `column_type`.
///
/// Only boolean columns are wired up here.
#[inline]
pub fn supports(column_type: ColumnType) -> bool {
    column_type == ColumnType::Boolean
}

/// Copies booleans into a byte buffer as they are observed.
#[derive(Clone, Debug, PartialEq)]
pub struct PassThroughEncoder {
    buffer: Vec<u8>,
    finalized: bool,
}

impl Default for PassThroughEncoder {
    fn default() -> Self {
        let mut buffer = Vec::new();
        buffer.extend_from_slice(&TYPE_ID.to_le_bytes());
        Self { buffer, finalized: false }
    }
}

impl PassThroughEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of observed values.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.buffer.len() - TYPE_ID_SIZE
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Encoder<bool> for PassThroughEncoder {
    fn scheme(&self) -> Scheme {
        Scheme::PassThrough
    }

    #[inline]
    fn observe(&mut self, value: bool) -> Result<()> {
        if self.finalized {
            return Err(Error::AlreadyFinalized);
        }
        self.buffer.push(value as u8);
        Ok(())
    }

    #[inline]
    fn uncompressed_size(&self) -> usize {
        self.len()
    }

    #[inline]
    fn estimated_compressed_size(&self) -> usize {
        self.buffer.len()
    }

    fn finalize(&mut self) -> Result<Vec<u8>> {
        self.finalized = true;
        tracing::trace!(count = self.len(), "finalized pass-through column");
        Ok(self.buffer.clone())
    }
}

/// A forward-only cursor over a pass-through encoded buffer.
#[derive(Copy, Clone, Debug)]
pub struct PassThroughDecoder<'a> {
    values: &'a [u8],
    visited: usize,
}

impl<'a> PassThroughDecoder<'a> {
    /// Validates the type id of `buffer`; every following byte is one value.
    pub fn new(buffer: &'a [u8]) -> Result<Self> {
        let type_id = bytes::peek_type_id(buffer)?;
        if type_id != TYPE_ID {
            tracing::debug!(found = type_id, "rejected buffer with foreign type id");
            return Err(Error::SchemeMismatch { expected: TYPE_ID, found: type_id });
        }
        Ok(Self { values: &buffer[TYPE_ID_SIZE ..], visited: 0 })
    }

    /// The number of encoded values.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The number of values not yet returned.
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.values.len() - self.visited
    }
}

impl<'a> Decoder<bool> for PassThroughDecoder<'a> {
    #[inline(always)]
    fn has_next(&self) -> bool {
        self.visited < self.values.len()
    }

    #[inline]
    fn next(&mut self) -> Result<bool> {
        match self.values.get(self.visited) {
            Some(byte) => {
                self.visited += 1;
                Ok(*byte == 1)
            }
            None => Err(Error::Exhausted { count: self.values.len() }),
        }
    }
}

#[cfg(test)]
mod test {

    use alloc::vec::Vec;

    use super::{PassThroughDecoder, PassThroughEncoder};
    use crate::{Decoder, Encoder, Error};

    #[test]
    fn round_trip() {
        let values: Vec<bool> = (0 .. 300).map(|i| i % 5 < 2).collect();
        let mut encoder = PassThroughEncoder::new();
        encoder.gather(&values).unwrap();
        assert_eq!(encoder.uncompressed_size(), 300);
        assert_eq!(encoder.estimated_compressed_size(), 304);

        let bytes = encoder.finalize().unwrap();
        assert_eq!(bytes.len(), 304);
        assert_eq!(&bytes[..4], &[0, 0, 0, 0]);

        let mut decoder = PassThroughDecoder::new(&bytes).unwrap();
        assert_eq!(decoder.len(), 300);
        let mut sink = Vec::new();
        decoder.drain_into(&mut sink).unwrap();
        assert_eq!(sink, values);
        assert_eq!(decoder.next(), Err(Error::Exhausted { count: 300 }));
    }

    #[test]
    fn lifecycle() {
        let mut encoder = PassThroughEncoder::new();
        encoder.observe(true).unwrap();
        let first = encoder.finalize().unwrap();
        assert_eq!(encoder.observe(true), Err(Error::AlreadyFinalized));
        assert_eq!(encoder.finalize().unwrap(), first);
    }

    #[test]
    fn rejects_foreign_buffers() {
        assert_eq!(
            PassThroughDecoder::new(&[3, 0, 0, 0, 1]).unwrap_err(),
            Error::SchemeMismatch { expected: 0, found: 3 },
        );
        assert_eq!(
            PassThroughDecoder::new(&[0, 0]).unwrap_err(),
            Error::TruncatedHeader { len: 2, needed: 4 },
        );
    }

    #[test]
    fn only_one_decodes_as_true() {
        let mut decoder = PassThroughDecoder::new(&[0, 0, 0, 0, 1, 0, 2]).unwrap();
        assert_eq!(decoder.next(), Ok(true));
        assert_eq!(decoder.next(), Ok(false));
        assert_eq!(decoder.next(), Ok(false));
        assert!(!decoder.has_next());
    }
}
