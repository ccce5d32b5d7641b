//! The boolean bit-set scheme.
//!
//! Values are packed one per bit into `u64` words, least significant bit first, so that
//! value `i` lives at bit `i % 64` of word `i / 64`. The final word is zero padded.
//! Encoding costs one bit per value against the one byte an uncompressed boolean column
//! spends, independent of the data.

use alloc::vec::Vec;

use crate::bytes::{self, BITS_PER_WORD, HEADER_SIZE, Header, WORD_SIZE};
use crate::{ColumnType, Decoder, Encoder, Error, Result, Scheme};

/// Identifies bit-set encoded buffers.
pub const TYPE_ID: u32 = 3;

/// Whether the bit-set scheme can encode columns of `column_type`.
#[inline]
pub fn supports(column_type: ColumnType) -> bool {
    column_type == ColumnType::Boolean
}

/// Packs booleans into words as they are observed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BitSetEncoder {
    /// Completed words, each already in little-endian byte order.
    words: Vec<u64>,
    /// The work-in-progress word.
    last_word: u64,
    /// The number of observed values.
    count: usize,
    /// Set by `finalize`; further values are refused.
    finalized: bool,
}

impl BitSetEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of observed values.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether `finalize` has been called.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
}

impl Encoder<bool> for BitSetEncoder {
    fn scheme(&self) -> Scheme {
        Scheme::BooleanBitSet
    }

    #[inline]
    fn observe(&mut self, value: bool) -> Result<()> {
        if self.finalized {
            return Err(Error::AlreadyFinalized);
        }
        if self.count >= u32::MAX as usize {
            return Err(Error::CountOverflow);
        }
        self.last_word |= (value as u64) << (self.count % BITS_PER_WORD);
        self.count += 1;
        // If we have a fully formed word, commit it to `self.words`.
        if self.count % BITS_PER_WORD == 0 {
            self.words.push(self.last_word.to_le());
            self.last_word = 0;
        }
        Ok(())
    }

    #[inline]
    fn uncompressed_size(&self) -> usize {
        self.count * ColumnType::Boolean.default_size().unwrap_or(1)
    }

    #[inline]
    fn estimated_compressed_size(&self) -> usize {
        HEADER_SIZE + WORD_SIZE * bytes::word_count(self.count)
    }

    fn finalize(&mut self) -> Result<Vec<u8>> {
        self.finalized = true;
        let header = Header { type_id: TYPE_ID, count: self.count as u32 };
        let mut buffer = Vec::with_capacity(header.encoded_len());
        header.write(&mut buffer);
        bytes::extend_words(&mut buffer, &self.words);
        if self.count % BITS_PER_WORD != 0 {
            buffer.extend_from_slice(&self.last_word.to_le_bytes());
        }
        tracing::trace!(count = self.count, bytes = buffer.len(), "finalized bit-set column");
        Ok(buffer)
    }
}

/// A forward-only cursor over a bit-set encoded buffer.
///
/// The decoder borrows the buffer, and loads one word per 64 values as it advances.
#[derive(Copy, Clone, Debug)]
pub struct BitSetDecoder<'a> {
    /// Packed words, trimmed to exactly those the count requires.
    words: &'a [u8],
    /// The number of encoded values.
    count: usize,
    /// The number of values returned so far.
    visited: usize,
    /// The word holding the value at `visited - 1`.
    current_word: u64,
}

impl<'a> BitSetDecoder<'a> {
    /// Validates the header of `buffer` and positions the cursor before the first value.
    ///
    /// Bytes beyond those the header's count requires are ignored.
    pub fn new(buffer: &'a [u8]) -> Result<Self> {
        let header = Header::read(buffer)?;
        if header.type_id != TYPE_ID {
            tracing::debug!(found = header.type_id, "rejected buffer with foreign type id");
            return Err(Error::SchemeMismatch { expected: TYPE_ID, found: header.type_id });
        }
        let count = header.count as usize;
        let needed = header.encoded_len();
        if buffer.len() < needed {
            tracing::debug!(count, len = buffer.len(), needed, "rejected truncated bit-set buffer");
            return Err(Error::TruncatedPayload { count, len: buffer.len(), needed });
        }
        Ok(Self {
            words: &buffer[HEADER_SIZE .. needed],
            count,
            visited: 0,
            current_word: 0,
        })
    }

    /// The number of encoded values.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The number of values not yet returned.
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.count - self.visited
    }
}

impl<'a> Decoder<bool> for BitSetDecoder<'a> {
    #[inline(always)]
    fn has_next(&self) -> bool {
        self.visited < self.count
    }

    #[inline]
    fn next(&mut self) -> Result<bool> {
        if !self.has_next() {
            return Err(Error::Exhausted { count: self.count });
        }
        let bit = self.visited % BITS_PER_WORD;
        if bit == 0 {
            let offset = (self.visited / BITS_PER_WORD) * WORD_SIZE;
            self.current_word = bytes::read_u64(&self.words[offset ..]);
        }
        self.visited += 1;
        Ok((self.current_word >> bit) & 1 == 1)
    }
}

#[cfg(test)]
mod test {

    use alloc::vec;
    use alloc::vec::Vec;

    use super::{BitSetDecoder, BitSetEncoder, TYPE_ID, supports};
    use crate::bytes::{HEADER_SIZE, read_u64};
    use crate::{Bools, Clear, ColumnType, Decoder, Encoder, Error, HeapSize, Index, Len};

    fn encode(values: &[bool]) -> Vec<u8> {
        let mut encoder = BitSetEncoder::new();
        for value in values {
            encoder.observe(*value).unwrap();
        }
        encoder.finalize().unwrap()
    }

    fn decode(bytes: &[u8]) -> Vec<bool> {
        let mut decoder = BitSetDecoder::new(bytes).unwrap();
        let mut values = Vec::with_capacity(decoder.len());
        while decoder.has_next() {
            values.push(decoder.next().unwrap());
        }
        values
    }

    fn pattern(len: usize) -> Vec<bool> {
        (0 .. len).map(|i| i % 3 == 0 || i % 7 == 5).collect()
    }

    #[test]
    fn round_trip() {
        for len in [0, 1, 63, 64, 65, 127, 128, 129, 1000, 4099] {
            let values = pattern(len);
            let bytes = encode(&values);
            assert_eq!(bytes.len(), 8 + 8 * len.div_ceil(64), "length {}", len);
            assert_eq!(decode(&bytes), values, "length {}", len);
        }
    }

    #[test]
    fn three_values() {
        let bytes = encode(&[true, false, true]);
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[..8], &[3, 0, 0, 0, 3, 0, 0, 0]);
        assert_eq!(read_u64(&bytes[8..]), 0b101);

        let mut decoder = BitSetDecoder::new(&bytes).unwrap();
        assert!(decoder.has_next());
        assert_eq!(decoder.next(), Ok(true));
        assert!(decoder.has_next());
        assert_eq!(decoder.next(), Ok(false));
        assert!(decoder.has_next());
        assert_eq!(decoder.next(), Ok(true));
        assert!(!decoder.has_next());
        assert_eq!(decoder.next(), Err(Error::Exhausted { count: 3 }));
    }

    #[test]
    fn word_boundary() {
        let mut values = vec![true; 64];
        values.push(false);
        let bytes = encode(&values);
        assert_eq!(bytes.len(), HEADER_SIZE + 16);
        assert_eq!(read_u64(&bytes[8..]), u64::MAX);
        assert_eq!(read_u64(&bytes[16..]), 0);
        assert_eq!(decode(&bytes), values);
    }

    #[test]
    fn padding_is_ignored() {
        let values = pattern(70);
        let mut bytes = encode(&values);
        // Values 64 .. 70 occupy the low six bits of the final word.
        let last = bytes.len() - 8;
        bytes[last] |= 0b1100_0000;
        for byte in &mut bytes[last + 1 ..] {
            *byte = 0xFF;
        }
        assert_eq!(decode(&bytes), values);
    }

    #[test]
    fn finalize_is_idempotent() {
        let mut encoder = BitSetEncoder::new();
        for value in pattern(100) {
            encoder.observe(value).unwrap();
        }
        let first = encoder.finalize().unwrap();
        let second = encoder.finalize().unwrap();
        assert_eq!(first, second);
        assert!(encoder.is_finalized());
    }

    #[test]
    fn observe_after_finalize() {
        let mut encoder = BitSetEncoder::new();
        encoder.observe(true).unwrap();
        let bytes = encoder.finalize().unwrap();
        assert_eq!(encoder.observe(false), Err(Error::AlreadyFinalized));
        assert_eq!(encoder.len(), 1);
        assert_eq!(encoder.finalize().unwrap(), bytes);
    }

    #[test]
    fn statistics() {
        let mut encoder = BitSetEncoder::new();
        assert_eq!(encoder.estimated_compressed_size(), 8);
        assert_eq!(encoder.uncompressed_size(), 0);
        assert_eq!(encoder.compression_ratio(), 1.0);
        for value in pattern(65) {
            encoder.observe(value).unwrap();
        }
        assert_eq!(encoder.estimated_compressed_size(), 24);
        assert_eq!(encoder.uncompressed_size(), 65);
        assert_eq!(encoder.compression_ratio(), 24.0 / 65.0);
        assert_eq!(encoder.finalize().unwrap().len(), encoder.estimated_compressed_size());
    }

    #[test]
    fn count_limit() {
        let mut encoder = BitSetEncoder { count: u32::MAX as usize - 1, ..BitSetEncoder::default() };
        assert_eq!(encoder.observe(true), Ok(()));
        assert_eq!(encoder.len(), u32::MAX as usize);
        assert_eq!(encoder.observe(true), Err(Error::CountOverflow));
        assert_eq!(encoder.observe(false), Err(Error::CountOverflow));
        assert_eq!(encoder.len(), u32::MAX as usize);
        assert_eq!(encoder.estimated_compressed_size(), 8 + 8 * (u32::MAX as usize).div_ceil(64));
    }

    #[test]
    fn reused_column_sink() {
        let values = pattern(150);
        let bytes = encode(&values);
        let mut sink = Bools::default();
        for _ in 0 .. 2 {
            sink.clear();
            BitSetDecoder::new(&bytes).unwrap().drain_into(&mut sink).unwrap();
            assert_eq!(sink.len(), 150);
            assert_eq!(Index::iter(&sink).collect::<Vec<_>>(), values);
        }
        assert_eq!(sink.heap_size().0, 16);
    }

    #[test]
    fn gather_from_row_source() {
        let values = pattern(200);
        let mut encoder = BitSetEncoder::new();
        encoder.gather(&values).unwrap();
        assert_eq!(encoder.len(), 200);
        let bytes = encoder.finalize().unwrap();

        let mut decoder = BitSetDecoder::new(&bytes).unwrap();
        let mut sink = Vec::new();
        decoder.next_into(&mut sink).unwrap();
        assert_eq!(decoder.remaining(), 199);
        decoder.drain_into(&mut sink).unwrap();
        assert_eq!(sink, values);
        assert_eq!(decoder.remaining(), 0);
    }

    #[test]
    fn rejects_foreign_type_id() {
        let mut bytes = encode(&[true]);
        bytes[0] = 0;
        assert_eq!(
            BitSetDecoder::new(&bytes).unwrap_err(),
            Error::SchemeMismatch { expected: TYPE_ID, found: 0 },
        );
    }

    #[test]
    fn rejects_truncated_buffers() {
        let bytes = encode(&pattern(65));
        assert_eq!(
            BitSetDecoder::new(&bytes[..5]).unwrap_err(),
            Error::TruncatedHeader { len: 5, needed: 8 },
        );
        assert_eq!(
            BitSetDecoder::new(&bytes[..23]).unwrap_err(),
            Error::TruncatedPayload { count: 65, len: 23, needed: 24 },
        );
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let values = pattern(10);
        let mut bytes = encode(&values);
        bytes.extend_from_slice(&[0xAB; 11]);
        assert_eq!(decode(&bytes), values);
    }

    #[test]
    fn empty_column() {
        let bytes = encode(&[]);
        assert_eq!(bytes, [3, 0, 0, 0, 0, 0, 0, 0]);
        let mut decoder = BitSetDecoder::new(&bytes).unwrap();
        assert!(decoder.is_empty());
        assert!(!decoder.has_next());
        assert_eq!(decoder.next(), Err(Error::Exhausted { count: 0 }));
    }

    #[test]
    fn type_gating() {
        assert!(supports(ColumnType::Boolean));
        for other in [ColumnType::Int, ColumnType::Long, ColumnType::String, ColumnType::Double, ColumnType::Float] {
            assert!(!supports(other));
        }
    }
}
