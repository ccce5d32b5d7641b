//! The closed family of compression schemes, and dispatch by type id.

use alloc::vec::Vec;

use crate::bytes;
use crate::{bitset, passthrough};
use crate::{BitSetDecoder, BitSetEncoder, Decoder, Encoder, Error, PassThroughDecoder, PassThroughEncoder, Result};

/// Logical types of the columns a scheme may be asked to encode.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    Binary,
}

impl ColumnType {
    /// Bytes one uncompressed value occupies, or `None` for variable width types.
    pub fn default_size(&self) -> Option<usize> {
        match self {
            ColumnType::Boolean | ColumnType::Byte => Some(1),
            ColumnType::Short => Some(2),
            ColumnType::Int | ColumnType::Float => Some(4),
            ColumnType::Long | ColumnType::Double => Some(8),
            ColumnType::String | ColumnType::Binary => None,
        }
    }
}

/// A compression scheme, identified in encoded buffers by its type id.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// One byte per value.
    PassThrough,
    /// One bit per value.
    BooleanBitSet,
}

impl Scheme {
    /// Every scheme, in type id order.
    pub const ALL: [Scheme; 2] = [Scheme::PassThrough, Scheme::BooleanBitSet];

    /// The identifier written at the front of every buffer this scheme encodes.
    pub fn type_id(&self) -> u32 {
        match self {
            Scheme::PassThrough => passthrough::TYPE_ID,
            Scheme::BooleanBitSet => bitset::TYPE_ID,
        }
    }

    pub fn from_type_id(type_id: u32) -> Option<Scheme> {
        Self::ALL.into_iter().find(|scheme| scheme.type_id() == type_id)
    }

    /// Whether the scheme can encode columns of `column_type`.
    pub fn supports(&self, column_type: ColumnType) -> bool {
        match self {
            Scheme::PassThrough => passthrough::supports(column_type),
            Scheme::BooleanBitSet => bitset::supports(column_type),
        }
    }

    /// A fresh encoder for this scheme.
    pub fn encoder(&self) -> AnyEncoder {
        match self {
            Scheme::PassThrough => AnyEncoder::PassThrough(PassThroughEncoder::new()),
            Scheme::BooleanBitSet => AnyEncoder::BooleanBitSet(BitSetEncoder::new()),
        }
    }

    /// A decoder for `buffer`, which must have been encoded by this scheme.
    pub fn decoder<'a>(&self, buffer: &'a [u8]) -> Result<AnyDecoder<'a>> {
        match self {
            Scheme::PassThrough => PassThroughDecoder::new(buffer).map(AnyDecoder::PassThrough),
            Scheme::BooleanBitSet => BitSetDecoder::new(buffer).map(AnyDecoder::BooleanBitSet),
        }
    }
}

/// A decoder for `buffer`, chosen by the type id in its header.
pub fn decoder_for(buffer: &[u8]) -> Result<AnyDecoder<'_>> {
    let type_id = bytes::peek_type_id(buffer)?;
    match Scheme::from_type_id(type_id) {
        Some(scheme) => scheme.decoder(buffer),
        None => {
            tracing::debug!(type_id, "no compression scheme for type id");
            Err(Error::UnknownScheme(type_id))
        }
    }
}

/// An encoder for any scheme.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyEncoder {
    PassThrough(PassThroughEncoder),
    BooleanBitSet(BitSetEncoder),
}

impl Encoder<bool> for AnyEncoder {
    fn scheme(&self) -> Scheme {
        match self {
            AnyEncoder::PassThrough(e) => e.scheme(),
            AnyEncoder::BooleanBitSet(e) => e.scheme(),
        }
    }
    #[inline]
    fn observe(&mut self, value: bool) -> Result<()> {
        match self {
            AnyEncoder::PassThrough(e) => e.observe(value),
            AnyEncoder::BooleanBitSet(e) => e.observe(value),
        }
    }
    fn uncompressed_size(&self) -> usize {
        match self {
            AnyEncoder::PassThrough(e) => e.uncompressed_size(),
            AnyEncoder::BooleanBitSet(e) => e.uncompressed_size(),
        }
    }
    fn estimated_compressed_size(&self) -> usize {
        match self {
            AnyEncoder::PassThrough(e) => e.estimated_compressed_size(),
            AnyEncoder::BooleanBitSet(e) => e.estimated_compressed_size(),
        }
    }
    fn finalize(&mut self) -> Result<Vec<u8>> {
        match self {
            AnyEncoder::PassThrough(e) => e.finalize(),
            AnyEncoder::BooleanBitSet(e) => e.finalize(),
        }
    }
}

/// A decoder for any scheme.
#[derive(Copy, Clone, Debug)]
pub enum AnyDecoder<'a> {
    PassThrough(PassThroughDecoder<'a>),
    BooleanBitSet(BitSetDecoder<'a>),
}

impl<'a> AnyDecoder<'a> {
    /// The scheme that encoded the underlying buffer.
    pub fn scheme(&self) -> Scheme {
        match self {
            AnyDecoder::PassThrough(_) => Scheme::PassThrough,
            AnyDecoder::BooleanBitSet(_) => Scheme::BooleanBitSet,
        }
    }
}

impl<'a> Decoder<bool> for AnyDecoder<'a> {
    #[inline]
    fn has_next(&self) -> bool {
        match self {
            AnyDecoder::PassThrough(d) => d.has_next(),
            AnyDecoder::BooleanBitSet(d) => d.has_next(),
        }
    }
    #[inline]
    fn next(&mut self) -> Result<bool> {
        match self {
            AnyDecoder::PassThrough(d) => d.next(),
            AnyDecoder::BooleanBitSet(d) => d.next(),
        }
    }
}
