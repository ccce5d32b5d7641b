//! Errors raised by encoders and decoders.
//!
//! Two families exist. Format errors describe a buffer that cannot be decoded, and are
//! reported when a decoder is constructed. Misuse errors describe a caller that drives an
//! encoder or decoder past the end of its lifecycle. Nothing here is transient.

use thiserror::Error;

/// Result type alias for compression operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while encoding or decoding a column.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The buffer cannot hold the scheme's header.
    #[error("buffer of {len} bytes is shorter than the {needed} byte header")]
    TruncatedHeader {
        /// Bytes available.
        len: usize,
        /// Bytes the header requires.
        needed: usize,
    },

    /// The header names a different scheme than the decoder handles.
    #[error("scheme mismatch: expected type id {expected}, found {found}")]
    SchemeMismatch {
        /// Type id of the decoding scheme.
        expected: u32,
        /// Type id found in the header.
        found: u32,
    },

    /// The header names no known scheme.
    #[error("unknown compression scheme type id {0}")]
    UnknownScheme(u32),

    /// The buffer is too short for the number of values its header declares.
    #[error("buffer of {len} bytes cannot hold {count} values ({needed} bytes required)")]
    TruncatedPayload {
        /// Values declared by the header.
        count: usize,
        /// Bytes available.
        len: usize,
        /// Bytes the declared values require.
        needed: usize,
    },

    /// A value was observed after the encoder was finalized.
    #[error("encoder already finalized")]
    AlreadyFinalized,

    /// A value was requested after all values were decoded.
    #[error("decoder exhausted after {count} values")]
    Exhausted {
        /// Values the buffer holds.
        count: usize,
    },

    /// More values were observed than the header's count field can record.
    #[error("value count exceeds {max}", max = u32::MAX)]
    CountOverflow,
}

impl Error {
    /// Whether the error describes a malformed buffer.
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            Error::TruncatedHeader { .. }
                | Error::SchemeMismatch { .. }
                | Error::UnknownScheme(_)
                | Error::TruncatedPayload { .. }
        )
    }

    /// Whether the error describes a caller driving an encoder or decoder out of order.
    pub fn is_misuse(&self) -> bool {
        matches!(self, Error::AlreadyFinalized | Error::Exhausted { .. })
    }
}
