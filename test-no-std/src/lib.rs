//! Builds `columnar-bitset` without the standard library.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use columnar_bitset::{BitSetDecoder, BitSetEncoder, Decoder, Encoder, Result};

/// Packs `values` and unpacks them again.
pub fn round_trip(values: &[bool]) -> Result<Vec<bool>> {
    let mut encoder = BitSetEncoder::new();
    encoder.gather(values)?;
    let bytes = encoder.finalize()?;
    let mut decoded = Vec::with_capacity(values.len());
    BitSetDecoder::new(&bytes)?.drain_into(&mut decoded)?;
    Ok(decoded)
}
