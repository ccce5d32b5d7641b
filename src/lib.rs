//! A bit-set compression scheme for boolean columns.
//!
//! Boolean values are packed one per bit into little-endian `u64` words, behind a small
//! header that names the scheme and the number of values. The scheme is one member of a
//! closed family of per-column compression schemes (see [`Scheme`]), each of which offers
//! an [`Encoder`] that accepts values in row order and a [`Decoder`] that yields them back
//! through a forward-only cursor over a borrowed buffer.
//!
//! ```
//! use columnar_bitset::{BitSetDecoder, BitSetEncoder, Decoder, Encoder};
//!
//! let mut encoder = BitSetEncoder::new();
//! for value in [true, false, true] {
//!     encoder.observe(value).unwrap();
//! }
//! let bytes = encoder.finalize().unwrap();
//! assert_eq!(bytes.len(), 16);
//!
//! let mut decoder = BitSetDecoder::new(&bytes).unwrap();
//! let mut values = Vec::new();
//! while decoder.has_next() {
//!     values.push(decoder.next().unwrap());
//! }
//! assert_eq!(values, [true, false, true]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;

pub mod bitset;
pub mod bytes;
pub mod error;
pub mod passthrough;
pub mod primitive;
pub mod scheme;

pub use bitset::{BitSetDecoder, BitSetEncoder};
pub use error::{Error, Result};
pub use passthrough::{PassThroughDecoder, PassThroughEncoder};
pub use primitive::Bools;
pub use scheme::{AnyDecoder, AnyEncoder, ColumnType, Scheme, decoder_for};

pub use common::{Clear, HeapSize, Index, IndexIter, Len, Push};
/// Row sources and sinks that encoders read from and decoders write into.
pub mod common {

    use alloc::vec::Vec;

    /// A type with a length.
    pub trait Len {
        /// The number of contained elements.
        fn len(&self) -> usize;
        /// Whether this contains no elements.
        fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    impl<L: Len + ?Sized> Len for &L {
        #[inline(always)] fn len(&self) -> usize { L::len(*self) }
    }
    impl<L: Len + ?Sized> Len for &mut L {
        #[inline(always)] fn len(&self) -> usize { L::len(*self) }
    }

    impl<T> Len for Vec<T> {
        #[inline(always)] fn len(&self) -> usize { self.len() }
    }
    impl<T> Len for [T] {
        #[inline(always)] fn len(&self) -> usize { <[T]>::len(self) }
    }

    /// A type that can accept items of type `T`.
    pub trait Push<T> {
        /// Pushes an item onto `self`.
        fn push(&mut self, item: T);
        /// Pushes elements of an iterator onto `self`.
        #[inline(always)] fn extend(&mut self, iter: impl IntoIterator<Item=T>) {
            for item in iter {
                self.push(item);
            }
        }
    }

    impl<T> Push<T> for Vec<T> {
        #[inline(always)] fn push(&mut self, item: T) { Vec::push(self, item) }
    }
    impl<P: Push<T> + ?Sized, T> Push<T> for &mut P {
        #[inline(always)] fn push(&mut self, item: T) { P::push(*self, item) }
    }

    /// A type that can be accessed by `usize`.
    pub trait Index : Len {
        /// Type returned for an indexed element.
        type Ref;
        /// The element at `index`, which must be less than `self.len()`.
        fn get(&self, index: usize) -> Self::Ref;
        /// An iterator over indexed elements.
        #[inline(always)] fn iter(&self) -> IndexIter<&Self> {
            IndexIter {
                index: 0,
                slice: self,
            }
        }
    }

    impl<I: Index + ?Sized> Index for &I {
        type Ref = I::Ref;
        #[inline(always)] fn get(&self, index: usize) -> Self::Ref { I::get(*self, index) }
    }

    impl<T: Copy> Index for Vec<T> {
        type Ref = T;
        #[inline(always)] fn get(&self, index: usize) -> T { self[index] }
    }
    impl<T: Copy> Index for [T] {
        type Ref = T;
        #[inline(always)] fn get(&self, index: usize) -> T { self[index] }
    }

    /// An iterator over the elements of an [`Index`] implementor.
    #[derive(Copy, Clone, Debug)]
    pub struct IndexIter<S> {
        index: usize,
        slice: S,
    }

    impl<S: Index> Iterator for IndexIter<S> {
        type Item = S::Ref;
        #[inline(always)] fn next(&mut self) -> Option<Self::Item> {
            if self.index < self.slice.len() {
                let result = self.slice.get(self.index);
                self.index += 1;
                Some(result)
            } else {
                None
            }
        }
        fn size_hint(&self) -> (usize, Option<usize>) {
            let remaining = self.slice.len() - self.index;
            (remaining, Some(remaining))
        }
    }

    impl<S: Index> ExactSizeIterator for IndexIter<S> { }

    pub trait Clear {
        /// Clears `self`, without changing its capacity.
        fn clear(&mut self);
    }

    impl<T> Clear for Vec<T> {
        #[inline(always)] fn clear(&mut self) { Vec::clear(self) }
    }

    pub trait HeapSize {
        /// Active (len) and allocated (cap) heap sizes in bytes.
        /// This should not include the size of `self` itself.
        fn heap_size(&self) -> (usize, usize) { (0, 0) }
    }

    impl<T: Copy> HeapSize for Vec<T> {
        fn heap_size(&self) -> (usize, usize) {
            let size = core::mem::size_of::<T>();
            (self.len() * size, self.capacity() * size)
        }
    }

}

/// The encoding half of a compression scheme.
///
/// Values are observed one at a time, in row order. Statistics about the eventual
/// encoding are available at any point, and `finalize` produces the encoded buffer.
pub trait Encoder<T> {
    /// The scheme this encoder produces buffers for.
    fn scheme(&self) -> Scheme;

    /// Accepts the next value in row order.
    ///
    /// Fails once the encoder has been finalized.
    fn observe(&mut self, value: T) -> Result<()>;

    /// Observes every value of `source`, in index order.
    fn gather<S: Index<Ref = T> + ?Sized>(&mut self, source: &S) -> Result<()> {
        for value in source.iter() {
            self.observe(value)?;
        }
        Ok(())
    }

    /// Bytes the observed values occupy without compression.
    fn uncompressed_size(&self) -> usize;

    /// Bytes the finalized buffer will occupy, given the values observed so far.
    fn estimated_compressed_size(&self) -> usize;

    /// Ratio of compressed to uncompressed size; `1.0` before any value is observed.
    fn compression_ratio(&self) -> f64 {
        match self.uncompressed_size() {
            0 => 1.0,
            uncompressed => self.estimated_compressed_size() as f64 / uncompressed as f64,
        }
    }

    /// Produces the encoded buffer.
    ///
    /// Repeated calls without intervening `observe` calls return identical bytes.
    fn finalize(&mut self) -> Result<Vec<u8>>;
}

/// The decoding half of a compression scheme: a forward-only cursor over a borrowed buffer.
pub trait Decoder<T> {
    /// Whether another value remains.
    fn has_next(&self) -> bool;

    /// Returns the next value and advances the cursor.
    ///
    /// Fails with [`Error::Exhausted`] once `has_next` is false.
    fn next(&mut self) -> Result<T>;

    /// Decodes the next value into `row`.
    fn next_into<P: Push<T> + ?Sized>(&mut self, row: &mut P) -> Result<()> {
        let value = self.next()?;
        row.push(value);
        Ok(())
    }

    /// Decodes every remaining value into `row`.
    fn drain_into<P: Push<T> + ?Sized>(&mut self, row: &mut P) -> Result<()> {
        while self.has_next() {
            self.next_into(row)?;
        }
        Ok(())
    }
}
