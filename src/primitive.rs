//! In-memory boolean columns, used as row sources for encoders and row sinks for decoders.

pub use boolean::Bools;
/// A columnar store for `bool`.
mod boolean {

    use alloc::vec::Vec;

    use crate::bytes::BITS_PER_WORD;
    use crate::{Clear, HeapSize, Index, Len, Push};

    /// A store for maintaining `Vec<bool>`, one bit per value.
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct Bools<VC = Vec<u64>> {
        /// The bundles of bits that form complete `u64` values.
        pub values: VC,
        /// The work-in-progress bits that are not yet complete.
        pub last_word: u64,
        /// The number of bits written to `last_word`.
        pub last_bits: u64,
    }

    impl<VC: Len> Len for Bools<VC> {
        #[inline(always)] fn len(&self) -> usize { self.values.len() * BITS_PER_WORD + (self.last_bits as usize) }
    }

    impl<VC: Len + Index<Ref = u64>> Index for Bools<VC> {
        type Ref = bool;
        #[inline(always)] fn get(&self, index: usize) -> bool {
            let block = index / BITS_PER_WORD;
            let word = if block == self.values.len() {
                self.last_word
            } else {
                self.values.get(block)
            };
            let bit = index % BITS_PER_WORD;
            (word >> bit) & 1 == 1
        }
    }

    impl Push<bool> for Bools {
        #[inline]
        fn push(&mut self, bit: bool) {
            self.last_word |= (bit as u64) << self.last_bits;
            self.last_bits += 1;
            // If we have a fully formed word, commit it to `self.values`.
            if self.last_bits == BITS_PER_WORD as u64 {
                self.values.push(self.last_word);
                self.last_word = 0;
                self.last_bits = 0;
            }
        }
    }
    impl<'a> Push<&'a bool> for Bools {
        #[inline(always)]
        fn push(&mut self, bit: &'a bool) {
            self.push(*bit)
        }
    }

    impl Clear for Bools {
        #[inline(always)]
        fn clear(&mut self) {
            self.values.clear();
            self.last_word = 0;
            self.last_bits = 0;
        }
    }

    impl HeapSize for Bools {
        #[inline(always)]
        fn heap_size(&self) -> (usize, usize) {
            self.values.heap_size()
        }
    }

}
