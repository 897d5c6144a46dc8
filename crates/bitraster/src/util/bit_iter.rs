//! # Bit-at-a-time reading
//!
//! [`BitIter`] is a cursor into a byte slice that can be moved to any bit
//! index with [`BitIter::seek`]. Every walk owns its cursor; there is no
//! shared position between walks over the same buffer.

/// Iterator over the bits in a byte, most significant first
#[derive(Debug, Clone)]
pub struct ByteBits {
    mask: u8,
    bits: u8,
}

impl ByteBits {
    /// Create a new bit iterator from a byte
    pub fn new(bits: u8) -> Self {
        Self { mask: 0x80, bits }
    }
}

impl Iterator for ByteBits {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.mask == 0 {
            return None;
        }
        let bit = self.bits & self.mask != 0;
        self.mask >>= 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = (self.mask.trailing_zeros() + 1) as usize;
        let size = if self.mask == 0 { 0 } else { size };
        (size, Some(size))
    }
}

impl ExactSizeIterator for ByteBits {}

/// A seekable bit cursor over a byte slice
#[derive(Debug, Clone)]
pub struct BitIter<'a> {
    bytes: &'a [u8],
    index: usize,
}

impl<'a> BitIter<'a> {
    /// Create a new bit iter from a byte slice, starting at bit 0
    pub fn new(bytes: &'a [u8]) -> BitIter<'a> {
        Self::starting_at(bytes, 0)
    }

    /// Create a new bit iter that starts at the given bit index
    pub fn starting_at(bytes: &'a [u8], index: usize) -> BitIter<'a> {
        Self { bytes, index }
    }

    /// Move the cursor to an absolute bit index.
    ///
    /// Seeking past the end is allowed, the iterator is exhausted then.
    pub fn seek(&mut self, index: usize) {
        self.index = index;
    }

    /// The index of the bit that is returned by the next call to `next`
    pub fn position(&self) -> usize {
        self.index
    }

    /// Total number of bits in the underlying slice
    pub fn len_bits(&self) -> usize {
        self.bytes.len() * 8
    }

    fn remaining(&self) -> usize {
        self.len_bits().saturating_sub(self.index)
    }
}

impl Iterator for BitIter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        let byte = *self.bytes.get(self.index / 8)?;
        let bit = (byte << (self.index % 8)) & 0x80 != 0;
        self.index += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.remaining();
        (size, Some(size))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.index = self.index.saturating_add(n);
        self.next()
    }
}

impl ExactSizeIterator for BitIter<'_> {}

#[cfg(test)]
mod tests {
    use super::{BitIter, ByteBits};

    #[test]
    fn byte_bits() {
        assert_eq!(
            vec![false, false, true, false, false, false, false, false],
            ByteBits::new(0b0010_0000).collect::<Vec<_>>()
        );
        let mut bits = ByteBits::new(0xFF);
        assert_eq!(bits.len(), 8);
        bits.next();
        assert_eq!(bits.len(), 7);
        assert_eq!(bits.count(), 7);
    }

    #[test]
    fn bit_iter() {
        assert_eq!(
            vec![
                false, false, true, false, false, false, false, false, //
                true, true, false, false, true, true, false, true
            ],
            BitIter::new(&[0b0010_0000, 0b1100_1101]).collect::<Vec<_>>()
        );
    }

    #[test]
    fn seek() {
        let bytes = [0b0010_0000, 0b1100_1101];
        let mut iter = BitIter::starting_at(&bytes, 2);
        assert_eq!(iter.next(), Some(true));
        assert_eq!(iter.position(), 3);
        iter.seek(12);
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.collect::<Vec<_>>(), vec![true, true, false, true]);

        let mut iter = BitIter::new(&bytes);
        iter.seek(16);
        assert_eq!(iter.next(), None);
        iter.seek(400);
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
        iter.seek(0);
        assert_eq!(iter.nth(8), Some(true));
    }
}
