//! # Bit addressing
//!
//! Turns bit indices into byte coordinates and reads byte-aligned windows
//! that start at arbitrary bit positions.

use std::borrow::Cow;

use crate::{
    geometry::div_ceil,
    util::bit_iter::{BitIter, ByteBits},
};

/// A bit index split into byte and bit coordinates
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitAddr {
    /// Index of the byte that contains the bit
    pub byte: usize,
    /// Position within the byte, 0 is the most significant bit
    pub bit: u8,
}

impl BitAddr {
    /// Split a bit index
    pub fn new(index: usize) -> Self {
        Self {
            byte: index / 8,
            bit: (index % 8) as u8,
        }
    }

    /// Join the coordinates back into a bit index
    pub fn index(&self) -> usize {
        self.byte * 8 + usize::from(self.bit)
    }

    /// Number of bytes a `len` byte window at this address touches
    pub fn span(&self, len: usize) -> usize {
        len + usize::from(self.bit != 0)
    }
}

/// Reads bits and bit windows from a byte slice
#[derive(Debug, Copy, Clone)]
pub struct Resolver<'a> {
    bytes: &'a [u8],
}

impl<'a> Resolver<'a> {
    /// Create a resolver for the given buffer
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Number of bits in the buffer
    pub fn total_bits(&self) -> usize {
        self.bytes.len() * 8
    }

    /// Read a single bit
    pub fn bit(&self, index: usize) -> Option<bool> {
        let addr = BitAddr::new(index);
        let byte = self.bytes.get(addr.byte)?;
        Some(byte & (0x80 >> addr.bit) != 0)
    }

    /// Whether a `len` byte window starting at bit `start` is inside the buffer
    pub fn fits(&self, start: usize, len: usize) -> bool {
        let addr = BitAddr::new(start);
        addr.byte
            .checked_add(addr.span(len))
            .map_or(false, |end| end <= self.bytes.len())
    }

    /// Extract `len` bytes starting at bit `start`.
    ///
    /// Returns `None` if the bytes covering the window are not all inside the
    /// buffer. A window that starts on a byte boundary is borrowed.
    pub fn window(&self, start: usize, len: usize) -> Option<Cow<'a, [u8]>> {
        if !self.fits(start, len) {
            return None;
        }
        let addr = BitAddr::new(start);
        let span = &self.bytes[addr.byte..addr.byte + addr.span(len)];
        if addr.bit == 0 {
            return Some(Cow::Borrowed(span));
        }
        let shift = u32::from(addr.bit);
        let shifted = span
            .windows(2)
            .map(|pair| (pair[0] << shift) | (pair[1] >> (8 - shift)))
            .collect();
        Some(Cow::Owned(shifted))
    }

    /// Pack the `bits` bits starting at bit `start` into bytes.
    ///
    /// Returns `None` unless all of these bits are inside the buffer. Unlike
    /// [`Resolver::window`], the byte after the last one touched does not
    /// need to exist. Bits after `bits` in the last byte are zero.
    pub fn row(&self, start: usize, bits: usize) -> Option<Vec<u8>> {
        let end = start.checked_add(bits)?;
        if end > self.total_bits() {
            return None;
        }
        let addr = BitAddr::new(start);
        let source = &self.bytes[addr.byte..div_ceil(end, 8)];
        let shift = u32::from(addr.bit);
        let mut row: Vec<u8> = (0..div_ceil(bits, 8))
            .map(|index| match shift {
                0 => source[index],
                _ => {
                    let next = source.get(index + 1).map_or(0, |&byte| byte >> (8 - shift));
                    (source[index] << shift) | next
                }
            })
            .collect();
        if let (Some(last), used @ 1..=7) = (row.last_mut(), bits % 8) {
            *last &= 0xFF << (8 - used);
        }
        Some(row)
    }

    /// All bits from `start` to the end of the buffer
    pub fn tail(&self, start: usize) -> Vec<bool> {
        let addr = BitAddr::new(start);
        match self.bytes.get(addr.byte..) {
            Some(rest) => rest
                .iter()
                .copied()
                .flat_map(ByteBits::new)
                .skip(usize::from(addr.bit))
                .collect(),
            None => Vec::new(),
        }
    }

    /// A cursor that starts at the given bit
    pub fn bits(&self, start: usize) -> BitIter<'a> {
        BitIter::starting_at(self.bytes, start)
    }
}
