//! # Horizontal bit replication
//!
//! Scales a packed byte so that every bit becomes a run of N equal bits.
//! [`replicate`] spreads the bits in a single wide register, the plain
//! [`replicate_reference`] writes every copy one by one and is the oracle the
//! fast path is tested against.

use crate::{geometry::Magnification, util::bit_iter::ByteBits};

/// Largest factor whose `8 * N` output bits fit into a `u128`
const MAX_SPREAD: usize = (u128::BITS / 8) as usize;

/// Repeat `pattern` (a group of `width` bits) every `stride` bits, so that
/// the byte is covered with `8 / width` groups.
fn group_mask(pattern: u128, width: usize, stride: usize) -> u128 {
    let mut mask = pattern;
    for _ in 1..(8 / width) {
        mask = (mask << (stride * width)) | pattern;
    }
    mask
}

/// Scale a byte by `magnification`.
///
/// The result has N bytes, bits `j*N..j*N+N` of the output are equal to bit
/// `j` of the input (most significant first). A factor of 1 returns the byte
/// unchanged.
pub fn replicate(byte: u8, magnification: Magnification) -> Vec<u8> {
    let factor = magnification.get();
    if factor == 1 {
        return vec![byte];
    }
    if factor > MAX_SPREAD {
        return replicate_reference(byte, magnification);
    }

    let n = factor - 1;
    let mut spread = u128::from(byte);
    spread = (spread ^ (spread << (4 * n))) & group_mask(0xF, 4, factor);
    spread = (spread ^ (spread << (2 * n))) & group_mask(0x3, 2, factor);
    spread = (spread ^ (spread << n)) & group_mask(0x1, 1, factor);

    let filled = (0..factor).fold(0u128, |acc, shift| acc | (spread << shift));
    (0..factor)
        .rev()
        .map(|index| (filled >> (8 * index)) as u8)
        .collect()
}

/// Scale a byte by writing every bit N times
pub fn replicate_reference(byte: u8, magnification: Magnification) -> Vec<u8> {
    let factor = magnification.get();
    let mut out = Vec::with_capacity(factor);
    let mut curr = 0u8;
    let mut filled = 0;
    for bit in ByteBits::new(byte) {
        for _ in 0..factor {
            curr = (curr << 1) | u8::from(bit);
            filled += 1;
            if filled == 8 {
                out.push(curr);
                curr = 0;
                filled = 0;
            }
        }
    }
    out
}
