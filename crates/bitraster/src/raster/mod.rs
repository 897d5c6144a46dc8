//! # Packed monochrome rasters

use std::fmt::{self, Write};

use crate::{
    geometry::{div_ceil, Magnification},
    util::bit_iter::BitIter,
};

pub mod replicate;
pub mod stream;
pub mod strategy;
mod window;

pub use window::compute_bitmap;

/// A packed window of bits
///
/// Every row starts on a byte boundary and takes [`Bitmap::bytes_per_row`]
/// bytes, of which the first [`Bitmap::width`] bits are meaningful. A 1 bit
/// is ink, a 0 bit is background.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bitmap {
    /// The packed rows, most significant bit first
    pub data: Vec<u8>,
    /// Number of meaningful bits per row
    pub width: usize,
    /// Number of bytes per row
    pub bytes_per_row: usize,
    /// Bits of a final row that could not be packed
    pub remainder: Vec<bool>,
}

impl Bitmap {
    /// Number of complete rows in [`Bitmap::data`]
    pub fn rows(&self) -> usize {
        match self.bytes_per_row {
            0 => 0,
            n => self.data.len() / n,
        }
    }

    /// Iterate over the packed rows
    pub fn row_slices(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.bytes_per_row.max(1))
    }

    /// Read the bit at column `x` of row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if x >= self.width {
            return None;
        }
        let byte = self.data.get(y * self.bytes_per_row + x / 8)?;
        Some(byte & (0x80 >> (x % 8)) != 0)
    }

    /// Scale the bitmap so that every bit becomes an N×N block.
    ///
    /// Rows take `ceil(width * N / 8)` bytes with zero padding, the same
    /// layout the [streaming builder](crate::StreamBuilder) writes. The
    /// remainder is passed on unchanged.
    pub fn magnify(&self, magnification: Magnification) -> Bitmap {
        let factor = magnification.get();
        if factor == 1 {
            return self.clone();
        }
        let width = self.width.saturating_mul(factor);
        let bytes_per_row = div_ceil(width, 8);
        let mut data = Vec::with_capacity(self.data.len().saturating_mul(factor * factor));
        for row in self.row_slices() {
            let start = data.len();
            let spread = row
                .iter()
                .flat_map(|&byte| replicate::replicate(byte, magnification))
                .take(bytes_per_row);
            data.extend(spread);
            if let (Some(last), used @ 1..=7) = (data.last_mut(), width % 8) {
                *last &= 0xFF << (8 - used);
            }
            for _ in 1..factor {
                data.extend_from_within(start..start + bytes_per_row);
            }
        }
        Bitmap {
            data,
            width,
            bytes_per_row,
            remainder: self.remainder.clone(),
        }
    }

    /// Draw the bitmap using characters, followed by the remainder bits
    pub fn ascii_art<W: Write>(&self, w: &mut W, style: &BoxDrawing) -> fmt::Result {
        let border = |w: &mut W, b: &BorderDrawing| -> fmt::Result {
            w.write_char(b.left)?;
            for _ in 0..self.width {
                w.write_char(b.middle)?;
            }
            w.write_char(b.right)?;
            w.write_char('\n')
        };
        let cell = |bit: bool| if bit { style.ink } else { style.no_ink };

        border(w, &style.top)?;
        for row in self.row_slices() {
            w.write_char(style.left)?;
            for bit in BitIter::new(row).take(self.width) {
                w.write_char(cell(bit))?;
            }
            w.write_char(style.right)?;
            w.write_char('\n')?;
        }
        border(w, &style.bottom)?;
        if !self.remainder.is_empty() {
            w.write_char(' ')?;
            for bit in self.remainder.iter().copied() {
                w.write_char(cell(bit))?;
            }
            w.write_char('\n')?;
        }
        Ok(())
    }

    /// Output the packed rows as a plain Portable Bitmap (PBM)
    pub fn write_as_pbm<W: Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "P1 {} {}", self.width, self.rows())?;
        for row in self.row_slices() {
            for bit in BitIter::new(row).take(self.width) {
                out.write_char(if bit { '1' } else { '0' })?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Turn the bitmap into a `GrayImage` from the `image` crate
    #[cfg(feature = "image")]
    pub fn to_image(&self) -> image::GrayImage {
        use crate::util::data::BIT_PROJECTION;

        image::GrayImage::from_fn(self.width as u32, self.rows() as u32, |x, y| {
            let (x, y) = (x as usize, y as usize);
            let byte = self.data[y * self.bytes_per_row + x / 8] as usize;
            image::Luma([BIT_PROJECTION[byte][x % 8]])
        })
    }
}

/// Characters for a horizontal border
pub struct BorderDrawing {
    /// The left corner
    pub left: char,
    /// The border itself
    pub middle: char,
    /// The right corner
    pub right: char,
}

/// Characters for drawing a bitmap as text
pub struct BoxDrawing {
    /// The top border
    pub top: BorderDrawing,
    /// The left border
    pub left: char,
    /// The right border
    pub right: char,
    /// The bottom border
    pub bottom: BorderDrawing,
    /// A set bit
    pub ink: char,
    /// A bit that is not set
    pub no_ink: char,
}

const ASCII_BORDER: BorderDrawing = BorderDrawing {
    left: '+',
    middle: '-',
    right: '+',
};

/// Plain ASCII drawing
pub const ASCII: &BoxDrawing = &BoxDrawing {
    top: ASCII_BORDER,
    left: '|',
    right: '|',
    bottom: ASCII_BORDER,
    ink: '#',
    no_ink: ' ',
};

/// Drawing with unicode box characters
pub const UNICODE: &BoxDrawing = &BoxDrawing {
    top: BorderDrawing {
        left: '╔',
        middle: '═',
        right: '╗',
    },
    left: '║',
    right: '║',
    bottom: BorderDrawing {
        left: '╚',
        middle: '═',
        right: '╝',
    },
    ink: '█',
    no_ink: ' ',
};
