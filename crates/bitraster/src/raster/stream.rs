//! # Single pass rasterization
//!
//! [`StreamBuilder`] receives the bits of a window one at a time and writes
//! them magnified, without building an unscaled bitmap first.
//!
//! Every source bit is written N times next to each other, and every
//! finished row is copied N-1 times below itself. A row never grows beyond
//! its byte-aligned capacity: once it is full, further bits of the same row
//! are dropped instead of flowing into the next row. When the total number
//! of bits in a row times N is not a multiple of 8, this cuts the last
//! magnified bit short at the byte boundary.

use log::trace;

use crate::{geometry::div_ceil, geometry::Magnification, util::bit_writer::BitWriter};

/// The result of a streamed rasterization
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StreamOutput {
    /// Complete, magnified rows
    pub data: Vec<u8>,
    /// The packed bytes of a final row that is shorter than a full row
    pub remainder: Vec<u8>,
    /// Number of bits written (including padding), if there is a remainder
    pub consumed: usize,
}

/// Builds a packed, magnified raster from a stream of bits
///
/// The builder is in one of two states while bits arrive: *accumulating*
/// bits of the current row, or at a *row boundary*, where the previous row
/// is padded and duplicated before the new row starts. [`StreamBuilder::finalize`]
/// consumes the builder, so no bits can be added afterwards.
#[derive(Debug)]
pub struct StreamBuilder {
    writer: BitWriter,
    /// Bytes per output row
    row_bytes: usize,
    /// Output rows
    height: usize,
    factor: usize,
    row: Option<usize>,
}

impl StreamBuilder {
    /// Create a builder for rows of `row_width` output bits and `height`
    /// output rows.
    pub fn new(row_width: usize, height: usize, magnification: Magnification) -> Self {
        let row_bytes = div_ceil(row_width, 8);
        Self {
            writer: BitWriter::with_capacity(row_bytes.saturating_mul(8).saturating_mul(height)),
            row_bytes,
            height,
            factor: magnification.get(),
            row: None,
        }
    }

    fn row_bits(&self) -> usize {
        self.row_bytes.saturating_mul(8)
    }

    fn rows_done(&self) -> usize {
        match self.row_bytes {
            0 => self.height,
            n => self.writer.bytes().len() / n,
        }
    }

    /// Copy the last finished row below itself, up to the height limit
    fn duplicate_row(&mut self) {
        let copies = (self.factor - 1).min(self.height.saturating_sub(self.rows_done()));
        self.writer.repeat_tail(self.row_bytes, copies);
    }

    /// Add the next bit of row `row`.
    ///
    /// Rows are numbered from 0 and bits must arrive in row-major order.
    pub fn add_bit(&mut self, row: usize, bit: bool) {
        if let Some(last) = self.row {
            if last != row {
                self.writer.pad();
                self.duplicate_row();
                trace!("Row {} done, {} rows written", last, self.rows_done());
            }
        }
        self.row = Some(row);

        if self.rows_done() >= self.height {
            return;
        }
        // the current row is already at capacity
        if self.writer.bit_count() / self.row_bits() > row {
            return;
        }
        for _ in 0..self.factor {
            self.writer.write(bit);
            if self.writer.bit_count() % self.row_bits() == 0 {
                break;
            }
        }
    }

    /// Finish the last row and return the packed raster.
    ///
    /// If the last row is shorter than a full row, it is returned as
    /// [`StreamOutput::remainder`] and not duplicated.
    pub fn finalize(mut self) -> StreamOutput {
        self.writer.pad();
        if self.row_bytes == 0 {
            return StreamOutput::default();
        }
        let len = self.writer.bytes().len();
        if len % self.row_bytes != 0 {
            let consumed = self.writer.bit_count();
            let mut data = self.writer.into_inner();
            let remainder = data.split_off(len - len % self.row_bytes);
            return StreamOutput {
                data,
                remainder,
                consumed,
            };
        }
        if self.row.is_some() {
            self.duplicate_row();
        }
        StreamOutput {
            data: self.writer.into_inner(),
            remainder: Vec::new(),
            consumed: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StreamBuilder, StreamOutput};
    use crate::{geometry::Magnification, util::bit_iter::ByteBits};

    fn feed(builder: &mut StreamBuilder, row: usize, byte: u8, bits: usize) {
        for bit in ByteBits::new(byte).take(bits) {
            builder.add_bit(row, bit);
        }
    }

    #[test]
    fn unscaled_rows() {
        let mut builder = StreamBuilder::new(8, 4, Magnification::ONE);
        feed(&mut builder, 0, 0xAC, 8);
        feed(&mut builder, 1, 0x35, 8);
        assert_eq!(
            builder.finalize(),
            StreamOutput {
                data: vec![0xAC, 0x35],
                remainder: vec![],
                consumed: 0,
            }
        );
    }

    #[test]
    fn magnified_rows() {
        let two = Magnification::new(2).unwrap();
        let mut builder = StreamBuilder::new(8, 8, two);
        feed(&mut builder, 0, 0b1010_0000, 4);
        feed(&mut builder, 1, 0b0110_0000, 4);
        let out = builder.finalize();
        assert_eq!(out.data, vec![0xCC, 0xCC, 0x3C, 0x3C]);
        assert!(out.remainder.is_empty());
    }

    #[test]
    fn height_limit() {
        let three = Magnification::new(3).unwrap();
        let mut builder = StreamBuilder::new(3, 4, three);
        feed(&mut builder, 0, 0b1000_0000, 1);
        feed(&mut builder, 1, 0b1000_0000, 1);
        feed(&mut builder, 2, 0b1000_0000, 1);
        let out = builder.finalize();
        assert_eq!(out.data, vec![0xE0; 4]);
    }

    #[test]
    fn row_is_clipped_at_capacity() {
        let three = Magnification::new(3).unwrap();
        // 6 source bits * 3 = 18 output bits, but a row only holds 16
        let mut builder = StreamBuilder::new(9, 6, three);
        feed(&mut builder, 0, 0b1010_1000, 6);
        let out = builder.finalize();
        assert_eq!(out.data, [0b1110_0011u8, 0b1000_1110].repeat(3));
        assert!(out.remainder.is_empty());
    }

    #[test]
    fn short_last_row_is_remainder() {
        let mut builder = StreamBuilder::new(16, 4, Magnification::ONE);
        feed(&mut builder, 0, 0xFF, 8);
        feed(&mut builder, 0, 0x00, 8);
        feed(&mut builder, 1, 0xA0, 3);
        let out = builder.finalize();
        assert_eq!(out.data, vec![0xFF, 0x00]);
        assert_eq!(out.remainder, vec![0xA0]);
        assert_eq!(out.consumed, 24);
    }

    #[test]
    fn nothing_added() {
        let builder = StreamBuilder::new(8, 4, Magnification::ONE);
        assert_eq!(builder.finalize(), StreamOutput::default());
    }
}
