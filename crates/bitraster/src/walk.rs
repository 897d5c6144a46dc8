//! # Per-bit viewport walk
//!
//! Visits the bits of a viewport one at a time, for renderers that draw each
//! bit on their own and for the [streaming builder](crate::StreamBuilder).

use crate::{geometry::Viewport, util::bit_iter::BitIter};

/// Yields `(x, y, bit)` for the bits of a viewport in row-major order
///
/// Each row starts with an explicit seek to
/// `offset + (start_row + y) * row_width + start_column`, so the walk never
/// depends on where the previous row ended. The walk stops at the end of the
/// buffer, even in the middle of a row.
#[derive(Debug, Clone)]
pub struct ViewportWalk<'a> {
    bits: BitIter<'a>,
    viewport: Viewport,
    columns: usize,
    rows: usize,
    x: usize,
    y: usize,
}

impl<'a> ViewportWalk<'a> {
    /// Walk the visible bits, plus one row and one column beyond the
    /// viewport so that partially visible cells at the edges are drawn.
    pub fn new(bytes: &'a [u8], viewport: &Viewport) -> Self {
        let columns = viewport
            .row_width
            .saturating_sub(viewport.start_column)
            .min(viewport.visible_columns.saturating_add(1));
        let rows = viewport.visible_rows.saturating_add(1);
        Self::with_size(bytes, viewport, columns, rows)
    }

    /// Walk `rows` rows of `columns` bits each, starting at the scroll
    /// position of `viewport`.
    pub fn with_size(bytes: &'a [u8], viewport: &Viewport, columns: usize, rows: usize) -> Self {
        let mut walk = Self {
            bits: BitIter::new(bytes),
            viewport: *viewport,
            columns,
            rows,
            x: 0,
            y: 0,
        };
        walk.seek_row();
        walk
    }

    fn seek_row(&mut self) {
        let vp = &self.viewport;
        let start = (vp.start_row + self.y)
            .saturating_mul(vp.row_width)
            .saturating_add(vp.start_column)
            .saturating_add(vp.offset);
        self.bits.seek(start);
    }

    /// Number of bits per row of this walk
    pub fn columns(&self) -> usize {
        self.columns
    }
}

impl Iterator for ViewportWalk<'_> {
    type Item = (usize, usize, bool);

    fn next(&mut self) -> Option<Self::Item> {
        if self.columns == 0 || self.y >= self.rows {
            return None;
        }
        let bit = self.bits.next()?;
        let item = (self.x, self.y, bit);
        self.x += 1;
        if self.x >= self.columns {
            self.x = 0;
            self.y += 1;
            self.seek_row();
        }
        Some(item)
    }
}
