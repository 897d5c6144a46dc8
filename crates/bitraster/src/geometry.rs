//! # Viewport geometry
//!
//! All positions are counted in bits (columns) and rows, relative to a buffer
//! that is wrapped into rows of [`Viewport::row_width`] bits.

use std::{convert::TryFrom, fmt, num::NonZeroUsize, str::FromStr};

use log::warn;
use serde::Deserialize;

use crate::error::GeometryError;

/// The scale factor of a raster: every bit becomes an N×N block
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "usize")]
pub struct Magnification(NonZeroUsize);

impl Magnification {
    /// One bit per pixel
    pub const ONE: Magnification = Magnification(NonZeroUsize::MIN);

    /// Create a new magnification, rejecting `0`
    pub fn new(factor: usize) -> Result<Self, GeometryError> {
        NonZeroUsize::new(factor)
            .map(Self)
            .ok_or(GeometryError::ZeroMagnification)
    }

    /// The factor as an integer
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for Magnification {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<usize> for Magnification {
    type Error = GeometryError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for Magnification {
    type Err = MagnificationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let factor: usize = s.parse().map_err(|_| MagnificationParseError {})?;
        Self::new(factor).map_err(|_| MagnificationParseError {})
    }
}

impl fmt::Display for Magnification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Expected a positive integer")]
/// Failed to parse a magnification
pub struct MagnificationParseError {}

/// The window into the buffer that should be displayed
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Viewport {
    /// Number of bits to skip at the start of the buffer
    pub offset: usize,
    /// Number of bits per row
    pub row_width: usize,
    /// First visible column (horizontal scroll position)
    pub start_column: usize,
    /// First visible row (vertical scroll position)
    pub start_row: usize,
    /// Number of visible rows
    pub visible_rows: usize,
    /// Number of visible columns
    pub visible_columns: usize,
}

fn non_negative(name: &'static str, value: i64) -> Result<usize, GeometryError> {
    if value < 0 {
        return Err(GeometryError::Negative { name, value });
    }
    usize::try_from(value).map_err(|_| GeometryError::Overflow { name, value })
}

impl Viewport {
    /// A viewport at the top left of a buffer with the given row width
    pub fn new(
        row_width: usize,
        visible_rows: usize,
        visible_columns: usize,
    ) -> Result<Self, GeometryError> {
        if row_width == 0 {
            return Err(GeometryError::ZeroRowWidth);
        }
        Ok(Self {
            offset: 0,
            row_width,
            start_column: 0,
            start_row: 0,
            visible_rows,
            visible_columns,
        })
    }

    /// Build a viewport from signed values, as produced by scrollbars and
    /// command lines.
    pub fn from_signed(
        offset: i64,
        row_width: i64,
        start_column: i64,
        start_row: i64,
        visible_rows: i64,
        visible_columns: i64,
    ) -> Result<Self, GeometryError> {
        let row_width = non_negative("row_width", row_width)?;
        let mut viewport = Self::new(
            row_width,
            non_negative("visible_rows", visible_rows)?,
            non_negative("visible_columns", visible_columns)?,
        )?;
        viewport.offset = non_negative("offset", offset)?;
        viewport.start_column = non_negative("start_column", start_column)?;
        viewport.start_row = non_negative("start_row", start_row)?;
        Ok(viewport)
    }

    /// Set the bit offset
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Set the scroll position
    pub fn scrolled_to(mut self, start_column: usize, start_row: usize) -> Self {
        self.start_column = start_column;
        self.start_row = start_row;
        self
    }

    /// Index of the first visible bit
    pub fn start_bit(&self) -> usize {
        self.start_row
            .saturating_mul(self.row_width)
            .saturating_add(self.start_column)
            .saturating_add(self.offset)
    }

    /// Number of bits per packed row
    pub fn bits_per_row(&self) -> usize {
        self.row_width.min(self.visible_columns)
    }

    /// Number of bytes per packed row
    pub fn bytes_per_row(&self) -> usize {
        div_ceil(self.bits_per_row(), 8)
    }

    /// Number of bits that are visible in this viewport
    pub fn visible_bits(&self) -> usize {
        self.visible_rows.saturating_mul(self.visible_columns)
    }

    /// Scroll limits for a buffer of `total_bits`
    pub fn scroll_limits(&self, total_bits: usize) -> ScrollLimits {
        ScrollLimits {
            columns: self.row_width.saturating_sub(self.visible_columns),
            rows: total_rows(total_bits.saturating_sub(self.offset), self.row_width)
                .saturating_sub(self.visible_rows),
        }
    }

    /// Move the scroll position into the scrollable range
    pub fn clamp_scroll(mut self, total_bits: usize) -> Self {
        let limits = self.scroll_limits(total_bits);
        if self.start_column > limits.columns || self.start_row > limits.rows {
            warn!(
                "Scroll position ({}, {}) clamped to ({}, {})",
                self.start_column,
                self.start_row,
                self.start_column.min(limits.columns),
                self.start_row.min(limits.rows)
            );
        }
        self.start_column = self.start_column.min(limits.columns);
        self.start_row = self.start_row.min(limits.rows);
        self
    }
}

/// The maximum scroll positions of a viewport
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScrollLimits {
    /// Largest useful value of [`Viewport::start_column`]
    pub columns: usize,
    /// Largest useful value of [`Viewport::start_row`]
    pub rows: usize,
}

pub(crate) fn div_ceil(a: usize, b: usize) -> usize {
    a / b + usize::from(a % b != 0)
}

/// Number of rows needed to show `total_bits` with the given row width
pub fn total_rows(total_bits: usize, row_width: usize) -> usize {
    if row_width == 0 {
        return 0;
    }
    div_ceil(total_bits, row_width)
}

/// Pixel positions of the lines of a grid with a cell size of `grid_size` bits.
///
/// `scroll` is the scroll position in bits along the same axis, `extent` the
/// last pixel position that may carry a line. A `grid_size` of zero disables
/// the grid.
pub fn grid_lines(
    scroll: usize,
    grid_size: usize,
    magnification: Magnification,
    extent: usize,
) -> impl Iterator<Item = usize> {
    let (first, step) = match grid_size {
        0 => (extent + 1, 1),
        _ => {
            let first = (grid_size - scroll % grid_size) % grid_size;
            (first * magnification.get(), grid_size * magnification.get())
        }
    };
    (first..=extent).step_by(step)
}

#[cfg(test)]
mod tests {
    use super::{grid_lines, total_rows, Magnification, ScrollLimits, Viewport};
    use crate::error::GeometryError;

    #[test]
    fn reject_invalid() {
        assert_eq!(Viewport::new(0, 1, 1), Err(GeometryError::ZeroRowWidth));
        assert_eq!(
            Viewport::from_signed(0, -8, 0, 0, 1, 1),
            Err(GeometryError::Negative {
                name: "row_width",
                value: -8
            })
        );
        assert_eq!(
            Viewport::from_signed(-1, 8, 0, 0, 1, 1),
            Err(GeometryError::Negative {
                name: "offset",
                value: -1
            })
        );
        assert_eq!(
            Viewport::from_signed(0, 8, 0, -3, 1, 1),
            Err(GeometryError::Negative {
                name: "start_row",
                value: -3
            })
        );
        assert_eq!(Magnification::new(0), Err(GeometryError::ZeroMagnification));
        assert!("0".parse::<Magnification>().is_err());
        assert_eq!("3".parse::<Magnification>().unwrap().get(), 3);
    }

    #[test]
    fn start_and_rows() {
        let vp = Viewport::from_signed(3, 12, 2, 4, 10, 20).unwrap();
        assert_eq!(vp.start_bit(), 4 * 12 + 2 + 3);
        assert_eq!(vp.bits_per_row(), 12);
        assert_eq!(vp.bytes_per_row(), 2);
        assert_eq!(total_rows(100, 12), 9);
        assert_eq!(total_rows(96, 12), 8);
    }

    #[test]
    fn scroll_limits() {
        let vp = Viewport::new(64, 10, 16).unwrap();
        assert_eq!(
            vp.scroll_limits(64 * 25),
            ScrollLimits {
                columns: 48,
                rows: 15
            }
        );
        assert_eq!(
            vp.scroll_limits(64),
            ScrollLimits {
                columns: 48,
                rows: 0
            }
        );
        let clamped = vp.scrolled_to(100, 100).clamp_scroll(64 * 25);
        assert_eq!((clamped.start_column, clamped.start_row), (48, 15));
    }

    #[test]
    fn grid() {
        let two = Magnification::new(2).unwrap();
        let lines: Vec<_> = grid_lines(0, 4, two, 20).collect();
        assert_eq!(lines, vec![0, 8, 16]);
        let lines: Vec<_> = grid_lines(3, 4, two, 20).collect();
        assert_eq!(lines, vec![2, 10, 18]);
        assert_eq!(grid_lines(0, 0, two, 20).count(), 0);
    }
}
