//! # Choosing between batch and streaming rasterization

use std::{fmt, str::FromStr};

use log::debug;

use super::{compute_bitmap, stream::StreamBuilder, Bitmap};
use crate::{
    address::Resolver,
    geometry::{div_ceil, Magnification, Viewport},
    walk::ViewportWalk,
};

/// Largest magnification for which [`Strategy::Auto`] streams
pub const STREAMING_MAX_MAGNIFICATION: usize = 2;
/// Largest number of visible bits for which [`Strategy::Auto`] streams
pub const STREAMING_MAX_BITS: usize = 1 << 16;

/// How a magnified raster is produced
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Pack whole rows, then magnify every byte
    Batch,
    /// Write every bit magnified while walking the viewport
    Streaming,
    /// Pick one of the above from the magnification and viewport size
    #[default]
    Auto,
}

impl Strategy {
    /// Replace [`Strategy::Auto`] with the concrete strategy for this call
    pub fn resolve(self, viewport: &Viewport, magnification: Magnification) -> Self {
        match self {
            Self::Auto
                if magnification.get() <= STREAMING_MAX_MAGNIFICATION
                    && viewport.visible_bits() <= STREAMING_MAX_BITS =>
            {
                Self::Streaming
            }
            Self::Auto => Self::Batch,
            other => other,
        }
    }

    /// Produce the magnified raster of `viewport`.
    ///
    /// Returns `None` if `bytes` is empty. Both strategies produce the same
    /// bitmap: rows of `ceil(width * N / 8)` bytes with zero padding.
    pub fn rasterize(
        self,
        bytes: &[u8],
        viewport: &Viewport,
        magnification: Magnification,
    ) -> Option<Bitmap> {
        let strategy = self.resolve(viewport, magnification);
        debug!("Rasterizing {:?} with {} at {}x", viewport, strategy, magnification);
        match strategy {
            Self::Streaming => stream(bytes, viewport, magnification),
            _ => compute_bitmap(bytes, viewport).map(|bitmap| bitmap.magnify(magnification)),
        }
    }
}

fn stream(bytes: &[u8], viewport: &Viewport, magnification: Magnification) -> Option<Bitmap> {
    if bytes.is_empty() {
        return None;
    }
    let resolver = Resolver::new(bytes);
    let total_bits = resolver.total_bits();
    let factor = magnification.get();
    let columns = viewport.bits_per_row();
    let width = columns.saturating_mul(factor);
    let bytes_per_row = div_ceil(width, 8);
    let start = viewport.start_bit();
    if start >= total_bits {
        return Some(Bitmap {
            width,
            bytes_per_row,
            ..Bitmap::default()
        });
    }

    // rows that have all of their bits inside the buffer
    let rows = match start
        .checked_add(columns)
        .and_then(|end| total_bits.checked_sub(end))
    {
        Some(spare) => {
            (spare / viewport.row_width + 1).min(viewport.visible_rows.saturating_add(1))
        }
        None => 0,
    };
    let mut builder = StreamBuilder::new(width, rows.saturating_mul(factor), magnification);
    for (_, y, bit) in ViewportWalk::with_size(bytes, viewport, columns, rows) {
        builder.add_bit(y, bit);
    }
    let output = builder.finalize();

    let remainder = if rows <= viewport.visible_rows {
        resolver.tail(start.saturating_add(rows.saturating_mul(viewport.row_width)))
    } else {
        Vec::new()
    };
    Some(Bitmap {
        data: output.data,
        width,
        bytes_per_row,
        remainder,
    })
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Batch => "batch",
            Self::Streaming => "streaming",
            Self::Auto => "auto",
        })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Use one of `batch`, `streaming` or `auto`")]
/// Failed to parse a strategy name
pub struct StrategyError {}

impl FromStr for Strategy {
    type Err = StrategyError;

    fn from_str(val: &str) -> Result<Self, Self::Err> {
        match val {
            "batch" => Ok(Self::Batch),
            "stream" | "streaming" => Ok(Self::Streaming),
            "auto" => Ok(Self::Auto),
            _ => Err(StrategyError {}),
        }
    }
}
