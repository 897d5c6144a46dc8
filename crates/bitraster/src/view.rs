//! # The state of a bit viewer
//!
//! [`BitView`] holds the buffer that is currently shown, if any. All entry
//! points return `None` while nothing (or an empty file) is loaded.

use std::path::Path;

use crate::{
    error::LoadError,
    geometry::{Magnification, Viewport},
    load::{load_bytes, ByteBuffer, Settings},
    raster::{compute_bitmap, strategy::Strategy, Bitmap},
    walk::ViewportWalk,
};

/// A viewer for the bits of a single buffer
#[derive(Debug, Clone, Default)]
pub struct BitView {
    buffer: Option<ByteBuffer>,
}

impl BitView {
    /// A viewer with nothing loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// A viewer for an existing buffer
    pub fn with_buffer(buffer: ByteBuffer) -> Self {
        Self {
            buffer: Some(buffer),
        }
    }

    /// Load a file, replacing the current buffer.
    ///
    /// On failure the previous buffer is kept.
    pub fn load_file(&mut self, path: &Path, settings: &Settings) -> Result<(), LoadError> {
        let buffer = load_bytes(path, settings.max_bytes)?;
        self.buffer = Some(buffer);
        Ok(())
    }

    /// The loaded buffer
    pub fn buffer(&self) -> Option<&ByteBuffer> {
        self.buffer.as_ref()
    }

    fn bytes(&self) -> Option<&[u8]> {
        self.buffer.as_deref().filter(|bytes| !bytes.is_empty())
    }

    /// Number of bits in the buffer, `0` if nothing is loaded
    pub fn num_bits(&self) -> usize {
        self.buffer.as_ref().map_or(0, ByteBuffer::num_bits)
    }

    /// The packed, unmagnified bitmap of `viewport`
    pub fn bitmap(&self, viewport: &Viewport) -> Option<Bitmap> {
        compute_bitmap(self.bytes()?, viewport)
    }

    /// The magnified raster of `viewport`
    pub fn rasterize(
        &self,
        viewport: &Viewport,
        magnification: Magnification,
        strategy: Strategy,
    ) -> Option<Bitmap> {
        strategy.rasterize(self.bytes()?, viewport, magnification)
    }

    /// Walk the bits of `viewport` one by one
    pub fn walk(&self, viewport: &Viewport) -> Option<ViewportWalk<'_>> {
        Some(ViewportWalk::new(self.bytes()?, viewport))
    }
}
