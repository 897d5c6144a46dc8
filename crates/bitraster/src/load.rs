//! # Loading buffers

use std::{
    fs::File,
    io::{self, Read},
    ops::Deref,
    path::Path,
    sync::Arc,
};

use log::{info, warn};
use serde::Deserialize;

use crate::{error::LoadError, geometry::Magnification};

/// An immutable, cheaply cloneable byte buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteBuffer(Arc<[u8]>);

impl Default for ByteBuffer {
    fn default() -> Self {
        Self::from(Vec::new())
    }
}

impl ByteBuffer {
    /// Number of bits in the buffer
    pub fn num_bits(&self) -> usize {
        self.0.len() * 8
    }
}

impl Deref for ByteBuffer {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes.into())
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.into())
    }
}

/// Viewer settings
///
/// Usually read from a RON file, every field has a default:
///
/// ```ron
/// (
///     max_bytes: 1048576,
///     row_width: 64,
///     magnification: 1,
///     grid_size: 0,
///     bit_borders_start: 3,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Maximum number of bytes read from a file
    pub max_bytes: u64,
    /// Number of bits per row
    pub row_width: usize,
    /// Size of a bit in pixels
    pub magnification: Magnification,
    /// Distance between grid lines in bits, `0` disables the grid
    pub grid_size: usize,
    /// Smallest magnification at which the bits get a border
    pub bit_borders_start: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_bytes: 1 << 20,
            row_width: 64,
            magnification: Magnification::ONE,
            grid_size: 0,
            bit_borders_start: 3,
        }
    }
}

impl Settings {
    /// Whether bits drawn at `magnification` get a border
    pub fn bit_borders(&self, magnification: Magnification) -> bool {
        magnification.get() >= self.bit_borders_start
    }
}

fn read_capped<R: Read>(reader: R, max_bytes: u64) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    reader.take(max_bytes).read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Read at most `max_bytes` bytes of a file
pub fn load_bytes(path: &Path, max_bytes: u64) -> Result<ByteBuffer, LoadError> {
    let io_err = |source| LoadError::Io {
        path: path.display().to_string(),
        source,
    };
    let file = File::open(path).map_err(io_err)?;
    let len = file.metadata().map_err(io_err)?.len();
    let buffer = read_capped(file, max_bytes).map_err(io_err)?;
    if len > max_bytes {
        warn!(
            "Only the first {} of {} bytes of '{}' are shown",
            max_bytes,
            len,
            path.display()
        );
    }
    info!("Loaded {} bytes from '{}'", buffer.len(), path.display());
    Ok(ByteBuffer::from(buffer))
}
