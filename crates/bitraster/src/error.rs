//! Errors at the boundary of the crate

use std::io;

use displaydoc::Display;
use thiserror::Error;

/// Rejected viewport or scale parameters
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// row width must be at least one bit
    ZeroRowWidth,
    /// magnification must be at least 1
    ZeroMagnification,
    /// `{name}` must not be negative (got {value})
    Negative {
        /// The name of the parameter
        name: &'static str,
        /// The rejected value
        value: i64,
    },
    /// `{name}` is too large for this platform ({value})
    Overflow {
        /// The name of the parameter
        name: &'static str,
        /// The rejected value
        value: i64,
    },
}

#[derive(Debug, Error)]
/// Error when loading a buffer
pub enum LoadError {
    /// The IO failed
    #[error("Failed to read {path}")]
    Io {
        /// The file that was read
        path: String,
        /// The underlying error
        #[source]
        source: io::Error,
    },
}
