#![warn(missing_docs)]
//! # Bit windows for binary viewers
//!
//! This crate turns a raw byte buffer into packed monochrome rasters, one
//! pixel per bit, for viewers that show binary files as a grid of bits.
//!
//! Bits are addressed MSB-first: bit 0 is the most significant bit of the
//! first byte. A [`Viewport`] selects a window of rows and columns out of a
//! buffer that is wrapped into rows of arbitrary (not necessarily byte
//! aligned) width, and the resulting [`Bitmap`] can be magnified so that
//! every bit becomes an N×N block.
//!
//! There are two ways to get there:
//!
//! - [`compute_bitmap`] packs whole rows at once and [`Bitmap::magnify`]
//!   scales them afterwards using [`replicate`],
//! - [`StreamBuilder`] consumes single bits and writes magnified output
//!   directly.
//!
//! [`Strategy`] picks one of them behind a single call.

pub mod address;
pub mod error;
pub mod geometry;
pub mod load;
pub mod raster;
pub mod util;
pub mod view;
pub mod walk;

pub use address::{BitAddr, Resolver};
pub use error::{GeometryError, LoadError};
pub use geometry::{Magnification, ScrollLimits, Viewport};
pub use load::{load_bytes, ByteBuffer, Settings};
pub use raster::{
    compute_bitmap,
    replicate::{replicate, replicate_reference},
    stream::{StreamBuilder, StreamOutput},
    strategy::Strategy,
    Bitmap,
};
pub use view::BitView;
pub use walk::ViewportWalk;
