//! # Shared code of the `bitview` binaries
pub mod cli;
