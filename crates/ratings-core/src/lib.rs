//! Core types for the video ratings analyzer.
//!
//! Holds the record and group models, the error type, the statistics
//! calculations, plain-text rendering and command-line settings shared by the
//! data and binary crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod statistics;

pub use error::{RatingsError, Result};
