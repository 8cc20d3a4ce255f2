//! Ingestion layer for the video ratings analyzer.
//!
//! Streams ratings files, classifies and parses each line, groups valid
//! records by creator and runs the top-level validation and aggregation
//! pipeline.

pub mod aggregator;
pub mod parser;
pub mod pipeline;
pub mod reader;
pub mod validator;

pub use ratings_core as core;
