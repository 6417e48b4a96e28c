//! Report generation
//!
//! Renders score records as JSON objects, one per artifact, suitable for
//! newline-delimited output.

mod json;

pub use json::generate;
