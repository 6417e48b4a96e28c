//! Command implementations for the artifact-rank CLI.

mod common;
mod score;

pub use score::{ScoreArgs, score_artifacts};
