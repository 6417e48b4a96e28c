//! A tool to score the trustworthiness of machine-learning artifacts.
//!
//! # Overview
//!
//! `artifact-rank` takes URLs of models, datasets, and code repositories,
//! fetches their metadata from the hosting services, and produces a set of
//! bounded quality scores blended into a single net score per artifact.
//!
//! # Quick Start
//!
//! Score a single model:
//!
//! ```bash
//! artifact-rank score https://huggingface.co/google/bert-base-uncased
//! ```
//!
//! This prints one JSON record with the net score, the eight individual
//! metric scores, and the wall-clock cost of each.
//!
//! # Batch Input
//!
//! A file argument scores many artifacts, one JSON record per line:
//!
//! ```bash
//! artifact-rank score urls.txt
//! ```
//!
//! The file holds one entry per line. An entry is either a bare URL or a
//! `code,dataset,model` triple linking a model to its training data and
//! source code; a triple with a blank dataset cell inherits the most recent
//! dataset named above it. A JSON array of URLs is also accepted.
//!
//! # Metrics
//!
//! Each artifact is scored on ramp-up ease, contributor redundancy,
//! performance claims, license permissiveness, hardware fit (per deployment
//! target), reproducibility surface, dataset quality, and engineering
//! practice. Every score lies in `[0.0, 1.0]`; missing upstream data
//! degrades to each metric's floor rather than failing the run.
//!
//! # Service Access
//!
//! Unauthenticated code-host API access is heavily rate limited. Provide a
//! token to raise the limit:
//!
//! ```bash
//! export GITHUB_TOKEN=ghp_xxxxxxxxxxxxxxxxxxxx
//! artifact-rank score urls.txt
//! ```
//!
//! The dataset-quality metric can optionally consult an LLM judge; set
//! `GEN_AI_STUDIO_API_KEY` to enable it. Without a key a local heuristic is
//! used instead.

use artifact_rank::Result;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

mod commands;

use crate::commands::{ScoreArgs, score_artifacts};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "artifact-rank", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: RankSubcommand,
}

#[derive(Subcommand, Debug)]
enum RankSubcommand {
    /// Score artifacts and emit one JSON record per URL
    Score(ScoreArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    match &Cli::parse().command {
        RankSubcommand::Score(score_args) => score_artifacts(score_args).await,
    }
}
