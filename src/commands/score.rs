//! The `score` subcommand: resolve, score, and report artifacts.

use crate::commands::common::{self, CommonArgs};
use artifact_rank::Result;
use artifact_rank::facts::Resolver;
use artifact_rank::metrics::LlmJudge;
use artifact_rank::reports::generate;
use artifact_rank::scoring::{ScoreTarget, Scorer};
use clap::Args;
use ohno::IntoAppError;
use std::fs;

/// Arguments for the score subcommand
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Artifact URL, or path to a batch file (one URL per line, a JSON array
    /// of URLs, or `code,dataset,model` triples)
    #[arg(value_name = "INPUT")]
    pub input: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Score every target named by the input and print one JSON record each
pub async fn score_artifacts(args: &ScoreArgs) -> Result<()> {
    common::init_logging(args.common.log_level);

    let resolver = Resolver::new(args.common.github_token.as_deref())?;
    let llm = match &args.common.llm_key {
        Some(key) => Some(LlmJudge::new(key, &args.common.llm_endpoint)?),
        None => None,
    };

    let scorer = Scorer::new(resolver, llm);

    for target in gather_targets(&args.input)? {
        let record = scorer.score(&target).await;
        let mut line = String::new();
        generate(&record, args.common.pretty, &mut line)?;
        println!("{line}");
    }

    Ok(())
}

/// Interpret the INPUT argument: a direct URL scores a single artifact,
/// anything else is read as a batch file.
fn gather_targets(input: &str) -> Result<Vec<ScoreTarget>> {
    if input.starts_with("http://") || input.starts_with("https://") {
        return Ok(vec![ScoreTarget::from_url(input)]);
    }

    let contents = fs::read_to_string(input).into_app_err("unable to read input file")?;
    parse_batch(&contents)
}

/// Parse a batch file: a JSON array of URLs, or one entry per line where each
/// line is a bare URL or a `code,dataset,model` triple. A triple's blank
/// dataset cell inherits the most recent dataset seen above it.
fn parse_batch(contents: &str) -> Result<Vec<ScoreTarget>> {
    if contents.trim_start().starts_with('[') {
        let urls: Vec<String> = serde_json::from_str(contents.trim()).into_app_err("unable to parse JSON input file")?;
        return Ok(urls.into_iter().map(ScoreTarget::from_url).collect());
    }

    let mut targets = Vec::new();
    let mut last_dataset: Option<String> = None;

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.contains(',') {
            targets.extend(parse_triple(line, &mut last_dataset));
        } else {
            targets.push(ScoreTarget::from_url(line));
        }
    }

    Ok(targets)
}

/// One `code,dataset,model` line. The model URL is the scored artifact; code
/// and dataset cells become companion links. Lines naming only a dataset or
/// only code score that URL directly.
fn parse_triple(line: &str, last_dataset: &mut Option<String>) -> Option<ScoreTarget> {
    let mut cells = line.splitn(3, ',').map(str::trim);
    let code = cells.next().unwrap_or("");
    let dataset = cells.next().unwrap_or("");
    let model = cells.next().unwrap_or("");

    if !dataset.is_empty() {
        *last_dataset = Some(dataset.to_string());
    }

    let code_url = (!code.is_empty()).then(|| code.to_string());

    if !model.is_empty() {
        Some(ScoreTarget {
            url: model.to_string(),
            dataset_url: last_dataset.clone(),
            code_url,
        })
    } else if !dataset.is_empty() {
        Some(ScoreTarget {
            url: dataset.to_string(),
            dataset_url: None,
            code_url,
        })
    } else if !code.is_empty() {
        Some(ScoreTarget::from_url(code))
    } else {
        None
    }
}
