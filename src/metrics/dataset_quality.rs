//! Dataset curation scoring
//!
//! Two strategies, tried in order. When a judge API key is configured, an LLM
//! is asked to rate the dataset's documentation and provenance directly; any
//! failure there falls back to a local heuristic over the linked resources and
//! description depth. Either way the result is bounded.

use crate::Result;
use crate::facts::MetadataRecord;
use core::time::Duration;
use ohno::bail;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use std::sync::LazyLock;

const LOG_TARGET: &str = "     judge";

const JUDGE_TIMEOUT: Duration = Duration::from_secs(30);
const JUDGE_MODEL: &str = "llama4:latest";

/// Default chat-completions endpoint for the judge
pub const DEFAULT_JUDGE_ENDPOINT: &str = "https://genai.api.purdue.edu/v1/chat/completions";

#[expect(clippy::unwrap_used, reason = "pattern is a compile-time constant")]
static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

/// LLM-backed dataset quality judge
#[derive(Debug, Clone)]
pub struct LlmJudge {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl LlmJudge {
    /// Create a judge against the given chat-completions endpoint
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::builder().user_agent("artifact-rank").build()?,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    /// Ask the judge for a quality rating in `[0.0, 1.0]`
    pub async fn judge(&self, record: &MetadataRecord) -> Result<f64> {
        let prompt = format!(
            "Rate the quality of this machine-learning dataset on a scale from 0.0 to 1.0, \
             considering documentation, provenance, and usability. \
             Dataset: {}. Linked code: {}. Description: {}. \
             Reply with a single number and nothing else.",
            record.dataset_url.as_deref().unwrap_or("unknown"),
            record.code_url.as_deref().unwrap_or("none"),
            record.description.as_deref().unwrap_or("none"),
        );

        let payload = json!({
            "model": JUDGE_MODEL,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": 0.0,
        });

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .timeout(JUDGE_TIMEOUT)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            bail!("judge request failed with status {status}");
        }

        let body: ChatResponse = resp.json().await?;
        let content = body.choices.first().map(|c| c.message.content.as_str()).unwrap_or_default();

        let Some(value) = parse_score(content) else {
            bail!("judge reply contained no numeric score: {content:?}");
        };

        Ok(value.clamp(0.0, 1.0))
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

fn parse_score(text: &str) -> Option<f64> {
    NUMBER.find(text).and_then(|m| m.as_str().parse().ok())
}

pub async fn score(record: &MetadataRecord, judge: Option<&LlmJudge>) -> f64 {
    if let Some(judge) = judge {
        match judge.judge(record).await {
            Ok(value) => return value,
            Err(e) => log::warn!(target: LOG_TARGET, "judge unavailable, using heuristic: {e:#}"),
        }
    }

    heuristic(record)
}

fn heuristic(record: &MetadataRecord) -> f64 {
    let mut total: f64 = 0.0;

    if record.dataset_url.is_some() {
        total += 0.3;
    }

    if record.code_url.is_some() {
        total += 0.3;
    }

    let desc_len = record.description.as_deref().map_or(0, str::len);
    if desc_len > 100 {
        total += 0.2;
    } else if desc_len > 50 {
        total += 0.1;
    }

    if record.any_sibling(|f| f.starts_with("readme")) {
        total += 0.1;
    }

    if record.any_sibling(|f| f.contains("example") || f.contains("tutorial")) {
        total += 0.1;
    }

    total.min(1.0)
}
