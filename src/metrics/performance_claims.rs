//! Evidence-of-evaluation scoring
//!
//! Rewards artifacts that back up their claims: structured benchmark results,
//! benchmark-related tags, and community adoption. Only meaningful for models;
//! other categories score zero. A model with no evidence at all still gets a
//! small floor, since the metric measures claims rather than quality.

use crate::facts::{Category, MetadataRecord};

const CLAIM_TAGS: [&str; 7] = [
    "arxiv:",
    "leaderboard",
    "benchmark",
    "evaluation",
    "sota",
    "state-of-the-art",
    "performance",
];

const NO_EVIDENCE_FLOOR: f64 = 0.1;

#[must_use]
pub fn score(record: &MetadataRecord) -> f64 {
    if record.category != Category::Model {
        return 0.0;
    }

    let mut total = 0.0;

    let result_count = benchmark_result_count(&record.model_index);
    if result_count > 0 {
        total += 0.5;
        if result_count > 1 {
            total += 0.2;
        }
    }

    if record.any_tag(|t| CLAIM_TAGS.iter().any(|m| t.contains(m))) {
        total += 0.25;
    }

    // A card-only model index is weaker evidence than a published one
    if record.model_index.is_empty() && record.card.model_index.as_ref().is_some_and(|mi| !mi.is_empty()) {
        total += 0.3;
    }

    total += popularity_points(record.downloads, record.likes);

    if total == 0.0 {
        return NO_EVIDENCE_FLOOR;
    }

    total.min(1.0)
}

/// Number of result sets across all model-index entries
fn benchmark_result_count(model_index: &[serde_json::Value]) -> usize {
    model_index
        .iter()
        .filter_map(|entry| entry.get("results").and_then(serde_json::Value::as_array))
        .map(Vec::len)
        .sum()
}

const fn popularity_points(downloads: u64, likes: u64) -> f64 {
    if downloads > 100_000 || likes > 500 {
        0.4
    } else if downloads > 10_000 || likes > 100 {
        0.3
    } else if downloads > 1_000 || likes > 10 {
        0.2
    } else if downloads > 100 || likes > 5 {
        0.1
    } else {
        0.0
    }
}
