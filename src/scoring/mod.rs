//! Score aggregation
//!
//! Blends the eight metric scores into a single bounded net score using fixed
//! weights, and records per-metric latencies along the way.
//!
//! # Implementation Model
//!
//! The [`Scorer`] resolves a target URL into a metadata record once, then runs
//! every metric over that record sequentially. Ancillary fetches happen lazily
//! inside the first metric that needs them, so their cost lands in that
//! metric's latency and later metrics reuse the merged data. The net score is
//! the weighted sum of each metric's contribution (the per-device mean for the
//! size metric), clamped to `[0.0, 1.0]`; the net latency is the sum of the
//! metric latencies. Scoring a record is idempotent: repeating it yields the
//! same scores.

use crate::facts::{Category, FetchOptions, MetadataRecord, Resolver, artifact_name};
use crate::metrics::{self, LlmJudge, MetricKind, MetricScore, MetricValue};

/// A URL to score, with optional companion links carried over from batch input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTarget {
    pub url: String,
    pub dataset_url: Option<String>,
    pub code_url: Option<String>,
}

impl ScoreTarget {
    /// A target with no companion links
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// The complete score set for one artifact
#[derive(Debug, Clone)]
pub struct ScoreRecord {
    pub name: String,
    pub category: Category,
    pub net_score: f64,
    pub net_score_latency: u64,
    pub metrics: Vec<MetricScore>,
}

/// Scores artifacts end to end
#[derive(Debug)]
pub struct Scorer {
    resolver: Resolver,
    llm: Option<LlmJudge>,
}

impl Scorer {
    #[must_use]
    pub const fn new(resolver: Resolver, llm: Option<LlmJudge>) -> Self {
        Self { resolver, llm }
    }

    /// Resolve and score a single target
    pub async fn score(&self, target: &ScoreTarget) -> ScoreRecord {
        let mut record = self.resolver.resolve(&target.url, FetchOptions::default()).await;

        // Companion links from batch input fill gaps, never override
        if record.dataset_url.is_none() {
            record.dataset_url.clone_from(&target.dataset_url);
        }

        if record.code_url.is_none() {
            record.code_url.clone_from(&target.code_url);
        }

        self.score_record(&mut record).await
    }

    /// Score an already-resolved record
    pub async fn score_record(&self, record: &mut MetadataRecord) -> ScoreRecord {
        let mut scores = Vec::with_capacity(MetricKind::ALL.len());
        for kind in MetricKind::ALL {
            let mut metric = metrics::evaluate(kind, &self.resolver, record, self.llm.as_ref()).await;
            metric.value = rounded(metric.value);
            scores.push(metric);
        }

        let net: f64 = scores.iter().map(|s| s.kind.weight() * s.value.contribution()).sum();
        let net_score_latency = scores.iter().map(|s| s.latency_ms).sum();

        ScoreRecord {
            name: artifact_name(&record.url),
            category: record.category,
            net_score: round2(net.clamp(0.0, 1.0)),
            net_score_latency,
            metrics: scores,
        }
    }
}

/// Scalars are reported to two decimal places; device maps round per entry at
/// the metric level.
fn rounded(value: MetricValue) -> MetricValue {
    match value {
        MetricValue::Scalar(v) => MetricValue::Scalar(round2(v)),
        MetricValue::PerDevice(scores) => MetricValue::PerDevice(scores),
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
