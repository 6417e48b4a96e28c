//! Metric calculators for artifact trustworthiness
//!
//! This module turns a normalized [`MetadataRecord`] into a set of bounded
//! scores, one per metric in a closed set of eight.
//!
//! # Implementation Model
//!
//! The core abstraction is [`MetricKind`], which enumerates every metric and
//! carries its report key, net-score weight, and ancillary data requirements.
//! The calculators themselves are plain functions over `&MetadataRecord`,
//! one per submodule, each producing a value in `[0.0, 1.0]` (the size metric
//! produces a per-device map whose entries are individually bounded).
//!
//! [`evaluate`] is the single entry point: it fetches whatever ancillary data
//! the metric declares it needs, runs the calculator, and charges the whole
//! elapsed time to that metric's latency. Calculators never fail; missing
//! data maps to each metric's lowest defined score.

mod bus_factor;
mod code_quality;
mod dataset_and_code;
mod dataset_quality;
mod license;
mod performance_claims;
mod ramp_up;
mod size;

pub use dataset_quality::{DEFAULT_JUDGE_ENDPOINT, LlmJudge};
pub use size::{DeviceClass, DeviceScores};

use crate::facts::{FetchOptions, MetadataRecord, Resolver};
use std::time::Instant;
use strum::{Display, EnumIter};

/// The closed set of metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum MetricKind {
    RampUp,
    BusFactor,
    PerformanceClaims,
    License,
    Size,
    DatasetAndCode,
    DatasetQuality,
    CodeQuality,
}

impl MetricKind {
    /// Every metric, in report order
    pub const ALL: [Self; 8] = [
        Self::RampUp,
        Self::BusFactor,
        Self::PerformanceClaims,
        Self::License,
        Self::Size,
        Self::DatasetAndCode,
        Self::DatasetQuality,
        Self::CodeQuality,
    ];

    /// Key this metric is reported under
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::RampUp => "ramp_up_time",
            Self::BusFactor => "bus_factor",
            Self::PerformanceClaims => "performance_claims",
            Self::License => "license",
            Self::Size => "size_score",
            Self::DatasetAndCode => "dataset_and_code",
            Self::DatasetQuality => "dataset_quality",
            Self::CodeQuality => "code_quality",
        }
    }

    /// Net-score weight. Dataset quality is reported but carries no weight;
    /// the remaining weights sum to 1.0.
    #[must_use]
    pub const fn weight(self) -> f64 {
        match self {
            Self::RampUp => 0.20,
            Self::BusFactor | Self::PerformanceClaims | Self::Size | Self::DatasetAndCode => 0.15,
            Self::License | Self::CodeQuality => 0.10,
            Self::DatasetQuality => 0.0,
        }
    }

    /// Ancillary data this metric needs before it can run
    #[must_use]
    pub const fn requirements(self) -> FetchOptions {
        match self {
            Self::BusFactor => FetchOptions {
                include_repo_tree: false,
                include_commit_history: true,
            },
            Self::CodeQuality => FetchOptions {
                include_repo_tree: true,
                include_commit_history: false,
            },
            _ => FetchOptions {
                include_repo_tree: false,
                include_commit_history: false,
            },
        }
    }
}

/// A metric's computed value
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Scalar(f64),
    PerDevice(DeviceScores),
}

impl MetricValue {
    /// Net-score contribution of this value, always in `[0.0, 1.0]`.
    /// Out-of-range scalars contribute nothing.
    #[must_use]
    pub fn contribution(&self) -> f64 {
        match self {
            Self::Scalar(v) => {
                if (0.0..=1.0).contains(v) {
                    *v
                } else {
                    0.0
                }
            }
            Self::PerDevice(scores) => scores.mean(),
        }
    }
}

/// A computed metric with its wall-clock cost
#[derive(Debug, Clone)]
pub struct MetricScore {
    pub kind: MetricKind,
    pub value: MetricValue,
    pub latency_ms: u64,
}

/// Evaluate one metric against a record.
///
/// Ancillary fetches the metric requires happen inside its timing window, so
/// the first metric that needs a given fetch pays for it and later metrics
/// reuse the merged data.
pub async fn evaluate(
    kind: MetricKind,
    resolver: &Resolver,
    record: &mut MetadataRecord,
    llm: Option<&LlmJudge>,
) -> MetricScore {
    let start = Instant::now();
    resolver.augment(record, kind.requirements()).await;

    let value = match kind {
        MetricKind::RampUp => MetricValue::Scalar(ramp_up::score(record)),
        MetricKind::BusFactor => MetricValue::Scalar(bus_factor::score(record)),
        MetricKind::PerformanceClaims => MetricValue::Scalar(performance_claims::score(record)),
        MetricKind::License => MetricValue::Scalar(license::score(record)),
        MetricKind::Size => MetricValue::PerDevice(size::score(record)),
        MetricKind::DatasetAndCode => MetricValue::Scalar(dataset_and_code::score(record)),
        MetricKind::DatasetQuality => MetricValue::Scalar(dataset_quality::score(record, llm).await),
        MetricKind::CodeQuality => MetricValue::Scalar(code_quality::score(record)),
    };

    #[expect(clippy::cast_possible_truncation, reason = "latencies are far below u64::MAX milliseconds")]
    let latency_ms = start.elapsed().as_millis() as u64;

    MetricScore { kind, value, latency_ms }
}
