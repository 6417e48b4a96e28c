//! Hardware-fit scoring
//!
//! Scores how comfortably an artifact fits on each of four deployment targets,
//! from an embedded board up to a cloud server. Each device has a size
//! threshold: artifacts within it score in the upper half of the range, and
//! larger ones decay linearly to zero at three times the threshold.

use crate::facts::MetadataRecord;
use strum::{Display, EnumIter, IntoEnumIterator};

/// Deployment targets, smallest to largest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum DeviceClass {
    RaspberryPi,
    JetsonNano,
    DesktopPc,
    AwsServer,
}

impl DeviceClass {
    /// Largest artifact, in megabytes, the device handles comfortably
    #[must_use]
    pub const fn threshold_mb(self) -> f64 {
        match self {
            Self::RaspberryPi => 50.0,
            Self::JetsonNano => 200.0,
            Self::DesktopPc => 2000.0,
            Self::AwsServer => 10000.0,
        }
    }
}

/// Per-device fit scores, in device order
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceScores {
    entries: Vec<(DeviceClass, f64)>,
}

impl DeviceScores {
    /// Iterate over the scores in device order
    pub fn iter(&self) -> impl Iterator<Item = (DeviceClass, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Score for a single device
    #[must_use]
    pub fn get(&self, device: DeviceClass) -> f64 {
        self.entries.iter().find(|(d, _)| *d == device).map_or(0.0, |(_, s)| *s)
    }

    /// Arithmetic mean across all devices
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }

        #[expect(clippy::cast_precision_loss, reason = "entry count is four")]
        let len = self.entries.len() as f64;
        self.entries.iter().map(|(_, s)| s).sum::<f64>() / len
    }
}

#[must_use]
pub fn score(record: &MetadataRecord) -> DeviceScores {
    let size_mb = record.model_size_mb;
    DeviceScores {
        entries: DeviceClass::iter().map(|d| (d, device_score(size_mb, d.threshold_mb()))).collect(),
    }
}

/// Two linear ramps, each rounded to two decimal places. Within the threshold
/// the score runs from 1.0 down to 0.5; past it a second ramp restarts just
/// under 1.0 and runs down to zero at three times the threshold, so the score
/// steps up when the size first exceeds the threshold.
fn device_score(size_mb: f64, max_mb: f64) -> f64 {
    if size_mb <= 0.0 {
        return 0.0;
    }

    let raw = if size_mb <= max_mb {
        0.5 + 0.5 * (1.0 - size_mb / max_mb)
    } else {
        1.0 - (size_mb - max_mb) / (2.0 * max_mb)
    };

    ((raw.clamp(0.0, 1.0)) * 100.0).round() / 100.0
}
