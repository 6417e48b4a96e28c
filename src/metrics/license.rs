//! License permissiveness scoring
//!
//! Maps a normalized license identifier onto a fixed permissiveness ladder.
//! Anything unrecognized (including a missing license) lands on the unknown
//! floor rather than zero, since absence of a declaration is not proof of a
//! hostile license.

use crate::facts::MetadataRecord;

const PERMISSIVE: [&str; 5] = ["mit", "apache-2.0", "bsd-2-clause", "bsd-3-clause", "isc"];

const COPYLEFT: [&str; 6] = ["gpl-2.0", "gpl-3.0", "lgpl-2.1", "lgpl-3.0", "mpl-2.0", "epl-2.0"];

const UNKNOWN_FLOOR: f64 = 0.2;

/// Normalize a raw license identifier: trim and lowercase. Idempotent.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[must_use]
pub fn score(record: &MetadataRecord) -> f64 {
    let Some(raw) = &record.license else {
        return UNKNOWN_FLOOR;
    };

    let id = normalize(raw);
    if PERMISSIVE.contains(&id.as_str()) {
        1.0
    } else if COPYLEFT.contains(&id.as_str()) {
        0.7
    } else if id.contains("custom") {
        0.5
    } else {
        UNKNOWN_FLOOR
    }
}
