//! Contributor redundancy scoring
//!
//! Scales linearly with the number of unique commit authors in the recent
//! history of the artifact's code repository, saturating at 50 authors. No
//! commit data at all means no evidence of redundancy.

use crate::facts::MetadataRecord;

const SATURATION: f64 = 50.0;

#[must_use]
pub fn score(record: &MetadataRecord) -> f64 {
    let count = record.commit_authors.as_ref().map_or(0, Vec::len);
    if count == 0 {
        return 0.0;
    }

    #[expect(clippy::cast_precision_loss, reason = "author counts are tiny")]
    let ratio = count as f64 / SATURATION;
    ratio.min(1.0)
}
