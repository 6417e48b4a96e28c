//! Reproducibility-surface scoring
//!
//! Measures whether the ingredients needed to reproduce an artifact are
//! linked: training data, source code, worked examples, and a license. Each
//! present ingredient adds a fixed share; example volume scales with the
//! declared example count, saturating at a thousand examples.

use crate::facts::MetadataRecord;

const EXAMPLE_SATURATION: f64 = 1000.0;

#[must_use]
pub fn score(record: &MetadataRecord) -> f64 {
    let mut total = 0.0;

    if record.dataset_url.is_some() {
        total += 0.3;
    }

    if record.code_url.is_some() {
        total += 0.3;
    }

    total += example_points(record);

    if record.license.is_some() || record.any_tag(|t| t.starts_with("license:")) {
        total += 0.2;
    }

    total.min(1.0)
}

/// Up to 0.2 for declared example volume; interactive widget samples count
/// for half credit when no example counts are declared.
fn example_points(record: &MetadataRecord) -> f64 {
    let examples = record.card.example_count();
    if examples > 0 {
        #[expect(clippy::cast_precision_loss, reason = "example counts are far below 2^52")]
        let ratio = (examples as f64 / EXAMPLE_SATURATION).min(1.0);
        return ratio * 0.2;
    }

    if record.widget_data.is_empty() { 0.0 } else { 0.1 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_record_scores_zero() {
        assert_eq!(score(&MetadataRecord::default()), 0.0);
    }

    #[test]
    fn test_dataset_and_code_links() {
        let record = MetadataRecord {
            dataset_url: Some("https://huggingface.co/datasets/squad".to_string()),
            code_url: Some("https://github.com/google/bert".to_string()),
            ..MetadataRecord::default()
        };
        assert!((score(&record) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_license_via_tag() {
        let record = MetadataRecord {
            tags: vec!["license:apache-2.0".to_string()],
            ..MetadataRecord::default()
        };
        assert!((score(&record) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_example_volume_saturates() {
        let mut record = MetadataRecord::default();
        record.card.dataset_info = Some(json!({"splits": [{"num_examples": 500}]}));
        assert!((score(&record) - 0.1).abs() < 1e-9);

        record.card.dataset_info = Some(json!({"splits": [{"num_examples": 100_000}]}));
        assert!((score(&record) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_widget_samples_give_half_credit() {
        let record = MetadataRecord {
            widget_data: vec![json!({"text": "hello"})],
            ..MetadataRecord::default()
        };
        assert!((score(&record) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_fully_linked_artifact() {
        let mut record = MetadataRecord {
            dataset_url: Some("https://huggingface.co/datasets/squad".to_string()),
            code_url: Some("https://github.com/google/bert".to_string()),
            license: Some("apache-2.0".to_string()),
            ..MetadataRecord::default()
        };
        record.card.dataset_info = Some(json!({"splits": [{"num_examples": 5000}]}));
        assert_eq!(score(&record), 1.0);
    }
}
