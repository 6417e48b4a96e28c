//! Normalized artifact metadata
//!
//! [`MetadataRecord`] is the single shape every metric calculator consumes,
//! regardless of which upstream service the data came from. Every field that an
//! upstream may omit is explicitly optional or defaulted, so a degraded fetch
//! produces a usable (if sparse) record instead of an error.

use crate::facts::Category;
use serde::Deserialize;

/// Controls which on-demand sub-fetches the resolver performs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Fetch the repository file tree (recursive path listing)
    pub include_repo_tree: bool,

    /// Fetch recent commits and reduce them to a de-duplicated author list
    pub include_commit_history: bool,
}

/// A file listed in a hub artifact's repository
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SiblingFile {
    pub rfilename: String,

    #[serde(default)]
    pub size: Option<u64>,
}

/// One entry of a code-host repository tree
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: String,
}

/// A value that upstream card data represents as either a single string or a list
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StringOrSeq {
    One(String),
    Many(Vec<String>),
}

impl StringOrSeq {
    /// First value, if any
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::One(s) => Some(s.as_str()),
            Self::Many(v) => v.first().map(String::as_str),
        }
    }
}

/// The parsed model/dataset card attached to a hub artifact.
///
/// Card contents are author-supplied YAML and arrive in loosely consistent
/// shapes, so fields the calculators only probe structurally are kept as raw
/// JSON values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CardData {
    pub license: Option<StringOrSeq>,
    pub github: Option<String>,
    pub repositories: Option<StringOrSeq>,
    pub model_description: Option<String>,
    pub description: Option<String>,
    pub dataset_info: Option<serde_json::Value>,

    #[serde(rename = "model-index")]
    pub model_index: Option<Vec<serde_json::Value>>,
}

impl CardData {
    /// License identifier declared in the card, if any
    #[must_use]
    pub fn license_id(&self) -> Option<&str> {
        self.license.as_ref().and_then(StringOrSeq::first)
    }

    /// Total number of examples declared in the card's dataset info.
    ///
    /// The `dataset_info` block is either a single config object or a list of
    /// them, each carrying `splits` with `num_examples` counts.
    #[must_use]
    pub fn example_count(&self) -> u64 {
        fn splits_total(config: &serde_json::Value) -> u64 {
            config
                .get("splits")
                .and_then(serde_json::Value::as_array)
                .map(|splits| {
                    splits
                        .iter()
                        .filter_map(|s| s.get("num_examples").and_then(serde_json::Value::as_u64))
                        .sum()
                })
                .unwrap_or(0)
        }

        match &self.dataset_info {
            Some(config @ serde_json::Value::Object(_)) => splits_total(config),
            Some(serde_json::Value::Array(configs)) => configs.iter().map(splits_total).sum(),
            _ => 0,
        }
    }
}

/// Normalized metadata for a single artifact.
///
/// Built fresh per scored URL; nothing is cached across invocations. The
/// `repo_tree` and `commit_authors` fields are `None` until the corresponding
/// on-demand fetch has run (an empty vector means the fetch ran and found
/// nothing).
#[derive(Debug, Clone, Default)]
pub struct MetadataRecord {
    pub url: String,
    pub category: Category,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub license: Option<String>,
    pub card: CardData,
    pub siblings: Vec<SiblingFile>,
    pub downloads: u64,
    pub likes: u64,

    /// Artifact weight in megabytes, 0.0 when unknown
    pub model_size_mb: f64,

    /// Structured benchmark results published at the top level of the artifact
    pub model_index: Vec<serde_json::Value>,

    pub widget_data: Vec<serde_json::Value>,
    pub has_auto_model: bool,
    pub dataset_url: Option<String>,
    pub code_url: Option<String>,
    pub readme: Option<String>,
    pub repo_tree: Option<Vec<TreeEntry>>,
    pub commit_authors: Option<Vec<String>>,
}

impl MetadataRecord {
    /// An empty record carrying only the URL and its category
    #[must_use]
    pub fn bare(url: &str) -> Self {
        Self {
            url: url.to_string(),
            category: crate::facts::classify(url),
            ..Self::default()
        }
    }

    /// True when any sibling filename satisfies the predicate (matched lowercase)
    #[must_use]
    pub fn any_sibling(&self, pred: impl Fn(&str) -> bool) -> bool {
        self.siblings.iter().any(|s| pred(&s.rfilename.to_lowercase()))
    }

    /// True when any tag satisfies the predicate (matched lowercase)
    #[must_use]
    pub fn any_tag(&self, pred: impl Fn(&str) -> bool) -> bool {
        self.tags.iter().any(|t| pred(&t.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_or_seq_single() {
        let v: StringOrSeq = serde_json::from_value(json!("mit")).unwrap();
        assert_eq!(v.first(), Some("mit"));
    }

    #[test]
    fn test_string_or_seq_list() {
        let v: StringOrSeq = serde_json::from_value(json!(["apache-2.0", "mit"])).unwrap();
        assert_eq!(v.first(), Some("apache-2.0"));
    }

    #[test]
    fn test_string_or_seq_empty_list() {
        let v: StringOrSeq = serde_json::from_value(json!([])).unwrap();
        assert_eq!(v.first(), None);
    }

    #[test]
    fn test_card_data_license_id() {
        let card: CardData = serde_json::from_value(json!({"license": "apache-2.0"})).unwrap();
        assert_eq!(card.license_id(), Some("apache-2.0"));
    }

    #[test]
    fn test_card_data_defaults() {
        let card: CardData = serde_json::from_value(json!({})).unwrap();
        assert_eq!(card.license_id(), None);
        assert!(card.github.is_none());
        assert_eq!(card.example_count(), 0);
    }

    #[test]
    fn test_example_count_single_config() {
        let card: CardData = serde_json::from_value(json!({
            "dataset_info": {
                "splits": [
                    {"name": "train", "num_examples": 800},
                    {"name": "test", "num_examples": 200}
                ]
            }
        }))
        .unwrap();
        assert_eq!(card.example_count(), 1000);
    }

    #[test]
    fn test_example_count_config_list() {
        let card: CardData = serde_json::from_value(json!({
            "dataset_info": [
                {"splits": [{"num_examples": 100}]},
                {"splits": [{"num_examples": 50}, {"num_examples": 25}]}
            ]
        }))
        .unwrap();
        assert_eq!(card.example_count(), 175);
    }

    #[test]
    fn test_example_count_malformed_splits() {
        let card: CardData = serde_json::from_value(json!({
            "dataset_info": {"splits": "not a list"}
        }))
        .unwrap();
        assert_eq!(card.example_count(), 0);
    }

    #[test]
    fn test_bare_record() {
        let record = MetadataRecord::bare("https://huggingface.co/google/bert-base-uncased");
        assert_eq!(record.category, Category::Model);
        assert!(record.license.is_none());
        assert!(record.commit_authors.is_none());
        assert_eq!(record.model_size_mb, 0.0);
    }

    #[test]
    fn test_sibling_and_tag_predicates() {
        let record = MetadataRecord {
            siblings: vec![SiblingFile {
                rfilename: "README.md".to_string(),
                size: None,
            }],
            tags: vec!["Transformers".to_string()],
            ..MetadataRecord::default()
        };

        assert!(record.any_sibling(|f| f.contains("readme")));
        assert!(!record.any_sibling(|f| f.ends_with(".py")));
        assert!(record.any_tag(|t| t == "transformers"));
    }
}
