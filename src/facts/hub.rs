//! Model hub API client
//!
//! Minimal client for the hub's REST API, fetching model and dataset metadata
//! documents plus raw card files.

use crate::Result;
use crate::facts::record::{CardData, SiblingFile};
use core::time::Duration;
use ohno::bail;
use serde::Deserialize;

const LOG_TARGET: &str = "       hub";

const API_TIMEOUT: Duration = Duration::from_secs(10);

/// Card filenames probed when fetching an artifact's README, in order
const README_CANDIDATES: [&str; 5] = ["README.md", "README.rst", "readme.md", "readme.txt", "README"];

/// Raw metadata document for a hub model or dataset, with every field the
/// upstream may omit defaulted.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HubArtifact {
    pub id: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub license: Option<String>,
    pub siblings: Vec<SiblingFile>,
    pub downloads: u64,
    pub likes: u64,

    #[serde(alias = "cardData")]
    pub card_data: Option<CardData>,

    /// Total storage used by the artifact, in bytes
    #[serde(alias = "usedStorage")]
    pub used_storage: Option<u64>,

    #[serde(alias = "model-index")]
    pub model_index: Option<Vec<serde_json::Value>>,

    #[serde(alias = "widgetData")]
    pub widget_data: Option<Vec<serde_json::Value>>,

    #[serde(alias = "transformersInfo")]
    pub transformers_info: Option<TransformersInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TransformersInfo {
    pub auto_model: Option<String>,
}

impl HubArtifact {
    /// Artifact weight in megabytes: reported storage when present, otherwise
    /// the sum of sibling file sizes. Rounded to two decimal places.
    #[must_use]
    pub fn size_mb(&self) -> f64 {
        let bytes = self
            .used_storage
            .unwrap_or_else(|| self.siblings.iter().filter_map(|s| s.size).sum());

        #[expect(clippy::cast_precision_loss, reason = "artifact sizes are far below 2^52 bytes")]
        let mb = bytes as f64 / (1024.0 * 1024.0);
        (mb * 100.0).round() / 100.0
    }
}

/// Model hub API client
#[derive(Debug, Clone)]
pub struct HubClient {
    http: reqwest::Client,
    base_url: String,
}

impl HubClient {
    /// Create a client against the given hub base URL (no trailing slash)
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::builder().user_agent("artifact-rank").build()?,
            base_url: base_url.into(),
        })
    }

    /// Get the base URL for this client
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the metadata document for a model
    pub async fn model(&self, id: &str) -> Result<HubArtifact> {
        self.artifact(&format!("{}/api/models/{id}", self.base_url)).await
    }

    /// Fetch the metadata document for a dataset
    pub async fn dataset(&self, id: &str) -> Result<HubArtifact> {
        self.artifact(&format!("{}/api/datasets/{id}", self.base_url)).await
    }

    /// Fetch an artifact's README text, probing the usual filenames in order.
    /// Returns `None` when no candidate exists.
    pub async fn readme(&self, id: &str, dataset: bool) -> Result<Option<String>> {
        let prefix = if dataset { "datasets/" } else { "" };

        for candidate in README_CANDIDATES {
            let url = format!("{}/{prefix}{id}/raw/main/{candidate}", self.base_url);
            let resp = self.http.get(&url).timeout(API_TIMEOUT).send().await?;
            if resp.status().is_success() {
                return Ok(Some(resp.text().await?));
            }

            log::debug!(target: LOG_TARGET, "no {candidate} for {id} (status {})", resp.status());
        }

        Ok(None)
    }

    async fn artifact(&self, url: &str) -> Result<HubArtifact> {
        let resp = self.http.get(url).timeout(API_TIMEOUT).send().await?;
        let status = resp.status();
        if !status.is_success() {
            bail!("hub request for {url} failed with status {status}");
        }

        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_artifact_deserialize_full() {
        let doc = json!({
            "id": "google/bert-base-uncased",
            "tags": ["transformers", "license:apache-2.0"],
            "downloads": 123456,
            "likes": 789,
            "usedStorage": 440_473_133u64,
            "cardData": {"license": "apache-2.0"},
            "siblings": [{"rfilename": "README.md", "size": 1024}],
            "widgetData": [{"text": "hello"}],
            "transformersInfo": {"auto_model": "AutoModelForMaskedLM"}
        });

        let artifact: HubArtifact = serde_json::from_value(doc).unwrap();
        assert_eq!(artifact.downloads, 123_456);
        assert_eq!(artifact.likes, 789);
        assert_eq!(artifact.tags.len(), 2);
        assert_eq!(artifact.siblings[0].rfilename, "README.md");
        assert_eq!(artifact.widget_data.unwrap().len(), 1);
        assert_eq!(
            artifact.transformers_info.unwrap().auto_model.as_deref(),
            Some("AutoModelForMaskedLM")
        );
    }

    #[test]
    fn test_artifact_deserialize_sparse() {
        let artifact: HubArtifact = serde_json::from_value(json!({})).unwrap();
        assert!(artifact.id.is_none());
        assert!(artifact.tags.is_empty());
        assert_eq!(artifact.downloads, 0);
        assert_eq!(artifact.size_mb(), 0.0);
    }

    #[test]
    fn test_size_mb_from_used_storage() {
        let artifact: HubArtifact = serde_json::from_value(json!({"usedStorage": 52_428_800u64})).unwrap();
        assert_eq!(artifact.size_mb(), 50.0);
    }

    #[test]
    fn test_size_mb_from_siblings() {
        let artifact: HubArtifact = serde_json::from_value(json!({
            "siblings": [
                {"rfilename": "model.bin", "size": 1_048_576u64},
                {"rfilename": "vocab.txt", "size": 524_288u64},
                {"rfilename": "README.md"}
            ]
        }))
        .unwrap();
        assert_eq!(artifact.size_mb(), 1.5);
    }

    #[test]
    fn test_size_mb_prefers_used_storage() {
        let artifact: HubArtifact = serde_json::from_value(json!({
            "usedStorage": 2_097_152u64,
            "siblings": [{"rfilename": "model.bin", "size": 1u64}]
        }))
        .unwrap();
        assert_eq!(artifact.size_mb(), 2.0);
    }

    #[test]
    fn test_model_index_alias() {
        let artifact: HubArtifact = serde_json::from_value(json!({
            "model-index": [{"name": "bert", "results": []}]
        }))
        .unwrap();
        assert_eq!(artifact.model_index.unwrap().len(), 1);
    }

    #[test]
    fn test_client_base_url() {
        let client = HubClient::new("https://huggingface.co").unwrap();
        assert_eq!(client.base_url(), "https://huggingface.co");
    }
}
