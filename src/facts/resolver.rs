//! Metadata resolution
//!
//! Turns an artifact URL into a normalized [`MetadataRecord`] by dispatching to
//! the hub or code-host client based on the URL's category. Resolution never
//! fails: any upstream problem is logged and the affected fields stay absent.

use crate::Result;
use crate::facts::artifact_url::{self, Category};
use crate::facts::hosting::HostClient;
use crate::facts::hub::HubClient;
use crate::facts::record::{FetchOptions, MetadataRecord};

const LOG_TARGET: &str = "  resolver";

const DEFAULT_HUB_BASE: &str = "https://huggingface.co";
const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";

/// Substring-to-identifier mapping used when a repository README is the only
/// license evidence available
const LICENSE_MARKERS: [(&str, &str); 12] = [
    ("apache license", "apache-2.0"),
    ("apache-2.0", "apache-2.0"),
    ("mit license", "mit"),
    ("bsd 3-clause", "bsd-3-clause"),
    ("bsd 2-clause", "bsd-2-clause"),
    ("gnu general public license v3", "gpl-3.0"),
    ("gpl-3.0", "gpl-3.0"),
    ("gnu general public license v2", "gpl-2.0"),
    ("gpl-2.0", "gpl-2.0"),
    ("gnu lesser general public license", "lgpl-3.0"),
    ("mozilla public license", "mpl-2.0"),
    ("mpl-2.0", "mpl-2.0"),
];

/// Resolves artifact URLs into normalized metadata records
#[derive(Debug, Clone)]
pub struct Resolver {
    hub: HubClient,
    host: HostClient,
}

impl Resolver {
    /// Create a resolver against the production hub and code-host endpoints
    pub fn new(token: Option<&str>) -> Result<Self> {
        Self::with_bases(token, DEFAULT_HUB_BASE, DEFAULT_API_BASE, DEFAULT_RAW_BASE)
    }

    /// Create a resolver against explicit base URLs (no trailing slashes)
    pub fn with_bases(
        token: Option<&str>,
        hub_base: impl Into<String>,
        api_base: impl Into<String>,
        raw_base: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            hub: HubClient::new(hub_base)?,
            host: HostClient::new(token, api_base, raw_base)?,
        })
    }

    /// Resolve a URL into a metadata record.
    ///
    /// Empty or unclassifiable input yields a bare record carrying only the
    /// URL; upstream failures yield whatever fields could be populated.
    pub async fn resolve(&self, url: &str, options: FetchOptions) -> MetadataRecord {
        let url = url.trim();
        let mut record = MetadataRecord::bare(url);
        if url.is_empty() {
            return record;
        }

        match record.category {
            Category::Model => self.resolve_hub(&mut record, false).await,
            Category::Dataset => self.resolve_hub(&mut record, true).await,
            Category::Repo => self.resolve_repo(&mut record).await,
            Category::Other => {}
        }

        self.augment(&mut record, options).await;
        record
    }

    /// Fetch ancillary data the options ask for and merge it into the record.
    ///
    /// Each kind of fetch runs at most once per record: a failed fetch leaves
    /// an empty result behind rather than `None`, so later callers don't pay
    /// for a second round trip.
    pub async fn augment(&self, record: &mut MetadataRecord, options: FetchOptions) {
        let wants_commits = options.include_commit_history && record.commit_authors.is_none();
        let wants_tree = options.include_repo_tree && record.repo_tree.is_none();
        if !wants_commits && !wants_tree {
            return;
        }

        let Some(path) = ancillary_repo_path(record) else {
            log::debug!(target: LOG_TARGET, "no code repository associated with {}", record.url);
            return;
        };

        if wants_commits {
            match self.host.commit_authors(&path).await {
                Ok(authors) => record.commit_authors = Some(authors),
                Err(e) => {
                    log::warn!(target: LOG_TARGET, "unable to fetch commit history for {path}: {e:#}");
                    record.commit_authors = Some(Vec::new());
                }
            }
        }

        if wants_tree {
            match self.host.tree(&path, "HEAD").await {
                Ok(tree) => record.repo_tree = Some(tree),
                Err(e) => {
                    log::warn!(target: LOG_TARGET, "unable to fetch file tree for {path}: {e:#}");
                    record.repo_tree = Some(Vec::new());
                }
            }
        }
    }

    async fn resolve_hub(&self, record: &mut MetadataRecord, dataset: bool) {
        let Some(id) = artifact_url::hub_id(&record.url) else {
            log::warn!(target: LOG_TARGET, "unable to extract a hub identifier from {}", record.url);
            return;
        };

        let result = if dataset { self.hub.dataset(&id).await } else { self.hub.model(&id).await };
        let artifact = match result {
            Ok(a) => a,
            Err(e) => {
                log::warn!(target: LOG_TARGET, "unable to fetch hub metadata for {id}: {e:#}");
                return;
            }
        };

        record.model_size_mb = artifact.size_mb();

        let card = artifact.card_data.unwrap_or_default();
        record.description = artifact
            .description
            .or_else(|| card.model_description.clone())
            .or_else(|| card.description.clone());
        record.license = artifact
            .license
            .or_else(|| card.license_id().map(str::to_string))
            .or_else(|| tag_license(&artifact.tags));
        record.model_index = artifact.model_index.unwrap_or_default();
        record.widget_data = artifact.widget_data.unwrap_or_default();
        record.has_auto_model = artifact.transformers_info.is_some_and(|t| t.auto_model.is_some());
        record.downloads = artifact.downloads;
        record.likes = artifact.likes;
        record.tags = artifact.tags;
        record.siblings = artifact.siblings;

        if dataset {
            record.dataset_url = Some(record.url.clone());
        }

        record.code_url = card
            .github
            .clone()
            .or_else(|| card.repositories.as_ref().and_then(|r| r.first()).map(str::to_string))
            .or_else(|| record.tags.iter().find(|t| t.to_lowercase().contains("github.com")).cloned());

        // Last resort: scan the README for a code repository link
        if record.code_url.is_none() {
            match self.hub.readme(&id, dataset).await {
                Ok(Some(text)) => {
                    record.code_url = artifact_url::code_host_links(&text).into_iter().next();
                    record.readme = Some(text);
                }
                Ok(None) => {}
                Err(e) => log::debug!(target: LOG_TARGET, "unable to fetch readme for {id}: {e:#}"),
            }
        }

        record.card = card;
    }

    async fn resolve_repo(&self, record: &mut MetadataRecord) {
        let Some(path) = artifact_url::repo_path(&record.url) else {
            log::warn!(target: LOG_TARGET, "unable to extract a repository path from {}", record.url);
            return;
        };

        record.code_url = Some(record.url.clone());

        let mut branch = "main".to_string();
        match self.host.repository(&path).await {
            Ok(info) => {
                record.license = info.license_id().map(str::to_string);
                record.description = info.description;
                if let Some(b) = info.default_branch {
                    branch = b;
                }
            }
            Err(e) => log::warn!(target: LOG_TARGET, "unable to fetch repository metadata for {path}: {e:#}"),
        }

        if record.license.is_none() {
            match self.host.license(&path).await {
                Ok(id) => record.license = id,
                Err(e) => log::debug!(target: LOG_TARGET, "unable to fetch license for {path}: {e:#}"),
            }
        }

        match self.host.readme(&path, &branch).await {
            Ok(text) => record.readme = text,
            Err(e) => log::debug!(target: LOG_TARGET, "unable to fetch readme for {path}: {e:#}"),
        }

        if record.license.is_none()
            && let Some(text) = &record.readme
        {
            record.license = license_from_text(text);
        }
    }
}

/// Repository path to use for ancillary fetches: the linked code repository
/// when the record has one, else the record's own URL for repo artifacts.
fn ancillary_repo_path(record: &MetadataRecord) -> Option<String> {
    record
        .code_url
        .as_deref()
        .and_then(artifact_url::repo_path)
        .or_else(|| (record.category == Category::Repo).then(|| artifact_url::repo_path(&record.url)).flatten())
}

fn tag_license(tags: &[String]) -> Option<String> {
    tags.iter().find_map(|t| t.strip_prefix("license:")).map(str::to_string)
}

fn license_from_text(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    LICENSE_MARKERS
        .iter()
        .find(|(marker, _)| lower.contains(marker))
        .map(|(_, id)| (*id).to_string())
}
