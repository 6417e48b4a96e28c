//! Code host API client
//!
//! Minimal GitHub-style API client for fetching repository metadata, commit
//! history, file trees, and raw README content.

use crate::Result;
use crate::facts::record::TreeEntry;
use core::time::Duration;
use ohno::bail;
use reqwest::header::HeaderMap;
use serde::Deserialize;

const LOG_TARGET: &str = "   hosting";

const API_TIMEOUT: Duration = Duration::from_secs(10);
const TREE_TIMEOUT: Duration = Duration::from_secs(15);

/// Repository metadata with only the fields we need
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RepoInfo {
    pub description: Option<String>,
    pub license: Option<RepoLicense>,
    pub default_branch: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RepoLicense {
    pub spdx_id: Option<String>,
}

impl RepoInfo {
    /// SPDX identifier of the repository license, discarding the placeholder
    /// the API uses for undetected licenses.
    #[must_use]
    pub fn license_id(&self) -> Option<&str> {
        self.license
            .as_ref()
            .and_then(|l| l.spdx_id.as_deref())
            .filter(|id| !id.eq_ignore_ascii_case("NOASSERTION"))
    }
}

#[derive(Debug, Deserialize)]
struct CommitEntry {
    author: Option<CommitAuthor>,
    commit: Option<CommitDetail>,
}

#[derive(Debug, Deserialize)]
struct CommitAuthor {
    login: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    author: Option<GitIdentity>,
}

#[derive(Debug, Deserialize)]
struct GitIdentity {
    name: Option<String>,
    email: Option<String>,
}

impl CommitEntry {
    /// Best available author identifier: account login, then commit name,
    /// then commit email.
    fn author_id(&self) -> Option<&str> {
        if let Some(login) = self.author.as_ref().and_then(|a| a.login.as_deref()) {
            return Some(login);
        }

        let identity = self.commit.as_ref()?.author.as_ref()?;
        identity.name.as_deref().or(identity.email.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    #[serde(default)]
    tree: Vec<TreeEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LicenseResponse {
    license: Option<RepoLicense>,
}

/// Code host API client
#[derive(Debug, Clone)]
pub struct HostClient {
    http: reqwest::Client,
    api_base: String,
    raw_base: String,
}

impl HostClient {
    /// Create a new client with optional authentication token and base URLs
    /// (no trailing slashes).
    pub fn new(token: Option<&str>, api_base: impl Into<String>, raw_base: impl Into<String>) -> Result<Self> {
        use reqwest::header::{AUTHORIZATION, HeaderValue};

        let mut builder = reqwest::Client::builder().user_agent("artifact-rank");

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("token {t}"))?;
            auth_val.set_sensitive(true);

            let mut headers = HeaderMap::new();
            let _ = headers.insert(AUTHORIZATION, auth_val);

            builder = builder.default_headers(headers);
        }

        Ok(Self {
            http: builder.build()?,
            api_base: api_base.into(),
            raw_base: raw_base.into(),
        })
    }

    /// Get the API base URL for this client
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Fetch repository metadata for `owner/repo`
    pub async fn repository(&self, path: &str) -> Result<RepoInfo> {
        let url = format!("{}/repos/{path}", self.api_base);
        Ok(self.api_get(&url, API_TIMEOUT).await?.json().await?)
    }

    /// Fetch the most recent commits for `owner/repo` and reduce them to a
    /// de-duplicated author list, preserving first-seen order.
    pub async fn commit_authors(&self, path: &str) -> Result<Vec<String>> {
        let url = format!("{}/repos/{path}/commits?per_page=100", self.api_base);
        let commits: Vec<CommitEntry> = self.api_get(&url, API_TIMEOUT).await?.json().await?;

        let mut authors: Vec<String> = Vec::new();
        for commit in &commits {
            if let Some(author) = commit.author_id()
                && !authors.iter().any(|a| a == author)
            {
                authors.push(author.to_string());
            }
        }

        Ok(authors)
    }

    /// Fetch the recursive file tree of `owner/repo` at the given ref
    pub async fn tree(&self, path: &str, reference: &str) -> Result<Vec<TreeEntry>> {
        let url = format!("{}/repos/{path}/git/trees/{reference}?recursive=1", self.api_base);
        let resp: TreeResponse = self.api_get(&url, TREE_TIMEOUT).await?.json().await?;
        Ok(resp.tree)
    }

    /// Fetch the SPDX identifier of the repository license via the dedicated
    /// license endpoint. Returns `None` when the host has not detected one.
    pub async fn license(&self, path: &str) -> Result<Option<String>> {
        let url = format!("{}/repos/{path}/license", self.api_base);
        let resp: LicenseResponse = self.api_get(&url, API_TIMEOUT).await?.json().await?;

        Ok(resp
            .license
            .and_then(|l| l.spdx_id)
            .filter(|id| !id.eq_ignore_ascii_case("NOASSERTION")))
    }

    /// Fetch the raw README of `owner/repo` on the given branch. Returns
    /// `None` when the file does not exist.
    pub async fn readme(&self, path: &str, branch: &str) -> Result<Option<String>> {
        let url = format!("{}/{path}/{branch}/README.md", self.raw_base);
        let resp = self.http.get(&url).timeout(API_TIMEOUT).send().await?;
        if !resp.status().is_success() {
            log::debug!(target: LOG_TARGET, "no readme for {path}@{branch} (status {})", resp.status());
            return Ok(None);
        }

        Ok(Some(resp.text().await?))
    }

    async fn api_get(&self, url: &str, timeout: Duration) -> Result<reqwest::Response> {
        let resp = self.http.get(url).timeout(timeout).send().await?;
        let status = resp.status();
        if !status.is_success() {
            bail!("hosting request for {url} failed with status {status}");
        }

        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_repo_info_deserialize() {
        let info: RepoInfo = serde_json::from_value(json!({
            "description": "BERT",
            "license": {"spdx_id": "Apache-2.0"},
            "default_branch": "master"
        }))
        .unwrap();

        assert_eq!(info.description.as_deref(), Some("BERT"));
        assert_eq!(info.license_id(), Some("Apache-2.0"));
        assert_eq!(info.default_branch.as_deref(), Some("master"));
    }

    #[test]
    fn test_repo_info_noassertion_discarded() {
        let info: RepoInfo = serde_json::from_value(json!({"license": {"spdx_id": "NOASSERTION"}})).unwrap();
        assert_eq!(info.license_id(), None);
    }

    #[test]
    fn test_repo_info_sparse() {
        let info: RepoInfo = serde_json::from_value(json!({})).unwrap();
        assert_eq!(info.license_id(), None);
        assert!(info.default_branch.is_none());
    }

    #[test]
    fn test_commit_author_priority() {
        let entry: CommitEntry = serde_json::from_value(json!({
            "author": {"login": "alice"},
            "commit": {"author": {"name": "Alice A", "email": "alice@example.com"}}
        }))
        .unwrap();
        assert_eq!(entry.author_id(), Some("alice"));

        let entry: CommitEntry = serde_json::from_value(json!({
            "author": null,
            "commit": {"author": {"name": "Alice A", "email": "alice@example.com"}}
        }))
        .unwrap();
        assert_eq!(entry.author_id(), Some("Alice A"));

        let entry: CommitEntry = serde_json::from_value(json!({
            "author": null,
            "commit": {"author": {"email": "alice@example.com"}}
        }))
        .unwrap();
        assert_eq!(entry.author_id(), Some("alice@example.com"));
    }

    #[test]
    fn test_commit_author_absent() {
        let entry: CommitEntry = serde_json::from_value(json!({"author": null, "commit": null})).unwrap();
        assert_eq!(entry.author_id(), None);
    }

    #[test]
    fn test_tree_response_deserialize() {
        let resp: TreeResponse = serde_json::from_value(json!({
            "tree": [{"path": "src/main.py", "type": "blob"}, {"path": "tests", "type": "tree"}]
        }))
        .unwrap();
        assert_eq!(resp.tree.len(), 2);
        assert_eq!(resp.tree[0].path, "src/main.py");
    }

    #[test]
    fn test_client_new_with_and_without_token() {
        let client = HostClient::new(None, "https://api.github.com", "https://raw.githubusercontent.com").unwrap();
        assert_eq!(client.api_base(), "https://api.github.com");

        let client =
            HostClient::new(Some("test_token"), "https://api.github.com", "https://raw.githubusercontent.com").unwrap();
        assert_eq!(client.api_base(), "https://api.github.com");
    }
}
