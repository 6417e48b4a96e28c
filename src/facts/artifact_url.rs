//! URL classification and identifier extraction
//!
//! Artifact URLs are classified purely by shape. Hub URLs resolve to models or
//! datasets, code-host URLs to repositories, and everything else is passed
//! through unclassified so downstream scoring degrades instead of failing.

use regex::Regex;
use std::sync::LazyLock;
use strum::{Display, EnumIter};
use url::Url;

const HUB_HOST: &str = "huggingface.co";

#[expect(clippy::unwrap_used, reason = "pattern is a compile-time constant")]
static CODE_HOST_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com/[A-Za-z0-9_.\-]+/[A-Za-z0-9_.\-]+").unwrap());

/// The kind of artifact a URL points at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum Category {
    Model,
    Dataset,
    Repo,
    #[default]
    Other,
}

impl Category {
    /// Report label for this category
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Model => "MODEL",
            Self::Dataset => "DATASET",
            Self::Repo => "REPO",
            Self::Other => "UNKNOWN",
        }
    }
}

/// Classify a URL by shape alone. Never fails; unrecognized input is `Other`.
#[must_use]
pub fn classify(url: &str) -> Category {
    let lower = url.trim().to_lowercase();
    if lower.contains(HUB_HOST) {
        if lower.contains("/datasets") {
            Category::Dataset
        } else {
            Category::Model
        }
    } else if lower.contains("github.com") || lower.contains("gitlab.com") {
        Category::Repo
    } else {
        Category::Other
    }
}

/// Extract the hub identifier (`owner/name`, or a bare slug for unowned
/// artifacts) from a hub URL. Query strings, fragments, and trailing slashes
/// are stripped. Returns `None` for non-hub input.
#[must_use]
pub fn hub_id(url: &str) -> Option<String> {
    let trimmed = strip_decorations(url);

    let remainder = if let Some((_, rest)) = trimmed.split_once("/datasets/") {
        rest
    } else if let Some((_, rest)) = trimmed.split_once(&format!("{HUB_HOST}/")) {
        rest
    } else {
        return None;
    };

    let segments: Vec<&str> = remainder.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [] => None,
        [single] => Some((*single).to_string()),
        [owner, name, ..] => Some(format!("{owner}/{name}")),
    }
}

/// Extract `owner/repo` from a code-host URL. A trailing `.git` suffix is
/// dropped. Returns `None` for malformed input.
#[must_use]
pub fn repo_path(url: &str) -> Option<String> {
    let parsed = Url::parse(strip_decorations(url)).ok()?;
    let mut segments = parsed.path_segments()?.filter(|s| !s.is_empty());

    let owner = segments.next()?;
    let repo = segments.next()?.trim_end_matches(".git");
    if owner.is_empty() || repo.is_empty() {
        return None;
    }

    Some(format!("{owner}/{repo}"))
}

/// Derive a display name from a URL: the final non-empty path segment, falling
/// back to the whole URL when there is no usable path.
#[must_use]
pub fn artifact_name(url: &str) -> String {
    let trimmed = strip_decorations(url);

    if let Ok(parsed) = Url::parse(trimmed) {
        return parsed
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
            .map_or_else(|| trimmed.to_string(), ToString::to_string);
    }

    // Not an absolute URL; fall back to raw segment splitting
    trimmed
        .split('/')
        .filter(|s| !s.is_empty())
        .next_back()
        .map_or_else(|| trimmed.to_string(), ToString::to_string)
}

/// Scan free text (typically a README) for code-host repository links. File
/// and issue links are filtered out, and duplicates are dropped while
/// preserving first-seen order.
#[must_use]
pub fn code_host_links(text: &str) -> Vec<String> {
    let mut links = Vec::new();

    for m in CODE_HOST_LINK.find_iter(text) {
        let tail = &text[m.end()..];
        if tail.starts_with("/blob") || tail.starts_with("/tree") || tail.starts_with("/issues") {
            continue;
        }

        // The pattern admits dots, so a link at the end of a sentence drags
        // its period along
        let link = format!("https://{}", m.as_str().trim_end_matches('.').trim_end_matches(".git"));
        if !links.contains(&link) {
            links.push(link);
        }
    }

    links
}

fn strip_decorations(url: &str) -> &str {
    let mut s = url.trim();
    if let Some((head, _)) = s.split_once('#') {
        s = head;
    }

    if let Some((head, _)) = s.split_once('?') {
        s = head;
    }

    s.trim_end_matches('/')
}
