//! Onboarding-ease scoring
//!
//! Additive evidence model: each signal that a newcomer could get the artifact
//! running quickly (documentation, quick-start material, installation
//! guidance, runnable examples, light dependencies) adds a fixed number of
//! points, with a small adjustment for artifact complexity and category. The
//! total is clamped to `[0.0, 1.0]`.

use crate::facts::{Category, MetadataRecord};

/// Architectures familiar enough that a short description still counts as
/// clear documentation
const KNOWN_ARCHITECTURES: [&str; 6] = ["bert", "distilbert", "gpt", "whisper", "roberta", "t5"];

const QUICK_START_PHRASES: [&str; 8] = [
    "quick start",
    "getting started",
    "quickstart",
    "installation",
    "usage",
    "example",
    "tutorial",
    "how to use",
];

const QUICK_START_FILES: [&str; 7] = ["quickstart", "getting_started", "tutorial", "example", "demo", "usage", "install"];

const INSTALL_PHRASES: [&str; 8] = [
    "pip install",
    "conda install",
    "npm install",
    "yarn add",
    "installation",
    "install",
    "setup",
    "requirements",
];

const INSTALL_FILES: [&str; 7] = [
    "requirements.txt",
    "package.json",
    "setup.py",
    "pyproject.toml",
    "environment.yml",
    "dockerfile",
    "makefile",
];

const ECOSYSTEM_TAGS: [&str; 7] = [
    "transformers",
    "diffusers",
    "sentence-transformers",
    "sklearn",
    "numpy",
    "pytorch",
    "tensorflow",
];

const MINIMAL_DEP_PHRASES: [&str; 5] = ["no dependencies", "standalone", "zero dependencies", "minimal setup", "plug and play"];

const LARGE_MARKERS: [&str; 4] = ["large", "xl", "big", "giant"];
const MEDIUM_MARKERS: [&str; 3] = ["medium", "base", "standard"];
const SMALL_MARKERS: [&str; 5] = ["small", "mini", "tiny", "micro", "nano"];

#[derive(Debug, PartialEq, Eq)]
enum Complexity {
    Small,
    Medium,
    Large,
}

#[must_use]
pub fn score(record: &MetadataRecord) -> f64 {
    let desc = record.description.as_deref().unwrap_or("").to_lowercase();

    let mut total = 0.0;

    if has_clear_documentation(record, &desc) {
        total += documentation_points(desc.len());
    }

    if has_quick_start(record, &desc) {
        total += 0.25;
    }

    if has_install_guidance(record, &desc) {
        total += 0.20;
    }

    let runnable = has_runnable_examples(record);
    if runnable {
        total += 0.15;
    }

    if has_minimal_dependencies(record, &desc) {
        total += 0.10;
    }

    total += match complexity(record, &desc) {
        Complexity::Small => 0.05,
        Complexity::Medium => 0.0,
        Complexity::Large => -0.05,
    };

    match record.category {
        Category::Dataset => total += 0.05,
        Category::Repo if !runnable => total -= 0.05,
        _ => {}
    }

    total.clamp(0.0, 1.0)
}

const fn documentation_points(desc_len: usize) -> f64 {
    if desc_len > 300 {
        0.30
    } else if desc_len > 150 {
        0.25
    } else if desc_len > 100 {
        0.15
    } else {
        0.10
    }
}

fn has_clear_documentation(record: &MetadataRecord, desc: &str) -> bool {
    let known_arch = record.any_tag(|t| KNOWN_ARCHITECTURES.iter().any(|a| t.contains(a)));
    let min_len = if known_arch { 50 } else { 100 };

    desc.len() >= min_len || record.any_sibling(|f| f.contains("readme") || f.contains("doc"))
}

fn has_quick_start(record: &MetadataRecord, desc: &str) -> bool {
    QUICK_START_PHRASES.iter().any(|p| desc.contains(p))
        || record.any_sibling(|f| QUICK_START_FILES.iter().any(|m| f.contains(m)))
}

fn has_install_guidance(record: &MetadataRecord, desc: &str) -> bool {
    INSTALL_PHRASES.iter().any(|p| desc.contains(p))
        || record.any_tag(|t| t == "transformers")
        || record.any_sibling(|f| INSTALL_FILES.iter().any(|m| f.contains(m)))
}

fn has_runnable_examples(record: &MetadataRecord) -> bool {
    !record.widget_data.is_empty()
        || record.has_auto_model
        || record.any_sibling(|f| {
            f.ends_with(".py") || f.ends_with(".ipynb") || f.contains("example") || f.contains("demo") || f.contains("sample")
        })
}

fn has_minimal_dependencies(record: &MetadataRecord, desc: &str) -> bool {
    record.any_tag(|t| ECOSYSTEM_TAGS.iter().any(|m| t.contains(m))) || MINIMAL_DEP_PHRASES.iter().any(|p| desc.contains(p))
}

fn complexity(record: &MetadataRecord, desc: &str) -> Complexity {
    if record.any_tag(|t| LARGE_MARKERS.iter().any(|m| t.contains(m))) {
        Complexity::Large
    } else if record.any_tag(|t| MEDIUM_MARKERS.iter().any(|m| t.contains(m))) {
        Complexity::Medium
    } else if record.any_tag(|t| SMALL_MARKERS.iter().any(|m| t.contains(m))) {
        Complexity::Small
    } else if ["billion", "parameters", "large-scale"].iter().any(|m| desc.contains(m)) {
        Complexity::Large
    } else if ["lightweight", "efficient", "fast"].iter().any(|m| desc.contains(m)) {
        Complexity::Small
    } else {
        Complexity::Medium
    }
}
