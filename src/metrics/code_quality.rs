//! Engineering-practice scoring
//!
//! Inspects the linked code repository's file tree for the fixtures of a
//! maintained project: tests, continuous integration, lint configuration,
//! a reasonable volume of source files, and docs plus packaging metadata.
//! No tree means no evidence, which scores zero.

use crate::facts::{MetadataRecord, TreeEntry};

const CI_MARKERS: [&str; 6] = [
    ".github/workflows",
    ".travis.yml",
    ".circleci/",
    "azure-pipelines.yml",
    "jenkinsfile",
    "ci/",
];

const LINT_FILES: [&str; 7] = [".flake8", "setup.cfg", "pyproject.toml", "tox.ini", ".pylintrc", "lint.py", "format.py"];

const PACKAGING_FILES: [&str; 4] = ["setup.py", "pyproject.toml", "requirements.txt", "pipfile"];

/// Source-file count at which the density signal saturates
const DENSITY_SATURATION: f64 = 20.0;

#[must_use]
pub fn score(record: &MetadataRecord) -> f64 {
    let Some(tree) = &record.repo_tree else {
        return 0.0;
    };

    if tree.is_empty() {
        return 0.0;
    }

    let paths: Vec<String> = tree.iter().map(|e| e.path.to_lowercase()).collect();

    let mut total = 0.0;

    if paths.iter().any(|p| is_test_path(p)) {
        total += 0.30;
    }

    if paths
        .iter()
        .any(|p| CI_MARKERS.iter().any(|m| p.contains(m)) || matches!(filename(p), "makefile" | "dockerfile"))
    {
        total += 0.25;
    }

    if paths.iter().any(|p| LINT_FILES.contains(&filename(p))) {
        total += 0.15;
    }

    total += source_density(tree) * 0.15;

    total += docs_and_packaging(&paths) * 0.15;

    total.clamp(0.0, 1.0)
}

fn filename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn is_test_path(path: &str) -> bool {
    let name = filename(path);
    path.contains("tests/")
        || path.contains("test/")
        || name.starts_with("test_")
        || name.ends_with("_test.py")
        || name == "test.py"
}

fn source_density(tree: &[TreeEntry]) -> f64 {
    let count = tree.iter().filter(|e| e.path.to_lowercase().ends_with(".py")).count();

    #[expect(clippy::cast_precision_loss, reason = "file counts are tiny")]
    let ratio = count as f64 / DENSITY_SATURATION;
    ratio.min(1.0)
}

/// Full credit when both a README and packaging metadata exist, half for one
fn docs_and_packaging(paths: &[String]) -> f64 {
    let has_readme = paths.iter().any(|p| filename(p).starts_with("readme"));
    let has_packaging = paths.iter().any(|p| {
        let name = filename(p);
        PACKAGING_FILES.contains(&name) || (name.starts_with("requirements") && name.ends_with(".txt"))
    });

    match (has_readme, has_packaging) {
        (true, true) => 1.0,
        (false, false) => 0.0,
        _ => 0.5,
    }
}
