//! Scenario discovery and per-file runs
//!
//! Shared by the `test-scenarios` binary and the integration suite so both
//! walk the same files in the same order.

use std::fs;
use std::path::{Path, PathBuf};

use super::assertions::CapturedEvent;
use super::parser::parse_test_file;
use super::runner::{TestResult, run_traced};

/// One scenario file and what happened when it ran
#[derive(Debug)]
pub struct ScenarioRun {
    pub path: PathBuf,
    /// First directory under the scenario root ("" for files at the root)
    pub category: String,
    pub name: String,
    pub description: Option<String>,
    pub result: TestResult,
    pub events: Vec<CapturedEvent>,
}

/// Every `.toml` under `base`, sorted. `filter` keeps files whose path
/// relative to `base` contains it.
pub fn discover_scenarios(base: &Path, filter: Option<&str>) -> Vec<PathBuf> {
    let mut found = Vec::new();
    walk(base, &mut found);
    if let Some(filter) = filter {
        found.retain(|path| relative(base, path).contains(filter));
    }
    found.sort();
    found
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            walk(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            out.push(path);
        }
    }
}

fn relative(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Top-level directory of `path` under `base`
pub fn category_of(base: &Path, path: &Path) -> String {
    let rel = relative(base, path);
    match rel.split_once('/') {
        Some((category, _)) => category.to_string(),
        None => String::new(),
    }
}

/// Parse and run one scenario file. Parse failures come back as
/// `TestResult::Error` named after the file.
pub fn run_scenario_file(base: &Path, path: &Path) -> ScenarioRun {
    let category = category_of(base, path);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    match parse_test_file(path) {
        Ok(test) => {
            let (result, events) = run_traced(&test);
            ScenarioRun {
                path: path.to_path_buf(),
                category,
                name: test.name,
                description: test.description,
                result,
                events,
            }
        }
        Err(message) => ScenarioRun {
            path: path.to_path_buf(),
            category,
            name: stem,
            description: None,
            result: TestResult::Error { message },
            events: Vec::new(),
        },
    }
}
