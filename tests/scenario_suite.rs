//! Runs every scenario under tests/scenarios as part of `cargo test`

use std::path::Path;

use hoopshot::testing::{SCENARIOS_DIR, TestResult, discover_scenarios, run_scenario_file};

#[test]
fn all_scenarios_pass() {
    let base = Path::new(env!("CARGO_MANIFEST_DIR")).join(SCENARIOS_DIR);
    let files = discover_scenarios(&base, None);
    assert!(files.len() >= 4, "expected scenario files under {}", base.display());

    let failures: Vec<String> = files
        .iter()
        .map(|path| run_scenario_file(&base, path))
        .filter_map(|run| match run.result {
            TestResult::Pass { .. } => None,
            TestResult::Fail { error } => Some(format!("{}: {}", run.name, error)),
            TestResult::Error { message } => Some(format!("{}: {}", run.name, message)),
        })
        .collect();

    assert!(failures.is_empty(), "{}", failures.join("\n"));
}
