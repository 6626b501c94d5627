//! Scripted hoopshot scenarios from the command line
//!
//! Usage:
//!   cargo run --bin test-scenarios                       # every scenario
//!   cargo run --bin test-scenarios -- clock/             # one category
//!   cargo run --bin test-scenarios -- swish --verbose    # event timeline on failure
//!   cargo run --bin test-scenarios -- --list             # names and descriptions only
//!
//! Exits non-zero if any scenario fails or cannot be loaded.

use std::collections::BTreeMap;
use std::path::Path;

use hoopshot::testing::{
    SCENARIOS_DIR, ScenarioRun, TestResult, category_of, discover_scenarios, run_scenario_file,
};

/// Events shown either side of the failing frame in verbose mode
const TIMELINE_WINDOW: u64 = 30;

#[derive(Default)]
struct Options {
    verbose: bool,
    list: bool,
    filter: Option<String>,
}

#[derive(Default)]
struct Tally {
    passed: usize,
    failed: usize,
    errors: usize,
}

impl Tally {
    fn record(&mut self, result: &TestResult) {
        match result {
            TestResult::Pass { .. } => self.passed += 1,
            TestResult::Fail { .. } => self.failed += 1,
            TestResult::Error { .. } => self.errors += 1,
        }
    }

    fn clean(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }
}

fn parse_options() -> Options {
    let mut options = Options::default();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--verbose" | "-v" => options.verbose = true,
            "--list" | "-l" => options.list = true,
            flag if flag.starts_with('-') => eprintln!("Warning: ignoring argument {}", flag),
            filter => options.filter = Some(filter.to_string()),
        }
    }
    options
}

fn main() {
    let options = parse_options();
    let base = Path::new(SCENARIOS_DIR);
    let files = discover_scenarios(base, options.filter.as_deref());

    if files.is_empty() {
        match &options.filter {
            Some(filter) => eprintln!("No scenarios under {} match '{}'", SCENARIOS_DIR, filter),
            None => eprintln!("No scenarios found under {}", SCENARIOS_DIR),
        }
        std::process::exit(1);
    }

    if options.list {
        for path in &files {
            list_entry(base, path);
        }
        return;
    }

    let mut by_category: BTreeMap<String, Tally> = BTreeMap::new();
    let mut total = Tally::default();
    let mut current = None;

    for path in &files {
        let run = run_scenario_file(base, path);
        if current.as_ref() != Some(&run.category) {
            println!("\n[{}]", display_category(&run.category));
            current = Some(run.category.clone());
        }
        report(&run, options.verbose);
        by_category.entry(run.category.clone()).or_default().record(&run.result);
        total.record(&run.result);
    }

    println!("\n{:<14} {:>6} {:>6} {:>6}", "category", "pass", "fail", "error");
    for (category, tally) in &by_category {
        println!(
            "{:<14} {:>6} {:>6} {:>6}",
            display_category(category),
            tally.passed,
            tally.failed,
            tally.errors
        );
    }
    println!(
        "{:<14} {:>6} {:>6} {:>6}",
        "total", total.passed, total.failed, total.errors
    );

    if !total.clean() {
        std::process::exit(1);
    }
}

fn display_category(category: &str) -> &str {
    if category.is_empty() { "(root)" } else { category }
}

fn list_entry(base: &Path, path: &Path) {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let description = hoopshot::testing::parser::parse_test_file(path)
        .ok()
        .and_then(|test| test.description)
        .unwrap_or_default();
    println!(
        "{}/{:<28} {}",
        display_category(&category_of(base, path)),
        stem,
        description
    );
}

fn report(run: &ScenarioRun, verbose: bool) {
    match &run.result {
        TestResult::Pass { frames } => println!("  ok    {} ({} frames)", run.name, frames),
        TestResult::Fail { error } => {
            println!("  FAIL  {}", run.name);
            if verbose {
                for line in error.to_string().lines() {
                    println!("        {}", line);
                }
                print_timeline(run, error.frame);
            } else {
                println!("        {}", error.message);
            }
        }
        TestResult::Error { message } => {
            println!("  ERROR {} ({})", run.name, run.path.display());
            println!("        {}", message);
        }
    }
}

/// Captured events near `focus` (or all of them when the failure has no frame)
fn print_timeline(run: &ScenarioRun, focus: Option<u64>) {
    let shown: Vec<_> = run
        .events
        .iter()
        .filter(|e| focus.is_none_or(|f| e.frame.abs_diff(f) <= TIMELINE_WINDOW))
        .collect();
    if shown.is_empty() {
        println!("        (no events captured)");
        return;
    }
    for event in shown {
        println!("        f{:>5}  {}", event.frame, event.line);
    }
}
