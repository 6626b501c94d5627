//! Scenario testing system for deterministic game testing
//!
//! Runs scripted input timelines against a headless session and checks
//! the emitted event sequence and snapshot state.

pub mod assertions;
pub mod input;
pub mod parser;
pub mod runner;
pub mod suite;

pub use assertions::{AssertionError, CapturedEvent, check_forbidden, check_sequence, check_state};
pub use input::{CurrentInputState, ScriptedInputs};
pub use parser::{
    ExpectedEvent, FrameInput, InputSnapshot, StateAssertion, TestDefinition, TestExpectations,
    TestSetup,
};
pub use runner::{TestResult, run_test, run_traced};
pub use suite::{ScenarioRun, category_of, discover_scenarios, run_scenario_file};

/// Default path for test scenarios
pub const SCENARIOS_DIR: &str = "tests/scenarios";
