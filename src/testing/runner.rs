//! Test execution engine
//!
//! Drives a headless `GameSession` frame by frame: scripted input is fed
//! to the aggregator before each tick, emitted events are captured with
//! the frame they happened on, and state checks read that frame's
//! snapshot.

use crate::events::serialize_event;
use crate::input::{ChargeSource, StickSource};
use crate::physics::KinematicWorld;
use crate::session::GameSession;
use crate::tuning::GameplayTuning;

use super::assertions::{AssertionError, CapturedEvent, check_forbidden, check_sequence, check_state};
use super::input::ScriptedInputs;
use super::parser::TestDefinition;

/// Frames to run when nothing in the test implies a length
const DEFAULT_FRAMES: u64 = 60;
const DEFAULT_DT: f32 = 1.0 / 60.0;

/// Result of running a test
#[derive(Debug)]
pub enum TestResult {
    Pass { frames: u64 },
    Fail { error: AssertionError },
    Error { message: String },
}

impl TestResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, TestResult::Pass { .. })
    }
}

fn build_session(test: &TestDefinition) -> Result<GameSession<KinematicWorld>, String> {
    let setup = &test.setup;
    let mut tuning = match &setup.tuning {
        Some(path) => GameplayTuning::load_from_file(path)
            .map_err(|e| format!("Failed to load tuning {}: {}", path, e))?,
        None => GameplayTuning::default(),
    };

    let [x, y, z] = tuning.ball_spawn;
    tuning.ball_spawn = [
        setup.ball_x.unwrap_or(x),
        setup.ball_y.unwrap_or(if setup.ball_x.is_some() || setup.ball_z.is_some() {
            tuning.ball_radius
        } else {
            y
        }),
        setup.ball_z.unwrap_or(z),
    ];

    let mut session = GameSession::new(tuning, KinematicWorld::default())
        .map_err(|e| format!("Session setup failed: {}", e))?;
    if let Some(seconds) = setup.shot_clock {
        session.set_shot_clock(seconds);
    }
    // Session start lines are not part of the scripted timeline
    session.drain_events();
    Ok(session)
}

/// Run a single test and return the result
pub fn run_test(test: &TestDefinition) -> TestResult {
    run_traced(test).0
}

/// Run a test, also returning every event it captured (empty on setup errors)
pub fn run_traced(test: &TestDefinition) -> (TestResult, Vec<CapturedEvent>) {
    let mut captured = Vec::new();
    let result = execute(test, &mut captured);
    (result, captured)
}

fn execute(test: &TestDefinition, captured: &mut Vec<CapturedEvent>) -> TestResult {
    if let Err(message) = test.validate() {
        return TestResult::Error { message };
    }

    let mut session = match build_session(test) {
        Ok(session) => session,
        Err(message) => return TestResult::Error { message },
    };
    let dt = test.setup.dt.unwrap_or(DEFAULT_DT);

    let mut scripted = ScriptedInputs::from_inputs(&test.input);
    for state in &test.expect.state {
        scripted.set_max_frame(state.after_frame);
    }
    for exp in &test.expect.sequence {
        if let Some(max) = exp.frame_max {
            scripted.set_max_frame(max);
        }
    }
    if scripted.max_frame == 0 {
        scripted.max_frame = DEFAULT_FRAMES;
    }

    while scripted.should_continue() {
        let frame = scripted.current_frame;
        let held = scripted.advance_frame();

        let input = session.aggregator_mut();
        input.set_stick(StickSource::Gamepad, held.movement);
        input.set_charge(ChargeSource::Keyboard, held.charge);

        let snapshot = session.tick(dt);
        captured.extend(session.drain_events().into_iter().map(|e| CapturedEvent {
            frame,
            code: e.event.type_code().to_string(),
            line: serialize_event(e.time_ms, &e.event),
        }));

        for assertion in test.expect.state.iter().filter(|a| a.after_frame == frame) {
            if let Err(mut error) = check_state(assertion, &snapshot) {
                error.frame = Some(frame);
                return TestResult::Fail { error };
            }
        }
    }

    if let Err(error) = check_forbidden(&test.expect.forbid, captured) {
        return TestResult::Fail { error };
    }
    if let Err(error) = check_sequence(&test.expect.sequence, captured) {
        return TestResult::Fail { error };
    }

    TestResult::Pass {
        frames: scripted.current_frame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> TestDefinition {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn test_idle_run_passes() {
        let test = parse(
            r#"
name = "Idle"
[expect]
forbid = ["SH", "V"]
[[expect.state]]
after_frame = 30
checks = ["score = 0", "shooting = false", "shot_clock < 24"]
"#,
        );
        assert!(run_test(&test).is_pass());
    }

    #[test]
    fn test_failed_check_is_reported() {
        let test = parse(
            r#"
name = "Wrong score"
[[expect.state]]
after_frame = 5
checks = ["score = 7"]
"#,
        );
        assert!(matches!(run_test(&test), TestResult::Fail { .. }));
    }

    #[test]
    fn test_trace_keeps_events_after_failure() {
        let test = parse(
            r#"
name = "Shoot then expect a violation"
[[input]]
frame = 0
charge = true
[[input]]
frame = 20
charge = false
[[expect.sequence]]
event = "V"
frame_max = 40
"#,
        );
        let (result, events) = run_traced(&test);
        assert!(matches!(result, TestResult::Fail { .. }));
        let cs = events.iter().find(|e| e.code == "CS").unwrap();
        assert_eq!(cs.frame, 0);
        assert!(cs.line.starts_with("T:") && cs.line.contains("|CS"));
        assert!(events.iter().any(|e| e.code == "SH"));
    }

    #[test]
    fn test_missing_tuning_file_is_an_error() {
        let test = parse(
            r#"
name = "Bad setup"
[setup]
tuning = "does/not/exist.json"
"#,
        );
        assert!(matches!(run_test(&test), TestResult::Error { .. }));
    }
}
