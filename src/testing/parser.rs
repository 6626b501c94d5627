//! TOML test file parsing

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::events::GameEvent;

/// Complete test definition from TOML file
#[derive(Debug, Deserialize)]
pub struct TestDefinition {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub setup: TestSetup,
    #[serde(default)]
    pub input: Vec<FrameInput>,
    #[serde(default)]
    pub expect: TestExpectations,
}

/// Test setup configuration
#[derive(Debug, Default, Deserialize)]
pub struct TestSetup {
    /// Tuning file to load (built-in defaults when absent)
    pub tuning: Option<String>,
    /// Ball spawn on the court plane; height defaults to resting on the floor
    pub ball_x: Option<f32>,
    pub ball_y: Option<f32>,
    pub ball_z: Option<f32>,
    /// Starting shot clock (seconds)
    pub shot_clock: Option<f32>,
    /// Fixed timestep, defaults to 1/60
    pub dt: Option<f32>,
}

/// Input state change at a specific frame. Omitted fields keep their
/// previous value.
#[derive(Debug, Clone, Deserialize)]
pub struct FrameInput {
    pub frame: u64,
    #[serde(flatten)]
    pub inputs: InputSnapshot,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputSnapshot {
    /// Stick X in [-1, 1] (+ is right)
    #[serde(default)]
    pub move_x: Option<f32>,
    /// Stick Z in [-1, 1] (- is toward the hoop)
    #[serde(default)]
    pub move_z: Option<f32>,
    /// Charge button held
    #[serde(default)]
    pub charge: Option<bool>,
}

/// Expected test outcomes
#[derive(Debug, Default, Deserialize)]
pub struct TestExpectations {
    /// Event codes in order (other events may appear in between)
    #[serde(default)]
    pub sequence: Vec<ExpectedEvent>,
    /// Event codes that must never appear
    #[serde(default)]
    pub forbid: Vec<String>,
    /// Multiple state assertions at different frames (uses [[expect.state]] TOML syntax)
    #[serde(default)]
    pub state: Vec<StateAssertion>,
}

/// Expected event in sequence
#[derive(Debug, Deserialize)]
pub struct ExpectedEvent {
    /// Event type code, e.g. "SH" or "G"
    pub event: String,
    pub frame_min: Option<u64>,
    pub frame_max: Option<u64>,
}

/// State assertion after simulation
#[derive(Debug, Clone, Deserialize)]
pub struct StateAssertion {
    pub after_frame: u64,
    #[serde(default)]
    pub checks: Vec<String>,
}

impl TestDefinition {
    /// Reject typos in event codes before running anything
    pub fn validate(&self) -> Result<(), String> {
        let codes = self
            .expect
            .sequence
            .iter()
            .map(|e| e.event.as_str())
            .chain(self.expect.forbid.iter().map(String::as_str));
        for code in codes {
            if !GameEvent::is_known_code(code) {
                return Err(format!("Unknown event code '{}'", code));
            }
        }
        for exp in &self.expect.sequence {
            if let (Some(min), Some(max)) = (exp.frame_min, exp.frame_max) {
                if min > max {
                    return Err(format!(
                        "Event '{}' has frame_min {} > frame_max {}",
                        exp.event, min, max
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Parse a test file from path
pub fn parse_test_file(path: &Path) -> Result<TestDefinition, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let toml = r#"
name = "Test"
[setup]
ball_x = 0.0
ball_z = -5.0

[[input]]
frame = 10
charge = true

[[input]]
frame = 30
charge = false
move_x = 1.0

[expect]
forbid = ["V"]

[[expect.sequence]]
event = "SH"
frame_min = 28
frame_max = 32

[[expect.state]]
after_frame = 100
checks = ["score = 2"]
"#;
        let def: TestDefinition = toml::from_str(toml).unwrap();
        assert_eq!(def.name, "Test");
        assert_eq!(def.setup.ball_z, Some(-5.0));
        assert_eq!(def.input.len(), 2);
        assert_eq!(def.input[0].inputs.charge, Some(true));
        assert_eq!(def.input[0].inputs.move_x, None);
        assert_eq!(def.input[1].inputs.move_x, Some(1.0));
        assert_eq!(def.expect.forbid, vec!["V".to_string()]);
        assert!(def.validate().is_ok());
    }

    #[test]
    fn test_unknown_code_rejected() {
        let toml = r#"
name = "Typo"
[[expect.sequence]]
event = "GOAL"
"#;
        let def: TestDefinition = toml::from_str(toml).unwrap();
        let err = def.validate().unwrap_err();
        assert!(err.contains("GOAL"));
    }
}
