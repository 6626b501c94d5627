//! Assertion checking for test expectations

use super::parser::{ExpectedEvent, StateAssertion};
use crate::snapshot::GameSnapshot;

/// Error when an assertion fails
#[derive(Debug, Clone)]
pub struct AssertionError {
    /// Frame the failure was observed on, when it has one
    pub frame: Option<u64>,
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl std::fmt::Display for AssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n    Expected: {}\n    Actual: {}", self.message, self.expected, self.actual)
    }
}

/// Captured event with timing info
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedEvent {
    pub frame: u64,
    /// Event type code
    pub code: String,
    /// Full compact log line, for failure reports
    pub line: String,
}

/// Check if captured events match expected sequence
pub fn check_sequence(expected: &[ExpectedEvent], captured: &[CapturedEvent]) -> Result<(), AssertionError> {
    let mut captured_idx = 0;

    for (i, exp) in expected.iter().enumerate() {
        // Find matching event starting from current position
        let found = captured[captured_idx..]
            .iter()
            .enumerate()
            .find(|(_, cap)| cap.code == exp.event);

        match found {
            Some((offset, cap)) => {
                if let Some(min) = exp.frame_min {
                    if cap.frame < min {
                        return Err(AssertionError {
                            frame: Some(cap.frame),
                            message: format!("Event #{} '{}' occurred too early", i + 1, exp.event),
                            expected: format!("frame >= {}", min),
                            actual: format!("frame {}", cap.frame),
                        });
                    }
                }
                if let Some(max) = exp.frame_max {
                    if cap.frame > max {
                        return Err(AssertionError {
                            frame: Some(cap.frame),
                            message: format!("Event #{} '{}' occurred too late", i + 1, exp.event),
                            expected: format!("frame <= {}", max),
                            actual: format!("frame {}", cap.frame),
                        });
                    }
                }
                captured_idx += offset + 1;
            }
            None => {
                return Err(AssertionError {
                    frame: None,
                    message: format!("Event #{} '{}' not found", i + 1, exp.event),
                    expected: format!("'{}' event in sequence", exp.event),
                    actual: format!("events after position {}: {:?}",
                        captured_idx,
                        captured[captured_idx..].iter().map(|e| &e.code).collect::<Vec<_>>()
                    ),
                });
            }
        }
    }

    Ok(())
}

/// Fail on the first occurrence of any forbidden event code
pub fn check_forbidden(forbidden: &[String], captured: &[CapturedEvent]) -> Result<(), AssertionError> {
    match captured.iter().find(|cap| forbidden.contains(&cap.code)) {
        Some(cap) => Err(AssertionError {
            frame: Some(cap.frame),
            message: format!("Forbidden event '{}' occurred", cap.code),
            expected: format!("none of {:?}", forbidden),
            actual: format!("'{}' at frame {}", cap.code, cap.frame),
        }),
        None => Ok(()),
    }
}

/// Parse a check string into (path, operator, value)
fn parse_check(check: &str) -> Option<(&str, &str, &str)> {
    // Try operators in order of specificity (>= before >, etc.)
    for op in &[">=", "<=", "!=", "==", "=", ">", "<"] {
        if let Some(idx) = check.find(op) {
            let path = check[..idx].trim();
            let value = check[idx + op.len()..].trim();
            return Some((path, op, value));
        }
    }
    None
}

/// Check state assertions against the snapshot taken after that frame
pub fn check_state(assertion: &StateAssertion, state: &GameSnapshot) -> Result<(), AssertionError> {
    for check in &assertion.checks {
        let (path, operator, expected_value) = parse_check(check).ok_or_else(|| AssertionError {
            frame: None,
            message: format!("Invalid check syntax: {}", check),
            expected: "format: 'property = value' or 'ball.x > value'".to_string(),
            actual: check.clone(),
        })?;

        let (x, y, z) = state.ball_position;
        match path {
            "score" => check_float_comparison(path, state.score as f32, operator, expected_value)?,
            "combo" => check_float_comparison(path, state.combo as f32, operator, expected_value)?,
            "shot_clock" => check_float_comparison(path, state.shot_clock, operator, expected_value)?,
            "power" => check_float_comparison(path, state.power_percent, operator, expected_value)?,
            "ball.x" => check_float_comparison(path, x, operator, expected_value)?,
            "ball.y" => check_float_comparison(path, y, operator, expected_value)?,
            "ball.z" => check_float_comparison(path, z, operator, expected_value)?,
            "ball.speed" => check_float_comparison(path, state.ball_speed(), operator, expected_value)?,
            "shooting" => check_bool(check, state.shooting, expected_value)?,
            "charging" => check_bool(check, state.charging, expected_value)?,
            "paused" => check_bool(check, state.paused, expected_value)?,
            _ => {
                return Err(AssertionError {
                    frame: None,
                    message: format!("Unknown property '{}'", path),
                    expected: "score, combo, shot_clock, power, ball.x/y/z/speed, shooting, charging or paused".to_string(),
                    actual: path.to_string(),
                });
            }
        }
    }

    Ok(())
}

fn check_bool(check: &str, actual: bool, expected_str: &str) -> Result<(), AssertionError> {
    let expected = expected_str == "true";
    if actual != expected {
        return Err(AssertionError {
            frame: None,
            message: format!("Check failed: {}", check),
            expected: expected_str.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

/// Check float comparison with operator
fn check_float_comparison(path: &str, actual: f32, operator: &str, expected_str: &str) -> Result<(), AssertionError> {
    let value: f32 = expected_str.trim().parse().map_err(|_| AssertionError {
        frame: None,
        message: format!("Invalid value for {}", path),
        expected: "number".to_string(),
        actual: expected_str.to_string(),
    })?;

    let pass = match operator {
        ">=" => actual >= value,
        "<=" => actual <= value,
        ">" => actual > value,
        "<" => actual < value,
        "=" | "==" => (actual - value).abs() < 0.1,
        "!=" => (actual - value).abs() >= 0.1,
        _ => true, // Unknown operator, pass by default
    };

    if !pass {
        return Err(AssertionError {
            frame: None,
            message: format!("Check failed: {} {} {} (actual: {:.2})", path, operator, expected_str, actual),
            expected: format!("{} {} {}", path, operator, value),
            actual: format!("{:.2}", actual),
        });
    }

    Ok(())
}
