//! Compact text format for game event serialization
//!
//! Format: `T:NNNNN|CODE|data...`
//! - T:NNNNN = timestamp in milliseconds (5 digits, wraps at 99999)
//! - CODE = event type code
//! - data = pipe-separated values specific to event type
//!
//! Examples:
//! ```text
//! T:00500|CS
//! T:00833|SH|0.00,0.12,-5.00|0.20|1.46|0.00,9.17,-4.52
//! T:02300|G|2|2|1
//! T:03800|BR
//! T:04300|CR|24.0
//! ```

use super::types::{GameEvent, Triple};

fn fmt_triple(v: Triple) -> String {
    format!("{:.2},{:.2},{:.2}", v.0, v.1, v.2)
}

/// Serialize a GameEvent to compact text format
pub fn serialize_event(time_ms: u32, event: &GameEvent) -> String {
    let ts = format!("T:{:05}", time_ms % 100000);
    let code = event.type_code();

    let data = match event {
        GameEvent::SessionStart {
            session_id,
            timestamp,
        } => format!("{}|{}", session_id, timestamp),
        GameEvent::Config(tuning) => {
            // Compact JSON keeps the line parseable
            serde_json::to_string(tuning).unwrap_or_else(|_| "{}".to_string())
        }
        GameEvent::ShotRelease {
            origin,
            power,
            flight_time,
            velocity,
        } => format!(
            "{}|{:.2}|{:.2}|{}",
            fmt_triple(*origin),
            power,
            flight_time,
            fmt_triple(*velocity)
        ),
        GameEvent::ShotCancelled { power } => format!("{:.1}", power),
        GameEvent::Goal {
            points,
            score,
            combo,
        } => format!("{}|{}|{}", points, score, combo),
        GameEvent::RimHit { speed } => format!("{:.2}", speed),
        GameEvent::ClockResumed { shot_clock } => format!("{:.1}", shot_clock),
        GameEvent::ChargeStart
        | GameEvent::LockoutEnded
        | GameEvent::GoalIgnored
        | GameEvent::Violation
        | GameEvent::BallReset => String::new(),
    };

    if data.is_empty() {
        format!("{}|{}", ts, code)
    } else {
        format!("{}|{}|{}", ts, code, data)
    }
}
