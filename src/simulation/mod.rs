//! Shot sweep simulation - headless sessions for tuning the shot model
//!
//! Fires scripted shots from a grid of court spots at a range of charge
//! levels, each in a fresh session on `KinematicWorld`, and reports make
//! percentages by power and by distance.

pub mod config;
pub mod metrics;
pub mod parallel;
pub mod runner;

pub use config::SimConfig;
pub use metrics::{AttemptResult, Bucket, SimMetrics};
pub use runner::{run_attempt, run_simulation};
