//! Error types
//!
//! Gameplay never fails at runtime: bad input is clamped, duplicate
//! scores are debounced and overlapping resets are guarded. The only
//! errors are configuration problems and a physics backend that cannot
//! build the court.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhysicsError {
    #[error("Physics backend unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid body description: {0}")]
    InvalidBody(String),
}

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Physics world rejected the {what}: {source}")]
    Physics {
        what: &'static str,
        #[source]
        source: PhysicsError,
    },

    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

impl SetupError {
    pub(crate) fn physics(what: &'static str) -> impl FnOnce(PhysicsError) -> SetupError {
        move |source| SetupError::Physics { what, source }
    }
}
