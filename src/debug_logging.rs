//! Debug logging configuration shared across binaries.

use bevy::log::Level;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::DEBUG_LOG_SETTINGS_FILE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugLogConfig {
    pub enabled: bool,
    /// Extra `tracing` filter directives appended when enabled
    pub filter: String,
}

impl Default for DebugLogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            filter: "wgpu=error,naga=warn".to_string(),
        }
    }
}

impl DebugLogConfig {
    pub fn load() -> Self {
        Self::load_from(DEBUG_LOG_SETTINGS_FILE)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn enabled_from_args(args: &[String]) -> bool {
        args.iter().any(|arg| arg == "--debug-log")
    }

    pub fn load_with_args(args: &[String]) -> Self {
        let mut config = Self::load();
        if Self::enabled_from_args(args) {
            config.enabled = true;
        }
        config
    }

    /// Level for `LogPlugin`
    pub fn level(&self) -> Level {
        if self.enabled {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }

    /// Filter string for `LogPlugin`
    pub fn filter(&self) -> String {
        if self.enabled {
            format!("hoopshot=debug,{}", self.filter)
        } else {
            format!("hoopshot=info,{}", self.filter)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_enables_debug() {
        let args = vec!["hoopshot".to_string(), "--debug-log".to_string()];
        assert!(DebugLogConfig::enabled_from_args(&args));

        let config = DebugLogConfig {
            enabled: true,
            ..Default::default()
        };
        assert_eq!(config.level(), Level::DEBUG);
        assert!(config.filter().starts_with("hoopshot=debug"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = DebugLogConfig::load_from("definitely/not/here.json");
        assert_eq!(config, DebugLogConfig::default());
        assert_eq!(config.level(), Level::INFO);
    }
}
