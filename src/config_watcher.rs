//! Config file auto-reload system
//!
//! Polls the gameplay tuning file every 2 seconds and pushes valid
//! changes into the running session.

use bevy::prelude::*;
use std::fs;
use std::time::SystemTime;

use crate::constants::GAMEPLAY_TUNING_FILE;
use crate::session::ActiveSession;
use crate::tuning::GameplayTuning;

/// How often to check for config changes (seconds)
const CHECK_INTERVAL: f32 = 2.0;

/// Tracks modification time of the tuning file for hot-reload
#[derive(Resource)]
pub struct ConfigWatcher {
    /// Time since last check
    pub timer: f32,
    pub path: String,
    pub tuning_mtime: Option<SystemTime>,
}

impl Default for ConfigWatcher {
    fn default() -> Self {
        Self::new(GAMEPLAY_TUNING_FILE)
    }
}

impl ConfigWatcher {
    pub fn new(path: &str) -> Self {
        Self {
            timer: 0.0,
            path: path.to_string(),
            tuning_mtime: get_mtime(path),
        }
    }

    /// Advance the poll timer; returns true when the file changed since
    /// the last check
    pub fn poll(&mut self, dt: f32) -> bool {
        self.timer += dt;
        if self.timer < CHECK_INTERVAL {
            return false;
        }
        self.timer = 0.0;

        let mtime = get_mtime(&self.path);
        if mtime == self.tuning_mtime {
            return false;
        }
        self.tuning_mtime = mtime;
        mtime.is_some()
    }
}

/// Get file modification time, or None if file doesn't exist
fn get_mtime(path: &str) -> Option<SystemTime> {
    fs::metadata(path).ok().and_then(|m| m.modified().ok())
}

/// Reload tuning when the file changes. Bad files are logged and skipped;
/// the session keeps its current values.
pub fn check_config_changes(
    time: Res<Time>,
    mut watcher: ResMut<ConfigWatcher>,
    mut session: ResMut<ActiveSession>,
) {
    if !watcher.poll(time.delta_secs()) {
        return;
    }

    let tuning = match GameplayTuning::load_from_file(&watcher.path) {
        Ok(tuning) => tuning,
        Err(e) => {
            warn!("Ignoring {}: {}", watcher.path, e);
            return;
        }
    };
    match session.0.apply_tuning(tuning) {
        Ok(()) => info!("Auto-reloaded gameplay tuning from {}", watcher.path),
        Err(e) => warn!("Rejected {}: {}", watcher.path, e),
    }
}
