//! Scripted input injection for tests

use bevy::math::Vec2;
use std::collections::HashMap;

use super::parser::{FrameInput, InputSnapshot};

/// Timeline of input changes for a test
#[derive(Debug, Default)]
pub struct ScriptedInputs {
    /// Map of frame -> input change
    pub frames: HashMap<u64, InputSnapshot>,
    /// Held state (persists between frames)
    pub current_state: CurrentInputState,
    /// Current frame number
    pub current_frame: u64,
    /// Maximum frame to run
    pub max_frame: u64,
}

/// Input held at the current frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CurrentInputState {
    /// Stick deflection on the court plane (x, z)
    pub movement: Vec2,
    pub charge: bool,
}

impl ScriptedInputs {
    /// Create from parsed frame inputs
    pub fn from_inputs(inputs: &[FrameInput]) -> Self {
        let mut frames = HashMap::new();
        let mut max_frame = 0u64;

        for fi in inputs {
            max_frame = max_frame.max(fi.frame);
            frames.insert(fi.frame, fi.inputs.clone());
        }

        Self {
            frames,
            max_frame,
            ..Default::default()
        }
    }

    /// Set max frame (for state assertions)
    pub fn set_max_frame(&mut self, frame: u64) {
        self.max_frame = self.max_frame.max(frame);
    }

    /// Apply this frame's changes, advance, and return the held input
    pub fn advance_frame(&mut self) -> CurrentInputState {
        if let Some(snapshot) = self.frames.get(&self.current_frame) {
            let state = &mut self.current_state;
            if let Some(x) = snapshot.move_x {
                state.movement.x = x;
            }
            if let Some(z) = snapshot.move_z {
                state.movement.y = z;
            }
            if let Some(charge) = snapshot.charge {
                state.charge = charge;
            }
        }

        self.current_frame += 1;
        self.current_state
    }

    /// Check if simulation should continue
    pub fn should_continue(&self) -> bool {
        self.current_frame <= self.max_frame
    }
}
