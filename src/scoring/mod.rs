//! Scoring module - basket detection and the match clock

mod clock;
mod sensor;

pub use clock::*;
pub use sensor::*;
