//! Game events and presentation cues
//!
//! Provides a compact text format for logging every gameplay transition.
//! Used by the game binary, the simulator and the scenario runner.

mod bus;
mod format;
mod types;

pub use bus::{BusEvent, EventBus};
pub use format::serialize_event;
pub use types::{Cue, GameEvent, Triple, triple};
