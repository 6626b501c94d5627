//! UI module - HUD text and charge gauge

mod charge_gauge;
mod hud;

pub use charge_gauge::*;
pub use hud::*;
