//! Ball module - controller state machine and presentation components

mod components;
mod controller;

pub use components::*;
pub use controller::*;
