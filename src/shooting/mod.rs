//! Shooting module - power charge and trajectory solver

mod charge;
mod trajectory;

pub use charge::*;
pub use trajectory::*;
