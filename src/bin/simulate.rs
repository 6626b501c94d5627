//! Shot Sweep Tool - Headless shot simulation for tuning
//!
//! Fires scripted shots from a grid of court spots and charge levels and
//! reports make rates per power and per distance.
//!
//! Usage:
//!   cargo run --bin simulate -- --help
//!   cargo run --bin simulate -- --distances 3,5,7 --powers 20,40,60
//!   cargo run --bin simulate -- --attempts 20 --jitter 5 --seed 42 --parallel 8
//!   cargo run --bin simulate -- --tuning config/gameplay_tuning.json --json

use hoopshot::simulation::{SimConfig, run_simulation};

fn main() {
    let config = SimConfig::from_args();
    run_simulation(config);
}
