//! Simulation configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for a shot sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Distances in front of the hoop (meters, along +Z)
    pub distances: Vec<f32>,
    /// Sideways offsets from the hoop axis (meters, along X)
    pub offsets: Vec<f32>,
    /// Charge levels to try (percent)
    pub powers: Vec<f32>,
    /// Attempts per (spot, power)
    pub attempts: u32,
    /// Random charge error per attempt, ± percent
    pub power_jitter: f32,
    /// RNG seed for reproducibility (None = random)
    pub seed: Option<u64>,
    /// Fixed timestep (seconds)
    pub dt: f32,
    /// Tuning file (None = built-in defaults)
    pub tuning_file: Option<String>,
    /// Print metrics as JSON instead of tables
    pub json: bool,
    /// Output file path (None = stdout)
    pub output_file: Option<String>,
    /// Suppress progress output
    pub quiet: bool,
    /// Number of worker threads (0 = rayon default)
    pub parallel: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            distances: vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
            offsets: vec![0.0, 1.5],
            powers: vec![15.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0],
            attempts: 1,
            power_jitter: 0.0,
            seed: None,
            dt: 1.0 / 60.0,
            tuning_file: None,
            json: false,
            output_file: None,
            quiet: false,
            parallel: 0,
        }
    }
}

/// Local simulation settings (optional)
pub const SIM_SETTINGS_FILE: &str = "config/simulation_settings.json";

fn valid_step(dt: f32) -> bool {
    dt.is_finite() && dt > 0.0
}

fn parse_list(value: &str) -> Vec<f32> {
    value
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect()
}

impl SimConfig {
    /// Load configuration from a JSON settings file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        if !valid_step(config.dt) {
            return Err(ConfigError::Invalid(format!(
                "dt must be a positive number of seconds, got {}",
                config.dt
            )));
        }
        Ok(config)
    }

    /// Parse configuration from command line arguments
    pub fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        Self::from_arg_list(&args)
    }

    /// Settings file (if present) overridden by `args`
    pub fn from_arg_list(args: &[String]) -> Self {
        let mut config = Self::from_file(SIM_SETTINGS_FILE).unwrap_or_default();

        let mut i = 1;
        while i < args.len() {
            let next = args.get(i + 1);
            match (args[i].as_str(), next) {
                ("--settings", Some(path)) => {
                    match Self::from_file(path) {
                        Ok(loaded) => config = loaded,
                        Err(e) => eprintln!("Warning: failed to load {}: {}", path, e),
                    }
                    i += 1;
                }
                ("--distances", Some(list)) => {
                    config.distances = parse_list(list);
                    i += 1;
                }
                ("--offsets", Some(list)) => {
                    config.offsets = parse_list(list);
                    i += 1;
                }
                ("--powers", Some(list)) => {
                    config.powers = parse_list(list);
                    i += 1;
                }
                ("--attempts", Some(n)) => {
                    config.attempts = n.parse().unwrap_or(1).max(1);
                    i += 1;
                }
                ("--jitter", Some(n)) => {
                    config.power_jitter = n.parse().unwrap_or(0.0);
                    i += 1;
                }
                ("--seed", Some(n)) => {
                    config.seed = n.parse().ok();
                    i += 1;
                }
                ("--dt", Some(n)) => {
                    match n.parse::<f32>() {
                        Ok(dt) if valid_step(dt) => config.dt = dt,
                        _ => eprintln!(
                            "Warning: --dt must be a positive number of seconds, keeping {}",
                            config.dt
                        ),
                    }
                    i += 1;
                }
                ("--tuning", Some(path)) => {
                    config.tuning_file = Some(path.clone());
                    i += 1;
                }
                ("--output", Some(path)) => {
                    config.output_file = Some(path.clone());
                    i += 1;
                }
                ("--parallel", Some(n)) => {
                    config.parallel = n.parse().unwrap_or(0);
                    i += 1;
                }
                ("--json", _) => config.json = true,
                ("--quiet" | "-q", _) => config.quiet = true,
                ("--help" | "-h", _) => {
                    print_help();
                    std::process::exit(0);
                }
                (other, _) => eprintln!("Warning: ignoring argument {}", other),
            }
            i += 1;
        }

        config
    }
}

fn print_help() {
    println!(
        r#"Shot sweep simulator - headless shots from a grid of court spots

USAGE:
    cargo run --bin simulate -- [OPTIONS]

OPTIONS:
    --settings <FILE>     Load settings from JSON file (CLI args override file settings)
    --distances <LIST>    Comma-separated distances in front of the hoop (m)
    --offsets <LIST>      Comma-separated sideways offsets (m)
    --powers <LIST>       Comma-separated charge levels (percent)
    --attempts <N>        Attempts per spot and power (default: 1)
    --jitter <PCT>        Random charge error per attempt, +/- percent
    --seed <N>            RNG seed for reproducibility
    --dt <SECS>           Fixed timestep (default: 1/60)
    --tuning <FILE>       Gameplay tuning JSON
    --json                Print metrics as JSON
    --output <FILE>       Write JSON metrics to file
    --parallel <N>        Worker threads (default: all cores)
    --quiet, -q           Suppress progress output
    --help, -h            Show this help

EXAMPLES:
    # Which charge levels swish from the free-throw line?
    cargo run --bin simulate -- --distances 4.6 --offsets 0 --powers 10,20,30,40,50,60,70,80,90,100

    # Noisy charge, 20 attempts per cell, reproducible
    cargo run --bin simulate -- --attempts 20 --jitter 5 --seed 42 --json
"#
    );
}
