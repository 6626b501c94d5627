//! Shot sweep runner

use bevy::math::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::SimConfig;
use super::metrics::{AttemptResult, SimMetrics};
use super::parallel::{init_parallel, run_parallel};
use crate::error::SetupError;
use crate::events::GameEvent;
use crate::helpers::vec3_from;
use crate::input::ChargeSource;
use crate::physics::KinematicWorld;
use crate::session::GameSession;
use crate::tuning::GameplayTuning;

/// Frames the ball sits before the charge starts
const SETTLE_FRAMES: u32 = 5;

#[derive(Debug, Clone, Copy)]
struct Job {
    spot: Vec2,
    power: f32,
    seed: u64,
}

/// Fire one scripted shot from `spot` (x, z) in a fresh session.
///
/// The ball starts resting on the floor, charges for as many frames as
/// `requested_power` needs (± jitter), releases, and is followed until it
/// scores or the shot lockout runs out.
pub fn run_attempt(
    tuning: &GameplayTuning,
    spot: Vec2,
    requested_power: f32,
    jitter: f32,
    seed: u64,
    dt: f32,
) -> Result<AttemptResult, SetupError> {
    if !(dt.is_finite() && dt > 0.0) {
        return Err(SetupError::InvalidTuning(format!(
            "simulation step must be positive, got {dt}"
        )));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let power = if jitter > 0.0 {
        (requested_power + rng.gen_range(-jitter..=jitter)).clamp(0.0, 100.0)
    } else {
        requested_power
    };

    let mut tuning = tuning.clone();
    tuning.ball_spawn = [spot.x, tuning.ball_radius, spot.y];
    let hoop = vec3_from(tuning.hoop_target);

    let per_frame = tuning.charge_rate * dt;
    let charge_frames = if per_frame > 0.0 {
        (power / per_frame).ceil().max(1.0) as u32
    } else {
        1
    };
    let release_frame = SETTLE_FRAMES + charge_frames;
    let max_frames = release_frame + (tuning.shot_lockout / dt).ceil() as u32;

    let mut session = GameSession::new(tuning, KinematicWorld::default())?;
    let mut result = AttemptResult {
        spot: (spot.x, spot.y),
        distance: Vec2::new(hoop.x - spot.x, hoop.z - spot.y).length(),
        requested_power,
        power: 0.0,
        flight_time: 0.0,
        made: false,
        rim_hits: 0,
        frames_to_score: None,
        seed,
    };

    for frame in 0..max_frames {
        let charging = (SETTLE_FRAMES..release_frame).contains(&frame);
        session
            .aggregator_mut()
            .set_charge(ChargeSource::Keyboard, charging);
        session.tick(dt);

        for bus_event in session.drain_events() {
            match bus_event.event {
                GameEvent::RimHit { .. } => result.rim_hits += 1,
                GameEvent::Goal { .. } => {
                    result.made = true;
                    result.frames_to_score = Some(frame.saturating_sub(release_frame));
                }
                _ => {}
            }
        }
        if result.made {
            break;
        }
    }

    if let Some(shot) = session.controller().last_shot() {
        result.power = shot.power * 100.0;
        result.flight_time = shot.flight_time;
    }

    Ok(result)
}

fn build_jobs(config: &SimConfig, hoop: Vec2, base_seed: u64) -> Vec<Job> {
    let mut jobs = Vec::new();
    for &distance in &config.distances {
        for &offset in &config.offsets {
            let spot = Vec2::new(hoop.x + offset, hoop.y + distance);
            for &power in &config.powers {
                for _ in 0..config.attempts.max(1) {
                    let seed = base_seed.wrapping_add(jobs.len() as u64);
                    jobs.push(Job { spot, power, seed });
                }
            }
        }
    }
    jobs
}

/// Run the whole sweep and print the report
pub fn run_simulation(config: SimConfig) -> SimMetrics {
    let tuning = config
        .tuning_file
        .as_deref()
        .map(|path| GameplayTuning::load_or_default(path))
        .unwrap_or_default();
    let hoop = vec3_from(tuning.hoop_target);
    let base_seed = config.seed.unwrap_or_else(|| rand::thread_rng().r#gen());

    let jobs = build_jobs(&config, Vec2::new(hoop.x, hoop.z), base_seed);
    if !config.quiet {
        println!(
            "Running {} shots ({} distances x {} offsets x {} powers x {} attempts, seed {})",
            jobs.len(),
            config.distances.len(),
            config.offsets.len(),
            config.powers.len(),
            config.attempts.max(1),
            base_seed
        );
    }

    init_parallel(config.parallel);
    let results = run_parallel(&jobs, |job| {
        match run_attempt(
            &tuning,
            job.spot,
            job.power,
            config.power_jitter,
            job.seed,
            config.dt,
        ) {
            Ok(result) => Some(result),
            Err(e) => {
                eprintln!("Attempt at {:?} failed: {}", job.spot, e);
                None
            }
        }
    });

    let metrics = SimMetrics::from_results(&results);

    if config.json || config.output_file.is_some() {
        match serde_json::to_string_pretty(&metrics) {
            Ok(json) => match &config.output_file {
                Some(path) => match std::fs::write(path, &json) {
                    Ok(()) => println!("Results written to {}", path),
                    Err(e) => eprintln!("Failed to write {}: {}", path, e),
                },
                None => println!("{}", json),
            },
            Err(e) => eprintln!("Failed to serialize metrics: {}", e),
        }
    }
    if !config.json {
        println!("{}", metrics.format_table());
    }

    metrics
}
