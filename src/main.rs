//! Hoopshot - single-ball arcade basketball built with Bevy
//!
//! Main entry point: app setup and system registration.

use bevy::log::LogPlugin;
use bevy::prelude::*;
use hoopshot::debug_logging::DebugLogConfig;
use hoopshot::{
    ActiveSession, ConfigWatcher, GameSession, GameplayTuning, KinematicWorld, LatestSnapshot,
    config_watcher, constants::*, input, session, ui, world,
};

/// Simulation rate; the session advances once per fixed step
const TICK_HZ: f64 = 60.0;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let debug_config = DebugLogConfig::load_with_args(&args);

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Hoopshot".into(),
                    ..default()
                }),
                ..default()
            })
            .set(LogPlugin {
                level: debug_config.level(),
                filter: debug_config.filter(),
                ..default()
            }),
    );

    // Write the defaults out once so there is a file to hot-edit
    if !std::path::Path::new(GAMEPLAY_TUNING_FILE).exists() {
        if let Err(e) = GameplayTuning::default().save(GAMEPLAY_TUNING_FILE) {
            warn!("Could not write default tuning: {}", e);
        }
    }
    let tuning = GameplayTuning::load_or_default(GAMEPLAY_TUNING_FILE);
    let game = match GameSession::new(tuning, KinematicWorld::default()) {
        Ok(game) => game,
        Err(e) => {
            error!("Could not start a session: {}", e);
            std::process::exit(1);
        }
    };

    app.insert_resource(ClearColor(BACKGROUND_COLOR))
        .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
        .insert_resource(ActiveSession(game))
        .insert_resource(ConfigWatcher::new(GAMEPLAY_TUNING_FILE))
        .init_resource::<LatestSnapshot>()
        .add_systems(
            Startup,
            (world::spawn_court, ui::spawn_hud, ui::spawn_charge_gauge),
        )
        // Device capture must land before the next fixed tick samples it
        .add_systems(Update, input::capture_input)
        .add_systems(FixedUpdate, session::tick_session)
        .add_systems(
            Update,
            (
                session::dispatch_events,
                session::sync_ball_visual,
                session::restart_match,
                ui::update_score_clock_text,
                ui::update_banner,
                ui::update_charge_gauge,
                config_watcher::check_config_changes,
            )
                .after(input::capture_input),
        )
        .run();
}
