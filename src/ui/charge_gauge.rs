//! Charge gauge UI components and systems

use bevy::prelude::*;

use crate::constants::*;
use crate::session::LatestSnapshot;

/// Charge gauge background component
#[derive(Component)]
pub struct ChargeGaugeBackground;

/// Charge gauge fill component
#[derive(Component)]
pub struct ChargeGaugeFill;

pub fn spawn_charge_gauge(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(24.0),
                left: Val::Percent(35.0),
                width: Val::Percent(30.0),
                height: Val::Px(14.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
            ChargeGaugeBackground,
        ))
        .with_children(|parent| {
            parent.spawn((
                Node {
                    width: Val::Percent(0.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(TEXT_ACCENT),
                ChargeGaugeFill,
            ));
        });
}

/// Update charge gauge display
pub fn update_charge_gauge(
    latest: Res<LatestSnapshot>,
    mut fill_query: Query<(&mut Node, &mut BackgroundColor), With<ChargeGaugeFill>>,
) {
    let Some(snapshot) = latest.0.as_ref() else {
        return;
    };
    let Ok((mut node, mut background)) = fill_query.single_mut() else {
        return;
    };

    let pct = snapshot.power_percent.clamp(0.0, 100.0);
    node.width = Val::Percent(if snapshot.charging { pct } else { 0.0 });

    // Dead zone shows grey, then green (low) -> red (full)
    let t = pct / 100.0;
    background.0 = if pct <= MIN_SHOT_POWER {
        Color::srgb(0.5, 0.5, 0.5)
    } else {
        Color::srgb(t * 0.9, (1.0 - t) * 0.8, 0.0)
    };
}
