//! HUD components and systems (score/clock display)

use bevy::prelude::*;

use crate::constants::*;
use crate::session::LatestSnapshot;

/// Score, shot clock and combo text
#[derive(Component)]
pub struct ScoreClockText;

/// Transient banner (basket / violation)
#[derive(Component)]
pub struct BannerText;

pub fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 28.0,
            ..default()
        },
        TextColor(TEXT_PRIMARY),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(16.0),
            ..default()
        },
        ScoreClockText,
    ));

    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 56.0,
            ..default()
        },
        TextColor(TEXT_ACCENT),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Percent(30.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        BannerText,
    ));
}

/// Update score and clock display
pub fn update_score_clock_text(
    latest: Res<LatestSnapshot>,
    mut text_query: Query<(&mut Text, &mut TextColor), With<ScoreClockText>>,
) {
    let Some(snapshot) = latest.0.as_ref() else {
        return;
    };
    let Ok((mut text, mut color)) = text_query.single_mut() else {
        return;
    };

    text.0 = if snapshot.combo >= COMBO_THRESHOLD {
        format!(
            "Score {}  |  Shot clock {:>4.1}  |  Combo x{}",
            snapshot.score, snapshot.shot_clock, snapshot.combo
        )
    } else {
        format!(
            "Score {}  |  Shot clock {:>4.1}",
            snapshot.score, snapshot.shot_clock
        )
    };
    // Last five seconds in red
    color.0 = if snapshot.shot_clock <= 5.0 && !snapshot.paused {
        TEXT_ALERT
    } else {
        TEXT_PRIMARY
    };
}

pub fn update_banner(
    latest: Res<LatestSnapshot>,
    mut banner_query: Query<(&mut Text, &mut TextColor), With<BannerText>>,
) {
    let Some(snapshot) = latest.0.as_ref() else {
        return;
    };
    let Ok((mut text, mut color)) = banner_query.single_mut() else {
        return;
    };

    let (message, tint) = if snapshot.goal_effect {
        ("BUCKET!", TEXT_ACCENT)
    } else if snapshot.violation {
        ("SHOT CLOCK", TEXT_ALERT)
    } else {
        ("", TEXT_PRIMARY)
    };
    if text.0 != message {
        text.0 = message.to_string();
    }
    color.0 = tint;
}
