//! Input module - device capture feeding the session's InputAggregator

mod aggregator;

pub use aggregator::*;

use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::session::ActiveSession;

/// On-screen joystick travel (pixels) for full deflection
pub const TOUCH_STICK_RADIUS: f32 = 60.0;

/// Runs in Update to capture device state before it's cleared.
/// The session samples the aggregator once per fixed tick, so edges that
/// happen between ticks are buffered rather than lost.
pub fn capture_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    gamepads: Query<&Gamepad>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut session: ResMut<ActiveSession>,
) {
    let input = session.0.aggregator_mut();

    let Ok(window) = windows.single() else {
        return;
    };
    if !window.focused {
        input.release_all();
        return;
    }

    // Keyboard: WASD / arrows to move, Space to charge
    let held = |a: KeyCode, b: KeyCode| keyboard.pressed(a) || keyboard.pressed(b);
    input.set_direction(Direction::Left, held(KeyCode::KeyA, KeyCode::ArrowLeft));
    input.set_direction(Direction::Right, held(KeyCode::KeyD, KeyCode::ArrowRight));
    input.set_direction(Direction::Forward, held(KeyCode::KeyW, KeyCode::ArrowUp));
    input.set_direction(Direction::Back, held(KeyCode::KeyS, KeyCode::ArrowDown));
    input.set_charge(ChargeSource::Keyboard, keyboard.pressed(KeyCode::Space));

    // Gamepad: left stick + South or right trigger. Stick up drives toward the hoop.
    let mut stick = Vec2::ZERO;
    let mut pad_charge = false;
    for gamepad in &gamepads {
        let x = gamepad.get(GamepadAxis::LeftStickX).unwrap_or(0.0);
        let y = gamepad.get(GamepadAxis::LeftStickY).unwrap_or(0.0);
        if stick == Vec2::ZERO {
            stick = Vec2::new(x, -y);
        }
        pad_charge |= gamepad.pressed(GamepadButton::South)
            || gamepad.pressed(GamepadButton::RightTrigger);
    }
    input.set_stick(StickSource::Gamepad, stick);
    input.set_charge(ChargeSource::Gamepad, pad_charge);

    input.set_charge(ChargeSource::Mouse, mouse.pressed(MouseButton::Left));

    // Touch: left half of the screen is a virtual stick, right half the shoot button
    let half_width = window.width() * 0.5;
    let mut touch_stick = Vec2::ZERO;
    let mut button_held = false;
    for touch in touches.iter() {
        if touch.start_position().x < half_width {
            let drag = touch.position() - touch.start_position();
            touch_stick = drag / TOUCH_STICK_RADIUS;
        } else {
            button_held = true;
        }
    }
    input.set_stick(StickSource::Touch, touch_stick);
    input.set_charge(ChargeSource::ScreenButton, button_held);
}
