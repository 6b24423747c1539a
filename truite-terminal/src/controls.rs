//! Keyboard bindings for the terminal host

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use truite_core::{CameraAction, KeyBindings};

/// One-shot commands triggered on key press rather than while held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleFill,
    ToggleLight,
}

/// Held down for the light background when the terminal reports releases.
pub const LIGHT_KEY: KeyCode = KeyCode::Char(' ');

/// Held-key camera movement.
///
/// A/D strafe, W/S move forward and back, Up/Down raise and lower, and
/// Right/Left or +/- change the focal length.
pub fn default_bindings() -> KeyBindings<KeyCode> {
    KeyBindings::new()
        .bind(KeyCode::Char('a'), CameraAction::Left)
        .bind(KeyCode::Char('d'), CameraAction::Right)
        .bind(KeyCode::Char('w'), CameraAction::Forward)
        .bind(KeyCode::Char('s'), CameraAction::Back)
        .bind(KeyCode::Up, CameraAction::Up)
        .bind(KeyCode::Down, CameraAction::Down)
        .bind(KeyCode::Right, CameraAction::ZoomIn)
        .bind(KeyCode::Left, CameraAction::ZoomOut)
        .bind(KeyCode::Char('+'), CameraAction::ZoomIn)
        .bind(KeyCode::Char('='), CameraAction::ZoomIn)
        .bind(KeyCode::Char('-'), CameraAction::ZoomOut)
}

/// Fold letter case so bindings work with caps lock or shift held.
pub fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

pub fn command_for(event: &KeyEvent) -> Option<Command> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    match normalize(event.code) {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('f') => Some(Command::ToggleFill),
        LIGHT_KEY => Some(Command::ToggleLight),
        _ => None,
    }
}
