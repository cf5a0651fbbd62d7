//! Key mapping from terminal events to input events.

use crate::types::InputEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to the event it stands for.
pub fn map_key_event(key: KeyEvent) -> Option<InputEvent> {
    if is_quit(key) {
        return Some(InputEvent::Quit);
    }

    match key.code {
        // Movement
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(InputEvent::MoveLeft),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(InputEvent::MoveRight),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(InputEvent::SoftDrop),

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(InputEvent::Rotate),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(InputEvent::RotateCounterclockwise),

        // Debug: skip ahead a level
        KeyCode::Char('n') | KeyCode::Char('N') => Some(InputEvent::ForceLevelUp),

        _ => None,
    }
}

/// Check if key should quit the game.
fn is_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q')
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
