//! Physical key to input intent mapping

use serde::{Deserialize, Serialize};

use crate::sim::{Direction, InputEvent};

/// A key as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

/// Map a key press to an intent. Letters are case-insensitive.
pub fn map_key(key: Key) -> InputEvent {
    match key {
        Key::Enter => InputEvent::Confirm,
        Key::Escape => InputEvent::Cancel,
        Key::ArrowUp => InputEvent::Move(Direction::Up),
        Key::ArrowDown => InputEvent::Move(Direction::Down),
        Key::ArrowLeft => InputEvent::Move(Direction::Left),
        Key::ArrowRight => InputEvent::Move(Direction::Right),
        Key::Char(c) => match c.to_ascii_lowercase() {
            'w' => InputEvent::Move(Direction::Up),
            's' => InputEvent::Move(Direction::Down),
            'a' => InputEvent::Move(Direction::Left),
            'd' => InputEvent::Move(Direction::Right),
            'p' => InputEvent::PauseToggle,
            'r' => InputEvent::Reset,
            'q' => InputEvent::Quit,
            '\r' | '\n' => InputEvent::Confirm,
            '\u{1b}' => InputEvent::Cancel,
            _ => InputEvent::Other,
        },
    }
}
