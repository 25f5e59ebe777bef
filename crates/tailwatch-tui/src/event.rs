//! Terminal event polling and key chords

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tailwatch_app::{HotkeyCommand, Message};
use tailwatch_core::prelude::*;

/// Upper bound on how long one poll blocks the loop
pub const POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Map a key chord to a command.
///
/// `Alt+P`, `q`, `Esc` and `Ctrl+C` close; `Alt+I` toggles the background
/// fill; `Alt+K` switches style.
pub fn key_to_command(key: KeyEvent) -> Option<HotkeyCommand> {
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char(c) if alt => match c.to_ascii_lowercase() {
            'p' => Some(HotkeyCommand::Close),
            'i' => Some(HotkeyCommand::ToggleTransparent),
            'k' => Some(HotkeyCommand::ToggleSecondStyle),
            _ => None,
        },
        KeyCode::Char('c') if ctrl => Some(HotkeyCommand::Close),
        KeyCode::Char('q') if !ctrl => Some(HotkeyCommand::Close),
        KeyCode::Esc => Some(HotkeyCommand::Close),
        _ => None,
    }
}

/// Poll for a key chord, waiting at most [`POLL_TIMEOUT`]
pub fn poll() -> Result<Option<Message>> {
    if !event::poll(POLL_TIMEOUT)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            Ok(key_to_command(key).map(Message::Command))
        }
        _ => Ok(None),
    }
}
