//! Message types for the engine loop

use crate::command::HotkeyCommand;

/// Everything the engine reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Refresh interval elapsed
    Tick,

    /// A named command from a key chord or stdin
    Command(HotkeyCommand),

    /// Request to quit the application (OS signal)
    Quit,
}

impl From<HotkeyCommand> for Message {
    fn from(cmd: HotkeyCommand) -> Self {
        Message::Command(cmd)
    }
}
