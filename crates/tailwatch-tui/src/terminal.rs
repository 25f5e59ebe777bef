//! Terminal setup and restoration

use ratatui::DefaultTerminal;
use tailwatch_core::prelude::*;

/// Enter raw mode and the alternate screen.
///
/// The panic hook restores the terminal first so a crash report is readable.
pub fn init() -> Result<DefaultTerminal> {
    install_panic_hook();
    ratatui::try_init().map_err(|e| Error::TerminalInit(e.to_string()))
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        previous(info);
    }));
}
