//! Main TUI runner - entry point and event loop

use std::time::Instant;

use tailwatch_app::config::{Settings, StyleKind};
use tailwatch_app::{signals, Engine, Message};
use tailwatch_core::prelude::*;

use crate::theme::PanelColors;
use crate::{event, render, terminal};

/// Run the TUI until a close command or termination signal
pub async fn run(settings: Settings) -> Result<()> {
    let mut term = terminal::init()?;

    let mut engine = Engine::new(settings);
    signals::spawn_signal_handler(engine.msg_sender());

    let result = run_loop(&mut term, &mut engine);

    engine.shutdown();
    ratatui::restore();
    result
}

/// Tick on the engine's interval, drain commands, draw, poll keys.
///
/// A late tick runs once and the schedule restarts from now, so missed
/// ticks are skipped rather than queued.
fn run_loop(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine) -> Result<()> {
    let mut style_kind: StyleKind = engine.state.style_kind;
    let mut colors = PanelColors::from_style(&engine.state.style);

    engine.tick();
    let mut next_tick = Instant::now() + engine.refresh_interval();

    while !engine.should_quit() {
        engine.drain_pending_messages();

        if Instant::now() >= next_tick {
            engine.process_message(Message::Tick);
            next_tick = Instant::now() + engine.refresh_interval();
        }

        if engine.state.style_kind != style_kind {
            style_kind = engine.state.style_kind;
            colors = PanelColors::from_style(&engine.state.style);
            next_tick = Instant::now() + engine.refresh_interval();
        }

        terminal
            .draw(|frame| render::view(frame, &engine.state, &colors))
            .context("Failed to draw frame")?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    Ok(())
}
