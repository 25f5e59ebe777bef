//! Headless mode runner - tick loop without a terminal
//!
//! Ticks on the active style's refresh interval, applies commands read from
//! stdin or signals between ticks and forwards engine events as NDJSON.

use std::io::BufRead;
use std::time::Duration;

use tailwatch_app::config::Settings;
use tailwatch_app::{signals, Engine, EngineEvent, HotkeyCommand, Message};
use tailwatch_core::prelude::*;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{Interval, MissedTickBehavior};

use super::HeadlessEvent;

/// Run in headless mode until `close`, a signal or a closed channel
pub async fn run_headless(settings: Settings) -> Result<()> {
    info!("tailwatch starting in HEADLESS mode");

    let mut engine = Engine::new(settings);
    let mut events = engine.subscribe();

    signals::spawn_signal_handler(engine.msg_sender());

    // Stdin blocks, so it gets its own thread
    let stdin_tx = engine.msg_sender();
    std::thread::spawn(move || {
        read_commands(std::io::stdin().lock(), stdin_tx);
    });

    HeadlessEvent::started(engine.state.style_kind, engine.reader().is_valid()).emit();

    let result = headless_event_loop(&mut engine, &mut events).await;

    engine.shutdown();
    HeadlessEvent::stopped().emit();

    info!("tailwatch headless mode exiting");
    result
}

/// Main headless event loop
async fn headless_event_loop(
    engine: &mut Engine,
    events: &mut broadcast::Receiver<EngineEvent>,
) -> Result<()> {
    let mut ticker = new_ticker(engine.refresh_interval());

    while !engine.should_quit() {
        tokio::select! {
            _ = ticker.tick() => engine.process_message(Message::Tick),
            msg = engine.msg_rx.recv() => match msg {
                Some(msg) => engine.process_message(msg),
                None => {
                    info!("Message channel closed");
                    break;
                }
            },
        }

        for event in drain_events(events) {
            event.emit();
        }

        // A style switch changes the refresh interval
        if ticker.period() != engine.refresh_interval() {
            ticker = new_ticker(engine.refresh_interval());
        }
    }

    Ok(())
}

/// Interval that skips missed ticks instead of bursting to catch up
fn new_ticker(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

/// Collect pending engine events as headless events
fn drain_events(events: &mut broadcast::Receiver<EngineEvent>) -> Vec<HeadlessEvent> {
    let mut out = Vec::new();
    loop {
        match events.try_recv() {
            Ok(event) => {
                trace!("Engine event: {}", event.event_type());
                out.extend(HeadlessEvent::from_engine_event(&event));
            }
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!("Headless output lagged, {} events dropped", skipped);
            }
            Err(_) => break,
        }
    }
    out
}

/// Read command names line by line and forward them (blocking)
fn read_commands<R: BufRead>(reader: R, msg_tx: mpsc::Sender<Message>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };

        let name = line.trim();
        if name.is_empty() {
            continue;
        }

        match HotkeyCommand::from_name(name) {
            Some(cmd) => {
                info!("Stdin: {}", cmd);
                if msg_tx.blocking_send(Message::Command(cmd)).is_err() {
                    break;
                }
                if cmd == HotkeyCommand::Close {
                    break;
                }
            }
            None => warn!("Unknown stdin command: {}", name),
        }
    }

    debug!("Stdin reader exiting");
}
