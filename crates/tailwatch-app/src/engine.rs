//! Engine - shared orchestration state for TUI and headless runners
//!
//! The Engine owns the log reader, the presentation state, the message
//! channel and the settings. Front ends feed it `Message`s and subscribe to
//! `EngineEvent`s; every tick runs synchronously on the caller's context.

use std::time::Duration;

use chrono::{DateTime, Local};
use tailwatch_core::prelude::*;
use tailwatch_reader::LogReader;
use tokio::sync::{broadcast, mpsc};

use crate::command::HotkeyCommand;
use crate::config::{Settings, StyleKind};
use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::state::{AppState, StatusSnapshot};

/// Capacity of the message and event channels
pub const CHANNEL_CAPACITY: usize = 256;

/// Orchestration engine for tailwatch.
///
/// Encapsulates all shared state between TUI and headless runners:
/// - Log reader (one tick at a time)
/// - Presentation state
/// - Message channel
/// - Settings
/// - Event broadcasting for external consumers
pub struct Engine {
    /// Presentation state
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, stdin, keys).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Loaded settings
    pub settings: Settings,

    reader: LogReader,

    /// Event broadcaster for external consumers
    event_tx: broadcast::Sender<EngineEvent>,
}

impl Engine {
    pub fn new(settings: Settings) -> Self {
        Self::new_at(settings, Local::now())
    }

    /// Construct as if the current time were `now`
    pub fn new_at(settings: Settings, now: DateTime<Local>) -> Self {
        let state = AppState::new(&settings, now);
        let reader = LogReader::new_at(
            settings.log_source(),
            state
                .style
                .reader_options(settings.source.skip_debug_log),
            now,
        );

        let (msg_tx, msg_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (event_tx, _) = broadcast::channel(CHANNEL_CAPACITY);

        info!(
            "Engine started (style: {}, source valid: {})",
            state.style_kind,
            reader.is_valid()
        );

        Self {
            state,
            msg_tx,
            msg_rx,
            settings,
            reader,
            event_tx,
        }
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind, older events are dropped
    /// (`broadcast::error::RecvError::Lagged`).
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    pub fn process_message(&mut self, msg: Message) {
        self.process_message_at(msg, Local::now());
    }

    /// Process one message as if the current time were `now`
    pub fn process_message_at(&mut self, msg: Message, now: DateTime<Local>) {
        match msg {
            Message::Tick => {
                self.tick_at(now);
            }
            Message::Command(cmd) => self.handle_command_at(cmd, now),
            Message::Quit => {
                info!("Quit requested");
                self.state.request_quit();
            }
        }
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
            if self.should_quit() {
                break;
            }
        }
        count
    }

    /// Run one refresh tick. Returns true if the frame changed.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Local::now())
    }

    pub fn tick_at(&mut self, now: DateTime<Local>) -> bool {
        let content = self.reader.get_content_at(now);
        let status = StatusSnapshot::from_reader(&self.reader);

        if !self.state.update(&content, &status, now) {
            return false;
        }
        trace!("Frame updated ({} lines)", self.state.frame.lines.len());
        self.emit(EngineEvent::FrameUpdated(self.state.frame.clone()));
        true
    }

    pub fn handle_command(&mut self, cmd: HotkeyCommand) {
        self.handle_command_at(cmd, Local::now());
    }

    fn handle_command_at(&mut self, cmd: HotkeyCommand, now: DateTime<Local>) {
        debug!("Command: {}", cmd);
        match cmd {
            HotkeyCommand::Close => self.state.request_quit(),
            HotkeyCommand::ToggleTransparent => {
                let transparent = self.state.toggle_transparent();
                info!("Transparent background: {}", transparent);
                self.emit(EngineEvent::TransparencyChanged { transparent });
            }
            HotkeyCommand::ToggleSecondStyle => {
                self.switch_style_at(self.state.style_kind.toggled(), now);
            }
        }
    }

    /// Switch display style. The reader is rebuilt with the new formatting
    /// options on the same source, then a tick renders the new frame.
    pub fn switch_style_at(&mut self, kind: StyleKind, now: DateTime<Local>) {
        let style = self.settings.style(kind);
        let options = style.reader_options(self.settings.source.skip_debug_log);
        self.reader = LogReader::new_at(self.reader.source().clone(), options, now);
        self.state.apply_style(kind, style);

        info!("Switched to {} style", kind);
        self.emit(EngineEvent::StyleChanged { style: kind });
        self.tick_at(now);
    }

    /// Interval between ticks for the active style
    pub fn refresh_interval(&self) -> Duration {
        self.state.style.refresh_interval()
    }

    pub fn reader(&self) -> &LogReader {
        &self.reader
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    pub fn shutdown(&mut self) {
        info!("Engine shutting down");
        self.state.request_quit();
        self.emit(EngineEvent::Shutdown);
    }

    /// send() fails only without receivers, which is fine
    fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(event);
    }
}
