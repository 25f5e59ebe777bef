//! Task churn detection
//!
//! Task switches are recorded in a bounded window trimmed to the trailing
//! minute. The warning switches on when the window holds [`SWITCH_THRESHOLD`]
//! entries and switches off only once a full window has passed since both the
//! activation and the last switch that kept the count at the threshold.

use std::collections::VecDeque;

use chrono::{DateTime, Local, TimeDelta};
use tailwatch_core::prelude::*;
use tailwatch_core::FrequencyWarning;

/// Maximum switch timestamps retained
pub const WINDOW_CAPACITY: usize = 10;

/// Trailing window length in seconds
pub const WINDOW_SECS: i64 = 60;

/// Switches within the window that raise the warning
pub const SWITCH_THRESHOLD: usize = 5;

fn window() -> TimeDelta {
    TimeDelta::seconds(WINDOW_SECS)
}

/// Sliding-window task switch counter with hysteresis
#[derive(Debug, Clone, Default)]
pub struct FrequencyMonitor {
    switches: VecDeque<DateTime<Local>>,
    warning: FrequencyWarning,
    /// Most recent switch that left the window at or above the threshold
    last_churn_at: Option<DateTime<Local>>,
}

impl FrequencyMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a task change observed at `now`
    pub fn record_switch(&mut self, now: DateTime<Local>) {
        // Keep the window non-decreasing even if the clock steps back
        let now = match self.switches.back() {
            Some(last) if *last > now => *last,
            _ => now,
        };

        self.switches.push_back(now);
        if self.switches.len() > WINDOW_CAPACITY {
            self.switches.pop_front();
        }
        while let Some(oldest) = self.switches.front() {
            if now - *oldest > window() {
                self.switches.pop_front();
            } else {
                break;
            }
        }

        if self.switches.len() >= SWITCH_THRESHOLD {
            self.last_churn_at = Some(now);
            if !self.warning.active {
                self.warning = FrequencyWarning {
                    active: true,
                    started_at: Some(now),
                };
                warn!(
                    "Task switching too frequently: {} switches in {}s",
                    self.switches.len(),
                    WINDOW_SECS
                );
            }
        }
    }

    /// Expire the warning once the churn has been quiet for a full window
    pub fn tick(&mut self, now: DateTime<Local>) {
        if !self.warning.active {
            return;
        }
        let Some(started_at) = self.warning.started_at else {
            self.warning = FrequencyWarning::default();
            return;
        };

        let held_long_enough = now - started_at >= window();
        let quiet = self
            .last_churn_at
            .map_or(true, |last| now - last >= window());

        if held_long_enough && quiet {
            self.warning = FrequencyWarning::default();
            info!("Task switching frequency back to normal");
        }
    }

    pub fn warning(&self) -> FrequencyWarning {
        self.warning
    }

    pub fn is_active(&self) -> bool {
        self.warning.active
    }

    /// Number of switches in the window as of the last recorded switch
    pub fn switch_count(&self) -> usize {
        self.switches.len()
    }
}
