//! Timer engine implementation.
//!
//! The timer engine is a tick-counting state machine. It does not own a
//! clock - the caller subscribes to a 1 Hz tick source while the timer is
//! running and delivers each tick via `tick()`. Pausing therefore means
//! unsubscribing the tick source and calling `pause()`.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!              \______/
//!               reset() from any state back to Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::default();
//! engine.start();
//! // Once per second:
//! for event in engine.tick() { /* render / notify */ }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Reminder cadence applied when none is configured: 25 minutes.
pub const DEFAULT_INTERVAL_SECS: u64 = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Core timer engine.
///
/// Counts whole elapsed seconds of study time and reports when a whole
/// reminder interval has passed. Elapsed time only advances through
/// `tick()` while running; skipped ticks are never made up
/// retroactively. Nothing in here can fail - inputs are pre-validated
/// at the settings boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    state: TimerState,
    elapsed_secs: u64,
    /// Reminder cadence in seconds. Always positive.
    interval_secs: u64,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL_SECS)
    }
}

impl TimerEngine {
    /// Create a new timer engine with the given reminder cadence in
    /// seconds. Zero falls back to the default cadence.
    pub fn new(interval_secs: u64) -> Self {
        Self {
            state: TimerState::Idle,
            elapsed_secs: 0,
            interval_secs: if interval_secs == 0 {
                DEFAULT_INTERVAL_SECS
            } else {
                interval_secs
            },
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }

    /// Reminder cadence in whole minutes.
    pub fn interval_minutes(&self) -> u64 {
        self.interval_secs / 60
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            elapsed_secs: self.elapsed_secs,
            interval_secs: self.interval_secs,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle | TimerState::Paused => {
                self.state = TimerState::Running;
                Some(Event::TimerStarted {
                    elapsed_secs: self.elapsed_secs,
                    at: Utc::now(),
                })
            }
            TimerState::Running => None, // Already running.
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Paused;
                Some(Event::TimerPaused {
                    elapsed_secs: self.elapsed_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Stop and zero the session, from any state.
    ///
    /// Emits `TimerReset` followed by a `Tick` carrying 0 so tick-bound
    /// displays repaint without waiting for the next second.
    pub fn reset(&mut self) -> Vec<Event> {
        self.state = TimerState::Idle;
        self.elapsed_secs = 0;
        vec![
            Event::TimerReset { at: Utc::now() },
            Event::Tick {
                elapsed_secs: 0,
                at: Utc::now(),
            },
        ]
    }

    /// Deliver one elapsed second.
    ///
    /// Returns the emitted events in order: the `Tick`, then
    /// `IntervalReached` when this tick landed exactly on an interval
    /// boundary. Does nothing unless running.
    pub fn tick(&mut self) -> Vec<Event> {
        if self.state != TimerState::Running {
            return Vec::new();
        }
        self.elapsed_secs += 1;
        let mut events = vec![Event::Tick {
            elapsed_secs: self.elapsed_secs,
            at: Utc::now(),
        }];
        if self.elapsed_secs % self.interval_secs == 0 {
            events.push(Event::IntervalReached {
                elapsed_secs: self.elapsed_secs,
                interval_secs: self.interval_secs,
                at: Utc::now(),
            });
        }
        events
    }

    /// Change the reminder cadence, in minutes.
    ///
    /// Non-positive values are silently ignored. Range limits (1-120
    /// minutes) are enforced at the settings boundary, not here.
    pub fn set_interval_minutes(&mut self, minutes: i64) {
        if minutes > 0 {
            self.interval_secs = minutes as u64 * 60;
        }
    }
}

/// Format a whole number of seconds as `HH:MM:SS`.
///
/// Minutes and seconds are zero-padded to two digits; hours grow
/// unbounded, so 360000 seconds renders as "100:00:00".
pub fn format_hms(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
