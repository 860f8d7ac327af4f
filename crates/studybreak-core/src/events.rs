use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerState;

/// Every state change in the system produces an Event.
///
/// Engines return events from their mutating calls rather than invoking
/// registered callbacks; the embedding application polls and decides how
/// to fan events out (print, notify, forward to a GUI).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// One second of study time elapsed. Also emitted with 0 by
    /// `reset()` so displays bound to ticks repaint immediately.
    Tick {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    /// Elapsed study time crossed a whole reminder interval.
    IntervalReached {
        elapsed_secs: u64,
        interval_secs: u64,
        at: DateTime<Utc>,
    },
    /// A person appeared in front of the camera.
    PersonDetected {
        at: DateTime<Utc>,
    },
    /// Nobody seen for the full absence debounce window.
    PersonLeft {
        at: DateTime<Utc>,
    },
    /// Continuous look-away outlasted the distraction threshold.
    Distracted {
        looked_away_ms: u64,
        at: DateTime<Utc>,
    },
    /// Attention returned after a distraction.
    Focused {
        at: DateTime<Utc>,
    },
    /// Full timer state, for status-style output.
    StateSnapshot {
        state: TimerState,
        elapsed_secs: u64,
        interval_secs: u64,
        at: DateTime<Utc>,
    },
}
