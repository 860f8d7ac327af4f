mod engine;

pub use engine::{format_hms, TimerEngine, TimerState, DEFAULT_INTERVAL_SECS};
