//! # Studybreak Core Library
//!
//! This library provides the core session-state engine for Studybreak, a
//! study/break reminder tool. All operations are available through a
//! standalone CLI binary; graphical front ends are expected to be thin
//! layers over the same core library.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-counting state machine that requires the
//!   caller to deliver one `tick()` per elapsed second while running
//! - **Attention Detector**: dual hysteresis filter over sampled camera
//!   frames, emitting presence and distraction transition events
//! - **Storage**: TOML-based configuration at `~/.config/studybreak/`
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`AttentionDetector`]: Presence/attention debouncing over frames
//! - [`Config`]: Persisted user settings
//! - [`Event`]: Typed state-change notifications returned by both engines

pub mod attention;
pub mod error;
pub mod events;
pub mod storage;
pub mod timer;

pub use attention::{
    AttentionDetector, DetectorConfig, Frame, FrameSource, ScriptedSource, SkinThresholds,
};
pub use error::{CaptureError, ConfigError, CoreError};
pub use events::Event;
pub use storage::Config;
pub use timer::{format_hms, TimerEngine, TimerState};
