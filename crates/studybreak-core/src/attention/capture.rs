//! Frame-source abstraction.
//!
//! The attention detector owns its frame source between a successful
//! `init` and `close`. Real camera backends live in the embedding
//! application; the core only sees this trait and the classified
//! acquisition errors.

use std::collections::VecDeque;

use super::frame::Frame;
use crate::error::CaptureError;

/// Periodic image source (camera, scripted replay, ...).
///
/// `grab` is called once per sampling tick and returns the most recent
/// frame, or `None` when no new frame is available yet - the detector
/// skips that tick.
pub trait FrameSource: Send {
    fn grab(&mut self) -> Option<Frame>;
}

/// Deterministic source replaying a fixed sequence of frames.
///
/// Stands in for a camera in tests and in `attention simulate`: yields
/// its frames in order and `None` once exhausted.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    frames: VecDeque<Frame>,
}

impl ScriptedSource {
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push_back(frame);
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    /// Successful acquisition of a scripted "device". Mirrors the shape
    /// of a real backend's async open call.
    pub async fn open(frames: Vec<Frame>) -> Result<Box<dyn FrameSource>, CaptureError> {
        Ok(Box::new(Self::new(frames)))
    }
}

impl FrameSource for ScriptedSource {
    fn grab(&mut self) -> Option<Frame> {
        self.frames.pop_front()
    }
}
