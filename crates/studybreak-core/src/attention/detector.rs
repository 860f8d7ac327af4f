//! Presence and attention detection over sampled camera frames.
//!
//! Not a discrete state machine: two independently debounced boolean
//! signals layered on one sampling loop. Presence flips on immediately
//! at the first positive frame but off only after a full run of
//! negative frames; distraction requires a continuous look-away streak
//! to outlast a wall-clock threshold. The enter (0.1) and exit (0.05)
//! skin-ratio limits differ on purpose - the gap is a deadband that
//! keeps the output from flickering between "nobody there" and
//! "looking away" near the boundary.

use std::collections::VecDeque;
use std::future::Future;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::capture::FrameSource;
use super::frame::{region_metrics, Frame, SkinThresholds};
use crate::error::CaptureError;
use crate::events::Event;

/// Sampling cadence the embedding application should drive `sample`
/// at, in milliseconds. 10 Hz trades CPU cost against responsiveness;
/// anything in the 5-15 Hz band keeps the absence debounce in the low
/// single-digit seconds.
pub const SAMPLE_INTERVAL_MS: u64 = 100;

/// Tuning knobs for the detector, passed to the constructor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Skin ratio above which a frame counts as "person in view".
    pub presence_ratio: f64,
    /// Skin ratio below which a frame counts as "looking away".
    pub lookaway_ratio: f64,
    /// Consecutive negative samples tolerated before presence drops.
    pub no_face_threshold: u32,
    /// Continuous look-away time before a `Distracted` event, in ms.
    pub distraction_threshold_ms: u64,
    /// Brightness samples retained for smoothing.
    pub history_size: usize,
    pub skin: SkinThresholds,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            presence_ratio: 0.1,
            lookaway_ratio: 0.05,
            no_face_threshold: 30,
            distraction_threshold_ms: 5_000,
            history_size: 10,
            skin: SkinThresholds::default(),
        }
    }
}

/// Presence/attention detector.
///
/// Owns the frame source between a successful [`init`](Self::init) and
/// [`close`](Self::close). The caller drives the sampling loop,
/// invoking [`sample`](Self::sample) at a fixed cadence (see
/// [`SAMPLE_INTERVAL_MS`]) with its own clock; transition events come
/// back as return values.
pub struct AttentionDetector {
    config: DetectorConfig,
    source: Option<Box<dyn FrameSource>>,
    running: bool,
    person_present: bool,
    distracted: bool,
    /// Consecutive presence-negative samples seen while present.
    absence_streak: u32,
    /// Onset of the current look-away streak, caller-clock ms.
    lookaway_since_ms: Option<u64>,
    /// Last `history_size` brightness samples, oldest first.
    brightness_history: VecDeque<f64>,
    last_brightness: f64,
    /// Absolute brightness change between the two latest samples. Fed
    /// by every sample as a cheap motion cue; nothing gates on it yet.
    motion_delta: f64,
}

impl AttentionDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            brightness_history: VecDeque::with_capacity(config.history_size),
            config,
            source: None,
            running: false,
            person_present: false,
            distracted: false,
            absence_streak: 0,
            lookaway_since_ms: None,
            last_brightness: 0.0,
            motion_delta: 0.0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Whether a frame source has been acquired.
    pub fn is_ready(&self) -> bool {
        self.source.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn person_present(&self) -> bool {
        self.person_present
    }

    /// Never true while nobody is present.
    pub fn is_distracted(&self) -> bool {
        self.distracted
    }

    pub fn brightness_history(&self) -> &VecDeque<f64> {
        &self.brightness_history
    }

    /// Mean over the retained brightness history, 0.0 when empty.
    pub fn mean_brightness(&self) -> f64 {
        if self.brightness_history.is_empty() {
            return 0.0;
        }
        self.brightness_history.iter().sum::<f64>() / self.brightness_history.len() as f64
    }

    pub fn motion_delta(&self) -> f64 {
        self.motion_delta
    }

    // ── Configuration ────────────────────────────────────────────────

    /// Store a new distraction threshold, in seconds.
    ///
    /// No range check here; the settings boundary enforces 3-30 s
    /// before values reach this call.
    pub fn set_distraction_threshold(&mut self, seconds: u64) {
        self.config.distraction_threshold_ms = seconds * 1000;
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Acquire the frame source.
    ///
    /// `open` is the host's acquisition future; negotiating camera
    /// permission may suspend for an arbitrary time and no timeout is
    /// imposed here. On error the detector holds no resource and stays
    /// stopped - the error arrives already classified and its display
    /// string is the user-facing cause. A second successful `init`
    /// replaces (and thereby releases) the previous source.
    pub async fn init(
        &mut self,
        open: impl Future<Output = Result<Box<dyn FrameSource>, CaptureError>>,
    ) -> Result<(), CaptureError> {
        let source = open.await?;
        self.source = Some(source);
        Ok(())
    }

    /// Begin sampling. Idempotent; does nothing before a successful
    /// `init`.
    pub fn start(&mut self) {
        if self.source.is_some() {
            self.running = true;
        }
    }

    /// Halt sampling but keep the acquired source. No sample is
    /// processed after this returns.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Halt sampling and release the frame source. Idempotent.
    pub fn close(&mut self) {
        self.running = false;
        self.source = None;
    }

    // ── Sampling ─────────────────────────────────────────────────────

    /// One sampling tick: grab a frame from the source and run both
    /// debounces. `now_ms` is the caller's clock in milliseconds; it
    /// only feeds the look-away streak timing. Ticks without a fresh
    /// frame, or while stopped, produce nothing.
    pub fn sample(&mut self, now_ms: u64) -> Vec<Event> {
        if !self.running {
            return Vec::new();
        }
        let Some(frame) = self.source.as_mut().and_then(|s| s.grab()) else {
            return Vec::new();
        };
        self.observe(&frame, now_ms)
    }

    /// Process one frame. Split out from [`sample`](Self::sample) so a
    /// frame can be fed directly, without going through a source.
    pub fn observe(&mut self, frame: &Frame, now_ms: u64) -> Vec<Event> {
        let metrics = region_metrics(frame, &self.config.skin);
        let mut events = Vec::new();

        // Presence: enters immediately, leaves only after a full run of
        // negative samples. Any positive sample cancels an in-progress
        // absence streak.
        let has_person_now = metrics.skin_ratio > self.config.presence_ratio;
        if has_person_now {
            self.absence_streak = 0;
            if !self.person_present {
                self.person_present = true;
                events.push(Event::PersonDetected { at: Utc::now() });
            }
        } else if self.person_present {
            self.absence_streak += 1;
            if self.absence_streak > self.config.no_face_threshold {
                self.person_present = false;
                self.absence_streak = 0;
                // An empty chair is not a distraction: drop the flag
                // without a Focused event.
                self.distracted = false;
                self.lookaway_since_ms = None;
                events.push(Event::PersonLeft { at: Utc::now() });
            }
        }

        // Brightness history updates on every sample, present or not.
        self.motion_delta = (metrics.brightness - self.last_brightness).abs();
        self.last_brightness = metrics.brightness;
        self.brightness_history.push_back(metrics.brightness);
        while self.brightness_history.len() > self.config.history_size {
            self.brightness_history.pop_front();
        }

        // Distraction only means anything while someone is there.
        if self.person_present {
            let looking_away = metrics.skin_ratio < self.config.lookaway_ratio;
            if looking_away {
                if !self.distracted {
                    match self.lookaway_since_ms {
                        None => self.lookaway_since_ms = Some(now_ms),
                        Some(since)
                            if now_ms.saturating_sub(since)
                                > self.config.distraction_threshold_ms =>
                        {
                            self.distracted = true;
                            events.push(Event::Distracted {
                                looked_away_ms: now_ms.saturating_sub(since),
                                at: Utc::now(),
                            });
                        }
                        Some(_) => {}
                    }
                }
            } else {
                self.lookaway_since_ms = None;
                if self.distracted {
                    self.distracted = false;
                    events.push(Event::Focused { at: Utc::now() });
                }
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attention::capture::ScriptedSource;

    const SKIN: [u8; 3] = [200, 120, 90];
    const DARK: [u8; 3] = [25, 25, 25];

    fn skin_frame() -> Frame {
        Frame::solid(16, 16, SKIN)
    }

    fn empty_frame() -> Frame {
        Frame::solid(16, 16, DARK)
    }

    /// 16x16 frame whose central region sits inside the deadband:
    /// some skin pixels, but fewer than the presence threshold and
    /// more than the look-away threshold.
    fn deadband_frame() -> Frame {
        let mut frame = empty_frame();
        // Central region is x,y in 4..12 => 64 pixels; 5 skin pixels
        // is a ratio of 0.078.
        for x in 4..9u32 {
            let idx = ((4 * 16 + x) * 4) as usize;
            frame.data[idx] = SKIN[0];
            frame.data[idx + 1] = SKIN[1];
            frame.data[idx + 2] = SKIN[2];
        }
        frame
    }

    fn names(events: &[Event]) -> Vec<&'static str> {
        events
            .iter()
            .map(|e| match e {
                Event::PersonDetected { .. } => "detected",
                Event::PersonLeft { .. } => "left",
                Event::Distracted { .. } => "distracted",
                Event::Focused { .. } => "focused",
                _ => "other",
            })
            .collect()
    }

    /// Detector with a huge absence tolerance, so distraction timing
    /// can be exercised in isolation.
    fn patient_detector() -> AttentionDetector {
        AttentionDetector::new(DetectorConfig {
            no_face_threshold: 1_000_000,
            ..DetectorConfig::default()
        })
    }

    #[test]
    fn person_detected_immediately_on_positive_frame() {
        let mut det = AttentionDetector::new(DetectorConfig::default());
        let events = det.observe(&skin_frame(), 0);
        assert_eq!(names(&events), ["detected"]);
        assert!(det.person_present());
        // No duplicate on the next positive frame.
        assert!(det.observe(&skin_frame(), 100).is_empty());
    }

    #[test]
    fn absence_flips_only_after_full_negative_run() {
        let mut det = AttentionDetector::new(DetectorConfig::default());
        det.observe(&skin_frame(), 0);

        // 30 consecutive negative samples: still present.
        for i in 1..=30u64 {
            let events = det.observe(&empty_frame(), i * 100);
            assert!(events.is_empty(), "flipped early at sample {i}");
        }
        assert!(det.person_present());

        // The 31st flips.
        let events = det.observe(&empty_frame(), 3100);
        assert_eq!(names(&events), ["left"]);
        assert!(!det.person_present());
    }

    #[test]
    fn positive_sample_cancels_absence_streak() {
        let mut det = AttentionDetector::new(DetectorConfig::default());
        det.observe(&skin_frame(), 0);

        for i in 1..=25u64 {
            det.observe(&empty_frame(), i * 100);
        }
        // One positive sample resets the count...
        det.observe(&skin_frame(), 2600);
        // ...so another 30 negatives still do not flip.
        for i in 27..=56u64 {
            assert!(det.observe(&empty_frame(), i * 100).is_empty());
        }
        assert!(det.person_present());
        assert_eq!(names(&det.observe(&empty_frame(), 5700)), ["left"]);
    }

    #[test]
    fn distraction_respects_threshold_timing() {
        let mut det = patient_detector();
        det.observe(&skin_frame(), 0);

        // First look-away sample records the onset, nothing more.
        assert!(det.observe(&empty_frame(), 1_000).is_empty());
        // threshold - 1 ms into the streak: too early.
        assert!(det.observe(&empty_frame(), 5_999).is_empty());
        // Exactly threshold: still not strictly beyond it.
        assert!(det.observe(&empty_frame(), 6_000).is_empty());
        // Beyond the threshold: exactly one Distracted.
        let events = det.observe(&empty_frame(), 6_001);
        assert_eq!(names(&events), ["distracted"]);
        match &events[0] {
            Event::Distracted { looked_away_ms, .. } => assert_eq!(*looked_away_ms, 5_001),
            _ => unreachable!(),
        }
        assert!(det.is_distracted());

        // No re-fire while the streak continues.
        assert!(det.observe(&empty_frame(), 7_000).is_empty());

        // A single non-look-away sample clears it with one Focused.
        let events = det.observe(&skin_frame(), 7_100);
        assert_eq!(names(&events), ["focused"]);
        assert!(!det.is_distracted());
    }

    #[test]
    fn lookaway_streak_resets_when_attention_returns_early() {
        let mut det = patient_detector();
        det.observe(&skin_frame(), 0);

        det.observe(&empty_frame(), 1_000); // onset
        det.observe(&skin_frame(), 4_000); // streak broken, no event
        // New streak must run the full threshold again.
        assert!(det.observe(&empty_frame(), 4_100).is_empty());
        assert!(det.observe(&empty_frame(), 9_000).is_empty());
        assert_eq!(names(&det.observe(&empty_frame(), 9_200)), ["distracted"]);
    }

    #[test]
    fn deadband_frame_breaks_lookaway_but_not_presence() {
        let mut det = patient_detector();
        det.observe(&skin_frame(), 0);

        // Start a look-away streak, then hit the deadband: the streak
        // clears without any event, and presence stays up.
        det.observe(&empty_frame(), 1_000);
        let events = det.observe(&deadband_frame(), 4_000);
        assert!(events.is_empty());
        assert!(det.person_present());

        // Deadband alone never produces a distraction, no matter how
        // long it lasts.
        for i in 0..200u64 {
            assert!(det.observe(&deadband_frame(), 5_000 + i * 100).is_empty());
        }
    }

    #[test]
    fn person_left_clears_distraction_silently() {
        let mut det = AttentionDetector::new(DetectorConfig {
            distraction_threshold_ms: 500,
            ..DetectorConfig::default()
        });
        det.observe(&skin_frame(), 0);

        // Distracted after ~6 look-away samples at 10 Hz.
        let mut distraction_seen = false;
        let mut left_events = Vec::new();
        for i in 1..=31u64 {
            let events = det.observe(&empty_frame(), i * 100);
            for name in names(&events) {
                match name {
                    "distracted" => distraction_seen = true,
                    "left" => left_events.push(i),
                    "focused" => panic!("Focused must not fire for an empty chair"),
                    _ => {}
                }
            }
        }
        assert!(distraction_seen);
        assert_eq!(left_events, [31]);
        assert!(!det.is_distracted());
        assert!(!det.person_present());
    }

    #[test]
    fn brightness_history_is_bounded_and_updates_while_absent() {
        let mut det = AttentionDetector::new(DetectorConfig::default());
        for i in 0..15u64 {
            det.observe(&empty_frame(), i * 100);
        }
        assert_eq!(det.brightness_history().len(), 10);
        assert!((det.mean_brightness() - 25.0).abs() < 1e-9);

        det.observe(&skin_frame(), 1_600);
        assert_eq!(det.brightness_history().len(), 10);
        assert!(det.motion_delta() > 0.0);
    }

    #[test]
    fn set_distraction_threshold_stores_milliseconds() {
        let mut det = patient_detector();
        det.set_distraction_threshold(3);
        det.observe(&skin_frame(), 0);
        det.observe(&empty_frame(), 100);
        assert!(det.observe(&empty_frame(), 3_100).is_empty());
        assert_eq!(names(&det.observe(&empty_frame(), 3_101)), ["distracted"]);
    }

    #[tokio::test]
    async fn lifecycle_gates_sampling_on_init_and_running() {
        let mut det = AttentionDetector::new(DetectorConfig::default());

        // Not initialized: start is a no-op and sample yields nothing.
        det.start();
        assert!(!det.is_running());
        assert!(det.sample(0).is_empty());

        det.init(ScriptedSource::open(vec![skin_frame(), skin_frame()]))
            .await
            .unwrap();
        assert!(det.is_ready());

        // Initialized but not started: frames stay untouched.
        assert!(det.sample(0).is_empty());

        det.start();
        det.start(); // idempotent
        assert_eq!(names(&det.sample(100)), ["detected"]);

        // Stop keeps the source; no sample is processed after return.
        det.stop();
        assert!(det.sample(200).is_empty());
        assert!(det.is_ready());

        det.close();
        det.close(); // idempotent
        assert!(!det.is_ready());
        assert!(!det.is_running());
    }

    #[tokio::test]
    async fn failed_init_leaves_detector_unstarted_and_resource_free() {
        let mut det = AttentionDetector::new(DetectorConfig::default());
        let err = det
            .init(async { Err::<Box<dyn FrameSource>, _>(CaptureError::PermissionDenied) })
            .await
            .unwrap_err();
        assert_eq!(err, CaptureError::PermissionDenied);
        assert!(!det.is_ready());

        det.start();
        assert!(!det.is_running());
        assert!(det.sample(0).is_empty());
    }

    #[tokio::test]
    async fn sample_skips_ticks_without_a_fresh_frame() {
        let mut det = AttentionDetector::new(DetectorConfig::default());
        det.init(ScriptedSource::open(vec![skin_frame()]))
            .await
            .unwrap();
        det.start();
        assert_eq!(names(&det.sample(0)), ["detected"]);
        // Source exhausted: ticks pass through without state changes.
        assert!(det.sample(100).is_empty());
        assert!(det.person_present());
    }
}
