mod capture;
mod detector;
mod frame;

pub use capture::{FrameSource, ScriptedSource};
pub use detector::{AttentionDetector, DetectorConfig, SAMPLE_INTERVAL_MS};
pub use frame::{region_metrics, Frame, RegionMetrics, SkinThresholds};
