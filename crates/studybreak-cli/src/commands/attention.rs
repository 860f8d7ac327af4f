use clap::Subcommand;
use studybreak_core::attention::{
    AttentionDetector, DetectorConfig, Frame, ScriptedSource, SAMPLE_INTERVAL_MS,
};
use studybreak_core::storage::Config;

// Scripted frame colors: a skin-toned block for 'p', a dark frame for
// anything else.
const SKIN: [u8; 3] = [200, 120, 90];
const DARK: [u8; 3] = [25, 25, 25];
const FRAME_SIZE: u32 = 64;

#[derive(Subcommand)]
pub enum AttentionAction {
    /// Replay a scripted presence pattern through the detector and
    /// print the resulting events
    Simulate {
        /// One character per sampled frame: 'p' person in view,
        /// anything else an empty seat
        #[arg(default_value = "pppppppppppppppppppp-----------------------------------")]
        pattern: String,
        /// Milliseconds of simulated time between samples
        #[arg(long, default_value_t = SAMPLE_INTERVAL_MS)]
        step_ms: u64,
    },
}

pub fn run(action: AttentionAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AttentionAction::Simulate { pattern, step_ms } => simulate(&pattern, step_ms),
    }
}

fn simulate(pattern: &str, step_ms: u64) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let frames: Vec<Frame> = pattern
        .chars()
        .map(|c| {
            let rgb = if c == 'p' { SKIN } else { DARK };
            Frame::solid(FRAME_SIZE, FRAME_SIZE, rgb)
        })
        .collect();
    let samples = frames.len() as u64;

    let mut detector = AttentionDetector::new(DetectorConfig::default());
    detector.set_distraction_threshold(u64::from(config.distraction_threshold));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        detector
            .init(ScriptedSource::open(frames))
            .await
            .map_err(Box::<dyn std::error::Error>::from)
    })?;
    detector.start();

    for i in 0..samples {
        for event in detector.sample(i * step_ms) {
            println!("{}", serde_json::to_string(&event)?);
        }
    }
    detector.close();
    Ok(())
}
