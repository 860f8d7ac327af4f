use clap::Subcommand;
use studybreak_core::storage::Config;
use studybreak_core::timer::{format_hms, TimerEngine};
use studybreak_core::Event;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a live study session, printing events as JSON lines
    Run {
        /// Reminder interval in minutes (overrides the stored config)
        #[arg(long)]
        interval: Option<i64>,
        /// Stop after this many elapsed seconds (runs until killed otherwise)
        #[arg(long)]
        seconds: Option<u64>,
    },
    /// Render elapsed seconds as HH:MM:SS
    Format { seconds: u64 },
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run { interval, seconds } => run_session(interval, seconds),
        TimerAction::Format { seconds } => {
            println!("{}", format_hms(seconds));
            Ok(())
        }
    }
}

fn emit(event: &Event, sound_enabled: bool) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(event)?);
    if sound_enabled && matches!(event, Event::IntervalReached { .. }) {
        // Terminal bell stands in for the reminder chime.
        print!("\x07");
    }
    Ok(())
}

fn run_session(
    interval: Option<i64>,
    seconds: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut engine = TimerEngine::new(u64::from(config.reminder_interval) * 60);
    if let Some(minutes) = interval {
        engine.set_interval_minutes(minutes);
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        if let Some(event) = engine.start() {
            emit(&event, config.sound_enabled)?;
        }
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(1));
        ticker.tick().await; // first tick completes immediately
        loop {
            ticker.tick().await;
            for event in engine.tick() {
                emit(&event, config.sound_enabled)?;
            }
            if seconds.is_some_and(|limit| engine.elapsed_secs() >= limit) {
                return Ok(());
            }
        }
    })
}
