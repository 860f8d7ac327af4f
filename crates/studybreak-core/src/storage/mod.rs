mod config;

pub use config::{Config, DISTRACTION_THRESHOLD_RANGE, REMINDER_INTERVAL_RANGE};

use std::io;
use std::path::PathBuf;

/// Returns `~/.config/studybreak[-dev]/` based on STUDYBREAK_ENV.
///
/// Set STUDYBREAK_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STUDYBREAK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("studybreak-dev")
    } else {
        base_dir.join("studybreak")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
