//! Disk round-trip tests for the settings blob.
//!
//! Runs against a throwaway HOME so the developer's real settings are
//! never touched. Kept to a single test function because HOME is
//! process-global state.

use studybreak_core::Config;

#[test]
fn save_load_and_corrupt_file_recovery() {
    let home = tempfile::tempdir().unwrap();
    std::env::set_var("HOME", home.path());
    std::env::set_var("STUDYBREAK_ENV", "dev");

    // Nothing on disk yet: defaults.
    let mut cfg = Config::load_or_default();
    assert_eq!(cfg, Config::default());

    // The validated save path persists and survives a reload.
    cfg.set("reminder_interval", "45").unwrap();
    cfg.set("auto_mode", "true").unwrap();
    let reloaded = Config::load_or_default();
    assert_eq!(reloaded.reminder_interval, 45);
    assert!(reloaded.auto_mode);

    // Out-of-range and unknown-key writes leave the file untouched.
    assert!(cfg.set("reminder_interval", "500").is_err());
    assert!(cfg.set("theme", "dark").is_err());
    assert_eq!(Config::load_or_default().reminder_interval, 45);

    // A corrupt file degrades to defaults instead of crashing, and the
    // next save overwrites it.
    let path = Config::path().unwrap();
    std::fs::write(&path, "reminder_interval = [definitely not toml").unwrap();
    let mut recovered = Config::load_or_default();
    assert_eq!(recovered, Config::default());
    recovered.set("distraction_threshold", "10").unwrap();
    assert_eq!(Config::load_or_default().distraction_threshold, 10);
}
