//! Core error types for studybreak-core.
//!
//! This module defines the error hierarchy using thiserror. The timer
//! engine has no error channel at all; everything that can fail lives in
//! configuration storage or frame-source acquisition.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studybreak-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Frame-source acquisition errors
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Frame-source acquisition errors.
///
/// Host camera APIs report failure in platform-specific shapes; backends
/// classify them into this closed taxonomy before they reach callers. The
/// `Display` messages are the user-facing cause strings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The user (or platform policy) refused camera access
    #[error("camera permission denied")]
    PermissionDenied,

    /// No capture device is attached
    #[error("no camera device found")]
    DeviceNotFound,

    /// The device exists but another application holds it
    #[error("camera is in use by another application")]
    DeviceBusy,

    /// Anything the taxonomy cannot name
    #[error("camera error: {0}")]
    Other(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
