/*!
 * Error types for the scrollcast application.
 *
 * This module contains custom error types for the different layers of the
 * pipeline, using the thiserror crate for ergonomic error definitions.
 *
 * Several failure modes are recovered locally and never surface as one of
 * these types: a missing duration knob falls back to a documented default,
 * empty input produces an empty timeline, malformed playback timing falls back
 * to a constant duration, and an out-of-range dispatch index is a no-op.
 */

use thiserror::Error;

/// Errors that can occur while resolving styles and computing timings
#[derive(Error, Debug)]
pub enum TimingError {
    /// The style selector does not name a known style or strategy
    #[error("Unknown animation style: {0}")]
    UnknownStyle(String),

    /// A duration knob holds a value that cannot be a duration
    #[error("Invalid value for {knob}: {value}")]
    InvalidKnob {
        /// Knob name as written in the configuration
        knob: &'static str,
        /// Offending value in seconds
        value: f64,
    },
}

/// Errors that can occur when reading back a subtitle document
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// A timestamp is not in `H:MM:SS.CC` form
    #[error("Invalid timestamp format: {0}")]
    InvalidTimestamp(String),

    /// A `Dialogue:` line does not have the ten expected fields
    #[error("Malformed dialogue line: {0}")]
    MalformedDialogue(String),
}

/// Errors that can occur while driving the playback scheduler
#[derive(Error, Debug, PartialEq)]
pub enum PlaybackError {
    /// `start()` was called before any entries were loaded
    #[error("No timeline loaded")]
    NothingLoaded,

    /// `start()` was called from a state that cannot start
    #[error("Cannot start playback from state {0}")]
    InvalidState(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in the configuration file
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from timing computation
    #[error("Timing error: {0}")]
    Timing(#[from] TimingError),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from playback
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),
}

// Utility functions for error conversion
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Config(error.to_string())
    }
}
