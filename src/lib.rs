/*!
 * # scrollcast - animated text timelines
 *
 * A Rust library that turns plain text into timed animation data, writes it
 * as an ASS subtitle document and replays the same timing in real time.
 *
 * ## Features
 *
 * - Split text into paragraphs, lines, words or characters
 * - Time every unit under one of several animation styles:
 *   - Typewriter fade and typewriter pop (per-character reveal)
 *   - Railway scroll (fade in, hold, fade out)
 *   - Simple role, revolver up and horizontal ticker (continuous passthrough)
 * - Emit ASS (v4.00+) documents with per-style animation tags
 * - Replay timelines through a single-clock scheduler
 * - Configurable per-style timing presets with overrides
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `text`: Document model and plain-text segmentation
 * - `timing`: Duration strategies and timeline construction:
 *   - `timing::config`: Duration knobs, presets and defaults
 *   - `timing::strategy`: Per-style duration algorithms
 *   - `timing::timeline`: Sequencing units on one clock
 * - `styles`: Named animation styles
 * - `subtitle`: ASS writing, reading and inspection
 * - `playback`: Clock, renderer contract and playback scheduler
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod playback;
pub mod styles;
pub mod subtitle;
pub mod text;
pub mod timing;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, PlaybackError, SubtitleError, TimingError};
pub use playback::{PlaybackEvent, Renderer, Scheduler};
pub use styles::AnimationStyle;
pub use subtitle::{format_timestamp, serialize, AssSerializer};
pub use text::{Document, Granularity, TextUnit};
pub use timing::{DurationConfig, DurationStrategy, Timeline, TimingEntry};
