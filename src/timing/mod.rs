/*!
 * Animation timing engine.
 *
 * - `config`: duration knobs, presets and hard defaults
 * - `entry`: per-unit timing records and sub-phases
 * - `strategy`: the per-style duration algorithms
 * - `timeline`: sequencing units into one ordered timeline
 */

pub mod config;
pub mod entry;
pub mod strategy;
pub mod timeline;

// Re-export main types
pub use config::DurationConfig;
pub use entry::{SubPhase, TimingEntry};
pub use strategy::DurationStrategy;
pub use timeline::Timeline;
