/*!
 * Duration configuration.
 *
 * Knobs are written in seconds (as in configuration files) and read back as
 * integer milliseconds. Every knob is optional: a missing value resolves to a
 * documented default instead of zero, so callers never have to special-case
 * absent configuration.
 */

use serde::{Deserialize, Serialize};

use crate::errors::TimingError;

/// Default delay between successive characters of a line
pub const DEFAULT_CHAR_INTERVAL_MS: u64 = 150;
/// Default fade length of a single character
pub const DEFAULT_FADE_DURATION_MS: u64 = 100;
/// Default pause between words of the same line
pub const DEFAULT_PAUSE_DURATION_MS: u64 = 1000;
/// Default pause between lines
pub const DEFAULT_PAUSE_BETWEEN_LINES_MS: u64 = 1000;
/// Default pause between paragraphs
pub const DEFAULT_PAUSE_BETWEEN_PARAGRAPHS_MS: u64 = 2000;
/// Default fade-in phase
pub const DEFAULT_FADE_IN_MS: u64 = 800;
/// Default static phase
pub const DEFAULT_STATIC_MS: u64 = 2000;
/// Default fade-out phase
pub const DEFAULT_FADE_OUT_MS: u64 = 800;
/// Default time for a line to cross the viewport
pub const DEFAULT_PASSTHROUGH_MS: u64 = 8000;
/// Longest duration any knob may resolve to (24 h)
pub const MAX_KNOB_SECONDS: f64 = 86_400.0;

/// Named set of timing knobs, in seconds.
///
/// Treated as a read-only value for the duration of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DurationConfig {
    /// Delay between successive characters
    #[serde(default, alias = "charInterval", skip_serializing_if = "Option::is_none")]
    pub char_interval: Option<f64>,

    /// Fade length of one character
    #[serde(default, alias = "fadeDuration", skip_serializing_if = "Option::is_none")]
    pub fade_duration: Option<f64>,

    /// Pause between words of one line
    #[serde(default, alias = "pauseDuration", skip_serializing_if = "Option::is_none")]
    pub pause_duration: Option<f64>,

    /// Pause between lines
    #[serde(default, alias = "pauseBetweenLines", skip_serializing_if = "Option::is_none")]
    pub pause_between_lines: Option<f64>,

    /// Pause between paragraphs
    #[serde(default, alias = "pauseBetweenParagraphs", skip_serializing_if = "Option::is_none")]
    pub pause_between_paragraphs: Option<f64>,

    /// Fade-in phase length
    #[serde(default, alias = "fadeInDuration", skip_serializing_if = "Option::is_none")]
    pub fade_in_duration: Option<f64>,

    /// Static phase length
    #[serde(default, alias = "staticDuration", skip_serializing_if = "Option::is_none")]
    pub static_duration: Option<f64>,

    /// Fade-out phase length
    #[serde(default, alias = "fadeOutDuration", skip_serializing_if = "Option::is_none")]
    pub fade_out_duration: Option<f64>,

    /// Floor applied to every computed duration
    #[serde(default, alias = "minDisplayDuration", skip_serializing_if = "Option::is_none")]
    pub min_display_duration: Option<f64>,

    /// Time for one line to scroll fully across the viewport
    #[serde(default, alias = "passthroughDuration", skip_serializing_if = "Option::is_none")]
    pub passthrough_duration: Option<f64>,

    /// Divisor applied to the pass-through time
    #[serde(default, alias = "scrollSpeed", skip_serializing_if = "Option::is_none")]
    pub scroll_speed: Option<f64>,

    /// Time by which the next unit starts before the current one ends
    #[serde(default, alias = "overlapDuration", skip_serializing_if = "Option::is_none")]
    pub overlap_duration: Option<f64>,
}

/// Convert seconds to whole milliseconds, rounding to the nearest ms.
///
/// Negative, NaN and infinite inputs clamp to zero.
pub fn seconds_to_ms(seconds: f64) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (seconds * 1000.0).round() as u64
}

impl DurationConfig {
    /// Merge `overrides` on top of `self`; any knob set in `overrides` wins
    pub fn merged_with(&self, overrides: &DurationConfig) -> DurationConfig {
        DurationConfig {
            char_interval: overrides.char_interval.or(self.char_interval),
            fade_duration: overrides.fade_duration.or(self.fade_duration),
            pause_duration: overrides.pause_duration.or(self.pause_duration),
            pause_between_lines: overrides.pause_between_lines.or(self.pause_between_lines),
            pause_between_paragraphs: overrides.pause_between_paragraphs.or(self.pause_between_paragraphs),
            fade_in_duration: overrides.fade_in_duration.or(self.fade_in_duration),
            static_duration: overrides.static_duration.or(self.static_duration),
            fade_out_duration: overrides.fade_out_duration.or(self.fade_out_duration),
            min_display_duration: overrides.min_display_duration.or(self.min_display_duration),
            passthrough_duration: overrides.passthrough_duration.or(self.passthrough_duration),
            scroll_speed: overrides.scroll_speed.or(self.scroll_speed),
            overlap_duration: overrides.overlap_duration.or(self.overlap_duration),
        }
    }

    /// Reject knobs that cannot be durations: negative, not finite, or longer
    /// than `MAX_KNOB_SECONDS` (including the pass-through time after the
    /// scroll speed is applied)
    pub fn validate(&self) -> Result<(), TimingError> {
        let knobs = [
            ("char_interval", self.char_interval),
            ("fade_duration", self.fade_duration),
            ("pause_duration", self.pause_duration),
            ("pause_between_lines", self.pause_between_lines),
            ("pause_between_paragraphs", self.pause_between_paragraphs),
            ("fade_in_duration", self.fade_in_duration),
            ("static_duration", self.static_duration),
            ("fade_out_duration", self.fade_out_duration),
            ("min_display_duration", self.min_display_duration),
            ("passthrough_duration", self.passthrough_duration),
            ("overlap_duration", self.overlap_duration),
        ];

        for (knob, value) in knobs {
            if let Some(value) = value {
                if !value.is_finite() || !(0.0..=MAX_KNOB_SECONDS).contains(&value) {
                    return Err(TimingError::InvalidKnob { knob, value });
                }
            }
        }

        if let Some(value) = self.scroll_speed {
            if !value.is_finite() || value <= 0.0 {
                return Err(TimingError::InvalidKnob { knob: "scroll_speed", value });
            }
            if self.passthrough_ms() as f64 > MAX_KNOB_SECONDS * 1000.0 {
                return Err(TimingError::InvalidKnob { knob: "scroll_speed", value });
            }
        }

        Ok(())
    }

    /// Names of the timing knobs that will resolve to their defaults
    pub fn missing_knobs(&self) -> Vec<&'static str> {
        [
            ("char_interval", self.char_interval),
            ("fade_duration", self.fade_duration),
            ("pause_duration", self.pause_duration),
            ("pause_between_lines", self.pause_between_lines),
            ("pause_between_paragraphs", self.pause_between_paragraphs),
            ("fade_in_duration", self.fade_in_duration),
            ("static_duration", self.static_duration),
            ("fade_out_duration", self.fade_out_duration),
            ("passthrough_duration", self.passthrough_duration),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(knob, _)| knob)
        .collect()
    }

    pub fn char_interval_ms(&self) -> u64 {
        ms_or(self.char_interval, DEFAULT_CHAR_INTERVAL_MS)
    }

    pub fn fade_duration_ms(&self) -> u64 {
        ms_or(self.fade_duration, DEFAULT_FADE_DURATION_MS)
    }

    pub fn pause_duration_ms(&self) -> u64 {
        ms_or(self.pause_duration, DEFAULT_PAUSE_DURATION_MS)
    }

    pub fn pause_between_lines_ms(&self) -> u64 {
        ms_or(self.pause_between_lines, DEFAULT_PAUSE_BETWEEN_LINES_MS)
    }

    pub fn pause_between_paragraphs_ms(&self) -> u64 {
        ms_or(self.pause_between_paragraphs, DEFAULT_PAUSE_BETWEEN_PARAGRAPHS_MS)
    }

    pub fn fade_in_ms(&self) -> u64 {
        ms_or(self.fade_in_duration, DEFAULT_FADE_IN_MS)
    }

    pub fn static_ms(&self) -> u64 {
        ms_or(self.static_duration, DEFAULT_STATIC_MS)
    }

    pub fn fade_out_ms(&self) -> u64 {
        ms_or(self.fade_out_duration, DEFAULT_FADE_OUT_MS)
    }

    /// Floor for computed durations, if one is configured
    pub fn min_display_ms(&self) -> Option<u64> {
        self.min_display_duration.map(seconds_to_ms)
    }

    pub fn overlap_ms(&self) -> u64 {
        self.overlap_duration.map(seconds_to_ms).unwrap_or(0)
    }

    /// Pass-through time divided by the scroll speed.
    ///
    /// A non-positive or non-finite speed counts as 1.0.
    pub fn passthrough_ms(&self) -> u64 {
        let base = ms_or(self.passthrough_duration, DEFAULT_PASSTHROUGH_MS);
        match self.scroll_speed {
            Some(speed) if speed.is_finite() && speed > 0.0 => (base as f64 / speed).round() as u64,
            _ => base,
        }
    }
}

// Missing knobs are recovered here; the default is always non-zero
fn ms_or(value: Option<f64>, default_ms: u64) -> u64 {
    match value {
        Some(seconds) => seconds_to_ms(seconds),
        None => default_ms,
    }
}

/// Built-in knob sets for the named animation styles
pub mod presets {
    use super::DurationConfig;

    /// Per-character typewriter fade
    pub fn typewriter_fade() -> DurationConfig {
        DurationConfig {
            char_interval: Some(0.15),
            fade_duration: Some(0.1),
            pause_between_lines: Some(1.0),
            pause_between_paragraphs: Some(2.0),
            ..Default::default()
        }
    }

    /// Bottom-to-centre-to-top line flow with overlapping lines
    pub fn railway_scroll() -> DurationConfig {
        DurationConfig {
            fade_in_duration: Some(0.8),
            static_duration: Some(2.0),
            fade_out_duration: Some(0.8),
            overlap_duration: Some(0.4),
            pause_between_lines: Some(0.0),
            pause_between_paragraphs: Some(1.0),
            ..Default::default()
        }
    }

    /// Credits-style continuous roll
    pub fn simple_role() -> DurationConfig {
        DurationConfig {
            passthrough_duration: Some(8.0),
            scroll_speed: Some(1.0),
            pause_between_lines: Some(0.2),
            pause_between_paragraphs: Some(0.2),
            ..Default::default()
        }
    }

    /// Centre-start roll; `static_duration` is the hold before rising
    pub fn revolver_up() -> DurationConfig {
        DurationConfig {
            passthrough_duration: Some(6.0),
            scroll_speed: Some(1.0),
            static_duration: Some(1.0),
            pause_between_lines: Some(0.2),
            pause_between_paragraphs: Some(0.5),
            ..Default::default()
        }
    }

    /// Word-by-word pop; every word stays at least one second
    pub fn typewriter_pop() -> DurationConfig {
        DurationConfig {
            char_interval: Some(0.05),
            fade_duration: Some(0.3),
            min_display_duration: Some(1.0),
            pause_duration: Some(0.15),
            pause_between_lines: Some(0.5),
            pause_between_paragraphs: Some(1.5),
            ..Default::default()
        }
    }

    /// Lower-band ticker, one line after another
    pub fn horizontal_ticker() -> DurationConfig {
        DurationConfig {
            passthrough_duration: Some(10.0),
            scroll_speed: Some(1.0),
            pause_between_lines: Some(0.0),
            pause_between_paragraphs: Some(1.0),
            ..Default::default()
        }
    }
}
