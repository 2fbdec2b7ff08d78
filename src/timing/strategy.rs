/*!
 * Duration strategies.
 *
 * All per-style timing math lives in `DurationStrategy::compute_entry`, one
 * match over a closed set of variants, so every style is checked against the
 * same properties.
 */

use serde::{Deserialize, Serialize};

use crate::text::TextUnit;
use crate::timing::config::DurationConfig;
use crate::timing::entry::TimingEntry;

/// Name of the phase-based fade-in phase
pub const PHASE_FADE_IN: &str = "fade_in";
/// Name of the phase-based static phase
pub const PHASE_STATIC: &str = "static";
/// Name of the phase-based fade-out phase
pub const PHASE_FADE_OUT: &str = "fade_out";

/// Algorithm that assigns a duration to each unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationStrategy {
    /// Characters fade in one after another, `char_interval` apart
    CharacterReveal,
    /// Fade-in, static, fade-out
    PhaseBased,
    /// One fixed-length pass across the viewport
    ContinuousPassthrough,
}

impl DurationStrategy {
    /// Canonical strategy name
    pub fn name(&self) -> &'static str {
        match self {
            Self::CharacterReveal => "character_reveal",
            Self::PhaseBased => "phase_based",
            Self::ContinuousPassthrough => "continuous",
        }
    }

    /// Compute the timing of `unit` anchored at `start_ms`.
    ///
    /// The entry's `unit_index` is the unit's in-parent index; the timeline
    /// builder rewrites it to the flattened position.
    pub fn compute_entry(&self, unit: &TextUnit, start_ms: u64, config: &DurationConfig) -> TimingEntry {
        let floor = config.min_display_ms().unwrap_or(0);

        match self {
            Self::CharacterReveal => {
                let duration = reveal_duration_ms(unit.char_count(), config).max(floor);
                TimingEntry::new(unit.index, unit.content.clone(), start_ms, duration)
            }
            Self::PhaseBased => {
                let fade_in = config.fade_in_ms();
                let fade_out = config.fade_out_ms();
                let mut hold = config.static_ms();

                // The floor stretches the static phase so the phases still fill the entry
                let total = fade_in.saturating_add(hold).saturating_add(fade_out);
                if total < floor {
                    hold += floor - total;
                }

                TimingEntry::with_phases(
                    unit.index,
                    unit.content.clone(),
                    start_ms,
                    &[(PHASE_FADE_IN, fade_in), (PHASE_STATIC, hold), (PHASE_FADE_OUT, fade_out)],
                )
            }
            Self::ContinuousPassthrough => {
                let duration = config.passthrough_ms().max(floor);
                TimingEntry::new(unit.index, unit.content.clone(), start_ms, duration)
            }
        }
    }
}

impl std::fmt::Display for DurationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DurationStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "character_reveal" => Ok(Self::CharacterReveal),
            "phase_based" => Ok(Self::PhaseBased),
            "continuous" | "continuous_passthrough" => Ok(Self::ContinuousPassthrough),
            _ => Err(anyhow::anyhow!("Invalid duration strategy: {}", s)),
        }
    }
}

/// Active time of a character-reveal unit of `char_count` characters.
///
/// `(n - 1) * char_interval + fade_duration`; an empty unit still lasts one fade.
pub fn reveal_duration_ms(char_count: usize, config: &DurationConfig) -> u64 {
    let fade = config.fade_duration_ms();
    match char_count {
        0 => fade,
        n => (n as u64 - 1).saturating_mul(config.char_interval_ms()).saturating_add(fade),
    }
}

/// Fade window `(start, end)` of each character, relative to the unit start
pub fn character_offsets(char_count: usize, config: &DurationConfig) -> Vec<(u64, u64)> {
    let interval = config.char_interval_ms();
    let fade = config.fade_duration_ms();

    (0..char_count as u64)
        .map(|i| {
            let start = i.saturating_mul(interval);
            (start, start.saturating_add(fade))
        })
        .collect()
}
