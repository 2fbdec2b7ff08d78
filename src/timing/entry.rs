/*!
 * Per-unit timing records.
 */

use serde::{Deserialize, Serialize};

/// Named sub-interval of one unit's active time, relative to the unit start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubPhase {
    /// Phase name (`fade_in`, `static`, `fade_out`)
    pub name: String,
    /// Offset from the entry start in ms
    pub offset_ms: u64,
    /// Phase length in ms
    pub duration_ms: u64,
}

impl SubPhase {
    pub fn new(name: &str, offset_ms: u64, duration_ms: u64) -> Self {
        Self {
            name: name.to_string(),
            offset_ms,
            duration_ms,
        }
    }

    /// Offset at which the phase ends
    pub fn end_offset_ms(&self) -> u64 {
        self.offset_ms.saturating_add(self.duration_ms)
    }
}

/// Schedule of one unit.
///
/// Timecodes are fixed at construction: `end_ms` is always `start_ms + duration_ms`,
/// saturating at `u64::MAX`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingEntry {
    /// Index of the unit this entry times
    pub unit_index: usize,

    /// Unit text
    #[serde(default)]
    pub content: String,

    /// Absolute start in ms
    pub start_ms: u64,

    /// Active time in ms
    pub duration_ms: u64,

    /// Absolute end in ms
    pub end_ms: u64,

    /// Contiguous phases for phase-based styles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_phases: Option<Vec<SubPhase>>,
}

impl TimingEntry {
    /// Create a single-phase entry
    pub fn new(unit_index: usize, content: impl Into<String>, start_ms: u64, duration_ms: u64) -> Self {
        Self {
            unit_index,
            content: content.into(),
            start_ms,
            duration_ms,
            end_ms: start_ms.saturating_add(duration_ms),
            sub_phases: None,
        }
    }

    /// Create an entry whose duration is the sum of its phases laid end to end
    pub fn with_phases(unit_index: usize, content: impl Into<String>, start_ms: u64, phases: &[(&str, u64)]) -> Self {
        let mut offset: u64 = 0;
        let sub_phases: Vec<SubPhase> = phases
            .iter()
            .map(|(name, duration)| {
                let phase = SubPhase::new(name, offset, *duration);
                offset = offset.saturating_add(*duration);
                phase
            })
            .collect();

        Self {
            unit_index,
            content: content.into(),
            start_ms,
            duration_ms: offset,
            end_ms: start_ms.saturating_add(offset),
            sub_phases: Some(sub_phases),
        }
    }

    /// Look up a phase by name
    pub fn phase(&self, name: &str) -> Option<&SubPhase> {
        self.sub_phases.as_ref()?.iter().find(|p| p.name == name)
    }

    /// Check the timing invariants: end = start + duration, and for phased
    /// entries the phases start at zero, are contiguous and fill the duration
    pub fn is_consistent(&self) -> bool {
        if self.end_ms != self.start_ms.saturating_add(self.duration_ms) {
            return false;
        }

        match &self.sub_phases {
            None => true,
            Some(phases) => {
                let mut expected_offset = 0;
                for phase in phases {
                    if phase.offset_ms != expected_offset {
                        return false;
                    }
                    expected_offset = phase.end_offset_ms();
                }
                expected_offset == self.duration_ms
            }
        }
    }
}
