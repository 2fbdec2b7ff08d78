/*!
 * Timeline construction.
 *
 * Units are laid out in document order on a single cumulative clock. After
 * each unit the clock advances by the unit's duration plus the pause owed to
 * the boundary that follows it, minus any configured overlap. Characters of
 * one line are the exception: they start `char_interval` apart, so their
 * fades overlap the way a whole-line reveal does.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::text::{Granularity, TextUnit};
use crate::timing::config::DurationConfig;
use crate::timing::entry::TimingEntry;
use crate::timing::strategy::DurationStrategy;

/// Ordered timings for one generation run.
///
/// Entries are in unit order, which is not necessarily start order when
/// entries overlap. The timeline keeps the strategy and configuration it was
/// built with so downstream consumers can derive per-character detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// Entries in unit order
    pub entries: Vec<TimingEntry>,

    /// Latest end time across all entries
    pub total_duration_ms: u64,

    /// Strategy the entries were computed with
    pub strategy: DurationStrategy,

    /// Knobs the entries were computed with
    #[serde(default)]
    pub config: DurationConfig,
}

impl Timeline {
    /// Build a timeline from units in document order
    pub fn build(units: &[TextUnit], strategy: DurationStrategy, config: &DurationConfig) -> Self {
        let missing = config.missing_knobs();
        if !missing.is_empty() {
            debug!("Using default durations for: {}", missing.join(", "));
        }

        let mut cumulative_ms: u64 = 0;
        let mut entries = Vec::with_capacity(units.len());

        for (position, unit) in units.iter().enumerate() {
            let mut entry = strategy.compute_entry(unit, cumulative_ms, config);
            entry.unit_index = position;

            if let Some(next) = units.get(position + 1) {
                cumulative_ms = cumulative_ms.saturating_add(advance_for(unit, next, entry.duration_ms, config));
            }
            entries.push(entry);
        }

        let total_duration_ms = entries.iter().map(|e| e.end_ms).max().unwrap_or(0);

        debug!(
            "Built {} timeline: {} entries, {}ms total",
            strategy,
            entries.len(),
            total_duration_ms
        );

        Self {
            entries,
            total_duration_ms,
            strategy,
            config: config.clone(),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the timeline has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by start time (stable on ties)
    pub fn entries_by_start(&self) -> Vec<&TimingEntry> {
        let mut sorted: Vec<&TimingEntry> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.start_ms);
        sorted
    }

    /// Number of entry pairs that overlap in absolute time
    pub fn overlap_count(&self) -> usize {
        let sorted = self.entries_by_start();
        sorted
            .windows(2)
            .filter(|pair| pair[0].end_ms > pair[1].start_ms)
            .count()
    }
}

/// Clock advance from the start of `unit` to the start of `next`
pub fn advance_for(unit: &TextUnit, next: &TextUnit, duration_ms: u64, config: &DurationConfig) -> u64 {
    if unit.granularity == Granularity::Character && !unit.starts_new_line(next) {
        return config.char_interval_ms();
    }

    duration_ms
        .saturating_add(pause_for(unit, next, config))
        .saturating_sub(config.overlap_ms())
}

/// Pause owed between `unit` and the unit after it.
///
/// Paragraph boundaries take precedence over line boundaries. Words of one
/// line are separated by `pause_duration`; characters of one line do not pause.
pub fn pause_for(unit: &TextUnit, next: &TextUnit, config: &DurationConfig) -> u64 {
    if unit.starts_new_paragraph(next) {
        config.pause_between_paragraphs_ms()
    } else if unit.starts_new_line(next) {
        config.pause_between_lines_ms()
    } else {
        match unit.granularity {
            Granularity::Word => config.pause_duration_ms(),
            Granularity::Line | Granularity::Character => 0,
        }
    }
}
