use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::timing::entry::{SubPhase, TimingEntry};

// @module: Playback input entries and emitted events

/// Entry as handed to the scheduler.
///
/// Timelines written by this crate carry every field. Older inputs are bare
/// arrays of durations without `start_ms`, which puts the scheduler in
/// cumulative mode. Values are milliseconds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaybackEntry {
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "startMs", alias = "start")]
    pub start_ms: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "durationMs", alias = "duration")]
    pub duration_ms: Option<f64>,

    #[serde(default, alias = "text")]
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "subPhases")]
    pub sub_phases: Option<Vec<SubPhase>>,
}

impl PlaybackEntry {
    /// Entry with an explicit start
    pub fn timed(start_ms: u64, duration_ms: u64, content: impl Into<String>) -> Self {
        Self {
            start_ms: Some(start_ms as f64),
            duration_ms: Some(duration_ms as f64),
            content: content.into(),
            sub_phases: None,
        }
    }

    /// Entry without a start, for cumulative playback
    pub fn sequential(duration_ms: u64, content: impl Into<String>) -> Self {
        Self {
            start_ms: None,
            duration_ms: Some(duration_ms as f64),
            content: content.into(),
            sub_phases: None,
        }
    }
}

impl From<&TimingEntry> for PlaybackEntry {
    fn from(entry: &TimingEntry) -> Self {
        Self {
            start_ms: Some(entry.start_ms as f64),
            duration_ms: Some(entry.duration_ms as f64),
            content: entry.content.clone(),
            sub_phases: entry.sub_phases.clone(),
        }
    }
}

/// Accepted shapes of a timeline JSON file
#[derive(Deserialize)]
#[serde(untagged)]
enum TimelineDocument {
    Bare(Vec<PlaybackEntry>),
    Timeline { entries: Vec<PlaybackEntry> },
}

/// Read playback entries from a timeline JSON document or a bare entry array
pub fn entries_from_json(json: &str) -> Result<Vec<PlaybackEntry>> {
    let document: TimelineDocument =
        serde_json::from_str(json).context("Timeline JSON is neither a timeline nor an entry array")?;

    Ok(match document {
        TimelineDocument::Bare(entries) => entries,
        TimelineDocument::Timeline { entries } => entries,
    })
}

/// Event delivered to a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaybackEvent {
    /// A unit reached its start time
    UnitActivated {
        index: usize,
        data: TimingEntry,
        global_time_ms: u64,
    },
    /// Playback passed the end of the timeline
    TimelineComplete { global_time_ms: u64 },
}

impl PlaybackEvent {
    pub fn global_time_ms(&self) -> u64 {
        match self {
            Self::UnitActivated { global_time_ms, .. } | Self::TimelineComplete { global_time_ms } => *global_time_ms,
        }
    }
}
