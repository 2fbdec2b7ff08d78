use anyhow::Result;
use log::info;

use crate::playback::events::PlaybackEvent;

// @module: Renderer contract for playback events

/// Receiver of playback events.
///
/// Events whose index is not below `unit_count()` are never delivered.
pub trait Renderer {
    /// Number of units the renderer can display
    fn unit_count(&self) -> usize;

    /// Handle one event; an error only skips this event
    fn on_event(&mut self, event: &PlaybackEvent) -> Result<()>;
}

/// Renderer that writes each event to the log
#[derive(Debug, Clone)]
pub struct LoggingRenderer {
    unit_count: usize,
    activated: usize,
}

impl LoggingRenderer {
    pub fn new(unit_count: usize) -> Self {
        Self { unit_count, activated: 0 }
    }

    /// Units activated so far
    pub fn activated(&self) -> usize {
        self.activated
    }
}

impl Renderer for LoggingRenderer {
    fn unit_count(&self) -> usize {
        self.unit_count
    }

    fn on_event(&mut self, event: &PlaybackEvent) -> Result<()> {
        match event {
            PlaybackEvent::UnitActivated { index, data, global_time_ms } => {
                self.activated += 1;
                info!("[{:>7}ms] #{} {}", global_time_ms, index, data.content);
            }
            PlaybackEvent::TimelineComplete { global_time_ms } => {
                info!("[{:>7}ms] timeline complete ({} units)", global_time_ms, self.activated);
            }
        }
        Ok(())
    }
}

/// Renderer that keeps every event it receives
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub unit_count: usize,
    pub events: Vec<PlaybackEvent>,
}

impl RecordingRenderer {
    pub fn new(unit_count: usize) -> Self {
        Self { unit_count, events: Vec::new() }
    }

    /// Indices of activated units, in delivery order
    pub fn activated_indices(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PlaybackEvent::UnitActivated { index, .. } => Some(*index),
                PlaybackEvent::TimelineComplete { .. } => None,
            })
            .collect()
    }

    pub fn completed(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, PlaybackEvent::TimelineComplete { .. }))
    }
}

impl Renderer for RecordingRenderer {
    fn unit_count(&self) -> usize {
        self.unit_count
    }

    fn on_event(&mut self, event: &PlaybackEvent) -> Result<()> {
        self.events.push(event.clone());
        Ok(())
    }
}
