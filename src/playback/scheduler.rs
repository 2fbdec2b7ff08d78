/*!
 * Timeline playback scheduler.
 *
 * A single clock drives every unit. Each frame the scheduler measures the
 * elapsed playback time and dispatches, in start order, every entry whose
 * start has been reached. Entries dispatch at most once per load; the
 * terminal `TimelineComplete` event is sent once elapsed time passes the
 * total duration.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::{debug, error, trace, warn};
use tokio::time::MissedTickBehavior;

use crate::errors::PlaybackError;
use crate::playback::clock::{Clock, SystemClock};
use crate::playback::events::{PlaybackEntry, PlaybackEvent};
use crate::playback::renderer::Renderer;
use crate::timing::entry::TimingEntry;

/// Duration given to entries whose own duration is missing or unusable
pub const FALLBACK_DURATION_MS: u64 = 3000;

/// Lifecycle of a scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    Completed,
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::Completed => "completed",
        };
        write!(f, "{}", name)
    }
}

/// Where entry start times come from, decided once per load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingSource {
    /// Every entry carries its own start
    Explicit,
    /// Starts are the running sum of durations
    Cumulative,
}

/// Whether every entry carries a start time
pub fn has_explicit_start(entries: &[PlaybackEntry]) -> bool {
    !entries.is_empty() && entries.iter().all(|entry| entry.start_ms.is_some())
}

/// Cancels a running `play` loop from outside it
#[derive(Debug, Clone)]
pub struct StopHandle {
    running: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

/// Replays timing entries against a clock
pub struct Scheduler<C: Clock = SystemClock> {
    clock: C,
    source: Vec<PlaybackEntry>,
    entries: Vec<TimingEntry>,
    // @field: Entry indices in ascending start order
    order: Vec<usize>,
    executed: Vec<bool>,
    cursor: usize,
    timing_source: TimingSource,
    total_duration_ms: u64,
    state: PlaybackState,
    // @field: Clock reading when the current run started
    run_started_at: Option<u64>,
    // @field: Elapsed time of runs before the last pause
    carried_ms: u64,
    running: Arc<AtomicBool>,
}

impl Scheduler<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl Default for Scheduler<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Scheduler<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            source: Vec::new(),
            entries: Vec::new(),
            order: Vec::new(),
            executed: Vec::new(),
            cursor: 0,
            timing_source: TimingSource::Cumulative,
            total_duration_ms: 0,
            state: PlaybackState::Idle,
            run_started_at: None,
            carried_ms: 0,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Replace the loaded entries and reset playback
    pub fn load(&mut self, entries: Vec<PlaybackEntry>) {
        self.source = entries;
        self.reload();
    }

    /// Load a built timeline
    pub fn load_timeline(&mut self, entries: &[TimingEntry]) {
        self.load(entries.iter().map(PlaybackEntry::from).collect());
    }

    /// Re-resolve the loaded entries and reset playback to the beginning
    pub fn reload(&mut self) {
        self.timing_source = if has_explicit_start(&self.source) {
            TimingSource::Explicit
        } else {
            TimingSource::Cumulative
        };

        let (entries, total) = resolve(&self.source, self.timing_source);

        let mut order: Vec<usize> = (0..entries.len()).collect();
        order.sort_by_key(|&i| entries[i].start_ms);

        self.executed = vec![false; entries.len()];
        self.entries = entries;
        self.order = order;
        self.cursor = 0;
        self.total_duration_ms = total;
        self.state = PlaybackState::Idle;
        self.run_started_at = None;
        self.carried_ms = 0;
        self.running.store(false, Ordering::SeqCst);

        debug!(
            "Loaded {} entries ({:?} timing), {}ms total",
            self.entries.len(),
            self.timing_source,
            self.total_duration_ms
        );
    }

    /// Start or resume playback.
    ///
    /// Starting while already playing does nothing. A completed timeline must
    /// be reloaded before it can start again.
    pub fn start(&mut self) -> Result<(), PlaybackError> {
        match self.state {
            PlaybackState::Playing => return Ok(()),
            PlaybackState::Completed => return Err(PlaybackError::InvalidState(self.state.to_string())),
            PlaybackState::Idle => {}
        }
        if self.entries.is_empty() {
            return Err(PlaybackError::NothingLoaded);
        }

        self.run_started_at = Some(self.clock.now_ms());
        self.state = PlaybackState::Playing;
        self.running.store(true, Ordering::SeqCst);
        debug!("Playback started at {}ms", self.carried_ms);
        Ok(())
    }

    /// Pause playback, keeping elapsed time and dispatched entries
    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.carried_ms = self.elapsed_ms();
        self.run_started_at = None;
        self.state = PlaybackState::Idle;
        self.running.store(false, Ordering::SeqCst);
        debug!("Playback paused at {}ms", self.carried_ms);
    }

    /// Ask a running `play` loop to exit after its current frame
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            running: Arc::clone(&self.running),
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn timing_source(&self) -> TimingSource {
        self.timing_source
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.total_duration_ms
    }

    /// Resolved entries in load order
    pub fn entries(&self) -> &[TimingEntry] {
        &self.entries
    }

    /// Number of entries dispatched since the last load
    pub fn executed_count(&self) -> usize {
        self.executed.iter().filter(|done| **done).count()
    }

    /// Playback time, excluding paused intervals
    pub fn elapsed_ms(&self) -> u64 {
        match self.run_started_at {
            Some(started) => self.carried_ms.saturating_add(self.clock.now_ms().saturating_sub(started)),
            None => self.carried_ms,
        }
    }

    /// Run one frame, returning the number of events delivered.
    ///
    /// Renderer failures are logged and never stop the frame.
    pub fn tick<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> usize {
        if self.state != PlaybackState::Playing {
            return 0;
        }
        if !self.running.load(Ordering::SeqCst) {
            self.pause();
            return 0;
        }

        let elapsed = self.elapsed_ms();
        let mut delivered = 0;

        while let Some(&index) = self.order.get(self.cursor) {
            if self.entries[index].start_ms > elapsed {
                break;
            }
            self.cursor += 1;

            if self.executed[index] {
                continue;
            }
            self.executed[index] = true;

            if index >= renderer.unit_count() {
                trace!("Skipping entry {}: renderer has {} units", index, renderer.unit_count());
                continue;
            }

            let event = PlaybackEvent::UnitActivated {
                index,
                data: self.entries[index].clone(),
                global_time_ms: elapsed,
            };
            match renderer.on_event(&event) {
                Ok(()) => delivered += 1,
                Err(e) => error!("Renderer failed on entry {}: {}", index, e),
            }
        }

        if elapsed >= self.total_duration_ms && self.cursor >= self.order.len() {
            let event = PlaybackEvent::TimelineComplete { global_time_ms: elapsed };
            match renderer.on_event(&event) {
                Ok(()) => delivered += 1,
                Err(e) => error!("Renderer failed on completion: {}", e),
            }
            self.state = PlaybackState::Completed;
            self.run_started_at = None;
            self.carried_ms = elapsed;
            self.running.store(false, Ordering::SeqCst);
            debug!("Playback completed at {}ms", elapsed);
        }

        delivered
    }

    /// Drive `tick` on a frame timer until the timeline completes or is stopped.
    ///
    /// Starts playback if it is not already running and returns the state
    /// the loop ended in.
    pub async fn play<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        frame_interval: Duration,
    ) -> Result<PlaybackState, PlaybackError> {
        self.start()?;

        let mut frames = tokio::time::interval(frame_interval.max(Duration::from_millis(1)));
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        while self.state == PlaybackState::Playing {
            frames.tick().await;
            self.tick(renderer);
        }

        Ok(self.state)
    }
}

/// Turn raw entries into timing entries and a total duration
fn resolve(source: &[PlaybackEntry], timing_source: TimingSource) -> (Vec<TimingEntry>, u64) {
    let mut entries = Vec::with_capacity(source.len());
    let mut cumulative: u64 = 0;

    for (index, raw) in source.iter().enumerate() {
        let duration = usable_ms(raw.duration_ms).unwrap_or_else(|| {
            warn!(
                "Entry {} has no usable duration ({:?}), using {}ms",
                index, raw.duration_ms, FALLBACK_DURATION_MS
            );
            FALLBACK_DURATION_MS
        });

        let start = match timing_source {
            TimingSource::Explicit => usable_ms(raw.start_ms).unwrap_or_else(|| {
                warn!("Entry {} has an unusable start ({:?}), using 0ms", index, raw.start_ms);
                0
            }),
            TimingSource::Cumulative => cumulative,
        };
        cumulative = cumulative.saturating_add(duration);

        let mut entry = TimingEntry::new(index, raw.content.clone(), start, duration);
        entry.sub_phases = raw.sub_phases.clone();
        entries.push(entry);
    }

    let total = match timing_source {
        TimingSource::Explicit => entries.iter().map(|e| e.end_ms).max().unwrap_or(0),
        TimingSource::Cumulative => cumulative,
    };

    (entries, total)
}

fn usable_ms(value: Option<f64>) -> Option<u64> {
    value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.round() as u64)
}
