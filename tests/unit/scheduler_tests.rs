/*!
 * Tests for the playback scheduler
 */

use rand::Rng;

use scrollcast::errors::PlaybackError;
use scrollcast::playback::{
    ManualClock, PlaybackEntry, PlaybackEvent, PlaybackState, RecordingRenderer, Scheduler, TimingSource,
    FALLBACK_DURATION_MS,
};
use scrollcast::playback::scheduler::has_explicit_start;

use crate::common::FlakyRenderer;

fn run_to_end(scheduler: &mut Scheduler<ManualClock>, clock: &ManualClock, renderer: &mut RecordingRenderer, frame_ms: u64) {
    scheduler.start().unwrap();
    while scheduler.state() == PlaybackState::Playing {
        scheduler.tick(renderer);
        clock.advance(frame_ms);
    }
}

/// Test that every entry fires once in start order for random frame rates
#[test]
fn test_tick_withRandomFrameRates_shouldFireEachEntryOnceInOrder() {
    let mut rng = rand::rng();

    for _ in 0..30 {
        let count = rng.random_range(1..40usize);
        let entries: Vec<PlaybackEntry> = (0..count)
            .map(|i| PlaybackEntry::timed(rng.random_range(0..5_000), rng.random_range(0..2_000), format!("u{}", i)))
            .collect();
        let clock = ManualClock::new();
        let mut scheduler = Scheduler::with_clock(clock.clone());
        scheduler.load(entries.clone());
        let mut renderer = RecordingRenderer::new(count);

        run_to_end(&mut scheduler, &clock, &mut renderer, rng.random_range(1..250));

        let mut fired = renderer.activated_indices();
        let starts: Vec<u64> = fired.iter().map(|&i| scheduler.entries()[i].start_ms).collect();
        assert!(starts.windows(2).all(|w| w[0] <= w[1]));
        fired.sort_unstable();
        assert_eq!(fired, (0..count).collect::<Vec<_>>());
        assert_eq!(scheduler.executed_count(), count);
        assert!(matches!(renderer.events.last(), Some(PlaybackEvent::TimelineComplete { .. })));
    }
}

/// Test that an event is never delivered before its start
#[test]
fn test_tick_shouldNotDispatchBeforeStart() {
    let clock = ManualClock::new();
    let mut scheduler = Scheduler::with_clock(clock.clone());
    scheduler.load(vec![PlaybackEntry::timed(0, 10, "a"), PlaybackEntry::timed(500, 10, "b")]);
    let mut renderer = RecordingRenderer::new(2);

    run_to_end(&mut scheduler, &clock, &mut renderer, 7);

    for event in &renderer.events {
        if let PlaybackEvent::UnitActivated { data, global_time_ms, .. } = event {
            assert!(*global_time_ms >= data.start_ms);
        }
    }
    assert!(renderer.events.last().unwrap().global_time_ms() >= 510);
}

/// Test legacy inputs without starts
#[test]
fn test_load_withoutStarts_shouldSumDurations() {
    let entries = vec![
        PlaybackEntry::sequential(1000, "a"),
        PlaybackEntry::sequential(2000, "b"),
        PlaybackEntry::sequential(500, "c"),
    ];
    assert!(!has_explicit_start(&entries));

    let mut scheduler = Scheduler::with_clock(ManualClock::new());
    scheduler.load(entries);

    assert_eq!(scheduler.timing_source(), TimingSource::Cumulative);
    let starts: Vec<u64> = scheduler.entries().iter().map(|e| e.start_ms).collect();
    assert_eq!(starts, vec![0, 1000, 3000]);
    assert_eq!(scheduler.total_duration_ms(), 3500);
}

/// Test that overlapping explicit entries end at the latest end
#[test]
fn test_load_withExplicitOverlaps_shouldUseLatestEnd() {
    let mut scheduler = Scheduler::with_clock(ManualClock::new());
    scheduler.load(vec![
        PlaybackEntry::timed(0, 3600, "a"),
        PlaybackEntry::timed(3200, 3600, "b"),
        PlaybackEntry::timed(1000, 100, "c"),
    ]);

    assert_eq!(scheduler.timing_source(), TimingSource::Explicit);
    assert_eq!(scheduler.total_duration_ms(), 6800);
}

/// Test that a missing duration falls back to the constant
#[test]
fn test_load_withMissingDuration_shouldUseFallback() {
    let mut scheduler = Scheduler::with_clock(ManualClock::new());
    scheduler.load(vec![
        PlaybackEntry::sequential(1000, "a"),
        PlaybackEntry {
            content: "b".to_string(),
            ..Default::default()
        },
        PlaybackEntry::sequential(1000, "c"),
    ]);

    assert_eq!(scheduler.entries()[1].duration_ms, FALLBACK_DURATION_MS);
    assert_eq!(scheduler.entries()[2].start_ms, 1000 + FALLBACK_DURATION_MS);
}

/// Test that indices beyond the renderer are skipped silently
#[test]
fn test_tick_withSmallRenderer_shouldSkipOutOfRangeIndices() {
    let clock = ManualClock::new();
    let mut scheduler = Scheduler::with_clock(clock.clone());
    scheduler.load(vec![
        PlaybackEntry::timed(0, 100, "a"),
        PlaybackEntry::timed(100, 100, "b"),
        PlaybackEntry::timed(200, 100, "c"),
    ]);
    let mut renderer = RecordingRenderer::new(1);

    run_to_end(&mut scheduler, &clock, &mut renderer, 50);

    assert_eq!(renderer.activated_indices(), vec![0]);
    assert!(renderer.completed());
    assert_eq!(scheduler.executed_count(), 3);
}

/// Test that renderer failures skip only the failing event
#[test]
fn test_tick_withFailingRenderer_shouldContinue() {
    let clock = ManualClock::new();
    let mut scheduler = Scheduler::with_clock(clock.clone());
    scheduler.load(vec![
        PlaybackEntry::timed(0, 100, "a"),
        PlaybackEntry::timed(100, 100, "b"),
        PlaybackEntry::timed(200, 100, "c"),
    ]);
    let mut renderer = FlakyRenderer::new(3, vec![1]);

    scheduler.start().unwrap();
    while scheduler.state() == PlaybackState::Playing {
        scheduler.tick(&mut renderer);
        clock.advance(25);
    }

    assert_eq!(renderer.delivered, vec![0, 2]);
    assert_eq!(renderer.completions, 1);
}

/// Test that pausing neither repeats nor skips entries
#[test]
fn test_pause_thenResume_shouldCarryElapsedTime() {
    let clock = ManualClock::new();
    let mut scheduler = Scheduler::with_clock(clock.clone());
    scheduler.load(vec![
        PlaybackEntry::timed(0, 100, "a"),
        PlaybackEntry::timed(100, 100, "b"),
        PlaybackEntry::timed(200, 100, "c"),
    ]);
    let mut renderer = RecordingRenderer::new(3);

    scheduler.start().unwrap();
    scheduler.tick(&mut renderer);
    clock.advance(150);
    scheduler.tick(&mut renderer);
    scheduler.pause();
    assert_eq!(scheduler.state(), PlaybackState::Idle);

    // Time spent paused does not count
    clock.advance(10_000);
    assert_eq!(scheduler.tick(&mut renderer), 0);
    assert_eq!(scheduler.elapsed_ms(), 150);

    scheduler.start().unwrap();
    scheduler.tick(&mut renderer);
    assert_eq!(renderer.activated_indices(), vec![0, 1]);

    clock.advance(50);
    scheduler.tick(&mut renderer);
    assert_eq!(renderer.activated_indices(), vec![0, 1, 2]);
}

/// Test that reload rewinds playback
#[test]
fn test_reload_afterCompletion_shouldAllowReplay() {
    let clock = ManualClock::new();
    let mut scheduler = Scheduler::with_clock(clock.clone());
    scheduler.load(vec![PlaybackEntry::timed(0, 100, "a")]);
    let mut renderer = RecordingRenderer::new(1);

    run_to_end(&mut scheduler, &clock, &mut renderer, 40);
    assert_eq!(scheduler.state(), PlaybackState::Completed);
    assert!(matches!(scheduler.start(), Err(PlaybackError::InvalidState(_))));

    scheduler.reload();
    assert_eq!(scheduler.executed_count(), 0);
    run_to_end(&mut scheduler, &clock, &mut renderer, 40);

    assert_eq!(renderer.activated_indices(), vec![0, 0]);
}

/// Test that stop halts ticking at the next frame
#[test]
fn test_stop_shouldEndPlayingState() {
    let clock = ManualClock::new();
    let mut scheduler = Scheduler::with_clock(clock.clone());
    scheduler.load(vec![PlaybackEntry::timed(0, 100, "a"), PlaybackEntry::timed(1000, 100, "b")]);
    let mut renderer = RecordingRenderer::new(2);

    scheduler.start().unwrap();
    scheduler.tick(&mut renderer);
    scheduler.stop_handle().stop();
    clock.advance(2000);

    assert_eq!(scheduler.tick(&mut renderer), 0);
    assert_eq!(scheduler.state(), PlaybackState::Idle);
    assert_eq!(renderer.activated_indices(), vec![0]);
}

/// Test that starting an empty scheduler fails
#[test]
fn test_start_withNothingLoaded_shouldFail() {
    let mut scheduler = Scheduler::with_clock(ManualClock::new());
    scheduler.load(Vec::new());

    assert_eq!(scheduler.start(), Err(PlaybackError::NothingLoaded));
}

/// Test that enormous timings from a timeline file load and tick without overflow
#[test]
fn test_load_withHugeTimings_shouldSaturateAndKeepTicking() {
    let entries = scrollcast::playback::entries_from_json(
        r#"[{"start_ms":1e30,"duration_ms":1e30},{"start_ms":0,"duration_ms":1e30}]"#,
    )
    .unwrap();
    let clock = ManualClock::new();
    let mut scheduler = Scheduler::with_clock(clock.clone());

    scheduler.load(entries);

    assert_eq!(scheduler.timing_source(), TimingSource::Explicit);
    assert_eq!(scheduler.total_duration_ms(), u64::MAX);
    assert!(scheduler.entries().iter().all(|e| e.end_ms == u64::MAX));

    let mut renderer = RecordingRenderer::new(2);
    scheduler.start().unwrap();
    clock.advance(1_000);
    scheduler.tick(&mut renderer);

    assert_eq!(renderer.activated_indices(), vec![1]);
    assert_eq!(scheduler.state(), PlaybackState::Playing);

    let mut sequential = Scheduler::with_clock(ManualClock::new());
    sequential.load(vec![
        PlaybackEntry::sequential(0, "a"),
        PlaybackEntry { duration_ms: Some(1e30), ..PlaybackEntry::sequential(0, "b") },
        PlaybackEntry { duration_ms: Some(1e30), ..PlaybackEntry::sequential(0, "c") },
    ]);
    assert_eq!(sequential.total_duration_ms(), u64::MAX);
}
