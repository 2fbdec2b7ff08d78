/*!
 * Integration tests replaying generated timelines
 */

use std::time::Duration;

use anyhow::Result;
use scrollcast::app_config::Config;
use scrollcast::app_controller::Controller;
use scrollcast::playback::{
    entries_from_json, ManualClock, PlaybackEntry, PlaybackState, RecordingRenderer, Scheduler,
};
use scrollcast::timing::DurationConfig;

use crate::common::init_test_logging;

/// Controller with millisecond-scale timings
fn fast_controller() -> Result<Controller> {
    Controller::with_config(Config {
        style: "railway_scroll".to_string(),
        timing: DurationConfig {
            fade_in_duration: Some(0.005),
            static_duration: Some(0.01),
            fade_out_duration: Some(0.005),
            overlap_duration: Some(0.005),
            pause_between_paragraphs: Some(0.01),
            ..Default::default()
        },
        ..Default::default()
    })
}

/// Test that a generated timeline replays every unit through the async loop
#[test]
fn test_play_withGeneratedTimeline_shouldActivateAllUnits() -> Result<()> {
    init_test_logging();
    let controller = fast_controller()?;
    let timeline = controller.build_timeline("one\ntwo\n\nthree\nfour");

    let mut scheduler = Scheduler::new();
    scheduler.load_timeline(&timeline.entries);
    let mut renderer = RecordingRenderer::new(timeline.len());

    let state = tokio_test::block_on(scheduler.play(&mut renderer, Duration::from_millis(2)))?;

    assert_eq!(state, PlaybackState::Completed);
    assert_eq!(renderer.activated_indices(), vec![0, 1, 2, 3]);
    assert!(renderer.completed());
    Ok(())
}

/// Test that the stop handle ends the async loop early
#[tokio::test]
async fn test_play_withStopHandle_shouldReturnIdle() -> Result<()> {
    init_test_logging();
    let mut scheduler = Scheduler::new();
    scheduler.load(vec![
        PlaybackEntry::timed(0, 10, "now"),
        PlaybackEntry::timed(60_000, 10, "much later"),
    ]);
    let handle = scheduler.stop_handle();
    let mut renderer = RecordingRenderer::new(2);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(30)).await;
        handle.stop();
    });

    let state = scheduler.play(&mut renderer, Duration::from_millis(5)).await?;

    assert_eq!(state, PlaybackState::Idle);
    assert_eq!(renderer.activated_indices(), vec![0]);
    assert!(!renderer.completed());
    Ok(())
}

/// Test that the timeline JSON written by generation replays the same starts
#[test]
fn test_timelineJson_shouldReplayWithExplicitStarts() -> Result<()> {
    let controller = fast_controller()?;
    let timeline = controller.build_timeline("a\nb\nc");
    let json = serde_json::to_string_pretty(&timeline)?;

    let entries = entries_from_json(&json)?;
    let clock = ManualClock::new();
    let mut scheduler = Scheduler::with_clock(clock.clone());
    scheduler.load(entries);

    let starts: Vec<u64> = scheduler.entries().iter().map(|e| e.start_ms).collect();
    let expected: Vec<u64> = timeline.entries.iter().map(|e| e.start_ms).collect();
    assert_eq!(starts, expected);
    assert_eq!(scheduler.total_duration_ms(), timeline.total_duration_ms);
    Ok(())
}
