/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use scrollcast::app_config::Config;
use scrollcast::app_controller::{Controller, FolderSummary};
use scrollcast::playback::PlaybackState;
use scrollcast::subtitle::{count_dialogue_lines, inspect};
use scrollcast::timing::DurationConfig;

use crate::common;

/// Test the controller initialization with default config
#[test]
fn test_controller_initialization_withDefaultConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::new()?;

    assert_eq!(controller.style().name(), "typewriter_fade");
    assert_eq!(controller.timing().char_interval_ms(), 150);
    Ok(())
}

/// Test that an invalid style is rejected at construction
#[test]
fn test_controller_withUnknownStyle_shouldFail() {
    let config = Config {
        style: "sparkle".to_string(),
        ..Default::default()
    };

    assert!(Controller::with_config(config).is_err());
}

/// Test a single file run writes the document and timeline
#[test]
fn test_run_withTextFile_shouldWriteAssAndTimeline() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_text(temp_dir.path(), "poem.txt")?;
    let output_dir = temp_dir.path().join("out");
    let controller = Controller::new()?;

    let output = controller.run(&input, &output_dir, false)?.expect("output should be written");

    assert_eq!(output.ass_path, output_dir.join("poem.ass"));
    assert_eq!(output.timeline_path, Some(output_dir.join("poem.timeline.json")));
    assert_eq!(output.entry_count, 3);

    let document = std::fs::read_to_string(&output.ass_path)?;
    assert_eq!(count_dialogue_lines(&document), 3);
    assert!(document.contains("Title: poem"));

    let entries = Controller::load_timeline(output_dir.join("poem.timeline.json"))?;
    assert_eq!(entries.len(), 3);
    Ok(())
}

/// Test that existing outputs are skipped unless forced
#[test]
fn test_run_withExistingOutput_shouldRespectForceFlag() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_text(temp_dir.path(), "poem.txt")?;
    let controller = Controller::new()?;

    assert!(controller.run(&input, temp_dir.path(), false)?.is_some());
    assert!(controller.run(&input, temp_dir.path(), false)?.is_none());
    assert!(controller.run(&input, temp_dir.path(), true)?.is_some());
    Ok(())
}

/// Test folder mode with the play resolution enabled and no timeline files
#[test]
fn test_run_folder_withNestedTexts_shouldProcessEach() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_sample_text(temp_dir.path(), "a.txt")?;
    common::create_test_file(temp_dir.path(), "nested/b.txt", "single line")?;
    common::create_test_file(temp_dir.path(), "notes.md", "ignored")?;

    let mut config = Config::default();
    config.style = "revolver_up".to_string();
    config.output.include_play_resolution = true;
    config.output.write_timeline_json = false;
    let controller = Controller::with_config(config)?;

    let summary = controller.run_folder(temp_dir.path(), false)?;

    assert_eq!(summary, FolderSummary { processed: 2, skipped: 0, errors: 0 });
    let nested = std::fs::read_to_string(temp_dir.path().join("nested/b.ass"))?;
    let stats = inspect(&nested)?;
    assert_eq!(stats.event_count, 1);
    assert_eq!(stats.play_resolution, (1080, 1920));
    assert!(nested.contains("PlayResX: 1080"));
    assert!(!temp_dir.path().join("a.timeline.json").exists());
    Ok(())
}

/// Test folder mode on a directory without inputs
#[test]
fn test_run_folder_withNoTexts_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::new()?;

    assert!(controller.run_folder(temp_dir.path(), false).is_err());
    Ok(())
}

/// Test generating then playing a timeline file in real time
#[test]
fn test_play_withGeneratedFile_shouldComplete() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "short.txt", "ab\ncd")?;

    let mut config = Config::default();
    config.timing = DurationConfig {
        char_interval: Some(0.002),
        fade_duration: Some(0.004),
        pause_between_lines: Some(0.002),
        ..Default::default()
    };
    config.playback.frames_per_second = 500;
    let controller = Controller::with_config(config)?;

    let output = controller.run(&input, temp_dir.path(), false)?.expect("output should be written");
    let timeline_path = output.timeline_path.expect("timeline should be written");

    let state = tokio_test::block_on(controller.play(&timeline_path))?;

    assert_eq!(state, PlaybackState::Completed);
    Ok(())
}
