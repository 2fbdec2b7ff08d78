/*!
 * Property tests for duration strategies and timeline construction
 */

use rand::Rng;

use scrollcast::styles::AnimationStyle;
use scrollcast::text::{Document, Granularity, TextUnit};
use scrollcast::timing::strategy::{reveal_duration_ms, PHASE_STATIC};
use scrollcast::timing::{DurationConfig, DurationStrategy, Timeline};

fn random_text(rng: &mut impl Rng, line_count: usize) -> String {
    let mut text = String::new();
    for i in 0..line_count {
        let len = rng.random_range(0..40);
        let line: String = (0..len).map(|_| rng.random_range('a'..='z')).collect();
        text.push_str(&line);
        text.push('\n');
        if i % 3 == 2 {
            text.push('\n');
        }
    }
    text
}

/// Test the character reveal formula on random line lengths
#[test]
fn test_characterReveal_withRandomLengths_shouldFollowFormula() {
    let mut rng = rand::rng();
    let config = DurationConfig {
        char_interval: Some(0.3),
        fade_duration: Some(0.1),
        ..Default::default()
    };

    for _ in 0..200 {
        let n = rng.random_range(1..80usize);
        let content: String = std::iter::repeat_n('x', n).collect();
        let unit = TextUnit::line(content, 0, 0, 0);

        let entry = DurationStrategy::CharacterReveal.compute_entry(&unit, 0, &config);

        assert_eq!(entry.duration_ms, (n as u64 - 1) * 300 + 100);
        assert_eq!(entry.duration_ms, reveal_duration_ms(n, &config));
    }
}

/// Test the documented single-line example with a display floor
#[test]
fn test_characterReveal_withFloor_shouldReachMinimumDisplay() {
    let config = DurationConfig {
        char_interval: Some(0.3),
        fade_duration: Some(0.3),
        min_display_duration: Some(2.0),
        ..Default::default()
    };
    let units = Document::from_plain_text("abcd").units(Granularity::Line);

    let timeline = Timeline::build(&units, DurationStrategy::CharacterReveal, &config);

    assert_eq!(timeline.entries[0].duration_ms, 2000);
    assert_eq!(timeline.total_duration_ms, 2000);
}

/// Test timeline invariants for every style over random documents
#[test]
fn test_build_withRandomDocuments_shouldHoldInvariants() {
    let mut rng = rand::rng();

    for _ in 0..50 {
        let line_count = rng.random_range(0..20);
        let text = random_text(&mut rng, line_count);
        for style in AnimationStyle::ALL {
            let units = Document::from_plain_text(&text).units(style.granularity());
            let timeline = Timeline::build(&units, style.strategy(), &style.preset());

            assert_eq!(timeline.len(), units.len());
            let max_end = timeline.entries.iter().map(|e| e.end_ms).max().unwrap_or(0);
            assert_eq!(timeline.total_duration_ms, max_end);

            for (i, entry) in timeline.entries.iter().enumerate() {
                assert_eq!(entry.unit_index, i);
                assert_eq!(entry.end_ms, entry.start_ms + entry.duration_ms);
                assert!(entry.is_consistent());
            }

            for pair in timeline.entries.windows(2) {
                assert!(pair[1].start_ms >= pair[0].start_ms);
            }
        }
    }
}

/// Test that phase-based entries carry contiguous phases summing to the duration
#[test]
fn test_phaseBased_withRandomKnobs_shouldKeepPhasesContiguous() {
    let mut rng = rand::rng();

    for _ in 0..100 {
        let config = DurationConfig {
            fade_in_duration: Some(rng.random_range(0.0..2.0)),
            static_duration: Some(rng.random_range(0.0..5.0)),
            fade_out_duration: Some(rng.random_range(0.0..2.0)),
            min_display_duration: if rng.random_bool(0.5) { Some(rng.random_range(0.0..6.0)) } else { None },
            ..Default::default()
        };
        let unit = TextUnit::line("line", 0, 0, 0);

        let entry = DurationStrategy::PhaseBased.compute_entry(&unit, 0, &config);
        let phases = entry.sub_phases.as_ref().unwrap();

        assert_eq!(phases[0].offset_ms, 0);
        for pair in phases.windows(2) {
            assert_eq!(pair[1].offset_ms, pair[0].end_offset_ms());
        }
        assert_eq!(phases.iter().map(|p| p.duration_ms).sum::<u64>(), entry.duration_ms);
        if let Some(floor) = config.min_display_ms() {
            assert!(entry.duration_ms >= floor);
        }
        assert!(entry.phase(PHASE_STATIC).is_some());
    }
}

/// Test that building is deterministic
#[test]
fn test_build_twice_shouldProduceIdenticalTimelines() {
    let units = Document::from_plain_text("one\ntwo\n\nthree").units(Granularity::Line);
    let config = AnimationStyle::RailwayScroll.preset();

    let first = Timeline::build(&units, DurationStrategy::PhaseBased, &config);
    let second = Timeline::build(&units, DurationStrategy::PhaseBased, &config);

    assert_eq!(first, second);
}

/// Test that scroll speed shortens passthrough entries
#[test]
fn test_passthrough_withScrollSpeed_shouldDivideDuration() {
    let config = DurationConfig {
        passthrough_duration: Some(8.0),
        scroll_speed: Some(2.0),
        ..Default::default()
    };
    let unit = TextUnit::line("credits", 0, 0, 0);

    let entry = DurationStrategy::ContinuousPassthrough.compute_entry(&unit, 100, &config);

    assert_eq!(entry.duration_ms, 4000);
    assert_eq!(entry.end_ms, 4100);
}

/// Test that timelines survive the JSON interchange format
#[test]
fn test_timeline_json_shouldKeepStrategyAndConfig() {
    let units = Document::from_plain_text("a\nb").units(Granularity::Line);
    let timeline = Timeline::build(&units, DurationStrategy::CharacterReveal, &AnimationStyle::TypewriterFade.preset());

    let json = serde_json::to_string(&timeline).unwrap();
    let restored: Timeline = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, timeline);
}

/// Test that unvalidated huge knobs saturate instead of overflowing
#[test]
fn test_build_withHugeKnobs_shouldSaturate() {
    let units = Document::from_plain_text("a\nb\nc").units(Granularity::Line);
    let config = DurationConfig {
        passthrough_duration: Some(1e30),
        ..Default::default()
    };

    let timeline = Timeline::build(&units, DurationStrategy::ContinuousPassthrough, &config);

    assert_eq!(timeline.len(), 3);
    assert_eq!(timeline.total_duration_ms, u64::MAX);
    assert!(timeline.entries.iter().all(|e| e.is_consistent()));

    let huge_interval = DurationConfig {
        char_interval: Some(1e20),
        ..Default::default()
    };
    let reveal = Timeline::build(&units, DurationStrategy::CharacterReveal, &huge_interval);
    assert_eq!(reveal.len(), 3);
}
