/*!
 * Reading generated ASS documents back.
 *
 * Used to check that a document carries one event per timeline entry and to
 * summarise what it contains:
 * - Dialogue events and their timing
 * - Style definitions with their font
 * - Play resolution
 * - Events that overlap in time
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::errors::SubtitleError;
use crate::subtitle::commands::strip_overrides;
use crate::subtitle::timestamp::parse_timestamp;

/// Canvas assumed when a document has no `PlayResX`/`PlayResY`
pub const DEFAULT_PLAY_RESOLUTION: (u32, u32) = (1080, 1920);

static PLAY_RES_X_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^PlayResX:\s*(\d+)").unwrap());
static PLAY_RES_Y_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^PlayResY:\s*(\d+)").unwrap());
static STYLE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^Style:\s*([^,]+),([^,]+),(\d+),").unwrap());

/// One parsed `Dialogue:` line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialogueEvent {
    pub layer: u32,
    pub start_ms: u64,
    pub end_ms: u64,
    pub style: String,
    /// Text field including override blocks
    pub text: String,
}

impl DialogueEvent {
    /// Text as displayed, without override blocks
    pub fn visible_text(&self) -> String {
        strip_overrides(&self.text)
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }
}

/// Style definition found in a document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleInfo {
    pub name: String,
    pub font_name: String,
    pub font_size: u32,
}

/// Summary of an ASS document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentStats {
    /// Number of `Dialogue:` events
    pub event_count: usize,
    /// Number of `Style:` definitions
    pub style_count: usize,
    pub styles: Vec<StyleInfo>,
    pub play_resolution: (u32, u32),
    /// Event pairs that are on screen at the same time
    pub overlap_count: usize,
    /// Longest visible text, in characters
    pub max_visible_len: usize,
    /// Mean visible text length, in characters
    pub avg_visible_len: f64,
    /// Latest event end
    pub last_end_ms: u64,
}

/// Parse a single `Dialogue:` line
pub fn parse_dialogue(line: &str) -> Result<DialogueEvent, SubtitleError> {
    let body = line
        .trim_end_matches(['\r', '\n'])
        .strip_prefix("Dialogue:")
        .ok_or_else(|| SubtitleError::MalformedDialogue(line.to_string()))?;

    // The text field may itself contain commas
    let fields: Vec<&str> = body.trim_start().splitn(10, ',').collect();
    if fields.len() != 10 {
        return Err(SubtitleError::MalformedDialogue(line.to_string()));
    }

    let layer = fields[0]
        .trim()
        .parse::<u32>()
        .map_err(|_| SubtitleError::MalformedDialogue(line.to_string()))?;
    let start_ms = parse_timestamp(fields[1])?;
    let end_ms = parse_timestamp(fields[2])?;

    Ok(DialogueEvent {
        layer,
        start_ms,
        end_ms,
        style: fields[3].trim().to_string(),
        text: fields[9].to_string(),
    })
}

/// Parse every `Dialogue:` line of a document
pub fn parse_dialogues(document: &str) -> Result<Vec<DialogueEvent>, SubtitleError> {
    document
        .lines()
        .filter(|line| line.starts_with("Dialogue:"))
        .map(parse_dialogue)
        .collect()
}

/// Count `Dialogue:` lines without parsing them
pub fn count_dialogue_lines(document: &str) -> usize {
    document
        .lines()
        .filter(|line| line.starts_with("Dialogue:"))
        .count()
}

/// Summarise a document
pub fn inspect(document: &str) -> Result<DocumentStats, SubtitleError> {
    let events = parse_dialogues(document)?;

    let styles: Vec<StyleInfo> = STYLE_REGEX
        .captures_iter(document)
        .map(|caps| StyleInfo {
            name: caps[1].trim().to_string(),
            font_name: caps[2].trim().to_string(),
            font_size: caps[3].parse().unwrap_or(0),
        })
        .collect();

    let play_resolution = match (capture_u32(&PLAY_RES_X_REGEX, document), capture_u32(&PLAY_RES_Y_REGEX, document)) {
        (Some(x), Some(y)) => (x, y),
        _ => DEFAULT_PLAY_RESOLUTION,
    };

    let lengths: Vec<usize> = events.iter().map(|e| e.visible_text().chars().count()).collect();
    let max_visible_len = lengths.iter().copied().max().unwrap_or(0);
    let avg_visible_len = if lengths.is_empty() {
        0.0
    } else {
        lengths.iter().sum::<usize>() as f64 / lengths.len() as f64
    };

    let mut by_start: Vec<&DialogueEvent> = events.iter().collect();
    by_start.sort_by_key(|e| e.start_ms);
    let overlap_count = by_start
        .windows(2)
        .filter(|pair| pair[0].end_ms > pair[1].start_ms)
        .count();

    Ok(DocumentStats {
        event_count: events.len(),
        style_count: styles.len(),
        styles,
        play_resolution,
        overlap_count,
        max_visible_len,
        avg_visible_len,
        last_end_ms: events.iter().map(|e| e.end_ms).max().unwrap_or(0),
    })
}

fn capture_u32(regex: &Regex, document: &str) -> Option<u32> {
    regex
        .captures(document)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
