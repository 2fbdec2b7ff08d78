use crate::styles::AnimationStyle;
use crate::timing::config::DurationConfig;
use crate::timing::entry::TimingEntry;
use crate::timing::strategy::{character_offsets, PHASE_FADE_IN, PHASE_FADE_OUT};

// @module: ASS override tags that animate one dialogue event

// @const: Distance above and below the centre a railway line travels
const RISE_DISTANCE: i64 = 200;

// @const: Distance a revolver line climbs after its hold
const REVOLVER_RISE: i64 = 300;

// @const: Margin kept outside the canvas for passthrough moves
const OFFSCREEN_MARGIN: i64 = 100;

/// Canvas the override tags are positioned against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    /// Style font size, used to estimate text widths
    pub font_size: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
            font_size: 64,
        }
    }
}

impl Canvas {
    fn centre(&self) -> (i64, i64) {
        (i64::from(self.width) / 2, i64::from(self.height) / 2)
    }

    /// Rough rendered width of `text`: ASCII at 0.6 em, everything else at 1 em
    pub fn estimate_text_width(&self, text: &str) -> i64 {
        let font_size = i64::from(self.font_size);
        text.chars()
            .map(|c| if c.is_ascii() { font_size * 3 / 5 } else { font_size })
            .sum()
    }
}

/// Render the `<animation-command><content>` text field of one entry.
///
/// Every style writes a single override block (per character for the
/// typewriter styles), so one entry stays one dialogue event.
pub fn animated_text(style: AnimationStyle, entry: &TimingEntry, config: &DurationConfig, canvas: Canvas) -> String {
    match style {
        AnimationStyle::TypewriterFade => typewriter_fade(entry, config, canvas),
        AnimationStyle::TypewriterPop => typewriter_pop(entry, config, canvas),
        AnimationStyle::RailwayScroll => railway_scroll(entry, canvas),
        AnimationStyle::SimpleRole => simple_role(entry, canvas),
        AnimationStyle::RevolverUp => revolver_up(entry, config, canvas),
        AnimationStyle::HorizontalTicker => horizontal_ticker(entry, canvas),
    }
}

fn typewriter_fade(entry: &TimingEntry, config: &DurationConfig, canvas: Canvas) -> String {
    let (cx, cy) = canvas.centre();
    let chars: Vec<char> = entry.content.chars().collect();
    let offsets = character_offsets(chars.len(), config);

    let mut text = format!("{{\\an5\\pos({},{})}}", cx, cy);
    for (ch, (from, to)) in chars.iter().zip(offsets) {
        text.push_str(&format!("{{\\alpha&HFF&\\t({},{},\\alpha&H00&)}}", from, to));
        text.push_str(&escape_text(&ch.to_string()));
    }
    text
}

// Each character scales 0 -> 150% -> 80% -> 100% over its fade window; the
// whole unit fades out over the last fade once every character has landed
fn typewriter_pop(entry: &TimingEntry, config: &DurationConfig, canvas: Canvas) -> String {
    let (cx, cy) = canvas.centre();
    let chars: Vec<char> = entry.content.chars().collect();
    let offsets = character_offsets(chars.len(), config);

    let landed = offsets.last().map(|(_, end)| *end).unwrap_or(0);
    let fade_out = (entry.duration_ms > landed).then(|| {
        let from = entry.duration_ms.saturating_sub(config.fade_duration_ms()).max(landed);
        format!("\\t({},{},\\alpha&HFF&)", from, entry.duration_ms)
    });

    let mut text = format!("{{\\an5\\pos({},{})}}", cx, cy);
    for (ch, (from, to)) in chars.iter().zip(offsets) {
        let third = (to - from) / 3;
        text.push_str(&format!(
            "{{\\alpha&HFF&\\fscx0\\fscy0\\t({},{},\\alpha&H00&\\fscx150\\fscy150)\\t({},{},\\fscx80\\fscy80)\\t({},{},\\fscx100\\fscy100){}}}",
            from,
            from + third,
            from + third,
            from + 2 * third,
            from + 2 * third,
            to,
            fade_out.as_deref().unwrap_or("")
        ));
        text.push_str(&escape_text(&ch.to_string()));
    }
    text
}

// One event allows one \move, so the line climbs from below the centre to
// above it across the whole entry and crosses the centre mid-hold
fn railway_scroll(entry: &TimingEntry, canvas: Canvas) -> String {
    let (cx, cy) = canvas.centre();
    let fade_in = entry.phase(PHASE_FADE_IN).map(|p| p.duration_ms).unwrap_or(0);
    let fade_out_start = entry
        .phase(PHASE_FADE_OUT)
        .map(|p| p.offset_ms)
        .unwrap_or(entry.duration_ms);

    format!(
        "{{\\an5\\move({},{},{},{},0,{})\\alpha&HFF&\\t(0,{},\\alpha&H00&)\\t({},{},\\alpha&HFF&)}}{}",
        cx,
        cy + RISE_DISTANCE,
        cx,
        cy - RISE_DISTANCE,
        entry.duration_ms,
        fade_in,
        fade_out_start,
        entry.duration_ms,
        escape_text(&entry.content)
    )
}

fn simple_role(entry: &TimingEntry, canvas: Canvas) -> String {
    let (cx, _) = canvas.centre();
    format!(
        "{{\\an5\\move({},{},{},{},0,{})}}{}",
        cx,
        i64::from(canvas.height) + OFFSCREEN_MARGIN,
        cx,
        -OFFSCREEN_MARGIN,
        entry.duration_ms,
        escape_text(&entry.content)
    )
}

// Shown at the centre, held for the static knob, then climbs while fading out
fn revolver_up(entry: &TimingEntry, config: &DurationConfig, canvas: Canvas) -> String {
    let (cx, cy) = canvas.centre();
    let hold = config.static_ms().min(entry.duration_ms);

    format!(
        "{{\\an5\\move({},{},{},{},{},{})\\alpha&H00&\\t({},{},\\alpha&HFF&)}}{}",
        cx,
        cy,
        cx,
        cy - REVOLVER_RISE,
        hold,
        entry.duration_ms,
        hold,
        entry.duration_ms,
        escape_text(&entry.content)
    )
}

// Right-to-left across the lower band, fading over the last tenth
fn horizontal_ticker(entry: &TimingEntry, canvas: Canvas) -> String {
    let y = i64::from(canvas.height) * 5 / 6;
    let start_x = i64::from(canvas.width) + OFFSCREEN_MARGIN;
    let end_x = -canvas.estimate_text_width(&entry.content) - OFFSCREEN_MARGIN;
    let fade_start = entry.duration_ms - entry.duration_ms / 10;

    format!(
        "{{\\an4\\move({},{},{},{},0,{})\\t({},{},\\alpha&HFF&)}}{}",
        start_x,
        y,
        end_x,
        y,
        entry.duration_ms,
        fade_start,
        entry.duration_ms,
        escape_text(&entry.content)
    )
}

/// Keep text from being read as override blocks or line breaks
pub fn escape_text(text: &str) -> String {
    text.replace('{', "(").replace('}', ")").replace('\n', "\\N")
}

/// Remove override blocks, leaving the visible text
pub fn strip_overrides(text: &str) -> String {
    let mut visible = String::with_capacity(text.len());
    let mut depth = 0usize;

    for ch in text.chars() {
        match ch {
            '{' => depth += 1,
            '}' if depth > 0 => depth -= 1,
            _ if depth == 0 => visible.push(ch),
            _ => {}
        }
    }

    visible.replace("\\N", "\n")
}
