use std::fmt::Write as _;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::styles::AnimationStyle;
use crate::subtitle::commands::{animated_text, Canvas};
use crate::subtitle::timestamp::format_timestamp;
use crate::timing::entry::TimingEntry;
use crate::timing::timeline::Timeline;

// @module: ASS (v4.00+) document writer

// @const: Column list of the styles section
pub const STYLE_FORMAT: &str = "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding";

// @const: Column list of the events section
pub const EVENT_FORMAT: &str = "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";

// @const: Bold through Encoding, centred with a 3px outline
const STYLE_TAIL: &str = "1,0,0,0,100,100,0,0,1,3,0,5,60,60,60,1";

/// Header and style settings of a generated document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssOptions {
    // @field: `Title:` value
    pub title: String,

    // @field: Style font
    pub font_name: String,

    // @field: Style font size
    pub font_size: u32,

    // @field: Colours in `&HAABBGGRR` form
    pub primary_colour: String,
    pub secondary_colour: String,
    pub outline_colour: String,
    pub back_colour: String,

    /// `PlayResX`/`PlayResY`, written only when set.
    ///
    /// Animation positions use this resolution, or a 1080x1920 canvas when
    /// it is absent.
    pub play_resolution: Option<(u32, u32)>,
}

impl Default for AssOptions {
    fn default() -> Self {
        Self {
            title: "scrollcast".to_string(),
            font_name: "Arial".to_string(),
            font_size: 64,
            primary_colour: "&H00FFFFFF".to_string(),
            secondary_colour: "&H000000FF".to_string(),
            outline_colour: "&H00000000".to_string(),
            back_colour: "&H80000000".to_string(),
            play_resolution: None,
        }
    }
}

impl AssOptions {
    /// Canvas the animation commands are positioned against
    pub fn canvas(&self) -> Canvas {
        let mut canvas = Canvas {
            font_size: self.font_size,
            ..Default::default()
        };
        if let Some((width, height)) = self.play_resolution {
            canvas.width = width;
            canvas.height = height;
        }
        canvas
    }
}

/// Writes timelines as ASS documents
#[derive(Debug, Clone, Default)]
pub struct AssSerializer {
    options: AssOptions,
}

impl AssSerializer {
    pub fn new(options: AssOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AssOptions {
        &self.options
    }

    /// Serialize `timeline` with every event using `style_name`.
    ///
    /// Events are written in timeline order; an empty timeline yields the
    /// header alone. The animation commands follow the style `style_name`
    /// names, see `AnimationStyle::for_timeline`.
    pub fn serialize(&self, timeline: &Timeline, style_name: &str) -> String {
        let mut out = self.header(style_name);
        let style = AnimationStyle::for_timeline(style_name, timeline.strategy);

        for entry in &timeline.entries {
            out.push_str(&self.dialogue_line(timeline, entry, style, style_name));
            out.push('\n');
        }

        debug!(
            "Serialized {} dialogue events with style {}",
            timeline.entries.len(),
            style_name
        );

        out
    }

    /// Script info, styles and events headers
    pub fn header(&self, style_name: &str) -> String {
        let opts = &self.options;
        let mut header = String::new();

        // Writing to a String cannot fail
        let _ = writeln!(header, "[Script Info]");
        let _ = writeln!(header, "Title: {}", opts.title);
        let _ = writeln!(header, "ScriptType: v4.00+");
        if let Some((x, y)) = opts.play_resolution {
            let _ = writeln!(header, "PlayResX: {}", x);
            let _ = writeln!(header, "PlayResY: {}", y);
        }
        let _ = writeln!(header, "[V4+ Styles]");
        let _ = writeln!(header, "{}", STYLE_FORMAT);
        let _ = writeln!(
            header,
            "Style: {},{},{},{},{},{},{},{}",
            style_name,
            opts.font_name,
            opts.font_size,
            opts.primary_colour,
            opts.secondary_colour,
            opts.outline_colour,
            opts.back_colour,
            STYLE_TAIL
        );
        let _ = writeln!(header, "[Events]");
        let _ = writeln!(header, "{}", EVENT_FORMAT);

        header
    }

    /// One `Dialogue:` line, without the trailing newline
    pub fn dialogue_line(
        &self,
        timeline: &Timeline,
        entry: &TimingEntry,
        style: AnimationStyle,
        style_name: &str,
    ) -> String {
        // end is derived from the duration so a zero-length entry ends where it starts
        let start = entry.start_ms;
        let end = start.saturating_add(entry.duration_ms);
        let text = animated_text(style, entry, &timeline.config, self.options.canvas());

        format!(
            "Dialogue: 0,{},{},{},,0,0,0,,{}",
            format_timestamp(start),
            format_timestamp(end),
            style_name,
            text
        )
    }
}

/// Serialize with default options
pub fn serialize(timeline: &Timeline, style_name: &str) -> String {
    AssSerializer::default().serialize(timeline, style_name)
}
