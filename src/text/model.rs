/*!
 * Hierarchical text model: document, paragraph, line, character.
 *
 * The model carries no behavior beyond construction and flattening. Wrapping
 * long lines is the job of an upstream formatter; this module only splits on
 * the line and paragraph breaks already present in the input.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// @const: Runs of whitespace collapsed to one space
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Which text element becomes one animatable unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One unit per line
    #[default]
    Line,
    /// One unit per whitespace-separated word
    Word,
    /// One unit per character
    Character,
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Line => write!(f, "line"),
            Self::Word => write!(f, "word"),
            Self::Character => write!(f, "character"),
        }
    }
}

/// Atomic animatable element.
///
/// `parent_id` is a back-reference to the id of the containing line (for word
/// and character units) or paragraph (for line units). `paragraph` and `line`
/// are document-global ordinals used to detect boundaries between units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextUnit {
    // @field: Unit text
    pub content: String,

    // @field: Position within the parent
    pub index: usize,

    // @field: Id of the containing line or paragraph
    pub parent_id: usize,

    // @field: Document-global paragraph ordinal
    pub paragraph: usize,

    // @field: Document-global line ordinal
    pub line: usize,

    // @field: Element kind this unit represents
    pub granularity: Granularity,
}

impl TextUnit {
    /// Create a line-level unit
    pub fn line(content: impl Into<String>, index: usize, paragraph: usize, line: usize) -> Self {
        Self {
            content: content.into(),
            index,
            parent_id: paragraph,
            paragraph,
            line,
            granularity: Granularity::Line,
        }
    }

    /// Number of characters, counted as Unicode scalar values
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Whether `next` begins a new paragraph
    pub fn starts_new_paragraph(&self, next: &TextUnit) -> bool {
        next.paragraph != self.paragraph
    }

    /// Whether `next` begins a new line (a new paragraph also counts)
    pub fn starts_new_line(&self, next: &TextUnit) -> bool {
        next.line != self.line
    }
}

/// One line of text inside a paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Document-global line id
    pub id: usize,
    /// Position within the paragraph
    pub index: usize,
    /// Normalized line text
    pub text: String,
}

impl Line {
    /// Characters of the line in order
    pub fn characters(&self) -> impl Iterator<Item = char> + '_ {
        self.text.chars()
    }
}

/// A run of lines separated from its neighbors by blank lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Document-global paragraph id
    pub id: usize,
    /// Lines of the paragraph
    pub lines: Vec<Line>,
}

/// Complete input text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Document {
    /// Paragraphs in reading order
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Build a document from plain text.
    ///
    /// A blank line (or several) separates paragraphs, a newline separates
    /// lines. Whitespace inside a line is collapsed and the line trimmed;
    /// lines that end up empty are dropped.
    pub fn from_plain_text(text: &str) -> Self {
        let mut paragraphs = Vec::new();
        let mut current: Vec<Line> = Vec::new();
        let mut next_line_id = 0;

        for raw in text.lines() {
            let normalized = normalize_line(raw);
            if normalized.is_empty() {
                if !current.is_empty() {
                    paragraphs.push(Paragraph {
                        id: paragraphs.len(),
                        lines: std::mem::take(&mut current),
                    });
                }
                continue;
            }

            current.push(Line {
                id: next_line_id,
                index: current.len(),
                text: normalized,
            });
            next_line_id += 1;
        }

        if !current.is_empty() {
            paragraphs.push(Paragraph {
                id: paragraphs.len(),
                lines: current,
            });
        }

        Self { paragraphs }
    }

    /// Total number of lines
    pub fn line_count(&self) -> usize {
        self.paragraphs.iter().map(|p| p.lines.len()).sum()
    }

    /// Whether the document has no text at all
    pub fn is_empty(&self) -> bool {
        self.line_count() == 0
    }

    /// Iterate over every line together with its paragraph id
    pub fn lines(&self) -> impl Iterator<Item = (usize, &Line)> + '_ {
        self.paragraphs
            .iter()
            .flat_map(|p| p.lines.iter().map(move |l| (p.id, l)))
    }

    /// Flatten the document into units of the given granularity, in reading order
    pub fn units(&self, granularity: Granularity) -> Vec<TextUnit> {
        let mut units = Vec::new();

        for (paragraph_id, line) in self.lines() {
            match granularity {
                Granularity::Line => {
                    units.push(TextUnit::line(line.text.clone(), line.index, paragraph_id, line.id));
                }
                Granularity::Word => {
                    for (index, word) in line.text.split(' ').enumerate() {
                        units.push(TextUnit {
                            content: word.to_string(),
                            index,
                            parent_id: line.id,
                            paragraph: paragraph_id,
                            line: line.id,
                            granularity,
                        });
                    }
                }
                Granularity::Character => {
                    for (index, ch) in line.characters().enumerate() {
                        units.push(TextUnit {
                            content: ch.to_string(),
                            index,
                            parent_id: line.id,
                            paragraph: paragraph_id,
                            line: line.id,
                            granularity,
                        });
                    }
                }
            }
        }

        units
    }
}

/// Collapse whitespace runs and trim
pub fn normalize_line(raw: &str) -> String {
    WHITESPACE_REGEX.replace_all(raw.trim(), " ").into_owned()
}
