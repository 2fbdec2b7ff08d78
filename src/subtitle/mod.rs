/*!
 * ASS subtitle output.
 *
 * - `timestamp`: `H:MM:SS.CC` formatting and parsing
 * - `commands`: per-style override tags
 * - `ass`: the document writer
 * - `reader`: re-parsing and inspecting generated documents
 */

pub mod ass;
pub mod commands;
pub mod reader;
pub mod timestamp;

// Re-export main types
pub use ass::{serialize, AssOptions, AssSerializer};
pub use commands::Canvas;
pub use reader::{count_dialogue_lines, inspect, parse_dialogue, DialogueEvent, DocumentStats};
pub use timestamp::{format_timestamp, parse_timestamp};
