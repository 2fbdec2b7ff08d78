/*!
 * Text unit model.
 *
 * - `model`: document → paragraph → line → character, plus flattening into
 *   `TextUnit`s at line, word or character granularity
 */

pub mod model;

pub use model::{Document, Granularity, Line, Paragraph, TextUnit};
