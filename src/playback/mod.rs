/*!
 * Timeline playback.
 *
 * - `clock`: time sources
 * - `events`: scheduler input entries and renderer events
 * - `renderer`: the renderer contract and stock renderers
 * - `scheduler`: the single-clock dispatcher
 */

pub mod clock;
pub mod events;
pub mod renderer;
pub mod scheduler;

// Re-export main types
pub use clock::{Clock, ManualClock, SystemClock};
pub use events::{entries_from_json, PlaybackEntry, PlaybackEvent};
pub use renderer::{LoggingRenderer, RecordingRenderer, Renderer};
pub use scheduler::{PlaybackState, Scheduler, StopHandle, TimingSource, FALLBACK_DURATION_MS};
