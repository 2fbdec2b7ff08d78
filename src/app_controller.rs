use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::playback::{
    entries_from_json, LoggingRenderer, PlaybackEntry, PlaybackEvent, PlaybackState, Renderer, Scheduler,
};
use crate::styles::AnimationStyle;
use crate::subtitle::{count_dialogue_lines, AssSerializer};
use crate::text::Document;
use crate::timing::{DurationConfig, Timeline};

// @module: Application controller for timeline generation and playback

// @const: Extension of text inputs picked up in folder mode
pub const INPUT_EXTENSION: &str = "txt";

// @const: Extension of timeline interchange files
pub const TIMELINE_EXTENSION: &str = "timeline.json";

/// Files written for one input
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutput {
    pub ass_path: PathBuf,
    pub timeline_path: Option<PathBuf>,
    pub entry_count: usize,
    pub total_duration_ms: u64,
}

/// Counts from a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Style resolved from the configuration
    style: AnimationStyle,

    // @field: Preset merged with configured overrides
    timing: DurationConfig,
}

impl Controller {
    /// Create a new controller with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let style = config.animation_style()?;
        let timing = style.resolve_config(&config.timing);
        debug!("Using style {} ({} strategy)", style, style.strategy());

        Ok(Self { config, style, timing })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn style(&self) -> AnimationStyle {
        self.style
    }

    /// Resolved timing knobs
    pub fn timing(&self) -> &DurationConfig {
        &self.timing
    }

    /// Segment `text` and time its units
    pub fn build_timeline(&self, text: &str) -> Timeline {
        let document = Document::from_plain_text(text);
        let units = document.units(self.style.granularity());
        Timeline::build(&units, self.style.strategy(), &self.timing)
    }

    /// Build the timeline and its ASS document for `text`
    pub fn generate(&self, text: &str, title: &str) -> (Timeline, String) {
        let timeline = self.build_timeline(text);
        let serializer = AssSerializer::new(self.config.output.ass_options(title));
        let document = serializer.serialize(&timeline, self.style.ass_style_name());
        (timeline, document)
    }

    /// Generate output for one text file.
    ///
    /// Returns `None` when the output exists and `force_overwrite` is off.
    pub fn run(&self, input_file: &Path, output_dir: &Path, force_overwrite: bool) -> Result<Option<GenerationOutput>> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        FileManager::ensure_dir(output_dir)?;

        let ass_path = FileManager::generate_output_path(input_file, output_dir, "ass");
        if ass_path.exists() && !force_overwrite {
            warn!("Skipping {}, output already exists (use -f to force overwrite)", ass_path.display());
            return Ok(None);
        }

        let text = FileManager::read_to_string(input_file)?;
        let title = self.title_for(input_file);
        let (timeline, document) = self.generate(&text, &title);

        // Every entry must have produced exactly one event
        let events = count_dialogue_lines(&document);
        if events != timeline.len() {
            return Err(anyhow!(
                "Generated {} dialogue events for {} timeline entries",
                events,
                timeline.len()
            ));
        }

        FileManager::write_to_file(&ass_path, &document)?;

        let timeline_path = if self.config.output.write_timeline_json {
            let path = FileManager::generate_output_path(input_file, output_dir, TIMELINE_EXTENSION);
            let json = serde_json::to_string_pretty(&timeline).context("Failed to serialize timeline")?;
            FileManager::write_to_file(&path, &json)?;
            Some(path)
        } else {
            None
        };

        info!(
            "Success: {} ({} entries, {})",
            ass_path.display(),
            timeline.len(),
            Self::format_duration(timeline.total_duration_ms)
        );

        Ok(Some(GenerationOutput {
            ass_path,
            timeline_path,
            entry_count: timeline.len(),
            total_duration_ms: timeline.total_duration_ms,
        }))
    }

    /// Generate output for every text file under `input_dir`, next to each input
    pub fn run_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<FolderSummary> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let inputs = FileManager::find_files(input_dir, INPUT_EXTENSION)?;
        if inputs.is_empty() {
            return Err(anyhow!("No .{} files found in directory: {:?}", INPUT_EXTENSION, input_dir));
        }

        let folder_pb = ProgressBar::new(inputs.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));

        let mut summary = FolderSummary::default();

        for input in &inputs {
            let file_name = input
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            let output_dir = input.parent().map(Path::to_path_buf).unwrap_or_else(|| input_dir.to_path_buf());

            match self.run(input, &output_dir, force_overwrite) {
                Ok(Some(_)) => summary.processed += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    summary.errors += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");
        info!(
            "Folder processing completed: {} processed, {} skipped, {} errors",
            summary.processed, summary.skipped, summary.errors
        );

        Ok(summary)
    }

    /// Read playback entries from a timeline JSON file
    pub fn load_timeline<P: AsRef<Path>>(path: P) -> Result<Vec<PlaybackEntry>> {
        let path = path.as_ref();
        let json = FileManager::read_to_string(path)?;
        entries_from_json(&json).with_context(|| format!("Failed to load timeline: {}", path.display()))
    }

    /// Replay a timeline file in real time, logging each activation
    pub async fn play(&self, timeline_file: &Path) -> Result<PlaybackState> {
        let entries = Self::load_timeline(timeline_file)?;
        let unit_count = entries.len();

        let mut scheduler = Scheduler::new();
        scheduler.load(entries);

        let bar = ProgressBar::new(scheduler.total_duration_ms());
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}ms {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(template_result.progress_chars("█▓▒░"));

        let mut renderer = ProgressRenderer {
            inner: LoggingRenderer::new(unit_count),
            bar: bar.clone(),
        };

        let state = scheduler
            .play(&mut renderer, self.config.playback.frame_interval())
            .await?;

        bar.finish_with_message(format!("{} units", renderer.inner.activated()));
        Ok(state)
    }

    fn title_for(&self, input_file: &Path) -> String {
        if !self.config.title.is_empty() {
            return self.config.title.clone();
        }
        input_file
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "scrollcast".to_string())
    }

    // Format milliseconds in a human-readable format
    pub fn format_duration(ms: u64) -> String {
        let total_seconds = ms / 1000;
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, ms % 1000)
        }
    }
}

/// Logging renderer that also moves a progress bar
struct ProgressRenderer {
    inner: LoggingRenderer,
    bar: ProgressBar,
}

impl Renderer for ProgressRenderer {
    fn unit_count(&self) -> usize {
        self.inner.unit_count()
    }

    fn on_event(&mut self, event: &PlaybackEvent) -> Result<()> {
        self.bar.set_position(event.global_time_ms());
        if let PlaybackEvent::UnitActivated { data, .. } = event {
            self.bar.set_message(data.content.clone());
        }
        self.bar.suspend(|| self.inner.on_event(event))
    }
}
