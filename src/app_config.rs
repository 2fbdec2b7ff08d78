use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::AppError;
use crate::styles::AnimationStyle;
use crate::subtitle::AssOptions;
use crate::timing::DurationConfig;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Animation style (or bare strategy name)
    #[serde(default = "default_style")]
    pub style: String,

    /// Document title; the input file stem when empty
    #[serde(default)]
    pub title: String,

    /// Duration overrides layered over the style preset
    #[serde(default)]
    pub timing: DurationConfig,

    /// Subtitle output settings
    #[serde(default)]
    pub output: AssOutputConfig,

    /// Playback settings
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Configuration for the generated ASS document
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AssOutputConfig {
    // @field: Style font
    #[serde(default = "default_font_name")]
    pub font_name: String,

    // @field: Style font size
    #[serde(default = "default_font_size")]
    pub font_size: u32,

    // @field: Canvas width
    #[serde(default = "default_play_res_x")]
    pub play_res_x: u32,

    // @field: Canvas height
    #[serde(default = "default_play_res_y")]
    pub play_res_y: u32,

    // @field: Write PlayResX/PlayResY into the header
    #[serde(default)]
    pub include_play_resolution: bool,

    // @field: Write `<stem>.timeline.json` next to the document
    #[serde(default = "default_true")]
    pub write_timeline_json: bool,
}

impl Default for AssOutputConfig {
    fn default() -> Self {
        Self {
            font_name: default_font_name(),
            font_size: default_font_size(),
            play_res_x: default_play_res_x(),
            play_res_y: default_play_res_y(),
            include_play_resolution: false,
            write_timeline_json: true,
        }
    }
}

impl AssOutputConfig {
    /// Serializer options for a document titled `title`
    pub fn ass_options(&self, title: &str) -> AssOptions {
        let mut options = AssOptions {
            title: title.to_string(),
            font_name: self.font_name.clone(),
            font_size: self.font_size,
            ..Default::default()
        };
        if self.include_play_resolution {
            options.play_resolution = Some((self.play_res_x, self.play_res_y));
        }
        options
    }
}

/// Configuration for real-time playback
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaybackConfig {
    /// Scheduler frame rate
    #[serde(default = "default_frames_per_second")]
    pub frames_per_second: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            frames_per_second: default_frames_per_second(),
        }
    }
}

impl PlaybackConfig {
    /// Time between two frames
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_micros(1_000_000 / u64::from(self.frames_per_second.max(1)))
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_style() -> String {
    AnimationStyle::default().name().to_string()
}

fn default_font_name() -> String {
    "Arial".to_string()
}

fn default_font_size() -> u32 {
    64
}

fn default_play_res_x() -> u32 {
    1080
}

fn default_play_res_y() -> u32 {
    1920
}

fn default_frames_per_second() -> u32 {
    60
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load configuration, writing the defaults first when the file does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()));
        }

        log::warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Resolved animation style
    pub fn animation_style(&self) -> Result<AnimationStyle> {
        Ok(AnimationStyle::resolve(&self.style)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AppError> {
        AnimationStyle::resolve(&self.style)?;
        self.timing.validate()?;

        if self.output.font_size == 0 {
            return Err(AppError::Config("Font size must be greater than zero".to_string()));
        }
        if self.output.font_name.trim().is_empty() {
            return Err(AppError::Config("Font name must not be empty".to_string()));
        }
        if self.output.play_res_x == 0 || self.output.play_res_y == 0 {
            return Err(AppError::Config(format!(
                "Play resolution must be non-zero, got {}x{}",
                self.output.play_res_x, self.output.play_res_y
            )));
        }
        if self.playback.frames_per_second == 0 || self.playback.frames_per_second > 1000 {
            return Err(AppError::Config(format!(
                "Frames per second must be between 1 and 1000, got {}",
                self.playback.frames_per_second
            )));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: default_style(),
            title: String::new(),
            timing: DurationConfig::default(),
            output: AssOutputConfig::default(),
            playback: PlaybackConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
