// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use scrollcast::app_config::{self, Config};
use scrollcast::styles::AnimationStyle;
use scrollcast::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate an ASS document and timeline from a text file or directory
    Generate(GenerateArgs),

    /// Replay a timeline JSON file in real time
    Play(PlayArgs),

    /// List available animation styles
    Styles,

    /// Generate shell completions for scrollcast
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input text file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Animation style or strategy name
    #[arg(short, long)]
    style: Option<String>,

    /// Output directory (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Timeline JSON file to replay
    #[arg(value_name = "TIMELINE_JSON")]
    timeline: PathBuf,

    /// Frames per second of the playback loop
    #[arg(long)]
    fps: Option<u32>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// scrollcast - animated text timelines
///
/// Turns plain text into timed animation data, written as ASS subtitles,
/// and replays the timing in real time.
#[derive(Parser, Debug)]
#[command(name = "scrollcast")]
#[command(version)]
#[command(about = "Animated text timing and ASS subtitle generation")]
#[command(long_about = "scrollcast times every line of a text file under an animation style and writes the result as an ASS subtitle document plus a timeline JSON file.

EXAMPLES:
    scrollcast generate poem.txt                     # Typewriter fade with default config
    scrollcast generate -s railway_scroll poem.txt   # Pick a style
    scrollcast generate -f -o out/ texts/            # Process a directory, overwrite outputs
    scrollcast play poem.timeline.json --fps 30      # Replay a generated timeline
    scrollcast styles                                # List styles
    scrollcast completions bash > scrollcast.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn colour_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {:<5} {}\x1B[0m",
                Self::colour_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set through max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Play(args) => run_play(args).await,
        Commands::Styles => {
            for style in AnimationStyle::ALL {
                println!("{:<16} {:<18} {}", style.name(), style.strategy().name(), style.description());
            }
            Ok(())
        }
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "scrollcast", &mut std::io::stdout());
            Ok(())
        }
    }
}

// Load or create configuration and apply the effective log level
fn load_config(config_path: &str, log_level: Option<CliLogLevel>) -> Result<Config> {
    if let Some(level) = &log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.into());
    }

    let mut config = Config::load_or_create(config_path)?;

    match log_level {
        Some(level) => config.log_level = level.into(),
        None => log::set_max_level(config.log_level.into()),
    }

    Ok(config)
}

fn run_generate(options: GenerateArgs) -> Result<()> {
    let mut config = load_config(&options.config_path, options.log_level)?;

    if let Some(style) = options.style {
        config.style = style;
    }

    let controller = Controller::with_config(config)?;

    if options.input_path.is_file() {
        let output_dir = options
            .output_dir
            .clone()
            .unwrap_or_else(|| options.input_path.parent().unwrap_or(Path::new(".")).to_path_buf());
        controller.run(&options.input_path, &output_dir, options.force_overwrite)?;
    } else if options.input_path.is_dir() {
        if options.output_dir.is_some() {
            info!("Folder mode writes outputs next to each input; --output-dir is ignored");
        }
        let summary = controller.run_folder(&options.input_path, options.force_overwrite)?;
        if summary.errors > 0 {
            return Err(anyhow!("{} file(s) failed", summary.errors));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}

async fn run_play(options: PlayArgs) -> Result<()> {
    let mut config = load_config(&options.config_path, options.log_level)?;

    if let Some(fps) = options.fps {
        config.playback.frames_per_second = fps;
    }

    let controller = Controller::with_config(config)?;
    let state = controller
        .play(&options.timeline)
        .await
        .with_context(|| format!("Failed to play {}", options.timeline.display()))?;

    info!("Playback finished: {}", state);
    Ok(())
}
