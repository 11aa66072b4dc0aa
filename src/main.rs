// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use netplus_ingest::app_config::{self, Config};
use netplus_ingest::file_utils::FileManager;
use netplus_ingest::subtitles::format_timestamp_ms;
use netplus_ingest::upload::ConsoleProgress;
use netplus_ingest::{Controller, ParseOutcome};

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
    /// Parse a subtitle paste and print the resulting cues without uploading
    Parse {
        /// Text file containing the pasted subtitles
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Parse a subtitle paste and bulk-ingest it for an episode
    Subtitles {
        /// Episode to attach the lines to
        #[arg(short, long)]
        episode: String,

        /// Text file containing the pasted subtitles
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Upload an episode video in chunks and link it
    Video {
        /// Episode to link the video to
        #[arg(short, long)]
        episode: String,

        /// Video file to upload
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Upload a title thumbnail and link it
    Thumbnail {
        /// Title to link the image to
        #[arg(short, long)]
        title: String,

        /// Image file to upload
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Remove the video link from an episode
    UnlinkVideo {
        #[arg(short, long)]
        episode: String,
    },

    /// Remove the thumbnail link from a title
    UnlinkThumbnail {
        #[arg(short, long)]
        title: String,
    },

    /// Generate shell completions for netplus-ingest
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// NetPlus Ingest - admin content ingestion for NetPlus
#[derive(Parser, Debug)]
#[command(name = "netplus-ingest")]
#[command(version)]
#[command(about = "Subtitle and media ingestion for the NetPlus backend")]
#[command(long_about = "netplus-ingest parses pasted subtitles and uploads media for NetPlus episodes and titles.

EXAMPLES:
    netplus-ingest parse paste.txt                          # Check a subtitle paste
    netplus-ingest subtitles -e <EPISODE_ID> paste.txt      # Ingest subtitle lines
    netplus-ingest video -e <EPISODE_ID> episode01.mp4      # Chunked video upload
    netplus-ingest thumbnail -t <TITLE_ID> poster.jpg       # Thumbnail upload
    netplus-ingest completions bash > netplus-ingest.bash   # Generate bash completions

SUBTITLE FORMATS:
    0:01|0:03.500|Speaker|Text      explicit start and end, optional speaker
    (0:01) Speaker: Text            end time inferred from the next cue
    (0:01) Text

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't exist,
    a default one is created. The admin token can also come from NETPLUS_ADMIN_TOKEN.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Override the API endpoint from the config file
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Admin bearer token
    #[arg(long, env = "NETPLUS_ADMIN_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Colored stderr logger
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
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
                Self::color_for_level(record.level()),
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
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "netplus-ingest", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());

    if let Err(e) = run(cli.command, config).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
    Ok(())
}

/// Load the config file and apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(endpoint) = &cli.endpoint {
        config.api.endpoint = endpoint.clone();
    }
    if let Some(token) = &cli.token {
        config.api.auth_token = token.clone();
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

async fn run(command: Commands, config: Config) -> Result<()> {
    if let Commands::Parse { input } = &command {
        let text = FileManager::read_to_string(input).await?;
        let controller = Controller::with_config(config)?;
        let outcome = controller.preview_subtitles(&text);
        print_outcome(&outcome);
        if !outcome.is_clean() {
            return Err(anyhow!("{} line(s) could not be parsed", outcome.errors.len()));
        }
        return Ok(());
    }

    config.validate_for_api().context("Configuration validation failed")?;
    let controller = Controller::with_config(config)?;

    match command {
        Commands::Subtitles { episode, input } => {
            let text = FileManager::read_to_string(&input).await?;
            let response = controller.ingest_subtitles(&episode, &text).await?;
            println!("Subtitles uploaded: {} lines", response.inserted_count);
        }
        Commands::Video { episode, input } => {
            let progress = ConsoleProgress::new(FileManager::file_name(&input));
            let url = controller.upload_video(&episode, &input, &progress).await?;
            println!("Video uploaded and linked: {}", url);
        }
        Commands::Thumbnail { title, input } => {
            let url = controller.upload_thumbnail(&title, &input).await?;
            println!("Thumbnail uploaded and linked: {}", url);
        }
        Commands::UnlinkVideo { episode } => {
            controller.unlink_video(&episode).await?;
            println!("Video link removed from episode.");
        }
        Commands::UnlinkThumbnail { title } => {
            controller.unlink_thumbnail(&title).await?;
            println!("Thumbnail removed from title.");
        }
        Commands::Parse { .. } | Commands::Completions { .. } => unreachable!("handled before dispatch"),
    }

    info!("Done");
    Ok(())
}

fn print_outcome(outcome: &ParseOutcome) {
    for line in &outcome.lines {
        match &line.speaker_text {
            Some(speaker) => println!(
                "{} --> {}  [{}] {}",
                format_timestamp_ms(line.start_ms),
                format_timestamp_ms(line.end_ms),
                speaker,
                line.text
            ),
            None => println!(
                "{} --> {}  {}",
                format_timestamp_ms(line.start_ms),
                format_timestamp_ms(line.end_ms),
                line.text
            ),
        }
    }
    for err in &outcome.errors {
        eprintln!("{}", err);
    }
    println!("{} cue(s), {} error(s)", outcome.lines.len(), outcome.errors.len());
}
