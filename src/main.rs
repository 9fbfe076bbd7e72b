mod commands;
mod config;
mod error;
mod watch;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use termlinks::OperatingSystem;

use crate::config::{Config, OutputFormat};

#[derive(Parser)]
#[command(
    name = "termlinks",
    about = "Detect file paths and row/column references in terminal output",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect links in a file, or stdin when no file is given
    Scan {
        /// File to scan (stdin when omitted)
        file: Option<PathBuf>,
        /// Path syntax to assume (overrides .termlinks.toml)
        #[arg(long, value_enum)]
        os: Option<OsFlavor>,
        /// Emit one JSON object per line that has links
        #[arg(long)]
        json: bool,
    },
    /// Show every row/column suffix recognized in a line
    Suffixes {
        /// The line to inspect
        text: String,
        /// Emit the suffix list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a line with its trailing row/column suffix removed
    Strip {
        /// The line to strip
        text: String,
    },
    /// Follow a growing file and report links in appended lines
    Watch {
        /// File to follow
        file: PathBuf,
        /// Path syntax to assume (overrides .termlinks.toml)
        #[arg(long, value_enum)]
        os: Option<OsFlavor>,
        /// Emit one JSON object per line that has links
        #[arg(long)]
        json: bool,
    },
    /// Show version, active config, and recognized suffix formats
    Info {
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// CLI spelling of the path syntax to assume.
#[derive(Clone, Copy, ValueEnum)]
enum OsFlavor {
    Windows,
    Unix,
}

impl From<OsFlavor> for OperatingSystem {
    fn from(flavor: OsFlavor) -> Self {
        match flavor {
            OsFlavor::Windows => Self::Windows,
            OsFlavor::Unix => Self::NonWindows,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Load config, apply flag overrides, dispatch the subcommand.
///
/// # Errors
///
/// Returns errors from config loading or from the dispatched command.
fn run(cli: Cli) -> Result<(), error::Error> {
    let config = Config::load(Path::new("."))?;

    match cli.command {
        Commands::Scan { file, os, json } => commands::scan(
            file.as_deref(),
            resolve_os(os, &config),
            resolve_format(json, &config),
        ),
        Commands::Suffixes { text, json } => {
            commands::suffixes(&text, resolve_format(json, &config))
        },
        Commands::Strip { text } => {
            commands::strip(&text);
            Ok(())
        },
        Commands::Watch { file, os, json } => watch::run(
            &file,
            resolve_os(os, &config),
            resolve_format(json, &config),
        ),
        Commands::Info { json } => commands::info(&config, resolve_format(json, &config)),
    }
}

/// Flag wins over config.
fn resolve_os(flag: Option<OsFlavor>, config: &Config) -> OperatingSystem {
    flag.map_or(config.os, OperatingSystem::from)
}

/// `--json` wins over config; otherwise the config's default format.
fn resolve_format(json: bool, config: &Config) -> OutputFormat {
    if json { OutputFormat::Json } else { config.format }
}
