// GuildLog - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Settings resolution and loading
// 3. Logging initialisation (debug mode support)
// 4. Dispatch to the export / inspect commands

use clap::{Parser, Subcommand, ValueEnum};
use guildlog::app;
use guildlog::core::export::ExportFormat;
use guildlog::platform::config::{self, PlatformPaths};
use guildlog::util;
use std::path::PathBuf;
use std::process::ExitCode;

/// GuildLog - normalise guild activity log exports.
///
/// Reads `<Guild>_<YYYY-MM-DD>_<HH-MM-SS>.csv` exports and re-exports them
/// for spreadsheets, or reports the time window each export covers.
#[derive(Parser, Debug)]
#[command(name = "guildlog", version, about)]
struct Cli {
    /// Settings file (key=value lines). Defaults to ./settings.csv, then the
    /// platform config directory.
    #[arg(short = 's', long = "settings", global = true)]
    settings: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write every entry of the given logs in one output format.
    Export {
        /// One directory of exports, or one or more log files.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output layout.
        #[arg(short = 'f', long = "format", value_enum, default_value_t = FormatArg::Excel)]
        format: FormatArg,

        /// Output file (stdout if omitted).
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,

        /// Overwrite the output file if it already exists.
        #[arg(long = "force")]
        force: bool,
    },

    /// Print each log's source, guild name, entry count and timeframe.
    Inspect {
        /// One directory of exports, or one or more log files.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Report whether this instant ("MM/DD/YY HH:MM:SS AM", input
        /// timezone) falls inside each log's timeframe.
        #[arg(long = "at")]
        at: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Tab-separated, unquoted, for spreadsheet import.
    Excel,
    /// Comma-separated, fully quoted, like the game's export.
    Log,
    /// JSON array of entries.
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Excel => ExportFormat::Excel,
            FormatArg::Log => ExportFormat::Log,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let platform_paths = PlatformPaths::resolve();
    let settings_path = config::resolve_settings_path(cli.settings.as_deref(), &platform_paths);

    let settings = match config::load_settings(&settings_path) {
        Ok(s) => s,
        Err(e) => {
            util::logging::init(cli.debug, None);
            tracing::error!(error = %e, "Settings could not be loaded");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let level = settings.log_level().map(str::to_lowercase);
    util::logging::init(cli.debug, level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        settings = %settings_path.display(),
        debug = cli.debug,
        "GuildLog starting"
    );

    let stdout = std::io::stdout().lock();
    let result = match cli.command {
        Command::Export {
            inputs,
            format,
            output,
            force,
        } => {
            let request = app::export::ExportRequest {
                inputs,
                format: format.into(),
                output,
                overwrite: force,
            };
            app::export::run_export(&request, &settings, stdout).map(|_| ())
        }
        Command::Inspect { inputs, at } => {
            app::inspect::run_inspect(&inputs, at.as_deref(), &settings, stdout).map(|_| ())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
