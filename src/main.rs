use std::fmt;
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use todos::console;
use todos::core::config::{self, CliOverrides, ConfigError, ResolvedConfig};

#[derive(Parser)]
#[command(name = "todos", about = "A small todo list kept in a JSON file")]
struct Args {
    /// JSON file the todo list is loaded from and saved to [default: todos.json]
    #[arg(long, value_name = "FILE")]
    storage_path: Option<PathBuf>,

    /// Don't save unsaved changes when choosing Exit
    #[arg(long)]
    no_save_on_exit: bool,

    /// Where to write the log [default: todos.log]
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

/// Anything that stops the app before the menu comes up.
#[derive(Debug)]
enum StartupError {
    Config(ConfigError),
    LogFile { path: PathBuf, source: std::io::Error },
    Logger(log::SetLoggerError),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Config(e) => write!(f, "{e}"),
            StartupError::LogFile { path, source } => {
                write!(f, "cannot create log file {}: {source}", path.display())
            }
            StartupError::Logger(e) => write!(f, "cannot initialize logging: {e}"),
        }
    }
}

impl std::error::Error for StartupError {}

impl From<ConfigError> for StartupError {
    fn from(e: ConfigError) -> Self {
        StartupError::Config(e)
    }
}

fn startup(args: Args) -> Result<ResolvedConfig, StartupError> {
    let file_config = config::load_config()?;
    let cli = CliOverrides {
        storage_path: args.storage_path,
        no_save_on_exit: args.no_save_on_exit,
        log_file: args.log_file,
    };
    let resolved = config::resolve(&file_config, &cli)?;

    // File logger only: the terminal belongs to the menu
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    let log_file = File::create(&resolved.log_file).map_err(|source| StartupError::LogFile {
        path: resolved.log_file.clone(),
        source,
    })?;
    WriteLogger::init(resolved.log_level, log_config, log_file).map_err(StartupError::Logger)?;

    Ok(resolved)
}

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let config = match startup(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("todos: {e}");
            return ExitCode::FAILURE;
        }
    };

    log::info!("Todos starting up with storage at {}", config.storage_path.display());

    match console::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Console I/O failed: {}", e);
            eprintln!("todos: {e}");
            ExitCode::FAILURE
        }
    }
}
