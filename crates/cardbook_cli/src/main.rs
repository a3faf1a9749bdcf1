//! `cardbook` command-line front end.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Open the local card store and dispatch one command against it.
//! - Validate form input before it reaches the store.

mod commands;
mod upload;

use cardbook_core::db::open_db;
use cardbook_core::{default_log_level, init_logging, SqliteKvRepository};
use clap::Parser;
use commands::{run, CliError, Command};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "cardbook", version, about = "Local digital business-card builder")]
struct Cli {
    /// SQLite file holding accounts, profiles and cards.
    #[arg(long, env = "CARDBOOK_DB", default_value = "cardbook.sqlite3")]
    db: PathBuf,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "CARDBOOK_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "CARDBOOK_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> Result<(), CliError> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, &log_dir.to_string_lossy())?;
    }

    let conn = open_db(&cli.db)?;
    let repo = SqliteKvRepository::try_new(&conn)?;
    run(&repo, cli.command)
}
