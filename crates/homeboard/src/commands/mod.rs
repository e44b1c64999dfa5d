//! Command implementations for the hb CLI.
//!
//! - `board` - widget and layout commands against the store
//! - `config` - config file init, path and validation

mod board;
mod config;

use std::process::ExitCode;

use homeboard::config::schema::LogLevel;
use homeboard::config::{ConfigError, ConfigLoader};
use homeboard::layout::LayoutError;
use homeboard::logging;
use homeboard::store::{DashboardStore, FileStore, StoreError};
use homeboard::DashboardError;
use thiserror::Error;
use tracing::debug;

use crate::{Cli, Commands};

/// Anything that makes a command fail.
#[derive(Debug, Error)]
pub(crate) enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Dashboard(#[from] DashboardError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No {what} API key configured (set {env} or add it to the config file)")]
    MissingApiKey {
        what: &'static str,
        env: &'static str,
    },

    #[error("{0}")]
    NotFound(String),
}

/// Runs one parsed command line.
pub(crate) fn run(cli: Cli) -> Result<ExitCode, CommandError> {
    let Cli { store, command } = cli;

    let command = match command {
        Commands::Config { action } => {
            logging::init(LogLevel::default());
            return config::run(action);
        }
        other => other,
    };

    let settings = ConfigLoader::load_effective()?;
    logging::init(settings.log.level);
    settings.validate()?;

    let path = store.unwrap_or_else(|| settings.storage.resolved_path());
    debug!(path = %path.display(), "opening store");
    let store = DashboardStore::new(FileStore::open(path)?);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(board::run(command, store, &settings))
}
