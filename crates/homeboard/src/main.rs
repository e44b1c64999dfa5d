//! homeboard - CLI entry point
//!
//! `hb` opens the widget store, applies one command and exits. Long-running
//! commands (`stopwatch run`, `countdown watch`) tick once a second until
//! Ctrl-C.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Personal widget dashboard
#[derive(Parser)]
#[command(name = "hb")]
#[command(version, about = "Personal widget dashboard")]
struct Cli {
    /// Store file to use instead of the configured one
    #[arg(long, global = true, env = "HOMEBOARD_STORE")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for hb
#[derive(Subcommand)]
enum Commands {
    /// Render every widget
    Show,

    /// Inspect or change the grid layout
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },

    /// Manage the to-do list
    Todo {
        #[command(subcommand)]
        action: TodoAction,
    },

    /// Manage countdowns
    Countdown {
        #[command(subcommand)]
        action: CountdownAction,
    },

    /// Run or reset the stopwatch
    Stopwatch {
        #[command(subcommand)]
        action: StopwatchAction,
    },

    /// Stock watchlist
    Finance {
        #[command(subcommand)]
        action: FinanceAction,
    },

    /// Weather for the saved city
    Weather {
        #[command(subcommand)]
        action: WeatherAction,
    },

    /// Read or replace the note
    Notes {
        #[command(subcommand)]
        action: NotesAction,
    },

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `layout` subcommand.
#[derive(Subcommand)]
enum LayoutAction {
    /// List widget rectangles and pixel sizes
    Show,
    /// Move a widget to grid position (x, y)
    Move { id: String, x: u32, y: u32 },
    /// Resize a widget to w columns by h rows
    Resize { id: String, w: u32, h: u32 },
    /// Restore the default layout
    Reset,
}

/// Actions for the `todo` subcommand.
#[derive(Subcommand)]
enum TodoAction {
    /// Add an item
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Flip an item between open and done
    Toggle { id: i64 },
    /// Delete an item
    Rm { id: i64 },
    /// List items, open first
    List,
}

/// Actions for the `countdown` subcommand.
#[derive(Subcommand)]
enum CountdownAction {
    /// Add a countdown to DATE (YYYY-MM-DD) at TIME (HH:MM)
    Add {
        name: String,
        date: String,
        time: String,
    },
    /// Delete a countdown
    Rm { id: i64 },
    /// List countdowns with time remaining
    List,
    /// Show one countdown ticking until it expires or Ctrl-C
    Watch {
        /// Countdown id (defaults to the first)
        id: Option<i64>,
    },
}

/// Actions for the `stopwatch` subcommand.
#[derive(Subcommand)]
enum StopwatchAction {
    /// Run from the saved time until Ctrl-C
    Run,
    /// Stop and zero the stopwatch
    Reset,
    /// Print the saved time
    Show,
}

/// Actions for the `finance` subcommand.
#[derive(Subcommand)]
enum FinanceAction {
    /// Replace the watchlist (comma or space separated)
    Set {
        #[arg(required = true, num_args = 1..)]
        symbols: Vec<String>,
    },
    /// Fetch and print quotes for the watchlist
    Show,
}

/// Actions for the `weather` subcommand.
#[derive(Subcommand)]
enum WeatherAction {
    /// Save a city and fetch its weather
    Set {
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,
    },
    /// Fetch and print weather for the saved city
    Show,
    /// Forget the saved city
    Clear,
}

/// Actions for the `notes` subcommand.
#[derive(Subcommand)]
enum NotesAction {
    /// Print the note
    Show,
    /// Replace the note with TEXT, or with stdin when omitted
    Write { text: Option<String> },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match commands::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
