//! Widget and layout commands.

use std::io::Read;
use std::ops::ControlFlow;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::Local;
use homeboard::clock::SystemClock;
use homeboard::config::schema::{FINANCE_API_KEY_ENV, WEATHER_API_KEY_ENV};
use homeboard::config::Config;
use homeboard::dashboard::plain_text;
use homeboard::schedule::{TickOutcome, Ticker};
use homeboard::store::DashboardStore;
use homeboard::Dashboard;
use tracing::warn;

use super::CommandError;
use crate::{
    Commands, CountdownAction, FinanceAction, LayoutAction, NotesAction, StopwatchAction,
    TodoAction, WeatherAction,
};

type Result<T> = std::result::Result<T, CommandError>;

pub(super) async fn run(command: Commands, store: DashboardStore, config: &Config) -> Result<ExitCode> {
    let mut board = Dashboard::open(store, config, Arc::new(SystemClock))?;

    match command {
        Commands::Show => show(&mut board, config).await,
        Commands::Layout { action } => layout(&mut board, action),
        Commands::Todo { action } => todo(&mut board, action),
        Commands::Countdown { action } => countdown(&mut board, action, config).await,
        Commands::Stopwatch { action } => stopwatch(&mut board, action, config).await,
        Commands::Finance { action } => finance(&mut board, action, config).await,
        Commands::Weather { action } => weather(&mut board, action, config).await,
        Commands::Notes { action } => notes(&mut board, action),
        Commands::Config { action } => super::config::run(action),
    }
}

/// Completes on Ctrl-C. A failed handler registration ends the wait at once.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl-C");
    }
}

fn require_weather_key(config: &Config) -> Result<()> {
    if config.weather.api_key.trim().is_empty() {
        return Err(CommandError::MissingApiKey {
            what: "weather",
            env: WEATHER_API_KEY_ENV,
        });
    }
    Ok(())
}

fn require_finance_key(config: &Config) -> Result<()> {
    if config.finance.api_key.trim().is_empty() {
        return Err(CommandError::MissingApiKey {
            what: "finance",
            env: FINANCE_API_KEY_ENV,
        });
    }
    Ok(())
}

fn print_widget(board: &Dashboard, id: &str) {
    if let Some(rendered) = board.render(id, Local::now()) {
        println!("{}", plain_text(&rendered.body));
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

async fn show(board: &mut Dashboard, config: &Config) -> Result<ExitCode> {
    // Feeds without a key stay unfetched rather than failing; a failed
    // weather fetch would forget the saved city.
    if require_weather_key(config).is_ok() {
        board.weather.refresh().await?;
    }
    if require_finance_key(config).is_ok() {
        board.finance.refresh().await;
    }

    for (i, widget) in board.render_all().into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("== {} ==", widget.title);
        println!("{}", plain_text(&widget.body));
    }
    Ok(ExitCode::SUCCESS)
}

// ---------------------------------------------------------------------------
// layout
// ---------------------------------------------------------------------------

fn layout(board: &mut Dashboard, action: LayoutAction) -> Result<ExitCode> {
    match action {
        LayoutAction::Show => {}
        LayoutAction::Move { id, x, y } => {
            board.layout.move_item(&id, x, y)?;
        }
        LayoutAction::Resize { id, w, h } => {
            let item = board.layout.resize(&id, w, h)?;
            if (item.w, item.h) != (w, h) {
                println!("{id} snapped to {}x{}", item.w, item.h);
            }
        }
        LayoutAction::Reset => board.layout.reset()?,
    }

    for item in board.layout.items() {
        let size = board.layout.size_of(&item.id).unwrap_or_default();
        println!(
            "{:<8} x={:<2} y={:<2} w={:<2} h={:<2} {:.0}x{:.0}px{}",
            item.id,
            item.x,
            item.y,
            item.w,
            item.h,
            size.width,
            size.height,
            if size.is_compact() { " compact" } else { "" }
        );
    }
    Ok(ExitCode::SUCCESS)
}

// ---------------------------------------------------------------------------
// todo
// ---------------------------------------------------------------------------

fn todo(board: &mut Dashboard, action: TodoAction) -> Result<ExitCode> {
    match action {
        TodoAction::Add { text } => match board.todo.add(&text.join(" "))? {
            Some(id) => println!("{id}"),
            None => {
                eprintln!("Nothing to add");
                return Ok(ExitCode::FAILURE);
            }
        },
        TodoAction::Toggle { id } => {
            if !board.todo.toggle(id)? {
                return Err(CommandError::NotFound(format!("No todo with id {id}")));
            }
        }
        TodoAction::Rm { id } => {
            if !board.todo.remove(id)? {
                return Err(CommandError::NotFound(format!("No todo with id {id}")));
            }
        }
        TodoAction::List => {
            for item in board.todo.list() {
                let mark = if item.completed { "[x]" } else { "[ ]" };
                println!("{}\t{mark} {}", item.id, item.text);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

// ---------------------------------------------------------------------------
// countdown
// ---------------------------------------------------------------------------

async fn countdown(board: &mut Dashboard, action: CountdownAction, config: &Config) -> Result<ExitCode> {
    let countdowns = board.timer.countdowns_mut();
    match action {
        CountdownAction::Add { name, date, time } => match countdowns.add(&name, &date, &time)? {
            Some(id) => println!("{id}"),
            None => {
                eprintln!("Countdown needs a name and a future date (YYYY-MM-DD) and time (HH:MM)");
                return Ok(ExitCode::FAILURE);
            }
        },
        CountdownAction::Rm { id } => {
            if !countdowns.remove(id)? {
                return Err(CommandError::NotFound(format!("No countdown with id {id}")));
            }
        }
        CountdownAction::List => {
            let now = Local::now().naive_local();
            for c in countdowns.countdowns() {
                println!("{}\t{}\t{}\t{}", c.id, c.name, c.target_date, c.status(now));
            }
        }
        CountdownAction::Watch { id } => {
            let list = countdowns.countdowns();
            let found = match id {
                Some(id) => list.iter().find(|c| c.id == id),
                None => list.first(),
            };
            let Some(watched) = found.cloned() else {
                return Err(CommandError::NotFound("No such countdown".to_string()));
            };

            let print_status = || {
                let status = watched.status(Local::now().naive_local());
                println!("{}\t{status}", watched.name);
                status
            };
            if print_status().is_expired() {
                return Ok(ExitCode::SUCCESS);
            }
            let ticker = Ticker::new(config.timer.tick_rate()?);
            ticker
                .run(ctrl_c(), || {
                    if print_status().is_expired() {
                        ControlFlow::Break(())
                    } else {
                        ControlFlow::Continue(())
                    }
                })
                .await;
        }
    }
    Ok(ExitCode::SUCCESS)
}

// ---------------------------------------------------------------------------
// stopwatch
// ---------------------------------------------------------------------------

async fn stopwatch(board: &mut Dashboard, action: StopwatchAction, config: &Config) -> Result<ExitCode> {
    let sw = board.timer.stopwatch_mut();
    match action {
        StopwatchAction::Show => println!("{}", sw.display()),
        StopwatchAction::Reset => {
            sw.reset()?;
            println!("{}", sw.display());
        }
        StopwatchAction::Run => {
            let ticker = Ticker::new(config.timer.tick_rate()?);
            sw.toggle();
            println!("{}", sw.display());
            let outcome = ticker
                .run(ctrl_c(), || match sw.tick() {
                    Ok(_) => {
                        println!("{}", sw.display());
                        ControlFlow::Continue(())
                    }
                    Err(e) => ControlFlow::Break(e),
                })
                .await;
            sw.toggle();
            if let TickOutcome::Stopped(e) = outcome {
                return Err(e.into());
            }
            println!("Stopped at {}", sw.display());
        }
    }
    Ok(ExitCode::SUCCESS)
}

// ---------------------------------------------------------------------------
// finance
// ---------------------------------------------------------------------------

async fn finance(board: &mut Dashboard, action: FinanceAction, config: &Config) -> Result<ExitCode> {
    match action {
        FinanceAction::Set { symbols } => {
            let entries: Vec<String> = symbols
                .iter()
                .flat_map(|s| s.split(','))
                .map(str::to_string)
                .collect();
            board.finance.set_symbols(entries).await?;
            println!("Watching {}", board.finance.symbols().join(", "));
            if require_finance_key(config).is_err() {
                return Ok(ExitCode::SUCCESS);
            }
        }
        FinanceAction::Show => {
            require_finance_key(config)?;
            board.finance.refresh().await;
        }
    }

    if board.finance.symbols().is_empty() {
        println!("No symbols. Try `hb finance set AAPL,TSLA`.");
    }
    for symbol in board.finance.symbols() {
        match board.finance.quote(symbol).flatten() {
            Some(q) => println!(
                "{symbol}\t${:.2}\t{:+.2}%",
                q.current_price, q.percent_change
            ),
            None => println!("{symbol}\tFailed to load data."),
        }
    }
    Ok(ExitCode::SUCCESS)
}

// ---------------------------------------------------------------------------
// weather
// ---------------------------------------------------------------------------

async fn weather(board: &mut Dashboard, action: WeatherAction, config: &Config) -> Result<ExitCode> {
    match action {
        WeatherAction::Clear => {
            board.weather.remove()?;
            return Ok(ExitCode::SUCCESS);
        }
        WeatherAction::Set { city } => {
            require_weather_key(config)?;
            if !board.weather.submit(&city.join(" ")).await? {
                eprintln!("City name is empty");
                return Ok(ExitCode::FAILURE);
            }
        }
        WeatherAction::Show => {
            if board.weather.city().is_none() {
                println!("No city set. Try `hb weather set <city>`.");
                return Ok(ExitCode::SUCCESS);
            }
            require_weather_key(config)?;
            board.weather.refresh().await?;
        }
    }

    if let Some(error) = board.weather.error() {
        eprintln!("{error}");
        return Ok(ExitCode::FAILURE);
    }
    print_widget(board, "weather");
    Ok(ExitCode::SUCCESS)
}

// ---------------------------------------------------------------------------
// notes
// ---------------------------------------------------------------------------

fn notes(board: &mut Dashboard, action: NotesAction) -> Result<ExitCode> {
    match action {
        NotesAction::Show => println!("{}", board.notes.text()),
        NotesAction::Write { text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    if buf.ends_with('\n') {
                        buf.pop();
                    }
                    buf
                }
            };
            board.notes.edit(text);
            board.notes.flush()?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
