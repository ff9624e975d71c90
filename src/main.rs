mod app;
mod context;
mod countdown;
mod domain;
mod form;
mod input;
mod logging;
mod notifications;
mod persistence;
mod reducer;
mod ticker;
mod ui;

use anyhow::{Context as _, Result};
use app::AppState;
use chrono::Local;
use clap::{Parser, Subcommand};
use context::CyclesContext;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use domain::{countdown_label, relative_start, status_badge, summarize_history};
use form::CreateCycleData;
use logging::{init_logging, LogTarget};
use persistence::{
    ensure_dir, get_data_dir, init_data_dir_at, init_local_data_dir, load_settings, log_file,
    save_settings, settings_file, FileStore, PersistenceMirror, Settings,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

const DEFAULT_TITLE: &str = "Pomodoro";

#[derive(Parser)]
#[command(name = "pomodoro")]
#[command(about = "A terminal pomodoro timer with persistent cycle history", long_about = None)]
struct Cli {
    /// Data directory. Defaults to the nearest .pomodoro, then ~/.pomodoro
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .pomodoro directory in the current directory, or
    /// the directory given with --dir
    Init,
    /// Start a cycle without opening the timer screen
    Start {
        /// What you will work on
        #[arg(short, long)]
        task: String,
        /// Cycle length in minutes (1-60). Defaults to the configured value.
        #[arg(short, long)]
        minutes: Option<String>,
    },
    /// Interrupt the running cycle
    Stop,
    /// Show the running cycle and its remaining time
    Status,
    /// List past cycles, newest first
    History {
        /// Maximum number of cycles to list
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(command) => run_command(command, cli.dir.as_deref()),
        None => run_tui(cli.dir.as_deref()),
    }
}

/// Create the data directory with default settings; .pomodoro in the
/// current directory unless --dir names one
fn init_data_dir(dir_override: Option<&Path>) -> Result<()> {
    let data_dir = match dir_override {
        Some(dir) => init_data_dir_at(dir)?,
        None => {
            let current_dir =
                std::env::current_dir().context("Could not determine current directory")?;
            init_local_data_dir(&current_dir)?
        }
    };
    save_settings(settings_file(&data_dir), &Settings::default())?;
    println!("Initialized pomodoro directory: {}", data_dir.display());
    println!();
    println!("Cycles started from here on are stored in this directory.");
    match dir_override {
        Some(dir) => println!("Run 'pomodoro --dir {}' to open the timer.", dir.display()),
        None => println!("Run 'pomodoro' to open the timer."),
    }
    Ok(())
}

/// Resolve the data directory and load its settings
fn prepare(dir_override: Option<&Path>) -> Result<(PathBuf, Settings)> {
    let data_dir = ensure_dir(&get_data_dir(dir_override)?)?;
    let settings = load_settings(settings_file(&data_dir))?;
    Ok((data_dir, settings))
}

fn open_context(data_dir: &Path, settings: &Settings) -> CyclesContext {
    let mirror = PersistenceMirror::new(Box::new(FileStore::new(data_dir)));
    CyclesContext::new(mirror, settings.tick_duration(), Local::now())
}

fn run_command(command: Commands, dir_override: Option<&Path>) -> Result<()> {
    if let Commands::Init = command {
        return init_data_dir(dir_override);
    }

    let (data_dir, settings) = prepare(dir_override)?;
    init_logging(LogTarget::Stderr, &settings.log_level)?;
    let mut context = open_context(&data_dir, &settings);

    match command {
        Commands::Init => {}
        Commands::Start { task, minutes } => {
            let minutes = minutes.unwrap_or_else(|| settings.default_minutes.to_string());
            let data = CreateCycleData::validate(&task, &minutes)?;

            if let Some(previous) = context.active_cycle() {
                println!("Interrupting \"{}\"", previous.task);
            }
            let cycle = context.create_new_cycle(data);
            println!(
                "Started \"{}\" for {} minutes (ends at {})",
                cycle.task,
                cycle.minutes_amount,
                cycle.deadline().format("%H:%M")
            );
        }
        Commands::Stop => match context.active_cycle().map(|c| c.task.clone()) {
            Some(task) => {
                context.stop_current_cycle();
                println!("Interrupted \"{}\"", task);
            }
            None => println!("No cycle running"),
        },
        Commands::Status => match context.active_cycle() {
            Some(cycle) => {
                println!("{}  {}", countdown_label(context.remaining_seconds()), cycle.task);
                println!(
                    "Started {} · {} elapsed · {} minutes · ends at {}",
                    relative_start(cycle.start_date, Local::now()),
                    countdown_label(context.amount_seconds_passed()),
                    cycle.minutes_amount,
                    cycle.deadline().format("%H:%M")
                );
            }
            None => println!("No cycle running"),
        },
        Commands::History { limit } => {
            let now = Local::now();
            for cycle in context.cycles().iter().rev().take(limit) {
                println!(
                    "{:<32} {:>3} min  {:<16} {}",
                    cycle.task,
                    cycle.minutes_amount,
                    relative_start(cycle.start_date, now),
                    status_badge(cycle.status())
                );
            }
            let summary = summarize_history(context.cycles());
            println!();
            println!(
                "{} cycles · {} finished · {} interrupted · {} focused minutes",
                summary.total, summary.finished, summary.interrupted, summary.focused_minutes
            );
        }
    }

    Ok(())
}

fn run_tui(dir_override: Option<&Path>) -> Result<()> {
    let (data_dir, settings) = prepare(dir_override)?;
    init_logging(LogTarget::File(log_file(&data_dir)), &settings.log_level)?;
    tracing::info!(dir = %data_dir.display(), "starting timer");

    let context = open_context(&data_dir, &settings);
    let mut app = AppState::new(context, settings);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, SetTitle(DEFAULT_TITLE))?;
    terminal.show_cursor()?;

    // Dropping the app cancels the countdown timer
    drop(app);
    tracing::info!("timer closed");

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let mut shown_title: Option<String> = None;

    loop {
        // Mirror the countdown into the terminal title
        let title = app.window_title();
        if title != shown_title {
            let text = title.as_deref().unwrap_or(DEFAULT_TITLE);
            execute!(terminal.backend_mut(), SetTitle(text))?;
            shown_title = title;
        }

        terminal.draw(|f| ui::render(f, app))?;

        // Wake up for input, or when the countdown is due
        let poll_bound = ticker::ui_poll_duration();
        let timeout = app
            .context
            .next_tick_in(Instant::now())
            .map_or(poll_bound, |due| due.min(poll_bound));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        app.tick(Instant::now(), Local::now());
    }
}
