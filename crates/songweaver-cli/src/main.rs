mod app;
mod cli;
mod commands;
mod edit;
mod generator;
mod page;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use songweaver_config::Settings;
use std::{
    env,
    fs::OpenOptions,
    io::{Stdout, stdout},
    process,
    time::Duration,
};

use crate::app::App;
use crate::cli::{Cli, Command};

/// How long to wait for input before checking on lyrics requests
const TICK: Duration = Duration::from_millis(100);

/// Logger honouring the filter in `env`, `info` when unset
fn logger_builder(env: env_logger::Env) -> env_logger::Builder {
    env_logger::Builder::from_env(env.default_filter_or("info"))
}

/// Log to a file next to the settings; the terminal belongs to the editor
fn init_logging() {
    let mut builder = logger_builder(env_logger::Env::default());

    let log_path = Settings::config_dir().join("songweaver.log");
    let _ = std::fs::create_dir_all(Settings::config_dir());
    match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => eprintln!("Warning: cannot open log file {}: {e}", log_path.display()),
    }
    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let settings_path = Settings::config_path();
    let settings = Settings::load_or_default(&settings_path);

    let file = match cli.command {
        Some(Command::Render { file }) => {
            println!("{}", commands::render(&file)?);
            return Ok(());
        }
        Some(Command::ExportMd { file, output }) => {
            let path = commands::export_markdown(&file, output.as_deref(), &settings)?;
            println!("Wrote {}", path.display());
            return Ok(());
        }
        Some(Command::ExportPdf { file, output }) => {
            let path = commands::export_pdf(&file, output.as_deref())?;
            println!("Wrote {}", path.display());
            return Ok(());
        }
        Some(Command::Edit { file }) => file,
        None => cli.file,
    };

    let output_dir = env::current_dir()?;
    let mut app = App::new(settings, settings_path, output_dir);
    if let Some(file) = &file
        && let Err(e) = app.open_project(file)
    {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    log::info!("editor started in {}", app.output_dir.display());
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
        app.poll_generations();

        if app.should_quit {
            return Ok(());
        }
    }
}
