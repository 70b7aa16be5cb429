//! Routepick TUI - Terminal User Interface
//!
//! Ratatui-based location picker: click the world map or type a search
//! result, pick a skill in the dialog, manage rows in the sidebar.

mod app;
mod ui;

use std::fs::File;
use std::sync::Mutex;

use anyhow::Context;
use ratatui::{
    Terminal,
    crossterm::{
        event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use routepick_core::config::state_dir;
use routepick_core::prelude::*;

use crate::app::App;

fn main() -> anyhow::Result<()> {
    // Log to a file; stdout belongs to the terminal UI
    let log_dir = state_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    let log_file = File::create(log_dir.join("routepick-tui.log"))?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "routepick_tui=debug,routepick_core=debug,info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    let config = ConfigStore::discover()?.load()?;
    let mut coordinator = EditingCoordinator::new(InMemoryStore::new(), &config);
    if let Some(name) = &config.default_demo {
        coordinator.load_demo(name)?;
    }
    let mut app = App::new(coordinator);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the TUI
    let res = run_tui(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

fn run_tui(
    terminal: &mut Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            _ => {}
        }
    }
    Ok(())
}
