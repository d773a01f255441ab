//! SACCO TUI - terminal administration console for a savings and credit cooperative
//!
//! Members, loans, savings, approvals and back-office records for the four
//! staff and member roles, with the loan application wizard at its core.

mod app;
mod config;
mod data;
mod error;
mod format;
mod session;
mod state;
mod ui;

use anyhow::Result;
use app::App;
use config::SaccoConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use data::InMemoryData;
use ratatui::{backend::CrosstermBackend, Terminal};
use session::{Session, SessionStore, SimulatedAuth};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sacco_tui=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = SaccoConfig::load().unwrap_or_else(|err| {
        tracing::warn!("Using default configuration: {err:#}");
        SaccoConfig::default()
    });
    let store = SessionStore::default_location();
    tracing::debug!(path = ?store.path(), "Session store");
    let session = Session::restore(store);
    let auth = Arc::new(SimulatedAuth::new(config.login_delay()));
    let data = Box::new(InMemoryData::demo().with_delay(config.data_delay()));

    let mut app = App::new(config, session, auth, data);
    app.start().await?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll faster while a sign-in is running so the result shows promptly
        let poll_duration = if app.is_busy() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        if event::poll(poll_duration)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    // Global quit: Ctrl+C
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }
                    app.handle_key(key).await?;
                }
            }
        }

        app.tick().await;

        if app.should_quit() {
            return Ok(());
        }
    }
}
