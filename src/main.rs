//! Touchline - football league standings and fixtures in the terminal
//!
//! A terminal UI application that shows a league table fetched from the
//! football-data.org API and lets you drill into any club's fixture list.

mod app;
mod cache;
mod cli;
mod data;
mod ui;

use std::env;
use std::io;
use std::panic;
use std::process;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::{App, Screen};
use cli::{Cli, StartupConfig};
use data::FootballDataClient;

/// Environment variable holding the football-data.org API key
const API_KEY_VAR: &str = "FOOTBALL_API_KEY";

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Renders the UI based on the screen currently on top of the stack
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    match app.stack.top() {
        Screen::Standings { .. } => ui::render_standings(frame, app),
        Screen::Matches { .. } => ui::render_matches(frame, app),
    }

    if app.show_help {
        ui::render_help_overlay(frame);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    // A missing key is a fatal startup error, reported before any UI renders
    let api_key = match env::var(API_KEY_VAR) {
        Ok(key) if !key.trim().is_empty() => key,
        _ => {
            eprintln!(
                "{} is not set; export an api.football-data.org key first",
                API_KEY_VAR
            );
            process::exit(1);
        }
    };

    let mut client = match FootballDataClient::new(api_key) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("failed to initialize HTTP client: {}", err);
            process::exit(1);
        }
    };
    if let Some(season) = &config.season {
        client = client.with_season(season.clone());
    }

    let mut app = App::new(config, client);

    // The initial table load happens before the alternate screen is entered;
    // without it there is nothing to render, so failure is fatal
    if let Err(err) = app.load_standings().await {
        eprintln!("failed to load {} standings: {}", app.league, err);
        process::exit(1);
    }

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main event loop
    loop {
        // Render UI
        terminal.draw(|f| render_ui(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                let action = app.handle_key(key);
                // Fetches block the loop for their duration; the cache and
                // the rate limit keep them rare and short
                app.run_action(action).await;
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
