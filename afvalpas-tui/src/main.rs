//! Terminal UI for afvalpas that resolves waste passes for Amsterdam postal codes.

mod app;
mod config;
mod input;
mod ui;

use std::{fs::File, io, sync::Arc, sync::Mutex, time::Duration as StdDuration};

use afvalpas_core::{
    ports::TableSource,
    service::WastePassService,
    sources::{HttpJsonSource, JsonFileSource},
};
use afvalpas_provider_amsterdam::AmsterdamTables;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use reqwest::Client;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::{Config, TablesLocation};
use crate::input::Action;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the environment may be set up already.
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    init_tracing(&config)?;

    // Tables are loaded and validated once, before the UI starts
    let source = table_source(&config)?;
    let service = WastePassService::load(source.as_ref())
        .await
        .with_context(|| format!("Failed to load tables from {}", source.name()))?;

    let app = App::new(Arc::new(service), config.history_limit);

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn table_source(config: &Config) -> Result<Box<dyn TableSource>> {
    let source: Box<dyn TableSource> = match &config.tables {
        TablesLocation::Embedded => Box::new(AmsterdamTables),
        TablesLocation::File(path) => Box::new(JsonFileSource::new(path.clone())),
        TablesLocation::Remote(url) => {
            let client = Client::builder().user_agent("afvalpas/0.1").build()?;
            Box::new(HttpJsonSource::new(client, url.clone()))
        }
    };
    Ok(source)
}

fn init_tracing(config: &Config) -> Result<()> {
    // Logging to the terminal would draw over the UI, so without a file there is no subscriber
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    let filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("Invalid RUST_LOG filter '{}'", config.log_filter))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            match input::handle_key_event(key, &mut app) {
                Action::Quit => break,
                Action::None => {}
                Action::Resolve => app.resolve_current(),
            }
        }
    }

    Ok(())
}
