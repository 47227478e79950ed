//! WifiDrop CLI
//!
//! Terminal client for browsing and sharing public WiFi credentials held in
//! a remote managed table. Provides both TUI (ratatui) and headless modes.

use std::io;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use wifidrop_cli::app::App;
use wifidrop_cli::clipboard::Clipboard;
use wifidrop_cli::headless;
use wifidrop_cli::store::{StoreClient, StoreConfig};
use wifidrop_cli::tui::{Dispatcher, input};
use wifidrop_cli::ui;
use wifidrop_core::{NewWifiCredential, config, tracing_init};

#[derive(Parser, Debug)]
#[command(name = "wifidrop")]
#[command(version, about = "Public WiFi password sharing client", long_about = None)]
struct Cli {
    /// Store base URL (e.g., "https://abc123.supabase.co")
    #[arg(long, env = "WIFIDROP_STORE_URL")]
    store_url: Option<String>,

    /// Store anon key
    #[arg(long, env = "WIFIDROP_STORE_KEY")]
    api_key: Option<String>,

    /// Table holding the shared credentials
    #[arg(long)]
    table: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every shared network and exit
    List,
    /// Share one network and exit
    Add {
        /// WiFi SSID
        #[arg(long)]
        network: String,
        /// Plaintext password
        #[arg(long)]
        password: String,
        /// Venue offering the network
        #[arg(long)]
        business: String,
        /// City (optional)
        #[arg(long, default_value = "")]
        city: String,
        /// State (optional)
        #[arg(long, default_value = "")]
        state: String,
        /// Country (optional)
        #[arg(long, default_value = "")]
        country: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut app_config = config::load_config()?;
    // CLI arguments win over the settings file and environment.
    if let Some(url) = cli.store_url {
        app_config.store.url = url;
    }
    if let Some(key) = cli.api_key {
        app_config.store.api_key = key;
    }
    if let Some(table) = cli.table {
        app_config.store.table = table;
    }

    // Headless runs log at info; the TUI keeps the terminal quiet by default.
    let is_headless = cli.command.is_some();
    let default_filter = if is_headless {
        "wifidrop=info".to_string()
    } else {
        format!("wifidrop={}", app_config.log.level)
    };
    tracing_init::init_tracing(&default_filter, app_config.log.json);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting wifidrop");

    let store = StoreClient::new(&StoreConfig {
        base_url: app_config.store.url,
        api_key: app_config.store.api_key,
        table: app_config.store.table,
    })?;

    match cli.command {
        Some(Command::List) => headless::list(&store).await,
        Some(Command::Add {
            network,
            password,
            business,
            city,
            state,
            country,
        }) => {
            headless::add(
                &store,
                NewWifiCredential {
                    network_name: network,
                    password,
                    business_name: business,
                    city,
                    state,
                    country,
                },
            )
            .await
        }
        None => run_tui(store).await,
    }
}

/// Run the interactive TUI mode.
async fn run_tui(store: StoreClient) -> anyhow::Result<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_tui_loop(&mut terminal, store).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Main TUI event loop.
async fn run_tui_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    store: StoreClient,
) -> anyhow::Result<()>
where
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
{
    let mut app = App::new();
    let mut clipboard = Clipboard::new();

    let (events_tx, mut events_rx) = tokio::sync::mpsc::channel(32);
    let jobs = Dispatcher::new(Arc::new(store), events_tx);

    // The one load-on-display fetch.
    jobs.spawn_fetch_all();

    loop {
        // Draw UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for key events with a timeout so store completions get drained
        let has_terminal_event =
            tokio::task::block_in_place(|| event::poll(std::time::Duration::from_millis(50)))?;

        if has_terminal_event {
            if let Event::Key(key) = tokio::task::block_in_place(event::read)? {
                if key.kind == KeyEventKind::Press {
                    input::handle_key_event(&mut app, &jobs, &mut clipboard, key);
                }
            }
        }

        // Drain completed store calls and timers (non-blocking)
        while let Ok(store_event) = events_rx.try_recv() {
            app.handle_store_event(store_event);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
