//! Clean Room TUI - terminal dashboard for a healthcare data clean room.
//!
//! Responsibilities:
//! - Orchestrate application startup and shutdown.
//! - Initialize terminal, logging, and the async runtime.
//! - Run the main event loop and own the sync-stats poll lifecycle.
//!
//! Does NOT handle:
//! - REST API implementation (see `crates/client`).
//! - Configuration types and persistence (see `crates/config`).
//! - Async API calls (see `runtime::side_effects`).
//!
//! Invariants:
//! - The TUI enters raw mode and the alternate screen on startup; a
//!   drop guard restores both even on panic.
//! - Logging goes to rolling files, never stdout.
//! - The sync-stats poll exists exactly while pulsing is active.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc::channel;
use tokio_util::sync::CancellationToken;
use tracing_appender::non_blocking;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cleanroom_config::constants::{
    DEFAULT_CHANNEL_CAPACITY, DEFAULT_SYNC_POLL_SECS, DEFAULT_UI_TICK_MS,
};
use cleanroom_config::{ConfigManager, PersistedState, loader::ConfigLoader};

use cleanroom_tui::action::{Action, RedactedAction};
use cleanroom_tui::app::App;
use cleanroom_tui::cli::Cli;
use cleanroom_tui::runtime::{
    client::create_client,
    side_effects::{handle_side_effects, spawn_sync_stats_poll},
    terminal::TerminalGuard,
};
use cleanroom_tui::ui;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let no_mouse = cli.no_mouse;

    std::fs::create_dir_all(&cli.log_dir)?;

    // File-based logging; the guard must live for all of main so logs flush.
    let file_appender = tracing_appender::rolling::daily(&cli.log_dir, "cleanroom-tui.log");
    let (non_blocking, _log_guard) = non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    // Configuration precedence: CLI args > env vars > defaults.
    let config = ConfigLoader::new()
        .load_dotenv()
        .from_env()?
        .with_base_url(cli.base_url.clone())
        .build()?;

    let client = Arc::new(create_client(&config)?);
    tracing::info!(base_url = %config.connection.base_url, "client ready");

    // Persisted UI state (theme, last pids).
    let config_manager = match &cli.config_path {
        Some(path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new()?,
    };
    let persisted = if cli.fresh {
        tracing::info!("--fresh flag set, starting with default state");
        PersistedState::default()
    } else {
        config_manager.load()
    };

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    if no_mouse {
        execute!(stdout, EnterAlternateScreen)?;
    } else {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }

    // Restores the terminal on panic or signal unwinding.
    let _terminal_guard = TerminalGuard::new(no_mouse);

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, mut rx) = channel::<Action>(DEFAULT_CHANNEL_CAPACITY);

    // Forward terminal events into the action channel. Key and resize
    // events block until delivered so user intent is never dropped;
    // mouse events are ignored entirely.
    let tx_input = tx.clone();
    tokio::spawn(async move {
        use crossterm::event::EventStream;

        let mut reader = EventStream::new();
        while let Some(event_result) = reader.next().await {
            let action = match event_result {
                Ok(crossterm::event::Event::Key(key)) => {
                    if key.kind == crossterm::event::KeyEventKind::Press {
                        Some(Action::Input(key))
                    } else {
                        None
                    }
                }
                Ok(crossterm::event::Event::Resize(width, height)) => {
                    Some(Action::Resize(width, height))
                }
                Ok(_) => None,
                Err(_) => break,
            };
            if let Some(action) = action
                && tx_input.send(action).await.is_err()
            {
                break;
            }
        }
    });

    let mut app = App::new(Some(persisted), config.connection.base_url.clone());

    let mut tick_interval =
        tokio::time::interval(tokio::time::Duration::from_millis(DEFAULT_UI_TICK_MS));

    // Cancellation token for the sync-stats poll; Some exactly while
    // pulsing is active.
    let mut poll_token: Option<CancellationToken> = None;

    loop {
        terminal.draw(|f| ui::layout::render(&app, f))?;

        tokio::select! {
            Some(action) = rx.recv() => {
                tracing::debug!("handling action: {:?}", RedactedAction(&action));

                match &action {
                    Action::Quit => {
                        if let Some(token) = poll_token.take() {
                            token.cancel();
                        }
                        if let Err(e) = config_manager.save(&app.get_persisted_state()) {
                            tracing::error!(error = %e, "failed to save persisted state");
                        }
                        break;
                    }
                    Action::Input(key) => {
                        if let Some(follow_up) = app.handle_input(*key) {
                            let _ = tx.send(follow_up).await;
                        }
                    }
                    Action::Resize(..) => {}
                    _ => {
                        handle_side_effects(action.clone(), client.clone(), tx.clone()).await;

                        // Poll lifecycle tracks the pulsing transitions.
                        match &action {
                            Action::PulsingStarted(Ok(())) => {
                                if let Some(token) = poll_token.take() {
                                    token.cancel();
                                }
                                let token = CancellationToken::new();
                                let _ = spawn_sync_stats_poll(
                                    app.wizard.pid.value().to_string(),
                                    tx.clone(),
                                    token.clone(),
                                    Duration::from_secs(DEFAULT_SYNC_POLL_SECS),
                                );
                                poll_token = Some(token);
                            }
                            Action::PulsingStopped(Ok(())) => {
                                if let Some(token) = poll_token.take() {
                                    token.cancel();
                                }
                            }
                            _ => {}
                        }

                        app.apply(&action);

                        if matches!(action, Action::ToggleTheme)
                            && let Err(e) = config_manager.save(&app.get_persisted_state())
                        {
                            tracing::warn!(error = %e, "failed to persist theme change");
                        }
                    }
                }
            }
            _ = tick_interval.tick() => {
                app.apply(&Action::Tick);
            }
        }
    }

    // Explicit cleanup on the normal exit path; the guard is the safety
    // net for panics.
    disable_raw_mode()?;
    if no_mouse {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    } else {
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    }
    terminal.show_cursor()?;

    Ok(())
}
