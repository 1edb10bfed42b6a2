mod cli;
mod config;
mod logging;
mod service;
mod terminal;
mod ui;

use crate::cli::Args;
use crate::config::{resolve_settings, ConsoleConfig};
use crate::service::{spawn_service, AuditSource, ConsoleCommand, UiEvent};
use crate::terminal::{restore_terminal, setup_terminal};
use crate::ui::{draw_ui, handle_key_event, AppState};
use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event};
use guardrail_client::{GuardrailClient, GuardrailClientConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let _file_guard = logging::init_tracing(&args.log_dir, args.log_to_stderr)?;

    let file_config = ConsoleConfig::load(&args.config)
        .with_context(|| format!("failed to load config {}", args.config.display()))?;
    let settings = resolve_settings(&args, &file_config);
    tracing::info!(base_url = %settings.base_url, "console starting");

    let client = Arc::new(GuardrailClient::new(GuardrailClientConfig {
        base_url: settings.base_url.clone(),
        connect_timeout_ms: settings.connect_timeout_ms,
        request_timeout_ms: settings.request_timeout_ms,
    })?);

    let (cmd_tx, cmd_rx) = mpsc::channel::<ConsoleCommand>(128);
    let (event_tx, mut event_rx) = mpsc::channel::<UiEvent>(128);
    let audit: Arc<dyn AuditSource> = client.clone();
    spawn_service(Arc::clone(&client), audit, cmd_rx, event_tx);

    let mut terminal = setup_terminal()?;
    let mut app = AppState::new(settings.asset_id.clone());

    // Mirror the original console: fetch the current config on startup.
    let _ = cmd_tx.try_send(ConsoleCommand::LoadConfig);

    let tick_rate = Duration::from_millis(100);
    loop {
        while let Ok(event) = event_rx.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|frame| draw_ui(frame, &app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if handle_key_event(key, &mut app, &cmd_tx) {
                    break;
                }
            }
        }
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}
