use std::sync::Arc;

use guardrail_api::{InspectRequest, LogEntry, ModelConfig};
use guardrail_client::{ClientError, ConfigSnapshot, GuardrailClient, Inspection};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Operator actions forwarded from the UI loop to the service task.
#[derive(Debug, Clone)]
pub(crate) enum ConsoleCommand {
    Inspect(InspectRequest),
    LoadConfig,
    SaveConfig(ModelConfig),
    ReloadModel,
    LoadLogs,
}

/// Completion notifications back to the UI loop. Every command produces at
/// least one event so busy controls always re-enable.
#[derive(Debug)]
pub(crate) enum UiEvent {
    InspectFinished(Result<Inspection, String>),
    ConfigLoaded(Result<ConfigSnapshot, String>),
    ConfigSaved(Result<(), String>),
    ModelReloaded(Result<(), String>),
    LogsLoaded(Result<Vec<LogEntry>, String>),
}

/// Where audit-log entries come from. Production wires the HTTP client;
/// tests inject a fixture without touching the rendering path.
#[async_trait::async_trait]
pub(crate) trait AuditSource: Send + Sync + 'static {
    async fn fetch_logs(&self) -> Result<Vec<LogEntry>, ClientError>;
}

#[async_trait::async_trait]
impl AuditSource for GuardrailClient {
    async fn fetch_logs(&self) -> Result<Vec<LogEntry>, ClientError> {
        self.audit_logs().await
    }
}

pub(crate) fn spawn_service(
    client: Arc<GuardrailClient>,
    logs: Arc<dyn AuditSource>,
    cmd_rx: mpsc::Receiver<ConsoleCommand>,
    event_tx: mpsc::Sender<UiEvent>,
) {
    tokio::spawn(run_service(client, logs, cmd_rx, event_tx));
}

/// Serve commands until the UI side closes the channel. Each command runs on
/// its own task: distinct operations may overlap, each control's busy flag is
/// the only guard against re-triggering the same one.
pub(crate) async fn run_service(
    client: Arc<GuardrailClient>,
    logs: Arc<dyn AuditSource>,
    mut cmd_rx: mpsc::Receiver<ConsoleCommand>,
    event_tx: mpsc::Sender<UiEvent>,
) {
    while let Some(command) = cmd_rx.recv().await {
        let client = Arc::clone(&client);
        let logs = Arc::clone(&logs);
        let event_tx = event_tx.clone();
        tokio::spawn(async move {
            handle_command(client, logs, command, event_tx).await;
        });
    }
}

async fn handle_command(
    client: Arc<GuardrailClient>,
    logs: Arc<dyn AuditSource>,
    command: ConsoleCommand,
    event_tx: mpsc::Sender<UiEvent>,
) {
    let op_id = Uuid::new_v4();
    match command {
        ConsoleCommand::Inspect(request) => {
            tracing::info!(
                %op_id,
                detection_type = request.detection_type.as_str(),
                asset_id = %request.asset_id,
                text_len = request.text.len(),
                "inspection submitted"
            );
            let result = client.inspect(&request).await;
            match &result {
                Ok(inspection) => tracing::info!(
                    %op_id,
                    suggestion = inspection.decision.suggestion.as_str(),
                    categories = inspection.decision.categories.len(),
                    "inspection finished"
                ),
                Err(err) => tracing::warn!(%op_id, error = %err, "inspection failed"),
            }
            let _ = event_tx
                .send(UiEvent::InspectFinished(result.map_err(|err| err.to_string())))
                .await;
        }
        ConsoleCommand::LoadConfig => {
            let result = client.model_config().await.map_err(|err| err.to_string());
            if let Err(err) = &result {
                tracing::warn!(%op_id, error = %err, "config load failed");
            }
            let _ = event_tx.send(UiEvent::ConfigLoaded(result)).await;
        }
        ConsoleCommand::SaveConfig(config) => {
            tracing::info!(%op_id, provider = %config.provider, model = %config.model, "saving model config");
            let result = client
                .save_model_config(&config)
                .await
                .map_err(|err| err.to_string());
            let saved = result.is_ok();
            let _ = event_tx.send(UiEvent::ConfigSaved(result)).await;
            if saved {
                // Reflect server-confirmed state rather than trusting the form.
                let follow_up = client.model_config().await.map_err(|err| err.to_string());
                let _ = event_tx.send(UiEvent::ConfigLoaded(follow_up)).await;
            }
        }
        ConsoleCommand::ReloadModel => {
            tracing::info!(%op_id, "requesting model config reload");
            let result = client.reload_model().await.map_err(|err| err.to_string());
            let reloaded = result.is_ok();
            let _ = event_tx.send(UiEvent::ModelReloaded(result)).await;
            if reloaded {
                let follow_up = client.model_config().await.map_err(|err| err.to_string());
                let _ = event_tx.send(UiEvent::ConfigLoaded(follow_up)).await;
            }
        }
        ConsoleCommand::LoadLogs => {
            let result = logs.fetch_logs().await.map_err(|err| err.to_string());
            match &result {
                Ok(entries) => tracing::info!(%op_id, entries = entries.len(), "audit logs loaded"),
                Err(err) => tracing::warn!(%op_id, error = %err, "audit log load failed"),
            }
            let _ = event_tx.send(UiEvent::LogsLoaded(result)).await;
        }
    }
}
