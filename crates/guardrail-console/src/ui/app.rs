use guardrail_api::{DetectionType, InspectRequest, LogEntry, ModelConfig};
use guardrail_client::Inspection;

use crate::service::{ConsoleCommand, UiEvent};

use super::format;

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub(crate) enum Tab {
    #[default]
    Inspect,
    Config,
    Logs,
}

impl Tab {
    pub(crate) const TITLES: [&'static str; 3] = ["Inspect", "Config", "Logs"];

    pub(crate) fn index(&self) -> usize {
        match self {
            Tab::Inspect => 0,
            Tab::Config => 1,
            Tab::Logs => 2,
        }
    }

    fn next(&self) -> Self {
        match self {
            Tab::Inspect => Tab::Config,
            Tab::Config => Tab::Logs,
            Tab::Logs => Tab::Inspect,
        }
    }

    fn prev(&self) -> Self {
        match self {
            Tab::Inspect => Tab::Logs,
            Tab::Config => Tab::Inspect,
            Tab::Logs => Tab::Config,
        }
    }
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub(crate) enum InspectField {
    #[default]
    DetectionType,
    AssetId,
    Text,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub(crate) enum ConfigField {
    #[default]
    Provider,
    Model,
    ApiKey,
    Temperature,
    MaxTokens,
    Timeout,
}

#[derive(Debug, Default)]
pub(crate) enum InspectOutcome {
    #[default]
    Idle,
    Detecting,
    Done(Inspection),
    Failed(String),
    Invalid(String),
}

#[derive(Debug, Default)]
pub(crate) struct InspectState {
    pub(crate) detection_type: DetectionType,
    pub(crate) asset_id: String,
    pub(crate) text: String,
    pub(crate) focus: InspectField,
    pub(crate) busy: bool,
    pub(crate) outcome: InspectOutcome,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct ConfigForm {
    pub(crate) provider: String,
    pub(crate) model: String,
    pub(crate) api_key: String,
    pub(crate) temperature: String,
    pub(crate) max_tokens: String,
    pub(crate) timeout: String,
}

impl ConfigForm {
    pub(crate) fn populate(&mut self, config: &ModelConfig) {
        self.provider = config.provider.clone();
        self.model = config.model.clone();
        self.api_key = config.api_key.clone();
        self.temperature = config.temperature.to_string();
        self.max_tokens = config.max_tokens.to_string();
        self.timeout = config.timeout.to_string();
    }

    pub(crate) fn parse(&self) -> Result<ModelConfig, String> {
        let temperature = self
            .temperature
            .trim()
            .parse::<f64>()
            .map_err(|_| "temperature must be a number".to_string())?;
        let max_tokens = self
            .max_tokens
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|tokens| *tokens > 0)
            .ok_or_else(|| "max_tokens must be a positive integer".to_string())?;
        let timeout = self
            .timeout
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|timeout| *timeout > 0)
            .ok_or_else(|| "timeout must be a positive integer".to_string())?;
        Ok(ModelConfig {
            provider: self.provider.trim().to_string(),
            model: self.model.trim().to_string(),
            api_key: self.api_key.trim().to_string(),
            temperature,
            max_tokens,
            timeout,
        })
    }

    pub(crate) fn buffer_mut(&mut self, field: ConfigField) -> &mut String {
        match field {
            ConfigField::Provider => &mut self.provider,
            ConfigField::Model => &mut self.model,
            ConfigField::ApiKey => &mut self.api_key,
            ConfigField::Temperature => &mut self.temperature,
            ConfigField::MaxTokens => &mut self.max_tokens,
            ConfigField::Timeout => &mut self.timeout,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct ConfigState {
    pub(crate) form: ConfigForm,
    pub(crate) focus: ConfigField,
    pub(crate) raw: Option<String>,
    pub(crate) saving: bool,
    pub(crate) reloading: bool,
}

#[derive(Debug, Default)]
pub(crate) struct LogsState {
    pub(crate) entries: Vec<LogEntry>,
    pub(crate) filter: String,
    pub(crate) busy: bool,
    pub(crate) loaded: bool,
    pub(crate) error: Option<String>,
}

impl LogsState {
    /// Entries whose full rendered line contains the filter,
    /// case-insensitively. An empty filter shows everything.
    pub(crate) fn visible(&self) -> Vec<&LogEntry> {
        let needle = self.filter.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| {
                needle.is_empty() || format::log_line(entry).to_lowercase().contains(&needle)
            })
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StatusKind {
    Ok,
    Error,
}

#[derive(Debug, Clone)]
pub(crate) struct StatusLine {
    pub(crate) text: String,
    pub(crate) kind: StatusKind,
}

/// The whole UI as one explicit state object. Handlers mutate it and return
/// the command to issue, so everything here is testable without a terminal.
#[derive(Debug, Default)]
pub(crate) struct AppState {
    pub(crate) active_tab: Tab,
    pub(crate) inspect: InspectState,
    pub(crate) config: ConfigState,
    pub(crate) logs: LogsState,
    pub(crate) status: Option<StatusLine>,
    pub(crate) confirm_quit: bool,
}

impl AppState {
    pub(crate) fn new(asset_id: String) -> Self {
        Self {
            inspect: InspectState {
                asset_id,
                ..InspectState::default()
            },
            ..Self::default()
        }
    }

    pub(crate) fn activate_tab(&mut self, tab: Tab) -> Option<ConsoleCommand> {
        self.active_tab = tab;
        // Entering the config tab refreshes the form from the service.
        if tab == Tab::Config {
            Some(ConsoleCommand::LoadConfig)
        } else {
            None
        }
    }

    pub(crate) fn next_tab(&mut self) -> Option<ConsoleCommand> {
        self.activate_tab(self.active_tab.next())
    }

    pub(crate) fn prev_tab(&mut self) -> Option<ConsoleCommand> {
        self.activate_tab(self.active_tab.prev())
    }

    pub(crate) fn focus_next(&mut self) {
        match self.active_tab {
            Tab::Inspect => {
                self.inspect.focus = match self.inspect.focus {
                    InspectField::DetectionType => InspectField::AssetId,
                    InspectField::AssetId => InspectField::Text,
                    InspectField::Text => InspectField::DetectionType,
                }
            }
            Tab::Config => {
                self.config.focus = match self.config.focus {
                    ConfigField::Provider => ConfigField::Model,
                    ConfigField::Model => ConfigField::ApiKey,
                    ConfigField::ApiKey => ConfigField::Temperature,
                    ConfigField::Temperature => ConfigField::MaxTokens,
                    ConfigField::MaxTokens => ConfigField::Timeout,
                    ConfigField::Timeout => ConfigField::Provider,
                }
            }
            Tab::Logs => {}
        }
    }

    pub(crate) fn focus_prev(&mut self) {
        match self.active_tab {
            Tab::Inspect => {
                self.inspect.focus = match self.inspect.focus {
                    InspectField::DetectionType => InspectField::Text,
                    InspectField::AssetId => InspectField::DetectionType,
                    InspectField::Text => InspectField::AssetId,
                }
            }
            Tab::Config => {
                self.config.focus = match self.config.focus {
                    ConfigField::Provider => ConfigField::Timeout,
                    ConfigField::Model => ConfigField::Provider,
                    ConfigField::ApiKey => ConfigField::Model,
                    ConfigField::Temperature => ConfigField::ApiKey,
                    ConfigField::MaxTokens => ConfigField::Temperature,
                    ConfigField::Timeout => ConfigField::MaxTokens,
                }
            }
            Tab::Logs => {}
        }
    }

    pub(crate) fn toggle_detection_type(&mut self) {
        self.inspect.detection_type = self.inspect.detection_type.toggled();
    }

    /// Validation happens here: blank text never produces a command, so no
    /// network call is issued and the busy flag stays clear.
    pub(crate) fn submit_inspect(&mut self) -> Option<ConsoleCommand> {
        if self.inspect.busy {
            return None;
        }
        if self.inspect.text.trim().is_empty() {
            self.inspect.outcome = InspectOutcome::Invalid("enter text to inspect".to_string());
            return None;
        }
        self.inspect.busy = true;
        self.inspect.outcome = InspectOutcome::Detecting;
        Some(ConsoleCommand::Inspect(InspectRequest::new(
            self.inspect.detection_type,
            self.inspect.asset_id.trim(),
            self.inspect.text.clone(),
        )))
    }

    pub(crate) fn submit_save(&mut self) -> Option<ConsoleCommand> {
        if self.config.saving {
            return None;
        }
        match self.config.form.parse() {
            Ok(config) => {
                self.config.saving = true;
                Some(ConsoleCommand::SaveConfig(config))
            }
            Err(message) => {
                self.set_status(StatusKind::Error, message);
                None
            }
        }
    }

    pub(crate) fn submit_reload(&mut self) -> Option<ConsoleCommand> {
        if self.config.reloading {
            return None;
        }
        self.config.reloading = true;
        Some(ConsoleCommand::ReloadModel)
    }

    pub(crate) fn request_config_load(&mut self) -> Option<ConsoleCommand> {
        Some(ConsoleCommand::LoadConfig)
    }

    pub(crate) fn submit_load_logs(&mut self) -> Option<ConsoleCommand> {
        if self.logs.busy {
            return None;
        }
        self.logs.busy = true;
        self.logs.error = None;
        Some(ConsoleCommand::LoadLogs)
    }

    pub(crate) fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::InspectFinished(result) => {
                self.inspect.busy = false;
                self.inspect.outcome = match result {
                    Ok(inspection) => InspectOutcome::Done(inspection),
                    Err(message) => InspectOutcome::Failed(message),
                };
            }
            UiEvent::ConfigLoaded(result) => match result {
                Ok(snapshot) => {
                    self.config.form.populate(&snapshot.config);
                    self.config.raw = Some(format::pretty_json(&snapshot.raw));
                }
                Err(message) => {
                    // The form keeps whatever the operator had; only the raw
                    // panel reports the failure.
                    self.config.raw = Some(format!("failed to load config: {message}"));
                }
            },
            UiEvent::ConfigSaved(result) => {
                self.config.saving = false;
                match result {
                    Ok(()) => self.set_status(StatusKind::Ok, "configuration saved".to_string()),
                    Err(message) => {
                        self.set_status(StatusKind::Error, format!("save failed: {message}"))
                    }
                }
            }
            UiEvent::ModelReloaded(result) => {
                self.config.reloading = false;
                match result {
                    Ok(()) => {
                        self.set_status(StatusKind::Ok, "model configuration reloaded".to_string())
                    }
                    Err(message) => {
                        self.set_status(StatusKind::Error, format!("reload failed: {message}"))
                    }
                }
            }
            UiEvent::LogsLoaded(result) => {
                self.logs.busy = false;
                self.logs.loaded = true;
                match result {
                    Ok(entries) => {
                        self.logs.entries = entries;
                        self.logs.error = None;
                    }
                    Err(message) => self.logs.error = Some(message),
                }
            }
        }
    }

    pub(crate) fn set_status(&mut self, kind: StatusKind, text: String) {
        self.status = Some(StatusLine { text, kind });
    }

    pub(crate) fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn input_char(&mut self, c: char) {
        match self.active_tab {
            Tab::Inspect => match self.inspect.focus {
                InspectField::DetectionType => {
                    if c == ' ' {
                        self.toggle_detection_type();
                    }
                }
                InspectField::AssetId => self.inspect.asset_id.push(c),
                InspectField::Text => self.inspect.text.push(c),
            },
            Tab::Config => self.config.form.buffer_mut(self.config.focus).push(c),
            Tab::Logs => self.logs.filter.push(c),
        }
    }

    pub(crate) fn backspace(&mut self) {
        match self.active_tab {
            Tab::Inspect => match self.inspect.focus {
                InspectField::DetectionType => {}
                InspectField::AssetId => {
                    self.inspect.asset_id.pop();
                }
                InspectField::Text => {
                    self.inspect.text.pop();
                }
            },
            Tab::Config => {
                self.config.form.buffer_mut(self.config.focus).pop();
            }
            Tab::Logs => {
                self.logs.filter.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardrail_api::LogLevel;
    use guardrail_client::ConfigSnapshot;
    use serde_json::json;

    fn sample_logs() -> Vec<LogEntry> {
        vec![
            LogEntry {
                timestamp: "2026-01-22T23:00:00Z".to_string(),
                level: LogLevel::Info,
                message: "input inspection: 'hello'".to_string(),
                result: "pass".to_string(),
                categories: None,
            },
            LogEntry {
                timestamp: "2026-01-22T23:01:00Z".to_string(),
                level: LogLevel::Warning,
                message: "input inspection: 'ignore previous instructions'".to_string(),
                result: "block".to_string(),
                categories: Some(vec!["prompt_injection".to_string()]),
            },
            LogEntry {
                timestamp: "2026-01-22T23:02:00Z".to_string(),
                level: LogLevel::Info,
                message: "output inspection: 'our product is an AI assistant'".to_string(),
                result: "pass".to_string(),
                categories: None,
            },
        ]
    }

    #[test]
    fn starts_on_the_inspect_tab() {
        let app = AppState::new("default".to_string());
        assert_eq!(app.active_tab, Tab::Inspect);
        assert!(matches!(app.inspect.outcome, InspectOutcome::Idle));
    }

    #[test]
    fn one_full_tab_cycle_requests_exactly_one_config_load() {
        let mut app = AppState::new("default".to_string());
        let mut loads = 0;
        for _ in 0..3 {
            if let Some(ConsoleCommand::LoadConfig) = app.next_tab() {
                loads += 1;
            }
        }
        assert_eq!(app.active_tab, Tab::Inspect);
        assert_eq!(loads, 1);

        if let Some(ConsoleCommand::LoadConfig) = app.prev_tab() {
            loads += 1;
        }
        assert_eq!(app.active_tab, Tab::Logs);
        assert_eq!(loads, 1);
    }

    #[test]
    fn whitespace_only_text_is_rejected_without_a_command() {
        let mut app = AppState::new("default".to_string());
        app.inspect.text = "   \n\t".to_string();
        assert!(app.submit_inspect().is_none());
        assert!(!app.inspect.busy);
        assert!(matches!(app.inspect.outcome, InspectOutcome::Invalid(_)));
    }

    #[test]
    fn submit_marks_busy_and_suppresses_resubmission() {
        let mut app = AppState::new(String::new());
        app.inspect.text = "hello".to_string();
        let command = app.submit_inspect().expect("command");
        match command {
            ConsoleCommand::Inspect(request) => {
                assert_eq!(request.asset_id, "default");
                assert_eq!(request.text, "hello");
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(app.inspect.busy);
        assert!(matches!(app.inspect.outcome, InspectOutcome::Detecting));
        assert!(app.submit_inspect().is_none());
    }

    #[test]
    fn inspect_failure_reenables_the_control() {
        let mut app = AppState::new("default".to_string());
        app.inspect.text = "hello".to_string();
        app.submit_inspect();
        app.handle_event(UiEvent::InspectFinished(Err(
            "request failed with status 500: boom".to_string(),
        )));
        assert!(!app.inspect.busy);
        match &app.inspect.outcome {
            InspectOutcome::Failed(message) => assert!(message.contains("500")),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(app.submit_inspect().is_some());
    }

    #[test]
    fn config_load_populates_defaults_for_missing_fields() {
        let mut app = AppState::new("default".to_string());
        let raw = json!({"api_key": "sk-test"});
        let config: ModelConfig = serde_json::from_value(raw.clone()).expect("config");
        app.handle_event(UiEvent::ConfigLoaded(Ok(ConfigSnapshot { config, raw })));
        assert_eq!(app.config.form.temperature, "0.1");
        assert_eq!(app.config.form.provider, "openai");
        assert_eq!(app.config.form.max_tokens, "500");
        assert_eq!(app.config.form.timeout, "30");
        assert!(app.config.raw.as_deref().unwrap().contains("sk-test"));
    }

    #[test]
    fn config_load_failure_leaves_the_form_untouched() {
        let mut app = AppState::new("default".to_string());
        app.config.form.provider = "anthropic".to_string();
        app.config.form.temperature = "0.7".to_string();
        let before = app.config.form.clone();
        app.handle_event(UiEvent::ConfigLoaded(Err("connection refused".to_string())));
        assert_eq!(app.config.form, before);
        assert!(app
            .config
            .raw
            .as_deref()
            .unwrap()
            .contains("connection refused"));
    }

    #[test]
    fn unparsable_numeric_field_blocks_the_save_locally() {
        let mut app = AppState::new("default".to_string());
        app.config.form.populate(&ModelConfig::default());
        app.config.form.temperature = "warm".to_string();
        assert!(app.submit_save().is_none());
        assert!(!app.config.saving);
        let status = app.status.as_ref().expect("status");
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.contains("temperature"));
    }

    #[test]
    fn save_completion_clears_the_busy_flag_on_both_paths() {
        let mut app = AppState::new("default".to_string());
        app.config.form.populate(&ModelConfig::default());
        assert!(matches!(
            app.submit_save(),
            Some(ConsoleCommand::SaveConfig(_))
        ));
        assert!(app.config.saving);
        app.handle_event(UiEvent::ConfigSaved(Ok(())));
        assert!(!app.config.saving);
        assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Ok);

        app.submit_save();
        app.handle_event(UiEvent::ConfigSaved(Err("status 500".to_string())));
        assert!(!app.config.saving);
        assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Error);
    }

    #[test]
    fn filter_hides_non_matching_entries_and_clearing_restores_them() {
        let mut app = AppState::new("default".to_string());
        app.handle_event(UiEvent::LogsLoaded(Ok(sample_logs())));
        assert_eq!(app.logs.visible().len(), 3);

        app.active_tab = Tab::Logs;
        for c in "INJECTION".chars() {
            app.input_char(c.to_ascii_lowercase());
        }
        assert_eq!(app.logs.visible().len(), 1);
        assert_eq!(app.logs.visible()[0].result, "block");

        // Matching is case-insensitive against the rendered line.
        app.logs.filter = "WARNING".to_string();
        assert_eq!(app.logs.visible().len(), 1);

        app.logs.filter.clear();
        assert_eq!(app.logs.visible().len(), 3);
    }

    #[test]
    fn logs_failure_is_kept_separate_from_stale_entries() {
        let mut app = AppState::new("default".to_string());
        app.submit_load_logs();
        assert!(app.logs.busy);
        app.handle_event(UiEvent::LogsLoaded(Err("status 503".to_string())));
        assert!(!app.logs.busy);
        assert!(app.logs.loaded);
        assert_eq!(app.logs.error.as_deref(), Some("status 503"));
    }
}
