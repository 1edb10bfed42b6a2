use serde::Deserialize;
use std::path::Path;

use crate::cli::Args;

pub(crate) const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Optional console configuration file. Every key has a built-in default, so
/// an absent file is not an error.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ConsoleConfig {
    pub(crate) base_url: Option<String>,
    pub(crate) asset_id: Option<String>,
    pub(crate) connect_timeout_ms: Option<u64>,
    pub(crate) request_timeout_ms: Option<u64>,
}

impl ConsoleConfig {
    pub(crate) fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "console config file not found, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

/// Effective settings after merging CLI flags over the config file.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Settings {
    pub(crate) base_url: String,
    pub(crate) asset_id: String,
    pub(crate) connect_timeout_ms: u64,
    pub(crate) request_timeout_ms: u64,
}

pub(crate) fn resolve_settings(args: &Args, config: &ConsoleConfig) -> Settings {
    Settings {
        base_url: args
            .base_url
            .clone()
            .or_else(|| config.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        asset_id: config
            .asset_id
            .clone()
            .unwrap_or_else(|| "default".to_string()),
        connect_timeout_ms: config.connect_timeout_ms.unwrap_or(2_000),
        request_timeout_ms: config.request_timeout_ms.unwrap_or(30_000),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn missing_file_loads_defaults() {
        let config = ConsoleConfig::load(Path::new("does/not/exist.toml")).expect("load");
        assert!(config.base_url.is_none());
        assert!(config.asset_id.is_none());
    }

    #[test]
    fn config_keys_override_defaults() {
        let config: ConsoleConfig = toml::from_str(
            r#"
            base_url = "http://guardrail.internal:8000/api"
            asset_id = "billing-bot"
            request_timeout_ms = 10000
            "#,
        )
        .expect("parse");
        let args = Args::parse_from(["guardrail-console"]);
        let settings = resolve_settings(&args, &config);
        assert_eq!(settings.base_url, "http://guardrail.internal:8000/api");
        assert_eq!(settings.asset_id, "billing-bot");
        assert_eq!(settings.connect_timeout_ms, 2_000);
        assert_eq!(settings.request_timeout_ms, 10_000);
    }

    #[test]
    fn cli_flag_wins_over_config_file() {
        let config: ConsoleConfig = toml::from_str(r#"base_url = "http://from-file/api""#).expect("parse");
        let args = Args::parse_from(["guardrail-console", "--base-url", "http://from-flag/api"]);
        let settings = resolve_settings(&args, &config);
        assert_eq!(settings.base_url, "http://from-flag/api");
    }

    #[test]
    fn built_in_defaults_apply_when_nothing_is_set() {
        let args = Args::parse_from(["guardrail-console"]);
        let settings = resolve_settings(&args, &ConsoleConfig::default());
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.asset_id, "default");
    }
}
