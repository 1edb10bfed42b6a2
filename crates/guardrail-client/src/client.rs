use std::time::Duration;

use guardrail_api::{InspectDecision, InspectRequest, LogEntry, ModelConfig};
use reqwest::Method;
use serde_json::Value;

use crate::error::ClientError;

/// Configuration for the guardrail HTTP client.
#[derive(Clone, Debug)]
pub struct GuardrailClientConfig {
    /// Service base path, e.g. "http://127.0.0.1:8000/api"
    pub base_url: String,
    /// Connection timeout in milliseconds (default: 2000)
    pub connect_timeout_ms: u64,
    /// Per-request timeout in milliseconds (default: 30000)
    pub request_timeout_ms: u64,
}

impl Default for GuardrailClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_string(),
            connect_timeout_ms: 2_000,
            request_timeout_ms: 30_000,
        }
    }
}

/// Inspection verdict plus the raw payload as the service sent it.
#[derive(Debug, Clone)]
pub struct Inspection {
    pub decision: InspectDecision,
    pub raw: Value,
}

/// Model configuration plus the raw payload as the service sent it.
#[derive(Debug, Clone)]
pub struct ConfigSnapshot {
    pub config: ModelConfig,
    pub raw: Value,
}

/// Typed client for the guardrail admin API.
pub struct GuardrailClient {
    base_url: String,
    http: reqwest::Client,
}

impl GuardrailClient {
    pub fn new(config: GuardrailClientConfig) -> Result<Self, ClientError> {
        if config.base_url.trim().is_empty() {
            return Err(ClientError::BaseUrl("base_url is empty".to_string()));
        }
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn from_base_url(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::new(GuardrailClientConfig {
            base_url: base_url.into(),
            ..GuardrailClientConfig::default()
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit text for inspection. The detection type selects both the path
    /// segment and the body field.
    pub async fn inspect(&self, request: &InspectRequest) -> Result<Inspection, ClientError> {
        let path = format!("/inspect/{}", request.detection_type.as_str());
        let raw = self
            .request_json(Method::POST, &path, Some(serde_json::to_value(request)?))
            .await?;
        let decision: InspectDecision = serde_json::from_value(raw.clone())?;
        Ok(Inspection { decision, raw })
    }

    /// Fetch the current model configuration. Fields the service omits come
    /// back with their documented defaults.
    pub async fn model_config(&self) -> Result<ConfigSnapshot, ClientError> {
        let raw = self.request_json(Method::GET, "/model/config", None).await?;
        let config: ModelConfig = serde_json::from_value(raw.clone())?;
        Ok(ConfigSnapshot { config, raw })
    }

    /// Persist a model configuration. The ack body is implementation-defined
    /// and ignored.
    pub async fn save_model_config(&self, config: &ModelConfig) -> Result<(), ClientError> {
        self.request_text(Method::POST, "/model/config", Some(serde_json::to_value(config)?))
            .await?;
        Ok(())
    }

    /// Ask the service to re-read configuration from its own source.
    pub async fn reload_model(&self) -> Result<(), ClientError> {
        self.request_text(Method::POST, "/model/reload", None).await?;
        Ok(())
    }

    /// Fetch the audit log, newest-first as the service orders it.
    pub async fn audit_logs(&self) -> Result<Vec<LogEntry>, ClientError> {
        let raw = self.request_json(Method::GET, "/audit/logs", None).await?;
        Ok(serde_json::from_value(raw)?)
    }

    async fn request_json(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        let text = self.request_text(method, path, body).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn request_text(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<String, ClientError> {
        let url = join_base_path(&self.base_url, path)?;
        tracing::debug!(method = %method, path, "guardrail api request");
        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        tracing::debug!(
            method = %method,
            path,
            status,
            body_len = text.len(),
            "guardrail api response"
        );
        if status / 100 != 2 {
            return Err(ClientError::Status { status, body: text });
        }
        Ok(text)
    }
}

pub(crate) fn join_base_path(base: &str, path: &str) -> Result<String, ClientError> {
    if base.trim().is_empty() {
        return Err(ClientError::BaseUrl("base_url is empty".to_string()));
    }
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        Ok(format!("{base}{path}"))
    } else {
        Ok(format!("{base}/{path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardrail_api::{DetectionType, Suggestion};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GuardrailClient {
        GuardrailClient::from_base_url(format!("{}/api", server.uri())).expect("client")
    }

    #[test]
    fn join_base_path_normalizes_slashes() {
        assert_eq!(
            join_base_path("http://localhost:8000/api/", "/model/config").unwrap(),
            "http://localhost:8000/api/model/config"
        );
        assert_eq!(
            join_base_path("http://localhost:8000/api", "model/reload").unwrap(),
            "http://localhost:8000/api/model/reload"
        );
        assert!(join_base_path("  ", "/model/config").is_err());
    }

    #[tokio::test]
    async fn inspect_posts_body_and_decodes_decision() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/inspect/input"))
            .and(body_json(json!({
                "asset_id": "default",
                "text": "hello",
                "detection_type": "input"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errCode": 200,
                "errMsg": "",
                "suggestion": "pass",
                "categories": [],
                "answer": ""
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let inspection = client
            .inspect(&InspectRequest::new(DetectionType::Input, "", "hello"))
            .await
            .expect("inspect");
        assert_eq!(inspection.decision.suggestion, Suggestion::Pass);
        assert!(inspection.decision.categories.is_empty());
        assert_eq!(inspection.raw["errCode"], json!(200));
    }

    #[tokio::test]
    async fn inspect_uses_detection_type_path_segment() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/inspect/output"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "suggestion": "block",
                "categories": ["hallucination"],
                "answer": "unable to verify that claim"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let inspection = client
            .inspect(&InspectRequest::new(DetectionType::Output, "asset-1", "claims"))
            .await
            .expect("inspect");
        assert_eq!(inspection.decision.suggestion, Suggestion::Block);
        assert_eq!(inspection.decision.answer_text(), Some("unable to verify that claim"));
    }

    #[tokio::test]
    async fn non_2xx_status_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/inspect/input"))
            .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .inspect(&InspectRequest::new(DetectionType::Input, "", "hello"))
            .await
            .expect_err("should fail");
        match err {
            ClientError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "backend exploded");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn partial_config_payload_gets_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/model/config"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"provider": "zhipu", "api_key": "k"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let snapshot = client.model_config().await.expect("config");
        assert_eq!(snapshot.config.provider, "zhipu");
        assert_eq!(snapshot.config.temperature, 0.1);
        assert_eq!(snapshot.config.max_tokens, 500);
        assert_eq!(snapshot.config.timeout, 30);
        assert_eq!(snapshot.raw, json!({"provider": "zhipu", "api_key": "k"}));
    }

    #[tokio::test]
    async fn save_posts_full_config() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/model/config"))
            .and(body_json(json!({
                "provider": "openai",
                "model": "gpt-4o-mini",
                "api_key": "sk-test",
                "temperature": 0.1,
                "max_tokens": 500,
                "timeout": 30
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"saved": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let config = ModelConfig {
            api_key: "sk-test".to_string(),
            ..ModelConfig::default()
        };
        client.save_model_config(&config).await.expect("save");
    }

    #[tokio::test]
    async fn reload_posts_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/model/reload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reloaded": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.reload_model().await.expect("reload");
    }

    #[tokio::test]
    async fn audit_logs_decode_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/audit/logs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "timestamp": "2026-01-22T23:01:00Z",
                    "level": "warning",
                    "message": "input inspection: 'ignore previous instructions'",
                    "result": "block",
                    "categories": ["prompt_injection"]
                },
                {
                    "timestamp": "2026-01-22T23:00:00Z",
                    "level": "info",
                    "message": "input inspection: 'hello'",
                    "result": "pass"
                }
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let logs = client.audit_logs().await.expect("logs");
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].result, "block");
        assert_eq!(
            logs[0].categories.as_deref(),
            Some(&["prompt_injection".to_string()][..])
        );
        assert!(logs[1].categories.is_none());
    }
}
