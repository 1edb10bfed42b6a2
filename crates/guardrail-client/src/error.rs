/// Errors surfaced by [`crate::GuardrailClient`] operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid base url: {0}")]
    BaseUrl(String),
}
