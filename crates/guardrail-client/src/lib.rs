// guardrail-client: HTTP client SDK for the guardrail admin API

pub mod client;
pub mod error;

pub use client::{ConfigSnapshot, GuardrailClient, GuardrailClientConfig, Inspection};
pub use error::ClientError;
