//! HTTP Oracle
//!
//! Client for an OpenAI-compatible `/chat/completions` endpoint. The report
//! schema travels as a strict `json_schema` response format.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

use super::{RawOutput, ReasoningOracle};
use crate::config::OracleConfig;
use crate::constants::REPORT_SCHEMA_NAME;
use crate::error::{AssessmentError, AssessmentResult};

pub struct HttpOracle {
    config: OracleConfig,
    http_client: reqwest::Client,
}

impl HttpOracle {
    pub fn new(config: OracleConfig) -> AssessmentResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AssessmentError::oracle_unavailable(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { config, http_client })
    }

    /// Create from environment
    pub fn from_env() -> AssessmentResult<Self> {
        Self::new(OracleConfig::from_env())
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    fn request_body(&self, prompt: &str, output_schema: &Value) -> Value {
        json!({
            "model": self.config.model,
            "temperature": self.config.temperature,
            "messages": [
                { "role": "user", "content": prompt }
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": REPORT_SCHEMA_NAME,
                    "schema": output_schema,
                    "strict": true,
                }
            }
        })
    }
}

#[async_trait]
impl ReasoningOracle for HttpOracle {
    async fn invoke(&self, prompt: &str, output_schema: &Value) -> AssessmentResult<RawOutput> {
        let url = self.config.completions_url();
        let body = self.request_body(prompt, output_schema);

        let mut request = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body);
        if !self.config.api_key.is_empty() {
            request = request.bearer_auth(&self.config.api_key);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| AssessmentError::oracle_unavailable(format!("Request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();
            log::warn!("Oracle returned {}: {}", status, crate::error::excerpt(&error_text));
            return Err(AssessmentError::oracle_unavailable(format!(
                "Oracle returned HTTP {}",
                status.as_u16()
            )));
        }

        let json: Value = resp.json().await.map_err(|e| {
            AssessmentError::oracle_unavailable(format!("Unreadable oracle response: {}", e))
        })?;

        interpret_completion(&json)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Pull the message content out of a chat completion body
pub(crate) fn interpret_completion(json: &Value) -> AssessmentResult<RawOutput> {
    let message = json
        .pointer("/choices/0/message")
        .ok_or_else(|| AssessmentError::oracle_unavailable("Oracle response has no choices"))?;

    if let Some(refusal) = message.get("refusal").and_then(Value::as_str) {
        return Err(AssessmentError::oracle_unavailable(format!(
            "Oracle declined: {}",
            refusal
        )));
    }

    match message.get("content") {
        None | Some(Value::Null) => Ok(RawOutput::Empty),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(RawOutput::Empty),
        Some(Value::String(s)) => Ok(RawOutput::Text(s.clone())),
        Some(other) => Ok(RawOutput::Structured(other.clone())),
    }
}
