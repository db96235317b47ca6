//! Reasoning Gateway
//!
//! Hands a composed prompt and the report output contract to an external
//! reasoning oracle and returns whatever comes back, untouched.
//!
//! ## Structure
//! - `http`: OpenAI-compatible chat completions client
//! - `replay`: fixed recorded output, for offline runs and tests
//!
//! Gateways never retry and keep no state between calls. Any failure to get
//! an answer is reported as `AssessmentError::OracleUnavailable`.

pub mod http;
pub mod replay;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AssessmentResult;

pub use http::HttpOracle;
pub use replay::ReplayOracle;

/// Unprocessed oracle answer
#[derive(Debug, Clone, PartialEq)]
pub enum RawOutput {
    /// Already-structured value
    Structured(Value),
    /// Text that may hold a serialized report
    Text(String),
    /// Nothing usable
    Empty,
}

impl RawOutput {
    /// Interpret a recorded JSON document: strings stay text, null is empty
    pub fn from_recorded(value: Value) -> Self {
        match value {
            Value::Null => RawOutput::Empty,
            Value::String(s) => RawOutput::Text(s),
            other => RawOutput::Structured(other),
        }
    }
}

#[async_trait]
pub trait ReasoningOracle: Send + Sync {
    /// Single, independent invocation
    async fn invoke(&self, prompt: &str, output_schema: &Value) -> AssessmentResult<RawOutput>;

    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_recorded() {
        assert_eq!(RawOutput::from_recorded(Value::Null), RawOutput::Empty);
        assert_eq!(
            RawOutput::from_recorded(json!("{\"a\":1}")),
            RawOutput::Text("{\"a\":1}".to_string())
        );
        assert_eq!(
            RawOutput::from_recorded(json!({"a": 1})),
            RawOutput::Structured(json!({"a": 1}))
        );
    }
}
