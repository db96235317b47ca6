//! Replay Oracle
//!
//! Answers every invocation with the same recorded output. Backs the CLI's
//! offline mode and the pipeline tests.

use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{RawOutput, ReasoningOracle};
use crate::error::{AssessmentError, AssessmentResult};

enum Answer {
    Output(RawOutput),
    Unavailable(String),
}

pub struct ReplayOracle {
    answer: Answer,
    invocations: AtomicUsize,
}

impl ReplayOracle {
    pub fn new(output: RawOutput) -> Self {
        Self {
            answer: Answer::Output(output),
            invocations: AtomicUsize::new(0),
        }
    }

    /// Oracle that always fails as unreachable
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            answer: Answer::Unavailable(reason.into()),
            invocations: AtomicUsize::new(0),
        }
    }

    /// Load a recorded output. A file that is not JSON replays as raw text.
    pub fn from_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let output = match serde_json::from_str::<Value>(&content) {
            Ok(value) => RawOutput::from_recorded(value),
            Err(_) if content.trim().is_empty() => RawOutput::Empty,
            Err(_) => RawOutput::Text(content),
        };
        log::debug!("Replay output loaded from {}", path.as_ref().display());
        Ok(Self::new(output))
    }

    /// Number of times `invoke` was called
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReasoningOracle for ReplayOracle {
    async fn invoke(&self, _prompt: &str, _output_schema: &Value) -> AssessmentResult<RawOutput> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        match &self.answer {
            Answer::Output(output) => Ok(output.clone()),
            Answer::Unavailable(reason) => Err(AssessmentError::oracle_unavailable(reason.clone())),
        }
    }

    fn name(&self) -> &'static str {
        "replay"
    }
}
