//! Error handling
//!
//! Every stage of the pipeline fails with one of these kinds. The pipeline
//! forwards the first failure unchanged and never adds kinds of its own.

use thiserror::Error;

use crate::constants::MAX_EXCERPT_CHARS;

pub type AssessmentResult<T> = Result<T, AssessmentError>;

/// Which side of the oracle call broke the contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSide {
    /// The caller's request
    Request,
    /// The oracle's report
    Report,
}

/// A request or report that broke the schema contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field `{field}` {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
    pub side: ValidationSide,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
            side: ValidationSide::Request,
        }
    }

    /// Re-attribute the failure to the oracle's report
    pub fn on_report(self) -> Self {
        Self {
            side: ValidationSide::Report,
            ..self
        }
    }

    pub fn is_report(&self) -> bool {
        self.side == ValidationSide::Report
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssessmentError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("reasoning oracle unavailable: {reason}")]
    OracleUnavailable { reason: String },

    #[error("reasoning oracle returned no output")]
    EmptyOutput,

    // The excerpt is diagnostic only; Display must not leak it.
    #[error("reasoning oracle returned malformed output")]
    MalformedOutput { raw_excerpt: String },
}

impl AssessmentError {
    pub fn oracle_unavailable(reason: impl Into<String>) -> Self {
        AssessmentError::OracleUnavailable {
            reason: reason.into(),
        }
    }

    pub fn malformed(raw: &str) -> Self {
        AssessmentError::MalformedOutput {
            raw_excerpt: excerpt(raw),
        }
    }

    /// Text safe to show an end user
    pub fn user_message(&self) -> String {
        match self {
            AssessmentError::Validation(err) if err.is_report() => {
                "The reasoning service returned an invalid report. Please try again.".to_string()
            }
            AssessmentError::Validation(err) => format!("Invalid input: {}", err),
            AssessmentError::OracleUnavailable { .. } | AssessmentError::EmptyOutput => {
                "The reasoning service failed to generate a prediction. Please try again."
                    .to_string()
            }
            AssessmentError::MalformedOutput { .. } => {
                "The reasoning service returned an invalid report format. Please try again."
                    .to_string()
            }
        }
    }

    /// Short machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            AssessmentError::Validation(_) => "validation_error",
            AssessmentError::OracleUnavailable { .. } => "oracle_unavailable",
            AssessmentError::EmptyOutput => "empty_output",
            AssessmentError::MalformedOutput { .. } => "malformed_output",
        }
    }
}

/// Cut `raw` to at most `MAX_EXCERPT_CHARS` chars
pub fn excerpt(raw: &str) -> String {
    match raw.char_indices().nth(MAX_EXCERPT_CHARS) {
        Some((idx, _)) => format!("{}...", &raw[..idx]),
        None => raw.to_string(),
    }
}
