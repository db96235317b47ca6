//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use sentinel_core::AssessmentError;
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    // Resource errors
    #[error("not found: {0}")]
    NotFound(String),

    // Validation errors
    #[error("validation error: {0}")]
    ValidationError(String),

    // Pipeline errors
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, kind) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Assessment(err) => {
                // The pipeline has already logged the failure
                let status = match err {
                    AssessmentError::Validation(e) if e.is_report() => StatusCode::BAD_GATEWAY,
                    AssessmentError::Validation(_) => StatusCode::BAD_REQUEST,
                    AssessmentError::OracleUnavailable { .. } | AssessmentError::EmptyOutput => {
                        StatusCode::SERVICE_UNAVAILABLE
                    }
                    AssessmentError::MalformedOutput { .. } => StatusCode::BAD_GATEWAY,
                };
                (status, err.user_message(), Some(err.kind()))
            }
        };

        let mut body = json!({
            "error": error_message,
            "status": status.as_u16()
        });
        if let Some(kind) = kind {
            body["kind"] = json!(kind);
        }

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                let name = wire_name(&field);
                errors.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{}: {}", name, msg),
                    None => format!("{}: {}", name, e.code),
                })
            })
            .collect();
        messages.sort();
        AppError::ValidationError(messages.join("; "))
    }
}

/// `environmental_data` -> `environmentalData`
fn wire_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
