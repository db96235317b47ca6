//! Assessment handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use sentinel_core::assessment::validate_request;
use sentinel_core::{ThreatAssessmentReport, ThreatAssessmentRequest};

use crate::models::{AssessmentForm, CreatedJob, JobView};
use crate::{AppError, AppResult, AppState};

/// Schema check first, then caller-side length bounds
fn accept(body: &Value) -> AppResult<ThreatAssessmentRequest> {
    let request = validate_request(body).map_err(sentinel_core::AssessmentError::from)?;
    AssessmentForm::from(&request).validate()?;
    Ok(request)
}

/// Run an assessment inline and return the report
pub async fn run(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<Json<ThreatAssessmentReport>> {
    let request = accept(&body)?;
    let report = state.pipeline.assess(&request).await?;
    Ok(Json(report))
}

/// Start a background assessment job
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<CreatedJob>)> {
    let request = accept(&body)?;
    let id = state.jobs.start(state.pipeline.clone(), request);

    Ok((
        StatusCode::ACCEPTED,
        Json(CreatedJob {
            id,
            status_url: format!("/api/v1/assessments/{}", id),
        }),
    ))
}

/// Get job progress and outcome
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<JobView>> {
    let view = state
        .jobs
        .view(id)
        .ok_or_else(|| AppError::NotFound("Assessment not found".to_string()))?;

    Ok(Json(view))
}

/// Cancel a job
pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if !state.jobs.cancel(id) {
        return Err(AppError::NotFound("Assessment not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
