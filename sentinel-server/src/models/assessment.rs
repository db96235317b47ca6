//! Assessment API models

use chrono::{DateTime, Utc};
use sentinel_core::{ProgressStatus, ThreatAssessmentReport, ThreatAssessmentRequest};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

/// Caller-side bounds, checked after the schema accepts the request
#[derive(Debug, Validate)]
pub struct AssessmentForm {
    #[validate(length(min = 20, max = 3000, message = "Environmental data must be 20-3000 characters"))]
    pub environmental_data: String,

    #[validate(length(min = 20, max = 3000, message = "Facility data must be 20-3000 characters"))]
    pub facility_data: String,

    #[validate(length(min = 20, max = 3000, message = "Historical incident data must be 20-3000 characters"))]
    pub historical_incident_data: String,

    #[validate(length(max = 3000, message = "Intelligence feeds must be at most 3000 characters"))]
    pub intelligence_feeds: Option<String>,
}

impl From<&ThreatAssessmentRequest> for AssessmentForm {
    fn from(request: &ThreatAssessmentRequest) -> Self {
        Self {
            environmental_data: request.environmental_data.clone(),
            facility_data: request.facility_data.clone(),
            historical_incident_data: request.historical_incident_data.clone(),
            intelligence_feeds: request.intelligence_feeds.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedJob {
    pub id: Uuid,
    pub status_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobError {
    pub kind: &'static str,
    pub message: String,
}

/// Job status as seen by a status widget
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobView {
    pub id: Uuid,
    pub status: ProgressStatus,
    pub progress: f32,
    pub phase: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ThreatAssessmentReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JobError>,
    pub created_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}
