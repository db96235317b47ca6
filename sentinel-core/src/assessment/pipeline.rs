//! Assessment Pipeline
//!
//! validate input → compose prompt → invoke oracle → normalize → validate output
//!
//! The first failure halts the run and is returned unchanged. Output
//! validation always runs. No retries happen here.

use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use super::normalizer::normalize;
use super::prompt::compose;
use super::schema::{check_request, report_json_schema, validate_report, validate_request};
use super::types::{ThreatAssessmentReport, ThreatAssessmentRequest};
use crate::error::{AssessmentError, AssessmentResult};
use crate::oracle::ReasoningOracle;

#[derive(Clone)]
pub struct AssessmentPipeline {
    oracle: Arc<dyn ReasoningOracle>,
    output_schema: Arc<Value>,
}

impl AssessmentPipeline {
    pub fn new(oracle: Arc<dyn ReasoningOracle>) -> Self {
        Self {
            oracle,
            output_schema: Arc::new(report_json_schema()),
        }
    }

    pub fn oracle_name(&self) -> &'static str {
        self.oracle.name()
    }

    /// Assess an untyped request, rejecting ill-typed input before the oracle
    pub async fn assess_value(&self, raw: &Value) -> AssessmentResult<ThreatAssessmentReport> {
        let request = validate_request(raw).map_err(|e| {
            log::info!("Request rejected: {}", e);
            AssessmentError::from(e)
        })?;
        self.assess(&request).await
    }

    pub async fn assess(
        &self,
        request: &ThreatAssessmentRequest,
    ) -> AssessmentResult<ThreatAssessmentReport> {
        let started = Instant::now();
        let result = self.run(request).await;
        let elapsed_ms = started.elapsed().as_millis();

        match &result {
            Ok(report) => log::info!(
                "Assessment complete via {} in {} ms: level={}, confidence={:.2}",
                self.oracle.name(),
                elapsed_ms,
                report.threat_level,
                report.confidence_score
            ),
            Err(AssessmentError::MalformedOutput { raw_excerpt }) => log::error!(
                "Assessment failed after {} ms: malformed oracle output: {}",
                elapsed_ms,
                raw_excerpt
            ),
            Err(e) => log::warn!("Assessment failed after {} ms: {}", elapsed_ms, e),
        }

        result
    }

    async fn run(&self, request: &ThreatAssessmentRequest) -> AssessmentResult<ThreatAssessmentReport> {
        check_request(request)?;

        let prompt = compose(request);
        log::debug!(
            "Prompt composed ({} chars, intelligence: {})",
            prompt.len(),
            request.intelligence().is_some()
        );

        let raw = self.oracle.invoke(&prompt, &self.output_schema).await?;
        let candidate = normalize(raw)?;
        let report = validate_report(&candidate)?;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::fixtures::{sample_report, sample_report_json, sample_request};
    use crate::oracle::{RawOutput, ReplayOracle};
    use serde_json::json;

    fn pipeline_with(oracle: ReplayOracle) -> (AssessmentPipeline, Arc<ReplayOracle>) {
        let oracle = Arc::new(oracle);
        (AssessmentPipeline::new(oracle.clone()), oracle)
    }

    #[tokio::test]
    async fn test_structured_output_succeeds() {
        let (pipeline, _) = pipeline_with(ReplayOracle::new(RawOutput::Structured(sample_report_json())));
        let report = pipeline.assess(&sample_request()).await.unwrap();
        assert_eq!(report, sample_report());
    }

    #[tokio::test]
    async fn test_stringified_output_succeeds() {
        let text = serde_json::to_string(&sample_report_json()).unwrap();
        let (pipeline, _) = pipeline_with(ReplayOracle::new(RawOutput::Text(text)));
        let report = pipeline.assess(&sample_request()).await.unwrap();
        assert_eq!(report.threat_level, crate::assessment::ThreatLevel::High);
    }

    #[tokio::test]
    async fn test_not_json_fails_malformed() {
        let (pipeline, _) = pipeline_with(ReplayOracle::new(RawOutput::Text("not json".to_string())));
        let err = pipeline.assess(&sample_request()).await.unwrap_err();
        assert!(matches!(err, AssessmentError::MalformedOutput { .. }));
    }

    #[tokio::test]
    async fn test_empty_output_always_fails_empty() {
        let (pipeline, _) = pipeline_with(ReplayOracle::new(RawOutput::Empty));
        for _ in 0..3 {
            assert_eq!(
                pipeline.assess(&sample_request()).await,
                Err(AssessmentError::EmptyOutput)
            );
        }
    }

    #[tokio::test]
    async fn test_unavailable_oracle_fails_unavailable() {
        let (pipeline, _) = pipeline_with(ReplayOracle::unavailable("connection refused"));
        let err = pipeline.assess(&sample_request()).await.unwrap_err();
        assert!(matches!(err, AssessmentError::OracleUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_invalid_output_is_never_returned() {
        let mut bad = sample_report_json();
        bad["confidenceScore"] = json!(1.5);
        let (pipeline, _) = pipeline_with(ReplayOracle::new(RawOutput::Structured(bad)));
        match pipeline.assess(&sample_request()).await {
            Err(AssessmentError::Validation(e)) => {
                assert_eq!(e.field, "confidenceScore");
                assert!(e.is_report());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_ill_typed_request_never_reaches_oracle() {
        let (pipeline, oracle) =
            pipeline_with(ReplayOracle::new(RawOutput::Structured(sample_report_json())));
        let raw = json!({
            "environmentalData": "ok",
            "facilityData": 12,
            "historicalIncidentData": "ok",
        });
        match pipeline.assess_value(&raw).await {
            Err(AssessmentError::Validation(e)) => {
                assert_eq!(e.field, "facilityData");
                assert!(!e.is_report());
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(oracle.invocations(), 0);
    }

    #[tokio::test]
    async fn test_empty_typed_request_never_reaches_oracle() {
        let (pipeline, oracle) =
            pipeline_with(ReplayOracle::new(RawOutput::Structured(sample_report_json())));
        let mut request = sample_request();
        request.historical_incident_data = String::new();
        assert!(matches!(
            pipeline.assess(&request).await,
            Err(AssessmentError::Validation(_))
        ));
        assert_eq!(oracle.invocations(), 0);
    }

    #[tokio::test]
    async fn test_single_oracle_call_per_assessment() {
        let (pipeline, oracle) = pipeline_with(ReplayOracle::new(RawOutput::Empty));
        let _ = pipeline.assess(&sample_request()).await;
        assert_eq!(oracle.invocations(), 1);
    }
}
