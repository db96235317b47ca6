//! Response Normalizer
//!
//! Turns raw oracle output into a candidate report value. It never fills in
//! or repairs fields; `schema::validate_report` decides acceptance.
//!
//! Tolerated shapes:
//! - structured value: passed through unchanged
//! - text holding serialized JSON: parsed exactly once
//! - nothing: `EmptyOutput`

use serde_json::Value;

use crate::error::{AssessmentError, AssessmentResult};
use crate::oracle::RawOutput;

pub fn normalize(raw: RawOutput) -> AssessmentResult<Value> {
    match raw {
        RawOutput::Empty | RawOutput::Structured(Value::Null) => Err(AssessmentError::EmptyOutput),
        RawOutput::Structured(value) => Ok(value),
        RawOutput::Text(text) if text.trim().is_empty() => Err(AssessmentError::EmptyOutput),
        RawOutput::Text(text) => serde_json::from_str::<Value>(&text).map_err(|e| {
            log::debug!("Oracle text is not JSON: {}", e);
            AssessmentError::malformed(&text)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::fixtures::{sample_report, sample_report_json};
    use crate::assessment::schema::validate_report;
    use serde_json::json;

    #[test]
    fn test_structured_passes_through() {
        let value = sample_report_json();
        assert_eq!(normalize(RawOutput::Structured(value.clone())).unwrap(), value);
    }

    #[test]
    fn test_round_trip_is_noop_on_valid_report() {
        let report = sample_report();
        let raw = RawOutput::Structured(serde_json::to_value(&report).unwrap());
        let normalized = validate_report(&normalize(raw).unwrap()).unwrap();
        assert_eq!(normalized, report);
    }

    #[test]
    fn test_stringified_report_is_decoded() {
        let text = serde_json::to_string(&sample_report_json()).unwrap();
        let value = normalize(RawOutput::Text(text)).unwrap();
        assert_eq!(validate_report(&value).unwrap(), sample_report());
    }

    #[test]
    fn test_not_json_is_malformed() {
        match normalize(RawOutput::Text("not json".to_string())) {
            Err(AssessmentError::MalformedOutput { raw_excerpt }) => {
                assert_eq!(raw_excerpt, "not json")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_fenced_json_is_not_repaired() {
        let text = format!("```json\n{}\n```", sample_report_json());
        assert!(matches!(
            normalize(RawOutput::Text(text)),
            Err(AssessmentError::MalformedOutput { .. })
        ));
    }

    #[test]
    fn test_double_encoded_is_parsed_only_once() {
        let inner = serde_json::to_string(&sample_report_json()).unwrap();
        let outer = serde_json::to_string(&inner).unwrap();
        let value = normalize(RawOutput::Text(outer)).unwrap();
        assert!(value.is_string());
        assert!(validate_report(&value).is_err());
    }

    #[test]
    fn test_empty_shapes() {
        for raw in [
            RawOutput::Empty,
            RawOutput::Structured(Value::Null),
            RawOutput::Text(String::new()),
            RawOutput::Text("  \n".to_string()),
        ] {
            assert_eq!(normalize(raw), Err(AssessmentError::EmptyOutput));
        }
    }

    #[test]
    fn test_missing_fields_are_not_filled() {
        let value = normalize(RawOutput::Structured(json!({"threatLevel": "low"}))).unwrap();
        assert_eq!(value, json!({"threatLevel": "low"}));
    }
}
