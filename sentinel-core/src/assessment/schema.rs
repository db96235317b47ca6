//! Schema Validator
//!
//! Canonical shape of requests and reports, plus validate-or-reject for both
//! directions. Pure functions, no side effects.
//!
//! Validation walks a `serde_json::Value` by hand rather than relying on
//! `serde::Deserialize` so that every rejection names the offending field.

use serde_json::{json, Map, Value};

use super::types::{ThreatAssessmentReport, ThreatAssessmentRequest, ThreatLevel};
use crate::error::ValidationError;

// ============================================================================
// FIELD TABLES
// ============================================================================

/// Shape of one report field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Level,
    Text,
    TextList,
    Score,
}

/// One report field as exposed to the oracle
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
}

pub const REQUEST_REQUIRED_FIELDS: [&str; 3] =
    ["environmentalData", "facilityData", "historicalIncidentData"];

pub const REQUEST_OPTIONAL_FIELD: &str = "intelligenceFeeds";

/// Report fields in canonical order
pub const REPORT_FIELDS: [FieldSpec; 9] = [
    FieldSpec {
        name: "threatLevel",
        kind: FieldKind::Level,
        description: "Overall threat to the facility. Use 'unknown' if data is insufficient for a confident assessment.",
    },
    FieldSpec {
        name: "threatVector",
        kind: FieldKind::Text,
        description: "Most probable primary origin or nature of the threat (e.g. \"Cyber-Physical Attack\", \"Insider Sabotage Attempt\", \"Cascading Equipment Failure\"). Be specific.",
    },
    FieldSpec {
        name: "potentialThreats",
        kind: FieldKind::TextList,
        description: "Specific, plausible CBRN or related threat scenarios that could arise.",
    },
    FieldSpec {
        name: "impactAssessment",
        kind: FieldKind::Text,
        description: "Brief description of the primary consequences if the main threat materializes.",
    },
    FieldSpec {
        name: "earlyWarningIndicators",
        kind: FieldKind::TextList,
        description: "Specific data points or observations from the inputs that are the strongest indicators for the prediction. Direct evidence only.",
    },
    FieldSpec {
        name: "recommendedActions",
        kind: FieldKind::TextList,
        description: "Prioritized, actionable steps to mitigate or respond to the threats, most urgent first.",
    },
    FieldSpec {
        name: "suggestedDataPointsToMonitor",
        kind: FieldKind::TextList,
        description: "Additional sensors, logs or data streams personnel should now monitor with heightened scrutiny.",
    },
    FieldSpec {
        name: "confidenceScore",
        kind: FieldKind::Score,
        description: "Number between 0.0 and 1.0 for confidence in the overall assessment. 1.0 is highest.",
    },
    FieldSpec {
        name: "confidenceReasoning",
        kind: FieldKind::Text,
        description: "Brief explanation of what supports and what undermines the confidence score.",
    },
];

// ============================================================================
// REQUEST
// ============================================================================

/// Validate an untyped request
pub fn validate_request(raw: &Value) -> Result<ThreatAssessmentRequest, ValidationError> {
    let obj = as_object(raw)?;

    let environmental_data = required_text(obj, "environmentalData")?;
    let facility_data = required_text(obj, "facilityData")?;
    let historical_incident_data = required_text(obj, "historicalIncidentData")?;

    let intelligence_feeds = match obj.get(REQUEST_OPTIONAL_FIELD) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            return Err(ValidationError::new(REQUEST_OPTIONAL_FIELD, "must be a string"));
        }
    };

    Ok(ThreatAssessmentRequest {
        environmental_data,
        facility_data,
        historical_incident_data,
        intelligence_feeds,
    })
}

/// Re-check a typed request. Types already guarantee strings; this enforces
/// non-emptiness.
pub fn check_request(request: &ThreatAssessmentRequest) -> Result<(), ValidationError> {
    let fields = [
        ("environmentalData", &request.environmental_data),
        ("facilityData", &request.facility_data),
        ("historicalIncidentData", &request.historical_incident_data),
    ];
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(ValidationError::new(name, "must not be empty"));
        }
    }
    Ok(())
}

fn required_text(obj: &Map<String, Value>, field: &str) -> Result<String, ValidationError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(ValidationError::new(field, "is required")),
        Some(Value::String(s)) if s.trim().is_empty() => {
            Err(ValidationError::new(field, "must not be empty"))
        }
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::new(field, "must be a string")),
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// Validate an untyped report. Unknown extra fields are ignored.
pub fn validate_report(raw: &Value) -> Result<ThreatAssessmentReport, ValidationError> {
    parse_report(raw).map_err(ValidationError::on_report)
}

fn parse_report(raw: &Value) -> Result<ThreatAssessmentReport, ValidationError> {
    let obj = as_object(raw)?;

    // Check in canonical order so the first failure is stable
    for spec in REPORT_FIELDS.iter() {
        let value = obj
            .get(spec.name)
            .ok_or_else(|| ValidationError::new(spec.name, "is required"))?;
        check_field(spec, value)?;
    }

    Ok(ThreatAssessmentReport {
        threat_level: level(obj)?,
        threat_vector: text(obj, "threatVector")?,
        potential_threats: text_list(obj, "potentialThreats")?,
        impact_assessment: text(obj, "impactAssessment")?,
        early_warning_indicators: text_list(obj, "earlyWarningIndicators")?,
        recommended_actions: text_list(obj, "recommendedActions")?,
        suggested_data_points_to_monitor: text_list(obj, "suggestedDataPointsToMonitor")?,
        confidence_score: score(obj)?,
        confidence_reasoning: text(obj, "confidenceReasoning")?,
    })
}

fn check_field(spec: &FieldSpec, value: &Value) -> Result<(), ValidationError> {
    match spec.kind {
        FieldKind::Level => {
            let valid = value.as_str().and_then(ThreatLevel::parse).is_some();
            if !valid {
                return Err(ValidationError::new(
                    spec.name,
                    format!("must be one of {}", threat_level_list()),
                ));
            }
        }
        FieldKind::Text => {
            if !value.is_string() {
                return Err(ValidationError::new(spec.name, "must be a string"));
            }
        }
        FieldKind::TextList => {
            let items = value
                .as_array()
                .ok_or_else(|| ValidationError::new(spec.name, "must be an array of strings"))?;
            if let Some(idx) = items.iter().position(|item| !item.is_string()) {
                return Err(ValidationError::new(
                    format!("{}[{}]", spec.name, idx),
                    "must be a string",
                ));
            }
        }
        FieldKind::Score => {
            let n = value
                .as_f64()
                .ok_or_else(|| ValidationError::new(spec.name, "must be a number"))?;
            if !(0.0..=1.0).contains(&n) {
                return Err(ValidationError::new(
                    spec.name,
                    format!("must be between 0.0 and 1.0, got {}", n),
                ));
            }
        }
    }
    Ok(())
}

// Accessors below run after `check_field`, so their errors are unreachable in
// practice but keep the extraction total.

fn level(obj: &Map<String, Value>) -> Result<ThreatLevel, ValidationError> {
    obj.get("threatLevel")
        .and_then(Value::as_str)
        .and_then(ThreatLevel::parse)
        .ok_or_else(|| ValidationError::new("threatLevel", "is invalid"))
}

fn text(obj: &Map<String, Value>, field: &str) -> Result<String, ValidationError> {
    obj.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ValidationError::new(field, "must be a string"))
}

fn text_list(obj: &Map<String, Value>, field: &str) -> Result<Vec<String>, ValidationError> {
    obj.get(field)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .ok_or_else(|| ValidationError::new(field, "must be an array of strings"))
}

fn score(obj: &Map<String, Value>) -> Result<f64, ValidationError> {
    obj.get("confidenceScore")
        .and_then(Value::as_f64)
        .ok_or_else(|| ValidationError::new("confidenceScore", "must be a number"))
}

fn as_object(raw: &Value) -> Result<&Map<String, Value>, ValidationError> {
    raw.as_object()
        .ok_or_else(|| ValidationError::new("$", "must be a JSON object"))
}

/// "low, medium, high, critical, unknown"
pub fn threat_level_list() -> String {
    ThreatLevel::ALL
        .iter()
        .map(|level| level.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// OUTPUT CONTRACT
// ============================================================================

/// JSON Schema of the report, handed to the oracle as its output contract
pub fn report_json_schema() -> Value {
    let mut properties = Map::new();
    for spec in REPORT_FIELDS.iter() {
        let property = match spec.kind {
            FieldKind::Level => json!({
                "type": "string",
                "enum": ThreatLevel::ALL.iter().map(|l| l.as_str()).collect::<Vec<_>>(),
                "description": spec.description,
            }),
            FieldKind::Text => json!({
                "type": "string",
                "description": spec.description,
            }),
            FieldKind::TextList => json!({
                "type": "array",
                "items": { "type": "string" },
                "description": spec.description,
            }),
            FieldKind::Score => json!({
                "type": "number",
                "minimum": 0.0,
                "maximum": 1.0,
                "description": spec.description,
            }),
        };
        properties.insert(spec.name.to_string(), property);
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": REPORT_FIELDS.iter().map(|f| f.name).collect::<Vec<_>>(),
        "additionalProperties": false,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::assessment::fixtures::{sample_report_json, sample_request_json};
    use crate::error::ValidationSide;

    fn valid_request() -> Value {
        sample_request_json()
    }

    fn valid_report() -> Value {
        sample_report_json()
    }

    #[test]
    fn test_accepts_well_formed_request() {
        let request = validate_request(&valid_request()).unwrap();
        assert_eq!(request.intelligence_feeds, None);
        assert!(request.facility_data.contains("G-7"));
    }

    #[test]
    fn test_rejects_missing_required_field_by_name() {
        for field in REQUEST_REQUIRED_FIELDS {
            let mut raw = valid_request();
            raw.as_object_mut().unwrap().remove(field);
            let err = validate_request(&raw).unwrap_err();
            assert_eq!(err.field, field);
            assert_eq!(err.reason, "is required");
        }
    }

    #[test]
    fn test_rejects_empty_and_non_string_fields() {
        let mut raw = valid_request();
        raw["facilityData"] = json!("   ");
        assert_eq!(validate_request(&raw).unwrap_err().field, "facilityData");

        let mut raw = valid_request();
        raw["historicalIncidentData"] = json!(42);
        let err = validate_request(&raw).unwrap_err();
        assert_eq!(err.field, "historicalIncidentData");
        assert_eq!(err.reason, "must be a string");
    }

    #[test]
    fn test_intelligence_feeds_absent_null_or_string() {
        let mut raw = valid_request();
        raw["intelligenceFeeds"] = Value::Null;
        assert_eq!(validate_request(&raw).unwrap().intelligence_feeds, None);

        raw["intelligenceFeeds"] = json!("OSINT: dark web chatter");
        assert_eq!(
            validate_request(&raw).unwrap().intelligence_feeds.as_deref(),
            Some("OSINT: dark web chatter")
        );

        raw["intelligenceFeeds"] = json!(["not", "a", "string"]);
        assert_eq!(validate_request(&raw).unwrap_err().field, "intelligenceFeeds");
    }

    #[test]
    fn test_rejects_non_object_request() {
        let err = validate_request(&json!("environmentalData")).unwrap_err();
        assert_eq!(err.field, "$");
    }

    #[test]
    fn test_check_request_typed() {
        let mut request = validate_request(&valid_request()).unwrap();
        assert!(check_request(&request).is_ok());
        request.environmental_data.clear();
        assert_eq!(check_request(&request).unwrap_err().field, "environmentalData");
    }

    #[test]
    fn test_accepts_valid_report() {
        let report = validate_report(&valid_report()).unwrap();
        assert_eq!(report.threat_level, ThreatLevel::High);
        assert_eq!(report.recommended_actions[0], "Revoke S_KIM credentials");
    }

    #[test]
    fn test_rejects_report_missing_any_field() {
        for spec in REPORT_FIELDS.iter() {
            let mut raw = valid_report();
            raw.as_object_mut().unwrap().remove(spec.name);
            let err = validate_report(&raw).unwrap_err();
            assert_eq!(err.field, spec.name);
        }
    }

    #[test]
    fn test_rejects_threat_level_outside_enum() {
        for bad in [json!("severe"), json!("HIGH"), json!(""), json!(3), Value::Null] {
            let mut raw = valid_report();
            raw["threatLevel"] = bad;
            assert_eq!(validate_report(&raw).unwrap_err().field, "threatLevel");
        }
    }

    #[test]
    fn test_confidence_bounds() {
        for ok in [json!(0.0), json!(1.0), json!(0), json!(1), json!(0.5)] {
            let mut raw = valid_report();
            raw["confidenceScore"] = ok;
            assert!(validate_report(&raw).is_ok());
        }
        for bad in [json!(-0.01), json!(1.0001), json!(42), json!("0.5"), Value::Null] {
            let mut raw = valid_report();
            raw["confidenceScore"] = bad;
            assert_eq!(validate_report(&raw).unwrap_err().field, "confidenceScore");
        }
    }

    #[test]
    fn test_rejects_sequence_of_non_strings() {
        let mut raw = valid_report();
        raw["recommendedActions"] = json!(["Evacuate", 7]);
        let err = validate_report(&raw).unwrap_err();
        assert_eq!(err.field, "recommendedActions[1]");

        let mut raw = valid_report();
        raw["potentialThreats"] = json!("Chemical spill");
        assert_eq!(validate_report(&raw).unwrap_err().field, "potentialThreats");
    }

    #[test]
    fn test_failures_are_attributed_to_their_side() {
        let mut raw = valid_request();
        raw.as_object_mut().unwrap().remove("facilityData");
        assert_eq!(validate_request(&raw).unwrap_err().side, ValidationSide::Request);

        let err = validate_report(&json!("{\"threatLevel\":\"high\"}")).unwrap_err();
        assert_eq!(err.field, "$");
        assert_eq!(err.side, ValidationSide::Report);

        let mut raw = valid_report();
        raw["threatLevel"] = json!("severe");
        assert!(validate_report(&raw).unwrap_err().is_report());
    }

    #[test]
    fn test_empty_sequences_are_valid() {
        let mut raw = valid_report();
        raw["potentialThreats"] = json!([]);
        assert!(validate_report(&raw).unwrap().potential_threats.is_empty());
    }

    #[test]
    fn test_report_json_schema_shape() {
        let schema = report_json_schema();
        assert_eq!(schema["required"].as_array().unwrap().len(), 9);
        assert_eq!(
            schema["properties"]["threatLevel"]["enum"],
            json!(["low", "medium", "high", "critical", "unknown"])
        );
        assert_eq!(schema["properties"]["confidenceScore"]["maximum"], json!(1.0));
        assert_eq!(schema["additionalProperties"], json!(false));
    }
}
