//! Shared test data

use serde_json::{json, Value};

use super::types::{ThreatAssessmentReport, ThreatAssessmentRequest, ThreatLevel};

pub fn sample_request_json() -> Value {
    json!({
        "environmentalData": "Temp: 22°C, Humidity: 55%, Wind: 5km/h SW, Rad: 0.04uSv/h",
        "facilityData": "Core Temp: 310°C (Nominal), Perimeter Sensors: Sector G-7 intermittent signal loss",
        "historicalIncidentData": "2022-05-15: Minor coolant leak (Pump P-02B), resolved in 4 hrs",
    })
}

pub fn sample_request() -> ThreatAssessmentRequest {
    ThreatAssessmentRequest {
        environmental_data: "Temp: 22°C, Humidity: 55%, Wind: 5km/h SW, Rad: 0.04uSv/h".to_string(),
        facility_data: "Core Temp: 310°C (Nominal), Perimeter Sensors: Sector G-7 intermittent signal loss".to_string(),
        historical_incident_data: "2022-05-15: Minor coolant leak (Pump P-02B), resolved in 4 hrs".to_string(),
        intelligence_feeds: None,
    }
}

pub fn sample_report_json() -> Value {
    json!({
        "threatLevel": "high",
        "threatVector": "Insider Sabotage Attempt",
        "potentialThreats": ["Unauthorized access to critical control systems"],
        "impactAssessment": "Operational halt in Zone 3",
        "earlyWarningIndicators": ["Unscheduled maintenance override at 03:15 AM"],
        "recommendedActions": ["Revoke S_KIM credentials", "Audit Control System Alpha"],
        "suggestedDataPointsToMonitor": ["Access logs for Zone 3"],
        "confidenceScore": 0.72,
        "confidenceReasoning": "Access anomaly correlates with perimeter sensor loss",
    })
}

pub fn sample_report() -> ThreatAssessmentReport {
    ThreatAssessmentReport {
        threat_level: ThreatLevel::High,
        threat_vector: "Insider Sabotage Attempt".to_string(),
        potential_threats: vec!["Unauthorized access to critical control systems".to_string()],
        impact_assessment: "Operational halt in Zone 3".to_string(),
        early_warning_indicators: vec!["Unscheduled maintenance override at 03:15 AM".to_string()],
        recommended_actions: vec![
            "Revoke S_KIM credentials".to_string(),
            "Audit Control System Alpha".to_string(),
        ],
        suggested_data_points_to_monitor: vec!["Access logs for Zone 3".to_string()],
        confidence_score: 0.72,
        confidence_reasoning: "Access anomaly correlates with perimeter sensor loss".to_string(),
    }
}
