//! Assessment Types
//!
//! Request and report data structures. No validation logic here; see `schema`.

use serde::{Deserialize, Serialize};

// ============================================================================
// REQUEST
// ============================================================================

/// Situational input for one assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatAssessmentRequest {
    /// Atmospheric and radiological ambient conditions
    pub environmental_data: String,
    /// Sensor, security and system status
    pub facility_data: String,
    /// Past incidents and outcomes
    pub historical_incident_data: String,
    /// External or unstructured intelligence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intelligence_feeds: Option<String>,
}

impl ThreatAssessmentRequest {
    /// Intelligence feeds when present and not blank
    pub fn intelligence(&self) -> Option<&str> {
        self.intelligence_feeds
            .as_deref()
            .filter(|feeds| !feeds.trim().is_empty())
    }
}

// ============================================================================
// THREAT LEVEL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
    Critical,
    /// Data was insufficient for a confident assessment
    Unknown,
}

impl ThreatLevel {
    pub const ALL: [ThreatLevel; 5] = [
        ThreatLevel::Low,
        ThreatLevel::Medium,
        ThreatLevel::High,
        ThreatLevel::Critical,
        ThreatLevel::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLevel::Low => "low",
            ThreatLevel::Medium => "medium",
            ThreatLevel::High => "high",
            ThreatLevel::Critical => "critical",
            ThreatLevel::Unknown => "unknown",
        }
    }

    /// Parse the exact lowercase wire value
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == value)
    }

    /// Ordering for display and sorting. Unknown ranks below low.
    pub fn severity_rank(&self) -> u8 {
        match self {
            ThreatLevel::Unknown => 0,
            ThreatLevel::Low => 1,
            ThreatLevel::Medium => 2,
            ThreatLevel::High => 3,
            ThreatLevel::Critical => 4,
        }
    }
}

impl std::fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// Validated threat report. Every field is required on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatAssessmentReport {
    pub threat_level: ThreatLevel,
    pub threat_vector: String,
    pub potential_threats: Vec<String>,
    pub impact_assessment: String,
    pub early_warning_indicators: Vec<String>,
    /// Priority-ordered, most urgent first
    pub recommended_actions: Vec<String>,
    pub suggested_data_points_to_monitor: Vec<String>,
    /// In `[0.0, 1.0]`
    pub confidence_score: f64,
    pub confidence_reasoning: String,
}

// ============================================================================
// REPORT SECTIONS
// ============================================================================

/// List sections of a report, each mapped explicitly to its field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSection {
    PotentialThreats,
    EarlyWarningIndicators,
    RecommendedActions,
    SuggestedDataPointsToMonitor,
}

impl ReportSection {
    pub const ALL: [ReportSection; 4] = [
        ReportSection::PotentialThreats,
        ReportSection::EarlyWarningIndicators,
        ReportSection::RecommendedActions,
        ReportSection::SuggestedDataPointsToMonitor,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ReportSection::PotentialThreats => "Potential Threats Identified",
            ReportSection::EarlyWarningIndicators => "Early Warning Indicators",
            ReportSection::RecommendedActions => "Recommended Actions",
            ReportSection::SuggestedDataPointsToMonitor => "Suggested Data Points to Monitor",
        }
    }

    /// Wire name of the backing report field
    pub fn field_name(&self) -> &'static str {
        match self {
            ReportSection::PotentialThreats => "potentialThreats",
            ReportSection::EarlyWarningIndicators => "earlyWarningIndicators",
            ReportSection::RecommendedActions => "recommendedActions",
            ReportSection::SuggestedDataPointsToMonitor => "suggestedDataPointsToMonitor",
        }
    }

    pub fn items<'a>(&self, report: &'a ThreatAssessmentReport) -> &'a [String] {
        match self {
            ReportSection::PotentialThreats => &report.potential_threats,
            ReportSection::EarlyWarningIndicators => &report.early_warning_indicators,
            ReportSection::RecommendedActions => &report.recommended_actions,
            ReportSection::SuggestedDataPointsToMonitor => {
                &report.suggested_data_points_to_monitor
            }
        }
    }

    /// Placeholder line for an empty section
    pub fn empty_text(&self) -> String {
        let subject = match self {
            ReportSection::PotentialThreats => "potential threats",
            other => other.title(),
        };
        format!("No specific {} based on current data.", subject.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threat_level_wire_values() {
        for level in ThreatLevel::ALL {
            let json = serde_json::to_value(level).unwrap();
            assert_eq!(json, serde_json::json!(level.as_str()));
            assert_eq!(ThreatLevel::parse(level.as_str()), Some(level));
        }
        assert_eq!(ThreatLevel::parse("High"), None);
        assert_eq!(ThreatLevel::parse("severe"), None);
    }

    #[test]
    fn test_severity_rank_orders_levels() {
        assert!(ThreatLevel::Unknown.severity_rank() < ThreatLevel::Low.severity_rank());
        assert!(ThreatLevel::High.severity_rank() < ThreatLevel::Critical.severity_rank());
    }

    #[test]
    fn test_request_wire_names() {
        let request = ThreatAssessmentRequest {
            environmental_data: "env".to_string(),
            facility_data: "fac".to_string(),
            historical_incident_data: "hist".to_string(),
            intelligence_feeds: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["environmentalData"], "env");
        assert_eq!(json["historicalIncidentData"], "hist");
        assert!(json.get("intelligenceFeeds").is_none());
    }

    #[test]
    fn test_blank_intelligence_is_absent() {
        let request = ThreatAssessmentRequest {
            environmental_data: "env".to_string(),
            facility_data: "fac".to_string(),
            historical_incident_data: "hist".to_string(),
            intelligence_feeds: Some("   ".to_string()),
        };
        assert_eq!(request.intelligence(), None);
    }

    #[test]
    fn test_section_field_names_match_serde() {
        let report = ThreatAssessmentReport {
            threat_level: ThreatLevel::Low,
            threat_vector: "v".to_string(),
            potential_threats: vec!["a".to_string()],
            impact_assessment: "i".to_string(),
            early_warning_indicators: vec!["b".to_string()],
            recommended_actions: vec!["c".to_string()],
            suggested_data_points_to_monitor: vec!["d".to_string()],
            confidence_score: 0.5,
            confidence_reasoning: "r".to_string(),
        };
        let json = serde_json::to_value(&report).unwrap();
        for section in ReportSection::ALL {
            let wire: Vec<String> =
                serde_json::from_value(json[section.field_name()].clone()).unwrap();
            assert_eq!(wire.as_slice(), section.items(&report));
        }
    }

    #[test]
    fn test_section_empty_text() {
        assert_eq!(
            ReportSection::PotentialThreats.empty_text(),
            "No specific potential threats based on current data."
        );
        assert_eq!(
            ReportSection::RecommendedActions.empty_text(),
            "No specific recommended actions based on current data."
        );
    }
}
