//! Prompt Composer
//!
//! Renders the instruction document sent to the reasoning oracle. Input
//! fields are embedded verbatim; the intelligence section is emitted only
//! when feeds are present.

use std::fmt::Write;

use super::schema::{threat_level_list, FieldKind, REPORT_FIELDS};
use super::types::ThreatAssessmentRequest;

pub const INTELLIGENCE_SECTION_TITLE: &str = "Intelligence Feeds";

const PREAMBLE: &str = "You are Sentinel Shield, an AI-powered CBRN threat prediction and analysis \
system for a high-security nuclear facility. Your role is to act as a seasoned security and \
operations analyst.";

const ANALYSIS_DIRECTIVE: &str = "Based on your deep analysis, correlation of disparate data \
points, and identification of subtle anomalies, provide a structured threat assessment.";

const CLOSING: &str = "Prioritize safety and security. Be analytical and thorough. Ensure all \
fields in the output schema are populated.\nReturn ONLY a single valid JSON object with exactly \
these fields. No markdown fences, no commentary.";

/// Render the oracle prompt for a validated request
pub fn compose(request: &ThreatAssessmentRequest) -> String {
    let mut sections: Vec<(&str, &str)> = vec![
        ("Environmental Data", request.environmental_data.as_str()),
        ("Facility & Sensor Data", request.facility_data.as_str()),
        ("Historical Incident Data", request.historical_incident_data.as_str()),
    ];
    if let Some(feeds) = request.intelligence() {
        sections.push((INTELLIGENCE_SECTION_TITLE, feeds));
    }

    let mut out = String::new();
    out.push_str(PREAMBLE);
    out.push_str("\n\nAnalyze the following comprehensive data streams meticulously:\n");
    for (idx, (title, body)) in sections.iter().enumerate() {
        // Writing to a String cannot fail
        let _ = writeln!(out, "{}. {}: {}", idx + 1, title, body);
    }

    out.push('\n');
    out.push_str(ANALYSIS_DIRECTIVE);
    out.push_str("\n\nYour output MUST be a valid JSON object with the following fields:\n\n");
    for spec in REPORT_FIELDS.iter() {
        let _ = writeln!(out, "- {} ({}): {}", spec.name, kind_label(spec.kind), spec.description);
    }
    let _ = writeln!(
        out,
        "\nthreatLevel MUST be exactly one of: {}.",
        threat_level_list()
    );

    out.push('\n');
    out.push_str(CLOSING);
    out.push('\n');
    out
}

fn kind_label(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Level => "string enum",
        FieldKind::Text => "string",
        FieldKind::TextList => "array of strings",
        FieldKind::Score => "number 0.0-1.0",
    }
}
