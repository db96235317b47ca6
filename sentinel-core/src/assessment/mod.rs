//! Assessment Module
//!
//! Structured threat assessment: situational text in, validated report out.
//!
//! ## Structure
//! - `types`: Request, report, threat level, report sections
//! - `schema`: Validate-or-reject for both directions, output contract
//! - `prompt`: Instruction document for the oracle
//! - `normalizer`: Raw oracle output to candidate report value
//! - `pipeline`: Orchestration
//!
//! ## Usage
//! ```ignore
//! use std::sync::Arc;
//! use sentinel_core::assessment::AssessmentPipeline;
//! use sentinel_core::oracle::HttpOracle;
//!
//! let pipeline = AssessmentPipeline::new(Arc::new(HttpOracle::from_env()?));
//! let report = pipeline.assess(&request).await?;
//! println!("{} ({:.0}%)", report.threat_level, report.confidence_score * 100.0);
//! ```

pub mod types;
pub mod schema;
pub mod prompt;
pub mod normalizer;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod fixtures;

pub use types::{ReportSection, ThreatAssessmentReport, ThreatAssessmentRequest, ThreatLevel};

pub use schema::{check_request, report_json_schema, validate_report, validate_request};

pub use prompt::compose;

pub use normalizer::normalize;

pub use pipeline::AssessmentPipeline;
