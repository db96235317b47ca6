//! Sentinel Shield - Structured Threat-Assessment Pipeline
//!
//! Accepts multi-section situational text, asks an external reasoning oracle
//! for a threat report under a strict output contract, and returns a
//! validated, typed report.
//!
//! # Architecture
//!
//! ```text
//! request ─▶ schema ─▶ prompt ─▶ oracle ─▶ normalizer ─▶ schema ─▶ report
//!                                   ▲
//!              progress ── timer ───┘ (runs alongside, no real signal)
//! ```

pub mod assessment;
pub mod config;
pub mod constants;
pub mod error;
pub mod oracle;
pub mod progress;

pub use assessment::{
    AssessmentPipeline, ReportSection, ThreatAssessmentReport, ThreatAssessmentRequest,
    ThreatLevel,
};
pub use config::{OracleConfig, ProgressConfig};
pub use error::{AssessmentError, AssessmentResult, ValidationError, ValidationSide};
pub use oracle::{HttpOracle, RawOutput, ReasoningOracle, ReplayOracle};
pub use progress::{ProgressReporter, ProgressSnapshot, ProgressStatus};
