//! Central Configuration Constants
//!
//! Single source of truth for pipeline defaults.
//! Environment overrides live in `config`.

use std::time::Duration;

/// Default OpenAI-compatible endpoint for the reasoning oracle
pub const DEFAULT_ORACLE_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model name
pub const DEFAULT_ORACLE_MODEL: &str = "gpt-4o-mini";

/// Default sampling temperature
pub const DEFAULT_ORACLE_TEMPERATURE: f32 = 0.2;

/// Default request timeout (seconds)
pub const DEFAULT_ORACLE_TIMEOUT_SECS: u64 = 60;

/// Name given to the output contract sent to the oracle
pub const REPORT_SCHEMA_NAME: &str = "threat_assessment_report";

/// Raw oracle output kept for diagnostics is cut to this many chars
pub const MAX_EXCERPT_CHARS: usize = 200;

// ============================================
// Progress heuristic
// ============================================

/// Default progress tick interval
pub const DEFAULT_PROGRESS_TICK: Duration = Duration::from_millis(400);

/// Running progress never passes this value; only success reaches 100
pub const PROGRESS_CEILING: f32 = 95.0;

/// Fraction of one phase-width added per tick
pub const PROGRESS_STEP_FACTOR: f32 = 0.8;

/// Phase label on confirmed success
pub const PHASE_COMPLETE: &str = "complete";

/// Phase label on failure
pub const PHASE_FAILED: &str = "failed";

/// Phase label before a run starts
pub const PHASE_IDLE: &str = "idle";

/// Ordered phase labels shown while an assessment is in flight
pub const PROGRESS_PHASES: [&str; 11] = [
    "Initializing analysis core...",
    "Parsing environmental data stream...",
    "Integrating facility sensor inputs...",
    "Cross-referencing historical incidents...",
    "Analyzing intelligence feeds...",
    "Building threat probability matrix...",
    "Correlating multi-vector data points...",
    "Simulating potential scenarios...",
    "Calculating confidence scores...",
    "Generating mitigation strategies...",
    "Finalizing report...",
];

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Sentinel Shield";
