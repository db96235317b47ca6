//! Configuration module
//!
//! Reads oracle and progress settings from the environment, falling back to
//! the defaults in `constants` when a variable is unset or unparseable.

use std::env;
use std::time::Duration;

use crate::constants::{
    DEFAULT_ORACLE_BASE_URL, DEFAULT_ORACLE_MODEL, DEFAULT_ORACLE_TEMPERATURE,
    DEFAULT_ORACLE_TIMEOUT_SECS, DEFAULT_PROGRESS_TICK, PROGRESS_CEILING, PROGRESS_PHASES,
    PROGRESS_STEP_FACTOR,
};

/// Reasoning oracle connection settings
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// Base URL of an OpenAI-compatible API (no trailing `/chat/completions`)
    pub base_url: String,

    /// Bearer token, empty for unauthenticated local gateways
    pub api_key: String,

    /// Model name
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Whole-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ORACLE_BASE_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_ORACLE_MODEL.to_string(),
            temperature: DEFAULT_ORACLE_TEMPERATURE,
            timeout_seconds: DEFAULT_ORACLE_TIMEOUT_SECS,
        }
    }
}

impl OracleConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("ORACLE_BASE_URL").unwrap_or(defaults.base_url),

            api_key: env::var("ORACLE_API_KEY").unwrap_or(defaults.api_key),

            model: env::var("ORACLE_MODEL").unwrap_or(defaults.model),

            temperature: env::var("ORACLE_TEMPERATURE")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.temperature),

            timeout_seconds: env::var("ORACLE_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.timeout_seconds),
        }
    }

    /// Full chat completions URL
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Progress heuristic settings
#[derive(Debug, Clone)]
pub struct ProgressConfig {
    /// Interval between progress ticks
    pub tick: Duration,

    /// Upper bound while running
    pub ceiling: f32,

    /// Fraction of one phase-width added per tick
    pub step_factor: f32,

    /// Ordered phase labels
    pub phases: Vec<String>,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            tick: DEFAULT_PROGRESS_TICK,
            ceiling: PROGRESS_CEILING,
            step_factor: PROGRESS_STEP_FACTOR,
            phases: PROGRESS_PHASES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl ProgressConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let tick = env::var("PROGRESS_TICK_MS")
            .ok()
            .and_then(|ms| ms.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.tick);

        Self { tick, ..defaults }
    }

    /// Width of one phase on the 0..100 scale
    pub fn phase_width(&self) -> f32 {
        100.0 / self.phases.len().max(1) as f32
    }

    /// Amount added on every tick
    pub fn step(&self) -> f32 {
        self.phase_width() * self.step_factor
    }
}
