//! Configuration module

use std::env;
use std::time::Duration;

use sentinel_core::{OracleConfig, ProgressConfig};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// How long finished assessment jobs stay queryable
    pub job_retention_secs: u64,

    /// Reasoning oracle connection
    pub oracle: OracleConfig,

    /// Progress heuristic for background jobs
    pub progress: ProgressConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),

            job_retention_secs: env::var("JOB_RETENTION_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(900),

            oracle: OracleConfig::from_env(),

            progress: ProgressConfig::from_env(),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn job_retention(&self) -> Duration {
        Duration::from_secs(self.job_retention_secs)
    }
}
