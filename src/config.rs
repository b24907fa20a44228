//! Runtime configuration: environment variables plus an optional TOML file.
//!
//! Validation runs before any request leaves the process to catch missing
//! credentials early.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Stage delays in milliseconds, as written in the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Stagger spacing for the API document stage.
    pub api_document_delay_ms: u64,
    /// Stagger spacing for the handler stage.
    pub handler_delay_ms: u64,
    /// Stagger spacing for the component stage.
    pub component_delay_ms: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            api_document_delay_ms: 10_000,
            handler_delay_ms: 10_000,
            component_delay_ms: 1_000,
        }
    }
}

impl ScheduleConfig {
    /// Returns the API document stage delay as a duration.
    pub fn api_document_delay(&self) -> Duration {
        Duration::from_millis(self.api_document_delay_ms)
    }

    /// Returns the handler stage delay as a duration.
    pub fn handler_delay(&self) -> Duration {
        Duration::from_millis(self.handler_delay_ms)
    }

    /// Returns the component stage delay as a duration.
    pub fn component_delay(&self) -> Duration {
        Duration::from_millis(self.component_delay_ms)
    }
}

/// Full runtime configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// OpenAI API key. Env: `OPENAI_API_KEY`.
    #[serde(default)]
    pub openai_api_key: String,
    /// GitHub token, required only for issue/PR glue. Env: `GITHUB_TOKEN`.
    #[serde(default)]
    pub github_token: Option<String>,
    /// GitHub repository owner. Env: `GITHUB_OWNER`.
    #[serde(default)]
    pub github_owner: Option<String>,
    /// Directory new projects are scaffolded under.
    #[serde(default = "default_projects_dir")]
    pub projects_dir: PathBuf,
    /// Stage delays.
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

fn default_projects_dir() -> PathBuf {
    PathBuf::from("projects")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            github_token: None,
            github_owner: None,
            projects_dir: default_projects_dir(),
            schedule: ScheduleConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the environment only.
    pub fn from_env() -> Self {
        Self::default().apply_env()
    }

    /// Loads configuration from a TOML file, then lets the environment
    /// override credentials.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid config file {}: {e}", path.display())))?;
        Ok(config.apply_env())
    }

    fn apply_env(mut self) -> Self {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.openai_api_key = key;
        }
        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            self.github_token = Some(token);
        }
        if let Ok(owner) = std::env::var("GITHUB_OWNER") {
            self.github_owner = Some(owner);
        }
        self
    }

    /// Validates the configuration, failing on missing credentials.
    pub fn validate(&self) -> Result<()> {
        if self.openai_api_key.trim().is_empty() {
            return Err(Error::Config(
                "OPENAI_API_KEY is not set (environment or config file)".to_string(),
            ));
        }
        if self.schedule.api_document_delay_ms == 0 || self.schedule.handler_delay_ms == 0 {
            return Err(Error::Config(
                "stage delays must be greater than zero".to_string(),
            ));
        }
        if self.schedule.api_document_delay_ms < 1_000 || self.schedule.handler_delay_ms < 1_000 {
            tracing::warn!("sub-second stage delays are likely to hit provider rate limits");
        }
        Ok(())
    }
}
