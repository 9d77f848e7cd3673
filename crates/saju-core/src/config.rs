//! Environment-driven configuration for the text generation client.

use std::{env, time::Duration};

use log::debug;

use crate::{
    error::{CoachError, Result},
    llm::{DEFAULT_API_BASE, DEFAULT_MODEL, DEFAULT_TIMEOUT},
};

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_MODEL: &str = "GEMINI_MODEL";
pub const ENV_API_BASE: &str = "GEMINI_API_BASE";
pub const ENV_TIMEOUT_SECS: &str = "SAJU_REQUEST_TIMEOUT_SECS";

/// Settings for talking to the text generation endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl CoachConfig {
    /// Reads the configuration from the process environment, loading a
    /// `.env` file from the working directory first when one exists.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Configuration` if the timeout is not a positive
    /// whole number of seconds.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let timeout = match non_empty(ENV_TIMEOUT_SECS) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    CoachError::configuration(format!(
                        "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{raw}'"
                    ))
                })?;
                if secs == 0 {
                    return Err(CoachError::configuration(format!(
                        "{ENV_TIMEOUT_SECS} must be greater than zero"
                    )));
                }
                Duration::from_secs(secs)
            }
            None => defaults.timeout,
        };

        Ok(Self {
            api_key: non_empty(ENV_API_KEY),
            model: non_empty(ENV_MODEL).unwrap_or(defaults.model),
            api_base: non_empty(ENV_API_BASE).unwrap_or(defaults.api_base),
            timeout,
        })
    }
}
