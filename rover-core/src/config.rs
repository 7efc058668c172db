//! Configuration management for the photo picker

use crate::{
    fetcher::FetcherConfig,
    query::CAMERAS,
    rover::Rover,
    selector::SelectionSettings,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Picker configuration, read from `MARS_*` environment variables
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PickerConfig {
    /// API key sent with every request; an empty key is left for the service to judge
    #[serde(default)]
    pub api_key: String,

    /// Root of the photos API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Days behind today that Curiosity is queried at
    #[serde(default = "default_curiosity_lag_days")]
    pub curiosity_lag_days: u32,

    /// Sol queries attempted after an empty earth-date result
    #[serde(default = "default_sol_retries")]
    pub sol_retries: u32,

    /// Pin the rover instead of drawing one
    #[serde(default)]
    pub rover: Option<String>,

    /// Restrict queries to one camera
    #[serde(default)]
    pub camera: Option<String>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
            curiosity_lag_days: default_curiosity_lag_days(),
            sol_retries: default_sol_retries(),
            rover: None,
            camera: None,
        }
    }
}

impl PickerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Self = envy::prefixed("MARS_")
            .from_iter(vars)
            .map_err(|e| Error::Config(format!("Failed to parse environment variables: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_base_url)
            .map_err(|e| Error::Config(format!("Invalid api_base_url: {}", e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "api_base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be > 0".to_string()));
        }

        if self.sol_retries == 0 || self.sol_retries > MAX_SOL_RETRIES {
            return Err(Error::Config(format!(
                "sol_retries must be between 1 and {}",
                MAX_SOL_RETRIES
            )));
        }

        if self.curiosity_lag_days > MAX_CURIOSITY_LAG_DAYS {
            return Err(Error::Config(format!(
                "curiosity_lag_days must be at most {}",
                MAX_CURIOSITY_LAG_DAYS
            )));
        }

        self.pinned_rover()?;

        if let Some(camera) = &self.camera {
            if !CAMERAS.iter().any(|c| c.eq_ignore_ascii_case(camera.trim())) {
                return Err(Error::Config(format!(
                    "Unknown camera '{}'. Expected one of: {}",
                    camera,
                    CAMERAS.join(", ")
                )));
            }
        }

        Ok(())
    }

    /// Rover forced by configuration, if any
    pub fn pinned_rover(&self) -> Result<Option<Rover>> {
        self.rover.as_deref().map(str::parse).transpose()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn fetcher_config(&self) -> Result<FetcherConfig> {
        let base_url = Url::parse(&self.api_base_url)
            .map_err(|e| Error::Config(format!("Invalid api_base_url: {}", e)))?;
        Ok(FetcherConfig::new(base_url, self.api_key.clone()).with_timeout(self.timeout()))
    }

    pub fn selection_settings(&self) -> SelectionSettings {
        SelectionSettings {
            curiosity_lag_days: self.curiosity_lag_days,
            sol_retries: self.sol_retries,
            camera: self.camera.as_ref().map(|c| c.trim().to_string()),
        }
    }
}

const MAX_SOL_RETRIES: u32 = 10;

const MAX_CURIOSITY_LAG_DAYS: u32 = 365;

// Default value functions
fn default_api_base_url() -> String {
    crate::DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_curiosity_lag_days() -> u32 {
    crate::DEFAULT_CURIOSITY_LAG_DAYS
}

fn default_sol_retries() -> u32 {
    crate::DEFAULT_SOL_RETRIES
}
