//! Configuration management for the Fashion Advisor client
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with FASHION_ prefix

use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::Coordinates;

pub const DEFAULT_BASE_URL: &str = "https://fashion-muzm.onrender.com";
pub const DEFAULT_IP_LOCATION_ENDPOINT: &str = "https://ipapi.co/json/";

/// Main client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Analysis service configuration
    pub service: ServiceConfig,

    /// Location lookup configuration
    pub location: LocationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    /// Base URL of the analysis service, without trailing path
    pub base_url: String,

    /// Timeout for `POST /upload` in seconds
    pub upload_timeout_secs: u64,

    /// Timeout for the liveness probe and auxiliary GETs in seconds
    pub probe_timeout_secs: u64,
}

/// Where the client gets the user's position from
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    #[default]
    None,
    Fixed,
    Ip,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LocationConfig {
    pub provider: LocationSource,

    /// Used by the `fixed` provider
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    /// Used by the `ip` provider
    pub endpoint: String,

    /// Upper bound on a location lookup in seconds
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("FASHION_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("service.base_url", DEFAULT_BASE_URL)?
            .set_default("service.upload_timeout_secs", 60)?
            .set_default("service.probe_timeout_secs", 30)?
            .set_default("location.provider", "none")?
            .set_default("location.endpoint", DEFAULT_IP_LOCATION_ENDPOINT)?
            .set_default("location.timeout_secs", 10)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FASHION_ prefix)
            .add_source(
                Environment::with_prefix("FASHION")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate().map_err(ConfigError::Message)?;
        Ok(config)
    }

    /// Reject settings the client cannot run with
    pub fn validate(&self) -> Result<(), String> {
        let url = self.service.base_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(format!("service.base_url must be an http(s) URL, got {url:?}"));
        }
        if self.service.upload_timeout_secs == 0 || self.service.probe_timeout_secs == 0 {
            return Err("service timeouts must be at least one second".into());
        }
        if self.location.timeout_secs == 0 {
            return Err("location.timeout_secs must be at least one second".into());
        }
        if self.location.provider == LocationSource::Fixed && self.location.fixed().is_none() {
            return Err("location.provider = fixed needs both latitude and longitude".into());
        }
        Ok(())
    }
}

impl ServiceConfig {
    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

impl LocationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Configured fixed position, only when both halves are set
    pub fn fixed(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            service: ServiceConfig::default(),
            location: LocationConfig::default(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            upload_timeout_secs: 60,
            probe_timeout_secs: 30,
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            provider: LocationSource::None,
            latitude: None,
            longitude: None,
            endpoint: DEFAULT_IP_LOCATION_ENDPOINT.to_string(),
            timeout_secs: 10,
        }
    }
}
