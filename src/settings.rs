//! Service settings
//!
//! Settings are read from an optional YAML file. Every field has a default,
//! so an absent file or an empty document yields a working configuration.

use crate::error::{Error, Result, ResultExt};
use crate::http::HttpClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Directory receiving exported workbooks
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Per-request timeout
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Listen port for `serve`
    #[serde(default = "default_port")]
    pub port: u16,

    /// User-Agent sent with API requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_port() -> u16 {
    8080
}

fn default_user_agent() -> String {
    format!("api-export/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            request_timeout_secs: default_request_timeout_secs(),
            port: default_port(),
            user_agent: default_user_agent(),
        }
    }
}

impl Settings {
    /// Parse settings from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            debug!("No settings file given, using defaults");
            return Ok(Self::default());
        };

        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file '{}'", path.display()))?;
        Self::from_yaml(&yaml)
    }

    /// Override the output directory
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Override the listen port
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Per-request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// HTTP client configuration derived from these settings
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig::builder()
            .timeout(self.request_timeout())
            .user_agent(&self.user_agent)
            .build()
    }

    fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(Error::invalid_value(
                "request_timeout_secs",
                "must be positive",
            ));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::invalid_value("output_dir", "must not be empty"));
        }
        Ok(())
    }
}
