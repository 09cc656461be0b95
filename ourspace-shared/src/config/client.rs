use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};
use thiserror::Error;
use url::Url;

/// Backend the client talks to when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable that overrides the default base URL.
pub const BASE_URL_ENV: &str = "OURSPACE_BASE_URL";

/// Client-side configuration for talking to an OurSpace backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the backend, e.g. `http://localhost:8000`.
    pub base_url: String,
}

/// Failure while loading or validating client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}")]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The config file was not valid JSON for this structure.
    #[error("failed to parse config file {path}")]
    Parse {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },

    /// The config file extension is not one we know how to parse.
    #[error("unsupported configuration format; use 'json'")]
    UnsupportedFormat,

    /// The base URL does not parse as a URL at all.
    #[error("invalid base URL {url:?}")]
    InvalidBaseUrl {
        /// The offending value.
        url: String,
        /// Underlying parse failure.
        #[source]
        source: url::ParseError,
    },

    /// The base URL parsed, but is not plain http(s). Catches values like
    /// `localhost:8000`, which parse with `localhost` as the scheme.
    #[error("base URL {url:?} must use http or https")]
    UnsupportedScheme {
        /// The offending value.
        url: String,
    },
}

impl ClientConfig {
    /// Generates a default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Loads the configuration from a file, environment variables, or defaults.
    ///
    /// Resolution order: defaults, then the config file if provided, then
    /// `OURSPACE_BASE_URL` for values the file left at their default, then
    /// the command-line override.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed, or
    /// when the resolved base URL is not a valid http(s) URL.
    pub fn load_config(
        config_path: Option<PathBuf>,
        base_url_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = ClientConfig::with_defaults();

        // Load from file if provided
        if let Some(path) = config_path {
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                return Err(ConfigError::UnsupportedFormat);
            }
            let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            let file_config: ClientConfig =
                serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                    path: path.clone(),
                    source,
                })?;
            config.base_url = file_config.base_url;
        }

        // Use environment variables only if values are not already set
        if config.base_url == DEFAULT_BASE_URL {
            if let Ok(base_url) = env::var(BASE_URL_ENV) {
                config.base_url = base_url;
            }
        }

        // Override with command-line arguments if provided
        if let Some(base_url) = base_url_override {
            config.base_url = base_url;
        }

        // Validate configuration
        config.origin()?;

        Ok(config)
    }

    /// The base URL parsed and checked, ready for joining endpoint paths.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the stored value is not a valid http(s)
    /// URL.
    pub fn origin(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::UnsupportedScheme {
                url: self.base_url.clone(),
            });
        }
        Ok(url)
    }
}
