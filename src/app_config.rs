use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Application configuration module
/// This module handles loading, validating and saving the settings that the
/// ingest actions need: where the NetPlus API lives, how to authenticate,
/// how big upload chunks are and how many parse errors to surface.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// NetPlus API connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Media upload settings
    #[serde(default)]
    pub upload: UploadConfig,

    /// Subtitle ingest settings
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// NetPlus API connection settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    // @field: Base URL of the backend, without the `/api` prefix
    #[serde(default = "default_api_endpoint")]
    pub endpoint: String,

    // @field: Admin bearer token
    #[serde(default = "String::new")]
    pub auth_token: String,

    // @field: Timeout seconds per HTTP request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_api_endpoint(),
            auth_token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Media upload settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UploadConfig {
    /// Size of each byte range sent to storage
    #[serde(default = "default_chunk_size_bytes")]
    pub chunk_size_bytes: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            chunk_size_bytes: default_chunk_size_bytes(),
        }
    }
}

/// Subtitle ingest settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IngestConfig {
    /// How many parse errors are shown to the operator when a paste is rejected
    #[serde(default = "default_max_reported_errors")]
    pub max_reported_errors: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_reported_errors: default_max_reported_errors(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching `log` crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

/// 20 MiB
pub const DEFAULT_CHUNK_SIZE_BYTES: u64 = 20 * 1024 * 1024;

fn default_api_endpoint() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_chunk_size_bytes() -> u64 {
    DEFAULT_CHUNK_SIZE_BYTES
}

fn default_max_reported_errors() -> usize {
    5
}

impl Config {
    /// Load the configuration file, or write a default one when it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let endpoint = self.api.endpoint.trim();
        if endpoint.is_empty() {
            return Err(anyhow!("API endpoint is required"));
        }
        url::Url::parse(endpoint)
            .map_err(|e| anyhow!("Invalid API endpoint '{}': {}", endpoint, e))?;

        if self.api.timeout_secs == 0 {
            return Err(anyhow!("API timeout must be at least one second"));
        }

        if self.upload.chunk_size_bytes == 0 {
            return Err(anyhow!("Upload chunk size must be greater than zero"));
        }

        if self.ingest.max_reported_errors == 0 {
            return Err(anyhow!("max_reported_errors must be at least 1"));
        }

        Ok(())
    }

    /// Validate and additionally require an admin token, for actions that hit the API
    pub fn validate_for_api(&self) -> Result<()> {
        self.validate()?;
        if self.api.auth_token.trim().is_empty() {
            return Err(anyhow!("Admin auth token is required for ingest API calls"));
        }
        Ok(())
    }
}
