use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// What happens to the exit status when a delivery request fails.
///
/// `LogOnly` keeps the original fire-and-forget behavior: failures are
/// visible in the log and nowhere else. `Strict` turns any failed request
/// into a nonzero exit for callers that gate on delivery.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryPolicy {
    #[default]
    LogOnly,
    Strict,
}

/// Log level for the stderr logger (RUST_LOG takes precedence)
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

/// Main beacon configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Ingest endpoint base URL, e.g. https://tenant.example.com
    pub endpoint: Option<String>,
    /// API token (BEACON_API_TOKEN and --token both override this)
    pub token: Option<String>,
    /// Source string attributed to every event payload
    pub source: String,
    /// Exit-status policy for failed deliveries
    pub delivery: DeliveryPolicy,
    /// Log level when RUST_LOG is unset
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            token: None,
            source: "beacon".to_string(),
            delivery: DeliveryPolicy::LogOnly,
            log_level: LogLevel::Info,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path)
                .context(format!("Failed to load config from {}", path.display()));
        }

        // Check BEACON_CONFIG env var
        if let Ok(env_path) = std::env::var("BEACON_CONFIG") {
            let path = PathBuf::from(env_path);
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from BEACON_CONFIG: {}", e);
                    }
                }
            }
        }

        // Try ~/.config/beacon/beacon.yaml
        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("beacon").join("beacon.yaml");
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        // Try ./beacon.yaml (for running straight out of a checkout)
        let local_config = PathBuf::from("beacon.yaml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load local config: {}", e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}
