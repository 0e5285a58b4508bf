//! Configuration loading and constants.
//!
//! Loads application configuration from a TOML file and defines constants for
//! response headers, logging, and default paths. `AppConfig` is the root
//! configuration struct containing all settings.

use const_format::formatcp;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

// =============================================================================
// HTTP Response Cache Control
// =============================================================================
// Location data changes on every write, so API and health responses must never
// be served from an intermediate cache. The server info page is static for the
// lifetime of the process.

/// Server info page - only changes on restart
pub const HTTP_CACHE_INFO_MAX_AGE: u32 = 60;

pub const CACHE_CONTROL_API: &str = "no-store";

pub const CACHE_CONTROL_INFO: &str = formatcp!("public, max-age={}", HTTP_CACHE_INFO_MAX_AGE);

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Crate name, used as the log target prefix
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default location data file for file-backed storage
pub const DEFAULT_DATA_FILE: &str = "locations.json";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = formatcp!("{}=debug,tower_http=debug", CRATE_NAME);

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Seconds to wait for in-flight requests on shutdown
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub http: HttpServerConfig,
    /// Where locations are kept
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "HttpServerConfig::default_shutdown_grace")]
    pub shutdown_grace_seconds: u64,
}

impl HttpServerConfig {
    fn default_shutdown_grace() -> u64 {
        DEFAULT_SHUTDOWN_GRACE_SECS
    }
}

/// Persistence backend for the location store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Rewrite a JSON file after every change
    #[default]
    File,
    /// Keep locations in process memory only
    Memory,
}

impl StorageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageMode::File => "file",
            StorageMode::Memory => "memory",
        }
    }
}

impl std::fmt::Display for StorageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub mode: StorageMode,
    /// Data file, only read in file mode
    #[serde(default = "StorageConfig::default_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            mode: StorageMode::default(),
            path: Self::default_path(),
        }
    }
}

impl StorageConfig {
    fn default_path() -> PathBuf {
        PathBuf::from(DEFAULT_DATA_FILE)
    }
}

/// Cross-origin settings
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Allow every origin, method and header
    #[serde(default = "CorsConfig::default_permissive")]
    pub permissive: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            permissive: Self::default_permissive(),
        }
    }
}

impl CorsConfig {
    fn default_permissive() -> bool {
        true
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        contents.parse()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.mode == StorageMode::File && self.storage.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "storage.path must be set when storage.mode = \"file\"".to_string(),
            ));
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(ConfigError::Validation(format!(
                "logging.format must be \"text\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }

        Ok(())
    }
}

impl FromStr for AppConfig {
    type Err = ConfigError;

    fn from_str(contents: &str) -> Result<Self, Self::Err> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: AppConfig = "[http]\nhost = \"127.0.0.1\"\nport = 3000\n"
            .parse()
            .unwrap();

        assert_eq!(config.http.port, 3000);
        assert_eq!(config.http.shutdown_grace_seconds, DEFAULT_SHUTDOWN_GRACE_SECS);
        assert_eq!(config.storage.mode, StorageMode::File);
        assert_eq!(config.storage.path, PathBuf::from(DEFAULT_DATA_FILE));
        assert!(config.cors.permissive);
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_memory_mode_and_json_logging() {
        let config: AppConfig = r#"
            [http]
            host = "0.0.0.0"
            port = 8080

            [storage]
            mode = "memory"

            [cors]
            permissive = false

            [logging]
            format = "json"
        "#
        .parse()
        .unwrap();

        assert_eq!(config.storage.mode, StorageMode::Memory);
        assert!(!config.cors.permissive);
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_file_mode_requires_path() {
        let result: Result<AppConfig, _> = r#"
            [http]
            host = "0.0.0.0"
            port = 3000

            [storage]
            mode = "file"
            path = ""
        "#
        .parse();

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let result: Result<AppConfig, _> = r#"
            [http]
            host = "0.0.0.0"
            port = 3000

            [logging]
            format = "xml"
        "#
        .parse();

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_unknown_storage_mode_is_parse_error() {
        let result: Result<AppConfig, _> = r#"
            [http]
            host = "0.0.0.0"
            port = 3000

            [storage]
            mode = "redis"
        "#
        .parse();

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = AppConfig::load("/nonexistent/waypost.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_default_log_filter_targets_crate() {
        assert!(DEFAULT_LOG_FILTER.starts_with("waypost="));
    }
}
