use crate::error::ConfigError;
use core_types::DegeneratePolicy;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Config {
    /// Checks the cross-field rules that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.source.kind {
            SourceKind::Warehouse if self.database.url.trim().is_empty() => {
                return Err(ConfigError::ValidationError(
                    "the warehouse source needs `database.url` (or DATABASE_URL)".to_string(),
                ));
            }
            SourceKind::File if self.source.file.is_none() => {
                return Err(ConfigError::ValidationError(
                    "the file source needs `source.file`".to_string(),
                ));
            }
            _ => {}
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "`database.max_connections` must be at least 1".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "`server.port` must not be 0".to_string(),
            ));
        }
        self.server.socket_addr()?;

        tracing_subscriber::EnvFilter::try_new(&self.logging.level).map_err(|e| {
            ConfigError::ValidationError(format!(
                "`logging.level` is not a valid filter ({}): {}",
                self.logging.level, e
            ))
        })?;

        Ok(())
    }
}

/// Labels and behaviour of the generated report.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// The city the source table covers (e.g., "Hamburg").
    pub city: String,
    /// Human-readable label of the reporting window (e.g., "February 2022").
    pub period_label: String,
    /// What to do with metrics that are undefined for the window.
    pub degenerate_policy: DegeneratePolicy,
}

/// Where the daily records come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The pre-aggregated table in the warehouse.
    Warehouse,
    /// A JSON export of that table.
    File,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub kind: SourceKind,
    /// Deployment environment; prefixes the database name (e.g., "STAGING").
    pub environment: String,
    /// Database name without the environment prefix (e.g., "TASTY_BYTES").
    pub database: String,
    pub schema: String,
    pub table: String,
    /// Path of the JSON file when `kind = "file"`.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port).parse().map_err(|_| {
            ConfigError::ValidationError(format!(
                "`server.host` / `server.port` do not form a socket address: {}:{}",
                self.host, self.port
            ))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive, used when `RUST_LOG` is not set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

// --- Default Implementations ---
// This allows a user to omit whole sections from their toml
// and still have it work with sensible defaults.

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            city: "Hamburg".to_string(),
            period_label: "February 2022".to_string(),
            degenerate_policy: DegeneratePolicy::Strict,
        }
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: SourceKind::Warehouse,
            environment: "STAGING".to_string(),
            database: "TASTY_BYTES".to_string(),
            schema: "HARMONIZED".to_string(),
            table: "WEATHER_HAMBURG".to_string(),
            file: None,
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 5,
            acquire_timeout_secs: 5,
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "weather-sales.log".to_string(),
        }
    }
}
