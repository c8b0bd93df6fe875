use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Which [`DataSource`](juahustle_db::DataSource) implementation backs the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSourceKind {
    /// Seeded in-process stub.
    Memory,
    /// REST backend at [`AppConfig::api_url`].
    Http,
}

impl FromStr for DataSourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "http" => Ok(Self::Http),
            other => Err(ConfigError::Invalid {
                key: ENV_DATA_SOURCE,
                value: other.to_string(),
                expected: "memory | http",
            }),
        }
    }
}

/// Latency mode of the in-memory data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyMode {
    /// Realistic per-operation delays.
    Simulated,
    /// Immediate responses.
    None,
}

impl FromStr for LatencyMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simulated" => Ok(Self::Simulated),
            "none" => Ok(Self::None),
            other => Err(ConfigError::Invalid {
                key: ENV_LATENCY,
                value: other.to_string(),
                expected: "simulated | none",
            }),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key}={value:?} is invalid (expected {expected})")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

pub const ENV_DATA_SOURCE: &str = "JUAHUSTLE_DATA_SOURCE";
pub const ENV_API_URL: &str = "JUAHUSTLE_API_URL";
pub const ENV_STORAGE_DIR: &str = "JUAHUSTLE_STORAGE_DIR";
pub const ENV_LATENCY: &str = "JUAHUSTLE_LATENCY";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "JUAHUSTLE_REQUEST_TIMEOUT_SECS";

/// Application configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development against the
/// in-memory data source.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_source: DataSourceKind,
    /// Base URL of the REST backend (only used with [`DataSourceKind::Http`]).
    pub api_url: String,
    /// Directory holding the persisted profile snapshot.
    pub storage_dir: PathBuf,
    pub latency: LatencyMode,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_source: DataSourceKind::Memory,
            api_url: "http://localhost:3000/api/v1".into(),
            storage_dir: PathBuf::from(".juahustle"),
            latency: LatencyMode::Simulated,
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                          | Default                        |
    /// |----------------------------------|--------------------------------|
    /// | `JUAHUSTLE_DATA_SOURCE`          | `memory`                       |
    /// | `JUAHUSTLE_API_URL`              | `http://localhost:3000/api/v1` |
    /// | `JUAHUSTLE_STORAGE_DIR`          | `.juahustle`                   |
    /// | `JUAHUSTLE_LATENCY`              | `simulated`                    |
    /// | `JUAHUSTLE_REQUEST_TIMEOUT_SECS` | `30`                           |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable
    /// source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_source = match lookup(ENV_DATA_SOURCE) {
            Some(v) => v.parse()?,
            None => defaults.data_source,
        };

        let api_url = lookup(ENV_API_URL).unwrap_or(defaults.api_url);

        let storage_dir = lookup(ENV_STORAGE_DIR)
            .map(PathBuf::from)
            .unwrap_or(defaults.storage_dir);

        let latency = match lookup(ENV_LATENCY) {
            Some(v) => v.parse()?,
            None => defaults.latency,
        };

        let request_timeout_secs = match lookup(ENV_REQUEST_TIMEOUT_SECS) {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                key: ENV_REQUEST_TIMEOUT_SECS,
                value: v.clone(),
                expected: "a positive integer",
            })?,
            None => defaults.request_timeout_secs,
        };

        Ok(Self {
            data_source,
            api_url,
            storage_dir,
            latency,
            request_timeout_secs,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
