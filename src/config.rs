//! Configuration management for the flight-delay explorer.
//!
//! Handles loading configuration from TOML files and environment variables,
//! with support for named databases and chart rendering settings.

use crate::error::{FlightError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable consulted when no database is configured.
pub const DATABASE_ENV_VAR: &str = "FLIGHTS_DB";

/// Database file used when nothing else is configured.
pub const DEFAULT_DATABASE_PATH: &str = "flights.sqlite3";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Chart rendering configuration.
    #[serde(default)]
    pub charts: ChartConfig,

    /// Named flight databases.
    #[serde(default)]
    pub databases: HashMap<String, DatabaseConfig>,
}

/// How charts are presented to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartRenderer {
    /// Full-screen terminal chart, dismissed with any key.
    #[default]
    Terminal,
    /// Chart drawn as plain text into the menu output.
    Text,
}

/// Chart rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub renderer: ChartRenderer,

    /// Maximum number of routes pivoted into the heat map.
    #[serde(default = "default_heatmap_sample")]
    pub heatmap_sample: usize,

    /// Maximum number of routes drawn on the route map.
    #[serde(default = "default_route_map_sample")]
    pub route_map_sample: usize,

    /// Width of text-rendered charts, in cells.
    #[serde(default = "default_text_width")]
    pub text_width: u16,

    /// Height of text-rendered charts, in cells.
    #[serde(default = "default_text_height")]
    pub text_height: u16,
}

fn default_heatmap_sample() -> usize {
    500
}

fn default_route_map_sample() -> usize {
    50
}

fn default_text_width() -> u16 {
    100
}

fn default_text_height() -> u16 {
    32
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            renderer: ChartRenderer::default(),
            heatmap_sample: default_heatmap_sample(),
            route_map_sample: default_route_map_sample(),
            text_width: default_text_width(),
            text_height: default_text_height(),
        }
    }
}

/// Flight database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    pub path: Option<PathBuf>,

    /// Size of the connection pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection before failing a query.
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,

    /// Seconds SQLite waits on a locked database.
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    1
}

fn default_acquire_timeout_secs() -> u64 {
    10
}

fn default_busy_timeout_secs() -> u64 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
            busy_timeout_secs: default_busy_timeout_secs(),
        }
    }
}

impl DatabaseConfig {
    /// Creates a database config for the given file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Creates a database config from a path or a `sqlite:` URI.
    ///
    /// Follows the SQLAlchemy convention: `sqlite:///flights.sqlite3` is a
    /// relative path, `sqlite:////data/flights.sqlite3` an absolute one.
    pub fn from_uri(uri: &str) -> Result<Self> {
        let uri = uri.trim();
        if uri.is_empty() {
            return Err(FlightError::config("Database location is empty"));
        }

        let path = match uri.split_once(':') {
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case("sqlite") => {
                let rest = rest.strip_prefix("///").or_else(|| rest.strip_prefix("//"));
                match rest {
                    Some(p) if !p.is_empty() => p,
                    _ => {
                        return Err(FlightError::config(format!(
                            "Invalid database URI '{uri}'. Expected sqlite:///path/to/file"
                        )))
                    }
                }
            }
            Some((scheme, _)) if scheme.len() > 1 && !scheme.contains(['/', '\\']) => {
                return Err(FlightError::config(format!(
                    "Invalid scheme '{scheme}'. Only sqlite databases are supported"
                )));
            }
            _ => uri,
        };

        Ok(Self::with_path(path))
    }

    /// Applies the `FLIGHTS_DB` environment variable when no path is set.
    pub fn apply_env_defaults(&mut self) {
        if self.path.is_none() {
            if let Ok(location) = std::env::var(DATABASE_ENV_VAR) {
                if let Ok(from_env) = Self::from_uri(&location) {
                    self.path = from_env.path;
                }
            }
        }
    }

    /// Returns the configured path, or the built-in default.
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH))
    }

    /// Merges another config into this one, with the other taking precedence.
    pub fn merge(&mut self, other: &DatabaseConfig) {
        if other.path.is_some() {
            self.path = other.path.clone();
        }
        if other.max_connections != default_max_connections() {
            self.max_connections = other.max_connections;
        }
        if other.acquire_timeout_secs != default_acquire_timeout_secs() {
            self.acquire_timeout_secs = other.acquire_timeout_secs;
        }
        if other.busy_timeout_secs != default_busy_timeout_secs() {
            self.busy_timeout_secs = other.busy_timeout_secs;
        }
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.busy_timeout_secs)
    }

    /// Returns a short description for log and UI purposes.
    pub fn display_string(&self) -> String {
        format!("sqlite:{}", self.resolved_path().display())
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("flight-delays")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| FlightError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            FlightError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Gets a named database, or the default database if name is None.
    pub fn get_database(&self, name: Option<&str>) -> Option<&DatabaseConfig> {
        let key = name.unwrap_or("default");
        self.databases.get(key)
    }
}
