//! Tally configuration
//!
//! ## Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override at `<data dir>/tally/config.toml`
//!    (e.g. ~/.local/share/tally/config.toml)
//! 2. Embedded defaults (compiled into the binary)
//!
//! A missing override file is not an error; an unreadable or malformed one is.
//! Keys absent from the override keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/tally.toml");

const APP_DIR: &str = "tally";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding the ledger database
    pub data_dir: PathBuf,
    /// Database file name inside `data_dir`
    pub database: String,
    /// Default number of months for trend reports
    pub trend_months: usize,
    pub currency_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            database: "tally.db".to_string(),
            trend_months: 6,
            currency_symbol: "$".to_string(),
        }
    }
}

impl Config {
    /// Load from `path` if given, else from the default override location,
    /// falling back to the embedded defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let override_path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path(),
        };

        let content = match override_path {
            Some(p) if p.exists() => {
                debug!("Loading config from {}", p.display());
                fs::read_to_string(&p).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", p.display(), e))
                })?
            }
            _ => DEFAULT_CONFIG.to_string(),
        };

        parse_config(&content)
    }

    /// Full path of the ledger database file
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database)
    }

    /// Replace the data directory (e.g. from a command-line flag)
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
}

/// Platform data directory for Tally, or `./tally` when there is none
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(APP_DIR))
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    storage: Option<RawStorage>,
    reports: Option<RawReports>,
}

#[derive(Debug, Deserialize)]
struct RawStorage {
    data_dir: Option<String>,
    database: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawReports {
    trend_months: Option<usize>,
    currency_symbol: Option<String>,
}

/// Parse config from TOML content over the built-in defaults
fn parse_config(content: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = Config::default();

    if let Some(storage) = raw.storage {
        if let Some(dir) = storage.data_dir.filter(|d| !d.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(database) = storage.database.filter(|d| !d.trim().is_empty()) {
            config.database = database;
        }
    }

    if let Some(reports) = raw.reports {
        if let Some(months) = reports.trend_months {
            if months == 0 {
                return Err(Error::Config("trend_months must be at least 1".to_string()));
            }
            config.trend_months = months;
        }
        if let Some(symbol) = reports.currency_symbol {
            config.currency_symbol = symbol;
        }
    }

    Ok(config)
}
