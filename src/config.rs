use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

use crate::calendar::store::default_data_file;
use crate::theme::{Theme, ThemeConfig};

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine a {0} directory; set it in the config file")]
    NoDefaultDir(&'static str),
}

#[derive(Parser, Debug, Default)]
#[command(name = "minical", version, about = "Month calendar for the terminal")]
pub struct Cli {
    /// Config file (default: <config_dir>/minical/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON file holding the events
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// trace | debug | info | warn | error
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub data_file: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
    pub theme: ThemeConfig,
}

impl Config {
    /// Load from an explicit path, or the default location if there is one.
    ///
    /// A missing default file yields the defaults; an explicit path must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Effective settings after merging command line over config file over defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_file: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
    pub theme: Theme,
}

impl Settings {
    pub fn resolve(cli: Cli, config: Config) -> Result<Self, ConfigError> {
        let data_file = cli
            .data_file
            .or(config.data_file)
            .or_else(default_data_file)
            .ok_or(ConfigError::NoDefaultDir("data"))?;
        let log_dir = config
            .log_dir
            .or_else(default_log_dir)
            .ok_or(ConfigError::NoDefaultDir("log"))?;
        let log_level = cli
            .log_level
            .or(config.log_level)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            data_file,
            log_level,
            log_dir,
            theme: config.theme.into_theme(),
        })
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("minical").join("config.toml"))
}

fn default_log_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("minical").join("logs"))
}
