//! Client configuration loaded from `config.ron`.
//!
//! Precedence is defaults, then the file, then command-line flags and the
//! environment (applied by the caller through [`ClientConfig::apply_overrides`]).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use log::LevelFilter;
use obtain_engine::ClientSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILENAME: &str = "config.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("unknown log level {0:?}")]
    InvalidLogLevel(String),
    #[error("poll_interval_ms must be greater than zero")]
    InvalidPollInterval,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub server_url: String,
    pub poll_interval_ms: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: Option<u64>,
    /// Where logs and preferences live; the platform data dir when unset.
    pub state_dir: Option<PathBuf>,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".to_string(),
            poll_interval_ms: obtain_core::POLL_INTERVAL.as_millis() as u64,
            connect_timeout_secs: 10,
            request_timeout_secs: None,
            state_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Loads `path`, or the platform config file when `path` is `None`.
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        let config = Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.level_filter()?;
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidPollInterval);
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, server_url: Option<String>) {
        if let Some(url) = server_url.filter(|url| !url.trim().is_empty()) {
            self.server_url = url;
        }
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        obtain_logging::parse_level(&self.log_level)
            .ok_or_else(|| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.server_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn state_dir(&self) -> PathBuf {
        if let Some(dir) = &self.state_dir {
            return dir.clone();
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "obtain")
}
