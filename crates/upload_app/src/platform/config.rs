use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;
use upload_core::{ListQuery, SortField, SortOrder};
use upload_sync::ChannelSettings;

use super::logging::LogDestination;

const CONFIG_FILENAME: &str = "upload_monitor.ron";
const CONFIG_PATH_VAR: &str = "UPLOAD_MONITOR_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub connect_timeout_secs: u64,
    pub page_size: u32,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub log_destination: LogDestination,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let channel = ChannelSettings::default();
        let query = ListQuery::default();
        Self {
            endpoint: channel.endpoint,
            connect_timeout_secs: channel.connect_timeout.as_secs(),
            page_size: query.size,
            sort_by: query.sort_by,
            sort_order: query.sort_order,
            log_destination: LogDestination::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Reads the file named by `UPLOAD_MONITOR_CONFIG`, else `./upload_monitor.ron`.
    /// A missing default file means defaults; a missing explicit file is an error.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_PATH_VAR) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => {
                let path = PathBuf::from(CONFIG_FILENAME);
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid {
                field: "page_size",
                message: "must be at least 1".to_string(),
            });
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "connect_timeout_secs",
                message: "must be at least 1".to_string(),
            });
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level).map_err(|err| ConfigError::Invalid {
            field: "log_level",
            message: err.to_string(),
        })
    }

    pub fn channel_settings(&self) -> ChannelSettings {
        ChannelSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            ..ChannelSettings::default()
        }
    }

    pub fn initial_query(&self) -> ListQuery {
        ListQuery {
            page: 1,
            size: self.page_size,
            sort_by: self.sort_by,
            sort_order: self.sort_order,
        }
    }
}
