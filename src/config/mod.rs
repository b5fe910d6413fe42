pub mod models;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

use crate::config::models::{
    ApiBaseUrlConfigItem, ConfigItem, DefaultViewConfigItem, FileLoggingConfigItem,
    MaxEventsPerCellConfigItem, OccupancyRefreshConfigItem, PushUrlConfigItem,
    ReconnectBackoffConfigItem,
};
use crate::core::types::ViewMode;
use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIterDerive, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigKey {
    ApiBaseUrl,
    PushUrl,
    DefaultView,
    MaxEventsPerCell,
    OccupancyRefreshSecs,
    ReconnectBackoffSecs,
    FileLoggingEnabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub api_base_url: ApiBaseUrlConfigItem,
    #[serde(default)]
    pub push_url: PushUrlConfigItem,
    #[serde(default)]
    pub default_view: DefaultViewConfigItem,
    #[serde(default)]
    pub max_events_per_cell: MaxEventsPerCellConfigItem,
    #[serde(default)]
    pub occupancy_refresh_secs: OccupancyRefreshConfigItem,
    #[serde(default)]
    pub reconnect_backoff_secs: ReconnectBackoffConfigItem,
    #[serde(default)]
    pub file_logging_enabled: FileLoggingConfigItem,
}

#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    data: ConfigFile,
}

impl Config {
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(Error::config(format!(
                "Configuration file '{}' not found.",
                path.display()
            )));
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| Error::config(format!("Failed to read {}: {}", path.display(), e)))?;
        let data: ConfigFile = serde_json::from_str(&text)
            .map_err(|e| Error::config(format!("Invalid JSON in '{}': {}", path.display(), e)))?;
        Ok(Self { path, data })
    }

    pub fn api_base_url(&self) -> &str {
        self.data.api_base_url.get_value()
    }
    pub fn push_url(&self) -> &str {
        self.data.push_url.get_value()
    }
    pub fn default_view(&self) -> ViewMode {
        *self.data.default_view.get_value()
    }
    pub fn max_events_per_cell(&self) -> usize {
        *self.data.max_events_per_cell.get_value()
    }
    pub fn occupancy_refresh_secs(&self) -> u64 {
        *self.data.occupancy_refresh_secs.get_value()
    }
    pub fn reconnect_backoff_secs(&self) -> u64 {
        *self.data.reconnect_backoff_secs.get_value()
    }
    pub fn file_logging_enabled(&self) -> bool {
        self.data.file_logging_enabled.get_value().0
    }

    /// (key, description, value) rows for the settings table.
    pub fn rows(&self) -> Vec<(String, String, String)> {
        ConfigKey::iter()
            .map(|key| {
                let (desc, value) = match key {
                    ConfigKey::ApiBaseUrl => (
                        self.data.api_base_url.description().to_string(),
                        self.data.api_base_url.get_value().clone(),
                    ),
                    ConfigKey::PushUrl => (
                        self.data.push_url.description().to_string(),
                        self.data.push_url.get_value().clone(),
                    ),
                    ConfigKey::DefaultView => (
                        self.data.default_view.description().to_string(),
                        self.data.default_view.get_value().to_string(),
                    ),
                    ConfigKey::MaxEventsPerCell => (
                        self.data.max_events_per_cell.description().to_string(),
                        self.data.max_events_per_cell.get_value().to_string(),
                    ),
                    ConfigKey::OccupancyRefreshSecs => (
                        self.data.occupancy_refresh_secs.description().to_string(),
                        self.data.occupancy_refresh_secs.get_value().to_string(),
                    ),
                    ConfigKey::ReconnectBackoffSecs => (
                        self.data.reconnect_backoff_secs.description().to_string(),
                        self.data.reconnect_backoff_secs.get_value().to_string(),
                    ),
                    ConfigKey::FileLoggingEnabled => (
                        self.data.file_logging_enabled.description().to_string(),
                        self.data.file_logging_enabled.get_value().to_string(),
                    ),
                };
                (key.to_string(), desc, value)
            })
            .collect()
    }

    pub fn set(&mut self, key_str: &str, new_value: &str) -> Result<()> {
        use std::str::FromStr;
        let key = ConfigKey::from_str(key_str).map_err(|_| {
            Error::Parse(format!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key_str,
                valid_csv::<ConfigKey>()
            ))
        })?;
        self.set_key(key, new_value)
    }

    pub fn set_key(&mut self, key: ConfigKey, new_value: &str) -> Result<()> {
        self.edit(|cfg| match key {
            ConfigKey::ApiBaseUrl => cfg.api_base_url.set_value(new_value),
            ConfigKey::PushUrl => cfg.push_url.set_value(new_value),
            ConfigKey::DefaultView => cfg.default_view.set_value(new_value),
            ConfigKey::MaxEventsPerCell => cfg.max_events_per_cell.set_value(new_value),
            ConfigKey::OccupancyRefreshSecs => cfg.occupancy_refresh_secs.set_value(new_value),
            ConfigKey::ReconnectBackoffSecs => cfg.reconnect_backoff_secs.set_value(new_value),
            ConfigKey::FileLoggingEnabled => cfg.file_logging_enabled.set_value(new_value),
        })
    }

    fn edit<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ConfigFile) -> std::result::Result<(), Error>,
    {
        f(&mut self.data)?;
        self.save()
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| Error::config(format!("Failed to encode config: {}", e)))?;
        fs::write(&self.path, json)
            .map_err(|e| Error::config(format!("Failed to write {}: {}", self.path.display(), e)))
    }
}
