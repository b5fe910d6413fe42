use crate::core::types::{Bool, ViewMode};
use crate::errors::Error;
use serde::{Deserialize, Serialize};

pub trait ConfigItem<T> {
    fn get_value(&self) -> &T;
    fn set_value(&mut self, new_value: &str) -> Result<(), Error>;
    fn description(&self) -> &str;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiBaseUrlConfigItem {
    pub value: String,
    pub description: String,
}

impl Default for ApiBaseUrlConfigItem {
    fn default() -> Self {
        Self {
            value: "http://localhost:8090".into(),
            description: "Base URL of the scheduling data service.".into(),
        }
    }
}

impl ConfigItem<String> for ApiBaseUrlConfigItem {
    fn get_value(&self) -> &String {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        let trimmed = new_value.trim();
        if trimmed.is_empty() {
            return Err(Error::Parse("API base URL must not be empty.".into()));
        }
        self.value = trimmed.to_string();
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushUrlConfigItem {
    pub value: String,
    pub description: String,
}

impl Default for PushUrlConfigItem {
    fn default() -> Self {
        Self {
            value: "ws://localhost:8090/ws".into(),
            description: "URL of the push notification channel.".into(),
        }
    }
}

impl ConfigItem<String> for PushUrlConfigItem {
    fn get_value(&self) -> &String {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        let trimmed = new_value.trim();
        if trimmed.is_empty() {
            return Err(Error::Parse("Push channel URL must not be empty.".into()));
        }
        self.value = trimmed.to_string();
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultViewConfigItem {
    pub value: ViewMode,
    pub description: String,
}

impl Default for DefaultViewConfigItem {
    fn default() -> Self {
        Self {
            value: ViewMode::Month,
            description: "Calendar view shown at startup.".into(),
        }
    }
}

impl ConfigItem<ViewMode> for DefaultViewConfigItem {
    fn get_value(&self) -> &ViewMode {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        Ok(self.value = ViewMode::try_from(new_value)?)
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxEventsPerCellConfigItem {
    pub value: usize,
    pub description: String,
}

impl Default for MaxEventsPerCellConfigItem {
    fn default() -> Self {
        Self {
            value: 3,
            description: "Events shown in a month cell before '+X more'.".into(),
        }
    }
}

impl ConfigItem<usize> for MaxEventsPerCellConfigItem {
    fn get_value(&self) -> &usize {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        let parsed: usize = new_value
            .trim()
            .parse()
            .map_err(|_| Error::Parse(format!("Invalid cell limit: '{new_value}'.")))?;
        if parsed == 0 {
            return Err(Error::Parse("Cell limit must be at least 1.".into()));
        }
        self.value = parsed;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyRefreshConfigItem {
    pub value: u64,
    pub description: String,
}

impl Default for OccupancyRefreshConfigItem {
    fn default() -> Self {
        Self {
            value: 60,
            description: "Seconds between bay occupancy refreshes.".into(),
        }
    }
}

impl ConfigItem<u64> for OccupancyRefreshConfigItem {
    fn get_value(&self) -> &u64 {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        let parsed: u64 = new_value
            .trim()
            .parse()
            .map_err(|_| Error::Parse(format!("Invalid refresh interval: '{new_value}'.")))?;
        if parsed == 0 {
            return Err(Error::Parse("Refresh interval must be at least 1s.".into()));
        }
        self.value = parsed;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconnectBackoffConfigItem {
    pub value: u64,
    pub description: String,
}

impl Default for ReconnectBackoffConfigItem {
    fn default() -> Self {
        Self {
            value: 3,
            description: "Seconds to wait before reconnecting the push channel.".into(),
        }
    }
}

impl ConfigItem<u64> for ReconnectBackoffConfigItem {
    fn get_value(&self) -> &u64 {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        let parsed: u64 = new_value
            .trim()
            .parse()
            .map_err(|_| Error::Parse(format!("Invalid backoff: '{new_value}'.")))?;
        if parsed == 0 {
            return Err(Error::Parse("Backoff must be at least 1s.".into()));
        }
        self.value = parsed;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileLoggingConfigItem {
    pub value: Bool,
    pub description: String,
}

impl Default for FileLoggingConfigItem {
    fn default() -> Self {
        Self {
            value: Bool(true),
            description: "Enable writing log messages to file.".into(),
        }
    }
}

impl ConfigItem<Bool> for FileLoggingConfigItem {
    fn get_value(&self) -> &Bool {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        Ok(self.value = Bool::try_from_str(new_value)?)
    }
    fn description(&self) -> &str {
        &self.description
    }
}
