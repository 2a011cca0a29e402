use chrono::FixedOffset;
use datemath::errors::DateMathError;
use datemath::parse_utc_offset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    IoError(#[from] std::io::Error),
    YamlError(#[from] serde_yaml::Error),
    InvalidTimezoneOffset(#[source] DateMathError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(err) => {
                write!(f, "Could not read dashboard config: {}", err)
            }
            ConfigError::YamlError(err) => {
                write!(f, "Invalid dashboard config: {}", err)
            }
            ConfigError::InvalidTimezoneOffset(err) => {
                write!(f, "Invalid timezoneOffset: {}", err)
            }
        }
    }
}

/// Connection settings for one named datasource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasourceConfig {
    pub url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Kept raw, the registry interprets it when an adapter is selected.
    #[serde(rename = "type")]
    pub datasource_type: String,
    #[serde(default)]
    pub default: bool,
}

impl DatasourceConfig {
    pub fn new(datasource_type: &str, url: &str) -> DatasourceConfig {
        DatasourceConfig {
            url: url.to_string(),
            username: None,
            password: None,
            datasource_type: datasource_type.to_string(),
            default: false,
        }
    }

    pub fn with_credentials(mut self, username: &str, password: &str) -> DatasourceConfig {
        self.username = Some(username.to_string());
        self.password = Some(password.to_string());
        self
    }

    pub fn as_default(mut self) -> DatasourceConfig {
        self.default = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    pub datasources: BTreeMap<String, DatasourceConfig>,
    #[serde(default)]
    pub timezone_offset: Option<String>,
}

impl DashboardConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<DashboardConfig, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<DashboardConfig, ConfigError> {
        let yaml = fs::read_to_string(path)?;
        DashboardConfig::from_yaml_str(&yaml)
    }

    pub fn with_datasource(mut self, name: &str, datasource: DatasourceConfig) -> DashboardConfig {
        self.datasources.insert(name.to_string(), datasource);
        self
    }

    pub fn with_timezone_offset(mut self, offset: &str) -> DashboardConfig {
        self.timezone_offset = Some(offset.to_string());
        self
    }

    pub fn utc_offset(&self) -> Result<Option<FixedOffset>, ConfigError> {
        match &self.timezone_offset {
            Some(offset) => parse_utc_offset(offset)
                .map(Some)
                .map_err(ConfigError::InvalidTimezoneOffset),
            None => Ok(None),
        }
    }

    /// The first entry marked `default: true`, in name order.
    pub fn default_datasource(&self) -> Option<(&str, &DatasourceConfig)> {
        self.datasources
            .iter()
            .find(|(_, datasource)| datasource.default)
            .map(|(name, datasource)| (name.as_str(), datasource))
    }
}
