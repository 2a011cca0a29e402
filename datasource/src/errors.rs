use crate::config::ConfigError;
use crate::filter::FilterInterpolationError;
use datemath::errors::DateMathError;
use reqwest::StatusCode;
use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    RequestError(#[from] reqwest::Error),
    BadStatusCode(StatusCode),
    ResultsParseError(#[from] serde_json::Error),
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::RequestError(err) => {
                write!(f, "Error during request: {}", err)
            }
            TransportError::BadStatusCode(status) => {
                write!(f, "Backend replied with status: {}", status)
            }
            TransportError::ResultsParseError(err) => {
                write!(f, "Could not parse backend reply: {}", err)
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum DatasourceError {
    #[error("Only {expected} format is supported under influxdb, got {requested}")]
    UnsupportedFormat { requested: String, expected: String },
    #[error("No compatible datasource for type {0}")]
    UnknownDatasourceType(String),
    #[error("No datasource named {0} is configured")]
    UnknownDatasource(String),
    #[error("No adapter factory registered for datasource type {0}")]
    MissingAdapterFactory(String),
    #[error("No datasource is marked as default")]
    NoDefaultDatasource,
    #[error(transparent)]
    FilterInterpolation(#[from] FilterInterpolationError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    TimeTranslation(#[from] DateMathError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Series {0} has no time column")]
    MissingTimeColumn(String),
    #[error("Series {series} has a non-numeric timestamp in row {row}")]
    InvalidTimestamp { series: String, row: usize },
}
