pub mod influxdb;

use crate::constants::{GRAPHITE_TYPE, INFLUXDB_TYPE};
use crate::errors::DatasourceError;
use crate::model::{EventOptions, EventRecord, Metric, QueryOptions, TimeSeries};
use async_trait::async_trait;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Backend families a datasource `type` tag can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasourceType {
    Graphite,
    InfluxDb,
}

impl DatasourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasourceType::Graphite => GRAPHITE_TYPE,
            DatasourceType::InfluxDb => INFLUXDB_TYPE,
        }
    }
}

impl FromStr for DatasourceType {
    type Err = DatasourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            GRAPHITE_TYPE => Ok(DatasourceType::Graphite),
            INFLUXDB_TYPE => Ok(DatasourceType::InfluxDb),
            _ => Err(DatasourceError::UnknownDatasourceType(s.to_string())),
        }
    }
}

impl Display for DatasourceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[async_trait]
pub trait TimeSeriesDatasource: Send + Sync {
    fn datasource_type(&self) -> DatasourceType;

    async fn query(&self, options: &QueryOptions) -> Result<Vec<TimeSeries>, DatasourceError>;

    async fn events(&self, options: &EventOptions) -> Result<Vec<EventRecord>, DatasourceError>;

    async fn metric_find_query(&self, query: &str) -> Result<Vec<Metric>, DatasourceError>;
}
