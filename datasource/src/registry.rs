use crate::clock::{Clock, SystemClock};
use crate::config::{DashboardConfig, DatasourceConfig};
use crate::constants::DEFAULT_SUFFIX;
use crate::errors::DatasourceError;
use crate::filter::{FilterInterpolator, NoFilters};
use crate::request_executor::RequestExecutor;
use crate::time_range::TimeRangeResolver;
use crate::timeseries_datasource::influxdb::InfluxDatasource;
use crate::timeseries_datasource::{DatasourceType, TimeSeriesDatasource};
use log::{debug, info};
use serde::Serialize;
use std::sync::Arc;

/// Builds adapters for a backend family implemented outside this crate.
pub trait AdapterFactory: Send + Sync {
    fn create(
        &self,
        name: &str,
        config: &DatasourceConfig,
    ) -> Result<Arc<dyn TimeSeriesDatasource>, DatasourceError>;
}

/// Entry of the datasource picker. `value` is `None` for the default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasourceOption {
    pub name: String,
    pub value: Option<String>,
}

pub struct DatasourceRegistryBuilder {
    config: DashboardConfig,
    executor: Arc<dyn RequestExecutor>,
    filter: Arc<dyn FilterInterpolator>,
    clock: Arc<dyn Clock>,
    graphite: Option<Arc<dyn AdapterFactory>>,
}

impl DatasourceRegistryBuilder {
    pub fn filter(mut self, filter: Arc<dyn FilterInterpolator>) -> DatasourceRegistryBuilder {
        self.filter = filter;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> DatasourceRegistryBuilder {
        self.clock = clock;
        self
    }

    pub fn graphite_factory(mut self, factory: Arc<dyn AdapterFactory>) -> DatasourceRegistryBuilder {
        self.graphite = Some(factory);
        self
    }

    /// Fails when the timezone offset is invalid, when no datasource is marked
    /// as default, or when the default's type has no adapter.
    pub fn build(self) -> Result<DatasourceRegistry, DatasourceError> {
        let time_range = TimeRangeResolver::new(self.clock, self.config.utc_offset()?);
        let mut registry = DatasourceRegistry {
            executor: self.executor,
            filter: self.filter,
            graphite: self.graphite,
            time_range,
            default: None,
            config: self.config,
        };
        let (name, datasource) = registry
            .config
            .default_datasource()
            .ok_or(DatasourceError::NoDefaultDatasource)?;
        let default = registry.create_adapter(name, datasource)?;
        info!("Using {} ({}) as default datasource", name, default.datasource_type());
        registry.default = Some(default);
        Ok(registry)
    }
}

/// Selects datasource adapters by name from an immutable dashboard config.
pub struct DatasourceRegistry {
    config: DashboardConfig,
    executor: Arc<dyn RequestExecutor>,
    filter: Arc<dyn FilterInterpolator>,
    graphite: Option<Arc<dyn AdapterFactory>>,
    time_range: TimeRangeResolver,
    default: Option<Arc<dyn TimeSeriesDatasource>>,
}

impl DatasourceRegistry {
    pub fn builder(
        config: DashboardConfig,
        executor: Arc<dyn RequestExecutor>,
    ) -> DatasourceRegistryBuilder {
        DatasourceRegistryBuilder {
            config,
            executor,
            filter: Arc::new(NoFilters),
            clock: Arc::new(SystemClock),
            graphite: None,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// The shared default adapter for `None` or an empty name, otherwise a
    /// freshly constructed adapter for the named datasource.
    pub fn get(&self, name: Option<&str>) -> Result<Arc<dyn TimeSeriesDatasource>, DatasourceError> {
        match name {
            None | Some("") => self.default.clone().ok_or(DatasourceError::NoDefaultDatasource),
            Some(name) => {
                let datasource = self
                    .config
                    .datasources
                    .get(name)
                    .ok_or_else(|| DatasourceError::UnknownDatasource(name.to_string()))?;
                self.create_adapter(name, datasource)
            }
        }
    }

    pub fn list_options(&self) -> Vec<DatasourceOption> {
        self.config
            .datasources
            .iter()
            .map(|(name, datasource)| {
                if datasource.default {
                    DatasourceOption {
                        name: format!("{}{}", name, DEFAULT_SUFFIX),
                        value: None,
                    }
                } else {
                    DatasourceOption {
                        name: name.clone(),
                        value: Some(name.clone()),
                    }
                }
            })
            .collect()
    }

    fn create_adapter(
        &self,
        name: &str,
        datasource: &DatasourceConfig,
    ) -> Result<Arc<dyn TimeSeriesDatasource>, DatasourceError> {
        let datasource_type: DatasourceType = datasource.datasource_type.parse()?;
        debug!("Creating {} adapter for datasource {}", datasource_type, name);
        match datasource_type {
            DatasourceType::InfluxDb => Ok(Arc::new(InfluxDatasource::new(
                datasource,
                self.executor.clone(),
                self.filter.clone(),
                self.time_range.clone(),
            ))),
            DatasourceType::Graphite => match &self.graphite {
                Some(factory) => factory.create(name, datasource),
                None => Err(DatasourceError::MissingAdapterFactory(
                    datasource_type.to_string(),
                )),
            },
        }
    }
}
