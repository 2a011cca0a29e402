mod common;

use async_trait::async_trait;
use common::*;
use datasource::clock::MockClock;
use datasource::config::{DashboardConfig, DatasourceConfig};
use datasource::errors::DatasourceError;
use datasource::model::{
    EventOptions, EventRecord, Metric, QueryOptions, QueryTarget, TimeRange, TimeSeries,
};
use datasource::registry::{AdapterFactory, DatasourceOption, DatasourceRegistry};
use datasource::timeseries_datasource::{DatasourceType, TimeSeriesDatasource};
use rstest::*;
use std::sync::Arc;

struct GraphiteStandIn;

#[async_trait]
impl TimeSeriesDatasource for GraphiteStandIn {
    fn datasource_type(&self) -> DatasourceType {
        DatasourceType::Graphite
    }

    async fn query(&self, _options: &QueryOptions) -> Result<Vec<TimeSeries>, DatasourceError> {
        Ok(vec![])
    }

    async fn events(&self, _options: &EventOptions) -> Result<Vec<EventRecord>, DatasourceError> {
        Ok(vec![])
    }

    async fn metric_find_query(&self, _query: &str) -> Result<Vec<Metric>, DatasourceError> {
        Ok(vec![])
    }
}

struct GraphiteFactory;

impl AdapterFactory for GraphiteFactory {
    fn create(
        &self,
        _name: &str,
        _config: &DatasourceConfig,
    ) -> Result<Arc<dyn TimeSeriesDatasource>, DatasourceError> {
        Ok(Arc::new(GraphiteStandIn))
    }
}

#[fixture]
fn config() -> DashboardConfig {
    init_logger();
    DashboardConfig::default()
        .with_datasource("metrics", influx_config().as_default())
        .with_datasource("archive", DatasourceConfig::new("influxdb", "http://archive:8086/db/old"))
        .with_datasource("graphite", DatasourceConfig::new("graphite", "http://graphite:8080"))
        .with_datasource("unknown", DatasourceConfig::new("bogus", "http://bogus"))
}

fn registry(config: DashboardConfig, backend: &Arc<InMemoryInflux>) -> DatasourceRegistry {
    DatasourceRegistry::builder(config, backend.clone())
        .clock(Arc::new(MockClock::at(now())))
        .build()
        .unwrap()
}

#[rstest]
fn test_default_is_shared(config: DashboardConfig) {
    let registry = registry(config, &Arc::new(InMemoryInflux::new()));
    assert_eq!(
        registry.config().default_datasource().map(|(name, _)| name),
        Some("metrics")
    );
    let default = registry.get(None).unwrap();
    assert_eq!(default.datasource_type(), DatasourceType::InfluxDb);
    assert!(Arc::ptr_eq(&default, &registry.get(None).unwrap()));
    assert!(Arc::ptr_eq(&default, &registry.get(Some("")).unwrap()));
}

#[rstest]
fn test_named_lookup_builds_new_adapter(config: DashboardConfig) {
    let registry = registry(config, &Arc::new(InMemoryInflux::new()));
    let archive = registry.get(Some("archive")).unwrap();
    assert_eq!(archive.datasource_type(), DatasourceType::InfluxDb);
    assert!(!Arc::ptr_eq(&archive, &registry.get(Some("archive")).unwrap()));
}

#[rstest]
fn test_unknown_type_fails_before_any_request(config: DashboardConfig) {
    let backend = Arc::new(InMemoryInflux::new());
    let registry = registry(config, &backend);
    let res = registry.get(Some("unknown"));
    assert!(matches!(
        res,
        Err(DatasourceError::UnknownDatasourceType(t)) if t == "bogus"
    ));
    assert!(backend.requests().is_empty());
}

#[rstest]
fn test_unconfigured_name(config: DashboardConfig) {
    let registry = registry(config, &Arc::new(InMemoryInflux::new()));
    assert!(matches!(
        registry.get(Some("nope")),
        Err(DatasourceError::UnknownDatasource(n)) if n == "nope"
    ));
}

#[rstest]
fn test_graphite_needs_factory(config: DashboardConfig) {
    let without = registry(config.clone(), &Arc::new(InMemoryInflux::new()));
    assert!(matches!(
        without.get(Some("graphite")),
        Err(DatasourceError::MissingAdapterFactory(t)) if t == "graphite"
    ));

    let with = DatasourceRegistry::builder(config, Arc::new(InMemoryInflux::new()))
        .graphite_factory(Arc::new(GraphiteFactory))
        .build()
        .unwrap();
    let graphite = with.get(Some("graphite")).unwrap();
    assert_eq!(graphite.datasource_type(), DatasourceType::Graphite);
}

#[rstest]
fn test_list_options_marks_default(config: DashboardConfig) {
    let registry = registry(config, &Arc::new(InMemoryInflux::new()));
    assert_eq!(
        registry.list_options(),
        vec![
            DatasourceOption {
                name: "archive".to_string(),
                value: Some("archive".to_string())
            },
            DatasourceOption {
                name: "graphite".to_string(),
                value: Some("graphite".to_string())
            },
            DatasourceOption {
                name: "metrics (default)".to_string(),
                value: None
            },
            DatasourceOption {
                name: "unknown".to_string(),
                value: Some("unknown".to_string())
            },
        ]
    );
}

#[rstest]
fn test_build_requires_default() {
    let config = DashboardConfig::default().with_datasource("metrics", influx_config());
    let res = DatasourceRegistry::builder(config, Arc::new(InMemoryInflux::new())).build();
    assert!(matches!(res, Err(DatasourceError::NoDefaultDatasource)));
}

#[rstest]
fn test_build_rejects_unknown_default_type() {
    let config = DashboardConfig::default()
        .with_datasource("metrics", DatasourceConfig::new("opentsdb", "http://tsdb").as_default());
    let res = DatasourceRegistry::builder(config, Arc::new(InMemoryInflux::new())).build();
    assert!(matches!(res, Err(DatasourceError::UnknownDatasourceType(_))));
}

#[rstest]
fn test_build_rejects_invalid_offset(config: DashboardConfig) {
    let res = DatasourceRegistry::builder(
        config.with_timezone_offset("Europe/Oslo"),
        Arc::new(InMemoryInflux::new()),
    )
    .build();
    assert!(matches!(res, Err(DatasourceError::Config(_))));
}

#[rstest]
#[tokio::test]
async fn test_timezone_offset_reaches_adapters(config: DashboardConfig) {
    let backend = Arc::new(InMemoryInflux::new());
    let registry = registry(config.with_timezone_offset("+01:00"), &backend);
    let options = QueryOptions::new(
        TimeRange::new("now-1h", "now"),
        "10s",
        500,
        vec![QueryTarget::new("cpu.value")],
    );
    registry.get(None).unwrap().query(&options).await.unwrap();
    registry
        .get(Some("archive"))
        .unwrap()
        .query(&options)
        .await
        .unwrap();
    let requests = backend.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests
        .iter()
        .all(|r| r.query.contains("WHERE time > 1392897600s LIMIT 500")));
    assert_eq!(requests[1].url, "http://archive:8086/db/old/series");
}
