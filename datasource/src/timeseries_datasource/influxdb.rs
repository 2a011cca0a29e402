use crate::config::DatasourceConfig;
use crate::constants::{JSON_FORMAT, LIST_SERIES_QUERY, SERIES_PATH};
use crate::errors::DatasourceError;
use crate::events::to_events;
use crate::filter::FilterInterpolator;
use crate::metric_discovery::{metrics_from_sample, sample_query};
use crate::model::{EventOptions, EventRecord, Metric, QueryOptions, SeriesResult, TimeSeries};
use crate::normalizer::normalize;
use crate::query_translator::QueryTranslator;
use crate::request_executor::{RequestExecutor, SeriesRequest};
use crate::time_range::TimeRangeResolver;
use crate::timeseries_datasource::{DatasourceType, TimeSeriesDatasource};
use async_trait::async_trait;
use futures_util::future::try_join_all;
use log::debug;
use std::sync::Arc;

/// Adapter for InfluxDB's `/series` HTTP endpoint.
///
/// Each visible target becomes one request. Requests run concurrently and are
/// joined all-or-nothing: the first failure fails the whole call and the
/// replies that did arrive are discarded.
pub struct InfluxDatasource {
    url: String,
    username: Option<String>,
    password: Option<String>,
    executor: Arc<dyn RequestExecutor>,
    filter: Arc<dyn FilterInterpolator>,
    time_range: TimeRangeResolver,
}

impl InfluxDatasource {
    pub fn new(
        config: &DatasourceConfig,
        executor: Arc<dyn RequestExecutor>,
        filter: Arc<dyn FilterInterpolator>,
        time_range: TimeRangeResolver,
    ) -> InfluxDatasource {
        InfluxDatasource {
            url: config.url.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            executor,
            filter,
            time_range,
        }
    }

    /// All queries one `query` call would send, in target order.
    pub fn build_queries(&self, options: &QueryOptions) -> Result<Vec<String>, DatasourceError> {
        if options.format != JSON_FORMAT {
            return Err(DatasourceError::UnsupportedFormat {
                requested: options.format.clone(),
                expected: JSON_FORMAT.to_string(),
            });
        }
        let translator = QueryTranslator::new(options, &self.time_range)?;
        Ok(options
            .targets
            .iter()
            .filter_map(|target| translator.build_query(target))
            .collect())
    }

    async fn do_influx_request(&self, query: &str) -> Result<Vec<SeriesResult>, DatasourceError> {
        let request = SeriesRequest {
            url: format!("{}{}", self.url, SERIES_PATH),
            username: self.username.clone(),
            password: self.password.clone(),
            query: query.to_string(),
        };
        Ok(self.executor.execute(&request).await?)
    }

    async fn sample_metrics(&self, series_name: &str) -> Result<Vec<Metric>, DatasourceError> {
        let sample = self.do_influx_request(&sample_query(series_name)).await?;
        Ok(metrics_from_sample(series_name, &sample))
    }
}

#[async_trait]
impl TimeSeriesDatasource for InfluxDatasource {
    fn datasource_type(&self) -> DatasourceType {
        DatasourceType::InfluxDb
    }

    async fn query(&self, options: &QueryOptions) -> Result<Vec<TimeSeries>, DatasourceError> {
        let queries = self.build_queries(options)?;
        debug!("Running {} queries against {}", queries.len(), self.url);
        let replies =
            try_join_all(queries.iter().map(|query| self.do_influx_request(query))).await?;
        let mut output = vec![];
        for reply in &replies {
            output.extend(normalize(reply)?);
        }
        Ok(output)
    }

    async fn events(&self, options: &EventOptions) -> Result<Vec<EventRecord>, DatasourceError> {
        let results = self.do_influx_request(&options.tags).await?;
        Ok(to_events(results))
    }

    async fn metric_find_query(&self, query: &str) -> Result<Vec<Metric>, DatasourceError> {
        let interpolated = self.filter.apply_filter_to_target(query)?;
        debug!("Finding metrics for {}", interpolated);
        let series = self.do_influx_request(LIST_SERIES_QUERY).await?;
        let metrics =
            try_join_all(series.iter().map(|s| self.sample_metrics(&s.name))).await?;
        Ok(metrics.into_iter().flatten().collect())
    }
}
