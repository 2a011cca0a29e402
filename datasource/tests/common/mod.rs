#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use datasource::clock::MockClock;
use datasource::config::DatasourceConfig;
use datasource::errors::TransportError;
use datasource::filter::{FilterInterpolationError, FilterInterpolator};
use datasource::model::SeriesResult;
use datasource::request_executor::{RequestExecutor, SeriesRequest};
use datasource::time_range::TimeRangeResolver;
use log::debug;
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

pub const INFLUX_URL: &str = "http://localhost:8086/db/site";

pub fn init_logger() {
    let res = env_logger::try_init();
    match res {
        Ok(_) => {}
        Err(_) => {
            debug!("Tried to initialize logger which is already initialize")
        }
    }
}

/// 2014-02-20T12:00:00Z, epoch second 1392897600.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2014, 2, 20, 12, 0, 0).unwrap()
}

pub fn time_range_resolver() -> TimeRangeResolver {
    TimeRangeResolver::new(Arc::new(MockClock::at(now())), None)
}

pub fn influx_config() -> DatasourceConfig {
    DatasourceConfig::new("influxdb", INFLUX_URL).with_credentials("root", "root")
}

pub fn series(name: &str, columns: &[&str], points: Vec<Vec<Value>>) -> SeriesResult {
    SeriesResult {
        name: name.to_string(),
        columns: columns.iter().map(|c| c.to_string()).collect(),
        points,
    }
}

/// Answers queries from canned replies and records every request it sees.
#[derive(Default)]
pub struct InMemoryInflux {
    replies: HashMap<String, Vec<SeriesResult>>,
    failing: HashSet<String>,
    requests: Mutex<Vec<SeriesRequest>>,
}

impl InMemoryInflux {
    pub fn new() -> InMemoryInflux {
        InMemoryInflux::default()
    }

    pub fn with_reply(mut self, query: &str, reply: Vec<SeriesResult>) -> InMemoryInflux {
        self.replies.insert(query.to_string(), reply);
        self
    }

    pub fn failing_on(mut self, query: &str) -> InMemoryInflux {
        self.failing.insert(query.to_string());
        self
    }

    pub fn requests(&self) -> Vec<SeriesRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.query).collect()
    }
}

#[async_trait]
impl RequestExecutor for InMemoryInflux {
    async fn execute(&self, request: &SeriesRequest) -> Result<Vec<SeriesResult>, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.failing.contains(&request.query) {
            return Err(TransportError::BadStatusCode(
                StatusCode::INTERNAL_SERVER_ERROR,
            ));
        }
        Ok(self.replies.get(&request.query).cloned().unwrap_or_default())
    }
}

pub struct FailingFilter;

impl FilterInterpolator for FailingFilter {
    fn apply_filter_to_target(&self, target: &str) -> Result<String, FilterInterpolationError> {
        Err(FilterInterpolationError {
            target: target.to_string(),
            reason: "undefined filter variable".to_string(),
        })
    }
}
