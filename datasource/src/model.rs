use crate::constants::{JSON_FORMAT, NOW_SENTINEL};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One end of a dashboard time range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeBound {
    Instant(DateTime<Utc>),
    EpochMillis(i64),
    /// Date math such as `now-1h`, resolved when the query is built.
    Expression(String),
}

impl RangeBound {
    /// Only the literal `now` leaves the upper bound open.
    pub fn is_now(&self) -> bool {
        matches!(self, RangeBound::Expression(e) if e == NOW_SENTINEL)
    }
}

impl From<&str> for RangeBound {
    fn from(expression: &str) -> Self {
        RangeBound::Expression(expression.to_string())
    }
}

impl From<DateTime<Utc>> for RangeBound {
    fn from(instant: DateTime<Utc>) -> Self {
        RangeBound::Instant(instant)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: RangeBound,
    pub to: RangeBound,
}

impl TimeRange {
    pub fn new(from: impl Into<RangeBound>, to: impl Into<RangeBound>) -> TimeRange {
        TimeRange {
            from: from.into(),
            to: to.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryTarget {
    pub target: String,
    #[serde(default)]
    pub hide: bool,
}

impl QueryTarget {
    pub fn new(target: &str) -> QueryTarget {
        QueryTarget {
            target: target.to_string(),
            hide: false,
        }
    }

    pub fn hidden(target: &str) -> QueryTarget {
        QueryTarget {
            target: target.to_string(),
            hide: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryOptions {
    pub range: TimeRange,
    pub interval: String,
    pub max_data_points: u64,
    pub targets: Vec<QueryTarget>,
    pub format: String,
}

impl QueryOptions {
    pub fn new(
        range: TimeRange,
        interval: &str,
        max_data_points: u64,
        targets: Vec<QueryTarget>,
    ) -> QueryOptions {
        QueryOptions {
            range,
            interval: interval.to_string(),
            max_data_points,
            targets,
            format: JSON_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventOptions {
    /// Sent verbatim as the backend query.
    pub tags: String,
}

/// One named row group of a backend reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesResult {
    pub name: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub points: Vec<Vec<Value>>,
}

impl SeriesResult {
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SeriesReply {
    Wrapped { data: Vec<SeriesResult> },
    Bare(Vec<SeriesResult>),
}

impl SeriesReply {
    pub(crate) fn into_series(self) -> Vec<SeriesResult> {
        match self {
            SeriesReply::Wrapped { data } => data,
            SeriesReply::Bare(data) => data,
        }
    }
}

/// Serialized as `[value, epochSeconds]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datapoint(pub Value, pub i64);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub target: String,
    pub datapoints: Vec<Datapoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub when: i64,
    pub what: String,
    pub tags: Vec<String>,
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub text: String,
    pub expandable: bool,
}
