use crate::constants::{is_reserved_column, TIME_COLUMN};
use crate::errors::DatasourceError;
use crate::model::{Datapoint, SeriesResult, TimeSeries};
use serde_json::Value;

/// Floors a millisecond timestamp cell to whole epoch seconds.
pub fn epoch_seconds(cell: &Value) -> Option<i64> {
    if let Some(millis) = cell.as_i64() {
        return Some(millis.div_euclid(1000));
    }
    cell.as_f64().map(|millis| (millis / 1000.0).floor() as i64)
}

/// One time series per non-reserved column of each backend series, named
/// `<series>.<column>`. Rows keep their backend order.
pub fn normalize(series_results: &[SeriesResult]) -> Result<Vec<TimeSeries>, DatasourceError> {
    let mut output = vec![];
    for series in series_results {
        output.extend(normalize_series(series)?);
    }
    Ok(output)
}

fn normalize_series(series: &SeriesResult) -> Result<Vec<TimeSeries>, DatasourceError> {
    let time_index = series
        .column_index(TIME_COLUMN)
        .ok_or_else(|| DatasourceError::MissingTimeColumn(series.name.clone()))?;
    let mut timestamps = Vec::with_capacity(series.points.len());
    for (row, point) in series.points.iter().enumerate() {
        let timestamp = point
            .get(time_index)
            .and_then(epoch_seconds)
            .ok_or_else(|| DatasourceError::InvalidTimestamp {
                series: series.name.clone(),
                row,
            })?;
        timestamps.push(timestamp);
    }

    Ok(series
        .columns
        .iter()
        .enumerate()
        .filter(|(_, column)| !is_reserved_column(column))
        .map(|(index, column)| TimeSeries {
            target: format!("{}.{}", series.name, column),
            datapoints: series
                .points
                .iter()
                .zip(&timestamps)
                .map(|(point, timestamp)| {
                    Datapoint(point.get(index).cloned().unwrap_or(Value::Null), *timestamp)
                })
                .collect(),
        })
        .collect())
}
