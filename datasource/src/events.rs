use crate::model::{EventRecord, SeriesResult};
use crate::normalizer::epoch_seconds;
use log::debug;
use serde_json::Value;

const WHEN_INDEX: usize = 0;
const DATA_INDEX: usize = 2;

/// Maps the rows of the first series to annotation events.
///
/// Only the first series is read and tags are always empty, whatever the
/// reply carries.
pub fn to_events(series_results: Vec<SeriesResult>) -> Vec<EventRecord> {
    let series = match series_results.into_iter().next() {
        Some(series) => series,
        None => return vec![],
    };
    let SeriesResult { name, points, .. } = series;
    points
        .into_iter()
        .enumerate()
        .filter_map(|(row, mut point)| {
            let when = match point.get(WHEN_INDEX).and_then(epoch_seconds) {
                Some(when) => when,
                None => {
                    debug!("Skipping event row {} of {} without a timestamp", row, name);
                    return None;
                }
            };
            let data = if point.len() > DATA_INDEX {
                point.swap_remove(DATA_INDEX)
            } else {
                Value::Null
            };
            Some(EventRecord {
                when,
                what: name.clone(),
                tags: vec![],
                data,
            })
        })
        .collect()
}
