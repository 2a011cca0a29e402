use crate::constants::is_reserved_column;
use crate::model::{Metric, SeriesResult};

pub fn sample_query(series_name: &str) -> String {
    format!("select * from {} limit 1", series_name)
}

/// One metric per non-reserved column of the first series in a sample reply.
pub fn metrics_from_sample(series_name: &str, sample: &[SeriesResult]) -> Vec<Metric> {
    match sample.first() {
        Some(first) => first
            .columns
            .iter()
            .filter(|column| !is_reserved_column(column))
            .map(|column| Metric {
                text: format!("{}.{}", series_name, column),
                expandable: false,
            })
            .collect(),
        None => vec![],
    }
}
