mod common;

use common::*;
use datasource::errors::DatasourceError;
use datasource::model::{Datapoint, TimeSeries};
use datasource::normalizer::normalize;
use rstest::*;
use serde_json::{json, Value};

#[rstest]
fn test_rows_become_datapoints_per_column() {
    init_logger();
    let host1 = series(
        "host1",
        &["time", "value", "value2"],
        vec![
            vec![json!(0), json!(1), Value::Null],
            vec![json!(1000), Value::Null, json!(2)],
            vec![json!(3000), json!(4), json!(5)],
        ],
    );
    let output = normalize(&[host1]).unwrap();
    assert_eq!(
        output,
        vec![
            TimeSeries {
                target: "host1.value".to_string(),
                datapoints: vec![
                    Datapoint(json!(1), 0),
                    Datapoint(Value::Null, 1),
                    Datapoint(json!(4), 3)
                ],
            },
            TimeSeries {
                target: "host1.value2".to_string(),
                datapoints: vec![
                    Datapoint(Value::Null, 0),
                    Datapoint(json!(2), 1),
                    Datapoint(json!(5), 3)
                ],
            },
        ]
    );
    assert_eq!(
        serde_json::to_value(&output[0]).unwrap(),
        json!({"target": "host1.value", "datapoints": [[1, 0], [null, 1], [4, 3]]})
    );
}

#[rstest]
fn test_reserved_columns_never_become_series() {
    let cpu = series(
        "cpu",
        &["sequence_number", "value", "time"],
        vec![
            vec![json!(17), json!(0.5), json!(1392897600000i64)],
            vec![json!(18), json!(0.7), json!(1392897610000i64)],
        ],
    );
    let output = normalize(&[cpu]).unwrap();
    let targets: Vec<&str> = output.iter().map(|s| s.target.as_str()).collect();
    assert_eq!(targets, vec!["cpu.value"]);
    assert_eq!(
        output[0].datapoints,
        vec![
            Datapoint(json!(0.5), 1392897600),
            Datapoint(json!(0.7), 1392897610)
        ]
    );
}

#[rstest]
fn test_row_order_is_preserved() {
    let unordered = series(
        "load",
        &["time", "value"],
        vec![
            vec![json!(9000), json!("c")],
            vec![json!(1000), json!("a")],
            vec![json!(5000), json!("b")],
        ],
    );
    let output = normalize(&[unordered]).unwrap();
    assert_eq!(
        output[0].datapoints,
        vec![
            Datapoint(json!("c"), 9),
            Datapoint(json!("a"), 1),
            Datapoint(json!("b"), 5)
        ]
    );
}

#[rstest]
fn test_series_order_is_preserved() {
    let output = normalize(&[
        series("b", &["time", "x", "y"], vec![]),
        series("a", &["time", "z"], vec![]),
    ])
    .unwrap();
    let targets: Vec<&str> = output.iter().map(|s| s.target.as_str()).collect();
    assert_eq!(targets, vec!["b.x", "b.y", "a.z"]);
    assert!(output.iter().all(|s| s.datapoints.is_empty()));
}

#[rstest]
fn test_missing_time_column() {
    let res = normalize(&[series("broken", &["value"], vec![vec![json!(1)]])]);
    assert!(matches!(res, Err(DatasourceError::MissingTimeColumn(name)) if name == "broken"));
}

#[rstest]
fn test_non_numeric_timestamp() {
    let res = normalize(&[series(
        "broken",
        &["time", "value"],
        vec![vec![json!(1000), json!(1)], vec![json!("later"), json!(2)]],
    )]);
    assert!(matches!(
        res,
        Err(DatasourceError::InvalidTimestamp { row: 1, .. })
    ));
}
