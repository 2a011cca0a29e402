pub const GROUP_PLACEHOLDER: &str = "$GROUP";
pub const WHERE_PLACEHOLDER: &str = "$WHERE";
pub const LIMIT_PLACEHOLDER: &str = "$LIMIT";
pub const STATEMENT_TERMINATOR: &str = ";";

pub const TIME_COLUMN: &str = "time";
pub const SEQUENCE_NUMBER_COLUMN: &str = "sequence_number";
/// Columns that never become output series or metrics.
pub const RESERVED_COLUMNS: [&str; 2] = [TIME_COLUMN, SEQUENCE_NUMBER_COLUMN];

pub const JSON_FORMAT: &str = "json";
pub const NOW_SENTINEL: &str = "now";

pub const LIST_SERIES_QUERY: &str = "list series";
pub const SERIES_PATH: &str = "/series";

pub const INFLUXDB_TYPE: &str = "influxdb";
pub const GRAPHITE_TYPE: &str = "graphite";
pub const DEFAULT_SUFFIX: &str = " (default)";

pub fn is_reserved_column(column: &str) -> bool {
    RESERVED_COLUMNS.contains(&column)
}
