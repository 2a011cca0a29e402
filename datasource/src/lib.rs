pub mod clock;
pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod filter;
pub mod metric_discovery;
pub mod model;
pub mod normalizer;
pub mod query_translator;
pub mod registry;
pub mod request_executor;
pub mod time_range;
pub mod timeseries_datasource;
