pub mod ast;
pub mod errors;
pub mod parser;
mod resolve;

use crate::errors::DateMathError;
use crate::parser::parse_date_expression;
use chrono::{DateTime, Utc};

pub use crate::parser::parse_utc_offset;

/// Parses a dashboard date expression (`now-1h`, `2014-02-20T00:00:00Z||+1d/d`, ...)
/// and resolves it against the supplied current instant.
pub fn parse_date(text: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, DateMathError> {
    let expression = parse_date_expression(text)?;
    expression.resolve(now)
}
