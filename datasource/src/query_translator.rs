//! Expands dashboard targets into complete InfluxDB queries.
//!
//! Targets are rewritten textually, never parsed. A bare dotted path becomes a
//! `mean()` select over the path's prefix; anything else is taken to be a query
//! written by the user, optionally carrying the `$GROUP`, `$WHERE` and `$LIMIT`
//! placeholders. Quoting, comments and multiple statements are not understood.

use crate::constants::{
    GROUP_PLACEHOLDER, LIMIT_PLACEHOLDER, STATEMENT_TERMINATOR, WHERE_PLACEHOLDER,
};
use crate::errors::DatasourceError;
use crate::model::{QueryOptions, QueryTarget};
use crate::time_range::TimeRangeResolver;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static SIMPLE_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.]+$").expect("simple path pattern is valid"));

/// Clauses appended to a raw query lacking the placeholder, checked in order.
/// The whole table is skipped when the query already mentions `$LIMIT`.
const AUGMENTATION_RULES: [(&str, &str); 2] = [
    (WHERE_PLACEHOLDER, " WHERE $WHERE"),
    (GROUP_PLACEHOLDER, " GROUP BY $GROUP"),
];
const LIMIT_CLAUSE: &str = " LIMIT $LIMIT";

#[derive(Debug, Clone, PartialEq)]
pub enum TargetKind<'a> {
    SimplePath { table: String, field: &'a str },
    Complex,
}

pub fn classify_target(target: &str) -> TargetKind<'_> {
    if !SIMPLE_PATH.is_match(target) {
        return TargetKind::Complex;
    }
    let mut parts: Vec<&str> = target.split('.').collect();
    let field = parts.pop().unwrap_or_default();
    TargetKind::SimplePath {
        table: parts.join("."),
        field,
    }
}

/// The target with all placeholders in place, before substitution.
pub fn expand_target(target: &str) -> String {
    match classify_target(target) {
        TargetKind::SimplePath { table, field } => format!(
            "SELECT mean({}) FROM {} GROUP BY {} WHERE {} LIMIT {}",
            field, table, GROUP_PLACEHOLDER, WHERE_PLACEHOLDER, LIMIT_PLACEHOLDER
        ),
        TargetKind::Complex => augment_query(target),
    }
}

fn augment_query(query: &str) -> String {
    let upper = query.to_uppercase();
    if upper.contains(LIMIT_PLACEHOLDER) {
        return query.to_string();
    }
    let mut augmented = query.to_string();
    for (placeholder, clause) in AUGMENTATION_RULES {
        if !upper.contains(placeholder) {
            augmented.push_str(clause);
        }
    }
    augmented.push_str(LIMIT_CLAUSE);
    augmented
}

/// Placeholder values shared by every target of one `query` call.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryTranslator {
    group_by: String,
    time_filter: String,
    limit: String,
}

impl QueryTranslator {
    pub fn new(
        options: &QueryOptions,
        time_range: &TimeRangeResolver,
    ) -> Result<QueryTranslator, DatasourceError> {
        Ok(QueryTranslator {
            group_by: format!("time({})", options.interval),
            time_filter: time_range.time_filter(&options.range)?,
            limit: options.max_data_points.to_string(),
        })
    }

    /// `None` for hidden targets, which are never sent.
    pub fn build_query(&self, target: &QueryTarget) -> Option<String> {
        if target.hide {
            return None;
        }
        // Only the first exact-case occurrence of each placeholder is replaced.
        let mut query = expand_target(&target.target)
            .replacen(GROUP_PLACEHOLDER, &self.group_by, 1)
            .replacen(WHERE_PLACEHOLDER, &self.time_filter, 1)
            .replacen(LIMIT_PLACEHOLDER, &self.limit, 1);
        query.push_str(STATEMENT_TERMINATOR);
        debug!("Built query {}", query);
        Some(query)
    }
}
