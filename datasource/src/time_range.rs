use crate::clock::Clock;
use crate::errors::DatasourceError;
use crate::model::{RangeBound, TimeRange};
use chrono::FixedOffset;
use datemath::parse_date;
use std::sync::Arc;

/// Turns dashboard range bounds into whole epoch seconds and the backend time filter.
#[derive(Clone)]
pub struct TimeRangeResolver {
    clock: Arc<dyn Clock>,
    timezone_offset: Option<FixedOffset>,
}

impl TimeRangeResolver {
    pub fn new(clock: Arc<dyn Clock>, timezone_offset: Option<FixedOffset>) -> TimeRangeResolver {
        TimeRangeResolver {
            clock,
            timezone_offset,
        }
    }

    pub fn translate_time(&self, bound: &RangeBound) -> Result<i64, DatasourceError> {
        let millis = match bound {
            RangeBound::Instant(instant) => instant.timestamp_millis(),
            RangeBound::EpochMillis(millis) => *millis,
            RangeBound::Expression(expression) => {
                parse_date(expression, self.clock.now_utc())?.timestamp_millis()
            }
        };
        let shift = self
            .timezone_offset
            .map(|offset| i64::from(offset.local_minus_utc()) * 1000)
            .unwrap_or(0);
        Ok(millis.saturating_add(shift).div_euclid(1000))
    }

    /// `time > <from>s`, with an upper bound unless the range ends at `now`.
    pub fn time_filter(&self, range: &TimeRange) -> Result<String, DatasourceError> {
        let from = self.translate_time(&range.from)?;
        let until = self.translate_time(&range.to)?;
        let mut time_filter = format!("time > {}s", from);
        if !range.to.is_now() {
            time_filter.push_str(&format!(" AND time < {}s", until));
        }
        Ok(time_filter)
    }
}
