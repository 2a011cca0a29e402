use crate::ast::{Anchor, DateExpression, DateMathOperation, TimeUnit};
use crate::errors::DateMathError;
use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, TimeZone, Timelike, Utc};

impl DateExpression {
    /// Applies the operations left to right, starting from the anchor.
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, DateMathError> {
        let start = match &self.anchor {
            Anchor::Now => now,
            Anchor::Absolute(instant) => *instant,
        };
        self.operations
            .iter()
            .try_fold(start, |time, operation| {
                apply_operation(time, operation)
                    .ok_or_else(|| DateMathError::OutOfRange(operation.to_string()))
            })
    }
}

fn apply_operation(time: DateTime<Utc>, operation: &DateMathOperation) -> Option<DateTime<Utc>> {
    match operation {
        DateMathOperation::Add(n, unit) => shift(time, i64::from(*n), unit),
        DateMathOperation::Subtract(n, unit) => shift(time, -i64::from(*n), unit),
        DateMathOperation::RoundDown(unit) => round_down(time, unit),
    }
}

fn shift(time: DateTime<Utc>, amount: i64, unit: &TimeUnit) -> Option<DateTime<Utc>> {
    let delta = match unit {
        TimeUnit::Year => return shift_months(time, amount.checked_mul(12)?),
        TimeUnit::Month => return shift_months(time, amount),
        TimeUnit::Week => Duration::try_weeks(amount)?,
        TimeUnit::Day => Duration::try_days(amount)?,
        TimeUnit::Hour => Duration::try_hours(amount)?,
        TimeUnit::Minute => Duration::try_minutes(amount)?,
        TimeUnit::Second => Duration::try_seconds(amount)?,
    };
    time.checked_add_signed(delta)
}

// Month arithmetic clamps to the last valid day, e.g. Mar 31 - 1M is Feb 28/29.
fn shift_months(time: DateTime<Utc>, months: i64) -> Option<DateTime<Utc>> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        time.checked_add_months(magnitude)
    } else {
        time.checked_sub_months(magnitude)
    }
}

fn round_down(time: DateTime<Utc>, unit: &TimeUnit) -> Option<DateTime<Utc>> {
    let date = time.date_naive();
    let start = match unit {
        TimeUnit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1)?.and_hms_opt(0, 0, 0)?,
        TimeUnit::Month => {
            NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?.and_hms_opt(0, 0, 0)?
        }
        TimeUnit::Week => {
            let since_sunday = i64::from(date.weekday().num_days_from_sunday());
            date.checked_sub_signed(Duration::try_days(since_sunday)?)?
                .and_hms_opt(0, 0, 0)?
        }
        TimeUnit::Day => date.and_hms_opt(0, 0, 0)?,
        TimeUnit::Hour => date.and_hms_opt(time.hour(), 0, 0)?,
        TimeUnit::Minute => date.and_hms_opt(time.hour(), time.minute(), 0)?,
        TimeUnit::Second => date.and_hms_opt(time.hour(), time.minute(), time.second())?,
    };
    Some(Utc.from_utc_datetime(&start))
}
