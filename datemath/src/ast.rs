use chrono::{DateTime, Utc};
use std::fmt::{Display, Formatter};

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum TimeUnit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl TimeUnit {
    pub fn from_char(unit: char) -> Option<TimeUnit> {
        match unit {
            'y' => Some(TimeUnit::Year),
            'M' => Some(TimeUnit::Month),
            'w' => Some(TimeUnit::Week),
            'd' => Some(TimeUnit::Day),
            'h' => Some(TimeUnit::Hour),
            'm' => Some(TimeUnit::Minute),
            's' => Some(TimeUnit::Second),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            TimeUnit::Year => 'y',
            TimeUnit::Month => 'M',
            TimeUnit::Week => 'w',
            TimeUnit::Day => 'd',
            TimeUnit::Hour => 'h',
            TimeUnit::Minute => 'm',
            TimeUnit::Second => 's',
        }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub enum DateMathOperation {
    Add(u32, TimeUnit),
    Subtract(u32, TimeUnit),
    RoundDown(TimeUnit),
}

impl Display for DateMathOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DateMathOperation::Add(n, unit) => write!(f, "+{}{}", n, unit.as_char()),
            DateMathOperation::Subtract(n, unit) => write!(f, "-{}{}", n, unit.as_char()),
            DateMathOperation::RoundDown(unit) => write!(f, "/{}", unit.as_char()),
        }
    }
}

/// The instant the math operations are applied to.
#[derive(PartialEq, Debug, Clone)]
pub enum Anchor {
    Now,
    Absolute(DateTime<Utc>),
}

#[derive(PartialEq, Debug, Clone)]
pub struct DateExpression {
    pub anchor: Anchor,
    pub operations: Vec<DateMathOperation>,
}

impl DateExpression {
    pub fn new(anchor: Anchor, operations: Vec<DateMathOperation>) -> DateExpression {
        DateExpression { anchor, operations }
    }
}
