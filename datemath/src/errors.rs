use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DateMathError {
    InvalidExpression(String, String),
    InvalidAbsoluteDate(String, String),
    OutOfRange(String),
    InvalidOffset(String),
}

impl Display for DateMathError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DateMathError::InvalidExpression(text, reason) => {
                write!(f, "Invalid date math in {}: {}", text, reason)
            }
            DateMathError::InvalidAbsoluteDate(text, reason) => {
                write!(f, "Could not parse date {}: {}", text, reason)
            }
            DateMathError::OutOfRange(op) => {
                write!(f, "Date math operation {} is out of range", op)
            }
            DateMathError::InvalidOffset(text) => {
                write!(f, "Invalid UTC offset: {}", text)
            }
        }
    }
}
