use crate::ast::{Anchor, DateExpression, DateMathOperation, TimeUnit};
use crate::errors::DateMathError;
use chrono::{FixedOffset, Utc};
use log::debug;
use nom::branch::alt;
use nom::bytes::complete::take_while_m_n;
use nom::character::complete::{char, digit1, one_of};
use nom::combinator::{eof, map_opt, map_res, opt};
use nom::multi::many0;
use nom::sequence::{preceded, terminated, tuple};
use nom::IResult;

const NOW: &str = "now";
const ANCHOR_SEPARATOR: &str = "||";

fn time_unit(u: &str) -> IResult<&str, TimeUnit> {
    map_opt(one_of("yMwdhms"), TimeUnit::from_char)(u)
}

fn rounding(r: &str) -> IResult<&str, DateMathOperation> {
    let (r, unit) = preceded(char('/'), time_unit)(r)?;
    Ok((r, DateMathOperation::RoundDown(unit)))
}

fn amount(a: &str) -> IResult<&str, u32> {
    let (a, n) = opt(map_res(digit1, |d: &str| d.parse::<u32>()))(a)?;
    Ok((a, n.unwrap_or(1)))
}

fn shift(s: &str) -> IResult<&str, DateMathOperation> {
    let (s, (sign, n, unit)) = tuple((one_of("+-"), amount, time_unit))(s)?;
    let operation = if sign == '+' {
        DateMathOperation::Add(n, unit)
    } else {
        DateMathOperation::Subtract(n, unit)
    };
    Ok((s, operation))
}

fn operation(o: &str) -> IResult<&str, DateMathOperation> {
    alt((rounding, shift))(o)
}

fn math_expression(m: &str) -> IResult<&str, Vec<DateMathOperation>> {
    terminated(many0(operation), eof)(m)
}

fn parse_math(text: &str, math: &str) -> Result<Vec<DateMathOperation>, DateMathError> {
    let (_, operations) = math_expression(math)
        .map_err(|e| DateMathError::InvalidExpression(text.to_string(), e.to_string()))?;
    Ok(operations)
}

pub fn parse_date_expression(text: &str) -> Result<DateExpression, DateMathError> {
    if let Some(math) = text.strip_prefix(NOW) {
        return Ok(DateExpression::new(Anchor::Now, parse_math(text, math)?));
    }
    let (date, math) = text.split_once(ANCHOR_SEPARATOR).unwrap_or((text, ""));
    let instant = dateparser::parse_with_timezone(date, &Utc)
        .map_err(|e| DateMathError::InvalidAbsoluteDate(date.to_string(), e.to_string()))?;
    debug!("Parsed absolute date {} as {}", date, instant);
    Ok(DateExpression::new(
        Anchor::Absolute(instant),
        parse_math(text, math)?,
    ))
}

fn offset_sign(o: &str) -> IResult<&str, i32> {
    let (o, sign) = one_of("+-")(o)?;
    Ok((o, if sign == '-' { -1 } else { 1 }))
}

fn two_digits(d: &str) -> IResult<&str, i32> {
    map_res(
        take_while_m_n(2, 2, |c: char| c.is_ascii_digit()),
        |n: &str| n.parse::<i32>(),
    )(d)
}

fn utc_offset(o: &str) -> IResult<&str, i32> {
    let (o, (sign, hours, minutes)) = terminated(
        tuple((
            offset_sign,
            two_digits,
            opt(preceded(opt(char(':')), two_digits)),
        )),
        eof,
    )(o)?;
    Ok((o, sign * (hours * 3600 + minutes.unwrap_or(0) * 60)))
}

/// Parses `+02:00`, `-0500` or `+02` into a fixed offset east of UTC.
pub fn parse_utc_offset(text: &str) -> Result<FixedOffset, DateMathError> {
    let (_, seconds) =
        utc_offset(text).map_err(|_| DateMathError::InvalidOffset(text.to_string()))?;
    FixedOffset::east_opt(seconds).ok_or_else(|| DateMathError::InvalidOffset(text.to_string()))
}

#[test]
fn test_parse_operations() {
    assert_eq!(
        math_expression("-1h/d+30m"),
        Ok((
            "",
            vec![
                DateMathOperation::Subtract(1, TimeUnit::Hour),
                DateMathOperation::RoundDown(TimeUnit::Day),
                DateMathOperation::Add(30, TimeUnit::Minute),
            ]
        ))
    );
}

#[test]
fn test_missing_amount_defaults_to_one() {
    assert_eq!(
        shift("-M"),
        Ok(("", DateMathOperation::Subtract(1, TimeUnit::Month)))
    );
}

#[test]
fn test_rounding_takes_no_amount() {
    assert!(math_expression("/2d").is_err());
}

#[test]
fn test_unknown_unit_is_rejected() {
    assert!(math_expression("-1x").is_err());
}

#[test]
fn test_parse_offsets() {
    assert_eq!(utc_offset("+02:00"), Ok(("", 7200)));
    assert_eq!(utc_offset("-0530"), Ok(("", -19800)));
    assert_eq!(utc_offset("+01"), Ok(("", 3600)));
    assert!(utc_offset("+02:").is_err());
    assert!(utc_offset("0200").is_err());
}
