//! Scalar value formatting for placeholder substitution
//!
//! An absent value always formats as the empty string. With an explicit
//! format spec, date/time values take a date pattern and numeric values take
//! a letter-plus-precision spec; text and boolean values have no custom
//! format capability and fall back to their default representation. Without
//! a spec, decimals render as currency and date/time values use a fixed
//! month/day/year 12-hour pattern.

use chrono::{Datelike, NaiveDateTime, Timelike};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::model::Scalar;

/// Pattern applied to date/time values when the placeholder carries no spec
const DEFAULT_DATETIME_PATTERN: &str = "MM/dd/yyyy hh:mm tt";

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Errors that can occur applying an explicit format spec
#[derive(Debug, Error)]
pub enum FormatError {
    /// A date pattern contains an alphabetic token the formatter doesn't know
    #[error("unknown date pattern token '{token}'")]
    UnknownDateToken { token: String },

    /// A numeric spec is malformed or doesn't apply to the value's type
    #[error("unsupported numeric format spec '{spec}'")]
    UnsupportedNumericSpec { spec: String },
}

/// Format a scalar value for substitution into a template.
///
/// `spec` is the text after the colon in `||Name:Spec||`, if any.
pub fn format_scalar(value: &Scalar, spec: Option<&str>) -> Result<String, FormatError> {
    match value {
        // Text and booleans have no custom format capability; an explicit
        // spec degrades to the generic textual representation.
        Scalar::Text(v) => Ok(v.clone().unwrap_or_default()),
        Scalar::Boolean(v) => Ok(v.map(|b| b.to_string()).unwrap_or_default()),
        Scalar::Integer(v) => match (v, spec) {
            (None, _) => Ok(String::new()),
            (Some(n), None) => Ok(n.to_string()),
            (Some(n), Some(spec)) => format_integer(*n, spec),
        },
        Scalar::Float(v) => match (v, spec) {
            (None, _) => Ok(String::new()),
            (Some(f), None) => Ok(f.to_string()),
            (Some(f), Some(spec)) => format_float(*f, spec),
        },
        Scalar::Decimal(v) => match (v, spec) {
            (None, _) => Ok(String::new()),
            (Some(d), None) => Ok(decimal_currency(*d, 2)),
            (Some(d), Some(spec)) => format_decimal(*d, spec),
        },
        Scalar::DateTime(v) => match v {
            None => Ok(String::new()),
            Some(dt) => format_datetime(dt, spec.unwrap_or(DEFAULT_DATETIME_PATTERN)),
        },
    }
}

/// Parse a numeric spec into its letter and optional precision, e.g.
/// `c2` -> `('c', Some(2))`, `N` -> `('n', None)`.
fn parse_numeric_spec(spec: &str) -> Option<(char, Option<usize>)> {
    let mut chars = spec.chars();
    let letter = chars.next()?;
    if !letter.is_ascii_alphabetic() {
        return None;
    }
    let rest = chars.as_str();
    if rest.is_empty() {
        Some((letter.to_ascii_lowercase(), None))
    } else {
        rest.parse()
            .ok()
            .map(|p| (letter.to_ascii_lowercase(), Some(p)))
    }
}

fn unsupported(spec: &str) -> FormatError {
    FormatError::UnsupportedNumericSpec {
        spec: spec.to_string(),
    }
}

fn format_integer(n: i64, spec: &str) -> Result<String, FormatError> {
    let (letter, precision) = parse_numeric_spec(spec).ok_or_else(|| unsupported(spec))?;
    let neg = n < 0;
    let digits = n.unsigned_abs().to_string();
    match letter {
        'c' => Ok(assemble(
            neg,
            Some('$'),
            &group_thousands(&digits),
            &zero_fraction(precision.unwrap_or(2)),
        )),
        'n' => Ok(assemble(
            neg,
            None,
            &group_thousands(&digits),
            &zero_fraction(precision.unwrap_or(2)),
        )),
        'f' => Ok(assemble(
            neg,
            None,
            &digits,
            &zero_fraction(precision.unwrap_or(2)),
        )),
        'd' => {
            let width = precision.unwrap_or(0);
            let padded = if digits.len() < width {
                format!("{}{}", "0".repeat(width - digits.len()), digits)
            } else {
                digits
            };
            Ok(assemble(neg, None, &padded, ""))
        }
        _ => Err(unsupported(spec)),
    }
}

fn format_float(f: f64, spec: &str) -> Result<String, FormatError> {
    let (letter, precision) = parse_numeric_spec(spec).ok_or_else(|| unsupported(spec))?;
    let p = precision.unwrap_or(2);
    let (neg, integral, fraction) = float_fixed(f, p);
    match letter {
        'c' => Ok(assemble(neg, Some('$'), &group_thousands(&integral), &fraction)),
        'n' => Ok(assemble(neg, None, &group_thousands(&integral), &fraction)),
        'f' => Ok(assemble(neg, None, &integral, &fraction)),
        _ => Err(unsupported(spec)),
    }
}

fn format_decimal(d: Decimal, spec: &str) -> Result<String, FormatError> {
    let (letter, precision) = parse_numeric_spec(spec).ok_or_else(|| unsupported(spec))?;
    let p = precision.unwrap_or(2);
    let (neg, integral, fraction) = decimal_fixed(d, p);
    match letter {
        'c' => Ok(assemble(neg, Some('$'), &group_thousands(&integral), &fraction)),
        'n' => Ok(assemble(neg, None, &group_thousands(&integral), &fraction)),
        'f' => Ok(assemble(neg, None, &integral, &fraction)),
        _ => Err(unsupported(spec)),
    }
}

fn decimal_currency(d: Decimal, precision: usize) -> String {
    let (neg, integral, fraction) = decimal_fixed(d, precision);
    assemble(neg, Some('$'), &group_thousands(&integral), &fraction)
}

/// Round to `precision` places, midpoints away from zero, and split into
/// sign, integral digits, and fraction digits.
fn decimal_fixed(d: Decimal, precision: usize) -> (bool, String, String) {
    let rounded = d.round_dp_with_strategy(precision as u32, RoundingStrategy::MidpointAwayFromZero);
    let neg = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.prec$}", rounded.abs(), prec = precision);
    split_fixed(&text)
        .map(|(i, f)| (neg, i, f))
        .unwrap_or((neg, text, String::new()))
}

fn float_fixed(f: f64, precision: usize) -> (bool, String, String) {
    let factor = 10f64.powi(precision as i32);
    // f64::round rounds midpoints away from zero.
    let rounded = (f.abs() * factor).round() / factor;
    let neg = f.is_sign_negative() && rounded != 0.0;
    let text = format!("{:.prec$}", rounded, prec = precision);
    split_fixed(&text)
        .map(|(i, fr)| (neg, i, fr))
        .unwrap_or((neg, text, String::new()))
}

fn split_fixed(text: &str) -> Option<(String, String)> {
    text.split_once('.')
        .map(|(i, f)| (i.to_string(), f.to_string()))
}

fn zero_fraction(precision: usize) -> String {
    "0".repeat(precision)
}

fn assemble(neg: bool, symbol: Option<char>, integral: &str, fraction: &str) -> String {
    let mut out = String::with_capacity(integral.len() + fraction.len() + 3);
    if neg {
        out.push('-');
    }
    if let Some(sym) = symbol {
        out.push(sym);
    }
    out.push_str(integral);
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Insert a comma every three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Apply a date pattern to a date/time value.
///
/// Alphabetic runs are tokens (`yyyy`, `MM`, `dd`, `hh`, `tt`, ...); any
/// other character is copied through literally. An alphabetic run that is
/// not a known token is a formatting error.
fn format_datetime(dt: &NaiveDateTime, pattern: &str) -> Result<String, FormatError> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 4);
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_alphabetic() {
            let mut run = 1;
            while i + run < chars.len() && chars[i + run] == c {
                run += 1;
            }
            push_date_token(&mut out, dt, c, run)?;
            i += run;
        } else {
            out.push(c);
            i += 1;
        }
    }
    Ok(out)
}

fn push_date_token(
    out: &mut String,
    dt: &NaiveDateTime,
    token: char,
    run: usize,
) -> Result<(), FormatError> {
    match (token, run) {
        ('y', 4) => out.push_str(&format!("{:04}", dt.year())),
        ('y', 2) => out.push_str(&format!("{:02}", dt.year().rem_euclid(100))),
        ('M', 4) => out.push_str(MONTHS[dt.month0() as usize]),
        ('M', 3) => out.push_str(&MONTHS[dt.month0() as usize][..3]),
        ('M', 2) => out.push_str(&format!("{:02}", dt.month())),
        ('M', 1) => out.push_str(&dt.month().to_string()),
        ('d', 4) => out.push_str(WEEKDAYS[dt.weekday().num_days_from_monday() as usize]),
        ('d', 3) => out.push_str(&WEEKDAYS[dt.weekday().num_days_from_monday() as usize][..3]),
        ('d', 2) => out.push_str(&format!("{:02}", dt.day())),
        ('d', 1) => out.push_str(&dt.day().to_string()),
        ('H', 2) => out.push_str(&format!("{:02}", dt.hour())),
        ('H', 1) => out.push_str(&dt.hour().to_string()),
        ('h', 2) => out.push_str(&format!("{:02}", dt.hour12().1)),
        ('h', 1) => out.push_str(&dt.hour12().1.to_string()),
        ('m', 2) => out.push_str(&format!("{:02}", dt.minute())),
        ('m', 1) => out.push_str(&dt.minute().to_string()),
        ('s', 2) => out.push_str(&format!("{:02}", dt.second())),
        ('s', 1) => out.push_str(&dt.second().to_string()),
        ('t', 2) => out.push_str(if dt.hour12().0 { "PM" } else { "AM" }),
        _ => {
            return Err(FormatError::UnknownDateToken {
                token: token.to_string().repeat(run),
            })
        }
    }
    Ok(())
}
