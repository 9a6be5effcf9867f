//! Per-field syntax and range checks for raw form input.
//!
//! Bad input never produces an `Err`: each field that fails to parse or is
//! out of range raises its own flag, and the remaining fields are still
//! checked.

use crate::axis::AxisConfig;
use crate::codec::{DecimalMinutes, FieldSet, HELD_DIGITS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MINUTES_MAX: u32 = 59;

/// The four raw strings a form submits for one axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFieldSet {
    pub degrees: String,
    pub minutes: String,
    pub decimal_minutes: String,
    pub hemisphere: String,
}

impl RawFieldSet {
    pub fn new(
        degrees: impl Into<String>,
        minutes: impl Into<String>,
        decimal_minutes: impl Into<String>,
        hemisphere: impl Into<String>,
    ) -> Self {
        Self {
            degrees: degrees.into(),
            minutes: minutes.into(),
            decimal_minutes: decimal_minutes.into(),
            hemisphere: hemisphere.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        [
            &self.degrees,
            &self.minutes,
            &self.decimal_minutes,
            &self.hemisphere,
        ]
        .iter()
        .all(|field| is_blank(field))
    }
}

pub(crate) fn is_blank(field: &str) -> bool {
    field.trim().is_empty()
}

/// A user-visible problem with one field.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    #[error("degrees are invalid")]
    Degrees,
    #[error("minutes are invalid")]
    Minutes,
    #[error("decimal minutes are invalid")]
    DecimalMinutes,
    #[error("hemisphere is invalid")]
    Hemisphere,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFlags {
    pub degrees_invalid: bool,
    pub minutes_invalid: bool,
    pub decimal_minutes_invalid: bool,
    pub hemisphere_invalid: bool,
}

impl ValidationFlags {
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    /// Raised flags as errors, in field order.
    pub fn errors(&self) -> impl Iterator<Item = FieldError> + use<> {
        [
            (self.degrees_invalid, FieldError::Degrees),
            (self.minutes_invalid, FieldError::Minutes),
            (self.decimal_minutes_invalid, FieldError::DecimalMinutes),
            (self.hemisphere_invalid, FieldError::Hemisphere),
        ]
        .into_iter()
        .filter_map(|(raised, error)| raised.then_some(error))
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors().map(|e| e.to_string()).collect()
    }
}

/// Whatever could be parsed; a field that failed is `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParsedFields {
    pub degrees: Option<u32>,
    pub minutes: Option<u32>,
    pub decimal_minutes: Option<DecimalMinutes>,
    pub hemisphere: Option<char>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validation {
    pub flags: ValidationFlags,
    pub fields: ParsedFields,
}

impl Validation {
    /// The complete field set, when no flag is raised.
    pub fn into_field_set(self) -> Option<FieldSet> {
        if !self.flags.is_valid() {
            return None;
        }
        let ParsedFields {
            degrees,
            minutes,
            decimal_minutes,
            hemisphere,
        } = self.fields;
        Some(FieldSet {
            degrees: degrees?,
            minutes: minutes?,
            decimal_minutes: decimal_minutes?,
            hemisphere: hemisphere?,
        })
    }
}

/// Checks all four raw fields for one axis.
pub fn validate(raw: &RawFieldSet, config: &AxisConfig) -> Validation {
    let mut flags = ValidationFlags::default();

    let degrees = parse_bounded(&raw.degrees, config.degree_max());
    flags.degrees_invalid = degrees.is_none();

    let minutes = parse_bounded(&raw.minutes, MINUTES_MAX);
    flags.minutes_invalid = minutes.is_none();

    let decimal_minutes = parse_decimal_minutes(&raw.decimal_minutes);
    flags.decimal_minutes_invalid = decimal_minutes.is_none();

    let hemisphere = parse_hemisphere(&raw.hemisphere, config);
    flags.hemisphere_invalid = hemisphere.is_none();

    // Nothing may exceed the bound once minutes are added on, e.g. 90°30′N.
    let mut degrees = degrees;
    if degrees == Some(config.degree_max())
        && (minutes.is_some_and(|m| m > 0)
            || (decimal_minutes.is_some() && has_nonzero_digit(&raw.decimal_minutes)))
    {
        flags.degrees_invalid = true;
        degrees = None;
    }

    Validation {
        flags,
        fields: ParsedFields {
            degrees,
            minutes,
            decimal_minutes,
            hemisphere,
        },
    }
}

/// The digits of an optionally signed integer. A minus sign is only
/// accepted in front of zero.
fn unsigned_digits(raw: &str) -> Option<&str> {
    let text = raw.trim();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if negative && digits.bytes().any(|b| b != b'0') {
        return None;
    }
    Some(digits)
}

/// Parses an integer field and checks `0..=max`.
fn parse_bounded(raw: &str, max: u32) -> Option<u32> {
    let value: u64 = unsigned_digits(raw)?.parse().ok()?;
    u32::try_from(value).ok().filter(|value| *value <= max)
}

/// Looks at every digit, including those past the held precision.
fn has_nonzero_digit(raw: &str) -> bool {
    unsigned_digits(raw).is_some_and(|digits| digits.bytes().any(|b| b != b'0'))
}

/// Any number of digits; the digit count becomes the width.
fn parse_decimal_minutes(raw: &str) -> Option<DecimalMinutes> {
    let digits = unsigned_digits(raw)?;
    let held = digits.len().min(HELD_DIGITS as usize);
    let value: u64 = digits[..held].parse().ok()?;
    Some(DecimalMinutes::new(value, digits.len() as u32))
}

fn parse_hemisphere(raw: &str, config: &AxisConfig) -> Option<char> {
    let mut chars = raw.trim().chars();
    let symbol = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    config
        .hemisphere_for(symbol)
        .map(|hemisphere| config.symbol(hemisphere))
}
