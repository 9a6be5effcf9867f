//! Text rendering of coordinate fields.
//!
//! Degrees pad to the axis width (2 for latitude, 3 for longitude), minutes
//! to 2, decimal minutes to their stored width. The joined form is
//! `DD°MM.dd′H, DDD°MM.dd′H`.

use crate::axis::Axis;
use crate::codec::FieldSet;
use crate::validation::RawFieldSet;
use serde::Serialize;

pub const DEGREE_SIGN: char = '\u{00B0}';
pub const PRIME: char = '\u{2032}';

/// Field values ready to drop into a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayFields {
    pub degrees: String,
    pub minutes: String,
    pub decimal_minutes: String,
    pub hemisphere: String,
}

impl DisplayFields {
    pub fn from_fields(axis: Axis, fields: &FieldSet) -> Self {
        Self {
            degrees: format!("{:0width$}", fields.degrees, width = axis.degree_width()),
            minutes: format!("{:02}", fields.minutes),
            decimal_minutes: fields.decimal_minutes.digits(),
            hemisphere: fields.hemisphere.to_string(),
        }
    }

    /// Redisplays what the user typed. Blank minutes and decimal minutes
    /// show as zero because that is how assembly reads them; a blank degree
    /// stays blank.
    pub fn from_raw(axis: Axis, raw: &RawFieldSet) -> Self {
        let degrees = raw.degrees.trim();
        let minutes = raw.minutes.trim();
        let decimal_minutes = raw.decimal_minutes.trim();
        Self {
            degrees: if degrees.is_empty() {
                String::new()
            } else {
                format!("{:0>width$}", degrees, width = axis.degree_width())
            },
            minutes: if minutes.is_empty() {
                "00".to_string()
            } else {
                format!("{:0>2}", minutes)
            },
            decimal_minutes: if decimal_minutes.is_empty() {
                "0".to_string()
            } else {
                decimal_minutes.to_string()
            },
            hemisphere: raw.hemisphere.trim().to_uppercase(),
        }
    }
}

/// `42°57.35′N`
pub fn format_axis(axis: Axis, fields: &FieldSet) -> String {
    let display = DisplayFields::from_fields(axis, fields);
    format!(
        "{}{}{}.{}{}{}",
        display.degrees,
        DEGREE_SIGN,
        display.minutes,
        display.decimal_minutes,
        PRIME,
        display.hemisphere
    )
}

/// `42°57.35′N, 153°22.27′E`; a missing axis renders empty.
pub fn format_location(latitude: Option<&FieldSet>, longitude: Option<&FieldSet>) -> String {
    let lat = latitude
        .map(|f| format_axis(Axis::Latitude, f))
        .unwrap_or_default();
    let lng = longitude
        .map(|f| format_axis(Axis::Longitude, f))
        .unwrap_or_default();
    format!("{}, {}", lat, lng)
}
