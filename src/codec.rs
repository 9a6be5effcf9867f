//! Conversion between sexagesimal fields and signed decimal degrees.

use crate::axis::{AxisConfig, Hemisphere};
use serde::{Deserialize, Serialize};

/// Decimal-minute digits used for display when no width has been stored.
pub const DEFAULT_DISPLAY_WIDTH: u32 = 2;

/// Widest decimal-minute precision `encode` will produce.
pub const MAX_WIDTH: u32 = 9;

/// Most decimal-minute digits carried in `DecimalMinutes::value`. Input
/// digits past this only widen `width`; they are below `f64` precision.
pub const HELD_DIGITS: u32 = 19;

/// Fractional minutes as a numerator over `10^width`.
///
/// `05` and `5` are different values (5/100 and 5/10), so the width travels
/// with the digits instead of being inferred from the number. Widths above
/// [`HELD_DIGITS`] keep only the leading digits in `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecimalMinutes {
    pub value: u64,
    pub width: u32,
}

impl DecimalMinutes {
    pub const ZERO: DecimalMinutes = DecimalMinutes { value: 0, width: 1 };

    pub fn new(value: u64, width: u32) -> Self {
        Self { value, width }
    }

    /// Digits of the input that `value` actually holds.
    pub fn held_width(&self) -> u32 {
        self.width.min(HELD_DIGITS)
    }

    /// The fraction of a minute these digits stand for.
    pub fn fraction(&self) -> f64 {
        self.value as f64 / 10f64.powi(self.held_width() as i32)
    }

    /// The digits zero-padded to `width`, e.g. `05` for 5 at width 2.
    pub fn digits(&self) -> String {
        let held = self.held_width() as usize;
        let dropped = self.width as usize - held;
        format!("{:0held$}{}", self.value, "0".repeat(dropped))
    }
}

/// One coordinate decomposed into its sexagesimal fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldSet {
    pub degrees: u32,
    pub minutes: u32,
    pub decimal_minutes: DecimalMinutes,
    /// Uppercase hemisphere symbol.
    pub hemisphere: char,
}

impl FieldSet {
    pub fn to_degrees(&self, config: &AxisConfig) -> f64 {
        decode(
            config,
            Some(self.degrees),
            Some(self.minutes),
            Some(self.decimal_minutes),
            self.hemisphere,
        )
        .unwrap_or(0.0)
    }
}

/// Assembles a signed decimal-degree value from its fields.
///
/// Returns `None` only when degrees, minutes and decimal minutes are all
/// absent; otherwise absent parts count as zero. The result is negated when
/// `hemisphere` is the axis' negative symbol.
pub fn decode(
    config: &AxisConfig,
    degrees: Option<u32>,
    minutes: Option<u32>,
    decimal_minutes: Option<DecimalMinutes>,
    hemisphere: char,
) -> Option<f64> {
    if degrees.is_none() && minutes.is_none() && decimal_minutes.is_none() {
        return None;
    }

    let degrees = f64::from(degrees.unwrap_or(0));
    let minutes = f64::from(minutes.unwrap_or(0));
    let fraction = decimal_minutes.map(|d| d.fraction()).unwrap_or(0.0);

    let magnitude = degrees + (minutes + fraction) / 60.0;
    match config.hemisphere_for(hemisphere) {
        Some(Hemisphere::Negative) => Some(-magnitude),
        _ => Some(magnitude),
    }
}

/// Splits a decimal-degree value into fields for display.
///
/// The value is rounded once, at the last decimal-minute digit, and any
/// overflow carries into minutes and degrees (so 59.9999′ at width 2 shows
/// as the next whole degree rather than `60′`). `width` falls back to
/// [`DEFAULT_DISPLAY_WIDTH`] and is clamped to `1..=MAX_WIDTH`. Zero takes
/// the positive hemisphere symbol.
pub fn encode(config: &AxisConfig, value: f64, width: Option<u32>) -> FieldSet {
    let width = width
        .unwrap_or(DEFAULT_DISPLAY_WIDTH)
        .clamp(1, MAX_WIDTH);
    let scale = 10u64.pow(width);

    let units = (value.abs() * 60.0 * scale as f64).round() as u64;
    let whole_minutes = units / scale;

    FieldSet {
        degrees: (whole_minutes / 60) as u32,
        minutes: (whole_minutes % 60) as u32,
        decimal_minutes: DecimalMinutes::new(units % scale, width),
        hemisphere: config.symbol(Hemisphere::of(value)),
    }
}
