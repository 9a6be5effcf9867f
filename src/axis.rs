//! Axis configuration: degree bounds, render widths and hemisphere symbols.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Misconfigured axis. Raised when an [`AxisConfig`] is built, never while
/// validating user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("hemisphere symbol {0:?} must be a single ASCII letter")]
    InvalidSymbol(char),
    #[error("hemisphere symbols {0:?} and {1:?} are not distinct")]
    DuplicateSymbols(char, char),
    #[error("degree bound {0} must be between 1 and 180")]
    InvalidDegreeMax(u32),
    #[error("expected a {expected} configuration, got {found}")]
    AxisMismatch { expected: Axis, found: Axis },
}

/// A stored decimal-degree value outside its axis range.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    #[error("{value} is not a {axis}")]
    OutOfRange { axis: Axis, value: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::Latitude, Axis::Longitude];

    pub fn name(self) -> &'static str {
        match self {
            Axis::Latitude => "latitude",
            Axis::Longitude => "longitude",
        }
    }

    /// Number of digits degrees are zero-padded to when rendered.
    pub fn degree_width(self) -> usize {
        match self {
            Axis::Latitude => 2,
            Axis::Longitude => 3,
        }
    }

    /// The built-in configuration for this axis.
    pub fn config(self) -> AxisConfig {
        match self {
            Axis::Latitude => AxisConfig::latitude(),
            Axis::Longitude => AxisConfig::longitude(),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which side of the zero line a hemisphere symbol stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    Positive,
    Negative,
}

impl Hemisphere {
    pub fn of(value: f64) -> Self {
        if value < 0.0 {
            Hemisphere::Negative
        } else {
            Hemisphere::Positive
        }
    }
}

/// Per-axis rules handed to validation and assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisConfig {
    axis: Axis,
    degree_max: u32,
    positive: char,
    negative: char,
}

impl AxisConfig {
    pub const fn latitude() -> Self {
        Self {
            axis: Axis::Latitude,
            degree_max: 90,
            positive: 'N',
            negative: 'S',
        }
    }

    pub const fn longitude() -> Self {
        Self {
            axis: Axis::Longitude,
            degree_max: 180,
            positive: 'E',
            negative: 'W',
        }
    }

    /// Builds a custom configuration, e.g. localized hemisphere letters.
    ///
    /// Symbols are stored uppercase. Fails on anything that would make
    /// per-record validation ambiguous.
    pub fn new(
        axis: Axis,
        degree_max: u32,
        positive: char,
        negative: char,
    ) -> Result<Self, ConfigError> {
        if degree_max == 0 || degree_max > 180 {
            return Err(ConfigError::InvalidDegreeMax(degree_max));
        }
        for symbol in [positive, negative] {
            if !symbol.is_ascii_alphabetic() {
                return Err(ConfigError::InvalidSymbol(symbol));
            }
        }
        if positive.eq_ignore_ascii_case(&negative) {
            return Err(ConfigError::DuplicateSymbols(positive, negative));
        }

        Ok(Self {
            axis,
            degree_max,
            positive: positive.to_ascii_uppercase(),
            negative: negative.to_ascii_uppercase(),
        })
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn degree_max(&self) -> u32 {
        self.degree_max
    }

    pub fn symbols(&self) -> [char; 2] {
        [self.positive, self.negative]
    }

    pub fn symbol(&self, hemisphere: Hemisphere) -> char {
        match hemisphere {
            Hemisphere::Positive => self.positive,
            Hemisphere::Negative => self.negative,
        }
    }

    /// Case-insensitive lookup of a hemisphere symbol.
    pub fn hemisphere_for(&self, symbol: char) -> Option<Hemisphere> {
        if symbol.eq_ignore_ascii_case(&self.positive) {
            Some(Hemisphere::Positive)
        } else if symbol.eq_ignore_ascii_case(&self.negative) {
            Some(Hemisphere::Negative)
        } else {
            None
        }
    }

    /// Checks a stored decimal value against the axis range.
    pub fn check_range(&self, value: f64) -> Result<f64, CoordinateError> {
        let max = f64::from(self.degree_max);
        if value.is_finite() && (-max..=max).contains(&value) {
            Ok(value)
        } else {
            Err(CoordinateError::OutOfRange {
                axis: self.axis,
                value,
            })
        }
    }
}
