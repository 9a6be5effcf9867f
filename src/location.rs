//! A located entity: one optional coordinate per axis plus the raw form
//! input it was (or will be) assembled from.
//!
//! Saving is two-phase: call [`Location::assemble`], check the returned
//! flags, and only persist when they are clean.

use crate::assembler::{self, StoredCoordinate};
use crate::axis::{Axis, AxisConfig, ConfigError, CoordinateError};
use crate::codec::FieldSet;
use crate::predicate::{Column, Component, FieldSource, Value};
use crate::render::{self, DisplayFields};
use crate::validation::{FieldError, RawFieldSet, ValidationFlags};
use serde::Serialize;
use std::fmt;

/// One user-visible error, keyed by the attribute it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FieldErrorRecord {
    pub attribute: Axis,
    pub error: FieldError,
}

impl fmt::Display for FieldErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.attribute, self.error)
    }
}

/// Where a host framework collects validation errors.
pub trait ErrorSink {
    fn add(&mut self, attribute: Axis, error: FieldError);
}

impl ErrorSink for Vec<FieldErrorRecord> {
    fn add(&mut self, attribute: Axis, error: FieldError) {
        self.push(FieldErrorRecord { attribute, error });
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LocationFlags {
    pub latitude: ValidationFlags,
    pub longitude: ValidationFlags,
}

impl LocationFlags {
    pub fn for_axis(&self, axis: Axis) -> &ValidationFlags {
        match axis {
            Axis::Latitude => &self.latitude,
            Axis::Longitude => &self.longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_valid() && self.longitude.is_valid()
    }

    /// Writes one record per raised flag, latitude first.
    pub fn report<S: ErrorSink + ?Sized>(&self, sink: &mut S) {
        for axis in Axis::ALL {
            for error in self.for_axis(axis).errors() {
                sink.add(axis, error);
            }
        }
    }

    pub fn records(&self) -> Vec<FieldErrorRecord> {
        let mut records = Vec::new();
        self.report(&mut records);
        records
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    latitude: Option<StoredCoordinate>,
    longitude: Option<StoredCoordinate>,
    latitude_input: RawFieldSet,
    longitude_input: RawFieldSet,
    latitude_config: AxisConfig,
    longitude_config: AxisConfig,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            latitude: None,
            longitude: None,
            latitude_input: RawFieldSet::default(),
            longitude_input: RawFieldSet::default(),
            latitude_config: AxisConfig::latitude(),
            longitude_config: AxisConfig::longitude(),
        }
    }
}

impl Location {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses custom axis configurations. Each must be for the matching axis.
    pub fn with_configs(latitude: AxisConfig, longitude: AxisConfig) -> Result<Self, ConfigError> {
        for (expected, config) in [(Axis::Latitude, latitude), (Axis::Longitude, longitude)] {
            if config.axis() != expected {
                return Err(ConfigError::AxisMismatch {
                    expected,
                    found: config.axis(),
                });
            }
        }
        Ok(Self {
            latitude_config: latitude,
            longitude_config: longitude,
            ..Self::default()
        })
    }

    /// Loads stored decimal values. `width` is the decimal-minute width used
    /// for display.
    pub fn from_degrees(
        latitude: Option<f64>,
        longitude: Option<f64>,
        width: Option<u32>,
    ) -> Result<Self, CoordinateError> {
        let mut location = Self::new();
        for (axis, value) in [(Axis::Latitude, latitude), (Axis::Longitude, longitude)] {
            if let Some(value) = value {
                let config = *location.config(axis);
                let value = config.check_range(value)?;
                *location.slot_mut(axis) =
                    Some(StoredCoordinate::from_degrees(&config, value, width));
            }
        }
        Ok(location)
    }

    pub fn config(&self, axis: Axis) -> &AxisConfig {
        match axis {
            Axis::Latitude => &self.latitude_config,
            Axis::Longitude => &self.longitude_config,
        }
    }

    fn slot(&self, axis: Axis) -> &Option<StoredCoordinate> {
        match axis {
            Axis::Latitude => &self.latitude,
            Axis::Longitude => &self.longitude,
        }
    }

    fn slot_mut(&mut self, axis: Axis) -> &mut Option<StoredCoordinate> {
        match axis {
            Axis::Latitude => &mut self.latitude,
            Axis::Longitude => &mut self.longitude,
        }
    }

    pub fn input(&self, axis: Axis) -> &RawFieldSet {
        match axis {
            Axis::Latitude => &self.latitude_input,
            Axis::Longitude => &self.longitude_input,
        }
    }

    pub fn set_input(&mut self, axis: Axis, raw: RawFieldSet) {
        match axis {
            Axis::Latitude => self.latitude_input = raw,
            Axis::Longitude => self.longitude_input = raw,
        }
    }

    /// Assembles both axes from their raw input. Each axis is
    /// all-or-nothing on its own.
    pub fn assemble(&mut self) -> LocationFlags {
        let latitude = assembler::assemble(
            &self.latitude_input,
            &self.latitude_config,
            &mut self.latitude,
        );
        let longitude = assembler::assemble(
            &self.longitude_input,
            &self.longitude_config,
            &mut self.longitude,
        );
        LocationFlags {
            latitude,
            longitude,
        }
    }

    pub fn coordinate(&self, axis: Axis) -> Option<f64> {
        self.slot(axis).map(|stored| stored.value)
    }

    pub fn latitude(&self) -> Option<f64> {
        self.coordinate(Axis::Latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.coordinate(Axis::Longitude)
    }

    pub fn stored(&self, axis: Axis) -> Option<&StoredCoordinate> {
        self.slot(axis).as_ref()
    }

    pub fn fields(&self, axis: Axis) -> Option<&FieldSet> {
        self.stored(axis).map(|stored| &stored.fields)
    }

    /// Values for redisplaying a form: the user's own input when there is
    /// any, otherwise the stored coordinate's fields.
    pub fn display_fields(&self, axis: Axis) -> Option<DisplayFields> {
        let raw = self.input(axis);
        if !raw.is_blank() {
            return Some(DisplayFields::from_raw(axis, raw));
        }
        self.fields(axis)
            .map(|fields| DisplayFields::from_fields(axis, fields))
    }
}

impl FieldSource for Location {
    fn field(&self, column: Column) -> Option<Value> {
        let fields = self.fields(column.axis)?;
        Some(match column.component {
            Component::Degrees => Value::Integer(u64::from(fields.degrees)),
            Component::Minutes => Value::Integer(u64::from(fields.minutes)),
            Component::DecimalMinutes => Value::Integer(fields.decimal_minutes.value),
            Component::Hemisphere => Value::Symbol(fields.hemisphere),
        })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render::format_location(
            self.fields(Axis::Latitude),
            self.fields(Axis::Longitude),
        ))
    }
}
