//! Coordinates kept as sexagesimal form fields (degrees, minutes, decimal
//! minutes, hemisphere) with conversion to signed decimal degrees,
//! per-field validation and bounding-box query planning.

pub mod assembler;
pub mod axis;
pub mod bbox;
pub mod codec;
pub mod location;
pub mod predicate;
pub mod render;
pub mod validation;

pub use assembler::{StoredCoordinate, assemble};
pub use axis::{Axis, AxisConfig, ConfigError, CoordinateError, Hemisphere};
pub use bbox::{BoundingBox, plan};
pub use codec::{DecimalMinutes, FieldSet, decode, encode};
pub use location::{ErrorSink, FieldErrorRecord, Location, LocationFlags};
pub use predicate::{Column, Comparison, Component, FieldSource, Operator, Predicate, Value};
pub use validation::{FieldError, RawFieldSet, ValidationFlags, validate};
