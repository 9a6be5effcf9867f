//! Turns raw form fields into a stored coordinate.

use crate::axis::AxisConfig;
use crate::codec::{self, FieldSet};
use crate::validation::{self, RawFieldSet, ValidationFlags};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What gets persisted for one axis: the decimal value together with the
/// fields it was built from, so the decimal-minute width survives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredCoordinate {
    pub value: f64,
    pub fields: FieldSet,
}

impl StoredCoordinate {
    /// Wraps a decimal value loaded from storage, deriving display fields.
    pub fn from_degrees(config: &AxisConfig, value: f64, width: Option<u32>) -> Self {
        Self {
            value,
            fields: codec::encode(config, value, width),
        }
    }
}

/// Minutes and decimal minutes default to zero when left blank. Degrees and
/// hemisphere never do: leaving either blank is an error.
pub fn apply_defaults(raw: &RawFieldSet) -> RawFieldSet {
    let mut resolved = raw.clone();
    for field in [&mut resolved.minutes, &mut resolved.decimal_minutes] {
        if validation::is_blank(field) {
            *field = "0".to_string();
        }
    }
    resolved
}

/// Assembles one axis of an entity.
///
/// All-blank input leaves `target` alone and returns clean flags. Otherwise
/// blanks are defaulted, the fields are validated and, only if every field
/// passes, `target` is overwritten. A failed attempt never touches
/// `target`.
pub fn assemble(
    raw: &RawFieldSet,
    config: &AxisConfig,
    target: &mut Option<StoredCoordinate>,
) -> ValidationFlags {
    if raw.is_blank() {
        return ValidationFlags::default();
    }

    let resolved = apply_defaults(raw);
    let validation = validation::validate(&resolved, config);
    let flags = validation.flags;

    match validation.into_field_set() {
        Some(fields) => {
            *target = Some(StoredCoordinate {
                value: fields.to_degrees(config),
                fields,
            });
        }
        None => {
            debug!(
                axis = %config.axis(),
                errors = ?flags.messages(),
                "rejected coordinate fields"
            );
        }
    }

    flags
}
