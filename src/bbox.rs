//! Bounding-box planning: a lat/lon rectangle becomes comparisons on the
//! stored degree, minute and hemisphere columns, accurate to the minute.
//!
//! Stored fields hold magnitudes, so a box corner is split the same way:
//! `deg = floor(|v|)`, `min = round(frac * 60)`. Each axis is planned on its
//! own and the two results are conjoined.

use crate::axis::{Axis, AxisConfig, Hemisphere};
use crate::predicate::{Column, Component, Operator, Predicate, Value};
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub sw_lat: f64,
    pub sw_lng: f64,
    pub ne_lat: f64,
    pub ne_lng: f64,
}

impl BoundingBox {
    pub fn new(sw_lat: f64, sw_lng: f64, ne_lat: f64, ne_lng: f64) -> Self {
        Self {
            sw_lat,
            sw_lng,
            ne_lat,
            ne_lng,
        }
    }

    pub fn plan(&self) -> Predicate {
        plan_with(
            self,
            &AxisConfig::latitude(),
            &AxisConfig::longitude(),
        )
    }
}

/// Degree/minute magnitude of a box corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bound {
    pub degrees: u64,
    pub minutes: u64,
}

impl Bound {
    pub fn of(value: f64) -> Self {
        let magnitude = value.abs();
        let mut degrees = magnitude.floor() as u64;
        let mut minutes = ((magnitude - magnitude.floor()) * 60.0).round() as u64;
        if minutes >= 60 {
            degrees += 1;
            minutes -= 60;
        }
        Self { degrees, minutes }
    }
}

/// Plans the box `(sw_lat, sw_lng)`–`(ne_lat, ne_lng)` with the built-in
/// axis configurations. South-west must not exceed north-east on either
/// axis; that is not checked.
pub fn plan(sw_lat: f64, sw_lng: f64, ne_lat: f64, ne_lng: f64) -> Predicate {
    BoundingBox::new(sw_lat, sw_lng, ne_lat, ne_lng).plan()
}

/// Like [`plan`] but with caller-supplied hemisphere symbols.
pub fn plan_with(bbox: &BoundingBox, latitude: &AxisConfig, longitude: &AxisConfig) -> Predicate {
    let predicate = Predicate::and(vec![
        plan_axis(latitude, bbox.sw_lat, bbox.ne_lat),
        plan_axis(longitude, bbox.sw_lng, bbox.ne_lng),
    ]);
    trace!(?bbox, %predicate, "planned bounding box");
    predicate
}

/// Predicate for `low <= coordinate <= high` on one axis.
pub fn plan_axis(config: &AxisConfig, low: f64, high: f64) -> Predicate {
    let axis = config.axis();
    let positive = config.symbol(Hemisphere::Positive);
    let negative = config.symbol(Hemisphere::Negative);

    if low > 0.0 {
        Predicate::and(vec![
            hemisphere_is(axis, positive),
            at_least(axis, Bound::of(low)),
            at_most(axis, Bound::of(high)),
        ])
    } else if high < 0.0 {
        // Further from zero means more negative, so the bounds swap.
        Predicate::and(vec![
            hemisphere_is(axis, negative),
            at_least(axis, Bound::of(high)),
            at_most(axis, Bound::of(low)),
        ])
    } else {
        Predicate::or(vec![
            Predicate::and(vec![
                hemisphere_is(axis, negative),
                at_most(axis, Bound::of(low)),
            ]),
            Predicate::and(vec![
                hemisphere_is(axis, positive),
                at_most(axis, Bound::of(high)),
            ]),
        ])
    }
}

fn column(axis: Axis, component: Component) -> Column {
    Column::new(axis, component)
}

fn hemisphere_is(axis: Axis, symbol: char) -> Predicate {
    Predicate::compare(
        column(axis, Component::Hemisphere),
        Operator::Eq,
        Value::Symbol(symbol),
    )
}

/// `degrees > d OR (degrees = d AND minutes >= m)`
fn at_least(axis: Axis, bound: Bound) -> Predicate {
    magnitude_bound(axis, bound, Operator::Gt, Operator::Ge)
}

/// `degrees < d OR (degrees = d AND minutes <= m)`
fn at_most(axis: Axis, bound: Bound) -> Predicate {
    magnitude_bound(axis, bound, Operator::Lt, Operator::Le)
}

fn magnitude_bound(axis: Axis, bound: Bound, strict: Operator, inclusive: Operator) -> Predicate {
    let degrees = column(axis, Component::Degrees);
    let minutes = column(axis, Component::Minutes);
    Predicate::or(vec![
        Predicate::compare(degrees, strict, Value::Integer(bound.degrees)),
        Predicate::and(vec![
            Predicate::compare(degrees, Operator::Eq, Value::Integer(bound.degrees)),
            Predicate::compare(minutes, inclusive, Value::Integer(bound.minutes)),
        ]),
    ])
}
