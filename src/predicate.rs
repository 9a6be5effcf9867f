//! Backend-neutral boolean expressions over stored coordinate fields.
//!
//! A query adapter walks the tree and emits its own syntax; the `Display`
//! impl gives an SQL-like infix rendering for logs and the CLI.

use crate::axis::Axis;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A stored sub-field of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Degrees,
    Minutes,
    DecimalMinutes,
    Hemisphere,
}

impl Component {
    pub fn name(self) -> &'static str {
        match self {
            Component::Degrees => "degrees",
            Component::Minutes => "minutes",
            Component::DecimalMinutes => "decimal_minutes",
            Component::Hemisphere => "hemisphere",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    pub axis: Axis,
    pub component: Component,
}

impl Column {
    pub fn new(axis: Axis, component: Component) -> Self {
        Self { axis, component }
    }

    /// Conventional storage column, e.g. `latitude_degrees`.
    pub fn column_name(&self) -> String {
        format!("{}_{}", self.axis.name(), self.component.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
        }
    }

    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Lt => ordering == Ordering::Less,
            Operator::Le => ordering != Ordering::Greater,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Ge => ordering != Ordering::Less,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(u64),
    Symbol(char),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Symbol(c) => write!(f, "'{}'", c),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub column: Column,
    pub operator: Operator,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Compare(Comparison),
}

/// Anything that can report its stored field values, such as a database
/// row or an in-memory entity.
pub trait FieldSource {
    /// `None` when the axis has no stored coordinate.
    fn field(&self, column: Column) -> Option<Value>;
}

impl Predicate {
    pub fn compare(column: Column, operator: Operator, value: Value) -> Self {
        Predicate::Compare(Comparison {
            column,
            operator,
            value,
        })
    }

    /// Conjunction; nested conjunctions are flattened and a single term is
    /// returned as-is.
    pub fn and(terms: Vec<Predicate>) -> Self {
        Self::combine(terms, true)
    }

    /// Disjunction, flattened like [`Predicate::and`].
    pub fn or(terms: Vec<Predicate>) -> Self {
        Self::combine(terms, false)
    }

    fn combine(terms: Vec<Predicate>, conjunction: bool) -> Self {
        let mut flat = Vec::with_capacity(terms.len());
        for term in terms {
            match term {
                Predicate::And(inner) if conjunction => flat.extend(inner),
                Predicate::Or(inner) if !conjunction => flat.extend(inner),
                other => flat.push(other),
            }
        }

        if flat.len() == 1 {
            return flat.remove(0);
        }
        if conjunction {
            Predicate::And(flat)
        } else {
            Predicate::Or(flat)
        }
    }

    /// Evaluates the tree against one record. Comparisons on a missing field
    /// are false.
    pub fn matches<S: FieldSource + ?Sized>(&self, source: &S) -> bool {
        match self {
            Predicate::And(terms) => terms.iter().all(|t| t.matches(source)),
            Predicate::Or(terms) => terms.iter().any(|t| t.matches(source)),
            Predicate::Compare(cmp) => {
                let Some(actual) = source.field(cmp.column) else {
                    return false;
                };
                let ordering = match (actual, cmp.value) {
                    (Value::Integer(a), Value::Integer(b)) => a.cmp(&b),
                    (Value::Symbol(a), Value::Symbol(b)) => {
                        a.to_ascii_uppercase().cmp(&b.to_ascii_uppercase())
                    }
                    _ => return false,
                };
                cmp.operator.accepts(ordering)
            }
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.column.column_name(),
            self.operator.symbol(),
            self.value
        )
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (terms, joiner) = match self {
            Predicate::Compare(cmp) => return write!(f, "{}", cmp),
            Predicate::And(terms) => (terms, " AND "),
            Predicate::Or(terms) => (terms, " OR "),
        };

        for (i, term) in terms.iter().enumerate() {
            if i > 0 {
                f.write_str(joiner)?;
            }
            match term {
                Predicate::Compare(cmp) => write!(f, "{}", cmp)?,
                nested => write!(f, "({})", nested)?,
            }
        }
        Ok(())
    }
}
