//! FILENAME: core/descriptor/src/descriptor.rs
//! PURPOSE: Describes one axis or one header column: label, value type, units.
//! CONTEXT: `DimensionDescriptor` is the leaf of the data model. Headers keep
//! one per column, Xdata keeps one for the array content. The value type is
//! inferred from the data and can only ever be widened to `Mixed`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, XdataError};
use crate::units::{UnitEntry, UnitSpec};
use crate::value::{Value, PLACEHOLDER_COLOR};

/// Semantic type of the values along a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Numeric,
    Logical,
    String,
    Color,
    Mixed,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Numeric => "numeric",
            ValueType::Logical => "logical",
            ValueType::String => "string",
            ValueType::Color => "color",
            ValueType::Mixed => "mixed",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = XdataError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "numeric" => Ok(ValueType::Numeric),
            "logical" => Ok(ValueType::Logical),
            "string" => Ok(ValueType::String),
            "color" => Ok(ValueType::Color),
            "mixed" => Ok(ValueType::Mixed),
            other => Err(XdataError::UnknownType(other.to_string())),
        }
    }
}

/// Gives the value type of a single value.
pub fn infer_type(value: &Value) -> ValueType {
    match value {
        Value::Logical(_) => ValueType::Logical,
        Value::Text(_) => ValueType::String,
        Value::Number(_) => ValueType::Numeric,
        Value::Color(_) => ValueType::Color,
        Value::List(_) | Value::Empty => ValueType::Mixed,
    }
}

/// Default value used to fill a cell of the given type.
pub fn default_value(value_type: ValueType) -> Value {
    match value_type {
        ValueType::Numeric => Value::Number(0.0),
        ValueType::Logical => Value::Logical(false),
        ValueType::String => Value::Text(String::new()),
        ValueType::Color => Value::Color(PLACEHOLDER_COLOR),
        ValueType::Mixed => Value::Empty,
    }
}

/// Label, value type and optional unit table of one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDescriptor")]
pub struct DimensionDescriptor {
    label: String,
    value_type: ValueType,
    unit: Option<String>,
    unit_table: Option<Vec<UnitEntry>>,
}

impl DimensionDescriptor {
    /// Creates a descriptor. Only numeric descriptors may carry a unit.
    pub fn new(
        label: impl Into<String>,
        value_type: ValueType,
        unit: Option<UnitSpec>,
    ) -> Result<Self> {
        let label = label.into();
        let (unit, unit_table) = match unit {
            None => (None, None),
            Some(_) if value_type != ValueType::Numeric => {
                return Err(XdataError::InvalidArgumentType(format!(
                    "only numeric descriptors can have a unit ('{}' is {})",
                    label, value_type
                )))
            }
            Some(spec) => {
                let (reference, table) = spec.resolve()?;
                (Some(reference), Some(table))
            }
        };
        Ok(DimensionDescriptor {
            label,
            value_type,
            unit,
            unit_table,
        })
    }

    /// Unit-less descriptor of the given type.
    pub fn without_unit(label: impl Into<String>, value_type: ValueType) -> Self {
        DimensionDescriptor {
            label: label.into(),
            value_type,
            unit: None,
            unit_table: None,
        }
    }

    /// Infers the type of a column: the type of its first value, promoted to
    /// `Mixed` as soon as another value disagrees. An empty column is `Mixed`.
    pub fn infer<'a>(
        label: impl Into<String>,
        column: impl IntoIterator<Item = &'a Value>,
    ) -> Self {
        let mut values = column.into_iter();
        let value_type = match values.next() {
            None => ValueType::Mixed,
            Some(first) => {
                let first_type = infer_type(first);
                if values.all(|v| infer_type(v) == first_type) {
                    first_type
                } else {
                    ValueType::Mixed
                }
            }
        };
        Self::without_unit(label, value_type)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// Conversion table sorted by ascending factor.
    pub fn unit_table(&self) -> Option<&[UnitEntry]> {
        self.unit_table.as_deref()
    }

    pub fn is_mixed(&self) -> bool {
        self.value_type == ValueType::Mixed
    }

    /// Widens the type to `Mixed`. There is no way back.
    pub fn set_to_mixed(&mut self) {
        self.value_type = ValueType::Mixed;
    }

    /// Copy of this descriptor widened to `Mixed`.
    pub fn widened(&self) -> Self {
        let mut copy = self.clone();
        copy.set_to_mixed();
        copy
    }

    /// True when `value` may be stored in a column described by `self`.
    pub fn matches(&self, value: &Value) -> bool {
        self.is_mixed() || infer_type(value) == self.value_type
    }

    /// True when `other` describes the same dimension, allowing only the
    /// one-way widening of the value type to `Mixed`.
    pub fn is_preserved_by(&self, other: &DimensionDescriptor) -> bool {
        self.label == other.label
            && self.unit == other.unit
            && self.unit_table == other.unit_table
            && (self.value_type == other.value_type || other.is_mixed())
    }
}

/// Wire form of a descriptor, checked by `DimensionDescriptor::new`.
#[derive(Deserialize)]
struct RawDescriptor {
    label: String,
    value_type: ValueType,
    unit: Option<String>,
    unit_table: Option<Vec<UnitEntry>>,
}

impl TryFrom<RawDescriptor> for DimensionDescriptor {
    type Error = XdataError;

    fn try_from(raw: RawDescriptor) -> Result<Self> {
        let spec = match (&raw.unit, &raw.unit_table) {
            (None, None) => None,
            (Some(_), Some(table)) => Some(UnitSpec::from_entries(table)),
            _ => {
                return Err(XdataError::InvariantViolation(format!(
                    "'{}' must have both a unit and a unit table, or neither",
                    raw.label
                )))
            }
        };
        let descriptor = DimensionDescriptor::new(raw.label, raw.value_type, spec)?;
        if descriptor.unit != raw.unit {
            return Err(XdataError::InvariantViolation(format!(
                "unit of '{}' is not the reference of its table",
                descriptor.label
            )));
        }
        Ok(descriptor)
    }
}

impl fmt::Display for DimensionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.unit {
            Some(unit) => write!(f, "{} ({}, {})", self.label, self.value_type, unit),
            None => write!(f, "{} ({})", self.label, self.value_type),
        }
    }
}
