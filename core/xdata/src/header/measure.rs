//! FILENAME: core/xdata/src/header/measure.rs
//! PURPOSE: Header of a regularly sampled axis (start, scale, n_elem).
//! CONTEXT: Element `i` has the value `start + i * scale`. The single
//! implicit column is described by a numeric descriptor carrying the label
//! and the unit table of the axis.

use std::fmt;

use serde::{Deserialize, Serialize};

use descriptor::{
    check_index, DimensionDescriptor, Result, UnitBank, UnitEntry, UnitSpec, ValueType, XdataError,
};

use crate::log_debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMeasureHeader")]
pub struct MeasureHeader {
    label: String,
    start: f64,
    n_elem: usize,
    scale: f64,
    descriptor: DimensionDescriptor,
}

#[derive(Deserialize)]
struct RawMeasureHeader {
    label: String,
    start: f64,
    n_elem: usize,
    scale: f64,
    descriptor: DimensionDescriptor,
}

impl TryFrom<RawMeasureHeader> for MeasureHeader {
    type Error = XdataError;

    fn try_from(raw: RawMeasureHeader) -> Result<Self> {
        MeasureHeader::with_descriptor(raw.label, raw.start, raw.n_elem, raw.scale, raw.descriptor)
    }
}

impl MeasureHeader {
    pub fn new(
        label: impl Into<String>,
        start: f64,
        n_elem: usize,
        scale: f64,
        unit: Option<UnitSpec>,
    ) -> Result<Self> {
        let label = label.into();
        let descriptor = DimensionDescriptor::new(label.clone(), ValueType::Numeric, unit)?;
        Ok(MeasureHeader {
            label,
            start,
            n_elem,
            scale,
            descriptor,
        })
    }

    /// Builds the header around an existing descriptor, which must be numeric
    /// and carry the header's label.
    pub fn with_descriptor(
        label: impl Into<String>,
        start: f64,
        n_elem: usize,
        scale: f64,
        descriptor: DimensionDescriptor,
    ) -> Result<Self> {
        let label = label.into();
        if descriptor.label() != label {
            return Err(XdataError::InvariantViolation(format!(
                "measure header '{}' cannot use the descriptor of '{}'",
                label,
                descriptor.label()
            )));
        }
        if descriptor.value_type() != ValueType::Numeric {
            return Err(XdataError::InvalidArgumentType(format!(
                "measure header '{}' needs a numeric descriptor, got {}",
                label,
                descriptor.value_type()
            )));
        }
        Ok(MeasureHeader {
            label,
            start,
            n_elem,
            scale,
            descriptor,
        })
    }

    /// Like `new`, but completes the unit with the conversion table the bank
    /// knows for it. Without a match the unit stands alone.
    pub fn with_bank(
        label: impl Into<String>,
        start: f64,
        n_elem: usize,
        scale: f64,
        unit: &str,
        bank: &dyn UnitBank,
    ) -> Result<Self> {
        let spec = match bank.lookup(unit) {
            Some(entries) => {
                log_debug!("HEADER", "unit '{}' found in bank ({} entries)", unit, entries.len());
                UnitSpec::from_entries(&entries)
            }
            None => UnitSpec::Single(unit.to_string()),
        };
        Self::new(label, start, n_elem, scale, Some(spec))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn n_elem(&self) -> usize {
        self.n_elem
    }

    pub fn descriptor(&self) -> &DimensionDescriptor {
        &self.descriptor
    }

    /// Reference unit of the axis.
    pub fn unit(&self) -> Option<&str> {
        self.descriptor.unit()
    }

    pub fn unit_table(&self) -> Option<&[UnitEntry]> {
        self.descriptor.unit_table()
    }

    pub fn get_value(&self, row: usize, column: usize) -> Result<f64> {
        if column != 0 {
            return Err(XdataError::IndexOutOfRange {
                what: "column",
                index: column,
                len: 1,
            });
        }
        check_index("row", row, self.n_elem)?;
        Ok(self.start + row as f64 * self.scale)
    }

    /// New header with the given fields replaced; the descriptor is kept.
    pub fn update_measure_header(
        &self,
        start: Option<f64>,
        n_elem: Option<usize>,
        scale: Option<f64>,
    ) -> MeasureHeader {
        MeasureHeader {
            label: self.label.clone(),
            start: start.unwrap_or(self.start),
            n_elem: n_elem.unwrap_or(self.n_elem),
            scale: scale.unwrap_or(self.scale),
            descriptor: self.descriptor.clone(),
        }
    }
}

impl fmt::Display for MeasureHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MeasureHeader: {}", self.label)?;
        writeln!(f, "unit: {}", self.unit().unwrap_or(super::NO_UNIT))?;
        writeln!(f, "start: {}", self.start)?;
        writeln!(f, "scale: {}", self.scale)?;
        write!(f, "n_elem: {}", self.n_elem)
    }
}
