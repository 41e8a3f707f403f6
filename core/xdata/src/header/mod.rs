//! FILENAME: core/xdata/src/header/mod.rs
//! PURPOSE: Per-axis metadata: the `Header` enum and its shared accessors.
//! CONTEXT: An axis is either categorical (a table of elements, possibly
//! without any column) or a measure (regular sampling). Shared operations
//! are plain matches over the two variants.

pub mod categorical;
pub mod measure;

use std::fmt;

use serde::{Deserialize, Serialize};

use descriptor::{DimensionDescriptor, Result, UnitEntry, Value, XdataError};

pub use categorical::{CategoricalHeader, ColumnSpec, RowUpdate};
pub use measure::MeasureHeader;

use crate::flags::UpdateFlag;
use crate::log_warn;

/// Placeholder reported by `get_units` for a column without unit.
pub const NO_UNIT: &str = "no unit";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Header {
    Categorical(CategoricalHeader),
    Measure(MeasureHeader),
}

impl From<CategoricalHeader> for Header {
    fn from(header: CategoricalHeader) -> Self {
        Header::Categorical(header)
    }
}

impl From<MeasureHeader> for Header {
    fn from(header: MeasureHeader) -> Self {
        Header::Measure(header)
    }
}

impl Header {
    pub fn label(&self) -> &str {
        match self {
            Header::Categorical(h) => h.label(),
            Header::Measure(h) => h.label(),
        }
    }

    /// Column descriptors; empty for an undifferentiated header, a single
    /// entry for a measure header.
    pub fn column_descriptors(&self) -> &[DimensionDescriptor] {
        match self {
            Header::Categorical(h) => h.column_descriptors().unwrap_or(&[]),
            Header::Measure(h) => std::slice::from_ref(h.descriptor()),
        }
    }

    pub fn n_elem(&self) -> usize {
        match self {
            Header::Categorical(h) => h.n_elem(),
            Header::Measure(h) => h.n_elem(),
        }
    }

    pub fn get_n_columns(&self) -> usize {
        match self {
            Header::Categorical(h) => h.get_n_columns(),
            Header::Measure(_) => 1,
        }
    }

    pub fn is_categorical(&self) -> bool {
        matches!(self, Header::Categorical(_))
    }

    pub fn is_measure(&self) -> bool {
        matches!(self, Header::Measure(_))
    }

    pub fn is_undifferentiated(&self) -> bool {
        matches!(self, Header::Categorical(h) if h.is_undifferentiated())
    }

    pub fn is_categorical_with_values(&self) -> bool {
        matches!(self, Header::Categorical(h) if !h.is_undifferentiated())
    }

    /// Reference unit of every column, `NO_UNIT` where there is none.
    pub fn get_units(&self) -> Vec<String> {
        self.column_descriptors()
            .iter()
            .map(|d| d.unit().unwrap_or(NO_UNIT).to_string())
            .collect()
    }

    /// Conversion table of every column, `None` where there is no unit.
    pub fn get_all_units(&self) -> Vec<Option<Vec<UnitEntry>>> {
        self.column_descriptors()
            .iter()
            .map(|d| d.unit_table().map(<[UnitEntry]>::to_vec))
            .collect()
    }

    pub fn get_value(&self, row: usize, column: usize) -> Result<Value> {
        match self {
            Header::Categorical(h) => h.get_value(row, column),
            Header::Measure(h) => h.get_value(row, column).map(Value::Number),
        }
    }

    pub fn get_value_by_label(&self, row: usize, column: &str) -> Result<Value> {
        match self {
            Header::Categorical(h) => h.get_value_by_label(row, column),
            Header::Measure(h) if h.label() == column => h.get_value(row, 0).map(Value::Number),
            Header::Measure(h) => Err(XdataError::InvalidArgumentType(format!(
                "measure header '{}' has no column '{}'",
                h.label(),
                column
            ))),
        }
    }

    /// First-column value of `row`.
    pub fn get_item_name(&self, row: usize) -> Result<Value> {
        self.get_value(row, 0)
    }

    pub fn get_item_names(&self, rows: &[usize]) -> Result<Vec<Value>> {
        rows.iter().map(|&row| self.get_item_name(row)).collect()
    }

    /// Checks that `candidate` is an acceptable replacement for this header
    /// under `flag`.
    ///
    /// `indices` holds the index lists of the request: `[changed]` for `Chg`,
    /// `[added]` for `New`, `[removed]` for `Remove`, `[order]` for `Perm`,
    /// and `[changed, added]` / `[changed, removed]` for the composite flags.
    /// Only the lengths of the lists matter here.
    pub fn check_header_update(
        &self,
        flag: UpdateFlag,
        indices: &[Vec<usize>],
        candidate: &Header,
    ) -> Result<()> {
        if flag == UpdateFlag::DimChg {
            return Ok(());
        }
        if matches!(flag, UpdateFlag::All | UpdateFlag::DataChg) {
            return Err(XdataError::UnknownFlag(format!(
                "'{}' is not a header update flag",
                flag
            )));
        }

        if self.is_categorical() != candidate.is_categorical() {
            return Err(violation(self, "both headers must be of the same kind"));
        }
        if self.label() != candidate.label() {
            return Err(violation(
                self,
                &format!("label changed to '{}'", candidate.label()),
            ));
        }

        let old = self.column_descriptors();
        let new = candidate.column_descriptors();
        let preserved =
            new.len() >= old.len() && old.iter().zip(new).all(|(o, n)| o.is_preserved_by(n));
        if !preserved {
            return Err(violation(self, "column descriptors are not preserved"));
        }

        let n = self.n_elem();
        let group = |k: usize| -> Result<usize> {
            indices.get(k).map(Vec::len).ok_or_else(|| {
                XdataError::InvalidArgumentType(format!(
                    "'{}' needs {} index list(s), got {}",
                    flag,
                    k + 1,
                    indices.len()
                ))
            })
        };
        let expected = match flag {
            UpdateFlag::Chg | UpdateFlag::Perm => Some(n),
            UpdateFlag::New => Some(n + group(0)?),
            UpdateFlag::Remove => n.checked_sub(group(0)?),
            UpdateFlag::ChgNew => Some(n + group(1)?),
            UpdateFlag::ChgRm => n.checked_sub(group(1)?),
            UpdateFlag::All | UpdateFlag::DataChg | UpdateFlag::DimChg => Some(n),
        };

        if expected != Some(candidate.n_elem()) {
            log_warn!(
                "HEADER",
                "'{}' {}: candidate has {} elements, old header {}",
                self.label(),
                flag,
                candidate.n_elem(),
                n
            );
            return Err(XdataError::ShapeMismatch(format!(
                "header '{}' after '{}' should have {} elements, got {}",
                self.label(),
                flag,
                expected.map_or_else(|| "a negative number of".to_string(), |e| e.to_string()),
                candidate.n_elem()
            )));
        }
        Ok(())
    }
}

fn violation(header: &Header, message: &str) -> XdataError {
    log_warn!("HEADER", "'{}' rejected update: {}", header.label(), message);
    XdataError::InvariantViolation(format!("header '{}': {}", header.label(), message))
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Header::Categorical(h) => fmt::Display::fmt(h, f),
            Header::Measure(h) => fmt::Display::fmt(h, f),
        }
    }
}
