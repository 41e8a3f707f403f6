//! FILENAME: core/xdata/src/header/categorical.rs
//! PURPOSE: Header of a categorical axis (a list of elements with features).
//! CONTEXT: Each element along the axis is one row of a `RowTable`; each
//! feature is a column described by a `DimensionDescriptor`. With zero
//! columns the header is "undifferentiated" and only enumerates its
//! elements. Every edit returns a new header. Column types are never a
//! reason to reject an edit: a column receiving a value of another type is
//! widened to `Mixed` in the returned header.

use std::fmt;

use serde::{Deserialize, Serialize};

use descriptor::{
    check_index, infer_type, Color, DimensionDescriptor, Result, Value, ValueType, XdataError,
};

use crate::flags::UpdateFlag;
use crate::indices::check_in_range;
use crate::table::{Row, RowTable};
use crate::{log_debug, log_info, log_warn};

/// A column given either by label (type inferred from the values) or by an
/// explicit descriptor (values must already match it).
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSpec {
    Label(String),
    Descriptor(DimensionDescriptor),
}

impl From<&str> for ColumnSpec {
    fn from(label: &str) -> Self {
        ColumnSpec::Label(label.to_string())
    }
}

impl From<String> for ColumnSpec {
    fn from(label: String) -> Self {
        ColumnSpec::Label(label)
    }
}

impl From<DimensionDescriptor> for ColumnSpec {
    fn from(descriptor: DimensionDescriptor) -> Self {
        ColumnSpec::Descriptor(descriptor)
    }
}

/// Edit of the row table of a categorical header.
#[derive(Debug, Clone, PartialEq)]
pub enum RowUpdate {
    /// Replace the whole table (same number of columns).
    All(Vec<Row>),
    /// Append rows.
    New(Vec<Row>),
    /// Overwrite the rows at `indices`.
    Chg { indices: Vec<usize>, rows: Vec<Row> },
    /// Drop the rows at the given indices.
    Remove(Vec<usize>),
    /// Reorder: row `i` of the result is row `order[i]`.
    Perm(Vec<usize>),
    /// `Chg`, then append `added`.
    ChgNew {
        indices: Vec<usize>,
        rows: Vec<Row>,
        added: Vec<Row>,
    },
    /// `Chg`, then drop `removed` (indices in the original numbering).
    ChgRm {
        indices: Vec<usize>,
        rows: Vec<Row>,
        removed: Vec<usize>,
    },
}

impl RowUpdate {
    pub fn flag(&self) -> UpdateFlag {
        match self {
            RowUpdate::All(_) => UpdateFlag::All,
            RowUpdate::New(_) => UpdateFlag::New,
            RowUpdate::Chg { .. } => UpdateFlag::Chg,
            RowUpdate::Remove(_) => UpdateFlag::Remove,
            RowUpdate::Perm(_) => UpdateFlag::Perm,
            RowUpdate::ChgNew { .. } => UpdateFlag::ChgNew,
            RowUpdate::ChgRm { .. } => UpdateFlag::ChgRm,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCategoricalHeader")]
pub struct CategoricalHeader {
    label: String,
    column_descriptors: Vec<DimensionDescriptor>,
    rows: RowTable,
}

#[derive(Deserialize)]
struct RawCategoricalHeader {
    label: String,
    column_descriptors: Vec<DimensionDescriptor>,
    rows: RowTable,
}

impl TryFrom<RawCategoricalHeader> for CategoricalHeader {
    type Error = XdataError;

    /// Goes through `new`, so the descriptor count must equal the table
    /// width and every cell must match its column.
    fn try_from(raw: RawCategoricalHeader) -> Result<Self> {
        let rows = raw.rows.rows().to_vec();
        CategoricalHeader::new(raw.label, raw.column_descriptors, Some(raw.rows.n_rows()), rows)
    }
}

impl CategoricalHeader {
    /// Builds a header from a row table.
    ///
    /// `n_elem`, when given, must agree with the number of rows. Columns given
    /// by label get their type inferred; explicit descriptors must match every
    /// existing cell of their column.
    pub fn new<C: Into<ColumnSpec>>(
        label: impl Into<String>,
        columns: impl IntoIterator<Item = C>,
        n_elem: Option<usize>,
        rows: Vec<Row>,
    ) -> Result<Self> {
        let label = label.into();
        let columns: Vec<ColumnSpec> = columns.into_iter().map(Into::into).collect();
        let table = RowTable::new(columns.len(), rows)?;

        if let Some(n) = n_elem {
            if n != table.n_rows() {
                return Err(XdataError::ShapeMismatch(format!(
                    "n_elem is {} but {} rows were given",
                    n,
                    table.n_rows()
                )));
            }
        }

        let mut column_descriptors = Vec::with_capacity(columns.len());
        for (j, spec) in columns.into_iter().enumerate() {
            let descriptor = match spec {
                ColumnSpec::Label(name) => DimensionDescriptor::infer(name, table.column(j)),
                ColumnSpec::Descriptor(d) => {
                    check_column_matches(&d, table.column(j))?;
                    d
                }
            };
            column_descriptors.push(descriptor);
        }

        Ok(CategoricalHeader {
            label,
            column_descriptors,
            rows: table,
        })
    }

    /// Header without columns enumerating `n_elem` elements.
    pub fn undifferentiated(label: impl Into<String>, n_elem: usize) -> Self {
        CategoricalHeader {
            label: label.into(),
            column_descriptors: Vec::new(),
            rows: RowTable::enumeration(n_elem),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Column descriptors; `None` for an undifferentiated header.
    pub fn column_descriptors(&self) -> Option<&[DimensionDescriptor]> {
        if self.column_descriptors.is_empty() {
            None
        } else {
            Some(&self.column_descriptors)
        }
    }

    pub fn n_elem(&self) -> usize {
        self.rows.n_rows()
    }

    pub fn get_n_columns(&self) -> usize {
        self.column_descriptors.len()
    }

    pub fn rows(&self) -> &RowTable {
        &self.rows
    }

    pub fn is_undifferentiated(&self) -> bool {
        self.column_descriptors.is_empty()
    }

    /// Value at (`row`, `column`). An undifferentiated header answers column 0
    /// with the row number itself.
    pub fn get_value(&self, row: usize, column: usize) -> Result<Value> {
        check_index("row", row, self.n_elem())?;
        if column == 0 && self.is_undifferentiated() {
            return Ok(Value::Number(row as f64));
        }
        self.rows.cell(row, column).cloned()
    }

    /// Value at `row` in the column labelled `column`.
    pub fn get_value_by_label(&self, row: usize, column: &str) -> Result<Value> {
        let position = self
            .column_descriptors
            .iter()
            .position(|d| d.label() == column)
            .ok_or_else(|| {
                XdataError::InvalidArgumentType(format!(
                    "header '{}' has no column '{}'",
                    self.label, column
                ))
            })?;
        self.get_value(row, position)
    }

    // ========================================================================
    // ROW TABLE EDITS
    // ========================================================================

    /// Applies a row edit and returns the resulting header.
    pub fn update(&self, request: RowUpdate) -> Result<CategoricalHeader> {
        log_debug!("HEADER", "'{}' update flag={}", self.label, request.flag());
        let (rows, incoming): (RowTable, Vec<&Row>) = match &request {
            RowUpdate::All(new_rows) => {
                if let Some(bad) = new_rows.iter().find(|r| r.len() != self.get_n_columns()) {
                    log_warn!(
                        "HEADER",
                        "'{}' all: row of {} values rejected",
                        self.label,
                        bad.len()
                    );
                    return Err(XdataError::ShapeMismatch(format!(
                        "replacement rows must keep {} columns, got a row of {}",
                        self.get_n_columns(),
                        bad.len()
                    )));
                }
                let table = RowTable::new(self.get_n_columns(), new_rows.clone())?;
                (table, new_rows.iter().collect())
            }
            RowUpdate::New(new_rows) => {
                (self.rows.with_rows_appended(new_rows)?, new_rows.iter().collect())
            }
            RowUpdate::Chg { indices, rows } => {
                (self.rows.with_rows_replaced(indices, rows)?, rows.iter().collect())
            }
            RowUpdate::Remove(indices) => (self.rows.with_rows_removed(indices)?, Vec::new()),
            RowUpdate::Perm(order) => (self.rows.with_rows_reordered(order)?, Vec::new()),
            RowUpdate::ChgNew {
                indices,
                rows,
                added,
            } => {
                let table = self
                    .rows
                    .with_rows_replaced(indices, rows)?
                    .with_rows_appended(added)?;
                (table, rows.iter().chain(added).collect())
            }
            RowUpdate::ChgRm {
                indices,
                rows,
                removed,
            } => {
                // Validate removals against the original numbering first
                check_in_range("row", removed, self.n_elem())?;
                let table = self
                    .rows
                    .with_rows_replaced(indices, rows)?
                    .with_rows_removed(removed)?;
                (table, rows.iter().collect())
            }
        };

        let column_descriptors = self.widened_for(&incoming);
        Ok(CategoricalHeader {
            label: self.label.clone(),
            column_descriptors,
            rows,
        })
    }

    /// Copies of the descriptors, widened to `Mixed` wherever an incoming
    /// row holds a value of another type.
    fn widened_for(&self, incoming: &[&Row]) -> Vec<DimensionDescriptor> {
        self.column_descriptors
            .iter()
            .enumerate()
            .map(|(j, d)| {
                let mismatch = incoming
                    .iter()
                    .filter_map(|row| row.get(j))
                    .find(|value| !d.matches(value));
                match mismatch {
                    Some(value) => {
                        log_info!(
                            "HEADER",
                            "'{}' column '{}' widened from {} to mixed by a {} value",
                            self.label,
                            d.label(),
                            d.value_type(),
                            infer_type(value)
                        );
                        d.widened()
                    }
                    None => d.clone(),
                }
            })
            .collect()
    }

    /// Returns a header with one more column.
    ///
    /// A label gets its type inferred from `values`; an explicit descriptor
    /// must already match every value.
    pub fn add_column(
        &self,
        column: impl Into<ColumnSpec>,
        values: Vec<Value>,
    ) -> Result<CategoricalHeader> {
        if values.len() != self.n_elem() {
            return Err(XdataError::ShapeMismatch(format!(
                "new column has {} values but header '{}' has {} elements",
                values.len(),
                self.label,
                self.n_elem()
            )));
        }
        let descriptor = match column.into() {
            ColumnSpec::Label(name) => DimensionDescriptor::infer(name, &values),
            ColumnSpec::Descriptor(d) => {
                check_column_matches(&d, &values)?;
                d
            }
        };
        let rows = self.rows.with_column(&values)?;
        let mut column_descriptors = self.column_descriptors.clone();
        column_descriptors.push(descriptor);
        Ok(CategoricalHeader {
            label: self.label.clone(),
            column_descriptors,
            rows,
        })
    }

    /// Builds the row that stands for the merge of the rows at `indices`.
    ///
    /// Each column yields the list of its distinct values in first-seen order,
    /// except color columns, which yield the average color. The header itself
    /// is not modified.
    pub fn merge_lines(&self, indices: &[usize]) -> Result<Row> {
        if indices.is_empty() {
            return Err(XdataError::InvalidArgumentType(
                "at least one row is needed to merge".to_string(),
            ));
        }
        check_in_range("row", indices, self.n_elem())?;

        let mut merged = Vec::with_capacity(self.get_n_columns());
        for (j, descriptor) in self.column_descriptors.iter().enumerate() {
            let mut distinct: Vec<Value> = Vec::new();
            for &i in indices {
                let value = &self.rows.rows()[i][j];
                if !distinct.contains(value) {
                    distinct.push(value.clone());
                }
            }

            let cell = if descriptor.value_type() == ValueType::Color {
                let colors: Vec<Color> =
                    distinct.iter().filter_map(|v| v.as_color().copied()).collect();
                match Color::average(&colors) {
                    Some(average) => Value::Color(average),
                    None => Value::List(distinct),
                }
            } else {
                Value::List(distinct)
            };
            merged.push(cell);
        }
        Ok(merged)
    }
}

fn check_column_matches<'a>(
    descriptor: &DimensionDescriptor,
    values: impl IntoIterator<Item = &'a Value>,
) -> Result<()> {
    if let Some(value) = values.into_iter().find(|v| !descriptor.matches(v)) {
        return Err(XdataError::InvalidArgumentType(format!(
            "column '{}' is declared {} but holds a {} value ({})",
            descriptor.label(),
            descriptor.value_type(),
            infer_type(value),
            value
        )));
    }
    Ok(())
}

impl fmt::Display for CategoricalHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CategoricalHeader: {}", self.label)?;
        writeln!(f, "columns:")?;
        for descriptor in &self.column_descriptors {
            writeln!(f, "  {}", descriptor)?;
        }
        write!(f, "n_elem: {}", self.n_elem())
    }
}
