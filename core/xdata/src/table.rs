//! FILENAME: core/xdata/src/table.rs
//! PURPOSE: Row storage behind categorical headers.
//! CONTEXT: A `RowTable` is a dense list of rows of heterogeneous `Value`s,
//! all with the same number of columns. A table with zero columns still
//! counts its rows; that is how undifferentiated headers enumerate their
//! elements. Structural edits return new tables; the receiver is untouched.

use serde::{Deserialize, Serialize};

use descriptor::{check_index, Result, Value, XdataError};

use crate::indices::{check_distinct, check_in_range, check_permutation, kept_indices};

/// One element along a categorical axis: one value per column.
pub type Row = Vec<Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRowTable")]
pub struct RowTable {
    n_columns: usize,
    rows: Vec<Row>,
}

#[derive(Deserialize)]
struct RawRowTable {
    n_columns: usize,
    rows: Vec<Row>,
}

impl TryFrom<RawRowTable> for RowTable {
    type Error = XdataError;

    fn try_from(raw: RawRowTable) -> Result<Self> {
        RowTable::new(raw.n_columns, raw.rows)
    }
}

impl RowTable {
    /// Builds a table, checking that every row has `n_columns` values.
    pub fn new(n_columns: usize, rows: Vec<Row>) -> Result<Self> {
        let table = RowTable {
            n_columns,
            rows: Vec::new(),
        };
        table.check_rows(&rows)?;
        Ok(RowTable { n_columns, rows })
    }

    /// `n_rows` rows with no column at all.
    pub fn enumeration(n_rows: usize) -> Self {
        RowTable {
            n_columns: 0,
            rows: vec![Vec::new(); n_rows],
        }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.n_columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> Result<&[Value]> {
        check_index("row", row, self.rows.len())?;
        Ok(&self.rows[row])
    }

    pub fn cell(&self, row: usize, column: usize) -> Result<&Value> {
        check_index("row", row, self.rows.len())?;
        check_index("column", column, self.n_columns)?;
        Ok(&self.rows[row][column])
    }

    /// Values of one column, top to bottom.
    pub fn column(&self, column: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().filter_map(move |row| row.get(column))
    }

    /// Checks that candidate rows fit this table's column count.
    pub fn check_rows(&self, rows: &[Row]) -> Result<()> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != self.n_columns {
                return Err(XdataError::ShapeMismatch(format!(
                    "row {} has {} values but the table has {} columns",
                    i,
                    row.len(),
                    self.n_columns
                )));
            }
        }
        Ok(())
    }

    /// Overwrites the rows at `indices` with `rows` (parallel lists).
    pub fn with_rows_replaced(&self, indices: &[usize], rows: &[Row]) -> Result<Self> {
        if indices.len() != rows.len() {
            return Err(XdataError::ShapeMismatch(format!(
                "{} indices given for {} replacement rows",
                indices.len(),
                rows.len()
            )));
        }
        check_in_range("row", indices, self.rows.len())?;
        self.check_rows(rows)?;

        let mut table = self.clone();
        for (&index, row) in indices.iter().zip(rows) {
            table.rows[index] = row.clone();
        }
        Ok(table)
    }

    /// Appends rows at the end.
    pub fn with_rows_appended(&self, rows: &[Row]) -> Result<Self> {
        self.check_rows(rows)?;
        let mut table = self.clone();
        table.rows.extend(rows.iter().cloned());
        Ok(table)
    }

    /// Drops the rows at `indices`; the remaining rows keep their order.
    pub fn with_rows_removed(&self, indices: &[usize]) -> Result<Self> {
        check_distinct("row", indices, self.rows.len())?;
        let rows = kept_indices(self.rows.len(), indices)
            .into_iter()
            .map(|i| self.rows[i].clone())
            .collect();
        Ok(RowTable {
            n_columns: self.n_columns,
            rows,
        })
    }

    /// Row `i` of the result is row `order[i]` of this table.
    pub fn with_rows_reordered(&self, order: &[usize]) -> Result<Self> {
        check_permutation("row", order, self.rows.len())?;
        let rows = order.iter().map(|&i| self.rows[i].clone()).collect();
        Ok(RowTable {
            n_columns: self.n_columns,
            rows,
        })
    }

    /// Adds a column on the right.
    pub fn with_column(&self, values: &[Value]) -> Result<Self> {
        if values.len() != self.rows.len() {
            return Err(XdataError::ShapeMismatch(format!(
                "new column has {} values but the table has {} rows",
                values.len(),
                self.rows.len()
            )));
        }
        let rows = self
            .rows
            .iter()
            .zip(values)
            .map(|(row, value)| {
                let mut row = row.clone();
                row.push(value.clone());
                row
            })
            .collect();
        Ok(RowTable {
            n_columns: self.n_columns + 1,
            rows,
        })
    }
}
