//! FILENAME: core/xdata/src/lib.rs
//! Labeled N-dimensional data container.
//!
//! An `Xdata` is a numeric array whose every axis is described by a
//! `Header`. All mutations are copy-on-write and keep headers and array in
//! step.
//!
//! Layers:
//! - `header`: per-axis metadata (categorical tables, measure sampling)
//! - `table`: row storage behind categorical headers
//! - `array`: slice-level edits of the numeric array
//! - `xdata`: the container and its per-axis update protocol
//! - `dimensions`: whole-structure edits (insert, remove, permute axes)

pub mod logging;

pub mod array;
pub mod dimensions;
pub mod flags;
pub mod header;
pub mod indices;
pub mod table;
pub mod xdata;

pub use descriptor::{
    default_value, infer_type, Color, DimensionDescriptor, NoUnitBank, Result, UnitBank,
    UnitEntry, UnitSpec, Value, ValueType, XdataError, PLACEHOLDER_COLOR,
};
pub use dimensions::DimensionUpdate;
pub use flags::{DimensionFlag, UpdateFlag};
pub use header::{CategoricalHeader, ColumnSpec, Header, MeasureHeader, RowUpdate, NO_UNIT};
pub use table::{Row, RowTable};
pub use xdata::{AxisUpdate, Xdata};
