//! FILENAME: core/descriptor/src/lib.rs
//! PURPOSE: Leaf types of the Xdata model.
//! CONTEXT: Values, colors, dimension descriptors with type inference, unit
//! conversion tables and the shared error type. The `xdata` crate builds
//! headers and the N-dimensional container on top of these.

pub mod descriptor;
pub mod error;
pub mod units;
pub mod value;

pub use descriptor::{default_value, infer_type, DimensionDescriptor, ValueType};
pub use error::{check_index, Result, XdataError};
pub use units::{NoUnitBank, UnitBank, UnitEntry, UnitSpec};
pub use value::{Color, Value, PLACEHOLDER_COLOR};
