//! FILENAME: core/xdata/src/dimensions.rs
//! PURPOSE: Whole-structure edits: replacing, inserting, removing and
//! reordering axes.
//! CONTEXT: Each branch builds the new header list and array, then goes
//! through `Xdata::assemble`, which re-checks every axis.

use ndarray::ArrayD;

use descriptor::{Result, UnitSpec, XdataError};

use crate::array;
use crate::flags::DimensionFlag;
use crate::header::Header;
use crate::indices::{check_distinct, check_permutation, kept_indices};
use crate::xdata::Xdata;
use crate::{log_enter, log_exit, log_warn};

#[derive(Debug, Clone, PartialEq)]
pub enum DimensionUpdate {
    /// Rebuild everything.
    Global {
        name: String,
        data: ArrayD<f64>,
        headers: Vec<Header>,
        unit: Option<UnitSpec>,
    },
    /// Replace the headers at `axes` (parallel to `headers`).
    DimChg {
        axes: Vec<usize>,
        data: ArrayD<f64>,
        headers: Vec<Header>,
    },
    /// Insert `headers[k]` at position `axes[k]`, one after the other.
    DimInsert {
        axes: Vec<usize>,
        data: ArrayD<f64>,
        headers: Vec<Header>,
    },
    /// Drop the headers at `axes`.
    DimRm { axes: Vec<usize>, data: ArrayD<f64> },
    /// Axis `i` of the result is axis `order[i]`. Missing parts are derived
    /// by permuting the current ones.
    DimPerm {
        order: Vec<usize>,
        data: Option<ArrayD<f64>>,
        headers: Option<Vec<Header>>,
    },
}

impl DimensionUpdate {
    pub fn flag(&self) -> DimensionFlag {
        match self {
            DimensionUpdate::Global { .. } => DimensionFlag::Global,
            DimensionUpdate::DimChg { .. } => DimensionFlag::DimChg,
            DimensionUpdate::DimInsert { .. } => DimensionFlag::DimInsert,
            DimensionUpdate::DimRm { .. } => DimensionFlag::DimRm,
            DimensionUpdate::DimPerm { .. } => DimensionFlag::DimPerm,
        }
    }
}

impl Xdata {
    pub fn modify_dimensions(&self, request: DimensionUpdate) -> Result<(Xdata, DimensionFlag)> {
        let flag = request.flag();
        log_enter!("XDATA", "modify_dimensions", "'{}' flag={}", self.name(), flag);
        let result = self.restructure(request);
        match &result {
            Ok(xdata) => log_exit!("XDATA", "modify_dimensions", "shape={:?}", xdata.shape()),
            Err(e) => log_warn!("XDATA", "'{}' {} rejected: {}", self.name(), flag, e),
        }
        result.map(|xdata| (xdata, flag))
    }

    fn restructure(&self, request: DimensionUpdate) -> Result<Xdata> {
        let rank = self.n_dimensions();
        match request {
            DimensionUpdate::Global {
                name,
                data,
                headers,
                unit,
            } => Xdata::new(name, data, headers, unit),

            DimensionUpdate::DimChg {
                axes,
                data,
                headers: replacements,
            } => {
                check_parallel(&axes, replacements.len())?;
                check_distinct("axis", &axes, rank)?;
                let mut headers = self.headers().to_vec();
                for (&axis, header) in axes.iter().zip(replacements) {
                    headers[axis] = header;
                }
                self.rebuild(data, headers)
            }

            DimensionUpdate::DimInsert {
                axes,
                data,
                headers: inserted,
            } => {
                check_parallel(&axes, inserted.len())?;
                let mut headers = self.headers().to_vec();
                for (&axis, header) in axes.iter().zip(inserted) {
                    if axis > headers.len() {
                        return Err(XdataError::IndexOutOfRange {
                            what: "axis",
                            index: axis,
                            len: headers.len() + 1,
                        });
                    }
                    headers.insert(axis, header);
                }
                self.rebuild(data, headers)
            }

            DimensionUpdate::DimRm { axes, data } => {
                check_distinct("axis", &axes, rank)?;
                let headers = kept_indices(rank, &axes)
                    .into_iter()
                    .map(|axis| self.headers()[axis].clone())
                    .collect();
                self.rebuild(data, headers)
            }

            DimensionUpdate::DimPerm {
                order,
                data,
                headers,
            } => {
                check_permutation("axis", &order, rank)?;
                let headers = match headers {
                    Some(headers) => headers,
                    None => order.iter().map(|&axis| self.headers()[axis].clone()).collect(),
                };
                let data = match data {
                    Some(data) => data,
                    None => array::with_axes_permuted(self.data(), &order)?,
                };
                self.rebuild(data, headers)
            }
        }
    }

    fn rebuild(&self, data: ArrayD<f64>, headers: Vec<Header>) -> Result<Xdata> {
        Xdata::assemble(
            self.name().to_string(),
            data,
            headers,
            self.data_descriptor().clone(),
        )
    }
}

fn check_parallel(axes: &[usize], n_headers: usize) -> Result<()> {
    if axes.len() != n_headers {
        return Err(XdataError::ShapeMismatch(format!(
            "{} axes given for {} headers",
            axes.len(),
            n_headers
        )));
    }
    Ok(())
}
