//! FILENAME: core/xdata/src/xdata.rs
//! PURPOSE: The labeled N-dimensional container and its per-axis updates.
//! CONTEXT: An `Xdata` pairs a numeric array with one header per axis and
//! keeps `headers[i].n_elem() == data.shape()[i]` for every axis. Updates
//! return a new value; the receiver is never written, even when the
//! request is rejected.

use std::fmt;

use ndarray::ArrayD;

use descriptor::{check_index, DimensionDescriptor, Result, UnitSpec, ValueType, XdataError};

use crate::array;
use crate::flags::UpdateFlag;
use crate::header::{CategoricalHeader, Header};
use crate::indices::check_distinct;
use crate::{log_enter, log_exit, log_warn};

#[derive(Debug, Clone, PartialEq)]
pub struct Xdata {
    name: String,
    data: ArrayD<f64>,
    headers: Vec<Header>,
    data_descriptor: DimensionDescriptor,
}

/// Edit of one axis, applied jointly to the array and the axis header.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisUpdate {
    /// New array and header; only this axis may change extent.
    All { data: ArrayD<f64>, header: Header },
    /// New array of identical shape; the header, if given, must be unchanged.
    DataChg {
        data: ArrayD<f64>,
        header: Option<Header>,
    },
    /// Overwrite the slices at `indices`.
    Chg {
        indices: Vec<usize>,
        slices: Vec<ArrayD<f64>>,
        header: Header,
    },
    /// Append slices.
    New {
        slices: Vec<ArrayD<f64>>,
        header: Header,
    },
    /// Drop the slices at `indices`.
    Remove { indices: Vec<usize>, header: Header },
    /// Overwrite `changed` at `indices`, then append `added`.
    ChgNew {
        indices: Vec<usize>,
        changed: Vec<ArrayD<f64>>,
        added: Vec<ArrayD<f64>>,
        header: Header,
    },
    /// Overwrite `slices` at `indices`, then drop `removed`.
    ChgRm {
        indices: Vec<usize>,
        slices: Vec<ArrayD<f64>>,
        removed: Vec<usize>,
        header: Header,
    },
    /// Slice `i` of the result is slice `order[i]`.
    Perm { order: Vec<usize>, header: Header },
}

impl AxisUpdate {
    pub fn flag(&self) -> UpdateFlag {
        match self {
            AxisUpdate::All { .. } => UpdateFlag::All,
            AxisUpdate::DataChg { .. } => UpdateFlag::DataChg,
            AxisUpdate::Chg { .. } => UpdateFlag::Chg,
            AxisUpdate::New { .. } => UpdateFlag::New,
            AxisUpdate::Remove { .. } => UpdateFlag::Remove,
            AxisUpdate::ChgNew { .. } => UpdateFlag::ChgNew,
            AxisUpdate::ChgRm { .. } => UpdateFlag::ChgRm,
            AxisUpdate::Perm { .. } => UpdateFlag::Perm,
        }
    }
}

impl Xdata {
    pub fn new(
        name: impl Into<String>,
        data: ArrayD<f64>,
        headers: Vec<Header>,
        unit: Option<UnitSpec>,
    ) -> Result<Self> {
        let name = name.into();
        let data_descriptor = DimensionDescriptor::new(name.clone(), ValueType::Numeric, unit)?;
        Self::assemble(name, data, headers, data_descriptor)
    }

    /// The single validating entry point every construction goes through.
    pub(crate) fn assemble(
        name: String,
        data: ArrayD<f64>,
        headers: Vec<Header>,
        data_descriptor: DimensionDescriptor,
    ) -> Result<Self> {
        if headers.len() != data.ndim() {
            return Err(XdataError::ShapeMismatch(format!(
                "'{}' has {} dimensions but {} headers",
                name,
                data.ndim(),
                headers.len()
            )));
        }
        for (axis, (header, &extent)) in headers.iter().zip(data.shape()).enumerate() {
            if header.n_elem() != extent {
                return Err(XdataError::ShapeMismatch(format!(
                    "axis {} of '{}' has {} elements but header '{}' has {}",
                    axis,
                    name,
                    extent,
                    header.label(),
                    header.n_elem()
                )));
            }
        }
        Ok(Xdata {
            name,
            data,
            headers,
            data_descriptor,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn header(&self, axis: usize) -> Result<&Header> {
        check_index("axis", axis, self.headers.len())?;
        Ok(&self.headers[axis])
    }

    pub fn data_descriptor(&self) -> &DimensionDescriptor {
        &self.data_descriptor
    }

    pub fn n_dimensions(&self) -> usize {
        self.headers.len()
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    // ========================================================================
    // PER-AXIS UPDATES
    // ========================================================================

    /// Applies `request` to `axis` and returns the new container with the
    /// effective flag (`All` degrades to `DataChg` when the header is
    /// unchanged).
    pub fn update(&self, axis: usize, request: AxisUpdate) -> Result<(Xdata, UpdateFlag)> {
        log_enter!("XDATA", "update", "'{}' axis={} flag={}", self.name, axis, request.flag());
        let result = self.apply(axis, request);
        match &result {
            Ok((xdata, flag)) => {
                log_exit!("XDATA", "update", "flag={} shape={:?}", flag, xdata.shape())
            }
            Err(e) => log_warn!("XDATA", "'{}' axis {} update rejected: {}", self.name, axis, e),
        }
        result
    }

    fn apply(&self, axis: usize, request: AxisUpdate) -> Result<(Xdata, UpdateFlag)> {
        let old = self.header(axis)?;
        let n = old.n_elem();

        let (data, header, flag) = match request {
            AxisUpdate::All { data, header } => {
                self.check_full_replacement(axis, &data, &header)?;
                let flag = if &header == old {
                    UpdateFlag::DataChg
                } else {
                    UpdateFlag::All
                };
                (data, header, flag)
            }
            AxisUpdate::DataChg { data, header } => {
                if header.as_ref().map_or(false, |h| h != old) {
                    return Err(XdataError::InvariantViolation(
                        "'data_chg' cannot change the header".to_string(),
                    ));
                }
                if data.shape() != self.shape() {
                    return Err(XdataError::ShapeMismatch(format!(
                        "'data_chg' needs shape {:?}, got {:?}",
                        self.shape(),
                        data.shape()
                    )));
                }
                (data, old.clone(), UpdateFlag::DataChg)
            }
            AxisUpdate::Chg {
                indices,
                slices,
                header,
            } => {
                check_axis_header(old, UpdateFlag::Chg, &[indices.clone()], &header)?;
                let data = array::with_slices_replaced(&self.data, axis, &indices, &slices)?;
                (data, header, UpdateFlag::Chg)
            }
            AxisUpdate::New { slices, header } => {
                let added: Vec<usize> = (n..n + slices.len()).collect();
                check_axis_header(old, UpdateFlag::New, &[added], &header)?;
                let data = array::with_slices_appended(&self.data, axis, &slices)?;
                (data, header, UpdateFlag::New)
            }
            AxisUpdate::Remove { indices, header } => {
                check_distinct("slice", &indices, n)?;
                check_axis_header(old, UpdateFlag::Remove, &[indices.clone()], &header)?;
                let data = array::with_indices_removed(&self.data, axis, &indices)?;
                (data, header, UpdateFlag::Remove)
            }
            AxisUpdate::ChgNew {
                indices,
                changed,
                added,
                header,
            } => {
                let positions: Vec<usize> = (n..n + added.len()).collect();
                check_axis_header(old, UpdateFlag::ChgNew, &[indices.clone(), positions], &header)?;
                array::check_slices(&self.data, axis, &added)?;
                let data = array::with_slices_replaced(&self.data, axis, &indices, &changed)?;
                let data = array::with_slices_appended(&data, axis, &added)?;
                (data, header, UpdateFlag::ChgNew)
            }
            AxisUpdate::ChgRm {
                indices,
                slices,
                removed,
                header,
            } => {
                check_distinct("slice", &removed, n)?;
                check_axis_header(
                    old,
                    UpdateFlag::ChgRm,
                    &[indices.clone(), removed.clone()],
                    &header,
                )?;
                let data = array::with_slices_replaced(&self.data, axis, &indices, &slices)?;
                let data = array::with_indices_removed(&data, axis, &removed)?;
                (data, header, UpdateFlag::ChgRm)
            }
            AxisUpdate::Perm { order, header } => {
                check_axis_header(old, UpdateFlag::Perm, &[order.clone()], &header)?;
                let data = array::with_axis_reordered(&self.data, axis, &order)?;
                (data, header, UpdateFlag::Perm)
            }
        };

        let mut headers = self.headers.clone();
        headers[axis] = header;
        let xdata = Self::assemble(self.name.clone(), data, headers, self.data_descriptor.clone())?;
        Ok((xdata, flag))
    }

    fn check_full_replacement(
        &self,
        axis: usize,
        data: &ArrayD<f64>,
        header: &Header,
    ) -> Result<()> {
        let old = &self.headers[axis];
        if data.ndim() != self.n_dimensions() {
            return Err(XdataError::ShapeMismatch(format!(
                "'all' needs a {}-dimensional array, got {}",
                self.n_dimensions(),
                data.ndim()
            )));
        }
        for (i, (&new_extent, &old_extent)) in data.shape().iter().zip(self.shape()).enumerate() {
            if i == axis {
                if new_extent != header.n_elem() {
                    return Err(XdataError::ShapeMismatch(format!(
                        "axis {} has {} elements but the new header has {}",
                        axis,
                        new_extent,
                        header.n_elem()
                    )));
                }
            } else if new_extent != old_extent {
                return Err(XdataError::ShapeMismatch(format!(
                    "'all' on axis {} cannot resize axis {} ({} -> {})",
                    axis, i, old_extent, new_extent
                )));
            }
        }
        if header.label() != old.label() {
            return Err(XdataError::InvariantViolation(format!(
                "'all' cannot rename header '{}' to '{}'",
                old.label(),
                header.label()
            )));
        }
        let unit_changed = !header.is_measure() || header.get_all_units() != old.get_all_units();
        if old.is_measure() && unit_changed {
            return Err(XdataError::InvariantViolation(format!(
                "'all' cannot change the unit of measure header '{}'",
                old.label()
            )));
        }
        Ok(())
    }

    // ========================================================================
    // DATA-ONLY RESIZE
    // ========================================================================

    /// Replaces the array, adapting the headers of axes whose extent
    /// changed. Only measure and undifferentiated axes can be resized this
    /// way.
    pub fn update_data(&self, new_data: ArrayD<f64>) -> Result<Xdata> {
        if new_data.ndim() != self.n_dimensions() {
            return Err(XdataError::ShapeMismatch(format!(
                "update_data keeps {} dimensions, got {}; use modify_dimensions instead",
                self.n_dimensions(),
                new_data.ndim()
            )));
        }

        let mut headers = Vec::with_capacity(self.headers.len());
        for (header, &extent) in self.headers.iter().zip(new_data.shape()) {
            let resized = match header {
                _ if header.n_elem() == extent => header.clone(),
                Header::Measure(h) => {
                    Header::Measure(h.update_measure_header(None, Some(extent), None))
                }
                Header::Categorical(h) if h.is_undifferentiated() => {
                    Header::Categorical(CategoricalHeader::undifferentiated(h.label(), extent))
                }
                Header::Categorical(h) => {
                    return Err(XdataError::InvariantViolation(format!(
                        "categorical header '{}' cannot get elements without values ({} -> {})",
                        h.label(),
                        h.n_elem(),
                        extent
                    )))
                }
            };
            headers.push(resized);
        }
        Self::assemble(self.name.clone(), new_data, headers, self.data_descriptor.clone())
    }
}

/// Header rules shared by the structural per-axis flags.
///
/// Measure and undifferentiated axes cannot be edited element-wise: `Chg`
/// and `Perm` require them unchanged, and the other flags only allow a
/// header of the same kind with the right size. Categorical headers with
/// values must pass `check_header_update` and keep their columns and units.
fn check_axis_header(
    old: &Header,
    flag: UpdateFlag,
    indices: &[Vec<usize>],
    candidate: &Header,
) -> Result<()> {
    let element_wise = matches!(flag, UpdateFlag::Chg | UpdateFlag::Perm);
    let with_values = old.is_categorical_with_values() && candidate.is_categorical_with_values();
    if element_wise && !with_values {
        if candidate != old {
            return Err(XdataError::InvariantViolation(format!(
                "'{}' cannot modify measure or undifferentiated header '{}'",
                flag,
                old.label()
            )));
        }
        return Ok(());
    }

    if old.is_measure() != candidate.is_measure()
        || old.is_undifferentiated() != candidate.is_undifferentiated()
    {
        return Err(XdataError::InvariantViolation(format!(
            "'{}' cannot change the kind of header '{}'",
            flag,
            old.label()
        )));
    }
    old.check_header_update(flag, indices, candidate)?;

    if old.is_categorical_with_values() {
        if old.get_n_columns() != candidate.get_n_columns() {
            return Err(XdataError::InvariantViolation(format!(
                "'{}' cannot change the number of columns of '{}' ({} -> {})",
                flag,
                old.label(),
                old.get_n_columns(),
                candidate.get_n_columns()
            )));
        }
        if old.get_all_units() != candidate.get_all_units() {
            return Err(XdataError::InvariantViolation(format!(
                "'{}' cannot change the units of '{}'",
                flag,
                old.label()
            )));
        }
    }
    Ok(())
}

impl fmt::Display for Xdata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Xdata: {}", self.name)?;
        writeln!(f, "unit: {}", self.data_descriptor.unit().unwrap_or(crate::header::NO_UNIT))?;
        writeln!(f, "shape: {:?}", self.shape())?;
        for (axis, header) in self.headers.iter().enumerate() {
            write!(f, "axis {}: {}", axis, header)?;
            if axis + 1 < self.headers.len() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{MeasureHeader, RowUpdate};
    use descriptor::Value;
    use ndarray::IxDyn;

    fn sample() -> Xdata {
        let colors: Header = CategoricalHeader::new(
            "colors",
            ["colors"],
            None,
            vec![vec!["red".into()], vec!["blue".into()]],
        )
        .unwrap()
        .into();
        let time: Header = MeasureHeader::new("time", 0.0, 3, 0.5, Some("s".into()))
            .unwrap()
            .into();
        let data = ArrayD::from_shape_fn(IxDyn(&[2, 3]), |ix| (ix[0] * 10 + ix[1]) as f64);
        Xdata::new("signal", data, vec![colors, time], Some("mV".into())).unwrap()
    }

    fn colors(x: &Xdata) -> &CategoricalHeader {
        match x.header(0).unwrap() {
            Header::Categorical(h) => h,
            Header::Measure(_) => unreachable!(),
        }
    }

    #[test]
    fn test_new_checks_headers() {
        let x = sample();
        assert_eq!(x.shape(), &[2, 3]);
        assert_eq!(x.data_descriptor().unit(), Some("mV"));

        let one_header = vec![x.headers()[0].clone()];
        let short = Xdata::new("s", ArrayD::zeros(IxDyn(&[2, 3])), one_header, None);
        assert!(matches!(short, Err(XdataError::ShapeMismatch(_))));

        let swapped = vec![x.headers()[1].clone(), x.headers()[0].clone()];
        assert!(Xdata::new("s", ArrayD::zeros(IxDyn(&[2, 3])), swapped, None).is_err());
    }

    #[test]
    fn test_all_degrades_to_data_chg() {
        let x = sample();
        let data = ArrayD::from_elem(IxDyn(&[2, 3]), 1.0);
        let (y, flag) = x
            .update(1, AxisUpdate::All { data, header: x.headers()[1].clone() })
            .unwrap();
        assert_eq!(flag, UpdateFlag::DataChg);
        assert_eq!(y.data()[[1, 2]], 1.0);
    }

    #[test]
    fn test_all_keeps_measure_unit() {
        let x = sample();
        let other_unit: Header = MeasureHeader::new("time", 0.0, 5, 0.5, Some("ms".into()))
            .unwrap()
            .into();
        let err = x.update(
            1,
            AxisUpdate::All {
                data: ArrayD::zeros(IxDyn(&[2, 5])),
                header: other_unit,
            },
        );
        assert!(matches!(err, Err(XdataError::InvariantViolation(_))));

        let longer: Header = MeasureHeader::new("time", 0.0, 5, 0.5, Some("s".into()))
            .unwrap()
            .into();
        let (y, flag) = x
            .update(1, AxisUpdate::All { data: ArrayD::zeros(IxDyn(&[2, 5])), header: longer })
            .unwrap();
        assert_eq!(flag, UpdateFlag::All);
        assert_eq!(y.shape(), &[2, 5]);
    }

    #[test]
    fn test_data_chg_keeps_shape() {
        let x = sample();
        let err = x.update(
            0,
            AxisUpdate::DataChg {
                data: ArrayD::zeros(IxDyn(&[2, 4])),
                header: None,
            },
        );
        assert!(matches!(err, Err(XdataError::ShapeMismatch(_))));
    }

    #[test]
    fn test_chg_on_measure_requires_same_header() {
        let x = sample();
        let slice = ArrayD::from_elem(IxDyn(&[2]), 9.0);
        let (y, _) = x
            .update(
                1,
                AxisUpdate::Chg {
                    indices: vec![2],
                    slices: vec![slice.clone()],
                    header: x.headers()[1].clone(),
                },
            )
            .unwrap();
        assert_eq!(y.data()[[0, 2]], 9.0);

        let shifted: Header = match &x.headers()[1] {
            Header::Measure(h) => h.update_measure_header(Some(1.0), None, None).into(),
            Header::Categorical(_) => unreachable!(),
        };
        let err = x.update(
            1,
            AxisUpdate::Chg {
                indices: vec![2],
                slices: vec![slice],
                header: shifted,
            },
        );
        assert!(matches!(err, Err(XdataError::InvariantViolation(_))));
    }

    #[test]
    fn test_perm_moves_rows_and_data() {
        let x = sample();
        let header = colors(&x).update(RowUpdate::Perm(vec![1, 0])).unwrap();
        let (y, flag) = x
            .update(0, AxisUpdate::Perm { order: vec![1, 0], header: header.into() })
            .unwrap();
        assert_eq!(flag, UpdateFlag::Perm);
        assert_eq!(y.header(0).unwrap().get_item_name(0).unwrap(), Value::from("blue"));
        assert_eq!(y.data()[[0, 1]], 11.0);
        assert_eq!(x.data()[[0, 1]], 1.0);
    }

    #[test]
    fn test_update_data_resizes_measure() {
        let x = sample();
        let y = x.update_data(ArrayD::zeros(IxDyn(&[2, 7]))).unwrap();
        assert_eq!(y.header(1).unwrap().n_elem(), 7);
        assert!(matches!(
            x.update_data(ArrayD::zeros(IxDyn(&[3, 3]))),
            Err(XdataError::InvariantViolation(_))
        ));
        assert!(matches!(
            x.update_data(ArrayD::zeros(IxDyn(&[2]))),
            Err(XdataError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_axis_out_of_range() {
        let x = sample();
        let err = x.update(2, AxisUpdate::DataChg { data: x.data().clone(), header: None });
        assert_eq!(err, Err(XdataError::IndexOutOfRange { what: "axis", index: 2, len: 2 }));
    }

    #[test]
    fn test_display() {
        let text = sample().to_string();
        assert!(text.starts_with("Xdata: signal\nunit: mV\nshape: [2, 3]"));
        assert!(text.contains("axis 1: MeasureHeader: time"));
    }
}
