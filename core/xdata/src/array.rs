//! FILENAME: core/xdata/src/array.rs
//! PURPOSE: Copy-on-write edits of the numeric array along one axis.
//! CONTEXT: A "slice" is the sub-array at one index of an axis, i.e. an
//! array whose shape is the data shape without that axis. Every function
//! checks its whole payload, then builds a fresh array; the input array is
//! only ever read.

use ndarray::{concatenate, ArrayD, ArrayViewD, Axis, IxDyn};

use descriptor::{Result, XdataError};

use crate::indices::{check_distinct, check_in_range, check_permutation, kept_indices};

/// Shape of one slice of `shape` taken along `axis`.
pub fn slice_shape(shape: &[usize], axis: usize) -> Vec<usize> {
    shape
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != axis)
        .map(|(_, &n)| n)
        .collect()
}

/// Every slice must have the data shape minus `axis`.
pub fn check_slices(data: &ArrayD<f64>, axis: usize, slices: &[ArrayD<f64>]) -> Result<()> {
    let expected = slice_shape(data.shape(), axis);
    for (k, slice) in slices.iter().enumerate() {
        if slice.shape() != expected.as_slice() {
            return Err(XdataError::ShapeMismatch(format!(
                "slice {} has shape {:?}, expected {:?} for axis {}",
                k,
                slice.shape(),
                expected,
                axis
            )));
        }
    }
    Ok(())
}

/// Overwrites the slices at `indices` along `axis`.
pub fn with_slices_replaced(
    data: &ArrayD<f64>,
    axis: usize,
    indices: &[usize],
    slices: &[ArrayD<f64>],
) -> Result<ArrayD<f64>> {
    if indices.len() != slices.len() {
        return Err(XdataError::ShapeMismatch(format!(
            "{} indices given for {} slices",
            indices.len(),
            slices.len()
        )));
    }
    check_in_range("slice", indices, data.len_of(Axis(axis)))?;
    check_slices(data, axis, slices)?;

    let mut out = data.clone();
    for (&index, slice) in indices.iter().zip(slices) {
        out.index_axis_mut(Axis(axis), index).assign(slice);
    }
    Ok(out)
}

/// Appends `slices` at the end of `axis`; the old content is the prefix.
pub fn with_slices_appended(
    data: &ArrayD<f64>,
    axis: usize,
    slices: &[ArrayD<f64>],
) -> Result<ArrayD<f64>> {
    check_slices(data, axis, slices)?;
    if slices.is_empty() {
        return Ok(data.clone());
    }

    let mut views: Vec<ArrayViewD<'_, f64>> = Vec::with_capacity(slices.len() + 1);
    views.push(data.view());
    views.extend(slices.iter().map(|s| s.view().insert_axis(Axis(axis))));
    concatenate(Axis(axis), &views).map_err(|e| XdataError::ShapeMismatch(e.to_string()))
}

/// Drops the (distinct) `indices` along `axis`.
pub fn with_indices_removed(
    data: &ArrayD<f64>,
    axis: usize,
    indices: &[usize],
) -> Result<ArrayD<f64>> {
    let len = data.len_of(Axis(axis));
    check_distinct("slice", indices, len)?;

    let kept = kept_indices(len, indices);
    if kept.is_empty() {
        let mut shape = data.shape().to_vec();
        shape[axis] = 0;
        return Ok(ArrayD::zeros(IxDyn(&shape)));
    }
    Ok(data.select(Axis(axis), &kept))
}

/// Slice `i` of the result is slice `order[i]` of `data`.
pub fn with_axis_reordered(
    data: &ArrayD<f64>,
    axis: usize,
    order: &[usize],
) -> Result<ArrayD<f64>> {
    check_permutation("slice", order, data.len_of(Axis(axis)))?;
    if order.is_empty() {
        return Ok(data.clone());
    }
    Ok(data.select(Axis(axis), order))
}

/// Axis `i` of the result is axis `order[i]` of `data`, in standard layout.
pub fn with_axes_permuted(data: &ArrayD<f64>, order: &[usize]) -> Result<ArrayD<f64>> {
    check_permutation("axis", order, data.ndim())?;
    Ok(data
        .view()
        .permuted_axes(order.to_vec())
        .as_standard_layout()
        .into_owned())
}
