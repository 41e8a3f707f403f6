//! FILENAME: core/xdata/src/indices.rs
//! PURPOSE: Index-list validation shared by headers and the array protocol.
//! CONTEXT: Every mutation validates its whole index payload with these
//! helpers before the first write, so a rejected request never leaves a
//! half-updated table or array behind.

use rustc_hash::FxHashSet;

use descriptor::{check_index, Result, XdataError};

/// Every index must lie in `[0, len)`.
pub fn check_in_range(what: &'static str, indices: &[usize], len: usize) -> Result<()> {
    for &index in indices {
        check_index(what, index, len)?;
    }
    Ok(())
}

/// In range and without repetition.
pub fn check_distinct(what: &'static str, indices: &[usize], len: usize) -> Result<()> {
    check_in_range(what, indices, len)?;
    let mut seen = FxHashSet::default();
    for &index in indices {
        if !seen.insert(index) {
            return Err(XdataError::InvalidArgumentType(format!(
                "{} index {} is given more than once",
                what, index
            )));
        }
    }
    Ok(())
}

/// `order` must be a permutation of `[0, len)`.
pub fn check_permutation(what: &'static str, order: &[usize], len: usize) -> Result<()> {
    if order.len() != len {
        return Err(XdataError::ShapeMismatch(format!(
            "a {} permutation needs {} indices, got {}",
            what,
            len,
            order.len()
        )));
    }
    check_distinct(what, order, len)
}

/// Indices of `[0, len)` that survive the removal of `removed`, in order.
pub fn kept_indices(len: usize, removed: &[usize]) -> Vec<usize> {
    let removed: FxHashSet<usize> = removed.iter().copied().collect();
    (0..len).filter(|i| !removed.contains(i)).collect()
}
