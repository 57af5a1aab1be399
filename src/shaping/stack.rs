use crate::errors::{Result, VolProcError};
use ndarray::{stack, ArrayD, Axis};

/// Stacks `volumes`, in the given order, along a new axis inserted at `axis`.
///
/// # Errors
///
/// Returns [`VolProcError::InvalidParameter`] for an empty list or an `axis`
/// beyond the rank of the inputs, and [`VolProcError::ShapeMismatch`] when the
/// inputs differ in shape.
pub fn stack_arrays<T: Clone>(volumes: &[&ArrayD<T>], axis: usize) -> Result<ArrayD<T>> {
    let first = volumes
        .first()
        .ok_or_else(|| VolProcError::invalid_parameter("no volumes to stack"))?;

    if axis > first.ndim() {
        return Err(VolProcError::invalid_parameter("axis out of range"));
    }

    if let Some(other) = volumes.iter().find(|v| v.shape() != first.shape()) {
        return Err(VolProcError::ShapeMismatch {
            expected: first.shape().to_vec(),
            found: other.shape().to_vec(),
        });
    }

    let views: Vec<_> = volumes.iter().map(|v| v.view()).collect();
    Ok(stack(Axis(axis), &views)?)
}
