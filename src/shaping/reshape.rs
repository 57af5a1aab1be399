use super::shape_spec::ShapeSpec;
use crate::errors::Result;
use ndarray::{ArrayD, IxDyn};

/// Reshapes `volume` to the shape described by `spec`, keeping row-major
/// element order.
///
/// # Errors
///
/// Returns [`crate::VolProcError::InvalidShapeSpec`] if the descriptor cannot
/// be resolved against the volume's shape.
pub fn reshape_volume<T: Clone>(volume: &ArrayD<T>, spec: &ShapeSpec) -> Result<ArrayD<T>> {
    let target = spec.resolve(volume.shape())?;
    let reshaped = volume
        .as_standard_layout()
        .into_owned()
        .into_shape(IxDyn(&target))?;
    Ok(reshaped)
}
