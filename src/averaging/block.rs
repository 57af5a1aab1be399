//! Block (non-overlapping) averaging along one axis.

use crate::errors::{Result, VolProcError};
use ndarray::{stack, ArrayD, ArrayViewD, Axis};
use rayon::prelude::*;

/// Replaces every run of `scans_per_avg` consecutive slices along `axis` with
/// their mean.
///
/// When the axis length is not a multiple of `scans_per_avg`, the trailing
/// partial block counts as zero-padded to full width: its sum is still divided
/// by `scans_per_avg`. The output has `ceil(len / scans_per_avg)` slices.
///
/// # Errors
///
/// Returns [`VolProcError::InvalidParameter`] if `scans_per_avg` is zero,
/// `axis` is out of range or the volume has no slices along `axis`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn block_average(
    volume: &ArrayD<f32>,
    scans_per_avg: usize,
    axis: usize,
) -> Result<ArrayD<f32>> {
    if scans_per_avg == 0 {
        return Err(VolProcError::invalid_parameter(
            "scans_per_avg must be at least 1",
        ));
    }
    if axis >= volume.ndim() {
        return Err(VolProcError::invalid_parameter("axis out of range"));
    }

    let length = volume.len_of(Axis(axis));
    if length == 0 {
        return Err(VolProcError::invalid_parameter(format!(
            "volume has no slices along axis {axis}"
        )));
    }

    let remainder = length % scans_per_avg;
    if remainder != 0 {
        println!(
            "⚠ Axis {axis} length {length} is not divisible by {scans_per_avg}; \
             the last block of {remainder} slices is averaged as if zero-padded"
        );
    }

    let blocks: Vec<ArrayViewD<'_, f32>> =
        volume.axis_chunks_iter(Axis(axis), scans_per_avg).collect();

    let averaged: Vec<ArrayD<f32>> = blocks
        .par_iter()
        .map(|block| {
            let sums = block.fold_axis(Axis(axis), 0.0_f64, |&acc, &x| acc + f64::from(x));
            sums.mapv(|s| (s / scans_per_avg as f64) as f32)
        })
        .collect();

    let views: Vec<_> = averaged.iter().map(ArrayD::view).collect();
    Ok(stack(Axis(axis), &views)?)
}
