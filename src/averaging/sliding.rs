//! Sliding-window slice averaging
//!
//! Every output slice along the chosen axis is the mean of a centered window
//! of `scans_per_avg` input slices. Slices closer than the window half-width
//! to either end are either dropped (`trim`) or copied through unaveraged.

use crate::errors::{Result, VolProcError};
use ndarray::{stack, Array2, Array3, ArrayView3, Axis, Slice};
use rayon::prelude::*;

/// Half-width of an averaging window of `scans_per_avg` slices
#[must_use]
pub const fn window_offset(scans_per_avg: usize) -> usize {
    scans_per_avg.saturating_sub(1) / 2
}

/// Averages each slice of `volume` along `axis` with its `(scans_per_avg - 1) / 2`
/// neighbours on either side.
///
/// # Arguments
///
/// * `volume` - The input stack, borrowed immutably
/// * `scans_per_avg` - Window width, must be odd
/// * `axis` - Axis to slide over, one of 0, 1 or 2
/// * `trim` - Drop edge slices instead of passing them through
///
/// # Returns
///
/// A newly allocated volume. Its extent along `axis` is
/// `len - (scans_per_avg - 1)` when trimming and `len` otherwise; every other
/// axis keeps its extent.
///
/// # Errors
///
/// Returns [`VolProcError::InvalidParameter`] if:
/// - `scans_per_avg` is even
/// - `axis` is not 0, 1 or 2
/// - the volume has no slices along `axis`
/// - trimming would leave no slices (`len <= scans_per_avg - 1`)
pub fn average_per_bscan(
    volume: ArrayView3<'_, f32>,
    scans_per_avg: usize,
    axis: usize,
    trim: bool,
) -> Result<Array3<f32>> {
    if scans_per_avg % 2 == 0 {
        return Err(VolProcError::invalid_parameter("scans_per_avg must be odd"));
    }
    if axis > 2 {
        return Err(VolProcError::invalid_parameter("axis out of range"));
    }

    let offset = window_offset(scans_per_avg);
    let length = volume.len_of(Axis(axis));

    if length == 0 {
        return Err(VolProcError::invalid_parameter(format!(
            "volume has no slices along axis {axis}"
        )));
    }
    if trim && length <= 2 * offset {
        return Err(VolProcError::invalid_parameter("window larger than volume"));
    }

    println!(
        "⚡ Averaging {length} slices along axis {axis} (window {scans_per_avg}) across {} CPU cores",
        rayon::current_num_threads()
    );

    // filter_map + collect keeps index order
    let slices: Vec<Array2<f32>> = (0..length)
        .into_par_iter()
        .filter_map(|i| {
            if i >= offset && i + offset < length {
                Some(window_mean(&volume, axis, i - offset, scans_per_avg))
            } else if trim {
                None
            } else {
                Some(volume.index_axis(Axis(axis), i).to_owned())
            }
        })
        .collect();

    let views: Vec<_> = slices.iter().map(Array2::view).collect();
    Ok(stack(Axis(axis), &views)?)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn window_mean(
    volume: &ArrayView3<'_, f32>,
    axis: usize,
    start: usize,
    width: usize,
) -> Array2<f32> {
    let window = volume.slice_axis(Axis(axis), Slice::from(start..start + width));
    let sums = window.fold_axis(Axis(axis), 0.0_f64, |&acc, &x| acc + f64::from(x));
    sums.mapv(|s| (s / width as f64) as f32)
}
