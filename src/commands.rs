//! Volume-level commands
//!
//! Each command takes one or more [`Volume`]s and returns new ones, applying
//! the underlying array operation and deriving the display name of the result.

use crate::averaging::{average_per_bscan, block_average};
use crate::errors::{Result, VolProcError};
use crate::masking::isolate_label;
use crate::shaping::{reshape_volume, split_volume, stack_arrays, ShapeSpec};
use crate::volume::Volume;
use ndarray::Ix3;

/// Sliding-window average of a 3D image volume, named `{name}_{n}_per`.
///
/// # Errors
///
/// Returns [`VolProcError::InvalidParameter`] for a volume that is not
/// 3-dimensional, and propagates the errors of [`average_per_bscan`].
pub fn average_per_slice(
    vol: &Volume,
    scans_per_avg: usize,
    axis: usize,
    trim: bool,
) -> Result<Volume> {
    let view = vol
        .data
        .view()
        .into_dimensionality::<Ix3>()
        .map_err(|_| VolProcError::invalid_parameter("volume must be 3-dimensional"))?;

    let averaged = average_per_bscan(view, scans_per_avg, axis, trim)?;

    Ok(Volume::image(
        averaged.into_dyn(),
        format!("{}_{}_per", vol.name, scans_per_avg),
    )
    .with_source_axes(vol.source_axes.clone()))
}

/// Block average, named `{name}_avg_{n}`.
///
/// # Errors
///
/// Propagates the errors of [`block_average`].
pub fn average_blocks(vol: &Volume, scans_per_avg: usize, axis: usize) -> Result<Volume> {
    let averaged = block_average(&vol.data, scans_per_avg, axis)?;
    Ok(Volume::image(
        averaged,
        format!("{}_avg_{}", vol.name, scans_per_avg),
    )
    .with_source_axes(vol.source_axes.clone()))
}

/// Keeps the samples of `vol` labelled `label` in `labels`, named `{name}_{label}_mask`.
///
/// # Errors
///
/// Returns [`VolProcError::ShapeMismatch`] if the two volumes differ in shape.
pub fn isolate_labeled_volume(vol: &Volume, labels: &Volume<i32>, label: i32) -> Result<Volume> {
    let masked = isolate_label(&vol.data, &labels.data, label)?;
    Ok(Volume::image(masked, format!("{}_{}_mask", vol.name, label))
        .with_source_axes(vol.source_axes.clone()))
}

/// Reshapes by descriptor, named `{name}_RS`. The kind is preserved and
/// only axes kept with `:` keep their source axis.
///
/// # Errors
///
/// Returns [`VolProcError::InvalidShapeSpec`] if the descriptor does not fit.
pub fn reshape<T: Clone>(vol: &Volume<T>, spec: &ShapeSpec) -> Result<Volume<T>> {
    let reshaped = reshape_volume(&vol.data, spec)?;
    let source_axes = vol.derive_source_axes(&spec.kept_axes(vol.ndim()));
    Ok(Volume::new(reshaped, format!("{}_RS", vol.name), vol.kind).with_source_axes(source_axes))
}

/// Splits into `parts` sub-volumes named `{name}_0`, `{name}_1`, ...
///
/// # Errors
///
/// Propagates the errors of [`split_volume`].
pub fn split<T: Clone>(vol: &Volume<T>, parts: usize, axis: usize) -> Result<Vec<Volume<T>>> {
    let chunks = split_volume(&vol.data, parts, axis)?;
    Ok(chunks
        .into_iter()
        .enumerate()
        .map(|(i, data)| {
            // single-slice chunks have lost the split axis
            let local: Vec<Option<usize>> = (0..vol.ndim())
                .filter(|&a| data.ndim() == vol.ndim() || a != axis)
                .map(Some)
                .collect();
            let source_axes = vol.derive_source_axes(&local);
            Volume::new(data, format!("{}_{}", vol.name, i), vol.kind).with_source_axes(source_axes)
        })
        .collect())
}

/// Stacks an ordered list of volumes, named `Stacked_Selection_Axis_{axis}`.
/// The kind of the first volume is kept.
///
/// # Errors
///
/// Propagates the errors of [`stack_arrays`].
pub fn stack<T: Clone>(volumes: &[Volume<T>], axis: usize) -> Result<Volume<T>> {
    let arrays: Vec<_> = volumes.iter().map(|v| &v.data).collect();
    let stacked = stack_arrays(&arrays, axis)?;
    // stack_arrays rejects an empty list
    let first = &volumes[0];
    let mut local: Vec<Option<usize>> = (0..first.ndim()).map(Some).collect();
    local.insert(axis, None);
    let source_axes = first.derive_source_axes(&local);
    Ok(Volume::new(
        stacked,
        format!("Stacked_Selection_Axis_{axis}"),
        first.kind,
    )
    .with_source_axes(source_axes))
}
