use crate::errors::{Result, VolProcError};
use ndarray::{ArrayD, Axis, Slice};

/// Splits `volume` into `parts` contiguous, equally sized chunks along `axis`.
///
/// Each chunk holds `len / parts` slices; any remainder at the end of the axis
/// is dropped. Chunks that are a single slice thick lose the split axis.
///
/// # Errors
///
/// Returns [`VolProcError::InvalidParameter`] if `parts` is zero, `axis` is out
/// of range, or the axis has fewer slices than `parts`.
pub fn split_volume<T: Clone>(volume: &ArrayD<T>, parts: usize, axis: usize) -> Result<Vec<ArrayD<T>>> {
    if parts == 0 {
        return Err(VolProcError::invalid_parameter(
            "number of subvolumes must be at least 1",
        ));
    }
    if axis >= volume.ndim() {
        return Err(VolProcError::invalid_parameter("axis out of range"));
    }

    let length = volume.len_of(Axis(axis));
    let step = length / parts;
    if step == 0 {
        return Err(VolProcError::invalid_parameter(format!(
            "axis {axis} has {length} slices, cannot split into {parts} subvolumes"
        )));
    }

    let lost = length - parts * step;
    if lost == 0 {
        println!("✅ Axis {axis} will be split into {parts} x {step} chunks");
    } else {
        println!(
            "⚠ Axis {axis} is not divisible by {parts}; splitting into {parts} x {step} chunks \
             drops the last {lost} slices"
        );
    }

    let chunks = (0..parts)
        .map(|i| {
            let start = i * step;
            if step == 1 {
                volume.index_axis(Axis(axis), start).to_owned()
            } else {
                volume
                    .slice_axis(Axis(axis), Slice::from(start..start + step))
                    .to_owned()
            }
        })
        .collect();

    Ok(chunks)
}
