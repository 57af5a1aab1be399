//! Label-mask isolation
//!
//! Keeps the samples of a volume that carry a given label in a same-shaped
//! label volume and zeroes everything else.

use crate::errors::{Result, VolProcError};
use ndarray::{ArrayD, Zip};

/// Returns a copy of `volume` with every sample whose label differs from
/// `label` set to zero.
///
/// # Errors
///
/// Returns [`VolProcError::ShapeMismatch`] if `labels` does not have the same
/// shape as `volume`.
pub fn isolate_label(volume: &ArrayD<f32>, labels: &ArrayD<i32>, label: i32) -> Result<ArrayD<f32>> {
    if volume.shape() != labels.shape() {
        return Err(VolProcError::ShapeMismatch {
            expected: volume.shape().to_vec(),
            found: labels.shape().to_vec(),
        });
    }

    let mut out = volume.clone();
    Zip::from(&mut out).and(labels).par_for_each(|value, &l| {
        if l != label {
            *value = 0.0;
        }
    });

    Ok(out)
}

/// Number of samples in `labels` equal to `label`
pub fn count_label(labels: &ArrayD<i32>, label: i32) -> usize {
    labels.iter().filter(|&&l| l == label).count()
}
