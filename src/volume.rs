//! The volume triple exchanged by every command: array data, a display name
//! and a kind tag telling consumers whether the samples are intensities or
//! integer labels.

use ndarray::ArrayD;
use std::fmt;

/// What the samples of a volume represent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeKind {
    /// Intensity samples
    Image,
    /// Integer segmentation labels
    Labels,
}

impl VolumeKind {
    /// Lowercase name, also stored in written files
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Labels => "labels",
        }
    }
}

impl fmt::Display for VolumeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named N-dimensional stack of samples.
///
/// Image volumes use the default `f32` sample type, label volumes `i32`.
///
/// `source_axes[i]` is the axis of the originally loaded variable that axis
/// `i` descends from, or `None` for an axis a command created (a stacking
/// axis, a reshaped axis). Writers use it to name output dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume<T = f32> {
    pub data: ArrayD<T>,
    pub name: String,
    pub kind: VolumeKind,
    pub source_axes: Vec<Option<usize>>,
}

impl<T> Volume<T> {
    /// Create a volume whose axes are its own source axes
    pub fn new(data: ArrayD<T>, name: impl Into<String>, kind: VolumeKind) -> Self {
        let source_axes = (0..data.ndim()).map(Some).collect();
        Self {
            data,
            name: name.into(),
            kind,
            source_axes,
        }
    }

    /// Create an image volume
    pub fn image(data: ArrayD<T>, name: impl Into<String>) -> Self {
        Self::new(data, name, VolumeKind::Image)
    }

    /// Create a label volume
    pub fn labels(data: ArrayD<T>, name: impl Into<String>) -> Self {
        Self::new(data, name, VolumeKind::Labels)
    }

    /// Replace the axis mapping, one entry per axis of `data`
    pub fn with_source_axes(mut self, source_axes: Vec<Option<usize>>) -> Self {
        debug_assert_eq!(source_axes.len(), self.data.ndim());
        self.source_axes = source_axes;
        self
    }

    /// Source axis of each axis of a volume derived from this one, given for
    /// each derived axis the local axis it comes from.
    pub fn derive_source_axes(&self, local: &[Option<usize>]) -> Vec<Option<usize>> {
        local
            .iter()
            .map(|axis| axis.and_then(|a| self.source_axes.get(a).copied().flatten()))
            .collect()
    }

    /// Extent of every axis
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Number of axes
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Shape formatted the way it is shown to users, e.g. `(7 × 4 × 4)`
    pub fn shape_string(&self) -> String {
        format_shape(self.shape())
    }
}

pub(crate) fn format_shape(shape: &[usize]) -> String {
    format!(
        "({})",
        shape
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(" × ")
    )
}
