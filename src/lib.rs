//! VolProc: volumetric image stack processing
//!
//! Tools for 3D image stacks such as OCT B-scan volumes. The core is a
//! sliding-window slice average: each output slice along a chosen axis is the
//! mean of a centered window of input slices, with edge slices either trimmed
//! or passed through. Around it sit block averaging, label-mask isolation,
//! descriptor-driven reshaping, uniform splitting and stacking.
//!
//! ## Module Organization
//!
//! - [`averaging`]: sliding-window and block averaging kernels
//! - [`masking`]: label-mask isolation
//! - [`shaping`]: reshape descriptors, reshape, split and stack
//! - [`volume`]: the named, kind-tagged [`Volume`]
//! - [`commands`]: volume-in / volume-out wrappers with output naming
//! - [`netcdf_io`]: reading volumes from and writing results to NetCDF
//! - [`metadata`]: file inspection and volume summaries
//! - [`parallel`]: rayon thread pool configuration
//! - [`errors`]: centralized error handling
//!
//! ## Usage
//!
//! ```rust
//! use ndarray::Array3;
//! use vol_proc::averaging::average_per_bscan;
//!
//! // Seven slices, each filled with its own index
//! let volume = Array3::from_shape_fn((7, 4, 4), |(z, _, _)| z as f32);
//!
//! let averaged = average_per_bscan(volume.view(), 3, 0, true).unwrap();
//! assert_eq!(averaged.shape(), &[5, 4, 4]);
//! assert_eq!(averaged[[0, 0, 0]], 1.0);
//! ```
//!
//! ```rust,no_run
//! use vol_proc::prelude::*;
//! use netcdf::open;
//!
//! let file = open("scan.nc").unwrap();
//! let vol = vol_proc::netcdf_io::read_volume(&file, "oct").unwrap();
//! let avg = vol_proc::commands::average_per_slice(&vol, 5, 0, true).unwrap();
//! NetCDFWriter::new(&file, std::path::Path::new("scan_avg.nc"))
//!     .write_volume(&avg, "oct")
//!     .unwrap();
//! ```

pub mod averaging;
pub mod commands;
pub mod errors;
pub mod masking;
pub mod metadata;
pub mod netcdf_io;
pub mod parallel;
pub mod shaping;
pub mod volume;

pub use errors::*;
pub use metadata::*;
pub use netcdf_io::*;
pub use parallel::*;
pub use volume::*;

pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::averaging::{average_per_bscan, block_average};
    pub use crate::errors::{Result, VolProcError};
    pub use crate::masking::isolate_label;
    pub use crate::netcdf_io::NetCDFWriter;
    pub use crate::parallel::ParallelConfig;
    pub use crate::shaping::{ShapeSpec, ShapeToken};
    pub use crate::volume::{Volume, VolumeKind};
}
