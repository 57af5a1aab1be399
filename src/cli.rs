//! Defines command-line interface options using `clap` for the VolProc application.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vol_proc::shaping::ShapeSpec;

/// A CLI tool for averaging, masking, reshaping and splitting volumes stored in NetCDF files
#[derive(Parser, Debug)]
#[command(
    version,
    name = "VolProc",
    about = "Volumetric image stack processing for NetCDF volumes"
)]
pub struct Args {
    /// Path to the NetCDF file holding the input volume(s)
    #[arg(short, long)]
    pub file: PathBuf,

    /// Path to save the result as NetCDF. If not set, a summary is printed.
    #[arg(long)]
    pub output_netcdf: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Number of threads to use for parallel processing. Defaults to number of CPU cores.
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List attributes, dimensions and variables of the file
    Inspect,

    /// Compute quick statistics (min/mean/max/std) for a variable
    Summary {
        /// Variable to summarize
        var: String,
    },

    /// Average every slice with its neighbours using a centered sliding window
    AveragePerSlice {
        /// 3D variable to average
        #[arg(long)]
        var: String,

        /// Window width in slices, must be odd
        #[arg(short = 'n', long, default_value_t = 5)]
        scans_per_avg: usize,

        /// Axis to slide over (0, 1 or 2)
        #[arg(short, long, default_value_t = 0)]
        axis: usize,

        /// Keep edge slices unaveraged instead of trimming them
        #[arg(long, default_value_t = false)]
        no_trim: bool,
    },

    /// Replace every block of consecutive slices with its mean
    BlockAverage {
        #[arg(long)]
        var: String,

        /// Slices per block
        #[arg(short = 'n', long, default_value_t = 5)]
        scans_per_avg: usize,

        #[arg(short, long, default_value_t = 0)]
        axis: usize,
    },

    /// Zero every sample whose label differs from the given one
    IsolateLabel {
        #[arg(long)]
        var: String,

        /// Integer label variable with the same shape as the volume
        #[arg(long)]
        labels: String,

        /// Label value to keep
        #[arg(long)]
        label: i32,

        /// File holding the label variable, if not the input file
        #[arg(long)]
        labels_file: Option<PathBuf>,
    },

    /// Reshape a volume, e.g. '(-1,3,:,:)': -1 is inferred, ':' keeps the current extent
    Reshape {
        #[arg(long)]
        var: String,

        #[arg(long, value_parser = parse_shape_arg, default_value = "(-1,3,:,:)", allow_hyphen_values = true)]
        shape: ShapeSpec,
    },

    /// Split a volume into equally sized sub-volumes, dropping any remainder
    Split {
        #[arg(long)]
        var: String,

        /// Number of sub-volumes
        #[arg(short, long, default_value_t = 3)]
        parts: usize,

        #[arg(short, long, default_value_t = 1)]
        axis: usize,
    },

    /// Stack several same-shaped variables, in the given order, along a new axis
    Stack {
        /// Variables to stack; repeat the flag for each one
        #[arg(long = "var", required = true)]
        vars: Vec<String>,

        #[arg(short, long, default_value_t = 0)]
        axis: usize,
    },
}

fn parse_shape_arg(s: &str) -> Result<ShapeSpec, String> {
    s.parse::<ShapeSpec>().map_err(|e| e.to_string())
}
