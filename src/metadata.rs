//! NetCDF file inspection and volume summaries
//!
//! Lists the variables of a file, marks which ones are 3D volumes the
//! averaging commands accept, and computes quick intensity statistics.

use crate::errors::{Result, VolProcError};
use crate::volume::{format_shape, Volume};
use ndarray::ArrayD;
use netcdf::File;

/// Structured description of one NetCDF variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableInfo {
    pub name: String,
    pub data_type: String,
    pub dimensions: Vec<String>,
    pub shape: Vec<usize>,
}

impl VariableInfo {
    /// Whether the variable can be used as a 3D volume
    pub fn is_volume(&self) -> bool {
        self.shape.len() == 3
    }
}

/// Describes every variable of `file`, sorted by name.
pub fn list_variables(file: &File) -> Vec<VariableInfo> {
    let mut infos: Vec<VariableInfo> = file
        .variables()
        .map(|var| VariableInfo {
            name: var.name(),
            data_type: format!("{:?}", var.vartype()).to_lowercase(),
            dimensions: var
                .dimensions()
                .iter()
                .map(|d| d.name().to_string())
                .collect(),
            shape: var.dimensions().iter().map(|d| d.len()).collect(),
        })
        .collect();
    infos.sort_by(|a, b| a.name.cmp(&b.name));
    infos
}

/// Prints global attributes, dimensions and variables of a NetCDF file.
pub fn print_metadata(file: &File) -> Result<()> {
    println!("\n===== Global Attributes =====");
    for attr in file.attributes() {
        println!("- {}: {:?}", attr.name(), attr.value()?);
    }

    println!("\n===== Dimensions =====");
    let mut dimensions: Vec<_> = file.dimensions().collect();
    dimensions.sort_by_key(|d| d.name());
    if dimensions.is_empty() {
        println!("   (No dimensions found)");
    }
    for dim in dimensions {
        println!("    {} = {}", dim.name(), dim.len());
    }

    println!("\n===== Variables =====");
    let infos = list_variables(file);
    if infos.is_empty() {
        println!("   (No variables found)");
    }
    for info in &infos {
        let marker = if info.is_volume() { " [volume]" } else { "" };
        println!(
            "- {} ({}): [{}] = {}{}",
            info.name,
            info.data_type,
            info.dimensions.join(", "),
            format_shape(&info.shape),
            marker
        );
    }

    println!("\n💡 Tip: 3D variables marked [volume] can be passed to average-per-slice");

    Ok(())
}

/// Quick statistics over the finite samples of a volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeSummary {
    pub min: f32,
    pub max: f32,
    pub mean: f64,
    pub std_dev: f64,
    pub valid: usize,
    pub total: usize,
}

impl VolumeSummary {
    /// Computes the summary, ignoring NaN and infinite samples.
    ///
    /// Returns `None` when the volume has no finite sample.
    #[allow(clippy::cast_precision_loss)]
    pub fn of(data: &ArrayD<f32>) -> Option<Self> {
        let finite = || data.iter().copied().filter(|x| x.is_finite());

        let valid = finite().count();
        if valid == 0 {
            return None;
        }

        let min = finite().fold(f32::INFINITY, f32::min);
        let max = finite().fold(f32::NEG_INFINITY, f32::max);
        let mean = finite().map(f64::from).sum::<f64>() / valid as f64;
        let variance = finite()
            .map(|x| (f64::from(x) - mean).powi(2))
            .sum::<f64>()
            / valid as f64;

        Some(Self {
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
            valid,
            total: data.len(),
        })
    }

    /// Print the summary under a heading for `name`
    pub fn print(&self, name: &str) {
        println!("\n Summary for Volume: {name}");
        println!("================================");
        println!("   Min: {}", self.min);
        println!("   Max: {}", self.max);
        println!("   Mean: {:.4}", self.mean);
        println!("   Std Dev: {:.4}", self.std_dev);
        println!("   Valid elements: {} / {}", self.valid, self.total);
    }
}

/// Prints name, kind, shape and summary statistics of a volume.
pub fn describe_volume(volume: &Volume) {
    println!(
        "\n {} ({}): shape {}",
        volume.name,
        volume.kind,
        volume.shape_string()
    );
    match VolumeSummary::of(&volume.data) {
        Some(summary) => summary.print(&volume.name),
        None => println!("⚠ No valid (finite) data found in '{}'", volume.name),
    }
}

/// Loads `var_name` and prints its summary.
pub fn summarize_variable(file: &File, var_name: &str) -> Result<VolumeSummary> {
    let volume = crate::netcdf_io::read_volume(file, var_name)?;
    let summary = VolumeSummary::of(&volume.data).ok_or_else(|| {
        VolProcError::Generic(format!("Variable '{var_name}' has no finite values"))
    })?;
    summary.print(var_name);
    Ok(summary)
}
