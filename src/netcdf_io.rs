//! NetCDF I/O for volumes
//!
//! Volumes are read from NetCDF variables and command results are written to
//! a new NetCDF file, carrying over the source variable's attributes and
//! stamping a `history` global attribute.

use crate::errors::{Result, VolProcError};
use crate::volume::{format_shape, Volume};
use chrono::Utc;
use ndarray::ArrayD;
use netcdf::{create, AttributeValue, File};
use std::{fs, path::Path};

/// Attribute recording the [`crate::VolumeKind`] of a written volume
pub const KIND_ATTRIBUTE: &str = "volume_kind";

/// Names and lengths of the dimensions of `var_name`, in axis order.
pub fn variable_dimensions(file: &File, var_name: &str) -> Result<Vec<(String, usize)>> {
    let var = file
        .variable(var_name)
        .ok_or_else(|| VolProcError::VariableNotFound {
            var: var_name.to_string(),
        })?;

    Ok(var
        .dimensions()
        .iter()
        .map(|d| (d.name().to_string(), d.len()))
        .collect())
}

/// Loads a variable as an image volume named after the variable.
pub fn read_volume(file: &File, var_name: &str) -> Result<Volume> {
    let var = file
        .variable(var_name)
        .ok_or_else(|| VolProcError::VariableNotFound {
            var: var_name.to_string(),
        })?;

    let shape: Vec<usize> = var.dimensions().iter().map(netcdf::Dimension::len).collect();
    let values = var.get_values::<f32, _>(..)?;

    println!("🚀 Loading volume '{var_name}' with shape {}", format_shape(&shape));
    let data = ArrayD::from_shape_vec(shape, values)?;

    Ok(Volume::image(data, var_name))
}

/// Loads an integer variable as a label volume named after the variable.
pub fn read_labels(file: &File, var_name: &str) -> Result<Volume<i32>> {
    let var = file
        .variable(var_name)
        .ok_or_else(|| VolProcError::VariableNotFound {
            var: var_name.to_string(),
        })?;

    let shape: Vec<usize> = var.dimensions().iter().map(netcdf::Dimension::len).collect();
    let values = var.get_values::<i32, _>(..)?;

    println!("🚀 Loading labels '{var_name}' with shape {}", format_shape(&shape));
    let data = ArrayD::from_shape_vec(shape, values)?;

    Ok(Volume::labels(data, var_name))
}

/// Dimension names for an output of `shape` derived from `source`.
///
/// `source_axes[i]` is the source axis that output axis `i` descends from.
/// Such an axis reuses the source dimension name when its length is
/// unchanged and becomes `{source}_{len}` otherwise. Axes without a source
/// axis are named `dim{i}_{len}`. The same length always maps to the same
/// name, so several outputs can share dimensions in one file.
pub fn output_dimension_names(
    source: &[(String, usize)],
    source_axes: &[Option<usize>],
    shape: &[usize],
) -> Vec<String> {
    shape
        .iter()
        .enumerate()
        .map(|(i, &len)| {
            let src = source_axes.get(i).copied().flatten().and_then(|a| source.get(a));
            match src {
                Some((name, src_len)) if *src_len == len => name.clone(),
                Some((name, _)) => format!("{name}_{len}"),
                None => format!("dim{i}_{len}"),
            }
        })
        .collect()
}

/// Writes command results to a new NetCDF file
pub struct NetCDFWriter<'a> {
    input_file: &'a File,
    output_path: &'a Path,
}

impl<'a> NetCDFWriter<'a> {
    /// Create a writer copying attributes from `input_file`
    pub fn new(input_file: &'a File, output_path: &'a Path) -> Self {
        Self {
            input_file,
            output_path,
        }
    }

    /// Writes a single volume, see [`NetCDFWriter::write_volumes`].
    pub fn write_volume(&self, volume: &Volume, original_var_name: &str) -> Result<()> {
        self.write_volumes(std::slice::from_ref(volume), original_var_name)
    }

    /// Writes every volume as a variable named after it. An existing file at
    /// the output path is replaced.
    ///
    /// Attributes of `original_var_name` are copied onto each variable, with
    /// `_FillValue` converted to `f32`.
    pub fn write_volumes(&self, volumes: &[Volume], original_var_name: &str) -> Result<()> {
        let orig_var = self
            .input_file
            .variable(original_var_name)
            .ok_or_else(|| VolProcError::VariableNotFound {
                var: original_var_name.to_string(),
            })?;
        let source_dims = variable_dimensions(self.input_file, original_var_name)?;

        let fill_value = orig_var
            .attribute("_FillValue")
            .and_then(|attr| match attr.value().ok()? {
                AttributeValue::Float(v) => Some(v),
                AttributeValue::Double(v) => Some(v as f32),
                AttributeValue::Short(v) => Some(f32::from(v)),
                AttributeValue::Int(v) => Some(v as f32),
                _ => None,
            });

        let mut copied = Vec::new();
        for attr in orig_var.attributes() {
            if attr.name() == "_FillValue" || attr.name() == KIND_ATTRIBUTE {
                continue;
            }
            match attr.value() {
                Ok(value) => copied.push((attr.name().to_string(), value)),
                Err(e) => println!("⚠ Skipped unreadable attribute '{}': {}", attr.name(), e),
            }
        }

        if self.output_path.exists() {
            fs::remove_file(self.output_path)?;
        }
        let mut file = create(self.output_path)?;

        for volume in volumes {
            let dim_names = output_dimension_names(&source_dims, &volume.source_axes, volume.shape());
            for (dim_name, &dim_len) in dim_names.iter().zip(volume.shape()) {
                if file.dimension(dim_name).is_none() {
                    file.add_dimension(dim_name, dim_len)?;
                }
            }

            let dim_refs: Vec<&str> = dim_names.iter().map(String::as_str).collect();
            let mut new_var = file.add_variable::<f32>(&volume.name, &dim_refs)?;

            if let Some(fv) = fill_value {
                new_var.put_attribute("_FillValue", fv)?;
            }
            for (name, value) in &copied {
                new_var.put_attribute(name, value.clone())?;
            }
            new_var.put_attribute(KIND_ATTRIBUTE, volume.kind.as_str())?;

            new_var.put(volume.data.view(), ..)?;
            println!(
                "✅ Wrote '{}' {} to {}",
                volume.name,
                volume.shape_string(),
                self.output_path.display()
            );
        }

        file.add_attribute(
            "history",
            format!(
                "Created by VolProc from '{}' on {}",
                original_var_name,
                Utc::now().to_rfc3339()
            ),
        )?;

        Ok(())
    }
}
