//! Entry point for the VolProc application.
//! Handles CLI parsing, file loading, and dispatches the volume commands.

use clap::Parser;
use netcdf::open;
use std::path::Path;
use vol_proc::{
    commands, describe_volume, get_parallel_info, masking, netcdf_io, print_metadata, summarize_variable,
    NetCDFWriter, ParallelConfig, Result, Volume,
};

mod cli;

use cli::{Args, Command};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    ParallelConfig::new(args.threads).setup_global_pool()?;
    if args.verbose {
        get_parallel_info().print_info();
    }

    let file = open(&args.file)?;
    println!("Successfully opened NetCDF file: {}", args.file.display());

    run(&args, &file)?;
    Ok(())
}

fn run(args: &Args, file: &netcdf::File) -> Result<()> {
    let (results, source_var) = match &args.command {
        Command::Inspect => return print_metadata(file),
        Command::Summary { var } => {
            summarize_variable(file, var)?;
            return Ok(());
        }
        Command::AveragePerSlice {
            var,
            scans_per_avg,
            axis,
            no_trim,
        } => {
            let vol = netcdf_io::read_volume(file, var)?;
            let out = commands::average_per_slice(&vol, *scans_per_avg, *axis, !no_trim)?;
            (vec![out], var)
        }
        Command::BlockAverage {
            var,
            scans_per_avg,
            axis,
        } => {
            let vol = netcdf_io::read_volume(file, var)?;
            (vec![commands::average_blocks(&vol, *scans_per_avg, *axis)?], var)
        }
        Command::IsolateLabel {
            var,
            labels,
            label,
            labels_file,
        } => {
            let vol = netcdf_io::read_volume(file, var)?;
            let label_vol = match labels_file {
                Some(path) => netcdf_io::read_labels(&open(path)?, labels)?,
                None => netcdf_io::read_labels(file, labels)?,
            };
            if args.verbose {
                let count = masking::count_label(&label_vol.data, *label);
                println!("Label {label}: {count} of {} samples", label_vol.data.len());
            }
            (
                vec![commands::isolate_labeled_volume(&vol, &label_vol, *label)?],
                var,
            )
        }
        Command::Reshape { var, shape } => {
            let vol = netcdf_io::read_volume(file, var)?;
            if args.verbose {
                println!("New shape: {shape} for volume {}", vol.shape_string());
            }
            (vec![commands::reshape(&vol, shape)?], var)
        }
        Command::Split { var, parts, axis } => {
            let vol = netcdf_io::read_volume(file, var)?;
            (commands::split(&vol, *parts, *axis)?, var)
        }
        Command::Stack { vars, axis } => {
            let volumes = vars
                .iter()
                .map(|v| netcdf_io::read_volume(file, v))
                .collect::<Result<Vec<Volume>>>()?;
            (vec![commands::stack(&volumes, *axis)?], &vars[0])
        }
    };

    match &args.output_netcdf {
        Some(output_path) => {
            let output_path = Path::new(output_path);
            NetCDFWriter::new(file, output_path).write_volumes(&results, source_var)?;
            println!("✅ Saved result to {}", output_path.display());
        }
        None => results.iter().for_each(describe_volume),
    }

    Ok(())
}
