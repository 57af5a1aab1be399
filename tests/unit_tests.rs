//! Unit tests for the VolProc modules other than the averaging kernels

use ndarray::{Array3, ArrayD};
use vol_proc::{
    commands,
    errors::{Result, VolProcError},
    masking::{count_label, isolate_label},
    metadata::VolumeSummary,
    parallel::{get_parallel_info, ParallelConfig},
    shaping::{reshape_volume, split_volume, stack_arrays, ShapeSpec, ShapeToken},
    volume::{Volume, VolumeKind},
};

fn indexed(shape: &[usize]) -> ArrayD<f32> {
    let n: usize = shape.iter().product();
    ArrayD::from_shape_vec(shape.to_vec(), (0..n).map(|i| i as f32).collect()).unwrap()
}

#[test]
fn test_error_types() {
    let err = VolProcError::InvalidParameter("scans_per_avg must be odd".to_string());
    assert_eq!(format!("{}", err), "Invalid parameter: scans_per_avg must be odd");

    let var_err = VolProcError::VariableNotFound {
        var: "oct".to_string(),
    };
    assert!(format!("{}", var_err).contains("Variable 'oct' not found"));

    let shape_err = VolProcError::ShapeMismatch {
        expected: vec![2, 3],
        found: vec![3, 2],
    };
    assert_eq!(
        format!("{}", shape_err),
        "Shape mismatch: expected [2, 3], found [3, 2]"
    );

    let generic: VolProcError = "something broke".into();
    assert_eq!(format!("{}", generic), "something broke");
}

#[test]
fn test_parallel_config() {
    let default_config = ParallelConfig::default();
    assert!(default_config.num_threads.is_none());
    assert_eq!(default_config, ParallelConfig::new(None));

    let config_4 = ParallelConfig::with_threads(4);
    assert_eq!(config_4.num_threads, Some(4));

    let all_cores = ParallelConfig::all_cores();
    assert!(all_cores.num_threads.unwrap() > 0);

    assert!(default_config.current_threads() > 0);

    // Leaving the pool at its default never fails
    assert!(default_config.setup_global_pool().is_ok());
    assert!(matches!(
        ParallelConfig::with_threads(0).setup_global_pool(),
        Err(VolProcError::ThreadPoolError(_))
    ));
}

#[test]
fn test_parallel_info() {
    let info = get_parallel_info();
    assert!(info.current_threads > 0);
    assert!(info.available_cores > 0);
    assert!(info.available_parallelism > 0);
    info.print_info();
}

#[test]
fn test_shape_spec_parsing() {
    let spec: ShapeSpec = "(-1,3,:,:)".parse().unwrap();
    assert_eq!(
        spec.tokens(),
        &[
            ShapeToken::Infer,
            ShapeToken::Literal(3),
            ShapeToken::Keep,
            ShapeToken::Keep
        ]
    );
    assert_eq!(spec.to_string(), "(-1,3,:,:)");

    let spaced: ShapeSpec = "  ( -1 , 3, : ,: ) ".parse().unwrap();
    assert_eq!(spaced, spec);

    let bare: ShapeSpec = "-1,3,:,:".parse().unwrap();
    assert_eq!(bare, spec);

    let single: ShapeSpec = "12".parse().unwrap();
    assert_eq!(single.tokens(), &[ShapeToken::Literal(12)]);
}

#[test]
fn test_shape_spec_rejects_malformed_input() {
    for bad in ["", "()", "  ", "(1,2", "1,2)", "1,,2", "(a,2)", "-2,3", "1.5", "(:;:)", ",3"] {
        match bad.parse::<ShapeSpec>() {
            Err(VolProcError::InvalidShapeSpec { .. }) => {}
            other => panic!("Expected InvalidShapeSpec for {:?}, got {:?}", bad, other),
        }
    }
}

#[test]
fn test_shape_spec_resolution() -> Result<()> {
    let spec: ShapeSpec = "(-1,3,:,:)".parse()?;
    assert_eq!(spec.resolve(&[30, 4, 5])?, vec![10, 3, 4, 5]);

    // Same length: positional
    let spec: ShapeSpec = "(:,-1,2)".parse()?;
    assert_eq!(spec.resolve(&[3, 4, 6])?, vec![3, 12, 2]);

    // Shorter: ':' maps to the trailing axes
    let spec: ShapeSpec = "(6,:)".parse()?;
    assert_eq!(spec.resolve(&[2, 3, 4])?, vec![6, 4]);

    let spec: ShapeSpec = "-1".parse()?;
    assert_eq!(spec.resolve(&[2, 3, 4])?, vec![24]);

    Ok(())
}

#[test]
fn test_shape_spec_resolution_errors() {
    let cases = [
        ("(-1,-1,:)", vec![2, 3, 4]),
        ("(7,:)", vec![2, 3, 4]),
        ("(:,:,:,:)", vec![2, 3, 4]),
        ("(-1,5,:,:)", vec![6, 4, 4]),
        ("(0,-1)", vec![2, 3]),
    ];

    for (spec, shape) in cases {
        let spec: ShapeSpec = spec.parse().unwrap();
        assert!(
            matches!(spec.resolve(&shape), Err(VolProcError::InvalidShapeSpec { .. })),
            "{} should not resolve against {:?}",
            spec,
            shape
        );
    }
}

#[test]
fn test_reshape_keeps_element_order() -> Result<()> {
    let volume = indexed(&[30, 4, 5]);
    let spec: ShapeSpec = "(-1,3,:,:)".parse()?;

    let reshaped = reshape_volume(&volume, &spec)?;

    assert_eq!(reshaped.shape(), &[10, 3, 4, 5]);
    assert!(reshaped.iter().eq(volume.iter()));
    // m-scan 1 of b-scan 2 is original slice 7
    assert_eq!(reshaped[[2, 1, 0, 0]], volume[[7, 0, 0]]);

    // Column-major input is flattened in logical order
    let column_major = volume.t().to_owned().reversed_axes();
    let flat = reshape_volume(&column_major, &"-1".parse()?)?;
    assert!(flat.iter().eq(volume.iter()));

    Ok(())
}

#[test]
fn test_split_volume() -> Result<()> {
    let volume = indexed(&[9, 2, 2]);

    let parts = split_volume(&volume, 3, 0)?;
    assert_eq!(parts.len(), 3);
    for (i, part) in parts.iter().enumerate() {
        assert_eq!(part.shape(), &[3, 2, 2]);
        assert_eq!(part[[0, 0, 0]], (i * 3 * 4) as f32);
    }

    // Remainder is dropped
    let volume = indexed(&[2, 10, 2]);
    let parts = split_volume(&volume, 3, 1)?;
    assert_eq!(parts.len(), 3);
    assert!(parts.iter().all(|p| p.shape() == &[2, 3, 2]));
    assert_eq!(parts[2][[0, 0, 0]], volume[[0, 6, 0]]);

    Ok(())
}

#[test]
fn test_split_single_slice_chunks_drop_axis() -> Result<()> {
    let volume = indexed(&[2, 3, 4]);

    let parts = split_volume(&volume, 3, 1)?;

    assert_eq!(parts.len(), 3);
    for (i, part) in parts.iter().enumerate() {
        assert_eq!(part.shape(), &[2, 4]);
        assert_eq!(part[[1, 3]], volume[[1, i, 3]]);
    }
    Ok(())
}

#[test]
fn test_split_invalid_parameters() {
    let volume = indexed(&[4, 2, 2]);

    assert!(matches!(split_volume(&volume, 0, 0), Err(VolProcError::InvalidParameter(_))));
    assert!(matches!(split_volume(&volume, 5, 0), Err(VolProcError::InvalidParameter(_))));
    assert!(matches!(split_volume(&volume, 2, 3), Err(VolProcError::InvalidParameter(_))));
}

#[test]
fn test_stack_arrays() -> Result<()> {
    let a = indexed(&[2, 3]);
    let b = a.mapv(|v| v + 100.0);

    let stacked = stack_arrays(&[&a, &b], 0)?;
    assert_eq!(stacked.shape(), &[2, 2, 3]);
    assert_eq!(stacked[[0, 1, 2]], 5.0);
    assert_eq!(stacked[[1, 1, 2]], 105.0);

    let last = stack_arrays(&[&a, &b, &a], 2)?;
    assert_eq!(last.shape(), &[2, 3, 3]);
    assert_eq!(last[[1, 0, 1]], 103.0);

    Ok(())
}

#[test]
fn test_stack_arrays_errors() {
    let a = indexed(&[2, 3]);
    let b = indexed(&[3, 2]);

    match stack_arrays(&[&a, &b], 0) {
        Err(VolProcError::ShapeMismatch { expected, found }) => {
            assert_eq!(expected, vec![2, 3]);
            assert_eq!(found, vec![3, 2]);
        }
        other => panic!("Expected ShapeMismatch, got {:?}", other),
    }

    assert!(matches!(
        stack_arrays::<f32>(&[], 0),
        Err(VolProcError::InvalidParameter(_))
    ));
    assert!(matches!(
        stack_arrays(&[&a, &a], 3),
        Err(VolProcError::InvalidParameter(_))
    ));
}

#[test]
fn test_isolate_label() -> Result<()> {
    let volume = Array3::from_shape_fn((2, 2, 2), |(z, y, x)| (1 + z * 4 + y * 2 + x) as f32).into_dyn();
    let labels = Array3::from_shape_fn((2, 2, 2), |(z, _, x)| (z + x) as i32).into_dyn();

    let masked = isolate_label(&volume, &labels, 1)?;

    assert_eq!(masked.shape(), volume.shape());
    for ((value, original), label) in masked.iter().zip(volume.iter()).zip(labels.iter()) {
        if *label == 1 {
            assert_eq!(value, original);
        } else {
            assert_eq!(*value, 0.0);
        }
    }
    assert_eq!(count_label(&labels, 1), 4);

    // Absent label zeroes everything
    let empty = isolate_label(&volume, &labels, 9)?;
    assert!(empty.iter().all(|&v| v == 0.0));

    Ok(())
}

#[test]
fn test_isolate_label_shape_mismatch() {
    let volume = ArrayD::<f32>::ones(vec![2, 2, 2]);
    let labels = ArrayD::<i32>::ones(vec![2, 2, 3]);

    assert!(matches!(
        isolate_label(&volume, &labels, 1),
        Err(VolProcError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_command_naming() -> Result<()> {
    let vol = Volume::image(Array3::from_shape_fn((7, 2, 2), |(z, _, _)| z as f32).into_dyn(), "oct");

    let per = commands::average_per_slice(&vol, 3, 0, true)?;
    assert_eq!(per.name, "oct_3_per");
    assert_eq!(per.kind, VolumeKind::Image);
    assert_eq!(per.shape(), &[5, 2, 2]);

    let blocks = commands::average_blocks(&vol, 7, 0)?;
    assert_eq!(blocks.name, "oct_avg_7");
    assert_eq!(blocks.data[[0, 0, 0]], 3.0);

    let labels = Volume::labels(ArrayD::<i32>::ones(vec![7, 2, 2]), "seg");
    let masked = commands::isolate_labeled_volume(&vol, &labels, 1)?;
    assert_eq!(masked.name, "oct_1_mask");
    assert_eq!(masked.data, vol.data);

    let reshaped = commands::reshape(&labels, &"(:,-1)".parse()?)?;
    assert_eq!(reshaped.name, "seg_RS");
    assert_eq!(reshaped.kind, VolumeKind::Labels);
    assert_eq!(reshaped.shape(), &[2, 14]);

    let parts = commands::split(&vol, 2, 0)?;
    let names: Vec<_> = parts.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["oct_0", "oct_1"]);

    let stacked = commands::stack(&[vol.clone(), vol.clone()], 0)?;
    assert_eq!(stacked.name, "Stacked_Selection_Axis_0");
    assert_eq!(stacked.kind, VolumeKind::Image);
    assert_eq!(stacked.shape(), &[2, 7, 2, 2]);

    Ok(())
}

#[test]
fn test_command_source_axes() -> Result<()> {
    let vol = Volume::image(indexed(&[3, 4, 5]), "oct");
    assert_eq!(vol.source_axes, vec![Some(0), Some(1), Some(2)]);

    let per = commands::average_per_slice(&vol, 3, 0, true)?;
    assert_eq!(per.source_axes, vec![Some(0), Some(1), Some(2)]);

    // Single-slice chunks drop the split axis
    let thin = commands::split(&vol, 3, 0)?;
    assert_eq!(thin[0].shape(), &[4, 5]);
    assert_eq!(thin[0].source_axes, vec![Some(1), Some(2)]);

    let thick = commands::split(&vol, 2, 1)?;
    assert_eq!(thick[1].source_axes, vec![Some(0), Some(1), Some(2)]);

    let stacked = commands::stack(&[vol.clone(), vol.clone()], 1)?;
    assert_eq!(stacked.source_axes, vec![Some(0), None, Some(1), Some(2)]);

    // Stacking split chunks maps back through the removed axis
    let restacked = commands::stack(&thin, 0)?;
    assert_eq!(restacked.source_axes, vec![None, Some(1), Some(2)]);

    let reshaped = commands::reshape(&vol, &"(-1,3,:,:)".parse()?)?;
    assert_eq!(reshaped.shape(), &[1, 3, 4, 5]);
    assert_eq!(reshaped.source_axes, vec![None, None, Some(1), Some(2)]);

    let flattened = commands::reshape(&vol, &"(:,-1)".parse()?)?;
    assert_eq!(flattened.shape(), &[4, 15]);
    assert_eq!(flattened.source_axes, vec![Some(1), None]);

    Ok(())
}

#[test]
fn test_kept_axes_right_aligned() -> Result<()> {
    let longer: ShapeSpec = "(-1,3,:,:)".parse()?;
    assert_eq!(longer.kept_axes(3), vec![None, None, Some(1), Some(2)]);

    let same: ShapeSpec = "(:,-1,:)".parse()?;
    assert_eq!(same.kept_axes(3), vec![Some(0), None, Some(2)]);

    let shorter: ShapeSpec = "(-1,:)".parse()?;
    assert_eq!(shorter.kept_axes(3), vec![None, Some(2)]);

    Ok(())
}

#[test]
fn test_average_per_slice_requires_3d() {
    let flat = Volume::image(ArrayD::<f32>::zeros(vec![7, 4]), "bscan");

    match commands::average_per_slice(&flat, 3, 0, true) {
        Err(VolProcError::InvalidParameter(msg)) => {
            assert_eq!(msg, "volume must be 3-dimensional")
        }
        other => panic!("Expected InvalidParameter, got {:?}", other),
    }
}

#[test]
fn test_volume_summary() {
    let data = ArrayD::from_shape_vec(vec![2, 3], vec![1.0_f32, f32::NAN, 3.0, f32::INFINITY, 5.0, 3.0]).unwrap();

    let summary = VolumeSummary::of(&data).unwrap();

    assert_eq!(summary.min, 1.0);
    assert_eq!(summary.max, 5.0);
    assert_eq!(summary.valid, 4);
    assert_eq!(summary.total, 6);
    assert!((summary.mean - 3.0).abs() < 1e-12);
    assert!((summary.std_dev - 2.0_f64.sqrt()).abs() < 1e-12);

    let invalid = ArrayD::from_elem(vec![2], f32::NAN);
    assert!(VolumeSummary::of(&invalid).is_none());
}

#[test]
fn test_volume_accessors() {
    let vol = Volume::image(ArrayD::<f32>::zeros(vec![7, 4, 4]), "oct");
    assert_eq!(vol.ndim(), 3);
    assert_eq!(vol.shape_string(), "(7 × 4 × 4)");
    assert_eq!(VolumeKind::Labels.to_string(), "labels");
}
