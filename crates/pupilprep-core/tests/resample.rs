use polars::prelude::*;

use pupilprep_core::error::PipelineError;
use pupilprep_core::resample::resample_to_seconds;

fn frame_series(rows: usize) -> DataFrame {
    let values: Vec<f64> = (0..rows).map(|row| row as f64).collect();
    let doubled: Vec<f64> = values.iter().map(|v| v * 2.0).collect();
    df!(
        "a" => values,
        "b" => doubled,
    )
    .unwrap()
}

#[test]
fn all_complete_windows_are_retained() {
    // 95 rows at 30 fps: three complete windows, the 5-row tail is dropped.
    let df = resample_to_seconds(&frame_series(95), 30).expect("resample failed");

    assert_eq!(df.height(), 3);
    assert_eq!(df.width(), 2);

    let a = df.column("a").unwrap().f64().unwrap();
    assert!((a.get(0).unwrap() - 14.5).abs() < 1e-12);
    assert!((a.get(1).unwrap() - 44.5).abs() < 1e-12);
    assert!((a.get(2).unwrap() - 74.5).abs() < 1e-12);

    let b = df.column("b").unwrap().f64().unwrap();
    assert!((b.get(1).unwrap() - 89.0).abs() < 1e-12);
}

#[test]
fn exact_multiple_keeps_every_window() {
    let df = resample_to_seconds(&frame_series(60), 30).expect("resample failed");
    assert_eq!(df.height(), 2);
}

#[test]
fn short_input_yields_empty_output_with_columns_intact() {
    let df = resample_to_seconds(&frame_series(29), 30).expect("resample failed");
    assert_eq!(df.height(), 0);
    assert_eq!(df.width(), 2);
}

#[test]
fn window_means_skip_nulls() {
    let df = df!(
        "a" => &[Some(1.0f64), None, Some(3.0)],
    )
    .unwrap();

    let result = resample_to_seconds(&df, 3).expect("resample failed");
    let a = result.column("a").unwrap().f64().unwrap();
    assert!((a.get(0).unwrap() - 2.0).abs() < 1e-12);
}

#[test]
fn zero_frame_rate_is_rejected() {
    let err = resample_to_seconds(&frame_series(10), 0).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidFrameRate));
}
