use polars::prelude::*;

use pupilprep_core::flatten::flatten_rows;

#[test]
fn flatten_is_row_major() {
    let df = df!(
        "a" => &[1.0f64, 4.0],
        "b" => &[2.0f64, 5.0],
        "c" => &[3.0f64, 6.0],
    )
    .unwrap();

    let flat = flatten_rows(&df).expect("flatten failed");

    assert_eq!(flat.height(), 1);
    assert_eq!(flat.width(), 6);

    for (position, expected) in [1.0, 2.0, 3.0, 4.0, 5.0, 6.0].iter().enumerate() {
        let name = position.to_string();
        let value = flat.column(&name).unwrap().f64().unwrap().get(0).unwrap();
        assert!(
            (value - expected).abs() < 1e-12,
            "position {position} held {value}, expected {expected}"
        );
    }
}

#[test]
fn flat_position_is_row_times_width_plus_column() {
    let rows = 3;
    let width = 2;
    let a: Vec<f64> = (0..rows).map(|row| row as f64 * 10.0).collect();
    let b: Vec<f64> = (0..rows).map(|row| row as f64 * 10.0 + 1.0).collect();
    let df = df!("a" => a, "b" => b).unwrap();

    let flat = flatten_rows(&df).expect("flatten failed");

    for row in 0..rows {
        for column in 0..width {
            let position = row * width + column;
            let value = flat
                .column(&position.to_string())
                .unwrap()
                .f64()
                .unwrap()
                .get(0)
                .unwrap();
            let expected = row as f64 * 10.0 + column as f64;
            assert!((value - expected).abs() < 1e-12);
        }
    }
}

#[test]
fn flattened_cells_keep_their_source_dtype() {
    let df = df!(
        "value" => &[1.5f64, 2.5],
        "id" => &["001", "001"],
    )
    .unwrap();

    let flat = flatten_rows(&df).expect("flatten failed");

    assert_eq!(flat.width(), 4);
    assert_eq!(flat.column("1").unwrap().str().unwrap().get(0), Some("001"));
    assert_eq!(flat.column("2").unwrap().f64().unwrap().get(0), Some(2.5));
}

#[test]
fn empty_frame_flattens_to_empty() {
    let flat = flatten_rows(&DataFrame::default()).expect("flatten failed");
    assert_eq!(flat.width(), 0);
}
