use polars::prelude::*;

use pupilprep_core::aggregate::concatenate_dataset;
use pupilprep_core::error::PipelineError;
use pupilprep_core::types::{Dataset, SubjectId};

fn subject(id: &str) -> SubjectId {
    SubjectId::new(id).unwrap()
}

#[test]
fn row_blocks_follow_insertion_order() {
    let mut dataset = Dataset::new();
    dataset
        .insert(subject("001"), df!("a" => &[1.0f64, 2.0]).unwrap())
        .unwrap();
    dataset
        .insert(subject("002"), df!("a" => &[3.0f64, 4.0, 5.0]).unwrap())
        .unwrap();

    let merged = concatenate_dataset(&dataset, false).expect("concat failed");

    assert_eq!(merged.height(), 5);
    let a = merged.column("a").unwrap().f64().unwrap();
    let values: Vec<f64> = a.into_iter().flatten().collect();
    assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn flattened_tables_merge_to_one_row_per_subject() {
    let mut dataset = Dataset::new();
    dataset
        .insert(subject("001"), df!("0" => &[1.0f64], "1" => &[2.0f64]).unwrap())
        .unwrap();
    dataset
        .insert(subject("002"), df!("0" => &[3.0f64], "1" => &[4.0f64]).unwrap())
        .unwrap();

    let merged = concatenate_dataset(&dataset, true).expect("concat failed");

    assert_eq!(merged.height(), 2);
    assert_eq!(merged.width(), 2);
}

#[test]
fn mismatched_columns_fail_with_subject() {
    let mut dataset = Dataset::new();
    dataset
        .insert(subject("001"), df!("a" => &[1.0f64]).unwrap())
        .unwrap();
    dataset
        .insert(subject("002"), df!("b" => &[2.0f64]).unwrap())
        .unwrap();

    let err = concatenate_dataset(&dataset, false).unwrap_err();
    match err {
        PipelineError::SchemaMismatch { subject, .. } => assert_eq!(subject.as_str(), "002"),
        other => panic!("expected SchemaMismatch, got {other:?}"),
    }
}

#[test]
fn multi_row_table_rejected_in_flattened_layout() {
    let mut dataset = Dataset::new();
    dataset
        .insert(subject("001"), df!("0" => &[1.0f64, 2.0]).unwrap())
        .unwrap();

    let err = concatenate_dataset(&dataset, true).unwrap_err();
    assert!(matches!(err, PipelineError::SchemaMismatch { .. }));
}

#[test]
fn empty_dataset_is_an_error() {
    let err = concatenate_dataset(&Dataset::new(), false).unwrap_err();
    assert!(matches!(err, PipelineError::EmptyDataset));
}
