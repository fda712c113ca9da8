use polars::prelude::DataFrame;

use crate::error::{PipelineError, Result};

/// Number of tracked keypoints in an export, fixed by the column convention.
pub const KEYPOINT_COUNT: usize = 50;

/// Columns a tracking export carries that the analysis never consumes: the
/// frame index and one likelihood column per keypoint.
pub fn tracking_drop_columns() -> Vec<String> {
    let mut columns = Vec::with_capacity(KEYPOINT_COUNT + 1);
    columns.push("coords".to_string());
    columns.push("likelihood".to_string());
    for index in 1..KEYPOINT_COUNT {
        columns.push(format!("likelihood.{index}"));
    }
    columns
}

/// Removes the frame-index and likelihood columns from a subject table.
///
/// Every listed column must be present; a missing one aborts the run, since
/// it means the file does not follow the tracking-export convention. Row
/// count and the order of the remaining columns are unchanged.
pub fn drop_tracking_columns(df: &DataFrame) -> Result<DataFrame> {
    let drop = tracking_drop_columns();

    for column in &drop {
        if df.column(column).is_err() {
            return Err(PipelineError::MissingColumn {
                column: column.clone(),
            });
        }
    }

    Ok(df.drop_many(drop))
}
