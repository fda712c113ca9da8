use polars::prelude::*;

use crate::error::{PipelineError, Result};

pub const DEFAULT_FRAME_RATE: u32 = 30;

/// Collapses frame rows into one-second windows by column-wise arithmetic
/// mean.
///
/// Window i covers frame indices [i*fps, (i+1)*fps). Every complete window is
/// retained and a trailing partial window is dropped, so the output has
/// rows/fps windows. Nulls are excluded from window means. The column set and
/// order are unchanged; every output column is Float64.
pub fn resample_to_seconds(df: &DataFrame, frame_rate: u32) -> Result<DataFrame> {
    if frame_rate == 0 {
        return Err(PipelineError::InvalidFrameRate);
    }

    let fps = frame_rate as usize;
    let windows = df.height() / fps;

    let mut columns: Vec<Column> = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let series = column.as_materialized_series().cast(&DataType::Float64)?;
        let ca = series.f64()?;

        let mut means: Vec<Option<f64>> = Vec::with_capacity(windows);
        for window in 0..windows {
            means.push(ca.slice((window * fps) as i64, fps).mean());
        }

        columns.push(Series::new(column.name().clone(), means).into());
    }

    Ok(DataFrame::new(columns)?)
}
