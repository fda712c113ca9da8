use polars::prelude::*;
use tracing::warn;

use crate::error::{PipelineError, Result};

pub const HORIZONTAL_COLUMN: &str = "pupil_hor_diameter";
pub const VERTICAL_COLUMN: &str = "pupil_ver_diameter";

/// Keypoint indices of the left and right pupil margin.
const HORIZONTAL_KEYPOINTS: (u32, u32) = (48, 49);
/// Keypoint indices of the top and bottom pupil margin.
const VERTICAL_KEYPOINTS: (u32, u32) = (46, 47);

/// Appends the horizontal and vertical pupil-diameter columns.
///
/// Each diameter is the per-row Euclidean distance between two tracked
/// keypoints. An orientation whose coordinate columns are not all present is
/// skipped with a warning and the table is left otherwise unmodified. A row
/// with a null in any input coordinate yields a null diameter.
///
/// With `normalize` set, each computed column is replaced by its population
/// z-score ((x - mean) / stddev, ddof = 0), computed over the whole column
/// after every row has been produced. A zero-variance column is an error
/// rather than a silent division by zero.
pub fn add_pupil_diameters(df: &DataFrame, normalize: bool) -> Result<DataFrame> {
    let mut output = df.clone();
    append_diameter(&mut output, HORIZONTAL_COLUMN, HORIZONTAL_KEYPOINTS, normalize)?;
    append_diameter(&mut output, VERTICAL_COLUMN, VERTICAL_KEYPOINTS, normalize)?;
    Ok(output)
}

fn append_diameter(
    df: &mut DataFrame,
    name: &str,
    keypoints: (u32, u32),
    normalize: bool,
) -> Result<()> {
    let (first, second) = keypoints;
    let required = [
        format!("x.{first}"),
        format!("y.{first}"),
        format!("x.{second}"),
        format!("y.{second}"),
    ];

    if let Some(missing) = required.iter().find(|column| df.column(column).is_err()) {
        warn!(
            column = %missing,
            diameter = name,
            "keypoint column missing, skipping diameter"
        );
        return Ok(());
    }

    let len = df.height();
    let ax = df.column(required[0].as_str())?.f64()?;
    let ay = df.column(required[1].as_str())?.f64()?;
    let bx = df.column(required[2].as_str())?.f64()?;
    let by = df.column(required[3].as_str())?.f64()?;

    let mut values: Vec<Option<f64>> = Vec::with_capacity(len);
    for idx in 0..len {
        match (ax.get(idx), ay.get(idx), bx.get(idx), by.get(idx)) {
            (Some(ax), Some(ay), Some(bx), Some(by)) => {
                values.push(Some(((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()));
            }
            _ => values.push(None),
        }
    }

    let values = if normalize {
        zscore(values, name)?
    } else {
        values
    };

    df.hstack_mut(&[Series::new(name.into(), values).into()])?;
    Ok(())
}

/// Population z-score over the finished column. Nulls are excluded from the
/// mean and stddev and stay null in the output.
fn zscore(values: Vec<Option<f64>>, column: &str) -> Result<Vec<Option<f64>>> {
    let observed: Vec<f64> = values.iter().flatten().copied().collect();

    if observed.is_empty() {
        return Err(PipelineError::ZeroVariance {
            column: column.to_string(),
        });
    }

    let count = observed.len() as f64;
    let mean = observed.iter().sum::<f64>() / count;
    let variance = observed.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
    let stddev = variance.sqrt();

    if stddev == 0.0 {
        return Err(PipelineError::ZeroVariance {
            column: column.to_string(),
        });
    }

    Ok(values
        .into_iter()
        .map(|value| value.map(|v| (v - mean) / stddev))
        .collect())
}
