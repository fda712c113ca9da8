use polars::prelude::*;

use crate::error::Result;
use crate::types::SubjectId;

/// Appends the constant `id` column carrying the subject identifier on every
/// row. Must run once the row count is final; the orchestrator places it
/// after resampling and before flattening.
pub fn label_subject(df: &DataFrame, subject: &SubjectId) -> Result<DataFrame> {
    let mut output = df.clone();
    let ids = Series::new("id".into(), vec![subject.as_str(); df.height()]);
    output.hstack_mut(&[ids.into()])?;
    Ok(output)
}
