use polars::prelude::*;

use crate::error::Result;

/// Reshapes an R x C table into a single row of R*C values in row-major
/// order (rows outer, columns inner).
///
/// Column names become purely positional ("0", "1", ...); each flattened cell
/// keeps the dtype of its source column. The reshape is lossy unless (R, C)
/// and the column order are retained externally.
pub fn flatten_rows(df: &DataFrame) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(df.height() * df.width());
    let mut position = 0usize;

    for row in 0..df.height() {
        for column in df.get_columns() {
            let value = column.as_materialized_series().get(row)?;
            let cell = Series::from_any_values(position.to_string().into(), &[value], true)?;
            columns.push(cell.into());
            position += 1;
        }
    }

    Ok(DataFrame::new(columns)?)
}
