use polars::prelude::DataFrame;

use crate::error::{PipelineError, Result};
use crate::types::Dataset;

/// Stacks every subject table into one dataframe, preserving dataset
/// insertion order as row-block order. Aggregation is all-or-nothing: any
/// incompatible table fails the whole merge.
///
/// All tables must share an identical column list (names, in order). In the
/// flattened layout each table is additionally required to be a single row,
/// so the merged result carries one row per subject.
pub fn concatenate_dataset(dataset: &Dataset, flattened: bool) -> Result<DataFrame> {
    let mut iter = dataset.iter();
    let Some((first_subject, first)) = iter.next() else {
        return Err(PipelineError::EmptyDataset);
    };

    if flattened && first.height() != 1 {
        return Err(PipelineError::SchemaMismatch {
            subject: first_subject.clone(),
            message: format!("flattened table has {} rows, expected 1", first.height()),
        });
    }

    let reference = first.get_column_names();
    let mut combined = first.clone();

    for (subject, table) in iter {
        let names = table.get_column_names();
        if names != reference {
            return Err(PipelineError::SchemaMismatch {
                subject: subject.clone(),
                message: format!(
                    "column list {:?} does not match first subject's {:?}",
                    names, reference
                ),
            });
        }

        if flattened && table.height() != 1 {
            return Err(PipelineError::SchemaMismatch {
                subject: subject.clone(),
                message: format!("flattened table has {} rows, expected 1", table.height()),
            });
        }

        combined.vstack_mut(table)?;
    }

    Ok(combined)
}
