use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::parser::{parse_tracking_table, ParseError};
use crate::types::{Dataset, SubjectId};

/// One tracking export as handed over by the caller. File reading happens
/// outside the library; only the name (for the subject id) and the decoded
/// contents come through.
#[derive(Debug)]
pub struct FileInput<'a> {
    pub file_name: &'a str,
    pub contents: &'a str,
}

/// Parses every input into a subject table and collects them into a dataset,
/// in input order. A duplicate subject id or any parse failure aborts the
/// batch.
pub fn load_dataset(inputs: &[FileInput<'_>]) -> Result<Dataset> {
    if inputs.is_empty() {
        return Err(PipelineError::EmptyDataset);
    }

    let mut dataset = Dataset::new();
    for input in inputs {
        let subject =
            SubjectId::from_file_name(input.file_name).map_err(|message| ParseError::SubjectId {
                file: input.file_name.to_string(),
                message,
            })?;
        let table = parse_tracking_table(input.contents)?;
        debug!(subject = %subject, rows = table.height(), "parsed tracking table");
        dataset.insert(subject, table)?;
    }

    Ok(dataset)
}
