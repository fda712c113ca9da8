use std::collections::HashMap;

use csv::ReaderBuilder;
use polars::prelude::*;
use thiserror::Error;

/// Rows preceding the header in a tracking export. The header itself sits on
/// the row after these.
const PREAMBLE_ROWS: usize = 2;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("file ended after {rows_found} rows, header expected on row {}", PREAMBLE_ROWS + 1)]
    MissingHeader { rows_found: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("data row {line_index} invalid: {message}")]
    DataRow { line_index: usize, message: String },

    #[error("data row {line_index} has {found} fields, header has {expected}")]
    ColumnCount {
        line_index: usize,
        expected: usize,
        found: usize,
    },

    #[error("file did not contain any data rows")]
    EmptyData,

    #[error("cannot derive subject id from '{file}': {message}")]
    SubjectId { file: String, message: String },

    #[error("failed to build tracking dataframe: {0}")]
    Frame(#[from] PolarsError),
}

/// Parses one tracking export into a dataframe.
///
/// The first two rows are discarded, the third row is the header, and every
/// remaining row holds numeric values. Repeated header names are disambiguated
/// the way pandas does it: the first occurrence keeps its name, later
/// occurrences get a `.1`, `.2`, ... suffix, which is how the `x.48` /
/// `likelihood.49` column convention arises from a header that simply repeats
/// `x`, `y`, `likelihood` per keypoint.
pub fn parse_tracking_table(contents: &str) -> Result<DataFrame, ParseError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(contents.as_bytes());

    let mut records = reader.records();

    let mut rows_found = 0;
    for _ in 0..PREAMBLE_ROWS {
        match records.next() {
            Some(record) => {
                record?;
                rows_found += 1;
            }
            None => return Err(ParseError::MissingHeader { rows_found }),
        }
    }

    let header = match records.next() {
        Some(record) => record?,
        None => return Err(ParseError::MissingHeader { rows_found }),
    };
    let names = mangle_duplicate_names(&header);

    let mut columns: Vec<Vec<Option<f64>>> = vec![Vec::new(); names.len()];
    let mut data_rows = 0;

    for (offset, record) in records.enumerate() {
        let record = record?;
        let line_index = PREAMBLE_ROWS + 2 + offset;

        if record.len() != names.len() {
            return Err(ParseError::ColumnCount {
                line_index,
                expected: names.len(),
                found: record.len(),
            });
        }

        for (column, value) in columns.iter_mut().zip(record.iter()) {
            column.push(parse_optional_f64(value, line_index)?);
        }
        data_rows += 1;
    }

    if data_rows == 0 {
        return Err(ParseError::EmptyData);
    }

    let columns: Vec<Column> = names
        .into_iter()
        .zip(columns)
        .map(|(name, values)| Series::new(name.into(), values).into())
        .collect();

    Ok(DataFrame::new(columns)?)
}

/// Pandas-style duplicate-header mangling: `x, y, x, y` becomes
/// `x, y, x.1, y.1`.
fn mangle_duplicate_names(header: &csv::StringRecord) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(header.len());

    for field in header.iter() {
        let base = field.trim().to_string();
        let count = seen.entry(base.clone()).or_insert(0);
        if *count == 0 {
            names.push(base.clone());
        } else {
            names.push(format!("{}.{}", base, count));
        }
        *count += 1;
    }

    names
}

fn parse_optional_f64(value: &str, line_index: usize) -> Result<Option<f64>, ParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }

    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|err| ParseError::DataRow {
            line_index,
            message: format!("failed to parse '{trimmed}' as float: {err}"),
        })
}
