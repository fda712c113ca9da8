use thiserror::Error;

use crate::parser::ParseError;
use crate::types::SubjectId;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("column '{column}' not found in table")]
    MissingColumn { column: String },

    #[error("column '{column}' has zero variance, cannot z-score")]
    ZeroVariance { column: String },

    #[error("subject {subject} does not match the aggregate schema: {message}")]
    SchemaMismatch { subject: SubjectId, message: String },

    #[error("dataset contains no subjects")]
    EmptyDataset,

    #[error("frame rate must be at least 1 frame per second")]
    InvalidFrameRate,

    #[error("duplicate subject id '{0}'")]
    DuplicateSubject(SubjectId),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Polars(#[from] polars::error::PolarsError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
