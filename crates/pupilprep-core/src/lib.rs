pub mod aggregate;
pub mod diameter;
pub mod error;
pub mod flatten;
pub mod ingestion;
pub mod label;
pub mod outputs;
pub mod parser;
pub mod pipeline;
pub mod prune;
pub mod resample;
pub mod types;

pub use error::PipelineError;
pub use parser::ParseError;
pub use pipeline::{PipelineConfig, PipelineOutput, Stage};
pub use types::{Dataset, SubjectId};
