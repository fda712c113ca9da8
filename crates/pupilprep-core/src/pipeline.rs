use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::info;

use crate::aggregate::concatenate_dataset;
use crate::diameter::add_pupil_diameters;
use crate::error::{PipelineError, Result};
use crate::flatten::flatten_rows;
use crate::label::label_subject;
use crate::prune::drop_tracking_columns;
use crate::resample::{resample_to_seconds, DEFAULT_FRAME_RATE};
use crate::types::{Dataset, SubjectId};

/// Transform selection consumed by the orchestrator. Each flag switches one
/// stage on; the stage order itself is fixed and not configurable.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineConfig {
    pub drop_tracking_columns: bool,
    pub pupil_diameter: bool,
    pub normalize_pupil: bool,
    pub resample_to_seconds: bool,
    pub frame_rate: u32,
    pub label_subjects: bool,
    pub flatten: bool,
    pub concatenate: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            drop_tracking_columns: false,
            pupil_diameter: false,
            normalize_pupil: false,
            resample_to_seconds: false,
            frame_rate: DEFAULT_FRAME_RATE,
            label_subjects: false,
            flatten: false,
            concatenate: false,
        }
    }
}

/// One step of the per-subject transform chain, in its fixed position:
/// prune, diameters, resample, label, flatten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    DropTrackingColumns,
    PupilDiameter { normalize: bool },
    ResampleToSeconds { frame_rate: u32 },
    LabelSubject,
    Flatten,
}

impl PipelineConfig {
    /// Evaluates the flags once into the ordered stage list.
    ///
    /// Labeling comes before flattening so the subject id is embedded in the
    /// flattened vector; the reverse order is unsupported. Labeling also
    /// comes after resampling, which is the last row-count-changing stage
    /// before it.
    pub fn stages(&self) -> Vec<Stage> {
        let mut stages = Vec::new();
        if self.drop_tracking_columns {
            stages.push(Stage::DropTrackingColumns);
        }
        if self.pupil_diameter {
            stages.push(Stage::PupilDiameter {
                normalize: self.normalize_pupil,
            });
        }
        if self.resample_to_seconds {
            stages.push(Stage::ResampleToSeconds {
                frame_rate: self.frame_rate,
            });
        }
        if self.label_subjects {
            stages.push(Stage::LabelSubject);
        }
        if self.flatten {
            stages.push(Stage::Flatten);
        }
        stages
    }
}

/// Result of a pipeline run: one table per subject, or a single merged table
/// when concatenation is on.
#[derive(Debug)]
pub enum PipelineOutput {
    PerSubject(Dataset),
    Merged(DataFrame),
}

/// Runs the stage list over one subject table. Each stage is a pure
/// value-in/value-out transform returning a new table.
pub fn transform_subject(
    subject: &SubjectId,
    table: DataFrame,
    stages: &[Stage],
) -> Result<DataFrame> {
    let mut table = table;
    for stage in stages {
        table = match stage {
            Stage::DropTrackingColumns => drop_tracking_columns(&table)?,
            Stage::PupilDiameter { normalize } => add_pupil_diameters(&table, *normalize)?,
            Stage::ResampleToSeconds { frame_rate } => resample_to_seconds(&table, *frame_rate)?,
            Stage::LabelSubject => label_subject(&table, subject)?,
            Stage::Flatten => flatten_rows(&table)?,
        };
    }
    Ok(table)
}

/// Runs the configured stages over every subject in order, then optionally
/// merges. Any per-subject failure aborts the whole run; there is no partial
/// output.
pub fn process_dataset(dataset: Dataset, config: &PipelineConfig) -> Result<PipelineOutput> {
    if dataset.is_empty() {
        return Err(PipelineError::EmptyDataset);
    }

    let stages = config.stages();

    let mut transformed = Dataset::new();
    for (subject, table) in dataset {
        info!(subject = %subject, rows = table.height(), "transforming subject");
        let table = transform_subject(&subject, table, &stages)?;
        transformed.insert(subject, table)?;
    }

    if config.concatenate {
        let merged = concatenate_dataset(&transformed, config.flatten)?;
        Ok(PipelineOutput::Merged(merged))
    } else {
        Ok(PipelineOutput::PerSubject(transformed))
    }
}
