use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use serde_json::json;

use crate::pipeline::{PipelineConfig, PipelineOutput};
use crate::types::SubjectId;

/// Locations written by one published run.
#[derive(Debug)]
pub struct RunArtifacts {
    pub run_dir: PathBuf,
    pub data_files: Vec<PathBuf>,
    pub metadata_path: PathBuf,
    pub manifest_path: PathBuf,
}

/// Publishes the run into a freshly numbered `run-NNN` directory under
/// `base_dir`: one CSV per subject (or a single merged CSV), the key:value
/// metadata listing, and a JSON manifest with per-table row counts.
pub fn publish_output(
    base_dir: &Path,
    output: &PipelineOutput,
    config: &PipelineConfig,
    subjects: &[SubjectId],
) -> Result<RunArtifacts> {
    let run_dir = next_run_dir(base_dir)?;
    fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create run directory {}", run_dir.display()))?;

    let mut data_files = Vec::new();
    let mut row_counts = serde_json::Map::new();

    match output {
        PipelineOutput::Merged(df) => {
            let path = run_dir.join("merged.csv");
            write_csv(&path, df)?;
            row_counts.insert("merged".to_string(), json!(df.height()));
            data_files.push(path);
        }
        PipelineOutput::PerSubject(dataset) => {
            for (subject, df) in dataset.iter() {
                let path = run_dir.join(format!("{subject}.csv"));
                write_csv(&path, df)?;
                row_counts.insert(subject.to_string(), json!(df.height()));
                data_files.push(path);
            }
        }
    }

    let generated_at = Utc::now().to_rfc3339();
    let metadata_path = write_metadata(&run_dir, config, subjects, &generated_at)?;
    let manifest_path = write_manifest(&run_dir, config, subjects, row_counts, &generated_at)?;

    Ok(RunArtifacts {
        run_dir,
        data_files,
        metadata_path,
        manifest_path,
    })
}

/// Picks the next free `run-NNN` directory name, one past the highest number
/// already present.
fn next_run_dir(base_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(base_dir)
        .with_context(|| format!("failed to create output directory {}", base_dir.display()))?;

    let mut highest = 0u32;
    for entry in fs::read_dir(base_dir)
        .with_context(|| format!("failed to list output directory {}", base_dir.display()))?
    {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if let Some(number) = name
            .strip_prefix("run-")
            .and_then(|suffix| suffix.parse::<u32>().ok())
        {
            highest = highest.max(number);
        }
    }

    Ok(base_dir.join(format!("run-{:03}", highest + 1)))
}

fn write_csv(path: &Path, df: &DataFrame) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut df = df.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// The human-readable run record: processed subject ids and the active
/// configuration, one key:value pair per line.
fn write_metadata(
    run_dir: &Path,
    config: &PipelineConfig,
    subjects: &[SubjectId],
    generated_at: &str,
) -> Result<PathBuf> {
    let subject_list = subjects
        .iter()
        .map(|id| id.as_str().to_string())
        .collect::<Vec<_>>()
        .join(",");

    let lines = [
        format!("generated_at: {generated_at}"),
        format!("subjects: {subject_list}"),
        format!("drop_tracking_columns: {}", config.drop_tracking_columns),
        format!("pupil_diameter: {}", config.pupil_diameter),
        format!("normalize_pupil: {}", config.normalize_pupil),
        format!("resample_to_seconds: {}", config.resample_to_seconds),
        format!("frame_rate: {}", config.frame_rate),
        format!("label_subjects: {}", config.label_subjects),
        format!("flatten: {}", config.flatten),
        format!("concatenate: {}", config.concatenate),
    ];

    let path = run_dir.join("metadata.txt");
    fs::write(&path, lines.join("\n") + "\n")
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

fn write_manifest(
    run_dir: &Path,
    config: &PipelineConfig,
    subjects: &[SubjectId],
    row_counts: serde_json::Map<String, serde_json::Value>,
    generated_at: &str,
) -> Result<PathBuf> {
    let manifest = json!({
        "generated_at": generated_at,
        "subjects": subjects,
        "config": config,
        "row_counts": row_counts,
    });

    let path = run_dir.join("manifest.json");
    let bytes = serde_json::to_vec_pretty(&manifest).context("failed to serialize manifest")?;
    fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
