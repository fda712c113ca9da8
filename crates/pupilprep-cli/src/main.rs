use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pupilprep_core::ingestion::{load_dataset, FileInput};
use pupilprep_core::outputs::publish_output;
use pupilprep_core::pipeline::{process_dataset, PipelineConfig};
use pupilprep_core::resample::DEFAULT_FRAME_RATE;

/// Preprocessing for per-subject pupil keypoint-tracking exports.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory containing the per-subject tracking CSV files.
    #[arg(short, long)]
    input_dir: PathBuf,

    /// Directory that receives numbered run directories.
    #[arg(short, long, default_value = "results")]
    out_dir: PathBuf,

    /// Remove the frame-index and likelihood columns.
    #[arg(long)]
    drop_columns: bool,

    /// Add the pupil_hor_diameter / pupil_ver_diameter columns.
    #[arg(long)]
    pupil_diameter: bool,

    /// Z-score the computed pupil diameter columns.
    #[arg(long)]
    normalize_pupil: bool,

    /// Average frame rows into one-second windows.
    #[arg(long)]
    resample: bool,

    /// Frames per second of the recordings.
    #[arg(long, default_value_t = DEFAULT_FRAME_RATE)]
    frame_rate: u32,

    /// Append a per-row subject id column.
    #[arg(long)]
    label: bool,

    /// Flatten each subject table into a single row.
    #[arg(long)]
    flatten: bool,

    /// Merge all subjects into one output table.
    #[arg(long)]
    concatenate: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let pattern = cli.input_dir.join("*.csv");
    let pattern = pattern
        .to_str()
        .context("input directory is not valid UTF-8")?;

    // glob yields paths in alphabetical order, which fixes the dataset
    // insertion order and therefore the row-block order of a merged output.
    let mut files: Vec<(String, String)> = Vec::new();
    for entry in glob::glob(pattern)? {
        let path = entry?;
        if !path.is_file() {
            continue;
        }
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| format!("invalid file name in {}", path.display()))?
            .to_string();
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        files.push((file_name, contents));
    }

    if files.is_empty() {
        bail!("no tracking files matched {pattern}");
    }

    let inputs: Vec<FileInput> = files
        .iter()
        .map(|(file_name, contents)| FileInput {
            file_name,
            contents,
        })
        .collect();

    let dataset = load_dataset(&inputs)?;
    let subjects = dataset.subject_ids();
    info!(subjects = subjects.len(), "loaded dataset");

    let config = PipelineConfig {
        drop_tracking_columns: cli.drop_columns,
        pupil_diameter: cli.pupil_diameter,
        normalize_pupil: cli.normalize_pupil,
        resample_to_seconds: cli.resample,
        frame_rate: cli.frame_rate,
        label_subjects: cli.label,
        flatten: cli.flatten,
        concatenate: cli.concatenate,
    };

    let output = process_dataset(dataset, &config)?;
    let artifacts = publish_output(&cli.out_dir, &output, &config, &subjects)?;

    println!(
        "wrote {} data file(s) to {}",
        artifacts.data_files.len(),
        artifacts.run_dir.display()
    );

    Ok(())
}
