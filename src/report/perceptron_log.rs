use std::fs;
use std::path::Path;

use log::info;

use crate::error::Result;
use crate::perceptron::trainer::{GateSummary, TrainingLogEntry};

/// Writes the per-step perceptron training log as CSV, one row per
/// (epoch, sample).
pub fn write_training_log(path: &Path, entries: &[TrainingLogEntry]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    for entry in entries {
        writer.serialize(entry)?;
    }
    writer.flush()?;
    info!(
        "training log saved to {} ({} entries)",
        path.display(),
        entries.len()
    );
    Ok(())
}

/// Writes the final one-row-per-gate summary CSV.
pub fn write_summary(path: &Path, summaries: &[GateSummary]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    for summary in summaries {
        writer.serialize(summary)?;
    }
    writer.flush()?;
    info!("summary report saved to {}", path.display());
    Ok(())
}
