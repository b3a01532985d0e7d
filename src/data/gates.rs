use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The two linearly separable gates a single perceptron can learn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    And,
    Or,
}

impl Gate {
    pub fn name(&self) -> &'static str {
        match self {
            Gate::And => "AND",
            Gate::Or => "OR",
        }
    }

    /// Lowercase stem used in artifact file names (`and_training_log.csv`).
    pub fn file_stem(&self) -> &'static str {
        match self {
            Gate::And => "and",
            Gate::Or => "or",
        }
    }

    /// The fixed 4-row truth table, always in the same order.
    pub fn truth_table(&self) -> Vec<GateSample> {
        match self {
            Gate::And => vec![
                GateSample::new(0, 0, 0),
                GateSample::new(0, 1, 0),
                GateSample::new(1, 0, 0),
                GateSample::new(1, 1, 1),
            ],
            Gate::Or => vec![
                GateSample::new(0, 0, 0),
                GateSample::new(0, 1, 1),
                GateSample::new(1, 0, 1),
                GateSample::new(1, 1, 1),
            ],
        }
    }
}

/// One labeled Boolean sample, `(x1, x2) -> expected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSample {
    pub x1: u8,
    pub x2: u8,
    #[serde(rename = "expected_output")]
    pub expected: u8,
}

impl GateSample {
    pub fn new(x1: u8, x2: u8, expected: u8) -> GateSample {
        GateSample { x1, x2, expected }
    }
}

/// Writes gate samples as CSV with an `x1,x2,expected_output` header.
pub fn write_samples(path: &Path, samples: &[GateSample]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    for sample in samples {
        writer.serialize(sample)?;
    }
    writer.flush()?;
    Ok(())
}

/// Loads gate samples from CSV.
///
/// A missing file is regenerated from the gate's fixed truth table and the
/// read is retried once. Rows with malformed numeric fields are skipped with
/// a warning rather than failing the whole load.
pub fn load_samples(path: &Path, gate: Gate) -> Result<Vec<GateSample>> {
    if !path.exists() {
        warn!(
            "{} not found, regenerating default {} gate data",
            path.display(),
            gate.name()
        );
        write_samples(path, &gate.truth_table())?;
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut samples = Vec::new();
    for row in reader.deserialize::<GateSample>() {
        match row {
            Ok(sample) => samples.push(sample),
            Err(err) => warn!("skipping malformed row in {}: {}", path.display(), err),
        }
    }
    Ok(samples)
}
