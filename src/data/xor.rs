use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One real-valued training sample: a 2-element input and a 1-element target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XorSample {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

/// The fixed 4-sample XOR dataset, persistable as a JSON value tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XorDataset {
    pub description: String,
    pub input_size: usize,
    pub output_size: usize,
    pub samples: Vec<XorSample>,
}

impl XorDataset {
    pub fn new() -> XorDataset {
        let samples = [
            ([0.0, 0.0], [0.0]),
            ([0.0, 1.0], [1.0]),
            ([1.0, 0.0], [1.0]),
            ([1.0, 1.0], [0.0]),
        ];
        XorDataset {
            description: "XOR Logic Gate Dataset".to_string(),
            input_size: 2,
            output_size: 1,
            samples: samples
                .iter()
                .map(|(input, target)| XorSample {
                    input: input.to_vec(),
                    target: target.to_vec(),
                })
                .collect(),
        }
    }

    pub fn samples(&self) -> &[XorSample] {
        &self.samples
    }

    /// Serializes the dataset to a pretty-printed JSON file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a dataset from a JSON file previously written by `save_json`.
    pub fn load_json(path: &Path) -> Result<XorDataset> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Loads the dataset, regenerating the default file first when missing.
    pub fn load_or_create(path: &Path) -> Result<XorDataset> {
        if !path.exists() {
            warn!("{} not found, writing default XOR dataset", path.display());
            XorDataset::new().save_json(path)?;
        }
        Self::load_json(path)
    }
}

impl Default for XorDataset {
    fn default() -> Self {
        XorDataset::new()
    }
}
