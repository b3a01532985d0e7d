use std::path::{Path, PathBuf};

use crate::data::gates::Gate;

/// Topology and initialization hyperparameters for a two-layer network.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
    pub learning_rate: f64,
    /// Each weight is drawn uniformly from this closed range.
    pub weight_init_range: (f64, f64),
    /// Every bias starts at this constant.
    pub bias_init_value: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            input_size: 2,
            hidden_size: 2,
            output_size: 1,
            learning_rate: 0.5,
            weight_init_range: (-1.0, 1.0),
            bias_init_value: 0.0,
        }
    }
}

/// Epoch budget, logging cadence, and early-stopping policy for the
/// network trainer.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    pub epochs: usize,
    /// Detailed per-step logs are written every N epochs...
    pub log_detailed_every: usize,
    /// ...and unconditionally for the first N epochs.
    pub log_first_epochs: usize,
    pub print_progress_every: usize,
    /// Stop after this many epochs without a strict loss improvement.
    pub early_stopping_patience: usize,
    /// Stop as soon as the epoch's average loss reaches this value.
    pub target_loss: f64,
    /// Checkpoint the model every N epochs, independent of improvement.
    pub save_model_every: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            epochs: 10_000,
            log_detailed_every: 1000,
            log_first_epochs: 5,
            print_progress_every: 50,
            early_stopping_patience: 100,
            target_loss: 0.01,
            save_model_every: 1000,
        }
    }
}

/// Hyperparameters for a single-perceptron training run.
#[derive(Debug, Clone)]
pub struct PerceptronConfig {
    pub learning_rate: f64,
    pub max_epochs: usize,
    pub weight_init_range: (f64, f64),
    /// A progress line is logged every N epochs while unconverged.
    pub progress_every: usize,
}

impl Default for PerceptronConfig {
    fn default() -> Self {
        PerceptronConfig {
            learning_rate: 0.1,
            max_epochs: 1000,
            weight_init_range: (-0.5, 0.5),
            progress_every: 50,
        }
    }
}

/// File-path templates for every artifact a run produces.
///
/// Layout under the root:
/// ```text
/// data/                       gate training CSVs
/// data/input/                 xor_dataset.json
/// data/results/               perceptron logs + training_summary.csv
/// data/results/logs/          epoch_summary.csv, detailed_logs_*.csv
/// data/results/models/        model_epoch_*.json, trained_model.json
/// ```
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub data_dir: PathBuf,
    pub input_dir: PathBuf,
    pub results_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub models_dir: PathBuf,
}

impl RunPaths {
    pub fn new(root: impl AsRef<Path>) -> RunPaths {
        let data_dir = root.as_ref().join("data");
        let results_dir = data_dir.join("results");
        RunPaths {
            input_dir: data_dir.join("input"),
            logs_dir: results_dir.join("logs"),
            models_dir: results_dir.join("models"),
            data_dir,
            results_dir,
        }
    }

    pub fn gate_training_data(&self, gate: Gate) -> PathBuf {
        self.data_dir
            .join(format!("{}_gate_training.csv", gate.file_stem()))
    }

    pub fn gate_training_log(&self, gate: Gate) -> PathBuf {
        self.results_dir
            .join(format!("{}_training_log.csv", gate.file_stem()))
    }

    pub fn training_summary(&self) -> PathBuf {
        self.results_dir.join("training_summary.csv")
    }

    pub fn xor_dataset(&self) -> PathBuf {
        self.input_dir.join("xor_dataset.json")
    }

    pub fn epoch_summary(&self) -> PathBuf {
        self.logs_dir.join("epoch_summary.csv")
    }

    pub fn detailed_log(&self, epoch: usize, sample: usize) -> PathBuf {
        self.logs_dir.join(format!(
            "detailed_logs_epoch_{}_sample_{}.csv",
            epoch, sample
        ))
    }

    pub fn checkpoint(&self, epoch: usize) -> PathBuf {
        self.models_dir.join(format!("model_epoch_{}.json", epoch))
    }

    pub fn final_model(&self) -> PathBuf {
        self.models_dir.join("trained_model.json")
    }
}

impl Default for RunPaths {
    fn default() -> Self {
        RunPaths::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_the_run_layout() {
        let paths = RunPaths::new("/tmp/run");
        assert_eq!(
            paths.gate_training_data(Gate::And),
            PathBuf::from("/tmp/run/data/and_gate_training.csv")
        );
        assert_eq!(
            paths.gate_training_log(Gate::Or),
            PathBuf::from("/tmp/run/data/results/or_training_log.csv")
        );
        assert_eq!(
            paths.detailed_log(3, 1),
            PathBuf::from("/tmp/run/data/results/logs/detailed_logs_epoch_3_sample_1.csv")
        );
        assert_eq!(
            paths.checkpoint(2000),
            PathBuf::from("/tmp/run/data/results/models/model_epoch_2000.json")
        );
        assert_eq!(
            paths.xor_dataset(),
            PathBuf::from("/tmp/run/data/input/xor_dataset.json")
        );
    }
}
