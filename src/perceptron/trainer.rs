use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::data::gates::{Gate, GateSample};
use crate::error::Result;
use crate::perceptron::model::Perceptron;
use crate::report::perceptron_log;
use crate::train::config::PerceptronConfig;

/// One row of the perceptron training log: the full arithmetic of a single
/// (epoch, sample) step, with weights captured *before* the update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingLogEntry {
    pub epoch: usize,
    pub sample_idx: usize,
    pub x1: u8,
    pub x2: u8,
    /// The bias input, always 1.
    pub bias: u8,
    pub w1: f64,
    pub w2: f64,
    pub w_bias: f64,
    pub weighted_sum: f64,
    pub predicted_output: u8,
    pub expected_output: u8,
    pub error: i8,
    pub weight_updated: bool,
    pub converged: bool,
}

/// Final per-gate summary row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateSummary {
    pub gate_type: String,
    pub epochs_to_converge: usize,
    pub final_w1: f64,
    pub final_w2: f64,
    pub final_w_bias: f64,
    pub final_accuracy: f64,
    pub total_weight_updates: usize,
    pub converged: bool,
}

/// Runs the perceptron learning rule to convergence (a zero-error epoch) or
/// to the epoch cap, logging every step.
pub struct PerceptronTrainer<'a> {
    config: &'a PerceptronConfig,
    perceptron: Option<Perceptron>,
    training_log: Vec<TrainingLogEntry>,
}

impl<'a> PerceptronTrainer<'a> {
    pub fn new(config: &'a PerceptronConfig) -> PerceptronTrainer<'a> {
        PerceptronTrainer {
            config,
            perceptron: None,
            training_log: Vec::new(),
        }
    }

    /// Trains a fresh randomly initialized perceptron on `samples`, writes
    /// the per-step log CSV to `log_path`, and returns the gate summary.
    pub fn train(
        &mut self,
        samples: &[GateSample],
        gate: Gate,
        log_path: &Path,
    ) -> Result<GateSummary> {
        let perceptron = Perceptron::new(self.config);
        self.train_model(perceptron, samples, gate, log_path)
    }

    /// Same as `train` but with a deterministic initial model.
    pub fn train_seeded(
        &mut self,
        samples: &[GateSample],
        gate: Gate,
        log_path: &Path,
        seed: u64,
    ) -> Result<GateSummary> {
        let perceptron = Perceptron::seeded(self.config, seed);
        self.train_model(perceptron, samples, gate, log_path)
    }

    fn train_model(
        &mut self,
        mut perceptron: Perceptron,
        samples: &[GateSample],
        gate: Gate,
        log_path: &Path,
    ) -> Result<GateSummary> {
        self.training_log.clear();

        let (w1, w2, w_bias) = perceptron.weights();
        info!(
            "training {} gate, initial weights w1={:.3} w2={:.3} w_bias={:.3}",
            gate.name(),
            w1,
            w2,
            w_bias
        );

        let mut converged = false;
        let mut total_weight_updates = 0;
        let mut epochs_to_converge = self.config.max_epochs;

        for epoch in 1..=self.config.max_epochs {
            let mut epoch_errors = 0;

            for (i, sample) in samples.iter().enumerate() {
                let (w1, w2, w_bias) = perceptron.weights();
                let outcome = perceptron.train_sample(sample.x1, sample.x2, sample.expected);

                if outcome.weight_updated {
                    total_weight_updates += 1;
                }
                if outcome.error != 0 {
                    epoch_errors += 1;
                }

                self.training_log.push(TrainingLogEntry {
                    epoch,
                    sample_idx: i + 1,
                    x1: sample.x1,
                    x2: sample.x2,
                    bias: 1,
                    w1: round4(w1),
                    w2: round4(w2),
                    w_bias: round4(w_bias),
                    weighted_sum: round4(outcome.weighted_sum),
                    predicted_output: outcome.predicted,
                    expected_output: sample.expected,
                    error: outcome.error,
                    // Back-filled below once the epoch proves clean.
                    converged: false,
                    weight_updated: outcome.weight_updated,
                });
            }

            if epoch_errors == 0 {
                converged = true;
                epochs_to_converge = epoch;
                // The sole retroactive mutation: mark this epoch's entries.
                let start = self.training_log.len() - samples.len();
                for entry in &mut self.training_log[start..] {
                    entry.converged = true;
                }
                info!("{} gate converged at epoch {}", gate.name(), epoch);
                break;
            }

            if epoch % self.config.progress_every == 0 {
                let accuracy = perceptron.evaluate_accuracy(samples);
                info!(
                    "epoch {}: {} errors, accuracy {:.0}%",
                    epoch,
                    epoch_errors,
                    accuracy * 100.0
                );
            }
        }

        perceptron_log::write_training_log(log_path, &self.training_log)?;

        let (w1, w2, w_bias) = perceptron.weights();
        let final_accuracy = perceptron.evaluate_accuracy(samples);
        info!(
            "{} gate done: {} epochs, accuracy {:.0}%, {} weight updates",
            gate.name(),
            epochs_to_converge,
            final_accuracy * 100.0,
            total_weight_updates
        );

        self.perceptron = Some(perceptron);

        Ok(GateSummary {
            gate_type: gate.name().to_string(),
            epochs_to_converge,
            final_w1: round4(w1),
            final_w2: round4(w2),
            final_w_bias: round4(w_bias),
            final_accuracy,
            total_weight_updates,
            converged,
        })
    }

    /// The log of the most recent `train` call, one entry per (epoch, sample).
    pub fn log_entries(&self) -> &[TrainingLogEntry] {
        &self.training_log
    }

    /// The trained model from the most recent `train` call.
    pub fn perceptron(&self) -> Option<&Perceptron> {
        self.perceptron.as_ref()
    }

    /// Prints the truth-table check for the trained model.
    pub fn test_final_model(&self, samples: &[GateSample], gate: Gate) {
        let Some(perceptron) = &self.perceptron else {
            return;
        };
        println!("\n=== Testing Final {} Model ===", gate.name());
        println!("Input | Expected | Predicted | Correct");
        println!("------|----------|-----------|--------");
        for sample in samples {
            let predicted = perceptron.predict(sample.x1, sample.x2);
            let mark = if predicted == sample.expected {
                "ok"
            } else {
                "MISS"
            };
            println!(
                "  {},{} |    {}     |     {}     |   {}",
                sample.x1, sample.x2, sample.expected, predicted, mark
            );
        }
    }
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
