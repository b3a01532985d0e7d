use log::info;

use crate::data::xor::XorSample;
use crate::error::Result;
use crate::network::model::TwoLayerNetwork;
use crate::report::detailed;
use crate::report::epoch_summary::EpochSummaryWriter;
use crate::train::config::{NetworkConfig, RunPaths, TrainingConfig};

/// How a training run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Average loss reached the configured target.
    TargetLossReached,
    /// No strict improvement for the configured patience window.
    PatienceExhausted,
    /// The epoch budget ran out.
    EpochBudgetExhausted,
}

/// What a completed training run reports back.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub epochs_run: usize,
    pub final_average_loss: f64,
    pub best_loss: f64,
    pub stop_reason: StopReason,
}

/// Drives the two-layer network through its epoch loop: per-sample
/// forward/backward, epoch summaries, detailed-step logs on selected
/// epochs, periodic checkpoints, and the two early-stopping rules.
pub struct NetworkTrainer<'a> {
    network: TwoLayerNetwork,
    training: &'a TrainingConfig,
    paths: &'a RunPaths,
    best_loss: f64,
    epochs_without_improvement: usize,
}

impl<'a> NetworkTrainer<'a> {
    pub fn new(
        network_config: &NetworkConfig,
        training: &'a TrainingConfig,
        paths: &'a RunPaths,
    ) -> NetworkTrainer<'a> {
        Self::with_network(TwoLayerNetwork::new(network_config), training, paths)
    }

    /// Deterministic variant for reproducible runs.
    pub fn seeded(
        network_config: &NetworkConfig,
        training: &'a TrainingConfig,
        paths: &'a RunPaths,
        seed: u64,
    ) -> NetworkTrainer<'a> {
        Self::with_network(
            TwoLayerNetwork::seeded(network_config, seed),
            training,
            paths,
        )
    }

    /// Wraps an existing model, e.g. one rebuilt from a checkpoint.
    pub fn with_network(
        network: TwoLayerNetwork,
        training: &'a TrainingConfig,
        paths: &'a RunPaths,
    ) -> NetworkTrainer<'a> {
        NetworkTrainer {
            network,
            training,
            paths,
            best_loss: f64::INFINITY,
            epochs_without_improvement: 0,
        }
    }

    pub fn network(&self) -> &TwoLayerNetwork {
        &self.network
    }

    pub fn best_loss(&self) -> f64 {
        self.best_loss
    }

    /// Runs the full training loop and returns how it ended.
    pub fn train(&mut self, samples: &[XorSample]) -> Result<TrainingOutcome> {
        assert!(!samples.is_empty(), "training data must not be empty");

        info!("training starts with {} samples", samples.len());
        info!(
            "network: {} -> {} -> {}, learning rate {}",
            self.network.input_size(),
            self.network.hidden_size(),
            self.network.output_size(),
            self.network.learning_rate()
        );

        let mut summary = EpochSummaryWriter::create(&self.paths.epoch_summary())?;
        let mut last_average_loss = f64::INFINITY;
        let mut epochs_run = 0;
        let mut stop_reason = StopReason::EpochBudgetExhausted;

        for epoch in 0..self.training.epochs {
            let log_detailed = self.should_log_detailed(epoch);
            let average_loss = self.train_epoch(samples, epoch, log_detailed)?;
            last_average_loss = average_loss;
            epochs_run = epoch + 1;

            summary.append(epoch, average_loss, samples.len())?;

            if epoch % self.training.print_progress_every == 0 {
                info!("epoch {:4}: loss = {:.6}", epoch, average_loss);
            }

            if average_loss < self.best_loss {
                self.best_loss = average_loss;
                self.epochs_without_improvement = 0;
            } else {
                self.epochs_without_improvement += 1;
            }

            // Periodic, improvement-independent checkpoint.
            if epoch % self.training.save_model_every == 0 {
                self.network
                    .to_snapshot()
                    .save_json(&self.paths.checkpoint(epoch))?;
            }

            if average_loss <= self.training.target_loss {
                info!(
                    "early stop at epoch {}: target loss {} reached",
                    epoch, self.training.target_loss
                );
                stop_reason = StopReason::TargetLossReached;
                break;
            }

            if self.epochs_without_improvement >= self.training.early_stopping_patience {
                info!(
                    "early stop at epoch {}: no improvement for {} epochs",
                    epoch, self.training.early_stopping_patience
                );
                stop_reason = StopReason::PatienceExhausted;
                break;
            }
        }

        info!(
            "training completed after {} epochs, best loss {:.6}",
            epochs_run, self.best_loss
        );

        Ok(TrainingOutcome {
            epochs_run,
            final_average_loss: last_average_loss,
            best_loss: self.best_loss,
            stop_reason,
        })
    }

    fn train_epoch(
        &mut self,
        samples: &[XorSample],
        epoch: usize,
        log_detailed: bool,
    ) -> Result<f64> {
        let mut total_loss = 0.0;

        for (sample_index, sample) in samples.iter().enumerate() {
            let forward = self.network.forward_pass(&sample.input);
            let loss = self
                .network
                .calculate_loss(&forward.outputs, &sample.target)?;
            total_loss += loss;

            let backprop = self.network.backward_pass(
                &sample.input,
                &forward.hidden_outputs,
                &forward.outputs,
                &sample.target,
            );

            if log_detailed {
                let rows =
                    detailed::detailed_rows(epoch, sample_index, sample, &forward, loss, &backprop);
                detailed::write_detailed_log(
                    &self.paths.detailed_log(epoch, sample_index),
                    &rows,
                )?;
            }
        }

        Ok(total_loss / samples.len() as f64)
    }

    fn should_log_detailed(&self, epoch: usize) -> bool {
        epoch < self.training.log_first_epochs || epoch % self.training.log_detailed_every == 0
    }

    /// Persists the trained model as the canonical final artifact.
    pub fn save_final_model(&self) -> Result<()> {
        let path = self.paths.final_model();
        self.network.to_snapshot().save_json(&path)?;
        info!("model saved to {}", path.display());
        Ok(())
    }

    /// Runs `predict` over the dataset and prints per-sample absolute error.
    pub fn test(&self, samples: &[XorSample]) {
        println!("Input\t\t| Expected | Predicted | Error");
        println!("{}", "-".repeat(48));
        for sample in samples {
            let prediction = self.network.predict(&sample.input);
            let error = (sample.target[0] - prediction[0]).abs();
            println!(
                "{:?}\t| {:.4}   | {:.4}    | {:.4}",
                sample.input, sample.target[0], prediction[0], error
            );
        }
    }
}
