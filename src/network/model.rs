use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::math::activation::{sigmoid, sigmoid_derivative};
use crate::math::metrics;
use crate::network::snapshot::NetworkSnapshot;
use crate::network::trace::{
    BackpropTrace, BiasUpdate, ForwardTrace, HiddenErrorTerm, OutputErrorTerm, WeightUpdate,
};
use crate::train::config::NetworkConfig;

/// A two-layer feed-forward network (input → hidden → output), sigmoid
/// everywhere, trained one sample at a time by backpropagation.
///
/// Dimensions are fixed at construction; the weight matrices are stored as
/// plain nested vectors so every connection stays individually addressable
/// for the per-step trace.
#[derive(Debug, Clone)]
pub struct TwoLayerNetwork {
    input_size: usize,
    hidden_size: usize,
    output_size: usize,
    learning_rate: f64,
    /// `weights_input_hidden[i][j]` connects input i to hidden j.
    weights_input_hidden: Vec<Vec<f64>>,
    /// `weights_hidden_output[j][k]` connects hidden j to output k.
    weights_hidden_output: Vec<Vec<f64>>,
    bias_hidden: Vec<f64>,
    bias_output: Vec<f64>,
}

impl TwoLayerNetwork {
    /// Random initialization: weights uniform in `weight_init_range`,
    /// biases at `bias_init_value`.
    pub fn new(config: &NetworkConfig) -> TwoLayerNetwork {
        Self::with_rng(config, &mut rand::thread_rng())
    }

    /// Deterministic variant for reproducible runs.
    pub fn seeded(config: &NetworkConfig, seed: u64) -> TwoLayerNetwork {
        Self::with_rng(config, &mut StdRng::seed_from_u64(seed))
    }

    fn with_rng<R: Rng>(config: &NetworkConfig, rng: &mut R) -> TwoLayerNetwork {
        let (lo, hi) = config.weight_init_range;

        let mut weights_input_hidden = vec![vec![0.0; config.hidden_size]; config.input_size];
        for row in weights_input_hidden.iter_mut() {
            for weight in row.iter_mut() {
                *weight = rng.gen_range(lo..=hi);
            }
        }

        let mut weights_hidden_output = vec![vec![0.0; config.output_size]; config.hidden_size];
        for row in weights_hidden_output.iter_mut() {
            for weight in row.iter_mut() {
                *weight = rng.gen_range(lo..=hi);
            }
        }

        TwoLayerNetwork {
            input_size: config.input_size,
            hidden_size: config.hidden_size,
            output_size: config.output_size,
            learning_rate: config.learning_rate,
            weights_input_hidden,
            weights_hidden_output,
            bias_hidden: vec![config.bias_init_value; config.hidden_size],
            bias_output: vec![config.bias_init_value; config.output_size],
        }
    }

    /// Reconstructs a network from stored state, bypassing random
    /// initialization entirely.
    pub fn from_snapshot(snapshot: NetworkSnapshot) -> TwoLayerNetwork {
        TwoLayerNetwork {
            input_size: snapshot.input_size,
            hidden_size: snapshot.hidden_size,
            output_size: snapshot.output_size,
            learning_rate: snapshot.learning_rate,
            weights_input_hidden: snapshot.weights_input_hidden,
            weights_hidden_output: snapshot.weights_hidden_output,
            bias_hidden: snapshot.bias_hidden,
            bias_output: snapshot.bias_output,
        }
    }

    /// The plain-value state needed to rebuild an identical network.
    pub fn to_snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            input_size: self.input_size,
            hidden_size: self.hidden_size,
            output_size: self.output_size,
            learning_rate: self.learning_rate,
            weights_input_hidden: self.weights_input_hidden.clone(),
            weights_hidden_output: self.weights_hidden_output.clone(),
            bias_hidden: self.bias_hidden.clone(),
            bias_output: self.bias_output.clone(),
        }
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Forward pass, keeping every pre-activation and activation for the
    /// trace and for backprop.
    pub fn forward_pass(&self, inputs: &[f64]) -> ForwardTrace {
        assert_eq!(inputs.len(), self.input_size, "input size mismatch");

        let mut hidden_inputs = Vec::with_capacity(self.hidden_size);
        let mut hidden_outputs = Vec::with_capacity(self.hidden_size);
        for j in 0..self.hidden_size {
            let mut weighted_sum = 0.0;
            for (i, input) in inputs.iter().enumerate() {
                weighted_sum += input * self.weights_input_hidden[i][j];
            }
            weighted_sum += self.bias_hidden[j];
            hidden_inputs.push(weighted_sum);
            hidden_outputs.push(sigmoid(weighted_sum));
        }

        let mut output_inputs = Vec::with_capacity(self.output_size);
        let mut outputs = Vec::with_capacity(self.output_size);
        for k in 0..self.output_size {
            let mut weighted_sum = 0.0;
            for (j, hidden) in hidden_outputs.iter().enumerate() {
                weighted_sum += hidden * self.weights_hidden_output[j][k];
            }
            weighted_sum += self.bias_output[k];
            output_inputs.push(weighted_sum);
            outputs.push(sigmoid(weighted_sum));
        }

        ForwardTrace {
            hidden_inputs,
            hidden_outputs,
            output_inputs,
            outputs,
        }
    }

    /// Mean squared error between a prediction and its target.
    pub fn calculate_loss(&self, predictions: &[f64], targets: &[f64]) -> Result<f64> {
        metrics::mean_squared_error(predictions, targets)
    }

    /// Backpropagation for one sample: computes the error signals, applies
    /// every weight and bias update, and returns the full trace.
    ///
    /// Sign convention: errors are `(target − output) · σ'` and updates are
    /// *added* (`w += lr · error · activation`). The two halves pair up to
    /// descend the MSE surface; changing either one alone flips training
    /// into ascent.
    pub fn backward_pass(
        &mut self,
        inputs: &[f64],
        hidden_outputs: &[f64],
        outputs: &[f64],
        targets: &[f64],
    ) -> BackpropTrace {
        let mut trace = BackpropTrace::default();

        // Output layer error signals.
        let mut output_errors = Vec::with_capacity(self.output_size);
        for k in 0..self.output_size {
            let raw_error = targets[k] - outputs[k];
            let derivative = sigmoid_derivative(outputs[k]);
            let final_error = raw_error * derivative;
            output_errors.push(final_error);
            trace.output_errors.push(OutputErrorTerm {
                neuron: k,
                target: targets[k],
                prediction: outputs[k],
                raw_error,
                sigmoid_derivative: derivative,
                final_error,
            });
        }

        // Hidden layer error signals, folded back through hidden→output weights.
        let mut hidden_errors = Vec::with_capacity(self.hidden_size);
        for j in 0..self.hidden_size {
            let error_sum: f64 = (0..self.output_size)
                .map(|k| output_errors[k] * self.weights_hidden_output[j][k])
                .sum();
            let derivative = sigmoid_derivative(hidden_outputs[j]);
            let final_error = error_sum * derivative;
            hidden_errors.push(final_error);
            trace.hidden_errors.push(HiddenErrorTerm {
                neuron: j,
                error_sum,
                sigmoid_derivative: derivative,
                final_error,
            });
        }

        self.apply_updates(inputs, hidden_outputs, &output_errors, &hidden_errors, &mut trace);
        trace
    }

    fn apply_updates(
        &mut self,
        inputs: &[f64],
        hidden_outputs: &[f64],
        output_errors: &[f64],
        hidden_errors: &[f64],
        trace: &mut BackpropTrace,
    ) {
        for j in 0..self.hidden_size {
            for k in 0..self.output_size {
                let old_weight = self.weights_hidden_output[j][k];
                let gradient = self.learning_rate * output_errors[k] * hidden_outputs[j];
                let new_weight = old_weight + gradient;
                self.weights_hidden_output[j][k] = new_weight;
                trace.hidden_output_updates.push(WeightUpdate {
                    from_neuron: j,
                    to_neuron: k,
                    old_weight,
                    gradient,
                    new_weight,
                });
            }
        }

        for i in 0..self.input_size {
            for j in 0..self.hidden_size {
                let old_weight = self.weights_input_hidden[i][j];
                let gradient = self.learning_rate * hidden_errors[j] * inputs[i];
                let new_weight = old_weight + gradient;
                self.weights_input_hidden[i][j] = new_weight;
                trace.input_hidden_updates.push(WeightUpdate {
                    from_neuron: i,
                    to_neuron: j,
                    old_weight,
                    gradient,
                    new_weight,
                });
            }
        }

        for k in 0..self.output_size {
            let old_bias = self.bias_output[k];
            let gradient = self.learning_rate * output_errors[k];
            let new_bias = old_bias + gradient;
            self.bias_output[k] = new_bias;
            trace.output_bias_updates.push(BiasUpdate {
                neuron: k,
                old_bias,
                gradient,
                new_bias,
            });
        }

        for j in 0..self.hidden_size {
            let old_bias = self.bias_hidden[j];
            let gradient = self.learning_rate * hidden_errors[j];
            let new_bias = old_bias + gradient;
            self.bias_hidden[j] = new_bias;
            trace.hidden_bias_updates.push(BiasUpdate {
                neuron: j,
                old_bias,
                gradient,
                new_bias,
            });
        }
    }

    /// Forward pass only.
    pub fn predict(&self, inputs: &[f64]) -> Vec<f64> {
        self.forward_pass(inputs).outputs
    }
}
