use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::gates::GateSample;
use crate::math::activation::step;
use crate::train::config::PerceptronConfig;

/// A single-layer perceptron with two inputs and a bias.
///
/// The three weights are mutated only by the learning rule in
/// `train_sample`; they are never reset mid-run.
#[derive(Debug, Clone)]
pub struct Perceptron {
    w1: f64,
    w2: f64,
    w_bias: f64,
    /// The bias input is the constant 1; only its weight is learned.
    bias_input: f64,
    learning_rate: f64,
}

/// What a single training step produced, before and after the update.
#[derive(Debug, Clone, Copy)]
pub struct SampleOutcome {
    pub predicted: u8,
    /// `expected − predicted`, one of −1, 0, 1.
    pub error: i8,
    pub weight_updated: bool,
    pub weighted_sum: f64,
}

impl Perceptron {
    /// Fresh perceptron with weights drawn uniformly from the configured
    /// symmetric range.
    pub fn new(config: &PerceptronConfig) -> Perceptron {
        Self::with_rng(config, &mut rand::thread_rng())
    }

    /// Deterministic variant for reproducible runs.
    pub fn seeded(config: &PerceptronConfig, seed: u64) -> Perceptron {
        Self::with_rng(config, &mut StdRng::seed_from_u64(seed))
    }

    fn with_rng<R: Rng>(config: &PerceptronConfig, rng: &mut R) -> Perceptron {
        let (lo, hi) = config.weight_init_range;
        Perceptron {
            w1: rng.gen_range(lo..=hi),
            w2: rng.gen_range(lo..=hi),
            w_bias: rng.gen_range(lo..=hi),
            bias_input: 1.0,
            learning_rate: config.learning_rate,
        }
    }

    /// Weighted sum plus step activation.
    pub fn forward(&self, x1: u8, x2: u8) -> (f64, u8) {
        let weighted_sum =
            self.w1 * x1 as f64 + self.w2 * x2 as f64 + self.w_bias * self.bias_input;
        (weighted_sum, step(weighted_sum))
    }

    /// One application of the perceptron learning rule.
    ///
    /// Weights move by `learning_rate · error · input` only when the sample
    /// is misclassified; a correct prediction leaves the model untouched.
    pub fn train_sample(&mut self, x1: u8, x2: u8, expected: u8) -> SampleOutcome {
        let (weighted_sum, predicted) = self.forward(x1, x2);
        let error = expected as i8 - predicted as i8;

        let weight_updated = error != 0;
        if weight_updated {
            let scaled = self.learning_rate * error as f64;
            self.w1 += scaled * x1 as f64;
            self.w2 += scaled * x2 as f64;
            self.w_bias += scaled * self.bias_input;
        }

        SampleOutcome {
            predicted,
            error,
            weight_updated,
            weighted_sum,
        }
    }

    /// Forward pass without mutation.
    pub fn predict(&self, x1: u8, x2: u8) -> u8 {
        self.forward(x1, x2).1
    }

    pub fn weights(&self) -> (f64, f64, f64) {
        (self.w1, self.w2, self.w_bias)
    }

    pub fn bias_input(&self) -> f64 {
        self.bias_input
    }

    /// Fraction of samples classified correctly.
    pub fn evaluate_accuracy(&self, samples: &[GateSample]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let correct = samples
            .iter()
            .filter(|s| self.predict(s.x1, s.x2) == s.expected)
            .count();
        correct as f64 / samples.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::gates::Gate;
    use approx::assert_abs_diff_eq;

    fn fixed(w1: f64, w2: f64, w_bias: f64, learning_rate: f64) -> Perceptron {
        Perceptron {
            w1,
            w2,
            w_bias,
            bias_input: 1.0,
            learning_rate,
        }
    }

    #[test]
    fn forward_fires_at_exactly_zero() {
        // Weights chosen so (1, 1) lands on weighted_sum == 0.
        let p = fixed(0.5, 0.5, -1.0, 0.1);
        let (sum, out) = p.forward(1, 1);
        assert_abs_diff_eq!(sum, 0.0);
        assert_eq!(out, 1);
    }

    #[test]
    fn correct_prediction_leaves_weights_unchanged() {
        let mut p = fixed(0.3, 0.3, -0.5, 0.1);
        // (0, 0): sum = -0.5 -> predicts 0, which is correct for AND.
        let outcome = p.train_sample(0, 0, 0);
        assert_eq!(outcome.error, 0);
        assert!(!outcome.weight_updated);
        assert_eq!(p.weights(), (0.3, 0.3, -0.5));
    }

    #[test]
    fn misclassification_applies_the_learning_rule() {
        let mut p = fixed(0.0, 0.0, 0.0, 0.1);
        // (1, 0): sum = 0 -> predicts 1, expected 0, error = -1.
        let outcome = p.train_sample(1, 0, 0);
        assert_eq!(outcome.predicted, 1);
        assert_eq!(outcome.error, -1);
        assert!(outcome.weight_updated);

        let (w1, w2, w_bias) = p.weights();
        assert_abs_diff_eq!(w1, -0.1, epsilon = 1e-12); // lr · (−1) · 1
        assert_abs_diff_eq!(w2, 0.0, epsilon = 1e-12); // input was 0
        assert_abs_diff_eq!(w_bias, -0.1, epsilon = 1e-12); // bias input is 1
    }

    #[test]
    fn accuracy_over_truth_table() {
        // Weights that solve AND: fires only when both inputs are on.
        let p = fixed(0.6, 0.6, -1.0, 0.1);
        assert_abs_diff_eq!(p.evaluate_accuracy(&Gate::And.truth_table()), 1.0);
        // The same weights miss the two single-input OR rows.
        assert_abs_diff_eq!(p.evaluate_accuracy(&Gate::Or.truth_table()), 0.5);
    }
}
