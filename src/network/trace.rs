//! Typed records of everything a forward/backward pass computes.
//!
//! These are the contract between the model and the reporter: the model
//! fills them in while it works, the reporter flattens them into the
//! per-sample detailed log.

/// All intermediate values of one forward pass.
#[derive(Debug, Clone)]
pub struct ForwardTrace {
    /// Pre-activation weighted sums of the hidden layer.
    pub hidden_inputs: Vec<f64>,
    /// Sigmoid activations of the hidden layer.
    pub hidden_outputs: Vec<f64>,
    /// Pre-activation weighted sums of the output layer.
    pub output_inputs: Vec<f64>,
    /// Final network outputs.
    pub outputs: Vec<f64>,
}

/// Error decomposition for one output neuron:
/// `final_error = raw_error · σ'(prediction)`.
#[derive(Debug, Clone)]
pub struct OutputErrorTerm {
    pub neuron: usize,
    pub target: f64,
    pub prediction: f64,
    /// `target − prediction`.
    pub raw_error: f64,
    pub sigmoid_derivative: f64,
    pub final_error: f64,
}

/// Error decomposition for one hidden neuron:
/// `final_error = error_sum · σ'(activation)`.
#[derive(Debug, Clone)]
pub struct HiddenErrorTerm {
    pub neuron: usize,
    /// Output errors folded back through the hidden→output weights.
    pub error_sum: f64,
    pub sigmoid_derivative: f64,
    pub final_error: f64,
}

/// One connection's weight change, `new_weight = old_weight + gradient`.
#[derive(Debug, Clone)]
pub struct WeightUpdate {
    pub from_neuron: usize,
    pub to_neuron: usize,
    pub old_weight: f64,
    pub gradient: f64,
    pub new_weight: f64,
}

/// One neuron's bias change, `new_bias = old_bias + gradient`.
#[derive(Debug, Clone)]
pub struct BiasUpdate {
    pub neuron: usize,
    pub old_bias: f64,
    pub gradient: f64,
    pub new_bias: f64,
}

/// Everything one backward pass computed, in the order it was computed.
#[derive(Debug, Clone, Default)]
pub struct BackpropTrace {
    pub output_errors: Vec<OutputErrorTerm>,
    pub hidden_errors: Vec<HiddenErrorTerm>,
    pub input_hidden_updates: Vec<WeightUpdate>,
    pub hidden_output_updates: Vec<WeightUpdate>,
    pub hidden_bias_updates: Vec<BiasUpdate>,
    pub output_bias_updates: Vec<BiasUpdate>,
}
