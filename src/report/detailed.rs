use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::xor::XorSample;
use crate::error::Result;
use crate::network::trace::{BackpropTrace, ForwardTrace};

/// Discriminator for the heterogeneous rows of a detailed calculation log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepType {
    SampleInfo,
    ForwardHidden,
    ForwardOutput,
    LossCalculation,
    BackpropOutputError,
    BackpropHiddenError,
    WeightUpdateInputHidden,
    WeightUpdateHiddenOutput,
    BiasUpdateHidden,
    BiasUpdateOutput,
}

/// One row of a detailed calculation log.
///
/// Every step kind shares this record; fields a step does not use stay
/// `None` and serialize as empty CSV cells, so the column set is the union
/// of all fields any row uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceRow {
    pub step_type: StepType,
    pub epoch: Option<usize>,
    pub sample_index: Option<usize>,
    pub neuron_index: Option<usize>,
    pub from_neuron: Option<usize>,
    pub to_neuron: Option<usize>,
    pub input_0: Option<f64>,
    pub input_1: Option<f64>,
    pub target_0: Option<f64>,
    pub weighted_sum: Option<f64>,
    pub activation_output: Option<f64>,
    pub target: Option<f64>,
    pub prediction: Option<f64>,
    pub error: Option<f64>,
    pub raw_error: Option<f64>,
    pub error_sum: Option<f64>,
    pub sigmoid_derivative: Option<f64>,
    pub final_error: Option<f64>,
    pub loss_value: Option<f64>,
    pub old_weight: Option<f64>,
    pub gradient: Option<f64>,
    pub new_weight: Option<f64>,
    pub weight_change: Option<f64>,
    pub old_bias: Option<f64>,
    pub new_bias: Option<f64>,
    pub bias_change: Option<f64>,
    pub description: String,
}

impl TraceRow {
    fn new(step_type: StepType, description: String) -> TraceRow {
        TraceRow {
            step_type,
            epoch: None,
            sample_index: None,
            neuron_index: None,
            from_neuron: None,
            to_neuron: None,
            input_0: None,
            input_1: None,
            target_0: None,
            weighted_sum: None,
            activation_output: None,
            target: None,
            prediction: None,
            error: None,
            raw_error: None,
            error_sum: None,
            sigmoid_derivative: None,
            final_error: None,
            loss_value: None,
            old_weight: None,
            gradient: None,
            new_weight: None,
            weight_change: None,
            old_bias: None,
            new_bias: None,
            bias_change: None,
            description,
        }
    }
}

/// Flattens one (epoch, sample) worth of forward and backward arithmetic
/// into log rows, in calculation order.
pub fn detailed_rows(
    epoch: usize,
    sample_index: usize,
    sample: &XorSample,
    forward: &ForwardTrace,
    loss: f64,
    backprop: &BackpropTrace,
) -> Vec<TraceRow> {
    let mut rows = Vec::new();

    let mut info = TraceRow::new(
        StepType::SampleInfo,
        format!("Processing sample {} in epoch {}", sample_index, epoch),
    );
    info.epoch = Some(epoch);
    info.sample_index = Some(sample_index);
    info.input_0 = sample.input.first().copied();
    info.input_1 = sample.input.get(1).copied();
    info.target_0 = sample.target.first().copied();
    rows.push(info);

    for (i, (weighted_sum, activation)) in forward
        .hidden_inputs
        .iter()
        .zip(forward.hidden_outputs.iter())
        .enumerate()
    {
        let mut row = TraceRow::new(
            StepType::ForwardHidden,
            format!("Hidden neuron {} forward pass", i),
        );
        row.neuron_index = Some(i);
        row.weighted_sum = Some(*weighted_sum);
        row.activation_output = Some(*activation);
        rows.push(row);
    }

    for (k, (weighted_sum, output)) in forward
        .output_inputs
        .iter()
        .zip(forward.outputs.iter())
        .enumerate()
    {
        let mut row = TraceRow::new(
            StepType::ForwardOutput,
            format!("Output neuron {} forward pass", k),
        );
        row.neuron_index = Some(k);
        row.weighted_sum = Some(*weighted_sum);
        row.activation_output = Some(*output);
        row.target = sample.target.get(k).copied();
        row.error = sample.target.get(k).map(|t| t - output);
        rows.push(row);
    }

    let mut loss_row = TraceRow::new(StepType::LossCalculation, "MSE loss calculation".into());
    loss_row.loss_value = Some(loss);
    rows.push(loss_row);

    for term in &backprop.output_errors {
        let mut row = TraceRow::new(
            StepType::BackpropOutputError,
            format!("Output neuron {} error calculation", term.neuron),
        );
        row.neuron_index = Some(term.neuron);
        row.target = Some(term.target);
        row.prediction = Some(term.prediction);
        row.raw_error = Some(term.raw_error);
        row.sigmoid_derivative = Some(term.sigmoid_derivative);
        row.final_error = Some(term.final_error);
        rows.push(row);
    }

    for term in &backprop.hidden_errors {
        let mut row = TraceRow::new(
            StepType::BackpropHiddenError,
            format!("Hidden neuron {} error calculation", term.neuron),
        );
        row.neuron_index = Some(term.neuron);
        row.error_sum = Some(term.error_sum);
        row.sigmoid_derivative = Some(term.sigmoid_derivative);
        row.final_error = Some(term.final_error);
        rows.push(row);
    }

    for update in &backprop.input_hidden_updates {
        let mut row = TraceRow::new(
            StepType::WeightUpdateInputHidden,
            format!(
                "Weight update: input {} -> hidden {}",
                update.from_neuron, update.to_neuron
            ),
        );
        row.from_neuron = Some(update.from_neuron);
        row.to_neuron = Some(update.to_neuron);
        row.old_weight = Some(update.old_weight);
        row.gradient = Some(update.gradient);
        row.new_weight = Some(update.new_weight);
        row.weight_change = Some(update.new_weight - update.old_weight);
        rows.push(row);
    }

    for update in &backprop.hidden_output_updates {
        let mut row = TraceRow::new(
            StepType::WeightUpdateHiddenOutput,
            format!(
                "Weight update: hidden {} -> output {}",
                update.from_neuron, update.to_neuron
            ),
        );
        row.from_neuron = Some(update.from_neuron);
        row.to_neuron = Some(update.to_neuron);
        row.old_weight = Some(update.old_weight);
        row.gradient = Some(update.gradient);
        row.new_weight = Some(update.new_weight);
        row.weight_change = Some(update.new_weight - update.old_weight);
        rows.push(row);
    }

    for update in &backprop.hidden_bias_updates {
        let mut row = TraceRow::new(
            StepType::BiasUpdateHidden,
            format!("Bias update: hidden neuron {}", update.neuron),
        );
        row.neuron_index = Some(update.neuron);
        row.old_bias = Some(update.old_bias);
        row.gradient = Some(update.gradient);
        row.new_bias = Some(update.new_bias);
        row.bias_change = Some(update.new_bias - update.old_bias);
        rows.push(row);
    }

    for update in &backprop.output_bias_updates {
        let mut row = TraceRow::new(
            StepType::BiasUpdateOutput,
            format!("Bias update: output neuron {}", update.neuron),
        );
        row.neuron_index = Some(update.neuron);
        row.old_bias = Some(update.old_bias);
        row.gradient = Some(update.gradient);
        row.new_bias = Some(update.new_bias);
        row.bias_change = Some(update.new_bias - update.old_bias);
        rows.push(row);
    }

    rows
}

/// Writes one detailed log file for a single (epoch, sample).
pub fn write_detailed_log(path: &Path, rows: &[TraceRow]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::model::TwoLayerNetwork;
    use crate::train::config::NetworkConfig;

    fn sample_rows() -> Vec<TraceRow> {
        let mut net = TwoLayerNetwork::seeded(&NetworkConfig::default(), 11);
        let sample = XorSample {
            input: vec![1.0, 0.0],
            target: vec![1.0],
        };
        let forward = net.forward_pass(&sample.input);
        let loss = net.calculate_loss(&forward.outputs, &sample.target).unwrap();
        let backprop = net.backward_pass(
            &sample.input,
            &forward.hidden_outputs,
            &forward.outputs,
            &sample.target,
        );
        detailed_rows(3, 1, &sample, &forward, loss, &backprop)
    }

    #[test]
    fn rows_cover_every_step_type_for_a_2_2_1_network() {
        let rows = sample_rows();
        let count = |t: StepType| rows.iter().filter(|r| r.step_type == t).count();

        assert_eq!(count(StepType::SampleInfo), 1);
        assert_eq!(count(StepType::ForwardHidden), 2);
        assert_eq!(count(StepType::ForwardOutput), 1);
        assert_eq!(count(StepType::LossCalculation), 1);
        assert_eq!(count(StepType::BackpropOutputError), 1);
        assert_eq!(count(StepType::BackpropHiddenError), 2);
        assert_eq!(count(StepType::WeightUpdateInputHidden), 4);
        assert_eq!(count(StepType::WeightUpdateHiddenOutput), 2);
        assert_eq!(count(StepType::BiasUpdateHidden), 2);
        assert_eq!(count(StepType::BiasUpdateOutput), 1);
        assert_eq!(rows.len(), 17);
    }

    #[test]
    fn sample_info_row_carries_inputs_and_target() {
        let rows = sample_rows();
        let info = &rows[0];
        assert_eq!(info.step_type, StepType::SampleInfo);
        assert_eq!(info.epoch, Some(3));
        assert_eq!(info.sample_index, Some(1));
        assert_eq!(info.input_0, Some(1.0));
        assert_eq!(info.input_1, Some(0.0));
        assert_eq!(info.target_0, Some(1.0));
    }

    #[test]
    fn step_type_serializes_in_snake_case() {
        let path = std::env::temp_dir().join(format!(
            "glassbox_detailed_{}.csv",
            std::process::id()
        ));
        write_detailed_log(&path, &sample_rows()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("step_type,"));
        assert!(content.contains("sample_info"));
        assert!(content.contains("backprop_output_error"));
        assert!(content.contains("weight_update_input_hidden"));
        assert!(content.contains("bias_update_output"));
        let _ = fs::remove_file(&path);
    }
}
