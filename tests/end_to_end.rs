//! Full-pipeline checks: both trainers run against their fixed datasets and
//! every artifact the run promises actually lands on disk and reloads.

use std::fs;

use approx::assert_abs_diff_eq;

use glassbox_nn::data::gates;
use glassbox_nn::report::perceptron_log;
use glassbox_nn::{
    Gate, NetworkConfig, NetworkSnapshot, NetworkTrainer, PerceptronConfig, PerceptronTrainer,
    RunPaths, TrainingConfig, TwoLayerNetwork, XorDataset,
};

fn run_root(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("glassbox_e2e_{}_{}", std::process::id(), name))
}

#[test]
fn perceptron_pipeline_produces_all_artifacts() {
    let root = run_root("perceptron");
    let paths = RunPaths::new(&root);
    let config = PerceptronConfig::default();
    let mut trainer = PerceptronTrainer::new(&config);
    let mut summaries = Vec::new();

    for gate in [Gate::And, Gate::Or] {
        // Data file does not exist yet; the loader must regenerate it.
        let samples = gates::load_samples(&paths.gate_training_data(gate), gate).unwrap();
        assert_eq!(samples, gate.truth_table());

        let summary = trainer
            .train(&samples, gate, &paths.gate_training_log(gate))
            .unwrap();
        assert!(summary.converged, "{} failed to converge", gate.name());
        assert_eq!(summary.final_accuracy, 1.0);
        assert!(summary.epochs_to_converge <= config.max_epochs);
        summaries.push(summary);
    }

    perceptron_log::write_summary(&paths.training_summary(), &summaries).unwrap();

    assert!(paths.gate_training_data(Gate::And).exists());
    assert!(paths.gate_training_log(Gate::And).exists());
    assert!(paths.gate_training_log(Gate::Or).exists());
    assert!(paths.training_summary().exists());

    // Log row count: one row per sample per epoch of the OR run (the log
    // file is rewritten per gate).
    let or_log = fs::read_to_string(paths.gate_training_log(Gate::Or)).unwrap();
    let or_rows = or_log.lines().count() - 1;
    assert_eq!(or_rows, summaries[1].epochs_to_converge * 4);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn xor_pipeline_trains_checkpoints_and_reloads() {
    let root = run_root("xor");
    let paths = RunPaths::new(&root);

    let dataset = XorDataset::load_or_create(&paths.xor_dataset()).unwrap();
    assert_eq!(dataset.samples().len(), 4);

    let network_config = NetworkConfig::default();
    let training_config = TrainingConfig {
        epochs: 600,
        target_loss: 0.02,
        early_stopping_patience: 600,
        log_first_epochs: 3,
        log_detailed_every: 200,
        save_model_every: 200,
        print_progress_every: 200,
    };

    let mut trainer = NetworkTrainer::seeded(&network_config, &training_config, &paths, 2024);
    let outcome = trainer.train(dataset.samples()).unwrap();
    trainer.save_final_model().unwrap();

    assert!(outcome.epochs_run >= 1 && outcome.epochs_run <= 600);
    assert!(outcome.best_loss <= outcome.final_average_loss + 1e-12);

    // Loss went down against the first recorded epoch.
    let summary = fs::read_to_string(paths.epoch_summary()).unwrap();
    let first_loss: f64 = summary
        .lines()
        .nth(1)
        .unwrap()
        .split(',')
        .nth(1)
        .unwrap()
        .parse()
        .unwrap();
    assert!(
        outcome.best_loss < first_loss,
        "no loss reduction: first {} best {}",
        first_loss,
        outcome.best_loss
    );

    // Detailed logs exist for the first epochs, one file per sample.
    for sample in 0..4 {
        assert!(paths.detailed_log(0, sample).exists());
        assert!(paths.detailed_log(2, sample).exists());
    }
    assert!(paths.checkpoint(0).exists());

    // The final artifact reloads into an identically predicting model.
    let snapshot = NetworkSnapshot::load_json(&paths.final_model()).unwrap();
    let rebuilt = TwoLayerNetwork::from_snapshot(snapshot);
    for sample in dataset.samples() {
        assert_abs_diff_eq!(
            trainer.network().predict(&sample.input)[0],
            rebuilt.predict(&sample.input)[0],
            epsilon = 1e-12
        );
    }

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn dataset_artifact_round_trips_through_disk() {
    let root = run_root("dataset");
    let paths = RunPaths::new(&root);

    let dataset = XorDataset::new();
    dataset.save_json(&paths.xor_dataset()).unwrap();
    let reloaded = XorDataset::load_json(&paths.xor_dataset()).unwrap();
    assert_eq!(reloaded, dataset);

    let json = fs::read_to_string(paths.xor_dataset()).unwrap();
    for field in ["description", "input_size", "output_size", "samples"] {
        assert!(json.contains(field), "missing field {}", field);
    }

    let _ = fs::remove_dir_all(&root);
}
