use log::error;

use glassbox_nn::data::gates;
use glassbox_nn::perceptron::trainer::GateSummary;
use glassbox_nn::report::perceptron_log;
use glassbox_nn::{
    Gate, NetworkConfig, NetworkTrainer, PerceptronConfig, PerceptronTrainer, RunPaths,
    TrainingConfig, XorDataset,
};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> glassbox_nn::Result<()> {
    let paths = RunPaths::default();

    println!("Single Perceptron Neural Network - AND & OR Gates");
    println!("{}", "=".repeat(55));

    let perceptron_config = PerceptronConfig::default();
    let mut trainer = PerceptronTrainer::new(&perceptron_config);
    let mut summaries = Vec::new();

    for gate in [Gate::And, Gate::Or] {
        let samples = gates::load_samples(&paths.gate_training_data(gate), gate)?;
        let summary = trainer.train(&samples, gate, &paths.gate_training_log(gate))?;
        trainer.test_final_model(&samples, gate);
        summaries.push(summary);
    }

    perceptron_log::write_summary(&paths.training_summary(), &summaries)?;
    print_comparison_report(&summaries[0], &summaries[1]);

    println!("\n=== MLP Training for the XOR Problem ===\n");

    let dataset = XorDataset::new();
    dataset.save_json(&paths.xor_dataset())?;

    let network_config = NetworkConfig::default();
    let training_config = TrainingConfig::default();
    let mut network_trainer = NetworkTrainer::new(&network_config, &training_config, &paths);

    network_trainer.train(dataset.samples())?;

    println!("\n=== Testing Trained Network ===");
    network_trainer.test(dataset.samples());
    network_trainer.save_final_model()?;

    println!("\nDone. Check {} for artifacts.", paths.results_dir.display());
    Ok(())
}

fn print_comparison_report(and: &GateSummary, or: &GateSummary) {
    println!("\n{}", "=".repeat(60));
    println!("COMPARISON REPORT: AND vs OR Gate Training");
    println!("{}", "=".repeat(60));

    println!("{:<25} {:<15} {:<15}", "Metric", "AND Gate", "OR Gate");
    println!("{}", "-".repeat(55));
    println!(
        "{:<25} {:<15} {:<15}",
        "Epochs to Converge", and.epochs_to_converge, or.epochs_to_converge
    );
    println!(
        "{:<25} {:<15.2} {:<15.2}",
        "Final Accuracy", and.final_accuracy, or.final_accuracy
    );
    println!(
        "{:<25} {:<15} {:<15}",
        "Total Weight Updates", and.total_weight_updates, or.total_weight_updates
    );
    println!(
        "{:<25} {:<15} {:<15}",
        "Converged",
        if and.converged { "Yes" } else { "No" },
        if or.converged { "Yes" } else { "No" }
    );

    println!("\nFinal Weights:");
    println!("{:<10} {:<10} {:<10} {:<10}", "Gate", "w1", "w2", "w_bias");
    println!("{}", "-".repeat(40));
    println!(
        "{:<10} {:<10} {:<10} {:<10}",
        "AND", and.final_w1, and.final_w2, and.final_w_bias
    );
    println!(
        "{:<10} {:<10} {:<10} {:<10}",
        "OR", or.final_w1, or.final_w2, or.final_w_bias
    );
}
