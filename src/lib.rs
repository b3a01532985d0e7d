pub mod data;
pub mod error;
pub mod math;
pub mod network;
pub mod perceptron;
pub mod report;
pub mod train;

// Convenience re-exports
pub use data::gates::{Gate, GateSample};
pub use data::xor::{XorDataset, XorSample};
pub use error::{Error, Result};
pub use network::model::TwoLayerNetwork;
pub use network::snapshot::NetworkSnapshot;
pub use perceptron::model::Perceptron;
pub use perceptron::trainer::PerceptronTrainer;
pub use train::config::{NetworkConfig, PerceptronConfig, RunPaths, TrainingConfig};
pub use train::trainer::NetworkTrainer;
