pub mod config;
pub mod trainer;

pub use config::{NetworkConfig, PerceptronConfig, RunPaths, TrainingConfig};
pub use trainer::{NetworkTrainer, StopReason, TrainingOutcome};
