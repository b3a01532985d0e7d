pub mod model;
pub mod trainer;

pub use model::{Perceptron, SampleOutcome};
pub use trainer::{GateSummary, PerceptronTrainer, TrainingLogEntry};
