pub mod detailed;
pub mod epoch_summary;
pub mod perceptron_log;

pub use detailed::{detailed_rows, write_detailed_log, StepType, TraceRow};
pub use epoch_summary::{EpochSummaryRecord, EpochSummaryWriter};
pub use perceptron_log::{write_summary, write_training_log};
