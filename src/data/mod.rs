pub mod gates;
pub mod xor;

pub use gates::{Gate, GateSample};
pub use xor::{XorDataset, XorSample};
