pub mod model;
pub mod snapshot;
pub mod trace;

pub use model::TwoLayerNetwork;
pub use snapshot::NetworkSnapshot;
pub use trace::{BackpropTrace, BiasUpdate, ForwardTrace, HiddenErrorTerm, OutputErrorTerm, WeightUpdate};
