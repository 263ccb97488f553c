pub mod propagator;
pub mod state;

pub use propagator::{ConfigError, Propagator, PropagatorConfig};
pub use state::{AttitudeState, HistorySample};
