pub mod io;
pub mod rotation;
pub mod sim;

// Common surface re-exported at the crate root
pub use sim::{AttitudeState, ConfigError, HistorySample, Propagator, PropagatorConfig};
