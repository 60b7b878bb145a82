pub mod catalog;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod history;
pub mod integrator;
pub mod params;

pub use catalog::{list_species, lookup, ParticleSpecies};
pub use config::{load_parameters, ParametersConfig};
pub use driver::{advance, run_to_completion, RunSummary, TickOutcome, Ticker, TICK_INTERVAL};
pub use engine::{
    GapDirection, KinematicState, StepOutcome, TrajectoryEngine, DEE_RADIUS, EXIT_RADIUS,
    GAP_WIDTH,
};
pub use error::{ConfigError, EngineError};
pub use history::{History, Phase, StepRecord};
pub use params::SimulationParameters;

// Test helpers module (public for integration tests)
pub mod tests;
