//! Test helper utilities for cyclotron tests

use crate::catalog::ParticleSpecies;
use crate::engine::TrajectoryEngine;
use crate::params::SimulationParameters;

/// Check if two floating point values are approximately equal within tolerance
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// Default parameters with a different species
pub fn params_for(species: &'static ParticleSpecies) -> SimulationParameters {
    SimulationParameters {
        species,
        ..SimulationParameters::default()
    }
}

/// Parameters with the accelerating voltage switched off
pub fn field_only(magnetic_field: f64) -> SimulationParameters {
    SimulationParameters {
        magnetic_field,
        accelerating_voltage: 0.0,
        ..SimulationParameters::default()
    }
}

/// A fresh engine that has been started and stepped `batches` times
pub fn engine_after(params: &SimulationParameters, batches: usize) -> TrajectoryEngine {
    let mut engine = TrajectoryEngine::new();
    engine.begin(params);
    for _ in 0..batches {
        engine.step(params);
    }
    engine
}

/// Owned copy of every stored step: (x, y, gap direction sign)
pub fn snapshot(engine: &TrajectoryEngine) -> Vec<(f64, f64, i8)> {
    engine
        .history()
        .iter()
        .map(|r| (r.position.x, r.position.y, r.gap_direction.signum()))
        .collect()
}
