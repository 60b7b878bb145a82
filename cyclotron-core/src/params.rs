//! Parameters supplied to the engine for every batch of steps.

use crate::catalog::{ParticleSpecies, PROTON};
use std::ops::RangeInclusive;

/// Allowed magnetic field strength in T
pub const MAGNETIC_FIELD_RANGE: RangeInclusive<f64> = 0.5..=3.0;
/// Allowed accelerating voltage across the gap in V
pub const VOLTAGE_RANGE: RangeInclusive<f64> = 5000.0..=50000.0;
/// Allowed multiplier applied to the base injection speed
pub const SPEED_FACTOR_RANGE: RangeInclusive<f64> = 0.1..=10.0;
/// Allowed integration sub-steps per tick
pub const STEPS_PER_TICK_RANGE: RangeInclusive<u32> = 1..=40;

/// Simulation inputs owned by the caller.
///
/// The engine reads these fresh for every `begin` and `step` call and does
/// not check them against the ranges above; keeping them in bounds is the
/// caller's job (see [`crate::config`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    pub species: &'static ParticleSpecies,
    /// Magnetic flux density B in T
    pub magnetic_field: f64,
    /// Gap voltage V in V
    pub accelerating_voltage: f64,
    pub initial_speed_factor: f64,
    pub steps_per_tick: u32,
}

impl SimulationParameters {
    /// Cyclotron angular frequency ω = qB/m in rad/s
    pub fn angular_frequency(&self) -> f64 {
        self.species.charge * self.magnetic_field / self.species.mass
    }

    /// Cyclotron frequency f = ω/2π in Hz
    pub fn cyclotron_frequency(&self) -> f64 {
        self.angular_frequency() / std::f64::consts::TAU
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            species: &PROTON,
            magnetic_field: 1.5,
            accelerating_voltage: 15000.0,
            initial_speed_factor: 1.5,
            steps_per_tick: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_in_range() {
        let p = SimulationParameters::default();
        assert!(MAGNETIC_FIELD_RANGE.contains(&p.magnetic_field));
        assert!(VOLTAGE_RANGE.contains(&p.accelerating_voltage));
        assert!(SPEED_FACTOR_RANGE.contains(&p.initial_speed_factor));
        assert!(STEPS_PER_TICK_RANGE.contains(&p.steps_per_tick));
    }

    #[test]
    fn proton_frequency_at_one_and_a_half_tesla() {
        let p = SimulationParameters::default();
        // 1.6e-19 * 1.5 / 1.67e-27 ≈ 1.437e8 rad/s
        assert!((p.angular_frequency() - 1.437_125_748_5e8).abs() < 1e2);
        assert!((p.cyclotron_frequency() * std::f64::consts::TAU - p.angular_frequency()).abs() < 1e-3);
    }
}
