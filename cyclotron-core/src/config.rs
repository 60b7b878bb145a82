//! Parameter presets loaded from YAML.
//!
//! Every key is optional and falls back to the default parameters:
//!
//! ```yaml
//! species: Alpha
//! magnetic_field: 2.0         # T, 0.5..=3.0
//! accelerating_voltage: 20000 # V, 5000..=50000
//! initial_speed_factor: 1.5   # 0.1..=10.0
//! steps_per_tick: 5           # 1..=40
//! ```
//!
//! Converting a preset into [`SimulationParameters`] is where the parameter
//! bounds are enforced; the engine itself trusts what it is given.

use crate::catalog;
use crate::error::ConfigError;
use crate::params::{
    SimulationParameters, MAGNETIC_FIELD_RANGE, SPEED_FACTOR_RANGE, STEPS_PER_TICK_RANGE,
    VOLTAGE_RANGE,
};
use serde::Deserialize;
use std::ops::RangeInclusive;
use std::path::Path;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ParametersConfig {
    pub species: String,
    pub magnetic_field: f64,
    pub accelerating_voltage: f64,
    pub initial_speed_factor: f64,
    pub steps_per_tick: u32,
}

impl Default for ParametersConfig {
    fn default() -> Self {
        SimulationParameters::default().into()
    }
}

impl From<SimulationParameters> for ParametersConfig {
    fn from(params: SimulationParameters) -> Self {
        Self {
            species: params.species.name.to_string(),
            magnetic_field: params.magnetic_field,
            accelerating_voltage: params.accelerating_voltage,
            initial_speed_factor: params.initial_speed_factor,
            steps_per_tick: params.steps_per_tick,
        }
    }
}

impl ParametersConfig {
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml(&source)
    }

    /// Resolve the species and check every value against its range
    pub fn to_parameters(&self) -> Result<SimulationParameters, ConfigError> {
        let species = catalog::lookup(&self.species)?;
        check_range("magnetic_field", self.magnetic_field, &MAGNETIC_FIELD_RANGE)?;
        check_range("accelerating_voltage", self.accelerating_voltage, &VOLTAGE_RANGE)?;
        check_range("initial_speed_factor", self.initial_speed_factor, &SPEED_FACTOR_RANGE)?;
        let steps = STEPS_PER_TICK_RANGE;
        check_range(
            "steps_per_tick",
            self.steps_per_tick as f64,
            &(*steps.start() as f64..=*steps.end() as f64),
        )?;

        Ok(SimulationParameters {
            species,
            magnetic_field: self.magnetic_field,
            accelerating_voltage: self.accelerating_voltage,
            initial_speed_factor: self.initial_speed_factor,
            steps_per_tick: self.steps_per_tick,
        })
    }
}

fn check_range(
    field: &'static str,
    value: f64,
    range: &RangeInclusive<f64>,
) -> Result<(), ConfigError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

/// Load a preset file straight into validated parameters
pub fn load_parameters(path: impl AsRef<Path>) -> Result<SimulationParameters, ConfigError> {
    ParametersConfig::load(path)?.to_parameters()
}
