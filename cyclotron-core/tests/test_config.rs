//! Tests for loading parameter presets

use cyclotron_core::catalog::{ALPHA, PROTON};
use cyclotron_core::{load_parameters, ConfigError, EngineError, ParametersConfig, SimulationParameters};
use std::path::PathBuf;

fn preset_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(filename);
    path
}

#[test]
fn test_load_full_preset() {
    let params = load_parameters(preset_path("alpha_strong_field.yaml")).expect("preset should load");
    assert_eq!(params.species, &ALPHA);
    assert_eq!(params.magnetic_field, 2.5);
    assert_eq!(params.accelerating_voltage, 40000.0);
    assert_eq!(params.initial_speed_factor, 2.0);
    assert_eq!(params.steps_per_tick, 10);
}

#[test]
fn test_missing_keys_use_defaults() {
    let config = ParametersConfig::from_yaml("accelerating_voltage: 20000\n").unwrap();
    let params = config.to_parameters().unwrap();
    assert_eq!(params.species, &PROTON);
    assert_eq!(params.accelerating_voltage, 20000.0);
    assert_eq!(
        SimulationParameters {
            accelerating_voltage: 15000.0,
            ..params
        },
        SimulationParameters::default()
    );
}

#[test]
fn test_empty_mapping_is_default() {
    let config = ParametersConfig::from_yaml("{}").unwrap();
    assert_eq!(config, ParametersConfig::default());
    assert_eq!(config.to_parameters().unwrap(), SimulationParameters::default());
}

#[test]
fn test_out_of_range_field_is_rejected() {
    let err = load_parameters(preset_path("field_too_weak.yaml")).unwrap_err();
    match err {
        ConfigError::OutOfRange { field, value, min, max } => {
            assert_eq!(field, "magnetic_field");
            assert_eq!(value, 0.1);
            assert_eq!((min, max), (0.5, 3.0));
        }
        other => panic!("Expected OutOfRange, got {:?}", other),
    }
}

#[test]
fn test_range_ends_are_inclusive() {
    let config = ParametersConfig {
        species: "Carbon-12 Ion".to_string(),
        magnetic_field: 3.0,
        accelerating_voltage: 5000.0,
        initial_speed_factor: 10.0,
        steps_per_tick: 40,
    };
    assert!(config.to_parameters().is_ok());

    let too_many = ParametersConfig {
        steps_per_tick: 41,
        ..config.clone()
    };
    assert!(matches!(
        too_many.to_parameters(),
        Err(ConfigError::OutOfRange { field: "steps_per_tick", .. })
    ));

    let none = ParametersConfig {
        steps_per_tick: 0,
        ..config
    };
    assert!(none.to_parameters().is_err());
}

#[test]
fn test_unknown_species_in_preset() {
    let err = load_parameters(preset_path("unknown_species.yaml")).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Species(EngineError::UnknownSpecies { ref name }) if name == "Muon"
    ));
}

#[test]
fn test_unknown_key_is_a_parse_error() {
    let err = ParametersConfig::from_yaml("magnetic_feld: 1.0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load_parameters(preset_path("does_not_exist.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_round_trip_from_parameters() {
    let params = SimulationParameters {
        species: &ALPHA,
        magnetic_field: 0.75,
        ..SimulationParameters::default()
    };
    let config = ParametersConfig::from(params);
    assert_eq!(config.species, "Alpha");
    assert_eq!(config.to_parameters().unwrap(), params);
}
