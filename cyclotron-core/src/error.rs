use thiserror::Error;

/// Errors returned by the catalog and the trajectory engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("unknown particle species '{name}'")]
    UnknownSpecies { name: String },

    #[error("frame index {index} is out of range for a history of {len} steps")]
    IndexOutOfRange { index: isize, len: usize },
}

/// Errors raised while loading a parameter preset
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read preset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse preset: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error(transparent)]
    Species(#[from] EngineError),

    #[error("{field} = {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}
