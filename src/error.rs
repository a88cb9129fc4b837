use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlgolabError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Clustering error: {0}")]
    Clustering(String),

    #[error("Color out of range: {0}")]
    ColorRange(String),

    #[error("Scene error: {0}")]
    Scene(String),

    #[error("Trajectory error: {0}")]
    Trajectory(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("Config source error: {0}")]
    ConfigSource(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, AlgolabError>;
