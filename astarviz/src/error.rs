//! Error types for astarviz

use thiserror::Error;

/// Application error type.
#[derive(Error, Debug)]
pub enum VizError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Driver error: {0}")]
    Driver(String),

    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl From<toml::de::Error> for VizError {
    fn from(e: toml::de::Error) -> Self {
        VizError::Config(e.to_string())
    }
}

impl From<Box<dyn std::error::Error>> for VizError {
    fn from(e: Box<dyn std::error::Error>) -> Self {
        VizError::Driver(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VizError>;
