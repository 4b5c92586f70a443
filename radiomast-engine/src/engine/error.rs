use thiserror::Error;
use tokio::task::JoinError;

use radiomast_config::{ConfigError, PlanError};
use radiomast_core::technology::UnknownTechnology;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Transmission error: {0}")]
    Processing(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Deployment plan error: {0}")]
    Plan(#[from] PlanError),

    #[error("Report serialization error: {0}")]
    Report(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<UnknownTechnology> for SimulationError {
    fn from(err: UnknownTechnology) -> Self {
        SimulationError::Validation(err.to_string())
    }
}

impl From<JoinError> for SimulationError {
    fn from(err: JoinError) -> Self {
        SimulationError::Processing(err.to_string())
    }
}
