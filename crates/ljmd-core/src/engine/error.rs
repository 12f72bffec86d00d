use thiserror::Error;

use super::config::ConfigError;
use super::state::SimulationState;
use crate::core::forcefield::energy::EnergyCalculationError;
use crate::core::io::energy_log::EnergyLogError;
use crate::core::io::trajectory::TrajectoryError;
use crate::core::models::system::ParticleSetError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Resource exhausted: {0}")]
    Resource(String),

    #[error("Trajectory output failed: {source}")]
    Trajectory {
        #[from]
        source: TrajectoryError,
    },

    #[error("Energy log output failed: {source}")]
    EnergyLog {
        #[from]
        source: EnergyLogError,
    },

    #[error("Simulation is {found:?}, expected {expected:?}")]
    InvalidState {
        expected: SimulationState,
        found: SimulationState,
    },

    #[error("Invalid particle data: {0}")]
    DataFormat(#[from] ParticleSetError),

    #[error("Internal logic error: {0}")]
    Internal(String),
}

impl From<EnergyCalculationError> for EngineError {
    fn from(err: EnergyCalculationError) -> Self {
        match err {
            EnergyCalculationError::Allocation { .. } => EngineError::Resource(err.to_string()),
            EnergyCalculationError::SizeMismatch { .. } => EngineError::Internal(err.to_string()),
        }
    }
}
