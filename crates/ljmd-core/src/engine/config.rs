use crate::core::forcefield::params::{LennardJonesParams, ParamError};
use thiserror::Error;

pub const DEFAULT_DT: f64 = 0.2;
pub const DEFAULT_TOTAL_STEPS: usize = 1000;
pub const DEFAULT_WRITE_FREQUENCY: usize = 1;
pub const DEFAULT_PROGRESS_INTERVAL: usize = 50;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("Invalid force field: {0}")]
    ForceField(#[from] ParamError),
}

/// Immutable run configuration of a simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub force_field: LennardJonesParams,
    /// Integration time step.
    pub dt: f64,
    /// Number of integration steps to perform.
    pub total_steps: usize,
    /// A snapshot is written every `write_frequency` steps, starting at step 0.
    pub write_frequency: usize,
    /// Progress is reported every `progress_interval` steps.
    pub progress_interval: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            force_field: LennardJonesParams::default(),
            dt: DEFAULT_DT,
            total_steps: DEFAULT_TOTAL_STEPS,
            write_frequency: DEFAULT_WRITE_FREQUENCY,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl SimulationConfig {
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::new()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.force_field.validate()?;
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "dt",
                reason: format!("must be finite and strictly positive (got {})", self.dt),
            });
        }
        if self.write_frequency == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "write_frequency",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.progress_interval == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "progress_interval",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Builds a [`SimulationConfig`], falling back to the defaults for unset values.
#[derive(Default)]
pub struct SimulationConfigBuilder {
    epsilon: Option<f64>,
    sigma: Option<f64>,
    r_min: Option<f64>,
    dt: Option<f64>,
    total_steps: Option<usize>,
    write_frequency: Option<usize>,
    progress_interval: Option<usize>,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }
    pub fn sigma(mut self, sigma: f64) -> Self {
        self.sigma = Some(sigma);
        self
    }
    pub fn r_min(mut self, r_min: f64) -> Self {
        self.r_min = Some(r_min);
        self
    }
    pub fn force_field(mut self, params: LennardJonesParams) -> Self {
        self.epsilon = Some(params.epsilon);
        self.sigma = Some(params.sigma);
        self.r_min = Some(params.r_min);
        self
    }
    pub fn dt(mut self, dt: f64) -> Self {
        self.dt = Some(dt);
        self
    }
    pub fn total_steps(mut self, steps: usize) -> Self {
        self.total_steps = Some(steps);
        self
    }
    pub fn write_frequency(mut self, frequency: usize) -> Self {
        self.write_frequency = Some(frequency);
        self
    }
    pub fn progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = Some(interval);
        self
    }

    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let defaults = SimulationConfig::default();
        let config = SimulationConfig {
            force_field: LennardJonesParams {
                epsilon: self.epsilon.unwrap_or(defaults.force_field.epsilon),
                sigma: self.sigma.unwrap_or(defaults.force_field.sigma),
                r_min: self.r_min.unwrap_or(defaults.force_field.r_min),
            },
            dt: self.dt.unwrap_or(defaults.dt),
            total_steps: self.total_steps.unwrap_or(defaults.total_steps),
            write_frequency: self.write_frequency.unwrap_or(defaults.write_frequency),
            progress_interval: self.progress_interval.unwrap_or(defaults.progress_interval),
        };
        config.validate()?;
        Ok(config)
    }
}
