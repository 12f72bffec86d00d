use thiserror::Error;

pub const DEFAULT_EPSILON: f64 = 0.0661;
pub const DEFAULT_SIGMA: f64 = 0.3345;
pub const DEFAULT_R_MIN: f64 = 0.001;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamError {
    #[error("Lennard-Jones parameter '{name}' must be finite and strictly positive (got {value})")]
    NonPositive { name: &'static str, value: f64 },
}

/// Parameters of the Lennard-Jones 12-6 force field, fixed for a whole run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LennardJonesParams {
    /// Well depth.
    pub epsilon: f64,
    /// Length scale at which the pair energy crosses zero.
    pub sigma: f64,
    /// Floor applied to pair distances before evaluating the force.
    pub r_min: f64,
}

impl Default for LennardJonesParams {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            sigma: DEFAULT_SIGMA,
            r_min: DEFAULT_R_MIN,
        }
    }
}

impl LennardJonesParams {
    pub fn new(epsilon: f64, sigma: f64, r_min: f64) -> Result<Self, ParamError> {
        let params = Self {
            epsilon,
            sigma,
            r_min,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        for (name, value) in [
            ("epsilon", self.epsilon),
            ("sigma", self.sigma),
            ("r_min", self.r_min),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ParamError::NonPositive { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_values() {
        let p = LennardJonesParams::default();
        assert_eq!(p.epsilon, 0.0661);
        assert_eq!(p.sigma, 0.3345);
        assert_eq!(p.r_min, 0.001);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn new_accepts_positive_values() {
        let p = LennardJonesParams::new(1.0, 1.0, 0.01).unwrap();
        assert_eq!(p.sigma, 1.0);
    }

    #[test]
    fn new_rejects_zero_sigma() {
        assert_eq!(
            LennardJonesParams::new(1.0, 0.0, 0.01),
            Err(ParamError::NonPositive {
                name: "sigma",
                value: 0.0
            })
        );
    }

    #[test]
    fn new_rejects_negative_epsilon() {
        assert!(matches!(
            LennardJonesParams::new(-0.1, 1.0, 0.01),
            Err(ParamError::NonPositive {
                name: "epsilon",
                ..
            })
        ));
    }

    #[test]
    fn new_rejects_non_finite_r_min() {
        assert!(matches!(
            LennardJonesParams::new(1.0, 1.0, f64::INFINITY),
            Err(ParamError::NonPositive { name: "r_min", .. })
        ));
    }
}
