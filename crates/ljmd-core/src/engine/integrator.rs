use super::error::EngineError;
use crate::core::forcefield::energy::EnergyCalculator;
use crate::core::forcefield::params::LennardJonesParams;
use crate::core::models::distance::DistanceMatrix;
use crate::core::models::system::ParticleSet;

/// Result of one integration step.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// Distances at the new positions, reusable for energy evaluation at `t + dt`.
    pub distances: DistanceMatrix,
    /// Number of pairs clamped while computing the new accelerations.
    pub clamped_pairs: usize,
}

/// Fixed-step velocity-Verlet integrator.
#[derive(Debug, Clone, Copy, Default)]
pub struct VelocityVerlet;

impl VelocityVerlet {
    pub const NAME: &'static str = "velocity-Verlet";

    /// Advances the particle set by one time step of length `dt`.
    ///
    /// Positions move with the current velocities and accelerations, the
    /// accelerations are recomputed at the new positions, and velocities are
    /// updated with the mean of the old and new accelerations. The new
    /// accelerations are committed to the set only after the velocity update.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Resource`] if the acceleration buffer cannot be
    /// allocated. The buffer is reserved before anything moves, so the set is left
    /// untouched on error.
    pub fn step(
        &self,
        particles: &mut ParticleSet,
        params: &LennardJonesParams,
        dt: f64,
    ) -> Result<StepOutcome, EngineError> {
        let mut values = EnergyCalculator::reserve_accelerations(particles.len())?;

        let half_dt_sq = 0.5 * dt * dt;
        let kinematics = particles.kinematics_mut();
        for ((x, v), a) in kinematics
            .positions
            .iter_mut()
            .zip(kinematics.velocities.iter())
            .zip(kinematics.accelerations.iter())
        {
            *x += v * dt + a * half_dt_sq;
        }

        let distances = DistanceMatrix::compute(particles);
        let clamped_pairs =
            EnergyCalculator::accelerations_into(particles, &distances, params, &mut values)?;

        let half_dt = 0.5 * dt;
        let kinematics = particles.kinematics_mut();
        for ((v, a_old), a_new) in kinematics
            .velocities
            .iter_mut()
            .zip(kinematics.accelerations.iter())
            .zip(&values)
        {
            *v += (a_old + a_new) * half_dt;
        }
        particles.replace_accelerations(values);

        Ok(StepOutcome {
            distances,
            clamped_pairs,
        })
    }
}
