use super::params::LennardJonesParams;
use super::potentials;
use super::term::EnergyTerm;
use crate::core::models::distance::DistanceMatrix;
use crate::core::models::system::ParticleSet;
use nalgebra::Vector3;
use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnergyCalculationError {
    #[error("Failed to allocate the acceleration buffer for {particles} particles: {source}")]
    Allocation {
        particles: usize,
        #[source]
        source: TryReserveError,
    },
    #[error("Distance matrix covers {matrix} particles but the particle set holds {particles}")]
    SizeMismatch { matrix: usize, particles: usize },
}

/// Per-particle accelerations produced by one force evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Accelerations {
    pub values: Vec<Vector3<f64>>,
    /// Number of pairs whose distance was raised to the force floor.
    pub clamped_pairs: usize,
}

pub struct EnergyCalculator;

impl EnergyCalculator {
    /// Total Lennard-Jones energy, summed over unordered pairs `i < j`.
    pub fn potential_energy(params: &LennardJonesParams, distances: &DistanceMatrix) -> f64 {
        distances
            .unique_pairs()
            .map(|(_, _, r)| potentials::lennard_jones_12_6(r, params.sigma, params.epsilon))
            .sum()
    }

    /// Computes the acceleration of every particle from the Lennard-Jones pair forces.
    ///
    /// Distances below `params.r_min` are raised to it before both the force magnitude
    /// and the `(x_i - x_j) / r` projection are evaluated. The force vector of each
    /// pair is computed once and added to `i` and subtracted from `j`, so the pair
    /// contributions cancel exactly.
    pub fn accelerations(
        particles: &ParticleSet,
        distances: &DistanceMatrix,
        params: &LennardJonesParams,
    ) -> Result<Accelerations, EnergyCalculationError> {
        let mut values = Self::reserve_accelerations(particles.len())?;
        let clamped_pairs = Self::accelerations_into(particles, distances, params, &mut values)?;
        Ok(Accelerations {
            values,
            clamped_pairs,
        })
    }

    /// Allocates an empty acceleration buffer with room for `particles` entries.
    ///
    /// # Errors
    ///
    /// Returns [`EnergyCalculationError::Allocation`] instead of aborting when the
    /// allocator refuses the request.
    pub fn reserve_accelerations(
        particles: usize,
    ) -> Result<Vec<Vector3<f64>>, EnergyCalculationError> {
        let mut values = Vec::new();
        values
            .try_reserve_exact(particles)
            .map_err(|source| EnergyCalculationError::Allocation { particles, source })?;
        Ok(values)
    }

    /// Same as [`accelerations`](Self::accelerations), writing into `values` and
    /// returning the number of clamped pairs.
    ///
    /// `values` is cleared first. It does not grow when it was obtained from
    /// [`reserve_accelerations`](Self::reserve_accelerations) for this set.
    pub fn accelerations_into(
        particles: &ParticleSet,
        distances: &DistanceMatrix,
        params: &LennardJonesParams,
        values: &mut Vec<Vector3<f64>>,
    ) -> Result<usize, EnergyCalculationError> {
        let n = particles.len();
        if distances.size() != n {
            return Err(EnergyCalculationError::SizeMismatch {
                matrix: distances.size(),
                particles: n,
            });
        }

        values.clear();
        if values.capacity() < n {
            values
                .try_reserve_exact(n)
                .map_err(|source| EnergyCalculationError::Allocation {
                    particles: n,
                    source,
                })?;
        }
        values.resize(n, Vector3::zeros());

        let positions = particles.positions();
        let mut clamped_pairs = 0;
        for (i, j, r) in distances.unique_pairs() {
            let (r, clamped) = potentials::clamp_distance(r, params.r_min);
            if clamped {
                clamped_pairs += 1;
            }
            let magnitude = potentials::lennard_jones_force(r, params.sigma, params.epsilon);
            let force = (positions[i] - positions[j]) * (magnitude / r);
            values[i] += force;
            values[j] -= force;
        }

        for (value, &mass) in values.iter_mut().zip(particles.masses()) {
            *value /= mass;
        }

        Ok(clamped_pairs)
    }

    /// Total kinetic energy, `Σ ½ m |v|²`.
    pub fn kinetic_energy(particles: &ParticleSet) -> f64 {
        particles
            .velocities()
            .iter()
            .zip(particles.masses())
            .map(|(v, &m)| 0.5 * m * v.norm_squared())
            .sum()
    }

    /// Total linear momentum, `Σ m v`.
    pub fn total_momentum(particles: &ParticleSet) -> Vector3<f64> {
        particles
            .velocities()
            .iter()
            .zip(particles.masses())
            .fold(Vector3::zeros(), |acc, (v, &m)| acc + v * m)
    }

    pub fn energies(
        particles: &ParticleSet,
        distances: &DistanceMatrix,
        params: &LennardJonesParams,
    ) -> EnergyTerm {
        EnergyTerm::new(
            Self::kinetic_energy(particles),
            Self::potential_energy(params, distances),
        )
    }
}
