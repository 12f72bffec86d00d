use super::particle::Particle;
use nalgebra::{Point3, Vector3};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParticleSetError {
    #[error("Particle {index} has invalid mass {mass} (must be finite and strictly positive)")]
    InvalidMass { index: usize, mass: f64 },
    #[error("Particle {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },
}

/// The mutable state of a simulation: per-particle kinematics, masses and labels.
///
/// Each quantity is stored in its own contiguous vector indexed by particle, so a
/// particle's position, velocity and acceleration live at the same index across the
/// three buffers. The number of particles is fixed once the set is constructed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleSet {
    labels: Vec<String>,
    masses: Vec<f64>,
    positions: Vec<Point3<f64>>,
    velocities: Vec<Vector3<f64>>,
    accelerations: Vec<Vector3<f64>>,
}

/// Simultaneous mutable view of the kinematic buffers, used by integrators.
pub(crate) struct KinematicsMut<'a> {
    pub positions: &'a mut [Point3<f64>],
    pub velocities: &'a mut [Vector3<f64>],
    pub accelerations: &'a mut [Vector3<f64>],
}

impl ParticleSet {
    /// Creates an empty particle set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a particle set from atom records, with zero velocity and acceleration.
    ///
    /// # Arguments
    ///
    /// * `particles` - The atom records, in the order they should be indexed.
    ///
    /// # Return
    ///
    /// Returns the populated set.
    ///
    /// # Errors
    ///
    /// Returns [`ParticleSetError::InvalidMass`] if any mass is not strictly positive
    /// and finite, or [`ParticleSetError::NonFiniteCoordinate`] if a coordinate is NaN
    /// or infinite.
    pub fn from_particles<I>(particles: I) -> Result<Self, ParticleSetError>
    where
        I: IntoIterator<Item = Particle>,
    {
        let mut set = Self::new();
        for (index, particle) in particles.into_iter().enumerate() {
            if !(particle.mass.is_finite() && particle.mass > 0.0) {
                return Err(ParticleSetError::InvalidMass {
                    index,
                    mass: particle.mass,
                });
            }
            if !particle.position.coords.iter().all(|c| c.is_finite()) {
                return Err(ParticleSetError::NonFiniteCoordinate { index });
            }
            set.labels.push(particle.label);
            set.masses.push(particle.mass);
            set.positions.push(particle.position);
            set.velocities.push(Vector3::zeros());
            set.accelerations.push(Vector3::zeros());
        }
        Ok(set)
    }

    /// Returns the number of particles.
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    /// Returns `true` if the set holds no particles.
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vector3<f64>] {
        &self.velocities
    }

    pub fn accelerations(&self) -> &[Vector3<f64>] {
        &self.accelerations
    }

    /// Reconstructs the atom records (label, current position, mass) of the set.
    pub fn to_particles(&self) -> Vec<Particle> {
        self.labels
            .iter()
            .zip(&self.positions)
            .zip(&self.masses)
            .map(|((label, position), &mass)| Particle::new(label, *position, mass))
            .collect()
    }

    /// Resets every velocity to zero.
    pub fn zero_velocities(&mut self) {
        self.velocities.fill(Vector3::zeros());
    }

    /// Replaces the accelerations with a freshly computed buffer.
    ///
    /// The buffer must hold exactly one entry per particle.
    pub(crate) fn replace_accelerations(&mut self, accelerations: Vec<Vector3<f64>>) {
        debug_assert_eq!(accelerations.len(), self.len());
        self.accelerations = accelerations;
    }

    pub(crate) fn kinematics_mut(&mut self) -> KinematicsMut<'_> {
        KinematicsMut {
            positions: &mut self.positions,
            velocities: &mut self.velocities,
            accelerations: &mut self.accelerations,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_velocity(&mut self, index: usize, velocity: Vector3<f64>) {
        self.velocities[index] = velocity;
    }
}
