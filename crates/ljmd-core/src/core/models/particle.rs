use nalgebra::Point3;

/// Label assigned to particles whose input record carries no symbol.
pub const DEFAULT_LABEL: &str = "X";

/// A single atom record as supplied by an input file or an embedding program.
///
/// This is the immutable description a [`ParticleSet`](super::system::ParticleSet) is
/// built from. It carries no kinematic state; velocities and accelerations only
/// exist once the record has been loaded into a set.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Display-only symbol (e.g., "Ar", "C"). It plays no role in the physics.
    pub label: String,
    /// Cartesian coordinates, in the same length unit as the force field's sigma.
    pub position: Point3<f64>,
    /// Particle mass. Must be strictly positive once loaded into a set.
    pub mass: f64,
}

impl Particle {
    /// Creates a new particle record.
    ///
    /// # Arguments
    ///
    /// * `label` - The display symbol of the particle.
    /// * `position` - The 3D coordinates of the particle.
    /// * `mass` - The particle mass.
    pub fn new(label: &str, position: Point3<f64>, mass: f64) -> Self {
        Self {
            label: label.to_string(),
            position,
            mass,
        }
    }

    /// Creates a particle record without a symbol, using [`DEFAULT_LABEL`].
    pub fn unlabeled(position: Point3<f64>, mass: f64) -> Self {
        Self::new(DEFAULT_LABEL, position, mass)
    }
}
