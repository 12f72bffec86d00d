//! # Core Models Module
//!
//! This module contains the data structures that describe the state of a simulated
//! particle cluster.
//!
//! ## Key Components
//!
//! - [`particle`] - A single atom record (label, position, mass) as read from input
//! - [`system`] - The [`ParticleSet`](system::ParticleSet): masses, labels and kinematics of every particle
//! - [`distance`] - The [`DistanceMatrix`](distance::DistanceMatrix) derived from the current positions
//!
//! ## Usage
//!
//! ```ignore
//! use ljmd::core::models::{particle::Particle, system::ParticleSet, distance::DistanceMatrix};
//!
//! let set = ParticleSet::from_particles(vec![
//!     Particle::new("Ar", Point3::new(0.0, 0.0, 0.0), 39.948),
//!     Particle::new("Ar", Point3::new(0.38, 0.0, 0.0), 39.948),
//! ])?;
//! let distances = DistanceMatrix::compute(&set);
//! ```

pub mod distance;
pub mod particle;
pub mod system;
