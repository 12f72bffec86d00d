//! # Core Module
//!
//! Stateless building blocks of the simulation.
//!
//! - **Particle Representation** ([`models`]) - Particle records, the structure-of-arrays
//!   [`models::system::ParticleSet`] and the pairwise [`models::distance::DistanceMatrix`]
//! - **Energy Calculations** ([`forcefield`]) - Lennard-Jones parameters, pair potentials,
//!   and kinetic/potential energy and force evaluation
//! - **File I/O** ([`io`]) - Particle file reader/writer, trajectory sinks and energy log

pub mod forcefield;
pub mod io;
pub mod models;
