//! The Lennard-Jones force field.
//!
//! [`potentials`] holds the pure pair functions, [`params`] the run constants and
//! [`energy`] the whole-system evaluation of energies and accelerations.

pub mod energy;
pub mod params;
pub mod potentials;
pub mod term;
