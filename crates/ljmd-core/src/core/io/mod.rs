//! Reading particle configurations and writing simulation output.
//!
//! - [`xyzm`] parses and writes the `[label] x y z mass` particle file through the
//!   [`traits::MolecularFile`] interface.
//! - [`trajectory`] defines the [`trajectory::TrajectorySink`] the simulation driver
//!   streams snapshots into, with a text writer and an in-memory recorder.
//! - [`energy_log`] writes per-step energies as CSV.

pub mod energy_log;
pub mod trajectory;
pub mod traits;
pub mod xyzm;
