//! # ljmd
//!
//! Molecular dynamics of small Lennard-Jones clusters, integrated with a fixed-step
//! velocity-Verlet scheme.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Particle data (`ParticleSet`, `DistanceMatrix`), the
//!   Lennard-Jones force field, and file I/O for particle inputs, trajectories and
//!   energy logs.
//!
//! - **[`engine`]: The Logic Core.** Run configuration, the velocity-Verlet integrator,
//!   progress reporting and run state.
//!
//! - **[`workflows`]: The Public API.** The [`workflows::simulate::Simulation`] driver,
//!   which owns a particle set for one run and streams its trajectory to a sink.
//!
//! ## Example
//!
//! ```
//! use ljmd::core::io::trajectory::SnapshotRecorder;
//! use ljmd::core::models::particle::Particle;
//! use ljmd::core::models::system::ParticleSet;
//! use ljmd::engine::config::SimulationConfig;
//! use ljmd::engine::progress::ProgressReporter;
//! use ljmd::workflows::simulate;
//! use nalgebra::Point3;
//!
//! let particles = ParticleSet::from_particles(vec![
//!     Particle::new("Ar", Point3::new(0.0, 0.0, 0.0), 39.948),
//!     Particle::new("Ar", Point3::new(0.38, 0.0, 0.0), 39.948),
//! ])?;
//! let config = SimulationConfig::builder().total_steps(100).write_frequency(10).build()?;
//!
//! let mut recorder = SnapshotRecorder::new();
//! let result = simulate::run(particles, &config, &mut recorder, None, &ProgressReporter::new())?;
//!
//! assert_eq!(recorder.snapshots().len(), 10);
//! assert!(result.summary.max_relative_drift < 0.01);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
