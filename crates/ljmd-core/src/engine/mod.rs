//! # Engine Module
//!
//! The stateful layer that advances a particle set in time.
//!
//! - **Configuration** ([`config`]) - Validated run parameters and their builder
//! - **Integration** ([`integrator`]) - The velocity-Verlet time stepper
//! - **State Tracking** ([`state`]) - Run lifecycle and the end-of-run summary
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Engine-level error type

pub mod config;
pub mod error;
pub mod integrator;
pub mod progress;
pub mod state;
