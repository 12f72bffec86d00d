//! # Workflows Module
//!
//! High-level entry points that tie the [`core`](crate::core) and
//! [`engine`](crate::engine) layers together.
//!
//! - **Simulation Workflow** ([`simulate`]) - Runs a molecular dynamics trajectory from an
//!   initial particle set, writing snapshots and energies as it goes.

pub mod simulate;
