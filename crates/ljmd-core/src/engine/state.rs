use crate::core::forcefield::term::EnergyTerm;

/// Lifecycle of a [`Simulation`](crate::workflows::simulate::Simulation).
///
/// `Initializing` covers the window between construction and the start of the
/// step loop; `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    Initializing,
    Running,
    Finished,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSummary {
    pub steps_completed: usize,
    pub snapshots_written: usize,
    /// Energies at step 0, or `None` if no step was run.
    pub initial_energy: Option<EnergyTerm>,
    /// Energies at the last step evaluated in the loop.
    pub final_energy: Option<EnergyTerm>,
    /// Largest relative deviation of the total energy from step 0.
    pub max_relative_drift: f64,
    /// Total number of pair evaluations whose distance was clamped.
    pub clamped_pair_events: usize,
}

impl SimulationSummary {
    pub(crate) fn empty() -> Self {
        Self {
            steps_completed: 0,
            snapshots_written: 0,
            initial_energy: None,
            final_energy: None,
            max_relative_drift: 0.0,
            clamped_pair_events: 0,
        }
    }

    /// Folds the energies of one evaluated step into the summary.
    pub(crate) fn observe(&mut self, energy: EnergyTerm) {
        let initial = *self.initial_energy.get_or_insert(energy);
        self.max_relative_drift = self
            .max_relative_drift
            .max(energy.relative_drift_from(&initial));
        self.final_energy = Some(energy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observe_tracks_first_last_and_max_drift() {
        let mut summary = SimulationSummary::empty();
        summary.observe(EnergyTerm::new(0.0, -1.0));
        summary.observe(EnergyTerm::new(0.1, -1.2));
        summary.observe(EnergyTerm::new(0.05, -1.0));
        assert_eq!(summary.initial_energy, Some(EnergyTerm::new(0.0, -1.0)));
        assert_eq!(summary.final_energy, Some(EnergyTerm::new(0.05, -1.0)));
        assert!((summary.max_relative_drift - 0.1).abs() < 1e-12);
    }

    #[test]
    fn empty_summary_has_no_energies() {
        let summary = SimulationSummary::empty();
        assert_eq!(summary.initial_energy, None);
        assert_eq!(summary.max_relative_drift, 0.0);
    }
}
