/// The energy bookkeeping of one simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyTerm {
    pub kinetic: f64,
    pub potential: f64,
}

impl EnergyTerm {
    pub fn new(kinetic: f64, potential: f64) -> Self {
        Self { kinetic, potential }
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.kinetic + self.potential
    }

    /// Relative deviation of this total energy from a reference total.
    ///
    /// Falls back to the absolute deviation when the reference total is zero.
    pub fn relative_drift_from(&self, reference: &EnergyTerm) -> f64 {
        let delta = (self.total() - reference.total()).abs();
        let scale = reference.total().abs();
        if scale > 0.0 { delta / scale } else { delta }
    }
}
