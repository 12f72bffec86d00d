use crate::core::forcefield::energy::EnergyCalculator;
use crate::core::io::energy_log::EnergySink;
use crate::core::io::trajectory::{TrajectoryHeader, TrajectorySink, TrajectorySnapshot};
use crate::core::models::distance::DistanceMatrix;
use crate::core::models::particle::Particle;
use crate::core::models::system::ParticleSet;
use crate::engine::config::SimulationConfig;
use crate::engine::error::EngineError;
use crate::engine::integrator::VelocityVerlet;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::{SimulationState, SimulationSummary};
use tracing::{debug, info, instrument, trace, warn};

#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub summary: SimulationSummary,
    pub final_particles: ParticleSet,
}

/// Drives a velocity-Verlet run over a particle set.
///
/// A simulation runs once: [`run`](Self::run) moves it from
/// [`SimulationState::Initializing`] through `Running` to `Finished`, and any
/// further call fails with [`EngineError::InvalidState`].
#[derive(Debug)]
pub struct Simulation {
    particles: ParticleSet,
    config: SimulationConfig,
    distances: DistanceMatrix,
    integrator: VelocityVerlet,
    state: SimulationState,
    initial_clamped_pairs: usize,
}

impl Simulation {
    /// Prepares a run: validates the configuration, zeroes all velocities and
    /// computes the initial distances and accelerations.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] for an invalid configuration and
    /// [`EngineError::Resource`] if the force buffers cannot be allocated.
    pub fn new(mut particles: ParticleSet, config: SimulationConfig) -> Result<Self, EngineError> {
        config.validate()?;
        particles.zero_velocities();

        let distances = DistanceMatrix::compute(&particles);
        let accelerations =
            EnergyCalculator::accelerations(&particles, &distances, &config.force_field)?;
        let initial_clamped_pairs = accelerations.clamped_pairs;
        particles.replace_accelerations(accelerations.values);

        debug!(
            particles = particles.len(),
            clamped_pairs = initial_clamped_pairs,
            "Initialized particle set with zero velocities."
        );

        Ok(Self {
            particles,
            config,
            distances,
            integrator: VelocityVerlet,
            state: SimulationState::Initializing,
            initial_clamped_pairs,
        })
    }

    /// Builds a simulation straight from atom records, as an embedding program
    /// would supply them.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DataFormat`] if a record has a non-positive mass or a
    /// non-finite coordinate, otherwise the same errors as [`new`](Self::new).
    pub fn from_particles<I>(particles: I, config: SimulationConfig) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = Particle>,
    {
        Self::new(ParticleSet::from_particles(particles)?, config)
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Distances at the current positions.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    pub fn into_particles(self) -> ParticleSet {
        self.particles
    }

    /// Runs `total_steps` integration steps, streaming snapshots into `sink`.
    ///
    /// At every step the energies of the current configuration are computed and
    /// recorded; a snapshot is emitted when the step is a multiple of
    /// `write_frequency`; then the system is advanced by one step. The sink and the
    /// energy log are finished exactly once, whether or not the loop succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidState`] if the simulation has already run,
    /// or the first output or allocation failure encountered.
    #[instrument(skip_all, name = "simulation_workflow")]
    pub fn run<S: TrajectorySink + ?Sized>(
        &mut self,
        sink: &mut S,
        mut energy_log: Option<&mut dyn EnergySink>,
        reporter: &ProgressReporter,
    ) -> Result<SimulationSummary, EngineError> {
        if self.state != SimulationState::Initializing {
            return Err(EngineError::InvalidState {
                expected: SimulationState::Initializing,
                found: self.state,
            });
        }

        self.state = SimulationState::Running;
        let result = self.run_steps(sink, energy_log.as_deref_mut(), reporter);
        self.state = SimulationState::Finished;

        let sink_result = sink.finish();
        let log_result = energy_log.map(|log| log.finish()).transpose();

        let summary = result?;
        sink_result?;
        log_result?;

        info!(
            steps = summary.steps_completed,
            snapshots = summary.snapshots_written,
            max_relative_drift = summary.max_relative_drift,
            "Simulation complete."
        );
        Ok(summary)
    }

    fn run_steps<'a, S: TrajectorySink + ?Sized>(
        &mut self,
        sink: &mut S,
        mut energy_log: Option<&mut (dyn EnergySink + 'a)>,
        reporter: &ProgressReporter,
    ) -> Result<SimulationSummary, EngineError> {
        let params = self.config.force_field;
        let dt = self.config.dt;
        let total_steps = self.config.total_steps;

        info!(
            particles = self.particles.len(),
            steps = total_steps,
            dt,
            epsilon = params.epsilon,
            sigma = params.sigma,
            "Starting {} integration.",
            VelocityVerlet::NAME
        );

        sink.write_header(&TrajectoryHeader::new(VelocityVerlet::NAME, &params, dt))?;

        let mut summary = SimulationSummary::empty();
        if self.initial_clamped_pairs > 0 {
            warn!(
                pairs = self.initial_clamped_pairs,
                r_min = params.r_min,
                "Initial configuration has pairs closer than the force floor; forces are clamped."
            );
            summary.clamped_pair_events = self.initial_clamped_pairs;
            reporter.report(Progress::ForceClamped {
                step: 0,
                pairs: self.initial_clamped_pairs,
            });
        }

        reporter.report(Progress::RunStart {
            total_steps: total_steps as u64,
        });
        let mut unreported = 0u64;

        for step in 0..total_steps {
            let energy = EnergyCalculator::energies(&self.particles, &self.distances, &params);
            trace!(
                step,
                kinetic = energy.kinetic,
                potential = energy.potential,
                total = energy.total(),
                "Energy conservation check"
            );
            summary.observe(energy);

            if let Some(log) = energy_log.as_deref_mut() {
                log.record(step, &energy)?;
            }

            if step % self.config.write_frequency == 0 {
                sink.write_snapshot(&TrajectorySnapshot {
                    step,
                    energy,
                    labels: self.particles.labels(),
                    positions: self.particles.positions(),
                })?;
                summary.snapshots_written += 1;
            }

            let outcome = self.integrator.step(&mut self.particles, &params, dt)?;
            self.distances = outcome.distances;
            if outcome.clamped_pairs > 0 {
                if summary.clamped_pair_events == 0 {
                    warn!(
                        step,
                        pairs = outcome.clamped_pairs,
                        r_min = params.r_min,
                        "Pair distance fell below the force floor; forces are clamped."
                    );
                    reporter.report(Progress::ForceClamped {
                        step,
                        pairs: outcome.clamped_pairs,
                    });
                }
                summary.clamped_pair_events += outcome.clamped_pairs;
            }

            summary.steps_completed += 1;
            unreported += 1;
            if summary.steps_completed % self.config.progress_interval == 0 {
                reporter.report(Progress::StepsCompleted { steps: unreported });
                unreported = 0;
            }
        }

        if unreported > 0 {
            reporter.report(Progress::StepsCompleted { steps: unreported });
        }
        reporter.report(Progress::RunFinish {
            max_relative_drift: summary.max_relative_drift,
        });

        Ok(summary)
    }
}

/// Runs a complete simulation of `particles` and returns the summary with the
/// final particle state.
pub fn run<S: TrajectorySink + ?Sized>(
    particles: ParticleSet,
    config: &SimulationConfig,
    sink: &mut S,
    energy_log: Option<&mut dyn EnergySink>,
    reporter: &ProgressReporter,
) -> Result<SimulationResult, EngineError> {
    let mut simulation = Simulation::new(particles, config.clone())?;
    let summary = simulation.run(sink, energy_log, reporter)?;
    Ok(SimulationResult {
        summary,
        final_particles: simulation.into_particles(),
    })
}
