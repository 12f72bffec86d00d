use crate::cli::RunArgs;
use crate::config::PartialSimulationConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use ljmd::{
    core::io::{
        energy_log::{EnergyLog, EnergySink},
        trajectory::{TrajectoryWriter, default_output_path},
        traits::MolecularFile,
        xyzm::XyzmFile,
    },
    engine::{error::EngineError, progress::ProgressReporter, state::SimulationSummary},
    workflows::simulate,
};
use std::path::PathBuf;
use tracing::{info, warn};

pub fn run(args: RunArgs, quiet: bool) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialSimulationConfig::from_file(path)?,
        None => PartialSimulationConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    info!("Loading input particles from {:?}", &args.input);
    let (particles, metadata) =
        XyzmFile::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
            path: args.input.clone(),
            source: e.into(),
        })?;
    if particles.is_empty() {
        warn!("Input file contains no particles; the trajectory will only hold empty snapshots.");
    }

    let output = resolve_output_path(&args);
    info!("Writing trajectory to {:?}", &output);
    let mut writer = TrajectoryWriter::create(&output).map_err(EngineError::from)?;
    let mut energy_log = args
        .energy_log
        .as_ref()
        .map(EnergyLog::create)
        .transpose()
        .map_err(EngineError::from)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = if quiet {
        ProgressReporter::new()
    } else {
        ProgressReporter::with_callback(progress_handler.get_callback())
    };

    if !quiet {
        println!(
            "Simulating {} particles for {} steps (dt = {})...",
            particles.len(),
            config.total_steps,
            config.dt
        );
    }

    let result = simulate::run(
        particles,
        &config,
        &mut writer,
        energy_log.as_mut().map(|log| log as &mut dyn EnergySink),
        &reporter,
    )?;

    if let Some(path) = &args.final_config {
        info!("Saving final configuration to {:?}", path);
        XyzmFile::write_to_path(&result.final_particles, &metadata, path).map_err(|e| {
            CliError::Other(anyhow::Error::new(e).context(format!(
                "Failed to write final configuration to '{}'",
                path.display()
            )))
        })?;
    }

    if !quiet {
        print_summary(&result.summary, &output);
    }
    Ok(())
}

fn resolve_output_path(args: &RunArgs) -> PathBuf {
    args.output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input))
}

fn print_summary(summary: &SimulationSummary, output: &std::path::Path) {
    println!(
        "Completed {} steps, wrote {} snapshot(s) to {}",
        summary.steps_completed,
        summary.snapshots_written,
        output.display()
    );
    if let (Some(initial), Some(last)) = (summary.initial_energy, summary.final_energy) {
        println!(
            "Total energy: {:.6} -> {:.6} (max relative drift {:.3e})",
            initial.total(),
            last.total(),
            summary.max_relative_drift
        );
    }
    if summary.clamped_pair_events > 0 {
        println!(
            "Warning: {} pair force evaluation(s) were clamped to the minimum distance.",
            summary.clamped_pair_events
        );
    }
}
