use crate::core::forcefield::term::EnergyTerm;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

const COLUMNS: [&str; 4] = ["step", "kinetic", "potential", "total"];

#[derive(Debug, Error)]
pub enum EnergyLogError {
    #[error("Failed to create energy log '{path}': {source}")]
    Create { path: String, source: csv::Error },
    #[error("CSV error while writing energy log: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error while writing energy log: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
struct EnergyRecord {
    step: usize,
    kinetic: f64,
    potential: f64,
    total: f64,
}

/// Receives the energies of every integration step.
pub trait EnergySink {
    fn record(&mut self, step: usize, energy: &EnergyTerm) -> Result<(), EnergyLogError>;

    fn finish(&mut self) -> Result<(), EnergyLogError>;
}

/// CSV energy log with one `step,kinetic,potential,total` row per step.
pub struct EnergyLog<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl EnergyLog<File> {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, EnergyLogError> {
        let path = path.as_ref();
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(|source| EnergyLogError::Create {
                path: path.display().to_string(),
                source,
            })?;
        Self::with_writer(writer)
    }
}

impl<W: Write> EnergyLog<W> {
    pub fn new(writer: W) -> Result<Self, EnergyLogError> {
        Self::with_writer(
            csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(writer),
        )
    }

    fn with_writer(mut writer: csv::Writer<W>) -> Result<Self, EnergyLogError> {
        writer.write_record(COLUMNS)?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flushes the log and returns the underlying writer.
    pub fn into_inner(self) -> Result<W, EnergyLogError> {
        self.writer
            .into_inner()
            .map_err(|e| EnergyLogError::Io(e.into_error()))
    }
}

impl<W: Write> EnergySink for EnergyLog<W> {
    fn record(&mut self, step: usize, energy: &EnergyTerm) -> Result<(), EnergyLogError> {
        self.writer.serialize(EnergyRecord {
            step,
            kinetic: energy.kinetic,
            potential: energy.potential,
            total: energy.total(),
        })?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), EnergyLogError> {
        self.writer.flush()?;
        Ok(())
    }
}
