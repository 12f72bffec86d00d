use crate::core::models::system::ParticleSet;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing particle configuration files.
///
/// Implementors handle format-specific parsing and serialization; the default
/// methods add the path-based conveniences on top of the reader/writer methods.
pub trait MolecularFile {
    /// Format-specific data that is not part of the particle set itself.
    type Metadata;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a particle set from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    ///
    /// # Return
    ///
    /// Returns the parsed particle set, with zero velocities, and the associated metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or the reader fails.
    fn read_from(reader: &mut impl BufRead) -> Result<(ParticleSet, Self::Metadata), Self::Error>;

    /// Writes the current positions of a particle set, with metadata, to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(
        particles: &ParticleSet,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Writes a particle set to a writer with default metadata.
    fn write_system_to(
        particles: &ParticleSet,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Reads a particle set from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<(ParticleSet, Self::Metadata), Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes a particle set and metadata to a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(
        particles: &ParticleSet,
        metadata: &Self::Metadata,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(particles, metadata, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn write_system_to_path<P: AsRef<Path>>(
        particles: &ParticleSet,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_system_to(particles, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
