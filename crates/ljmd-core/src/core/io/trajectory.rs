use crate::core::forcefield::params::LennardJonesParams;
use crate::core::forcefield::term::EnergyTerm;
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the interaction model written to trajectory headers.
pub const MODEL_NAME: &str = "Lennard-Jones 12-6";

/// Extension given to trajectory files derived from an input path.
pub const OUTPUT_EXTENSION: &str = "out";

#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("Failed to create trajectory file '{path}': {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("I/O error while writing trajectory: {0}")]
    Io(#[from] io::Error),
    #[error("Trajectory has already been finished")]
    Finished,
}

/// Run-level information written once at the top of a trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryHeader {
    pub model: &'static str,
    pub integrator: &'static str,
    pub epsilon: f64,
    pub sigma: f64,
    pub dt: f64,
}

impl TrajectoryHeader {
    pub fn new(integrator: &'static str, params: &LennardJonesParams, dt: f64) -> Self {
        Self {
            model: MODEL_NAME,
            integrator,
            epsilon: params.epsilon,
            sigma: params.sigma,
            dt,
        }
    }
}

/// Energies and coordinates of the system at one step.
///
/// Borrowed from the live particle set; sinks that need to keep it must copy it
/// (see [`RecordedSnapshot`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySnapshot<'a> {
    pub step: usize,
    pub energy: EnergyTerm,
    pub labels: &'a [String],
    pub positions: &'a [Point3<f64>],
}

impl TrajectorySnapshot<'_> {
    pub fn kinetic_energy(&self) -> f64 {
        self.energy.kinetic
    }

    pub fn potential_energy(&self) -> f64 {
        self.energy.potential
    }

    pub fn total_energy(&self) -> f64 {
        self.energy.total()
    }
}

/// Destination for trajectory output.
///
/// The driver calls [`write_header`](Self::write_header) once, then
/// [`write_snapshot`](Self::write_snapshot) for every emitted step, then
/// [`finish`](Self::finish) exactly once, including when the run fails part way.
pub trait TrajectorySink {
    fn write_header(&mut self, header: &TrajectoryHeader) -> Result<(), TrajectoryError>;

    fn write_snapshot(&mut self, snapshot: &TrajectorySnapshot<'_>) -> Result<(), TrajectoryError>;

    fn finish(&mut self) -> Result<(), TrajectoryError>;
}

/// Text trajectory writer.
///
/// Each snapshot is an XYZ-compatible block: the particle count, a comment line
/// carrying the step and energies, then one `label x y z` line per particle.
/// Output is flushed by [`finish`](TrajectorySink::finish), or on drop if the run
/// was abandoned before finishing.
#[derive(Debug)]
pub struct TrajectoryWriter<W: Write> {
    writer: W,
    snapshots_written: usize,
    finished: bool,
}

impl TrajectoryWriter<BufWriter<File>> {
    /// Creates (or truncates) the file at `path` and wraps it in a buffered writer.
    ///
    /// # Errors
    ///
    /// Returns [`TrajectoryError::Create`] if the file cannot be opened for writing.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, TrajectoryError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| TrajectoryError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TrajectoryWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            snapshots_written: 0,
            finished: false,
        }
    }

    pub fn snapshots_written(&self) -> usize {
        self.snapshots_written
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    fn ensure_open(&self) -> Result<(), TrajectoryError> {
        if self.finished {
            Err(TrajectoryError::Finished)
        } else {
            Ok(())
        }
    }
}

impl<W: Write> TrajectorySink for TrajectoryWriter<W> {
    fn write_header(&mut self, header: &TrajectoryHeader) -> Result<(), TrajectoryError> {
        self.ensure_open()?;
        writeln!(self.writer, "# Lennard-Jones molecular dynamics trajectory")?;
        writeln!(self.writer, "# model: {}", header.model)?;
        writeln!(self.writer, "# integrator: {}", header.integrator)?;
        writeln!(self.writer, "# epsilon: {:.6}", header.epsilon)?;
        writeln!(self.writer, "# sigma: {:.6}", header.sigma)?;
        writeln!(self.writer, "# dt: {:.6}", header.dt)?;
        Ok(())
    }

    fn write_snapshot(&mut self, snapshot: &TrajectorySnapshot<'_>) -> Result<(), TrajectoryError> {
        self.ensure_open()?;
        writeln!(self.writer, "{}", snapshot.positions.len())?;
        writeln!(
            self.writer,
            "Step {} | Kinetic Energy: {:.6} | Potential Energy: {:.6} | Total Energy: {:.6}",
            snapshot.step,
            snapshot.kinetic_energy(),
            snapshot.potential_energy(),
            snapshot.total_energy()
        )?;
        for (label, position) in snapshot.labels.iter().zip(snapshot.positions) {
            writeln!(
                self.writer,
                "{} {:.6} {:.6} {:.6}",
                label, position.x, position.y, position.z
            )?;
        }
        self.snapshots_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), TrajectoryError> {
        self.ensure_open()?;
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> Drop for TrajectoryWriter<W> {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.writer.flush();
        }
    }
}

/// Owned copy of a [`TrajectorySnapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSnapshot {
    pub step: usize,
    pub energy: EnergyTerm,
    pub labels: Vec<String>,
    pub positions: Vec<Point3<f64>>,
}

/// In-memory trajectory sink that keeps every snapshot it receives.
#[derive(Debug, Clone, Default)]
pub struct SnapshotRecorder {
    header: Option<TrajectoryHeader>,
    snapshots: Vec<RecordedSnapshot>,
    finish_calls: usize,
}

impl SnapshotRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&self) -> Option<&TrajectoryHeader> {
        self.header.as_ref()
    }

    pub fn snapshots(&self) -> &[RecordedSnapshot] {
        &self.snapshots
    }

    pub fn finish_calls(&self) -> usize {
        self.finish_calls
    }
}

impl TrajectorySink for SnapshotRecorder {
    fn write_header(&mut self, header: &TrajectoryHeader) -> Result<(), TrajectoryError> {
        self.header = Some(header.clone());
        Ok(())
    }

    fn write_snapshot(&mut self, snapshot: &TrajectorySnapshot<'_>) -> Result<(), TrajectoryError> {
        self.snapshots.push(RecordedSnapshot {
            step: snapshot.step,
            energy: snapshot.energy,
            labels: snapshot.labels.to_vec(),
            positions: snapshot.positions.to_vec(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<(), TrajectoryError> {
        self.finish_calls += 1;
        Ok(())
    }
}

/// Derives the trajectory path for an input file by replacing its extension with `.out`.
pub fn default_output_path<P: AsRef<Path>>(input: P) -> PathBuf {
    input.as_ref().with_extension(OUTPUT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn header() -> TrajectoryHeader {
        TrajectoryHeader::new("velocity-Verlet", &LennardJonesParams::default(), 0.2)
    }

    fn labels() -> Vec<String> {
        vec!["Ar".to_string(), "X".to_string()]
    }

    fn positions() -> Vec<Point3<f64>> {
        vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.38, -1.25, 2.0)]
    }

    fn render(f: impl FnOnce(&mut TrajectoryWriter<Vec<u8>>)) -> String {
        let mut writer = TrajectoryWriter::new(Vec::new());
        f(&mut writer);
        String::from_utf8(writer.get_ref().clone()).unwrap()
    }

    #[test]
    fn header_lists_model_integrator_and_parameters() {
        let text = render(|w| w.write_header(&header()).unwrap());
        assert_eq!(
            text,
            "# Lennard-Jones molecular dynamics trajectory\n\
             # model: Lennard-Jones 12-6\n\
             # integrator: velocity-Verlet\n\
             # epsilon: 0.066100\n\
             # sigma: 0.334500\n\
             # dt: 0.200000\n"
        );
    }

    #[test]
    fn snapshot_block_is_xyz_compatible() {
        let labels = labels();
        let positions = positions();
        let snapshot = TrajectorySnapshot {
            step: 7,
            energy: EnergyTerm::new(0.5, -1.25),
            labels: &labels,
            positions: &positions,
        };
        let text = render(|w| w.write_snapshot(&snapshot).unwrap());
        assert_eq!(
            text,
            "2\n\
             Step 7 | Kinetic Energy: 0.500000 | Potential Energy: -1.250000 | Total Energy: -0.750000\n\
             Ar 0.000000 0.000000 0.000000\n\
             X 0.380000 -1.250000 2.000000\n"
        );
    }

    #[test]
    fn snapshots_are_counted() {
        let labels = labels();
        let positions = positions();
        let snapshot = TrajectorySnapshot {
            step: 0,
            energy: EnergyTerm::default(),
            labels: &labels,
            positions: &positions,
        };
        let mut writer = TrajectoryWriter::new(Vec::new());
        writer.write_header(&header()).unwrap();
        writer.write_snapshot(&snapshot).unwrap();
        writer.write_snapshot(&snapshot).unwrap();
        assert_eq!(writer.snapshots_written(), 2);
    }

    #[test]
    fn finish_can_only_happen_once() {
        let mut writer = TrajectoryWriter::new(Vec::new());
        writer.write_header(&header()).unwrap();
        writer.finish().unwrap();
        assert!(writer.is_finished());
        assert!(matches!(writer.finish(), Err(TrajectoryError::Finished)));
        assert!(matches!(
            writer.write_header(&header()),
            Err(TrajectoryError::Finished)
        ));
    }

    #[derive(Clone, Default)]
    struct CountingWriter {
        flushes: Rc<RefCell<usize>>,
    }

    impl Write for CountingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            *self.flushes.borrow_mut() += 1;
            Ok(())
        }
    }

    #[test]
    fn finish_flushes_exactly_once_including_drop() {
        let inner = CountingWriter::default();
        let flushes = Rc::clone(&inner.flushes);
        {
            let mut writer = TrajectoryWriter::new(inner);
            writer.write_header(&header()).unwrap();
            writer.finish().unwrap();
        }
        assert_eq!(*flushes.borrow(), 1);
    }

    #[test]
    fn drop_flushes_unfinished_writer() {
        let inner = CountingWriter::default();
        let flushes = Rc::clone(&inner.flushes);
        {
            let mut writer = TrajectoryWriter::new(inner);
            writer.write_header(&header()).unwrap();
        }
        assert_eq!(*flushes.borrow(), 1);
    }

    #[test]
    fn create_writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.out");
        let mut writer = TrajectoryWriter::create(&path).unwrap();
        writer.write_header(&header()).unwrap();
        writer.finish().unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# Lennard-Jones molecular dynamics trajectory\n"));
    }

    #[test]
    fn create_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("run.out");
        assert!(matches!(
            TrajectoryWriter::create(&path),
            Err(TrajectoryError::Create { .. })
        ));
    }

    #[test]
    fn recorder_keeps_header_snapshots_and_finish_count() {
        let labels = labels();
        let positions = positions();
        let mut recorder = SnapshotRecorder::new();
        recorder.write_header(&header()).unwrap();
        recorder
            .write_snapshot(&TrajectorySnapshot {
                step: 3,
                energy: EnergyTerm::new(1.0, 2.0),
                labels: &labels,
                positions: &positions,
            })
            .unwrap();
        recorder.finish().unwrap();
        assert_eq!(recorder.header(), Some(&header()));
        assert_eq!(recorder.snapshots().len(), 1);
        assert_eq!(recorder.snapshots()[0].step, 3);
        assert_eq!(recorder.snapshots()[0].positions, positions);
        assert_eq!(recorder.finish_calls(), 1);
    }

    #[test]
    fn default_output_path_replaces_extension() {
        assert_eq!(
            default_output_path("runs/argon.xyzm"),
            PathBuf::from("runs/argon.out")
        );
        assert_eq!(default_output_path("cluster"), PathBuf::from("cluster.out"));
        assert_eq!(
            default_output_path("data.v2/cluster.in"),
            PathBuf::from("data.v2/cluster.out")
        );
    }
}
