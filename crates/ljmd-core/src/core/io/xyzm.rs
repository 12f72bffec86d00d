use crate::core::io::traits::MolecularFile;
use crate::core::models::particle::Particle;
use crate::core::models::system::{ParticleSet, ParticleSetError};
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Data carried by an XYZM file besides the particle records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XyzmMetadata {
    /// Text of the `#` comment lines, in file order, without the leading marker.
    pub comments: Vec<String>,
}

#[derive(Debug, Error)]
pub enum MoleculeFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: ParseErrorKind },
    #[error("Missing particle count: the file contains no records")]
    MissingCount,
    #[error("Particle count mismatch: header declares {expected} particles but {found} were found")]
    CountMismatch { expected: usize, found: usize },
    #[error("Unexpected record on line {line} after all declared particles were read")]
    TrailingRecord { line: usize },
    #[error("Invalid particle data: {0}")]
    Particles(#[from] ParticleSetError),
    #[error("Particle {index} has label '{label}', which cannot be written as a single record field")]
    UnwritableLabel { index: usize, label: String },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseErrorKind {
    #[error("Invalid particle count '{value}' (expected a non-negative integer)")]
    InvalidCount { value: String },
    #[error("Expected 4 or 5 fields ([label] x y z mass), found {found}")]
    WrongFieldCount { found: usize },
    #[error("Invalid {field} value '{value}'")]
    InvalidFloat { field: &'static str, value: String },
    #[error("Mass must be strictly positive, found {value}")]
    NonPositiveMass { value: f64 },
}

/// Whitespace-separated particle file: a count line followed by one
/// `[label] x y z mass` record per particle.
///
/// Blank lines and lines whose first non-blank character is `#` are skipped
/// anywhere in the file. Records without a label get [`DEFAULT_LABEL`].
///
/// [`DEFAULT_LABEL`]: crate::core::models::particle::DEFAULT_LABEL
pub struct XyzmFile;

/// Upper bound on the record capacity reserved from the declared count.
const MAX_PREALLOCATED_RECORDS: usize = 1024;

fn is_writable_label(label: &str) -> bool {
    !label.is_empty() && !label.starts_with('#') && !label.contains(char::is_whitespace)
}

fn parse_float(token: &str, field: &'static str, line: usize) -> Result<f64, MoleculeFileError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| MoleculeFileError::Parse {
            line,
            kind: ParseErrorKind::InvalidFloat {
                field,
                value: token.to_string(),
            },
        })
}

fn parse_record(tokens: &[&str], line: usize) -> Result<Particle, MoleculeFileError> {
    let (label, numeric) = match tokens.len() {
        5 => (Some(tokens[0]), &tokens[1..]),
        4 => (None, tokens),
        found => {
            return Err(MoleculeFileError::Parse {
                line,
                kind: ParseErrorKind::WrongFieldCount { found },
            });
        }
    };

    let x = parse_float(numeric[0], "x", line)?;
    let y = parse_float(numeric[1], "y", line)?;
    let z = parse_float(numeric[2], "z", line)?;
    let mass = parse_float(numeric[3], "mass", line)?;
    if mass <= 0.0 {
        return Err(MoleculeFileError::Parse {
            line,
            kind: ParseErrorKind::NonPositiveMass { value: mass },
        });
    }

    let position = Point3::new(x, y, z);
    Ok(match label {
        Some(label) => Particle::new(label, position, mass),
        None => Particle::unlabeled(position, mass),
    })
}

impl MolecularFile for XyzmFile {
    type Metadata = XyzmMetadata;
    type Error = MoleculeFileError;

    fn read_from(reader: &mut impl BufRead) -> Result<(ParticleSet, Self::Metadata), Self::Error> {
        let mut metadata = XyzmMetadata::default();
        let mut expected: Option<usize> = None;
        let mut particles = Vec::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let trimmed = line.trim();

            if trimmed.is_empty() {
                continue;
            }
            if let Some(comment) = trimmed.strip_prefix('#') {
                metadata.comments.push(comment.trim().to_string());
                continue;
            }

            let tokens: Vec<&str> = trimmed.split_whitespace().collect();
            match expected {
                None => {
                    let count = match tokens.as_slice() {
                        [token] => token.parse::<usize>().ok(),
                        _ => None,
                    };
                    let count = count.ok_or_else(|| MoleculeFileError::Parse {
                        line: line_num,
                        kind: ParseErrorKind::InvalidCount {
                            value: trimmed.to_string(),
                        },
                    })?;
                    particles.reserve(count.min(MAX_PREALLOCATED_RECORDS));
                    expected = Some(count);
                }
                Some(count) if particles.len() == count => {
                    return Err(MoleculeFileError::TrailingRecord { line: line_num });
                }
                Some(_) => particles.push(parse_record(&tokens, line_num)?),
            }
        }

        let expected = expected.ok_or(MoleculeFileError::MissingCount)?;
        if particles.len() != expected {
            return Err(MoleculeFileError::CountMismatch {
                expected,
                found: particles.len(),
            });
        }

        Ok((ParticleSet::from_particles(particles)?, metadata))
    }

    fn write_to(
        particles: &ParticleSet,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        if let Some((index, label)) = particles
            .labels()
            .iter()
            .enumerate()
            .find(|(_, label)| !is_writable_label(label))
        {
            return Err(MoleculeFileError::UnwritableLabel {
                index,
                label: label.clone(),
            });
        }

        for comment in &metadata.comments {
            writeln!(writer, "# {}", comment)?;
        }
        writeln!(writer, "{}", particles.len())?;
        for ((label, position), mass) in particles
            .labels()
            .iter()
            .zip(particles.positions())
            .zip(particles.masses())
        {
            writeln!(
                writer,
                "{} {} {} {} {}",
                label, position.x, position.y, position.z, mass
            )?;
        }
        Ok(())
    }

    fn write_system_to(
        particles: &ParticleSet,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        let metadata = XyzmMetadata {
            comments: vec!["Generated by ljmd".to_string()],
        };
        Self::write_to(particles, &metadata, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::particle::DEFAULT_LABEL;
    use std::io::Cursor;
    use tempfile::NamedTempFile;

    fn read(content: &str) -> Result<(ParticleSet, XyzmMetadata), MoleculeFileError> {
        XyzmFile::read_from(&mut Cursor::new(content))
    }

    #[test]
    fn reads_labeled_records() {
        let (set, metadata) = read("2\nAr 0.0 0.0 0.0 39.948\nAr 0.38 0.0 0.0 39.948\n").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.labels(), &["Ar".to_string(), "Ar".to_string()]);
        assert_eq!(set.positions()[1], Point3::new(0.38, 0.0, 0.0));
        assert_eq!(set.masses(), &[39.948, 39.948]);
        assert!(metadata.comments.is_empty());
    }

    #[test]
    fn unlabeled_records_get_default_label() {
        let (set, _) = read("1\n1.0 2.0 3.0 4.0\n").unwrap();
        assert_eq!(set.labels()[0], DEFAULT_LABEL);
        assert_eq!(set.positions()[0], Point3::new(1.0, 2.0, 3.0));
        assert_eq!(set.masses()[0], 4.0);
    }

    #[test]
    fn skips_blank_lines_and_collects_comments() {
        let content = "# argon dimer\n\n2\n\nAr 0 0 0 1\n# between records\nAr 1 0 0 1\n\n";
        let (set, metadata) = read(content).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(metadata.comments, vec!["argon dimer", "between records"]);
    }

    #[test]
    fn zero_count_yields_empty_set() {
        let (set, _) = read("0\n").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn velocities_start_at_zero() {
        let (set, _) = read("1\nAr 0 0 0 1\n").unwrap();
        assert_eq!(set.velocities()[0], nalgebra::Vector3::zeros());
    }

    #[test]
    fn empty_input_is_missing_count() {
        assert!(matches!(read("\n# only a comment\n"), Err(MoleculeFileError::MissingCount)));
    }

    #[test]
    fn invalid_count_reports_line() {
        let err = read("\ntwo\n").unwrap_err();
        match err {
            MoleculeFileError::Parse { line, kind } => {
                assert_eq!(line, 2);
                assert_eq!(
                    kind,
                    ParseErrorKind::InvalidCount {
                        value: "two".to_string()
                    }
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn negative_count_is_rejected() {
        assert!(matches!(
            read("-1\n"),
            Err(MoleculeFileError::Parse {
                line: 1,
                kind: ParseErrorKind::InvalidCount { .. }
            })
        ));
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        assert!(matches!(
            read("1\nAr 0.0 0.0 0.0 39.948 7\n"),
            Err(MoleculeFileError::Parse {
                line: 2,
                kind: ParseErrorKind::WrongFieldCount { found: 6 }
            })
        ));
        assert!(matches!(
            read("1\nAr 0.0 0.0\n"),
            Err(MoleculeFileError::Parse {
                line: 2,
                kind: ParseErrorKind::WrongFieldCount { found: 3 }
            })
        ));
    }

    #[test]
    fn invalid_float_names_the_field() {
        let err = read("1\nAr 0.0 abc 0.0 1.0\n").unwrap_err();
        assert!(matches!(
            err,
            MoleculeFileError::Parse {
                line: 2,
                kind: ParseErrorKind::InvalidFloat { field: "y", .. }
            }
        ));
    }

    #[test]
    fn non_finite_coordinate_is_rejected() {
        assert!(matches!(
            read("1\nAr nan 0 0 1\n"),
            Err(MoleculeFileError::Parse {
                kind: ParseErrorKind::InvalidFloat { field: "x", .. },
                ..
            })
        ));
    }

    #[test]
    fn non_positive_mass_is_rejected() {
        assert!(matches!(
            read("2\nAr 0 0 0 1\nAr 1 0 0 0\n"),
            Err(MoleculeFileError::Parse {
                line: 3,
                kind: ParseErrorKind::NonPositiveMass { .. }
            })
        ));
        assert!(matches!(
            read("1\nAr 0 0 0 -2.5\n"),
            Err(MoleculeFileError::Parse {
                kind: ParseErrorKind::NonPositiveMass { .. },
                ..
            })
        ));
    }

    #[test]
    fn fewer_records_than_declared_is_count_mismatch() {
        assert!(matches!(
            read("3\nAr 0 0 0 1\nAr 1 0 0 1\n"),
            Err(MoleculeFileError::CountMismatch {
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn huge_declared_count_is_count_mismatch() {
        let content = format!("{}\nAr 0 0 0 1\n", usize::MAX);
        assert!(matches!(
            read(&content),
            Err(MoleculeFileError::CountMismatch {
                expected: usize::MAX,
                found: 1
            })
        ));
    }

    #[test]
    fn extra_records_are_rejected() {
        assert!(matches!(
            read("1\nAr 0 0 0 1\nAr 1 0 0 1\n"),
            Err(MoleculeFileError::TrailingRecord { line: 3 })
        ));
    }

    #[test]
    fn write_then_read_preserves_particles_and_comments() {
        let (set, metadata) = read("# dimer\n2\nAr 0.125 -1.5 2 39.948\n0.38 0 0 12.011\n").unwrap();
        let mut buffer = Vec::new();
        XyzmFile::write_to(&set, &metadata, &mut buffer).unwrap();
        let (reread, remeta) = read(std::str::from_utf8(&buffer).unwrap()).unwrap();
        assert_eq!(reread, set);
        assert_eq!(remeta, metadata);
    }

    #[test]
    fn write_rejects_labels_that_would_not_read_back() {
        for label in ["", "#Ar", "Ar gon"] {
            let set = ParticleSet::from_particles(vec![
                Particle::new("Ar", Point3::origin(), 1.0),
                Particle::new(label, Point3::new(1.0, 0.0, 0.0), 1.0),
            ])
            .unwrap();
            let mut buffer = Vec::new();
            let err = XyzmFile::write_to(&set, &XyzmMetadata::default(), &mut buffer).unwrap_err();
            match err {
                MoleculeFileError::UnwritableLabel { index, label: found } => {
                    assert_eq!(index, 1);
                    assert_eq!(found, label);
                }
                other => panic!("unexpected error: {other:?}"),
            }
            assert!(buffer.is_empty());
        }
    }

    #[test]
    fn write_system_to_path_adds_generated_comment() {
        let (set, _) = read("1\nAr 0 0 0 1\n").unwrap();
        let file = NamedTempFile::new().unwrap();
        XyzmFile::write_system_to_path(&set, file.path()).unwrap();
        let (reread, metadata) = XyzmFile::read_from_path(file.path()).unwrap();
        assert_eq!(reread.to_particles(), set.to_particles());
        assert_eq!(metadata.comments, vec!["Generated by ljmd"]);
    }

    #[test]
    fn read_from_missing_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            XyzmFile::read_from_path(dir.path().join("missing.xyzm")),
            Err(MoleculeFileError::Io(_))
        ));
    }
}
