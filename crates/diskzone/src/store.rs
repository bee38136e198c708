//! Plain-text measurement store shared by the locate and classify stages.
//!
//! One diameter in millimeters per line, two decimals, detection order.
//! Blank lines are ignored on read; anything else that is not a number is an
//! error.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::interpret::Measurement;

/// Default store file name.
pub const DEFAULT_STORE_FILE: &str = "zones.txt";

/// I/O or format failure on the measurement store.
#[derive(Debug)]
pub enum StoreError {
    /// Opening, reading or writing the file failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A line does not hold a finite number.
    Parse {
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        content: String,
    },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "measurement store {}: {}", path.display(), source)
            }
            Self::Parse {
                path,
                line,
                content,
            } => write!(
                f,
                "measurement store {}:{}: not a diameter: '{}'",
                path.display(),
                line,
                content
            ),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { .. } => None,
        }
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write measurements to `out`, one per line.
pub fn write_to<W: Write>(mut out: W, measurements: &[Measurement]) -> std::io::Result<()> {
    for m in measurements {
        writeln!(out, "{:.2}", m.diameter_mm())?;
    }
    out.flush()
}

/// Read measurements from `input`. `origin` only labels errors.
pub fn read_from<R: BufRead>(input: R, origin: &Path) -> Result<Vec<Measurement>, StoreError> {
    let mut measurements = Vec::new();
    for (idx, line) in input.lines().enumerate() {
        let line = line.map_err(io_err(origin))?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        match text.parse::<f32>() {
            Ok(v) if v.is_finite() => measurements.push(Measurement::new(v)),
            _ => {
                return Err(StoreError::Parse {
                    path: origin.to_path_buf(),
                    line: idx + 1,
                    content: text.to_string(),
                })
            }
        }
    }
    Ok(measurements)
}

/// Create (or truncate) `path` and write all measurements.
pub fn write_measurements(path: &Path, measurements: &[Measurement]) -> Result<(), StoreError> {
    let file = File::create(path).map_err(io_err(path))?;
    write_to(BufWriter::new(file), measurements).map_err(io_err(path))?;
    tracing::debug!(
        "wrote {} measurements to {}",
        measurements.len(),
        path.display()
    );
    Ok(())
}

/// Read all measurements from `path` in file order.
pub fn read_measurements(path: &Path) -> Result<Vec<Measurement>, StoreError> {
    let file = File::open(path).map_err(io_err(path))?;
    let measurements = read_from(BufReader::new(file), path)?;
    tracing::debug!(
        "read {} measurements from {}",
        measurements.len(),
        path.display()
    );
    Ok(measurements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn mm(values: &[f32]) -> Vec<Measurement> {
        values.iter().copied().map(Measurement::new).collect()
    }

    #[test]
    fn values_are_written_with_two_decimals() {
        let mut buf = Vec::new();
        write_to(&mut buf, &mm(&[6.666_667, 18.0, 4.126])).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "6.67\n18.00\n4.13\n");
    }

    #[test]
    fn file_preserves_detection_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_STORE_FILE);
        write_measurements(&path, &mm(&[22.5, 6.67, 14.0])).unwrap();

        let back = read_measurements(&path).unwrap();
        let values: Vec<f32> = back.iter().map(Measurement::diameter_mm).collect();
        assert_eq!(values, vec![22.5, 6.67, 14.0]);
    }

    #[test]
    fn empty_store_reads_as_no_measurements() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        write_measurements(&path, &[]).unwrap();
        assert!(read_measurements(&path).unwrap().is_empty());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let input = Cursor::new("\n12.50\n\n  7.25  \n");
        let values = read_from(input, Path::new("mem")).unwrap();
        assert_eq!(values, mm(&[12.5, 7.25]));
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let input = Cursor::new("12.50\nabc\n3.0\n");
        let err = read_from(input, Path::new("zones.txt")).unwrap_err();
        match &err {
            StoreError::Parse { line, content, .. } => {
                assert_eq!(*line, 2);
                assert_eq!(content, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(
            err.to_string(),
            "measurement store zones.txt:2: not a diameter: 'abc'"
        );
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert!(read_from(Cursor::new("inf\n"), Path::new("z")).is_err());
        assert!(read_from(Cursor::new("NaN\n"), Path::new("z")).is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_measurements(Path::new("/no/such/dir/zones.txt")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(err.to_string().contains("zones.txt"));
    }
}
