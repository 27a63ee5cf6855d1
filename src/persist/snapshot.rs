//! Snapshot text codec.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

use crate::compute::{FitnessLandscape, MAX_POPULATION, Organism};

/// Snapshot errors.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Malformed snapshot at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
    #[error("Snapshot population {size} exceeds the limit of {max}")]
    TooLarge { size: usize, max: usize },
    #[error("Snapshot mutation rate {0} must lie in [0, 1]")]
    InvalidMutationRate(f64),
    #[error("Organism {index} at ({x}, {y}) is outside the {width}x{height} landscape")]
    OutOfBounds {
        index: usize,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// The persisted state of one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationSnapshot {
    pub mutation_rate: f64,
    pub generation: u64,
    /// Organisms in buffer order. The population size is their count.
    pub organisms: Vec<Organism>,
}

impl PopulationSnapshot {
    pub fn size(&self) -> usize {
        self.organisms.len()
    }

    /// Write in the snapshot text format.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "N {}", self.organisms.len())?;
        writeln!(w, "M {}", self.mutation_rate)?;
        writeln!(w, "G {}", self.generation)?;
        for o in &self.organisms {
            writeln!(w, "{} {} {}", o.x, o.y, o.fitness)?;
        }
        Ok(())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Parse a snapshot. The whole input is validated before returning.
    pub fn load<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        let mut lines = Vec::new();
        for line in BufReader::new(reader).lines() {
            lines.push(line?);
        }
        parse_lines(&lines)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        Self::load(File::open(path)?)
    }

    /// Check every organism lies on `landscape`.
    pub fn validate_for(&self, landscape: &FitnessLandscape) -> Result<(), SnapshotError> {
        for (index, o) in self.organisms.iter().enumerate() {
            if !landscape.contains(o.x, o.y) {
                return Err(SnapshotError::OutOfBounds {
                    index,
                    x: o.x,
                    y: o.y,
                    width: landscape.width(),
                    height: landscape.height(),
                });
            }
        }
        Ok(())
    }
}

impl FromStr for PopulationSnapshot {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<String> = s.lines().map(str::to_string).collect();
        parse_lines(&lines)
    }
}

fn parse_lines(lines: &[String]) -> Result<PopulationSnapshot, SnapshotError> {
    let mut rows = lines
        .iter()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let size: usize = header(&mut rows, "N")?;
    if size > MAX_POPULATION {
        return Err(SnapshotError::TooLarge {
            size,
            max: MAX_POPULATION,
        });
    }
    let mutation_rate: f64 = header(&mut rows, "M")?;
    if !(0.0..=1.0).contains(&mutation_rate) {
        return Err(SnapshotError::InvalidMutationRate(mutation_rate));
    }
    let generation: u64 = header(&mut rows, "G")?;

    let mut organisms = Vec::with_capacity(size);
    for index in 0..size {
        let (line, text) = rows.next().ok_or_else(|| SnapshotError::Malformed {
            line: lines.len() + 1,
            reason: format!("expected {size} organisms, found {index}"),
        })?;

        let fields: Vec<&str> = text.split_whitespace().collect();
        let [x, y, fitness] = fields[..] else {
            return Err(SnapshotError::Malformed {
                line,
                reason: format!("expected '<x> <y> <fitness>', found '{text}'"),
            });
        };

        let x = field(x, line, "x")?;
        let y = field(y, line, "y")?;
        let fitness: f64 = field(fitness, line, "fitness")?;
        if !(fitness.is_finite() && fitness >= 0.0) {
            return Err(SnapshotError::Malformed {
                line,
                reason: format!("fitness {fitness} must be finite and non-negative"),
            });
        }
        organisms.push(Organism { x, y, fitness });
    }

    if let Some((line, text)) = rows.next() {
        return Err(SnapshotError::Malformed {
            line,
            reason: format!("unexpected trailing content '{text}'"),
        });
    }

    Ok(PopulationSnapshot {
        mutation_rate,
        generation,
        organisms,
    })
}

fn header<'a, T: FromStr>(
    rows: &mut impl Iterator<Item = (usize, &'a str)>,
    tag: &str,
) -> Result<T, SnapshotError> {
    let (line, text) = rows.next().ok_or_else(|| SnapshotError::Malformed {
        line: 0,
        reason: format!("missing '{tag}' header"),
    })?;
    let mut parts = text.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(t), Some(value), None) if t == tag => field(value, line, tag),
        _ => Err(SnapshotError::Malformed {
            line,
            reason: format!("expected '{tag} <value>', found '{text}'"),
        }),
    }
}

fn field<T: FromStr>(token: &str, line: usize, name: &str) -> Result<T, SnapshotError> {
    token.parse().map_err(|_| SnapshotError::Malformed {
        line,
        reason: format!("invalid {name} '{token}'"),
    })
}
