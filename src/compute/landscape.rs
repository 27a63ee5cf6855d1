//! Static 2D fitness landscape and its text map format.
//!
//! ```text
//! <width> <height> <max_fitness> <fitness_spacing>
//! <row y=0: width scores>
//! ...
//! <row y=height-1: width scores>
//! ```
//!
//! `max_fitness` and `fitness_spacing` are descriptive only. They are kept so a
//! loaded map can be written back unchanged.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

use crate::schema::LandscapePattern;

/// Largest allowed landscape width or height.
pub const MAX_LANDSCAPE_DIM: usize = 100;

/// Landscape errors.
#[derive(Debug, thiserror::Error)]
pub enum LandscapeError {
    #[error("Fitness landscape {width}x{height} exceeds the maximum of {max}x{max}")]
    TooLarge {
        width: usize,
        height: usize,
        max: usize,
    },
    #[error("Malformed fitness landscape: {0}")]
    Malformed(String),
    #[error("Cell ({x}, {y}) is outside the {width}x{height} landscape")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("Fitness score {0} must be finite and non-negative")]
    InvalidScore(f64),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Grid of non-negative fitness scores indexed by genotype `(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessLandscape {
    width: usize,
    height: usize,
    /// Row-major scores, `cells[y * width + x]`.
    cells: Vec<f64>,
    max_fitness: f64,
    fitness_spacing: f64,
    revision: u64,
}

impl FitnessLandscape {
    /// Landscape with every cell set to `value`.
    pub fn flat(width: usize, height: usize, value: f64) -> Result<Self, LandscapeError> {
        check_dimensions(width, height)?;
        check_score(value)?;
        Ok(Self::from_parts(width, height, vec![value; width * height]))
    }

    /// Build from rows indexed `[y][x]`. All rows must have equal length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, LandscapeError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        check_dimensions(width, height)?;

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(LandscapeError::Malformed(format!(
                    "row {y} has {} values, expected {width}",
                    row.len()
                )));
            }
            for v in row {
                check_score(v)?;
                cells.push(v);
            }
        }
        Ok(Self::from_parts(width, height, cells))
    }

    /// Generate a landscape from a pattern.
    pub fn from_pattern(
        width: usize,
        height: usize,
        pattern: &LandscapePattern,
    ) -> Result<Self, LandscapeError> {
        check_dimensions(width, height)?;
        Ok(Self::from_parts(width, height, pattern.generate(width, height)))
    }

    fn from_parts(width: usize, height: usize, cells: Vec<f64>) -> Self {
        let max_fitness = cells.iter().copied().fold(0.0, f64::max);
        Self {
            width,
            height,
            cells,
            max_fitness,
            fitness_spacing: 1.0,
            revision: 0,
        }
    }

    /// Parse a landscape from the text map format.
    ///
    /// The dimensions are checked before any cell is read, and nothing is
    /// returned unless every declared cell parsed.
    pub fn load<R: Read>(reader: R) -> Result<Self, LandscapeError> {
        let mut text = String::new();
        BufReader::new(reader).read_to_string(&mut text)?;
        text.parse()
    }

    /// Load a landscape map file.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, LandscapeError> {
        let landscape = Self::load(File::open(path.as_ref())?)?;
        log::debug!(
            "Loaded {}x{} landscape from {}",
            landscape.width,
            landscape.height,
            path.as_ref().display()
        );
        Ok(landscape)
    }

    /// Write the landscape in the text map format.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(
            w,
            "{} {} {} {}",
            self.width, self.height, self.max_fitness, self.fitness_spacing
        )?;
        for row in self.cells.chunks(self.width) {
            let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writeln!(w, "{}", line.join(" "))?;
        }
        Ok(())
    }

    /// Save the landscape as a map file.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Descriptive maximum fitness from the map header.
    pub fn max_fitness(&self) -> f64 {
        self.max_fitness
    }

    /// Descriptive fitness spacing from the map header.
    pub fn fitness_spacing(&self) -> f64 {
        self.fitness_spacing
    }

    /// Counter bumped on every edit. Fitness cached against an older revision
    /// is stale.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Score at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the cell is outside the landscape.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        assert!(self.contains(x, y), "cell ({x}, {y}) out of bounds");
        self.cells[y * self.width + x]
    }

    #[inline]
    pub fn try_get(&self, x: usize, y: usize) -> Option<f64> {
        self.contains(x, y).then(|| self.cells[y * self.width + x])
    }

    /// Overwrite one cell.
    pub fn set(&mut self, x: usize, y: usize, value: f64) -> Result<(), LandscapeError> {
        if !self.contains(x, y) {
            return Err(LandscapeError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        check_score(value)?;
        self.cells[y * self.width + x] = value;
        self.revision += 1;
        Ok(())
    }

    /// Change the dimensions. Cells inside both the old and new bounds keep
    /// their score; new cells are zero.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), LandscapeError> {
        check_dimensions(width, height)?;
        let mut cells = vec![0.0; width * height];
        for y in 0..height.min(self.height) {
            for x in 0..width.min(self.width) {
                cells[y * width + x] = self.cells[y * self.width + x];
            }
        }
        self.width = width;
        self.height = height;
        self.cells = cells;
        self.revision += 1;
        Ok(())
    }

    /// Replace contents with `other`, keeping the revision history monotonic.
    pub fn replace(&mut self, other: FitnessLandscape) {
        let revision = self.revision.max(other.revision) + 1;
        *self = other;
        self.revision = revision;
    }

    /// Rows indexed `[y][x]`.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.cells.chunks(self.width)
    }

    /// Center cell, the default starting genotype.
    pub fn center(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }
}

impl FromStr for FitnessLandscape {
    type Err = LandscapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();

        let width: usize = next_header(&mut tokens, "width")?;
        let height: usize = next_header(&mut tokens, "height")?;
        let max_fitness: f64 = next_header(&mut tokens, "max fitness")?;
        let fitness_spacing: f64 = next_header(&mut tokens, "fitness spacing")?;

        check_dimensions(width, height)?;

        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let token = tokens.next().ok_or_else(|| {
                    LandscapeError::Malformed(format!(
                        "expected {} cell values, found {}",
                        width * height,
                        cells.len()
                    ))
                })?;
                let v: f64 = token.parse().map_err(|_| {
                    LandscapeError::Malformed(format!("cell ({x}, {y}): '{token}' is not a number"))
                })?;
                if !(v.is_finite() && v >= 0.0) {
                    return Err(LandscapeError::Malformed(format!(
                        "cell ({x}, {y}): score {v} must be finite and non-negative"
                    )));
                }
                cells.push(v);
            }
        }

        Ok(Self {
            width,
            height,
            cells,
            max_fitness,
            fitness_spacing,
            revision: 0,
        })
    }
}

fn next_header<'a, T: FromStr>(
    tokens: &mut impl Iterator<Item = &'a str>,
    field: &str,
) -> Result<T, LandscapeError> {
    let token = tokens
        .next()
        .ok_or_else(|| LandscapeError::Malformed(format!("missing header field '{field}'")))?;
    token
        .parse()
        .map_err(|_| LandscapeError::Malformed(format!("header field '{field}': '{token}'")))
}

fn check_dimensions(width: usize, height: usize) -> Result<(), LandscapeError> {
    if width > MAX_LANDSCAPE_DIM || height > MAX_LANDSCAPE_DIM {
        return Err(LandscapeError::TooLarge {
            width,
            height,
            max: MAX_LANDSCAPE_DIM,
        });
    }
    if width == 0 || height == 0 {
        return Err(LandscapeError::Malformed(format!(
            "dimensions {width}x{height} must be non-zero"
        )));
    }
    Ok(())
}

fn check_score(v: f64) -> Result<(), LandscapeError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(LandscapeError::InvalidScore(v))
    }
}
