//! Converts plain-text grids into the run-length `.cells` format.
//!
//! A `.grid` file holds the literal board, one symbol per cell:
//!
//! ```text
//! ...XX.XX
//! ....XXXX
//! ```
//!
//! Conversion writes the sibling `.cells` file (`3.2X1.2X` for the first
//! row above) and a `.config` file carrying the measured height and width.
//! Existing outputs are overwritten.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Filename suffix of convertible grid files.
pub const GRID_SUFFIX: &str = ".grid";

/// Convert `<name>.grid` into `<name>.cells` plus a matching `<name>.config`.
pub fn convert(path: &Path) -> Result<(), ConvertError> {
    let is_grid = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(GRID_SUFFIX));
    if !is_grid {
        return Err(ConvertError::NotAGrid(path.to_path_buf()));
    }

    let text =
        fs::read_to_string(path).map_err(|source| ConvertError::Io(path.to_path_buf(), source))?;
    let (encoded, width, height) = encode_grid(&text)?;

    let cells_path = path.with_extension("cells");
    fs::write(&cells_path, encoded).map_err(|source| ConvertError::Io(cells_path, source))?;

    let config_path = path.with_extension("config");
    let config = format!("height:{}\nwidth:{}\n", height, width);
    fs::write(&config_path, config).map_err(|source| ConvertError::Io(config_path, source))?;

    Ok(())
}

/// Run-length encode a whole grid, returning the text plus its dimensions.
/// Reading stops at the first blank line.
fn encode_grid(text: &str) -> Result<(String, usize, usize), ConvertError> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .take_while(|row| !row.is_empty())
        .collect();
    if rows.is_empty() {
        return Err(ConvertError::EmptyGrid);
    }

    let width = rows[0].chars().count();
    let mut encoded = String::new();
    for (y, row) in rows.iter().enumerate() {
        let row_width = row.chars().count();
        if row_width != width {
            return Err(ConvertError::RaggedRow {
                line: y + 1,
                expected: width,
                found: row_width,
            });
        }
        encoded.push_str(&encode_row(row));
        encoded.push('\n');
    }

    Ok((encoded, width, rows.len()))
}

/// Run-length encode one row of symbols.
fn encode_row(row: &str) -> String {
    let mut encoded = String::new();
    let mut run: Option<(char, usize)> = None;

    for symbol in row.chars() {
        run = match run {
            Some((prev, count)) if prev == symbol => Some((prev, count + 1)),
            Some((prev, count)) => {
                encoded.push_str(&format!("{}{}", count, prev));
                Some((symbol, 1))
            }
            None => Some((symbol, 1)),
        };
    }
    if let Some((prev, count)) = run {
        encoded.push_str(&format!("{}{}", count, prev));
    }

    encoded
}

/// Errors raised while converting a grid file.
#[derive(Debug)]
pub enum ConvertError {
    Io(PathBuf, io::Error),
    /// The input does not end in `.grid`.
    NotAGrid(PathBuf),
    EmptyGrid,
    /// A row differs in width from the first row.
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(path, source) => write!(f, "{}: {}", path.display(), source),
            Self::NotAGrid(path) => write!(
                f,
                "expected a '{}' file for conversion, got {}",
                GRID_SUFFIX,
                path.display()
            ),
            Self::EmptyGrid => write!(f, "grid file holds no rows"),
            Self::RaggedRow {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {}: row is {} cells wide, expected {}",
                line, found, expected
            ),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(_, source) => Some(source),
            _ => None,
        }
    }
}
