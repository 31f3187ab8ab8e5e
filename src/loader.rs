//! Game loading: directory discovery, configuration, and run-length cells.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::cell::{Cell, CellStore, Position};
use crate::config::{ConfigError, Properties};
use crate::grid::EMPTY_SYMBOL;
use crate::sim::Simulation;
use crate::team::TeamRegistry;

/// Filename suffix of configuration files.
pub const CONFIG_SUFFIX: &str = ".config";
/// Filename suffix of initial-state files.
pub const CELLS_SUFFIX: &str = ".cells";

/// Load a game from a directory holding exactly one `.config` and exactly
/// one `.cells` file.
pub fn load_game(dir: &Path) -> Result<Simulation, LoadError> {
    let (config_path, cells_path) = find_game_files(dir)?;

    let config_text = read_file(&config_path)?;
    let props = Properties::parse(&config_text)
        .map_err(|source| LoadError::Config(config_path.clone(), source))?;

    let cells_text = read_file(&cells_path)?;
    let (cells, teams) = parse_cells(&cells_text, &props)
        .map_err(|source| LoadError::Format(cells_path.clone(), source))?;

    log::info!(
        "loaded game from {}: {} teams, {} cells on a {}x{} board",
        dir.display(),
        teams.len(),
        cells.len(),
        props.width,
        props.height
    );
    Ok(Simulation::new(props, cells, teams))
}

/// Locate the single `.config` and single `.cells` file in a directory.
/// Other files are allowed; a missing or duplicated required file is not.
pub fn find_game_files(dir: &Path) -> Result<(PathBuf, PathBuf), LoadError> {
    let entries = fs::read_dir(dir).map_err(|source| LoadError::Io(dir.to_path_buf(), source))?;

    let mut config_files = Vec::new();
    let mut cells_files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| LoadError::Io(dir.to_path_buf(), source))?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if name.ends_with(CONFIG_SUFFIX) {
            config_files.push(path);
        } else if name.ends_with(CELLS_SUFFIX) {
            cells_files.push(path);
        }
    }

    let config = exactly_one(config_files, dir, CONFIG_SUFFIX)?;
    let cells = exactly_one(cells_files, dir, CELLS_SUFFIX)?;
    Ok((config, cells))
}

/// Parse run-length-encoded rows into a population and its team roster.
///
/// Each row is `<count><symbol>` tokens consuming exactly `width` cells;
/// `.` runs create no cells; teams are registered on first sighting. Fewer
/// rows than `height` leaves the remaining rows empty.
pub fn parse_cells(
    text: &str,
    props: &Properties,
) -> Result<(CellStore, TeamRegistry), FormatError> {
    let mut rows: Vec<&str> = text.lines().map(str::trim).collect();
    while rows.last().is_some_and(|row| row.is_empty()) {
        rows.pop();
    }
    if rows.len() > props.height as usize {
        return Err(FormatError::TooManyRows {
            expected: props.height,
            found: rows.len(),
        });
    }

    let mut cells = CellStore::new(props.width, props.height);
    let mut teams = TeamRegistry::new();
    let width = props.width as u32;

    for (y, row) in rows.iter().enumerate() {
        let line = y + 1;
        let mut x: u32 = 0;
        let mut chars = row.chars().peekable();

        while let Some(&first) = chars.peek() {
            if !first.is_ascii_digit() {
                return Err(FormatError::MissingCount { line, found: first });
            }

            let mut count: u32 = 0;
            while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
                count = count.saturating_mul(10).saturating_add(digit);
                chars.next();
            }
            let Some(symbol) = chars.next() else {
                return Err(FormatError::MissingSymbol { line });
            };
            if count == 0 {
                return Err(FormatError::ZeroCount { line, symbol });
            }
            if x.saturating_add(count) > width {
                return Err(FormatError::RowWidth {
                    line,
                    expected: props.width,
                    found: x.saturating_add(count),
                });
            }

            if symbol != EMPTY_SYMBOL {
                let team = teams.register(symbol);
                for offset in 0..count {
                    let pos = Position::new((x + offset) as u16, y as u16);
                    cells.insert(pos, Cell::new(team, props.death_age));
                    teams.credit(team);
                }
            }
            x += count;
        }

        if x != width {
            return Err(FormatError::RowWidth {
                line,
                expected: props.width,
                found: x,
            });
        }
    }

    Ok((cells, teams))
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io(path.to_path_buf(), source))
}

fn exactly_one(
    mut found: Vec<PathBuf>,
    dir: &Path,
    suffix: &'static str,
) -> Result<PathBuf, LoadError> {
    if found.len() == 1 {
        Ok(found.remove(0))
    } else {
        Err(LoadError::Directory {
            dir: dir.to_path_buf(),
            suffix,
            found: found.len(),
        })
    }
}

/// Errors raised while loading a game.
#[derive(Debug)]
pub enum LoadError {
    Io(PathBuf, io::Error),
    Config(PathBuf, ConfigError),
    Format(PathBuf, FormatError),
    Directory {
        dir: PathBuf,
        suffix: &'static str,
        found: usize,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(path, source) => write!(f, "{}: {}", path.display(), source),
            Self::Config(path, source) => write!(f, "{}: {}", path.display(), source),
            Self::Format(path, source) => write!(f, "{}: {}", path.display(), source),
            Self::Directory { dir, suffix, found } => write!(
                f,
                "expected exactly one '{}' file in {}, found {}",
                suffix,
                dir.display(),
                found
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(_, source) => Some(source),
            Self::Config(_, source) => Some(source),
            Self::Format(_, source) => Some(source),
            Self::Directory { .. } => None,
        }
    }
}

/// Errors raised by malformed run-length cell data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A token started with something other than a decimal count.
    MissingCount { line: usize, found: char },
    /// A count reached the end of the row without its symbol.
    MissingSymbol { line: usize },
    /// A run of zero cells.
    ZeroCount { line: usize, symbol: char },
    /// A row consumed more or fewer cells than the declared width.
    RowWidth {
        line: usize,
        expected: u16,
        found: u32,
    },
    /// More rows than the declared height.
    TooManyRows { expected: u16, found: usize },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCount { line, found } => {
                write!(f, "line {}: expected a count, found '{}'", line, found)
            }
            Self::MissingSymbol { line } => {
                write!(f, "line {}: count without a symbol", line)
            }
            Self::ZeroCount { line, symbol } => {
                write!(f, "line {}: zero-length run of '{}'", line, symbol)
            }
            Self::RowWidth {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {}: row covers {} cells, expected {}",
                line, found, expected
            ),
            Self::TooManyRows { expected, found } => {
                write!(f, "{} rows for a grid {} rows tall", found, expected)
            }
        }
    }
}

impl std::error::Error for FormatError {}
