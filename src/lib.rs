//! # WARLIFE
//!
//! Multi-team Game of Life war simulator.
//!
//! Teams of cells share one bounded grid. Every round each cell ages by
//! one; a cell with enough enemy neighbours is overrun; an empty position
//! touched by enough live cells comes back under the dominant team. The
//! last team standing wins, or the highest score when the round limit runs
//! out.
//!
//! ## Features
//!
//! - **Sparse**: the population is a position-keyed map, not a dense board
//! - **Parallel**: per-cell round evaluation fans out via Rayon
//! - **Deterministic**: fixed rules, no randomness, reproducible ties
//! - **Configurable**: `key:value` game configs with validated ranges
//!
//! ## Quick Start
//!
//! ```
//! use warlife::{loader, Properties, Simulation};
//!
//! let props = Properties::default();
//! let (cells, teams) = loader::parse_cells("10X20.\n28.2O\n", &props).unwrap();
//!
//! let mut sim = Simulation::new(props, cells, teams);
//! sim.step();
//!
//! println!("{}", sim.grid());
//! ```
//!
//! ## Loading games from disk
//!
//! A game directory holds exactly one `.config` file (`key:value` lines)
//! and one `.cells` file (run-length rows such as `3.2X1.2X`):
//!
//! ```rust,no_run
//! let mut sim = warlife::loader::load_game(std::path::Path::new("games/frontline")).unwrap();
//! let winner = sim.run(&mut std::io::stdout()).unwrap();
//! ```

pub mod cell;
pub mod config;
pub mod convert;
pub mod engine;
pub mod grid;
pub mod loader;
pub mod sim;
pub mod stats;
pub mod team;

// Re-export main types
pub use cell::{Cell, CellStore, Position};
pub use config::{ConfigError, Properties};
pub use grid::Grid;
pub use loader::{FormatError, LoadError};
pub use sim::Simulation;
pub use stats::{RoundStats, StatsHistory};
pub use team::{Team, TeamId, TeamRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
