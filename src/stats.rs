//! Per-round score tracking.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::Properties;
use crate::team::TeamRegistry;

/// Scores captured after one round.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RoundStats {
    /// Round the snapshot was taken after (0 = initial state).
    pub round: u64,
    /// Total live cells across all teams.
    pub live_cells: usize,
    /// `(symbol, score)` per live team, in team creation order.
    pub scores: Vec<(char, usize)>,
}

impl RoundStats {
    /// Snapshot the current scores.
    pub fn capture(round: u64, live_cells: usize, teams: &TeamRegistry) -> Self {
        let scores = teams
            .roster()
            .iter()
            .map(|team| (team.symbol, team.score))
            .collect();
        Self {
            round,
            live_cells,
            scores,
        }
    }

    /// Format the snapshot as a one-line summary.
    pub fn summary(&self) -> String {
        let teams: Vec<String> = self
            .scores
            .iter()
            .map(|(symbol, score)| format!("{}:{}", symbol, score))
            .collect();
        format!(
            "R:{:5} | Cells:{:5} | {}",
            self.round,
            self.live_cells,
            teams.join(" ")
        )
    }
}

/// Score history for a whole game, exportable as JSON.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    /// The properties the game ran with.
    pub properties: Properties,
    /// One snapshot per round, including the initial state.
    pub snapshots: Vec<RoundStats>,
}

impl StatsHistory {
    pub fn new(properties: Properties) -> Self {
        Self {
            properties,
            snapshots: Vec::new(),
        }
    }

    pub fn record(&mut self, stats: RoundStats) {
        self.snapshots.push(stats);
    }

    /// Score of a team over time.
    pub fn score_series(&self, symbol: char) -> Vec<(u64, usize)> {
        self.snapshots
            .iter()
            .filter_map(|stats| {
                stats
                    .scores
                    .iter()
                    .find(|(s, _)| *s == symbol)
                    .map(|&(_, score)| (stats.round, score))
            })
            .collect()
    }

    /// Save the history to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Load a history from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
