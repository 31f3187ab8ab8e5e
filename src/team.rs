//! Team identity, scores, and the registry that owns them.

use std::collections::HashMap;
use std::fmt;

/// Opaque team handle. Handles are assigned in creation order and are never
/// reused within a simulation, even after the team is eliminated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeamId(u32);

/// A competing team.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Team {
    pub id: TeamId,
    /// Display symbol, unique among live teams. Used as the external
    /// identifier when loading state and when rendering.
    pub symbol: char,
    /// Live cell count. Kept in step with the cell store by the engine.
    pub score: usize,
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (score {})", self.symbol, self.score)
    }
}

/// Registry of live teams: an id-keyed arena with a symbol side-index.
///
/// The symbol index exists for loading and rendering lookups only; equality
/// and membership are always by id. A team whose score reaches zero is
/// removed immediately and permanently.
#[derive(Clone, Debug, Default)]
pub struct TeamRegistry {
    teams: HashMap<TeamId, Team>,
    by_symbol: HashMap<char, TeamId>,
    next_id: u32,
}

impl TeamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the team for a symbol, creating it with a zero score on
    /// first sighting.
    pub fn register(&mut self, symbol: char) -> TeamId {
        if let Some(&id) = self.by_symbol.get(&symbol) {
            return id;
        }
        let id = TeamId(self.next_id);
        self.next_id += 1;
        self.teams.insert(
            id,
            Team {
                id,
                symbol,
                score: 0,
            },
        );
        self.by_symbol.insert(symbol, id);
        id
    }

    #[inline]
    pub fn get(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(&id)
    }

    #[inline]
    pub fn contains(&self, id: TeamId) -> bool {
        self.teams.contains_key(&id)
    }

    /// Resolve a symbol to its live team, if any.
    #[inline]
    pub fn lookup(&self, symbol: char) -> Option<TeamId> {
        self.by_symbol.get(&symbol).copied()
    }

    /// The display symbol of a live team.
    #[inline]
    pub fn symbol(&self, id: TeamId) -> Option<char> {
        self.teams.get(&id).map(|team| team.symbol)
    }

    /// Current score of a team; an eliminated team scores zero.
    #[inline]
    pub fn score(&self, id: TeamId) -> usize {
        self.teams.get(&id).map_or(0, |team| team.score)
    }

    /// Credit one cell to the team.
    pub fn credit(&mut self, id: TeamId) {
        if let Some(team) = self.teams.get_mut(&id) {
            team.score += 1;
        }
    }

    /// Debit one cell from the team, removing it from the registry the
    /// instant its score reaches zero.
    pub fn debit(&mut self, id: TeamId) {
        if let Some(team) = self.teams.get_mut(&id) {
            team.score = team.score.saturating_sub(1);
            if team.score == 0 {
                let symbol = team.symbol;
                self.teams.remove(&id);
                self.by_symbol.remove(&symbol);
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Iterate live teams in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }

    /// Live teams in creation order.
    pub fn roster(&self) -> Vec<&Team> {
        let mut teams: Vec<&Team> = self.teams.values().collect();
        teams.sort_by_key(|team| team.id);
        teams
    }

    /// The last team standing, if exactly one remains.
    pub fn sole_survivor(&self) -> Option<&Team> {
        if self.teams.len() == 1 {
            self.teams.values().next()
        } else {
            None
        }
    }

    /// The highest-scoring team; an equal top score goes to the team
    /// created first.
    pub fn leader(&self) -> Option<&Team> {
        self.teams
            .values()
            .max_by(|a, b| a.score.cmp(&b.score).then(b.id.cmp(&a.id)))
    }
}
