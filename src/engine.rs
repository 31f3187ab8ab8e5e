//! Round engine: computes generation N+1 from generation N.
//!
//! A round is two passes, both reading the same pre-round snapshot. The
//! aging/combat pass maps every live cell to a verdict; the revival pass
//! maps every empty position a live cell touched to a revival decision.
//! Each pass is a pure parallel map whose results merge sequentially, so no
//! cell's outcome ever depends on another cell's outcome within the round.

use rayon::prelude::*;
use std::collections::HashSet;

use crate::cell::{Cell, CellStore, Position};
use crate::config::Properties;
use crate::team::{TeamId, TeamRegistry};

/// Live neighbours required before an empty position can revive. Fixed,
/// and distinct from the configurable `to-kill` threshold even though both
/// default to 3.
pub const REVIVE_THRESHOLD: usize = 3;

/// Outcome of the aging/combat pass for one cell.
enum Outcome {
    /// Carried into the next generation with a decremented lifespan.
    Survives(Cell),
    /// Lifespan ran out.
    DiesOfAge,
    /// At least `to-kill` enemy neighbours.
    Overrun,
}

struct Verdict {
    pos: Position,
    team: TeamId,
    outcome: Outcome,
    /// Empty neighbour positions seen by this cell, recorded even when the
    /// cell itself is killed.
    dead_neighbors: Vec<Position>,
}

/// Advance one generation. Builds the next population from `cells` and
/// keeps `teams` scores in step with it: every removal is debited, every
/// revival credited, and a team is dropped the moment its score hits zero.
pub fn advance(cells: &CellStore, teams: &mut TeamRegistry, props: &Properties) -> CellStore {
    let population: Vec<(Position, Cell)> = cells.iter().collect();

    let verdicts: Vec<Verdict> = population
        .par_iter()
        .map(|&(pos, cell)| evaluate_cell(cells, props, pos, cell))
        .collect();

    let mut next = CellStore::new(cells.width(), cells.height());
    let mut candidates: HashSet<Position> = HashSet::new();

    for verdict in verdicts {
        candidates.extend(verdict.dead_neighbors.iter().copied());
        match verdict.outcome {
            Outcome::Survives(cell) => next.insert(verdict.pos, cell),
            Outcome::DiesOfAge | Outcome::Overrun => teams.debit(verdict.team),
        }
    }

    // Revival decisions read the snapshot and the post-combat scores; the
    // scores do not move until every decision is in.
    let candidates: Vec<Position> = candidates.into_iter().collect();
    let frozen: &TeamRegistry = teams;
    let revivals: Vec<(Position, TeamId)> = candidates
        .par_iter()
        .filter_map(|&pos| resolve_revival(cells, frozen, pos).map(|team| (pos, team)))
        .collect();

    for (pos, team) in revivals {
        next.insert(pos, Cell::new(team, props.death_age));
        teams.credit(team);
    }

    next
}

/// Pure per-cell evaluation against the snapshot.
fn evaluate_cell(cells: &CellStore, props: &Properties, pos: Position, cell: Cell) -> Verdict {
    let lifespan = cell.lifespan.saturating_sub(1);
    if lifespan == 0 {
        // An aged-out cell contributes no revival candidates.
        return Verdict {
            pos,
            team: cell.team,
            outcome: Outcome::DiesOfAge,
            dead_neighbors: Vec::new(),
        };
    }

    let (alive, dead_neighbors) = cells.neighbors(pos);
    let enemies = alive
        .iter()
        .filter(|(_, neighbor)| neighbor.team != cell.team)
        .count();

    let outcome = if enemies >= props.to_kill as usize {
        Outcome::Overrun
    } else {
        Outcome::Survives(Cell::new(cell.team, lifespan))
    };

    Verdict {
        pos,
        team: cell.team,
        outcome,
        dead_neighbors,
    }
}

/// Decide whether an empty position revives, and for which team.
///
/// Needs at least [`REVIVE_THRESHOLD`] live neighbours. The unique
/// max-tally team controls; a tally tie falls to the highest-scoring tied
/// team, and an equal top score keeps the position dead. A team already
/// eliminated this round never revives.
fn resolve_revival(cells: &CellStore, teams: &TeamRegistry, pos: Position) -> Option<TeamId> {
    let (alive, _) = cells.neighbors(pos);
    if alive.len() < REVIVE_THRESHOLD {
        return None;
    }

    let mut tallies: Vec<(TeamId, usize)> = Vec::new();
    for (_, neighbor) in &alive {
        match tallies.iter_mut().find(|(team, _)| *team == neighbor.team) {
            Some((_, count)) => *count += 1,
            None => tallies.push((neighbor.team, 1)),
        }
    }

    let max_tally = tallies.iter().map(|&(_, count)| count).max()?;
    let mut contenders: Vec<TeamId> = tallies
        .iter()
        .filter(|&&(_, count)| count == max_tally)
        .map(|&(team, _)| team)
        .collect();

    let winner = if contenders.len() == 1 {
        contenders[0]
    } else {
        contenders.sort_by(|a, b| teams.score(*b).cmp(&teams.score(*a)));
        if teams.score(contenders[0]) == teams.score(contenders[1]) {
            return None;
        }
        contenders[0]
    };

    teams.contains(winner).then_some(winner)
}
