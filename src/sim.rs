//! Simulation driver: pacing, termination, and winner determination.

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use crate::cell::CellStore;
use crate::config::Properties;
use crate::engine;
use crate::grid::Grid;
use crate::stats::{RoundStats, StatsHistory};
use crate::team::{Team, TeamRegistry};

/// A running game: the population, the team roster, and the round clock.
///
/// One round is atomic; nothing observes the registry or the store while
/// [`step`](Simulation::step) is in flight, and the loop only stops between
/// rounds.
pub struct Simulation {
    pub cells: CellStore,
    pub teams: TeamRegistry,
    pub props: Properties,
    /// Rounds applied so far.
    pub round: u64,
    pub history: StatsHistory,
}

impl Simulation {
    /// Assemble a simulation from parsed initial state.
    pub fn new(props: Properties, cells: CellStore, teams: TeamRegistry) -> Self {
        let mut history = StatsHistory::new(props.clone());
        history.record(RoundStats::capture(0, cells.len(), &teams));
        Self {
            cells,
            teams,
            props,
            round: 0,
            history,
        }
    }

    /// Apply one round.
    pub fn step(&mut self) {
        self.cells = engine::advance(&self.cells, &mut self.teams, &self.props);
        self.round += 1;
        self.history
            .record(RoundStats::capture(self.round, self.cells.len(), &self.teams));
        log::debug!(
            "round {}: {} cells, {} teams",
            self.round,
            self.cells.len(),
            self.teams.len()
        );
    }

    /// Whether a termination condition holds.
    pub fn finished(&self) -> bool {
        self.teams.len() <= 1 || self.round >= self.props.win_round
    }

    /// The winner, if the game has terminated.
    ///
    /// A single remaining team wins immediately, regardless of the round
    /// count. At the round limit the highest score wins, an equal top score
    /// going to the team created first. A board left with no teams has no
    /// winner.
    pub fn winner(&self) -> Option<Team> {
        if self.teams.len() == 1 {
            return self.teams.sole_survivor().cloned();
        }
        if self.round >= self.props.win_round {
            return self.teams.leader().cloned();
        }
        None
    }

    /// Project the current population onto a display grid.
    pub fn grid(&self) -> Grid {
        Grid::render(&self.cells, &self.teams)
    }

    /// Run rounds until termination, pacing them at `refresh` per second,
    /// and write grids to `out`.
    ///
    /// The initial grid is always written. Intermediate grids appear only
    /// when the `output` property is set; with it off, the final grid is
    /// written at termination instead.
    pub fn run<W: Write>(&mut self, out: &mut W) -> io::Result<Option<Team>> {
        let tick = Duration::from_secs_f64(1.0 / self.props.refresh as f64);

        self.write_grid(out)?;

        let mut last_round = Instant::now();
        while self.round < self.props.win_round {
            let elapsed = last_round.elapsed();
            if elapsed < tick {
                thread::sleep(tick - elapsed);
            }
            last_round = Instant::now();

            self.step();
            if self.props.output {
                self.write_grid(out)?;
            }
            if self.teams.len() <= 1 {
                break;
            }
        }

        if !self.props.output {
            self.write_grid(out)?;
        }

        let winner = self.winner();
        match &winner {
            Some(team) => log::info!("terminated after round {}: winner {}", self.round, team),
            None => log::info!("terminated after round {}: no teams left", self.round),
        }
        Ok(winner)
    }

    fn write_grid<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "ROUND {}:", self.round)?;
        writeln!(out, "{}", self.grid())?;
        writeln!(out)
    }
}
