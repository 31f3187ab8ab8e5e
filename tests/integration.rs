//! Integration tests for WARLIFE

use std::fs;
use std::path::PathBuf;

use warlife::{loader, Cell, CellStore, LoadError, Position, Properties, Simulation, TeamRegistry};

fn write_game(dir_name: &str, config: &str, cells: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(dir_name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("game.config"), config).unwrap();
    fs::write(dir.join("game.cells"), cells).unwrap();
    dir
}

fn assert_scores_match_population(sim: &Simulation) {
    for team in sim.teams.iter() {
        let owned = sim
            .cells
            .iter()
            .filter(|(_, cell)| cell.team == team.id)
            .count();
        assert_eq!(
            team.score, owned,
            "team {} score {} but owns {} cells",
            team.symbol, team.score, owned
        );
    }
    let total: usize = sim.teams.iter().map(|team| team.score).sum();
    assert_eq!(total, sim.cells.len());
}

#[test]
fn test_load_and_run_keeps_scores_consistent() {
    let dir = write_game(
        "warlife_it_invariants",
        "width:20\nheight:14\ndeath-age:8\nto-kill:3\nwin-round:128\noutput:false\n",
        "2.3X15.\n20.\n2.3X15.\n20.\n20.\n20.\n20.\n20.\n20.\n20.\n20.\n15.3O2.\n20.\n15.3O2.\n",
    );

    let mut sim = loader::load_game(&dir).unwrap();
    assert_eq!(sim.teams.len(), 2);
    assert_eq!(sim.cells.len(), 12);
    assert_scores_match_population(&sim);

    while !sim.finished() {
        sim.step();
        assert_scores_match_population(&sim);
    }
    assert!(sim.round <= sim.props.win_round);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_row_of_three_survives_and_revives_below_the_middle() {
    let mut teams = TeamRegistry::new();
    let x = teams.register('X');

    let mut cells = CellStore::new(3, 3);
    for px in 0..3 {
        cells.insert(Position::new(px, 0), Cell::new(x, 5));
        teams.credit(x);
    }

    let props = Properties {
        to_kill: 3,
        death_age: 5,
        ..Properties::default()
    };
    let mut sim = Simulation::new(props, cells, teams);
    sim.step();

    // No enemies anywhere: the row ages by one and survives.
    for px in 0..3 {
        assert_eq!(sim.cells.get(Position::new(px, 0)).unwrap().lifespan, 4);
    }

    // Only the position below the middle cell saw three live neighbours.
    let revived = sim.cells.get(Position::new(1, 1)).expect("revives");
    assert_eq!(revived.team, x);
    assert_eq!(revived.lifespan, 5);
    assert_eq!(sim.cells.len(), 4);
    assert_scores_match_population(&sim);
}

#[test]
fn test_surrounded_cell_is_killed_and_score_drops_by_one() {
    let mut teams = TeamRegistry::new();
    let o = teams.register('O');
    let x = teams.register('X');

    let mut cells = CellStore::new(12, 12);
    // The X cell at (1, 1) has exactly three O neighbours; the other three
    // X cells sit alone.
    for &(px, py) in &[(0, 0), (1, 0), (2, 0), (9, 9)] {
        cells.insert(Position::new(px, py), Cell::new(o, 8));
        teams.credit(o);
    }
    for &(px, py) in &[(1, 1), (5, 5), (7, 7), (11, 0)] {
        cells.insert(Position::new(px, py), Cell::new(x, 8));
        teams.credit(x);
    }

    let props = Properties {
        to_kill: 3,
        death_age: 8,
        ..Properties::default()
    };
    let mut sim = Simulation::new(props, cells, teams);
    sim.step();

    assert!(!sim.cells.contains(Position::new(1, 1)));
    let x_team = sim.teams.get(x).expect("X still alive");
    assert_eq!(x_team.score, 3);
    assert_scores_match_population(&sim);
}

#[test]
fn test_rendering_is_idempotent_and_matches_population() {
    let dir = write_game(
        "warlife_it_render",
        "width:10\nheight:10\n",
        "3X7.\n10.\n7.3O\n",
    );

    let sim = loader::load_game(&dir).unwrap();
    let first = sim.grid();
    let second = sim.grid();
    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());

    let drawn = first
        .rows()
        .iter()
        .flatten()
        .filter(|&&symbol| symbol != '.')
        .count();
    assert_eq!(drawn, sim.cells.len());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_config_errors_carry_the_offending_path() {
    let dir = write_game(
        "warlife_it_bad_config",
        "width:5\nheight:10\n",
        "10X\n",
    );

    let err = loader::load_game(&dir).unwrap_err();
    match err {
        LoadError::Config(path, source) => {
            assert!(path.to_string_lossy().ends_with("game.config"));
            assert!(source.to_string().contains("width"));
        }
        other => panic!("expected a config error, got {}", other),
    }

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_killed_position_changes_hands_across_generations() {
    // Round 1 kills the O cell at (1, 1); the position stays empty that
    // round and falls to X in round 2.
    let mut teams = TeamRegistry::new();
    let x = teams.register('X');
    let o = teams.register('O');

    let mut cells = CellStore::new(10, 10);
    for &(px, py) in &[(0, 0), (1, 0), (2, 0)] {
        cells.insert(Position::new(px, py), Cell::new(x, 9));
        teams.credit(x);
    }
    for &(px, py) in &[(1, 1), (8, 8)] {
        cells.insert(Position::new(px, py), Cell::new(o, 9));
        teams.credit(o);
    }

    let props = Properties {
        to_kill: 3,
        death_age: 9,
        ..Properties::default()
    };
    let mut sim = Simulation::new(props, cells, teams);

    sim.step();
    assert!(!sim.cells.contains(Position::new(1, 1)));

    sim.step();
    assert_eq!(sim.cells.get(Position::new(1, 1)).unwrap().team, x);
    assert_scores_match_population(&sim);
}

#[test]
fn test_converted_grid_loads_and_runs() {
    let dir = std::env::temp_dir().join("warlife_it_convert");
    fs::create_dir_all(&dir).unwrap();
    let grid_path = dir.join("battle.grid");
    fs::write(
        &grid_path,
        "XXX.........\n\
         ............\n\
         ............\n\
         ............\n\
         ............\n\
         ............\n\
         ............\n\
         ............\n\
         ............\n\
         .........OOO\n",
    )
    .unwrap();

    warlife::convert::convert(&grid_path).unwrap();

    let mut sim = loader::load_game(&dir).unwrap();
    assert_eq!(sim.props.width, 12);
    assert_eq!(sim.props.height, 10);
    assert_eq!(sim.teams.len(), 2);
    assert_eq!(sim.cells.len(), 6);

    sim.step();
    sim.step();
    assert_scores_match_population(&sim);
    assert!(!sim.cells.is_empty());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_run_round_limit_picks_the_higher_score() {
    let mut teams = TeamRegistry::new();
    let x = teams.register('X');
    let o = teams.register('O');

    // Five X cells and three O cells, all isolated: nothing dies young,
    // nothing revives, so the limit decides.
    let mut cells = CellStore::new(20, 20);
    for &(px, py) in &[(0, 0), (3, 0), (6, 0), (9, 0), (12, 0)] {
        cells.insert(Position::new(px, py), Cell::new(x, 32));
        teams.credit(x);
    }
    for &(px, py) in &[(0, 10), (3, 10), (6, 10)] {
        cells.insert(Position::new(px, py), Cell::new(o, 32));
        teams.credit(o);
    }

    let props = Properties {
        win_round: 1,
        ..Properties::default()
    };
    let mut sim = Simulation::new(props, cells, teams);
    sim.step();

    assert!(sim.finished());
    let winner = sim.winner().expect("two teams at the limit");
    assert_eq!(winner.symbol, 'X');
    assert_eq!(winner.score, 5);
}
