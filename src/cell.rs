//! Sparse cell population and neighborhood queries.

use std::collections::HashMap;

use crate::team::TeamId;

/// A coordinate on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    #[inline]
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// A live cell: the team holding it and the rounds it has left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub team: TeamId,
    pub lifespan: u32,
}

impl Cell {
    #[inline]
    pub fn new(team: TeamId, lifespan: u32) -> Self {
        Self { team, lifespan }
    }
}

/// The cell population of one generation: a sparse map from position to
/// live cell, owning the board bounds. At most one cell per position.
#[derive(Clone, Debug)]
pub struct CellStore {
    width: u16,
    height: u16,
    cells: HashMap<Position, Cell>,
}

impl CellStore {
    /// Create an empty population for a `width` x `height` board.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: HashMap::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn insert(&mut self, pos: Position, cell: Cell) {
        self.cells.insert(pos, cell);
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Option<&Cell> {
        self.cells.get(&pos)
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains_key(&pos)
    }

    #[inline]
    pub fn remove(&mut self, pos: Position) -> Option<Cell> {
        self.cells.remove(&pos)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate the population in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells.iter().map(|(&pos, &cell)| (pos, cell))
    }

    /// The bounded 8-neighborhood of a position, split into live cells and
    /// empty positions. Offsets falling outside the board are skipped, so a
    /// corner position reports exactly three neighbours.
    pub fn neighbors(&self, pos: Position) -> (Vec<(Position, Cell)>, Vec<Position>) {
        let mut alive = Vec::with_capacity(8);
        let mut dead = Vec::with_capacity(8);

        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = pos.x as i32 + dx;
                let ny = pos.y as i32 + dy;
                if nx < 0 || ny < 0 || nx >= self.width as i32 || ny >= self.height as i32 {
                    continue;
                }
                let npos = Position::new(nx as u16, ny as u16);
                match self.cells.get(&npos) {
                    Some(&cell) => alive.push((npos, cell)),
                    None => dead.push(npos),
                }
            }
        }

        (alive, dead)
    }
}
