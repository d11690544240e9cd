//! Wall passability.
//!
//! `WallTable` records, for every cell, which directions are blocked when
//! leaving that cell. Walls are one-way in this model: blocking east out of
//! `(2,3)` says nothing about west out of `(3,3)`. Use
//! [`WallTable::add_wall_between`] for an ordinary two-sided wall.
//!
//! The core never reads layout files. Hosts build a table from whatever
//! source they have, typically with [`WallTable::from_codes`].

use serde::{Deserialize, Serialize};

use crate::core::{BoardSize, Cell, Direction, DirectionSet};

/// Per-(cell, direction) passability table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallTable {
    size: BoardSize,
    blocked: Vec<DirectionSet>,
}

impl WallTable {
    /// A table with no walls at all.
    #[must_use]
    pub fn open(size: BoardSize) -> Self {
        Self {
            size,
            blocked: vec![DirectionSet::empty(); size.area()],
        }
    }

    /// Build a table from a function giving each cell's blocked directions.
    pub fn from_fn(size: BoardSize, mut blocked: impl FnMut(Cell) -> DirectionSet) -> Self {
        let mut table = Self::open(size);
        for cell in size.cells() {
            let idx = table.index(cell);
            table.blocked[idx] = blocked(cell);
        }
        table
    }

    /// Build a table from per-cell layout codes such as `"NW"` or `""`.
    ///
    /// Characters other than `N`, `S`, `E`, `W` are skipped with a warning.
    ///
    /// ```
    /// use fire_rescue::board::WallTable;
    /// use fire_rescue::core::{BoardSize, Cell, Direction};
    ///
    /// let walls = WallTable::from_codes(BoardSize::new(3, 3), |c| {
    ///     if c == Cell::new(1, 1) { "NE".to_string() } else { String::new() }
    /// });
    /// assert!(!walls.is_passable(Cell::new(1, 1), Direction::North));
    /// assert!(walls.is_passable(Cell::new(1, 1), Direction::South));
    /// ```
    pub fn from_codes<S: AsRef<str>>(size: BoardSize, mut codes: impl FnMut(Cell) -> S) -> Self {
        Self::from_fn(size, |cell| {
            let code = codes(cell);
            code.as_ref()
                .chars()
                .filter_map(|ch| {
                    let dir = Direction::from_code(ch);
                    if dir.is_none() {
                        log::warn!("Ignoring unknown wall code {:?} at {}", ch, cell);
                    }
                    dir
                })
                .collect()
        })
    }

    /// Board dimensions this table covers.
    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    fn index(&self, cell: Cell) -> usize {
        self.size.assert_contains(cell);
        cell.y as usize * self.size.width as usize + cell.x as usize
    }

    /// Can a token leave `cell` heading `dir`?
    ///
    /// Panics if `cell` is off the board.
    #[must_use]
    pub fn is_passable(&self, cell: Cell, dir: Direction) -> bool {
        !self.blocked[self.index(cell)].contains(dir)
    }

    /// Directions blocked when leaving `cell`.
    #[must_use]
    pub fn blocked_directions(&self, cell: Cell) -> DirectionSet {
        self.blocked[self.index(cell)]
    }

    /// Block movement out of `cell` toward `dir` only.
    pub fn add_wall(&mut self, cell: Cell, dir: Direction) {
        let idx = self.index(cell);
        self.blocked[idx].insert(dir);
    }

    /// Open movement out of `cell` toward `dir`.
    pub fn remove_wall(&mut self, cell: Cell, dir: Direction) {
        let idx = self.index(cell);
        self.blocked[idx].remove(dir);
    }

    /// Block the shared edge of two adjacent cells in both directions.
    ///
    /// Panics if the cells are not adjacent.
    pub fn add_wall_between(&mut self, a: Cell, b: Cell) {
        let dir = a
            .direction_to(b)
            .unwrap_or_else(|| panic!("Cells {} and {} are not adjacent", a, b));
        self.add_wall(a, dir);
        self.add_wall(b, dir.opposite());
    }

    /// True if every blocked edge between two board cells is blocked from
    /// both sides.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.size.cells().all(|cell| {
            Direction::ALL.into_iter().all(|dir| match self.size.step(cell, dir) {
                Some(next) => self.is_passable(cell, dir) == self.is_passable(next, dir.opposite()),
                None => true,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_table() {
        let walls = WallTable::open(BoardSize::new(4, 4));
        for cell in walls.size().cells() {
            assert!(walls.blocked_directions(cell).is_empty());
        }
        assert!(walls.is_symmetric());
    }

    #[test]
    fn test_one_way_wall() {
        let mut walls = WallTable::open(BoardSize::new(4, 4));
        walls.add_wall(Cell::new(1, 1), Direction::East);

        assert!(!walls.is_passable(Cell::new(1, 1), Direction::East));
        assert!(walls.is_passable(Cell::new(2, 1), Direction::West));
        assert!(!walls.is_symmetric());

        walls.remove_wall(Cell::new(1, 1), Direction::East);
        assert!(walls.is_passable(Cell::new(1, 1), Direction::East));
    }

    #[test]
    fn test_wall_between() {
        let mut walls = WallTable::open(BoardSize::new(4, 4));
        walls.add_wall_between(Cell::new(1, 1), Cell::new(1, 2));

        assert!(!walls.is_passable(Cell::new(1, 1), Direction::South));
        assert!(!walls.is_passable(Cell::new(1, 2), Direction::North));
        assert!(walls.is_symmetric());
    }

    #[test]
    fn test_from_codes_skips_unknown() {
        let walls = WallTable::from_codes(BoardSize::new(3, 3), |c| {
            if c == Cell::new(0, 0) { "nw?" } else { "" }
        });
        let blocked = walls.blocked_directions(Cell::new(0, 0));
        assert_eq!(blocked.len(), 2);
        assert!(blocked.contains(Direction::North));
        assert!(blocked.contains(Direction::West));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_out_of_bounds_panics() {
        let walls = WallTable::open(BoardSize::new(3, 3));
        let _ = walls.is_passable(Cell::new(3, 0), Direction::North);
    }

    #[test]
    #[should_panic(expected = "not adjacent")]
    fn test_wall_between_non_adjacent_panics() {
        let mut walls = WallTable::open(BoardSize::new(3, 3));
        walls.add_wall_between(Cell::new(0, 0), Cell::new(2, 2));
    }
}
