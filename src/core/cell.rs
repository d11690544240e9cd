//! Board geometry: cells, directions, and board dimensions.
//!
//! ## Cell
//!
//! A cell is an `(x, y)` pair with `x` growing east and `y` growing south.
//! Cells carry no bounds themselves; `BoardSize` decides whether a cell
//! lies on the board.
//!
//! ## Direction
//!
//! The four cardinal directions. Neighbor enumeration always follows
//! `Direction::ALL` so that every walk over the board is deterministic.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Board coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: u16,
    pub y: u16,
}

impl Cell {
    /// Create a new cell.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Direction of travel from `self` to an orthogonally adjacent `other`.
    ///
    /// Returns `None` if the cells are not 4-neighbors.
    #[must_use]
    pub fn direction_to(self, other: Cell) -> Option<Direction> {
        let dx = i32::from(other.x) - i32::from(self.x);
        let dy = i32::from(other.y) - i32::from(self.y);
        match (dx, dy) {
            (0, -1) => Some(Direction::North),
            (0, 1) => Some(Direction::South),
            (1, 0) => Some(Direction::East),
            (-1, 0) => Some(Direction::West),
            _ => None,
        }
    }
}

impl From<(u16, u16)> for Cell {
    fn from((x, y): (u16, u16)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Cardinal direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All directions, in the order explosions and neighbor scans visit them.
    pub const ALL: [Direction; 4] = [
        Direction::West,
        Direction::East,
        Direction::North,
        Direction::South,
    ];

    /// Unit offset `(dx, dy)` for one step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// The direction pointing back.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Single-letter code used by board layouts (`N`, `S`, `E`, `W`).
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
            Direction::East => 'E',
            Direction::West => 'W',
        }
    }

    /// Parse a layout letter. Lowercase letters are accepted.
    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'N' => Some(Direction::North),
            'S' => Some(Direction::South),
            'E' => Some(Direction::East),
            'W' => Some(Direction::West),
            _ => None,
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Direction::North => 0b0001,
            Direction::South => 0b0010,
            Direction::East => 0b0100,
            Direction::West => 0b1000,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Compact set of directions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectionSet(u8);

impl DirectionSet {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build a set from a slice of directions.
    #[must_use]
    pub fn from_slice(dirs: &[Direction]) -> Self {
        dirs.iter().fold(Self::empty(), |set, &d| set.with(d))
    }

    /// Return a copy with `dir` added.
    #[must_use]
    pub const fn with(self, dir: Direction) -> Self {
        Self(self.0 | dir.bit())
    }

    pub fn insert(&mut self, dir: Direction) {
        self.0 |= dir.bit();
    }

    pub fn remove(&mut self, dir: Direction) {
        self.0 &= !dir.bit();
    }

    #[must_use]
    pub const fn contains(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate the members in `Direction::ALL` order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&d| self.contains(d))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |set, d| set.with(d))
    }
}

/// Up to four in-bounds neighbors of a cell.
pub type Neighbors = SmallVec<[Cell; 4]>;

/// Fixed board dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSize {
    pub width: u16,
    pub height: u16,
}

impl BoardSize {
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Check whether `cell` lies on the board.
    #[must_use]
    pub const fn contains(self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Check whether `cell` lies on the outer ring of the board.
    #[must_use]
    pub const fn is_edge(self, cell: Cell) -> bool {
        self.contains(cell)
            && (cell.x == 0 || cell.y == 0 || cell.x + 1 == self.width || cell.y + 1 == self.height)
    }

    /// Panic unless `cell` lies on the board.
    pub fn assert_contains(self, cell: Cell) {
        assert!(
            self.contains(cell),
            "Cell {} out of bounds for {}x{} board",
            cell,
            self.width,
            self.height
        );
    }

    /// One step from `cell` toward `dir`, or `None` if that leaves the board.
    #[must_use]
    pub fn step(self, cell: Cell, dir: Direction) -> Option<Cell> {
        let (dx, dy) = dir.delta();
        let x = cell.x.checked_add_signed(dx as i16)?;
        let y = cell.y.checked_add_signed(dy as i16)?;
        let next = Cell::new(x, y);
        self.contains(next).then_some(next)
    }

    /// The in-bounds 4-neighbors of `cell`.
    #[must_use]
    pub fn neighbors(self, cell: Cell) -> Neighbors {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| self.step(cell, dir))
            .collect()
    }

    /// Total number of cells.
    #[must_use]
    pub const fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Iterate every cell, row by row.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
    }

    /// Iterate the outer ring of cells, row by row.
    pub fn edge_cells(self) -> impl Iterator<Item = Cell> {
        self.cells().filter(move |&c| self.is_edge(c))
    }
}

impl std::fmt::Display for BoardSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
