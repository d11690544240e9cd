//! The board: walls and token occupancy.

mod grid;
mod walls;

pub use grid::Board;
pub use walls::WallTable;
