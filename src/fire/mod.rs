//! Fire and smoke propagation.
//!
//! Once per turn the fire advances on a dice-chosen cell:
//!
//! 1. **Ignite** the target. Nothing becomes smoke, smoke becomes fire, and
//!    fire explodes outward in each direction.
//! 2. **Diffuse**: every smoke region touching fire turns to fire.
//! 3. **Clear edges**: threats on the outer ring are removed.
//!
//! Walls do not stop fire. Each step is exposed on its own so the turn
//! controller can announce a phase between them; [`advance_fire`] runs all
//! three in order.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::VecDeque;

use crate::board::Board;
use crate::core::{Cell, Direction, Threat};

/// What igniting a cell did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ignition {
    /// An empty cell filled with smoke.
    Smoke,
    /// Smoke turned into fire.
    Fire,
    /// The cell was already burning. Lists the cells where new fire landed,
    /// one per direction that was not already burning to the edge.
    Explosion { landed: SmallVec<[Cell; 4]> },
}

/// Summary of one full fire advance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireSpread {
    pub target: Cell,
    pub ignition: Ignition,
    /// Smoke cells converted to fire, sorted.
    pub diffused: Vec<Cell>,
    /// Threat tokens removed from the edge ring.
    pub cleared: usize,
}

/// Ignite `target`.
///
/// Panics if `target` is off the board.
///
/// ```
/// use fire_rescue::board::Board;
/// use fire_rescue::core::{BoardSize, Cell, Threat};
/// use fire_rescue::fire::{ignite, Ignition};
///
/// let mut board = Board::new(BoardSize::new(10, 8));
/// let cell = Cell::new(4, 4);
/// assert_eq!(ignite(&mut board, cell), Ignition::Smoke);
/// assert_eq!(ignite(&mut board, cell), Ignition::Fire);
/// assert_eq!(board.threat_at(cell), Some(Threat::Fire));
/// ```
pub fn ignite(board: &mut Board, target: Cell) -> Ignition {
    match board.threat_at(target) {
        None => {
            board.set_threat(target, Threat::Smoke);
            Ignition::Smoke
        }
        Some(Threat::Smoke) => {
            board.set_threat(target, Threat::Fire);
            Ignition::Fire
        }
        Some(Threat::Fire) => Ignition::Explosion {
            landed: explode(board, target),
        },
    }
}

/// Push fire outward from a burning `centre` in every direction.
///
/// Each walk starts at the neighbor and moves on while the cell burns. The
/// first cell that is not burning (empty or smoke) catches fire. A walk that
/// runs into the board edge while still on fire stops there: the edge cell
/// already holds the fire. Directions leading straight off the board from
/// `centre` are skipped.
fn explode(board: &mut Board, centre: Cell) -> SmallVec<[Cell; 4]> {
    let size = board.size();
    let mut landed = SmallVec::new();

    for dir in Direction::ALL {
        let Some(mut cursor) = size.step(centre, dir) else {
            continue;
        };
        loop {
            if !board.is_fire_at(cursor) {
                board.set_threat(cursor, Threat::Fire);
                log::debug!("Explosion from {} heading {} landed at {}", centre, dir, cursor);
                landed.push(cursor);
                break;
            }
            match size.step(cursor, dir) {
                Some(next) => cursor = next,
                None => break,
            }
        }
    }
    landed
}

/// Turn every smoke region that touches fire into fire.
///
/// Breadth-first over smoke cells, seeded from the neighbors of every
/// burning cell. A region converts entirely iff one of its cells borders
/// fire, so the result does not depend on visit order. Returns the
/// converted cells, sorted.
pub fn smoke_into_fire(board: &mut Board) -> Vec<Cell> {
    let mut visited: FxHashSet<Cell> = FxHashSet::default();
    let mut to_visit: VecDeque<Cell> = board
        .cells_with(Threat::Fire)
        .into_iter()
        .flat_map(|fire| board.adjacent_cells(fire))
        .filter(|&cell| board.threat_at(cell) == Some(Threat::Smoke))
        .collect();

    let mut converted = Vec::new();
    while let Some(cell) = to_visit.pop_front() {
        if !visited.insert(cell) {
            continue;
        }
        if board.threat_at(cell) != Some(Threat::Smoke) {
            continue;
        }

        board.set_threat(cell, Threat::Fire);
        log::trace!("Smoke at {} caught fire", cell);
        converted.push(cell);

        to_visit.extend(
            board
                .adjacent_cells(cell)
                .into_iter()
                .filter(|&next| board.threat_at(next) == Some(Threat::Smoke))
                .filter(|next| !visited.contains(next)),
        );
    }

    converted.sort();
    converted
}

/// Remove smoke and fire from the outer ring. Returns how many were removed.
pub fn remove_fire_from_edges(board: &mut Board) -> usize {
    let edges: Vec<Cell> = board.size().edge_cells().collect();
    edges
        .into_iter()
        .filter(|&cell| board.remove_threat_at(cell).is_some())
        .count()
}

/// Run ignite, diffusion and edge clearing on `target`, in that order.
pub fn advance_fire(board: &mut Board, target: Cell) -> FireSpread {
    let ignition = ignite(board, target);
    let diffused = smoke_into_fire(board);
    let cleared = remove_fire_from_edges(board);
    FireSpread {
        target,
        ignition,
        diffused,
        cleared,
    }
}
