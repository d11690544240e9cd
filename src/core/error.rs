//! Error types.
//!
//! Two kinds of failure are values here:
//!
//! - `ConfigError`: the game cannot be built from the given setup.
//! - `RuleRejection`: a command was refused by the game rules. Nothing on
//!   the board or in any player's AP changed.
//!
//! Caller bugs (out-of-bounds cells, non-adjacent movement queries, tokens
//! that are not on the board) are not errors: they panic.

use thiserror::Error;

use super::action::ActionKind;
use super::cell::{BoardSize, Cell};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board {width}x{height} is too small, both sides need at least 3 cells")]
    BoardTooSmall { width: u16, height: u16 },
    #[error("Cannot start a game with no players")]
    NoPlayers,
    #[error("Cannot start a game with {0} players")]
    TooManyPlayers(usize),
    #[error("{players} players do not fit in an interior of {interior} cells")]
    NotEnoughRoom { players: usize, interior: usize },
    #[error("Initial POI count {initial} exceeds the deck of {deck}")]
    InitialPoiExceedsDeck { initial: usize, deck: usize },
    #[error("Wall table is {table} but the board is {board}")]
    WallTableMismatch { table: BoardSize, board: BoardSize },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RuleRejection {
    #[error("Action needs {needed} AP but only {available} available")]
    InsufficientAp { needed: u32, available: u32 },
    #[error("Cannot move to {0}")]
    DestinationBlocked(Cell),
    #[error("Victim cannot be carried to {0}")]
    VictimBlocked(Cell),
    #[error("A move to {target} must be {expected:?}")]
    WrongKind { target: Cell, expected: ActionKind },
    #[error("No victim to carry")]
    NoVictim,
    #[error("Action belongs to another player")]
    NotYourTurn,
    #[error("POI deck is exhausted")]
    DeckExhausted,
    #[error("POI cannot be placed at {0}")]
    PoiRejected(Cell),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = RuleRejection::InsufficientAp { needed: 4, available: 3 };
        assert_eq!(err.to_string(), "Action needs 4 AP but only 3 available");

        let err = ConfigError::WallTableMismatch {
            table: BoardSize::new(8, 6),
            board: BoardSize::new(10, 8),
        };
        assert_eq!(err.to_string(), "Wall table is 8x6 but the board is 10x8");
    }
}
