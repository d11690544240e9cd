//! Points of interest: the shuffled deck and its placement on the board.
//!
//! A POI goes face down onto a random interior cell. A player stepping onto
//! it flips it: blanks are cleared at once, victims stay until carried to
//! the edge of the board.

mod deck;
mod manager;

pub use deck::PoiDeck;
pub use manager::PoiManager;
