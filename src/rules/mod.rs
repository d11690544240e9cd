//! Movement rules and the per-player AP ledger.
//!
//! `ActionResolver` decides which moves a player is offered and applies the
//! one they choose. It never touches turn order or fire; that is the game's
//! job.

mod player;
mod resolver;

pub use player::Player;
pub use resolver::{ActionOutcome, ActionResolver};
