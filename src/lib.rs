//! # fire-rescue
//!
//! Board simulation engine for a cooperative fire rescue game.
//!
//! Players move across a walled grid, fire and smoke spread and explode,
//! points of interest hide victims or false alarms, and every move costs
//! action points.
//!
//! ## Design Principles
//!
//! 1. **One source of truth**: the `Board` owns every token and keeps its
//!    layer indices in step through a single mutation path.
//!
//! 2. **Deterministic**: all randomness flows through the `Roller` trait.
//!    The default `GameRng` is seeded, so a seed replays a whole game.
//!
//! 3. **Rules say no with values**: a refused action returns a
//!    `RuleRejection` and changes nothing. Caller bugs panic.
//!
//! ## Modules
//!
//! - `core`: cells, tokens, players, actions, RNG, configuration, errors
//! - `board`: wall table and token occupancy
//! - `fire`: ignition, explosions, smoke diffusion, edge clearing
//! - `poi`: the POI deck and its placement
//! - `rules`: offered actions, validation, AP ledger
//! - `events`: event types and the subscriber bus
//! - `game`: turn controller and builder
//!
//! ## Example
//!
//! ```
//! use fire_rescue::core::{Colour, PlayerSetup, RescueConfig};
//! use fire_rescue::game::GameBuilder;
//!
//! let mut game = GameBuilder::new(RescueConfig::default().with_seed(42))
//!     .player(PlayerSetup::new("Ash", Colour::RED))
//!     .build()
//!     .unwrap();
//! game.start();
//!
//! let first = game.legal_actions()[0];
//! game.perform_action(first).unwrap();
//! let report = game.end_turn();
//! assert_eq!(report.next_player, game.current_player_id());
//! ```

pub mod core;
pub mod board;
pub mod fire;
pub mod poi;
pub mod rules;
pub mod events;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionKind, ActionRecord, BoardSize, Cell, ConfigError, ConfigResult, Direction,
    GameRng, PlayerId, PlayerSetup, RescueConfig, Roller, RuleRejection, Threat, Token, TokenId,
    TokenKind,
};

pub use crate::board::{Board, WallTable};

pub use crate::fire::{FireSpread, Ignition};

pub use crate::poi::{PoiDeck, PoiManager};

pub use crate::rules::{ActionOutcome, ActionResolver, Player};

pub use crate::events::{EventBus, GameEvent, PoiEventKind, SubscriptionId, TokenChange, TurnPhase};

pub use crate::game::{Game, GameBuilder, TurnReport};
