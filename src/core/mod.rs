//! Core engine types: geometry, tokens, players, actions, RNG, configuration.
//!
//! Everything else in the crate is built from these values.

pub mod cell;
pub mod token;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;

pub use cell::{BoardSize, Cell, Direction, DirectionSet, Neighbors};
pub use token::{Layer, Poi, PoiFace, Threat, Token, TokenId, TokenKind};
pub use player::{Colour, PlayerId, PlayerMap, PlayerSetup};
pub use rng::{DieResult, GameRng, Roller};
pub use config::RescueConfig;
pub use action::{Action, ActionKind, ActionRecord};
pub use error::{ConfigError, ConfigResult, RuleRejection};
