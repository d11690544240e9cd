//! Token identity and kinds.
//!
//! Every object on the board (player figure, smoke, fire, point of interest,
//! wall marker) is a `Token` with a unique `TokenId`. Two tokens are never
//! the same token just because their kinds match: identity is the id.
//!
//! ## Layers
//!
//! Player, threat and POI tokens each live in their own board layer, and a
//! cell holds at most one token per layer. Wall markers have no layer.

use serde::{Deserialize, Serialize};

use super::cell::DirectionSet;
use super::player::{Colour, PlayerId};

/// Unique identifier for a token.
///
/// Ids are allocated by the `Board` and never reused within a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub u32);

impl TokenId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token({})", self.0)
    }
}

/// Smoke or fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Threat {
    Smoke,
    Fire,
}

/// What a point of interest turns out to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoiFace {
    Blank,
    Victim,
}

/// A point of interest, face down or face up.
///
/// `flip` is one-way: a revealed POI stays revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Poi {
    Hidden(PoiFace),
    Revealed(PoiFace),
}

impl Poi {
    /// The revealed counterpart of this POI.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Poi::Hidden(face) | Poi::Revealed(face) => Poi::Revealed(face),
        }
    }

    #[must_use]
    pub const fn is_hidden(self) -> bool {
        matches!(self, Poi::Hidden(_))
    }

    #[must_use]
    pub const fn is_revealed_victim(self) -> bool {
        matches!(self, Poi::Revealed(PoiFace::Victim))
    }

    /// The face, known or not.
    #[must_use]
    pub const fn face(self) -> PoiFace {
        match self {
            Poi::Hidden(face) | Poi::Revealed(face) => face,
        }
    }
}

/// Board layer a token occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Player,
    Threat,
    Poi,
}

/// The variant-specific payload of a token.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// A player's figure. Exactly one per player, never destroyed.
    Player {
        player: PlayerId,
        name: String,
        colour: Colour,
    },
    Threat(Threat),
    Poi(Poi),
    /// Wall marker for views: the directions blocked out of its cell.
    Wall { blocked: DirectionSet },
}

impl TokenKind {
    /// The layer this kind lives in, if any.
    #[must_use]
    pub const fn layer(&self) -> Option<Layer> {
        match self {
            TokenKind::Player { .. } => Some(Layer::Player),
            TokenKind::Threat(_) => Some(Layer::Threat),
            TokenKind::Poi(_) => Some(Layer::Poi),
            TokenKind::Wall { .. } => None,
        }
    }
}

/// An identity-bearing board token.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub kind: TokenKind,
}

impl Token {
    #[must_use]
    pub fn layer(&self) -> Option<Layer> {
        self.kind.layer()
    }

    /// The threat this token represents, if it is one.
    #[must_use]
    pub fn threat(&self) -> Option<Threat> {
        match self.kind {
            TokenKind::Threat(t) => Some(t),
            _ => None,
        }
    }

    /// The POI state of this token, if it is one.
    #[must_use]
    pub fn poi(&self) -> Option<Poi> {
        match self.kind {
            TokenKind::Poi(p) => Some(p),
            _ => None,
        }
    }

    /// The owning player, if this is a player token.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self.kind {
            TokenKind::Player { player, .. } => Some(player),
            _ => None,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            TokenKind::Player { name, .. } => write!(f, "{} [{}]", self.id, name),
            TokenKind::Threat(t) => write!(f, "{} [{:?}]", self.id, t),
            TokenKind::Poi(p) => write!(f, "{} [{:?}]", self.id, p),
            TokenKind::Wall { .. } => write!(f, "{} [Wall]", self.id),
        }
    }
}
