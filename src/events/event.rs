//! Game event types.

use serde::{Deserialize, Serialize};

use crate::core::{Action, Cell, PlayerId, Token};

/// How a token changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenChange {
    Add,
    Remove,
    /// The token left another cell and now sits on `cell`.
    Move,
}

/// What happened to a point of interest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoiEventKind {
    Placed,
    Rescued,
    Killed,
}

impl PoiEventKind {
    /// Did this event take the POI off the board for good?
    #[must_use]
    pub const fn is_removal(self) -> bool {
        matches!(self, PoiEventKind::Rescued | PoiEventKind::Killed)
    }
}

/// Phases of a turn, in the order they run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    #[default]
    Move,
    AdvanceFire,
    SmokeToFire,
    ClearEdgeFire,
    PlacePoi,
}

impl TurnPhase {
    /// All phases in cyclic order.
    pub const CYCLE: [TurnPhase; 5] = [
        TurnPhase::Move,
        TurnPhase::AdvanceFire,
        TurnPhase::SmokeToFire,
        TurnPhase::ClearEdgeFire,
        TurnPhase::PlacePoi,
    ];

    /// The phase that follows this one. `PlacePoi` wraps to the next
    /// player's `Move`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            TurnPhase::Move => TurnPhase::AdvanceFire,
            TurnPhase::AdvanceFire => TurnPhase::SmokeToFire,
            TurnPhase::SmokeToFire => TurnPhase::ClearEdgeFire,
            TurnPhase::ClearEdgeFire => TurnPhase::PlacePoi,
            TurnPhase::PlacePoi => TurnPhase::Move,
        }
    }
}

/// An event published by the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    TokenChanged {
        cell: Cell,
        token: Token,
        change: TokenChange,
    },
    Poi {
        token: Token,
        kind: PoiEventKind,
    },
    TurnPhaseChanged {
        phase: TurnPhase,
    },
    ApChanged {
        player: PlayerId,
        ap: u32,
    },
    DiceRolled {
        sides: u32,
        value: u32,
    },
    /// The legal actions of the active player were recomputed.
    LegalActionsChanged {
        actions: Vec<Action>,
    },
}

impl GameEvent {
    /// Short name of the variant, for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            GameEvent::TokenChanged { .. } => "TokenChanged",
            GameEvent::Poi { .. } => "Poi",
            GameEvent::TurnPhaseChanged { .. } => "TurnPhaseChanged",
            GameEvent::ApChanged { .. } => "ApChanged",
            GameEvent::DiceRolled { .. } => "DiceRolled",
            GameEvent::LegalActionsChanged { .. } => "LegalActionsChanged",
        }
    }

    /// The POI event kind, if this is a POI event.
    #[must_use]
    pub fn poi_kind(&self) -> Option<PoiEventKind> {
        match self {
            GameEvent::Poi { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
