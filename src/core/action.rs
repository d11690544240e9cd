//! Player actions.
//!
//! An action is an immutable value: who acts, where they go, what kind of
//! move it is, and what it costs. Kinds carry a default cost; a rules
//! variant may price an action differently with `Action::with_cost`.
//!
//! Carrying a victim into fire is not a kind at all. It is never offered,
//! so it cannot be chosen regardless of how much AP a player holds.

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::player::PlayerId;

/// The kind of move an action performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Move,
    MoveIntoSmoke,
    MoveIntoFire,
    MoveWithVictim,
}

impl ActionKind {
    /// Default AP cost.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            ActionKind::Move => 1,
            ActionKind::MoveIntoSmoke => 1,
            ActionKind::MoveIntoFire => 2,
            ActionKind::MoveWithVictim => 2,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ActionKind::Move => "Move",
            ActionKind::MoveIntoSmoke => "Move into smoke",
            ActionKind::MoveIntoFire => "Move into fire",
            ActionKind::MoveWithVictim => "Carry victim",
        }
    }

    /// Does this action carry the victim from the actor's cell?
    #[must_use]
    pub const fn carries_victim(self) -> bool {
        matches!(self, ActionKind::MoveWithVictim)
    }
}

/// A complete player action.
///
/// ```
/// use fire_rescue::core::{Action, ActionKind, Cell, PlayerId};
///
/// let step = Action::new(PlayerId::new(0), Cell::new(4, 5), ActionKind::MoveIntoFire);
/// assert_eq!(step.ap_cost, 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// The acting player.
    pub actor: PlayerId,

    /// Destination cell.
    pub target: Cell,

    pub kind: ActionKind,

    /// AP deducted when the action succeeds.
    pub ap_cost: u32,
}

impl Action {
    /// Create an action at the kind's default cost.
    #[must_use]
    pub const fn new(actor: PlayerId, target: Cell, kind: ActionKind) -> Self {
        Self {
            actor,
            target,
            kind,
            ap_cost: kind.cost(),
        }
    }

    /// Create an action with an explicit cost.
    #[must_use]
    pub const fn with_cost(actor: PlayerId, target: Cell, kind: ActionKind, ap_cost: u32) -> Self {
        Self {
            actor,
            target,
            kind,
            ap_cost,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} to {} ({} AP)",
            self.actor,
            self.kind.name(),
            self.target,
            self.ap_cost
        )
    }
}

/// A performed action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            action,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_costs() {
        assert_eq!(ActionKind::Move.cost(), 1);
        assert_eq!(ActionKind::MoveIntoSmoke.cost(), 1);
        assert_eq!(ActionKind::MoveIntoFire.cost(), 2);
        assert_eq!(ActionKind::MoveWithVictim.cost(), 2);
    }

    #[test]
    fn test_action_new_uses_kind_cost() {
        let action = Action::new(PlayerId::new(1), Cell::new(2, 3), ActionKind::MoveWithVictim);
        assert_eq!(action.ap_cost, 2);
        assert!(action.kind.carries_victim());
    }

    #[test]
    fn test_action_with_cost() {
        let action = Action::with_cost(PlayerId::new(0), Cell::new(1, 1), ActionKind::Move, 4);
        assert_eq!(action.ap_cost, 4);
        assert_eq!(action.kind, ActionKind::Move);
    }

    #[test]
    fn test_action_display() {
        let action = Action::new(PlayerId::new(0), Cell::new(4, 5), ActionKind::Move);
        assert_eq!(format!("{}", action), "Player 0: Move to (4,5) (1 AP)");
    }

    #[test]
    fn test_action_record_serialization() {
        let action = Action::new(PlayerId::new(1), Cell::new(3, 3), ActionKind::MoveIntoFire);
        let record = ActionRecord::new(action, 2, 3);

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
