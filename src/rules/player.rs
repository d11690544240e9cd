//! Per-player state: the figure on the board and the AP ledger.

use serde::{Deserialize, Serialize};

use crate::core::{Colour, PlayerId, PlayerSetup, RuleRejection, TokenId};

/// A player in the game.
///
/// AP has no upper bound. It grows by the per-turn allowance and shrinks
/// only when an action succeeds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,

    /// The player's figure on the board.
    pub token: TokenId,

    pub name: String,
    pub colour: Colour,
    ap: u32,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, token: TokenId, setup: &PlayerSetup) -> Self {
        Self {
            id,
            token,
            name: setup.name.clone(),
            colour: setup.colour,
            ap: 0,
        }
    }

    #[must_use]
    pub fn ap(&self) -> u32 {
        self.ap
    }

    #[must_use]
    pub fn can_afford(&self, cost: u32) -> bool {
        cost <= self.ap
    }

    /// Deduct `cost`, or refuse without touching the balance.
    pub fn spend(&mut self, cost: u32) -> Result<u32, RuleRejection> {
        if !self.can_afford(cost) {
            return Err(RuleRejection::InsufficientAp {
                needed: cost,
                available: self.ap,
            });
        }
        self.ap -= cost;
        Ok(self.ap)
    }

    /// Add AP on top of whatever is left over.
    pub fn grant(&mut self, amount: u32) -> u32 {
        self.ap = self.ap.saturating_add(amount);
        self.ap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(PlayerId::new(0), TokenId(0), &PlayerSetup::new("Ash", Colour::RED))
    }

    #[test]
    fn test_spend_and_grant() {
        let mut p = player();
        assert_eq!(p.ap(), 0);
        assert_eq!(p.grant(3), 3);
        assert_eq!(p.spend(2), Ok(1));
        assert_eq!(p.grant(4), 5);
    }

    #[test]
    fn test_overspend_leaves_balance() {
        let mut p = player();
        p.grant(3);
        assert_eq!(
            p.spend(4),
            Err(RuleRejection::InsufficientAp { needed: 4, available: 3 })
        );
        assert_eq!(p.ap(), 3);
        assert!(p.can_afford(3));
        assert!(!p.can_afford(4));
    }
}
