//! POI placement and replenishment.

use crate::board::Board;
use crate::core::{Cell, Roller, RuleRejection, Token, TokenId};
use crate::events::{GameEvent, PoiEventKind, TurnPhase};

use super::deck::PoiDeck;

/// Places POIs from the deck and keeps the board topped up.
///
/// Every POI rescued or killed during a turn is replaced from the deck in
/// that turn's `PlacePoi` phase.
#[derive(Clone, Debug)]
pub struct PoiManager {
    deck: PoiDeck,
    removed_this_turn: usize,
    replace_fire: bool,
}

impl PoiManager {
    #[must_use]
    pub fn new(deck: PoiDeck, replace_fire: bool) -> Self {
        Self {
            deck,
            removed_this_turn: 0,
            replace_fire,
        }
    }

    #[must_use]
    pub fn deck(&self) -> &PoiDeck {
        &self.deck
    }

    /// POIs rescued or killed since the last `PlacePoi` phase.
    #[must_use]
    pub fn removed_this_turn(&self) -> usize {
        self.removed_this_turn
    }

    #[must_use]
    pub fn replace_fire(&self) -> bool {
        self.replace_fire
    }

    /// Draw the next POI and put it on a rolled interior cell.
    ///
    /// The drawn token is consumed even when the cell rejects it.
    pub fn place_next(
        &mut self,
        board: &mut Board,
        roller: &mut impl Roller,
    ) -> Result<Cell, RuleRejection> {
        let token = self.deck.draw().ok_or(RuleRejection::DeckExhausted)?;
        let (cell, _) = roller.roll_interior(board.size());

        if !board.add_poi_token(cell, token.clone(), self.replace_fire) {
            return Err(RuleRejection::PoiRejected(cell));
        }
        log::debug!("Placed {} at {}", token, cell);
        board.queue_event(GameEvent::Poi {
            token,
            kind: PoiEventKind::Placed,
        });
        Ok(cell)
    }

    /// Place the first `count` POIs of the game. Returns how many landed.
    pub fn place_initial_tokens(
        &mut self,
        count: usize,
        board: &mut Board,
        roller: &mut impl Roller,
    ) -> usize {
        self.place_many(count, board, roller)
    }

    fn place_many(&mut self, count: usize, board: &mut Board, roller: &mut impl Roller) -> usize {
        let mut placed = 0;
        for _ in 0..count {
            match self.place_next(board, roller) {
                Ok(_) => placed += 1,
                Err(RuleRejection::DeckExhausted) => {
                    log::warn!("POI deck exhausted, skipping {} placements", count - placed);
                    break;
                }
                Err(err) => log::warn!("POI placement skipped: {}", err),
            }
        }
        placed
    }

    /// React to a phase change. In `PlacePoi`, replace every POI removed
    /// this turn and reset the counter. Returns how many were placed.
    pub fn on_turn_phase(
        &mut self,
        phase: TurnPhase,
        board: &mut Board,
        roller: &mut impl Roller,
    ) -> usize {
        if phase != TurnPhase::PlacePoi {
            return 0;
        }
        let wanted = std::mem::take(&mut self.removed_this_turn);
        self.place_many(wanted, board, roller)
    }

    /// Count rescued and killed POIs. Other events are ignored.
    pub fn on_poi_event(&mut self, event: &GameEvent) {
        if event.poi_kind().is_some_and(PoiEventKind::is_removal) {
            self.removed_this_turn += 1;
        }
    }

    /// Reveal a hidden POI in place.
    pub fn flip(&self, board: &mut Board, id: TokenId) -> Option<Token> {
        board.flip_poi(id)
    }
}
