//! The face-down POI deck.

use std::collections::VecDeque;

use crate::board::Board;
use crate::core::{Poi, PoiFace, Roller, Token, TokenKind};

/// Undealt hidden POI tokens, in draw order.
///
/// Built and shuffled once when the game starts, drained by placement,
/// never refilled. Token ids are minted from the board so they stay unique
/// once the tokens land on it.
#[derive(Clone, Debug)]
pub struct PoiDeck {
    tokens: VecDeque<Token>,
    dealt: usize,
}

impl PoiDeck {
    /// Mint `blanks` blank and `victims` victim POIs and shuffle them.
    pub fn new(board: &mut Board, victims: usize, blanks: usize, roller: &mut impl Roller) -> Self {
        let faces = std::iter::repeat(PoiFace::Blank)
            .take(blanks)
            .chain(std::iter::repeat(PoiFace::Victim).take(victims));
        let unshuffled: Vec<Token> = faces
            .map(|face| board.mint(TokenKind::Poi(Poi::Hidden(face))))
            .collect();

        Self::from_tokens(roller.insertion_shuffle(unshuffled))
    }

    /// A deck that deals `tokens` in the given order.
    ///
    /// Panics if any token is not a hidden POI.
    #[must_use]
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        for token in &tokens {
            assert!(
                token.poi().is_some_and(Poi::is_hidden),
                "Token {} is not a hidden POI",
                token.id
            );
        }
        Self {
            tokens: tokens.into(),
            dealt: 0,
        }
    }

    /// Deal the next token.
    pub fn draw(&mut self) -> Option<Token> {
        let token = self.tokens.pop_front()?;
        self.dealt += 1;
        Some(token)
    }

    /// The token `draw` would return next.
    #[must_use]
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn dealt(&self) -> usize {
        self.dealt
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// How many undealt tokens hide a victim.
    #[must_use]
    pub fn victims_remaining(&self) -> usize {
        self.tokens
            .iter()
            .filter(|t| t.poi().map(Poi::face) == Some(PoiFace::Victim))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardSize, GameRng};

    #[test]
    fn test_deck_composition() {
        let mut board = Board::new(BoardSize::new(10, 8));
        let mut rng = GameRng::new(42);
        let deck = PoiDeck::new(&mut board, 10, 5, &mut rng);

        assert_eq!(deck.remaining(), 15);
        assert_eq!(deck.victims_remaining(), 10);
        assert_eq!(deck.dealt(), 0);
        // Minted but not placed.
        assert_eq!(board.token_count(), 0);
    }

    #[test]
    fn test_same_seed_same_order() {
        let mut board_a = Board::new(BoardSize::new(10, 8));
        let mut board_b = Board::new(BoardSize::new(10, 8));
        let a = PoiDeck::new(&mut board_a, 10, 5, &mut GameRng::new(7));
        let b = PoiDeck::new(&mut board_b, 10, 5, &mut GameRng::new(7));

        let faces = |deck: &PoiDeck| -> Vec<PoiFace> {
            deck.tokens.iter().filter_map(|t| t.poi().map(Poi::face)).collect()
        };
        assert_eq!(faces(&a), faces(&b));
    }

    #[test]
    fn test_draw_until_empty() {
        let mut board = Board::new(BoardSize::new(10, 8));
        let mut deck = PoiDeck::new(&mut board, 1, 1, &mut GameRng::new(1));

        let first = deck.draw().unwrap();
        assert_eq!(deck.peek().map(|t| t.id == first.id), Some(false));
        assert!(deck.draw().is_some());
        assert!(deck.draw().is_none());
        assert!(deck.is_empty());
        assert_eq!(deck.dealt(), 2);
    }

    #[test]
    #[should_panic(expected = "not a hidden POI")]
    fn test_from_tokens_rejects_revealed() {
        let mut board = Board::new(BoardSize::new(10, 8));
        let revealed = board.mint(TokenKind::Poi(Poi::Revealed(PoiFace::Blank)));
        let _ = PoiDeck::from_tokens(vec![revealed]);
    }
}
