//! Building, validating and applying player actions.
//!
//! ## Offered actions
//!
//! For each cell the player's figure could physically enter:
//!
//! - fire there: `MoveIntoFire`
//! - otherwise: `Move`
//!
//! `MoveIntoSmoke` is never offered but is accepted in place of `Move` when
//! the destination holds smoke.
//!
//! If a revealed victim shares the player's cell, `MoveWithVictim` is also
//! offered for every destination that is not burning. Carrying a victim into
//! fire is never offered. A carry onto a cell that already holds a POI is
//! offered and then refused by `perform` with `VictimBlocked`.
//!
//! ## Performing
//!
//! `perform` checks everything before it touches the board, so a rejected
//! action leaves the board and the player's AP exactly as they were.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::{Action, ActionKind, Cell, PoiFace, RuleRejection, Threat, Token, TokenId};

use super::player::Player;

/// What a successful action did besides moving the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub action: Action,

    /// AP left after paying for the action.
    pub ap_left: u32,

    /// The POI revealed on the destination, if one was hidden there.
    pub revealed: Option<Token>,

    /// A blank POI cleared from the destination.
    pub cleared_blank: Option<TokenId>,
}

/// Applies the movement rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct ActionResolver;

impl ActionResolver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// The plain move kind for stepping onto `target`.
    #[must_use]
    pub fn classify(&self, board: &Board, target: Cell) -> ActionKind {
        if board.is_fire_at(target) {
            ActionKind::MoveIntoFire
        } else {
            ActionKind::Move
        }
    }

    /// Can a plain move of `kind` enter `target`?
    fn accepts(&self, board: &Board, target: Cell, kind: ActionKind) -> bool {
        match kind {
            ActionKind::MoveIntoSmoke => board.threat_at(target) == Some(Threat::Smoke),
            kind => kind == self.classify(board, target),
        }
    }

    /// Every action the rules offer the player, affordable or not.
    #[must_use]
    pub fn candidate_actions(&self, board: &Board, player: &Player) -> Vec<Action> {
        let carrying = board.victim_at_player(player.token).is_some();
        let mut actions = Vec::new();

        for target in board.possible_moves(player.token) {
            let kind = self.classify(board, target);
            actions.push(Action::new(player.id, target, kind));
            if carrying && kind != ActionKind::MoveIntoFire {
                actions.push(Action::new(player.id, target, ActionKind::MoveWithVictim));
            }
        }
        actions
    }

    /// The actions the player can take right now.
    #[must_use]
    pub fn legal_actions(&self, board: &Board, player: &Player) -> Vec<Action> {
        self.candidate_actions(board, player)
            .into_iter()
            .filter(|action| self.can_perform(player, action))
            .collect()
    }

    /// Does the player have the AP for this action?
    #[must_use]
    pub fn can_perform(&self, player: &Player, action: &Action) -> bool {
        player.can_afford(action.ap_cost)
    }

    /// Check an action against the rules without changing anything.
    pub fn check(&self, board: &Board, player: &Player, action: &Action) -> Result<(), RuleRejection> {
        if action.actor != player.id {
            return Err(RuleRejection::NotYourTurn);
        }
        if !self.can_perform(player, action) {
            return Err(RuleRejection::InsufficientAp {
                needed: action.ap_cost,
                available: player.ap(),
            });
        }

        let target = action.target;
        if !board.possible_moves(player.token).contains(&target) {
            return Err(RuleRejection::DestinationBlocked(target));
        }

        let expected = self.classify(board, target);
        if action.kind.carries_victim() {
            if board.victim_at_player(player.token).is_none() {
                return Err(RuleRejection::NoVictim);
            }
            if expected == ActionKind::MoveIntoFire || board.poi_at(target).is_some() {
                return Err(RuleRejection::VictimBlocked(target));
            }
        } else if !self.accepts(board, target, action.kind) {
            return Err(RuleRejection::WrongKind { target, expected });
        }
        Ok(())
    }

    /// Apply an action.
    ///
    /// Carries the victim first (if any), moves the player, pays the AP,
    /// then reveals a hidden POI on the destination. A blank is cleared as
    /// rescued at once; a victim stays where it is.
    pub fn perform(
        &self,
        board: &mut Board,
        player: &mut Player,
        action: &Action,
    ) -> Result<ActionOutcome, RuleRejection> {
        self.check(board, player, action)?;
        let target = action.target;

        if action.kind.carries_victim() {
            let victim = board
                .victim_at_player(player.token)
                .ok_or(RuleRejection::NoVictim)?;
            if !board.move_poi_token(victim, target) {
                return Err(RuleRejection::VictimBlocked(target));
            }
        }

        let moved = board.move_player_token(target, player.token);
        debug_assert!(moved, "checked destination was occupied");
        let ap_left = player.spend(action.ap_cost)?;
        log::debug!("{} ({} AP left)", action, ap_left);

        let mut outcome = ActionOutcome {
            action: *action,
            ap_left,
            revealed: None,
            cleared_blank: None,
        };

        let hidden = board
            .poi_at(target)
            .filter(|t| t.poi().is_some_and(|p| p.is_hidden()))
            .map(|t| t.id);
        if let Some(hidden) = hidden {
            if let Some(revealed) = board.flip_poi(hidden) {
                if revealed.poi().map(|p| p.face()) == Some(PoiFace::Blank) {
                    board.rescue_poi(revealed.id);
                    outcome.cleared_blank = Some(revealed.id);
                }
                outcome.revealed = Some(revealed);
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardSize, Colour, Poi, PlayerId, PlayerSetup, TokenKind};
    use crate::events::{GameEvent, PoiEventKind};

    fn setup(at: Cell, ap: u32) -> (Board, Player) {
        let mut board = Board::new(BoardSize::new(10, 8));
        let token = board.mint(TokenKind::Player {
            player: PlayerId::new(0),
            name: "Ash".into(),
            colour: Colour::RED,
        });
        let id = token.id;
        board.add_player_token(at, token);
        let mut player = Player::new(PlayerId::new(0), id, &PlayerSetup::new("Ash", Colour::RED));
        player.grant(ap);
        board.take_events();
        (board, player)
    }

    fn place_poi(board: &mut Board, cell: Cell, poi: Poi) -> TokenId {
        let token = board.mint(TokenKind::Poi(poi));
        let id = token.id;
        assert!(board.add_poi_token(cell, token, true));
        id
    }

    #[test]
    fn test_classification() {
        let (mut board, player) = setup(Cell::new(4, 4), 4);
        board.set_threat(Cell::new(3, 4), Threat::Fire);
        board.set_threat(Cell::new(5, 4), Threat::Smoke);

        let resolver = ActionResolver::new();
        let actions = resolver.legal_actions(&board, &player);
        assert_eq!(actions.len(), 4);
        let kind_at = |c: Cell| actions.iter().find(|a| a.target == c).map(|a| a.kind);
        assert_eq!(kind_at(Cell::new(3, 4)), Some(ActionKind::MoveIntoFire));
        assert_eq!(kind_at(Cell::new(5, 4)), Some(ActionKind::Move));
        assert_eq!(kind_at(Cell::new(4, 3)), Some(ActionKind::Move));
    }

    #[test]
    fn test_plain_move_enters_smoke() {
        let (mut board, mut player) = setup(Cell::new(4, 4), 4);
        board.set_threat(Cell::new(5, 4), Threat::Smoke);
        board.take_events();
        let action = Action::new(player.id, Cell::new(5, 4), ActionKind::Move);

        let outcome = ActionResolver::new().perform(&mut board, &mut player, &action).unwrap();
        assert_eq!(outcome.ap_left, 3);
        assert_eq!(board.location(player.token), Some(Cell::new(5, 4)));
        assert_eq!(board.threat_at(Cell::new(5, 4)), Some(Threat::Smoke));
    }

    #[test]
    fn test_smoke_kind_only_matches_smoke() {
        let (mut board, mut player) = setup(Cell::new(4, 4), 4);
        board.set_threat(Cell::new(5, 4), Threat::Smoke);
        board.take_events();
        let resolver = ActionResolver::new();

        let empty = Action::new(player.id, Cell::new(4, 3), ActionKind::MoveIntoSmoke);
        assert_eq!(
            resolver.perform(&mut board, &mut player, &empty),
            Err(RuleRejection::WrongKind {
                target: Cell::new(4, 3),
                expected: ActionKind::Move,
            })
        );

        let smoke = Action::new(player.id, Cell::new(5, 4), ActionKind::MoveIntoSmoke);
        resolver.perform(&mut board, &mut player, &smoke).unwrap();
        assert_eq!(board.location(player.token), Some(Cell::new(5, 4)));
    }

    #[test]
    fn test_victim_never_offered_into_fire() {
        let (mut board, player) = setup(Cell::new(4, 4), 10);
        place_poi(&mut board, Cell::new(4, 4), Poi::Revealed(PoiFace::Victim));
        board.set_threat(Cell::new(3, 4), Threat::Fire);

        let actions = ActionResolver::new().legal_actions(&board, &player);
        let carries: Vec<Cell> = actions
            .iter()
            .filter(|a| a.kind == ActionKind::MoveWithVictim)
            .map(|a| a.target)
            .collect();
        assert_eq!(carries.len(), 3);
        assert!(!carries.contains(&Cell::new(3, 4)));
    }

    #[test]
    fn test_legal_list_filters_by_ap() {
        let (mut board, player) = setup(Cell::new(4, 4), 1);
        board.set_threat(Cell::new(3, 4), Threat::Fire);

        let resolver = ActionResolver::new();
        assert_eq!(resolver.candidate_actions(&board, &player).len(), 4);
        let legal = resolver.legal_actions(&board, &player);
        assert_eq!(legal.len(), 3);
        assert!(legal.iter().all(|a| a.kind != ActionKind::MoveIntoFire));
    }

    #[test]
    fn test_perform_moves_and_pays() {
        let (mut board, mut player) = setup(Cell::new(4, 4), 3);
        board.set_threat(Cell::new(4, 5), Threat::Fire);
        let action = Action::new(player.id, Cell::new(4, 5), ActionKind::MoveIntoFire);

        let outcome = ActionResolver::new().perform(&mut board, &mut player, &action).unwrap();
        assert_eq!(outcome.ap_left, 1);
        assert_eq!(player.ap(), 1);
        assert_eq!(board.location(player.token), Some(Cell::new(4, 5)));
    }

    #[test]
    fn test_rejections_leave_state() {
        let (mut board, mut player) = setup(Cell::new(4, 4), 3);
        board.set_threat(Cell::new(4, 5), Threat::Fire);
        board.take_events();
        let resolver = ActionResolver::new();

        let cases = [
            (
                Action::with_cost(player.id, Cell::new(4, 3), ActionKind::Move, 4),
                RuleRejection::InsufficientAp { needed: 4, available: 3 },
            ),
            (
                Action::new(player.id, Cell::new(6, 6), ActionKind::Move),
                RuleRejection::DestinationBlocked(Cell::new(6, 6)),
            ),
            (
                Action::new(player.id, Cell::new(4, 5), ActionKind::Move),
                RuleRejection::WrongKind {
                    target: Cell::new(4, 5),
                    expected: ActionKind::MoveIntoFire,
                },
            ),
            (
                Action::new(player.id, Cell::new(4, 3), ActionKind::MoveWithVictim),
                RuleRejection::NoVictim,
            ),
            (
                Action::new(PlayerId::new(1), Cell::new(4, 3), ActionKind::Move),
                RuleRejection::NotYourTurn,
            ),
        ];

        for (action, expected) in cases {
            assert_eq!(resolver.perform(&mut board, &mut player, &action), Err(expected));
        }
        assert_eq!(player.ap(), 3);
        assert_eq!(board.location(player.token), Some(Cell::new(4, 4)));
        assert!(board.pending_events().is_empty());
    }

    #[test]
    fn test_carry_victim() {
        let (mut board, mut player) = setup(Cell::new(4, 4), 4);
        let victim = place_poi(&mut board, Cell::new(4, 4), Poi::Revealed(PoiFace::Victim));
        let action = Action::new(player.id, Cell::new(3, 4), ActionKind::MoveWithVictim);

        ActionResolver::new().perform(&mut board, &mut player, &action).unwrap();
        assert_eq!(board.location(victim), Some(Cell::new(3, 4)));
        assert_eq!(board.location(player.token), Some(Cell::new(3, 4)));
        assert_eq!(player.ap(), 2);
    }

    #[test]
    fn test_carry_blocked_by_poi_is_atomic() {
        let (mut board, mut player) = setup(Cell::new(4, 4), 4);
        place_poi(&mut board, Cell::new(4, 4), Poi::Revealed(PoiFace::Victim));
        place_poi(&mut board, Cell::new(3, 4), Poi::Hidden(PoiFace::Blank));
        board.take_events();
        let action = Action::new(player.id, Cell::new(3, 4), ActionKind::MoveWithVictim);
        assert!(ActionResolver::new()
            .legal_actions(&board, &player)
            .contains(&action));

        assert_eq!(
            ActionResolver::new().perform(&mut board, &mut player, &action),
            Err(RuleRejection::VictimBlocked(Cell::new(3, 4)))
        );
        assert_eq!(player.ap(), 4);
        assert_eq!(board.location(player.token), Some(Cell::new(4, 4)));
        assert!(board.pending_events().is_empty());
    }

    #[test]
    fn test_step_on_blank_clears_it() {
        let (mut board, mut player) = setup(Cell::new(4, 4), 4);
        let hidden = place_poi(&mut board, Cell::new(5, 4), Poi::Hidden(PoiFace::Blank));
        board.take_events();
        let action = Action::new(player.id, Cell::new(5, 4), ActionKind::Move);

        let outcome = ActionResolver::new().perform(&mut board, &mut player, &action).unwrap();
        assert!(outcome.cleared_blank.is_some());
        assert!(!board.contains(hidden));
        assert!(board.poi_at(Cell::new(5, 4)).is_none());
        let events = board.take_events();
        assert_eq!(events.last().and_then(GameEvent::poi_kind), Some(PoiEventKind::Rescued));
    }

    #[test]
    fn test_step_on_victim_reveals_it() {
        let (mut board, mut player) = setup(Cell::new(4, 4), 4);
        place_poi(&mut board, Cell::new(5, 4), Poi::Hidden(PoiFace::Victim));
        let action = Action::new(player.id, Cell::new(5, 4), ActionKind::Move);

        let outcome = ActionResolver::new().perform(&mut board, &mut player, &action).unwrap();
        let revealed = outcome.revealed.unwrap();
        assert_eq!(outcome.cleared_blank, None);
        assert_eq!(board.victim_at_player(player.token), Some(revealed.id));
    }
}
