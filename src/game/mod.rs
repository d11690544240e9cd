//! Turn control.
//!
//! `Game` owns the board, the players, the POI manager and the dice, and is
//! driven by exactly two commands: [`Game::perform_action`] and
//! [`Game::end_turn`]. Each runs to completion before returning and
//! publishes what happened through the event bus.
//!
//! ## Turn order
//!
//! Ending a turn runs:
//!
//! 1. rescue of revealed victims on the edge of the board,
//! 2. `AdvanceFire`: roll the target, ignite it,
//! 3. `SmokeToFire`: diffuse,
//! 4. `ClearEdgeFire`: clear the edge ring,
//! 5. `PlacePoi`: replace POIs removed this turn,
//!
//! then hands the next player (wrapping by index) their AP allowance and
//! returns to `Move`.

mod builder;

pub use builder::GameBuilder;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::{
    Action, ActionRecord, Cell, PlayerId, PlayerMap, RescueConfig, Roller, RuleRejection, Token,
    TokenId, TokenKind,
};
use crate::events::{EventBus, GameEvent, SubscriptionId, TurnPhase};
use crate::fire::{self, FireSpread};
use crate::poi::PoiManager;
use crate::rules::{ActionOutcome, ActionResolver, Player};

/// What ending a turn did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Victims rescued from the edge before the fire advanced.
    pub rescued: Vec<TokenId>,
    pub fire: FireSpread,
    /// POIs put back on the board.
    pub placed: usize,
    /// Whose turn it is now.
    pub next_player: PlayerId,
}

/// A game in progress.
pub struct Game {
    config: RescueConfig,
    board: Board,
    players: PlayerMap<Player>,
    current: PlayerId,
    poi: PoiManager,
    resolver: ActionResolver,
    roller: Box<dyn Roller>,
    bus: EventBus,
    phase: TurnPhase,
    turn_number: u32,
    history: Vec<ActionRecord>,
    legal: Vec<Action>,
    started: bool,
}

impl Game {
    fn new(
        config: RescueConfig,
        board: Board,
        players: PlayerMap<Player>,
        poi: PoiManager,
        roller: Box<dyn Roller>,
    ) -> Self {
        Self {
            config,
            board,
            players,
            current: PlayerId::new(0),
            poi,
            resolver: ActionResolver::new(),
            roller,
            bus: EventBus::new(),
            phase: TurnPhase::Move,
            turn_number: 0,
            history: Vec::new(),
            legal: Vec::new(),
            started: false,
        }
    }

    // === Setup ===

    fn player_token(&self, id: PlayerId) -> Token {
        let player = self.players.get(id);
        Token {
            id: player.token,
            kind: TokenKind::Player {
                player: id,
                name: player.name.clone(),
                colour: player.colour,
            },
        }
    }

    /// Put a player's figure on `cell` before the game starts.
    ///
    /// Fails if another figure is already there. Panics if the game has
    /// started or the player is already on the board.
    pub fn place_player(&mut self, id: PlayerId, cell: Cell) -> bool {
        assert!(!self.started, "Players are placed before the game starts");
        let token = self.player_token(id);
        assert!(!self.board.contains(token.id), "{} is already on the board", id);
        self.board.add_player_token(cell, token)
    }

    /// Put every player not yet on the board on a rolled interior cell,
    /// re-rolling until the cell is free. Panics if the game has started.
    pub fn place_players(&mut self) {
        assert!(!self.started, "Players are placed before the game starts");
        let size = self.board.size();
        for id in self.players.player_ids() {
            let token = self.player_token(id);
            if self.board.contains(token.id) {
                continue;
            }
            loop {
                let (cell, _) = self.roller.roll_interior(size);
                if self.board.add_player_token(cell, token.clone()) {
                    log::debug!("{} starts at {}", id, cell);
                    break;
                }
            }
        }
    }

    /// Start the game: place the players and the opening POIs, give the
    /// first player their AP and publish the board.
    pub fn start(&mut self) {
        assert!(!self.started, "Game already started");
        self.place_players();

        let initial = self.config.initial_poi_count;
        let placed = self
            .poi
            .place_initial_tokens(initial, &mut self.board, &mut self.roller);
        if placed < initial {
            log::warn!("Only {} of {} opening POIs found a cell", placed, initial);
        }

        self.started = true;
        self.turn_number = 1;
        self.flush_board();
        self.begin_turn();
        log::info!("Game started, {} to move", self.current);
    }

    // === Commands ===

    /// Perform an action for the active player.
    ///
    /// On rejection nothing changes and nothing is published.
    pub fn perform_action(&mut self, action: Action) -> Result<ActionOutcome, RuleRejection> {
        assert!(self.started, "Game has not started");
        let current = self.current;
        let outcome = self
            .resolver
            .perform(&mut self.board, self.players.get_mut(current), &action);

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(rejection) => {
                log::debug!("Rejected {}: {}", action, rejection);
                return Err(rejection);
            }
        };

        let sequence = self
            .history
            .iter()
            .filter(|r| r.turn == self.turn_number)
            .count() as u32;
        self.history
            .push(ActionRecord::new(action, self.turn_number, sequence));

        self.flush_board();
        self.publish(GameEvent::ApChanged {
            player: current,
            ap: outcome.ap_left,
        });
        self.refresh_legal_actions();
        Ok(outcome)
    }

    /// End the active player's turn and run the board phases.
    pub fn end_turn(&mut self) -> TurnReport {
        assert!(self.started, "Game has not started");

        let rescued = self.board.check_rescued_victims();
        self.flush_board();

        self.set_phase(TurnPhase::AdvanceFire);
        let (target, dice) = self.roller.roll_interior(self.board.size());
        for die in dice {
            self.publish(GameEvent::DiceRolled {
                sides: die.sides,
                value: die.value,
            });
        }
        log::debug!("Fire advances on {}", target);
        let ignition = fire::ignite(&mut self.board, target);
        self.flush_board();

        self.set_phase(TurnPhase::SmokeToFire);
        let diffused = fire::smoke_into_fire(&mut self.board);
        self.flush_board();

        self.set_phase(TurnPhase::ClearEdgeFire);
        let cleared = fire::remove_fire_from_edges(&mut self.board);
        self.flush_board();

        self.set_phase(TurnPhase::PlacePoi);
        let placed = self
            .poi
            .on_turn_phase(TurnPhase::PlacePoi, &mut self.board, &mut self.roller);
        self.flush_board();

        self.current = self.current.next(self.players.player_count());
        self.turn_number += 1;
        self.begin_turn();

        TurnReport {
            rescued,
            fire: FireSpread {
                target,
                ignition,
                diffused,
                cleared,
            },
            placed,
            next_player: self.current,
        }
    }

    fn begin_turn(&mut self) {
        let player = self.players.get_mut(self.current);
        let ap = player.grant(self.config.ap_per_turn);
        let id = player.id;
        self.publish(GameEvent::ApChanged { player: id, ap });
        self.set_phase(TurnPhase::Move);
        self.refresh_legal_actions();
    }

    // === Events ===

    /// Register an event subscriber.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        self.bus.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    fn set_phase(&mut self, phase: TurnPhase) {
        self.phase = phase;
        log::debug!("Phase {:?}", phase);
        self.publish(GameEvent::TurnPhaseChanged { phase });
    }

    fn refresh_legal_actions(&mut self) {
        self.legal = self
            .resolver
            .legal_actions(&self.board, self.players.get(self.current));
        let actions = self.legal.clone();
        self.publish(GameEvent::LegalActionsChanged { actions });
    }

    fn publish(&mut self, event: GameEvent) {
        self.poi.on_poi_event(&event);
        self.bus.emit(&event);
    }

    fn flush_board(&mut self) {
        for event in self.board.take_events() {
            self.publish(event);
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &RescueConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for scenario setup. Events queued here are
    /// published with the next command.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        self.players.get(id)
    }

    #[must_use]
    pub fn current_player(&self) -> &Player {
        self.players.get(self.current)
    }

    #[must_use]
    pub fn current_player_id(&self) -> PlayerId {
        self.current
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }

    /// The active player's legal actions, as last published.
    #[must_use]
    pub fn legal_actions(&self) -> &[Action] {
        &self.legal
    }

    #[must_use]
    pub fn poi_manager(&self) -> &PoiManager {
        &self.poi
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("board", &self.board.size())
            .field("current", &self.current)
            .field("phase", &self.phase)
            .field("turn_number", &self.turn_number)
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}
