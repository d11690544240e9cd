//! Game construction.

use crate::board::{Board, WallTable};
use crate::core::{
    ConfigError, ConfigResult, GameRng, PlayerId, PlayerMap, PlayerSetup, RescueConfig, Roller,
    TokenKind,
};
use crate::poi::{PoiDeck, PoiManager};
use crate::rules::Player;

use super::Game;

/// Builder for creating a `Game`.
///
/// ```
/// use fire_rescue::core::{Colour, PlayerSetup, RescueConfig};
/// use fire_rescue::game::GameBuilder;
///
/// let mut game = GameBuilder::new(RescueConfig::default().with_seed(7))
///     .player(PlayerSetup::new("Ash", Colour::RED))
///     .player(PlayerSetup::new("Bo", Colour::BLUE))
///     .build()
///     .unwrap();
/// game.start();
/// assert_eq!(game.current_player().ap(), 4);
/// ```
pub struct GameBuilder {
    config: RescueConfig,
    walls: Option<WallTable>,
    players: Vec<PlayerSetup>,
    roller: Option<Box<dyn Roller>>,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new(RescueConfig::default())
    }
}

impl GameBuilder {
    #[must_use]
    pub fn new(config: RescueConfig) -> Self {
        Self {
            config,
            walls: None,
            players: Vec::new(),
            roller: None,
        }
    }

    /// Use this wall layout instead of an open board.
    #[must_use]
    pub fn walls(mut self, walls: WallTable) -> Self {
        self.walls = Some(walls);
        self
    }

    /// Add a player. Turn order is the order players are added.
    #[must_use]
    pub fn player(mut self, setup: PlayerSetup) -> Self {
        self.players.push(setup);
        self
    }

    #[must_use]
    pub fn players(mut self, setups: impl IntoIterator<Item = PlayerSetup>) -> Self {
        self.players.extend(setups);
        self
    }

    /// Use `roller` for every die and shuffle instead of a seeded `GameRng`.
    #[must_use]
    pub fn roller(mut self, roller: impl Roller + 'static) -> Self {
        self.roller = Some(Box::new(roller));
        self
    }

    /// Validate the setup, build the board and shuffle the POI deck.
    ///
    /// Nothing is placed yet; call [`Game::start`] after subscribing.
    pub fn build(self) -> ConfigResult<Game> {
        let config = self.config;
        config.validate(self.players.len())?;

        let size = config.size();
        let mut board = Board::new(size);
        if let Some(walls) = self.walls {
            if walls.size() != size {
                return Err(ConfigError::WallTableMismatch {
                    table: walls.size(),
                    board: size,
                });
            }
            board.add_walls(walls);
        }

        let mut roller = self
            .roller
            .unwrap_or_else(|| Box::new(GameRng::new(config.seed)));

        let setups = self.players;
        let players = PlayerMap::new(setups.len(), |id: PlayerId| {
            let setup = &setups[id.index()];
            let token = board.mint(TokenKind::Player {
                player: id,
                name: setup.name.clone(),
                colour: setup.colour,
            });
            Player::new(id, token.id, setup)
        });

        let deck = PoiDeck::new(&mut board, config.poi_victims, config.poi_blanks, &mut roller);
        let poi = PoiManager::new(deck, config.poi_replaces_fire);

        log::info!(
            "Built {} board for {} players, {} POIs in the deck",
            size,
            players.player_count(),
            poi.deck().remaining()
        );
        Ok(Game::new(config, board, players, poi, roller))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardSize, Colour};

    fn setups(n: usize) -> Vec<PlayerSetup> {
        (0..n)
            .map(|i| PlayerSetup::new(format!("P{}", i), Colour::GREEN))
            .collect()
    }

    #[test]
    fn test_build_rejects_no_players() {
        let err = GameBuilder::default().build().unwrap_err();
        assert_eq!(err, ConfigError::NoPlayers);
    }

    #[test]
    fn test_build_rejects_wall_mismatch() {
        let err = GameBuilder::default()
            .players(setups(1))
            .walls(WallTable::open(BoardSize::new(4, 4)))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::WallTableMismatch {
                table: BoardSize::new(4, 4),
                board: BoardSize::new(10, 8),
            }
        );
    }

    #[test]
    fn test_build_mints_without_placing() {
        let game = GameBuilder::default().players(setups(3)).build().unwrap();
        assert_eq!(game.players().player_count(), 3);
        assert_eq!(game.poi_manager().deck().remaining(), 15);
        assert_eq!(game.board().token_count(), 0);
        assert!(!game.is_started());
    }
}
