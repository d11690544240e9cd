//! Game configuration.
//!
//! Every tunable of the rescue game lives in `RescueConfig`. Defaults match
//! the standard 10x8 board with four AP per turn and a fifteen-token POI deck.
//! Hosts can deserialize the config from any serde format.

use serde::{Deserialize, Serialize};

use super::cell::BoardSize;
use super::error::{ConfigError, ConfigResult};

/// Smallest board dimension that still has an interior.
pub const MIN_DIMENSION: u16 = 3;

/// Maximum number of players.
pub const MAX_PLAYERS: usize = 255;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RescueConfig {
    pub width: u16,
    pub height: u16,

    /// AP added to a player at the start of each of their turns.
    pub ap_per_turn: u32,

    /// Victim POIs in the deck.
    pub poi_victims: usize,

    /// Blank POIs in the deck.
    pub poi_blanks: usize,

    /// POIs placed on the board when the game starts.
    pub initial_poi_count: usize,

    /// If true, a POI may be placed on a burning cell (the fire stays).
    /// If false, placement on fire is rejected.
    pub poi_replaces_fire: bool,

    /// Seed for the default RNG when none is injected.
    pub seed: u64,
}

impl Default for RescueConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 8,
            ap_per_turn: 4,
            poi_victims: 10,
            poi_blanks: 5,
            initial_poi_count: 3,
            poi_replaces_fire: true,
            seed: 0,
        }
    }
}

impl RescueConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_ap_per_turn(mut self, ap: u32) -> Self {
        self.ap_per_turn = ap;
        self
    }

    #[must_use]
    pub fn with_deck(mut self, victims: usize, blanks: usize) -> Self {
        self.poi_victims = victims;
        self.poi_blanks = blanks;
        self
    }

    #[must_use]
    pub fn with_initial_pois(mut self, count: usize) -> Self {
        self.initial_poi_count = count;
        self
    }

    #[must_use]
    pub fn with_poi_replaces_fire(mut self, replace: bool) -> Self {
        self.poi_replaces_fire = replace;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Board dimensions.
    #[must_use]
    pub fn size(&self) -> BoardSize {
        BoardSize::new(self.width, self.height)
    }

    /// Total POIs in the deck.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.poi_victims + self.poi_blanks
    }

    /// Check the configuration for a game with `player_count` players.
    pub fn validate(&self, player_count: usize) -> ConfigResult<()> {
        if self.width < MIN_DIMENSION || self.height < MIN_DIMENSION {
            return Err(ConfigError::BoardTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if player_count == 0 {
            return Err(ConfigError::NoPlayers);
        }
        if player_count > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers(player_count));
        }
        let interior = usize::from(self.width - 2) * usize::from(self.height - 2);
        if player_count > interior {
            return Err(ConfigError::NotEnoughRoom {
                players: player_count,
                interior,
            });
        }
        if self.initial_poi_count > self.deck_size() {
            return Err(ConfigError::InitialPoiExceedsDeck {
                initial: self.initial_poi_count,
                deck: self.deck_size(),
            });
        }
        Ok(())
    }
}
