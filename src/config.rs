//! Game configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Configuration for a game of Ô ăn quan.
///
/// The defaults describe the traditional two-row board: two players,
/// six tiles each (one treasure corner plus five home tiles), five
/// seeds per home tile.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats.
    #[serde(default = "default_players")]
    players: usize,

    /// Tiles per player, including the treasure corner.
    #[serde(default = "default_tiles_per_player")]
    tiles_per_player: usize,

    /// Seeds placed on each non-corner tile at setup.
    #[serde(default = "default_seeds_per_tile")]
    seeds_per_tile: u32,

    /// RNG seed for automated seats. `None` seeds from entropy.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_players() -> usize {
    2
}

fn default_tiles_per_player() -> usize {
    6
}

fn default_seeds_per_tile() -> u32 {
    5
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: default_players(),
            tiles_per_player: default_tiles_per_player(),
            seeds_per_tile: default_seeds_per_tile(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Creates a validated configuration.
    #[instrument]
    pub fn new(
        players: usize,
        tiles_per_player: usize,
        seeds_per_tile: u32,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            players,
            tiles_per_player,
            seeds_per_tile,
            seed: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the RNG seed for automated seats.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading game config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(
            players = config.players,
            tiles_per_player = config.tiles_per_player,
            "Game config loaded"
        );
        Ok(config)
    }

    /// Checks that the configuration describes a playable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players < 2 {
            return Err(ConfigError::new("At least 2 players required"));
        }
        if self.players > u8::MAX as usize {
            return Err(ConfigError::new("At most 255 players supported"));
        }
        if self.tiles_per_player < 3 {
            // A seat needs a corner plus at least two home tiles.
            return Err(ConfigError::new("At least 3 tiles per player required"));
        }
        if self.seeds_per_tile == 0 {
            return Err(ConfigError::new("Seeds per tile must be positive"));
        }
        Ok(())
    }
}

/// Configuration error with caller location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where the error was raised.
    pub line: u32,
    /// Source file where the error was raised.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
