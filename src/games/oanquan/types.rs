//! Core domain types for Ô ăn quan.

use serde::{Deserialize, Serialize};

/// One cell of the board, holding seeds and treasures.
///
/// Tiles are owned exclusively by [`Board`](super::Board); mutation goes
/// through transform-style updaters so the sowing algorithm can express
/// "add N" and "set to zero" without replacing the tile wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    seeds: u32,
    treasures: u32,
}

impl Tile {
    /// Creates a tile with the given counts.
    pub fn new(seeds: u32, treasures: u32) -> Self {
        Self { seeds, treasures }
    }

    /// Number of seeds on this tile.
    pub fn seeds(&self) -> u32 {
        self.seeds
    }

    /// Number of treasures on this tile.
    pub fn treasures(&self) -> u32 {
        self.treasures
    }

    /// Point value: seeds count 1 each, treasures count 10.
    pub fn point(&self) -> u32 {
        self.seeds + self.treasures * 10
    }

    /// True if the tile holds neither seeds nor treasures.
    pub fn is_empty(&self) -> bool {
        self.point() == 0
    }

    /// Applies a transform to the seed count.
    pub(super) fn update_seeds(&mut self, f: impl FnOnce(u32) -> u32) {
        self.seeds = f(self.seeds);
    }

    /// Applies a transform to the treasure count.
    pub(super) fn update_treasures(&mut self, f: impl FnOnce(u32) -> u32) {
        self.treasures = f(self.treasures);
    }

    /// Empties the tile, returning what it held.
    pub(super) fn take(&mut self) -> Capture {
        let taken = Capture {
            seeds: self.seeds,
            treasures: self.treasures,
        };
        self.seeds = 0;
        self.treasures = 0;
        taken
    }
}

/// A move request: which tile to sow from and in which direction.
///
/// Moves are first-class domain events that can be validated before
/// application, serialized for the wire, and logged for debugging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Index of the tile to pick up.
    pub tile: usize,
    /// Sowing direction: `true` steps indices upward, `false` downward.
    pub clockwise: bool,
}

impl Move {
    /// Creates a new move.
    pub fn new(tile: usize, clockwise: bool) -> Self {
        Self { tile, clockwise }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dir = if self.clockwise {
            "clockwise"
        } else {
            "counter-clockwise"
        };
        write!(f, "tile {} {}", self.tile, dir)
    }
}

/// Material claimed by a single sowing turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capture {
    /// Seeds captured.
    pub seeds: u32,
    /// Treasures captured.
    pub treasures: u32,
}

impl Capture {
    /// A capture of nothing.
    pub const NONE: Self = Self {
        seeds: 0,
        treasures: 0,
    };

    /// True if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.seeds == 0 && self.treasures == 0
    }

    /// Point value of the captured material.
    pub fn point(&self) -> u32 {
        self.seeds + self.treasures * 10
    }
}

/// Kind of seat: remote human or built-in automated opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    /// Human player submitting moves over the session layer.
    Human,
    /// Automated player drawing moves at random from its home range.
    Automated,
}

/// Lifecycle of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Seats remain open; moves are rejected.
    AwaitingPlayers,
    /// All seats filled; the active seat may move.
    InProgress,
    /// Every treasure has been captured. Terminal and irreversible.
    Ended,
}

/// Per-tile view in a [`GameSnapshot`], in board-index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSnapshot {
    /// Seeds currently on the tile.
    pub seeds: u32,
    /// Treasures currently on the tile.
    pub treasures: u32,
}

/// Per-player view in a [`GameSnapshot`], in seating order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Seat id (also the seating index).
    pub id: u8,
    /// Seat kind.
    pub kind: AgentKind,
    /// Seeds captured so far.
    pub captured_seeds: u32,
    /// Treasures captured so far.
    pub captured_treasures: u32,
    /// Derived score: seeds + 10 per treasure.
    pub score: u32,
}

/// Serializable view of a game, consumed directly by remote clients.
///
/// Tiles appear in board-index order and players in seating order, so
/// the rendering side can rely on stable positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Game id.
    pub id: u64,
    /// Lifecycle status.
    pub status: GameStatus,
    /// Index of the seat whose turn it is.
    pub active_player: u8,
    /// Board contents.
    pub tiles: Vec<TileSnapshot>,
    /// Seated players.
    pub players: Vec<PlayerSnapshot>,
}
