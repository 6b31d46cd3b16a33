//! Board geometry and the sowing / capture algorithm.

use super::types::{Capture, Tile};
use crate::config::GameConfig;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::{debug, instrument, trace};

/// Circular array of tiles plus the rules that mutate it.
///
/// Index arithmetic is always taken modulo the tile count, so sowing
/// wraps at either end of the board. Every tile whose index is a
/// multiple of the tiles-per-player span is a treasure corner; at
/// construction it holds exactly one treasure, while every other tile
/// starts with the configured seed count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<Tile>,
    tiles_per_player: usize,
}

impl Board {
    /// Builds the initial board layout for the given configuration.
    #[instrument(skip(config), fields(players = *config.players(), tiles_per_player = *config.tiles_per_player()))]
    pub fn new(config: &GameConfig) -> Self {
        let span = *config.tiles_per_player();
        let len = *config.players() * span;
        let tiles = (0..len)
            .map(|i| {
                if i % span == 0 {
                    Tile::new(0, 1)
                } else {
                    Tile::new(*config.seeds_per_tile(), 0)
                }
            })
            .collect();
        debug!(len, "Board initialized");
        Self {
            tiles,
            tiles_per_player: span,
        }
    }

    /// Number of tiles on the board.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// True if the board has no tiles (never the case for a valid config).
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All tiles in index order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// The tile at `index`, if in bounds.
    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Tiles-per-player span used for corner and home-range geometry.
    pub fn tiles_per_player(&self) -> usize {
        self.tiles_per_player
    }

    /// True if `index` is a treasure corner.
    pub fn is_corner(&self, index: usize) -> bool {
        index % self.tiles_per_player == 0
    }

    /// Inclusive tile-index range owned by the given seat, excluding the
    /// seat's treasure corner.
    pub fn home_range(&self, seat: usize) -> RangeInclusive<usize> {
        let start = seat * self.tiles_per_player + 1;
        start..=start + self.tiles_per_player - 2
    }

    /// Total treasures still on the board.
    pub fn treasures_remaining(&self) -> u32 {
        self.tiles.iter().map(Tile::treasures).sum()
    }

    /// True once every tile's treasure count is zero. Terminal condition.
    pub fn all_treasures_captured(&self) -> bool {
        self.tiles.iter().all(|t| t.treasures() == 0)
    }

    /// Mutable access for the engine (pre-turn redistribution, sweep).
    pub(super) fn tile_mut(&mut self, index: usize) -> &mut Tile {
        &mut self.tiles[index]
    }

    /// Steps one tile in the given direction, wrapping circularly.
    ///
    /// The `+ len` keeps the arithmetic positive under a downward step.
    fn step(&self, index: usize, clockwise: bool) -> usize {
        let len = self.tiles.len();
        if clockwise {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        }
    }

    /// A landing here ends the turn without touching the adjacent
    /// treasure corner: the corner itself, or the tile just before the
    /// next corner.
    fn is_boundary(&self, index: usize) -> bool {
        let pos = index % self.tiles_per_player;
        pos == 0 || pos == self.tiles_per_player - 1
    }

    /// Runs one full sowing turn starting from `start`.
    ///
    /// Picks up the start tile's seeds and drops them one per tile in the
    /// chosen direction. From the landing tile the turn either ends at a
    /// board boundary, captures the tile two steps ahead when the tile one
    /// step ahead is empty, or picks up the next tile's seeds and keeps
    /// sowing. The captured tile is emptied when its contents are taken,
    /// so board material plus captures is conserved.
    ///
    /// The caller must have validated that the start tile holds seeds.
    #[instrument(skip(self))]
    pub(super) fn sow(&mut self, start: usize, clockwise: bool) -> Capture {
        debug_assert!(
            self.tiles[start].seeds() > 0,
            "sow called on an empty tile; callers validate first"
        );

        let mut index = start;
        loop {
            let mut in_hand = self.tiles[index].seeds();
            self.tiles[index].update_seeds(|_| 0);

            while in_hand > 0 {
                index = self.step(index, clockwise);
                self.tiles[index].update_seeds(|n| n + 1);
                in_hand -= 1;
            }
            trace!(landing = index, "Sowing pass complete");

            if self.is_boundary(index) {
                debug!(landing = index, "Turn ends at board boundary");
                return Capture::NONE;
            }

            let next = self.step(index, clockwise);
            if self.tiles[next].is_empty() {
                // Empty tile ahead: capture the tile beyond it.
                let target = self.step(next, clockwise);
                let captured = self.tile_mut(target).take();
                debug!(
                    landing = index,
                    target,
                    seeds = captured.seeds,
                    treasures = captured.treasures,
                    "Capture"
                );
                return captured;
            }

            // Non-empty tile ahead: chain another sowing pass from it.
            index = next;
        }
    }
}
