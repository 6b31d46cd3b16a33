//! Player seats: pre-turn redistribution, move resolution, capture accounting.

use super::board::Board;
use super::error::MoveError;
use super::types::{AgentKind, Capture, Move, PlayerSnapshot};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::{debug, instrument, warn};

/// One seat at the table.
///
/// Human and automated seats share all state (home range, captured
/// totals) and differ only in how a move is resolved: a human seat
/// validates the move it was handed, an automated seat draws one at
/// random. A simple variant switch covers both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    id: u8,
    kind: AgentKind,
    /// Home tile indices, excluding the seat's treasure corner.
    home: RangeInclusive<usize>,
    captured_seeds: u32,
    captured_treasures: u32,
}

impl Agent {
    /// Creates a seat with the given home range and empty capture bank.
    pub(super) fn new(id: u8, kind: AgentKind, home: RangeInclusive<usize>) -> Self {
        Self {
            id,
            kind,
            home,
            captured_seeds: 0,
            captured_treasures: 0,
        }
    }

    /// Seat id.
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Seat kind.
    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    /// Home tile indices owned by this seat.
    pub fn home(&self) -> &RangeInclusive<usize> {
        &self.home
    }

    /// Seeds captured or swept so far.
    pub fn captured_seeds(&self) -> u32 {
        self.captured_seeds
    }

    /// Treasures captured so far.
    pub fn captured_treasures(&self) -> u32 {
        self.captured_treasures
    }

    /// Score: captured seeds plus 10 per captured treasure.
    pub fn score(&self) -> u32 {
        self.captured_seeds + self.captured_treasures * 10
    }

    /// Serializable view of this seat.
    pub(super) fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            id: self.id,
            kind: self.kind,
            captured_seeds: self.captured_seeds,
            captured_treasures: self.captured_treasures,
            score: self.score(),
        }
    }

    /// Credits seeds from the end-of-game sweep.
    pub(super) fn credit_sweep(&mut self, seeds: u32) {
        self.captured_seeds += seeds;
    }

    /// True if every home tile is out of seeds.
    fn is_starved(&self, board: &Board) -> bool {
        self.home
            .clone()
            .all(|i| board.tile(i).is_none_or(|t| t.seeds() == 0))
    }

    /// How many home tiles a pre-turn redistribution would reseed:
    /// one seed per tile front-to-back, capped by the captured bank.
    fn reseed_count(&self) -> usize {
        (self.captured_seeds as usize).min(self.home.clone().count())
    }

    /// Pre-turn rule: a starved seat reseeds its home range from its
    /// own captured bank, one seed per tile front-to-back, until the
    /// bank runs dry or every home tile holds a seed. A seat with any
    /// seed left in its home range is untouched.
    #[instrument(skip(self, board), fields(player = self.id))]
    pub(super) fn prepare(&mut self, board: &mut Board) {
        if !self.is_starved(board) {
            return;
        }
        let reseed = self.reseed_count();
        for i in self.home.clone().take(reseed) {
            board.tile_mut(i).update_seeds(|_| 1);
            self.captured_seeds -= 1;
        }
        if reseed > 0 {
            debug!(player = self.id, reseed, "Redistributed captured seeds into home range");
        }
    }

    /// Takes this seat's turn: redistribution if starved, move
    /// resolution, sowing, and capture accounting.
    ///
    /// Returns `Ok(None)` when the seat has no material to play (home
    /// range and bank both empty), a forced pass. Rejections happen
    /// before anything is mutated, so a failed move leaves both the
    /// board and the seat unchanged.
    pub(super) fn play(
        &mut self,
        board: &mut Board,
        info: Option<Move>,
        rng: &mut impl Rng,
    ) -> Result<Option<Capture>, MoveError> {
        let starved = self.is_starved(board);
        let reseed = if starved { self.reseed_count() } else { 0 };

        if starved && reseed == 0 {
            debug!(player = self.id, "Home range and bank empty; forced pass");
            return Ok(None);
        }

        let mv = match self.kind {
            AgentKind::Human => {
                let mv = info.ok_or(MoveError::MissingMove)?;
                if !self.home.contains(&mv.tile) {
                    warn!(player = self.id, tile = mv.tile, "Move outside home range");
                    return Err(MoveError::OutOfHomeRange(mv.tile));
                }
                // Emptiness is judged against the board as it will stand
                // after redistribution, without committing it yet.
                let has_seed = if starved {
                    mv.tile - *self.home.start() < reseed
                } else {
                    board.tile(mv.tile).is_some_and(|t| t.seeds() > 0)
                };
                if !has_seed {
                    warn!(player = self.id, tile = mv.tile, "Move on an empty tile");
                    return Err(MoveError::EmptyTile(mv.tile));
                }
                mv
            }
            AgentKind::Automated => {
                let candidates: Vec<usize> = if starved {
                    self.home.clone().take(reseed).collect()
                } else {
                    self.home
                        .clone()
                        .filter(|&i| board.tile(i).is_some_and(|t| t.seeds() > 0))
                        .collect()
                };
                let tile = candidates[rng.gen_range(0..candidates.len())];
                Move::new(tile, rng.gen_bool(0.5))
            }
        };

        self.prepare(board);
        let captured = board.sow(mv.tile, mv.clockwise);
        self.captured_seeds += captured.seeds;
        self.captured_treasures += captured.treasures;

        debug!(
            player = self.id,
            %mv,
            seeds = captured.seeds,
            treasures = captured.treasures,
            "Turn played"
        );
        Ok(Some(captured))
    }
}
