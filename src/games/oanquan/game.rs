//! Turn and lifecycle state machine for a single game.

use super::agent::Agent;
use super::board::Board;
use super::error::{JoinError, MoveError};
use super::types::{AgentKind, GameSnapshot, GameStatus, Move, TileSnapshot};
use crate::config::GameConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, instrument, warn};

/// Snapshot observer stored in a per-game registry.
type Observer = Box<dyn Fn(&GameSnapshot) + Send>;

/// A single game: board, seats, turn pointer, and observer registry.
///
/// The lifecycle runs `AwaitingPlayers → InProgress → Ended` and never
/// backwards. Moves are accepted only from the active seat of a full
/// table; every rejection is a typed error that leaves all state
/// unchanged. Once the last treasure leaves the board the game runs a
/// one-time sweep and becomes immutable.
///
/// A game instance is single-threaded and fully synchronous: a move
/// runs sowing, scoring, the turn advance, the terminal check, and
/// observer dispatch to completion before returning. Callers that share
/// a game across threads must serialize `submit_move` per game (see
/// [`SessionManager`](crate::SessionManager)).
pub struct Game {
    id: u64,
    config: GameConfig,
    board: Board,
    players: Vec<Agent>,
    active_player: usize,
    status: GameStatus,
    rng: StdRng,
    update_observers: Vec<Observer>,
    end_observers: Vec<Observer>,
}

impl Game {
    /// Creates a game with every seat open.
    #[instrument(skip(config))]
    pub fn new(id: u64, config: GameConfig) -> Self {
        let board = Board::new(&config);
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_entropy(),
        };
        info!(game_id = id, "Created game");
        Self {
            id,
            config,
            board,
            players: Vec::new(),
            active_player: 0,
            status: GameStatus::AwaitingPlayers,
            rng,
            update_observers: Vec::new(),
            end_observers: Vec::new(),
        }
    }

    /// Creates a game with `opponents` automated seats already taken,
    /// leaving the rest open for humans. At least one seat stays open.
    #[instrument(skip(config))]
    pub fn with_automated(id: u64, config: GameConfig, opponents: usize) -> Self {
        let mut game = Self::new(id, config);
        let max = *game.config.players() - 1;
        for _ in 0..opponents.min(max) {
            game.seat(AgentKind::Automated);
        }
        game
    }

    /// Game id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Lifecycle status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// True once every seat is taken.
    pub fn is_full(&self) -> bool {
        self.players.len() >= *self.config.players()
    }

    /// True once the game has reached its terminal state.
    pub fn is_ended(&self) -> bool {
        self.status == GameStatus::Ended
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Seated players in seating order.
    pub fn players(&self) -> &[Agent] {
        &self.players
    }

    /// Seat index whose turn it is.
    pub fn active_player(&self) -> u8 {
        self.active_player as u8
    }

    /// Seats the next player, assigning the home range for that seat.
    fn seat(&mut self, kind: AgentKind) -> u8 {
        let seat = self.players.len() as u8;
        let home = self.board.home_range(seat as usize);
        self.players.push(Agent::new(seat, kind, home));
        if self.is_full() {
            info!(game_id = self.id, "All seats filled; game in progress");
            self.status = GameStatus::InProgress;
        }
        seat
    }

    /// Seats a human player and returns their id.
    ///
    /// # Errors
    ///
    /// Returns [`JoinError::GameFull`] once every seat is taken.
    #[instrument(skip(self), fields(game_id = self.id))]
    pub fn add_player(&mut self) -> Result<u8, JoinError> {
        if self.is_full() {
            warn!(game_id = self.id, "Join rejected: game is full");
            return Err(JoinError::GameFull);
        }
        let seat = self.seat(AgentKind::Human);
        info!(game_id = self.id, player_id = seat, "Player seated");
        Ok(seat)
    }

    /// Registers an observer notified after every non-terminal move.
    pub fn on_update(&mut self, callback: impl Fn(&GameSnapshot) + Send + 'static) {
        self.update_observers.push(Box::new(callback));
    }

    /// Registers an observer notified exactly once, on the terminal move.
    pub fn on_end(&mut self, callback: impl Fn(&GameSnapshot) + Send + 'static) {
        self.end_observers.push(Box::new(callback));
    }

    /// Submits a move for the given player.
    ///
    /// Validates turn ownership, lets the seat take its turn (pre-turn
    /// redistribution, sowing, capture accounting, or a forced pass if
    /// the seat has no material), advances the turn pointer, runs the
    /// terminal check, and notifies observers. Automated seats ignore
    /// `info`; human seats must supply it.
    ///
    /// # Errors
    ///
    /// Any [`MoveError`] leaves the game, including the turn pointer,
    /// unchanged.
    #[instrument(skip(self), fields(game_id = self.id))]
    pub fn submit_move(&mut self, player_id: u8, info: Option<Move>) -> Result<(), MoveError> {
        match self.status {
            GameStatus::Ended => return Err(MoveError::GameEnded),
            GameStatus::AwaitingPlayers => return Err(MoveError::AwaitingPlayers),
            GameStatus::InProgress => {}
        }
        if player_id as usize >= self.players.len() {
            warn!(player_id, "Move from unseated player");
            return Err(MoveError::UnknownPlayer(player_id));
        }
        if player_id as usize != self.active_player {
            warn!(player_id, active = self.active_player, "Move out of turn");
            return Err(MoveError::NotYourTurn(player_id));
        }

        let agent = &mut self.players[self.active_player];
        let outcome = agent.play(&mut self.board, info, &mut self.rng)?;
        if outcome.is_none() {
            debug!(player_id, "Forced pass");
        }

        self.active_player = (self.active_player + 1) % self.players.len();

        if self.board.all_treasures_captured() {
            info!(game_id = self.id, "Last treasure captured; game over");
            self.status = GameStatus::Ended;
            self.sweep();
            let snapshot = self.snapshot();
            for observer in &self.end_observers {
                observer(&snapshot);
            }
        } else {
            let snapshot = self.snapshot();
            for observer in &self.update_observers {
                observer(&snapshot);
            }
        }
        Ok(())
    }

    /// One-time end-of-game sweep: each seat collects the seeds left in
    /// its home range. Runs atomically with the transition to `Ended`.
    fn sweep(&mut self) {
        for agent in &mut self.players {
            let mut gained = 0;
            for i in agent.home().clone() {
                let seeds = self.board.tile(i).map_or(0, |t| t.seeds());
                self.board.tile_mut(i).update_seeds(|_| 0);
                gained += seeds;
            }
            debug!(player_id = agent.id(), gained, "Swept home range");
            agent.credit_sweep(gained);
        }
    }

    /// Serializable view of the game for observers and remote clients.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            id: self.id,
            status: self.status,
            active_player: self.active_player as u8,
            tiles: self
                .board
                .tiles()
                .iter()
                .map(|t| TileSnapshot {
                    seeds: t.seeds(),
                    treasures: t.treasures(),
                })
                .collect(),
            players: self.players.iter().map(Agent::snapshot).collect(),
        }
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("id", &self.id)
            .field("status", &self.status)
            .field("active_player", &self.active_player)
            .field("players", &self.players)
            .field("board", &self.board)
            .finish_non_exhaustive()
    }
}
