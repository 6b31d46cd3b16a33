//! Game session management for the multiplayer layer.
//!
//! The core engine is synchronous and provides no locking of its own,
//! so the registry here holds its mutex across every state-changing
//! call. That gives the surrounding transport the guarantee it needs:
//! at most one in-flight move per game at any time.

use crate::config::GameConfig;
use crate::games::oanquan::{Game, GameSnapshot, JoinError, Move, MoveError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game session.
pub type SessionId = String;

/// A game session owned by the registry.
#[derive(Debug)]
pub struct GameSession {
    /// Session id.
    pub id: SessionId,
    /// The game itself.
    pub game: Game,
}

/// Errors from the session registry.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// No session with the requested id.
    #[display("Session not found")]
    NotFound,

    /// A session with the requested id already exists.
    #[display("Session already exists")]
    AlreadyExists,

    /// Seating was rejected by the game.
    #[display("{}", _0)]
    Join(JoinError),

    /// The move was rejected by the game.
    #[display("{}", _0)]
    Move(MoveError),
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Join(e) => Some(e),
            SessionError::Move(e) => Some(e),
            _ => None,
        }
    }
}

impl From<JoinError> for SessionError {
    fn from(err: JoinError) -> Self {
        SessionError::Join(err)
    }
}

impl From<MoveError> for SessionError {
    fn from(err: MoveError) -> Self {
        SessionError::Move(err)
    }
}

/// Manages all game sessions.
#[derive(Debug, Clone)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<SessionId, GameSession>>>,
    next_game_id: Arc<AtomicU64>,
}

impl SessionManager {
    /// Creates a new session manager.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session manager");
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            next_game_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Creates a new game session, optionally pre-seating automated
    /// opponents so a single human can complete the table.
    #[instrument(skip(self, config))]
    pub fn create_session(
        &self,
        id: SessionId,
        config: GameConfig,
        automated_opponents: usize,
    ) -> Result<SessionId, SessionError> {
        let mut sessions = self.sessions.lock().unwrap();

        if sessions.contains_key(&id) {
            warn!(session_id = %id, "Session already exists");
            return Err(SessionError::AlreadyExists);
        }

        let game_id = self.next_game_id.fetch_add(1, Ordering::Relaxed);
        let game = Game::with_automated(game_id, config, automated_opponents);
        sessions.insert(id.clone(), GameSession { id: id.clone(), game });

        info!(session_id = %id, game_id, "Created new session");
        Ok(id)
    }

    /// Seats a human player in the session, returning their player id.
    #[instrument(skip(self))]
    pub fn join(&self, id: &str) -> Result<u8, SessionError> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions.get_mut(id).ok_or(SessionError::NotFound)?;
        let player_id = session.game.add_player()?;
        info!(session_id = id, player_id, "Player joined session");
        Ok(player_id)
    }

    /// Submits a move for a player in the session.
    ///
    /// The registry lock is held for the duration of the move, so moves
    /// within one game are always serialized.
    #[instrument(skip(self))]
    pub fn submit_move(
        &self,
        id: &str,
        player_id: u8,
        info: Option<Move>,
    ) -> Result<(), SessionError> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions.get_mut(id).ok_or_else(|| {
            debug!(session_id = id, "Session not found");
            SessionError::NotFound
        })?;
        session.game.submit_move(player_id, info)?;
        Ok(())
    }

    /// Current snapshot of the session's game.
    #[instrument(skip(self))]
    pub fn snapshot(&self, id: &str) -> Result<GameSnapshot, SessionError> {
        let sessions = self.sessions.lock().unwrap();
        let session = sessions.get(id).ok_or(SessionError::NotFound)?;
        Ok(session.game.snapshot())
    }

    /// Wire-ready JSON rendering of the session's game snapshot.
    #[instrument(skip(self))]
    pub fn snapshot_json(&self, id: &str) -> Result<String, SessionError> {
        let snapshot = self.snapshot(id)?;
        // GameSnapshot is a plain tree of structs; serialization cannot fail.
        Ok(serde_json::to_string(&snapshot).expect("snapshot serializes"))
    }

    /// Registers an update observer on the session's game.
    #[instrument(skip(self, callback))]
    pub fn subscribe_update(
        &self,
        id: &str,
        callback: impl Fn(&GameSnapshot) + Send + 'static,
    ) -> Result<(), SessionError> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions.get_mut(id).ok_or(SessionError::NotFound)?;
        session.game.on_update(callback);
        Ok(())
    }

    /// Registers an end observer on the session's game.
    #[instrument(skip(self, callback))]
    pub fn subscribe_end(
        &self,
        id: &str,
        callback: impl Fn(&GameSnapshot) + Send + 'static,
    ) -> Result<(), SessionError> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions.get_mut(id).ok_or(SessionError::NotFound)?;
        session.game.on_end(callback);
        Ok(())
    }

    /// Lists all active session IDs.
    #[instrument(skip(self))]
    pub fn list_sessions(&self) -> Vec<SessionId> {
        let sessions = self.sessions.lock().unwrap();
        let ids: Vec<_> = sessions.keys().cloned().collect();
        debug!(count = ids.len(), "Listed sessions");
        ids
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
