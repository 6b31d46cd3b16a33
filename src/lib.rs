//! Ô ăn quan rules engine with multiplayer session management.
//!
//! This library implements the two-row mancala-style capture game
//! Ô ăn quan: the circular board with its sowing and capture rules,
//! human and automated seats, the turn and lifecycle state machine,
//! and a session registry that serializes access for a surrounding
//! transport layer.
//!
//! # Architecture
//!
//! - **Board**: circular tile array owning the sowing / capture
//!   algorithm and the all-treasures-captured terminal check
//! - **Agent**: per-seat turn logic (pre-turn redistribution, move
//!   validation or random draw, capture accounting)
//! - **Game**: seating, turn ownership, end-of-game sweep, and
//!   per-instance update / end observers
//! - **Session**: thread-safe registry of games with per-game move
//!   serialization and wire-ready JSON snapshots
//!
//! # Example
//!
//! ```
//! use oanquan::{GameConfig, Move, SessionManager};
//!
//! let sessions = SessionManager::new();
//! let config = GameConfig::default().with_seed(7);
//!
//! // One human against one automated opponent.
//! sessions
//!     .create_session("table-1".into(), config, 1)
//!     .expect("fresh session id");
//! let me = sessions.join("table-1").expect("open seat");
//!
//! // The automated seat moves first; then it is our turn.
//! sessions.submit_move("table-1", 0, None).expect("automated turn");
//!
//! // Seat 1 owns tiles 7-11; sow from any of them that holds seeds.
//! let snapshot = sessions.snapshot("table-1").expect("live session");
//! let tile = (7..=11).find(|&i| snapshot.tiles[i].seeds > 0).expect("seeded tile");
//! sessions
//!     .submit_move("table-1", me, Some(Move::new(tile, true)))
//!     .expect("legal move");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Game engine
pub use games::oanquan::{
    Agent, AgentKind, Board, Capture, Game, GameSnapshot, GameStatus, JoinError, Move, MoveError,
    PlayerSnapshot, Tile, TileSnapshot,
};

// Crate-level exports - Session management
pub use session::{GameSession, SessionError, SessionId, SessionManager};
