mod agent;
mod board;
mod error;
mod game;
mod types;

pub use agent::Agent;
pub use board::Board;
pub use error::{JoinError, MoveError};
pub use game::Game;
pub use types::{
    AgentKind, Capture, GameSnapshot, GameStatus, Move, PlayerSnapshot, Tile, TileSnapshot,
};
