//! Error types for seating and move submission.
//!
//! Every rejected operation is surfaced as a typed error and leaves the
//! game state untouched, so callers can retry with valid input.

/// Error returned when a player cannot be seated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum JoinError {
    /// Every seat is already taken.
    #[display("Game is full")]
    GameFull,
}

impl std::error::Error for JoinError {}

/// Error returned when a submitted move is rejected.
///
/// None of these advance the turn or change any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The game has already ended.
    #[display("Game is already over")]
    GameEnded,

    /// Seats are still open; play has not begun.
    #[display("Game is still waiting for players")]
    AwaitingPlayers,

    /// The submitting player is not seated in this game.
    #[display("Unknown player {}", _0)]
    UnknownPlayer(u8),

    /// It is another seat's turn.
    #[display("Not player {}'s turn", _0)]
    NotYourTurn(u8),

    /// The chosen tile index is outside the player's home range.
    #[display("Tile {} is outside the player's home range", _0)]
    OutOfHomeRange(usize),

    /// The chosen tile has no seeds to sow.
    #[display("Tile {} has no seeds", _0)]
    EmptyTile(usize),

    /// A human seat submitted no move data.
    #[display("Human player must supply a move")]
    MissingMove,
}

impl std::error::Error for MoveError {}
