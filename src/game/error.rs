//! Error types for game module
//!
//! Covers the chess-side failures: positions the rules engine rejects,
//! moves it refuses, and square names that do not parse.

/// Errors that can occur in game logic
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// FEN rejected either by the placement decoder or by the rules engine
    #[error("Invalid FEN '{fen}': {message}")]
    InvalidFen { fen: String, message: String },

    /// Move refused by the rules engine
    #[error("Illegal move {from} -> {to}: {message}")]
    IllegalMove {
        from: String,
        to: String,
        message: String,
    },

    /// Square name outside a1..h8
    #[error("Invalid square '{square}'")]
    InvalidSquare { square: String },
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
