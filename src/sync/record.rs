//! Shared game-state record
//!
//! The record stored in the space is a tiny JSON object, `{ "fen": "<FEN>" }`.
//! The literal `"reset"` in place of a FEN asks every client to go back to the
//! starting position, so it must be recognised before the field is ever
//! handed to the rules engine.

use serde::{Deserialize, Serialize};

use super::error::SyncResult;

/// Value of the `fen` field that means "reset the board".
pub const RESET_SENTINEL: &str = "reset";

/// Prefix of every instance key in the property space.
pub const KEY_PREFIX: &str = "chess_game_";

/// Property key for a board instance.
pub fn instance_key(instance: &str) -> String {
    format!("{KEY_PREFIX}{instance}")
}

/// Wire form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub fen: String,
}

/// Decoded record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SharedState {
    Position(String),
    Reset,
}

impl SharedState {
    pub fn to_record(&self) -> GameRecord {
        let fen = match self {
            SharedState::Position(fen) => fen.clone(),
            SharedState::Reset => RESET_SENTINEL.to_string(),
        };
        GameRecord { fen }
    }

    pub fn to_json(&self) -> SyncResult<String> {
        Ok(serde_json::to_string(&self.to_record())?)
    }

    pub fn from_json(json: &str) -> SyncResult<Self> {
        let record: GameRecord = serde_json::from_str(json)?;
        Ok(record.into())
    }
}

impl From<GameRecord> for SharedState {
    fn from(record: GameRecord) -> Self {
        if record.fen == RESET_SENTINEL {
            SharedState::Reset
        } else {
            SharedState::Position(record.fen)
        }
    }
}
