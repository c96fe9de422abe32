use bevy::prelude::*;

use super::types::BoardSquare;

/// A tile, or the piece standing on it, was clicked
#[derive(Event, Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareActivated {
    pub board: Entity,
    pub square: BoardSquare,
}

/// The board's reset control was clicked
#[derive(Event, Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetRequested {
    pub board: Entity,
}
