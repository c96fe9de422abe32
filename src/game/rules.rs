//! Rules adapter over the `shakmaty` engine
//!
//! The engine is authoritative for legality, FEN parsing and FEN export. This
//! adapter converts between the board vocabulary in [`super::types`] and the
//! engine's own square/role types, and never advances the position on a
//! failed operation.
//!
//! Exported FENs always carry the en passant square after a double pawn push
//! (`e3` after `e2e4`), regardless of whether a capture is actually possible.

use std::collections::BTreeSet;

use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Outcome, Position, Role, Square};
use tracing::{debug, info};

use super::error::{GameError, GameResult};
use super::types::{BoardSquare, PieceColor, PieceDescriptor, PieceKind};

/// Standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Chess position plus the operations the board needs from a rules engine
#[derive(Debug, Clone, Default)]
pub struct RulesAdapter {
    position: Chess,
}

impl RulesAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the current position and return to the starting position.
    pub fn reset(&mut self) {
        self.position = Chess::default();
        debug!("[RULES] Reset to starting position");
    }

    /// Replace the current position with `fen`.
    ///
    /// On failure the current position is left untouched.
    pub fn load_position(&mut self, fen: &str) -> GameResult<()> {
        let invalid = |message: String| GameError::InvalidFen {
            fen: fen.to_string(),
            message,
        };

        let parsed = Fen::from_ascii(fen.trim().as_bytes()).map_err(|e| invalid(e.to_string()))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| invalid(e.to_string()))?;

        self.position = position;
        debug!("[RULES] Loaded position {}", fen);
        Ok(())
    }

    /// Play `from -> to`, promoting to `promotion` (queen when `None`).
    ///
    /// Castling is expressed as the king's two-square move (`e1 -> g1`).
    /// Returns the new FEN.
    pub fn apply_move(
        &mut self,
        from: BoardSquare,
        to: BoardSquare,
        promotion: Option<PieceKind>,
    ) -> GameResult<String> {
        let illegal = |message: &str| GameError::IllegalMove {
            from: from.to_string(),
            to: to.to_string(),
            message: message.to_string(),
        };

        let Some(piece) = self.occupant(from) else {
            return Err(illegal("no piece on origin square"));
        };
        if color_to_engine(piece.color) != self.position.turn() {
            return Err(illegal("not this side's turn"));
        }

        let promotion = role_from_kind(promotion.unwrap_or(PieceKind::Queen));
        let origin = to_engine_square(from);
        let target = to_engine_square(to);
        let turn = self.position.turn();

        let chosen = self.position.legal_moves().into_iter().find(|m| {
            m.from() == Some(origin)
                && destination(m, turn) == target
                && m.promotion().map_or(true, |role| role == promotion)
        });

        let Some(chosen) = chosen else {
            return Err(illegal("not a legal move"));
        };

        self.position.play_unchecked(&chosen);
        let fen = self.current_position();
        info!("[RULES] {} -> {} played, now {}", from, to, fen);

        if let Some(outcome) = self.outcome() {
            info!("[RULES] Game over: {:?}", outcome);
        }
        Ok(fen)
    }

    /// Squares the piece on `square` may legally move to; empty if none.
    pub fn legal_destinations(&self, square: BoardSquare) -> Vec<BoardSquare> {
        let origin = to_engine_square(square);
        let turn = self.position.turn();

        self.position
            .legal_moves()
            .iter()
            .filter(|m| m.from() == Some(origin))
            .filter_map(|m| from_engine_square(destination(m, turn)))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Current position as FEN.
    pub fn current_position(&self) -> String {
        Fen(self.position.clone().into_setup(EnPassantMode::Always)).to_string()
    }

    /// Piece standing on `square`, if any.
    pub fn occupant(&self, square: BoardSquare) -> Option<PieceDescriptor> {
        self.position
            .board()
            .piece_at(to_engine_square(square))
            .and_then(|piece| PieceDescriptor::from_char(piece.char()))
    }

    pub fn side_to_move(&self) -> PieceColor {
        match self.position.turn() {
            Color::White => PieceColor::White,
            Color::Black => PieceColor::Black,
        }
    }

    /// Checkmate or stalemate, if the game has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        self.position.outcome()
    }
}

fn destination(m: &Move, turn: Color) -> Square {
    // The engine encodes castling as king-takes-rook; the board clicks on
    // the king's landing square instead.
    match m.castling_side() {
        Some(side) => side.king_to(turn),
        None => m.to(),
    }
}

fn to_engine_square(square: BoardSquare) -> Square {
    Square::new(square.index() as u32)
}

fn from_engine_square(square: Square) -> Option<BoardSquare> {
    BoardSquare::from_chars(square.file().char(), square.rank().char())
}

fn color_to_engine(color: PieceColor) -> Color {
    match color {
        PieceColor::White => Color::White,
        PieceColor::Black => Color::Black,
    }
}

fn role_from_kind(kind: PieceKind) -> Role {
    match kind {
        PieceKind::Pawn => Role::Pawn,
        PieceKind::Knight => Role::Knight,
        PieceKind::Bishop => Role::Bishop,
        PieceKind::Rook => Role::Rook,
        PieceKind::Queen => Role::Queen,
        PieceKind::King => Role::King,
    }
}
