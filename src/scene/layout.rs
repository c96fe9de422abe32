//! Square -> local board coordinates
//!
//! The board is centred on its root: with `offset = size * tile / 2 - tile / 2`,
//! file `a` sits at `x = -offset` and rank 1 at `z = +offset`, so white plays
//! from the +Z side. Pieces stand a fixed base height above the tiles plus a
//! per-type lift.

use bevy::math::Vec3;

use crate::game::types::{BoardSquare, PieceKind, BOARD_SIZE};

/// Base height of every piece above the tile plane.
pub const PIECE_BASE_HEIGHT: f32 = 0.15;

/// Board geometry in board-local units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub board_size: u8,
    pub tile_size: f32,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            tile_size: 1.0,
        }
    }
}

impl BoardLayout {
    pub fn offset(&self) -> f32 {
        self.board_size as f32 * self.tile_size / 2.0 - self.tile_size / 2.0
    }

    /// Centre of the tile at `square`, on the tile plane.
    pub fn tile_position(&self, square: BoardSquare) -> Vec3 {
        let offset = self.offset();
        Vec3::new(
            square.file() as f32 * self.tile_size - offset,
            0.0,
            -(square.rank() as f32) * self.tile_size + offset,
        )
    }

    /// Where a piece of `kind` stands on `square`.
    pub fn piece_position(&self, square: BoardSquare, kind: PieceKind) -> Vec3 {
        self.tile_position(square) + Vec3::Y * (PIECE_BASE_HEIGHT + kind_lift(kind))
    }

    /// Edge length of the whole board.
    pub fn extent(&self) -> f32 {
        self.board_size as f32 * self.tile_size
    }
}

/// Extra height per piece type so taller models clear the tile.
pub fn kind_lift(kind: PieceKind) -> f32 {
    match kind {
        PieceKind::Pawn => 0.0,
        PieceKind::Rook => 0.02,
        PieceKind::Knight => 0.03,
        PieceKind::Bishop => 0.04,
        PieceKind::Queen => 0.06,
        PieceKind::King => 0.08,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> BoardSquare {
        name.parse().unwrap()
    }

    #[test]
    fn test_corners_are_symmetric() {
        let layout = BoardLayout::default();
        assert_eq!(layout.offset(), 3.5);
        assert_eq!(layout.tile_position(sq("a1")), Vec3::new(-3.5, 0.0, 3.5));
        assert_eq!(layout.tile_position(sq("h8")), Vec3::new(3.5, 0.0, -3.5));
        assert_eq!(layout.tile_position(sq("h1")), Vec3::new(3.5, 0.0, 3.5));
    }

    #[test]
    fn test_tile_size_scales_positions() {
        let layout = BoardLayout {
            board_size: 8,
            tile_size: 0.1,
        };
        let e4 = layout.tile_position(sq("e4"));
        assert!((e4.x - 0.05).abs() < 1e-6);
        assert!((e4.z - 0.05).abs() < 1e-6);
        assert!((layout.extent() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_pieces_stand_above_tiles() {
        let layout = BoardLayout::default();
        let pawn = layout.piece_position(sq("e2"), PieceKind::Pawn);
        let king = layout.piece_position(sq("e1"), PieceKind::King);
        assert!((pawn.y - PIECE_BASE_HEIGHT).abs() < 1e-6);
        assert!(king.y > pawn.y);
    }
}
