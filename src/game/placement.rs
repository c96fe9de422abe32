//! FEN placement decoding
//!
//! Turns the first field of a FEN into a square -> piece mapping by walking
//! ranks 8 down to 1 and files a to h, expanding digits as runs of empty
//! squares. Only the placement field is inspected; side to move, castling
//! rights and clocks are the rules engine's business.

use std::collections::BTreeMap;

use super::error::{GameError, GameResult};
use super::types::{BoardSquare, PieceDescriptor, BOARD_SIZE};

/// Target board layout: one entry per occupied square
pub type Placement = BTreeMap<BoardSquare, PieceDescriptor>;

/// Decode the placement field of `fen`.
///
/// Rejects anything that would not describe exactly 8 ranks of 8 files,
/// leaving legality (king counts and the like) to the rules engine.
pub fn decode_placement(fen: &str) -> GameResult<Placement> {
    let invalid = |message: String| GameError::InvalidFen {
        fen: fen.to_string(),
        message,
    };

    let field = fen
        .split_whitespace()
        .next()
        .ok_or_else(|| invalid("empty FEN".to_string()))?;

    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != BOARD_SIZE as usize {
        return Err(invalid(format!("expected 8 ranks, found {}", ranks.len())));
    }

    let mut placement = Placement::new();

    // First rank listed in a FEN is rank 8.
    for (row, rank_text) in ranks.iter().enumerate() {
        let rank = BOARD_SIZE - 1 - row as u8;
        let mut file: u8 = 0;

        for c in rank_text.chars() {
            if let Some(run) = c.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(invalid(format!("bad empty-square run '{c}'")));
                }
                file += run as u8;
            } else {
                let descriptor = PieceDescriptor::from_char(c)
                    .ok_or_else(|| invalid(format!("unknown piece '{c}'")))?;
                let square = BoardSquare::new(file, rank)
                    .ok_or_else(|| invalid(format!("rank {} overflows", rank + 1)))?;
                placement.insert(square, descriptor);
                file += 1;
            }

            if file > BOARD_SIZE {
                return Err(invalid(format!("rank {} overflows", rank + 1)));
            }
        }

        if file != BOARD_SIZE {
            return Err(invalid(format!(
                "rank {} covers {} files",
                rank + 1,
                file
            )));
        }
    }

    Ok(placement)
}
