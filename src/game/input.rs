//! Click observers for tiles, pieces and the reset control
//!
//! Tile and piece clicks collapse into the same [`SquareActivated`] message.
//! A piece is resolved to the square it stands on *now* through the owning
//! board's piece map.

use bevy::picking::events::{Click, Pointer};
use bevy::picking::pointer::PointerButton;
use bevy::prelude::*;

use super::components::{BoardPiece, ChessBoard, ResetControl, Tile};
use super::events::{ResetRequested, SquareActivated};

/// Helper to check if primary button (left click) was used
fn is_primary(button: PointerButton) -> bool {
    matches!(button, PointerButton::Primary)
}

pub fn on_tile_click(
    click: On<Pointer<Click>>,
    tiles: Query<&Tile>,
    mut activations: MessageWriter<SquareActivated>,
) {
    if !is_primary(click.event.button) {
        return;
    }
    let Ok(tile) = tiles.get(click.entity) else {
        warn!("[INPUT] Clicked entity {:?} has no Tile component", click.entity);
        return;
    };
    debug!("[INPUT] Tile {} clicked", tile.square);
    activations.write(SquareActivated {
        board: tile.board,
        square: tile.square,
    });
}

pub fn on_piece_click(
    click: On<Pointer<Click>>,
    pieces: Query<&BoardPiece>,
    boards: Query<&ChessBoard>,
    mut activations: MessageWriter<SquareActivated>,
) {
    if !is_primary(click.event.button) {
        return;
    }
    let entity = click.entity;
    let Ok(piece) = pieces.get(entity) else {
        warn!("[INPUT] Clicked entity {:?} has no BoardPiece component", entity);
        return;
    };
    let Ok(board) = boards.get(piece.board) else {
        warn!("[INPUT] Piece {:?} belongs to missing board {:?}", entity, piece.board);
        return;
    };
    match board.game.square_of(entity) {
        Some(square) => {
            debug!("[INPUT] {} on {} clicked", piece.descriptor, square);
            activations.write(SquareActivated {
                board: piece.board,
                square,
            });
        }
        None => warn!("[INPUT] Piece {:?} is not on the board", entity),
    }
}

pub fn on_reset_click(
    click: On<Pointer<Click>>,
    controls: Query<&ResetControl>,
    mut resets: MessageWriter<ResetRequested>,
) {
    if !is_primary(click.event.button) {
        return;
    }
    if let Ok(control) = controls.get(click.entity) {
        resets.write(ResetRequested {
            board: control.board,
        });
    }
}
