//! Scene capability interface
//!
//! The board logic never touches a concrete rendering API. Everything it needs
//! from the host (tiles, piece objects, highlights, the reset button) goes
//! through [`SceneHost`]. The Bevy implementation lives in
//! [`crate::rendering::host`]; [`HeadlessScene`] records calls without
//! rendering anything.

pub mod headless;
pub mod layout;

pub use headless::{HeadlessScene, SceneOp};
pub use layout::BoardLayout;

use std::fmt::Debug;
use std::hash::Hash;

use crate::game::types::{BoardSquare, PieceDescriptor};

/// Color role of a board tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileHighlight {
    #[default]
    Normal,
    Selected,
    ValidTarget,
}

/// Errors a scene host can report
#[derive(Debug, Clone, thiserror::Error)]
pub enum SceneError {
    /// No model is available for this piece
    #[error("Missing 3D asset for {descriptor}: {path}")]
    MissingAsset {
        descriptor: PieceDescriptor,
        path: String,
    },

    /// Host refused to create the object
    #[error("Host rejected object creation: {message}")]
    HostRejected { message: String },
}

/// What the board needs from a 3D host
///
/// Calls are made from a single thread and each one completes before the next
/// is issued, so implementations need no internal locking.
pub trait SceneHost {
    /// Handle to a rendered piece object
    type Object: Copy + Eq + Hash + Debug;

    /// Create the 64 clickable tiles.
    fn create_tile_grid(&mut self) -> Result<(), SceneError>;

    /// Create a piece object for `descriptor` standing on `square`.
    fn create_piece(
        &mut self,
        descriptor: PieceDescriptor,
        square: BoardSquare,
    ) -> Result<Self::Object, SceneError>;

    /// Move an existing piece object to `square`.
    fn relocate_piece(&mut self, object: Self::Object, descriptor: PieceDescriptor, square: BoardSquare);

    fn destroy_piece(&mut self, object: Self::Object);

    fn set_tile_highlight(&mut self, square: BoardSquare, highlight: TileHighlight);

    /// Create the clickable reset button.
    fn create_reset_control(&mut self) -> Result<(), SceneError>;
}
