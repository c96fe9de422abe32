//! Rendering module - Bevy scene host, per-board visuals and board spawning
//!
//! # Module Organization
//!
//! - `assets` - meshes and materials for one board
//! - `host` - [`host::BevyScene`], the Bevy side of the scene interface
//! - `board` - startup spawning of every requested board

pub mod assets;
pub mod board;
pub mod host;

pub use assets::BoardVisuals;
pub use board::{spawn_chess_board, BoardRequests, HostSpace};
pub use host::BevyScene;

use bevy::prelude::*;

/// Spawns the boards listed in [`BoardRequests`] at startup.
pub struct BoardRenderPlugin;

impl Plugin for BoardRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BoardRequests>()
            .add_systems(Startup, board::spawn_boards);
    }
}
