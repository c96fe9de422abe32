//! Game plugin - board messages and systems
//!
//! Registers the click messages and the systems that turn them, and host
//! change notifications, into board updates. Rendering setup lives in
//! [`crate::rendering::BoardRenderPlugin`]; this plugin works headless under
//! `MinimalPlugins`, which is how the integration tests drive it.
//!
//! Systems run in a fixed order each frame:
//! identity -> initial sync -> remote changes -> resets -> clicks.

use bevy::prelude::*;

use super::events::{ResetRequested, SquareActivated};
use super::systems::*;

pub struct ChessGamePlugin;

impl Plugin for ChessGamePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SquareActivated>()
            .add_message::<ResetRequested>()
            .init_resource::<LocalIdentity>();

        app.add_systems(
            Update,
            (
                resolve_local_identity,
                poll_initial_sync,
                poll_space_events,
                handle_reset_requests,
                handle_square_activation,
            )
                .chain(),
        );
    }
}
