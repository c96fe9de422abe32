//! Board systems
//!
//! Every board event runs to completion inside one system call: a move,
//! a reset or a remote update reconciles the whole board before the system
//! returns, so two reconciliations never interleave.

use bevy::prelude::*;

use super::components::ChessBoard;
use super::events::{ResetRequested, SquareActivated};
use super::session::{Activation, InitialSync};
use crate::sync::PropertyStore;

/// Local participant identity, handed to every board's client once the
/// (simulated) host has resolved it.
#[derive(Resource, Debug, Clone, Default)]
pub struct LocalIdentity {
    pub user: Option<String>,
    /// Frames to wait before the identity becomes available
    pub delay_frames: u32,
}

pub fn handle_square_activation(
    mut commands: Commands,
    mut activations: MessageReader<SquareActivated>,
    mut boards: Query<&mut ChessBoard>,
) {
    for event in activations.read() {
        let Ok(mut board) = boards.get_mut(event.board) else {
            warn!("[SELECTION] Activation for unknown board {:?}", event.board);
            continue;
        };
        let (mut scene, game, client) = board.parts(&mut commands, event.board);

        match game.activate_square(&mut scene, client, event.square) {
            Activation::Moved { from, to, .. } => {
                info!("[SELECTION] '{}' moved {} -> {}", game.instance(), from, to)
            }
            Activation::Rejected { from, to, reselected } => debug!(
                "[SELECTION] '{}' rejected {} -> {} (reselected: {})",
                game.instance(),
                from,
                to,
                reselected
            ),
            Activation::Selected(square) => debug!("[SELECTION] '{}' selected {}", game.instance(), square),
            Activation::Ignored => {}
        }
    }
}

pub fn handle_reset_requests(
    mut commands: Commands,
    mut resets: MessageReader<ResetRequested>,
    mut boards: Query<&mut ChessBoard>,
) {
    for event in resets.read() {
        let Ok(mut board) = boards.get_mut(event.board) else {
            warn!("[BOARD] Reset for unknown board {:?}", event.board);
            continue;
        };
        let (mut scene, game, client) = board.parts(&mut commands, event.board);
        game.request_reset(&mut scene, client);
    }
}

/// Drain host change notifications and re-render affected boards.
pub fn poll_space_events(mut commands: Commands, mut boards: Query<(Entity, &mut ChessBoard)>) {
    for (entity, mut board) in &mut boards {
        let events = board.client.drain_events();
        if events.is_empty() {
            continue;
        }
        let (mut scene, game, client) = board.parts(&mut commands, entity);
        for event in &events {
            game.handle_space_event(&mut scene, client, event);
        }
    }
}

/// Startup read, polled every frame until the local identity is known.
pub fn poll_initial_sync(mut commands: Commands, mut boards: Query<(Entity, &mut ChessBoard)>) {
    for (entity, mut board) in &mut boards {
        if board.game.initial_sync_done() {
            continue;
        }
        let (mut scene, game, client) = board.parts(&mut commands, entity);
        match game.poll_initial_sync(&mut scene, client) {
            InitialSync::WaitingForIdentity | InitialSync::Done => {}
            outcome => info!("[SYNC] '{}' initial sync: {:?}", game.instance(), outcome),
        }
    }
}

/// Sign every board's client in once the identity delay has elapsed.
pub fn resolve_local_identity(
    mut identity: ResMut<LocalIdentity>,
    boards: Query<&ChessBoard>,
) {
    if identity.delay_frames > 0 {
        identity.delay_frames -= 1;
        return;
    }
    let Some(user) = identity.user.as_deref() else {
        return;
    };
    for board in &boards {
        if board.client.local_user().is_none() {
            board.client.sign_in(user);
            debug!("[SYNC] '{}' signed in as {}", board.game.instance(), user);
        }
    }
}
