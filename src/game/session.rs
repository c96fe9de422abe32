//! Per-board game context
//!
//! [`ChessGame`] bundles everything one board instance owns: the rules
//! position, the rendered piece map, the click selection and the sync
//! channel for its instance key. Nothing here is global, so any number of
//! boards can share a process and a property space.
//!
//! Local actions (moves, resets) are applied to the scene immediately and
//! then published; the echo of our own write, if the host delivers one, is
//! reconciled again and changes nothing.

use tracing::{debug, info, warn};

use super::reconcile::{BoardReconciler, ReconcileReport};
use super::rules::RulesAdapter;
use super::selection::Selection;
use super::types::{BoardSquare, PieceKind};
use crate::scene::SceneHost;
use crate::sync::{PropertyStore, SharedState, SpaceEvent, SyncChannel};

/// Result of activating a square
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Empty square with nothing selected
    Ignored,
    Selected(BoardSquare),
    /// Move played; carries the new FEN
    Moved {
        from: BoardSquare,
        to: BoardSquare,
        fen: String,
    },
    /// Move refused; the clicked square was selected instead when occupied
    Rejected {
        from: BoardSquare,
        to: BoardSquare,
        reselected: bool,
    },
}

/// Progress of the startup read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialSync {
    /// Host has not told us who we are yet; poll again later
    WaitingForIdentity,
    /// Nothing stored for this instance
    Empty,
    Applied,
    /// Stored record could not be used; local state kept
    Ignored,
    /// An earlier poll already performed the startup read
    Done,
}

#[derive(Debug)]
pub struct ChessGame<O> {
    instance: String,
    rules: RulesAdapter,
    reconciler: BoardReconciler<O>,
    selection: Selection,
    channel: SyncChannel,
    initial_sync_done: bool,
}

impl<O: Copy + Eq + std::hash::Hash + std::fmt::Debug> ChessGame<O> {
    pub fn new(instance: impl Into<String>) -> Self {
        let instance = instance.into();
        Self {
            channel: SyncChannel::new(&instance),
            instance,
            rules: RulesAdapter::new(),
            reconciler: BoardReconciler::new(),
            selection: Selection::default(),
            initial_sync_done: false,
        }
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    pub fn channel(&self) -> &SyncChannel {
        &self.channel
    }

    pub fn rules(&self) -> &RulesAdapter {
        &self.rules
    }

    pub fn pieces(&self) -> &BoardReconciler<O> {
        &self.reconciler
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn current_position(&self) -> String {
        self.rules.current_position()
    }

    pub fn initial_sync_done(&self) -> bool {
        self.initial_sync_done
    }

    /// Square shown by a clicked piece object.
    pub fn square_of(&self, object: O) -> Option<BoardSquare> {
        self.reconciler.square_of(object)
    }

    /// Create tiles, the optional reset control, and the current position.
    pub fn build<S>(&mut self, scene: &mut S, show_reset_control: bool)
    where
        S: SceneHost<Object = O>,
    {
        if let Err(e) = scene.create_tile_grid() {
            warn!("[BOARD] '{}' tile grid failed: {}", self.instance, e);
        }
        if show_reset_control {
            if let Err(e) = scene.create_reset_control() {
                warn!("[BOARD] '{}' reset control failed: {}", self.instance, e);
            }
        }
        self.render(scene);
        info!("[BOARD] '{}' built", self.instance);
    }

    /// Drive the selection state machine with a click on `square`.
    pub fn activate_square<S, P>(&mut self, scene: &mut S, store: &P, square: BoardSquare) -> Activation
    where
        S: SceneHost<Object = O>,
        P: PropertyStore + ?Sized,
    {
        let Some(from) = self.selection.selected_square() else {
            return if self.select_if_occupied(scene, square) {
                Activation::Selected(square)
            } else {
                Activation::Ignored
            };
        };

        match self.rules.apply_move(from, square, Some(PieceKind::Queen)) {
            Ok(fen) => {
                self.channel.publish(store, &SharedState::Position(fen.clone()));
                self.selection.clear(scene);
                self.render(scene);
                Activation::Moved {
                    from,
                    to: square,
                    fen,
                }
            }
            Err(e) => {
                debug!("[SELECTION] {}", e);
                self.selection.clear(scene);
                let reselected = self.select_if_occupied(scene, square);
                Activation::Rejected {
                    from,
                    to: square,
                    reselected,
                }
            }
        }
    }

    /// Publish the reset sentinel and apply it locally without waiting for
    /// the echo.
    pub fn request_reset<S, P>(&mut self, scene: &mut S, store: &P)
    where
        S: SceneHost<Object = O>,
        P: PropertyStore + ?Sized,
    {
        info!("[BOARD] '{}' reset requested", self.instance);
        self.channel.publish(store, &SharedState::Reset);
        self.apply_state(scene, &SharedState::Reset);
    }

    /// React to a host change notification.
    ///
    /// Returns whether a record was applied.
    pub fn handle_space_event<S, P>(&mut self, scene: &mut S, store: &P, event: &SpaceEvent) -> bool
    where
        S: SceneHost<Object = O>,
        P: PropertyStore + ?Sized,
    {
        if !self.channel.is_relevant(event) {
            return false;
        }
        match self.channel.read(store) {
            Ok(Some(state)) => self.apply_state(scene, &state),
            Ok(None) => false,
            Err(e) => {
                warn!("[SYNC] Ignoring record for '{}': {}", self.instance, e);
                false
            }
        }
    }

    /// Adopt a shared state and re-render.
    ///
    /// An unloadable FEN leaves both the position and the scene as they were.
    pub fn apply_state<S>(&mut self, scene: &mut S, state: &SharedState) -> bool
    where
        S: SceneHost<Object = O>,
    {
        match state {
            SharedState::Reset => self.rules.reset(),
            SharedState::Position(fen) => {
                if let Err(e) = self.rules.load_position(fen) {
                    warn!("[SYNC] '{}': {}", self.instance, e);
                    return false;
                }
            }
        }

        let report = self.render(scene);
        if report.as_ref().is_some_and(|r| !r.is_noop()) {
            info!("[SYNC] '{}' now at {}", self.instance, self.rules.current_position());
        }
        self.refresh_selection(scene);
        true
    }

    /// One step of the startup read; call until it stops returning
    /// [`InitialSync::WaitingForIdentity`]. Applies at most once.
    pub fn poll_initial_sync<S, P>(&mut self, scene: &mut S, store: &P) -> InitialSync
    where
        S: SceneHost<Object = O>,
        P: PropertyStore + ?Sized,
    {
        if store.local_user().is_none() {
            return InitialSync::WaitingForIdentity;
        }
        if self.initial_sync_done {
            return InitialSync::Done;
        }
        self.initial_sync_done = true;

        match self.channel.read_initial(store) {
            Ok(Some(state)) => {
                if self.apply_state(scene, &state) {
                    InitialSync::Applied
                } else {
                    InitialSync::Ignored
                }
            }
            Ok(None) => InitialSync::Empty,
            Err(e) => {
                warn!("[SYNC] Ignoring stored record for '{}': {}", self.instance, e);
                InitialSync::Ignored
            }
        }
    }

    /// Destroy every rendered piece.
    pub fn teardown<S>(&mut self, scene: &mut S)
    where
        S: SceneHost<Object = O>,
    {
        self.selection.clear(scene);
        self.reconciler.teardown(scene);
    }

    fn render<S>(&mut self, scene: &mut S) -> Option<ReconcileReport>
    where
        S: SceneHost<Object = O>,
    {
        let fen = self.rules.current_position();
        match self.reconciler.reconcile(scene, &fen) {
            Ok(report) => Some(report),
            Err(e) => {
                warn!("[RECONCILE] '{}': {}", self.instance, e);
                None
            }
        }
    }

    fn select_if_occupied<S>(&mut self, scene: &mut S, square: BoardSquare) -> bool
    where
        S: SceneHost<Object = O>,
    {
        if self.rules.occupant(square).is_none() {
            return false;
        }
        let targets = self.rules.legal_destinations(square);
        debug!("[SELECTION] {} selected, {} targets", square, targets.len());
        self.selection.select(scene, square, targets);
        true
    }

    /// Keep a pending selection consistent with a position that changed
    /// underneath it.
    fn refresh_selection<S>(&mut self, scene: &mut S)
    where
        S: SceneHost<Object = O>,
    {
        if let Some(square) = self.selection.selected_square() {
            self.selection.clear(scene);
            self.select_if_occupied(scene, square);
        }
    }
}
