//! Chess game module - board state, reconciliation and the Bevy glue around it
//!
//! # Module Organization
//!
//! Host-independent core:
//! - `types` - squares and piece descriptors
//! - `placement` - FEN placement field decoding
//! - `rules` - rules adapter over `shakmaty`
//! - `reconcile` - minimal-churn matching of rendered pieces to a FEN
//! - `selection` - click selection state
//! - `session` - [`ChessGame`], the per-board context tying it all together
//!
//! Bevy glue:
//! - `components` - board root, tile, piece and reset-control components
//! - `events` - click messages
//! - `input` - picking observers
//! - `systems` / `plugin` - per-frame board systems

pub mod components;
pub mod error;
pub mod events;
pub mod input;
pub mod placement;
pub mod plugin;
pub mod reconcile;
pub mod rules;
pub mod selection;
pub mod session;
pub mod systems;
pub mod types;

pub use error::{GameError, GameResult};
pub use plugin::ChessGamePlugin;
pub use reconcile::{BoardReconciler, ReconcileReport};
pub use rules::{RulesAdapter, START_FEN};
pub use selection::Selection;
pub use session::{Activation, ChessGame, InitialSync};
pub use types::{BoardSquare, PieceColor, PieceDescriptor, PieceKind};
