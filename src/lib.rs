//! Shared 3D chess boards for virtual spaces
//!
//! Every board instance keeps its position in a property of the host's
//! shared space. A move made on any copy of a board is written there, and
//! each copy re-renders by moving only the pieces whose squares changed.

pub mod core;
pub mod game;
pub mod rendering;
pub mod scene;
pub mod sync;
