//! Scene host that records operations instead of rendering them
//!
//! Keeps a live view of which objects exist and where, plus the ordered log of
//! every call, so board behaviour can be checked without a renderer. Piece
//! creation can be made to fail per descriptor to mimic a missing model file.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::{SceneError, SceneHost, TileHighlight};
use crate::game::types::{BoardSquare, PieceDescriptor};

/// One recorded host call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneOp {
    TileGrid,
    ResetControl,
    Create {
        object: u32,
        descriptor: PieceDescriptor,
        square: BoardSquare,
    },
    Relocate {
        object: u32,
        descriptor: PieceDescriptor,
        square: BoardSquare,
    },
    Destroy {
        object: u32,
    },
    Highlight {
        square: BoardSquare,
        highlight: TileHighlight,
    },
}

#[derive(Debug, Default)]
pub struct HeadlessScene {
    next_object: u32,
    live: HashMap<u32, (PieceDescriptor, BoardSquare)>,
    highlights: BTreeMap<BoardSquare, TileHighlight>,
    missing: HashSet<PieceDescriptor>,
    has_tiles: bool,
    has_reset_control: bool,
    ops: Vec<SceneOp>,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `create_piece` for `descriptor` fail with a missing asset.
    pub fn without_asset(mut self, descriptor: PieceDescriptor) -> Self {
        self.missing.insert(descriptor);
        self
    }

    /// Drop the call log, keeping the live scene.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    pub fn ops(&self) -> &[SceneOp] {
        &self.ops
    }

    pub fn created_count(&self) -> usize {
        self.count(|op| matches!(op, SceneOp::Create { .. }))
    }

    pub fn relocated_count(&self) -> usize {
        self.count(|op| matches!(op, SceneOp::Relocate { .. }))
    }

    pub fn destroyed_count(&self) -> usize {
        self.count(|op| matches!(op, SceneOp::Destroy { .. }))
    }

    fn count(&self, pred: impl Fn(&SceneOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    /// Live pieces as the scene currently shows them.
    pub fn pieces(&self) -> BTreeMap<BoardSquare, PieceDescriptor> {
        self.live
            .values()
            .map(|&(descriptor, square)| (square, descriptor))
            .collect()
    }

    pub fn object_count(&self) -> usize {
        self.live.len()
    }

    /// Where the live object `object` stands.
    pub fn object_square(&self, object: u32) -> Option<BoardSquare> {
        self.live.get(&object).map(|&(_, square)| square)
    }

    pub fn highlight(&self, square: BoardSquare) -> TileHighlight {
        self.highlights.get(&square).copied().unwrap_or_default()
    }

    /// Squares currently highlighted with anything but `Normal`.
    pub fn highlighted(&self) -> Vec<(BoardSquare, TileHighlight)> {
        self.highlights
            .iter()
            .filter(|(_, h)| **h != TileHighlight::Normal)
            .map(|(s, h)| (*s, *h))
            .collect()
    }

    pub fn has_tiles(&self) -> bool {
        self.has_tiles
    }

    pub fn has_reset_control(&self) -> bool {
        self.has_reset_control
    }
}

impl SceneHost for HeadlessScene {
    type Object = u32;

    fn create_tile_grid(&mut self) -> Result<(), SceneError> {
        self.has_tiles = true;
        self.ops.push(SceneOp::TileGrid);
        Ok(())
    }

    fn create_piece(
        &mut self,
        descriptor: PieceDescriptor,
        square: BoardSquare,
    ) -> Result<u32, SceneError> {
        if self.missing.contains(&descriptor) {
            return Err(SceneError::MissingAsset {
                descriptor,
                path: format!("headless/{}", descriptor.to_char()),
            });
        }
        let object = self.next_object;
        self.next_object += 1;
        self.live.insert(object, (descriptor, square));
        self.ops.push(SceneOp::Create {
            object,
            descriptor,
            square,
        });
        Ok(object)
    }

    fn relocate_piece(&mut self, object: u32, descriptor: PieceDescriptor, square: BoardSquare) {
        if let Some(entry) = self.live.get_mut(&object) {
            entry.1 = square;
        }
        self.ops.push(SceneOp::Relocate {
            object,
            descriptor,
            square,
        });
    }

    fn destroy_piece(&mut self, object: u32) {
        self.live.remove(&object);
        self.ops.push(SceneOp::Destroy { object });
    }

    fn set_tile_highlight(&mut self, square: BoardSquare, highlight: TileHighlight) {
        self.highlights.insert(square, highlight);
        self.ops.push(SceneOp::Highlight { square, highlight });
    }

    fn create_reset_control(&mut self) -> Result<(), SceneError> {
        self.has_reset_control = true;
        self.ops.push(SceneOp::ResetControl);
        Ok(())
    }
}
