//! Board reconciliation - matching rendered pieces to a FEN with minimal churn
//!
//! Every time a new position arrives (local move, remote update, reset) the
//! reconciler rebuilds its piece map against the decoded placement:
//!
//! 1. All current objects go into a per-descriptor reuse pool.
//! 2. **Stability pass**: a target square that already shows the right piece
//!    keeps its object untouched.
//! 3. **Assignment pass**: every other target takes the nearest pooled object
//!    of the same descriptor and relocates it, or creates a fresh object when
//!    the pool for that descriptor is empty.
//! 4. Whatever is left in the pool was captured or removed and is destroyed.
//!
//! After an ordinary move only the mover is touched; a capture adds one
//! destruction; a promotion trades the pawn for a newly created piece.
//! Reconciling the same FEN twice changes nothing the second time.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use super::error::GameResult;
use super::placement::decode_placement;
use super::types::{BoardSquare, PieceDescriptor};
use crate::scene::{SceneError, SceneHost};

/// A rendered piece object and the piece it shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedPiece<O> {
    pub object: O,
    pub descriptor: PieceDescriptor,
}

/// What a reconciliation pass did to the scene
#[derive(Debug, Default, Clone)]
pub struct ReconcileReport {
    pub kept: Vec<BoardSquare>,
    /// `(from, to)` for each relocated object
    pub relocated: Vec<(BoardSquare, BoardSquare)>,
    pub created: Vec<BoardSquare>,
    /// Squares the destroyed objects stood on
    pub destroyed: Vec<BoardSquare>,
    /// Targets left empty because the host could not create their piece
    pub failed: Vec<(BoardSquare, SceneError)>,
}

impl ReconcileReport {
    /// True when the scene was not touched at all.
    pub fn is_noop(&self) -> bool {
        self.relocated.is_empty() && self.created.is_empty() && self.destroyed.is_empty()
    }
}

/// Owner of the square -> rendered piece map
#[derive(Debug)]
pub struct BoardReconciler<O> {
    pieces: BTreeMap<BoardSquare, RenderedPiece<O>>,
}

impl<O> Default for BoardReconciler<O> {
    fn default() -> Self {
        Self {
            pieces: BTreeMap::new(),
        }
    }
}

impl<O: Copy + Eq + std::hash::Hash + std::fmt::Debug> BoardReconciler<O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the scene in line with `fen`.
    ///
    /// A FEN whose placement cannot be decoded is rejected before anything in
    /// the scene changes.
    pub fn reconcile<S>(&mut self, scene: &mut S, fen: &str) -> GameResult<ReconcileReport>
    where
        S: SceneHost<Object = O>,
    {
        let target = decode_placement(fen)?;
        let mut report = ReconcileReport::default();

        let mut pool: HashMap<PieceDescriptor, Vec<(BoardSquare, O)>> = HashMap::new();
        for (square, piece) in std::mem::take(&mut self.pieces) {
            pool.entry(piece.descriptor)
                .or_default()
                .push((square, piece.object));
        }

        let mut next = BTreeMap::new();
        let mut unresolved = Vec::new();

        // Stability pass.
        for (&square, &descriptor) in &target {
            let candidates = pool.entry(descriptor).or_default();
            match candidates.iter().position(|(at, _)| *at == square) {
                Some(idx) => {
                    let (_, object) = candidates.swap_remove(idx);
                    next.insert(square, RenderedPiece { object, descriptor });
                    report.kept.push(square);
                }
                None => unresolved.push((square, descriptor)),
            }
        }

        // Assignment pass.
        for (square, descriptor) in unresolved {
            let candidates = pool.entry(descriptor).or_default();
            let nearest = candidates
                .iter()
                .enumerate()
                .min_by_key(|(_, (at, _))| (at.distance(square), *at))
                .map(|(idx, _)| idx);

            match nearest {
                Some(idx) => {
                    let (from, object) = candidates.swap_remove(idx);
                    scene.relocate_piece(object, descriptor, square);
                    next.insert(square, RenderedPiece { object, descriptor });
                    report.relocated.push((from, square));
                }
                None => match scene.create_piece(descriptor, square) {
                    Ok(object) => {
                        next.insert(square, RenderedPiece { object, descriptor });
                        report.created.push(square);
                    }
                    Err(e) => {
                        warn!("[RECONCILE] Skipping {} on {}: {}", descriptor, square, e);
                        report.failed.push((square, e));
                    }
                },
            }
        }

        // Leftovers were captured or removed.
        let mut leftovers: Vec<_> = pool.into_values().flatten().collect();
        leftovers.sort_by_key(|(square, _)| *square);
        for (square, object) in leftovers {
            scene.destroy_piece(object);
            report.destroyed.push(square);
        }

        self.pieces = next;

        debug!(
            "[RECONCILE] kept={} relocated={} created={} destroyed={} failed={}",
            report.kept.len(),
            report.relocated.len(),
            report.created.len(),
            report.destroyed.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Destroy every rendered piece.
    pub fn teardown<S>(&mut self, scene: &mut S)
    where
        S: SceneHost<Object = O>,
    {
        for (_, piece) in std::mem::take(&mut self.pieces) {
            scene.destroy_piece(piece.object);
        }
    }

    /// Square currently shown by `object`, for click resolution.
    pub fn square_of(&self, object: O) -> Option<BoardSquare> {
        self.pieces
            .iter()
            .find(|(_, piece)| piece.object == object)
            .map(|(square, _)| *square)
    }

    pub fn occupant(&self, square: BoardSquare) -> Option<PieceDescriptor> {
        self.pieces.get(&square).map(|piece| piece.descriptor)
    }

    pub fn get(&self, square: BoardSquare) -> Option<&RenderedPiece<O>> {
        self.pieces.get(&square)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BoardSquare, &RenderedPiece<O>)> {
        self.pieces.iter()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rules::START_FEN;
    use crate::game::types::{PieceColor, PieceKind};
    use crate::scene::HeadlessScene;

    const AFTER_E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";

    fn sq(name: &str) -> BoardSquare {
        name.parse().unwrap()
    }

    fn started() -> (BoardReconciler<u32>, HeadlessScene) {
        let mut reconciler = BoardReconciler::new();
        let mut scene = HeadlessScene::new();
        let report = reconciler.reconcile(&mut scene, START_FEN).unwrap();
        assert_eq!(report.created.len(), 32);
        scene.clear_ops();
        (reconciler, scene)
    }

    #[test]
    fn test_initial_build_creates_every_piece() {
        let (reconciler, scene) = started();
        assert_eq!(reconciler.len(), 32);
        assert_eq!(scene.object_count(), 32);
        assert_eq!(scene.pieces(), decode_placement(START_FEN).unwrap());
    }

    #[test]
    fn test_quiet_move_relocates_one_object() {
        let (mut reconciler, mut scene) = started();
        let pawn = reconciler.get(sq("e2")).unwrap().object;

        let report = reconciler.reconcile(&mut scene, AFTER_E4).unwrap();

        assert_eq!(report.relocated, vec![(sq("e2"), sq("e4"))]);
        assert!(report.created.is_empty());
        assert!(report.destroyed.is_empty());
        assert_eq!(report.kept.len(), 31);
        assert_eq!(reconciler.get(sq("e4")).unwrap().object, pawn);
        assert_eq!(scene.relocated_count(), 1);
    }

    #[test]
    fn test_same_fen_twice_is_noop() {
        let (mut reconciler, mut scene) = started();
        let report = reconciler.reconcile(&mut scene, START_FEN).unwrap();
        assert!(report.is_noop());
        assert!(scene.ops().is_empty());
    }

    #[test]
    fn test_capture_destroys_victim() {
        let mut reconciler = BoardReconciler::new();
        let mut scene = HeadlessScene::new();
        reconciler
            .reconcile(&mut scene, "4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1")
            .unwrap();
        scene.clear_ops();

        let report = reconciler
            .reconcile(&mut scene, "4k3/8/8/3P4/8/8/8/4K3 b - - 0 1")
            .unwrap();

        assert_eq!(report.relocated, vec![(sq("e4"), sq("d5"))]);
        assert_eq!(report.destroyed, vec![sq("d5")]);
        assert!(report.created.is_empty());
        assert_eq!(scene.object_count(), 3);
    }

    #[test]
    fn test_promotion_trades_pawn_for_queen() {
        let mut reconciler = BoardReconciler::new();
        let mut scene = HeadlessScene::new();
        reconciler
            .reconcile(&mut scene, "7k/P7/8/8/8/8/8/K7 w - - 0 1")
            .unwrap();
        scene.clear_ops();

        let report = reconciler
            .reconcile(&mut scene, "Q6k/8/8/8/8/8/8/K7 b - - 0 1")
            .unwrap();

        assert_eq!(report.created, vec![sq("a8")]);
        assert_eq!(report.destroyed, vec![sq("a7")]);
        assert!(report.relocated.is_empty());
        assert_eq!(
            reconciler.occupant(sq("a8")),
            Some(PieceDescriptor::new(PieceColor::White, PieceKind::Queen))
        );
    }

    #[test]
    fn test_castling_relocates_king_and_rook() {
        let mut reconciler = BoardReconciler::new();
        let mut scene = HeadlessScene::new();
        reconciler
            .reconcile(&mut scene, "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .unwrap();
        let king = reconciler.get(sq("e1")).unwrap().object;
        let rook = reconciler.get(sq("h1")).unwrap().object;
        scene.clear_ops();

        let report = reconciler
            .reconcile(&mut scene, "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1")
            .unwrap();

        assert_eq!(
            report.relocated,
            vec![(sq("h1"), sq("f1")), (sq("e1"), sq("g1"))]
        );
        assert!(report.created.is_empty());
        assert!(report.destroyed.is_empty());
        assert_eq!(reconciler.get(sq("g1")).unwrap().object, king);
        assert_eq!(reconciler.get(sq("f1")).unwrap().object, rook);
        assert_eq!(scene.object_square(king), Some(sq("g1")));
    }

    #[test]
    fn test_en_passant_destroys_pawn_beside_target() {
        let mut reconciler = BoardReconciler::new();
        let mut scene = HeadlessScene::new();
        reconciler
            .reconcile(&mut scene, "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2")
            .unwrap();
        let victim = reconciler.get(sq("d5")).unwrap().object;
        scene.clear_ops();

        let report = reconciler
            .reconcile(&mut scene, "4k3/8/3P4/8/8/8/8/4K3 b - - 0 2")
            .unwrap();

        assert_eq!(report.relocated, vec![(sq("e5"), sq("d6"))]);
        assert_eq!(report.destroyed, vec![sq("d5")]);
        assert!(report.created.is_empty());
        assert_eq!(scene.object_square(victim), None);
        assert_eq!(scene.pieces(), decode_placement("4k3/8/3P4/8/8/8/8/4K3 b - - 0 2").unwrap());
    }

    #[test]
    fn test_nearest_twin_is_reused() {
        let mut reconciler = BoardReconciler::new();
        let mut scene = HeadlessScene::new();
        reconciler
            .reconcile(&mut scene, "4k3/8/8/8/8/8/8/1N2K1N1 w - - 0 1")
            .unwrap();
        let b1_knight = reconciler.get(sq("b1")).unwrap().object;
        let g1_knight = reconciler.get(sq("g1")).unwrap().object;
        scene.clear_ops();

        let report = reconciler
            .reconcile(&mut scene, "4k3/8/8/8/8/2N2N2/8/4K3 w - - 0 1")
            .unwrap();

        assert_eq!(
            report.relocated,
            vec![(sq("b1"), sq("c3")), (sq("g1"), sq("f3"))]
        );
        assert_eq!(reconciler.get(sq("c3")).unwrap().object, b1_knight);
        assert_eq!(reconciler.get(sq("f3")).unwrap().object, g1_knight);
    }

    #[test]
    fn test_missing_asset_omits_only_that_piece() {
        let black_queen = PieceDescriptor::new(PieceColor::Black, PieceKind::Queen);
        let mut reconciler = BoardReconciler::new();
        let mut scene = HeadlessScene::new().without_asset(black_queen);

        let report = reconciler.reconcile(&mut scene, START_FEN).unwrap();

        assert_eq!(report.created.len(), 31);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, sq("d8"));
        assert_eq!(reconciler.occupant(sq("d8")), None);
        assert_eq!(reconciler.len(), 31);
    }

    #[test]
    fn test_invalid_fen_leaves_map_untouched() {
        let (mut reconciler, mut scene) = started();
        assert!(reconciler.reconcile(&mut scene, "garbage").is_err());
        assert_eq!(reconciler.len(), 32);
        assert!(scene.ops().is_empty());
    }

    #[test]
    fn test_square_of_follows_moves() {
        let (mut reconciler, mut scene) = started();
        let pawn = reconciler.get(sq("e2")).unwrap().object;
        assert_eq!(reconciler.square_of(pawn), Some(sq("e2")));

        reconciler.reconcile(&mut scene, AFTER_E4).unwrap();
        assert_eq!(reconciler.square_of(pawn), Some(sq("e4")));
    }

    #[test]
    fn test_teardown_destroys_everything() {
        let (mut reconciler, mut scene) = started();
        reconciler.teardown(&mut scene);
        assert!(reconciler.is_empty());
        assert_eq!(scene.object_count(), 0);
        assert_eq!(scene.destroyed_count(), 32);
    }
}
