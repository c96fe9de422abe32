//! Click-driven move selection
//!
//! Two states: nothing selected, or one square selected together with the
//! legal destinations that were highlighted for it. The transitions live in
//! [`super::session::ChessGame::activate_square`]; this type only holds the
//! state and knows which tiles it lit up.

use super::types::BoardSquare;
use crate::scene::{SceneHost, TileHighlight};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Idle,
    Selected {
        square: BoardSquare,
        targets: Vec<BoardSquare>,
    },
}

impl Selection {
    pub fn selected_square(&self) -> Option<BoardSquare> {
        match self {
            Selection::Idle => None,
            Selection::Selected { square, .. } => Some(*square),
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, Selection::Selected { .. })
    }

    pub fn targets(&self) -> &[BoardSquare] {
        match self {
            Selection::Idle => &[],
            Selection::Selected { targets, .. } => targets,
        }
    }

    /// Select `square` and light it and its targets.
    pub fn select<S: SceneHost>(&mut self, scene: &mut S, square: BoardSquare, targets: Vec<BoardSquare>) {
        self.clear(scene);
        scene.set_tile_highlight(square, TileHighlight::Selected);
        for &target in &targets {
            scene.set_tile_highlight(target, TileHighlight::ValidTarget);
        }
        *self = Selection::Selected { square, targets };
    }

    /// Return to `Idle`, restoring every tile this selection highlighted.
    pub fn clear<S: SceneHost>(&mut self, scene: &mut S) {
        if let Selection::Selected { square, targets } = std::mem::take(self) {
            scene.set_tile_highlight(square, TileHighlight::Normal);
            for target in targets {
                scene.set_tile_highlight(target, TileHighlight::Normal);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::HeadlessScene;

    fn sq(name: &str) -> BoardSquare {
        name.parse().unwrap()
    }

    #[test]
    fn test_default_is_idle() {
        let selection = Selection::default();
        assert!(!selection.is_selected());
        assert_eq!(selection.selected_square(), None);
        assert!(selection.targets().is_empty());
    }

    #[test]
    fn test_select_highlights_square_and_targets() {
        let mut scene = HeadlessScene::new();
        let mut selection = Selection::default();
        selection.select(&mut scene, sq("e2"), vec![sq("e3"), sq("e4")]);

        assert_eq!(selection.selected_square(), Some(sq("e2")));
        assert_eq!(scene.highlight(sq("e2")), TileHighlight::Selected);
        assert_eq!(scene.highlight(sq("e4")), TileHighlight::ValidTarget);
        assert_eq!(scene.highlighted().len(), 3);
    }

    #[test]
    fn test_clear_restores_tiles() {
        let mut scene = HeadlessScene::new();
        let mut selection = Selection::default();
        selection.select(&mut scene, sq("g1"), vec![sq("f3"), sq("h3")]);
        selection.clear(&mut scene);

        assert_eq!(selection, Selection::Idle);
        assert!(scene.highlighted().is_empty());
    }

    #[test]
    fn test_reselect_moves_highlight() {
        let mut scene = HeadlessScene::new();
        let mut selection = Selection::default();
        selection.select(&mut scene, sq("e2"), vec![sq("e3"), sq("e4")]);
        selection.select(&mut scene, sq("d2"), vec![sq("d3"), sq("d4")]);

        assert_eq!(scene.highlight(sq("e2")), TileHighlight::Normal);
        assert_eq!(scene.highlight(sq("d2")), TileHighlight::Selected);
        assert_eq!(scene.highlighted().len(), 3);
    }
}
