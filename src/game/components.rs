//! ECS components for board instances
//!
//! Each board is one root entity carrying a [`ChessBoard`]. Tiles, pieces and
//! the reset control are spawned as its children and point back at it, so
//! click handlers can find the owning game without any global state.

use std::collections::HashMap;

use bevy::prelude::*;

use super::session::ChessGame;
use super::types::{BoardSquare, PieceDescriptor};
use crate::core::BoardConfig;
use crate::rendering::assets::BoardVisuals;
use crate::rendering::host::BevyScene;
use crate::scene::BoardLayout;
use crate::sync::SpaceClient;

/// Root of one board instance
#[derive(Component)]
pub struct ChessBoard {
    pub game: ChessGame<Entity>,
    pub client: SpaceClient,
    pub config: BoardConfig,
    pub layout: BoardLayout,
    pub visuals: BoardVisuals,
    pub tiles: HashMap<BoardSquare, Entity>,
}

impl ChessBoard {
    pub fn new(config: BoardConfig, client: SpaceClient, visuals: BoardVisuals) -> Self {
        Self {
            game: ChessGame::new(config.instance.clone()),
            client,
            config,
            layout: BoardLayout::default(),
            visuals,
            tiles: HashMap::new(),
        }
    }

    /// Borrow the game, its store and a scene host for the root `entity`.
    pub fn parts<'a, 'w, 's>(
        &'a mut self,
        commands: &'a mut Commands<'w, 's>,
        entity: Entity,
    ) -> (BevyScene<'a, 'w, 's>, &'a mut ChessGame<Entity>, &'a SpaceClient) {
        let scene = BevyScene {
            commands,
            board: entity,
            layout: self.layout,
            config: &self.config,
            visuals: &self.visuals,
            tiles: &mut self.tiles,
        };
        (scene, &mut self.game, &self.client)
    }
}

/// One of the 64 clickable tiles
#[derive(Component, Debug, Clone, Copy)]
pub struct Tile {
    pub board: Entity,
    pub square: BoardSquare,
}

/// A rendered piece. Its current square lives in the board's piece map.
#[derive(Component, Debug, Clone, Copy)]
pub struct BoardPiece {
    pub board: Entity,
    pub descriptor: PieceDescriptor,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct ResetControl {
    pub board: Entity,
}
