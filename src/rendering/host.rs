//! Bevy implementation of the scene capability interface
//!
//! Everything is spawned as a child of the board root, so the board's
//! position, rotation and scale apply to tiles, pieces and the reset control
//! alike. Scene operations are queued as commands and applied in order at the
//! end of the system that issued them.

use std::collections::HashMap;

use bevy::picking::Pickable;
use bevy::prelude::*;

use super::assets::BoardVisuals;
use crate::core::BoardConfig;
use crate::game::components::{BoardPiece, ResetControl, Tile};
use crate::game::input::{on_piece_click, on_reset_click, on_tile_click};
use crate::game::types::{BoardSquare, PieceColor, PieceDescriptor};
use crate::scene::{BoardLayout, SceneError, SceneHost, TileHighlight};

pub struct BevyScene<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub board: Entity,
    pub layout: BoardLayout,
    pub config: &'a BoardConfig,
    pub visuals: &'a BoardVisuals,
    pub tiles: &'a mut HashMap<BoardSquare, Entity>,
}

impl BevyScene<'_, '_, '_> {
    fn piece_transform(&self, descriptor: PieceDescriptor, square: BoardSquare) -> Transform {
        Transform::from_translation(self.layout.piece_position(square, descriptor.kind))
            .with_rotation(piece_rotation(descriptor.color))
    }
}

/// Black pieces face the other way.
fn piece_rotation(color: PieceColor) -> Quat {
    match color {
        PieceColor::White => Quat::IDENTITY,
        PieceColor::Black => Quat::from_rotation_y(std::f32::consts::PI),
    }
}

fn piece_name(descriptor: PieceDescriptor, square: BoardSquare) -> Name {
    Name::new(format!("{} {}", descriptor, square))
}

impl SceneHost for BevyScene<'_, '_, '_> {
    type Object = Entity;

    fn create_tile_grid(&mut self) -> Result<(), SceneError> {
        for square in BoardSquare::all() {
            let tile = self
                .commands
                .spawn((
                    Mesh3d(self.visuals.tile_mesh.clone()),
                    MeshMaterial3d(self.visuals.tile_material(square, TileHighlight::Normal)),
                    Transform::from_translation(self.layout.tile_position(square)),
                    Pickable::default(),
                    Tile {
                        board: self.board,
                        square,
                    },
                    Name::new(format!("Square {}", square)),
                    ChildOf(self.board),
                ))
                .observe(on_tile_click)
                .id();
            self.tiles.insert(square, tile);
        }
        Ok(())
    }

    fn create_piece(
        &mut self,
        descriptor: PieceDescriptor,
        square: BoardSquare,
    ) -> Result<Entity, SceneError> {
        let mesh = self.visuals.piece_mesh(descriptor)?;
        let transform = self.piece_transform(descriptor, square);

        let piece = self
            .commands
            .spawn((
                Mesh3d(mesh),
                MeshMaterial3d(self.visuals.piece_material(descriptor.color)),
                transform,
                Pickable::default(),
                BoardPiece {
                    board: self.board,
                    descriptor,
                },
                piece_name(descriptor, square),
                ChildOf(self.board),
            ))
            .observe(on_piece_click)
            .id();
        Ok(piece)
    }

    fn relocate_piece(&mut self, object: Entity, descriptor: PieceDescriptor, square: BoardSquare) {
        let transform = self.piece_transform(descriptor, square);
        self.commands
            .entity(object)
            .insert((transform, piece_name(descriptor, square)));
    }

    fn destroy_piece(&mut self, object: Entity) {
        self.commands.entity(object).despawn();
    }

    fn set_tile_highlight(&mut self, square: BoardSquare, highlight: TileHighlight) {
        if let Some(&tile) = self.tiles.get(&square) {
            let material = self.visuals.tile_material(square, highlight);
            self.commands.entity(tile).insert(MeshMaterial3d(material));
        }
    }

    fn create_reset_control(&mut self) -> Result<(), SceneError> {
        self.commands
            .spawn((
                Mesh3d(self.visuals.reset_mesh.clone()),
                MeshMaterial3d(self.visuals.reset_material.clone()),
                self.config.reset_transform(),
                Pickable::default(),
                ResetControl { board: self.board },
                Name::new("Reset"),
                ChildOf(self.board),
            ))
            .observe(on_reset_click);
        Ok(())
    }
}
