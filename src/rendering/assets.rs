//! Per-board meshes and materials
//!
//! Materials depend on the board's parameters (lit or unlit, hidden board,
//! piece opacity), so each board owns its own set of handles. Piece meshes
//! come either from `<models>/<color>_<kind>.glb` under the asset root, or,
//! when no model directory is configured, from simple primitives.
//!
//! A configured model file that does not exist is recorded as missing: pieces
//! of that type are then left out of the scene instead of failing the board.

use std::collections::HashMap;
use std::path::PathBuf;

use bevy::asset::io::file::FileAssetReader;
use bevy::color::palettes::tailwind;
use bevy::color::Alpha;
use bevy::prelude::*;

use crate::core::BoardConfig;
use crate::game::types::{BoardSquare, PieceColor, PieceDescriptor, PieceKind};
use crate::scene::{BoardLayout, SceneError, TileHighlight};

/// Directory Bevy's asset server resolves paths against.
pub const ASSET_ROOT: &str = "assets";

#[derive(Debug, Clone, Default)]
pub struct BoardVisuals {
    pub tile_mesh: Handle<Mesh>,
    pub light_tile: Handle<StandardMaterial>,
    pub dark_tile: Handle<StandardMaterial>,
    pub selected_tile: Handle<StandardMaterial>,
    pub target_tile: Handle<StandardMaterial>,
    pub white_piece: Handle<StandardMaterial>,
    pub black_piece: Handle<StandardMaterial>,
    pub reset_mesh: Handle<Mesh>,
    pub reset_material: Handle<StandardMaterial>,
    pub piece_meshes: HashMap<PieceDescriptor, Handle<Mesh>>,
    /// Model paths that were configured but not found
    pub missing_models: HashMap<PieceDescriptor, String>,
}

impl BoardVisuals {
    pub fn load(
        config: &BoardConfig,
        layout: &BoardLayout,
        asset_server: &AssetServer,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
    ) -> Self {
        let unlit = config.unlit();
        let tile_alpha = config.tile_alpha();
        let highlight_alpha = config.highlight_alpha();
        let piece_alpha = (config.pieces_opacity < 1.0).then_some(config.pieces_opacity);

        let tile = layout.tile_size;
        let mut visuals = BoardVisuals {
            tile_mesh: meshes.add(Plane3d::default().mesh().size(tile * 0.98, tile * 0.98)),
            light_tile: materials.add(material(tailwind::STONE_200.into(), tile_alpha, unlit)),
            dark_tile: materials.add(material(tailwind::STONE_700.into(), tile_alpha, unlit)),
            selected_tile: materials.add(material(tailwind::AMBER_400.into(), highlight_alpha, unlit)),
            target_tile: materials.add(material(tailwind::EMERALD_400.into(), highlight_alpha, unlit)),
            white_piece: materials.add(material(Color::WHITE, piece_alpha, unlit)),
            black_piece: materials.add(material(Color::BLACK, piece_alpha, unlit)),
            reset_mesh: meshes.add(Cuboid::new(tile * 1.5, tile * 0.3, tile * 0.6)),
            reset_material: materials.add(material(tailwind::RED_500.into(), None, unlit)),
            ..default()
        };

        match &config.models {
            Some(dir) => visuals.load_models(dir, asset_server),
            None => visuals.build_primitives(layout, meshes),
        }
        visuals
    }

    fn load_models(&mut self, dir: &str, asset_server: &AssetServer) {
        for descriptor in PieceDescriptor::all() {
            let relative = model_path(dir, descriptor);
            if asset_file_path(&relative).exists() {
                let handle = asset_server.load(format!("{relative}#Mesh0/Primitive0"));
                self.piece_meshes.insert(descriptor, handle);
            } else {
                warn!("[ASSETS] No model for {} at {}", descriptor, relative);
                self.missing_models.insert(descriptor, relative);
            }
        }
    }

    fn build_primitives(&mut self, layout: &BoardLayout, meshes: &mut Assets<Mesh>) {
        for kind in PieceKind::ALL {
            let mesh = meshes.add(primitive_piece(kind, layout.tile_size));
            for color in [PieceColor::White, PieceColor::Black] {
                self.piece_meshes
                    .insert(PieceDescriptor::new(color, kind), mesh.clone());
            }
        }
    }

    pub fn piece_mesh(&self, descriptor: PieceDescriptor) -> Result<Handle<Mesh>, SceneError> {
        self.piece_meshes
            .get(&descriptor)
            .cloned()
            .ok_or_else(|| SceneError::MissingAsset {
                descriptor,
                path: self
                    .missing_models
                    .get(&descriptor)
                    .cloned()
                    .unwrap_or_else(|| "<none>".to_string()),
            })
    }

    pub fn piece_material(&self, color: PieceColor) -> Handle<StandardMaterial> {
        match color {
            PieceColor::White => self.white_piece.clone(),
            PieceColor::Black => self.black_piece.clone(),
        }
    }

    pub fn tile_material(&self, square: BoardSquare, highlight: TileHighlight) -> Handle<StandardMaterial> {
        match highlight {
            TileHighlight::Selected => self.selected_tile.clone(),
            TileHighlight::ValidTarget => self.target_tile.clone(),
            TileHighlight::Normal if square.is_light() => self.light_tile.clone(),
            TileHighlight::Normal => self.dark_tile.clone(),
        }
    }
}

/// Where the asset server will look for `relative`: under the asset root
/// next to the executable (or the manifest, or `BEVY_ASSET_ROOT`), not the
/// working directory.
pub fn asset_file_path(relative: &str) -> PathBuf {
    FileAssetReader::get_base_path().join(ASSET_ROOT).join(relative)
}

/// `<dir>/<color>_<kind>.glb`
pub fn model_path(dir: &str, descriptor: PieceDescriptor) -> String {
    let color = match descriptor.color {
        PieceColor::White => "white",
        PieceColor::Black => "black",
    };
    format!(
        "{}/{}_{}.glb",
        dir.trim_end_matches('/'),
        color,
        descriptor.kind.name()
    )
}

fn material(color: Color, alpha: Option<f32>, unlit: bool) -> StandardMaterial {
    let alpha = alpha.unwrap_or(1.0);
    StandardMaterial {
        base_color: color.with_alpha(alpha),
        alpha_mode: if alpha < 1.0 {
            AlphaMode::Blend
        } else {
            AlphaMode::Opaque
        },
        unlit,
        ..default()
    }
}

/// Stand-in shapes, each centred at half its height so it rests on the tile
/// at the layout's piece height.
fn primitive_piece(kind: PieceKind, tile: f32) -> Mesh {
    match kind {
        PieceKind::Pawn => Cylinder::new(0.2 * tile, 0.3 * tile).into(),
        PieceKind::Rook => Cuboid::new(0.36 * tile, 0.34 * tile, 0.36 * tile).into(),
        PieceKind::Knight => Cone {
            radius: 0.24 * tile,
            height: 0.36 * tile,
        }
        .into(),
        PieceKind::Bishop => Capsule3d::new(0.12 * tile, 0.14 * tile).into(),
        PieceKind::Queen => Cylinder::new(0.26 * tile, 0.42 * tile).into(),
        PieceKind::King => Cuboid::new(0.3 * tile, 0.46 * tile, 0.3 * tile).into(),
    }
}
