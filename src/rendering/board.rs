//! Board instance spawning
//!
//! Each [`BoardConfig`] in [`BoardRequests`] becomes one root entity with
//! its own client on the shared space. The scene (tiles, reset control,
//! initial pieces) is built immediately from the starting position; the
//! shared record is adopted later by the initial sync system.

use bevy::prelude::*;

use super::assets::BoardVisuals;
use crate::core::BoardConfig;
use crate::game::components::ChessBoard;
use crate::scene::BoardLayout;
use crate::sync::{PropertyStore, SharedSpace, SpaceClient, SyncError};

/// The host's shared property space
#[derive(Resource, Clone)]
pub struct HostSpace(pub SharedSpace);

/// Boards to spawn at startup, one per embed URL
#[derive(Resource, Debug, Clone, Default)]
pub struct BoardRequests(pub Vec<BoardConfig>);

/// Spawn a board root and build its scene.
///
/// Fails without spawning anything if the client is not connected.
pub fn spawn_chess_board(
    commands: &mut Commands,
    config: BoardConfig,
    client: SpaceClient,
    visuals: BoardVisuals,
) -> Result<Entity, SyncError> {
    if !client.is_connected() {
        return Err(SyncError::HostUnavailable);
    }

    let entity = commands
        .spawn((
            config.board_transform(),
            Visibility::default(),
            Name::new(format!("Chess Board {}", config.instance)),
        ))
        .id();

    let show_reset_control = config.shows_reset_control();
    let mut board = ChessBoard::new(config, client, visuals);
    {
        let (mut scene, game, _) = board.parts(commands, entity);
        game.build(&mut scene, show_reset_control);
    }
    commands.entity(entity).insert(board);
    Ok(entity)
}

pub fn spawn_boards(
    mut commands: Commands,
    requests: Res<BoardRequests>,
    space: Option<Res<HostSpace>>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(space) = space else {
        error!("[BOARD] No host space available, {} board(s) not created", requests.0.len());
        return;
    };

    for config in &requests.0 {
        let client = space.0.connect();
        let layout = BoardLayout::default();
        let visuals = BoardVisuals::load(config, &layout, &asset_server, &mut meshes, &mut materials);
        match spawn_chess_board(&mut commands, config.clone(), client, visuals) {
            Ok(entity) => info!("[BOARD] Spawned '{}' as {:?}", config.instance, entity),
            Err(e) => error!("[BOARD] Could not create '{}': {}", config.instance, e),
        }
    }

    if requests.0.iter().any(BoardConfig::spawns_lights) {
        spawn_lights(&mut commands);
    }

    if let Some(first) = requests.0.first() {
        let target = first.board_transform().translation;
        commands.spawn((
            Camera3d::default(),
            Transform::from_translation(target + Vec3::new(0.0, 7.0, 8.0)).looking_at(target, Vec3::Y),
            Name::new("Board Camera"),
        ));
    }
}

fn spawn_lights(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_4,
            std::f32::consts::FRAC_PI_4,
            0.0,
        )),
        Name::new("Directional Light"),
    ));

    commands.spawn((
        PointLight {
            intensity: 1_500_000.0,
            range: 40.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(0.0, 6.0, 0.0),
        Name::new("Overhead Light"),
    ));
}
