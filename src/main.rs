use anyhow::{Context, Result};
use bevy::prelude::*;
use bevy::window::WindowResolution;
use clap::Parser;

use spacechess::core::BoardConfig;
use spacechess::game::systems::LocalIdentity;
use spacechess::game::ChessGamePlugin;
use spacechess::rendering::{BoardRenderPlugin, BoardRequests, HostSpace};
use spacechess::sync::SharedSpace;

const WINDOW_WIDTH: u32 = 1366;
const WINDOW_HEIGHT: u32 = 768;

/// Shared chess boards in a simulated virtual space
#[derive(Parser, Debug)]
#[command(name = "spacechess", version)]
struct Args {
    /// Embed URL of a board; repeat for several boards
    #[arg(long = "url", default_value = "https://spacechess.local/board")]
    urls: Vec<String>,

    /// Name the local participant signs in with
    #[arg(long, default_value = "local-player")]
    user: String,

    /// Do not notify a participant of its own writes
    #[arg(long)]
    no_echo: bool,

    /// Frames before the local identity becomes available
    #[arg(long, default_value_t = 30)]
    identity_delay: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let configs = args
        .urls
        .iter()
        .map(|url| BoardConfig::from_url_str(url).with_context(|| format!("bad board url {url}")))
        .collect::<Result<Vec<_>>>()?;

    let window = Window {
        title: "Space Chess".to_string(),
        resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
        ..default()
    };

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(window),
                    ..default()
                })
                .set(bevy::log::LogPlugin {
                    level: bevy::log::Level::INFO,
                    filter: "wgpu=warn,bevy_ecs=info,bevy_render=warn,naga=error,spacechess=debug"
                        .to_string(),
                    ..default()
                }),
        )
        .add_plugins(MeshPickingPlugin)
        .add_plugins(ChessGamePlugin)
        .add_plugins(BoardRenderPlugin)
        .insert_resource(HostSpace(SharedSpace::new().echo_to_writer(!args.no_echo)))
        .insert_resource(BoardRequests(configs))
        .insert_resource(LocalIdentity {
            user: Some(args.user),
            delay_frames: args.identity_delay,
        })
        .run();

    Ok(())
}
