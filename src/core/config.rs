//! Board instantiation parameters
//!
//! A board is instantiated from a page URL whose query string carries its
//! parameters, e.g.
//!
//! ```text
//! https://host/space/board?instance=lobby&boardPosition=0%201.1%20-2&lighting=lit
//! ```
//!
//! Parameters are read once. A value that does not parse is logged and the
//! default is used instead; a bad parameter never prevents the board from
//! loading.
//!
//! | name | default |
//! |------|---------|
//! | `instance` | page URL without its query string |
//! | `boardPosition` / `boardRotation` / `boardScale` | `0 1.1 -2` / `0 0 0` / `1 1 1` |
//! | `lighting` | `unlit` (or `lit`) |
//! | `addLights` | `true` |
//! | `hideUI` / `hideBoard` | `false` |
//! | `piecesOpacity` | `1`, clamped to 0..1 |
//! | `resetPosition` / `resetRotation` / `resetScale` | `0 0.3 5` / `0 0 0` / `1 1 1` |
//! | `models` | unset: procedural pieces |

use bevy::math::{EulerRot, Quat, Vec3};
use bevy::transform::components::Transform;
use tracing::{debug, warn};
use url::Url;

use super::error::{CoreError, CoreResult};

/// Alpha of tiles when the board is hidden.
pub const HIDDEN_TILE_ALPHA: f32 = 0.0;
/// Alpha of highlights drawn over a hidden board.
pub const HIDDEN_HIGHLIGHT_ALPHA: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lighting {
    #[default]
    Unlit,
    Lit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    pub instance: String,
    pub board_position: Vec3,
    /// Euler angles in degrees
    pub board_rotation: Vec3,
    pub board_scale: Vec3,
    pub lighting: Lighting,
    pub add_lights: bool,
    pub hide_ui: bool,
    pub hide_board: bool,
    pub pieces_opacity: f32,
    pub reset_position: Vec3,
    /// Euler angles in degrees, relative to the board
    pub reset_rotation: Vec3,
    pub reset_scale: Vec3,
    /// Directory holding `<color>_<kind>.glb` piece models
    pub models: Option<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            instance: String::new(),
            board_position: Vec3::new(0.0, 1.1, -2.0),
            board_rotation: Vec3::ZERO,
            board_scale: Vec3::ONE,
            lighting: Lighting::Unlit,
            add_lights: true,
            hide_ui: false,
            hide_board: false,
            pieces_opacity: 1.0,
            reset_position: Vec3::new(0.0, 0.3, 5.0),
            reset_rotation: Vec3::ZERO,
            reset_scale: Vec3::ONE,
            models: None,
        }
    }
}

impl BoardConfig {
    /// Parse a page URL and read its parameters.
    pub fn from_url_str(url: &str) -> CoreResult<Self> {
        let parsed = Url::parse(url).map_err(|source| CoreError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        Ok(Self::from_url(&parsed))
    }

    pub fn from_url(url: &Url) -> Self {
        let mut page = url.clone();
        page.set_query(None);

        let mut config = BoardConfig {
            instance: page.to_string(),
            ..Default::default()
        };

        for (name, value) in url.query_pairs() {
            if let Err(e) = config.apply(&name, &value) {
                warn!("[CONFIG] {}; keeping default", e);
            }
        }

        debug!("[CONFIG] {:?}", config);
        config
    }

    fn apply(&mut self, name: &str, value: &str) -> CoreResult<()> {
        let invalid = || CoreError::InvalidParameter {
            name: name.to_string(),
            value: value.to_string(),
        };

        match name {
            "instance" => {
                if value.is_empty() {
                    return Err(invalid());
                }
                self.instance = value.to_string();
            }
            "boardPosition" => self.board_position = parse_vec3(value).ok_or_else(invalid)?,
            "boardRotation" => self.board_rotation = parse_vec3(value).ok_or_else(invalid)?,
            "boardScale" => self.board_scale = parse_vec3(value).ok_or_else(invalid)?,
            "lighting" => {
                self.lighting = match value {
                    "unlit" => Lighting::Unlit,
                    "lit" => Lighting::Lit,
                    _ => return Err(invalid()),
                }
            }
            "addLights" => self.add_lights = parse_bool(value).ok_or_else(invalid)?,
            "hideUI" => self.hide_ui = parse_bool(value).ok_or_else(invalid)?,
            "hideBoard" => self.hide_board = parse_bool(value).ok_or_else(invalid)?,
            "piecesOpacity" => {
                let opacity: f32 = value.trim().parse().map_err(|_| invalid())?;
                if opacity.is_nan() {
                    return Err(invalid());
                }
                self.pieces_opacity = opacity.clamp(0.0, 1.0);
            }
            "resetPosition" => self.reset_position = parse_vec3(value).ok_or_else(invalid)?,
            "resetRotation" => self.reset_rotation = parse_vec3(value).ok_or_else(invalid)?,
            "resetScale" => self.reset_scale = parse_vec3(value).ok_or_else(invalid)?,
            "models" => self.models = Some(value.to_string()),
            other => debug!("[CONFIG] Ignoring unknown parameter '{}'", other),
        }
        Ok(())
    }

    pub fn board_transform(&self) -> Transform {
        Transform {
            translation: self.board_position,
            rotation: euler_degrees(self.board_rotation),
            scale: self.board_scale,
        }
    }

    /// Reset control placement relative to the board root.
    pub fn reset_transform(&self) -> Transform {
        Transform {
            translation: self.reset_position,
            rotation: euler_degrees(self.reset_rotation),
            scale: self.reset_scale,
        }
    }

    /// Lights are only meaningful for lit materials.
    pub fn spawns_lights(&self) -> bool {
        self.lighting == Lighting::Lit && self.add_lights
    }

    pub fn unlit(&self) -> bool {
        self.lighting == Lighting::Unlit
    }

    pub fn shows_reset_control(&self) -> bool {
        !self.hide_ui
    }

    /// Tile alpha, `None` for the opaque default.
    pub fn tile_alpha(&self) -> Option<f32> {
        self.hide_board.then_some(HIDDEN_TILE_ALPHA)
    }

    /// Highlight alpha, `None` for the opaque default.
    pub fn highlight_alpha(&self) -> Option<f32> {
        self.hide_board.then_some(HIDDEN_HIGHLIGHT_ALPHA)
    }
}

/// `"x y z"`, whitespace separated.
fn parse_vec3(value: &str) -> Option<Vec3> {
    let parts: Vec<f32> = value
        .split_whitespace()
        .map(|p| p.parse::<f32>().ok().filter(|v| v.is_finite()))
        .collect::<Option<_>>()?;
    match parts.as_slice() {
        [x, y, z] => Some(Vec3::new(*x, *y, *z)),
        _ => None,
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn euler_degrees(degrees: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::XYZ,
        degrees.x.to_radians(),
        degrees.y.to_radians(),
        degrees.z.to_radians(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_bare_url() {
        let config = BoardConfig::from_url_str("https://example.com/space/board").unwrap();
        assert_eq!(config.instance, "https://example.com/space/board");
        assert_eq!(config.board_position, Vec3::new(0.0, 1.1, -2.0));
        assert_eq!(config.board_scale, Vec3::ONE);
        assert_eq!(config.lighting, Lighting::Unlit);
        assert!(config.add_lights);
        assert!(!config.spawns_lights());
        assert!(config.shows_reset_control());
        assert_eq!(config.pieces_opacity, 1.0);
        assert_eq!(config.tile_alpha(), None);
    }

    #[test]
    fn test_instance_defaults_to_url_without_query() {
        let config =
            BoardConfig::from_url_str("https://example.com/board?hideUI=true&lighting=lit").unwrap();
        assert_eq!(config.instance, "https://example.com/board");
        assert!(config.hide_ui);
        assert!(!config.shows_reset_control());
        assert!(config.spawns_lights());
    }

    #[test]
    fn test_explicit_parameters() {
        let config = BoardConfig::from_url_str(
            "https://example.com/board?instance=lobby&boardPosition=1%202%203\
             &boardRotation=0+90+0&boardScale=0.5+0.5+0.5&lighting=lit&addLights=false\
             &hideBoard=1&resetPosition=0+0+-5",
        )
        .unwrap();
        assert_eq!(config.instance, "lobby");
        assert_eq!(config.board_position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(config.board_rotation, Vec3::new(0.0, 90.0, 0.0));
        assert_eq!(config.board_scale, Vec3::splat(0.5));
        assert!(!config.spawns_lights());
        assert_eq!(config.tile_alpha(), Some(HIDDEN_TILE_ALPHA));
        assert_eq!(config.highlight_alpha(), Some(HIDDEN_HIGHLIGHT_ALPHA));
        assert_eq!(config.reset_position, Vec3::new(0.0, 0.0, -5.0));
    }

    #[test]
    fn test_opacity_is_clamped() {
        let high = BoardConfig::from_url_str("https://e.com/b?piecesOpacity=3").unwrap();
        let low = BoardConfig::from_url_str("https://e.com/b?piecesOpacity=-1").unwrap();
        let mid = BoardConfig::from_url_str("https://e.com/b?piecesOpacity=0.25").unwrap();
        assert_eq!(high.pieces_opacity, 1.0);
        assert_eq!(low.pieces_opacity, 0.0);
        assert_eq!(mid.pieces_opacity, 0.25);
    }

    #[test]
    fn test_malformed_values_keep_defaults() {
        let config = BoardConfig::from_url_str(
            "https://e.com/b?boardPosition=1+2&lighting=neon&hideUI=maybe&piecesOpacity=abc&instance=",
        )
        .unwrap();
        assert_eq!(config.board_position, Vec3::new(0.0, 1.1, -2.0));
        assert_eq!(config.lighting, Lighting::Unlit);
        assert!(!config.hide_ui);
        assert_eq!(config.pieces_opacity, 1.0);
        assert_eq!(config.instance, "https://e.com/b");
    }

    #[test]
    fn test_unparseable_url() {
        assert!(matches!(
            BoardConfig::from_url_str("not a url"),
            Err(CoreError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_board_transform_uses_degrees() {
        let config = BoardConfig {
            board_rotation: Vec3::new(0.0, 180.0, 0.0),
            ..Default::default()
        };
        let forward = config.board_transform().rotation * Vec3::Z;
        assert!((forward.z + 1.0).abs() < 1e-5);
    }
}
