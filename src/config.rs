//! Scene description loaded from JSON.
//!
//! Every field has a default, so a file only needs the parts it changes;
//! an empty object `{}` is the reference room.

use std::{f32::consts::TAU, fs, path::Path};

use glam::{Vec2, vec2};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    sim::{FOV_MAX, FOV_MIN, Player},
    world::{Scene, SceneError, Tile, Wall},
};

pub const WALL_HEIGHT: f32 = 2.7432;
pub const WALL_HALF_THICKNESS: f32 = 0.5;
pub const EYE_HEIGHT: f32 = 1.4986;
pub const DEFAULT_FOV: f32 = TAU / 3.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read scene file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed scene file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// One wall centreline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallDef {
    pub start: Vec2,
    pub end: Vec2,
}

/// One floor or ceiling rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileDef {
    pub min: Vec2,
    pub max: Vec2,
}

/// Everything needed to build a [`Scene`] and place the player in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub walls: Vec<WallDef>,
    pub floors: Vec<TileDef>,
    pub ceilings: Vec<TileDef>,
    /// Metres from floor to ceiling
    pub wall_height: f32,
    /// Collision padding on each side of a wall
    pub half_thickness: f32,
    pub spawn: Vec2,
    /// Radians, 0 = +X
    pub spawn_angle: f32,
    pub eye_height: f32,
    /// Horizontal field of view, radians
    pub fov: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let wall = |a: (f32, f32), b: (f32, f32)| WallDef {
            start: vec2(a.0, a.1),
            end: vec2(b.0, b.1),
        };
        // four 3 m squares in a row along +x
        let square = |i: usize| {
            let x = 3.0 * i as f32;
            TileDef {
                min: vec2(x - 1.5, -1.5),
                max: vec2(x + 1.5, 1.5),
            }
        };

        Self {
            walls: vec![
                wall((-1.5, -1.5), (8.5, -1.5)),
                wall((-1.5, 1.5), (4.5, 7.5)),
                wall((4.5, 7.5), (8.5, 1.5)),
                wall((-1.5, -1.5), (-1.5, 1.5)),
                wall((8.5, -1.5), (8.5, 1.5)),
            ],
            floors: (0..4).map(square).collect(),
            ceilings: vec![square(0), square(2)],
            wall_height: WALL_HEIGHT,
            half_thickness: WALL_HALF_THICKNESS,
            spawn: Vec2::ZERO,
            spawn_angle: 0.0,
            eye_height: EYE_HEIGHT,
            fov: DEFAULT_FOV,
        }
    }
}

impl SceneConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("loading scene from {}", path.display());
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate into a [`Scene`] and a player standing at the spawn point.
    pub fn build(&self) -> Result<(Scene, Player), ConfigError> {
        let tiles = |defs: &[TileDef]| -> Vec<Tile> {
            defs.iter().map(|t| Tile::new(t.min, t.max)).collect()
        };
        let scene = Scene::new(
            self.walls.iter().map(|w| Wall::new(w.start, w.end)).collect(),
            tiles(&self.floors),
            tiles(&self.ceilings),
            self.wall_height,
            self.half_thickness,
        )?;

        let fov = self.fov.clamp(FOV_MIN, FOV_MAX);
        if fov != self.fov {
            warn!("fov {} out of range, clamped to {fov}", self.fov);
        }
        let angle = self.spawn_angle.rem_euclid(TAU);
        let player = Player::new(self.spawn, angle, fov, self.eye_height);

        Ok((scene, player))
    }
}
