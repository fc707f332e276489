use glam::Vec2;
use log::debug;

pub type TileId = u16;

/// Runtime snapshot of one scene (immutable after construction).
///
/// Walls share one height and one half-thickness, exactly like the
/// hand-built rooms this renderer was written for.  Floor tiles sit at
/// height 0, ceiling tiles at `wall_height`.
#[derive(Clone, Debug)]
pub struct Scene {
    walls: Vec<Wall>,
    floors: Vec<Tile>,
    ceilings: Vec<Tile>,
    wall_height: f32,
    half_thickness: f32,
}

/// Things that can go wrong while assembling a scene.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SceneError {
    #[error("wall half-thickness must be >= 0 (got {0})")]
    NegativeThickness(f32),

    #[error("wall height must be > 0 (got {0})")]
    BadWallHeight(f32),

    /// Tile corners given in the wrong order.
    #[error("tile {0}: min corner is not below/left of max corner")]
    InvertedTile(TileId),

    #[error("non-finite coordinate in {0}")]
    NonFinite(&'static str),
}

/*--------------------------- primitives -----------------------------*/

/// Centre line of a wall.  Thickness lives on the [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wall {
    pub start: Vec2,
    pub end: Vec2,
}

impl Wall {
    pub const fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn dir(&self) -> Vec2 {
        self.end - self.start
    }
}

/// Axis-aligned floor or ceiling rectangle (x_min, y_min)..(x_max, y_max).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    pub min: Vec2,
    pub max: Vec2,
}

impl Tile {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }
}

/*----------------------------- scene --------------------------------*/

impl Scene {
    pub fn new(
        walls: Vec<Wall>,
        floors: Vec<Tile>,
        ceilings: Vec<Tile>,
        wall_height: f32,
        half_thickness: f32,
    ) -> Result<Self, SceneError> {
        if !(half_thickness >= 0.0) {
            return Err(SceneError::NegativeThickness(half_thickness));
        }
        if !(wall_height > 0.0) || !wall_height.is_finite() {
            return Err(SceneError::BadWallHeight(wall_height));
        }
        if walls
            .iter()
            .any(|w| !w.start.is_finite() || !w.end.is_finite())
        {
            return Err(SceneError::NonFinite("walls"));
        }
        for (name, tiles) in [("floors", &floors), ("ceilings", &ceilings)] {
            for (i, t) in tiles.iter().enumerate() {
                if !t.min.is_finite() || !t.max.is_finite() {
                    return Err(SceneError::NonFinite(name));
                }
                if t.min.x > t.max.x || t.min.y > t.max.y {
                    return Err(SceneError::InvertedTile(i as TileId));
                }
            }
        }

        debug!(
            "scene: {} walls, {} floor tiles, {} ceiling tiles",
            walls.len(),
            floors.len(),
            ceilings.len()
        );

        Ok(Self {
            walls,
            floors,
            ceilings,
            wall_height,
            half_thickness,
        })
    }

    #[inline]
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    #[inline]
    pub fn floors(&self) -> &[Tile] {
        &self.floors
    }

    #[inline]
    pub fn ceilings(&self) -> &[Tile] {
        &self.ceilings
    }

    /// Height of every wall, and of every ceiling tile.
    #[inline]
    pub fn wall_height(&self) -> f32 {
        self.wall_height
    }

    /// Collision padding on each side of a wall's centre line.
    #[inline]
    pub fn half_thickness(&self) -> f32 {
        self.half_thickness
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
