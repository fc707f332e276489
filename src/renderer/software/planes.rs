use glam::{Vec2, vec2};

use crate::{
    renderer::Rgba,
    world::{Scene, SurfaceTextures, Texture, Tile, ray_cast_segment},
};

/// A floor or ceiling tile seen through one pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneHit {
    pub dist: f32,
    pub u: f32,
    pub v: f32,
}

/// Intersect one tile lying at height `plane_z`.
///
/// The pixel ray is split into its (x, z) and (y, z) shadows; each is cast
/// against the tile's extent on that axis.  Both must land, and their
/// portions give the texture coordinate.  `dir_x`, `dir_y` are the
/// normalised shadow directions, shared by every tile on the row.
pub fn tile_hit(
    tile: &Tile,
    origin: Vec2,
    eye: f32,
    plane_z: f32,
    dir_x: Vec2,
    dir_y: Vec2,
) -> Option<PlaneHit> {
    let hx = ray_cast_segment(
        vec2(origin.x, eye),
        dir_x,
        vec2(tile.min.x, plane_z),
        vec2(tile.max.x, plane_z),
    )?;
    let hy = ray_cast_segment(
        vec2(origin.y, eye),
        dir_y,
        vec2(tile.min.y, plane_z),
        vec2(tile.max.y, plane_z),
    )?;

    let gap = plane_z - eye;
    let dist = (hx.t * hx.t + hy.t * hy.t - gap * gap).max(0.0).sqrt();
    Some(PlaneHit {
        dist,
        u: hx.s,
        v: hy.s,
    })
}

/// Nearest of `tiles` along a pixel ray; ties keep the tile listed first.
pub fn nearest_tile(
    tiles: &[Tile],
    origin: Vec2,
    eye: f32,
    plane_z: f32,
    ray: Vec2,
    pitch: f32,
) -> Option<PlaneHit> {
    let dir_x = vec2(ray.x, pitch).try_normalize()?;
    let dir_y = vec2(ray.y, pitch).try_normalize()?;

    tiles
        .iter()
        .filter_map(|t| tile_hit(t, origin, eye, plane_z, dir_x, dir_y))
        .fold(None, |best: Option<PlaneHit>, hit| match best {
            Some(b) if b.dist <= hit.dist => Some(b),
            _ => Some(hit),
        })
}

/// Colour of the floor or ceiling seen at `pitch`, if any tile is there.
///
/// Looking up reaches ceiling tiles at `wall_height`, looking down reaches
/// floor tiles at 0; the horizon row itself shows nothing.
pub fn plane_texel(
    scene: &Scene,
    textures: &SurfaceTextures,
    origin: Vec2,
    eye: f32,
    ray: Vec2,
    pitch: f32,
) -> Option<Rgba> {
    let (tiles, plane_z, tex): (&[Tile], f32, &Texture) = if pitch > 0.0 {
        (scene.ceilings(), scene.wall_height(), &textures.ceiling)
    } else if pitch < 0.0 {
        (scene.floors(), 0.0, &textures.floor)
    } else {
        return None;
    };

    nearest_tile(tiles, origin, eye, plane_z, ray, pitch).map(|hit| tex.sample(hit.u, hit.v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Wall;

    const EPS: f32 = 1e-4;

    fn tile(min: (f32, f32), max: (f32, f32)) -> Tile {
        Tile::new(vec2(min.0, min.1), vec2(max.0, max.1))
    }

    #[test]
    fn floor_distance_matches_slant_range() {
        // looking straight along +x, 45° down from eye height 1
        let t = tile((0.0, -1.0), (4.0, 1.0));
        let hit = nearest_tile(&[t], Vec2::ZERO, 1.0, 0.0, vec2(1.0, 0.0), -1.0).unwrap();
        // lands at x = 1: portion 1/4 along the tile, centred across it
        assert!((hit.u - 0.25).abs() < EPS);
        assert!((hit.v - 0.5).abs() < EPS);
        // tx² = 2, ty² = 1, gap² = 1
        assert!((hit.dist - 2f32.sqrt()).abs() < EPS);
    }

    #[test]
    fn ceiling_uses_vertical_gap() {
        let t = tile((0.0, -1.0), (4.0, 1.0));
        // eye at 1, ceiling at 3 → gap 2, reached at x = 2 with pitch 1
        let hit = nearest_tile(&[t], Vec2::ZERO, 1.0, 3.0, vec2(1.0, 0.0), 1.0).unwrap();
        assert!((hit.u - 0.5).abs() < EPS);
        assert!((hit.dist - 8f32.sqrt()).abs() < EPS);
    }

    #[test]
    fn both_axes_must_land() {
        // x lands inside, y is off to the side
        let t = tile((0.0, 2.0), (4.0, 3.0));
        assert!(nearest_tile(&[t], Vec2::ZERO, 1.0, 0.0, vec2(1.0, 0.0), -1.0).is_none());
        // looking up never reaches a floor
        let t = tile((0.0, -1.0), (4.0, 1.0));
        assert!(nearest_tile(&[t], Vec2::ZERO, 1.0, 0.0, vec2(1.0, 0.0), 1.0).is_none());
    }

    #[test]
    fn missed_tiles_are_skipped() {
        let aside = tile((0.0, 5.0), (2.0, 6.0));
        let ahead = tile((0.0, -1.0), (2.0, 1.0));
        // steep pitch lands at x = 0.5
        let hit = nearest_tile(&[aside, ahead], Vec2::ZERO, 1.0, 0.0, vec2(1.0, 0.0), -2.0).unwrap();
        assert!((hit.u - 0.25).abs() < EPS);
        assert!((hit.dist - 1.25f32.sqrt()).abs() < EPS);
    }

    #[test]
    fn horizon_row_is_empty() {
        let scene = Scene::new(
            Vec::<Wall>::new(),
            vec![tile((-5.0, -5.0), (5.0, 5.0))],
            vec![tile((-5.0, -5.0), (5.0, 5.0))],
            2.0,
            0.1,
        )
        .unwrap();
        let tex = SurfaceTextures {
            wall: Texture::solid(1),
            floor: Texture::solid(2),
            ceiling: Texture::solid(3),
        };
        let ray = vec2(1.0, 0.0);
        assert_eq!(plane_texel(&scene, &tex, Vec2::ZERO, 1.0, ray, 0.0), None);
        assert_eq!(plane_texel(&scene, &tex, Vec2::ZERO, 1.0, ray, -0.5), Some(2));
        assert_eq!(plane_texel(&scene, &tex, Vec2::ZERO, 1.0, ray, 0.5), Some(3));
    }
}
