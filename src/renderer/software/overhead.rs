//! Top-down debug map: wall centrelines, their collision slabs and the
//! player marker, centred on the camera.

use glam::{DVec2, IVec2, Vec2};

use crate::{
    renderer::Rgba,
    world::{Camera, Scene},
};

pub const WALL_COLOUR: Rgba = 0xFF_FFFFFF;
pub const SLAB_COLOUR: Rgba = 0xFF_FFE566; // (1.0, 0.9, 0.4)
pub const PLAYER_COLOUR: Rgba = 0xFF_CC6699; // (0.8, 0.4, 0.6)
pub const FACING_COLOUR: Rgba = 0xFF_66CC99; // (0.4, 0.8, 0.6)

const PLAYER_SIZE: i32 = 4;

/// Pixels per metre; zooming in (narrower fov) magnifies the map.
#[inline]
pub fn pixels_per_metre(fov: f32) -> f32 {
    25.0 + 10.0 / fov
}

/// Maps world XY to screen pixels around the camera (+y is up).
///
/// Screen positions stay in `f64` until clipped, so far-off walls keep
/// their on-screen part exact.
#[derive(Clone, Copy, Debug)]
struct MapView {
    centre: DVec2,
    eye: DVec2,
    ppm: f64,
}

impl MapView {
    fn to_screen(self, p: Vec2) -> DVec2 {
        let d = (p.as_dvec2() - self.eye) * self.ppm;
        DVec2::new(self.centre.x + d.x, self.centre.y - d.y)
    }
}

/// Liang–Barsky clip of `a → b` to the pixel rectangle `[0, max]`.
///
/// A clipped endpoint lands exactly on the rectangle edge it was cut by.
pub fn clip_segment(a: DVec2, b: DVec2, max: DVec2) -> Option<(DVec2, DVec2)> {
    if !a.is_finite() || !b.is_finite() {
        return None;
    }
    let d = b - a;
    let mut lo: (f64, Option<(usize, f64)>) = (0.0, None);
    let mut hi: (f64, Option<(usize, f64)>) = (1.0, None);
    for (p, q, axis, edge) in [
        (-d.x, a.x, 0, 0.0),
        (d.x, max.x - a.x, 0, max.x),
        (-d.y, a.y, 1, 0.0),
        (d.y, max.y - a.y, 1, max.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > hi.0 {
                return None;
            }
            if r > lo.0 {
                lo = (r, Some((axis, edge)));
            }
        } else {
            if r < lo.0 {
                return None;
            }
            if r < hi.0 {
                hi = (r, Some((axis, edge)));
            }
        }
    }

    let point = |(t, cut): (f64, Option<(usize, f64)>)| {
        let mut p = a + d * t;
        if let Some((axis, edge)) = cut {
            p[axis] = edge;
        }
        p
    };
    Some((point(lo), point(hi)))
}

/// Clip a screen-space segment to the buffer, then rasterise it.
fn draw_segment(buf: &mut [Rgba], w: usize, h: usize, a: DVec2, b: DVec2, colour: Rgba) {
    if w == 0 || h == 0 {
        return;
    }
    let max = DVec2::new((w - 1) as f64, (h - 1) as f64);
    if let Some((a, b)) = clip_segment(a, b, max) {
        draw_line(buf, w, h, a.as_ivec2(), b.as_ivec2(), colour);
    }
}

/// Draw the overhead map of `scene` on top of whatever `buf` holds.
pub fn draw_overhead(buf: &mut [Rgba], w: usize, h: usize, camera: &Camera, scene: &Scene) {
    let view = MapView {
        centre: DVec2::new(w as f64 * 0.5, h as f64 * 0.5),
        eye: camera.xy().as_dvec2(),
        ppm: f64::from(pixels_per_metre(camera.fov)),
    };
    let pad = scene.half_thickness();

    for wall in scene.walls() {
        let a = view.to_screen(wall.start);
        let b = view.to_screen(wall.end);
        draw_segment(buf, w, h, a, b, WALL_COLOUR);

        // slab outline: ends pushed out along the wall, sides along its normal
        let Some(dir) = wall.dir().try_normalize() else {
            continue;
        };
        let side = dir.perp() * pad;
        let along = dir * pad;
        let corners = [
            wall.start - along + side,
            wall.end + along + side,
            wall.end + along - side,
            wall.start - along - side,
        ]
        .map(|c| view.to_screen(c));
        for i in 0..corners.len() {
            let j = (i + 1) % corners.len();
            draw_segment(buf, w, h, corners[i], corners[j], SLAB_COLOUR);
        }
    }

    let centre = view.to_screen(camera.xy());
    let me = centre.as_ivec2();
    let half = PLAYER_SIZE / 2;
    for y in me.y - half..me.y + half {
        for x in me.x - half..me.x + half {
            plot(buf, w, h, IVec2::new(x, y), PLAYER_COLOUR);
        }
    }
    let nose = view.to_screen(camera.xy() + camera.forward());
    draw_segment(buf, w, h, centre, nose, FACING_COLOUR);
}

#[inline]
fn plot(buf: &mut [Rgba], w: usize, h: usize, p: IVec2, colour: Rgba) {
    if (0..w as i32).contains(&p.x) && (0..h as i32).contains(&p.y) {
        buf[p.y as usize * w + p.x as usize] = colour;
    }
}

/// Bresenham line with per-pixel clipping.  Lines wholly off one edge of
/// the buffer are skipped; callers with far-off endpoints clip first.
pub fn draw_line(buf: &mut [Rgba], w: usize, h: usize, a: IVec2, b: IVec2, colour: Rgba) {
    let (wi, hi) = (w as i32, h as i32);
    if (a.x < 0 && b.x < 0)
        || (a.y < 0 && b.y < 0)
        || (a.x >= wi && b.x >= wi)
        || (a.y >= hi && b.y >= hi)
    {
        return;
    }

    let (mut x0, mut y0) = (a.x, a.y);
    let (x1, y1) = (b.x, b.y);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        plot(buf, w, h, IVec2::new(x0, y0), colour);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            if x0 == x1 {
                break;
            }
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            if y0 == y1 {
                break;
            }
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Tile, Wall};
    use glam::{Vec3, dvec2, vec2};

    #[test]
    fn line_covers_both_endpoints() {
        let (w, h) = (8, 8);
        let mut buf = vec![0; w * h];
        draw_line(&mut buf, w, h, IVec2::new(1, 1), IVec2::new(6, 3), 7);
        assert_eq!(buf[w + 1], 7);
        assert_eq!(buf[3 * w + 6], 7);
        assert_eq!(buf.iter().filter(|&&p| p == 7).count(), 6);
    }

    #[test]
    fn line_off_screen_is_clipped() {
        let (w, h) = (4, 4);
        let mut buf = vec![0; w * h];
        draw_line(&mut buf, w, h, IVec2::new(-5, 2), IVec2::new(10, 2), 1);
        assert!(buf[2 * w..3 * w].iter().all(|&p| p == 1));
        draw_line(&mut buf, w, h, IVec2::new(-5, -1), IVec2::new(10, -1), 2);
        assert!(!buf.contains(&2));
    }

    #[test]
    fn clip_keeps_inside_part_only() {
        let max = dvec2(9.0, 9.0);
        assert_eq!(
            clip_segment(dvec2(-1e9, 4.0), dvec2(1e9, 4.0), max),
            Some((dvec2(0.0, 4.0), dvec2(9.0, 4.0)))
        );
        // untouched when already inside
        assert_eq!(
            clip_segment(dvec2(1.0, 2.0), dvec2(3.0, 4.0), max),
            Some((dvec2(1.0, 2.0), dvec2(3.0, 4.0)))
        );
        assert!(clip_segment(dvec2(-5.0, -1.0), dvec2(20.0, -1.0), max).is_none());
        assert!(clip_segment(dvec2(-5.0, 20.0), dvec2(20.0, 5.0e9), max).is_none());
        assert!(clip_segment(dvec2(f64::NAN, 0.0), dvec2(1.0, 1.0), max).is_none());
    }

    #[test]
    fn huge_wall_is_clipped_to_the_map() {
        let scene = Scene::new(
            vec![Wall::new(vec2(-1.0e9, 1.0), vec2(1.0e9, 1.0))],
            Vec::<Tile>::new(),
            vec![],
            2.0,
            0.25,
        )
        .unwrap();
        let cam = Camera::new(Vec3::new(0.0, 0.0, 1.5), 0.0, 1.0);
        let (w, h) = (100, 100);
        let mut buf = vec![0; w * h];
        draw_overhead(&mut buf, w, h, &cam, &scene);

        // 35 px per metre: the wall lands on row 15 edge to edge
        assert_eq!(buf[15 * w], WALL_COLOUR);
        assert_eq!(buf[15 * w + w - 1], WALL_COLOUR);
        assert_eq!(buf[6 * w + 50], SLAB_COLOUR);
        assert_eq!(buf[23 * w + 50], SLAB_COLOUR);
    }

    #[test]
    fn map_marks_player_and_walls() {
        let scene = Scene::new(
            vec![Wall::new(vec2(1.0, -1.0), vec2(1.0, 1.0))],
            Vec::<Tile>::new(),
            vec![],
            2.0,
            0.25,
        )
        .unwrap();
        let cam = Camera::new(Vec3::new(0.0, 0.0, 1.5), 0.0, 1.0);
        let (w, h) = (100, 100);
        let mut buf = vec![0; w * h];
        draw_overhead(&mut buf, w, h, &cam, &scene);

        // 35 px per metre: wall centreline at x = 85, slab faces at x = 76 and 93
        assert_eq!(pixels_per_metre(1.0), 35.0);
        assert_eq!(buf[40 * w + 85], WALL_COLOUR);
        assert_eq!(buf[40 * w + 76], SLAB_COLOUR);
        assert_eq!(buf[40 * w + 93], SLAB_COLOUR);
        assert_eq!(buf[49 * w + 49], PLAYER_COLOUR);
        // facing line runs right along the centre row up to the wall
        assert_eq!(buf[50 * w + 60], FACING_COLOUR);
    }
}
