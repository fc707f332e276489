use glam::Vec2;

use crate::{
    renderer::Rgba,
    world::{RayHit, Scene, Texture, ray_cast_segment},
};

/// Nearest wall along `ray` from `origin`; walls are zero-width here.
///
/// Ties keep the wall listed first.
pub fn nearest_wall(scene: &Scene, origin: Vec2, ray: Vec2) -> Option<RayHit> {
    scene
        .walls()
        .iter()
        .filter_map(|w| ray_cast_segment(origin, ray, w.start, w.end))
        .fold(None, |best: Option<RayHit>, hit| match best {
            Some(b) if b.t <= hit.t => Some(b),
            _ => Some(hit),
        })
}

/// Rows `[y0, y1)` of the projected span `[top, bottom)` that are on screen.
#[inline]
pub fn visible_rows(top: i32, bottom: i32, height: usize) -> (usize, usize) {
    let y0 = top.clamp(0, height as i32) as usize;
    let y1 = bottom.clamp(0, height as i32) as usize;
    (y0, y1.max(y0))
}

/// Draw one vertical wall slice into column `x` of a row-major buffer.
///
/// `u` picks the texture column once; `v` is interpolated linearly from
/// the projected top (0) to the projected bottom (1), so clipped spans
/// still show the right part of the texture.
pub fn draw_wall_column(
    pixels: &mut [Rgba],
    width: usize,
    height: usize,
    x: usize,
    (top, bottom): (i32, i32),
    u: f32,
    tex: &Texture,
) {
    let (y0, y1) = visible_rows(top, bottom, height);
    if y0 == y1 {
        return;
    }

    let column = tex.column(u);
    let span = (i64::from(bottom) - i64::from(top)).max(1) as f32;
    for y in y0..y1 {
        let v = (y as f32 - top as f32) / span;
        pixels[y * width + x] = column[Texture::texel_index(v, tex.h)];
    }
}
