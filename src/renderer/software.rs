//! ---------------------------------------------------------------------------
//! Software (CPU) column raycaster
//!
//! * Fills an `&mut [u32]` frame-buffer in **0xAARRGGBB** format.
//! * One ray per screen column: the nearest wall is drawn as a vertical
//!   slice, every other row of the column gets the nearest floor or
//!   ceiling tile behind it.  No depth buffer; pixels nothing covers keep
//!   the background colour.
//! ---------------------------------------------------------------------------

pub mod overhead;
pub mod planes;
pub mod projection;
pub mod walls;

use log::debug;
use std::f32::consts::PI;

pub use projection::Projection;

use crate::{
    renderer::{Renderer, Rgba},
    world::{Camera, Scene, SurfaceTextures},
};

/// Clear colour, `pack_rgba(0.1, 0.2, 0.3, 1.0)`.
pub const BACKGROUND: Rgba = 0xFF_19334C;

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

/// Column raycaster with its own scratch frame.
pub struct Software {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
    projection: Projection,
    background: Rgba,
}

impl Default for Software {
    fn default() -> Self {
        Self::with_background(BACKGROUND)
    }
}

impl Software {
    pub fn with_background(background: Rgba) -> Self {
        Self {
            scratch: Vec::new(),
            width: 0,
            height: 0,
            projection: Projection::default(),
            background,
        }
    }

    #[inline]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate and re-derive the projection if resolution changed
        if w != self.width || h != self.height || self.scratch.len() != w * h {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
            self.projection = Projection::new(w, h);
            debug!("software renderer: {w}×{h}, k = {:.3}", self.projection.k);
        }

        self.scratch.fill(self.background);
    }

    fn draw_view(&mut self, camera: &Camera, scene: &Scene, textures: &SurfaceTextures) {
        render_view(
            &mut self.scratch,
            self.width,
            self.height,
            &self.projection,
            camera,
            scene,
            textures,
        );
    }

    fn draw_overhead(&mut self, camera: &Camera, scene: &Scene) {
        overhead::draw_overhead(&mut self.scratch, self.width, self.height, camera, scene);
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}

/*──────────────────────── column rendering ───────────────────────────*/

/// Raycast the whole view into a row-major `width × height` buffer.
///
/// Only pixels that hit geometry are written; `target` should already hold
/// the background.
pub fn render_view(
    target: &mut [Rgba],
    width: usize,
    height: usize,
    projection: &Projection,
    camera: &Camera,
    scene: &Scene,
    textures: &SurfaceTextures,
) {
    debug_assert_eq!(target.len(), width * height);
    debug_assert!(
        camera.fov > 0.0 && camera.fov < PI,
        "fov {} outside (0, π)",
        camera.fov
    );
    let origin = camera.xy();
    let eye = camera.eye_z();

    for x in 0..width {
        let ray = camera.column_ray(x, width);

        /* wall pass ------------------------------------------------------*/
        let (y0, y1) = match walls::nearest_wall(scene, origin, ray) {
            Some(hit) => {
                let span = projection.wall_span(camera.fov, scene.wall_height(), eye, hit.t);
                walls::draw_wall_column(target, width, height, x, span, hit.s, &textures.wall);
                walls::visible_rows(span.0, span.1, height)
            }
            None => (0, 0),
        };

        /* floor / ceiling pass ------------------------------------------*/
        for y in (0..y0).chain(y1..height) {
            let pitch = projection.pitch(y, camera.fov);
            if let Some(c) = planes::plane_texel(scene, textures, origin, eye, ray, pitch) {
                target[y * width + x] = c;
            }
        }
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
