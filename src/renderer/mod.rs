//! Rendering abstraction layer.
//!
//! *The rest of the program never touches a pixel buffer directly.*
//! A frame is `begin_frame` → one or more `draw_*` calls → `end_frame`,
//! and the finished buffer is loaned to a closure for presentation.
//!
//! The only back-end is [`software`], a column raycaster.

use crate::world::{Camera, Scene, SurfaceTextures};

/// Pixel format of the software frame-buffer (0xAARRGGBB).
pub type Rgba = u32;

/// Pack normalised `r, g, b, a` channels into an [`Rgba`] texel.
#[inline]
pub fn pack_rgba(r: f32, g: f32, b: f32, a: f32) -> Rgba {
    let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u32;
    q(a) << 24 | q(r) << 16 | q(g) << 8 | q(b)
}

/// A renderer that owns an internal scratch buffer for the whole frame.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it
    /// to the background colour.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// First-person view of `scene` from `camera`.
    fn draw_view(&mut self, camera: &Camera, scene: &Scene, textures: &SurfaceTextures);

    /// Top-down debug map of `scene` centred on `camera`.
    fn draw_overhead(&mut self, camera: &Camera, scene: &Scene);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// `submit(&[Rgba], w, h)` is run exactly once per frame.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

pub mod software;

pub use software::Software;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_rgba_orders_channels() {
        assert_eq!(pack_rgba(1.0, 0.0, 0.0, 1.0), 0xFF_FF0000);
        assert_eq!(pack_rgba(0.0, 0.0, 1.0, 0.0), 0x00_0000FF);
        assert_eq!(pack_rgba(2.0, -1.0, 0.0, 1.0), 0xFF_FF0000);
    }
}
