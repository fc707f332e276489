// Decoded surface textures.  Decoding image files is the asset loader's
// job; the renderer only ever sees the column-major texel grid below.

use crate::renderer::Rgba;

/// CPU-side storage: 32-bit **ARGB** (0xAARRGGBB) in **column-major** order,
/// so one screen-column of wall is one contiguous slice.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<Rgba>,
}

/// Things that can go wrong when building a texture.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    #[error("texture must be at least 1x1 (got {0}x{1})")]
    Empty(usize, usize),

    /// Pixel count does not match `w * h`.
    #[error("expected {expected} texels, got {got}")]
    SizeMismatch { expected: usize, got: usize },
}

/// Convenience checkerboard 8×8 (light/dark grey).
impl Default for Texture {
    fn default() -> Self {
        Texture::checker(8, 8, 1, 0xFF_A0A0A0, 0xFF_505050)
    }
}

impl Texture {
    /// Wrap an already column-major texel vector.
    pub fn new(w: usize, h: usize, pixels: Vec<Rgba>) -> Result<Self, TextureError> {
        if w == 0 || h == 0 {
            return Err(TextureError::Empty(w, h));
        }
        if pixels.len() != w * h {
            return Err(TextureError::SizeMismatch {
                expected: w * h,
                got: pixels.len(),
            });
        }
        Ok(Self { w, h, pixels })
    }

    /// Transpose a row-major image (as image decoders hand it out).
    pub fn from_row_major(w: usize, h: usize, rows: &[Rgba]) -> Result<Self, TextureError> {
        if w == 0 || h == 0 {
            return Err(TextureError::Empty(w, h));
        }
        if rows.len() != w * h {
            return Err(TextureError::SizeMismatch {
                expected: w * h,
                got: rows.len(),
            });
        }
        let mut pixels = vec![0; w * h];
        for y in 0..h {
            for x in 0..w {
                pixels[x * h + y] = rows[y * w + x];
            }
        }
        Ok(Self { w, h, pixels })
    }

    pub fn solid(colour: Rgba) -> Self {
        Self {
            w: 1,
            h: 1,
            pixels: vec![colour],
        }
    }

    /// `cell`-sized checkerboard alternating `a` and `b`.
    pub fn checker(w: usize, h: usize, cell: usize, a: Rgba, b: Rgba) -> Self {
        let cell = cell.max(1);
        let mut pixels = Vec::with_capacity(w * h);
        for x in 0..w {
            for y in 0..h {
                pixels.push(if (x / cell + y / cell) & 1 == 0 { a } else { b });
            }
        }
        Self { w, h, pixels }
    }

    /// Running-bond brick pattern with one-texel mortar lines.
    pub fn bricks(w: usize, h: usize, brick: Rgba, mortar: Rgba) -> Self {
        let (bw, bh) = ((w / 4).max(2), (h / 8).max(2));
        let mut pixels = Vec::with_capacity(w * h);
        for x in 0..w {
            for y in 0..h {
                let row = y / bh;
                let shift = if row & 1 == 0 { 0 } else { bw / 2 };
                let on_mortar = y % bh == 0 || (x + shift) % bw == 0;
                pixels.push(if on_mortar { mortar } else { brick });
            }
        }
        Self { w, h, pixels }
    }

    /// One full image column.
    #[inline]
    pub fn column(&self, u: f32) -> &[Rgba] {
        let x = Self::texel_index(u, self.w);
        &self.pixels[x * self.h..(x + 1) * self.h]
    }

    /// Nearest-texel lookup.  `u` runs left → right, `v` top → bottom;
    /// both are clamped into `0.0 ..= 1.0`.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> Rgba {
        let x = Self::texel_index(u, self.w);
        let y = Self::texel_index(v, self.h);
        self.pixels[x * self.h + y]
    }

    /// `coord × (dim − 1)`, truncated.  NaN maps to texel 0.
    #[inline]
    pub fn texel_index(coord: f32, dim: usize) -> usize {
        let c = if coord.is_nan() { 0.0 } else { coord.clamp(0.0, 1.0) };
        ((c * (dim - 1) as f32) as usize).min(dim - 1)
    }
}

/// The three surfaces of a scene.
#[derive(Clone, Debug, Default)]
pub struct SurfaceTextures {
    pub wall: Texture,
    pub floor: Texture,
    pub ceiling: Texture,
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
