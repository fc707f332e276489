/// Horizontal angle the projection constant is calibrated against:
/// `2·atan(1/2)`, the view angle of a screen as wide as it is far away.
pub const REFERENCE_FOV: f32 = 0.927_295_2;

/// Walls closer than this are projected as if at this distance.
pub const MIN_WALL_DIST: f32 = 1e-4;

/// Screen-space projection shared by the wall and plane passes.
///
/// `k / fov` converts a slope (height over distance) into screen rows, and
/// its inverse converts a row back into the pitch of the ray through it, so
/// floor/ceiling rows meet the wall base exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Projection {
    pub k: f32,
    pub half_h: f32,
}

impl Projection {
    /// Derived once per resolution, never per pixel.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            k: REFERENCE_FOV * width as f32,
            half_h: height as f32 * 0.5,
        }
    }

    /// Rows per unit of slope at field of view `fov`.
    #[inline]
    pub fn focal(&self, fov: f32) -> f32 {
        self.k / fov
    }

    /// Pitch (vertical slope) of the ray through screen row `y`.
    /// Positive above the horizon.
    #[inline]
    pub fn pitch(&self, y: usize, fov: f32) -> f32 {
        (self.half_h - y as f32) / self.focal(fov)
    }

    /// Unclipped screen rows `[top, bottom)` of a wall `wall_h` tall seen
    /// from eye height `eye` at distance `dist`.  Rows are truncated toward
    /// zero and may lie off-screen; `dist` is floored at [`MIN_WALL_DIST`].
    #[inline]
    pub fn wall_span(&self, fov: f32, wall_h: f32, eye: f32, dist: f32) -> (i32, i32) {
        let f = self.focal(fov);
        let dist = dist.max(MIN_WALL_DIST);
        let top = (self.half_h - f * (wall_h - eye) / dist) as i32;
        let bottom = (self.half_h + f * eye / dist) as i32;
        (top, bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_fov_is_two_atan_half() {
        assert!((REFERENCE_FOV - 2.0 * 0.5f32.atan()).abs() < 1e-6);
    }

    #[test]
    fn row_and_pitch_round_trip() {
        let p = Projection::new(350, 175);
        let fov = 2.0;
        // a floor point seen at pitch −e/d lands on the wall-base row
        let (eye, dist) = (1.5, 4.0);
        let (_, bottom) = p.wall_span(fov, 2.7, eye, dist);
        let pitch = p.pitch(bottom as usize, fov);
        assert!((pitch + eye / dist).abs() < 1.0 / p.focal(fov));
    }

    #[test]
    fn touching_wall_span_stays_finite() {
        let p = Projection::new(350, 175);
        let (top, bottom) = p.wall_span(2.0, 2.7, 1.5, 0.0);
        assert!(top < 0 && top > i32::MIN);
        assert!(bottom > 175 && bottom < i32::MAX);
        assert_eq!(p.wall_span(2.0, 2.7, 1.5, -1.0), (top, bottom));
    }

    #[test]
    fn nearer_walls_are_taller() {
        let p = Projection::new(320, 200);
        let (t1, b1) = p.wall_span(1.5, 2.7, 1.5, 2.0);
        let (t2, b2) = p.wall_span(1.5, 2.7, 1.5, 6.0);
        assert!(b1 - t1 > b2 - t2);
        assert!(t1 < 100 && b1 > 100);
    }
}
