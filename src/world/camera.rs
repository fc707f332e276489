use glam::{Vec2, Vec3};

/// Player view-point in world space.
///
/// * Only **yaw** is simulated – the view never tilts up/down, floor and
///   ceiling pitch come from the screen row alone.
/// * `pos.z` holds the eye height above the floor (head-bob included).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: Vec3, // x,y in metres; z = eye height above floor
    pub yaw: f32,  // radians (0 = +X, counter-clockwise)
    pub fov: f32,  // horizontal FoV (radians, strictly inside (0, π))
}

impl Camera {
    /// Create a new camera at `pos`, facing `yaw`, with horizontal FoV `fov`.
    pub fn new(pos: Vec3, yaw: f32, fov: f32) -> Self {
        Self { pos, yaw, fov }
    }

    /// Eye position projected onto the floor plan.
    #[inline]
    pub fn xy(&self) -> Vec2 {
        self.pos.truncate()
    }

    #[inline]
    pub fn eye_z(&self) -> f32 {
        self.pos.z
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector pointing where the camera looks on the X-Y plane.
    #[inline(always)]
    pub fn forward(self) -> Vec2 {
        Vec2::from_angle(self.yaw)
    }

    /// Horizontal direction of the ray through screen column `x`.
    ///
    /// Column 0 is the left edge: the angle offset is
    /// `(0.5 − x/width) · fov`, so rays sweep clockwise left → right.
    #[inline]
    pub fn column_ray(self, x: usize, width: usize) -> Vec2 {
        let offset = (0.5 - x as f32 / width as f32) * self.fov;
        Vec2::from_angle(self.yaw + offset)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
