//! Ray intersection primitives shared by the renderer and the collision
//! solver.
//!
//! * [`ray_cast_segment`] – zero-width segment, used for walls on screen
//!   and (per axis) for floor/ceiling tiles.
//! * [`collide_thick_segment`] – wall padded by a half-thickness on both
//!   sides, used for player movement only.

use glam::Vec2;

/// Signed face distances closer than this snap to exactly 0, so a body
/// resting on the seam between two walls does not jitter.
const SNAP_EPSILON: f32 = 1e-3;

/// `|dir × edge|` below this fraction of `|dir|·|edge|` counts as parallel.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Approach speeds (ray · normal) above `-APPROACH_EPSILON` count as
/// "moving along or away from" a touched face.
const APPROACH_EPSILON: f32 = 1e-6;

/// Where a ray met a segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Travel parameter: hit point is `origin + t · dir`.
    pub t: f32,
    /// Segment parameter in `0 ..= 1`, reused as a texture coordinate.
    pub s: f32,
}

/// Solve `origin + t·dir = a + s·(b − a)`.
///
/// `None` if the ray is parallel to the segment (this includes a zero
/// `dir` and a zero-length segment), points away from it (`t < 0`), or
/// passes beside it (`s ∉ [0, 1]`).
#[inline]
pub fn ray_cast_segment(origin: Vec2, dir: Vec2, a: Vec2, b: Vec2) -> Option<RayHit> {
    let edge = b - a;
    let den = dir.perp_dot(edge);
    if !den.is_finite() || den.abs() <= PARALLEL_EPSILON * dir.length() * edge.length() {
        return None;
    }

    let w = a - origin;
    let t = w.perp_dot(edge) / den;
    let s = w.perp_dot(dir) / den;

    if t < 0.0 || !(0.0..=1.0).contains(&s) {
        return None;
    }
    Some(RayHit { t, s })
}

/*──────────────────────────── thick walls ─────────────────────────────*/

/// Contact with one face of a thick wall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// Offset from the ray origin to the contact point.
    pub displacement: Vec2,
    /// Unit normal of the face, pointing out of the slab.
    pub normal: Vec2,
}

/// Result of a ray against a thick wall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SlabHit {
    Miss,
    /// Origin was outside; the ray enters through `normal`'s face.
    Entered(Contact),
    /// Origin was already inside; `displacement` pushes it out through
    /// the nearest face.
    Inside(Contact),
}

impl SlabHit {
    #[inline]
    pub fn contact(&self) -> Option<&Contact> {
        match self {
            SlabHit::Miss => None,
            SlabHit::Entered(c) | SlabHit::Inside(c) => Some(c),
        }
    }

    /// Pick the more urgent of two candidates.
    ///
    /// Escaping interpenetration beats stopping at a new wall; within the
    /// same kind the shorter displacement wins; ties keep `self`.
    pub fn prefer(self, other: SlabHit) -> SlabHit {
        match (&self, &other) {
            (_, SlabHit::Miss) => self,
            (SlabHit::Miss, _) => other,
            (SlabHit::Inside(_), SlabHit::Entered(_)) => self,
            (SlabHit::Entered(_), SlabHit::Inside(_)) => other,
            (SlabHit::Inside(a), SlabHit::Inside(b))
            | (SlabHit::Entered(a), SlabHit::Entered(b)) => {
                if b.displacement.length_squared() < a.displacement.length_squared() {
                    other
                } else {
                    self
                }
            }
        }
    }
}

#[inline]
fn snap(d: f32) -> f32 {
    if d.abs() <= SNAP_EPSILON { 0.0 } else { d }
}

/// Along-wall parameter of `p` (0 at `start`, 1 at `end`).
#[inline]
fn along(p: Vec2, start: Vec2, edge: Vec2) -> f32 {
    (p - start).dot(edge) / edge.length_squared()
}

/// Cast `ray` (the full displacement of this step) from `origin` against
/// the wall `start → end` padded by `half_thickness` on both sides.
///
/// Faces are the two lines offset by `±half_thickness` along the wall's
/// left-hand normal.  A ray only counts as entering if it reaches a face
/// within `k ∈ (0, 1]` of its length and inside the wall's extent.
pub fn collide_thick_segment(
    origin: Vec2,
    ray: Vec2,
    start: Vec2,
    end: Vec2,
    half_thickness: f32,
) -> SlabHit {
    let edge = end - start;
    let Some(n) = edge.perp().try_normalize() else {
        return SlabHit::Miss; // zero-length wall
    };

    // signed distance from origin to each face, measured along n
    let centre = (start - origin).dot(n);
    let d0 = snap(centre + half_thickness); // face on the +n side
    let d1 = snap(centre - half_thickness); // face on the −n side

    if d0 == 0.0 && d1 == 0.0 {
        /* ---- on the line of a (near) zero-thickness wall ------------ */
        let approach = ray.dot(n);
        if approach.abs() <= APPROACH_EPSILON || !(0.0..=1.0).contains(&along(origin, start, edge))
        {
            return SlabHit::Miss;
        }
        let normal = if approach > 0.0 { -n } else { n };
        return SlabHit::Inside(Contact {
            displacement: Vec2::ZERO,
            normal,
        });
    }

    if d0.signum() == d1.signum() && (d0 != 0.0) == (d1 != 0.0) {
        /* ---- outside: find entry through the face facing the ray ---- */
        let den = ray.dot(n);
        if den == 0.0 {
            return SlabHit::Miss;
        }

        let (k, normal) = if den > 0.0 { (d1 / den, -n) } else { (d0 / den, n) };
        if !(k > 0.0 && k <= 1.0) {
            return SlabHit::Miss;
        }

        let displacement = ray * k;
        if !(0.0..=1.0).contains(&along(origin + displacement, start, edge)) {
            return SlabHit::Miss;
        }
        return SlabHit::Entered(Contact {
            displacement,
            normal,
        });
    }

    /* ---- inside (or touching a face) ------------------------------- */
    let approach = ray.dot(n);
    if (d0 == 0.0 && approach >= -APPROACH_EPSILON) || (d1 == 0.0 && approach <= APPROACH_EPSILON)
    {
        return SlabHit::Miss; // resting on a face, leaving or sliding
    }
    if !(0.0..=1.0).contains(&along(origin, start, edge)) {
        return SlabHit::Miss; // inside the band, but past an end
    }

    if d0.abs() < d1.abs() {
        SlabHit::Inside(Contact {
            displacement: n * d0,
            normal: n,
        })
    } else {
        SlabHit::Inside(Contact {
            displacement: n * d1,
            normal: -n,
        })
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
