//! Sliding collision against thick walls.
//!
//! Each iteration casts the remaining displacement against every wall,
//! stops at the most urgent contact and keeps only the part of the
//! remaining motion that runs along the touched face.

use glam::Vec2;
use log::trace;
use smallvec::SmallVec;

use crate::world::{Scene, SlabHit, collide_thick_segment};

/// Contacts resolved per step before the remainder is dropped.
pub const MAX_CLIP_ITERATIONS: usize = 4;

/// What the caller gets back.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveResult {
    pub pos: Vec2,                      // final XY
    pub normals: SmallVec<[Vec2; 4]>,   // faces touched, in order
    pub exhausted: bool,                // budget ran out with motion left
}

impl MoveResult {
    #[inline]
    pub fn hit_wall(&self) -> bool {
        !self.normals.is_empty()
    }
}

/// Most urgent contact of `ray` from `pos` against every wall.
fn nearest_contact(scene: &Scene, pos: Vec2, ray: Vec2) -> SlabHit {
    scene.walls().iter().fold(SlabHit::Miss, |best, wall| {
        best.prefer(collide_thick_segment(
            pos,
            ray,
            wall.start,
            wall.end,
            scene.half_thickness(),
        ))
    })
}

/// Move from `pos` by `delta`, sliding along any wall in the way.
///
/// Velocity is not touched; the caller owns it.
pub fn slide_move(scene: &Scene, mut pos: Vec2, delta: Vec2) -> MoveResult {
    let mut remaining = delta;
    let mut normals = SmallVec::new();

    for _ in 0..MAX_CLIP_ITERATIONS {
        let hit = nearest_contact(scene, pos, remaining);
        let Some(contact) = hit.contact() else {
            return MoveResult {
                pos: pos + remaining,
                normals,
                exhausted: false,
            };
        };

        pos += contact.displacement;
        normals.push(contact.normal);

        // keep only the tangential part of what is left
        let tangent = contact.normal.perp();
        remaining = tangent * (remaining - contact.displacement).dot(tangent);
    }

    let exhausted = remaining != Vec2::ZERO;
    if exhausted {
        trace!("slide_move: dropping {remaining:?} after {MAX_CLIP_ITERATIONS} clips");
    }
    MoveResult {
        pos,
        normals,
        exhausted,
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
