use bitflags::bitflags;
use glam::{Vec2, Vec3};
use std::f32::consts::TAU;

use crate::world::Camera;

/// Narrowest and widest field of view the zoom control may reach.
pub const FOV_MIN: f32 = 0.1;
pub const FOV_MAX: f32 = 3.0;

/// Peak-to-trough amplitude of the walking bob is twice this.
const HEAD_BOB_AMPLITUDE: f32 = 0.025;

bitflags! {
    /// Held movement keys for one tic.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Buttons: u8 {
        const FORWARD      = 0x01;
        const BACK         = 0x02;
        const STRAFE_LEFT  = 0x04;
        const STRAFE_RIGHT = 0x08;
        const RUN          = 0x10;
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct InputCmd {
    pub buttons: Buttons,
    pub look: f32, // pointer x-delta since last tic (+ = right)
    pub zoom: f32, // scroll delta (+ = widen fov)
}

impl InputCmd {
    /// Move intent in player-local axes: x = forward, y = left.
    pub fn wish_dir(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.buttons.contains(Buttons::BACK) {
            dir.x -= 1.0;
        }
        if self.buttons.contains(Buttons::FORWARD) {
            dir.x += 1.0;
        }
        if self.buttons.contains(Buttons::STRAFE_RIGHT) {
            dir.y -= 1.0;
        }
        if self.buttons.contains(Buttons::STRAFE_LEFT) {
            dir.y += 1.0;
        }
        dir
    }
}

/// Everything the simulation knows about the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub angle: f32,         // radians, kept in [0, TAU)
    pub angle_vel: f32,     // radians / second
    pub fov: f32,           // radians, kept in [FOV_MIN, FOV_MAX]
    pub head_bob: f32,      // phase in [0, 1)
    pub eye_height: f32,    // nominal, metres above the floor
}

impl Player {
    pub fn new(pos: Vec2, angle: f32, fov: f32, eye_height: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angle: angle.rem_euclid(TAU),
            angle_vel: 0.0,
            fov: fov.clamp(FOV_MIN, FOV_MAX),
            head_bob: 0.0,
            eye_height,
        }
    }

    /// Eye height this frame: the nominal height dipped by the walk cycle.
    #[inline]
    pub fn eye_level(&self) -> f32 {
        self.eye_height + HEAD_BOB_AMPLITUDE * ((self.head_bob * TAU).cos() - 1.0)
    }

    /// Read-only view for the renderer.
    pub fn camera(&self) -> Camera {
        Camera::new(
            Vec3::new(self.pos.x, self.pos.y, self.eye_level()),
            self.angle,
            self.fov,
        )
    }
}
