//! Per-tic player physics: look, walk, collide, bob, zoom.

use std::f32::consts::TAU;

use super::collision::{MoveResult, slide_move};
use super::components::{Buttons, FOV_MAX, FOV_MIN, InputCmd, Player};
use crate::world::Scene;

/* ----------------------------------------------------------------- */
/*  Physics constants                                                */
/* ----------------------------------------------------------------- */
const LOOK_SENSITIVITY: f32 = 0.25; // rad/s of turn rate per pointer unit
const TURN_DAMPING: f32 = 0.4; // angular velocity kept per tic
const ACCELERATION: f32 = 2.0; // m/s added per tic while a key is held
const WALK_DAMPING: f32 = 0.6; // velocity kept per tic
const RUN_DAMPING: f32 = 0.75; // … while running
const BOB_RATE: f32 = 0.5; // bob cycles per metre travelled
const ZOOM_RATE: f32 = 0.1; // fov radians per scroll unit

/// Advance `player` by one step of `dt` seconds.
///
/// Damping factors are applied once per call, so `dt` should be the fixed
/// tic length (see [`super::SECONDS_PER_UPDATE`]).
pub fn advance(player: &mut Player, cmd: &InputCmd, scene: &Scene, dt: f32) -> MoveResult {
    /* -- 1: turn ---------------------------------------------------- */
    player.angle_vel -= cmd.look * LOOK_SENSITIVITY;
    player.angle_vel *= TURN_DAMPING;
    player.angle = (player.angle + player.angle_vel * dt).rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if player.angle >= TAU {
        player.angle = 0.0;
    }

    /* -- 2: accelerate & damp --------------------------------------- */
    if let Some(wish) = cmd.wish_dir().try_normalize() {
        player.vel += glam::Vec2::from_angle(player.angle).rotate(wish) * ACCELERATION;
    }
    player.vel *= if cmd.buttons.contains(Buttons::RUN) {
        RUN_DAMPING
    } else {
        WALK_DAMPING
    };

    /* -- 3: collide ------------------------------------------------- */
    let result = slide_move(scene, player.pos, player.vel * dt);
    player.pos = result.pos;

    /* -- 4: head bob follows distance, not time --------------------- */
    player.head_bob = (player.head_bob + BOB_RATE * player.vel.length() * dt).fract();

    /* -- 5: zoom ---------------------------------------------------- */
    player.fov = (player.fov + cmd.zoom * ZOOM_RATE).clamp(FOV_MIN, FOV_MAX);

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SECONDS_PER_UPDATE;
    use crate::world::{Tile, Wall};
    use glam::{Vec2, vec2};
    use std::f32::consts::FRAC_PI_2;

    fn open_scene() -> Scene {
        Scene::new(vec![], Vec::<Tile>::new(), vec![], 2.7, 0.5).unwrap()
    }

    fn held(buttons: Buttons) -> InputCmd {
        InputCmd {
            buttons,
            ..Default::default()
        }
    }

    #[test]
    fn forward_follows_facing() {
        let scene = open_scene();
        let mut p = Player::new(Vec2::ZERO, FRAC_PI_2, 2.0, 1.5);
        advance(&mut p, &held(Buttons::FORWARD), &scene, SECONDS_PER_UPDATE);
        assert!(p.pos.y > 0.0);
        assert!(p.pos.x.abs() < 1e-6);
    }

    #[test]
    fn strafe_left_is_ccw_of_facing() {
        let scene = open_scene();
        let mut p = Player::new(Vec2::ZERO, 0.0, 2.0, 1.5);
        advance(&mut p, &held(Buttons::STRAFE_LEFT), &scene, SECONDS_PER_UPDATE);
        assert!(p.pos.y > 0.0);
    }

    #[test]
    fn velocity_decays_when_idle() {
        let scene = open_scene();
        let mut p = Player::new(Vec2::ZERO, 0.0, 2.0, 1.5);
        p.vel = vec2(1.0, 0.0);
        advance(&mut p, &InputCmd::default(), &scene, SECONDS_PER_UPDATE);
        assert!((p.vel.x - WALK_DAMPING).abs() < 1e-6);

        p.vel = vec2(1.0, 0.0);
        advance(&mut p, &held(Buttons::RUN), &scene, SECONDS_PER_UPDATE);
        assert!((p.vel.x - RUN_DAMPING).abs() < 1e-6);
    }

    #[test]
    fn running_reaches_higher_speed() {
        let scene = open_scene();
        let mut walk = Player::new(Vec2::ZERO, 0.0, 2.0, 1.5);
        let mut run = walk;
        for _ in 0..60 {
            advance(&mut walk, &held(Buttons::FORWARD), &scene, SECONDS_PER_UPDATE);
            advance(
                &mut run,
                &held(Buttons::FORWARD | Buttons::RUN),
                &scene,
                SECONDS_PER_UPDATE,
            );
        }
        assert!(run.vel.length() > walk.vel.length());
        // steady state of v = (v + a) * k
        assert!((walk.vel.length() - ACCELERATION * 0.6 / 0.4).abs() < 1e-3);
    }

    #[test]
    fn angle_stays_normalised() {
        let scene = open_scene();
        let mut p = Player::new(Vec2::ZERO, 0.01, 2.0, 1.5);
        let cmd = InputCmd {
            look: 400.0,
            ..Default::default()
        };
        for _ in 0..200 {
            advance(&mut p, &cmd, &scene, SECONDS_PER_UPDATE);
            assert!((0.0..TAU).contains(&p.angle), "angle {}", p.angle);
        }
        let cmd = InputCmd {
            look: -400.0,
            ..Default::default()
        };
        for _ in 0..200 {
            advance(&mut p, &cmd, &scene, SECONDS_PER_UPDATE);
            assert!((0.0..TAU).contains(&p.angle), "angle {}", p.angle);
        }
    }

    #[test]
    fn head_bob_wraps() {
        let scene = open_scene();
        let mut p = Player::new(Vec2::ZERO, 0.0, 2.0, 1.5);
        for _ in 0..1000 {
            advance(
                &mut p,
                &held(Buttons::FORWARD | Buttons::RUN),
                &scene,
                SECONDS_PER_UPDATE,
            );
            assert!((0.0..1.0).contains(&p.head_bob));
        }
        // standing still leaves the phase alone
        let before = p.head_bob;
        p.vel = Vec2::ZERO;
        advance(&mut p, &InputCmd::default(), &scene, SECONDS_PER_UPDATE);
        assert_eq!(p.head_bob, before);
    }

    #[test]
    fn zoom_is_clamped_inside_open_interval() {
        let scene = open_scene();
        let mut p = Player::new(Vec2::ZERO, 0.0, 2.0, 1.5);
        let wider = InputCmd {
            zoom: 100.0,
            ..Default::default()
        };
        advance(&mut p, &wider, &scene, SECONDS_PER_UPDATE);
        assert_eq!(p.fov, FOV_MAX);
        assert!(p.fov < std::f32::consts::PI);

        let narrower = InputCmd {
            zoom: -100.0,
            ..Default::default()
        };
        advance(&mut p, &narrower, &scene, SECONDS_PER_UPDATE);
        assert_eq!(p.fov, FOV_MIN);
    }

    #[test]
    fn walls_stop_the_player_but_keep_velocity() {
        let scene = Scene::new(
            vec![Wall::new(vec2(1.0, -5.0), vec2(1.0, 5.0))],
            Vec::<Tile>::new(),
            vec![],
            2.7,
            0.5,
        )
        .unwrap();
        let mut p = Player::new(Vec2::ZERO, 0.0, 2.0, 1.5);
        for _ in 0..120 {
            advance(&mut p, &held(Buttons::FORWARD), &scene, SECONDS_PER_UPDATE);
        }
        assert!(p.pos.x <= 0.5 + 1e-4);
        assert!(p.pos.x > 0.4);
        assert!(p.vel.x > 0.0);
    }

    #[test]
    fn zero_thickness_wall_holds_the_player() {
        let scene = Scene::new(
            vec![Wall::new(vec2(1.0, -5.0), vec2(1.0, 5.0))],
            Vec::<Tile>::new(),
            vec![],
            2.7,
            0.0,
        )
        .unwrap();
        let mut p = Player::new(Vec2::ZERO, 0.0, 2.0, 1.5);
        for _ in 0..120 {
            advance(&mut p, &held(Buttons::FORWARD), &scene, SECONDS_PER_UPDATE);
            assert!(p.pos.x <= 1.0 + 1e-4, "walked through to {:?}", p.pos);
        }
        assert!(p.pos.x > 0.9);
    }
}
