use super::{InputCmd, MoveResult, Player, advance};
use crate::world::Scene;
use log::{trace, warn};
use std::time::{Duration, Instant};

pub const SIM_FPS: u32 = 60;
pub const SECONDS_PER_UPDATE: f32 = 1.0 / SIM_FPS as f32;
const TIC: Duration = Duration::from_micros(1_000_000 / SIM_FPS as u64);

/// Tics run back-to-back at most per pump; older backlog is skipped.
const MAX_CATCH_UP: u32 = 6;

/// Owns the scene and the player and drives the fixed-rate update.
///
/// Update borrows the player mutably; everything handed to the renderer
/// is read-only.
pub struct TicRunner {
    scene: Scene,
    player: Player,
    last: Instant,
    tics: u64,
}

impl TicRunner {
    pub fn new(scene: Scene, player: Player) -> Self {
        Self {
            scene,
            player,
            last: Instant::now(),
            tics: 0,
        }
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Tics simulated since construction.
    #[inline]
    pub fn tics(&self) -> u64 {
        self.tics
    }

    /// Advance enough tics to synchronise simulation with real time.
    ///
    /// Pointer look and scroll zoom are deltas: they are applied on the
    /// first tic of this pump only.  Returns the number of tics run.
    pub fn pump(&mut self, cmd: InputCmd) -> u32 {
        let mut ran = 0;
        let mut cmd = cmd;
        while self.last.elapsed() >= TIC {
            if ran == MAX_CATCH_UP {
                warn!("simulation fell behind, skipping {:?}", self.last.elapsed());
                self.last = Instant::now();
                break;
            }
            let moved = self.tick(&cmd);
            if moved.hit_wall() {
                trace!(
                    "tic {}: touched {} face(s), first normal {:?}",
                    self.tics,
                    moved.normals.len(),
                    moved.normals[0]
                );
            }
            cmd.look = 0.0;
            cmd.zoom = 0.0;
            self.last += TIC;
            ran += 1;
        }
        ran
    }

    /* ---------------------------------------------------------------- */
    /* run one fixed-rate game tic                                       */
    /* ---------------------------------------------------------------- */
    pub fn tick(&mut self, cmd: &InputCmd) -> MoveResult {
        self.tics += 1;
        advance(&mut self.player, cmd, &self.scene, SECONDS_PER_UPDATE)
    }
}
