mod collision;
mod components;
mod movement;
mod tic;

pub use collision::{MAX_CLIP_ITERATIONS, MoveResult, slide_move};
pub use components::{Buttons, FOV_MAX, FOV_MIN, InputCmd, Player};
pub use movement::advance;
pub use tic::{SECONDS_PER_UPDATE, SIM_FPS, TicRunner};
