//! First-person room walker.
//!
//! ```bash
//! cargo run --release -- [--scene scenes/antihome.json] [--scale 4]
//! ```
//!
//! WASD move, Shift run, mouse or ←/→ look, wheel zoom, Tab overhead map,
//! Esc quits.

use anyhow::{Context, bail};
use clap::Parser;
use log::info;
use minifb::{Key, KeyRepeat, MouseMode, Scale, Window, WindowOptions};
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use room_rs::{
    config::SceneConfig,
    renderer::{Renderer, Rgba, Software, pack_rgba},
    sim::{Buttons, InputCmd, TicRunner},
    world::{SurfaceTextures, Texture},
};

/// Pointer-equivalent look delta per frame while an arrow key is held.
const KEY_LOOK: f32 = 6.0;

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Scene description (JSON); the built-in room when omitted
    #[arg(long, value_name = "FILE")]
    scene: Option<PathBuf>,

    /// View width in pixels
    #[arg(long, default_value_t = 350)]
    width: usize,

    /// View height in pixels
    #[arg(long, default_value_t = 175)]
    height: usize,

    /// Window scale factor: 1, 2, 4 or 8
    #[arg(long, default_value_t = 4)]
    scale: u32,
}

fn window_scale(n: u32) -> anyhow::Result<Scale> {
    Ok(match n {
        1 => Scale::X1,
        2 => Scale::X2,
        4 => Scale::X4,
        8 => Scale::X8,
        _ => bail!("unsupported scale {n} (use 1, 2, 4 or 8)"),
    })
}

fn textures() -> SurfaceTextures {
    let shade = |v: f32| pack_rgba(v, v, v, 1.0);
    SurfaceTextures {
        wall: Texture::bricks(
            64,
            64,
            pack_rgba(0.55, 0.3, 0.25, 1.0),
            pack_rgba(0.7, 0.7, 0.65, 1.0),
        ),
        floor: Texture::checker(32, 32, 8, shade(0.35), shade(0.25)),
        ceiling: Texture::checker(32, 32, 16, shade(0.8), shade(0.7)),
    }
}

fn read_buttons(win: &Window) -> Buttons {
    let mut b = Buttons::empty();
    b.set(Buttons::FORWARD, win.is_key_down(Key::W));
    b.set(Buttons::BACK, win.is_key_down(Key::S));
    b.set(Buttons::STRAFE_LEFT, win.is_key_down(Key::A));
    b.set(Buttons::STRAFE_RIGHT, win.is_key_down(Key::D));
    b.set(
        Buttons::RUN,
        win.is_key_down(Key::LeftShift) || win.is_key_down(Key::RightShift),
    );
    b
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();

    // ─────────── load scene ───────
    let config = match &opts.scene {
        Some(path) => SceneConfig::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SceneConfig::default(),
    };
    let (scene, player) = config.build()?;
    info!(
        "scene: {} walls, {} floors, {} ceilings",
        scene.walls().len(),
        scene.floors().len(),
        scene.ceilings().len()
    );

    let (w, h) = (opts.width, opts.height);
    if w == 0 || h == 0 {
        bail!("view size must be non-zero, got {w}×{h}");
    }

    let textures = textures();
    let mut sim = TicRunner::new(scene, player);
    let mut renderer = Software::default();

    let mut win = Window::new(
        "room",
        w,
        h,
        WindowOptions {
            scale: window_scale(opts.scale)?,
            ..WindowOptions::default()
        },
    )?;
    win.set_target_fps(60);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    let mut overhead = false;
    let mut last_mouse_x: Option<f32> = None;
    let mut pending = InputCmd::default();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();

        /* --------------- gather input for the next tics ------------------ */
        let mouse_x = win.get_mouse_pos(MouseMode::Pass).map(|(x, _)| x);
        if let (Some(now), Some(before)) = (mouse_x, last_mouse_x) {
            pending.look += now - before;
        }
        last_mouse_x = mouse_x;
        if win.is_key_down(Key::Left) {
            pending.look -= KEY_LOOK;
        }
        if win.is_key_down(Key::Right) {
            pending.look += KEY_LOOK;
        }
        if let Some((_, dy)) = win.get_scroll_wheel() {
            pending.zoom += dy;
        }
        if win.is_key_pressed(Key::Tab, KeyRepeat::No) {
            overhead = !overhead;
        }
        pending.buttons = read_buttons(&win);

        // deltas carry over until a tic consumes them
        if sim.pump(pending) > 0 {
            pending.look = 0.0;
            pending.zoom = 0.0;
        }

        /* draw */
        let camera = sim.player().camera();
        renderer.begin_frame(w, h);
        renderer.draw_view(&camera, sim.scene(), &textures);
        if overhead {
            renderer.draw_overhead(&camera, sim.scene());
        }

        let mut shown: anyhow::Result<()> = Ok(());
        renderer.end_frame(|fb: &[Rgba], fw, fh| {
            acc_time += t0.elapsed();
            acc_frames += 1;
            shown = win.update_with_buffer(fb, fw, fh).map_err(Into::into);
        });
        shown?;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames.max(1) as f64;
            let fps = 1000.0 / avg_ms;
            info!("avg render: {avg_ms:.2} ms  ({fps:.1} FPS)");
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
