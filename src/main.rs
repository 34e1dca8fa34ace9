// What you SEE:
// • Live (mirrored) camera feed with everything outside a central oval darkened,
//   the way a glaucoma patient at the chosen stage would see it.
// • Keys 1-4 switch between MILD, MODERATE, SEVERE and EXTREME.
// • Q or ESC quits.

mod camera;
mod config;
mod display;
mod hud;

use std::process;
use std::time::{Duration, Instant};

use clap::Parser;
use glaucoma_sim::error::Error;
use glaucoma_sim::filter::{FilterParams, apply_filter};
use glaucoma_sim::preset::Severity;

use camera::CameraCapture;
use config::{Cli, Config};
use display::Display;

const HUD_COLOR: u32 = 0x00_FF_FF_FF;

fn main() {
    env_logger::init();

    let config = Config::from(Cli::parse());
    if let Err(e) = run(config) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn window_title(base: &str, level: Severity) -> String {
    format!("{base} ({level})")
}

fn run(config: Config) -> Result<(), Error> {
    /* --- Camera + window setup --- */
    let mut cam = CameraCapture::open_first(
        &config.camera_indices,
        config.requested_width,
        config.requested_height,
        config.fps,
    )?;
    let (w, h) = cam.resolution();
    log::info!("camera {} streaming at {w}x{h}", cam.index());

    let mut level = config.level;
    let mut display =
        Display::new(&window_title(&config.window_title, level), w as usize, h as usize)?;
    let mut params = FilterParams::from_severity(level).with_darkness(config.darkness);
    log::info!("level {level}: width={} blur={}", params.width, params.blur);
    log::info!("Press 'q' to quit.");

    /* --- FPS bookkeeping --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while display.keep_running() {
        // 1) Grab a frame; a failed read ends the session like end-of-stream.
        let mut frame = match cam.next_frame() {
            Ok(f) => f,
            Err(e) => {
                log::info!("capture ended: {e}");
                break;
            }
        };

        // 2) Selfie view
        if config.mirror {
            frame.mirror_in_place()?;
        }

        // 3) Severity switch between frames
        if let Some(next) = display.severity_pressed() {
            if next != level {
                level = next;
                params = FilterParams::from_severity(level).with_darkness(config.darkness);
                display.set_title(&window_title(&config.window_title, level));
                log::info!("level {level}: width={} blur={}", params.width, params.blur);
            }
        }

        // 4) Field loss
        let filtered = apply_filter(&frame, &params)?;

        // 5) HUD + present
        let canvas = display.stage(&filtered);
        let hud = format!("{level} | 1-4: LEVEL  Q: QUIT | {fps_text}");
        canvas.draw_text_5x7(8, 8, &hud, HUD_COLOR);
        display.present()?;

        // 6) FPS counter, refreshed once per second
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let fps = frames_this_second as f32 / now.duration_since(last_fps_time).as_secs_f32();
            log::debug!("FPS: {fps:.1}");
            fps_text = format!("FPS: {fps:.1}");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}
