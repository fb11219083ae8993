use std::{process::ExitCode, time::Instant};

use macroquad::prelude as mq;
use psi_lens::prelude::*;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "parallel")]
type Euler = parallel::Euler;
#[cfg(not(feature = "parallel"))]
type Euler = sequential::Euler;

/// The macroquad window, drawn through immediate-mode calls.
struct Screen;

impl Screen {
    fn poll(&self) -> FrameInput {
        FrameInput {
            quit: mq::is_quit_requested() || mq::is_key_pressed(mq::KeyCode::Escape),
            keys: HeldKeys {
                left: mq::is_key_down(mq::KeyCode::Left),
                right: mq::is_key_down(mq::KeyCode::Right),
                up: mq::is_key_down(mq::KeyCode::Up),
                down: mq::is_key_down(mq::KeyCode::Down),
                zoom_in: mq::is_key_down(mq::KeyCode::A),
                zoom_out: mq::is_key_down(mq::KeyCode::Z),
            },
        }
    }
}

fn to_mq(color: Color) -> mq::Color {
    mq::Color::from_rgba(color.r, color.g, color.b, 255)
}

impl Canvas for Screen {
    fn size(&self) -> (u32, u32) {
        (mq::screen_width() as u32, mq::screen_height() as u32)
    }

    fn clear(&mut self, color: Color) {
        mq::clear_background(to_mq(color));
    }

    fn fill_circle(&mut self, circle: Circle) {
        mq::draw_circle(
            circle.x as f32,
            circle.y as f32,
            circle.radius as f32,
            to_mq(circle.color),
        );
    }
}

async fn windowed(mut simulation: Simulation<Euler>, target_fps: u32) {
    mq::prevent_quit();

    let mut screen = Screen;
    let mut pacer = FramePacer::new(target_fps);

    loop {
        let input = screen.poll();
        if simulation.frame(input, &mut screen) == RunState::Terminated {
            break;
        }

        mq::next_frame().await;
        pacer.tick();
    }

    tracing::info!(frames = simulation.frames(), "window closed");
}

fn headless(mut simulation: Simulation<Euler>, config: &Config, frames: u64) {
    let mut backend = Headless::new(config.display.width, config.display.height, frames);
    let start = Instant::now();

    let drawn = simulation.run(&mut backend, &mut FramePacer::unlimited());

    let elapsed = start.elapsed();
    tracing::info!(
        frames = drawn,
        ?elapsed,
        fps = drawn as f64 / elapsed.as_secs_f64(),
        lit_pixels = backend.frame().lit(),
        "headless run finished"
    );
}

fn window_conf(config: &Config) -> mq::Conf {
    mq::Conf {
        window_title: "psi-lens".to_owned(),
        window_width: i32::try_from(config.display.width).unwrap_or(i32::MAX),
        window_height: i32::try_from(config.display.height).unwrap_or(i32::MAX),
        fullscreen: config.display.fullscreen,
        ..Default::default()
    }
}

fn load_config() -> psi_lens::Result<Config> {
    let config = std::env::args_os()
        .nth(1)
        .map(Config::load)
        .transpose()?
        .unwrap_or_default();

    Ok(config)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "could not load config");
            return ExitCode::FAILURE;
        }
    };

    let simulation = Simulation::with_integrator(&config, Euler::default());

    match config.display.headless_frames {
        Some(frames) => headless(simulation, &config, frames),
        None => {
            let target_fps = config.display.target_fps;
            macroquad::Window::from_config(window_conf(&config), windowed(simulation, target_fps));
        }
    }

    ExitCode::SUCCESS
}
