//! cubefield - a navigable field of spinning textured cubes.
//!
//! Fly around with the arrow keys (look) and W/A/S/D/Q/E (move). P spawns a cube at a random spot
//! with a random spin and texture, Backspace removes the oldest, C removes all, Escape quits.
//!
//! # Architecture
//! - `math/`: hand-rolled `Vec3` and column-major `Mat4`
//! - `scene/`: camera, cubes, spawning and per-frame orchestration
//! - `renderer/`: WGPU device, pipeline, textures
//! - `app/`: winit event handling
//!
//! # Usage
//! `cubefield [CONFIG]`. Without an argument, `cubefield.ron` in the working directory is read if
//! present. Set `RUST_LOG` to change log verbosity.

pub mod app;
pub mod config;
pub mod error;
pub mod keys;
pub mod math;
pub mod renderer;
pub mod scene;
pub mod time;

use crate::config::AppConfig;
use std::path::PathBuf;
use winit::event_loop::{ControlFlow, EventLoop};

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref());

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = app::App::new(config);
    event_loop.run_app(&mut app)?;

    match app.fatal_error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
