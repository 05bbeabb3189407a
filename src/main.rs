//! Volley Engine demo entry point.
//!
//! A headless run of the main-menu flow:
//!
//! 1. Load `config.ini` and build the shared services
//! 2. Instantiate the title, player, and court objects from definition
//!    files under `assets/definitions/`
//! 3. Tick the fixed frame loop: input sampling, clock/stopwatch/camera
//!    tick, manager update, render
//! 4. Inject a scripted tap a moment in, then watch the camera blend end
//!    in the game-restart broadcast and the phase flip to gameplay
//!
//! There is no window: draw commands go to a logging backend. The host
//! shell that owns a real window drives exactly the same loop.
//!
//! # Running
//!
//! ```sh
//! cargo run -- --frames 240
//! ```

mod behaviours;
mod gameobject;
mod math;
mod messages;
mod render;
mod resources;

use clap::Parser;
use std::path::PathBuf;

use crate::gameobject::factory::{BehaviourRegistry, GameObjectFactory};
use crate::gameobject::manager::GameObjectManager;
use crate::render::LogRenderer;
use crate::resources::Services;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gameflow::GamePhase;
use crate::resources::input::GestureKind;

/// Volley Engine 2D demo
#[derive(Parser)]
#[command(version, about = "Headless demo of the Volley Engine object core")]
struct Cli {
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 240)]
    frames: u64,

    /// Frame on which the scripted tap fires.
    #[arg(long, default_value_t = 30)]
    tap_frame: u64,

    /// Path to the configuration file.
    #[arg(long, default_value = "./config.ini")]
    config: PathBuf,

    /// Directory holding the definition content files.
    #[arg(long, default_value = "./assets/definitions")]
    definitions: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    config.load_from_file().ok(); // ignore errors, use defaults

    let frame_dt = 1.0 / config.target_fps.max(1) as f32;
    let mut services = Services::new(&config);
    let mut manager = GameObjectManager::new();
    let mut factory = GameObjectFactory::new(&cli.definitions, BehaviourRegistry::with_builtins());
    let mut renderer = LogRenderer::new();

    for file in ["main_menu.json", "player.json", "court.json"] {
        match factory.create(file, &mut services) {
            Ok(object) => {
                let id = manager.add(object);
                log::info!("registered {file} as object {}", id.raw());
            }
            Err(e) => {
                log::error!("failed to load {file}: {e}");
                std::process::exit(1);
            }
        }
    }

    for frame in 0..cli.frames {
        // Input sampling. The scripted tap stands in for the gesture layer.
        services.input.begin_frame();
        if frame == cli.tap_frame {
            log::info!("frame {frame}: injecting tap");
            services.input.set_gesture(GestureKind::Tap);
        }

        services.tick(frame_dt);
        manager.update(&mut services);
        manager.render(&mut renderer, &services);

        if services.gameflow.phase() == GamePhase::GamePlay
            && services.time.frame_count % 60 == 0
        {
            log::info!(
                "frame {frame}: gameplay running, camera at ({:.1}, {:.1})",
                services.camera.position().x,
                services.camera.position().y
            );
        }
    }

    log::info!(
        "simulated {} frames, {} draw commands, final phase {:?}",
        cli.frames,
        renderer.commands_drawn(),
        services.gameflow.phase()
    );
}
