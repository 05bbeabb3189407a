//! Shared services passed into behaviours.
//!
//! These are the long-lived, process-wide values the rest of the engine
//! reads and writes each frame. They are constructed once at startup and
//! passed by reference (bundled in [`Services`]) into every component that
//! needs them; there are no global singletons.
//!
//! Overview
//! - `camera` – shared camera target/blend state steered by behaviours
//! - `gameconfig` – INI-backed settings with safe defaults
//! - `gameflow` – authoritative high-level game phase
//! - `input` – per-frame gesture and action state fed by the host shell
//! - `screensize` – logical screen dimensions for anchor resolution
//! - `stopwatch` – pooled frame-unit countdown timers
//! - `worldtime` – frame clock (elapsed, delta, frame counter)

pub mod camera;
pub mod gameconfig;
pub mod gameflow;
pub mod input;
pub mod screensize;
pub mod stopwatch;
pub mod worldtime;

use crate::resources::camera::CameraService;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gameflow::Gameflow;
use crate::resources::input::InputState;
use crate::resources::screensize::ScreenSize;
use crate::resources::stopwatch::StopWatchPool;
use crate::resources::worldtime::WorldTime;

/// The bundle of shared services handed to behaviours each frame.
///
/// One logical frame drives, in order: input sampling into [`InputState`],
/// [`Services::tick`] (clock, stopwatches, camera blend), the manager's
/// update pass, then the render pass. Single-threaded by construction;
/// nothing here is locked.
pub struct Services {
    pub time: WorldTime,
    pub input: InputState,
    pub stopwatches: StopWatchPool,
    pub camera: CameraService,
    pub gameflow: Gameflow,
    pub screen: ScreenSize,
}

impl Services {
    /// Build the service bundle from loaded configuration.
    pub fn new(config: &GameConfig) -> Self {
        Services {
            time: WorldTime::default(),
            input: InputState::new(),
            stopwatches: StopWatchPool::new(),
            camera: CameraService::new(config.camera_blend_frames),
            gameflow: Gameflow::new(),
            screen: ScreenSize {
                w: config.render_width as i32,
                h: config.render_height as i32,
            },
        }
    }

    /// Advance the per-frame services: frame clock, stopwatch pool, and
    /// camera blend. Call once per frame, after input sampling and before
    /// the manager's update pass.
    pub fn tick(&mut self, dt: f32) {
        self.time.tick(dt);
        self.stopwatches.tick();
        self.camera.tick();
    }
}
