//! Shared 2D camera service.
//!
//! Holds the single world-space camera the render pass agrees on. Behaviours
//! steer it by writing `target_position`; the camera then closes the gap in
//! equal steps over [`CameraService::blend_frame_count`] frames. There is no
//! completion signal when the blend finishes; consumers that need to know
//! arm a stopwatch with the same frame count (see
//! [`MainMenu`](crate::behaviours::mainmenu::MainMenu)).

use crate::math::Vector2;

/// Process-wide camera target and blend state.
#[derive(Debug, Clone)]
pub struct CameraService {
    position: Vector2,
    target_position: Vector2,
    blend_frame_count: u32,
    blend_frames_remaining: u32,
}

impl CameraService {
    /// Create a camera at the origin that blends over `blend_frame_count`
    /// frames whenever a new target is set.
    pub fn new(blend_frame_count: u32) -> Self {
        CameraService {
            position: Vector2::ZERO,
            target_position: Vector2::ZERO,
            blend_frame_count,
            blend_frames_remaining: 0,
        }
    }

    /// Current (possibly mid-blend) camera position.
    pub fn position(&self) -> Vector2 {
        self.position
    }

    /// The position the camera is blending toward.
    pub fn target_position(&self) -> Vector2 {
        self.target_position
    }

    /// Retarget the camera and restart the blend.
    pub fn set_target_position(&mut self, target: Vector2) {
        self.target_position = target;
        self.blend_frames_remaining = self.blend_frame_count;
    }

    /// Number of frames a full blend takes. Read-only; configured at startup.
    pub fn blend_frame_count(&self) -> u32 {
        self.blend_frame_count
    }

    /// Advance the blend by one frame.
    pub fn tick(&mut self) {
        if self.blend_frames_remaining == 0 {
            return;
        }
        let step = 1.0 / self.blend_frames_remaining as f32;
        self.position += (self.target_position - self.position) * step;
        self.blend_frames_remaining -= 1;
    }
}
