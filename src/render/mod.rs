//! Render-target contract.
//!
//! The core does not draw pixels. The render pass resolves each visible
//! object to a [`DrawCommand`] (final position with screen anchors already
//! applied, rotation, scale, blend mode, priority) and hands the
//! commands, already sorted, to a [`RenderBackend`]. The windowing layer
//! supplies the real backend; the crate ships [`LogRenderer`] so headless
//! runs have something to point at.

use log::debug;

use crate::gameobject::definition::BlendMode;
use crate::math::Vector2;

/// Everything the backend needs to draw one object.
#[derive(Debug, Clone, Copy)]
pub struct DrawCommand {
    /// Final draw position: world coordinates, or resolved screen
    /// coordinates for anchored objects.
    pub position: Vector2,
    /// Rotation around the Z axis, in degrees.
    pub rotation: f32,
    /// Per-axis scale.
    pub scale: Vector2,
    /// Compositing mode to draw with.
    pub blend_mode: BlendMode,
    /// The priority the command was sorted by; backends batching by
    /// blend state may want it.
    pub render_priority: i32,
}

/// Consumer of the render pass. Commands arrive in draw order (ascending
/// render priority, ties in registration order).
pub trait RenderBackend {
    fn draw(&mut self, command: &DrawCommand);
}

/// Backend that logs every command at debug level. Used by the headless
/// demo; real games plug in their graphics layer instead.
#[derive(Debug, Default)]
pub struct LogRenderer {
    commands_drawn: u64,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total commands drawn since construction.
    pub fn commands_drawn(&self) -> u64 {
        self.commands_drawn
    }
}

impl RenderBackend for LogRenderer {
    fn draw(&mut self, command: &DrawCommand) {
        self.commands_drawn += 1;
        debug!(
            "draw at ({:.1}, {:.1}) rot {:.1} scale ({:.1}, {:.1}) blend {:?} priority {}",
            command.position.x,
            command.position.y,
            command.rotation,
            command.scale.x,
            command.scale.y,
            command.blend_mode,
            command.render_priority
        );
    }
}
