//! Title-screen state machine.
//!
//! Waits for the first tap (or primary action) on the title screen, blends
//! the camera down to the court, then broadcasts the game restart and
//! flips the gameflow phase to gameplay.
//!
//! The camera blend has no completion signal, so the behaviour arms a
//! stopwatch with the blend's own frame count and treats its expiry as
//! "camera arrived". That is a documented approximation, not a rendezvous;
//! a real completion callback from the camera would be a strict
//! improvement.

use log::debug;

use crate::behaviours::{Behaviour, BehaviourContext, BehaviourDefinition};
use crate::gameobject::factory::LoadError;
use crate::math::Vector2;
use crate::messages::{Message, MessageFilter, OnGameRestart};
use crate::resources::Services;
use crate::resources::gameflow::GamePhase;
use crate::resources::input::{GestureKind, InputAction};
use crate::resources::stopwatch::StopWatchHandle;

/// Registry path for this behaviour.
pub const CLASS_NAME: &str = "volleyengine::behaviours::MainMenu";

/// Where the camera sits during gameplay.
const GAMEPLAY_CAMERA_TARGET: Vector2 = Vector2 { x: 0.0, y: -30.0 };

/// The state of the menu flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Showing the title, waiting for input.
    OnTitle,
    /// Camera is blending down to the court.
    MoveToCourt,
}

/// Behaviour that runs the main-menu flow on the title object.
pub struct MainMenu {
    state: State,
    /// Sized to the camera blend; expiry stands in for "blend finished".
    watch: Option<StopWatchHandle>,
    /// Preallocated so broadcasting never constructs a new message.
    restart_msg: Message,
}

impl Default for MainMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl MainMenu {
    pub fn new() -> Self {
        MainMenu {
            state: State::OnTitle,
            watch: None,
            restart_msg: Message::GameRestart(OnGameRestart),
        }
    }
}

impl Behaviour for MainMenu {
    fn load_content(
        &mut self,
        _def: &BehaviourDefinition,
        services: &mut Services,
    ) -> Result<(), LoadError> {
        self.state = State::OnTitle;

        // Reload keeps the already-pooled watch instead of drawing another.
        let watch = match self.watch {
            Some(watch) => watch,
            None => {
                let watch = services.stopwatches.get_new_stop_watch();
                self.watch = Some(watch);
                watch
            }
        };

        // Make the timer last the same number of frames the camera needs
        // to reach its destination.
        services
            .stopwatches
            .set_lifetime(watch, services.camera.blend_frame_count());
        services.stopwatches.restart(watch);
        services.stopwatches.set_paused(watch, true);

        self.restart_msg = Message::GameRestart(OnGameRestart);
        Ok(())
    }

    fn update(&mut self, ctx: &mut BehaviourContext<'_>) {
        // Everything here is main-menu logic; outside that phase the
        // behaviour is inert by construction.
        if ctx.services.gameflow.phase() != GamePhase::MainMenu {
            return;
        }
        let Some(watch) = self.watch else {
            return; // load_content never ran
        };

        if ctx.services.input.check_gesture(GestureKind::Tap)
            || ctx.services.input.check_action(InputAction::Primary, true)
        {
            if self.state == State::OnTitle {
                // Move down to the gameplay camera position.
                ctx.services
                    .camera
                    .set_target_position(GAMEPLAY_CAMERA_TARGET);
                self.state = State::MoveToCourt;

                ctx.services.stopwatches.set_paused(watch, false);
                debug!("main menu: input received, moving camera to court");
            }
        }

        // Once the timer expires the camera should be in place and the
        // game can start.
        if self.state == State::MoveToCourt && ctx.services.stopwatches.is_expired(watch) {
            ctx.broadcast(&mut self.restart_msg, MessageFilter::All);
            ctx.services.gameflow.set_phase(GamePhase::GamePlay);

            // Re-arm for the next time the menu is shown.
            ctx.services.stopwatches.restart(watch);
            ctx.services.stopwatches.set_paused(watch, true);
        }
    }
}
