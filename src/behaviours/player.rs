//! Player-side message handling.
//!
//! The player object does not drive the menu flow; it reacts to it. On a
//! game restart it snaps back to its spawn position and zeroes the score;
//! scored rallies arrive as [`OnScorePoint`](crate::messages::OnScorePoint)
//! broadcasts.

use log::info;

use crate::behaviours::{Behaviour, BehaviourContext, BehaviourDefinition};
use crate::gameobject::factory::LoadError;
use crate::math::Vector2;
use crate::messages::{Message, MessageKind};
use crate::resources::Services;

/// Registry path for this behaviour.
pub const CLASS_NAME: &str = "volleyengine::behaviours::Player";

/// Behaviour handling restart and scoring broadcasts for a player object.
pub struct Player {
    /// Where restarts put the object. Taken from the `spawn_x`/`spawn_y`
    /// params when given, otherwise captured from the object's position on
    /// the first update.
    spawn_position: Option<Vector2>,
    score: i32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Player {
            spawn_position: None,
            score: 0,
        }
    }

    /// Points accumulated since the last restart.
    pub fn score(&self) -> i32 {
        self.score
    }
}

impl Behaviour for Player {
    fn load_content(
        &mut self,
        def: &BehaviourDefinition,
        _services: &mut Services,
    ) -> Result<(), LoadError> {
        self.score = 0;
        self.spawn_position = match (def.param_f32("spawn_x"), def.param_f32("spawn_y")) {
            (Some(x), Some(y)) => Some(Vector2::new(x, y)),
            _ => None,
        };
        Ok(())
    }

    fn update(&mut self, ctx: &mut BehaviourContext<'_>) {
        if self.spawn_position.is_none() {
            // First chance to see the object we ended up attached to.
            let Some(object) = ctx.owner_object() else {
                return;
            };
            self.spawn_position = Some(object.position());
        }
    }

    fn wants_message(&self, kind: MessageKind) -> bool {
        matches!(kind, MessageKind::GameRestart | MessageKind::ScorePoint)
    }

    fn on_message(&mut self, message: &mut Message, ctx: &mut BehaviourContext<'_>) {
        match message {
            Message::GameRestart(_) => {
                self.score = 0;
                if let (Some(spawn), Some(object)) =
                    (self.spawn_position, ctx.owner_object_mut())
                {
                    object.set_position(spawn);
                }
                info!("player reset for a new match");
            }
            Message::ScorePoint(payload) => {
                self.score += payload.amount;
                info!("player scored {}, total {}", payload.amount, self.score);
            }
        }
    }
}
