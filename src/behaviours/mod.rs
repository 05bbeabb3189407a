//! Pluggable per-object behaviours.
//!
//! A behaviour is a unit of game logic attached to exactly one
//! [`GameObject`](crate::gameobject::GameObject) for its whole lifetime.
//! Many behaviour kinds compose on one object; they are updated in
//! attachment order and may opt in to broadcast message kinds. This is the
//! capability seam that replaces a deep class hierarchy: one trait, with
//! per-message opt-in checks instead of subclass overrides.
//!
//! Submodules overview:
//! - [`mainmenu`] – the title-screen state machine (wait for input, blend
//!   the camera to the court, broadcast the restart)
//! - [`player`] – reacts to game-restart and score messages
//!
//! # Failure style
//!
//! [`Behaviour::load_content`] is the only fallible hook: an error there
//! aborts construction of the whole object. [`Behaviour::update`] and
//! [`Behaviour::on_message`] must fail gracefully instead: guard on
//! missing preconditions, log, and skip the frame's work. The framework
//! does not isolate a panicking behaviour from the rest of the pass.

pub mod mainmenu;
pub mod player;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::gameobject::factory::LoadError;
use crate::gameobject::manager::GameObjectManager;
use crate::gameobject::{GameObject, GameObjectId};
use crate::messages::{Message, MessageFilter, MessageKind};
use crate::resources::Services;

/// Serialized description of a single behaviour: the fully-qualified type
/// path to instantiate plus free-form parameters the behaviour interprets
/// in [`Behaviour::load_content`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BehaviourDefinition {
    /// Fully-qualified type path, e.g. `volleyengine::behaviours::MainMenu`.
    pub class: String,
    /// Behaviour-specific parameters; absent keys mean "use defaults".
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl BehaviourDefinition {
    /// A definition with no parameters, for behaviours instantiated
    /// directly from a class name.
    pub fn for_class(class: impl Into<String>) -> Self {
        BehaviourDefinition {
            class: class.into(),
            params: Map::new(),
        }
    }

    pub fn param_f32(&self, key: &str) -> Option<f32> {
        self.params.get(key)?.as_f64().map(|v| v as f32)
    }

    pub fn param_i32(&self, key: &str) -> Option<i32> {
        self.params.get(key)?.as_i64().map(|v| v as i32)
    }

    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.params.get(key)?.as_str()
    }
}

/// Everything a behaviour can reach while it runs: its own object (through
/// the non-owning `owner` handle), the manager, and the shared services.
/// Services arrive as explicit references, not process-wide singletons, so
/// behaviours stay testable in isolation.
pub struct BehaviourContext<'a> {
    /// The object this behaviour is attached to.
    pub owner: GameObjectId,
    /// The live registry; also the broadcast router.
    pub manager: &'a mut GameObjectManager,
    /// Shared services: clock, input, stopwatches, camera, gameflow.
    pub services: &'a mut Services,
}

impl BehaviourContext<'_> {
    /// The owning object's current state, if it is still registered.
    pub fn owner_object(&self) -> Option<&GameObject> {
        self.manager.object(self.owner)
    }

    /// Mutable access to the owning object's state.
    pub fn owner_object_mut(&mut self) -> Option<&mut GameObject> {
        self.manager.object_mut(self.owner)
    }

    /// Broadcast a message through the manager. Delivery is synchronous:
    /// every matching handler runs before this call returns.
    pub fn broadcast(&mut self, message: &mut Message, filter: MessageFilter) {
        self.manager
            .broadcast_message(message, filter, self.services);
    }
}

/// A composable unit of per-object logic.
///
/// Implementations get three hooks: one-time setup from a serialized
/// definition, a per-frame update, and opt-in message handling. Update
/// order across one object's behaviours equals attachment order; there is
/// no priority system.
pub trait Behaviour {
    /// One-time setup from definition data. Must be idempotent: calling it
    /// again reinitializes instead of accumulating. Errors abort the whole
    /// object's construction.
    fn load_content(
        &mut self,
        def: &BehaviourDefinition,
        services: &mut Services,
    ) -> Result<(), LoadError>;

    /// Called once per frame by the owning object's update pass.
    fn update(&mut self, ctx: &mut BehaviourContext<'_>);

    /// Which broadcast kinds this behaviour wants. Defaults to none; a
    /// kind that is not wanted is never delivered, so receiving an
    /// unregistered kind is a structural no-op.
    fn wants_message(&self, kind: MessageKind) -> bool {
        let _ = kind;
        false
    }

    /// Handle a broadcast message this behaviour opted in to.
    fn on_message(&mut self, message: &mut Message, ctx: &mut BehaviourContext<'_>) {
        let _ = (message, ctx);
    }
}
