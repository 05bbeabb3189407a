//! Runtime game-object instances.

use std::fmt;

use log::warn;
use smallvec::SmallVec;

use crate::behaviours::Behaviour;
use crate::gameobject::definition::{
    BlendMode, Classification, GameObjectDefinition, ScreenAnchorPoint,
};
use crate::math::Vector2;

/// Non-owning handle to a game object inside the manager's registry.
///
/// Behaviours keep one of these to reach their parent; nobody but the
/// manager owns the object itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameObjectId(u32);

impl GameObjectId {
    pub(crate) fn new(raw: u32) -> Self {
        GameObjectId(raw)
    }

    /// Raw id value, for logging and diagnostics.
    pub fn raw(&self) -> u32 {
        self.0
    }
}

/// A live game object: definition-derived mutable state plus an ordered
/// collection of behaviours.
///
/// Instances come out of the
/// [`GameObjectFactory`](crate::gameobject::factory::GameObjectFactory) and
/// live in the [`GameObjectManager`](crate::gameobject::manager::GameObjectManager)
/// until explicitly removed. Behaviour slots are `Option` so the manager
/// can lend a behaviour out during traversal and restore it afterwards;
/// a slot that is currently lent out is simply skipped by re-entrant
/// delivery.
pub struct GameObject {
    /// Draw order; higher values render later (on top).
    pub render_priority: i32,
    /// Whether the object receives per-frame updates.
    pub do_update: bool,
    /// Whether the object is drawn by the render pass.
    pub do_render: bool,
    /// Optional screen anchor; when set, `position` is an anchor offset.
    pub screen_anchor: Option<ScreenAnchorPoint>,
    /// Width and height of the collision box.
    pub collision_box: Vector2,
    /// Offset of the collision box from the object position.
    pub collision_root: Vector2,
    /// Offset at which the object's origin can be found.
    pub motion_root: Vector2,
    /// Compositing mode used when rendering.
    pub blend_mode: BlendMode,

    position: Vector2,
    rotation: f32,
    scale: Vector2,
    is_static: bool,
    registered: bool,
    classifications: SmallVec<[Classification; 4]>,
    behaviours: Vec<Option<Box<dyn Behaviour>>>,
}

impl fmt::Debug for GameObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameObject")
            .field("render_priority", &self.render_priority)
            .field("do_update", &self.do_update)
            .field("do_render", &self.do_render)
            .field("screen_anchor", &self.screen_anchor)
            .field("collision_box", &self.collision_box)
            .field("collision_root", &self.collision_root)
            .field("motion_root", &self.motion_root)
            .field("blend_mode", &self.blend_mode)
            .field("position", &self.position)
            .field("rotation", &self.rotation)
            .field("scale", &self.scale)
            .field("is_static", &self.is_static)
            .field("registered", &self.registered)
            .field("classifications", &self.classifications)
            .field("behaviours", &self.behaviours.len())
            .finish()
    }
}

impl GameObject {
    /// Copy the definition-derived state into a fresh, unregistered
    /// instance with no behaviours attached yet.
    pub fn from_definition(def: &GameObjectDefinition) -> Self {
        GameObject {
            render_priority: def.render_priority,
            do_update: def.do_update,
            do_render: def.do_render,
            screen_anchor: def.screen_anchor,
            collision_box: def.collision_box,
            collision_root: def.collision_root,
            motion_root: def.motion_root,
            blend_mode: def.blend_mode,
            position: def.position,
            rotation: def.rotation,
            scale: def.scale,
            is_static: def.is_static,
            registered: false,
            classifications: def.classifications.clone(),
            behaviours: Vec::new(),
        }
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn scale(&self) -> Vector2 {
        self.scale
    }

    /// Move the object. Ignored (with a warning) on a static object that
    /// has already been registered with the manager; moving between
    /// instantiation and registration is fine.
    pub fn set_position(&mut self, position: Vector2) {
        if self.transform_locked("position") {
            return;
        }
        self.position = position;
    }

    /// Rotate the object. Same static-object rule as [`Self::set_position`].
    pub fn set_rotation(&mut self, degrees: f32) {
        if self.transform_locked("rotation") {
            return;
        }
        self.rotation = degrees;
    }

    /// Rescale the object. Same static-object rule as [`Self::set_position`].
    pub fn set_scale(&mut self, scale: Vector2) {
        if self.transform_locked("scale") {
            return;
        }
        self.scale = scale;
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    pub(crate) fn mark_registered(&mut self) {
        self.registered = true;
    }

    /// Classification tags carried by this object.
    pub fn classifications(&self) -> &[Classification] {
        &self.classifications
    }

    pub fn has_classification(&self, classification: Classification) -> bool {
        self.classifications.contains(&classification)
    }

    /// Attach a behaviour. Attachment order is the update order; it is the
    /// only ordering guarantee behaviours get.
    pub fn attach(&mut self, behaviour: Box<dyn Behaviour>) {
        self.behaviours.push(Some(behaviour));
    }

    /// Number of behaviour slots (including any currently lent out).
    pub fn behaviour_count(&self) -> usize {
        self.behaviours.len()
    }

    pub(crate) fn take_behaviour(&mut self, slot: usize) -> Option<Box<dyn Behaviour>> {
        self.behaviours.get_mut(slot)?.take()
    }

    pub(crate) fn restore_behaviour(&mut self, slot: usize, behaviour: Box<dyn Behaviour>) {
        if let Some(entry) = self.behaviours.get_mut(slot) {
            *entry = Some(behaviour);
        }
    }

    fn transform_locked(&self, what: &str) -> bool {
        if self.is_static && self.registered {
            warn!("ignoring {what} change on a static object already registered with the manager");
            return true;
        }
        false
    }
}
