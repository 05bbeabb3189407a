//! The game-object manager: registry, frame traversal, message routing.
//!
//! The manager is the single authoritative owner of every live
//! [`GameObject`]. It drives the per-frame update pass, the priority-
//! sorted render pass, and fans broadcast messages out to behaviours.
//!
//! # Traversal safety
//!
//! Behaviours run with mutable access to the manager (to broadcast, spawn,
//! or reach other objects), so every traversal lends each behaviour out of
//! its slot, calls it, and restores it. Structural changes requested while
//! any traversal is active (adds and removals) are queued and applied
//! when the outermost traversal ends. Two consequences behaviours can rely
//! on:
//!
//! - an object added during a pass is not updated, rendered, or messaged
//!   in that same pass (snapshot semantics);
//! - removing an object mid-pass never skips or double-processes any other
//!   object.

use log::debug;
use rustc_hash::FxHashMap;

use crate::behaviours::BehaviourContext;
use crate::gameobject::definition::{Classification, HorizontalAnchor, VerticalAnchor};
use crate::gameobject::{GameObject, GameObjectId};
use crate::math::Vector2;
use crate::messages::{Message, MessageFilter};
use crate::render::{DrawCommand, RenderBackend};
use crate::resources::Services;

/// Single authoritative registry of live game objects.
pub struct GameObjectManager {
    objects: FxHashMap<GameObjectId, GameObject>,
    /// Registration order; update order and render tie-break.
    order: Vec<GameObjectId>,
    pending_adds: Vec<(GameObjectId, GameObject)>,
    pending_removals: Vec<GameObjectId>,
    next_id: u32,
    traversal_depth: u32,
}

impl Default for GameObjectManager {
    fn default() -> Self {
        Self::new()
    }
}

impl GameObjectManager {
    pub fn new() -> Self {
        GameObjectManager {
            objects: FxHashMap::default(),
            order: Vec::new(),
            pending_adds: Vec::new(),
            pending_removals: Vec::new(),
            next_id: 0,
            traversal_depth: 0,
        }
    }

    /// Register an object and hand back its id. From this point a static
    /// object's transform is locked. During an active traversal the object
    /// is queued and joins the registry when the traversal ends.
    pub fn add(&mut self, mut object: GameObject) -> GameObjectId {
        let id = GameObjectId::new(self.next_id);
        self.next_id += 1;
        object.mark_registered();
        if self.traversal_depth > 0 {
            debug!("queueing add of object {} until end of frame", id.raw());
            self.pending_adds.push((id, object));
        } else {
            self.objects.insert(id, object);
            self.order.push(id);
        }
        id
    }

    /// Remove an object. Unknown ids are ignored. During an active
    /// traversal the removal is deferred to the end of the pass so the
    /// collection being iterated never mutates under the iteration.
    pub fn remove(&mut self, id: GameObjectId) {
        if self.traversal_depth > 0 {
            debug!("queueing removal of object {} until end of frame", id.raw());
            self.pending_removals.push(id);
        } else {
            self.objects.remove(&id);
            self.order.retain(|other| *other != id);
        }
    }

    /// Number of live (registered, not pending) objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn contains(&self, id: GameObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn object(&self, id: GameObjectId) -> Option<&GameObject> {
        self.objects.get(&id)
    }

    pub fn object_mut(&mut self, id: GameObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(&id)
    }

    /// Ids of live objects in registration order.
    pub fn ids(&self) -> impl Iterator<Item = GameObjectId> + '_ {
        self.order.iter().copied()
    }

    /// Ids of live objects carrying the given classification tag, in
    /// registration order.
    pub fn find_by_classification(&self, tag: Classification) -> Vec<GameObjectId> {
        self.order
            .iter()
            .copied()
            .filter(|id| {
                self.objects
                    .get(id)
                    .is_some_and(|object| object.has_classification(tag))
            })
            .collect()
    }

    /// Per-frame update pass: every object with `do_update`, in
    /// registration order; within an object, behaviours run in attachment
    /// order. Broadcasts made by a behaviour are delivered synchronously
    /// inside this pass.
    pub fn update(&mut self, services: &mut Services) {
        self.traversal_depth += 1;
        let count = self.order.len();
        for index in 0..count {
            let id = self.order[index];
            let Some(object) = self.objects.get(&id) else {
                continue;
            };
            if !object.do_update {
                continue;
            }
            let slots = object.behaviour_count();
            for slot in 0..slots {
                let Some(mut behaviour) = self
                    .objects
                    .get_mut(&id)
                    .and_then(|object| object.take_behaviour(slot))
                else {
                    continue;
                };
                let mut ctx = BehaviourContext {
                    owner: id,
                    manager: &mut *self,
                    services: &mut *services,
                };
                behaviour.update(&mut ctx);
                if let Some(object) = self.objects.get_mut(&id) {
                    object.restore_behaviour(slot, behaviour);
                }
            }
        }
        self.traversal_depth -= 1;
        if self.traversal_depth == 0 {
            self.flush_pending();
        }
    }

    /// Deliver `message` synchronously to every behaviour that opted in to
    /// its kind, scoped by `filter`. Objects added while the broadcast is
    /// in flight are not delivered to in this pass. The behaviour slot the
    /// broadcast originated from (if any) is skipped, since it is on the
    /// call stack; its siblings still receive the message.
    pub fn broadcast_message(
        &mut self,
        message: &mut Message,
        filter: MessageFilter,
        services: &mut Services,
    ) {
        self.traversal_depth += 1;
        let kind = message.kind();
        let count = self.order.len();
        for index in 0..count {
            let id = self.order[index];
            let matches = match filter {
                MessageFilter::All => self.objects.contains_key(&id),
                MessageFilter::Object(target) => id == target && self.objects.contains_key(&id),
                MessageFilter::Classification(tag) => self
                    .objects
                    .get(&id)
                    .is_some_and(|object| object.has_classification(tag)),
            };
            if !matches {
                continue;
            }
            let slots = self
                .objects
                .get(&id)
                .map(|object| object.behaviour_count())
                .unwrap_or(0);
            for slot in 0..slots {
                let Some(mut behaviour) = self
                    .objects
                    .get_mut(&id)
                    .and_then(|object| object.take_behaviour(slot))
                else {
                    continue;
                };
                if behaviour.wants_message(kind) {
                    let mut ctx = BehaviourContext {
                        owner: id,
                        manager: &mut *self,
                        services: &mut *services,
                    };
                    behaviour.on_message(message, &mut ctx);
                }
                if let Some(object) = self.objects.get_mut(&id) {
                    object.restore_behaviour(slot, behaviour);
                }
            }
        }
        self.traversal_depth -= 1;
        if self.traversal_depth == 0 {
            self.flush_pending();
        }
    }

    /// Render pass: objects with `do_render`, stable-sorted ascending by
    /// render priority (ties keep registration order), screen anchors
    /// resolved against the logical screen size.
    pub fn render(&self, backend: &mut dyn RenderBackend, services: &Services) {
        let mut visible: Vec<&GameObject> = self
            .order
            .iter()
            .filter_map(|id| self.objects.get(id))
            .filter(|object| object.do_render)
            .collect();
        // Vec::sort_by_key is stable, which is what keeps priority ties in
        // registration order across repeated render calls.
        visible.sort_by_key(|object| object.render_priority);

        for object in visible {
            let command = DrawCommand {
                position: resolve_draw_position(object, services),
                rotation: object.rotation(),
                scale: object.scale(),
                blend_mode: object.blend_mode,
                render_priority: object.render_priority,
            };
            backend.draw(&command);
        }
    }

    fn flush_pending(&mut self) {
        for (id, object) in self.pending_adds.drain(..) {
            self.objects.insert(id, object);
            self.order.push(id);
        }
        if !self.pending_removals.is_empty() {
            for id in self.pending_removals.drain(..) {
                self.objects.remove(&id);
            }
            let objects = &self.objects;
            self.order.retain(|id| objects.contains_key(id));
        }
    }
}

/// An anchored object's `position` is an offset from its screen anchor;
/// everything else draws at its world position.
fn resolve_draw_position(object: &GameObject, services: &Services) -> Vector2 {
    match object.screen_anchor {
        None => object.position(),
        Some(anchor) => {
            let screen = services.screen;
            let base_x = match anchor.x {
                HorizontalAnchor::Left => 0.0,
                HorizontalAnchor::Center => screen.w as f32 * 0.5,
                HorizontalAnchor::Right => screen.w as f32,
            };
            let base_y = match anchor.y {
                VerticalAnchor::Top => 0.0,
                VerticalAnchor::Center => screen.h as f32 * 0.5,
                VerticalAnchor::Bottom => screen.h as f32,
            };
            Vector2::new(base_x, base_y) + object.position()
        }
    }
}
