//! Manager integration tests: broadcast routing, traversal safety, and
//! the render pass.

use std::sync::{Arc, Mutex};

use volleyengine::behaviours::{Behaviour, BehaviourContext, BehaviourDefinition};
use volleyengine::gameobject::definition::{Classification, GameObjectDefinition};
use volleyengine::gameobject::factory::LoadError;
use volleyengine::gameobject::manager::GameObjectManager;
use volleyengine::gameobject::{GameObject, GameObjectId};
use volleyengine::math::Vector2;
use volleyengine::messages::{Message, MessageFilter, MessageKind, OnScorePoint};
use volleyengine::render::{DrawCommand, RenderBackend};
use volleyengine::resources::Services;
use volleyengine::resources::gameconfig::GameConfig;

fn services() -> Services {
    Services::new(&GameConfig::new())
}

fn object_from(json: &str) -> GameObject {
    let def: GameObjectDefinition = serde_json::from_str(json).unwrap();
    GameObject::from_definition(&def)
}

fn bare_object() -> GameObject {
    object_from("{}")
}

/// Counts deliveries of one message kind.
struct Recorder {
    kind: MessageKind,
    hits: Arc<Mutex<usize>>,
}

impl Recorder {
    fn boxed(kind: MessageKind, hits: &Arc<Mutex<usize>>) -> Box<dyn Behaviour> {
        Box::new(Recorder {
            kind,
            hits: hits.clone(),
        })
    }
}

impl Behaviour for Recorder {
    fn load_content(
        &mut self,
        _def: &BehaviourDefinition,
        _services: &mut Services,
    ) -> Result<(), LoadError> {
        Ok(())
    }

    fn update(&mut self, _ctx: &mut BehaviourContext<'_>) {}

    fn wants_message(&self, kind: MessageKind) -> bool {
        kind == self.kind
    }

    fn on_message(&mut self, _message: &mut Message, _ctx: &mut BehaviourContext<'_>) {
        *self.hits.lock().unwrap() += 1;
    }
}

fn recorder_object(kind: MessageKind, hits: &Arc<Mutex<usize>>) -> GameObject {
    let mut object = bare_object();
    object.attach(Recorder::boxed(kind, hits));
    object
}

// =============================================================================
// Broadcast Routing
// =============================================================================

#[test]
fn broadcast_reaches_exactly_the_matching_handlers() {
    let mut manager = GameObjectManager::new();
    let mut services = services();
    let score_hits = Arc::new(Mutex::new(0));
    let restart_hits = Arc::new(Mutex::new(0));

    // Four objects: two care about ScorePoint, two about GameRestart.
    manager.add(recorder_object(MessageKind::ScorePoint, &score_hits));
    manager.add(recorder_object(MessageKind::ScorePoint, &score_hits));
    manager.add(recorder_object(MessageKind::GameRestart, &restart_hits));
    manager.add(recorder_object(MessageKind::GameRestart, &restart_hits));

    let mut message = Message::ScorePoint(OnScorePoint { amount: 1 });
    manager.broadcast_message(&mut message, MessageFilter::All, &mut services);

    assert_eq!(*score_hits.lock().unwrap(), 2);
    assert_eq!(*restart_hits.lock().unwrap(), 0);
}

#[test]
fn broadcast_object_filter_delivers_to_one_object() {
    let mut manager = GameObjectManager::new();
    let mut services = services();
    let hits = Arc::new(Mutex::new(0));

    manager.add(recorder_object(MessageKind::ScorePoint, &hits));
    let target = manager.add(recorder_object(MessageKind::ScorePoint, &hits));
    manager.add(recorder_object(MessageKind::ScorePoint, &hits));

    let mut message = Message::ScorePoint(OnScorePoint { amount: 1 });
    manager.broadcast_message(&mut message, MessageFilter::Object(target), &mut services);

    assert_eq!(*hits.lock().unwrap(), 1);
}

#[test]
fn broadcast_classification_filter_scopes_by_tag() {
    let mut manager = GameObjectManager::new();
    let mut services = services();
    let hits = Arc::new(Mutex::new(0));

    let mut player = object_from(r#"{ "classifications": ["PLAYER"] }"#);
    player.attach(Recorder::boxed(MessageKind::ScorePoint, &hits));
    manager.add(player);

    let mut wall = object_from(r#"{ "classifications": ["WALL"] }"#);
    wall.attach(Recorder::boxed(MessageKind::ScorePoint, &hits));
    manager.add(wall);

    let mut second_player = object_from(r#"{ "classifications": ["PLAYER", "ALLY"] }"#);
    second_player.attach(Recorder::boxed(MessageKind::ScorePoint, &hits));
    manager.add(second_player);

    let mut message = Message::ScorePoint(OnScorePoint { amount: 1 });
    manager.broadcast_message(
        &mut message,
        MessageFilter::Classification(Classification::Player),
        &mut services,
    );

    assert_eq!(*hits.lock().unwrap(), 2);
}

/// Spawns a recorder-carrying object the first time it sees the message.
struct SpawnerOnMessage {
    hits: Arc<Mutex<usize>>,
    spawned: bool,
}

impl Behaviour for SpawnerOnMessage {
    fn load_content(
        &mut self,
        _def: &BehaviourDefinition,
        _services: &mut Services,
    ) -> Result<(), LoadError> {
        Ok(())
    }

    fn update(&mut self, _ctx: &mut BehaviourContext<'_>) {}

    fn wants_message(&self, kind: MessageKind) -> bool {
        kind == MessageKind::ScorePoint
    }

    fn on_message(&mut self, _message: &mut Message, ctx: &mut BehaviourContext<'_>) {
        if !self.spawned {
            self.spawned = true;
            ctx.manager
                .add(recorder_object(MessageKind::ScorePoint, &self.hits));
        }
    }
}

#[test]
fn broadcast_does_not_reach_objects_added_mid_broadcast() {
    let mut manager = GameObjectManager::new();
    let mut services = services();
    let hits = Arc::new(Mutex::new(0));

    let mut spawner = bare_object();
    spawner.attach(Box::new(SpawnerOnMessage {
        hits: hits.clone(),
        spawned: false,
    }));
    manager.add(spawner);

    let mut message = Message::ScorePoint(OnScorePoint { amount: 1 });
    manager.broadcast_message(&mut message, MessageFilter::All, &mut services);

    // The freshly spawned recorder was not delivered to in the same pass,
    // but it did join the registry once the pass ended.
    assert_eq!(*hits.lock().unwrap(), 0);
    assert_eq!(manager.len(), 2);

    let mut message = Message::ScorePoint(OnScorePoint { amount: 1 });
    manager.broadcast_message(&mut message, MessageFilter::All, &mut services);
    assert_eq!(*hits.lock().unwrap(), 1);
}

/// Broadcasts a score message on its first update.
struct BroadcastOnce {
    sent: bool,
}

impl Behaviour for BroadcastOnce {
    fn load_content(
        &mut self,
        _def: &BehaviourDefinition,
        _services: &mut Services,
    ) -> Result<(), LoadError> {
        Ok(())
    }

    fn update(&mut self, ctx: &mut BehaviourContext<'_>) {
        if !self.sent {
            self.sent = true;
            let mut message = Message::ScorePoint(OnScorePoint { amount: 2 });
            ctx.broadcast(&mut message, MessageFilter::All);
        }
    }
}

#[test]
fn broadcast_during_update_is_synchronous_and_reaches_siblings() {
    let mut manager = GameObjectManager::new();
    let mut services = services();
    let other_hits = Arc::new(Mutex::new(0));
    let sibling_hits = Arc::new(Mutex::new(0));

    // The sender object carries a sibling recorder after the broadcaster.
    let mut sender = bare_object();
    sender.attach(Box::new(BroadcastOnce { sent: false }));
    sender.attach(Recorder::boxed(MessageKind::ScorePoint, &sibling_hits));
    manager.add(sender);

    manager.add(recorder_object(MessageKind::ScorePoint, &other_hits));

    manager.update(&mut services);

    // Delivered within the same update pass, to other objects and to the
    // sender's own sibling behaviours alike.
    assert_eq!(*other_hits.lock().unwrap(), 1);
    assert_eq!(*sibling_hits.lock().unwrap(), 1);
}

/// Removes a victim object when the message arrives.
struct RemoverOnMessage {
    victim: GameObjectId,
}

impl Behaviour for RemoverOnMessage {
    fn load_content(
        &mut self,
        _def: &BehaviourDefinition,
        _services: &mut Services,
    ) -> Result<(), LoadError> {
        Ok(())
    }

    fn update(&mut self, _ctx: &mut BehaviourContext<'_>) {}

    fn wants_message(&self, kind: MessageKind) -> bool {
        kind == MessageKind::ScorePoint
    }

    fn on_message(&mut self, _message: &mut Message, ctx: &mut BehaviourContext<'_>) {
        ctx.manager.remove(self.victim);
    }
}

#[test]
fn removal_during_broadcast_defers_and_keeps_delivering() {
    let mut manager = GameObjectManager::new();
    let mut services = services();
    let hits = Arc::new(Mutex::new(0));

    let victim = manager.add(recorder_object(MessageKind::ScorePoint, &hits));
    let mut remover = bare_object();
    remover.attach(Box::new(RemoverOnMessage { victim }));
    manager.add(remover);
    manager.add(recorder_object(MessageKind::ScorePoint, &hits));

    let mut message = Message::ScorePoint(OnScorePoint { amount: 1 });
    manager.broadcast_message(&mut message, MessageFilter::All, &mut services);

    // Victim preceded the remover so it was delivered to; the recorder
    // after the remover was still delivered to; the victim is gone now.
    assert_eq!(*hits.lock().unwrap(), 2);
    assert!(!manager.contains(victim));
    assert_eq!(manager.len(), 2);
}

// =============================================================================
// Render Pass
// =============================================================================

/// Test backend that keeps every command in draw order.
#[derive(Default)]
struct RecordingBackend {
    commands: Vec<DrawCommand>,
}

impl RenderBackend for RecordingBackend {
    fn draw(&mut self, command: &DrawCommand) {
        self.commands.push(*command);
    }
}

#[test]
fn render_sorts_by_priority_with_stable_ties() {
    let mut manager = GameObjectManager::new();
    let services = services();

    // Registration order: priorities 5, -1, 5, 0. The two priority-5
    // objects are distinguished by x position.
    manager.add(object_from(
        r#"{ "render_priority": 5, "position": { "x": 1.0, "y": 0.0 } }"#,
    ));
    manager.add(object_from(r#"{ "render_priority": -1 }"#));
    manager.add(object_from(
        r#"{ "render_priority": 5, "position": { "x": 2.0, "y": 0.0 } }"#,
    ));
    manager.add(object_from(r#"{ "render_priority": 0 }"#));

    for _ in 0..3 {
        let mut backend = RecordingBackend::default();
        manager.render(&mut backend, &services);

        let priorities: Vec<i32> = backend.commands.iter().map(|c| c.render_priority).collect();
        assert_eq!(priorities, vec![-1, 0, 5, 5]);

        // Equal priorities keep registration order on every call.
        assert_eq!(backend.commands[2].position.x, 1.0);
        assert_eq!(backend.commands[3].position.x, 2.0);
    }
}

#[test]
fn render_skips_do_render_false() {
    let mut manager = GameObjectManager::new();
    let services = services();

    manager.add(object_from(r#"{ "do_render": false }"#));
    manager.add(bare_object());

    let mut backend = RecordingBackend::default();
    manager.render(&mut backend, &services);
    assert_eq!(backend.commands.len(), 1);
}

#[test]
fn render_resolves_screen_anchors() {
    let mut manager = GameObjectManager::new();
    let services = services(); // default config: 640x360 logical screen

    manager.add(object_from(
        r#"{
            "position": { "x": 10.0, "y": -20.0 },
            "screen_anchor": { "x": "CENTER", "y": "BOTTOM" }
        }"#,
    ));
    manager.add(object_from(
        r#"{ "position": { "x": 10.0, "y": -20.0 } }"#,
    ));

    let mut backend = RecordingBackend::default();
    manager.render(&mut backend, &services);

    // Anchored: position is an offset from the anchor point.
    assert_eq!(backend.commands[0].position, Vector2::new(330.0, 340.0));
    // World-space object draws where it sits.
    assert_eq!(backend.commands[1].position, Vector2::new(10.0, -20.0));
}

#[test]
fn render_carries_blend_mode_and_transform() {
    let mut manager = GameObjectManager::new();
    let services = services();

    manager.add(object_from(
        r#"{
            "blend_mode": "MULTIPLY",
            "rotation": 90.0,
            "scale": { "x": 2.0, "y": 3.0 }
        }"#,
    ));

    let mut backend = RecordingBackend::default();
    manager.render(&mut backend, &services);

    let command = &backend.commands[0];
    assert_eq!(
        command.blend_mode,
        volleyengine::gameobject::definition::BlendMode::Multiply
    );
    assert_eq!(command.rotation, 90.0);
    assert_eq!(command.scale, Vector2::new(2.0, 3.0));
}

// =============================================================================
// Registry Lookups
// =============================================================================

#[test]
fn find_by_classification_returns_registration_order() {
    let mut manager = GameObjectManager::new();

    let first = manager.add(object_from(r#"{ "classifications": ["VOLLEY_BALL"] }"#));
    manager.add(object_from(r#"{ "classifications": ["WALL"] }"#));
    let second = manager.add(object_from(
        r#"{ "classifications": ["VOLLEY_BALL", "ENEMY"] }"#,
    ));

    let balls = manager.find_by_classification(Classification::VolleyBall);
    assert_eq!(balls, vec![first, second]);
}
