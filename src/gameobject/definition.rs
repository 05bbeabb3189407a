//! Declarative game-object templates.
//!
//! A [`GameObjectDefinition`] is the serializable description of an
//! object's static/initial properties and the behaviours it should carry.
//! Definitions are loaded once per content file (JSON), cached by the
//! factory, and copied into each instance.
//!
//! Optional fields deserialize to "no constraint": zero vectors for the
//! collision/motion offsets, an empty classification set, no screen
//! anchor. Enum values in content files are spelled SCREAMING_SNAKE_CASE.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::math::Vector2;

/// Categories of game objects. Used by the object system and behaviours
/// for things like limiting a broadcast to a certain group of objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Player,
    Enemy,
    Ally,
    VolleyBall,
    Wall,
}

/// Compositing mode applied when an object is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlendMode {
    #[default]
    Standard,
    Multiply,
    StandardUi,
    MultiplyUi,
    Test,
}

/// Horizontal screen areas an object can be anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HorizontalAnchor {
    Left,
    Center,
    Right,
}

/// Vertical screen areas an object can be anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerticalAnchor {
    Top,
    Center,
    Bottom,
}

/// An anchor point is both the X and Y screen-anchor components. Useful
/// for UI elements: when set, the object's `position` becomes an offset
/// from this point instead of a world coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenAnchorPoint {
    pub x: HorizontalAnchor,
    pub y: VerticalAnchor,
}

fn default_true() -> bool {
    true
}

fn default_scale() -> Vector2 {
    Vector2::ONE
}

/// Immutable template a [`GameObject`](crate::gameobject::GameObject) is
/// instantiated from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameObjectDefinition {
    /// Draw order; higher values render later (on top).
    #[serde(default)]
    pub render_priority: i32,

    /// Whether the object receives per-frame updates.
    #[serde(default = "default_true")]
    pub do_update: bool,

    /// Whether the object is drawn by the render pass.
    #[serde(default = "default_true")]
    pub do_render: bool,

    /// World position, or anchor offset when `screen_anchor` is set.
    #[serde(default)]
    pub position: Vector2,

    /// Rotation around the Z axis, in degrees.
    #[serde(default)]
    pub rotation: f32,

    /// Per-axis scale.
    #[serde(default = "default_scale")]
    pub scale: Vector2,

    /// Optional screen anchor; see [`ScreenAnchorPoint`].
    #[serde(default)]
    pub screen_anchor: Option<ScreenAnchorPoint>,

    /// A static object's transform must not change once it is registered
    /// with the manager. Mutation between instantiation and registration
    /// is fine.
    #[serde(default)]
    pub is_static: bool,

    /// Width and height of the collision box.
    #[serde(default)]
    pub collision_box: Vector2,

    /// Offset of the collision box from the object position. Sprites that
    /// do not fill their frame want this distinct from the motion root.
    #[serde(default)]
    pub collision_root: Vector2,

    /// Offset at which the object's origin can be found.
    #[serde(default)]
    pub motion_root: Vector2,

    /// Classification tags; unordered, may be empty.
    #[serde(default)]
    pub classifications: SmallVec<[Classification; 4]>,

    /// Compositing mode used when rendering this object.
    #[serde(default)]
    pub blend_mode: BlendMode,

    /// Behaviour definition content files, index-aligned with
    /// `behaviour_classes`. Exactly one of the two lists is `Some` per
    /// slot.
    #[serde(default)]
    pub behaviour_files: Vec<Option<String>>,

    /// Fully-qualified behaviour type paths (e.g.
    /// `volleyengine::behaviours::MainMenu`), index-aligned with
    /// `behaviour_files`.
    #[serde(default)]
    pub behaviour_classes: Vec<Option<String>>,
}

impl GameObjectDefinition {
    /// Number of behaviour slots declared by this definition.
    pub fn behaviour_slot_count(&self) -> usize {
        self.behaviour_files.len().max(self.behaviour_classes.len())
    }
}
