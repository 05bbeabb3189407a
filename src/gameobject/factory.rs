//! Definition loading and game-object instantiation.
//!
//! The factory owns the content caches: game-object definition files and
//! behaviour definition files are read and parsed once, then copied into
//! every instance built from them. Behaviour types are resolved through a
//! [`BehaviourRegistry`] keyed by fully-qualified type path, which is how
//! content files can name code without the engine hard-wiring every
//! combination.
//!
//! Loading is the only fatal surface in the engine: any error below aborts
//! the construction of the requested object and propagates to the caller.
//! There is no retry; an object loads once or is not created.

use std::path::{Path, PathBuf};

use log::{debug, info};
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::behaviours::{Behaviour, BehaviourDefinition};
use crate::gameobject::GameObject;
use crate::gameobject::definition::GameObjectDefinition;
use crate::resources::Services;

/// Fatal load-time errors. These bubble to whoever requested the object.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read definition file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse definition file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("definition {file}: behaviour_files has {files} entries but behaviour_classes has {classes}")]
    MismatchedBehaviourLists {
        file: String,
        files: usize,
        classes: usize,
    },

    #[error("definition {file}: behaviour slot {index} must name exactly one of a file or a class")]
    BehaviourSlot { file: String, index: usize },

    #[error("unknown behaviour class `{0}`")]
    UnknownBehaviourClass(String),

    #[error("behaviour `{class}` rejected its definition: {reason}")]
    BehaviourInit { class: String, reason: String },
}

/// Constructor for one behaviour kind.
pub type BehaviourCtor = fn() -> Box<dyn Behaviour>;

/// Maps fully-qualified behaviour type paths to constructors.
#[derive(Default)]
pub struct BehaviourRegistry {
    ctors: FxHashMap<String, BehaviourCtor>,
}

impl BehaviourRegistry {
    /// An empty registry. Most callers want [`Self::with_builtins`].
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the behaviours this crate ships.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(crate::behaviours::mainmenu::CLASS_NAME, || {
            Box::new(crate::behaviours::mainmenu::MainMenu::new())
        });
        registry.register(crate::behaviours::player::CLASS_NAME, || {
            Box::new(crate::behaviours::player::Player::new())
        });
        registry
    }

    /// Register (or replace) a constructor for a class path.
    pub fn register(&mut self, class: impl Into<String>, ctor: BehaviourCtor) {
        self.ctors.insert(class.into(), ctor);
    }

    /// Instantiate a behaviour by class path.
    pub fn instantiate(&self, class: &str) -> Result<Box<dyn Behaviour>, LoadError> {
        let ctor = self
            .ctors
            .get(class)
            .ok_or_else(|| LoadError::UnknownBehaviourClass(class.to_string()))?;
        Ok(ctor())
    }
}

/// Builds [`GameObject`]s from definition content files.
pub struct GameObjectFactory {
    root: PathBuf,
    registry: BehaviourRegistry,
    definitions: FxHashMap<String, GameObjectDefinition>,
    behaviour_defs: FxHashMap<String, BehaviourDefinition>,
}

impl GameObjectFactory {
    /// Create a factory reading content files below `root`.
    pub fn new(root: impl Into<PathBuf>, registry: BehaviourRegistry) -> Self {
        GameObjectFactory {
            root: root.into(),
            registry,
            definitions: FxHashMap::default(),
            behaviour_defs: FxHashMap::default(),
        }
    }

    /// Load (or fetch from cache) the template stored in `file`. The
    /// returned copy is the caller's to keep.
    pub fn definition(&mut self, file: &str) -> Result<GameObjectDefinition, LoadError> {
        if let Some(def) = self.definitions.get(file) {
            debug!("definition cache hit: {file}");
            return Ok(def.clone());
        }
        let path = self.root.join(file);
        let def: GameObjectDefinition = read_json(&path)?;
        info!("loaded definition {file}");
        self.definitions.insert(file.to_string(), def.clone());
        Ok(def)
    }

    /// Instantiate a game object from the definition in `file`, attaching
    /// and loading every behaviour the definition names. Any failure
    /// aborts the whole construction.
    pub fn create(
        &mut self,
        file: &str,
        services: &mut Services,
    ) -> Result<GameObject, LoadError> {
        let def = self.definition(file)?;
        let mut object = GameObject::from_definition(&def);

        for (index, slot) in resolve_slots(file, &def)?.into_iter().enumerate() {
            let behaviour_def = match slot {
                SlotRef::File(behaviour_file) => self.behaviour_definition(&behaviour_file)?,
                SlotRef::Class(class) => BehaviourDefinition::for_class(class),
            };
            let mut behaviour = self.registry.instantiate(&behaviour_def.class)?;
            behaviour.load_content(&behaviour_def, services)?;
            debug!(
                "attached behaviour {} (slot {index}) to object from {file}",
                behaviour_def.class
            );
            object.attach(behaviour);
        }

        Ok(object)
    }

    /// Load (or fetch from cache) a behaviour definition content file.
    pub fn behaviour_definition(&mut self, file: &str) -> Result<BehaviourDefinition, LoadError> {
        if let Some(def) = self.behaviour_defs.get(file) {
            debug!("behaviour definition cache hit: {file}");
            return Ok(def.clone());
        }
        let path = self.root.join(file);
        let def: BehaviourDefinition = read_json(&path)?;
        info!("loaded behaviour definition {file}");
        self.behaviour_defs.insert(file.to_string(), def.clone());
        Ok(def)
    }
}

enum SlotRef {
    File(String),
    Class(String),
}

/// Walk the definition's index-aligned behaviour lists, insisting that
/// each slot names exactly one of a content file or a class path.
fn resolve_slots(file: &str, def: &GameObjectDefinition) -> Result<Vec<SlotRef>, LoadError> {
    let files = &def.behaviour_files;
    let classes = &def.behaviour_classes;
    if !files.is_empty() && !classes.is_empty() && files.len() != classes.len() {
        return Err(LoadError::MismatchedBehaviourLists {
            file: file.to_string(),
            files: files.len(),
            classes: classes.len(),
        });
    }

    let mut slots = Vec::with_capacity(def.behaviour_slot_count());
    for index in 0..def.behaviour_slot_count() {
        let file_entry = files.get(index).cloned().flatten();
        let class_entry = classes.get(index).cloned().flatten();
        let slot = match (file_entry, class_entry) {
            (Some(behaviour_file), None) => SlotRef::File(behaviour_file),
            (None, Some(class)) => SlotRef::Class(class),
            _ => {
                return Err(LoadError::BehaviourSlot {
                    file: file.to_string(),
                    index,
                });
            }
        };
        slots.push(slot);
    }
    Ok(slots)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
