//! Game objects: definitions, instances, factory, and the manager.
//!
//! A game object is a data record (transform, render/update flags,
//! classification tags) composited with an ordered list of pluggable
//! behaviours. Heterogeneous game logic is composed by attaching
//! behaviours, not by subclassing objects.
//!
//! Submodules overview:
//! - [`definition`] – the serializable template an object is built from
//! - [`object`] – the runtime instance and its behaviour slots
//! - [`factory`] – definition loading and behaviour instantiation
//! - [`manager`] – the live registry: update/render traversal and
//!   message broadcast

pub mod definition;
pub mod factory;
pub mod manager;
pub mod object;

pub use object::{GameObject, GameObjectId};
