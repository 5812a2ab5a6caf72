//! # despatch-core
//!
//! Core types and trait seams for the despatch event delegation engine.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! container listener layers and element-tree adapters that don't need the
//! full `despatch` engine.
//!
//! # Components
//!
//! The engine is built from a small set of components, leaves first:
//!
//! ## Data model ([`EventInfo`])
//!
//! One observed interaction: the event type, an opaque native event payload,
//! the target and container elements, a capture timestamp, the optionally
//! resolved [`ActionInfo`], and a replay flag. Handlers never see the record
//! directly; they receive a read-only [`EventInfoWrapper`] view.
//!
//! ## Element capability ([`ElementTree`])
//!
//! The engine never owns a UI tree. It reads one through a traversal
//! capability: parent lookup plus a per-event-type action-name read. Any
//! tree — a DOM-like structure, a widget arena, a test double — plugs in by
//! implementing this trait.
//!
//! ## Resolution seam ([`ActionResolver`])
//!
//! Resolving a raw event to a named action is a pure function over the tree
//! capability: walk the ancestor chain from the target toward the container
//! and take the nearest element declaring a mapping for the event type.
//!
//! ## Handler seam ([`HandlerSource`])
//!
//! Handlers are looked up through sources composed first-match-wins: a lazy
//! per-namespace indirection ([`GetHandler`]) is consulted before the static
//! registration table. Both are just implementations of the same trait.
//!
//! # Single-threaded by contract
//!
//! Dispatch, registration, and replay all run synchronously on one thread.
//! Handlers are [`std::rc::Rc`]-shared callables, not `Arc` — the engine
//! makes no thread-safety promise it cannot keep.

#![warn(missing_docs)]

pub mod element;
pub mod error;
pub mod event_info;
pub mod handler;

pub use element::{ActionResolver, ElementNode, ElementTree};
pub use error::RegistryError;
pub use event_info::{
    ACTION_SEPARATOR, ActionInfo, EventInfo, EventInfoWrapper, create_event_info,
    parse_action_name, unset_action,
};
pub use handler::{ActionHandler, GetHandler, GlobalHandler, HandlerSource};
