//! # despatch — delegated event dispatch
//!
//! A runtime-agnostic event delegation and dispatch engine. Instead of
//! attaching a listener to every interactive element, a container listener
//! layer listens for a small set of event types at container roots,
//! constructs an [`EventInfo`] per native event, and hands it to a
//! [`Dispatcher`]. The dispatcher resolves the event to a named *action* by
//! walking the ancestor chain of the event target, routes the action to a
//! registered handler, and buffers events that arrive before any handler is
//! registered so they can be replayed once handlers exist.
//!
//! ## Data flow
//!
//! ```text
//! native event
//!   → container listener constructs EventInfo
//!   → Dispatcher::dispatch
//!   → ActionResolver fills the action (nearest ancestor-or-self)
//!   → HandlerRegistry lookup → handler invocation
//!   → or buffered in the ReplayBuffer → (later) Replayer flush
//! ```
//!
//! ## Quick start
//!
//! ```rust
//! use despatch::testing::{FakeTree, RecordingHandler};
//! use despatch::{Dispatcher, TreeResolver, create_event_info};
//! use std::rc::Rc;
//!
//! // A container (0) holding a button (1) with a click action.
//! let tree = Rc::new(FakeTree::new());
//! tree.add_root(0);
//! tree.add_child(1, 0);
//! tree.set_action(1, "click", "menu.open");
//!
//! let mut dispatcher = Dispatcher::with_resolver(TreeResolver::new(Rc::clone(&tree)));
//! let recorder = RecordingHandler::new();
//! dispatcher
//!     .register_event_info_handlers("menu", None, [("open".to_string(), recorder.handler())])
//!     .unwrap();
//!
//! dispatcher.dispatch(create_event_info("click", (), 1, 0, 0.0, None, false));
//! assert_eq!(recorder.count(), 1);
//! ```
//!
//! ## Never throw from the hot path
//!
//! [`Dispatcher::dispatch`] is infallible by design: a resolution miss or a
//! handler miss degrades to dropping or buffering. The only fallible surface
//! is registration, which fails fast on malformed input.
//!
//! ## Single-threaded
//!
//! The engine is synchronous and single-threaded (spec'd for event-loop
//! environments): `&mut self` on every mutating operation, `Rc`-shared
//! handlers, no locks, no yields mid-dispatch.

#![warn(missing_docs)]

pub mod dispatcher;
pub mod registry;
pub mod replay;
pub mod resolver;
pub mod testing;

// Core data model and seams
pub use despatch_core::{
    ACTION_SEPARATOR, ActionHandler, ActionInfo, ActionResolver, ElementNode, ElementTree,
    EventInfo, EventInfoWrapper, GetHandler, GlobalHandler, HandlerSource, RegistryError,
    create_event_info, parse_action_name, unset_action,
};

// Engine
pub use dispatcher::{Dispatcher, DispatcherOptions, Propagation};
pub use registry::HandlerRegistry;
pub use replay::{ReplayBuffer, Replayer};
pub use resolver::{NoResolver, TreeResolver};
