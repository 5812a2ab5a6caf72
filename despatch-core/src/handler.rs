//! Handler callables and the handler-source seam.

use crate::element::ElementNode;
use crate::event_info::EventInfoWrapper;
use std::rc::Rc;

/// A handler bound to one action, invoked with a read-only event view.
///
/// Handlers are `Rc`-shared so a lookup can hand out a clone and the
/// registry is never borrowed across an invocation. Unregistering a handler
/// is effective for subsequent dispatches only; an in-progress dispatch
/// already holds its clone.
pub type ActionHandler<V, K> = Rc<dyn Fn(&EventInfoWrapper<V, K>)>;

/// A handler keyed only by event type, bypassing action resolution.
pub type GlobalHandler<V, K> = Rc<dyn Fn(&EventInfoWrapper<V, K>)>;

/// Late/lazy handler lookup for one namespace.
///
/// Consulted before the namespace's static table on every lookup, so
/// handlers can be resolved at dispatch time without re-registering.
pub type GetHandler<V, K> = Box<dyn Fn(&str) -> Option<ActionHandler<V, K>>>;

/// A source of handlers for local action names.
///
/// The static per-namespace table is one implementation; the [`GetHandler`]
/// indirection is another. A namespace composes its sources
/// first-match-wins, indirection first.
pub trait HandlerSource<V, K: ElementNode> {
    /// The handler for `local_name`, if this source can supply one.
    fn handler_for(&self, local_name: &str) -> Option<ActionHandler<V, K>>;
}
