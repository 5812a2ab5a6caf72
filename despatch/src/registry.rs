//! Per-namespace handler registration tables.

use despatch_core::{
    ACTION_SEPARATOR, ActionHandler, ElementNode, GetHandler, HandlerSource, RegistryError,
    parse_action_name,
};
use std::collections::HashMap;
use std::fmt;

/// Handlers registered for one namespace: an optional lazy indirection plus
/// the static local-name table, composed first-match-wins.
struct Namespace<V, K: ElementNode> {
    get_handler: Option<GetHandler<V, K>>,
    handlers: HashMap<String, ActionHandler<V, K>>,
}

impl<V, K: ElementNode> Namespace<V, K> {
    fn new() -> Self {
        Self {
            get_handler: None,
            handlers: HashMap::new(),
        }
    }
}

impl<V, K: ElementNode> HandlerSource<V, K> for Namespace<V, K> {
    fn handler_for(&self, local_name: &str) -> Option<ActionHandler<V, K>> {
        if let Some(get_handler) = &self.get_handler {
            if let Some(handler) = get_handler(local_name) {
                return Some(handler);
            }
        }
        self.handlers.get(local_name).cloned()
    }
}

/// Mapping from `(namespace, localName)` to handler.
///
/// Owned by the dispatcher for its lifetime. Re-registering a
/// `(namespace, localName)` pair overwrites the previous handler — last
/// write wins. Lookups clone the handler `Rc`, so invoking a handler never
/// holds a borrow of the registry.
pub struct HandlerRegistry<V, K: ElementNode> {
    namespaces: HashMap<String, Namespace<V, K>>,
}

impl<V, K: ElementNode> Default for HandlerRegistry<V, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, K: ElementNode> fmt::Debug for HandlerRegistry<V, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("namespaces", &self.namespaces.keys())
            .finish_non_exhaustive()
    }
}

impl<V, K: ElementNode> HandlerRegistry<V, K> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            namespaces: HashMap::new(),
        }
    }

    /// Merges `handlers` into the namespace's table.
    ///
    /// A supplied `get_handler` replaces the namespace's previous
    /// indirection and is consulted before the static table on every lookup
    /// in that namespace; `None` leaves any existing indirection in place.
    ///
    /// Fails fast on a namespace containing the separator or an empty local
    /// name; nothing is merged on error.
    pub fn register_event_info_handlers(
        &mut self,
        namespace: &str,
        get_handler: Option<GetHandler<V, K>>,
        handlers: impl IntoIterator<Item = (String, ActionHandler<V, K>)>,
    ) -> Result<(), RegistryError> {
        if namespace.contains(ACTION_SEPARATOR) {
            return Err(RegistryError::NamespaceContainsSeparator {
                namespace: namespace.to_string(),
            });
        }
        let handlers: Vec<_> = handlers.into_iter().collect();
        if handlers.iter().any(|(local_name, _)| local_name.is_empty()) {
            return Err(RegistryError::EmptyLocalName {
                namespace: namespace.to_string(),
            });
        }

        let entry = self
            .namespaces
            .entry(namespace.to_string())
            .or_insert_with(Namespace::new);
        if get_handler.is_some() {
            entry.get_handler = get_handler;
        }
        entry.handlers.extend(handlers);
        Ok(())
    }

    /// Removes one `(namespace, localName)` entry; no-op if absent.
    pub fn unregister_handler(&mut self, namespace: &str, local_name: &str) {
        if let Some(entry) = self.namespaces.get_mut(namespace) {
            entry.handlers.remove(local_name);
        }
    }

    /// Whether a handler exists (statically registered or
    /// `get_handler`-resolvable) for the given full action name.
    pub fn has_action(&self, full_name: &str) -> bool {
        let (namespace, local_name) = parse_action_name(full_name);
        self.lookup(namespace, local_name).is_some()
    }

    /// Looks up the handler for `(namespace, localName)`: the namespace's
    /// `get_handler` first, else the static table, else none.
    pub fn lookup(&self, namespace: &str, local_name: &str) -> Option<ActionHandler<V, K>> {
        self.namespaces
            .get(namespace)
            .and_then(|entry| entry.handler_for(local_name))
    }
}
