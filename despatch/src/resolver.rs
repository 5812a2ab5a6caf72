//! Action resolution over the ancestor chain.

use despatch_core::{ActionInfo, ActionResolver, ElementNode, ElementTree};
use std::marker::PhantomData;

/// Resolves actions by walking `target → … → container` over an
/// [`ElementTree`].
///
/// The walk is inclusive of both ends: the target element itself is the
/// first candidate and the container root may carry the winning mapping.
/// The nearest element declaring a mapping for the event type wins; the
/// walk never continues past the container, and a target whose parent chain
/// ends before reaching the container (detached subtree) resolves to
/// nothing.
///
/// Resolution is a pure read over the tree capability, so a live tree may
/// change between capture and replay — replayed events are re-resolved
/// against the current tree state.
#[derive(Debug)]
pub struct TreeResolver<T: ElementTree> {
    tree: T,
}

impl<T: ElementTree> TreeResolver<T> {
    /// Creates a resolver over `tree`.
    ///
    /// Share a tree with other owners by passing an `Rc` (or a reference);
    /// [`ElementTree`] is implemented for both.
    pub fn new(tree: T) -> Self {
        Self { tree }
    }

    /// Borrows the underlying tree.
    pub fn tree(&self) -> &T {
        &self.tree
    }
}

impl<T: ElementTree> ActionResolver for TreeResolver<T> {
    type Node = T::Node;

    fn resolve(
        &self,
        event_type: &str,
        target: Self::Node,
        container: Self::Node,
    ) -> Option<ActionInfo<Self::Node>> {
        let mut node = target;
        loop {
            if let Some(name) = self.tree.action_name(node, event_type) {
                return Some(ActionInfo {
                    name,
                    element: node,
                });
            }
            if node == container {
                return None;
            }
            node = self.tree.parent(node)?;
        }
    }
}

/// Resolves nothing.
///
/// For dispatchers that only ever receive pre-resolved [`EventInfo`]
/// records — the container listener layer has already run resolution and
/// either set the action or deliberately unset it.
///
/// [`EventInfo`]: despatch_core::EventInfo
#[derive(Debug)]
pub struct NoResolver<K: ElementNode> {
    _marker: PhantomData<fn() -> K>,
}

impl<K: ElementNode> Default for NoResolver<K> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<K: ElementNode> ActionResolver for NoResolver<K> {
    type Node = K;

    fn resolve(
        &self,
        _event_type: &str,
        _target: Self::Node,
        _container: Self::Node,
    ) -> Option<ActionInfo<Self::Node>> {
        None
    }
}
