//! Element identity and the tree-traversal capability seams.

use crate::event_info::ActionInfo;
use std::fmt::Debug;
use std::rc::Rc;

/// A marker trait for element keys: cheap-to-copy, non-owning identities
/// into the caller's element tree.
///
/// The engine never owns elements; it only compares and copies their keys.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid element key",
    label = "must be `Copy + Eq + Debug + 'static`",
    note = "Element keys are non-owning identities into the caller's element tree."
)]
pub trait ElementNode: Copy + Eq + Debug + 'static {}

impl<T: Copy + Eq + Debug + 'static> ElementNode for T {}

/// Tree-traversal capability consumed by the resolver.
///
/// Implementations adapt a live, mutable element tree: a DOM-like structure,
/// a widget arena, or a test double. The engine only ever reads through this
/// trait — identity, parent lookup, and the action mapping for one event
/// type. How the mapping is declared on elements (attribute syntax, compiled
/// tables) belongs to the annotation layer, not to this engine.
pub trait ElementTree {
    /// Key type identifying elements of this tree.
    type Node: ElementNode;

    /// The parent of `node`, or `None` at a root.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// The full action name `node` declares for `event_type`, if any.
    fn action_name(&self, node: Self::Node, event_type: &str) -> Option<String>;
}

impl<T: ElementTree + ?Sized> ElementTree for &T {
    type Node = T::Node;

    fn parent(&self, node: Self::Node) -> Option<Self::Node> {
        (**self).parent(node)
    }

    fn action_name(&self, node: Self::Node, event_type: &str) -> Option<String> {
        (**self).action_name(node, event_type)
    }
}

impl<T: ElementTree + ?Sized> ElementTree for Rc<T> {
    type Node = T::Node;

    fn parent(&self, node: Self::Node) -> Option<Self::Node> {
        (**self).parent(node)
    }

    fn action_name(&self, node: Self::Node, event_type: &str) -> Option<String> {
        (**self).action_name(node, event_type)
    }
}

impl<T: ElementTree + ?Sized> ElementTree for Box<T> {
    type Node = T::Node;

    fn parent(&self, node: Self::Node) -> Option<Self::Node> {
        (**self).parent(node)
    }

    fn action_name(&self, node: Self::Node, event_type: &str) -> Option<String> {
        (**self).action_name(node, event_type)
    }
}

/// Resolves an event to its nearest action along the ancestor chain.
///
/// Given the event type, the target element, and the delegation container,
/// an implementation finds the first element on the path
/// `target → … → container` declaring a mapping for the event type.
/// Ancestry is a total order along that path, so exactly one candidate wins
/// and no tie-breaking is needed.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot resolve actions",
    label = "missing `ActionResolver` implementation",
    note = "Use `TreeResolver` over an `ElementTree`, or `NoResolver` for pre-resolved dispatch."
)]
pub trait ActionResolver {
    /// Element key type this resolver operates on.
    type Node: ElementNode;

    /// The nearest action for `event_type` on the path from `target` to
    /// `container`, or `None` if the walk finds no mapping.
    fn resolve(
        &self,
        event_type: &str,
        target: Self::Node,
        container: Self::Node,
    ) -> Option<ActionInfo<Self::Node>>;
}
