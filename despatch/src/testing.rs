//! Testing utilities for despatch.
//!
//! Reusable doubles for exercising the engine without a real UI tree:
//!
//! - [`RecordingHandler`]: records every invocation it receives
//! - [`CountingHandler`]: counts invocations
//! - [`FakeTree`]: an in-memory [`ElementTree`] with interior mutability,
//!   so tests can change the tree between capture and replay

use despatch_core::{ActionHandler, ElementNode, ElementTree, EventInfoWrapper};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

// ============================================================================
// Recording handler
// ============================================================================

/// One recorded handler invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation<K: ElementNode> {
    /// Event type the wrapper carried.
    pub event_type: String,
    /// Full name of the resolved action, if any.
    pub action_name: Option<String>,
    /// Element of the resolved action, if any.
    pub action_element: Option<K>,
    /// Replay flag the wrapper carried.
    pub is_replay: bool,
}

/// Records every invocation: event type, resolved action, replay flag.
///
/// The struct is the recorder; [`RecordingHandler::handler`] mints
/// `Rc`-shared callables that all feed the same record.
pub struct RecordingHandler<K: ElementNode> {
    invocations: Rc<RefCell<Vec<Invocation<K>>>>,
}

impl<K: ElementNode> Default for RecordingHandler<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ElementNode> RecordingHandler<K> {
    /// Creates a recorder with no invocations.
    pub fn new() -> Self {
        Self {
            invocations: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Mints a handler callable feeding this recorder.
    pub fn handler<V>(&self) -> ActionHandler<V, K> {
        let invocations = Rc::clone(&self.invocations);
        Rc::new(move |wrapper: &EventInfoWrapper<V, K>| {
            invocations.borrow_mut().push(Invocation {
                event_type: wrapper.event_type().to_string(),
                action_name: wrapper.action().map(|action| action.name.clone()),
                action_element: wrapper.action().map(|action| action.element),
                is_replay: wrapper.is_replay(),
            });
        })
    }

    /// A clone of the recorded invocations, in order.
    pub fn invocations(&self) -> Vec<Invocation<K>> {
        self.invocations.borrow().clone()
    }

    /// Number of recorded invocations.
    pub fn count(&self) -> usize {
        self.invocations.borrow().len()
    }

    /// Clears the record.
    pub fn clear(&self) {
        self.invocations.borrow_mut().clear();
    }
}

// ============================================================================
// Counting handler
// ============================================================================

/// Counts invocations without inspecting them.
pub struct CountingHandler {
    count: Rc<Cell<usize>>,
}

impl Default for CountingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CountingHandler {
    /// Creates a counter at zero.
    pub fn new() -> Self {
        Self {
            count: Rc::new(Cell::new(0)),
        }
    }

    /// Mints a handler callable feeding this counter.
    pub fn handler<V, K: ElementNode>(&self) -> ActionHandler<V, K> {
        let count = Rc::clone(&self.count);
        Rc::new(move |_: &EventInfoWrapper<V, K>| {
            count.set(count.get() + 1);
        })
    }

    /// Number of invocations so far.
    pub fn count(&self) -> usize {
        self.count.get()
    }
}

// ============================================================================
// Fake element tree
// ============================================================================

struct FakeNode {
    parent: Option<u32>,
    actions: HashMap<String, String>,
}

/// In-memory element tree over `u32` node ids.
///
/// Interior-mutable: nodes and action mappings can be added or removed
/// between dispatches, which is exactly what replay re-resolution needs to
/// be tested against. Share it with a `TreeResolver` through an `Rc`.
#[derive(Default)]
pub struct FakeTree {
    nodes: RefCell<HashMap<u32, FakeNode>>,
}

impl FakeTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parentless node.
    pub fn add_root(&self, id: u32) {
        self.nodes.borrow_mut().insert(
            id,
            FakeNode {
                parent: None,
                actions: HashMap::new(),
            },
        );
    }

    /// Adds a node under `parent`.
    pub fn add_child(&self, id: u32, parent: u32) {
        self.nodes.borrow_mut().insert(
            id,
            FakeNode {
                parent: Some(parent),
                actions: HashMap::new(),
            },
        );
    }

    /// Declares `action` for `event_type` on node `id`.
    pub fn set_action(&self, id: u32, event_type: &str, action: &str) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(&id) {
            node.actions
                .insert(event_type.to_string(), action.to_string());
        }
    }

    /// Removes the mapping for `event_type` on node `id`.
    pub fn clear_action(&self, id: u32, event_type: &str) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(&id) {
            node.actions.remove(event_type);
        }
    }
}

impl ElementTree for FakeTree {
    type Node = u32;

    fn parent(&self, node: Self::Node) -> Option<Self::Node> {
        self.nodes.borrow().get(&node).and_then(|node| node.parent)
    }

    fn action_name(&self, node: Self::Node, event_type: &str) -> Option<String> {
        self.nodes
            .borrow()
            .get(&node)
            .and_then(|node| node.actions.get(event_type).cloned())
    }
}
