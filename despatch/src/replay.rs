//! Buffering of events that arrived before their handlers existed.

use crate::dispatcher::Dispatcher;
use despatch_core::{ActionResolver, ElementNode, EventInfoWrapper};
use std::fmt;
use std::mem;

/// Callback invoked with one ordered batch of buffered events and the
/// dispatcher that buffered them.
///
/// The replayer owns re-submission: typically it feeds each entry back
/// through [`Dispatcher::dispatch`] (the entries carry `is_replay = true`,
/// so anything still unhandleable re-buffers). The ordering guarantee —
/// entries arrive in original capture order — originates in the buffer;
/// honoring it during re-submission is the replayer's obligation.
pub type Replayer<V, R> =
    Box<dyn FnMut(Vec<EventInfoWrapper<V, <R as ActionResolver>::Node>>, &mut Dispatcher<V, R>)>;

/// Ordered buffer of events awaiting a handler.
///
/// Insertion order is significant: replay must preserve original dispatch
/// order. The buffer is unbounded — the engine favors "never drop a user
/// action" over bounded memory, and imposing a cap would change observable
/// behavior. Callers are expected to install a replayer early.
pub struct ReplayBuffer<V, K: ElementNode> {
    entries: Vec<EventInfoWrapper<V, K>>,
}

impl<V, K: ElementNode> Default for ReplayBuffer<V, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, K: ElementNode> fmt::Debug for ReplayBuffer<V, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplayBuffer")
            .field("len", &self.entries.len())
            .finish()
    }
}

impl<V, K: ElementNode> ReplayBuffer<V, K> {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry, preserving arrival order.
    pub fn push(&mut self, entry: EventInfoWrapper<V, K>) {
        self.entries.push(entry);
    }

    /// Number of buffered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the buffer holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Takes the full ordered contents, leaving the buffer empty.
    ///
    /// The take happens before the replayer runs, so no entry can be
    /// replayed twice and none is lost between buffering and flush.
    pub fn take(&mut self) -> Vec<EventInfoWrapper<V, K>> {
        mem::take(&mut self.entries)
    }
}
