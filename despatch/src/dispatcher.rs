//! The dispatch state machine.

use crate::registry::HandlerRegistry;
use crate::replay::{ReplayBuffer, Replayer};
use crate::resolver::NoResolver;
use despatch_core::{
    ActionHandler, ActionResolver, ElementNode, EventInfo, EventInfoWrapper, GetHandler,
    GlobalHandler, RegistryError, parse_action_name,
};
use std::collections::HashMap;
use std::fmt;

/// Instruction to the container listener layer for the native event.
///
/// The engine never touches native events itself; the caller applies this
/// instruction to its own propagation machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Let the native event keep propagating; nested delegation containers
    /// observe the same native event.
    Continue,
    /// Halt further ancestor propagation for this delegation pass.
    Stop,
}

/// Dispatcher configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatcherOptions {
    /// Instruct the container layer to stop native propagation after an
    /// action-bearing dispatch. Keyed on the action being present, not on a
    /// handler being invoked; global (type-only) dispatch never stops
    /// propagation. Defaults to `false`.
    pub stop_propagation: bool,
}

/// The orchestrator: owns the handler registry, the global handler table,
/// and the replay buffer, and runs the per-event state machine
/// `Received → Resolved/Unresolved → {HandlerInvoked | GlobalHandlerInvoked
/// | Buffered | Dropped}`.
///
/// One dispatcher per delegation domain; registries are instance state with
/// an explicit lifecycle (construct, register/unregister repeatedly, drop),
/// never process-wide.
///
/// `V` is the opaque native event payload; `R` resolves events to actions
/// (use [`NoResolver`] when the container layer pre-resolves).
pub struct Dispatcher<V, R: ActionResolver> {
    registry: HandlerRegistry<V, R::Node>,
    global_handlers: HashMap<String, Vec<GlobalHandler<V, R::Node>>>,
    buffer: ReplayBuffer<V, R::Node>,
    replayer: Option<Replayer<V, R>>,
    resolver: R,
    options: DispatcherOptions,
    // Set for the duration of a replayer invocation; suppresses re-entrant
    // flushes so entries buffered mid-flush queue behind it.
    replaying: bool,
}

impl<V, K: ElementNode> Dispatcher<V, NoResolver<K>> {
    /// Creates a dispatcher with default options that performs no resolution
    /// of its own — it expects pre-resolved [`EventInfo`] records.
    pub fn new() -> Self {
        Self::with_resolver(NoResolver::default())
    }

    /// Creates a non-resolving dispatcher with explicit options.
    pub fn with_options(options: DispatcherOptions) -> Self {
        Self::with_resolver_and_options(NoResolver::default(), options)
    }
}

impl<V, K: ElementNode> Default for Dispatcher<V, NoResolver<K>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, R: ActionResolver> fmt::Debug for Dispatcher<V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("options", &self.options)
            .field("pending_replay", &self.buffer.len())
            .field("has_replayer", &self.replayer.is_some())
            .finish_non_exhaustive()
    }
}

impl<V, R: ActionResolver> Dispatcher<V, R> {
    /// Creates a dispatcher that resolves unresolved events with `resolver`.
    pub fn with_resolver(resolver: R) -> Self {
        Self::with_resolver_and_options(resolver, DispatcherOptions::default())
    }

    /// Creates a dispatcher with an explicit resolver and options.
    pub fn with_resolver_and_options(resolver: R, options: DispatcherOptions) -> Self {
        Self {
            registry: HandlerRegistry::new(),
            global_handlers: HashMap::new(),
            buffer: ReplayBuffer::new(),
            replayer: None,
            resolver,
            options,
            replaying: false,
        }
    }

    /// Borrows the resolver.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// The configured options.
    pub fn options(&self) -> DispatcherOptions {
        self.options
    }

    /// Dispatches one event through the state machine.
    ///
    /// Synchronous and infallible: every failure path degrades to buffering
    /// or dropping, never to an error — dispatch must not destabilize the
    /// caller's event loop. The returned [`Propagation`] is the instruction
    /// the container layer applies to the native event.
    pub fn dispatch(&mut self, mut event_info: EventInfo<V, R::Node>) -> Propagation {
        // Global handlers see events deliberately routed past action
        // resolution, regardless of the replay flag.
        if event_info.action.is_none() {
            if let Some(handlers) = self
                .global_handlers
                .get(event_info.event_type.as_str())
                .filter(|handlers| !handlers.is_empty())
            {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    event_type = %event_info.event_type,
                    handlers = handlers.len(),
                    "dispatching to global handlers"
                );
                let wrapper = EventInfoWrapper::new(event_info);
                for handler in handlers {
                    handler(&wrapper);
                }
                // Global dispatch never halts native propagation.
                return Propagation::Continue;
            }
        }

        if event_info.action.is_none() {
            event_info.action = self.resolver.resolve(
                &event_info.event_type,
                event_info.target_element,
                event_info.container,
            );
        }

        let Some(action_name) = event_info.action.as_ref().map(|action| action.name.clone())
        else {
            // Resolution miss. Replay-flagged events are buffered under the
            // "no action" condition: the tree may gain the mapping before
            // the replayer re-resolves them.
            if event_info.is_replay {
                self.buffer.push(EventInfoWrapper::new(event_info));
                #[cfg(feature = "tracing")]
                tracing::trace!(pending = self.buffer.len(), "buffered unresolved replay event");
            } else {
                #[cfg(feature = "tracing")]
                tracing::trace!(event_type = %event_info.event_type, "dropped unresolved event");
            }
            return Propagation::Continue;
        };

        let propagation = if self.options.stop_propagation {
            Propagation::Stop
        } else {
            Propagation::Continue
        };

        let (namespace, local_name) = parse_action_name(&action_name);
        match self.registry.lookup(namespace, local_name) {
            Some(handler) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(action = %action_name, "dispatching to action handler");
                let wrapper = EventInfoWrapper::new(event_info);
                handler(&wrapper);
                // A successful dispatch is a flush trigger: the action that
                // just resolved may be the one buffered entries wait on.
                self.request_replay();
            }
            None if event_info.is_replay => {
                self.buffer.push(EventInfoWrapper::new(event_info));
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    action = %action_name,
                    pending = self.buffer.len(),
                    "buffered replay event without handler"
                );
            }
            None => {
                // Handler miss on a live event: dropped, no side effect.
                #[cfg(feature = "tracing")]
                tracing::trace!(action = %action_name, "dropped event without handler");
            }
        }
        propagation
    }

    /// Merges `handlers` into `namespace` and requests a replay flush —
    /// registration is the change that may make buffered events
    /// dispatchable. See
    /// [`HandlerRegistry::register_event_info_handlers`] for the merge and
    /// validation semantics.
    pub fn register_event_info_handlers(
        &mut self,
        namespace: &str,
        get_handler: Option<GetHandler<V, R::Node>>,
        handlers: impl IntoIterator<Item = (String, ActionHandler<V, R::Node>)>,
    ) -> Result<(), RegistryError> {
        self.registry
            .register_event_info_handlers(namespace, get_handler, handlers)?;
        self.request_replay();
        Ok(())
    }

    /// Removes one `(namespace, localName)` entry; no-op if absent.
    /// Effective for subsequent dispatches only — a dispatch in progress
    /// already holds its handler clone.
    pub fn unregister_handler(&mut self, namespace: &str, local_name: &str) {
        self.registry.unregister_handler(namespace, local_name);
    }

    /// Whether a handler exists for the given full action name.
    pub fn has_action(&self, full_name: &str) -> bool {
        self.registry.has_action(full_name)
    }

    /// Registers a type-keyed handler that fires for events of `event_type`
    /// whose action is unset, bypassing action resolution. Several handlers
    /// may be registered per type; they fire in registration order.
    pub fn register_global_handler(
        &mut self,
        event_type: impl Into<String>,
        handler: GlobalHandler<V, R::Node>,
    ) {
        self.global_handlers
            .entry(event_type.into())
            .or_default()
            .push(handler);
    }

    /// Removes all global handlers for `event_type`; no-op if absent.
    pub fn unregister_global_handler(&mut self, event_type: &str) {
        self.global_handlers.remove(event_type);
    }

    /// Installs the replayer and requests a flush, so entries buffered
    /// before the replayer existed are not stranded until the next
    /// registration.
    ///
    /// Until a replayer is installed, buffered entries accumulate without
    /// bound — install one early.
    pub fn set_event_replayer(&mut self, replayer: Replayer<V, R>) {
        self.replayer = Some(replayer);
        self.request_replay();
    }

    /// Number of buffered entries awaiting replay.
    pub fn pending_replay(&self) -> usize {
        self.buffer.len()
    }

    /// Flushes the buffer through the replayer if one is installed and the
    /// buffer is non-empty.
    ///
    /// The buffer is taken before the replayer runs, so no entry can be
    /// replayed twice. Requests raised while a flush is running are
    /// suppressed: entries buffered mid-flush (including replayed entries
    /// that still found no handler) queue behind the in-progress flush and
    /// wait for the next trigger.
    fn request_replay(&mut self) {
        if self.replaying || self.buffer.is_empty() || self.replayer.is_none() {
            return;
        }
        let entries = self.buffer.take();
        let Some(mut replayer) = self.replayer.take() else {
            return;
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(entries = entries.len(), "replaying buffered events");
        self.replaying = true;
        replayer(entries, self);
        self.replaying = false;
        // The replayer may have installed a replacement mid-flush; keep it.
        if self.replayer.is_none() {
            self.replayer = Some(replayer);
        }
    }
}
