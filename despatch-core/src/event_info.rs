//! Event records and the read-only wrapper handed to handlers.

use crate::element::ElementNode;

/// Separator between the namespace and the local part of an action name.
pub const ACTION_SEPARATOR: char = '.';

/// An action resolved for an event: a name bound to the element declaring it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionInfo<K: ElementNode> {
    /// Full action name, possibly namespaced as `"namespace.localName"`.
    /// An un-namespaced name belongs to the empty namespace.
    pub name: String,
    /// The element the action mapping was found on. Must be an
    /// ancestor-or-self of the event's target element within its container.
    pub element: K,
}

/// One observed interaction, as constructed by the container listener layer.
///
/// Immutable by convention except for `action`, which the dispatcher may
/// fill in via resolution or clear via [`EventInfo::unset_action`].
///
/// The native event payload `V` is owned by this record; when an event is
/// buffered for replay the whole record moves into the replay buffer, and it
/// moves back out on flush.
#[derive(Debug, Clone)]
pub struct EventInfo<V, K: ElementNode> {
    /// Event type identifier, e.g. `"click"`.
    pub event_type: String,
    /// Opaque native event payload.
    pub event: V,
    /// The element the native event was raised on.
    pub target_element: K,
    /// The root element at which delegation is anchored.
    pub container: K,
    /// Numeric time of capture, caller-supplied.
    pub timestamp: f64,
    /// The action resolved for this event, if any.
    pub action: Option<ActionInfo<K>>,
    /// Distinguishes first-pass dispatch from replayed dispatch.
    pub is_replay: bool,
}

impl<V, K: ElementNode> EventInfo<V, K> {
    /// Clears the resolved action.
    ///
    /// This is the terminal state for events meant to skip action-based
    /// routing, e.g. events deliberately routed only to global handlers.
    pub fn unset_action(&mut self) {
        self.action = None;
    }
}

/// Constructs an [`EventInfo`].
pub fn create_event_info<V, K: ElementNode>(
    event_type: impl Into<String>,
    event: V,
    target_element: K,
    container: K,
    timestamp: f64,
    action: Option<ActionInfo<K>>,
    is_replay: bool,
) -> EventInfo<V, K> {
    EventInfo {
        event_type: event_type.into(),
        event,
        target_element,
        container,
        timestamp,
        action,
        is_replay,
    }
}

/// Clears the resolved action of `event_info`. See [`EventInfo::unset_action`].
pub fn unset_action<V, K: ElementNode>(event_info: &mut EventInfo<V, K>) {
    event_info.unset_action();
}

/// Splits a full action name into `(namespace, localName)` on the first
/// [`ACTION_SEPARATOR`]. A name with no separator has the empty namespace.
///
/// The local name may itself contain separators; only the namespace is
/// constrained to be separator-free (enforced at registration).
pub fn parse_action_name(full_name: &str) -> (&str, &str) {
    match full_name.split_once(ACTION_SEPARATOR) {
        Some((namespace, local_name)) => (namespace, local_name),
        None => ("", full_name),
    }
}

/// Read-only view over an [`EventInfo`], handed to handlers and buffered for
/// replay.
#[derive(Debug, Clone)]
pub struct EventInfoWrapper<V, K: ElementNode> {
    event_info: EventInfo<V, K>,
}

impl<V, K: ElementNode> EventInfoWrapper<V, K> {
    /// Wraps an owned [`EventInfo`].
    pub fn new(event_info: EventInfo<V, K>) -> Self {
        Self { event_info }
    }

    /// The event type identifier.
    pub fn event_type(&self) -> &str {
        &self.event_info.event_type
    }

    /// The opaque native event payload.
    pub fn event(&self) -> &V {
        &self.event_info.event
    }

    /// The element the native event was raised on.
    pub fn target_element(&self) -> K {
        self.event_info.target_element
    }

    /// The delegation container root.
    pub fn container(&self) -> K {
        self.event_info.container
    }

    /// Capture time.
    pub fn timestamp(&self) -> f64 {
        self.event_info.timestamp
    }

    /// The resolved action, if any.
    pub fn action(&self) -> Option<&ActionInfo<K>> {
        self.event_info.action.as_ref()
    }

    /// Whether this view was produced by replay rather than live dispatch.
    pub fn is_replay(&self) -> bool {
        self.event_info.is_replay
    }

    /// Borrows the underlying record.
    pub fn event_info(&self) -> &EventInfo<V, K> {
        &self.event_info
    }

    /// Recovers the underlying record, e.g. for re-submission through
    /// dispatch from a replayer.
    pub fn into_event_info(self) -> EventInfo<V, K> {
        self.event_info
    }
}
