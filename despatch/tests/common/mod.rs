//! Shared fixtures for the integration suite.

#![allow(dead_code)]

use despatch::{ActionInfo, EventInfo, create_event_info};

/// Opaque stand-in for a native event payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeEvent(pub &'static str);

/// Builder for test [`EventInfo`] records.
///
/// Defaults mirror a delegated click: type `"click"`, target `3` inside
/// container `0`, pre-resolved action `"foo.bar"` on element `2`.
pub struct EventInfoBuilder {
    event_type: String,
    event: FakeEvent,
    target_element: u32,
    container: u32,
    timestamp: f64,
    action: Option<ActionInfo<u32>>,
    is_replay: bool,
}

impl Default for EventInfoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EventInfoBuilder {
    pub fn new() -> Self {
        Self {
            event_type: "click".to_string(),
            event: FakeEvent("click"),
            target_element: 3,
            container: 0,
            timestamp: 0.0,
            action: Some(ActionInfo {
                name: "foo.bar".to_string(),
                element: 2,
            }),
            is_replay: false,
        }
    }

    pub fn event_type(mut self, event_type: &str) -> Self {
        self.event_type = event_type.to_string();
        self
    }

    pub fn event(mut self, event: FakeEvent) -> Self {
        self.event = event;
        self
    }

    pub fn target(mut self, target_element: u32) -> Self {
        self.target_element = target_element;
        self
    }

    pub fn container(mut self, container: u32) -> Self {
        self.container = container;
        self
    }

    pub fn timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn action(mut self, name: &str, element: u32) -> Self {
        self.action = Some(ActionInfo {
            name: name.to_string(),
            element,
        });
        self
    }

    pub fn no_action(mut self) -> Self {
        self.action = None;
        self
    }

    pub fn replay(mut self) -> Self {
        self.is_replay = true;
        self
    }

    pub fn build(self) -> EventInfo<FakeEvent, u32> {
        create_event_info(
            self.event_type,
            self.event,
            self.target_element,
            self.container,
            self.timestamp,
            self.action,
            self.is_replay,
        )
    }
}
