//! Ready-made listeners: a bounded in-memory log and a tracing bridge

use std::cell::RefCell;
use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::army::{Unit, UnitRef};
use crate::core::types::UnitId;
use crate::notify::channel::Listener;
use crate::notify::events::UnitEvent;

/// An event as seen by a listener, tagged with its source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedEvent {
    pub source: UnitId,
    pub source_name: String,
    pub event: UnitEvent,
}

/// Ring buffer of recently received events
///
/// Subscribe it to as many units as needed; each entry records which unit
/// published it.
#[derive(Debug)]
pub struct EventLog {
    events: RefCell<VecDeque<LoggedEvent>>,
    capacity: usize,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: RefCell::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn push(&self, event: LoggedEvent) {
        if self.capacity == 0 {
            return;
        }
        let mut events = self.events.borrow_mut();
        if events.len() >= self.capacity {
            events.pop_front();
        }
        events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Copy of the buffered events, oldest first
    pub fn events(&self) -> Vec<LoggedEvent> {
        self.events.borrow().iter().cloned().collect()
    }

    /// Rendered messages, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .map(|e| e.event.to_string())
            .collect()
    }

    /// Events published by a specific unit
    pub fn events_from(&self, source: UnitId) -> Vec<LoggedEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.source == source)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(64)
    }
}

impl Listener for EventLog {
    fn receive(&self, source: &UnitRef, event: &UnitEvent) {
        self.push(LoggedEvent {
            source: source.id(),
            source_name: source.name().to_string(),
            event: event.clone(),
        });
    }
}

/// Forwards every event to `tracing` at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingListener;

impl Listener for TracingListener {
    fn receive(&self, source: &UnitRef, event: &UnitEvent) {
        tracing::info!(unit = %source.name(), kind = source.kind(), "{}", event);
    }
}
