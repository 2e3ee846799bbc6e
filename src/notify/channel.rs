//! Per-unit publish/subscribe channel

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::army::UnitRef;
use crate::core::error::{ArmyError, Result};
use crate::notify::events::UnitEvent;

/// Receives change events from the units it is subscribed to
pub trait Listener {
    fn receive(&self, source: &UnitRef, event: &UnitEvent);
}

impl<F> Listener for F
where
    F: Fn(&UnitRef, &UnitEvent),
{
    fn receive(&self, source: &UnitRef, event: &UnitEvent) {
        self(source, event)
    }
}

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// Handle returned by `subscribe`, used to unsubscribe later
///
/// Ids are unique across all channels, so an id issued by one unit never
/// removes a listener from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    fn next() -> Self {
        Self(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Ordered set of listeners attached to one unit
#[derive(Default)]
pub struct NotificationChannel {
    listeners: RefCell<Vec<(ListenerId, Rc<dyn Listener>)>>,
}

impl NotificationChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: Rc<dyn Listener>) -> ListenerId {
        let id = ListenerId::next();
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) -> Result<()> {
        let mut listeners = self.listeners.borrow_mut();
        let index = listeners
            .iter()
            .position(|(existing, _)| *existing == id)
            .ok_or_else(|| ArmyError::NotFound(format!("listener {:?}", id)))?;
        listeners.remove(index);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    /// Deliver `event` to every listener in subscription order
    ///
    /// The listener list is copied before delivery: listeners may
    /// subscribe, unsubscribe or inspect the source unit while running, and
    /// such changes take effect from the next publish. A panicking listener
    /// is not caught.
    pub fn publish(&self, source: &UnitRef, event: &UnitEvent) {
        let listeners: Vec<Rc<dyn Listener>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            listener.receive(source, event);
        }
    }
}

impl fmt::Debug for NotificationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationChannel")
            .field("listeners", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::army::Combatant;
    use std::cell::Cell;

    fn source() -> UnitRef {
        Combatant::new("Jean", 10, 10, 10, "Corporal").unwrap().into()
    }

    fn event() -> UnitEvent {
        UnitEvent::ExperienceGained {
            unit: "Jean".into(),
            points: 5,
            total: 5,
        }
    }

    #[test]
    fn test_publish_reaches_every_listener_in_order() {
        let channel = NotificationChannel::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            channel.subscribe(Rc::new(move |_: &UnitRef, _: &UnitEvent| {
                order.borrow_mut().push(tag);
            }));
        }

        channel.publish(&source(), &event());
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let channel = NotificationChannel::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let id = channel.subscribe(Rc::new(move |_: &UnitRef, _: &UnitEvent| {
            counter.set(counter.get() + 1);
        }));

        channel.publish(&source(), &event());
        channel.unsubscribe(id).unwrap();
        channel.publish(&source(), &event());

        assert_eq!(hits.get(), 1);
        assert!(channel.is_empty());
    }

    #[test]
    fn test_unsubscribe_unknown_listener_is_not_found() {
        let channel = NotificationChannel::new();
        let other = NotificationChannel::new();
        let id = other.subscribe(Rc::new(|_: &UnitRef, _: &UnitEvent| {}));

        let err = channel.unsubscribe(id).unwrap_err();
        assert!(matches!(err, ArmyError::NotFound(_)));
        assert_eq!(other.len(), 1);
    }

    #[test]
    fn test_double_unsubscribe_fails() {
        let channel = NotificationChannel::new();
        let id = channel.subscribe(Rc::new(|_: &UnitRef, _: &UnitEvent| {}));
        assert!(channel.unsubscribe(id).is_ok());
        assert!(channel.unsubscribe(id).is_err());
    }

    #[test]
    fn test_listener_may_subscribe_during_publish() {
        let channel = Rc::new(NotificationChannel::new());
        let hits = Rc::new(Cell::new(0));

        let inner_channel = Rc::clone(&channel);
        let inner_hits = Rc::clone(&hits);
        channel.subscribe(Rc::new(move |_: &UnitRef, _: &UnitEvent| {
            let hits = Rc::clone(&inner_hits);
            inner_channel.subscribe(Rc::new(move |_: &UnitRef, _: &UnitEvent| {
                hits.set(hits.get() + 1);
            }));
        }));

        // The listener added mid-publish only sees the next event
        channel.publish(&source(), &event());
        assert_eq!(hits.get(), 0);
        assert_eq!(channel.len(), 2);

        channel.publish(&source(), &event());
        assert_eq!(hits.get(), 1);
    }
}
