//! Change notification for units
//!
//! Every unit owns a [`NotificationChannel`]. Mutations publish a typed
//! [`UnitEvent`] to the listeners of the unit that changed, and only to
//! those: events never bubble up to the owning formation.

pub mod channel;
pub mod events;
pub mod log;

pub use channel::{Listener, ListenerId, NotificationChannel};
pub use events::UnitEvent;
pub use log::{EventLog, LoggedEvent, TracingListener};
