//! Capabilities shared by combatants and formations
//!
//! A unit is two things at once: a node in the army tree ([`Unit`]) and a
//! source of change events ([`Observable`]). Both concrete handles implement
//! both traits; [`UnitRef`] is the type-erased handle stored in member lists.

use std::rc::{Rc, Weak};

use crate::army::combatant::Combatant;
use crate::army::formation::{Formation, FormationNode};
use crate::army::render::RenderLines;
use crate::core::error::Result;
use crate::core::types::UnitId;
use crate::notify::{Listener, ListenerId, NotificationChannel, UnitEvent};

/// A node in the army hierarchy
pub trait Unit {
    fn id(&self) -> UnitId;

    fn name(&self) -> &str;

    /// Number of combatants in this unit, commanders included
    fn effective_headcount(&self) -> usize;

    /// Sum of base stats and equipment bonuses over every combatant
    fn effective_power(&self) -> u64;

    /// Display lines for this unit and everything under it
    ///
    /// Lazy and restartable: each call walks the tree as it is now.
    fn render(&self) -> RenderLines;
}

/// A unit that publishes change events to subscribed listeners
pub trait Observable {
    fn channel(&self) -> &NotificationChannel;

    fn subscribe(&self, listener: Rc<dyn Listener>) -> ListenerId {
        self.channel().subscribe(listener)
    }

    fn subscribe_fn<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&UnitRef, &UnitEvent) + 'static,
        Self: Sized,
    {
        self.subscribe(Rc::new(listener))
    }

    /// Fails with `NotFound` if `id` is not subscribed to this unit
    fn unsubscribe(&self, id: ListenerId) -> Result<()> {
        self.channel().unsubscribe(id)
    }

    fn listener_count(&self) -> usize {
        self.channel().len()
    }
}

/// Shared handle to either kind of unit
#[derive(Debug, Clone)]
pub enum UnitRef {
    Combatant(Combatant),
    Formation(Formation),
}

impl UnitRef {
    pub fn kind(&self) -> &'static str {
        match self {
            UnitRef::Combatant(_) => "combatant",
            UnitRef::Formation(_) => "formation",
        }
    }

    pub fn as_combatant(&self) -> Option<&Combatant> {
        match self {
            UnitRef::Combatant(c) => Some(c),
            UnitRef::Formation(_) => None,
        }
    }

    pub fn as_formation(&self) -> Option<&Formation> {
        match self {
            UnitRef::Formation(f) => Some(f),
            UnitRef::Combatant(_) => None,
        }
    }

    /// Formation currently holding this unit, as member or commander
    pub fn owner(&self) -> Option<Formation> {
        match self {
            UnitRef::Combatant(c) => c.owner(),
            UnitRef::Formation(f) => f.owner(),
        }
    }

    /// Same underlying unit, not merely equal names or stats
    pub fn same_unit(&self, other: &UnitRef) -> bool {
        self.id() == other.id()
    }

    pub(crate) fn set_owner(&self, owner: Weak<FormationNode>) {
        match self {
            UnitRef::Combatant(c) => c.set_owner(owner),
            UnitRef::Formation(f) => f.set_owner(owner),
        }
    }
}

impl Unit for UnitRef {
    fn id(&self) -> UnitId {
        match self {
            UnitRef::Combatant(c) => c.id(),
            UnitRef::Formation(f) => f.id(),
        }
    }

    fn name(&self) -> &str {
        match self {
            UnitRef::Combatant(c) => c.name(),
            UnitRef::Formation(f) => f.name(),
        }
    }

    fn effective_headcount(&self) -> usize {
        match self {
            UnitRef::Combatant(c) => c.effective_headcount(),
            UnitRef::Formation(f) => f.effective_headcount(),
        }
    }

    fn effective_power(&self) -> u64 {
        match self {
            UnitRef::Combatant(c) => c.effective_power(),
            UnitRef::Formation(f) => f.effective_power(),
        }
    }

    fn render(&self) -> RenderLines {
        RenderLines::new(self.clone())
    }
}

impl Observable for UnitRef {
    fn channel(&self) -> &NotificationChannel {
        match self {
            UnitRef::Combatant(c) => c.channel(),
            UnitRef::Formation(f) => f.channel(),
        }
    }
}

impl From<Combatant> for UnitRef {
    fn from(combatant: Combatant) -> Self {
        UnitRef::Combatant(combatant)
    }
}

impl From<&Combatant> for UnitRef {
    fn from(combatant: &Combatant) -> Self {
        UnitRef::Combatant(combatant.clone())
    }
}

impl From<Formation> for UnitRef {
    fn from(formation: Formation) -> Self {
        UnitRef::Formation(formation)
    }
}

impl From<&Formation> for UnitRef {
    fn from(formation: &Formation) -> Self {
        UnitRef::Formation(formation.clone())
    }
}
