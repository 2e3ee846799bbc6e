//! Formation: a commander plus an ordered list of member units
//!
//! Formations nest. Every unit keeps a weak back-link to the formation that
//! holds it, which gives two guarantees:
//! - a unit belongs to at most one formation at a time
//! - a formation is never placed beneath itself
//!
//! Aggregates are computed on demand with an explicit stack, so very deep
//! trees cannot exhaust the call stack.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::army::combatant::Combatant;
use crate::army::render::RenderLines;
use crate::army::roster::Roster;
use crate::army::unit::{Observable, Unit, UnitRef};
use crate::core::error::{ArmyError, Result};
use crate::core::types::UnitId;
use crate::notify::{NotificationChannel, UnitEvent};

pub(crate) struct FormationNode {
    id: UnitId,
    name: String,
    commander: RefCell<Option<Combatant>>,
    members: RefCell<Vec<UnitRef>>,
    owner: RefCell<Weak<FormationNode>>,
    channel: NotificationChannel,
}

// Tear down nested formations iteratively; the default recursive drop
// overflows the stack on very deep chains.
impl Drop for FormationNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(self.members.get_mut());
        while let Some(unit) = pending.pop() {
            if let UnitRef::Formation(formation) = unit {
                if let Ok(mut node) = Rc::try_unwrap(formation.0) {
                    pending.append(node.members.get_mut());
                }
            }
        }
    }
}

/// Shared handle to one formation
#[derive(Clone)]
pub struct Formation(Rc<FormationNode>);

impl Formation {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ArmyError::InvalidArgument(
                "formation name must not be blank".into(),
            ));
        }

        Ok(Self(Rc::new(FormationNode {
            id: UnitId::new(),
            name,
            commander: RefCell::new(None),
            members: RefCell::new(Vec::new()),
            owner: RefCell::new(Weak::new()),
            channel: NotificationChannel::new(),
        })))
    }

    /// Create a formation led by `commander`
    ///
    /// No event is published: nobody can have subscribed yet.
    pub fn with_commander(name: impl Into<String>, commander: Combatant) -> Result<Self> {
        let formation = Self::new(name)?;
        formation.ensure_unassigned(&UnitRef::Combatant(commander.clone()))?;
        commander.set_owner(Rc::downgrade(&formation.0));
        *formation.0.commander.borrow_mut() = Some(commander);
        Ok(formation)
    }

    pub(crate) fn from_node(node: Rc<FormationNode>) -> Self {
        Self(node)
    }

    pub fn commander(&self) -> Option<Combatant> {
        self.0.commander.borrow().clone()
    }

    /// Snapshot of the direct members, in order
    pub fn members(&self) -> Vec<UnitRef> {
        self.0.members.borrow().clone()
    }

    pub fn member_count(&self) -> usize {
        self.0.members.borrow().len()
    }

    pub fn contains(&self, unit: &impl Unit) -> bool {
        let id = unit.id();
        self.0.members.borrow().iter().any(|m| m.id() == id)
    }

    /// Formation holding this one, if any
    pub fn owner(&self) -> Option<Formation> {
        self.0.owner.borrow().upgrade().map(Formation)
    }

    /// True if `self` is `other` or lies on the path from `other` to the root
    pub fn is_ancestor_of(&self, other: &Formation) -> bool {
        let mut cursor = Some(other.clone());
        while let Some(current) = cursor {
            if current.ptr_eq(self) {
                return true;
            }
            cursor = current.owner();
        }
        false
    }

    pub fn ptr_eq(&self, other: &Formation) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Append `unit` to the member list
    ///
    /// Fails with `Cycle` if `unit` is this formation or one of its
    /// ancestors, and with `AlreadyAssigned` if another formation (or this
    /// one) already holds it.
    pub fn add_member(&self, unit: impl Into<UnitRef>) -> Result<()> {
        let unit = unit.into();

        if let UnitRef::Formation(candidate) = &unit {
            if self.would_cycle(candidate) {
                return Err(ArmyError::Cycle {
                    unit: candidate.name().to_string(),
                    formation: self.0.name.clone(),
                });
            }
        }
        self.ensure_unassigned(&unit)?;

        unit.set_owner(Rc::downgrade(&self.0));
        let event = UnitEvent::MemberAdded {
            member: unit.name().to_string(),
            formation: self.0.name.clone(),
        };
        self.0.members.borrow_mut().push(unit);

        tracing::debug!(formation = %self.0.name, "{}", event);
        self.publish(&event);
        Ok(())
    }

    /// Detach the member with the same identity as `unit` and return it
    pub fn remove_member(&self, unit: &impl Unit) -> Result<UnitRef> {
        let id = unit.id();
        let removed = {
            let mut members = self.0.members.borrow_mut();
            let index = members.iter().position(|m| m.id() == id).ok_or_else(|| {
                ArmyError::NotFound(format!(
                    "{} is not a member of {}",
                    unit.name(),
                    self.0.name
                ))
            })?;
            members.remove(index)
        };
        removed.set_owner(Weak::new());

        let event = UnitEvent::MemberRemoved {
            member: removed.name().to_string(),
            formation: self.0.name.clone(),
        };
        tracing::debug!(formation = %self.0.name, "{}", event);
        self.publish(&event);
        Ok(removed)
    }

    /// Put `commander` in charge, returning the commander it replaces
    ///
    /// Publishes `CommanderRelieved` for the outgoing commander (if any),
    /// then `CommanderAssigned`.
    pub fn assign_commander(&self, commander: Combatant) -> Result<Option<Combatant>> {
        let as_unit = UnitRef::Combatant(commander.clone());
        if let Some(current) = self.commander() {
            if current.ptr_eq(&commander) {
                return Ok(None);
            }
        }
        self.ensure_unassigned(&as_unit)?;

        let previous = self.relieve_commander();
        commander.set_owner(Rc::downgrade(&self.0));
        *self.0.commander.borrow_mut() = Some(commander.clone());

        let event = UnitEvent::CommanderAssigned {
            commander: commander.name().to_string(),
            formation: self.0.name.clone(),
        };
        tracing::debug!(formation = %self.0.name, "{}", event);
        self.publish(&event);
        Ok(previous)
    }

    /// Remove the commander, if any, and return it detached
    pub fn relieve_commander(&self) -> Option<Combatant> {
        let previous = self.0.commander.borrow_mut().take()?;
        previous.set_owner(Weak::new());

        let event = UnitEvent::CommanderRelieved {
            commander: previous.name().to_string(),
            formation: self.0.name.clone(),
        };
        tracing::debug!(formation = %self.0.name, "{}", event);
        self.publish(&event);
        Some(previous)
    }

    /// Every combatant in this subtree, depth-first, commanders first
    pub fn roster(&self) -> Roster {
        Roster::new(UnitRef::Formation(self.clone()))
    }

    pub(crate) fn set_owner(&self, owner: Weak<FormationNode>) {
        *self.0.owner.borrow_mut() = owner;
    }

    fn would_cycle(&self, candidate: &Formation) -> bool {
        if candidate.ptr_eq(self) {
            return true;
        }
        // Without nested formations the candidate cannot be a strict ancestor
        let has_subformations = candidate
            .0
            .members
            .borrow()
            .iter()
            .any(|m| matches!(m, UnitRef::Formation(_)));
        has_subformations && candidate.is_ancestor_of(self)
    }

    fn ensure_unassigned(&self, unit: &UnitRef) -> Result<()> {
        match unit.owner() {
            Some(owner) => Err(ArmyError::AlreadyAssigned {
                id: unit.id(),
                name: unit.name().to_string(),
                owner: owner.name().to_string(),
            }),
            None => Ok(()),
        }
    }

    fn publish(&self, event: &UnitEvent) {
        self.0.channel.publish(&UnitRef::Formation(self.clone()), event);
    }
}

impl Unit for Formation {
    fn id(&self) -> UnitId {
        self.0.id
    }

    fn name(&self) -> &str {
        &self.0.name
    }

    fn effective_headcount(&self) -> usize {
        self.roster().count()
    }

    fn effective_power(&self) -> u64 {
        self.roster().map(|c| c.effective_power()).sum()
    }

    fn render(&self) -> RenderLines {
        RenderLines::new(UnitRef::Formation(self.clone()))
    }
}

impl Observable for Formation {
    fn channel(&self) -> &NotificationChannel {
        &self.0.channel
    }
}

impl fmt::Debug for Formation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formation")
            .field("id", &self.0.id)
            .field("name", &self.0.name)
            .field("commander", &self.0.commander.borrow().as_ref().map(|c| c.name().to_string()))
            .field("members", &self.member_count())
            .finish()
    }
}
