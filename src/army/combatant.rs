//! Combatant: a single fighter, the leaf of the army tree

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::army::equipment::Equipment;
use crate::army::formation::{Formation, FormationNode};
use crate::army::render::RenderLines;
use crate::army::unit::{Observable, Unit, UnitRef};
use crate::core::error::{ArmyError, Result};
use crate::core::types::{StatLine, UnitId};
use crate::notify::{NotificationChannel, UnitEvent};

pub(crate) struct CombatantNode {
    id: UnitId,
    name: String,
    rank: String,
    base: StatLine,
    state: RefCell<CombatantState>,
    owner: RefCell<Weak<FormationNode>>,
    channel: NotificationChannel,
}

#[derive(Debug, Clone, Default)]
struct CombatantState {
    experience: u32,
    equipment: Vec<Equipment>,
}

/// Shared handle to one combatant
///
/// Clones refer to the same combatant: equipping through one handle is
/// visible through every other, including the one held by a formation.
#[derive(Clone)]
pub struct Combatant(Rc<CombatantNode>);

impl Combatant {
    pub fn new(
        name: impl Into<String>,
        base_attack: u32,
        base_defense: u32,
        base_speed: u32,
        rank: impl Into<String>,
    ) -> Result<Self> {
        Self::with_experience(name, base_attack, base_defense, base_speed, rank, 0)
    }

    pub fn with_experience(
        name: impl Into<String>,
        base_attack: u32,
        base_defense: u32,
        base_speed: u32,
        rank: impl Into<String>,
        experience: u32,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ArmyError::InvalidArgument(
                "combatant name must not be blank".into(),
            ));
        }

        Ok(Self(Rc::new(CombatantNode {
            id: UnitId::new(),
            name,
            rank: rank.into(),
            base: StatLine::new(base_attack, base_defense, base_speed),
            state: RefCell::new(CombatantState {
                experience,
                equipment: Vec::new(),
            }),
            owner: RefCell::new(Weak::new()),
            channel: NotificationChannel::new(),
        })))
    }

    pub fn rank(&self) -> &str {
        &self.0.rank
    }

    pub fn base_stats(&self) -> StatLine {
        self.0.base
    }

    pub fn base_attack(&self) -> u32 {
        self.0.base.attack
    }

    pub fn base_defense(&self) -> u32 {
        self.0.base.defense
    }

    pub fn base_speed(&self) -> u32 {
        self.0.base.speed
    }

    pub fn experience(&self) -> u32 {
        self.0.state.borrow().experience
    }

    /// Equipment in the order it was attached
    pub fn equipment(&self) -> Vec<Equipment> {
        self.0.state.borrow().equipment.clone()
    }

    pub fn equipment_count(&self) -> usize {
        self.0.state.borrow().equipment.len()
    }

    /// Per-axis stats: base plus the matching bonus of every item
    pub fn effective_stats(&self) -> StatLine {
        self.0
            .state
            .borrow()
            .equipment
            .iter()
            .fold(self.0.base, |acc, item| acc + item.bonus())
    }

    pub fn equip(&self, equipment: Equipment) {
        let event = UnitEvent::Equipped {
            unit: self.0.name.clone(),
            equipment: equipment.name().to_string(),
        };
        self.0.state.borrow_mut().equipment.push(equipment);

        tracing::debug!(unit = %self.0.name, "{}", event);
        self.publish(&event);
    }

    /// Remove the first item equal to `equipment` and hand it back
    pub fn unequip(&self, equipment: &Equipment) -> Result<Equipment> {
        let removed = {
            let mut state = self.0.state.borrow_mut();
            let index = state
                .equipment
                .iter()
                .position(|item| item == equipment)
                .ok_or_else(|| {
                    ArmyError::NotFound(format!(
                        "{} does not carry {}",
                        self.0.name,
                        equipment.name()
                    ))
                })?;
            state.equipment.remove(index)
        };

        let event = UnitEvent::Unequipped {
            unit: self.0.name.clone(),
            equipment: removed.name().to_string(),
        };
        tracing::debug!(unit = %self.0.name, "{}", event);
        self.publish(&event);
        Ok(removed)
    }

    /// Add experience points, returning the new total
    pub fn gain_experience(&self, points: u32) -> Result<u32> {
        let total = {
            let mut state = self.0.state.borrow_mut();
            let total = state.experience.checked_add(points).ok_or_else(|| {
                ArmyError::InvalidArgument(format!(
                    "{} cannot gain {} XP: experience would overflow",
                    self.0.name, points
                ))
            })?;
            state.experience = total;
            total
        };

        let event = UnitEvent::ExperienceGained {
            unit: self.0.name.clone(),
            points,
            total,
        };
        tracing::debug!(unit = %self.0.name, "{}", event);
        self.publish(&event);
        Ok(total)
    }

    /// Formation holding this combatant, as member or commander
    pub fn owner(&self) -> Option<Formation> {
        self.0.owner.borrow().upgrade().map(Formation::from_node)
    }

    pub fn ptr_eq(&self, other: &Combatant) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn set_owner(&self, owner: Weak<FormationNode>) {
        *self.0.owner.borrow_mut() = owner;
    }

    /// Single display line, without indentation
    pub(crate) fn describe(&self) -> String {
        let stats = self.effective_stats();
        let state = self.0.state.borrow();
        let gear = if state.equipment.is_empty() {
            "none".to_string()
        } else {
            state
                .equipment
                .iter()
                .map(|item| item.name())
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!(
            "{} {} [A:{} D:{} S:{} XP:{}] equipment: {}",
            self.0.rank,
            self.0.name,
            stats.attack,
            stats.defense,
            stats.speed,
            state.experience,
            gear
        )
    }

    fn publish(&self, event: &UnitEvent) {
        self.0.channel.publish(&UnitRef::Combatant(self.clone()), event);
    }
}

impl Unit for Combatant {
    fn id(&self) -> UnitId {
        self.0.id
    }

    fn name(&self) -> &str {
        &self.0.name
    }

    fn effective_headcount(&self) -> usize {
        1
    }

    fn effective_power(&self) -> u64 {
        let state = self.0.state.borrow();
        self.0.base.total() + state.equipment.iter().map(Equipment::total_bonus).sum::<u64>()
    }

    fn render(&self) -> RenderLines {
        RenderLines::new(UnitRef::Combatant(self.clone()))
    }
}

impl Observable for Combatant {
    fn channel(&self) -> &NotificationChannel {
        &self.0.channel
    }
}

impl fmt::Debug for Combatant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0.state.borrow();
        f.debug_struct("Combatant")
            .field("id", &self.0.id)
            .field("name", &self.0.name)
            .field("rank", &self.0.rank)
            .field("base", &self.0.base)
            .field("experience", &state.experience)
            .field("equipment", &state.equipment)
            .finish()
    }
}
