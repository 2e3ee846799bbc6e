//! Events emitted by unit mutations

use std::fmt;

use serde::{Deserialize, Serialize};

/// A state change on a unit, published after the change is applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UnitEvent {
    Equipped { unit: String, equipment: String },
    Unequipped { unit: String, equipment: String },
    ExperienceGained { unit: String, points: u32, total: u32 },
    MemberAdded { member: String, formation: String },
    MemberRemoved { member: String, formation: String },
    CommanderAssigned { commander: String, formation: String },
    CommanderRelieved { commander: String, formation: String },
}

impl fmt::Display for UnitEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitEvent::Equipped { unit, equipment } => {
                write!(f, "{} equipped with {}", unit, equipment)
            }
            UnitEvent::Unequipped { unit, equipment } => {
                write!(f, "{} unequipped {}", unit, equipment)
            }
            UnitEvent::ExperienceGained { unit, points, .. } => {
                write!(f, "{} gained {} XP", unit, points)
            }
            UnitEvent::MemberAdded { member, formation } => {
                write!(f, "{} added to {}", member, formation)
            }
            UnitEvent::MemberRemoved { member, formation } => {
                write!(f, "{} removed from {}", member, formation)
            }
            UnitEvent::CommanderAssigned { commander, formation } => {
                write!(f, "{} took command of {}", commander, formation)
            }
            UnitEvent::CommanderRelieved { commander, formation } => {
                write!(f, "{} relieved of command of {}", commander, formation)
            }
        }
    }
}
