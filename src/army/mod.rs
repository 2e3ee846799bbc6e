//! Army hierarchy: Combatant → Formation → (nested) Formation
//!
//! Combatants are the leaves and carry stats, experience and equipment.
//! Formations group an optional commander with ordered members, which may
//! themselves be formations. Headcount and power are always computed from
//! the current tree; nothing is cached.

pub mod combatant;
pub mod equipment;
pub mod formation;
pub mod render;
pub mod roster;
pub mod snapshot;
pub mod unit;

pub use combatant::Combatant;
pub use equipment::Equipment;
pub use formation::Formation;
pub use render::RenderLines;
pub use roster::Roster;
pub use snapshot::{CombatantSnapshot, FormationSnapshot, MAX_JSON_NESTING, UnitSnapshot};
pub use unit::{Observable, Unit, UnitRef};
