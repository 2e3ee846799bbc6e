//! Point-in-time, serializable view of a unit tree
//!
//! Capture walks the tree with an explicit stack and totals each formation
//! from its already captured members, so any tree the hierarchy accepts can
//! be captured. JSON output is limited to [`MAX_JSON_NESTING`] formation
//! levels, which keeps every document `to_json` writes loadable by
//! `from_json`.

use serde::{Deserialize, Serialize};

use crate::army::combatant::Combatant;
use crate::army::equipment::Equipment;
use crate::army::formation::Formation;
use crate::army::unit::{Unit, UnitRef};
use crate::core::error::{ArmyError, Result};
use crate::core::types::{StatLine, UnitId};

/// Deepest chain of nested formations `to_json` will write
pub const MAX_JSON_NESTING: usize = 48;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantSnapshot {
    pub id: UnitId,
    pub name: String,
    pub rank: String,
    pub base: StatLine,
    pub effective: StatLine,
    pub experience: u32,
    pub equipment: Vec<Equipment>,
    pub power: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormationSnapshot {
    pub id: UnitId,
    pub name: String,
    pub headcount: usize,
    pub power: u64,
    pub commander: Option<CombatantSnapshot>,
    pub members: Vec<UnitSnapshot>,
}

// Same iterative teardown as the live tree.
impl Drop for FormationSnapshot {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.members);
        while let Some(member) = pending.pop() {
            if let UnitSnapshot::Formation(mut formation) = member {
                pending.append(&mut formation.members);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitSnapshot {
    Combatant(CombatantSnapshot),
    Formation(FormationSnapshot),
}

impl UnitSnapshot {
    pub fn capture(unit: &UnitRef) -> Self {
        match unit {
            UnitRef::Combatant(c) => UnitSnapshot::Combatant(CombatantSnapshot::capture(c)),
            UnitRef::Formation(f) => UnitSnapshot::Formation(FormationSnapshot::capture(f)),
        }
    }

    /// Formation levels on the longest path; 0 for a lone combatant
    pub fn nesting(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((unit, level)) = stack.pop() {
            if let UnitSnapshot::Formation(formation) = unit {
                deepest = deepest.max(level);
                stack.extend(formation.members.iter().map(|m| (m, level + 1)));
            }
        }
        deepest
    }

    pub fn to_json(&self) -> Result<String> {
        let nesting = self.nesting();
        if nesting > MAX_JSON_NESTING {
            return Err(ArmyError::InvalidArgument(format!(
                "snapshot nests {} formations, JSON output allows at most {}",
                nesting, MAX_JSON_NESTING
            )));
        }
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl CombatantSnapshot {
    pub fn capture(combatant: &Combatant) -> Self {
        Self {
            id: combatant.id(),
            name: combatant.name().to_string(),
            rank: combatant.rank().to_string(),
            base: combatant.base_stats(),
            effective: combatant.effective_stats(),
            experience: combatant.experience(),
            equipment: combatant.equipment(),
            power: combatant.effective_power(),
        }
    }
}

/// A formation whose members are still being captured
struct OpenFormation {
    snapshot: FormationSnapshot,
    remaining: std::vec::IntoIter<UnitRef>,
}

impl OpenFormation {
    fn new(formation: &Formation) -> Self {
        let commander = formation.commander().as_ref().map(CombatantSnapshot::capture);
        let (headcount, power) = match &commander {
            Some(c) => (1, c.power),
            None => (0, 0),
        };
        Self {
            snapshot: FormationSnapshot {
                id: formation.id(),
                name: formation.name().to_string(),
                headcount,
                power,
                commander,
                members: Vec::new(),
            },
            remaining: formation.members().into_iter(),
        }
    }

    fn push(&mut self, member: UnitSnapshot) {
        let (headcount, power) = match &member {
            UnitSnapshot::Combatant(c) => (1, c.power),
            UnitSnapshot::Formation(f) => (f.headcount, f.power),
        };
        self.snapshot.headcount += headcount;
        self.snapshot.power += power;
        self.snapshot.members.push(member);
    }
}

impl FormationSnapshot {
    pub fn capture(formation: &Formation) -> Self {
        let mut current = OpenFormation::new(formation);
        let mut parents: Vec<OpenFormation> = Vec::new();
        loop {
            match current.remaining.next() {
                Some(UnitRef::Combatant(c)) => {
                    current.push(UnitSnapshot::Combatant(CombatantSnapshot::capture(&c)));
                }
                Some(UnitRef::Formation(f)) => {
                    let child = OpenFormation::new(&f);
                    parents.push(std::mem::replace(&mut current, child));
                }
                None => {
                    let Some(parent) = parents.pop() else {
                        return current.snapshot;
                    };
                    let finished = std::mem::replace(&mut current, parent);
                    current.push(UnitSnapshot::Formation(finished.snapshot));
                }
            }
        }
    }
}
