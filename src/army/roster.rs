//! Lazy depth-first walk over the combatants of a unit

use std::collections::HashMap;

use crate::army::combatant::Combatant;
use crate::army::formation::Formation;
use crate::army::unit::{Unit, UnitRef};
use crate::core::types::UnitId;

/// Iterator over every combatant under a unit
///
/// Order is pre-order depth-first: a formation's commander, then its
/// members in order, descending into nested formations as they come.
/// A formation's children are read when the walk reaches it, so the
/// iterator always sees the tree as it is at that point.
#[derive(Debug, Clone)]
pub struct Roster {
    stack: Vec<UnitRef>,
}

impl Roster {
    pub fn new(root: UnitRef) -> Self {
        Self { stack: vec![root] }
    }
}

impl Iterator for Roster {
    type Item = Combatant;

    fn next(&mut self) -> Option<Combatant> {
        while let Some(unit) = self.stack.pop() {
            match unit {
                UnitRef::Combatant(combatant) => return Some(combatant),
                UnitRef::Formation(formation) => {
                    self.stack.extend(formation.members().into_iter().rev());
                    if let Some(commander) = formation.commander() {
                        self.stack.push(UnitRef::Combatant(commander));
                    }
                }
            }
        }
        None
    }
}

/// Headcount and power of every formation under `root`, in one pass
///
/// Post-order walk with an explicit stack: a formation is totalled after
/// all of its nested formations, so each unit is visited once.
pub(crate) fn formation_totals(root: &UnitRef) -> HashMap<UnitId, (usize, u64)> {
    let mut totals = HashMap::new();
    let mut stack: Vec<(Formation, bool)> = match root {
        UnitRef::Formation(formation) => vec![(formation.clone(), false)],
        UnitRef::Combatant(_) => return totals,
    };

    while let Some((formation, expanded)) = stack.pop() {
        let members = formation.members();
        if !expanded {
            stack.push((formation, true));
            stack.extend(
                members
                    .into_iter()
                    .filter_map(|m| m.as_formation().cloned())
                    .map(|f| (f, false)),
            );
            continue;
        }

        let (mut headcount, mut power) = match formation.commander() {
            Some(commander) => (1, commander.effective_power()),
            None => (0, 0),
        };
        for member in &members {
            let (count, subtotal) = match member {
                UnitRef::Combatant(c) => (1, c.effective_power()),
                UnitRef::Formation(f) => totals.get(&f.id()).copied().unwrap_or_default(),
            };
            headcount += count;
            power += subtotal;
        }
        totals.insert(formation.id(), (headcount, power));
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::army::{Formation, Unit};

    fn soldier(name: &str) -> Combatant {
        Combatant::new(name, 5, 5, 5, "Private").unwrap()
    }

    #[test]
    fn test_roster_order() {
        let company = Formation::with_commander("Company", soldier("Captain")).unwrap();
        let first = Formation::with_commander("1st Squad", soldier("Sgt A")).unwrap();
        first.add_member(soldier("A1")).unwrap();
        first.add_member(soldier("A2")).unwrap();
        let second = Formation::new("2nd Squad").unwrap();
        second.add_member(soldier("B1")).unwrap();

        company.add_member(&first).unwrap();
        company.add_member(soldier("Runner")).unwrap();
        company.add_member(&second).unwrap();

        let names: Vec<String> = company.roster().map(|c| c.name().to_string()).collect();
        assert_eq!(
            names,
            vec!["Captain", "Sgt A", "A1", "A2", "Runner", "B1"]
        );
    }

    #[test]
    fn test_roster_of_single_combatant() {
        let jean = soldier("Jean");
        let roster: Vec<Combatant> = Roster::new(UnitRef::from(&jean)).collect();
        assert_eq!(roster.len(), 1);
        assert!(roster[0].ptr_eq(&jean));
    }

    #[test]
    fn test_empty_nested_formations_yield_nothing() {
        let outer = Formation::new("Outer").unwrap();
        outer.add_member(Formation::new("Inner").unwrap()).unwrap();
        assert_eq!(outer.roster().count(), 0);
    }

    #[test]
    fn test_formation_totals_match_aggregates() {
        let company = Formation::with_commander("Company", soldier("Captain")).unwrap();
        let first = Formation::with_commander("1st Squad", soldier("Sgt A")).unwrap();
        first.add_member(soldier("A1")).unwrap();
        let empty = Formation::new("Empty").unwrap();
        first.add_member(&empty).unwrap();
        company.add_member(&first).unwrap();
        company.add_member(soldier("Runner")).unwrap();

        let totals = formation_totals(&UnitRef::from(&company));
        assert_eq!(totals.len(), 3);
        for formation in [&company, &first, &empty] {
            assert_eq!(
                totals[&formation.id()],
                (formation.effective_headcount(), formation.effective_power())
            );
        }
        assert_eq!(totals[&company.id()], (4, 60));
    }

    #[test]
    fn test_formation_totals_of_combatant_is_empty() {
        assert!(formation_totals(&UnitRef::from(&soldier("Jean"))).is_empty());
    }
}
