//! Tree rendering as a lazy sequence of display lines
//!
//! ```text
//! ┌─ Alpha (headcount: 3, power: 95)
//!   └─ Commander: Captain Hugo [A:20 D:20 S:20 XP:0] equipment: none
//!   └─ Private Jean [A:15 D:10 S:10 XP:0] equipment: Rifle
//!   ┌─ Bravo (headcount: 1, power: 30)
//!     └─ Private Paul [A:10 D:10 S:10 XP:0] equipment: none
//! ```

use std::collections::HashMap;

use crate::army::roster::formation_totals;
use crate::army::unit::{Unit, UnitRef};
use crate::core::types::UnitId;

const INDENT: &str = "  ";

#[derive(Debug, Clone)]
struct Frame {
    unit: UnitRef,
    depth: usize,
    commander: bool,
}

/// Pre-order, depth-first display lines for a unit
///
/// Nothing is computed until a line is requested, and a fresh call to
/// `render()` always starts again from the current tree. Formation totals
/// for the whole tree are taken once, when the first header is produced.
#[derive(Debug, Clone)]
pub struct RenderLines {
    root: UnitRef,
    stack: Vec<Frame>,
    totals: Option<HashMap<UnitId, (usize, u64)>>,
}

impl RenderLines {
    pub fn new(root: UnitRef) -> Self {
        Self {
            stack: vec![Frame {
                unit: root.clone(),
                depth: 0,
                commander: false,
            }],
            root,
            totals: None,
        }
    }
}

impl Iterator for RenderLines {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let frame = self.stack.pop()?;
        let indent = INDENT.repeat(frame.depth);

        let line = match &frame.unit {
            UnitRef::Combatant(combatant) => {
                let role = if frame.commander { "Commander: " } else { "" };
                format!("{}└─ {}{}", indent, role, combatant.describe())
            }
            UnitRef::Formation(formation) => {
                let depth = frame.depth + 1;
                self.stack.extend(formation.members().into_iter().rev().map(|unit| Frame {
                    unit,
                    depth,
                    commander: false,
                }));
                if let Some(commander) = formation.commander() {
                    self.stack.push(Frame {
                        unit: UnitRef::Combatant(commander),
                        depth,
                        commander: true,
                    });
                }
                let root = &self.root;
                let totals = self.totals.get_or_insert_with(|| formation_totals(root));
                let (headcount, power) = match totals.get(&formation.id()) {
                    Some(&cached) => cached,
                    // Attached after the totals were taken
                    None => (formation.effective_headcount(), formation.effective_power()),
                };
                format!(
                    "{}┌─ {} (headcount: {}, power: {})",
                    indent,
                    formation.name(),
                    headcount,
                    power
                )
            }
        };
        Some(line)
    }
}
