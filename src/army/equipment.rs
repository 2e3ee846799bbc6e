//! Equipment: named, immutable stat modifiers
//!
//! Equipment is a plain value. Two items with the same name and bonuses are
//! interchangeable, so a combatant may carry several equal items and
//! `unequip` removes whichever comes first.

use serde::{Deserialize, Serialize};

use crate::core::error::{ArmyError, Result};
use crate::core::types::StatLine;

/// Additive bonuses granted to the combatant carrying this item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Equipment {
    name: String,
    attack_bonus: u32,
    defense_bonus: u32,
    speed_bonus: u32,
}

impl Equipment {
    pub fn new(
        name: impl Into<String>,
        attack_bonus: u32,
        defense_bonus: u32,
        speed_bonus: u32,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ArmyError::InvalidArgument(
                "equipment name must not be blank".into(),
            ));
        }
        Ok(Self {
            name,
            attack_bonus,
            defense_bonus,
            speed_bonus,
        })
    }

    /// Common equipment: Rifle (+5 attack)
    pub fn rifle() -> Self {
        Self::preset("Rifle", 5, 0, 0)
    }

    /// Common equipment: Bulletproof vest (+5 defense)
    pub fn vest() -> Self {
        Self::preset("Vest", 0, 5, 0)
    }

    /// Common equipment: Officer boots (+5 speed)
    pub fn boots() -> Self {
        Self::preset("Boots", 0, 0, 5)
    }

    fn preset(name: &str, attack_bonus: u32, defense_bonus: u32, speed_bonus: u32) -> Self {
        Self {
            name: name.to_string(),
            attack_bonus,
            defense_bonus,
            speed_bonus,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attack_bonus(&self) -> u32 {
        self.attack_bonus
    }

    pub fn defense_bonus(&self) -> u32 {
        self.defense_bonus
    }

    pub fn speed_bonus(&self) -> u32 {
        self.speed_bonus
    }

    /// Bonuses as a per-axis stat line
    pub fn bonus(&self) -> StatLine {
        StatLine::new(self.attack_bonus, self.defense_bonus, self.speed_bonus)
    }

    /// Contribution to scalar power
    pub fn total_bonus(&self) -> u64 {
        self.bonus().total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(Equipment::rifle().bonus(), StatLine::new(5, 0, 0));
        assert_eq!(Equipment::vest().bonus(), StatLine::new(0, 5, 0));
        assert_eq!(Equipment::boots().bonus(), StatLine::new(0, 0, 5));
        assert_eq!(Equipment::rifle().name(), "Rifle");
    }

    #[test]
    fn test_total_bonus_sums_all_axes() {
        let kit = Equipment::new("Power armor", 3, 8, 2).unwrap();
        assert_eq!(kit.total_bonus(), 13);
    }

    #[test]
    fn test_zero_bonus_allowed() {
        let flag = Equipment::new("Banner", 0, 0, 0).unwrap();
        assert_eq!(flag.total_bonus(), 0);
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = Equipment::new("  ", 1, 1, 1).unwrap_err();
        assert!(matches!(err, ArmyError::InvalidArgument(_)));
    }

    #[test]
    fn test_equality_is_by_value() {
        let custom = Equipment::new("Rifle", 5, 0, 0).unwrap();
        assert_eq!(custom, Equipment::rifle());
        assert_ne!(Equipment::new("Rifle", 6, 0, 0).unwrap(), Equipment::rifle());
    }
}
