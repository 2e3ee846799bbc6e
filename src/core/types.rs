//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for units (combatants and formations)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub Uuid);

impl UnitId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UnitId {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-axis combat statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatLine {
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

impl StatLine {
    pub fn new(attack: u32, defense: u32, speed: u32) -> Self {
        Self { attack, defense, speed }
    }

    /// Scalar power: all three axes combined
    pub fn total(&self) -> u64 {
        self.attack as u64 + self.defense as u64 + self.speed as u64
    }
}

impl std::ops::Add for StatLine {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            attack: self.attack.saturating_add(rhs.attack),
            defense: self.defense.saturating_add(rhs.defense),
            speed: self.speed.saturating_add(rhs.speed),
        }
    }
}
