//! Recruitment configuration with documented roll tables
//!
//! Every stat roll used by the recruitment helpers is collected here so a
//! campaign can retune unit quality from a TOML file without code changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ArmyError, Result};

/// Inclusive range for a single stat roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRange {
    pub min: u32,
    pub max: u32,
}

impl StatRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Roll ranges for the three combat axes of one grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollTable {
    pub attack: StatRange,
    pub defense: StatRange,
    pub speed: StatRange,
}

impl RollTable {
    pub const fn uniform(range: StatRange) -> Self {
        Self {
            attack: range,
            defense: range,
            speed: range,
        }
    }

    fn validate(&self, grade: &str) -> Result<()> {
        for (axis, range) in [
            ("attack", self.attack),
            ("defense", self.defense),
            ("speed", self.speed),
        ] {
            if range.min > range.max {
                return Err(ArmyError::Config(format!(
                    "{grade}.{axis}: min ({}) should be <= max ({})",
                    range.min, range.max
                )));
            }
        }
        Ok(())
    }
}

/// Configuration for the recruitment rolls
///
/// Missing tables in a TOML file fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecruitmentConfig {
    /// Line troops
    ///
    /// Every axis in [5, 15]: an average recruit lands around 30 power.
    pub standard: RollTable,

    /// Special forces
    ///
    /// Attack and defense in [9, 25], speed in [10, 25]. Elite rolls never
    /// fall below the standard median.
    pub elite: RollTable,

    /// Officers and commanders
    ///
    /// Every axis in [15, 30], so an officer always matches or beats the
    /// best standard recruit on each axis.
    pub officer: RollTable,
}

impl Default for RecruitmentConfig {
    fn default() -> Self {
        Self {
            standard: RollTable::uniform(StatRange::new(5, 15)),
            elite: RollTable {
                attack: StatRange::new(9, 25),
                defense: StatRange::new(9, 25),
                speed: StatRange::new(10, 25),
            },
            officer: RollTable::uniform(StatRange::new(15, 30)),
        }
    }
}

impl RecruitmentConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RecruitmentConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ArmyError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        self.standard.validate("standard")?;
        self.elite.validate("elite")?;
        self.officer.validate("officer")?;
        Ok(())
    }
}
