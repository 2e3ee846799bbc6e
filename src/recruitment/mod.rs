//! Recruitment: rolling new combatants from grade tables
//!
//! The random source is injected, so a seeded `ChaCha8Rng` reproduces the
//! same army on every run. Recruits are built through the public
//! `Combatant`/`Formation` API like any other caller.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::army::{Combatant, Formation, Unit};
use crate::core::config::{RecruitmentConfig, RollTable, StatRange};
use crate::core::error::Result;
use crate::core::types::StatLine;

/// Which roll table a recruit is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Standard,
    Elite,
    Officer,
}

impl Grade {
    /// Rank given to recruits of this grade when none is specified
    pub fn default_rank(&self) -> &'static str {
        match self {
            Grade::Standard => "Private",
            Grade::Elite => "Specialist",
            Grade::Officer => "Lieutenant",
        }
    }
}

/// Produces combatants with rolled stats
#[derive(Debug, Clone)]
pub struct Recruiter<R: Rng> {
    rng: R,
    config: RecruitmentConfig,
}

impl Recruiter<ChaCha8Rng> {
    /// Deterministic recruiter: equal seeds give equal recruits
    pub fn seeded(seed: u64, config: RecruitmentConfig) -> Result<Self> {
        Self::new(ChaCha8Rng::seed_from_u64(seed), config)
    }
}

impl<R: Rng> Recruiter<R> {
    pub fn new(rng: R, config: RecruitmentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { rng, config })
    }

    pub fn config(&self) -> &RecruitmentConfig {
        &self.config
    }

    fn table(&self, grade: Grade) -> RollTable {
        match grade {
            Grade::Standard => self.config.standard,
            Grade::Elite => self.config.elite,
            Grade::Officer => self.config.officer,
        }
    }

    fn roll_range(&mut self, range: StatRange) -> u32 {
        self.rng.gen_range(range.min..=range.max)
    }

    /// Roll attack, defense and speed for one recruit
    pub fn roll(&mut self, grade: Grade) -> StatLine {
        let table = self.table(grade);
        let attack = self.roll_range(table.attack);
        let defense = self.roll_range(table.defense);
        let speed = self.roll_range(table.speed);
        StatLine::new(attack, defense, speed)
    }

    pub fn recruit(
        &mut self,
        name: impl Into<String>,
        rank: impl Into<String>,
        grade: Grade,
    ) -> Result<Combatant> {
        let stats = self.roll(grade);
        let combatant = Combatant::new(name, stats.attack, stats.defense, stats.speed, rank)?;
        tracing::debug!(
            name = %combatant.name(),
            ?grade,
            power = stats.total(),
            "Recruited"
        );
        Ok(combatant)
    }

    /// Raise a formation: an officer-grade leader plus `recruits` of `grade`
    pub fn raise_squad(
        &mut self,
        squad_name: &str,
        leader: &str,
        recruits: &[&str],
        grade: Grade,
    ) -> Result<Formation> {
        let commander = self.recruit(leader, "Sergeant", Grade::Officer)?;
        let squad = Formation::with_commander(squad_name, commander)?;
        for name in recruits {
            let recruit = self.recruit(*name, grade.default_rank(), grade)?;
            squad.add_member(recruit)?;
        }
        Ok(squad)
    }
}
