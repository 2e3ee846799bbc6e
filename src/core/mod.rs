pub mod config;
pub mod error;
pub mod types;

pub use config::{RecruitmentConfig, RollTable, StatRange};
pub use error::{ArmyError, Result};
pub use types::{StatLine, UnitId};
