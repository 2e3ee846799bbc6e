use thiserror::Error;

use crate::core::types::UnitId;

#[derive(Error, Debug)]
pub enum ArmyError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Cycle: {unit} cannot be placed under {formation}")]
    Cycle { unit: String, formation: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unit {name} ({id:?}) already belongs to {owner}")]
    AlreadyAssigned { id: UnitId, name: String, owner: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ArmyError>;
