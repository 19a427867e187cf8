use thiserror::Error;

use crate::character::equipment::EquipmentSlot;
use crate::core::types::{CharacterId, EquipmentId, HeistId};

#[derive(Error, Debug)]
pub enum HeistError {
    #[error("Crew member not found: {0:?}")]
    MemberNotFound(CharacterId),

    #[error("Equipment not found in inventory: {0:?}")]
    EquipmentNotFound(EquipmentId),

    #[error("No active heist with id {0:?}")]
    HeistNotFound(HeistId),

    #[error("Member {member:?} has nothing equipped in the {slot:?} slot")]
    SlotEmpty {
        member: CharacterId,
        slot: EquipmentSlot,
    },

    #[error("Requirement not met: {0}")]
    RequirementNotMet(String),

    #[error("Team size {actual} outside allowed range {min}..={max}")]
    TeamSize { min: usize, max: usize, actual: usize },

    #[error("Crew member {0:?} listed more than once")]
    DuplicateMember(CharacterId),

    #[error("Crew member {0:?} is already on an active heist")]
    MemberBusy(CharacterId),

    #[error("Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: i64, available: i64 },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, HeistError>;
