//! Identifier types shared across the crate

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a crew member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a piece of equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EquipmentId(pub Uuid);

impl EquipmentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EquipmentId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a heist definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeistId(pub Uuid);

impl HeistId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for HeistId {
    fn default() -> Self {
        Self::new()
    }
}

/// Mission clock unit (seconds of real time)
pub type Seconds = u64;
