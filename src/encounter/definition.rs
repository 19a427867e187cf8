//! Encounter definitions: the individual obstacles inside a heist

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::character::attributes::Attribute;
use crate::character::equipment::EquipmentSlot;
use crate::character::skills::Skill;

/// How involved an encounter is; descriptive only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    #[default]
    Simple,
    Moderate,
    Complex,
    Extreme,
}

/// Site conditions that shift specific skill checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnvironmentalFactor {
    Crowded,
    WellLit,
    Noisy,
    HighSecurity,
    Electronic,
    /// Any tag this engine does not model; contributes nothing
    #[serde(other)]
    Other,
}

/// A single skill check inside a mission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Encounter {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub primary_skill: Skill,
    #[serde(default)]
    pub primary_attribute: Option<Attribute>,
    /// Difficulty class the total must reach
    pub difficulty: i32,
    #[serde(default)]
    pub complexity: Complexity,
    #[serde(default)]
    pub environmental_factors: Vec<EnvironmentalFactor>,
    /// Flat bonus for having something equipped in the given slot
    #[serde(default)]
    pub equipment_bonuses: AHashMap<EquipmentSlot, i32>,
}

impl Encounter {
    pub fn new(name: impl Into<String>, primary_skill: Skill, difficulty: i32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            primary_skill,
            primary_attribute: None,
            difficulty,
            complexity: Complexity::default(),
            environmental_factors: Vec::new(),
            equipment_bonuses: AHashMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_primary_attribute(mut self, attribute: Attribute) -> Self {
        self.primary_attribute = Some(attribute);
        self
    }

    pub fn with_complexity(mut self, complexity: Complexity) -> Self {
        self.complexity = complexity;
        self
    }

    pub fn with_factor(mut self, factor: EnvironmentalFactor) -> Self {
        self.environmental_factors.push(factor);
        self
    }

    pub fn with_equipment_bonus(mut self, slot: EquipmentSlot, bonus: i32) -> Self {
        self.equipment_bonuses.insert(slot, bonus);
        self
    }
}
