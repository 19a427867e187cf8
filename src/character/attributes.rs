//! Core attributes and the stats derived from them
//!
//! Six attributes in the familiar 3–20 range. Everything else about a
//! character (health, initiative, skill values) is computed from these,
//! never stored independently.

use serde::{Deserialize, Serialize};

/// One of the six core attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Strength,
    Dexterity,
    Intelligence,
    Wisdom,
    Charisma,
    Constitution,
}

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Attribute::Strength,
        Attribute::Dexterity,
        Attribute::Intelligence,
        Attribute::Wisdom,
        Attribute::Charisma,
        Attribute::Constitution,
    ];
}

/// Attribute scores for a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: i32,
    pub dexterity: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
    pub constitution: i32,
}

impl Attributes {
    pub fn new(
        strength: i32,
        dexterity: i32,
        intelligence: i32,
        wisdom: i32,
        charisma: i32,
        constitution: i32,
    ) -> Self {
        Self {
            strength,
            dexterity,
            intelligence,
            wisdom,
            charisma,
            constitution,
        }
    }

    /// Every attribute at the same score
    pub fn uniform(score: i32) -> Self {
        Self::new(score, score, score, score, score, score)
    }

    pub fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Intelligence => self.intelligence,
            Attribute::Wisdom => self.wisdom,
            Attribute::Charisma => self.charisma,
            Attribute::Constitution => self.constitution,
        }
    }

    pub fn get_mut(&mut self, attribute: Attribute) -> &mut i32 {
        match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Dexterity => &mut self.dexterity,
            Attribute::Intelligence => &mut self.intelligence,
            Attribute::Wisdom => &mut self.wisdom,
            Attribute::Charisma => &mut self.charisma,
            Attribute::Constitution => &mut self.constitution,
        }
    }

    /// Modifier for a single attribute
    pub fn modifier(&self, attribute: Attribute) -> i32 {
        get_attribute_modifier(self.get(attribute))
    }

    pub fn total(&self) -> i32 {
        Attribute::ALL.iter().map(|a| self.get(*a)).sum()
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::uniform(10)
    }
}

/// `floor((score - 10) / 2)`, rounding toward negative infinity
pub fn get_attribute_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// Stats that are a pure function of attributes and level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub health: i32,
    pub stamina: i32,
    pub initiative: i32,
    pub carrying_capacity: i32,
    /// Probability in 0.05..; never below 5%
    pub critical_chance: f64,
    pub critical_multiplier: f64,
}

/// Minimum numerator of the critical chance, in percent
const CRITICAL_CHANCE_FLOOR: i32 = 5;

pub fn calculate_derived_stats(attributes: &Attributes, level: u32) -> DerivedStats {
    let str_mod = attributes.modifier(Attribute::Strength);
    let dex_mod = attributes.modifier(Attribute::Dexterity);
    let int_mod = attributes.modifier(Attribute::Intelligence);
    let wis_mod = attributes.modifier(Attribute::Wisdom);
    let cha_mod = attributes.modifier(Attribute::Charisma);
    let con_mod = attributes.modifier(Attribute::Constitution);
    let level = level as i32;

    DerivedStats {
        health: 10 + con_mod + level * (2 + con_mod),
        stamina: 10 + con_mod + str_mod,
        initiative: dex_mod + wis_mod,
        carrying_capacity: attributes.strength * 15,
        // Clamp the percentage numerator first, then scale
        critical_chance: (dex_mod + int_mod).max(CRITICAL_CHANCE_FLOOR) as f64 / 100.0,
        critical_multiplier: 1.5 + cha_mod as f64 * 0.1,
    }
}
