//! Heist skills and how attributes feed them
//!
//! A skill value is always rebuilt from the base value recorded at
//! recruitment plus attribute modifiers and level. The stored `Skills` of a
//! member is a cache of that calculation.

use serde::{Deserialize, Serialize};

use crate::character::attributes::{Attribute, Attributes};
use crate::character::progression::CharacterProgression;

/// Skill categories tested by encounters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Stealth,
    Athletics,
    Combat,
    Lockpicking,
    Hacking,
    Social,
}

impl Skill {
    pub const ALL: [Skill; 6] = [
        Skill::Stealth,
        Skill::Athletics,
        Skill::Combat,
        Skill::Lockpicking,
        Skill::Hacking,
        Skill::Social,
    ];

    /// The two attributes whose modifiers feed this skill
    pub fn key_attributes(&self) -> (Attribute, Attribute) {
        match self {
            Skill::Stealth => (Attribute::Dexterity, Attribute::Wisdom),
            Skill::Athletics => (Attribute::Strength, Attribute::Constitution),
            Skill::Combat => (Attribute::Strength, Attribute::Dexterity),
            Skill::Lockpicking => (Attribute::Dexterity, Attribute::Intelligence),
            Skill::Hacking => (Attribute::Intelligence, Attribute::Wisdom),
            Skill::Social => (Attribute::Charisma, Attribute::Wisdom),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Skill::Stealth => "stealth",
            Skill::Athletics => "athletics",
            Skill::Combat => "combat",
            Skill::Lockpicking => "lockpicking",
            Skill::Hacking => "hacking",
            Skill::Social => "social",
        }
    }
}

/// Skill values for a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Skills {
    pub stealth: i32,
    pub athletics: i32,
    pub combat: i32,
    pub lockpicking: i32,
    pub hacking: i32,
    pub social: i32,
}

impl Skills {
    pub fn new(
        stealth: i32,
        athletics: i32,
        combat: i32,
        lockpicking: i32,
        hacking: i32,
        social: i32,
    ) -> Self {
        Self {
            stealth,
            athletics,
            combat,
            lockpicking,
            hacking,
            social,
        }
    }

    pub fn get(&self, skill: Skill) -> i32 {
        match skill {
            Skill::Stealth => self.stealth,
            Skill::Athletics => self.athletics,
            Skill::Combat => self.combat,
            Skill::Lockpicking => self.lockpicking,
            Skill::Hacking => self.hacking,
            Skill::Social => self.social,
        }
    }

    pub fn get_mut(&mut self, skill: Skill) -> &mut i32 {
        match skill {
            Skill::Stealth => &mut self.stealth,
            Skill::Athletics => &mut self.athletics,
            Skill::Combat => &mut self.combat,
            Skill::Lockpicking => &mut self.lockpicking,
            Skill::Hacking => &mut self.hacking,
            Skill::Social => &mut self.social,
        }
    }

    pub fn total(&self) -> i32 {
        Skill::ALL.iter().map(|s| self.get(*s)).sum()
    }
}

/// Rebuild every skill from base values, attributes and progression
///
/// Each skill is `base + key attribute modifiers + floor(level / 2)`, social
/// also adds mastery. The sum is clamped at zero per skill.
pub fn calculate_skills(
    attributes: &Attributes,
    progression: &CharacterProgression,
    base_skills: &Skills,
) -> Skills {
    let level_bonus = progression.level as i32 / 2;
    let mut skills = Skills::default();

    for skill in Skill::ALL {
        let (first, second) = skill.key_attributes();
        let mut value = base_skills.get(skill)
            + attributes.modifier(first)
            + attributes.modifier(second)
            + level_bonus;
        if skill == Skill::Social {
            value += progression.mastery_level as i32;
        }
        *skills.get_mut(skill) = value.max(0);
    }

    skills
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_character_keeps_base_skills() {
        let base = Skills::new(3, 2, 1, 0, 4, 2);
        let skills = calculate_skills(&Attributes::default(), &CharacterProgression::new(), &base);
        assert_eq!(skills, base);
    }

    #[test]
    fn test_key_attribute_pairing() {
        let attrs = Attributes {
            dexterity: 14,
            wisdom: 12,
            ..Attributes::default()
        };
        let skills = calculate_skills(&attrs, &CharacterProgression::new(), &Skills::default());
        // dex +2, wis +1
        assert_eq!(skills.stealth, 3);
        assert_eq!(skills.combat, 2);
        assert_eq!(skills.lockpicking, 2);
        assert_eq!(skills.hacking, 1);
        assert_eq!(skills.athletics, 0);
    }

    #[test]
    fn test_level_and_mastery_bonuses() {
        let progression = CharacterProgression {
            level: 5,
            mastery_level: 3,
            ..CharacterProgression::new()
        };
        let skills = calculate_skills(&Attributes::default(), &progression, &Skills::default());
        assert_eq!(skills.stealth, 2);
        assert_eq!(skills.social, 5);
    }

    #[test]
    fn test_skills_clamp_at_zero_independently() {
        let attrs = Attributes {
            strength: 3,
            constitution: 3,
            ..Attributes::default()
        };
        let base = Skills::new(0, 2, 0, 5, 0, 0);
        let skills = calculate_skills(&attrs, &CharacterProgression::new(), &base);
        // 2 - 4 - 4 clamps to zero, other skills are untouched
        assert_eq!(skills.athletics, 0);
        assert_eq!(skills.lockpicking, 5);
    }
}
