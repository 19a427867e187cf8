//! Crew members: identity, stored state and recomputed views

use serde::{Deserialize, Serialize};

use crate::character::attributes::{calculate_derived_stats, Attributes, DerivedStats};
use crate::character::equipment::Loadout;
use crate::character::generation::{generate_starting_attributes, CharacterClass, Rarity};
use crate::character::progression::CharacterProgression;
use crate::character::skills::{calculate_skills, Skills};
use crate::core::dice::Dice;
use crate::core::types::CharacterId;

pub const MAX_FATIGUE: i32 = 100;
pub const MAX_LOYALTY: i32 = 100;
const DEFAULT_LOYALTY: i32 = 60;

/// Personality traits that color how a member's exploits are told
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    Optimistic,
    Cynical,
    Methodical,
    Reckless,
    Greedy,
    Loyal,
}

/// A recruited character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: CharacterId,
    pub name: String,
    pub class: CharacterClass,
    pub rarity: Rarity,
    #[serde(default)]
    pub personality: Vec<Personality>,
    #[serde(default)]
    pub special_ability: String,
    pub attributes: Attributes,
    /// Skill values recorded at recruitment
    pub base_skills: Skills,
    /// Cached result of `calculate_skills`
    pub skills: Skills,
    pub progression: CharacterProgression,
    #[serde(default)]
    pub equipment: Loadout,
    /// Cached result of `calculate_derived_stats`
    pub derived_stats: DerivedStats,
    /// 0–100
    pub fatigue: i32,
    /// 0–100
    pub loyalty: i32,
    #[serde(default)]
    pub injuries: Vec<String>,
    pub cost: i64,
}

impl TeamMember {
    pub fn new(
        name: impl Into<String>,
        class: CharacterClass,
        rarity: Rarity,
        attributes: Attributes,
        base_skills: Skills,
    ) -> Self {
        let progression = CharacterProgression::new();
        Self {
            id: CharacterId::new(),
            name: name.into(),
            class,
            rarity,
            personality: Vec::new(),
            special_ability: String::new(),
            skills: calculate_skills(&attributes, &progression, &base_skills),
            derived_stats: calculate_derived_stats(&attributes, progression.level),
            attributes,
            base_skills,
            progression,
            equipment: Loadout::new(),
            fatigue: 0,
            loyalty: DEFAULT_LOYALTY,
            injuries: Vec::new(),
            cost: rarity.recruit_cost(),
        }
    }

    /// Roll a fresh recruit from a class template
    pub fn generate(
        name: impl Into<String>,
        class: CharacterClass,
        rarity: Rarity,
        dice: &mut impl Dice,
    ) -> Self {
        let attributes = generate_starting_attributes(class, rarity, dice);
        Self::new(name, class, rarity, attributes, class.base_skills())
    }

    pub fn with_personality(mut self, trait_: Personality) -> Self {
        self.personality.push(trait_);
        self
    }

    pub fn with_special_ability(mut self, ability: impl Into<String>) -> Self {
        self.special_ability = ability.into();
        self
    }

    pub fn with_loyalty(mut self, loyalty: i32) -> Self {
        self.loyalty = loyalty.clamp(0, MAX_LOYALTY);
        self
    }

    pub fn with_fatigue(mut self, fatigue: i32) -> Self {
        self.fatigue = fatigue.clamp(0, MAX_FATIGUE);
        self
    }

    pub fn with_progression(mut self, progression: CharacterProgression) -> Self {
        self.progression = progression;
        self.refresh();
        self
    }

    /// Recompute skills and derived stats after attributes or level changed
    pub fn refresh(&mut self) {
        self.skills = calculate_skills(&self.attributes, &self.progression, &self.base_skills);
        self.derived_stats = calculate_derived_stats(&self.attributes, self.progression.level);
    }

    pub fn has_trait(&self, trait_: Personality) -> bool {
        self.personality.contains(&trait_)
    }

    pub fn add_fatigue(&mut self, amount: i32, cap: i32) {
        self.fatigue = (self.fatigue + amount).clamp(0, cap);
    }

    /// Recover fatigue between missions
    pub fn rest(&mut self, amount: i32) {
        self.fatigue = (self.fatigue - amount).max(0);
    }
}

/// Rough strength rating for eligibility checks and display
///
/// Sum of attributes and skills, five per equipped item and two per level.
pub fn calculate_power_level(member: &TeamMember) -> i32 {
    member.attributes.total()
        + member.skills.total()
        + 5 * member.equipment.equipped_count() as i32
        + 2 * member.progression.level as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::equipment::{apply_equipment_bonuses, Equipment, EquipmentSlot};
    use crate::character::progression::level_up_character;
    use crate::character::skills::Skill;
    use crate::character::attributes::Attribute;

    fn infiltrator() -> TeamMember {
        TeamMember::new(
            "Vex",
            CharacterClass::Infiltrator,
            Rarity::Common,
            Attributes::new(10, 14, 11, 12, 10, 10),
            CharacterClass::Infiltrator.base_skills(),
        )
    }

    #[test]
    fn test_new_member_has_computed_skills() {
        let member = infiltrator();
        // base 6 + dex 2 + wis 1
        assert_eq!(member.skills.stealth, 9);
        assert_eq!(member.derived_stats.initiative, 3);
        assert_eq!(member.cost, 500);
    }

    #[test]
    fn test_power_level() {
        let mut member = infiltrator();
        let base = member.attributes.total() + member.skills.total() + 2;
        assert_eq!(calculate_power_level(&member), base);

        member
            .equipment
            .equip(Equipment::new("Soft Shoes", EquipmentSlot::Accessory, Rarity::Common));
        assert_eq!(calculate_power_level(&member), base + 5);
    }

    #[test]
    fn test_equipment_bonuses_do_not_touch_original() {
        let mut member = infiltrator();
        member.equipment.equip(
            Equipment::new("Climbing Rig", EquipmentSlot::Tool, Rarity::Rare)
                .with_attribute_bonus(Attribute::Strength, 4)
                .with_skill_bonus(Skill::Athletics, 3),
        );

        let enhanced = apply_equipment_bonuses(&member);
        assert_eq!(enhanced.attributes.strength, 14);
        assert_eq!(enhanced.skills.athletics, member.skills.athletics + 3);
        assert_eq!(enhanced.derived_stats.carrying_capacity, 14 * 15);

        assert_eq!(member.attributes.strength, 10);
        assert_eq!(member.derived_stats.carrying_capacity, 150);
    }

    #[test]
    fn test_level_up_character_refreshes_skills() {
        let member = TeamMember {
            progression: CharacterProgression {
                experience: 150,
                ..CharacterProgression::new()
            },
            ..infiltrator()
        };
        let leveled = level_up_character(&member);
        assert_eq!(leveled.progression.level, 2);
        assert_eq!(leveled.progression.experience, 50);
        assert_eq!(leveled.skills.stealth, member.skills.stealth + 1);
        assert_eq!(member.progression.level, 1);
    }

    #[test]
    fn test_fatigue_bounds() {
        let mut member = infiltrator().with_fatigue(90);
        member.add_fatigue(30, MAX_FATIGUE);
        assert_eq!(member.fatigue, 100);
        member.rest(150);
        assert_eq!(member.fatigue, 0);
    }

    #[test]
    fn test_generated_member_is_consistent() {
        let mut dice = crate::core::dice::SeededDice::seeded(99);
        let member =
            TeamMember::generate("Rook", CharacterClass::Safecracker, Rarity::Rare, &mut dice);
        assert_eq!(member.base_skills, CharacterClass::Safecracker.base_skills());
        assert_eq!(
            member.skills,
            calculate_skills(&member.attributes, &member.progression, &member.base_skills)
        );
        assert_eq!(member.cost, 2_000);
    }
}
