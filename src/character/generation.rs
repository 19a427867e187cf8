//! Starting attributes for freshly recruited characters

use serde::{Deserialize, Serialize};

use crate::character::attributes::{Attribute, Attributes};
use crate::character::skills::Skills;
use crate::core::dice::Dice;

/// Flat score every attribute starts from
const BASE_ATTRIBUTE: i32 = 10;
const MIN_STARTING_ATTRIBUTE: i32 = 8;
const MAX_STARTING_ATTRIBUTE: i32 = 20;
/// Points per random pick that lands on a class primary attribute
const PRIMARY_PICK_POINTS: i32 = 2;

/// Crew specialisation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Mastermind,
    Muscle,
    Hacker,
    Infiltrator,
    Face,
    Safecracker,
    Driver,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 7] = [
        CharacterClass::Mastermind,
        CharacterClass::Muscle,
        CharacterClass::Hacker,
        CharacterClass::Infiltrator,
        CharacterClass::Face,
        CharacterClass::Safecracker,
        CharacterClass::Driver,
    ];

    /// Fixed attribute bias applied on top of the flat base
    pub fn attribute_bonuses(&self) -> &'static [(Attribute, i32)] {
        use Attribute::*;
        match self {
            CharacterClass::Mastermind => &[(Intelligence, 3), (Wisdom, 3), (Charisma, 2)],
            CharacterClass::Muscle => &[(Strength, 4), (Constitution, 3), (Dexterity, 1)],
            CharacterClass::Hacker => &[(Intelligence, 4), (Wisdom, 2), (Dexterity, 1)],
            CharacterClass::Infiltrator => &[(Dexterity, 4), (Wisdom, 2), (Intelligence, 1)],
            CharacterClass::Face => &[(Charisma, 4), (Wisdom, 2), (Intelligence, 1)],
            CharacterClass::Safecracker => &[(Dexterity, 3), (Intelligence, 3), (Wisdom, 1)],
            CharacterClass::Driver => &[(Dexterity, 3), (Constitution, 2), (Wisdom, 2)],
        }
    }

    /// Attributes that receive double points from the rarity pool
    pub fn primary_attributes(&self) -> [Attribute; 2] {
        use Attribute::*;
        match self {
            CharacterClass::Mastermind => [Intelligence, Charisma],
            CharacterClass::Muscle => [Strength, Constitution],
            CharacterClass::Hacker => [Intelligence, Wisdom],
            CharacterClass::Infiltrator => [Dexterity, Wisdom],
            CharacterClass::Face => [Charisma, Wisdom],
            CharacterClass::Safecracker => [Dexterity, Intelligence],
            CharacterClass::Driver => [Dexterity, Constitution],
        }
    }

    /// Trained skill values recorded at recruitment
    pub fn base_skills(&self) -> Skills {
        match self {
            CharacterClass::Mastermind => Skills::new(2, 1, 1, 2, 3, 4),
            CharacterClass::Muscle => Skills::new(0, 4, 5, 1, 0, 1),
            CharacterClass::Hacker => Skills::new(1, 0, 0, 2, 6, 1),
            CharacterClass::Infiltrator => Skills::new(6, 3, 1, 2, 0, 1),
            CharacterClass::Face => Skills::new(2, 1, 0, 0, 1, 6),
            CharacterClass::Safecracker => Skills::new(2, 0, 0, 6, 2, 0),
            CharacterClass::Driver => Skills::new(1, 4, 2, 1, 1, 1),
        }
    }
}

/// How exceptional a recruit or item is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Attribute points distributed at generation
    pub fn bonus_points(&self) -> i32 {
        match self {
            Rarity::Common => 0,
            Rarity::Uncommon => 2,
            Rarity::Rare => 4,
            Rarity::Epic => 6,
            Rarity::Legendary => 8,
        }
    }

    /// Hiring cost of a recruit of this rarity
    pub fn recruit_cost(&self) -> i64 {
        match self {
            Rarity::Common => 500,
            Rarity::Uncommon => 1_000,
            Rarity::Rare => 2_000,
            Rarity::Epic => 4_000,
            Rarity::Legendary => 8_000,
        }
    }
}

/// Roll starting attributes for a class and rarity
///
/// Flat base, then the class bias, then the rarity pool spent on random
/// attributes (primary attributes take two points per pick). Scores end up
/// in 8..=20.
pub fn generate_starting_attributes(
    class: CharacterClass,
    rarity: Rarity,
    dice: &mut impl Dice,
) -> Attributes {
    let mut attributes = Attributes::uniform(BASE_ATTRIBUTE);

    for (attribute, bonus) in class.attribute_bonuses() {
        *attributes.get_mut(*attribute) += bonus;
    }

    let primaries = class.primary_attributes();
    let mut pool = rarity.bonus_points();
    while pool > 0 {
        let attribute = Attribute::ALL[dice.pick(Attribute::ALL.len())];
        let points = if primaries.contains(&attribute) {
            PRIMARY_PICK_POINTS.min(pool)
        } else {
            1
        };
        *attributes.get_mut(attribute) += points;
        pool -= points;
    }

    for attribute in Attribute::ALL {
        let score = attributes.get_mut(attribute);
        *score = (*score).clamp(MIN_STARTING_ATTRIBUTE, MAX_STARTING_ATTRIBUTE);
    }

    attributes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dice::{ScriptedDice, SeededDice};

    #[test]
    fn test_class_bias_is_eight_points() {
        for class in CharacterClass::ALL {
            let total: i32 = class.attribute_bonuses().iter().map(|(_, b)| b).sum();
            assert_eq!(total, 8, "{:?}", class);
        }
    }

    #[test]
    fn test_common_muscle_is_deterministic() {
        let mut dice = SeededDice::seeded(3);
        let attrs = generate_starting_attributes(CharacterClass::Muscle, Rarity::Common, &mut dice);
        assert_eq!(attrs.strength, 14);
        assert_eq!(attrs.constitution, 13);
        assert_eq!(attrs.dexterity, 11);
        assert_eq!(attrs.intelligence, 10);
    }

    #[test]
    fn test_rarity_pool_fully_spent() {
        for seed in 0..200 {
            let mut dice = SeededDice::seeded(seed);
            let attrs = generate_starting_attributes(CharacterClass::Face, Rarity::Epic, &mut dice);
            // 60 base + 8 class + 6 pool; charisma tops out at exactly 20
            assert_eq!(attrs.total(), 74);
        }
    }

    #[test]
    fn test_primary_pick_gets_two_points() {
        // index 0 is strength, a muscle primary
        let mut dice = ScriptedDice::always(10).with_pick(0);
        let attrs = generate_starting_attributes(CharacterClass::Muscle, Rarity::Rare, &mut dice);
        assert_eq!(attrs.strength, 18);
    }

    #[test]
    fn test_scores_capped_at_twenty() {
        let mut dice = ScriptedDice::always(10).with_pick(0);
        let attrs =
            generate_starting_attributes(CharacterClass::Muscle, Rarity::Legendary, &mut dice);
        assert_eq!(attrs.strength, 20);
    }

    #[test]
    fn test_scores_never_below_minimum() {
        for class in CharacterClass::ALL {
            let mut dice = SeededDice::seeded(11);
            let attrs = generate_starting_attributes(class, Rarity::Epic, &mut dice);
            for attribute in Attribute::ALL {
                assert!(attrs.get(attribute) >= MIN_STARTING_ATTRIBUTE);
                assert!(attrs.get(attribute) <= MAX_STARTING_ATTRIBUTE);
            }
        }
    }
}
