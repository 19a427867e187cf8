//! Encounter resolution: one d20 check of a member against an encounter
//!
//! total = roll + skill + attribute modifier + equipment + proficiency
//!         + condition modifiers + environment
//!
//! Natural 1 and natural 20 override the total. Resolution does not touch
//! the member; a rolled injury is returned in the result and applied by the
//! caller.

use serde::{Deserialize, Serialize};

use crate::character::attributes::get_attribute_modifier;
use crate::character::member::TeamMember;
use crate::core::dice::Dice;
use crate::core::types::CharacterId;
use crate::encounter::constants::*;
use crate::encounter::definition::Encounter;
use crate::encounter::narrative;

/// Graded result of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    CriticalSuccess,
    Success,
    Neutral,
    Failure,
    CriticalFailure,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::CriticalSuccess | Outcome::Success)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure | Outcome::CriticalFailure)
    }

    pub fn experience(&self, difficulty: i32) -> i32 {
        match self {
            Outcome::CriticalSuccess => difficulty * 3,
            Outcome::Success => difficulty * 2,
            Outcome::Neutral => difficulty,
            Outcome::Failure => difficulty.div_euclid(2),
            Outcome::CriticalFailure => difficulty.div_euclid(4),
        }
    }

    pub fn stress(&self, difficulty: i32) -> i32 {
        match self {
            Outcome::CriticalSuccess => 0,
            Outcome::Success => difficulty.div_euclid(2),
            Outcome::Neutral => difficulty,
            Outcome::Failure => difficulty * 2,
            Outcome::CriticalFailure => difficulty * 3,
        }
    }

    /// Chance that this outcome leaves the member injured
    pub fn injury_chance(&self) -> f64 {
        match self {
            Outcome::Failure => FAILURE_INJURY_CHANCE,
            Outcome::CriticalFailure => CRITICAL_FAILURE_INJURY_CHANCE,
            _ => 0.0,
        }
    }
}

/// Full breakdown of one resolved encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterResult {
    pub encounter: String,
    pub member_id: CharacterId,
    pub roll: i32,
    pub attribute_modifier: i32,
    /// The member's value in the encounter's primary skill
    pub skill_bonus: i32,
    pub equipment_bonus: i32,
    pub proficiency_bonus: i32,
    /// Fatigue, loyalty and injury adjustments
    pub situational_modifiers: i32,
    pub environmental_modifier: i32,
    pub total: i32,
    pub outcome: Outcome,
    pub experience_gained: i32,
    pub stress_inflicted: i32,
    pub narrative_description: String,
    /// Injury sustained during this encounter, to be appended by the caller
    pub injury: Option<String>,
}

const MINOR_INJURIES: [&str; 4] = [
    "sprained wrist",
    "bruised ribs",
    "twisted ankle",
    "cut hand",
];

const MAJOR_INJURIES: [&str; 4] = [
    "broken arm",
    "concussion",
    "gunshot graze",
    "cracked ribs",
];

/// Attribute contribution to a check
///
/// An explicit primary attribute replaces the skill's two key attributes.
pub fn attribute_modifier(member: &TeamMember, encounter: &Encounter) -> i32 {
    match encounter.primary_attribute {
        Some(attribute) => get_attribute_modifier(member.attributes.get(attribute)),
        None => {
            let (first, second) = encounter.primary_skill.key_attributes();
            member.attributes.modifier(first) + member.attributes.modifier(second)
        }
    }
}

/// Equipment contribution: item skill bonuses plus encounter slot bonuses
pub fn equipment_bonus(member: &TeamMember, encounter: &Encounter) -> i32 {
    member
        .equipment
        .items()
        .map(|item| {
            item.skill_bonus(encounter.primary_skill)
                + encounter.equipment_bonuses.get(&item.slot).copied().unwrap_or(0)
        })
        .sum()
}

/// Fatigue, loyalty and injury adjustments for a member's current condition
pub fn situational_modifiers(member: &TeamMember) -> i32 {
    let mut modifier = 0;

    if member.fatigue > FATIGUE_PENALTY_THRESHOLD {
        modifier -= (member.fatigue - FATIGUE_PENALTY_THRESHOLD).div_euclid(FATIGUE_PENALTY_STEP);
    }

    if member.loyalty > HIGH_LOYALTY_THRESHOLD {
        modifier += HIGH_LOYALTY_BONUS;
    } else if member.loyalty < LOW_LOYALTY_THRESHOLD {
        modifier -= LOW_LOYALTY_PENALTY;
    }

    for injury in &member.injuries {
        if injury.contains(MAJOR_INJURY_MARKER) {
            modifier -= MAJOR_INJURY_PENALTY;
        }
        if injury.contains(MINOR_INJURY_MARKER) {
            modifier -= MINOR_INJURY_PENALTY;
        }
    }

    modifier
}

/// `floor((level - 1) / 4) + 2`
pub fn proficiency_bonus(level: u32) -> i32 {
    (level as i32 - 1).div_euclid(PROFICIENCY_LEVEL_STEP) + BASE_PROFICIENCY
}

/// Grade a check; natural rolls take priority over the total
pub fn grade(roll: i32, total: i32, difficulty: i32) -> Outcome {
    if roll == NATURAL_FUMBLE {
        Outcome::CriticalFailure
    } else if roll == NATURAL_CRITICAL {
        Outcome::CriticalSuccess
    } else if total >= difficulty + CRITICAL_SUCCESS_MARGIN {
        Outcome::CriticalSuccess
    } else if total >= difficulty + SUCCESS_MARGIN {
        Outcome::Success
    } else if total >= difficulty {
        Outcome::Neutral
    } else if total >= difficulty - FAILURE_MARGIN {
        Outcome::Failure
    } else {
        Outcome::CriticalFailure
    }
}

fn roll_injury(outcome: Outcome, dice: &mut impl Dice) -> Option<String> {
    let chance = outcome.injury_chance();
    if chance <= 0.0 || !dice.chance(chance) {
        return None;
    }
    let injury = match outcome {
        Outcome::CriticalFailure => format!(
            "{} injury: {}",
            MAJOR_INJURY_MARKER,
            MAJOR_INJURIES[dice.pick(MAJOR_INJURIES.len())]
        ),
        _ => format!(
            "{} injury: {}",
            MINOR_INJURY_MARKER,
            MINOR_INJURIES[dice.pick(MINOR_INJURIES.len())]
        ),
    };
    Some(injury)
}

/// Resolve one encounter for one member
pub fn resolve_encounter(
    member: &TeamMember,
    encounter: &Encounter,
    environmental_modifier: i32,
    dice: &mut impl Dice,
) -> EncounterResult {
    let roll = dice.d20();
    let skill_bonus = member.skills.get(encounter.primary_skill);
    let attribute_modifier = attribute_modifier(member, encounter);
    let equipment_bonus = equipment_bonus(member, encounter);
    let situational_modifiers = situational_modifiers(member);
    let proficiency_bonus = proficiency_bonus(member.progression.level);

    let total = roll
        + skill_bonus
        + attribute_modifier
        + equipment_bonus
        + proficiency_bonus
        + situational_modifiers
        + environmental_modifier;

    let difficulty = encounter.difficulty;
    let outcome = grade(roll, total, difficulty);
    let injury = roll_injury(outcome, dice);
    let narrative_description =
        narrative::describe(member, encounter.primary_skill, outcome, dice);

    tracing::debug!(
        member = %member.name,
        encounter = %encounter.name,
        roll,
        total,
        difficulty,
        ?outcome,
        "Encounter resolved"
    );

    EncounterResult {
        encounter: encounter.name.clone(),
        member_id: member.id,
        roll,
        attribute_modifier,
        skill_bonus,
        equipment_bonus,
        proficiency_bonus,
        situational_modifiers,
        environmental_modifier,
        total,
        outcome,
        experience_gained: outcome.experience(difficulty),
        stress_inflicted: outcome.stress(difficulty),
        narrative_description,
        injury,
    }
}
