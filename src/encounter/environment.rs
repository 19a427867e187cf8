//! Time-of-day, weather and site modifiers
//!
//! Every modifier targets one skill and is ignored unless that skill is the
//! encounter's primary skill. High security is the only flat penalty.

use serde::{Deserialize, Serialize};

use crate::character::skills::Skill;
use crate::encounter::definition::{Encounter, EnvironmentalFactor};

/// Flat penalty applied to every check at a high-security site
const HIGH_SECURITY_PENALTY: i32 = -3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Dawn,
    #[default]
    Day,
    Dusk,
    Night,
}

impl TimeOfDay {
    pub fn skill_modifier(&self, skill: Skill) -> i32 {
        match (self, skill) {
            (TimeOfDay::Night, Skill::Stealth) => 2,
            (TimeOfDay::Night, Skill::Social) => -1,
            (TimeOfDay::Day, Skill::Social) => 1,
            (TimeOfDay::Day, Skill::Stealth) => -1,
            (TimeOfDay::Dawn | TimeOfDay::Dusk, Skill::Stealth) => 1,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    Clear,
    Rain,
    Fog,
    Storm,
}

impl Weather {
    pub fn skill_modifier(&self, skill: Skill) -> i32 {
        match (self, skill) {
            (Weather::Rain, Skill::Stealth) => 1,
            (Weather::Rain, Skill::Athletics) => -2,
            (Weather::Fog, Skill::Stealth) => 3,
            (Weather::Fog, Skill::Hacking) => -1,
            (Weather::Storm, Skill::Stealth) => 2,
            (Weather::Storm, Skill::Athletics) => -3,
            (Weather::Storm, Skill::Social) => -2,
            _ => 0,
        }
    }
}

impl EnvironmentalFactor {
    /// Modifier this factor applies to a check using `skill`
    pub fn skill_modifier(&self, skill: Skill) -> i32 {
        match (self, skill) {
            (EnvironmentalFactor::Crowded, Skill::Stealth) => 2,
            (EnvironmentalFactor::Crowded, Skill::Social) => 1,
            (EnvironmentalFactor::WellLit, Skill::Stealth) => -2,
            (EnvironmentalFactor::WellLit, Skill::Lockpicking) => 1,
            (EnvironmentalFactor::Noisy, Skill::Stealth) => 1,
            (EnvironmentalFactor::Noisy, Skill::Social) => -1,
            (EnvironmentalFactor::HighSecurity, _) => HIGH_SECURITY_PENALTY,
            (EnvironmentalFactor::Electronic, Skill::Hacking) => 2,
            (EnvironmentalFactor::Electronic, Skill::Lockpicking) => -1,
            _ => 0,
        }
    }
}

/// Sum of every modifier relevant to the encounter's primary skill
pub fn get_environmental_modifiers(
    encounter: &Encounter,
    time_of_day: TimeOfDay,
    weather: Weather,
) -> i32 {
    let skill = encounter.primary_skill;
    let site: i32 = encounter
        .environmental_factors
        .iter()
        .map(|factor| factor.skill_modifier(skill))
        .sum();

    time_of_day.skill_modifier(skill) + weather.skill_modifier(skill) + site
}
