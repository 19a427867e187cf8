//! Experience curve, level-ups and long-term character records

use serde::{Deserialize, Serialize};

use crate::character::member::TeamMember;

/// Attribute points granted per level gained
pub const ATTRIBUTE_POINTS_PER_LEVEL: u32 = 1;
/// Skill points granted per level gained
pub const SKILL_POINTS_PER_LEVEL: u32 = 2;
/// Mastery never exceeds this
pub const MAX_MASTERY_LEVEL: u32 = 10;

/// Level, experience and mission history for a character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterProgression {
    pub level: u32,
    pub experience: i64,
    pub experience_to_next: i64,
    pub attribute_points: u32,
    pub skill_points: u32,
    pub mastery_level: u32,
    pub heists_completed: u32,
    /// Fraction of completed heists that succeeded (0.0–1.0)
    pub success_rate: f64,
}

impl Default for CharacterProgression {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0,
            experience_to_next: calculate_experience_to_next(1),
            attribute_points: 0,
            skill_points: 0,
            mastery_level: 0,
            heists_completed: 0,
            success_rate: 0.0,
        }
    }
}

impl CharacterProgression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance exactly one level
    ///
    /// Leftover experience carries over and may still exceed the new
    /// threshold; [`grant_experience`] loops until it does not.
    pub fn level_up(&self) -> Self {
        let level = self.level + 1;
        Self {
            level,
            experience: self.experience - self.experience_to_next,
            experience_to_next: calculate_experience_to_next(level),
            attribute_points: self.attribute_points + ATTRIBUTE_POINTS_PER_LEVEL,
            skill_points: self.skill_points + SKILL_POINTS_PER_LEVEL,
            ..self.clone()
        }
    }

    pub fn can_level_up(&self) -> bool {
        self.experience >= self.experience_to_next
    }

    pub fn add_mastery(&mut self, amount: u32) {
        self.mastery_level = (self.mastery_level + amount).min(MAX_MASTERY_LEVEL);
    }

    /// Fold one finished heist into the running success rate
    pub fn record_heist(&mut self, success: bool) {
        let previous_successes = self.success_rate * self.heists_completed as f64;
        self.heists_completed += 1;
        let successes = previous_successes + if success { 1.0 } else { 0.0 };
        self.success_rate = successes / self.heists_completed as f64;
    }
}

/// `level² × 100`
pub fn calculate_experience_to_next(level: u32) -> i64 {
    let level = level as i64;
    level * level * 100
}

/// Experience needed to climb from level 1 to `level`
pub fn calculate_total_experience(level: u32) -> i64 {
    (1..level).map(calculate_experience_to_next).sum()
}

/// Add experience and apply every level-up it pays for
///
/// Returns the new progression and how many levels were gained.
pub fn grant_experience(
    progression: &CharacterProgression,
    amount: i64,
) -> (CharacterProgression, u32) {
    let mut next = CharacterProgression {
        experience: progression.experience + amount,
        ..progression.clone()
    };
    let mut levels = 0;
    while next.can_level_up() {
        next = next.level_up();
        levels += 1;
    }
    (next, levels)
}

/// One level-up applied to a whole character
///
/// Skills and derived stats depend on level, so they are rebuilt on the
/// returned copy.
pub fn level_up_character(member: &TeamMember) -> TeamMember {
    let mut leveled = member.clone();
    leveled.progression = member.progression.level_up();
    leveled.refresh();
    leveled
}
