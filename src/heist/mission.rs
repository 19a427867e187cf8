//! Automated heist definitions and in-flight mission records

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::character::equipment::EquipmentSlot;
use crate::character::member::TeamMember;
use crate::character::skills::Skill;
use crate::core::error::{HeistError, Result};
use crate::core::types::{HeistId, Seconds};
use crate::encounter::definition::Encounter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
    Extreme,
}

/// Who may be sent on a heist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeistRequirements {
    pub min_team_size: usize,
    pub max_team_size: usize,
    /// Some member must reach each listed skill value
    #[serde(default)]
    pub required_skills: AHashMap<Skill, i32>,
    /// Some member must have each listed slot filled
    #[serde(default)]
    pub required_equipment: Vec<EquipmentSlot>,
}

impl Default for HeistRequirements {
    fn default() -> Self {
        Self {
            min_team_size: 1,
            max_team_size: 4,
            required_skills: AHashMap::new(),
            required_equipment: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeistRewards {
    /// Flat part of the payout formula
    pub base_payout: i64,
    /// Scales the experience each participant receives
    pub experience_multiplier: f64,
    /// Mastery granted to each participant on success
    pub mastery_gain: u32,
}

impl Default for HeistRewards {
    fn default() -> Self {
        Self {
            base_payout: 1000,
            experience_multiplier: 1.0,
            mastery_gain: 0,
        }
    }
}

/// What the crew must have achieved before a heist is offered
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnlockConditions {
    #[serde(default)]
    pub heists_completed: u32,
    #[serde(default)]
    pub min_power_level: i32,
}

/// A mission that runs on a timer and resolves itself on completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomatedHeist {
    pub id: HeistId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Seconds from start to completion
    pub duration: Seconds,
    #[serde(default)]
    pub requirements: HeistRequirements,
    #[serde(default)]
    pub rewards: HeistRewards,
    #[serde(default)]
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub unlock_conditions: UnlockConditions,
    pub encounters: Vec<Encounter>,
}

impl AutomatedHeist {
    pub fn new(name: impl Into<String>, duration: Seconds, encounters: Vec<Encounter>) -> Self {
        Self {
            id: HeistId::new(),
            name: name.into(),
            description: String::new(),
            duration,
            requirements: HeistRequirements::default(),
            rewards: HeistRewards::default(),
            risk_level: RiskLevel::default(),
            unlock_conditions: UnlockConditions::default(),
            encounters,
        }
    }

    pub fn with_requirements(mut self, requirements: HeistRequirements) -> Self {
        self.requirements = requirements;
        self
    }

    pub fn with_rewards(mut self, rewards: HeistRewards) -> Self {
        self.rewards = rewards;
        self
    }

    pub fn with_risk(mut self, risk_level: RiskLevel) -> Self {
        self.risk_level = risk_level;
        self
    }

    pub fn with_unlock(mut self, unlock_conditions: UnlockConditions) -> Self {
        self.unlock_conditions = unlock_conditions;
        self
    }

    /// Whether the crew's record opens this heist
    pub fn is_unlocked(&self, heists_completed: u32, best_power_level: i32) -> bool {
        heists_completed >= self.unlock_conditions.heists_completed
            && best_power_level >= self.unlock_conditions.min_power_level
    }

    /// Validate a proposed team against the requirements
    pub fn check_team(&self, team: &[TeamMember]) -> Result<()> {
        let req = &self.requirements;
        if team.len() < req.min_team_size || team.len() > req.max_team_size {
            return Err(HeistError::TeamSize {
                min: req.min_team_size,
                max: req.max_team_size,
                actual: team.len(),
            });
        }

        for (skill, required) in &req.required_skills {
            if !team.iter().any(|m| m.skills.get(*skill) >= *required) {
                return Err(HeistError::RequirementNotMet(format!(
                    "{} needs a member with {} {}",
                    self.name,
                    skill.name(),
                    required
                )));
            }
        }

        for slot in &req.required_equipment {
            if !team.iter().any(|m| m.equipment.has(*slot)) {
                return Err(HeistError::RequirementNotMet(format!(
                    "{} needs a member with {:?} equipped",
                    self.name, slot
                )));
            }
        }

        Ok(())
    }
}

/// A heist in progress with the team that was sent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveHeist {
    pub heist: AutomatedHeist,
    /// Team as it was when the heist started
    pub team: Vec<TeamMember>,
    pub time_remaining: Seconds,
}

impl ActiveHeist {
    pub fn new(heist: AutomatedHeist, team: Vec<TeamMember>) -> Self {
        let time_remaining = heist.duration;
        Self {
            heist,
            team,
            time_remaining,
        }
    }

    /// Advance the clock; true once the timer has run out
    pub fn tick(&mut self, elapsed: Seconds) -> bool {
        self.time_remaining = self.time_remaining.saturating_sub(elapsed);
        self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.time_remaining == 0
    }

    pub fn includes(&self, member: &TeamMember) -> bool {
        self.team.iter().any(|m| m.id == member.id)
    }
}
