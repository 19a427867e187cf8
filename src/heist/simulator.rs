//! Automated heist simulation
//!
//! Runs every encounter of a mission in order. For each one the best-suited
//! member who is still fit goes in, the check is resolved under a random
//! day or night, and stress and injuries land on that member before the
//! next encounter. The whole run is synchronous and touches only a working
//! copy of the team; the caller applies the returned outcome.

use serde::{Deserialize, Serialize};

use crate::character::attributes::get_attribute_modifier;
use crate::character::member::TeamMember;
use crate::core::config::HeistConfig;
use crate::core::dice::Dice;
use crate::core::types::CharacterId;
use crate::encounter::definition::Encounter;
use crate::encounter::environment::{get_environmental_modifiers, TimeOfDay, Weather};
use crate::encounter::resolution::{resolve_encounter, EncounterResult};
use crate::heist::synergy::calculate_team_synergy;

/// Times of day the simulator chooses between
const SIMULATED_TIMES: [TimeOfDay; 2] = [TimeOfDay::Day, TimeOfDay::Night];

/// An injury picked up during a simulated heist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryRecord {
    pub member_id: CharacterId,
    pub member_name: String,
    pub encounter: String,
    pub injury: String,
}

/// Everything a finished simulation hands back to the crew store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeistOutcome {
    /// One entry per encounter, in order
    pub results: Vec<EncounterResult>,
    pub success: bool,
    /// Fraction of encounters graded success or better
    pub success_rate: f64,
    pub total_payout: i64,
    pub total_experience: i64,
    pub total_stress: i64,
    /// Average stress per team member, not clamped
    pub team_fatigue: f64,
    pub injuries: Vec<InjuryRecord>,
    /// Synergy of the team as it set out
    pub team_synergy: i32,
    /// Team after the heist, with fatigue and injuries applied
    pub team: Vec<TeamMember>,
}

impl HeistOutcome {
    fn empty(team: &[TeamMember]) -> Self {
        Self {
            results: Vec::new(),
            success: false,
            success_rate: 0.0,
            total_payout: 0,
            total_experience: 0,
            total_stress: 0,
            team_fatigue: 0.0,
            injuries: Vec::new(),
            team_synergy: calculate_team_synergy(team),
            team: team.to_vec(),
        }
    }
}

/// How well a member fits an encounter, used to pick who goes in
pub fn selection_score(member: &TeamMember, encounter: &Encounter) -> i32 {
    let attribute = encounter
        .primary_attribute
        .map(|a| get_attribute_modifier(member.attributes.get(a)))
        .unwrap_or(0);
    member.skills.get(encounter.primary_skill) + attribute
}

fn is_fit(member: &TeamMember, config: &HeistConfig) -> bool {
    member.fatigue <= config.max_fatigue_for_selection
        && member.injuries.len() <= config.max_injuries_for_selection
}

/// Index of the member who should attempt an encounter
///
/// Ties go to the earlier member. When nobody is fit the whole team is
/// considered. `None` only for an empty team.
pub fn select_member(
    team: &[TeamMember],
    encounter: &Encounter,
    config: &HeistConfig,
) -> Option<usize> {
    let best = |fit_only: bool| {
        let mut best: Option<(usize, i32)> = None;
        for (idx, member) in team.iter().enumerate() {
            if fit_only && !is_fit(member, config) {
                continue;
            }
            let score = selection_score(member, encounter);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((idx, score));
            }
        }
        best.map(|(idx, _)| idx)
    };

    best(true).or_else(|| {
        if !team.is_empty() {
            tracing::warn!(
                encounter = %encounter.name,
                "No fit crew member, sending the best available"
            );
        }
        best(false)
    })
}

/// Payout for a finished run
pub fn calculate_payout(
    success: bool,
    success_rate: f64,
    total_experience: i64,
    config: &HeistConfig,
) -> i64 {
    if success {
        let payout = config.base_payout + config.experience_payout_factor * total_experience;
        if success_rate > config.bonus_threshold {
            (payout as f64 * config.bonus_multiplier).floor() as i64
        } else {
            payout
        }
    } else {
        let share = (config.base_payout + total_experience) as f64;
        (config.failure_payout_share * share).floor() as i64
    }
}

/// Run a whole heist with the given team
///
/// An empty team or an empty encounter list yields no results, no payout and
/// `success == false`.
pub fn simulate_automated_heist(
    team: &[TeamMember],
    encounters: &[Encounter],
    config: &HeistConfig,
    dice: &mut impl Dice,
) -> HeistOutcome {
    if team.is_empty() || encounters.is_empty() {
        tracing::warn!(
            team = team.len(),
            encounters = encounters.len(),
            "Nothing to simulate"
        );
        return HeistOutcome::empty(team);
    }

    let team_synergy = calculate_team_synergy(team);
    let mut crew = team.to_vec();
    let mut results = Vec::with_capacity(encounters.len());
    let mut injuries = Vec::new();
    let mut total_experience: i64 = 0;
    let mut total_stress: i64 = 0;

    for encounter in encounters {
        let Some(idx) = select_member(&crew, encounter, config) else {
            break;
        };

        let time = SIMULATED_TIMES[dice.pick(SIMULATED_TIMES.len())];
        let environment = get_environmental_modifiers(encounter, time, Weather::Clear);
        let result = resolve_encounter(&crew[idx], encounter, environment, dice);

        total_experience += result.experience_gained as i64;
        total_stress += result.stress_inflicted as i64;

        let member = &mut crew[idx];
        member.add_fatigue(result.stress_inflicted, config.fatigue_cap);
        if let Some(injury) = &result.injury {
            member.injuries.push(injury.clone());
            injuries.push(InjuryRecord {
                member_id: member.id,
                member_name: member.name.clone(),
                encounter: encounter.name.clone(),
                injury: injury.clone(),
            });
        }

        tracing::debug!(
            member = %member.name,
            encounter = %encounter.name,
            ?time,
            outcome = ?result.outcome,
            fatigue = member.fatigue,
            "Heist step"
        );
        results.push(result);
    }

    let successes = results.iter().filter(|r| r.outcome.is_success()).count();
    let success_rate = successes as f64 / encounters.len() as f64;
    let success = success_rate >= config.success_threshold;
    let total_payout = calculate_payout(success, success_rate, total_experience, config);
    let team_fatigue = total_stress as f64 / team.len() as f64;

    tracing::debug!(success, success_rate, total_payout, total_experience, "Heist simulated");

    HeistOutcome {
        results,
        success,
        success_rate,
        total_payout,
        total_experience,
        total_stress,
        team_fatigue,
        injuries,
        team_synergy,
        team: crew,
    }
}
