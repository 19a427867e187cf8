//! Monte Carlo estimate of how a team will fare on a heist
//!
//! Each iteration is an independent seeded simulation (`seed + i`), so the
//! estimate is reproducible and iterations run in parallel.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::character::member::TeamMember;
use crate::core::config::HeistConfig;
use crate::core::dice::SeededDice;
use crate::encounter::definition::Encounter;
use crate::heist::simulator::simulate_automated_heist;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HeistOdds {
    pub iterations: usize,
    pub success_rate: f64,
    pub mean_payout: f64,
    pub mean_experience: f64,
    pub mean_team_fatigue: f64,
    pub mean_injuries: f64,
}

#[derive(Default)]
struct Tally {
    successes: usize,
    payout: i64,
    experience: i64,
    fatigue: f64,
    injuries: usize,
}

impl Tally {
    fn merge(self, other: Tally) -> Tally {
        Tally {
            successes: self.successes + other.successes,
            payout: self.payout + other.payout,
            experience: self.experience + other.experience,
            fatigue: self.fatigue + other.fatigue,
            injuries: self.injuries + other.injuries,
        }
    }
}

pub fn estimate_success(
    team: &[TeamMember],
    encounters: &[Encounter],
    config: &HeistConfig,
    iterations: usize,
    seed: u64,
) -> HeistOdds {
    if iterations == 0 {
        return HeistOdds::default();
    }

    let tally = (0..iterations)
        .into_par_iter()
        .map(|i| {
            let mut dice = SeededDice::seeded(seed.wrapping_add(i as u64));
            let outcome = simulate_automated_heist(team, encounters, config, &mut dice);
            Tally {
                successes: outcome.success as usize,
                payout: outcome.total_payout,
                experience: outcome.total_experience,
                fatigue: outcome.team_fatigue,
                injuries: outcome.injuries.len(),
            }
        })
        .reduce(Tally::default, Tally::merge);

    let n = iterations as f64;
    HeistOdds {
        iterations,
        success_rate: tally.successes as f64 / n,
        mean_payout: tally.payout as f64 / n,
        mean_experience: tally.experience as f64 / n,
        mean_team_fatigue: tally.fatigue / n,
        mean_injuries: tally.injuries as f64 / n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::attributes::Attributes;
    use crate::character::generation::{CharacterClass, Rarity};
    use crate::character::skills::{Skill, Skills};

    fn crew(skill: i32) -> Vec<TeamMember> {
        let skills = Skills::new(skill, skill, skill, skill, skill, skill);
        let mut member = TeamMember::new(
            "Pro",
            CharacterClass::Mastermind,
            Rarity::Common,
            Attributes::default(),
            skills,
        );
        member.skills = skills;
        vec![member]
    }

    fn job() -> Vec<Encounter> {
        vec![
            Encounter::new("Fence", Skill::Athletics, 12),
            Encounter::new("Keypad", Skill::Hacking, 12),
        ]
    }

    #[test]
    fn test_zero_iterations() {
        let odds = estimate_success(&crew(5), &job(), &HeistConfig::default(), 0, 1);
        assert_eq!(odds, HeistOdds::default());
    }

    #[test]
    fn test_reproducible() {
        let a = estimate_success(&crew(5), &job(), &HeistConfig::default(), 200, 9);
        let b = estimate_success(&crew(5), &job(), &HeistConfig::default(), 200, 9);
        assert_eq!(a.success_rate, b.success_rate);
        assert_eq!(a.mean_payout, b.mean_payout);
    }

    #[test]
    fn test_skill_improves_odds() {
        let novice = estimate_success(&crew(0), &job(), &HeistConfig::default(), 500, 3);
        let expert = estimate_success(&crew(12), &job(), &HeistConfig::default(), 500, 3);
        assert!(expert.success_rate > novice.success_rate);
        assert!(expert.mean_payout > novice.mean_payout);
        assert!((0.0..=1.0).contains(&novice.success_rate));
    }
}
