//! Team synergy: class diversity, loyalty and skill balance

use ahash::AHashSet;

use crate::character::member::TeamMember;
use crate::character::skills::Skill;

const POINTS_PER_CLASS: f64 = 2.0;
const LOYALTY_WEIGHT: f64 = 3.0;
const BALANCE_WEIGHT: f64 = 10.0;

/// Aggregate synergy score of a team, floored; 0 for an empty team
pub fn calculate_team_synergy(team: &[TeamMember]) -> i32 {
    if team.is_empty() {
        return 0;
    }

    let classes: AHashSet<_> = team.iter().map(|m| m.class).collect();
    let diversity = classes.len() as f64 * POINTS_PER_CLASS;

    let loyalty: f64 = team
        .iter()
        .map(|m| m.loyalty as f64 / 100.0 * LOYALTY_WEIGHT)
        .sum();

    // Team-wide total per skill; a flat profile earns the full bonus
    let totals: Vec<i32> = Skill::ALL
        .iter()
        .map(|skill| team.iter().map(|m| m.skills.get(*skill)).sum())
        .collect();
    let min = totals.iter().copied().min().unwrap_or(0);
    let max = match totals.iter().copied().max().unwrap_or(0) {
        0 => 1,
        max => max,
    };
    let balance = BALANCE_WEIGHT * min as f64 / max as f64;

    (diversity + loyalty + balance).floor() as i32
}
