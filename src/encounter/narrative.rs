//! Short flavour text describing how an encounter played out

use crate::character::member::{Personality, TeamMember};
use crate::character::skills::Skill;
use crate::core::dice::Dice;
use crate::encounter::constants::NARRATIVE_FLOURISH_CHANCE;
use crate::encounter::resolution::Outcome;

fn skill_clause(skill: Skill) -> &'static str {
    match skill {
        Skill::Stealth => "slips through the shadows",
        Skill::Athletics => "scales the obstacle",
        Skill::Combat => "squares up against the guards",
        Skill::Lockpicking => "works the lock",
        Skill::Hacking => "jacks into the security system",
        Skill::Social => "turns on the charm",
    }
}

fn outcome_clause(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::CriticalSuccess => "with flawless precision.",
        Outcome::Success => "and gets the job done.",
        Outcome::Neutral => "but it takes longer than planned.",
        Outcome::Failure => "and things start to go wrong.",
        Outcome::CriticalFailure => "and the whole thing goes sideways.",
    }
}

/// Leading piece of an ability description, up to the first sentence break
fn ability_fragment(ability: &str) -> &str {
    ability
        .split(['.', ';', ','])
        .next()
        .unwrap_or("")
        .trim()
}

/// Build the narrative for one resolved encounter
///
/// Consumes one `chance` roll for the ability flourish, and only when the
/// member has an ability to draw on.
pub fn describe(
    member: &TeamMember,
    skill: Skill,
    outcome: Outcome,
    dice: &mut impl Dice,
) -> String {
    let mut text = if member.has_trait(Personality::Methodical) {
        format!(
            "Sticking to the plan step by step, {} {} {}",
            member.name,
            skill_clause(skill),
            outcome_clause(outcome)
        )
    } else {
        format!("{} {} {}", member.name, skill_clause(skill), outcome_clause(outcome))
    };

    if outcome.is_success() && member.has_trait(Personality::Cynical) {
        text.push_str(" Still, they mutter that it was too easy.");
    }
    if outcome.is_failure() && member.has_trait(Personality::Optimistic) {
        text.push_str(" They shrug it off with a grin.");
    }

    let fragment = ability_fragment(&member.special_ability);
    if !fragment.is_empty() && dice.chance(NARRATIVE_FLOURISH_CHANCE) {
        text.push_str(&format!(" ({})", fragment));
    }

    text
}
