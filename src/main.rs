//! Heist Crew - Entry Point
//!
//! Interactive console for the heist engine. Recruits a starting crew,
//! lets you send them on a job and advance the mission clock until it pays
//! out (or doesn't).

use heist_crew::character::{
    CharacterClass, Equipment, EquipmentSlot, Personality, Rarity, Skill, TeamMember,
};
use heist_crew::core::error::Result;
use heist_crew::core::{HeistConfig, SeededDice};
use heist_crew::encounter::{Encounter, EnvironmentalFactor};
use heist_crew::heist::{calculate_team_synergy, estimate_success, AutomatedHeist, Crew};

use std::io::{self, Write};
use std::path::Path;

const STARTING_BUDGET: i64 = 10_000;
const CONFIG_PATH: &str = "heist.toml";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "heist_crew=info".into()),
        )
        .init();

    tracing::info!("Heist Crew starting...");

    let config = if Path::new(CONFIG_PATH).exists() {
        HeistConfig::load(Path::new(CONFIG_PATH))?
    } else {
        HeistConfig::default()
    };

    let mut dice = SeededDice::from_entropy();
    let mut crew = Crew::new(STARTING_BUDGET).with_config(config);
    recruit_starting_crew(&mut crew, &mut dice)?;

    println!("\n=== HEIST CREW ===");
    println!();
    println!("Commands:");
    println!("  status / s      - Show the crew");
    println!("  odds            - Estimate the odds on the museum job");
    println!("  start           - Send the whole crew on the museum job");
    println!("  tick <seconds>  - Advance the mission clock");
    println!("  rest            - Let everyone recover 20 fatigue");
    println!("  quit / q        - Exit");
    println!();

    loop {
        print!("[${}] > ", crew.budget);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "status" || input == "s" {
            display_crew(&crew);
            continue;
        }

        if input == "odds" {
            let job = museum_job();
            let odds = estimate_success(&crew.members, &job.encounters, &crew.config, 2_000, 1);
            println!(
                "Success {:.0}% | mean payout ${:.0} | mean fatigue {:.1} | injuries per run {:.2}",
                odds.success_rate * 100.0,
                odds.mean_payout,
                odds.mean_team_fatigue,
                odds.mean_injuries
            );
            continue;
        }

        if input == "start" {
            let team: Vec<_> = crew.members.iter().map(|m| m.id).collect();
            match crew.start_heist(museum_job(), &team) {
                Ok(_) => println!(
                    "Crew dispatched. Synergy {}.",
                    calculate_team_synergy(&crew.members)
                ),
                Err(e) => println!("Cannot start: {}", e),
            }
            continue;
        }

        if input == "rest" {
            let ids: Vec<_> = crew.members.iter().map(|m| m.id).collect();
            for id in ids {
                crew.rest(id, 20)?;
            }
            println!("The crew takes a breather.");
            continue;
        }

        if let Some(arg) = input.strip_prefix("tick ") {
            match arg.parse::<u64>() {
                Ok(seconds) => {
                    for done in crew.tick(seconds, &mut dice) {
                        println!("\n*** {} complete ***", done.heist_name);
                        for result in &done.outcome.results {
                            println!(
                                "  [{:>2} -> {:>2}] {:?}: {}",
                                result.roll,
                                result.total,
                                result.outcome,
                                result.narrative_description
                            );
                        }
                        for injury in &done.outcome.injuries {
                            println!("  ! {} suffered {}", injury.member_name, injury.injury);
                        }
                        println!(
                            "  {} | payout ${} | experience {}",
                            if done.outcome.success { "SUCCESS" } else { "FAILED" },
                            done.outcome.total_payout,
                            done.outcome.total_experience
                        );
                    }
                    for active in &crew.active_heists {
                        println!("{}: {}s remaining", active.heist.name, active.time_remaining);
                    }
                }
                Err(_) => println!("Usage: tick <seconds>"),
            }
            continue;
        }

        println!("Unknown command. Available: status, odds, start, tick <n>, rest, quit");
    }

    println!("\nGoodbye! Final budget: ${}", crew.budget);
    Ok(())
}

fn recruit_starting_crew(crew: &mut Crew, dice: &mut SeededDice) -> Result<()> {
    let recruits = [
        (
            "Nadia",
            CharacterClass::Infiltrator,
            Personality::Methodical,
            "Ghost step. Leaves no trace",
        ),
        (
            "Brick",
            CharacterClass::Muscle,
            Personality::Optimistic,
            "Door breaker, shoulder first",
        ),
        (
            "Patch",
            CharacterClass::Hacker,
            Personality::Cynical,
            "Backdoor whisperer; always has a way in",
        ),
    ];
    for (name, class, personality, ability) in recruits {
        let member = TeamMember::generate(name, class, Rarity::Uncommon, dice)
            .with_personality(personality)
            .with_special_ability(ability);
        crew.recruit(member)?;
    }

    let picks = crew.add_equipment(
        Equipment::new("Rake Picks", EquipmentSlot::Tool, Rarity::Uncommon)
            .with_skill_bonus(Skill::Lockpicking, 2),
    );
    let deck = crew.add_equipment(
        Equipment::new("Pocket Deck", EquipmentSlot::Gadget, Rarity::Rare)
            .with_skill_bonus(Skill::Hacking, 3)
            .with_required_class(CharacterClass::Hacker),
    );
    let nadia = crew.members[0].id;
    let patch = crew.members[2].id;
    crew.equip(nadia, picks)?;
    crew.equip(patch, deck)?;
    Ok(())
}

fn museum_job() -> AutomatedHeist {
    AutomatedHeist::new(
        "Museum After Hours",
        300,
        vec![
            Encounter::new("Service Entrance", Skill::Lockpicking, 12)
                .with_equipment_bonus(EquipmentSlot::Tool, 1),
            Encounter::new("Camera Loop", Skill::Hacking, 14)
                .with_factor(EnvironmentalFactor::Electronic),
            Encounter::new("Gallery Floor", Skill::Stealth, 13)
                .with_factor(EnvironmentalFactor::WellLit),
            Encounter::new("Night Guard", Skill::Combat, 11),
            Encounter::new("Loading Dock", Skill::Athletics, 10)
                .with_factor(EnvironmentalFactor::HighSecurity),
        ],
    )
}

fn display_crew(crew: &Crew) {
    println!();
    for member in &crew.members {
        let busy = if crew.is_busy(member.id) { " (on a job)" } else { "" };
        println!(
            "{} the {:?}{} - level {} ({} / {} xp), fatigue {}, loyalty {}",
            member.name,
            member.class,
            busy,
            member.progression.level,
            member.progression.experience,
            member.progression.experience_to_next,
            member.fatigue,
            member.loyalty
        );
        println!(
            "  STR {} DEX {} INT {} WIS {} CHA {} CON {} | HP {} | crit {:.0}%",
            member.attributes.strength,
            member.attributes.dexterity,
            member.attributes.intelligence,
            member.attributes.wisdom,
            member.attributes.charisma,
            member.attributes.constitution,
            member.derived_stats.health,
            member.derived_stats.critical_chance * 100.0
        );
        println!(
            "  stealth {} athletics {} combat {} lockpicking {} hacking {} social {}",
            member.skills.stealth,
            member.skills.athletics,
            member.skills.combat,
            member.skills.lockpicking,
            member.skills.hacking,
            member.skills.social
        );
        for injury in &member.injuries {
            println!("  ! {}", injury);
        }
    }
    println!("Inventory: {} item(s)", crew.inventory.len());
}
