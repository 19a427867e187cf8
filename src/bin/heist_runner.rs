//! Headless Heist Runner
//!
//! Loads a scenario (recruits + encounters) from JSON, runs one detailed
//! simulation and a Monte Carlo estimate, and prints the result.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use heist_crew::character::{CharacterClass, Personality, Rarity, TeamMember};
use heist_crew::core::error::Result;
use heist_crew::core::{HeistConfig, SeededDice};
use heist_crew::encounter::Encounter;
use heist_crew::heist::{estimate_success, simulate_automated_heist, HeistOdds, HeistOutcome};
use serde::{Deserialize, Serialize};

/// Headless Heist Runner - simulate a crew against a list of encounters
#[derive(Parser, Debug)]
#[command(name = "heist_runner")]
#[command(about = "Simulate a heist scenario and estimate its odds")]
struct Args {
    /// Scenario JSON file with `recruits` and `encounters`
    scenario: PathBuf,

    /// Optional TOML file overriding simulator tuning
    #[arg(long)]
    config: Option<PathBuf>,

    /// Monte Carlo iterations for the odds estimate
    #[arg(long, default_value_t = 1000)]
    iterations: usize,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Log every encounter roll
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Debug, Deserialize)]
struct Recruit {
    name: String,
    class: CharacterClass,
    #[serde(default)]
    rarity: Rarity,
    #[serde(default)]
    personality: Vec<Personality>,
    #[serde(default)]
    special_ability: String,
    #[serde(default)]
    loyalty: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct Scenario {
    recruits: Vec<Recruit>,
    encounters: Vec<Encounter>,
}

#[derive(Serialize)]
struct RunReport {
    seed: u64,
    sample: HeistOutcome,
    odds: HeistOdds,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let directive = if args.verbose { "heist_crew=debug" } else { "heist_crew=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(directive)
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => HeistConfig::load(path)?,
        None => HeistConfig::default(),
    };

    let scenario: Scenario = serde_json::from_str(&fs::read_to_string(&args.scenario)?)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut dice = SeededDice::seeded(seed);

    let team: Vec<TeamMember> = scenario
        .recruits
        .into_iter()
        .map(|recruit| {
            let mut member =
                TeamMember::generate(recruit.name, recruit.class, recruit.rarity, &mut dice)
                    .with_special_ability(recruit.special_ability);
            member.personality = recruit.personality;
            if let Some(loyalty) = recruit.loyalty {
                member = member.with_loyalty(loyalty);
            }
            member
        })
        .collect();

    let sample = simulate_automated_heist(&team, &scenario.encounters, &config, &mut dice);
    let odds = estimate_success(&team, &scenario.encounters, &config, args.iterations, seed);

    if args.format == "text" {
        print_text(&sample, &odds);
    } else {
        let report = RunReport { seed, sample, odds };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn print_text(sample: &HeistOutcome, odds: &HeistOdds) {
    println!("=== Sample run (synergy {}) ===", sample.team_synergy);
    for result in &sample.results {
        println!(
            "{:<24} roll {:>2} total {:>3} {:?}",
            result.encounter, result.roll, result.total, result.outcome
        );
        println!("    {}", result.narrative_description);
    }
    for injury in &sample.injuries {
        println!("! {} - {} ({})", injury.member_name, injury.injury, injury.encounter);
    }
    println!(
        "{} at {:.0}% | payout ${} | experience {} | team fatigue {:.1}",
        if sample.success { "SUCCESS" } else { "FAILURE" },
        sample.success_rate * 100.0,
        sample.total_payout,
        sample.total_experience,
        sample.team_fatigue
    );
    println!();
    println!("=== Odds over {} runs ===", odds.iterations);
    println!("Success rate:   {:.1}%", odds.success_rate * 100.0);
    println!("Mean payout:    ${:.0}", odds.mean_payout);
    println!("Mean xp:        {:.1}", odds.mean_experience);
    println!("Mean fatigue:   {:.1}", odds.mean_team_fatigue);
    println!("Injuries/run:   {:.2}", odds.mean_injuries);
}
