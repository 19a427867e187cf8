//! Missions: definitions, team synergy, simulation and the crew store

pub mod crew;
pub mod mission;
pub mod odds;
pub mod simulator;
pub mod synergy;

pub use crew::{CompletedHeist, Crew};
pub use mission::{
    ActiveHeist, AutomatedHeist, HeistRequirements, HeistRewards, RiskLevel, UnlockConditions,
};
pub use odds::{estimate_success, HeistOdds};
pub use simulator::{simulate_automated_heist, HeistOutcome, InjuryRecord};
pub use synergy::calculate_team_synergy;
