//! The crew store: roster, free inventory, budget and missions in flight
//!
//! This is the state container the game front end mutates. Character math
//! and simulation stay pure; `Crew` is where their results are written back.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::character::equipment::{Equipment, EquipmentSlot};
use crate::character::member::{calculate_power_level, TeamMember};
use crate::character::progression::grant_experience;
use crate::core::config::HeistConfig;
use crate::core::dice::Dice;
use crate::core::error::{HeistError, Result};
use crate::core::types::{CharacterId, EquipmentId, HeistId, Seconds};
use crate::heist::mission::{ActiveHeist, AutomatedHeist};
use crate::heist::simulator::{simulate_automated_heist, HeistOutcome};

/// A mission whose timer ran out during a tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedHeist {
    pub heist_id: HeistId,
    pub heist_name: String,
    pub outcome: HeistOutcome,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Crew {
    pub members: Vec<TeamMember>,
    /// Equipment not assigned to anyone
    pub inventory: Vec<Equipment>,
    pub budget: i64,
    pub active_heists: Vec<ActiveHeist>,
    #[serde(default)]
    pub config: HeistConfig,
}

impl Crew {
    pub fn new(budget: i64) -> Self {
        Self {
            budget,
            ..Self::default()
        }
    }

    pub fn with_config(mut self, config: HeistConfig) -> Self {
        self.config = config;
        self
    }

    pub fn member(&self, id: CharacterId) -> Result<&TeamMember> {
        self.members
            .iter()
            .find(|m| m.id == id)
            .ok_or(HeistError::MemberNotFound(id))
    }

    pub fn member_mut(&mut self, id: CharacterId) -> Result<&mut TeamMember> {
        self.members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(HeistError::MemberNotFound(id))
    }

    /// Hire a member, paying their cost from the budget
    pub fn recruit(&mut self, member: TeamMember) -> Result<CharacterId> {
        if member.cost > self.budget {
            return Err(HeistError::InsufficientFunds {
                needed: member.cost,
                available: self.budget,
            });
        }
        self.budget -= member.cost;
        let id = member.id;
        tracing::info!(name = %member.name, class = ?member.class, cost = member.cost, "Recruited");
        self.members.push(member);
        Ok(id)
    }

    pub fn add_equipment(&mut self, item: Equipment) -> EquipmentId {
        let id = item.id;
        self.inventory.push(item);
        id
    }

    /// Move an item from inventory onto a member
    ///
    /// Whatever the member had in that slot goes back to inventory.
    pub fn equip(&mut self, member_id: CharacterId, equipment_id: EquipmentId) -> Result<()> {
        let pos = self
            .inventory
            .iter()
            .position(|item| item.id == equipment_id)
            .ok_or(HeistError::EquipmentNotFound(equipment_id))?;

        let member = self.member(member_id)?;
        let item = &self.inventory[pos];
        if let Some(level) = item.required_level {
            if member.progression.level < level {
                return Err(HeistError::RequirementNotMet(format!(
                    "{} requires level {}, {} is level {}",
                    item.name, level, member.name, member.progression.level
                )));
            }
        }
        if let Some(class) = item.required_class {
            if member.class != class {
                return Err(HeistError::RequirementNotMet(format!(
                    "{} can only be used by a {:?}",
                    item.name, class
                )));
            }
        }

        let item = self.inventory.remove(pos);
        let member = self.member_mut(member_id)?;
        tracing::info!(member = %member.name, item = %item.name, slot = ?item.slot, "Equipped");
        if let Some(previous) = member.equipment.equip(item) {
            self.inventory.push(previous);
        }
        Ok(())
    }

    /// Return the item in a slot to inventory
    pub fn unequip(&mut self, member_id: CharacterId, slot: EquipmentSlot) -> Result<EquipmentId> {
        let member = self.member_mut(member_id)?;
        let item = member.equipment.unequip(slot).ok_or(HeistError::SlotEmpty {
            member: member_id,
            slot,
        })?;
        let id = item.id;
        self.inventory.push(item);
        Ok(id)
    }

    /// Grant experience and apply any level-ups; returns levels gained
    pub fn grant_experience(&mut self, member_id: CharacterId, amount: i64) -> Result<u32> {
        let member = self.member_mut(member_id)?;
        let (progression, levels) = grant_experience(&member.progression, amount);
        member.progression = progression;
        member.refresh();
        if levels > 0 {
            tracing::info!(
                member = %member.name,
                level = member.progression.level,
                levels,
                "Level up"
            );
        }
        Ok(levels)
    }

    pub fn rest(&mut self, member_id: CharacterId, amount: i32) -> Result<()> {
        self.member_mut(member_id)?.rest(amount);
        Ok(())
    }

    pub fn is_busy(&self, member_id: CharacterId) -> bool {
        self.active_heists
            .iter()
            .any(|active| active.team.iter().any(|m| m.id == member_id))
    }

    /// Heists completed by the most experienced member, and the best power level
    fn record(&self) -> (u32, i32) {
        let completed = self
            .members
            .iter()
            .map(|m| m.progression.heists_completed)
            .max()
            .unwrap_or(0);
        let power = self.members.iter().map(calculate_power_level).max().unwrap_or(0);
        (completed, power)
    }

    pub fn is_unlocked(&self, heist: &AutomatedHeist) -> bool {
        let (completed, power) = self.record();
        heist.is_unlocked(completed, power)
    }

    /// Send a team on a heist; the team is snapshotted as it is now
    pub fn start_heist(
        &mut self,
        heist: AutomatedHeist,
        team_ids: &[CharacterId],
    ) -> Result<HeistId> {
        let mut seen = AHashSet::with_capacity(team_ids.len());
        let mut team = Vec::with_capacity(team_ids.len());
        for id in team_ids {
            if !seen.insert(*id) {
                return Err(HeistError::DuplicateMember(*id));
            }
            if self.is_busy(*id) {
                return Err(HeistError::MemberBusy(*id));
            }
            team.push(self.member(*id)?.clone());
        }
        if !self.is_unlocked(&heist) {
            return Err(HeistError::RequirementNotMet(format!("{} is still locked", heist.name)));
        }
        heist.check_team(&team)?;

        let id = heist.id;
        tracing::info!(
            heist = %heist.name,
            team = team.len(),
            duration = heist.duration,
            "Heist started"
        );
        self.active_heists.push(ActiveHeist::new(heist, team));
        Ok(id)
    }

    /// Drop an active heist without resolving it
    pub fn abandon_heist(&mut self, heist_id: HeistId) -> Result<ActiveHeist> {
        let pos = self
            .active_heists
            .iter()
            .position(|active| active.heist.id == heist_id)
            .ok_or(HeistError::HeistNotFound(heist_id))?;
        let active = self.active_heists.remove(pos);
        tracing::info!(heist = %active.heist.name, "Heist abandoned");
        Ok(active)
    }

    /// Advance every mission clock
    ///
    /// Missions that reach zero are removed, simulated once and applied.
    pub fn tick(&mut self, elapsed: Seconds, dice: &mut impl Dice) -> Vec<CompletedHeist> {
        let mut finished = Vec::new();
        let mut still_running = Vec::with_capacity(self.active_heists.len());
        for mut active in self.active_heists.drain(..) {
            if active.tick(elapsed) {
                finished.push(active);
            } else {
                still_running.push(active);
            }
        }
        self.active_heists = still_running;

        let mut completed = Vec::with_capacity(finished.len());
        for active in finished {
            let config = HeistConfig {
                base_payout: active.heist.rewards.base_payout,
                ..self.config.clone()
            };
            let outcome = simulate_automated_heist(
                &active.team,
                &active.heist.encounters,
                &config,
                &mut *dice,
            );
            self.apply_outcome(&active.heist, &outcome);
            completed.push(CompletedHeist {
                heist_id: active.heist.id,
                heist_name: active.heist.name,
                outcome,
            });
        }
        completed
    }

    /// Write a simulation outcome back to the roster and budget
    pub fn apply_outcome(&mut self, heist: &AutomatedHeist, outcome: &HeistOutcome) {
        self.budget += outcome.total_payout;
        let experience =
            (outcome.total_experience as f64 * heist.rewards.experience_multiplier).floor() as i64;

        let fatigue_cap = self.config.fatigue_cap;
        for after in &outcome.team {
            let Ok(member) = self.member_mut(after.id) else {
                tracing::warn!(member = %after.name, "Heist participant no longer on the roster");
                continue;
            };
            // Apply only what the mission changed; the member may have rested meanwhile
            let stress: i32 = outcome
                .results
                .iter()
                .filter(|r| r.member_id == after.id)
                .map(|r| r.stress_inflicted)
                .sum();
            member.add_fatigue(stress, fatigue_cap);
            member.injuries.extend(
                outcome
                    .injuries
                    .iter()
                    .filter(|record| record.member_id == after.id)
                    .map(|record| record.injury.clone()),
            );
            if outcome.success {
                member.progression.add_mastery(heist.rewards.mastery_gain);
            }
            member.progression.record_heist(outcome.success);
            let (progression, levels) = grant_experience(&member.progression, experience);
            member.progression = progression;
            member.refresh();
            if levels > 0 {
                tracing::info!(member = %member.name, level = member.progression.level, "Level up");
            }
        }

        tracing::info!(
            heist = %heist.name,
            success = outcome.success,
            payout = outcome.total_payout,
            injuries = outcome.injuries.len(),
            budget = self.budget,
            "Heist complete"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::attributes::Attributes;
    use crate::character::generation::{CharacterClass, Rarity};
    use crate::character::skills::Skill;
    use crate::core::dice::ScriptedDice;
    use crate::encounter::definition::Encounter;
    use crate::heist::mission::HeistRequirements;

    fn recruit(crew: &mut Crew, class: CharacterClass) -> CharacterId {
        let member = TeamMember::new(
            "Crew",
            class,
            Rarity::Common,
            Attributes::default(),
            class.base_skills(),
        );
        crew.recruit(member).unwrap()
    }

    #[test]
    fn test_recruit_charges_budget() {
        let mut crew = Crew::new(800);
        recruit(&mut crew, CharacterClass::Muscle);
        assert_eq!(crew.budget, 300);
        let member = TeamMember::new(
            "Too Pricey",
            CharacterClass::Face,
            Rarity::Common,
            Attributes::default(),
            CharacterClass::Face.base_skills(),
        );
        assert!(matches!(
            crew.recruit(member),
            Err(HeistError::InsufficientFunds { needed: 500, available: 300 })
        ));
    }

    #[test]
    fn test_equip_and_unequip_move_items() {
        let mut crew = Crew::new(1_000);
        let id = recruit(&mut crew, CharacterClass::Safecracker);
        let drill =
            crew.add_equipment(Equipment::new("Drill", EquipmentSlot::Tool, Rarity::Common));
        let picks = crew.add_equipment(Equipment::new("Picks", EquipmentSlot::Tool, Rarity::Rare));

        crew.equip(id, drill).unwrap();
        assert_eq!(crew.inventory.len(), 1);

        crew.equip(id, picks).unwrap();
        assert_eq!(crew.inventory.len(), 1);
        assert_eq!(crew.inventory[0].id, drill);

        assert_eq!(crew.unequip(id, EquipmentSlot::Tool).unwrap(), picks);
        assert_eq!(crew.inventory.len(), 2);
        assert!(matches!(
            crew.unequip(id, EquipmentSlot::Tool),
            Err(HeistError::SlotEmpty { .. })
        ));
    }

    #[test]
    fn test_equip_requirements() {
        let mut crew = Crew::new(1_000);
        let id = recruit(&mut crew, CharacterClass::Muscle);
        let rifle = crew.add_equipment(
            Equipment::new("Rifle", EquipmentSlot::Weapon, Rarity::Epic).with_required_level(3),
        );
        let deck = crew.add_equipment(
            Equipment::new("Cyberdeck", EquipmentSlot::Gadget, Rarity::Rare)
                .with_required_class(CharacterClass::Hacker),
        );
        assert!(matches!(crew.equip(id, rifle), Err(HeistError::RequirementNotMet(_))));
        assert!(matches!(crew.equip(id, deck), Err(HeistError::RequirementNotMet(_))));
        assert_eq!(crew.inventory.len(), 2);

        crew.grant_experience(id, 500).unwrap();
        assert!(crew.equip(id, rifle).is_ok());
    }

    #[test]
    fn test_heist_lifecycle() {
        let mut crew = Crew::new(2_000);
        let id = recruit(&mut crew, CharacterClass::Infiltrator);
        let heist = AutomatedHeist::new(
            "Gallery",
            100,
            vec![Encounter::new("Skylight", Skill::Stealth, 10)],
        );
        let heist_id = crew.start_heist(heist.clone(), &[id]).unwrap();
        assert!(crew.is_busy(id));
        assert!(matches!(
            crew.start_heist(heist, &[id]),
            Err(HeistError::MemberBusy(_))
        ));

        let mut dice = ScriptedDice::always(20);
        assert!(crew.tick(60, &mut dice).is_empty());
        let completed = crew.tick(60, &mut dice);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].heist_id, heist_id);
        assert!(completed[0].outcome.success);

        // Completes exactly once
        assert!(crew.tick(60, &mut dice).is_empty());
        assert!(!crew.is_busy(id));

        let member = crew.member(id).unwrap();
        assert_eq!(member.progression.heists_completed, 1);
        assert_eq!(member.progression.experience, 30);
        assert_eq!(crew.budget, 1_500 + completed[0].outcome.total_payout);
    }

    #[test]
    fn test_abandon_heist() {
        let mut crew = Crew::new(1_000);
        let id = recruit(&mut crew, CharacterClass::Driver);
        let chase = Encounter::new("Chase", Skill::Athletics, 10);
        let heist = AutomatedHeist::new("Getaway", 50, vec![chase]);
        let heist_id = crew.start_heist(heist, &[id]).unwrap();
        crew.abandon_heist(heist_id).unwrap();
        assert!(!crew.is_busy(id));
        assert!(crew.tick(100, &mut ScriptedDice::always(10)).is_empty());
        assert!(matches!(crew.abandon_heist(heist_id), Err(HeistError::HeistNotFound(_))));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut crew = Crew::new(1_000);
        let id = recruit(&mut crew, CharacterClass::Face);
        let toast = Encounter::new("Toast", Skill::Social, 10);
        let pair = HeistRequirements {
            min_team_size: 2,
            max_team_size: 2,
            ..HeistRequirements::default()
        };
        let heist = AutomatedHeist::new("Gala", 60, vec![toast]).with_requirements(pair);
        assert!(matches!(
            crew.start_heist(heist, &[id, id]),
            Err(HeistError::DuplicateMember(dup)) if dup == id
        ));
        assert!(crew.active_heists.is_empty());
    }

    #[test]
    fn test_rest_during_heist_survives_completion() {
        let mut crew = Crew::new(1_000);
        let id = recruit(&mut crew, CharacterClass::Infiltrator);
        crew.member_mut(id).unwrap().fatigue = 60;
        let skylight = Encounter::new("Skylight", Skill::Stealth, 10);
        let heist = AutomatedHeist::new("Gallery", 100, vec![skylight]);
        crew.start_heist(heist, &[id]).unwrap();

        crew.rest(id, 60).unwrap();
        assert_eq!(crew.member(id).unwrap().fatigue, 0);

        // Natural 20: no stress from the mission itself
        let completed = crew.tick(100, &mut ScriptedDice::always(20));
        assert_eq!(completed.len(), 1);
        assert_eq!(crew.member(id).unwrap().fatigue, 0);
    }

    #[test]
    fn test_outcome_adds_mission_stress_and_injuries() {
        let mut crew = Crew::new(1_000);
        let id = recruit(&mut crew, CharacterClass::Infiltrator);
        let sprain = "Minor injury: old sprain".to_string();
        crew.member_mut(id).unwrap().injuries.push(sprain);
        let door = Encounter::new("Door", Skill::Lockpicking, 30);
        let heist = AutomatedHeist::new("Vault", 100, vec![door]);
        crew.start_heist(heist, &[id]).unwrap();

        // Healed while away; natural 1 with a forced injury roll
        crew.member_mut(id).unwrap().injuries.clear();
        let completed = crew.tick(100, &mut ScriptedDice::always(1).with_chance(true));
        let outcome = &completed[0].outcome;

        let member = crew.member(id).unwrap();
        assert_eq!(member.fatigue, outcome.total_stress.min(100) as i32);
        assert_eq!(member.injuries.len(), 1);
        assert!(member.injuries[0].starts_with("Major injury"));
    }

    #[test]
    fn test_unknown_member() {
        let mut crew = Crew::new(0);
        let ghost = CharacterId::new();
        assert!(matches!(crew.grant_experience(ghost, 10), Err(HeistError::MemberNotFound(_))));
        assert!(matches!(crew.rest(ghost, 10), Err(HeistError::MemberNotFound(_))));
    }
}
