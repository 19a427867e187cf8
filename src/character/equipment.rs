//! Equipment items, loadouts and bonus aggregation
//!
//! Items are immutable once defined. A character holds at most one item per
//! slot; the enhanced view produced by [`apply_equipment_bonuses`] is
//! ephemeral and never written back as the character's base state.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::character::attributes::{calculate_derived_stats, Attribute, Attributes};
use crate::character::generation::{CharacterClass, Rarity};
use crate::character::member::TeamMember;
use crate::character::skills::{Skill, Skills};
use crate::core::types::EquipmentId;

/// Where an item is worn or carried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Accessory,
    Tool,
    Gadget,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 5] = [
        EquipmentSlot::Weapon,
        EquipmentSlot::Armor,
        EquipmentSlot::Accessory,
        EquipmentSlot::Tool,
        EquipmentSlot::Gadget,
    ];
}

/// A single piece of gear
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equipment {
    pub id: EquipmentId,
    pub name: String,
    pub slot: EquipmentSlot,
    pub rarity: Rarity,
    #[serde(default)]
    pub attribute_bonuses: AHashMap<Attribute, i32>,
    #[serde(default)]
    pub skill_bonuses: AHashMap<Skill, i32>,
    #[serde(default)]
    pub required_level: Option<u32>,
    #[serde(default)]
    pub required_class: Option<CharacterClass>,
    #[serde(default)]
    pub special_effects: Vec<String>,
}

impl Equipment {
    pub fn new(name: impl Into<String>, slot: EquipmentSlot, rarity: Rarity) -> Self {
        Self {
            id: EquipmentId::new(),
            name: name.into(),
            slot,
            rarity,
            attribute_bonuses: AHashMap::new(),
            skill_bonuses: AHashMap::new(),
            required_level: None,
            required_class: None,
            special_effects: Vec::new(),
        }
    }

    pub fn with_attribute_bonus(mut self, attribute: Attribute, bonus: i32) -> Self {
        self.attribute_bonuses.insert(attribute, bonus);
        self
    }

    pub fn with_skill_bonus(mut self, skill: Skill, bonus: i32) -> Self {
        self.skill_bonuses.insert(skill, bonus);
        self
    }

    pub fn with_required_level(mut self, level: u32) -> Self {
        self.required_level = Some(level);
        self
    }

    pub fn with_required_class(mut self, class: CharacterClass) -> Self {
        self.required_class = Some(class);
        self
    }

    pub fn with_special_effect(mut self, effect: impl Into<String>) -> Self {
        self.special_effects.push(effect.into());
        self
    }

    /// Bonus to one skill, zero when the item does not touch it
    pub fn skill_bonus(&self, skill: Skill) -> i32 {
        self.skill_bonuses.get(&skill).copied().unwrap_or(0)
    }

    pub fn attribute_bonus(&self, attribute: Attribute) -> i32 {
        self.attribute_bonuses.get(&attribute).copied().unwrap_or(0)
    }
}

/// The five equipment slots of a character
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Loadout {
    pub weapon: Option<Equipment>,
    pub armor: Option<Equipment>,
    pub accessory: Option<Equipment>,
    pub tool: Option<Equipment>,
    pub gadget: Option<Equipment>,
}

impl Loadout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&Equipment> {
        self.slot_ref(slot).as_ref()
    }

    /// Put an item in its slot, returning whatever was there before
    pub fn equip(&mut self, item: Equipment) -> Option<Equipment> {
        self.slot_mut(item.slot).replace(item)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<Equipment> {
        self.slot_mut(slot).take()
    }

    /// Equipped items in slot order
    pub fn items(&self) -> impl Iterator<Item = &Equipment> {
        EquipmentSlot::ALL.into_iter().filter_map(move |slot| self.get(slot))
    }

    pub fn equipped_count(&self) -> usize {
        self.items().count()
    }

    pub fn has(&self, slot: EquipmentSlot) -> bool {
        self.get(slot).is_some()
    }

    fn slot_ref(&self, slot: EquipmentSlot) -> &Option<Equipment> {
        match slot {
            EquipmentSlot::Weapon => &self.weapon,
            EquipmentSlot::Armor => &self.armor,
            EquipmentSlot::Accessory => &self.accessory,
            EquipmentSlot::Tool => &self.tool,
            EquipmentSlot::Gadget => &self.gadget,
        }
    }

    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<Equipment> {
        match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Accessory => &mut self.accessory,
            EquipmentSlot::Tool => &mut self.tool,
            EquipmentSlot::Gadget => &mut self.gadget,
        }
    }
}

/// Summed attribute bonuses across a loadout
pub fn total_attribute_bonuses(loadout: &Loadout) -> Attributes {
    let mut totals = Attributes::uniform(0);
    for item in loadout.items() {
        for attribute in Attribute::ALL {
            *totals.get_mut(attribute) += item.attribute_bonus(attribute);
        }
    }
    totals
}

/// Summed skill bonuses across a loadout
pub fn total_skill_bonuses(loadout: &Loadout) -> Skills {
    let mut totals = Skills::default();
    for item in loadout.items() {
        for skill in Skill::ALL {
            *totals.get_mut(skill) += item.skill_bonus(skill);
        }
    }
    totals
}

/// Enhanced copy of a character with every equipped bonus applied
///
/// Attribute and skill bonuses are added on top of the stored values and
/// derived stats are recomputed from the enhanced attributes.
pub fn apply_equipment_bonuses(member: &TeamMember) -> TeamMember {
    let attribute_bonuses = total_attribute_bonuses(&member.equipment);
    let skill_bonuses = total_skill_bonuses(&member.equipment);

    let mut enhanced = member.clone();
    for attribute in Attribute::ALL {
        *enhanced.attributes.get_mut(attribute) += attribute_bonuses.get(attribute);
    }
    for skill in Skill::ALL {
        *enhanced.skills.get_mut(skill) += skill_bonuses.get(skill);
    }
    enhanced.derived_stats =
        calculate_derived_stats(&enhanced.attributes, enhanced.progression.level);
    enhanced
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lockpick_set() -> Equipment {
        Equipment::new("Tension Wrench Set", EquipmentSlot::Tool, Rarity::Uncommon)
            .with_skill_bonus(Skill::Lockpicking, 2)
            .with_attribute_bonus(Attribute::Dexterity, 1)
    }

    #[test]
    fn test_equip_replaces_same_slot() {
        let mut loadout = Loadout::new();
        let first = lockpick_set();
        let first_id = first.id;
        assert!(loadout.equip(first).is_none());

        let previous = loadout.equip(Equipment::new("Drill", EquipmentSlot::Tool, Rarity::Common));
        assert_eq!(previous.map(|item| item.id), Some(first_id));
        assert_eq!(loadout.equipped_count(), 1);
    }

    #[test]
    fn test_unequip_empties_slot() {
        let mut loadout = Loadout::new();
        loadout.equip(lockpick_set());
        assert!(loadout.unequip(EquipmentSlot::Tool).is_some());
        assert!(loadout.unequip(EquipmentSlot::Tool).is_none());
        assert!(!loadout.has(EquipmentSlot::Tool));
    }

    #[test]
    fn test_bonuses_sum_across_items() {
        let mut loadout = Loadout::new();
        loadout.equip(lockpick_set());
        loadout.equip(
            Equipment::new("Grip Gloves", EquipmentSlot::Accessory, Rarity::Common)
                .with_skill_bonus(Skill::Lockpicking, 1)
                .with_attribute_bonus(Attribute::Dexterity, 2),
        );

        assert_eq!(total_skill_bonuses(&loadout).lockpicking, 3);
        assert_eq!(total_skill_bonuses(&loadout).stealth, 0);
        assert_eq!(total_attribute_bonuses(&loadout).dexterity, 3);
    }

    #[test]
    fn test_missing_bonus_is_zero() {
        assert_eq!(lockpick_set().skill_bonus(Skill::Hacking), 0);
        assert_eq!(lockpick_set().attribute_bonus(Attribute::Charisma), 0);
    }
}
