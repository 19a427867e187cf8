//! Character math: attributes, skills, progression and equipment
//!
//! Stored state is kept minimal (base attributes, base skills, progression,
//! loadout); skills and derived stats are always recomputable from it.

pub mod attributes;
pub mod equipment;
pub mod generation;
pub mod member;
pub mod progression;
pub mod skills;

pub use attributes::{
    calculate_derived_stats, get_attribute_modifier, Attribute, Attributes, DerivedStats,
};
pub use equipment::{apply_equipment_bonuses, Equipment, EquipmentSlot, Loadout};
pub use generation::{generate_starting_attributes, CharacterClass, Rarity};
pub use member::{calculate_power_level, Personality, TeamMember};
pub use progression::{
    calculate_experience_to_next, calculate_total_experience, grant_experience, level_up_character,
    CharacterProgression,
};
pub use skills::{calculate_skills, Skill, Skills};
