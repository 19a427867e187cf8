//! Encounter definitions, environment modifiers and check resolution

pub mod constants;
pub mod definition;
pub mod environment;
pub mod narrative;
pub mod resolution;

pub use definition::{Complexity, Encounter, EnvironmentalFactor};
pub use environment::{get_environmental_modifiers, TimeOfDay, Weather};
pub use resolution::{resolve_encounter, EncounterResult, Outcome};
