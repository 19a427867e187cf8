//! Heist Crew - crew progression and heist resolution engine
//!
//! Pure game rules for an idle heist-management game. Attributes feed
//! skills, skills feed d20 encounter checks, and encounters roll up into
//! automated heists whose rewards flow back into the crew.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`core`] | Errors, ids, dice and simulator config |
//! | [`character`] | Attributes, skills, progression, equipment, members |
//! | [`encounter`] | Encounter definitions, environment, check resolution |
//! | [`heist`] | Missions, synergy, simulation, odds and the crew store |

pub mod character;
pub mod core;
pub mod encounter;
pub mod heist;
