//! Encounter balance constants - all grading thresholds in one place
//!
//! These define game balance. They are fixed, not read from config.

// Natural rolls
pub const NATURAL_CRITICAL: i32 = 20;
pub const NATURAL_FUMBLE: i32 = 1;

// Grading margins relative to the difficulty class
pub const CRITICAL_SUCCESS_MARGIN: i32 = 10;
pub const SUCCESS_MARGIN: i32 = 5;
pub const FAILURE_MARGIN: i32 = 5;

// Proficiency: floor((level - 1) / 4) + 2
pub const BASE_PROFICIENCY: i32 = 2;
pub const PROFICIENCY_LEVEL_STEP: i32 = 4;

// Condition modifiers
pub const FATIGUE_PENALTY_THRESHOLD: i32 = 50;
pub const FATIGUE_PENALTY_STEP: i32 = 10;
pub const HIGH_LOYALTY_THRESHOLD: i32 = 80;
pub const LOW_LOYALTY_THRESHOLD: i32 = 40;
pub const HIGH_LOYALTY_BONUS: i32 = 1;
pub const LOW_LOYALTY_PENALTY: i32 = 2;
pub const MAJOR_INJURY_PENALTY: i32 = 3;
pub const MINOR_INJURY_PENALTY: i32 = 1;

// Injury markers searched for in injury descriptions
pub const MAJOR_INJURY_MARKER: &str = "Major";
pub const MINOR_INJURY_MARKER: &str = "Minor";

// Chances
pub const FAILURE_INJURY_CHANCE: f64 = 0.2;
pub const CRITICAL_FAILURE_INJURY_CHANCE: f64 = 0.4;
pub const NARRATIVE_FLOURISH_CHANCE: f64 = 0.3;
