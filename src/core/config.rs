//! Heist simulation tuning with documented constants
//!
//! Encounter grading thresholds live in `encounter::constants` and are not
//! tunable. Everything here shapes how a whole mission is run and paid out.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{HeistError, Result};

/// Configuration for the automated heist simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeistConfig {
    // === CREW SELECTION ===
    /// Members above this fatigue are not picked for an encounter
    pub max_fatigue_for_selection: i32,

    /// Members carrying more injuries than this are not picked
    pub max_injuries_for_selection: usize,

    /// Fatigue never rises above this value
    pub fatigue_cap: i32,

    // === MISSION OUTCOME ===
    /// Fraction of successful encounters required for the mission to succeed
    pub success_threshold: f64,

    // === PAYOUT ===
    /// Flat payout of every mission before experience scaling
    pub base_payout: i64,

    /// On success, each point of total experience adds this much payout
    pub experience_payout_factor: i64,

    /// Success rate above which the bonus multiplier applies
    pub bonus_threshold: f64,

    /// Payout multiplier for a clean run
    ///
    /// At 1.3 a mission with more than 80% successful encounters pays 30% more.
    pub bonus_multiplier: f64,

    /// Share of (base + experience) paid out when the mission fails
    pub failure_payout_share: f64,
}

impl Default for HeistConfig {
    fn default() -> Self {
        Self {
            max_fatigue_for_selection: 80,
            max_injuries_for_selection: 2,
            fatigue_cap: 100,

            success_threshold: 0.5,

            base_payout: 1000,
            experience_payout_factor: 2,
            bonus_threshold: 0.8,
            bonus_multiplier: 1.3,
            failure_payout_share: 0.2,
        }
    }
}

impl HeistConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: HeistConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("success_threshold", self.success_threshold),
            ("bonus_threshold", self.bonus_threshold),
            ("failure_payout_share", self.failure_payout_share),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(HeistError::InvalidConfig(format!(
                    "{} ({}) must be within 0.0..=1.0",
                    name, value
                )));
            }
        }

        if self.fatigue_cap <= 0 {
            return Err(HeistError::InvalidConfig(format!(
                "fatigue_cap ({}) must be positive",
                self.fatigue_cap
            )));
        }

        if self.max_fatigue_for_selection > self.fatigue_cap {
            return Err(HeistError::InvalidConfig(format!(
                "max_fatigue_for_selection ({}) should be <= fatigue_cap ({})",
                self.max_fatigue_for_selection, self.fatigue_cap
            )));
        }

        if self.base_payout < 0 || self.experience_payout_factor < 0 {
            return Err(HeistError::InvalidConfig("Payouts must not be negative".into()));
        }

        if self.bonus_multiplier < 1.0 {
            return Err(HeistError::InvalidConfig(format!(
                "bonus_multiplier ({}) should be >= 1.0",
                self.bonus_multiplier
            )));
        }

        Ok(())
    }
}
