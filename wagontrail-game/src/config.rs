//! Simulation tuning loaded from JSON with serde defaults.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::climate::ClimateClassification;
use crate::error::ConfigError;

/// Calendar date the party leaves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl Default for StartDate {
    fn default() -> Self {
        Self {
            year: 1848,
            month: 3,
            day: 1,
        }
    }
}

impl StartDate {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStartDate`] when the fields are not a real date.
    pub fn to_date(self) -> Result<NaiveDate, ConfigError> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or(
            ConfigError::InvalidStartDate {
                year: self.year,
                month: self.month,
                day: self.day,
            },
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default = "SimConfig::default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub start: StartDate,
    /// Chance per travelled day that the event director fires.
    #[serde(default = "SimConfig::default_event_chance")]
    pub event_chance_per_day: f32,
    #[serde(default)]
    pub climate: ClimateClassification,
    /// Frames a river crossing takes before it resolves.
    #[serde(default = "SimConfig::default_crossing_ticks")]
    pub crossing_ticks: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: Self::default_seed(),
            start: StartDate::default(),
            event_chance_per_day: Self::default_event_chance(),
            climate: ClimateClassification::default(),
            crossing_ticks: Self::default_crossing_ticks(),
        }
    }
}

impl SimConfig {
    const fn default_seed() -> u64 {
        1848
    }

    const fn default_event_chance() -> f32 {
        0.08
    }

    const fn default_crossing_ticks() -> u8 {
        3
    }

    /// Parse and validate a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error when the JSON is malformed or a field is out of range.
    pub fn from_json(json: &str) -> Result<Self, crate::SimError> {
        let config: Self =
            serde_json::from_str(json).map_err(crate::error::DataError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.event_chance_per_day) {
            return Err(ConfigError::RangeViolation {
                field: "event_chance_per_day",
                min: 0.0,
                max: 1.0,
                value: self.event_chance_per_day,
            });
        }
        if !(1..=10).contains(&self.crossing_ticks) {
            return Err(ConfigError::RangeViolation {
                field: "crossing_ticks",
                min: 1.0,
                max: 10.0,
                value: f32::from(self.crossing_ticks),
            });
        }
        self.start.to_date()?;
        Ok(())
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
