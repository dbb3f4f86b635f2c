//! Party members and the professions they start with.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::vehicle::{RationLevel, TravelPace};

const HEALTH_MAX: i32 = 100;
const STARVATION_LOSS: i32 = 12;
const GRUELING_STRAIN: i32 = 3;
const STRENUOUS_STRAIN: i32 = 1;
const BARE_BONES_STRAIN: i32 = 2;
const DAILY_RECOVERY: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Profession {
    #[default]
    Banker,
    Carpenter,
    Farmer,
}

impl Profession {
    pub const ALL: [Self; 3] = [Self::Banker, Self::Carpenter, Self::Farmer];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Banker => "banker",
            Self::Carpenter => "carpenter",
            Self::Farmer => "farmer",
        }
    }

    /// Cash the party leaves Independence with, in cents.
    #[must_use]
    pub const fn starting_cents(self) -> i64 {
        match self {
            Self::Banker => 160_000,
            Self::Carpenter => 80_000,
            Self::Farmer => 40_000,
        }
    }

    /// Final score multiplier; harder starts score more.
    #[must_use]
    pub const fn score_multiplier(self) -> u32 {
        match self {
            Self::Banker => 1,
            Self::Carpenter => 2,
            Self::Farmer => 3,
        }
    }

    #[must_use]
    pub const fn hometown(self) -> &'static str {
        match self {
            Self::Banker => "Boston",
            Self::Carpenter => "Ohio",
            Self::Farmer => "Illinois",
        }
    }
}

impl fmt::Display for Profession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profession {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "banker" => Ok(Self::Banker),
            "carpenter" => Ok(Self::Carpenter),
            "farmer" => Ok(Self::Farmer),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Good,
    Fair,
    Poor,
    VeryPoor,
    Dead,
}

impl HealthStatus {
    #[must_use]
    pub const fn from_points(points: i32) -> Self {
        match points {
            i32::MIN..=0 => Self::Dead,
            1..=24 => Self::VeryPoor,
            25..=49 => Self::Poor,
            50..=74 => Self::Fair,
            _ => Self::Good,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
            Self::VeryPoor => "very poor",
            Self::Dead => "dead",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conditions a passenger lives through on a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayConditions {
    pub fed: bool,
    pub ration: RationLevel,
    pub pace: TravelPace,
    pub moving: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub profession: Profession,
    pub is_leader: bool,
    #[serde(default = "Person::default_health")]
    pub health: i32,
}

impl Person {
    const fn default_health() -> i32 {
        HEALTH_MAX
    }

    #[must_use]
    pub fn new(profession: Profession, name: impl Into<String>, is_leader: bool) -> Self {
        Self {
            name: name.into(),
            profession,
            is_leader,
            health: Self::default_health(),
        }
    }

    #[must_use]
    pub const fn status(&self) -> HealthStatus {
        HealthStatus::from_points(self.health)
    }

    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Apply damage from illness or injury, clamping at zero.
    pub fn damage(&mut self, amount: i32) {
        if amount <= 0 || !self.is_alive() {
            return;
        }
        self.health = (self.health - amount).max(0);
    }

    /// Restore health, clamping at the maximum. Dead passengers stay dead.
    pub fn heal(&mut self, amount: i32) {
        if amount <= 0 || !self.is_alive() {
            return;
        }
        self.health = (self.health + amount).min(HEALTH_MAX);
    }

    /// Advance one day of travel or rest.
    pub fn tick(&mut self, day: DayConditions) {
        if !self.is_alive() {
            return;
        }
        if !day.fed {
            self.damage(STARVATION_LOSS);
            return;
        }
        let mut strain = 0;
        if day.moving {
            strain += match day.pace {
                TravelPace::Steady => 0,
                TravelPace::Strenuous => STRENUOUS_STRAIN,
                TravelPace::Grueling => GRUELING_STRAIN,
            };
        }
        if matches!(day.ration, RationLevel::BareBones) {
            strain += BARE_BONES_STRAIN;
        }
        if strain > 0 {
            self.damage(strain);
        } else {
            self.heal(DAILY_RECOVERY);
        }
    }
}
