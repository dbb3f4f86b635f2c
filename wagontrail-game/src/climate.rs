//! Daily temperature and weather driven by a climate classification.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Swing in degrees applied around the monthly mean.
const DAILY_VARIATION: i32 = 12;
const RAIN_CHANCE: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClimateClassification {
    Polar,
    Continental,
    #[default]
    Moderate,
    Dry,
    Tropical,
}

impl ClimateClassification {
    /// Mean temperature in Fahrenheit for a month in `1..=12`.
    #[must_use]
    pub fn mean_temperature(self, month: u32) -> i32 {
        const MODERATE: [i32; 12] = [30, 34, 43, 54, 64, 73, 78, 76, 68, 56, 44, 34];
        let idx = if (1..=12).contains(&month) {
            usize::try_from(month - 1).unwrap_or(0)
        } else {
            0
        };
        let offset = match self {
            Self::Polar => -30,
            Self::Continental => -10,
            Self::Moderate => 0,
            Self::Dry => 8,
            Self::Tropical => 20,
        };
        MODERATE[idx] + offset
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    Clear,
    Rain,
    Snow,
    Hot,
    Cold,
}

impl Weather {
    /// Bad weather slows travel and can stall the wagon.
    #[must_use]
    pub const fn is_severe(self) -> bool {
        matches!(self, Self::Snow | Self::Hot)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Rain => "rainy",
            Self::Snow => "snowy",
            Self::Hot => "very hot",
            Self::Cold => "very cold",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Climate {
    pub classification: ClimateClassification,
    pub temperature: i32,
    pub weather: Weather,
}

impl Climate {
    #[must_use]
    pub fn new(classification: ClimateClassification, month: u32) -> Self {
        Self {
            classification,
            temperature: classification.mean_temperature(month),
            weather: Weather::Clear,
        }
    }

    /// Roll today's temperature and weather.
    pub fn tick<R: Rng + ?Sized>(&mut self, month: u32, rng: &mut R) {
        let mean = self.classification.mean_temperature(month);
        self.temperature = mean + rng.gen_range(-DAILY_VARIATION..=DAILY_VARIATION);
        let wet = rng.r#gen::<f32>() < RAIN_CHANCE;
        self.weather = match self.temperature {
            t if t <= 20 => Weather::Cold,
            t if t <= 32 && wet => Weather::Snow,
            t if t >= 95 => Weather::Hot,
            _ if wet => Weather::Rain,
            _ => Weather::Clear,
        };
    }

    /// Short description used on the travel screen.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{} ({}\u{b0}F)", self.weather, self.temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::mock::StepRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn classification_shifts_monthly_mean() {
        assert_eq!(ClimateClassification::Moderate.mean_temperature(7), 78);
        assert_eq!(ClimateClassification::Polar.mean_temperature(1), 0);
        assert_eq!(ClimateClassification::Tropical.mean_temperature(13), 50);
        assert_eq!(ClimateClassification::Moderate.mean_temperature(0), 30);
        assert_eq!(ClimateClassification::Moderate.mean_temperature(12), 34);
    }

    #[test]
    fn temperatures_stay_within_variation() {
        let mut climate = Climate::new(ClimateClassification::Moderate, 5);
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..200 {
            climate.tick(5, &mut rng);
            assert!((52..=76).contains(&climate.temperature));
            assert_ne!(climate.weather, Weather::Snow);
        }
    }

    #[test]
    fn zero_rolls_produce_cold_wet_days() {
        let mut climate = Climate::new(ClimateClassification::Polar, 1);
        let mut rng = StepRng::new(0, 0);
        climate.tick(1, &mut rng);
        assert_eq!(climate.weather, Weather::Cold);
    }
}
