//! Final scoring and the top ten list.
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::entity::{Entity, HealthStatus, Profession, Vehicle};
use crate::numbers::len_to_u32;

const TOP_TEN_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Greenhorn,
    Adventurer,
    TrailGuide,
}

impl Rating {
    #[must_use]
    pub const fn from_points(points: u32) -> Self {
        match points {
            0..=2_999 => Self::Greenhorn,
            3_000..=6_999 => Self::Adventurer,
            _ => Self::TrailGuide,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Greenhorn => "Greenhorn",
            Self::Adventurer => "Adventurer",
            Self::TrailGuide => "Trail guide",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub name: String,
    pub points: u32,
    pub rating: Rating,
}

impl Score {
    #[must_use]
    pub fn new(name: impl Into<String>, points: u32) -> Self {
        Self {
            name: name.into(),
            points,
            rating: Rating::from_points(points),
        }
    }
}

/// Points for everyone and everything that reached the end of the trail.
#[must_use]
pub fn final_score(vehicle: &Vehicle, profession: Profession) -> u32 {
    let people: u32 = vehicle
        .passengers
        .iter()
        .map(|person| match person.status() {
            HealthStatus::Good => 500,
            HealthStatus::Fair => 400,
            HealthStatus::Poor => 300,
            HealthStatus::VeryPoor => 200,
            HealthStatus::Dead => 0,
        })
        .sum();
    let parts = vehicle.quantity(Entity::Wheel)
        + vehicle.quantity(Entity::Axle)
        + vehicle.quantity(Entity::Tongue);
    let cash = u32::try_from(vehicle.balance_cents.max(0) / 500).unwrap_or(u32::MAX);
    let goods = 50
        + vehicle.quantity(Entity::Animal) * 4
        + parts * 2
        + vehicle.quantity(Entity::Clothes) * 2
        + vehicle.quantity(Entity::Ammo) / 50
        + vehicle.quantity(Entity::Food) / 25;
    (people + goods)
        .saturating_add(cash)
        .saturating_mul(profession.score_multiplier())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopTen {
    entries: Vec<Score>,
}

impl Default for TopTen {
    fn default() -> Self {
        let entries = [
            ("Stephen Meek", 7_650),
            ("Celinda Hines", 5_694),
            ("Andrew Sublette", 4_138),
            ("David Hastings", 2_945),
            ("Ezra Meeker", 2_052),
            ("Willian Vaughn", 1_401),
            ("Mary Bartlett", 937),
            ("William Wiggins", 615),
            ("Charles Hopper", 396),
            ("Elijah White", 250),
        ]
        .into_iter()
        .map(|(name, points)| Score::new(name, points))
        .collect();
        Self { entries }
    }
}

impl TopTen {
    #[must_use]
    pub fn entries(&self) -> &[Score] {
        &self.entries
    }

    /// True if `points` would earn a place on the list.
    #[must_use]
    pub fn qualifies(&self, points: u32) -> bool {
        self.entries.len() < TOP_TEN_LEN
            || self.entries.last().is_some_and(|last| points > last.points)
    }

    /// Insert a score, keeping the list sorted and capped. Returns its rank from 1.
    pub fn insert(&mut self, score: Score) -> Option<u32> {
        if !self.qualifies(score.points) {
            return None;
        }
        let idx = self
            .entries
            .iter()
            .position(|entry| score.points > entry.points)
            .unwrap_or(self.entries.len());
        self.entries.insert(idx, score);
        self.entries.truncate(TOP_TEN_LEN);
        Some(len_to_u32(idx) + 1)
    }

    /// Restore the default list.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("The Oregon Top Ten\n\nName                 Points  Rating\n");
        for entry in &self.entries {
            let _ = writeln!(
                out,
                "{:<20} {:>6}  {}",
                entry.name,
                entry.points,
                entry.rating.as_str()
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Person;

    #[test]
    fn insert_keeps_order_and_cap() {
        let mut top = TopTen::default();
        assert!(!top.qualifies(250));
        assert_eq!(top.insert(Score::new("Low", 100)), None);
        assert_eq!(top.insert(Score::new("Iris", 5_000)), Some(3));
        assert_eq!(top.entries().len(), 10);
        assert_eq!(top.entries()[2].name, "Iris");
        assert!(top.entries().iter().all(|e| e.name != "Elijah White"));
        top.reset();
        assert_eq!(top, TopTen::default());
    }

    #[test]
    fn score_counts_people_goods_and_profession() {
        let mut vehicle = Vehicle::default();
        vehicle.reset(0);
        vehicle.add_person(Person::new(Profession::Farmer, "Zeke", true));
        vehicle.add_item(Entity::Animal, 2);
        let points = final_score(&vehicle, Profession::Farmer);
        assert_eq!(points, (500 + 50 + 8) * 3);
        assert_eq!(Rating::from_points(points), Rating::Greenhorn);
    }
}
