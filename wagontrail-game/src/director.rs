//! Random events rolled at the end of each travelled day.
use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::climate::Climate;
use crate::entity::{Entity, Vehicle};
use crate::numbers::fraction_of;

/// Days of food below which the low-food warning can fire.
const LOW_FOOD_DAYS: u32 = 5;
const ILLNESS_DAMAGE: i32 = 20;
const SNAKE_BITE_DAMAGE: i32 = 30;
const WEATHER_DAMAGE: i32 = 5;
const WILD_FRUIT_POUNDS: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Vehicle,
    Animal,
    Person,
    Warning,
    Climate,
    Attack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    BrokenPart,
    OxWandersOff,
    OxInjured,
    Illness,
    SnakeBite,
    LowFood,
    SevereWeather,
    Thief,
    WildFruit,
}

impl EventKind {
    pub const ALL: [Self; 9] = [
        Self::BrokenPart,
        Self::OxWandersOff,
        Self::OxInjured,
        Self::Illness,
        Self::SnakeBite,
        Self::LowFood,
        Self::SevereWeather,
        Self::Thief,
        Self::WildFruit,
    ];

    #[must_use]
    pub const fn category(self) -> EventCategory {
        match self {
            Self::BrokenPart => EventCategory::Vehicle,
            Self::OxWandersOff | Self::OxInjured => EventCategory::Animal,
            Self::Illness | Self::SnakeBite => EventCategory::Person,
            Self::LowFood | Self::WildFruit => EventCategory::Warning,
            Self::SevereWeather => EventCategory::Climate,
            Self::Thief => EventCategory::Attack,
        }
    }

    /// Whether the event can apply to the party as it stands.
    fn eligible(self, vehicle: &Vehicle, climate: &Climate) -> bool {
        match self {
            Self::BrokenPart => vehicle.broken_part.is_none(),
            Self::OxWandersOff | Self::OxInjured => vehicle.quantity(Entity::Animal) > 0,
            Self::Illness | Self::SnakeBite => vehicle.alive_count() > 0,
            Self::LowFood => {
                let daily = vehicle.ration.pounds_per_person() * vehicle.alive_count();
                vehicle.quantity(Entity::Food) < daily * LOW_FOOD_DAYS
            }
            Self::SevereWeather => climate.weather.is_severe(),
            Self::Thief => vehicle.inventory.values().any(|item| item.quantity > 0),
            Self::WildFruit => true,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BrokenPart => "broken part",
            Self::OxWandersOff => "ox wanders off",
            Self::OxInjured => "injured ox",
            Self::Illness => "illness",
            Self::SnakeBite => "snake bite",
            Self::LowFood => "low food",
            Self::SevereWeather => "severe weather",
            Self::Thief => "thief",
            Self::WildFruit => "wild fruit",
        };
        f.write_str(name)
    }
}

/// What happened, ready to show on the random event screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventOutcome {
    pub kind: EventKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDirector {
    pub chance_per_day: f32,
    #[serde(default)]
    pub fired: u32,
}

impl EventDirector {
    #[must_use]
    pub const fn new(chance_per_day: f32) -> Self {
        Self {
            chance_per_day,
            fired: 0,
        }
    }

    /// Roll for today's event and execute it on a hit.
    pub fn roll<R: Rng + ?Sized>(
        &mut self,
        vehicle: &mut Vehicle,
        climate: &Climate,
        rng: &mut R,
    ) -> Option<EventOutcome> {
        if rng.r#gen::<f32>() >= self.chance_per_day {
            return None;
        }
        let eligible: Vec<EventKind> = EventKind::ALL
            .iter()
            .copied()
            .filter(|kind| kind.eligible(vehicle, climate))
            .collect();
        if eligible.is_empty() {
            return None;
        }
        let kind = eligible[rng.gen_range(0..eligible.len())];
        Some(self.trigger(kind, vehicle, rng))
    }

    /// Execute a specific event against the wagon and party.
    pub fn trigger<R: Rng + ?Sized>(
        &mut self,
        kind: EventKind,
        vehicle: &mut Vehicle,
        rng: &mut R,
    ) -> EventOutcome {
        self.fired += 1;
        let message = match kind {
            EventKind::BrokenPart => broken_part(vehicle, rng),
            EventKind::OxWandersOff => {
                vehicle.remove_item(Entity::Animal, 1);
                "One of your oxen wandered off in the night.".to_string()
            }
            EventKind::OxInjured => {
                vehicle.remove_item(Entity::Animal, 1);
                "An ox has injured its leg and had to be left behind.".to_string()
            }
            EventKind::Illness => hurt_someone(vehicle, rng, ILLNESS_DAMAGE, "has dysentery"),
            EventKind::SnakeBite => {
                hurt_someone(vehicle, rng, SNAKE_BITE_DAMAGE, "was bitten by a snake")
            }
            EventKind::LowFood => "Warning: you are running low on food.".to_string(),
            EventKind::SevereWeather => {
                for person in &mut vehicle.passengers {
                    person.damage(WEATHER_DAMAGE);
                }
                "Severe weather batters the party.".to_string()
            }
            EventKind::Thief => {
                let food = vehicle.quantity(Entity::Food);
                let stolen = fraction_of(food, rng.gen_range(0.1..0.3));
                let stolen = vehicle.remove_item(Entity::Food, stolen);
                format!("A thief comes during the night and steals {stolen} pounds of food.")
            }
            EventKind::WildFruit => {
                let found = vehicle.add_item(Entity::Food, WILD_FRUIT_POUNDS);
                format!("You find wild fruit and gather {found} pounds of food.")
            }
        };
        info!("random event: {kind}");
        EventOutcome { kind, message }
    }
}

fn broken_part<R: Rng + ?Sized>(vehicle: &mut Vehicle, rng: &mut R) -> String {
    const PARTS: [Entity; 3] = [Entity::Wheel, Entity::Axle, Entity::Tongue];
    let part = PARTS[rng.gen_range(0..PARTS.len())];
    vehicle.break_part(part);
    let name = part.as_str().trim_end_matches('s');
    if vehicle.try_use_spare_part() {
        format!("A {name} broke. You replaced it with a spare part.")
    } else {
        format!("A {name} broke and you have no spare part. Trade for one to continue.")
    }
}

fn hurt_someone<R: Rng + ?Sized>(
    vehicle: &mut Vehicle,
    rng: &mut R,
    damage: i32,
    what: &str,
) -> String {
    let alive: Vec<usize> = vehicle
        .passengers
        .iter()
        .enumerate()
        .filter(|(_, person)| person.is_alive())
        .map(|(idx, _)| idx)
        .collect();
    if alive.is_empty() {
        return "The trail is quiet.".to_string();
    }
    let idx = alive[rng.gen_range(0..alive.len())];
    let Some(person) = vehicle.passengers.get_mut(idx) else {
        return "The trail is quiet.".to_string();
    };
    person.damage(damage);
    if person.is_alive() {
        format!("{} {what}.", person.name)
    } else {
        format!("{} {what} and has died.", person.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climate::ClimateClassification;
    use crate::entity::{Person, Profession};
    use rand::SeedableRng;
    use rand::rngs::mock::StepRng;
    use rand_chacha::ChaCha20Rng;

    fn wagon() -> Vehicle {
        let mut vehicle = Vehicle::default();
        vehicle.reset(10_000);
        vehicle.add_person(Person::new(Profession::Farmer, "Ann", true));
        vehicle.add_item(Entity::Animal, 4);
        vehicle.add_item(Entity::Food, 500);
        vehicle
    }

    #[test]
    fn zero_chance_never_fires() {
        let mut director = EventDirector::new(0.0);
        let mut vehicle = wagon();
        let climate = Climate::new(ClimateClassification::Moderate, 4);
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        for _ in 0..100 {
            assert!(director.roll(&mut vehicle, &climate, &mut rng).is_none());
        }
        assert_eq!(director.fired, 0);
    }

    #[test]
    fn certain_chance_always_fires() {
        let mut director = EventDirector::new(1.0);
        let mut vehicle = wagon();
        let climate = Climate::new(ClimateClassification::Moderate, 4);
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let outcome = director.roll(&mut vehicle, &climate, &mut rng).unwrap();
        assert!(!outcome.message.is_empty());
        assert_eq!(director.fired, 1);
    }

    #[test]
    fn broken_part_uses_spare_when_available() {
        let mut director = EventDirector::new(1.0);
        let mut vehicle = wagon();
        vehicle.add_item(Entity::Wheel, 1);
        let mut rng = StepRng::new(0, 0);
        let outcome = director.trigger(EventKind::BrokenPart, &mut vehicle, &mut rng);
        assert!(outcome.message.contains("replaced it"));
        assert_eq!(vehicle.quantity(Entity::Wheel), 0);
        assert!(vehicle.broken_part.is_none());
    }

    #[test]
    fn broken_part_without_spare_disables_wagon() {
        let mut director = EventDirector::new(1.0);
        let mut vehicle = wagon();
        let mut rng = StepRng::new(0, 0);
        director.trigger(EventKind::BrokenPart, &mut vehicle, &mut rng);
        assert_eq!(vehicle.broken_part, Some(Entity::Wheel));
        assert_eq!(EventKind::BrokenPart.category(), EventCategory::Vehicle);
    }
}
