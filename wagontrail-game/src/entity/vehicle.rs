//! The wagon: inventory, passengers, pace and rations.
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::item::{Entity, SimItem};
use super::person::{DayConditions, Person};
use crate::numbers::len_to_u32;

/// Oxen needed to pull at full speed.
const FULL_TEAM: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TravelPace {
    #[default]
    Steady,
    Strenuous,
    Grueling,
}

impl TravelPace {
    pub const ALL: [Self; 3] = [Self::Steady, Self::Strenuous, Self::Grueling];

    #[must_use]
    pub const fn miles_per_day(self) -> u32 {
        match self {
            Self::Steady => 12,
            Self::Strenuous => 16,
            Self::Grueling => 20,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Steady => "steady",
            Self::Strenuous => "strenuous",
            Self::Grueling => "grueling",
        }
    }
}

impl fmt::Display for TravelPace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RationLevel {
    #[default]
    Filling,
    Meager,
    BareBones,
}

impl RationLevel {
    pub const ALL: [Self; 3] = [Self::Filling, Self::Meager, Self::BareBones];

    /// Pounds of food each living passenger eats per day.
    #[must_use]
    pub const fn pounds_per_person(self) -> u32 {
        match self {
            Self::Filling => 3,
            Self::Meager => 2,
            Self::BareBones => 1,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Filling => "filling",
            Self::Meager => "meager",
            Self::BareBones => "bare bones",
        }
    }
}

impl fmt::Display for RationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    #[default]
    Stopped,
    Moving,
    Disabled,
}

/// Summary of one day on the wagon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VehicleDay {
    pub food_eaten: u32,
    pub went_hungry: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default)]
    pub balance_cents: i64,
    #[serde(default = "Vehicle::default_inventory")]
    pub inventory: BTreeMap<Entity, SimItem>,
    #[serde(default)]
    pub passengers: Vec<Person>,
    #[serde(default)]
    pub pace: TravelPace,
    #[serde(default)]
    pub ration: RationLevel,
    #[serde(default)]
    pub status: VehicleStatus,
    /// Total miles travelled since leaving the first location.
    #[serde(default)]
    pub odometer: u32,
    /// Part that broke and still needs replacing.
    #[serde(default)]
    pub broken_part: Option<Entity>,
}

impl Default for Vehicle {
    fn default() -> Self {
        Self {
            balance_cents: 0,
            inventory: Self::default_inventory(),
            passengers: Vec::new(),
            pace: TravelPace::default(),
            ration: RationLevel::default(),
            status: VehicleStatus::default(),
            odometer: 0,
            broken_part: None,
        }
    }
}

impl Vehicle {
    fn default_inventory() -> BTreeMap<Entity, SimItem> {
        Entity::ALL
            .iter()
            .map(|&entity| (entity, SimItem::catalog(entity)))
            .collect()
    }

    /// Empty the wagon and hand it the starting purse.
    pub fn reset(&mut self, starting_cents: i64) {
        *self = Self {
            balance_cents: starting_cents,
            ..Self::default()
        };
        debug!("vehicle reset with {starting_cents} cents");
    }

    pub fn add_person(&mut self, person: Person) {
        self.passengers.push(person);
    }

    #[must_use]
    pub fn leader(&self) -> Option<&Person> {
        self.passengers.iter().find(|person| person.is_leader)
    }

    #[must_use]
    pub fn quantity(&self, entity: Entity) -> u32 {
        self.inventory.get(&entity).map_or(0, |item| item.quantity)
    }

    /// Add units of an entity. Returns the number that fit.
    pub fn add_item(&mut self, entity: Entity, amount: u32) -> u32 {
        self.inventory
            .entry(entity)
            .or_insert_with(|| SimItem::catalog(entity))
            .add(amount)
    }

    /// Remove units of an entity. Returns the number actually removed.
    pub fn remove_item(&mut self, entity: Entity, amount: u32) -> u32 {
        self.inventory
            .get_mut(&entity)
            .map_or(0, |item| item.remove(amount))
    }

    /// Deduct cents from the purse when affordable.
    pub fn spend(&mut self, cents: i64) -> bool {
        if cents < 0 || cents > self.balance_cents {
            return false;
        }
        self.balance_cents -= cents;
        true
    }

    /// Pay for and load a purchased item.
    pub fn buy_item(&mut self, item: &SimItem) -> bool {
        if !self.spend(item.total_cost_cents()) {
            return false;
        }
        self.add_item(item.entity, item.quantity);
        true
    }

    pub fn set_pace(&mut self, pace: TravelPace) {
        info!("travel pace set to {pace}");
        self.pace = pace;
    }

    pub fn set_ration(&mut self, ration: RationLevel) {
        info!("food ration set to {ration}");
        self.ration = ration;
    }

    /// Start rolling unless the wagon is disabled.
    pub fn depart(&mut self) {
        if self.status != VehicleStatus::Disabled {
            self.status = VehicleStatus::Moving;
        }
    }

    pub fn stop(&mut self) {
        if self.status == VehicleStatus::Moving {
            self.status = VehicleStatus::Stopped;
        }
    }

    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.status == VehicleStatus::Moving
    }

    /// Miles the wagon will cover today.
    #[must_use]
    pub fn mileage(&self) -> u32 {
        let oxen = self.quantity(Entity::Animal);
        if !self.is_moving() || oxen == 0 || self.broken_part.is_some() {
            return 0;
        }
        let base = self.pace.miles_per_day();
        if oxen < FULL_TEAM { base / 2 } else { base }
    }

    #[must_use]
    pub fn alive_count(&self) -> u32 {
        len_to_u32(self.passengers.iter().filter(|p| p.is_alive()).count())
    }

    /// True once every passenger has died.
    #[must_use]
    pub fn party_lost(&self) -> bool {
        !self.passengers.is_empty() && self.alive_count() == 0
    }

    #[must_use]
    pub fn total_weight(&self) -> u32 {
        self.inventory.values().map(SimItem::total_weight).sum()
    }

    /// Mark a part as broken, disabling the wagon.
    pub fn break_part(&mut self, part: Entity) {
        self.broken_part = Some(part);
        self.status = VehicleStatus::Disabled;
    }

    /// Replace the broken part from spares. Returns false when none are on hand.
    pub fn try_use_spare_part(&mut self) -> bool {
        let Some(part) = self.broken_part else {
            return true;
        };
        if self.remove_item(part, 1) == 0 {
            return false;
        }
        info!("replaced broken {part} with a spare");
        self.broken_part = None;
        self.status = VehicleStatus::Stopped;
        true
    }

    /// Feed the party and advance every passenger by one day.
    pub fn tick(&mut self) -> VehicleDay {
        let needed = self.ration.pounds_per_person() * self.alive_count();
        let food_eaten = self.remove_item(Entity::Food, needed);
        let went_hungry = food_eaten < needed;
        let day = DayConditions {
            fed: !went_hungry,
            ration: self.ration,
            pace: self.pace,
            moving: self.is_moving(),
        };
        for person in &mut self.passengers {
            person.tick(day);
        }
        VehicleDay {
            food_eaten,
            went_hungry,
        }
    }
}
