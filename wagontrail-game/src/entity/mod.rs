//! Simulation entities carried along the trail.
pub mod item;
pub mod person;
pub mod vehicle;

pub use item::{Entity, SimItem};
pub use person::{DayConditions, HealthStatus, Person, Profession};
pub use vehicle::{RationLevel, TravelPace, Vehicle, VehicleDay, VehicleStatus};
