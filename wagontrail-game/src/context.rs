//! Shared simulation entities handed to every mode and state hook.
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::climate::Climate;
use crate::clock::Clock;
use crate::config::SimConfig;
use crate::director::{EventDirector, EventOutcome};
use crate::entity::{Person, Profession, Vehicle};
use crate::error::{ConfigError, SimError};
use crate::mode::ModeCategory;
use crate::score::TopTen;
use crate::trail::Trail;

/// Largest party the wagon carries.
pub const MAX_PLAYERS: usize = 4;

/// How the journey ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JourneyOutcome {
    Arrived { points: u32, rank: Option<u32> },
    PartyLost,
}

pub struct SimContext {
    pub config: SimConfig,
    pub vehicle: Vehicle,
    pub trail: Trail,
    pub clock: Clock,
    pub climate: Climate,
    pub director: EventDirector,
    pub top_ten: TopTen,
    pub rng: ChaCha20Rng,
    pub profession: Profession,
    pub total_turns: u32,
    pub pending_event: Option<EventOutcome>,
    /// One-line message shown on the travel screen until the next command.
    pub notice: Option<String>,
    pub outcome: Option<JourneyOutcome>,
    mode_requests: VecDeque<ModeCategory>,
    pending_turns: u32,
}

impl SimContext {
    /// Build a context on the embedded trail.
    ///
    /// # Errors
    ///
    /// Returns a [`SimError`] when the configuration is invalid or the trail cannot load.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        let trail = Trail::oregon()?;
        Self::with_trail(config, trail)
    }

    /// # Errors
    ///
    /// Returns a [`SimError`] when the configuration is invalid.
    pub fn with_trail(config: SimConfig, trail: Trail) -> Result<Self, SimError> {
        config.validate()?;
        let start = config.start.to_date()?;
        Ok(Self {
            vehicle: Vehicle::default(),
            trail,
            clock: Clock::new(start),
            climate: Climate::new(config.climate, config.start.month),
            director: EventDirector::new(config.event_chance_per_day),
            top_ten: TopTen::default(),
            rng: ChaCha20Rng::seed_from_u64(config.seed),
            profession: Profession::default(),
            total_turns: 0,
            pending_event: None,
            notice: None,
            outcome: None,
            mode_requests: VecDeque::new(),
            pending_turns: 0,
            config,
        })
    }

    /// Ask the driver to attach `category` once the current hook returns.
    pub fn request_mode(&mut self, category: ModeCategory) {
        debug!("mode {category} requested");
        self.mode_requests.push_back(category);
    }

    pub fn take_mode_requests(&mut self) -> Vec<ModeCategory> {
        self.mode_requests.drain(..).collect()
    }

    #[must_use]
    pub fn has_mode_requests(&self) -> bool {
        !self.mode_requests.is_empty()
    }

    /// Ask the driver to simulate `turns` days after the current frame.
    pub fn request_turns(&mut self, turns: u32) {
        self.pending_turns = self.pending_turns.saturating_add(turns);
    }

    pub fn take_pending_turns(&mut self) -> u32 {
        std::mem::take(&mut self.pending_turns)
    }

    /// Apply the choices collected on the new game screens.
    ///
    /// The first name leads the party. Extra names beyond [`MAX_PLAYERS`] are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMonth`] when `month` is outside `1..=12`.
    pub fn start_game(
        &mut self,
        profession: Profession,
        names: &[String],
        month: u32,
    ) -> Result<(), ConfigError> {
        self.clock.set_month(month)?;
        self.profession = profession;
        self.vehicle.reset(profession.starting_cents());
        for (idx, name) in names.iter().take(MAX_PLAYERS).enumerate() {
            self.vehicle.add_person(Person::new(profession, name.clone(), idx == 0));
        }
        self.climate = Climate::new(self.config.climate, month);
        self.outcome = None;
        info!(
            "new game: {profession} party of {} leaving {}",
            self.vehicle.passengers.len(),
            self.clock.long_date()
        );
        Ok(())
    }

    /// Name of the current location, or an empty string past the end of the table.
    #[must_use]
    pub fn location_name(&self) -> &str {
        self.trail
            .current_location()
            .map_or("", |location| location.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_game_builds_party_and_purse() {
        let mut sim = SimContext::new(SimConfig::default()).unwrap();
        let names: Vec<String> = ["Ann", "Bob", "Cy", "Di", "Ed"]
            .iter()
            .map(ToString::to_string)
            .collect();
        sim.start_game(Profession::Carpenter, &names, 5).unwrap();
        assert_eq!(sim.vehicle.passengers.len(), MAX_PLAYERS);
        assert_eq!(sim.vehicle.leader().map(|p| p.name.as_str()), Some("Ann"));
        assert_eq!(sim.vehicle.balance_cents, 80_000);
        assert_eq!(sim.clock.long_date(), "May 1, 1848");
    }

    #[test]
    fn requests_drain_in_order() {
        let mut sim = SimContext::new(SimConfig::default()).unwrap();
        sim.request_mode(ModeCategory::RiverCrossing);
        sim.request_mode(ModeCategory::RandomEvent);
        sim.request_turns(2);
        sim.request_turns(1);
        assert_eq!(
            sim.take_mode_requests(),
            vec![ModeCategory::RiverCrossing, ModeCategory::RandomEvent]
        );
        assert!(!sim.has_mode_requests());
        assert_eq!(sim.take_pending_turns(), 3);
        assert_eq!(sim.take_pending_turns(), 0);
    }
}
