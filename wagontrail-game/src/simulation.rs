//! Turn-based driver tying the mode stack to simulated time and the screen.
use chrono::Datelike;
use log::{debug, info, trace};

use crate::clock::ClockEvent;
use crate::config::SimConfig;
use crate::context::{JourneyOutcome, SimContext};
use crate::entity::Entity;
use crate::error::{ModeResult, SimError};
use crate::mode::{Mode, ModeCategory, ModeFactory, ModeManager};
use crate::render::{Renderer, compose};
use crate::score::{Score, final_score};
use crate::screens::default_mode_factory;

/// Owns the shared entities, the mode stack and the published screen.
pub struct GameSimulation {
    sim: SimContext,
    modes: ModeManager,
    renderer: Renderer,
    started: bool,
}

impl GameSimulation {
    /// Build a simulation with every built-in screen registered.
    ///
    /// # Errors
    ///
    /// Returns a [`SimError`] when the configuration is invalid or the trail cannot load.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        Ok(Self::from_parts(SimContext::new(config)?, default_mode_factory()))
    }

    #[must_use]
    pub fn from_parts(sim: SimContext, factory: ModeFactory) -> Self {
        Self {
            sim,
            modes: ModeManager::new(factory),
            renderer: Renderer::new(),
            started: false,
        }
    }

    /// Attach the travel screen with the new game screen over it. Runs once.
    ///
    /// # Errors
    ///
    /// Propagates mode construction failures.
    pub fn start(&mut self) -> ModeResult<()> {
        if self.started {
            return Ok(());
        }
        self.started = true;
        self.modes.add_mode(ModeCategory::Travel, &mut self.sim)?;
        self.modes.add_mode(ModeCategory::NewGame, &mut self.sim)?;
        self.flush_mode_requests()?;
        self.render();
        Ok(())
    }

    /// Run one frame: tick the active mode, attach requested modes, run
    /// requested turns, then publish the screen if it changed.
    ///
    /// # Errors
    ///
    /// Propagates mode manager failures.
    pub fn tick(&mut self) -> ModeResult<()> {
        trace!("frame at turn {}", self.sim.total_turns);
        self.modes.tick(&mut self.sim)?;
        self.flush_mode_requests()?;
        for _ in 0..self.sim.take_pending_turns() {
            self.take_turn()?;
        }
        self.render();
        Ok(())
    }

    /// Deliver a line of input to the active mode. Returns `false` when refused.
    ///
    /// # Errors
    ///
    /// Propagates mode manager failures.
    pub fn send_input(&mut self, line: &str) -> ModeResult<bool> {
        let accepted = self.modes.send_input(line.trim(), &mut self.sim)?;
        self.flush_mode_requests()?;
        self.render();
        Ok(accepted)
    }

    /// Advance simulated time by one day.
    ///
    /// # Errors
    ///
    /// Propagates failures attaching modes requested by day-end effects.
    pub fn take_turn(&mut self) -> ModeResult<()> {
        self.sim.total_turns += 1;
        for event in self.sim.clock.tick_day() {
            match event {
                ClockEvent::DayEnd(_) => self.on_day_end(),
                ClockEvent::MonthEnd(months) => debug!("month {months} of the journey ended"),
                ClockEvent::YearEnd(years) => info!("year {years} of the journey ended"),
            }
        }
        self.flush_mode_requests()
    }

    fn on_day_end(&mut self) {
        let sim = &mut self.sim;
        if sim.outcome.is_some() {
            return;
        }
        let month = sim.clock.date().month();
        sim.climate.tick(month, &mut sim.rng);
        if sim.vehicle.broken_part.is_some() && sim.vehicle.try_use_spare_part() {
            sim.notice = Some("You repaired the wagon with a spare part.".to_string());
        }
        let day = sim.vehicle.tick();
        if day.went_hungry {
            debug!("party went hungry");
        }
        if sim.vehicle.party_lost() {
            info!("everyone in the party has died");
            sim.vehicle.stop();
            sim.outcome = Some(JourneyOutcome::PartyLost);
            return;
        }
        if !sim.vehicle.is_moving() {
            return;
        }
        let mut miles = sim.vehicle.mileage();
        if sim.climate.weather.is_severe() {
            miles /= 2;
        }
        sim.vehicle.odometer += miles;
        if sim.trail.move_towards_next(miles).is_some() {
            sim.vehicle.stop();
            if let Some(category) = sim
                .trail
                .current_location()
                .and_then(|location| location.kind.arrival_mode())
            {
                sim.request_mode(category);
            }
            if sim.trail.is_finished() {
                finish_journey(sim);
            }
            return;
        }
        if let Some(outcome) = sim
            .director
            .roll(&mut sim.vehicle, &sim.climate, &mut sim.rng)
        {
            sim.pending_event = Some(outcome);
            sim.request_mode(ModeCategory::RandomEvent);
        }
    }

    fn flush_mode_requests(&mut self) -> ModeResult<()> {
        while self.sim.has_mode_requests() {
            for category in self.sim.take_mode_requests() {
                self.modes.add_mode(category, &mut self.sim)?;
            }
        }
        Ok(())
    }

    /// Compose and publish the current screen. Returns whether it changed.
    pub fn render(&mut self) -> bool {
        let text = compose(&self.modes, &self.sim);
        self.renderer.present(text)
    }

    pub fn on_mode_changed(&mut self, listener: impl FnMut(ModeCategory) + 'static) {
        self.modes.on_mode_changed(listener);
    }

    pub fn on_screen_changed(&mut self, listener: impl FnMut(&str) + 'static) {
        self.renderer.on_screen_changed(listener);
    }

    #[must_use]
    pub fn screen(&self) -> &str {
        self.renderer.screen()
    }

    #[must_use]
    pub fn accepting_input(&self) -> bool {
        self.modes.accepting_input()
    }

    #[must_use]
    pub fn active_category(&self) -> Option<ModeCategory> {
        self.modes.active_category()
    }

    #[must_use]
    pub fn active_mode(&self) -> Option<&dyn Mode> {
        self.modes.active_mode()
    }

    #[must_use]
    pub const fn modes(&self) -> &ModeManager {
        &self.modes
    }

    #[must_use]
    pub const fn context(&self) -> &SimContext {
        &self.sim
    }

    pub const fn context_mut(&mut self) -> &mut SimContext {
        &mut self.sim
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.sim.outcome.is_some()
    }

    /// Tear down the mode stack and listeners.
    pub fn destroy(&mut self) {
        self.modes.destroy();
        self.renderer.clear();
    }
}

fn finish_journey(sim: &mut SimContext) {
    let points = final_score(&sim.vehicle, sim.profession);
    let leader = sim
        .vehicle
        .leader()
        .map_or_else(|| "Unknown".to_string(), |person| person.name.clone());
    let rank = sim.top_ten.insert(Score::new(leader, points));
    info!(
        "reached {} with {} survivors, {} oxen and {points} points",
        sim.location_name(),
        sim.vehicle.alive_count(),
        sim.vehicle.quantity(Entity::Animal)
    );
    sim.outcome = Some(JourneyOutcome::Arrived { points, rank });
}
