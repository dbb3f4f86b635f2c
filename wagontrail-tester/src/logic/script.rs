use anyhow::{Context, Result, bail};
use wagontrail_game::{
    Entity, GameSimulation, LocationKind, Mode, ModeCategory, SimConfig, StateId,
};

/// Frames allowed for a single wait before a script gives up.
pub const MAX_WAIT_FRAMES: usize = 400;

/// A running game plus helpers for feeding it scripted lines.
pub struct ScriptedGame {
    pub game: GameSimulation,
    pub inputs_sent: usize,
    pub frames: usize,
}

impl ScriptedGame {
    pub fn start(config: SimConfig) -> Result<Self> {
        let mut game = GameSimulation::new(config).context("building simulation")?;
        game.start().context("attaching opening modes")?;
        Ok(Self {
            game,
            inputs_sent: 0,
            frames: 0,
        })
    }

    /// Send a line that must be accepted.
    pub fn send(&mut self, line: &str) -> Result<()> {
        let accepted = self
            .game
            .send_input(line)
            .with_context(|| format!("sending {line:?}"))?;
        if !accepted {
            bail!("input {line:?} refused by {}", self.describe_position());
        }
        self.inputs_sent += 1;
        Ok(())
    }

    pub fn send_all(&mut self, lines: &[&str]) -> Result<()> {
        lines.iter().try_for_each(|line| self.send(line))
    }

    pub fn tick(&mut self) -> Result<()> {
        self.frames += 1;
        self.game.tick().context("ticking simulation")?;
        Ok(())
    }

    /// Tick until `done` holds, failing after [`MAX_WAIT_FRAMES`].
    pub fn tick_until(
        &mut self,
        what: &str,
        mut done: impl FnMut(&GameSimulation) -> bool,
    ) -> Result<()> {
        for _ in 0..MAX_WAIT_FRAMES {
            if done(&self.game) {
                return Ok(());
            }
            self.tick()?;
        }
        bail!("gave up waiting for {what} at {}", self.describe_position())
    }

    pub fn expect_mode(&self, category: ModeCategory) -> Result<()> {
        match self.game.active_category() {
            Some(active) if active == category => Ok(()),
            _ => bail!("expected {category}, found {}", self.describe_position()),
        }
    }

    #[must_use]
    pub fn state(&self) -> Option<StateId> {
        self.game
            .active_mode()
            .and_then(|mode| mode.current_state())
            .map(|state| state.id)
    }

    /// Active mode and state, day count and location for failure messages.
    #[must_use]
    pub fn describe_position(&self) -> String {
        let sim = self.game.context();
        let mode = self
            .game
            .active_category()
            .map_or_else(|| "no mode".to_string(), |category| category.to_string());
        let state = self
            .state()
            .map_or_else(|| "no state".to_string(), |state| state.to_string());
        format!(
            "{mode}/{state} on turn {} at {:?}",
            sim.total_turns,
            sim.location_name()
        )
    }

    /// Profession, an auto-named party and a starting month, ending in the outfitting store.
    pub fn create_party(&mut self, profession: &str, month: &str) -> Result<()> {
        self.expect_mode(ModeCategory::NewGame)?;
        self.send_all(&[profession, "", "y", month])?;
        self.expect_mode(ModeCategory::InitialPurchases)
    }

    /// Dismiss store advice, buy a standard load and return to the trail.
    pub fn outfit(&mut self) -> Result<()> {
        self.expect_mode(ModeCategory::InitialPurchases)?;
        if self.state() == Some(StateId::StoreAdvice) {
            self.send("")?;
        }
        for (item, amount) in [
            ("1", "6"),
            ("2", "800"),
            ("3", "6"),
            ("4", "300"),
            ("5", "1"),
            ("6", "1"),
            ("7", "1"),
        ] {
            self.send_all(&[item, amount])?;
        }
        self.send("8")?;
        self.tick()?;
        self.expect_mode(ModeCategory::Travel)?;
        if self.game.context().vehicle.quantity(Entity::Animal) == 0 {
            bail!("left the store without oxen");
        }
        Ok(())
    }

    /// Make one sensible move for whatever screen is showing.
    pub fn autopilot_step(&mut self) -> Result<()> {
        if !self.game.accepting_input() {
            return self.tick();
        }
        let Some(category) = self.game.active_category() else {
            bail!("no mode attached");
        };
        let sim = self.game.context();
        match (category, self.state()) {
            (ModeCategory::RandomEvent, _)
            | (ModeCategory::RiverCrossing, Some(StateId::CrossingResult)) => self.send("")?,
            (ModeCategory::RiverCrossing, _) => {
                let ferry = sim
                    .trail
                    .current_location()
                    .map(|location| &location.kind);
                let affordable = matches!(
                    ferry,
                    Some(LocationKind::River { ferry_cost_cents, .. })
                        if *ferry_cost_cents > 0 && *ferry_cost_cents <= sim.vehicle.balance_cents
                );
                self.send(if affordable { "3" } else { "2" })?;
            }
            (ModeCategory::ForkInRoad, _) => self.send("1")?,
            (ModeCategory::Hunt, _) => {
                if sim.vehicle.quantity(Entity::Ammo) > 0 && self.inputs_sent % 4 != 0 {
                    self.send("Shoot")?;
                } else {
                    self.send("Stop hunting")?;
                }
            }
            (ModeCategory::Trade, _) => self.send("Yes")?,
            (ModeCategory::Travel, Some(StateId::Drive)) => {}
            (ModeCategory::Travel, Some(_)) => self.send("")?,
            (ModeCategory::Travel, None) => {
                let vehicle = &sim.vehicle;
                let line = if vehicle.broken_part.is_some() {
                    "Attempt to trade"
                } else if vehicle.quantity(Entity::Food) < 100 && vehicle.quantity(Entity::Ammo) > 0
                {
                    "Hunt for food"
                } else {
                    "Continue on trail"
                };
                self.send(line)?;
            }
            (other, _) => bail!("autopilot has no move for {other}"),
        }
        self.tick()
    }
}
