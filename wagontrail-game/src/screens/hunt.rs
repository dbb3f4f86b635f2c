//! Hunting for food with the party's bullets.
use log::info;
use rand::Rng;
use std::fmt;

use crate::context::SimContext;
use crate::entity::Entity;
use crate::error::ModeResult;
use crate::mode::{Menu, Mode, ModeCategory, ModeCore, Screen, StateFactory};

/// Pounds of meat each living party member can carry back to the wagon.
pub const CARRY_PER_PERSON: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prey {
    Squirrel,
    Rabbit,
    Deer,
    Bear,
    Buffalo,
}

impl Prey {
    pub const ALL: [Self; 5] = [
        Self::Squirrel,
        Self::Rabbit,
        Self::Deer,
        Self::Bear,
        Self::Buffalo,
    ];

    #[must_use]
    pub const fn pounds(self) -> u32 {
        match self {
            Self::Squirrel => 1,
            Self::Rabbit => 4,
            Self::Deer => 60,
            Self::Bear => 120,
            Self::Buffalo => 400,
        }
    }

    /// Chance a single shot brings the animal down.
    #[must_use]
    pub const fn hit_chance(self) -> f32 {
        match self {
            Self::Squirrel => 0.45,
            Self::Rabbit => 0.6,
            Self::Deer => 0.5,
            Self::Bear => 0.35,
            Self::Buffalo => 0.3,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Squirrel => "squirrel",
            Self::Rabbit => "rabbit",
            Self::Deer => "deer",
            Self::Bear => "bear",
            Self::Buffalo => "buffalo",
        }
    }
}

impl fmt::Display for Prey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HuntInfo {
    pub prey: Option<Prey>,
    pub shots: u32,
    pub bagged_lbs: u32,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuntCommand {
    Shoot,
    Wait,
    Stop,
}

pub struct HuntScreen {
    core: ModeCore<HuntInfo>,
}

pub fn create(_sim: &SimContext) -> Box<dyn Mode> {
    Box::new(HuntScreen {
        core: ModeCore::new(ModeCategory::Hunt, HuntInfo::default(), StateFactory::new()),
    })
}

fn spot_prey<R: Rng + ?Sized>(rng: &mut R) -> Prey {
    Prey::ALL[rng.gen_range(0..Prey::ALL.len())]
}

impl HuntScreen {
    fn shoot(&mut self, sim: &mut SimContext) {
        let data = &mut self.core.data;
        let Some(prey) = data.prey else {
            data.message = "There is nothing in sight to shoot at.".to_string();
            return;
        };
        if sim.vehicle.remove_item(Entity::Ammo, 1) == 0 {
            data.message = "You are out of bullets.".to_string();
            return;
        }
        data.shots += 1;
        if sim.rng.r#gen::<f32>() < prey.hit_chance() {
            data.bagged_lbs += prey.pounds();
            data.message = format!("You shot a {prey}, {} pounds of meat.", prey.pounds());
        } else {
            data.message = format!("You missed the {prey}.");
        }
        data.prey = Some(spot_prey(&mut sim.rng));
    }

    fn stop(&mut self, sim: &mut SimContext) {
        let data = &self.core.data;
        let cap = CARRY_PER_PERSON * sim.vehicle.alive_count();
        let carried = data.bagged_lbs.min(cap);
        let added = sim.vehicle.add_item(Entity::Food, carried);
        info!(
            "hunt over: {} shots, {} pounds shot, {added} pounds kept",
            data.shots, data.bagged_lbs
        );
        sim.notice = Some(if data.bagged_lbs > carried {
            format!(
                "From the animals you shot you got {} pounds of meat, but you could only \
                 carry {added} pounds back to the wagon.",
                data.bagged_lbs
            )
        } else {
            format!("You brought {added} pounds of meat back to the wagon.")
        });
        sim.request_turns(1);
        self.core.flag_for_removal();
    }
}

impl Screen for HuntScreen {
    type Data = HuntInfo;
    type Command = HuntCommand;

    fn core(&self) -> &ModeCore<HuntInfo> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModeCore<HuntInfo> {
        &mut self.core
    }

    fn enter(&mut self, sim: &mut SimContext) -> ModeResult<()> {
        self.core.data.prey = Some(spot_prey(&mut sim.rng));
        Ok(())
    }

    fn header(&self, sim: &SimContext) -> Option<String> {
        let data = &self.core.data;
        let sighting = data
            .prey
            .map_or_else(|| "Nothing moves.".to_string(), |prey| format!("You see a {prey}."));
        Some(format!(
            "Hunting\n\nBullets: {}\nMeat so far: {} pounds\n\n{sighting}\n{}\n",
            sim.vehicle.quantity(Entity::Ammo),
            data.bagged_lbs,
            data.message
        ))
    }

    fn menu(&self, _sim: &SimContext) -> Menu<HuntCommand> {
        Menu::titled("You may:")
            .item(HuntCommand::Shoot, "Shoot")
            .item(HuntCommand::Wait, "Wait for other game")
            .item(HuntCommand::Stop, "Stop hunting")
    }

    fn on_command(&mut self, command: HuntCommand, sim: &mut SimContext) -> ModeResult<()> {
        match command {
            HuntCommand::Shoot => self.shoot(sim),
            HuntCommand::Wait => {
                let data = &mut self.core.data;
                data.prey = Some(spot_prey(&mut sim.rng));
                data.message.clear();
            }
            HuntCommand::Stop => self.stop(sim),
        }
        Ok(())
    }
}
