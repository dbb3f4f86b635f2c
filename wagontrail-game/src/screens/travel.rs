//! The travel screen that sits at the bottom of the stack for the whole game.
use std::fmt::Write as _;

use super::shared::{PRESS_ENTER, look_at_map};
use crate::context::{JourneyOutcome, SimContext};
use crate::entity::{Entity, HealthStatus, RationLevel, TravelPace};
use crate::error::ModeResult;
use crate::mode::{
    Menu, Mode, ModeCategory, ModeCore, Screen, State, StateCx, StateFactory, StateId, Transition,
};
use crate::numbers::format_cents;

const MAX_REST_DAYS: u32 = 9;

/// Per-visit travel bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TravelInfo {
    /// Which advice line the next chat shows.
    pub advice_cursor: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelCommand {
    Continue,
    CheckSupplies,
    LookAtMap,
    ChangePace,
    ChangeRations,
    Rest,
    Trade,
    TalkToPeople,
    BuySupplies,
    Hunt,
    ManageGame,
}

pub struct TravelScreen {
    core: ModeCore<TravelInfo>,
}

pub fn create(_sim: &SimContext) -> Box<dyn Mode> {
    let states = StateFactory::<TravelInfo>::new()
        .register(StateId::Drive, |_| Box::new(Drive { started: false }))
        .register(StateId::CheckSupplies, |_| Box::new(CheckSupplies))
        .register(StateId::LookAtMap, look_at_map)
        .register(StateId::ChangePace, |_| Box::new(ChangePace))
        .register(StateId::ChangeRations, |_| Box::new(ChangeRations))
        .register(StateId::Resting, |_| Box::new(Resting))
        .register(StateId::TalkToPeople, |_| Box::new(TalkToPeople));
    Box::new(TravelScreen {
        core: ModeCore::new(ModeCategory::Travel, TravelInfo::default(), states),
    })
}

/// Worst health status among living passengers.
fn party_health(sim: &SimContext) -> HealthStatus {
    sim.vehicle
        .passengers
        .iter()
        .filter(|person| person.is_alive())
        .map(|person| person.status())
        .max()
        .unwrap_or(HealthStatus::Dead)
}

fn status_block(sim: &SimContext) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Date: {}", sim.clock.long_date());
    let _ = writeln!(out, "Weather: {}", sim.climate.describe());
    let _ = writeln!(out, "Health: {}", party_health(sim));
    let _ = writeln!(out, "Pace: {}", sim.vehicle.pace);
    let _ = writeln!(out, "Rations: {}", sim.vehicle.ration);
    let _ = writeln!(out, "Food: {} pounds", sim.vehicle.quantity(Entity::Food));
    if let Some(next) = sim.trail.next_location() {
        let miles = if sim.trail.arrived() {
            sim.trail
                .current_location()
                .map_or(0, |location| location.miles_to_next)
        } else {
            sim.trail.miles_to_next()
        };
        let _ = writeln!(out, "Next landmark: {} ({miles} miles)", next.name);
    }
    let _ = writeln!(out, "Miles traveled: {}", sim.vehicle.odometer);
    out
}

impl Screen for TravelScreen {
    type Data = TravelInfo;
    type Command = TravelCommand;

    fn core(&self) -> &ModeCore<TravelInfo> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModeCore<TravelInfo> {
        &mut self.core
    }

    fn header(&self, sim: &SimContext) -> Option<String> {
        let mut out = format!("{}\n", sim.location_name());
        out.push_str(&status_block(sim));
        match &sim.outcome {
            Some(JourneyOutcome::Arrived { points, rank }) => {
                let _ = writeln!(
                    out,
                    "\nYou made it to {}! Final score: {points}",
                    sim.location_name()
                );
                if let Some(rank) = rank {
                    let _ = writeln!(out, "You placed #{rank} on the top ten.");
                }
            }
            Some(JourneyOutcome::PartyLost) => {
                out.push_str("\nEveryone in your party has died.\n");
            }
            None => {}
        }
        if let Some(part) = sim.vehicle.broken_part {
            let _ = writeln!(out, "\nYour wagon is stuck with broken {part}.");
        }
        if let Some(notice) = &sim.notice {
            let _ = writeln!(out, "\n{notice}");
        }
        Some(out)
    }

    fn menu(&self, sim: &SimContext) -> Menu<TravelCommand> {
        let mut menu = Menu::titled("You may:")
            .item(TravelCommand::Continue, "Continue on trail")
            .item(TravelCommand::CheckSupplies, "Check supplies")
            .item(TravelCommand::LookAtMap, "Look at map")
            .item(TravelCommand::ChangePace, "Change pace")
            .item(TravelCommand::ChangeRations, "Change food rations")
            .item(TravelCommand::Rest, "Stop to rest")
            .item(TravelCommand::Trade, "Attempt to trade")
            .item(TravelCommand::TalkToPeople, "Talk to people");
        if sim.trail.arrived()
            && sim
                .trail
                .current_location()
                .is_some_and(|location| location.is_settlement())
        {
            menu.push(TravelCommand::BuySupplies, "Buy supplies");
        }
        menu.item(TravelCommand::Hunt, "Hunt for food")
            .item(TravelCommand::ManageGame, "Management options")
    }

    fn on_command(&mut self, command: TravelCommand, sim: &mut SimContext) -> ModeResult<()> {
        sim.notice = None;
        match command {
            TravelCommand::Continue => {
                if sim.outcome.is_some() {
                    sim.notice = Some("Your journey is over.".to_string());
                    return Ok(());
                }
                self.core.set_state(StateId::Drive)
            }
            TravelCommand::CheckSupplies => self.core.set_state(StateId::CheckSupplies),
            TravelCommand::LookAtMap => self.core.set_state(StateId::LookAtMap),
            TravelCommand::ChangePace => self.core.set_state(StateId::ChangePace),
            TravelCommand::ChangeRations => self.core.set_state(StateId::ChangeRations),
            TravelCommand::Rest => self.core.set_state(StateId::Resting),
            TravelCommand::TalkToPeople => self.core.set_state(StateId::TalkToPeople),
            TravelCommand::Trade => {
                sim.request_mode(ModeCategory::Trade);
                Ok(())
            }
            TravelCommand::BuySupplies => {
                sim.request_mode(ModeCategory::Store);
                Ok(())
            }
            TravelCommand::Hunt => {
                if sim.vehicle.quantity(Entity::Ammo) == 0 {
                    sim.notice = Some("You have no bullets to hunt with.".to_string());
                } else {
                    sim.request_mode(ModeCategory::Hunt);
                }
                Ok(())
            }
            TravelCommand::ManageGame => {
                sim.request_mode(ModeCategory::ManagementOptions);
                Ok(())
            }
        }
    }
}

/// Rolls the wagon forward one day per frame until it arrives, stalls or is stopped.
struct Drive {
    started: bool,
}

impl State<TravelInfo> for Drive {
    fn id(&self) -> StateId {
        StateId::Drive
    }

    fn render(&self, _data: &TravelInfo, sim: &SimContext) -> String {
        format!("{}\nPress ENTER to size up the situation\n", status_block(sim))
    }

    fn on_input(&mut self, _input: &str, cx: &mut StateCx<'_, TravelInfo>) -> Transition {
        cx.sim.vehicle.stop();
        Transition::Clear
    }

    fn tick(&mut self, cx: &mut StateCx<'_, TravelInfo>) -> Transition {
        let sim = &mut *cx.sim;
        if !self.started {
            self.started = true;
            if sim.trail.is_finished() || sim.outcome.is_some() {
                return Transition::Clear;
            }
            if sim.vehicle.quantity(Entity::Animal) == 0 {
                sim.notice = Some("You have no oxen to pull the wagon.".to_string());
                return Transition::Clear;
            }
            sim.trail.depart();
            sim.vehicle.depart();
        }
        if sim.outcome.is_some() || sim.trail.arrived() || !sim.vehicle.is_moving() {
            sim.vehicle.stop();
            return Transition::Clear;
        }
        if sim.vehicle.quantity(Entity::Animal) == 0 {
            sim.vehicle.stop();
            sim.notice = Some("You have no oxen left to pull the wagon.".to_string());
            return Transition::Clear;
        }
        sim.request_turns(1);
        Transition::Stay
    }
}

struct CheckSupplies;

impl State<TravelInfo> for CheckSupplies {
    fn id(&self) -> StateId {
        StateId::CheckSupplies
    }

    fn render(&self, _data: &TravelInfo, sim: &SimContext) -> String {
        let mut out = String::from("Your Supplies\n\n");
        for item in sim.vehicle.inventory.values() {
            let _ = writeln!(out, "  {:<16}{}", item.name, item.quantity);
        }
        let _ = writeln!(out, "  {:<16}{}", "Money", format_cents(sim.vehicle.balance_cents));
        out.push_str("\nParty\n\n");
        for person in &sim.vehicle.passengers {
            let _ = writeln!(out, "  {:<16}{}", person.name, person.status());
        }
        let _ = write!(out, "\n{PRESS_ENTER}\n");
        out
    }

    fn on_input(&mut self, _input: &str, _cx: &mut StateCx<'_, TravelInfo>) -> Transition {
        Transition::Clear
    }
}

struct ChangePace;

impl ChangePace {
    fn choices() -> Menu<TravelPace> {
        TravelPace::ALL
            .iter()
            .fold(Menu::titled("You may:"), |menu, pace| {
                menu.item(
                    *pace,
                    format!("a {pace} pace ({} miles a day)", pace.miles_per_day()),
                )
            })
    }
}

impl State<TravelInfo> for ChangePace {
    fn id(&self) -> StateId {
        StateId::ChangePace
    }

    fn render(&self, _data: &TravelInfo, sim: &SimContext) -> String {
        format!(
            "Change pace (currently \"{}\")\n\n{}",
            sim.vehicle.pace,
            Self::choices().render()
        )
    }

    fn on_input(&mut self, input: &str, cx: &mut StateCx<'_, TravelInfo>) -> Transition {
        match Self::choices().select(input) {
            Some(pace) => {
                cx.sim.vehicle.set_pace(pace);
                Transition::Clear
            }
            None => Transition::Stay,
        }
    }
}

struct ChangeRations;

impl ChangeRations {
    fn choices() -> Menu<RationLevel> {
        RationLevel::ALL
            .iter()
            .fold(Menu::titled("You may:"), |menu, ration| {
                menu.item(
                    *ration,
                    format!("{ration} ({} pounds a day each)", ration.pounds_per_person()),
                )
            })
    }
}

impl State<TravelInfo> for ChangeRations {
    fn id(&self) -> StateId {
        StateId::ChangeRations
    }

    fn render(&self, _data: &TravelInfo, sim: &SimContext) -> String {
        format!(
            "Change food rations (currently \"{}\")\n\n{}",
            sim.vehicle.ration,
            Self::choices().render()
        )
    }

    fn on_input(&mut self, input: &str, cx: &mut StateCx<'_, TravelInfo>) -> Transition {
        match Self::choices().select(input) {
            Some(ration) => {
                cx.sim.vehicle.set_ration(ration);
                Transition::Clear
            }
            None => Transition::Stay,
        }
    }
}

struct Resting;

impl State<TravelInfo> for Resting {
    fn id(&self) -> StateId {
        StateId::Resting
    }

    fn render(&self, _data: &TravelInfo, _sim: &SimContext) -> String {
        format!("How many days would you like to rest? (1-{MAX_REST_DAYS})\n")
    }

    fn on_input(&mut self, input: &str, cx: &mut StateCx<'_, TravelInfo>) -> Transition {
        if let Ok(days) = input.parse::<u32>()
            && (1..=MAX_REST_DAYS).contains(&days)
        {
            cx.sim.vehicle.stop();
            cx.sim.request_turns(days);
            cx.sim.notice = Some(format!("You rested for {days} days."));
        }
        Transition::Clear
    }
}

struct TalkToPeople;

impl State<TravelInfo> for TalkToPeople {
    fn id(&self) -> StateId {
        StateId::TalkToPeople
    }

    fn render(&self, data: &TravelInfo, sim: &SimContext) -> String {
        let advice = sim
            .trail
            .current_location()
            .map(|location| location.advice.as_slice())
            .unwrap_or_default();
        let line = if advice.is_empty() {
            "Nobody here has anything to say."
        } else {
            advice[data.advice_cursor % advice.len()].as_str()
        };
        format!("{line}\n\n{PRESS_ENTER}\n")
    }

    fn on_input(&mut self, _input: &str, cx: &mut StateCx<'_, TravelInfo>) -> Transition {
        cx.data.advice_cursor = cx.data.advice_cursor.wrapping_add(1);
        Transition::Clear
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::entity::Profession;

    fn travel() -> (Box<dyn Mode>, SimContext) {
        let mut sim = SimContext::new(SimConfig::default()).unwrap();
        sim.start_game(Profession::Banker, &["Ann".to_string()], 3)
            .unwrap();
        (create(&sim), sim)
    }

    #[test]
    fn drive_departs_and_requests_a_turn_per_frame() {
        let (mut mode, mut sim) = travel();
        sim.vehicle.add_item(Entity::Animal, 2);
        mode.on_input("1", &mut sim).unwrap();
        assert_eq!(mode.current_state().unwrap().id, StateId::Drive);
        mode.tick(&mut sim).unwrap();
        assert!(sim.vehicle.is_moving());
        assert!(!sim.trail.arrived());
        assert_eq!(sim.take_pending_turns(), 1);
        mode.on_input("", &mut sim).unwrap();
        assert!(mode.current_state().is_none());
        assert!(!sim.vehicle.is_moving());
    }

    #[test]
    fn driving_without_oxen_stops_immediately() {
        let (mut mode, mut sim) = travel();
        mode.on_input("Continue on trail", &mut sim).unwrap();
        mode.tick(&mut sim).unwrap();
        assert!(mode.current_state().is_none());
        assert!(sim.notice.is_some());
        assert_eq!(sim.take_pending_turns(), 0);
    }

    #[test]
    fn settlements_offer_the_store() {
        let (mut mode, mut sim) = travel();
        assert!(mode.render(&sim).contains("Buy supplies"));
        mode.on_input("9", &mut sim).unwrap();
        assert_eq!(sim.take_mode_requests(), vec![ModeCategory::Store]);
    }

    #[test]
    fn pace_and_rest_states() {
        let (mut mode, mut sim) = travel();
        mode.on_input("4", &mut sim).unwrap();
        mode.on_input("3", &mut sim).unwrap();
        assert_eq!(sim.vehicle.pace, TravelPace::Grueling);
        mode.on_input("6", &mut sim).unwrap();
        assert_eq!(mode.current_state().unwrap().id, StateId::Resting);
        mode.on_input("3", &mut sim).unwrap();
        assert_eq!(sim.take_pending_turns(), 3);
        assert!(mode.current_state().is_none());
    }

    #[test]
    fn talking_cycles_advice() {
        let (mut mode, mut sim) = travel();
        mode.on_input("8", &mut sim).unwrap();
        let first = mode.render(&sim);
        mode.on_input("", &mut sim).unwrap();
        mode.on_input("8", &mut sim).unwrap();
        assert_ne!(first, mode.render(&sim));
    }
}
