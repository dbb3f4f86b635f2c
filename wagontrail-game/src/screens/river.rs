//! River crossings: ford, caulk and float, take the ferry or wait.
use log::info;
use rand::Rng;
use std::fmt::Write as _;

use super::shared::PRESS_ENTER;
use crate::context::SimContext;
use crate::entity::Entity;
use crate::error::ModeResult;
use crate::mode::{
    Menu, Mode, ModeCategory, ModeCore, Screen, State, StateCx, StateFactory, StateId, Transition,
};
use crate::numbers::{format_cents, fraction_of};
use crate::trail::LocationKind;

/// Deepest water a wagon fords without trouble.
const SAFE_FORD_DEPTH: u32 = 2;
/// Water this deep swamps a forded wagon.
const SWAMP_DEPTH: u32 = 5;
const CAULK_TIP_CHANCE: f32 = 0.2;
const DROWNING_DAMAGE: i32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossingChoice {
    Ford,
    Caulk,
    Ferry,
}

/// The river the party stands at and how the attempt went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiverInfo {
    pub name: String,
    pub depth_ft: u32,
    pub width_ft: u32,
    pub ferry_cost_cents: i64,
    pub choice: Option<CrossingChoice>,
    pub result: String,
    pub warning: Option<String>,
}

impl RiverInfo {
    fn new(sim: &SimContext) -> Self {
        let location = sim.trail.current_location();
        let (depth_ft, width_ft, ferry_cost_cents) = match location.map(|l| &l.kind) {
            Some(LocationKind::River {
                depth_ft,
                width_ft,
                ferry_cost_cents,
            }) => (*depth_ft, *width_ft, *ferry_cost_cents),
            _ => (0, 0, 0),
        };
        Self {
            name: sim.location_name().to_string(),
            depth_ft,
            width_ft,
            ferry_cost_cents,
            choice: None,
            result: String::new(),
            warning: None,
        }
    }

    #[must_use]
    pub const fn has_ferry(&self) -> bool {
        self.ferry_cost_cents > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiverCommand {
    Cross(CrossingChoice),
    Wait,
    Help,
}

pub struct RiverScreen {
    core: ModeCore<RiverInfo>,
}

pub fn create(sim: &SimContext) -> Box<dyn Mode> {
    let states = StateFactory::<RiverInfo>::new()
        .register(StateId::FordRiverHelp, |_| Box::new(FordRiverHelp))
        .register(StateId::CaulkRiverHelp, |_| Box::new(CaulkRiverHelp))
        .register(StateId::FerryHelp, |_| Box::new(FerryHelp))
        .register(StateId::Crossing, |_| Box::new(Crossing { ticks_left: None }))
        .register(StateId::CrossingResult, |_| Box::new(CrossingResult));
    Box::new(RiverScreen {
        core: ModeCore::new(ModeCategory::RiverCrossing, RiverInfo::new(sim), states),
    })
}

impl Screen for RiverScreen {
    type Data = RiverInfo;
    type Command = RiverCommand;

    fn core(&self) -> &ModeCore<RiverInfo> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModeCore<RiverInfo> {
        &mut self.core
    }

    fn header(&self, sim: &SimContext) -> Option<String> {
        let data = &self.core.data;
        let mut out = format!("{}\n{}\n\n", data.name, sim.clock.long_date());
        let _ = writeln!(out, "Weather: {}", sim.climate.describe());
        let _ = writeln!(out, "River width: {} feet", data.width_ft);
        let _ = writeln!(out, "River depth: {} feet", data.depth_ft);
        if let Some(warning) = &data.warning {
            let _ = writeln!(out, "\n{warning}");
        }
        Some(out)
    }

    fn menu(&self, _sim: &SimContext) -> Menu<RiverCommand> {
        let mut menu = Menu::titled("You may:")
            .item(RiverCommand::Cross(CrossingChoice::Ford), "Attempt to ford the river")
            .item(
                RiverCommand::Cross(CrossingChoice::Caulk),
                "Caulk the wagon and float it across",
            );
        if self.core.data.has_ferry() {
            menu.push(
                RiverCommand::Cross(CrossingChoice::Ferry),
                format!(
                    "Take a ferry across for {}",
                    format_cents(self.core.data.ferry_cost_cents)
                ),
            );
        }
        menu.item(RiverCommand::Wait, "Wait to see if conditions improve")
            .item(RiverCommand::Help, "Get more information")
    }

    fn on_command(&mut self, command: RiverCommand, sim: &mut SimContext) -> ModeResult<()> {
        self.core.data.warning = None;
        match command {
            RiverCommand::Cross(CrossingChoice::Ferry) => {
                if !sim.vehicle.spend(self.core.data.ferry_cost_cents) {
                    self.core.data.warning =
                        Some("You don't have enough money for the ferry.".to_string());
                    return Ok(());
                }
                self.core.data.choice = Some(CrossingChoice::Ferry);
                self.core.set_state(StateId::Crossing)
            }
            RiverCommand::Cross(choice) => {
                self.core.data.choice = Some(choice);
                self.core.set_state(StateId::Crossing)
            }
            RiverCommand::Wait => {
                let data = &mut self.core.data;
                let change: i32 = sim.rng.gen_range(-1..=1);
                data.depth_ft = data.depth_ft.saturating_add_signed(change).max(1);
                sim.request_turns(1);
                Ok(())
            }
            RiverCommand::Help => self.core.set_state(StateId::FordRiverHelp),
        }
    }
}

struct FordRiverHelp;

impl State<RiverInfo> for FordRiverHelp {
    fn id(&self) -> StateId {
        StateId::FordRiverHelp
    }

    fn render(&self, _data: &RiverInfo, _sim: &SimContext) -> String {
        format!(
            "To ford a river means to pull your wagon across a shallow part of the river, \
             with the oxen still attached.\n\n{PRESS_ENTER}\n"
        )
    }

    fn on_input(&mut self, _input: &str, _cx: &mut StateCx<'_, RiverInfo>) -> Transition {
        Transition::Replace(StateId::CaulkRiverHelp)
    }
}

struct CaulkRiverHelp;

impl State<RiverInfo> for CaulkRiverHelp {
    fn id(&self) -> StateId {
        StateId::CaulkRiverHelp
    }

    fn render(&self, _data: &RiverInfo, _sim: &SimContext) -> String {
        format!(
            "To caulk the wagon means to seal it so that no water can get in. The wagon \
             can then be floated across like a boat.\n\n{PRESS_ENTER}\n"
        )
    }

    fn on_input(&mut self, _input: &str, _cx: &mut StateCx<'_, RiverInfo>) -> Transition {
        Transition::Replace(StateId::FerryHelp)
    }
}

struct FerryHelp;

impl State<RiverInfo> for FerryHelp {
    fn id(&self) -> StateId {
        StateId::FerryHelp
    }

    fn render(&self, data: &RiverInfo, _sim: &SimContext) -> String {
        let ferry = if data.has_ferry() {
            format!("A ferry operates here for {}.", format_cents(data.ferry_cost_cents))
        } else {
            "There is no ferry at this crossing.".to_string()
        };
        format!(
            "To use a ferry means to put your wagon on top of a flat boat that belongs to \
             someone else. The owner will charge you a fee. {ferry}\n\n{PRESS_ENTER}\n"
        )
    }

    fn on_input(&mut self, _input: &str, _cx: &mut StateCx<'_, RiverInfo>) -> Transition {
        Transition::Clear
    }
}

/// Wagon in the water. Refuses input until the crossing resolves.
struct Crossing {
    ticks_left: Option<u8>,
}

impl State<RiverInfo> for Crossing {
    fn id(&self) -> StateId {
        StateId::Crossing
    }

    fn accepts_input(&self) -> bool {
        false
    }

    fn render(&self, data: &RiverInfo, _sim: &SimContext) -> String {
        let verb = match data.choice {
            Some(CrossingChoice::Caulk) => "floating",
            Some(CrossingChoice::Ferry) => "ferrying",
            _ => "fording",
        };
        format!("You are {verb} across {}...\n", data.name)
    }

    fn on_input(&mut self, _input: &str, _cx: &mut StateCx<'_, RiverInfo>) -> Transition {
        Transition::Stay
    }

    fn tick(&mut self, cx: &mut StateCx<'_, RiverInfo>) -> Transition {
        let left = self
            .ticks_left
            .get_or_insert(cx.sim.config.crossing_ticks);
        *left = left.saturating_sub(1);
        if *left > 0 {
            return Transition::Stay;
        }
        let choice = cx.data.choice.unwrap_or(CrossingChoice::Ford);
        cx.data.result = resolve_crossing(choice, cx.data.depth_ft, cx.sim);
        info!("crossed {} by {choice:?}", cx.data.name);
        cx.sim.request_turns(1);
        Transition::Replace(StateId::CrossingResult)
    }
}

/// Apply the losses for one crossing attempt and describe them.
fn resolve_crossing(choice: CrossingChoice, depth_ft: u32, sim: &mut SimContext) -> String {
    let vehicle = &mut sim.vehicle;
    match choice {
        CrossingChoice::Ferry => "The ferry carried you safely across.".to_string(),
        CrossingChoice::Ford if depth_ft <= SAFE_FORD_DEPTH => {
            "You had no trouble fording the river.".to_string()
        }
        CrossingChoice::Ford if depth_ft < SWAMP_DEPTH => {
            let fraction = sim.rng.gen_range(0.1..0.3);
            let food = vehicle.remove_item(
                Entity::Food,
                fraction_of(vehicle.quantity(Entity::Food), fraction),
            );
            let clothes = vehicle.remove_item(
                Entity::Clothes,
                fraction_of(vehicle.quantity(Entity::Clothes), fraction),
            );
            format!(
                "The water was deep. Supplies got wet and you lost {food} pounds of food \
                 and {clothes} sets of clothing."
            )
        }
        CrossingChoice::Ford => {
            let oxen = vehicle.remove_item(Entity::Animal, 1);
            let food = vehicle.remove_item(
                Entity::Food,
                fraction_of(vehicle.quantity(Entity::Food), 0.5),
            );
            let mut out = format!(
                "The wagon was swamped! You lost {oxen} oxen and {food} pounds of food."
            );
            let alive: Vec<usize> = vehicle
                .passengers
                .iter()
                .enumerate()
                .filter(|(_, person)| person.is_alive())
                .map(|(idx, _)| idx)
                .collect();
            if !alive.is_empty()
                && let Some(person) = vehicle
                    .passengers
                    .get_mut(alive[sim.rng.gen_range(0..alive.len())])
            {
                person.damage(DROWNING_DAMAGE);
                let _ = write!(out, " {} nearly drowned.", person.name);
            }
            out
        }
        CrossingChoice::Caulk => {
            if depth_ft > SAFE_FORD_DEPTH && sim.rng.r#gen::<f32>() < CAULK_TIP_CHANCE {
                let ammo = vehicle.remove_item(
                    Entity::Ammo,
                    fraction_of(vehicle.quantity(Entity::Ammo), 0.3),
                );
                let food = vehicle.remove_item(
                    Entity::Food,
                    fraction_of(vehicle.quantity(Entity::Food), 0.2),
                );
                format!(
                    "The wagon tipped while floating. You lost {ammo} bullets and {food} \
                     pounds of food."
                )
            } else {
                "You had no trouble floating the wagon across.".to_string()
            }
        }
    }
}

struct CrossingResult;

impl State<RiverInfo> for CrossingResult {
    fn id(&self) -> StateId {
        StateId::CrossingResult
    }

    fn render(&self, data: &RiverInfo, _sim: &SimContext) -> String {
        format!("{}\n\n{PRESS_ENTER}\n", data.result)
    }

    fn on_input(&mut self, _input: &str, cx: &mut StateCx<'_, RiverInfo>) -> Transition {
        cx.remove_mode();
        Transition::Clear
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::entity::Profession;
    use crate::trail::Trail;

    fn at_river(depth_ft: u32, ferry_cost_cents: i64) -> (Box<dyn Mode>, SimContext) {
        let json = format!(
            r#"{{"name": "Test", "locations": [
                {{"name": "Big River", "kind": {{"type": "river", "depth_ft": {depth_ft},
                  "width_ft": 300, "ferry_cost_cents": {ferry_cost_cents}}}, "miles_to_next": 10}},
                {{"name": "End", "kind": {{"type": "landmark"}}}}
            ]}}"#
        );
        let trail = Trail::from_json(&json).unwrap();
        let mut sim = SimContext::with_trail(SimConfig::default(), trail).unwrap();
        sim.start_game(Profession::Banker, &["Ann".to_string()], 4)
            .unwrap();
        sim.vehicle.add_item(Entity::Food, 500);
        (create(&sim), sim)
    }

    #[test]
    fn help_chain_runs_ford_caulk_ferry() {
        let (mut mode, mut sim) = at_river(2, 500);
        mode.on_input("Get more information", &mut sim).unwrap();
        assert_eq!(mode.current_state().unwrap().id, StateId::FordRiverHelp);
        mode.on_input("", &mut sim).unwrap();
        assert_eq!(mode.current_state().unwrap().id, StateId::CaulkRiverHelp);
        mode.on_input("", &mut sim).unwrap();
        assert_eq!(mode.current_state().unwrap().id, StateId::FerryHelp);
        mode.on_input("", &mut sim).unwrap();
        assert!(mode.current_state().is_none());
    }

    #[test]
    fn crossing_refuses_input_until_resolved() {
        let (mut mode, mut sim) = at_river(1, 0);
        mode.on_input("1", &mut sim).unwrap();
        let state = mode.current_state().unwrap();
        assert_eq!(state.id, StateId::Crossing);
        assert!(!state.accepts_input);
        for _ in 1..sim.config.crossing_ticks {
            mode.tick(&mut sim).unwrap();
            assert_eq!(mode.current_state().unwrap().id, StateId::Crossing);
        }
        mode.tick(&mut sim).unwrap();
        assert_eq!(mode.current_state().unwrap().id, StateId::CrossingResult);
        assert_eq!(sim.take_pending_turns(), 1);
        assert!(mode.render(&sim).contains("no trouble"));
        mode.on_input("", &mut sim).unwrap();
        assert!(mode.should_remove());
    }

    #[test]
    fn ferry_costs_money_and_is_hidden_without_one() {
        let (mode, sim) = at_river(4, 0);
        assert!(!mode.render(&sim).contains("ferry across"));

        let (mut mode, mut sim) = at_river(4, 500);
        let before = sim.vehicle.balance_cents;
        mode.on_input("3", &mut sim).unwrap();
        assert_eq!(sim.vehicle.balance_cents, before - 500);
        assert_eq!(mode.current_state().unwrap().id, StateId::Crossing);
    }

    #[test]
    fn deep_ford_loses_supplies() {
        let (mut mode, mut sim) = at_river(8, 0);
        sim.vehicle.add_item(Entity::Animal, 4);
        mode.on_input("1", &mut sim).unwrap();
        for _ in 0..sim.config.crossing_ticks {
            mode.tick(&mut sim).unwrap();
        }
        assert_eq!(sim.vehicle.quantity(Entity::Animal), 3);
        assert_eq!(sim.vehicle.quantity(Entity::Food), 250);
    }
}
