//! Profession, party names and departure month.
use log::warn;
use rand::Rng;
use std::fmt::Write as _;

use super::shared::{PRESS_ENTER, parse_yes_no};
use crate::context::{MAX_PLAYERS, SimContext};
use crate::entity::Profession;
use crate::error::ModeResult;
use crate::mode::{
    Menu, Mode, ModeCategory, ModeCore, Screen, State, StateCx, StateFactory, StateId, Transition,
};
use crate::numbers::format_cents;

const RANDOM_NAMES: [&str; 26] = [
    "Bob", "Joe", "Sally", "Tim", "Steve", "Zeke", "Suzan", "Rebekah", "Young", "Marquitta",
    "Kristy", "Sharice", "Joanna", "Chrystal", "Genevie", "Angela", "Ruthann", "Viva", "Iris",
    "Anderson", "Siobhan", "Karey", "Jolie", "Carlene", "Lekisha", "Buck",
];

const STARTING_MONTHS: [(u32, &str); 5] = [
    (3, "March"),
    (4, "April"),
    (5, "May"),
    (6, "June"),
    (7, "July"),
];

/// Choices collected while setting up a new game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewGameInfo {
    pub profession: Profession,
    pub names: Vec<String>,
    pub name_index: usize,
    pub month: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewGameCommand {
    Choose(Profession),
    LearnDifferences,
}

pub struct NewGameScreen {
    core: ModeCore<NewGameInfo>,
}

pub fn create(_sim: &SimContext) -> Box<dyn Mode> {
    let states = StateFactory::<NewGameInfo>::new()
        .register(StateId::ProfessionAdvice, |_| Box::new(ProfessionAdvice))
        .register(StateId::InputPlayerName, |data| {
            Box::new(InputPlayerName {
                index: data.name_index,
            })
        })
        .register(StateId::ConfirmPlayerNames, |_| Box::new(ConfirmPlayerNames))
        .register(StateId::SelectStartingMonth, |_| {
            Box::new(SelectStartingMonth)
        });
    Box::new(NewGameScreen {
        core: ModeCore::new(ModeCategory::NewGame, NewGameInfo::default(), states),
    })
}

impl Screen for NewGameScreen {
    type Data = NewGameInfo;
    type Command = NewGameCommand;

    fn core(&self) -> &ModeCore<NewGameInfo> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModeCore<NewGameInfo> {
        &mut self.core
    }

    fn header(&self, _sim: &SimContext) -> Option<String> {
        Some("Many kinds of people made the trip to Oregon.\n".to_string())
    }

    fn menu(&self, _sim: &SimContext) -> Menu<NewGameCommand> {
        let mut menu = Menu::titled("You may:");
        for profession in Profession::ALL {
            menu.push(
                NewGameCommand::Choose(profession),
                format!(
                    "Be a {profession} from {}",
                    profession.hometown()
                ),
            );
        }
        menu.item(
            NewGameCommand::LearnDifferences,
            "Find out the differences between these choices",
        )
    }

    fn on_command(&mut self, command: NewGameCommand, _sim: &mut SimContext) -> ModeResult<()> {
        match command {
            NewGameCommand::Choose(profession) => {
                let data = &mut self.core.data;
                data.profession = profession;
                data.names.clear();
                data.name_index = 0;
                self.core.set_state(StateId::InputPlayerName)
            }
            NewGameCommand::LearnDifferences => self.core.set_state(StateId::ProfessionAdvice),
        }
    }
}

struct ProfessionAdvice;

impl State<NewGameInfo> for ProfessionAdvice {
    fn id(&self) -> StateId {
        StateId::ProfessionAdvice
    }

    fn render(&self, _data: &NewGameInfo, _sim: &SimContext) -> String {
        let mut out = String::from(
            "Traveling to Oregon isn't easy! But if you're a banker, you'll have more money\n\
             for supplies and services than a carpenter or a farmer.\n\n",
        );
        for profession in Profession::ALL {
            let _ = writeln!(
                out,
                "  {profession}: {} to start, score x{}",
                format_cents(profession.starting_cents()),
                profession.score_multiplier()
            );
        }
        let _ = write!(out, "\n{PRESS_ENTER}\n");
        out
    }

    fn on_input(&mut self, _input: &str, _cx: &mut StateCx<'_, NewGameInfo>) -> Transition {
        Transition::Clear
    }
}

/// Prompts for the name at `index`; slot 0 is the wagon leader.
struct InputPlayerName {
    index: usize,
}

impl State<NewGameInfo> for InputPlayerName {
    fn id(&self) -> StateId {
        StateId::InputPlayerName
    }

    fn render(&self, data: &NewGameInfo, _sim: &SimContext) -> String {
        if self.index == 0 {
            return "What is the first name of the wagon leader?\n".to_string();
        }
        let mut out = format!(
            "What are the first names of the {} other members in your party?\n\n",
            MAX_PLAYERS - 1
        );
        for (idx, name) in data.names.iter().enumerate() {
            let _ = writeln!(out, "  {}. {name}", idx + 1);
        }
        let _ = write!(
            out,
            "  {}.\n\n(Enter names or press ENTER to pick names at random)\n",
            self.index + 1
        );
        out
    }

    fn on_input(&mut self, input: &str, cx: &mut StateCx<'_, NewGameInfo>) -> Transition {
        let data = &mut *cx.data;
        data.names.truncate(self.index);
        if input.is_empty() {
            while data.names.len() < MAX_PLAYERS {
                let pick = RANDOM_NAMES[cx.sim.rng.gen_range(0..RANDOM_NAMES.len())];
                data.names.push(pick.to_string());
            }
            return Transition::Replace(StateId::ConfirmPlayerNames);
        }
        data.names.push(input.to_string());
        if self.index + 1 >= MAX_PLAYERS {
            return Transition::Replace(StateId::ConfirmPlayerNames);
        }
        data.name_index = self.index + 1;
        Transition::Replace(StateId::InputPlayerName)
    }
}

struct ConfirmPlayerNames;

impl State<NewGameInfo> for ConfirmPlayerNames {
    fn id(&self) -> StateId {
        StateId::ConfirmPlayerNames
    }

    fn render(&self, data: &NewGameInfo, _sim: &SimContext) -> String {
        let mut out = String::from("Your party:\n\n");
        for (idx, name) in data.names.iter().enumerate() {
            let role = if idx == 0 { " (leader)" } else { "" };
            let _ = writeln!(out, "  {}. {name}{role}", idx + 1);
        }
        out.push_str("\nAre these names correct? Y/N\n");
        out
    }

    fn on_input(&mut self, input: &str, cx: &mut StateCx<'_, NewGameInfo>) -> Transition {
        match parse_yes_no(input) {
            Some(true) => Transition::Replace(StateId::SelectStartingMonth),
            Some(false) => {
                cx.data.names.clear();
                cx.data.name_index = 0;
                Transition::Replace(StateId::InputPlayerName)
            }
            None => Transition::Stay,
        }
    }
}

struct SelectStartingMonth;

impl SelectStartingMonth {
    fn months() -> Menu<u32> {
        STARTING_MONTHS
            .iter()
            .fold(Menu::titled("You may:"), |menu, (month, name)| {
                menu.item(*month, *name)
            })
    }
}

impl State<NewGameInfo> for SelectStartingMonth {
    fn id(&self) -> StateId {
        StateId::SelectStartingMonth
    }

    fn render(&self, _data: &NewGameInfo, _sim: &SimContext) -> String {
        format!(
            "It is 1848. Your jumping off place for Oregon is Independence, Missouri.\n\
             You must decide which month to leave Independence.\n\n{}",
            Self::months().render()
        )
    }

    fn on_input(&mut self, input: &str, cx: &mut StateCx<'_, NewGameInfo>) -> Transition {
        let Some(month) = Self::months().select(input) else {
            return Transition::Stay;
        };
        cx.data.month = month;
        let data = &*cx.data;
        if let Err(err) = cx.sim.start_game(data.profession, &data.names, month) {
            warn!("could not start game: {err}");
            return Transition::Stay;
        }
        cx.sim.request_mode(ModeCategory::InitialPurchases);
        cx.remove_mode();
        Transition::Clear
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    fn screen() -> (Box<dyn Mode>, SimContext) {
        let sim = SimContext::new(SimConfig::default()).unwrap();
        (create(&sim), sim)
    }

    #[test]
    fn choosing_profession_opens_leader_prompt() {
        let (mut mode, mut sim) = screen();
        mode.on_input("3", &mut sim).unwrap();
        let state = mode.current_state().unwrap();
        assert_eq!(state.id, StateId::InputPlayerName);
        assert!(mode.render(&sim).contains("wagon leader"));
    }

    #[test]
    fn declining_names_restarts_at_leader() {
        let (mut mode, mut sim) = screen();
        mode.on_input("1", &mut sim).unwrap();
        mode.on_input("", &mut sim).unwrap();
        assert_eq!(mode.current_state().unwrap().id, StateId::ConfirmPlayerNames);
        mode.on_input("what", &mut sim).unwrap();
        assert_eq!(mode.current_state().unwrap().id, StateId::ConfirmPlayerNames);
        mode.on_input("n", &mut sim).unwrap();
        assert_eq!(mode.current_state().unwrap().id, StateId::InputPlayerName);
        assert!(mode.render(&sim).contains("wagon leader"));
    }

    #[test]
    fn picking_month_starts_game_and_requests_store() {
        let (mut mode, mut sim) = screen();
        for line in ["2", "Ann", "", "y", "3"] {
            mode.on_input(line, &mut sim).unwrap();
        }
        assert!(mode.should_remove());
        assert!(mode.current_state().is_none());
        assert_eq!(sim.take_mode_requests(), vec![ModeCategory::InitialPurchases]);
        assert_eq!(sim.vehicle.passengers.len(), MAX_PLAYERS);
        assert_eq!(sim.vehicle.balance_cents, Profession::Carpenter.starting_cents());
        assert_eq!(sim.clock.long_date(), "May 1, 1848");
    }
}
