//! A fork in the road: pick which branch of the trail to follow.
use super::shared::look_at_map;
use crate::context::SimContext;
use crate::error::ModeResult;
use crate::mode::{Menu, Mode, ModeCategory, ModeCore, Screen, StateFactory, StateId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForkCommand {
    Branch(usize),
    SeeMap,
}

pub struct ForkScreen {
    core: ModeCore<()>,
}

pub fn create(_sim: &SimContext) -> Box<dyn Mode> {
    let states = StateFactory::<()>::new().register(StateId::LookAtMap, look_at_map);
    Box::new(ForkScreen {
        core: ModeCore::new(ModeCategory::ForkInRoad, (), states),
    })
}

impl Screen for ForkScreen {
    type Data = ();
    type Command = ForkCommand;

    fn core(&self) -> &ModeCore<()> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModeCore<()> {
        &mut self.core
    }

    fn header(&self, sim: &SimContext) -> Option<String> {
        Some(format!(
            "{}\n\nThe trail divides here. You may:\n",
            sim.location_name()
        ))
    }

    fn menu(&self, sim: &SimContext) -> Menu<ForkCommand> {
        let mut menu = Menu::new();
        for (idx, name) in sim.trail.branches().into_iter().enumerate() {
            menu.push(ForkCommand::Branch(idx), format!("head for {name}"));
        }
        menu.item(ForkCommand::SeeMap, "See the map")
    }

    fn on_command(&mut self, command: ForkCommand, sim: &mut SimContext) -> ModeResult<()> {
        match command {
            ForkCommand::Branch(idx) => {
                if sim.trail.choose_branch(idx) {
                    self.core.flag_for_removal();
                }
                Ok(())
            }
            ForkCommand::SeeMap => self.core.set_state(StateId::LookAtMap),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::trail::Trail;

    fn at_fork() -> (Box<dyn Mode>, SimContext) {
        let trail = Trail::from_json(
            r#"{"name": "Test", "locations": [
                {"name": "Split", "kind": {"type": "fork_in_road", "branches": [
                    {"name": "Fort Bridger", "locations": [
                        {"name": "Fort Bridger", "kind": {"type": "settlement"}, "miles_to_next": 20}
                    ]},
                    {"name": "Green River"}
                ]}, "miles_to_next": 30},
                {"name": "End", "kind": {"type": "landmark"}}
            ]}"#,
        )
        .unwrap();
        let sim = SimContext::with_trail(SimConfig::default(), trail).unwrap();
        (create(&sim), sim)
    }

    #[test]
    fn choosing_a_branch_splices_it_and_leaves() {
        let (mut mode, mut sim) = at_fork();
        let screen = mode.render(&sim);
        assert!(screen.contains("1. head for Fort Bridger"));
        assert!(screen.contains("3. See the map"));
        mode.on_input("1", &mut sim).unwrap();
        assert!(mode.should_remove());
        let names: Vec<&str> = sim
            .trail
            .locations()
            .iter()
            .map(|location| location.name.as_str())
            .collect();
        assert_eq!(names, ["Split", "Fort Bridger", "End"]);
    }

    #[test]
    fn map_returns_to_the_choice() {
        let (mut mode, mut sim) = at_fork();
        mode.on_input("3", &mut sim).unwrap();
        assert!(mode.render(&sim).contains("> Split"));
        mode.on_input("", &mut sim).unwrap();
        assert!(mode.current_state().is_none());
        assert!(!mode.should_remove());
    }
}
