//! Management options: the top ten list.
use log::info;

use super::shared::top_ten;
use crate::context::SimContext;
use crate::error::ModeResult;
use crate::mode::{Menu, Mode, ModeCategory, ModeCore, Screen, StateFactory, StateId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsCommand {
    SeeTopTen,
    EraseTopTen,
    Return,
}

pub struct OptionsScreen {
    core: ModeCore<()>,
}

pub fn create(_sim: &SimContext) -> Box<dyn Mode> {
    let states = StateFactory::<()>::new().register(StateId::TopTen, top_ten);
    Box::new(OptionsScreen {
        core: ModeCore::new(ModeCategory::ManagementOptions, (), states),
    })
}

impl Screen for OptionsScreen {
    type Data = ();
    type Command = OptionsCommand;

    fn core(&self) -> &ModeCore<()> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModeCore<()> {
        &mut self.core
    }

    fn header(&self, sim: &SimContext) -> Option<String> {
        let mut out = String::from("Management Options\n");
        if let Some(notice) = &sim.notice {
            out.push('\n');
            out.push_str(notice);
            out.push('\n');
        }
        Some(out)
    }

    fn menu(&self, _sim: &SimContext) -> Menu<OptionsCommand> {
        Menu::titled("You may:")
            .item(OptionsCommand::SeeTopTen, "See the Oregon Top Ten")
            .item(OptionsCommand::EraseTopTen, "Erase the Oregon Top Ten")
            .item(OptionsCommand::Return, "Return to the trail")
    }

    fn on_command(&mut self, command: OptionsCommand, sim: &mut SimContext) -> ModeResult<()> {
        sim.notice = None;
        match command {
            OptionsCommand::SeeTopTen => self.core.set_state(StateId::TopTen),
            OptionsCommand::EraseTopTen => {
                sim.top_ten.reset();
                info!("top ten reset to defaults");
                sim.notice = Some("The Oregon Top Ten has been erased.".to_string());
                Ok(())
            }
            OptionsCommand::Return => {
                self.core.flag_for_removal();
                Ok(())
            }
        }
    }
}
