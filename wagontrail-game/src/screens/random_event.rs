//! Shows the outcome of a random event until the player acknowledges it.
use super::shared::PRESS_ENTER;
use crate::context::SimContext;
use crate::error::ModeResult;
use crate::mode::{Menu, Mode, ModeCategory, ModeCore, Screen, StateFactory};

pub struct RandomEventScreen {
    core: ModeCore<()>,
}

pub fn create(_sim: &SimContext) -> Box<dyn Mode> {
    Box::new(RandomEventScreen {
        core: ModeCore::new(ModeCategory::RandomEvent, (), StateFactory::new()),
    })
}

impl Screen for RandomEventScreen {
    type Data = ();
    type Command = ();

    fn core(&self) -> &ModeCore<()> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModeCore<()> {
        &mut self.core
    }

    fn enter(&mut self, sim: &mut SimContext) -> ModeResult<()> {
        if sim.pending_event.is_none() {
            self.core.flag_for_removal();
        }
        Ok(())
    }

    fn header(&self, sim: &SimContext) -> Option<String> {
        let message = sim
            .pending_event
            .as_ref()
            .map_or("", |event| event.message.as_str());
        Some(format!(
            "{}\n{}\n\n{message}\n\n{PRESS_ENTER}",
            sim.location_name(),
            sim.clock.long_date()
        ))
    }

    fn menu(&self, _sim: &SimContext) -> Menu<()> {
        Menu::new()
    }

    fn on_command(&mut self, (): (), _sim: &mut SimContext) -> ModeResult<()> {
        Ok(())
    }

    fn on_unmatched_input(&mut self, _input: &str, sim: &mut SimContext) -> ModeResult<()> {
        sim.pending_event = None;
        self.core.flag_for_removal();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::director::EventKind;
    use rand::rngs::mock::StepRng;

    #[test]
    fn any_line_dismisses_the_event() {
        let mut sim = SimContext::new(SimConfig::default()).unwrap();
        let mut rng = StepRng::new(0, 0);
        let outcome = sim
            .director
            .trigger(EventKind::WildFruit, &mut sim.vehicle, &mut rng);
        sim.pending_event = Some(outcome);
        let mut mode = create(&sim);
        mode.on_post_create(&mut sim).unwrap();
        assert!(!mode.should_remove());
        assert!(mode.render(&sim).contains("wild fruit"));
        mode.on_input("", &mut sim).unwrap();
        assert!(mode.should_remove());
        assert!(sim.pending_event.is_none());
    }

    #[test]
    fn nothing_pending_removes_itself() {
        let mut sim = SimContext::new(SimConfig::default()).unwrap();
        let mut mode = create(&sim);
        mode.on_post_create(&mut sim).unwrap();
        assert!(mode.should_remove());
    }
}
