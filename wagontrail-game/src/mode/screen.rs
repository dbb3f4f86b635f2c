//! Helper trait for menu-driven content modes.
use super::base::ModeCore;
use super::menu::Menu;
use super::{Mode, ModeCategory, StateInfo};
use crate::context::SimContext;
use crate::error::ModeResult;

/// A mode built from a [`ModeCore`] and a numbered command [`Menu`].
///
/// Implementors get [`Mode`] for free: input goes to the current state when
/// one is present, otherwise it is matched against the menu. Rendering shows
/// the state, or the header, menu and footer when no state is active.
pub trait Screen: 'static {
    type Data: 'static;
    type Command: Copy;

    fn core(&self) -> &ModeCore<Self::Data>;

    fn core_mut(&mut self) -> &mut ModeCore<Self::Data>;

    fn menu(&self, sim: &SimContext) -> Menu<Self::Command>;

    /// Act on a selected menu command.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::ModeError`] when a pushed state is not registered.
    fn on_command(&mut self, command: Self::Command, sim: &mut SimContext) -> ModeResult<()>;

    fn header(&self, _sim: &SimContext) -> Option<String> {
        None
    }

    fn footer(&self, _sim: &SimContext) -> Option<String> {
        None
    }

    /// Input that matched no menu entry while no state was active.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::ModeError`] when a pushed state is not registered.
    fn on_unmatched_input(&mut self, _input: &str, _sim: &mut SimContext) -> ModeResult<()> {
        Ok(())
    }

    /// Called once after the mode is attached.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::ModeError`] when a pushed state is not registered.
    fn enter(&mut self, _sim: &mut SimContext) -> ModeResult<()> {
        Ok(())
    }

    /// Called every frame after the current state ticks.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::ModeError`] when a pushed state is not registered.
    fn update(&mut self, _sim: &mut SimContext) -> ModeResult<()> {
        Ok(())
    }

    /// Called from the removal sweep before the mode is dropped.
    fn leave(&mut self, _sim: &mut SimContext) {}
}

impl<S: Screen> Mode for S {
    fn category(&self) -> ModeCategory {
        self.core().category()
    }

    fn accepts_input(&self) -> bool {
        self.core().accepts_input()
    }

    fn should_remove(&self) -> bool {
        self.core().should_remove()
    }

    fn flag_for_removal(&mut self) {
        self.core_mut().flag_for_removal();
    }

    fn current_state(&self) -> Option<StateInfo> {
        self.core().current_state()
    }

    fn on_post_create(&mut self, sim: &mut SimContext) -> ModeResult<()> {
        self.enter(sim)
    }

    fn tick(&mut self, sim: &mut SimContext) -> ModeResult<()> {
        self.core_mut().tick_state(sim)?;
        self.update(sim)
    }

    fn render(&self, sim: &SimContext) -> String {
        if let Some(text) = self.core().render_state(sim) {
            return text;
        }
        let mut out = String::new();
        if let Some(header) = self.header(sim) {
            out.push_str(&header);
            out.push('\n');
        }
        out.push_str(&self.menu(sim).render());
        if let Some(footer) = self.footer(sim) {
            out.push_str(&footer);
            out.push('\n');
        }
        out
    }

    fn on_input(&mut self, input: &str, sim: &mut SimContext) -> ModeResult<()> {
        if self.core_mut().route_input(input, sim)? {
            return Ok(());
        }
        match self.menu(sim).select(input) {
            Some(command) => self.on_command(command, sim),
            None => self.on_unmatched_input(input, sim),
        }
    }

    fn on_removed(&mut self, sim: &mut SimContext) {
        self.leave(sim);
        self.core_mut().destroy();
    }
}
