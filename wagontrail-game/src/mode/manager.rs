//! The mode stack: insertion-ordered modes where the last one owns the screen.
use log::{debug, trace, warn};

use super::factory::ModeFactory;
use super::{Mode, ModeCategory};
use crate::context::SimContext;
use crate::error::{ModeError, ModeResult};

type ModeListener = Box<dyn FnMut(ModeCategory)>;

/// Stack of attached modes keyed by category.
///
/// Modes are stored in the order they were attached and the most recent one
/// is the active mode. Modes beneath the top are paused: they are neither
/// ticked, rendered nor given input until everything above them is removed.
pub struct ModeManager {
    modes: Vec<(ModeCategory, Box<dyn Mode>)>,
    factory: ModeFactory,
    listeners: Vec<ModeListener>,
}

impl ModeManager {
    #[must_use]
    pub fn new(factory: ModeFactory) -> Self {
        Self {
            modes: Vec::new(),
            factory,
            listeners: Vec::new(),
        }
    }

    /// Register a callback fired with the new active category whenever it changes.
    pub fn on_mode_changed(&mut self, listener: impl FnMut(ModeCategory) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, category: ModeCategory) {
        for listener in &mut self.listeners {
            listener(category);
        }
    }

    #[must_use]
    pub fn contains(&self, category: ModeCategory) -> bool {
        self.modes.iter().any(|(attached, _)| *attached == category)
    }

    /// Attach a new mode on top of the stack. A category already present is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::UnknownModeCategory`] when the factory cannot build
    /// `category`, or any error raised by the mode's post-create hook.
    pub fn add_mode(&mut self, category: ModeCategory, sim: &mut SimContext) -> ModeResult<()> {
        if self.contains(category) {
            trace!("{category} already attached");
            return Ok(());
        }
        let mode = self.factory.create_mode(category, sim)?;
        self.modes.push((category, mode));
        let created = match self.modes.last_mut() {
            Some((_, mode)) => mode.on_post_create(sim),
            None => Ok(()),
        };
        if let Err(err) = created {
            self.modes.pop();
            self.factory.discard(category);
            warn!("could not attach {category}: {err}");
            return Err(err);
        }
        debug!("attached {category} (depth {})", self.modes.len());
        self.notify(category);
        Ok(())
    }

    #[must_use]
    pub fn active_mode(&self) -> Option<&dyn Mode> {
        self.modes.last().map(|(_, mode)| mode.as_ref())
    }

    pub fn active_mode_mut(&mut self) -> Option<&mut (dyn Mode + 'static)> {
        self.modes.last_mut().map(|(_, mode)| mode.as_mut())
    }

    #[must_use]
    pub fn active_category(&self) -> Option<ModeCategory> {
        self.modes.last().map(|(category, _)| *category)
    }

    #[must_use]
    pub fn mode_count(&self) -> usize {
        self.modes.len()
    }

    /// Categories from the bottom of the stack to the top.
    pub fn categories(&self) -> impl Iterator<Item = ModeCategory> + '_ {
        self.modes.iter().map(|(category, _)| *category)
    }

    /// How many times `category` was ever attached.
    #[must_use]
    pub fn run_count(&self, category: ModeCategory) -> u32 {
        self.factory.attach_count(category)
    }

    /// Whether the active mode and its state will take a line of input.
    #[must_use]
    pub fn accepting_input(&self) -> bool {
        let Some(mode) = self.active_mode() else {
            return false;
        };
        match mode.current_state() {
            None => mode.accepts_input(),
            Some(state) => mode.accepts_input() && state.accepts_input,
        }
    }

    /// Route a trimmed line to the active mode. Returns `false` when input is refused.
    ///
    /// # Errors
    ///
    /// Propagates errors raised by the mode's input handler.
    pub fn send_input(&mut self, input: &str, sim: &mut SimContext) -> ModeResult<bool> {
        if !self.accepting_input() {
            warn!("input {input:?} dropped: active mode is not accepting input");
            return Ok(false);
        }
        let Some(mode) = self.active_mode_mut() else {
            return Ok(false);
        };
        mode.on_input(input.trim(), sim)?;
        Ok(true)
    }

    /// Sweep the stack if the active mode is flagged, then tick whichever mode is active.
    ///
    /// # Errors
    ///
    /// Propagates errors raised by the active mode's tick.
    pub fn tick(&mut self, sim: &mut SimContext) -> ModeResult<()> {
        if self.active_mode().is_some_and(|mode| mode.should_remove()) {
            self.remove_dirty_modes(sim)?;
        }
        if let Some(mode) = self.active_mode_mut() {
            mode.tick(sim)?;
        }
        Ok(())
    }

    /// Evict every mode flagged for removal.
    ///
    /// Flagged categories are collected before anything is removed, so a mode
    /// attached by a removal callback is never evicted in the same pass. One
    /// change notification is sent for the new top when at least one mode was
    /// removed and a mode remains.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::NoActiveMode`] when the stack is empty.
    pub fn remove_dirty_modes(&mut self, sim: &mut SimContext) -> ModeResult<()> {
        if self.modes.is_empty() {
            return Err(ModeError::NoActiveMode);
        }
        let flagged: Vec<ModeCategory> = self
            .modes
            .iter()
            .filter(|(_, mode)| mode.should_remove())
            .map(|(category, _)| *category)
            .collect();
        let mut removed = 0_usize;
        for category in flagged {
            let Some(idx) = self.modes.iter().position(|(c, _)| *c == category) else {
                continue;
            };
            let (_, mut mode) = self.modes.remove(idx);
            mode.on_removed(sim);
            debug!("removed {category} (depth {})", self.modes.len());
            removed += 1;
        }
        if removed > 0
            && let Some(top) = self.active_category()
        {
            self.notify(top);
        }
        Ok(())
    }

    /// Drop every mode and clear the factory. Safe to call more than once.
    pub fn destroy(&mut self) {
        if !self.modes.is_empty() {
            debug!("destroying {} attached modes", self.modes.len());
        }
        self.modes.clear();
        self.factory.destroy();
        self.listeners.clear();
    }
}
