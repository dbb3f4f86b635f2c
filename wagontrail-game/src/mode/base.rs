//! Shared bookkeeping for content modes: flags, payload and the current state.
use log::debug;

use super::state::{State, StateCx, StateFactory, Transition};
use super::{ModeCategory, StateId, StateInfo};
use crate::context::SimContext;
use crate::error::ModeResult;

/// Owns a mode's user-data payload and at most one state bound to it.
pub struct ModeCore<D> {
    category: ModeCategory,
    accepts_input: bool,
    should_remove: bool,
    pub data: D,
    state: Option<Box<dyn State<D>>>,
    states: StateFactory<D>,
}

impl<D: 'static> ModeCore<D> {
    #[must_use]
    pub fn new(category: ModeCategory, data: D, states: StateFactory<D>) -> Self {
        Self {
            category,
            accepts_input: true,
            should_remove: false,
            data,
            state: None,
            states,
        }
    }

    #[must_use]
    pub const fn category(&self) -> ModeCategory {
        self.category
    }

    #[must_use]
    pub const fn accepts_input(&self) -> bool {
        self.accepts_input
    }

    pub const fn set_accepts_input(&mut self, accepts: bool) {
        self.accepts_input = accepts;
    }

    #[must_use]
    pub const fn should_remove(&self) -> bool {
        self.should_remove
    }

    pub const fn flag_for_removal(&mut self) {
        self.should_remove = true;
    }

    #[must_use]
    pub fn has_state(&self) -> bool {
        self.state.is_some()
    }

    #[must_use]
    pub fn current_state(&self) -> Option<StateInfo> {
        self.state.as_ref().map(|state| StateInfo {
            id: state.id(),
            accepts_input: state.accepts_input(),
        })
    }

    /// Build `id` from the table and make it the current state, dropping the old one.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ModeError::UnknownStateType`] when `id` is not registered.
    pub fn set_state(&mut self, id: StateId) -> ModeResult<()> {
        let next = self.states.create_state(id, &self.data)?;
        debug!("{} state -> {id}", self.category);
        self.state = Some(next);
        Ok(())
    }

    pub fn clear_state(&mut self) {
        if let Some(old) = self.state.take() {
            debug!("{} state {} cleared", self.category, old.id());
        }
    }

    /// Apply a transition returned by the current state.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::set_state`] failures.
    pub fn apply(&mut self, transition: Transition) -> ModeResult<()> {
        match transition {
            Transition::Stay => Ok(()),
            Transition::Replace(id) => self.set_state(id),
            Transition::Clear => {
                self.clear_state();
                Ok(())
            }
        }
    }

    /// Hand input to the current state. Returns `false` when there is none.
    ///
    /// # Errors
    ///
    /// Propagates transition failures.
    pub fn route_input(&mut self, input: &str, sim: &mut SimContext) -> ModeResult<bool> {
        let Self {
            state,
            data,
            should_remove,
            ..
        } = &mut *self;
        let Some(current) = state.as_mut() else {
            return Ok(false);
        };
        let mut cx = StateCx::new(data, sim, should_remove);
        let transition = current.on_input(input, &mut cx);
        self.apply(transition)?;
        Ok(true)
    }

    /// Tick the current state, if any.
    ///
    /// # Errors
    ///
    /// Propagates transition failures.
    pub fn tick_state(&mut self, sim: &mut SimContext) -> ModeResult<()> {
        let Self {
            state,
            data,
            should_remove,
            ..
        } = &mut *self;
        let Some(current) = state.as_mut() else {
            return Ok(());
        };
        let mut cx = StateCx::new(data, sim, should_remove);
        let transition = current.tick(&mut cx);
        self.apply(transition)
    }

    #[must_use]
    pub fn render_state(&self, sim: &SimContext) -> Option<String> {
        self.state
            .as_ref()
            .map(|state| state.render(&self.data, sim))
    }

    /// Drop the current state and the state table.
    pub fn destroy(&mut self) {
        self.state = None;
        self.states.clear();
    }
}
