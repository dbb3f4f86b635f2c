//! Sub-screens owned by a mode and the table that builds them.
use std::collections::HashMap;

use super::StateId;
use crate::context::SimContext;
use crate::error::{ModeError, ModeResult};

/// What a state asks its parent mode to do after handling input or a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    /// Build the named state from the parent's table and replace the current one.
    Replace(StateId),
    /// Drop the current state; the parent mode handles input again.
    Clear,
}

/// Borrowed view a state gets of its parent mode and the simulation.
pub struct StateCx<'a, D> {
    pub data: &'a mut D,
    pub sim: &'a mut SimContext,
    remove_mode: &'a mut bool,
}

impl<'a, D> StateCx<'a, D> {
    pub fn new(data: &'a mut D, sim: &'a mut SimContext, remove_mode: &'a mut bool) -> Self {
        Self {
            data,
            sim,
            remove_mode,
        }
    }

    /// Flag the parent mode for removal on the next sweep.
    pub fn remove_mode(&mut self) {
        *self.remove_mode = true;
    }

    #[must_use]
    pub fn removal_requested(&self) -> bool {
        *self.remove_mode
    }
}

/// A sub-screen bound to a parent mode's user-data payload `D`.
pub trait State<D> {
    fn id(&self) -> StateId;

    fn accepts_input(&self) -> bool {
        true
    }

    fn render(&self, data: &D, sim: &SimContext) -> String;

    fn on_input(&mut self, input: &str, cx: &mut StateCx<'_, D>) -> Transition;

    fn tick(&mut self, _cx: &mut StateCx<'_, D>) -> Transition {
        Transition::Stay
    }
}

pub type StateCtor<D> = fn(&D) -> Box<dyn State<D>>;

/// Registration table from [`StateId`] to constructor for one payload type.
pub struct StateFactory<D> {
    ctors: HashMap<StateId, StateCtor<D>>,
}

impl<D> Default for StateFactory<D> {
    fn default() -> Self {
        Self {
            ctors: HashMap::new(),
        }
    }
}

impl<D> StateFactory<D> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn register(mut self, id: StateId, ctor: StateCtor<D>) -> Self {
        self.ctors.insert(id, ctor);
        self
    }

    #[must_use]
    pub fn is_registered(&self, id: StateId) -> bool {
        self.ctors.contains_key(&id)
    }

    /// Build a state bound to the parent's current payload. Does not install it.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::UnknownStateType`] when `id` has no constructor.
    pub fn create_state(&self, id: StateId, data: &D) -> ModeResult<Box<dyn State<D>>> {
        let ctor = self.ctors.get(&id).ok_or(ModeError::UnknownStateType(id))?;
        Ok(ctor(data))
    }

    pub fn clear(&mut self) {
        self.ctors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl State<u32> for Echo {
        fn id(&self) -> StateId {
            StateId::TalkToPeople
        }

        fn render(&self, data: &u32, _sim: &SimContext) -> String {
            format!("echo {data}")
        }

        fn on_input(&mut self, _input: &str, cx: &mut StateCx<'_, u32>) -> Transition {
            *cx.data += 1;
            Transition::Clear
        }
    }

    fn echo(_: &u32) -> Box<dyn State<u32>> {
        Box::new(Echo)
    }

    #[test]
    fn unknown_ids_fail() {
        let factory = StateFactory::<u32>::new().register(StateId::TalkToPeople, echo);
        assert!(factory.is_registered(StateId::TalkToPeople));
        let built = factory.create_state(StateId::TalkToPeople, &0).unwrap();
        assert_eq!(built.id(), StateId::TalkToPeople);
        assert_eq!(
            factory.create_state(StateId::Drive, &0).err(),
            Some(ModeError::UnknownStateType(StateId::Drive))
        );
    }
}
