//! Registration table from [`ModeCategory`] to mode constructors.
use std::collections::HashMap;

use super::{Mode, ModeCategory};
use crate::context::SimContext;
use crate::error::{ModeError, ModeResult};

pub type ModeCtor = fn(&SimContext) -> Box<dyn Mode>;

/// Builds modes by category and counts how often each one was attached.
#[derive(Default)]
pub struct ModeFactory {
    ctors: HashMap<ModeCategory, ModeCtor>,
    attach_counts: HashMap<ModeCategory, u32>,
}

impl ModeFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn register(mut self, category: ModeCategory, ctor: ModeCtor) -> Self {
        self.ctors.insert(category, ctor);
        self
    }

    #[must_use]
    pub fn is_registered(&self, category: ModeCategory) -> bool {
        self.ctors.contains_key(&category)
    }

    /// Construct a mode and bump its attach count. Nothing is inserted anywhere.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::UnknownModeCategory`] when `category` has no constructor.
    pub fn create_mode(
        &mut self,
        category: ModeCategory,
        sim: &SimContext,
    ) -> ModeResult<Box<dyn Mode>> {
        let ctor = self
            .ctors
            .get(&category)
            .ok_or(ModeError::UnknownModeCategory(category))?;
        let mode = ctor(sim);
        *self.attach_counts.entry(category).or_insert(0) += 1;
        Ok(mode)
    }

    /// Number of modes ever built for `category`.
    #[must_use]
    pub fn attach_count(&self, category: ModeCategory) -> u32 {
        self.attach_counts.get(&category).copied().unwrap_or(0)
    }

    /// Undo the count for a mode that failed to attach.
    pub fn discard(&mut self, category: ModeCategory) {
        if let Some(count) = self.attach_counts.get_mut(&category) {
            *count = count.saturating_sub(1);
        }
    }

    pub fn destroy(&mut self) {
        self.ctors.clear();
        self.attach_counts.clear();
    }
}
