//! Mode and state primitives plus the stack manager that drives them.
//!
//! A [`Mode`] is one full screen (travel, store, river crossing). The
//! [`ModeManager`] keeps every attached mode in insertion order and only the
//! most recently attached one is ticked, rendered and handed input. Content
//! modes are normally written against the [`Screen`] helper trait, which
//! supplies the [`Mode`] plumbing around a [`ModeCore`].
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::context::SimContext;
use crate::error::ModeResult;

pub mod base;
pub mod factory;
pub mod manager;
pub mod menu;
pub mod screen;
pub mod state;

pub use base::ModeCore;
pub use factory::{ModeCtor, ModeFactory};
pub use manager::ModeManager;
pub use menu::{Menu, MenuCommand};
pub use screen::Screen;
pub use state::{State, StateCtor, StateCx, StateFactory, Transition};

/// Kinds of top-level screen. At most one live mode per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeCategory {
    Travel,
    NewGame,
    Store,
    InitialPurchases,
    Trade,
    Hunt,
    RiverCrossing,
    ForkInRoad,
    ManagementOptions,
    RandomEvent,
}

impl ModeCategory {
    pub const ALL: [Self; 10] = [
        Self::Travel,
        Self::NewGame,
        Self::Store,
        Self::InitialPurchases,
        Self::Trade,
        Self::Hunt,
        Self::RiverCrossing,
        Self::ForkInRoad,
        Self::ManagementOptions,
        Self::RandomEvent,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Travel => "travel",
            Self::NewGame => "new_game",
            Self::Store => "store",
            Self::InitialPurchases => "initial_purchases",
            Self::Trade => "trade",
            Self::Hunt => "hunt",
            Self::RiverCrossing => "river_crossing",
            Self::ForkInRoad => "fork_in_road",
            Self::ManagementOptions => "management_options",
            Self::RandomEvent => "random_event",
        }
    }
}

impl fmt::Display for ModeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifiers for every sub-screen a mode can push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateId {
    ProfessionAdvice,
    InputPlayerName,
    ConfirmPlayerNames,
    SelectStartingMonth,
    StoreAdvice,
    BuyItem,
    MissingItem,
    StoreDebt,
    Drive,
    CheckSupplies,
    LookAtMap,
    ChangePace,
    ChangeRations,
    Resting,
    TalkToPeople,
    FordRiverHelp,
    CaulkRiverHelp,
    FerryHelp,
    Crossing,
    CrossingResult,
    TopTen,
}

impl StateId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProfessionAdvice => "profession_advice",
            Self::InputPlayerName => "input_player_name",
            Self::ConfirmPlayerNames => "confirm_player_names",
            Self::SelectStartingMonth => "select_starting_month",
            Self::StoreAdvice => "store_advice",
            Self::BuyItem => "buy_item",
            Self::MissingItem => "missing_item",
            Self::StoreDebt => "store_debt",
            Self::Drive => "drive",
            Self::CheckSupplies => "check_supplies",
            Self::LookAtMap => "look_at_map",
            Self::ChangePace => "change_pace",
            Self::ChangeRations => "change_rations",
            Self::Resting => "resting",
            Self::TalkToPeople => "talk_to_people",
            Self::FordRiverHelp => "ford_river_help",
            Self::CaulkRiverHelp => "caulk_river_help",
            Self::FerryHelp => "ferry_help",
            Self::Crossing => "crossing",
            Self::CrossingResult => "crossing_result",
            Self::TopTen => "top_ten",
        }
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a mode's current state as seen by the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateInfo {
    pub id: StateId,
    pub accepts_input: bool,
}

/// A screen attached to the [`ModeManager`].
///
/// Only the active (most recently attached) mode receives `tick`, `render`
/// and `on_input`. Shared entities are reached through the [`SimContext`]
/// passed to each hook.
pub trait Mode {
    fn category(&self) -> ModeCategory;

    /// Mode-level input flag. A refusing mode refuses even when its state accepts.
    fn accepts_input(&self) -> bool;

    fn should_remove(&self) -> bool;

    /// Mark the mode for eviction on the next removal sweep.
    fn flag_for_removal(&mut self);

    fn current_state(&self) -> Option<StateInfo>;

    /// Runs once, right after the mode is inserted at the top of the stack.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::ModeError`] if a state the mode pushes is not registered.
    fn on_post_create(&mut self, _sim: &mut SimContext) -> ModeResult<()> {
        Ok(())
    }

    /// Advance the mode by one frame.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::ModeError`] when a state transition cannot be built.
    fn tick(&mut self, sim: &mut SimContext) -> ModeResult<()>;

    fn render(&self, sim: &SimContext) -> String;

    /// Handle one trimmed line of input.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::ModeError`] when a state transition cannot be built.
    fn on_input(&mut self, input: &str, sim: &mut SimContext) -> ModeResult<()>;

    /// Runs during the removal sweep, before the mode is dropped.
    fn on_removed(&mut self, _sim: &mut SimContext) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_display_in_snake_case() {
        assert_eq!(ModeCategory::InitialPurchases.to_string(), "initial_purchases");
        assert_eq!(StateId::CaulkRiverHelp.to_string(), "caulk_river_help");
        let json = serde_json::to_string(&ModeCategory::ForkInRoad).unwrap();
        assert_eq!(json, "\"fork_in_road\"");
    }
}
