//! Built-in game screens and the factory that registers them.
pub mod fork;
pub mod hunt;
pub mod new_game;
pub mod options;
pub mod random_event;
pub mod river;
pub mod shared;
pub mod store;
pub mod trade;
pub mod travel;

use crate::mode::{ModeCategory, ModeFactory};

/// Factory with a constructor for every [`ModeCategory`].
#[must_use]
pub fn default_mode_factory() -> ModeFactory {
    ModeFactory::new()
        .register(ModeCategory::Travel, travel::create)
        .register(ModeCategory::NewGame, new_game::create)
        .register(ModeCategory::Store, store::create_store)
        .register(ModeCategory::InitialPurchases, store::create_initial_purchases)
        .register(ModeCategory::Trade, trade::create)
        .register(ModeCategory::Hunt, hunt::create)
        .register(ModeCategory::RiverCrossing, river::create)
        .register(ModeCategory::ForkInRoad, fork::create)
        .register(ModeCategory::ManagementOptions, options::create)
        .register(ModeCategory::RandomEvent, random_event::create)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_is_registered() {
        let factory = default_mode_factory();
        for category in ModeCategory::ALL {
            assert!(factory.is_registered(category), "{category} missing");
        }
    }
}
