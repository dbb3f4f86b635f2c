//! General store and the outfitting visit before leaving Independence.
use log::info;
use std::collections::BTreeMap;
use std::fmt::Write as _;

use super::shared::PRESS_ENTER;
use crate::context::SimContext;
use crate::entity::{Entity, SimItem};
use crate::error::ModeResult;
use crate::mode::{
    Menu, Mode, ModeCategory, ModeCore, Screen, State, StateCx, StateFactory, StateId, Transition,
};
use crate::numbers::{format_cents, i64_to_f64, len_to_u32, scale_cents, u32_to_f32};

/// Price markup added per location travelled past the start.
const MARKUP_PER_LOCATION: f32 = 0.25;

/// Pending purchases for one store visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreInfo {
    pub location: String,
    pub transactions: BTreeMap<Entity, SimItem>,
    pub buying: Entity,
    pub outfitting: bool,
}

impl StoreInfo {
    fn new(sim: &SimContext, outfitting: bool) -> Self {
        let stops = len_to_u32(sim.trail.current_index());
        let factor = 1.0 + MARKUP_PER_LOCATION * u32_to_f32(stops);
        let transactions = Entity::ALL
            .iter()
            .map(|&entity| {
                let mut item = SimItem::catalog(entity);
                item.cost_cents = scale_cents(item.cost_cents, factor);
                (entity, item)
            })
            .collect();
        Self {
            location: sim.location_name().to_string(),
            transactions,
            buying: Entity::Animal,
            outfitting,
        }
    }

    #[must_use]
    pub fn total_bill(&self) -> i64 {
        self.transactions.values().map(SimItem::total_cost_cents).sum()
    }

    #[must_use]
    pub fn quantity(&self, entity: Entity) -> u32 {
        self.transactions.get(&entity).map_or(0, |item| item.quantity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreCommand {
    Buy(Entity),
    Leave,
}

pub struct StoreScreen {
    core: ModeCore<StoreInfo>,
}

fn states() -> StateFactory<StoreInfo> {
    StateFactory::<StoreInfo>::new()
        .register(StateId::StoreAdvice, |_| Box::new(StoreAdvice))
        .register(StateId::BuyItem, |data| {
            Box::new(BuyItem {
                entity: data.buying,
            })
        })
        .register(StateId::MissingItem, |_| Box::new(MissingItem))
        .register(StateId::StoreDebt, |_| Box::new(StoreDebt))
}

pub fn create_store(sim: &SimContext) -> Box<dyn Mode> {
    Box::new(StoreScreen {
        core: ModeCore::new(ModeCategory::Store, StoreInfo::new(sim, false), states()),
    })
}

pub fn create_initial_purchases(sim: &SimContext) -> Box<dyn Mode> {
    Box::new(StoreScreen {
        core: ModeCore::new(
            ModeCategory::InitialPurchases,
            StoreInfo::new(sim, true),
            states(),
        ),
    })
}

impl Screen for StoreScreen {
    type Data = StoreInfo;
    type Command = StoreCommand;

    fn core(&self) -> &ModeCore<StoreInfo> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModeCore<StoreInfo> {
        &mut self.core
    }

    fn enter(&mut self, _sim: &mut SimContext) -> ModeResult<()> {
        if self.core.data.outfitting {
            self.core.set_state(StateId::StoreAdvice)?;
        }
        Ok(())
    }

    fn header(&self, sim: &SimContext) -> Option<String> {
        Some(format!(
            "{} General Store\n{}\n",
            self.core.data.location,
            sim.clock.long_date()
        ))
    }

    fn menu(&self, _sim: &SimContext) -> Menu<StoreCommand> {
        let mut menu = Menu::new();
        for (entity, item) in &self.core.data.transactions {
            menu.push(
                StoreCommand::Buy(*entity),
                format!(
                    "{:<16}{}",
                    item.name,
                    format_cents(item.total_cost_cents())
                ),
            );
        }
        menu.item(StoreCommand::Leave, "Leave store")
    }

    fn footer(&self, sim: &SimContext) -> Option<String> {
        let bill = self.core.data.total_bill();
        Some(format!(
            "\nTotal bill: {}\nAmount you have: {}",
            format_cents(bill),
            format_cents(sim.vehicle.balance_cents - bill)
        ))
    }

    fn on_command(&mut self, command: StoreCommand, sim: &mut SimContext) -> ModeResult<()> {
        match command {
            StoreCommand::Buy(entity) => {
                self.core.data.buying = entity;
                self.core.set_state(StateId::BuyItem)
            }
            StoreCommand::Leave => {
                let data = &self.core.data;
                let oxen = data.quantity(Entity::Animal) + sim.vehicle.quantity(Entity::Animal);
                if data.outfitting && oxen == 0 {
                    self.core.data.buying = Entity::Animal;
                    return self.core.set_state(StateId::MissingItem);
                }
                if data.total_bill() > sim.vehicle.balance_cents {
                    return self.core.set_state(StateId::StoreDebt);
                }
                self.core.flag_for_removal();
                Ok(())
            }
        }
    }

    fn leave(&mut self, sim: &mut SimContext) {
        for item in self.core.data.transactions.values() {
            if item.quantity == 0 {
                continue;
            }
            if sim.vehicle.buy_item(item) {
                info!("bought {} {}", item.quantity, item.entity);
            }
        }
    }
}

struct StoreAdvice;

impl State<StoreInfo> for StoreAdvice {
    fn id(&self) -> StateId {
        StateId::StoreAdvice
    }

    fn render(&self, data: &StoreInfo, sim: &SimContext) -> String {
        format!(
            "Before leaving {} you should buy equipment and supplies. You have {} in cash, \
             but you don't have to spend it all now.\n\n\
             You can buy whatever you need at {} General Store.\n\n\
             You will need:\n  - a team of oxen to pull your vehicle\n  - clothing for both \
             summer and winter\n  - plenty of food for the trip\n  - ammunition for your rifles\n  \
             - spare parts for your wagon\n\n{PRESS_ENTER}\n",
            data.location,
            format_cents(sim.vehicle.balance_cents),
            data.location
        )
    }

    fn on_input(&mut self, _input: &str, _cx: &mut StateCx<'_, StoreInfo>) -> Transition {
        Transition::Clear
    }
}

/// Quantity prompt for one entity; replaces the pending transaction.
struct BuyItem {
    entity: Entity,
}

impl BuyItem {
    fn room(&self, sim: &SimContext) -> u32 {
        SimItem::catalog(self.entity)
            .max_quantity
            .saturating_sub(sim.vehicle.quantity(self.entity))
    }
}

impl State<StoreInfo> for BuyItem {
    fn id(&self) -> StateId {
        StateId::BuyItem
    }

    fn render(&self, data: &StoreInfo, sim: &SimContext) -> String {
        let price = data
            .transactions
            .get(&self.entity)
            .map_or(0, |item| item.cost_cents);
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} cost {} per {}. You can carry {} more.",
            self.entity,
            format_cents(price),
            self.entity.unit(),
            self.room(sim)
        );
        let _ = write!(out, "\nHow many {} do you want?\n", self.entity);
        out
    }

    fn on_input(&mut self, input: &str, cx: &mut StateCx<'_, StoreInfo>) -> Transition {
        let Ok(amount) = input.parse::<u32>() else {
            return Transition::Clear;
        };
        let amount = amount.min(self.room(cx.sim));
        if let Some(item) = cx.data.transactions.get_mut(&self.entity) {
            item.quantity = amount;
        }
        Transition::Clear
    }
}

struct MissingItem;

impl State<StoreInfo> for MissingItem {
    fn id(&self) -> StateId {
        StateId::MissingItem
    }

    fn render(&self, data: &StoreInfo, _sim: &SimContext) -> String {
        format!(
            "Don't forget, you'll need {} to pull your wagon.\n\n{PRESS_ENTER}\n",
            data.buying
        )
    }

    fn on_input(&mut self, _input: &str, _cx: &mut StateCx<'_, StoreInfo>) -> Transition {
        Transition::Clear
    }
}

struct StoreDebt;

impl State<StoreInfo> for StoreDebt {
    fn id(&self) -> StateId {
        StateId::StoreDebt
    }

    fn render(&self, data: &StoreInfo, sim: &SimContext) -> String {
        let bill = data.total_bill();
        let short = i64_to_f64(bill - sim.vehicle.balance_cents) / 100.0;
        format!(
            "Whoa there partner! I see you got {} worth of items but only {}.\n\
             You are ${short:.2} short.\n\n{PRESS_ENTER}\n",
            format_cents(bill),
            format_cents(sim.vehicle.balance_cents)
        )
    }

    fn on_input(&mut self, _input: &str, _cx: &mut StateCx<'_, StoreInfo>) -> Transition {
        Transition::Clear
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::entity::Profession;

    fn outfitting() -> (Box<dyn Mode>, SimContext) {
        let mut sim = SimContext::new(SimConfig::default()).unwrap();
        sim.start_game(Profession::Farmer, &["Ann".to_string()], 3)
            .unwrap();
        let mut mode = create_initial_purchases(&sim);
        mode.on_post_create(&mut sim).unwrap();
        (mode, sim)
    }

    #[test]
    fn first_visit_shows_advice() {
        let (mut mode, mut sim) = outfitting();
        assert_eq!(mode.current_state().unwrap().id, StateId::StoreAdvice);
        mode.on_input("", &mut sim).unwrap();
        assert!(mode.current_state().is_none());
        assert!(mode.render(&sim).starts_with("Independence General Store"));
    }

    #[test]
    fn leaving_without_oxen_is_blocked() {
        let (mut mode, mut sim) = outfitting();
        mode.on_input("", &mut sim).unwrap();
        mode.on_input("8", &mut sim).unwrap();
        assert_eq!(mode.current_state().unwrap().id, StateId::MissingItem);
        assert!(!mode.should_remove());
    }

    #[test]
    fn overspending_is_blocked_then_purchases_apply_on_removal() {
        let (mut mode, mut sim) = outfitting();
        mode.on_input("", &mut sim).unwrap();
        for line in ["1", "6", "2", "2000"] {
            mode.on_input(line, &mut sim).unwrap();
        }
        mode.on_input("8", &mut sim).unwrap();
        assert_eq!(mode.current_state().unwrap().id, StateId::StoreDebt);
        mode.on_input("", &mut sim).unwrap();
        for line in ["2", "500", "8"] {
            mode.on_input(line, &mut sim).unwrap();
        }
        assert!(mode.should_remove());
        assert_eq!(sim.vehicle.quantity(Entity::Food), 0);
        mode.on_removed(&mut sim);
        assert_eq!(sim.vehicle.quantity(Entity::Animal), 6);
        assert_eq!(sim.vehicle.quantity(Entity::Food), 500);
        assert_eq!(sim.vehicle.balance_cents, 40_000 - 12_000 - 10_000);
    }
}
