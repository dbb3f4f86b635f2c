//! Trading with other travellers.
use log::info;
use rand::Rng;

use crate::context::SimContext;
use crate::entity::Entity;
use crate::error::ModeResult;
use crate::mode::{Menu, Mode, ModeCategory, ModeCore, Screen, StateFactory};

/// Goods a trader might ask for and the usual amount.
const ASKS: [(Entity, u32); 4] = [
    (Entity::Food, 50),
    (Entity::Clothes, 2),
    (Entity::Ammo, 40),
    (Entity::Animal, 1),
];

/// Goods a trader might hand over and the usual amount.
const GIVES: [(Entity, u32); 6] = [
    (Entity::Food, 100),
    (Entity::Clothes, 2),
    (Entity::Ammo, 60),
    (Entity::Wheel, 1),
    (Entity::Axle, 1),
    (Entity::Tongue, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeOffer {
    pub wants: Entity,
    pub wants_qty: u32,
    pub gives: Entity,
    pub gives_qty: u32,
}

impl TradeOffer {
    /// Random offer. A wagon waiting on a part is offered that part.
    pub fn roll<R: Rng + ?Sized>(rng: &mut R, needed_part: Option<Entity>) -> Self {
        let (gives, gives_qty) = match needed_part {
            Some(part) => (part, 1),
            None => GIVES[rng.gen_range(0..GIVES.len())],
        };
        let (wants, wants_qty) = loop {
            let ask = ASKS[rng.gen_range(0..ASKS.len())];
            if ask.0 != gives {
                break ask;
            }
        };
        Self {
            wants,
            wants_qty,
            gives,
            gives_qty,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeInfo {
    pub offer: Option<TradeOffer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeCommand {
    Accept,
    Decline,
}

pub struct TradeScreen {
    core: ModeCore<TradeInfo>,
}

pub fn create(_sim: &SimContext) -> Box<dyn Mode> {
    Box::new(TradeScreen {
        core: ModeCore::new(ModeCategory::Trade, TradeInfo::default(), StateFactory::new()),
    })
}

impl Screen for TradeScreen {
    type Data = TradeInfo;
    type Command = TradeCommand;

    fn core(&self) -> &ModeCore<TradeInfo> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModeCore<TradeInfo> {
        &mut self.core
    }

    fn enter(&mut self, sim: &mut SimContext) -> ModeResult<()> {
        let offer = TradeOffer::roll(&mut sim.rng, sim.vehicle.broken_part);
        self.core.data.offer = Some(offer);
        Ok(())
    }

    fn header(&self, sim: &SimContext) -> Option<String> {
        let text = self.core.data.offer.map_or_else(
            || "Nobody wants to trade right now.".to_string(),
            |offer| {
                format!(
                    "A traveller would like {} {}.\nIn exchange they offer {} {}.\n\nYou have {} {}.",
                    offer.wants_qty,
                    offer.wants,
                    offer.gives_qty,
                    offer.gives,
                    sim.vehicle.quantity(offer.wants),
                    offer.wants
                )
            },
        );
        Some(format!("{text}\n"))
    }

    fn menu(&self, _sim: &SimContext) -> Menu<TradeCommand> {
        Menu::titled("Are you willing to trade?")
            .item(TradeCommand::Accept, "Yes")
            .item(TradeCommand::Decline, "No")
    }

    fn on_command(&mut self, command: TradeCommand, sim: &mut SimContext) -> ModeResult<()> {
        let notice = match (command, self.core.data.offer) {
            (TradeCommand::Accept, Some(offer)) => {
                if sim.vehicle.quantity(offer.wants) < offer.wants_qty {
                    format!("You don't have enough {} to trade.", offer.wants)
                } else {
                    sim.vehicle.remove_item(offer.wants, offer.wants_qty);
                    let got = sim.vehicle.add_item(offer.gives, offer.gives_qty);
                    info!(
                        "traded {} {} for {got} {}",
                        offer.wants_qty, offer.wants, offer.gives
                    );
                    format!("You traded for {got} {}.", offer.gives)
                }
            }
            _ => "You decided not to trade.".to_string(),
        };
        sim.notice = Some(notice);
        sim.request_turns(1);
        self.core.flag_for_removal();
        Ok(())
    }
}
