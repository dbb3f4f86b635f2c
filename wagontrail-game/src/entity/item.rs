//! Inventory entities and the priced items that move between store and wagon.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::numbers::format_cents;

/// Every kind of good the wagon can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Animal,
    Food,
    Clothes,
    Ammo,
    Wheel,
    Axle,
    Tongue,
}

impl Entity {
    pub const ALL: [Self; 7] = [
        Self::Animal,
        Self::Food,
        Self::Clothes,
        Self::Ammo,
        Self::Wheel,
        Self::Axle,
        Self::Tongue,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Animal => "oxen",
            Self::Food => "food",
            Self::Clothes => "clothing",
            Self::Ammo => "bullets",
            Self::Wheel => "wagon wheels",
            Self::Axle => "wagon axles",
            Self::Tongue => "wagon tongues",
        }
    }

    /// Unit name used when prompting for quantities.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Animal => "ox",
            Self::Food => "pound",
            Self::Clothes => "set",
            Self::Ammo => "bullet",
            Self::Wheel | Self::Axle | Self::Tongue => "part",
        }
    }

    /// Returns true for spare wagon parts.
    #[must_use]
    pub const fn is_part(self) -> bool {
        matches!(self, Self::Wheel | Self::Axle | Self::Tongue)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stack of one entity with its unit price and carry limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimItem {
    pub entity: Entity,
    pub name: String,
    pub quantity: u32,
    pub max_quantity: u32,
    /// Price per unit in cents.
    pub cost_cents: i64,
    /// Weight per unit in pounds.
    pub weight: u32,
}

impl SimItem {
    /// Build the default catalog entry for an entity with zero quantity.
    #[must_use]
    pub fn catalog(entity: Entity) -> Self {
        let (name, max_quantity, cost_cents, weight) = match entity {
            Entity::Animal => ("Oxen", 20, 2_000, 0),
            Entity::Food => ("Food", 2_000, 20, 1),
            Entity::Clothes => ("Clothing", 50, 1_000, 2),
            Entity::Ammo => ("Ammunition", 2_000, 10, 0),
            Entity::Wheel => ("Vehicle wheel", 3, 1_000, 20),
            Entity::Axle => ("Vehicle axle", 3, 1_000, 20),
            Entity::Tongue => ("Vehicle tongue", 3, 1_000, 20),
        };
        Self {
            entity,
            name: name.to_string(),
            quantity: 0,
            max_quantity,
            cost_cents,
            weight,
        }
    }

    /// Copy of this item carrying a different quantity, clamped to the carry limit.
    #[must_use]
    pub fn with_quantity(&self, quantity: u32) -> Self {
        Self {
            quantity: quantity.min(self.max_quantity),
            ..self.clone()
        }
    }

    /// Add units, clamping at the carry limit. Returns the number actually added.
    pub fn add(&mut self, amount: u32) -> u32 {
        let before = self.quantity;
        self.quantity = self.quantity.saturating_add(amount).min(self.max_quantity);
        self.quantity - before
    }

    /// Remove units, clamping at zero. Returns the number actually removed.
    pub fn remove(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.quantity);
        self.quantity -= removed;
        removed
    }

    #[must_use]
    pub fn total_cost_cents(&self) -> i64 {
        i64::from(self.quantity) * self.cost_cents
    }

    #[must_use]
    pub fn total_weight(&self) -> u32 {
        self.quantity.saturating_mul(self.weight)
    }
}

impl fmt::Display for SimItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<4} {}",
            self.quantity,
            format_cents(self.total_cost_cents())
        )
    }
}
