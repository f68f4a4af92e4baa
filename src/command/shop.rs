//! Shop - buy upgrades and supplies, sell gathered goods

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use crate::command::Rejection;
use crate::core::config::{PriceTable, SimulationConfig};
use crate::entity::player::{Player, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShopItem {
    Sword,
    Armor,
    Horse,
    Seeds,
    Wall,
    Gate,
}

impl ShopItem {
    pub const ALL: [ShopItem; 6] = [
        ShopItem::Sword,
        ShopItem::Armor,
        ShopItem::Horse,
        ShopItem::Seeds,
        ShopItem::Wall,
        ShopItem::Gate,
    ];

    pub fn price(self, prices: &PriceTable) -> u32 {
        match self {
            ShopItem::Sword => prices.sword_buy,
            ShopItem::Armor => prices.armor_buy,
            ShopItem::Horse => prices.horse_buy,
            ShopItem::Seeds => prices.seed_buy,
            ShopItem::Wall => prices.wall_buy,
            ShopItem::Gate => prices.gate_buy,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShopItem::Sword => "sword",
            ShopItem::Armor => "armor",
            ShopItem::Horse => "horse",
            ShopItem::Seeds => "seeds",
            ShopItem::Wall => "wall",
            ShopItem::Gate => "gate",
        }
    }
}

impl FromStr for ShopItem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sword" => Ok(ShopItem::Sword),
            "armor" | "armour" => Ok(ShopItem::Armor),
            "horse" => Ok(ShopItem::Horse),
            "seed" | "seeds" => Ok(ShopItem::Seeds),
            "wall" => Ok(ShopItem::Wall),
            "gate" => Ok(ShopItem::Gate),
            other => Err(format!("not for sale: {}", other)),
        }
    }
}

/// Sale price of one unit
pub fn sell_price(resource: Resource, prices: &PriceTable) -> u32 {
    match resource {
        Resource::Wood => prices.wood_sell,
        Resource::Stone => prices.stone_sell,
        Resource::Meat => prices.meat_sell,
        Resource::Carrot => prices.carrot_sell,
    }
}

/// Spend gold on `item`
pub fn buy(player: &mut Player, item: ShopItem, config: &SimulationConfig) -> Result<(), Rejection> {
    let price = item.price(&config.prices);
    if player.gold < price {
        return Err(Rejection::InsufficientGold { need: price, have: player.gold });
    }
    if item == ShopItem::Horse && player.inventory.horse {
        return Err(Rejection::AlreadyOwned(item.name()));
    }

    player.gold -= price;
    let inv = &mut player.inventory;
    match item {
        ShopItem::Sword => inv.sword_level += 1,
        ShopItem::Armor => {
            inv.armor_level += 1;
            player.max_health += config.armor_health_bonus;
            player.health += config.armor_health_bonus;
        }
        ShopItem::Horse => inv.horse = true,
        ShopItem::Seeds => inv.seeds = inv.seeds.saturating_add(config.seeds_per_pack),
        ShopItem::Wall => inv.walls = inv.walls.saturating_add(1),
        ShopItem::Gate => inv.gates = inv.gates.saturating_add(1),
    }
    tracing::debug!("bought {} for {} gold", item.name(), price);
    Ok(())
}

/// Sell one unit of `resource`
pub fn sell(player: &mut Player, resource: Resource, config: &SimulationConfig) -> Result<(), Rejection> {
    if !player.inventory.take(resource, 1) {
        return Err(Rejection::OutOfStock(resource.name()));
    }
    player.gold = player.gold.saturating_add(sell_price(resource, &config.prices));
    Ok(())
}

/// Sell every sellable good at once; returns the gold earned
///
/// Selling nothing is not an error.
pub fn sell_all(player: &mut Player, config: &SimulationConfig) -> u32 {
    let earned = Resource::ALL
        .into_iter()
        .map(|r| player.inventory.take_all(r).saturating_mul(sell_price(r, &config.prices)))
        .fold(0u32, u32::saturating_add);
    player.gold = player.gold.saturating_add(earned);
    earned
}
