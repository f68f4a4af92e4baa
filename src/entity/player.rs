//! The player and their inventory

use crate::core::config::SimulationConfig;
use crate::core::types::Vec2;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Gathered goods that can be sold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Wood,
    Stone,
    Meat,
    Carrot,
}

impl Resource {
    pub const ALL: [Resource; 4] = [Resource::Wood, Resource::Stone, Resource::Meat, Resource::Carrot];

    pub fn name(self) -> &'static str {
        match self {
            Resource::Wood => "wood",
            Resource::Stone => "stone",
            Resource::Meat => "meat",
            Resource::Carrot => "carrot",
        }
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wood" => Ok(Resource::Wood),
            "stone" => Ok(Resource::Stone),
            "meat" => Ok(Resource::Meat),
            "carrot" | "carrots" => Ok(Resource::Carrot),
            other => Err(format!("unknown resource: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub wood: u32,
    pub stone: u32,
    pub meat: u32,
    pub carrots: u32,
    pub seeds: u32,
    pub walls: u32,
    pub gates: u32,
    /// Mounted; doubles walking speed
    pub horse: bool,
    pub sword_level: u32,
    pub armor_level: u32,
}

impl Inventory {
    pub fn get(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Wood => self.wood,
            Resource::Stone => self.stone,
            Resource::Meat => self.meat,
            Resource::Carrot => self.carrots,
        }
    }

    fn slot_mut(&mut self, resource: Resource) -> &mut u32 {
        match resource {
            Resource::Wood => &mut self.wood,
            Resource::Stone => &mut self.stone,
            Resource::Meat => &mut self.meat,
            Resource::Carrot => &mut self.carrots,
        }
    }

    pub fn add(&mut self, resource: Resource, amount: u32) {
        let slot = self.slot_mut(resource);
        *slot = slot.saturating_add(amount);
    }

    /// Remove `amount` if fully available; returns whether it was taken
    pub fn take(&mut self, resource: Resource, amount: u32) -> bool {
        let slot = self.slot_mut(resource);
        if *slot < amount {
            return false;
        }
        *slot -= amount;
        true
    }

    /// Empty a slot, returning what it held
    pub fn take_all(&mut self, resource: Resource) -> u32 {
        std::mem::take(self.slot_mut(resource))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub hunger: f32,
    pub max_hunger: f32,
    pub gold: u32,
    /// Reserved; no mechanic reads or writes these yet
    pub level: u32,
    pub experience: u32,
    pub inventory: Inventory,
}

impl Player {
    pub fn new(position: Vec2, config: &SimulationConfig) -> Self {
        Self {
            position,
            health: config.initial_health,
            max_health: config.initial_health,
            hunger: config.initial_hunger,
            max_hunger: config.initial_hunger,
            gold: config.initial_gold,
            level: 1,
            experience: 0,
            inventory: Inventory {
                seeds: config.initial_seeds,
                ..Inventory::default()
            },
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Distance covered per tick, accounting for the horse
    pub fn movement_speed(&self, config: &SimulationConfig) -> f32 {
        if self.inventory.horse {
            config.player_speed * config.horse_speed_multiplier
        } else {
            config.player_speed
        }
    }

    /// Melee damage against creatures
    pub fn melee_damage(&self, config: &SimulationConfig) -> f32 {
        config.base_damage + self.inventory.sword_level as f32 * config.sword_damage_bonus
    }

    /// Damage actually taken from a hostile hit of `raw`
    pub fn mitigated_damage(&self, raw: f32, config: &SimulationConfig) -> f32 {
        let factor = 1.0 - self.inventory.armor_level as f32 * config.armor_reduction_per_level;
        (raw * factor).max(0.0)
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn feed(&mut self, amount: f32) {
        self.hunger = (self.hunger + amount).min(self.max_hunger);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_defaults() {
        let config = SimulationConfig::default();
        let player = Player::new(config.world_size().center(), &config);
        assert_eq!(player.position, Vec2::new(1000.0, 1000.0));
        assert_eq!(player.health, 100.0);
        assert_eq!(player.hunger, 20.0);
        assert_eq!(player.max_hunger, 20.0);
        assert_eq!(player.gold, 50);
        assert_eq!(player.inventory.seeds, 10);
        assert!(!player.inventory.horse);
    }

    #[test]
    fn test_inventory_take_requires_full_amount() {
        let mut inv = Inventory::default();
        inv.add(Resource::Wood, 3);
        assert!(!inv.take(Resource::Wood, 4));
        assert_eq!(inv.wood, 3);
        assert!(inv.take(Resource::Wood, 3));
        assert_eq!(inv.wood, 0);
    }

    #[test]
    fn test_take_all_zeroes_slot() {
        let mut inv = Inventory::default();
        inv.add(Resource::Carrot, 7);
        assert_eq!(inv.take_all(Resource::Carrot), 7);
        assert_eq!(inv.carrots, 0);
    }

    #[test]
    fn test_speed_with_horse() {
        let config = SimulationConfig::default();
        let mut player = Player::new(Vec2::default(), &config);
        assert_eq!(player.movement_speed(&config), 2.0);
        player.inventory.horse = true;
        assert_eq!(player.movement_speed(&config), 4.0);
    }

    #[test]
    fn test_damage_formulas() {
        let config = SimulationConfig::default();
        let mut player = Player::new(Vec2::default(), &config);
        assert_eq!(player.melee_damage(&config), 20.0);
        player.inventory.sword_level = 2;
        assert_eq!(player.melee_damage(&config), 50.0);

        assert_eq!(player.mitigated_damage(5.0, &config), 5.0);
        player.inventory.armor_level = 2;
        assert!((player.mitigated_damage(5.0, &config) - 3.5).abs() < 1e-5);
        // Enough armor floors the hit at zero rather than healing
        player.inventory.armor_level = 8;
        assert_eq!(player.mitigated_damage(5.0, &config), 0.0);
    }

    #[test]
    fn test_heal_and_feed_cap_at_max() {
        let config = SimulationConfig::default();
        let mut player = Player::new(Vec2::default(), &config);
        player.health = 95.0;
        player.heal(15.0);
        assert_eq!(player.health, 100.0);
        player.hunger = 18.0;
        player.feed(8.0);
        assert_eq!(player.hunger, 20.0);
    }
}
