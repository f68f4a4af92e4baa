//! Player vitals - hunger decay, starvation, regeneration, eating
//!
//! Runs once per tick before movement. Each effect is gated by its own
//! wall-clock cooldown so the rates do not depend on frame rate.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use crate::command::Rejection;
use crate::core::clock::Cooldown;
use crate::core::config::SimulationConfig;
use crate::core::types::Millis;
use crate::entity::player::{Player, Resource};
use crate::simulation::tick::SimulationEvent;

/// Cooldowns driving the three periodic vital effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VitalsTimers {
    pub hunger_decay: Cooldown,
    pub starvation: Cooldown,
    pub regen: Cooldown,
}

impl VitalsTimers {
    /// All windows open one full interval after `now`
    pub fn started_at(now: Millis, config: &SimulationConfig) -> Self {
        Self {
            hunger_decay: Cooldown::started_at(config.hunger_decay_interval_ms, now),
            starvation: Cooldown::started_at(config.starvation_interval_ms, now),
            regen: Cooldown::started_at(config.regen_interval_ms, now),
        }
    }
}

/// Advance hunger, starvation and regeneration for one tick
pub fn update_vitals(
    player: &mut Player,
    timers: &mut VitalsTimers,
    now: Millis,
    config: &SimulationConfig,
    events: &mut Vec<SimulationEvent>,
) {
    if timers.hunger_decay.try_fire(now) {
        player.hunger = (player.hunger - 1.0).max(0.0);
        events.push(SimulationEvent::HungerDropped { hunger: player.hunger });
    }

    if player.hunger <= 0.0 && timers.starvation.try_fire(now) {
        player.take_damage(config.starvation_damage);
        tracing::debug!("player starving, health now {}", player.health);
        events.push(SimulationEvent::Starved { health: player.health });
    }

    if player.hunger > config.regen_hunger_threshold && timers.regen.try_fire(now) {
        if player.health < player.max_health {
            player.heal(config.regen_amount);
            events.push(SimulationEvent::Regenerated { health: player.health });
        }
    }
}

/// Foods the player can eat from inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Food {
    Meat,
    Carrot,
}

impl Food {
    pub fn resource(self) -> Resource {
        match self {
            Food::Meat => Resource::Meat,
            Food::Carrot => Resource::Carrot,
        }
    }

    /// (hunger, health) restored per unit
    pub fn restores(self, config: &SimulationConfig) -> (f32, f32) {
        match self {
            Food::Meat => (config.meat_hunger, config.meat_health),
            Food::Carrot => (config.carrot_hunger, config.carrot_health),
        }
    }
}

impl FromStr for Food {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "meat" => Ok(Food::Meat),
            "carrot" | "carrots" => Ok(Food::Carrot),
            other => Err(format!("not edible: {}", other)),
        }
    }
}

/// Eat one unit of `food`, capped at max hunger and health
pub fn eat(player: &mut Player, food: Food, config: &SimulationConfig) -> Result<(), Rejection> {
    let resource = food.resource();
    if !player.inventory.take(resource, 1) {
        return Err(Rejection::OutOfStock(resource.name()));
    }
    let (hunger, health) = food.restores(config);
    player.feed(hunger);
    player.heal(health);
    Ok(())
}
