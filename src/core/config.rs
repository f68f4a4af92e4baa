//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. Distances are world units, times
//! are milliseconds.

use crate::core::error::{Result, WildholdError};
use crate::core::types::{Millis, WorldSize};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the simulation systems
///
/// These values set the pacing of a session. Changing them will affect
/// gameplay feel; `validate` rejects combinations that break invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === WORLD ===
    pub world_width: f32,
    pub world_height: f32,

    /// Number of entities scattered at startup
    pub initial_entity_count: usize,

    /// Seed for the session RNG (wander targets, seeding, ids)
    pub seed: u64,

    // === PLAYER ===
    /// Distance covered per tick when walking
    pub player_speed: f32,

    /// Speed multiplier while mounted
    pub horse_speed_multiplier: f32,

    /// Melee damage before sword upgrades
    pub base_damage: f32,

    /// Extra damage per sword level
    pub sword_damage_bonus: f32,

    pub initial_health: f32,

    /// Starting hunger, which is also the hunger cap
    pub initial_hunger: f32,

    pub initial_gold: u32,
    pub initial_seeds: u32,

    /// Max health (and current health) granted per armor purchase
    pub armor_health_bonus: f32,

    /// Damage reduction per armor level
    ///
    /// Hostile hits deal `damage * (1 - armor_level * armor_reduction_per_level)`,
    /// floored at zero, so roughly seven levels make the player immune.
    pub armor_reduction_per_level: f32,

    // === VITALS ===
    /// Hunger drops by one each time this interval elapses
    pub hunger_decay_interval_ms: Millis,

    /// Starvation tick spacing while hunger sits at zero
    pub starvation_interval_ms: Millis,
    pub starvation_damage: f32,

    /// Regeneration tick spacing while hunger is above the threshold
    pub regen_interval_ms: Millis,
    pub regen_amount: f32,

    /// Hunger must be strictly above this to regenerate
    pub regen_hunger_threshold: f32,

    pub meat_hunger: f32,
    pub meat_health: f32,
    pub carrot_hunger: f32,
    pub carrot_health: f32,

    // === HOSTILES ===
    /// Hostiles closer than this chase the player
    pub view_distance: f32,

    /// Hostiles closer than this can land a hit
    pub hostile_melee_range: f32,
    pub hostile_attack_cooldown_ms: Millis,

    // === MINIONS ===
    /// Following minions close the gap once farther than this
    pub leash_radius: f32,

    /// Health a minion candidate is reset to on conversion
    pub minion_health: f32,

    // === WANDERING ===
    /// A wanderer within this distance of its target has arrived
    pub wander_arrival_radius: f32,

    /// Idle wait assigned at seeding, drawn from `[min, max)`
    pub initial_wait_min_ms: Millis,
    pub initial_wait_max_ms: Millis,

    /// Idle wait assigned after each completed walk, drawn from `[min, max)`
    pub wait_min_ms: Millis,
    pub wait_max_ms: Millis,

    // === FARMING ===
    /// Time from planting to a harvestable carrot
    pub growth_duration_ms: Millis,

    /// Seeds granted per seed purchase
    pub seeds_per_pack: u32,

    // === INTERACTION ===
    /// Player interaction sweep radius
    pub interact_range: f32,

    /// Damage rocks and trees take per hit, regardless of sword
    pub resource_hit_damage: f32,

    /// Wood or stone granted when a resource node breaks
    pub resource_yield: u32,
    pub resource_gold: u32,

    /// Gold paid for a lethal hit on a creature
    pub bounty_gold: u32,

    // === BUILDING ===
    /// Build placement grid spacing
    pub grid_size: f32,

    /// Walls and closed gates block movement within this radius
    ///
    /// Must stay below `grid_size` so adjacent cells remain walkable
    /// around a single structure.
    pub structure_radius: f32,

    /// Chip damage a blocked hostile deals to the structure in its way
    pub siege_damage: f32,
    pub siege_cooldown_ms: Millis,

    // === SHOP ===
    pub prices: PriceTable,
}

/// Fixed shop prices in gold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceTable {
    pub wood_sell: u32,
    pub stone_sell: u32,
    pub meat_sell: u32,
    pub carrot_sell: u32,
    pub seed_buy: u32,
    pub horse_buy: u32,
    pub sword_buy: u32,
    pub armor_buy: u32,
    pub wall_buy: u32,
    pub gate_buy: u32,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            wood_sell: 10,
            stone_sell: 15,
            meat_sell: 20,
            carrot_sell: 12,
            seed_buy: 5,
            horse_buy: 500,
            sword_buy: 200,
            armor_buy: 250,
            wall_buy: 50,
            gate_buy: 150,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world_width: 2000.0,
            world_height: 2000.0,
            initial_entity_count: 80,
            seed: 42,

            player_speed: 2.0,
            horse_speed_multiplier: 2.0,
            base_damage: 20.0,
            sword_damage_bonus: 15.0,
            initial_health: 100.0,
            initial_hunger: 20.0,
            initial_gold: 50,
            initial_seeds: 10,
            armor_health_bonus: 50.0,
            armor_reduction_per_level: 0.15,

            hunger_decay_interval_ms: 10_000,
            starvation_interval_ms: 2_000,
            starvation_damage: 5.0,
            regen_interval_ms: 2_000,
            regen_amount: 10.0,
            regen_hunger_threshold: 15.0,
            meat_hunger: 8.0,
            meat_health: 15.0,
            carrot_hunger: 5.0,
            carrot_health: 10.0,

            view_distance: 300.0,
            hostile_melee_range: 45.0,
            hostile_attack_cooldown_ms: 2_000,

            leash_radius: 80.0,
            minion_health: 50.0,

            wander_arrival_radius: 5.0,
            initial_wait_min_ms: 2_000,
            initial_wait_max_ms: 4_000,
            wait_min_ms: 2_000,
            wait_max_ms: 5_000,

            growth_duration_ms: 15_000,
            seeds_per_pack: 5,

            interact_range: 75.0,
            resource_hit_damage: 1.0,
            resource_yield: 5,
            resource_gold: 2,
            bounty_gold: 10,

            grid_size: 40.0,
            structure_radius: 30.0,
            siege_damage: 5.0,
            siege_cooldown_ms: 1_500,

            prices: PriceTable::default(),
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn world_size(&self) -> WorldSize {
        WorldSize::new(self.world_width, self.world_height)
    }

    /// Parse a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.world_width <= 0.0 || self.world_height <= 0.0 {
            return Err(invalid("world dimensions must be positive".into()));
        }

        if self.hunger_decay_interval_ms == 0
            || self.starvation_interval_ms == 0
            || self.regen_interval_ms == 0
            || self.growth_duration_ms == 0
        {
            return Err(invalid("vital and growth intervals must be positive".into()));
        }

        if self.hostile_melee_range >= self.view_distance {
            return Err(invalid(format!(
                "hostile_melee_range ({}) should be < view_distance ({})",
                self.hostile_melee_range, self.view_distance
            )));
        }

        if self.initial_wait_min_ms >= self.initial_wait_max_ms || self.wait_min_ms >= self.wait_max_ms {
            return Err(invalid("wait ranges must have min < max".into()));
        }

        if self.grid_size <= 0.0 || self.structure_radius >= self.grid_size {
            return Err(invalid(format!(
                "structure_radius ({}) should be < grid_size ({})",
                self.structure_radius, self.grid_size
            )));
        }

        if self.regen_hunger_threshold >= self.initial_hunger {
            return Err(invalid(format!(
                "regen_hunger_threshold ({}) should be < initial_hunger ({})",
                self.regen_hunger_threshold, self.initial_hunger
            )));
        }

        Ok(())
    }
}

fn invalid(reason: String) -> WildholdError {
    tracing::warn!("rejected config: {}", reason);
    WildholdError::InvalidConfig(reason)
}
