//! Per-entity simulation state

use crate::core::clock::Cooldown;
use crate::core::config::SimulationConfig;
use crate::core::types::{EntityId, Millis, Vec2};
use crate::entity::kind::{Capabilities, EntityKind};
use crate::entity::stats::stats_for;
use crate::entity::tasks::{MinionTask, Owner};
use serde::{Deserialize, Serialize};

/// What an entity is doing this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Behavior {
    Idle,
    Moving,
    Attacking,
    Harvesting,
    Growing,
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub behavior: Behavior,
    /// Destination while wandering
    pub target_pos: Option<Vec2>,
    /// Start of the current idle wait, or the planting time for crops
    pub last_move_time: Millis,
    pub wait_duration: Millis,
    /// 0-100, carrot plants only
    pub growth_stage: Option<f32>,
    /// Gates melee hits on the player
    pub attack_cooldown: Cooldown,
    /// Gates chip damage against a blocking structure
    pub siege_cooldown: Cooldown,
    pub owner: Option<Owner>,
    pub task: Option<MinionTask>,
    pub speed: f32,
    pub is_gate_open: Option<bool>,
}

impl Entity {
    /// Fresh entity of `kind` with table stats, idling for `wait_duration`
    pub fn spawn(
        id: EntityId,
        kind: EntityKind,
        position: Vec2,
        now: Millis,
        wait_duration: Millis,
        config: &SimulationConfig,
    ) -> Self {
        let stats = stats_for(kind);
        let is_gate = kind.has(Capabilities::TOGGLEABLE);
        Self {
            id,
            kind,
            position,
            health: stats.health,
            max_health: stats.health,
            behavior: if is_gate { Behavior::Closed } else { Behavior::Idle },
            target_pos: None,
            last_move_time: now,
            wait_duration,
            growth_stage: None,
            attack_cooldown: Cooldown::new(config.hostile_attack_cooldown_ms),
            siege_cooldown: Cooldown::new(config.siege_cooldown_ms),
            owner: None,
            task: None,
            speed: stats.speed,
            is_gate_open: is_gate.then_some(false),
        }
    }

    /// Seedling planted at `now`; ripens after the configured growth duration
    pub fn carrot_plant(id: EntityId, position: Vec2, now: Millis, config: &SimulationConfig) -> Self {
        let mut plant = Self::spawn(id, EntityKind::CarrotPlant, position, now, config.growth_duration_ms, config);
        plant.health = 1.0;
        plant.max_health = 1.0;
        plant.behavior = Behavior::Growing;
        plant.growth_stage = Some(0.0);
        plant.speed = 0.0;
        plant
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    #[inline]
    pub fn has(&self, capability: Capabilities) -> bool {
        self.kind.has(capability)
    }

    pub fn is_ripe(&self) -> bool {
        self.has(Capabilities::HARVESTABLE) && self.growth_stage.is_some_and(|g| g >= 100.0)
    }

    /// Walls, and gates while closed
    pub fn blocks_movement(&self) -> bool {
        self.is_alive() && self.has(Capabilities::STRUCTURE) && self.is_gate_open != Some(true)
    }

    pub fn toggle_gate(&mut self) {
        if let Some(open) = self.is_gate_open {
            let open = !open;
            self.is_gate_open = Some(open);
            self.behavior = if open { Behavior::Open } else { Behavior::Closed };
        }
    }

    /// Turn a defeated candidate into a player-owned minion in place
    pub fn convert_to_minion(&mut self, health: f32) {
        self.kind = EntityKind::Minion;
        self.health = health;
        self.max_health = health;
        self.owner = Some(Owner::Player);
        self.task = Some(MinionTask::Follow);
        self.behavior = Behavior::Idle;
        self.target_pos = None;
    }

    /// Subtract damage, never storing a negative value
    pub fn apply_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }
}
