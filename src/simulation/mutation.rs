//! Mutation lists - how sub-systems change the world
//!
//! Behavior and interaction read a snapshot and return `Mutation`s; only
//! the orchestrator applies them, to the copy it owns. Application is two
//! phased: whole-entity replacements land first, then deltas (damage,
//! toggles, rewards, spawns). An entity's own step can therefore never
//! overwrite damage dealt to it by another entity in the same pass,
//! whatever the scan order.

use crate::core::types::EntityId;
use crate::ecs::world::GameState;
use crate::entity::kind::StructureKind;
use crate::entity::player::Resource;
use crate::entity::state::Entity;

/// Gold and goods credited to the player
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Reward {
    pub gold: u32,
    pub goods: Option<(Resource, u32)>,
}

/// Player stock spent by an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consumable {
    Seed,
    Structure(StructureKind),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    DamagePlayer(f32),
    /// Next per-tick state of an entity (position, behavior, timers)
    Replace(Entity),
    Damage { id: EntityId, amount: f32 },
    /// Force health to zero; removed at cleanup
    Harvest(EntityId),
    ToggleGate(EntityId),
    ConvertToMinion { id: EntityId, health: f32 },
    Spawn(Entity),
    Reward(Reward),
    Consume(Consumable),
}

impl Mutation {
    fn is_replacement(&self) -> bool {
        matches!(self, Mutation::Replace(_))
    }
}

/// Apply a batch to `state`
///
/// Mutations naming an entity that no longer exists are dropped.
pub fn apply_mutations(state: &mut GameState, mutations: Vec<Mutation>) {
    let (replacements, deltas): (Vec<Mutation>, Vec<Mutation>) =
        mutations.into_iter().partition(Mutation::is_replacement);

    let index = state.id_index();
    for mutation in replacements.into_iter().chain(deltas) {
        apply_one(state, &index, mutation);
    }
}

fn apply_one(state: &mut GameState, index: &ahash::AHashMap<EntityId, usize>, mutation: Mutation) {
    match mutation {
        Mutation::DamagePlayer(amount) => state.player.take_damage(amount),
        Mutation::Replace(next) => {
            if let Some(&idx) = index.get(&next.id) {
                state.entities[idx] = next;
            }
        }
        Mutation::Damage { id, amount } => {
            if let Some(&idx) = index.get(&id) {
                state.entities[idx].apply_damage(amount);
            }
        }
        Mutation::Harvest(id) => {
            if let Some(&idx) = index.get(&id) {
                state.entities[idx].health = 0.0;
            }
        }
        Mutation::ToggleGate(id) => {
            if let Some(&idx) = index.get(&id) {
                state.entities[idx].toggle_gate();
            }
        }
        Mutation::ConvertToMinion { id, health } => {
            if let Some(&idx) = index.get(&id) {
                state.entities[idx].convert_to_minion(health);
            }
        }
        // Spawns go to the end, so existing indices stay valid
        Mutation::Spawn(entity) => state.entities.push(entity),
        Mutation::Reward(reward) => {
            let player = &mut state.player;
            player.gold = player.gold.saturating_add(reward.gold);
            if let Some((resource, amount)) = reward.goods {
                player.inventory.add(resource, amount);
            }
        }
        Mutation::Consume(item) => {
            let inv = &mut state.player.inventory;
            let slot = match item {
                Consumable::Seed => &mut inv.seeds,
                Consumable::Structure(StructureKind::Wall) => &mut inv.walls,
                Consumable::Structure(StructureKind::Gate) => &mut inv.gates,
            };
            *slot = slot.saturating_sub(1);
        }
    }
}
