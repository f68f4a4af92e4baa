//! Player interaction - melee sweep, harvest, gate toggle, build, plant
//!
//! One command triggers exactly one of: a sweep over everything in reach,
//! placing a structure, planting a seed, or a rejection. The sweep gives
//! each in-range entity at most one effect; the build/plant fallback only
//! runs if nothing in range counted as an interaction.

use rand::Rng;
use crate::command::Rejection;
use crate::core::config::SimulationConfig;
use crate::core::types::{EntityId, Millis};
use crate::ecs::world::GameState;
use crate::entity::kind::{Capabilities, StructureKind};
use crate::entity::player::Resource;
use crate::entity::state::Entity;
use crate::entity::stats::stats_for;
use crate::simulation::mutation::{apply_mutations, Consumable, Mutation, Reward};
use crate::spatial::grid::BuildGrid;

/// What an accepted interaction did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// Number of entities that received an effect
    Swept(usize),
    Built(StructureKind),
    Planted,
}

/// Work out the mutations for one interact command against `state`
pub fn plan_interaction<R: Rng + ?Sized>(
    state: &GameState,
    build_mode: Option<StructureKind>,
    now: Millis,
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<(Vec<Mutation>, InteractionKind), Rejection> {
    if state.is_game_over {
        return Err(Rejection::GameOver);
    }

    let mut mutations = Vec::new();
    let mut affected = 0;
    let reach = config.interact_range;
    let origin = state.player.position;

    for entity in state
        .entities
        .iter()
        .filter(|e| e.is_alive() && e.position.distance(&origin) < reach)
    {
        if sweep_effect(entity, state, config, &mut mutations) {
            affected += 1;
        }
    }

    if affected > 0 {
        return Ok((mutations, InteractionKind::Swept(affected)));
    }
    place(state, build_mode, now, config, rng)
}

/// Push the first matching effect for `entity`; returns whether it counted
fn sweep_effect(
    entity: &Entity,
    state: &GameState,
    config: &SimulationConfig,
    out: &mut Vec<Mutation>,
) -> bool {
    let id = entity.id;

    if entity.has(Capabilities::TOGGLEABLE) {
        out.push(Mutation::ToggleGate(id));
        return true;
    }

    if entity.is_ripe() {
        out.push(Mutation::Harvest(id));
        out.push(Mutation::Reward(Reward { goods: Some((Resource::Carrot, 1)), ..Reward::default() }));
        return true;
    }

    if entity.kind.is_inert_to_attack() {
        return false;
    }

    if entity.has(Capabilities::RESOURCE_NODE) {
        let amount = config.resource_hit_damage;
        out.push(Mutation::Damage { id, amount });
        if entity.health - amount <= 0.0 {
            let goods = entity.kind.raw_resource().map(|r| (r, config.resource_yield));
            out.push(Mutation::Reward(Reward { gold: config.resource_gold, goods }));
            tracing::debug!("{} {} depleted", entity.kind, id.short());
        }
        return true;
    }

    let amount = state.player.melee_damage(config);
    let lethal = entity.health - amount <= 0.0;

    if lethal && entity.has(Capabilities::BOUNTY) {
        let goods = if entity.has(Capabilities::LIVESTOCK) {
            stats_for(entity.kind).meat_yield.map(|m| (Resource::Meat, m))
        } else {
            None
        };
        out.push(Mutation::Reward(Reward { gold: config.bounty_gold, goods }));
    }

    if lethal && entity.has(Capabilities::CONVERTIBLE) {
        out.push(Mutation::ConvertToMinion { id, health: config.minion_health });
        tracing::debug!("{} {} joins as a minion", entity.kind, id.short());
    } else {
        out.push(Mutation::Damage { id, amount });
    }
    true
}

/// Build or plant on the player's grid cell
fn place<R: Rng + ?Sized>(
    state: &GameState,
    build_mode: Option<StructureKind>,
    now: Millis,
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<(Vec<Mutation>, InteractionKind), Rejection> {
    let grid = BuildGrid::new(config.grid_size);
    let here = state.player.position;

    if state
        .entities
        .iter()
        .any(|e| e.is_alive() && grid.same_cell(e.position, here))
    {
        return Err(Rejection::CellOccupied);
    }

    let inventory = &state.player.inventory;
    let id = EntityId::from_rng(rng);

    match build_mode {
        Some(structure) => {
            let (stock, name) = match structure {
                StructureKind::Wall => (inventory.walls, "walls"),
                StructureKind::Gate => (inventory.gates, "gates"),
            };
            if stock == 0 {
                return Err(Rejection::OutOfStock(name));
            }
            let built = Entity::spawn(id, structure.entity_kind(), grid.snap(here), now, 0, config);
            Ok((
                vec![Mutation::Spawn(built), Mutation::Consume(Consumable::Structure(structure))],
                InteractionKind::Built(structure),
            ))
        }
        None => {
            if inventory.seeds == 0 {
                return Err(Rejection::OutOfStock("seeds"));
            }
            let plant = Entity::carrot_plant(id, state.player.position, now, config);
            Ok((
                vec![Mutation::Spawn(plant), Mutation::Consume(Consumable::Seed)],
                InteractionKind::Planted,
            ))
        }
    }
}

/// Resolve an interact command into a new snapshot
///
/// Entities killed by the sweep are gone from the returned state.
pub fn interact<R: Rng + ?Sized>(
    state: &GameState,
    build_mode: Option<StructureKind>,
    now: Millis,
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<(GameState, InteractionKind), Rejection> {
    let (mutations, kind) = plan_interaction(state, build_mode, now, config, rng)?;
    let mut next = state.clone();
    apply_mutations(&mut next, mutations);
    next.remove_dead();
    Ok((next, kind))
}
