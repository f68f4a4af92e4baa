//! Tick system - orchestrates simulation updates
//!
//! One tick: vitals -> player movement -> entity behavior -> cleanup.
//!
//! The tick never touches the snapshot it is given. It clones it, applies
//! this tick's changes to the clone and returns that as the next snapshot,
//! so a renderer holding the previous one keeps a consistent view.

use rand::Rng;
use serde::Serialize;
use crate::command::input::InputSnapshot;
use crate::core::config::SimulationConfig;
use crate::core::types::{EntityId, Millis, Tick, Vec2};
use crate::ecs::world::GameState;
use crate::entity::kind::{Capabilities, EntityKind};
use crate::simulation::behavior::{run_behaviors, BehaviorContext};
use crate::simulation::movement::move_player;
use crate::simulation::mutation::apply_mutations;
use crate::simulation::vitals::update_vitals;
use crate::spatial::grid::BuildGrid;
use crate::world::blocking::StructureBlockers;

/// Events generated during a simulation tick
///
/// Returned alongside the new snapshot for logs and UI feedback; the
/// snapshot alone is authoritative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SimulationEvent {
    HungerDropped { hunger: f32 },
    Starved { health: f32 },
    Regenerated { health: f32 },
    PlayerMoved { to: Vec2 },
    /// A hostile landed a melee hit (after armor)
    PlayerHit { by: EntityId, kind: EntityKind, damage: f32 },
    /// A blocked hostile chipped a structure
    StructureSieged { structure: EntityId, by: EntityId },
    CropRipened { id: EntityId },
    /// Dropped at cleanup with zero health
    EntityRemoved { id: EntityId, kind: EntityKind },
    GameOver { tick: Tick },
}

/// Output of one tick
#[derive(Debug, Clone)]
pub struct TickResult {
    pub snapshot: GameState,
    pub events: Vec<SimulationEvent>,
}

/// Advance the world by one tick at wall-clock time `now`
pub fn run_simulation_tick<R: Rng + ?Sized>(
    state: &GameState,
    input: &InputSnapshot,
    now: Millis,
    config: &SimulationConfig,
    rng: &mut R,
) -> TickResult {
    let mut events = Vec::new();

    if state.is_game_over {
        return TickResult { snapshot: state.clone(), events };
    }

    let mut next = state.clone();

    update_vitals(&mut next.player, &mut next.vitals, now, config, &mut events);
    if !next.player.is_alive() {
        mark_game_over(&mut next, &mut events);
        return TickResult { snapshot: next, events };
    }

    let blockers = StructureBlockers::from_entities(
        &next.entities,
        BuildGrid::new(config.grid_size),
        config.structure_radius,
    );

    // Committed before behavior so hostiles chase where the player is now
    if let Some(pos) = move_player(&next, input, config, &blockers) {
        next.player.position = pos;
        events.push(SimulationEvent::PlayerMoved { to: pos });
    }

    let mutations = {
        let ctx = BehaviorContext {
            player: &next.player,
            blockers: &blockers,
            world_size: next.world_size,
            now,
            config,
        };
        run_behaviors(&next.entities, &ctx, rng, &mut events)
    };
    apply_mutations(&mut next, mutations);

    for removed in next.remove_dead() {
        if removed.has(Capabilities::STRUCTURE) {
            tracing::debug!("{} {} destroyed", removed.kind, removed.id.short());
        }
        events.push(SimulationEvent::EntityRemoved { id: removed.id, kind: removed.kind });
    }

    if !next.player.is_alive() {
        mark_game_over(&mut next, &mut events);
    }

    next.tick += 1;
    TickResult { snapshot: next, events }
}

fn mark_game_over(state: &mut GameState, events: &mut Vec<SimulationEvent>) {
    state.is_game_over = true;
    tracing::info!("Game over at tick {}", state.tick);
    events.push(SimulationEvent::GameOver { tick: state.tick });
}
