//! Initial world population

use rand::seq::SliceRandom;
use rand::Rng;
use crate::core::config::SimulationConfig;
use crate::core::types::{EntityId, Millis};
use crate::ecs::world::GameState;
use crate::entity::kind::EntityKind;
use crate::entity::state::Entity;
use crate::spatial::geometry::random_position;

/// Fresh snapshot: player at the center, entities scattered at random
pub fn seed_world<R: Rng + ?Sized>(config: &SimulationConfig, now: Millis, rng: &mut R) -> GameState {
    let mut state = GameState::new(config, now);
    let size = state.world_size;

    for _ in 0..config.initial_entity_count {
        let Some(&kind) = EntityKind::SEEDABLE.choose(rng) else {
            break;
        };
        let id = EntityId::from_rng(rng);
        let position = random_position(rng, size);
        let wait = rng.gen_range(config.initial_wait_min_ms..config.initial_wait_max_ms);
        state.entities.push(Entity::spawn(id, kind, position, now, wait, config));
    }

    tracing::info!(
        "Seeded world {}x{} with {} entities",
        size.width,
        size.height,
        state.entity_count()
    );
    state
}
