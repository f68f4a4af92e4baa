//! World snapshot - the complete simulation state for one instant

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use crate::core::config::SimulationConfig;
use crate::core::types::{EntityId, Millis, Tick, WorldSize};
use crate::entity::kind::EntityKind;
use crate::entity::player::Player;
use crate::entity::state::Entity;
use crate::simulation::vitals::VitalsTimers;

/// The game world as seen by rendering and UI
///
/// Snapshots are values: the tick and every command build a new one from
/// the previous, so a snapshot handed to a reader never changes under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    /// Unordered; collection order only breaks ties deterministically
    pub entities: Vec<Entity>,
    pub world_size: WorldSize,
    pub is_game_over: bool,
    /// Reserved; no mechanic awards score yet
    pub score: u64,
    pub vitals: VitalsTimers,
    pub tick: Tick,
}

impl GameState {
    /// Empty world with the player at its center and vitals timers
    /// starting at `now`
    pub fn new(config: &SimulationConfig, now: Millis) -> Self {
        let world_size = config.world_size();
        Self {
            player: Player::new(world_size.center(), config),
            entities: Vec::new(),
            world_size,
            is_game_over: false,
            score: 0,
            vitals: VitalsTimers::started_at(now, config),
            tick: 0,
        }
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|e| e.id == id)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Id -> collection index, for bulk updates
    pub fn id_index(&self) -> AHashMap<EntityId, usize> {
        self.entities.iter().enumerate().map(|(idx, e)| (e.id, idx)).collect()
    }

    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    pub fn minions(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter().filter(|e| e.kind == EntityKind::Minion)
    }

    /// Drop every entity whose health reached zero; returns the removed ones
    pub fn remove_dead(&mut self) -> Vec<Entity> {
        let (alive, dead): (Vec<Entity>, Vec<Entity>) =
            std::mem::take(&mut self.entities).into_iter().partition(Entity::is_alive);
        self.entities = alive;
        dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;

    fn spawn(state: &mut GameState, kind: EntityKind) -> EntityId {
        let entity = Entity::spawn(EntityId::new(), kind, Vec2::default(), 0, 0, &SimulationConfig::default());
        let id = entity.id;
        state.entities.push(entity);
        id
    }

    #[test]
    fn test_new_world_is_empty() {
        let state = GameState::new(&SimulationConfig::default(), 0);
        assert_eq!(state.entity_count(), 0);
        assert!(!state.is_game_over);
        assert_eq!(state.world_size, WorldSize::new(2000.0, 2000.0));
    }

    #[test]
    fn test_lookup_by_id() {
        let mut state = GameState::new(&SimulationConfig::default(), 0);
        spawn(&mut state, EntityKind::Tree);
        let wolf = spawn(&mut state, EntityKind::Wolf);

        assert_eq!(state.index_of(wolf), Some(1));
        assert_eq!(state.entity(wolf).map(|e| e.kind), Some(EntityKind::Wolf));
        assert_eq!(state.id_index().get(&wolf), Some(&1));
        assert!(state.entity(EntityId::new()).is_none());
    }

    #[test]
    fn test_remove_dead_keeps_order() {
        let mut state = GameState::new(&SimulationConfig::default(), 0);
        let a = spawn(&mut state, EntityKind::Tree);
        let b = spawn(&mut state, EntityKind::Rock);
        let c = spawn(&mut state, EntityKind::Sheep);
        state.entity_mut(b).unwrap().health = 0.0;

        let removed = state.remove_dead();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].id, b);
        let ids: Vec<_> = state.entities.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a, c]);
    }
}
