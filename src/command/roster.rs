//! Minion roster - list minions and reassign their tasks

use serde::Serialize;
use crate::command::Rejection;
use crate::core::types::{EntityId, Vec2};
use crate::ecs::world::GameState;
use crate::entity::kind::Capabilities;
use crate::entity::tasks::MinionTask;

/// One row of the roster view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinionSummary {
    pub id: EntityId,
    pub health: f32,
    pub max_health: f32,
    pub task: MinionTask,
    pub position: Vec2,
}

/// Read-only roster over a snapshot
pub struct Roster<'a> {
    state: &'a GameState,
}

impl<'a> Roster<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self { state }
    }

    pub fn list(&self) -> Vec<MinionSummary> {
        self.state
            .minions()
            .map(|m| MinionSummary {
                id: m.id,
                health: m.health,
                max_health: m.max_health,
                task: m.task.unwrap_or_default(),
                position: m.position,
            })
            .collect()
    }

    /// Resolve a minion by full id or short prefix
    pub fn find(&self, key: &str) -> Option<EntityId> {
        let key = key.to_ascii_lowercase();
        let mut matches = self
            .state
            .minions()
            .filter(|m| m.id.0.simple().to_string().starts_with(&key) || m.id.to_string() == key);
        let first = matches.next()?.id;
        // Ambiguous prefixes resolve to nothing
        matches.next().is_none().then_some(first)
    }
}

/// Change one minion's task
pub fn set_task(state: &mut GameState, id: EntityId, task: MinionTask) -> Result<(), Rejection> {
    let entity = state.entity_mut(id).ok_or(Rejection::UnknownEntity(id))?;
    if !entity.has(Capabilities::ALLY) {
        return Err(Rejection::NotAMinion(id));
    }
    entity.task = Some(task);
    tracing::debug!("minion {} now {}", id.short(), task.name());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::entity::kind::EntityKind;
    use crate::entity::state::Entity;

    fn world() -> (GameState, EntityId, EntityId, EntityId) {
        let config = SimulationConfig::default();
        let mut state = GameState::new(&config, 0);
        let mut ids = Vec::new();
        for kind in [EntityKind::Minion, EntityKind::Minion, EntityKind::Wolf] {
            let mut e = Entity::spawn(EntityId::new(), kind, Vec2::default(), 0, 0, &config);
            if kind == EntityKind::Minion {
                e.convert_to_minion(config.minion_health);
            }
            ids.push(e.id);
            state.entities.push(e);
        }
        (state, ids[0], ids[1], ids[2])
    }

    #[test]
    fn test_list_only_minions() {
        let (state, a, b, _) = world();
        let roster = Roster::new(&state).list();
        assert_eq!(roster.iter().map(|m| m.id).collect::<Vec<_>>(), vec![a, b]);
        assert!(roster.iter().all(|m| m.task == MinionTask::Follow));
    }

    #[test]
    fn test_set_task_touches_only_target() {
        let (mut state, a, b, _) = world();
        set_task(&mut state, a, MinionTask::Defend).unwrap();
        assert_eq!(state.entity(a).unwrap().task, Some(MinionTask::Defend));
        assert_eq!(state.entity(b).unwrap().task, Some(MinionTask::Follow));
    }

    #[test]
    fn test_set_task_rejections() {
        let (mut state, _, _, wolf) = world();
        let before = state.clone();
        assert_eq!(set_task(&mut state, wolf, MinionTask::Farm), Err(Rejection::NotAMinion(wolf)));
        let ghost = EntityId::new();
        assert_eq!(set_task(&mut state, ghost, MinionTask::Farm), Err(Rejection::UnknownEntity(ghost)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_find_by_prefix() {
        let (state, a, _, wolf) = world();
        let roster = Roster::new(&state);
        assert_eq!(roster.find(&a.short()), Some(a));
        assert_eq!(roster.find(&wolf.short()), None);
    }
}
