//! Player movement and structure collision

use crate::command::input::InputSnapshot;
use crate::core::config::SimulationConfig;
use crate::ecs::world::GameState;
use crate::core::types::Vec2;
use crate::world::blocking::StructureBlockers;

/// Where the player ends up this tick, or `None` if they stay put
///
/// The candidate is clamped to the world first, then dropped whole if a
/// structure blocks it. There is no sliding along walls.
pub fn move_player(
    state: &GameState,
    input: &InputSnapshot,
    config: &SimulationConfig,
    blockers: &StructureBlockers,
) -> Option<Vec2> {
    let dir = input.direction();
    if dir.is_zero() {
        return None;
    }

    let current = state.player.position;
    let speed = state.player.movement_speed(config);
    let candidate = state.world_size.clamp(current + dir * speed);

    if candidate == current || blockers.is_blocked(current, candidate) {
        return None;
    }
    Some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::input::HeldDirections;
    use crate::core::types::EntityId;
    use crate::entity::kind::EntityKind;
    use crate::entity::state::Entity;
    use crate::spatial::grid::BuildGrid;

    fn setup(player: Vec2) -> (GameState, SimulationConfig) {
        let config = SimulationConfig::default();
        let mut state = GameState::new(&config, 0);
        state.player.position = player;
        (state, config)
    }

    fn blockers_for(state: &GameState, config: &SimulationConfig) -> StructureBlockers {
        StructureBlockers::from_entities(&state.entities, BuildGrid::new(config.grid_size), config.structure_radius)
    }

    fn held(dirs: HeldDirections) -> InputSnapshot {
        InputSnapshot::new(dirs)
    }

    #[test]
    fn test_moves_at_base_speed() {
        let (state, config) = setup(Vec2::new(100.0, 100.0));
        let next = move_player(&state, &held(HeldDirections::RIGHT), &config, &blockers_for(&state, &config));
        assert_eq!(next, Some(Vec2::new(102.0, 100.0)));
    }

    #[test]
    fn test_horse_doubles_speed() {
        let (mut state, config) = setup(Vec2::new(100.0, 100.0));
        state.player.inventory.horse = true;
        let next = move_player(&state, &held(HeldDirections::DOWN), &config, &blockers_for(&state, &config));
        assert_eq!(next, Some(Vec2::new(100.0, 104.0)));
    }

    #[test]
    fn test_clamped_to_world_bounds() {
        let (state, config) = setup(Vec2::new(1.0, 0.0));
        let next = move_player(
            &state,
            &held(HeldDirections::LEFT | HeldDirections::UP),
            &config,
            &blockers_for(&state, &config),
        );
        assert_eq!(next, Some(Vec2::new(0.0, 0.0)));

        // Pinned in the corner, nothing changes
        let (state, config) = setup(Vec2::new(0.0, 0.0));
        let next = move_player(&state, &held(HeldDirections::LEFT), &config, &blockers_for(&state, &config));
        assert_eq!(next, None);
    }

    #[test]
    fn test_wall_stops_player_at_radius() {
        let (mut state, config) = setup(Vec2::new(40.0, 72.0));
        state.entities.push(Entity::spawn(EntityId::new(), EntityKind::Wall, Vec2::new(40.0, 40.0), 0, 0, &config));
        let blockers = blockers_for(&state, &config);

        assert_eq!(move_player(&state, &held(HeldDirections::UP), &config, &blockers), Some(Vec2::new(40.0, 70.0)));
        state.player.position = Vec2::new(40.0, 70.0);
        assert_eq!(move_player(&state, &held(HeldDirections::UP), &config, &blockers), None);
    }

    #[test]
    fn test_no_input_no_move() {
        let (state, config) = setup(Vec2::new(100.0, 100.0));
        assert_eq!(move_player(&state, &InputSnapshot::default(), &config, &blockers_for(&state, &config)), None);
    }
}
