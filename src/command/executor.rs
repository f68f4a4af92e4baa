//! Command execution - applies one player command to a snapshot

use rand::Rng;
use crate::command::{roster, shop, Command, Rejection};
use crate::core::config::SimulationConfig;
use crate::core::types::Millis;
use crate::ecs::world::GameState;
use crate::entity::player::Player;
use crate::simulation::interaction::interact;
use crate::simulation::vitals::eat;

/// Executes commands against an immutable snapshot
pub struct CommandExecutor;

impl CommandExecutor {
    /// Build the snapshot that results from `command`
    ///
    /// On rejection no new snapshot exists; `state` is the current one.
    pub fn execute<R: Rng + ?Sized>(
        state: &GameState,
        command: Command,
        now: Millis,
        config: &SimulationConfig,
        rng: &mut R,
    ) -> Result<GameState, Rejection> {
        if state.is_game_over {
            return Err(Rejection::GameOver);
        }

        match command {
            Command::Interact { build_mode } => {
                let (next, kind) = interact(state, build_mode, now, config, rng)?;
                tracing::debug!("interact: {:?}", kind);
                Ok(next)
            }
            Command::Eat(food) => with_player(state, |p| eat(p, food, config)),
            Command::Buy(item) => with_player(state, |p| shop::buy(p, item, config)),
            Command::Sell(resource) => with_player(state, |p| shop::sell(p, resource, config)),
            Command::SellAll => with_player(state, |p| {
                shop::sell_all(p, config);
                Ok(())
            }),
            Command::ToggleMount => with_player(state, |p| {
                p.inventory.horse = !p.inventory.horse;
                Ok(())
            }),
            Command::SetTask { minion, task } => {
                let mut next = state.clone();
                roster::set_task(&mut next, minion, task)?;
                Ok(next)
            }
        }
    }
}

/// Clone `state` and apply a player-only edit to the copy
fn with_player(
    state: &GameState,
    edit: impl FnOnce(&mut Player) -> Result<(), Rejection>,
) -> Result<GameState, Rejection> {
    let mut next = state.clone();
    edit(&mut next.player)?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ShopItem;
    use crate::core::types::{EntityId, Vec2};
    use crate::entity::kind::EntityKind;
    use crate::entity::player::Resource;
    use crate::entity::state::Entity;
    use crate::entity::tasks::MinionTask;
    use crate::simulation::vitals::Food;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup() -> (GameState, SimulationConfig, ChaCha8Rng) {
        let config = SimulationConfig::default();
        (GameState::new(&config, 0), config, ChaCha8Rng::seed_from_u64(9))
    }

    #[test]
    fn test_rejected_command_leaves_state() {
        let (state, config, mut rng) = setup();
        let before = state.clone();
        let result = CommandExecutor::execute(&state, Command::Buy(ShopItem::Horse), 0, &config, &mut rng);
        assert_eq!(result, Err(Rejection::InsufficientGold { need: 500, have: 50 }));
        assert_eq!(state, before);
    }

    #[test]
    fn test_toggle_mount_flips() {
        let (state, config, mut rng) = setup();
        let next = CommandExecutor::execute(&state, Command::ToggleMount, 0, &config, &mut rng).unwrap();
        assert!(next.player.inventory.horse);
        let next = CommandExecutor::execute(&next, Command::ToggleMount, 0, &config, &mut rng).unwrap();
        assert!(!next.player.inventory.horse);
    }

    #[test]
    fn test_eat_sell_and_task() {
        let (mut state, config, mut rng) = setup();
        state.player.inventory.meat = 2;
        state.player.hunger = 10.0;
        let mut minion = Entity::spawn(EntityId::new(), EntityKind::Minion, Vec2::default(), 0, 0, &config);
        minion.convert_to_minion(50.0);
        let id = minion.id;
        state.entities.push(minion);

        let next = CommandExecutor::execute(&state, Command::Eat(Food::Meat), 0, &config, &mut rng).unwrap();
        assert_eq!(next.player.hunger, 18.0);
        let next = CommandExecutor::execute(&next, Command::Sell(Resource::Meat), 0, &config, &mut rng).unwrap();
        assert_eq!(next.player.gold, 70);
        let next = CommandExecutor::execute(
            &next,
            Command::SetTask { minion: id, task: MinionTask::Gather },
            0,
            &config,
            &mut rng,
        )
        .unwrap();
        assert_eq!(next.entity(id).unwrap().task, Some(MinionTask::Gather));
    }

    #[test]
    fn test_interact_and_sell_all_leave_input_untouched() {
        let (mut state, config, mut rng) = setup();
        state.player.inventory.wood = 1;
        let before = state.clone();

        let planted = CommandExecutor::execute(&state, Command::Interact { build_mode: None }, 0, &config, &mut rng)
            .unwrap();
        assert_eq!(planted.count_of(EntityKind::CarrotPlant), 1);
        assert_eq!(planted.player.inventory.seeds, 9);

        let sold = CommandExecutor::execute(&state, Command::SellAll, 0, &config, &mut rng).unwrap();
        assert_eq!(sold.player.gold, 60);
        assert_eq!(sold.entity_count(), 0);
        assert_eq!(state, before);
    }

    #[test]
    fn test_commands_rejected_after_game_over() {
        let (mut state, config, mut rng) = setup();
        state.is_game_over = true;
        assert_eq!(
            CommandExecutor::execute(&state, Command::SellAll, 0, &config, &mut rng),
            Err(Rejection::GameOver)
        );
    }
}
