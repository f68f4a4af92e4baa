//! Entity state machine
//!
//! Each live entity resolves to exactly one behavior per tick, first match
//! wins:
//!
//! 1. growing crop: advance growth from the planting time
//! 2. hostile that can see the player: chase, melee, or siege a structure
//! 3. minion: follow the player (other tasks idle)
//! 4. anything movable: idle/wander cycle
//! 5. everything else: nothing
//!
//! Reads the snapshot, returns mutations; never writes.

use rand::Rng;
use crate::core::config::SimulationConfig;
use crate::core::types::{Millis, WorldSize};
use crate::entity::kind::Capabilities;
use crate::entity::player::Player;
use crate::entity::state::{Behavior, Entity};
use crate::entity::stats::stats_for;
use crate::entity::tasks::MinionTask;
use crate::simulation::mutation::Mutation;
use crate::simulation::tick::SimulationEvent;
use crate::spatial::geometry::{lerp, random_position, step_toward};
use crate::world::blocking::StructureBlockers;

/// Read-only view handed to every entity step
pub struct BehaviorContext<'a> {
    /// Player with this tick's movement already applied
    pub player: &'a Player,
    pub blockers: &'a StructureBlockers,
    pub world_size: WorldSize,
    pub now: Millis,
    pub config: &'a SimulationConfig,
}

/// Step every live entity; returns the mutation list for the orchestrator
pub fn run_behaviors<R: Rng + ?Sized>(
    entities: &[Entity],
    ctx: &BehaviorContext,
    rng: &mut R,
    events: &mut Vec<SimulationEvent>,
) -> Vec<Mutation> {
    let mut mutations = Vec::new();
    for entity in entities.iter().filter(|e| e.is_alive()) {
        step_entity(entity, ctx, rng, &mut mutations, events);
    }
    mutations
}

fn step_entity<R: Rng + ?Sized>(
    entity: &Entity,
    ctx: &BehaviorContext,
    rng: &mut R,
    out: &mut Vec<Mutation>,
    events: &mut Vec<SimulationEvent>,
) {
    let next = if is_growing(entity) {
        grow(entity, ctx, events)
    } else if entity.has(Capabilities::HOSTILE) && sees_player(entity, ctx) {
        chase(entity, ctx, out, events)
    } else if entity.has(Capabilities::ALLY) {
        follow(entity, ctx)
    } else if entity.has(Capabilities::MOVABLE) && entity.speed > 0.0 {
        wander(entity, ctx, rng)
    } else {
        return;
    };

    if next != *entity {
        out.push(Mutation::Replace(next));
    }
}

fn is_growing(entity: &Entity) -> bool {
    entity.has(Capabilities::HARVESTABLE) && entity.growth_stage.is_some_and(|g| g < 100.0)
}

fn sees_player(entity: &Entity, ctx: &BehaviorContext) -> bool {
    entity.position.distance(&ctx.player.position) < ctx.config.view_distance
}

fn grow(entity: &Entity, ctx: &BehaviorContext, events: &mut Vec<SimulationEvent>) -> Entity {
    let mut next = entity.clone();
    let elapsed = ctx.now.saturating_sub(entity.last_move_time) as f32;
    let progress = (elapsed / ctx.config.growth_duration_ms as f32).min(1.0);
    let growth = lerp(0.0, 100.0, progress);
    next.growth_stage = Some(growth);
    if growth >= 100.0 {
        next.behavior = Behavior::Idle;
        events.push(SimulationEvent::CropRipened { id: entity.id });
    }
    next
}

fn chase(
    entity: &Entity,
    ctx: &BehaviorContext,
    out: &mut Vec<Mutation>,
    events: &mut Vec<SimulationEvent>,
) -> Entity {
    let mut next = entity.clone();
    next.behavior = Behavior::Attacking;
    next.target_pos = None;

    let player_pos = ctx.player.position;
    let dist = entity.position.distance(&player_pos);
    let candidate = step_toward(entity.position, player_pos, entity.speed);

    match ctx.blockers.blocking(entity.position, candidate) {
        Some(structure) => {
            if next.siege_cooldown.try_fire(ctx.now) {
                out.push(Mutation::Damage { id: structure, amount: ctx.config.siege_damage });
                events.push(SimulationEvent::StructureSieged { structure, by: entity.id });
            }
        }
        None => next.position = candidate,
    }

    // Reach is measured from where the hostile stood at the start of the tick
    if dist < ctx.config.hostile_melee_range && next.attack_cooldown.try_fire(ctx.now) {
        let raw = stats_for(entity.kind).damage.unwrap_or(0.0);
        let damage = ctx.player.mitigated_damage(raw, ctx.config);
        out.push(Mutation::DamagePlayer(damage));
        events.push(SimulationEvent::PlayerHit { by: entity.id, kind: entity.kind, damage });
    }
    next
}

fn follow(entity: &Entity, ctx: &BehaviorContext) -> Entity {
    let mut next = entity.clone();
    if entity.task != Some(MinionTask::Follow) {
        next.behavior = Behavior::Idle;
        return next;
    }

    let player_pos = ctx.player.position;
    if entity.position.distance(&player_pos) > ctx.config.leash_radius {
        next.position = step_toward(entity.position, player_pos, entity.speed);
        next.behavior = Behavior::Moving;
    } else {
        next.behavior = Behavior::Idle;
    }
    next
}

fn wander<R: Rng + ?Sized>(entity: &Entity, ctx: &BehaviorContext, rng: &mut R) -> Entity {
    let mut next = entity.clone();
    let config = ctx.config;

    match entity.behavior {
        // Lost sight of the player mid-chase
        Behavior::Attacking => {
            next.behavior = Behavior::Idle;
            next.target_pos = None;
            next.last_move_time = ctx.now;
            next.wait_duration = rng.gen_range(config.wait_min_ms..config.wait_max_ms);
        }
        Behavior::Idle => {
            if ctx.now.saturating_sub(entity.last_move_time) > entity.wait_duration {
                next.behavior = Behavior::Moving;
                next.target_pos = Some(random_position(rng, ctx.world_size));
                next.last_move_time = ctx.now;
            }
        }
        Behavior::Moving => match entity.target_pos {
            Some(target) if entity.position.distance(&target) < config.wander_arrival_radius => {
                next.behavior = Behavior::Idle;
                next.target_pos = None;
                next.last_move_time = ctx.now;
                next.wait_duration = rng.gen_range(config.wait_min_ms..config.wait_max_ms);
            }
            Some(target) => next.position = step_toward(entity.position, target, entity.speed),
            None => next.behavior = Behavior::Idle,
        },
        _ => {}
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{EntityId, Vec2};
    use crate::entity::kind::EntityKind;
    use crate::spatial::grid::BuildGrid;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct Fixture {
        config: SimulationConfig,
        player: Player,
        entities: Vec<Entity>,
        rng: ChaCha8Rng,
    }

    impl Fixture {
        fn new(player_pos: Vec2) -> Self {
            let config = SimulationConfig::default();
            let player = Player::new(player_pos, &config);
            Self { config, player, entities: Vec::new(), rng: ChaCha8Rng::seed_from_u64(7) }
        }

        fn add(&mut self, kind: EntityKind, pos: Vec2, wait: Millis) -> EntityId {
            let e = Entity::spawn(EntityId::new(), kind, pos, 0, wait, &self.config);
            let id = e.id;
            self.entities.push(e);
            id
        }

        fn step(&mut self, now: Millis) -> (Vec<Mutation>, Vec<SimulationEvent>) {
            let blockers = StructureBlockers::from_entities(
                &self.entities,
                BuildGrid::new(self.config.grid_size),
                self.config.structure_radius,
            );
            let ctx = BehaviorContext {
                player: &self.player,
                blockers: &blockers,
                world_size: self.config.world_size(),
                now,
                config: &self.config,
            };
            let mut events = Vec::new();
            let muts = run_behaviors(&self.entities, &ctx, &mut self.rng, &mut events);
            (muts, events)
        }
    }

    fn replacement(muts: &[Mutation]) -> Option<&Entity> {
        muts.iter().find_map(|m| match m {
            Mutation::Replace(e) => Some(e),
            _ => None,
        })
    }

    #[test]
    fn test_wolf_outside_view_stays_idle() {
        let mut fx = Fixture::new(Vec2::new(1000.0, 1000.0));
        fx.add(EntityKind::Wolf, Vec2::new(1310.0, 1000.0), 5000);
        let (muts, _) = fx.step(16);
        assert!(muts.is_empty());
    }

    #[test]
    fn test_wolf_in_view_chases() {
        let mut fx = Fixture::new(Vec2::new(1000.0, 1000.0));
        fx.add(EntityKind::Wolf, Vec2::new(1290.0, 1000.0), 5000);
        let (muts, _) = fx.step(16);
        let wolf = replacement(&muts).unwrap();
        assert_eq!(wolf.behavior, Behavior::Attacking);
        assert!((wolf.position.x - 1288.75).abs() < 1e-3);
        assert!(!muts.iter().any(|m| matches!(m, Mutation::DamagePlayer(_))));
    }

    #[test]
    fn test_melee_respects_cooldown_and_armor() {
        let mut fx = Fixture::new(Vec2::new(1000.0, 1000.0));
        fx.player.inventory.armor_level = 1;
        fx.add(EntityKind::Bear, Vec2::new(1040.0, 1000.0), 5000);

        let (muts, events) = fx.step(0);
        let hit = muts.iter().find_map(|m| match m {
            Mutation::DamagePlayer(d) => Some(*d),
            _ => None,
        });
        assert!((hit.unwrap() - 4.25).abs() < 1e-5);
        assert!(events.iter().any(|e| matches!(e, SimulationEvent::PlayerHit { .. })));

        // Carry the bear's fired cooldown forward
        fx.entities[0] = replacement(&muts).unwrap().clone();
        fx.entities[0].position = Vec2::new(1040.0, 1000.0);
        let (muts, _) = fx.step(1999);
        assert!(!muts.iter().any(|m| matches!(m, Mutation::DamagePlayer(_))));
        let (muts, _) = fx.step(2000);
        assert!(muts.iter().any(|m| matches!(m, Mutation::DamagePlayer(_))));
    }

    #[test]
    fn test_blocked_hostile_sieges_structure() {
        let mut fx = Fixture::new(Vec2::new(200.0, 400.0));
        fx.add(EntityKind::Wolf, Vec2::new(200.0, 271.0), 5000);
        let wall = fx.add(EntityKind::Wall, Vec2::new(200.0, 300.0), 0);

        let (muts, _) = fx.step(0);
        let wolf = replacement(&muts).unwrap();
        assert_eq!(wolf.position, Vec2::new(200.0, 271.0));
        assert!(muts.contains(&Mutation::Damage { id: wall, amount: 5.0 }));
    }

    #[test]
    fn test_hostile_inside_radius_may_back_away() {
        let mut fx = Fixture::new(Vec2::new(200.0, 400.0));
        fx.add(EntityKind::Wolf, Vec2::new(200.0, 320.0), 5000);
        let wall = fx.add(EntityKind::Wall, Vec2::new(200.0, 300.0), 0);

        let (muts, _) = fx.step(0);
        let wolf = replacement(&muts).unwrap();
        assert!((wolf.position.y - 321.25).abs() < 1e-3);
        assert!(!muts.iter().any(|m| matches!(m, Mutation::Damage { id, .. } if *id == wall)));
    }

    #[test]
    fn test_hostile_losing_sight_goes_idle() {
        let mut fx = Fixture::new(Vec2::new(1000.0, 1000.0));
        fx.add(EntityKind::Bandit, Vec2::new(1500.0, 1000.0), 5000);
        fx.entities[0].behavior = Behavior::Attacking;
        let (muts, _) = fx.step(700);
        let bandit = replacement(&muts).unwrap();
        assert_eq!(bandit.behavior, Behavior::Idle);
        assert_eq!(bandit.last_move_time, 700);
        assert!((2000..5000).contains(&bandit.wait_duration));
    }

    #[test]
    fn test_wander_cycle() {
        let mut fx = Fixture::new(Vec2::new(0.0, 0.0));
        fx.add(EntityKind::Sheep, Vec2::new(1000.0, 1000.0), 2000);

        let (muts, _) = fx.step(2000);
        assert!(muts.is_empty());

        let (muts, _) = fx.step(2001);
        let sheep = replacement(&muts).unwrap().clone();
        assert_eq!(sheep.behavior, Behavior::Moving);
        assert!(sheep.target_pos.is_some());
        assert_eq!(sheep.position, Vec2::new(1000.0, 1000.0));

        // Near the target it settles with a fresh wait
        fx.entities[0] = sheep;
        fx.entities[0].target_pos = Some(Vec2::new(1003.0, 1000.0));
        let (muts, _) = fx.step(3000);
        let sheep = replacement(&muts).unwrap();
        assert_eq!(sheep.behavior, Behavior::Idle);
        assert_eq!(sheep.last_move_time, 3000);
        assert!((2000..5000).contains(&sheep.wait_duration));
    }

    #[test]
    fn test_minion_follow_leash() {
        let mut fx = Fixture::new(Vec2::new(0.0, 0.0));
        fx.add(EntityKind::Minion, Vec2::new(100.0, 0.0), 0);
        fx.entities[0].task = Some(MinionTask::Follow);

        let (muts, _) = fx.step(0);
        let minion = replacement(&muts).unwrap();
        assert_eq!(minion.behavior, Behavior::Moving);
        assert!((minion.position.x - 99.5).abs() < 1e-4);

        fx.entities[0].position = Vec2::new(60.0, 0.0);
        let (muts, _) = fx.step(0);
        assert!(muts.is_empty());
    }

    #[test]
    fn test_minion_other_tasks_are_inert() {
        let mut fx = Fixture::new(Vec2::new(0.0, 0.0));
        fx.add(EntityKind::Minion, Vec2::new(500.0, 0.0), 0);
        for task in [MinionTask::Farm, MinionTask::Gather, MinionTask::Defend] {
            fx.entities[0].task = Some(task);
            let (muts, _) = fx.step(10_000);
            assert!(muts.is_empty(), "{:?} should not move", task);
        }
    }

    #[test]
    fn test_carrot_growth_and_ripening() {
        let mut fx = Fixture::new(Vec2::new(0.0, 0.0));
        let config = fx.config.clone();
        fx.entities.push(Entity::carrot_plant(EntityId::new(), Vec2::new(10.0, 10.0), 1000, &config));

        let (muts, _) = fx.step(8500);
        let plant = replacement(&muts).unwrap();
        assert!((plant.growth_stage.unwrap() - 50.0).abs() < 1e-3);
        assert_eq!(plant.behavior, Behavior::Growing);

        let (muts, events) = fx.step(16_000);
        let plant = replacement(&muts).unwrap();
        assert_eq!(plant.growth_stage, Some(100.0));
        assert_eq!(plant.behavior, Behavior::Idle);
        assert!(events.iter().any(|e| matches!(e, SimulationEvent::CropRipened { .. })));
    }

    #[test]
    fn test_static_entities_do_nothing() {
        let mut fx = Fixture::new(Vec2::new(0.0, 0.0));
        fx.add(EntityKind::Tree, Vec2::new(10.0, 0.0), 0);
        fx.add(EntityKind::Gate, Vec2::new(100.0, 0.0), 0);
        let (muts, _) = fx.step(50_000);
        assert!(muts.is_empty());
    }
}
