//! Tick throughput benchmark
//!
//! ```bash
//! cargo bench --bench tick_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wildhold::command::{HeldDirections, InputSnapshot};
use wildhold::core::config::SimulationConfig;
use wildhold::core::types::{EntityId, Vec2};
use wildhold::entity::kind::EntityKind;
use wildhold::entity::state::Entity;
use wildhold::simulation::seeding::seed_world;
use wildhold::simulation::tick::run_simulation_tick;

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for count in [80usize, 500, 2000] {
        let config = SimulationConfig { initial_entity_count: count, ..SimulationConfig::default() };
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let state = seed_world(&config, 0, &mut rng);
        let input = InputSnapshot::new(HeldDirections::RIGHT);

        group.bench_with_input(BenchmarkId::new("entities", count), &state, |b, state| {
            let mut now = 0;
            b.iter(|| {
                now += 16;
                black_box(run_simulation_tick(state, &input, now, &config, &mut rng))
            })
        });
    }
    group.finish();
}

/// Player boxed in by walls with hostiles sieging them
fn bench_walled_camp(c: &mut Criterion) {
    let config = SimulationConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut state = seed_world(&SimulationConfig { initial_entity_count: 0, ..config.clone() }, 0, &mut rng);
    let center = state.player.position;

    for i in -3..=3 {
        for (dx, dy) in [(i, -3), (i, 3), (-3, i), (3, i)] {
            let pos = center + Vec2::new(dx as f32 * config.grid_size, dy as f32 * config.grid_size);
            state.entities.push(Entity::spawn(EntityId::from_rng(&mut rng), EntityKind::Wall, pos, 0, 0, &config));
        }
    }
    for i in 0..40 {
        let angle = i as f32 * 0.157;
        let pos = center + Vec2::new(angle.cos() * 200.0, angle.sin() * 200.0);
        state.entities.push(Entity::spawn(EntityId::from_rng(&mut rng), EntityKind::Wolf, pos, 0, 5000, &config));
    }

    let input = InputSnapshot::default();
    c.bench_function("tick/walled_camp", |b| {
        let mut now = 0;
        b.iter(|| {
            now += 16;
            black_box(run_simulation_tick(&state, &input, now, &config, &mut rng))
        })
    });
}

criterion_group!(benches, bench_tick, bench_walled_camp);
criterion_main!(benches);
