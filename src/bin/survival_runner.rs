//! Headless Survival Runner
//!
//! Runs a seeded session with a simple scripted player and prints a JSON
//! summary. Useful for balance checks and for spotting regressions in
//! long runs.

use clap::Parser;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use wildhold::command::{Command, HeldDirections};
use wildhold::core::clock::ManualClock;
use wildhold::core::config::SimulationConfig;
use wildhold::core::error::Result;
use wildhold::simulation::session::Session;
use wildhold::simulation::tick::SimulationEvent;
use wildhold::simulation::vitals::Food;

/// Headless Survival Runner - scripted play for balance checks
#[derive(Parser, Debug)]
#[command(name = "survival_runner")]
#[command(about = "Run a scripted survival session and output a JSON summary")]
struct Args {
    /// Config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum ticks before stopping
    #[arg(long, default_value_t = 20_000)]
    max_ticks: u64,

    /// Milliseconds of game time per tick
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Ticks between scripted interactions
    #[arg(long, default_value_t = 30)]
    interact_every: u64,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    survived: bool,
    health: f32,
    hunger: f32,
    gold: u32,
    minions: usize,
    entities_left: usize,
    hits_taken: usize,
    damage_taken: f32,
    removed_by_kind: BTreeMap<String, usize>,
}

/// Walk in a slow square, eat when hungry, swing at whatever is nearby
fn script_step(session: &mut Session<ManualClock>, tick: u64, interact_every: u64) {
    const LEG: u64 = 600;
    let dir = match (tick / LEG) % 4 {
        0 => HeldDirections::RIGHT,
        1 => HeldDirections::DOWN,
        2 => HeldDirections::LEFT,
        _ => HeldDirections::UP,
    };
    session.set_held(dir);

    let state = session.snapshot();
    if state.player.hunger < 10.0 {
        let food = if state.player.inventory.meat > 0 { Food::Meat } else { Food::Carrot };
        session.execute(Command::Eat(food));
    }
    if interact_every > 0 && tick % interact_every == 0 {
        session.interact();
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("wildhold=warn")),
        )
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let seed = config.seed;

    let mut session = Session::new(config, ManualClock::new(0))?;
    let mut hits_taken = 0;
    let mut damage_taken = 0.0;
    let mut removed_by_kind: BTreeMap<String, usize> = BTreeMap::new();

    for tick in 0..args.max_ticks {
        script_step(&mut session, tick, args.interact_every);
        session.clock().advance(args.frame_ms);

        for event in session.tick() {
            match event {
                SimulationEvent::PlayerHit { damage, .. } => {
                    hits_taken += 1;
                    damage_taken += damage;
                }
                SimulationEvent::EntityRemoved { kind, .. } => {
                    *removed_by_kind.entry(kind.name().to_string()).or_default() += 1;
                }
                _ => {}
            }
        }
        if session.is_game_over() {
            break;
        }
    }

    let state = session.snapshot();
    let summary = RunSummary {
        seed,
        ticks: state.tick,
        survived: !state.is_game_over,
        health: state.player.health,
        hunger: state.player.hunger,
        gold: state.player.gold,
        minions: state.minions().count(),
        entities_left: state.entity_count(),
        hits_taken,
        damage_taken,
        removed_by_kind,
    };

    match args.format.as_str() {
        "text" => {
            println!("Survival Run");
            println!("============");
            println!("Seed: {}", summary.seed);
            println!("Ticks: {}", summary.ticks);
            println!("Survived: {}", summary.survived);
            println!("Health: {:.0}  Hunger: {:.0}  Gold: {}", summary.health, summary.hunger, summary.gold);
            println!("Minions: {}  Entities left: {}", summary.minions, summary.entities_left);
            println!("Hits taken: {} ({:.1} damage)", summary.hits_taken, summary.damage_taken);
            for (kind, n) in &summary.removed_by_kind {
                println!("  removed {}: {}", kind, n);
            }
        }
        other => {
            if other != "json" {
                eprintln!("Unknown format '{}', defaulting to json", other);
            }
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
