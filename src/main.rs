//! Wildhold - Entry Point
//!
//! Text front end for the simulation. Time is driven by a manual clock that
//! advances one frame per tick, so a session replays exactly for a given
//! seed and command sequence.

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use wildhold::command::{Command, CommandOutcome, HeldDirections, Roster, ShopItem};
use wildhold::core::clock::{Clock, ManualClock};
use wildhold::core::config::SimulationConfig;
use wildhold::core::error::{Result, WildholdError};
use wildhold::entity::kind::{Capabilities, StructureKind};
use wildhold::entity::player::Resource;
use wildhold::entity::tasks::MinionTask;
use wildhold::simulation::session::Session;
use wildhold::simulation::tick::SimulationEvent;
use wildhold::simulation::vitals::Food;

#[derive(Parser, Debug)]
#[command(name = "wildhold")]
#[command(about = "Interactive survival simulation")]
struct Args {
    /// Config file (TOML); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the world seed
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds of game time per tick
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("wildhold=info")),
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

    let mut session = Session::new(config, ManualClock::new(0))?;

    println!("\n=== WILDHOLD ===");
    print_help();

    loop {
        display_status(&session);

        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "q" {
            break;
        }

        if let Err(e) = handle_line(&mut session, line, args.frame_ms) {
            println!("{}", e);
        }
    }

    let state = session.snapshot();
    println!(
        "\nGoodbye! Final state: {} entities, {} ticks, {} gold.",
        state.entity_count(),
        state.tick,
        state.player.gold
    );
    Ok(())
}

fn handle_line(session: &mut Session<ManualClock>, line: &str, frame_ms: u64) -> Result<()> {
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let arg = words.next();

    match (verb, arg) {
        ("help" | "h", _) => print_help(),
        ("tick" | "t", _) => run_frames(session, 1, frame_ms),
        ("run", Some(n)) => {
            let n: u32 = n.parse().map_err(|_| unknown("run <number>"))?;
            run_frames(session, n, frame_ms);
        }
        ("move", Some(dir)) => session.set_held(dir.parse::<HeldDirections>().map_err(WildholdError::UnknownInput)?),
        ("stop", _) => session.set_held(HeldDirections::empty()),
        ("interact" | "e", _) => report(session.interact()),
        ("eat", Some(food)) => {
            let food: Food = food.parse().map_err(WildholdError::UnknownInput)?;
            report(session.execute(Command::Eat(food)));
        }
        ("buy", Some(item)) => {
            let item: ShopItem = item.parse().map_err(WildholdError::UnknownInput)?;
            report(session.execute(Command::Buy(item)));
        }
        ("sell", Some("all")) => report(session.execute(Command::SellAll)),
        ("sell", Some(res)) => {
            let resource: Resource = res.parse().map_err(WildholdError::UnknownInput)?;
            report(session.execute(Command::Sell(resource)));
        }
        ("mode", Some("none")) => session.set_build_mode(None),
        ("mode", Some(kind)) => {
            let kind: StructureKind = kind.parse().map_err(WildholdError::UnknownInput)?;
            session.set_build_mode(Some(kind));
        }
        ("ride", _) => report(session.execute(Command::ToggleMount)),
        ("minions" | "m", _) => display_minions(session),
        ("task", Some(key)) => {
            let task: MinionTask = words
                .next()
                .ok_or_else(|| unknown("task <minion> <follow|farm|gather|defend>"))?
                .parse()
                .map_err(WildholdError::UnknownInput)?;
            let state = session.snapshot();
            let minion = Roster::new(&state)
                .find(key)
                .ok_or_else(|| WildholdError::UnknownInput(format!("no minion matches {}", key)))?;
            report(session.execute(Command::SetTask { minion, task }));
        }
        ("status" | "s", _) => display_detailed_status(session),
        ("restart", _) => session.restart(),
        _ => return Err(unknown("unrecognized command, try `help`")),
    }
    Ok(())
}

fn unknown(msg: &str) -> WildholdError {
    WildholdError::UnknownInput(msg.to_string())
}

fn run_frames(session: &mut Session<ManualClock>, frames: u32, frame_ms: u64) {
    for _ in 0..frames {
        session.clock().advance(frame_ms);
        for event in session.tick() {
            match event {
                SimulationEvent::PlayerHit { kind, damage, .. } => {
                    println!("  {} hits you for {:.1}", kind, damage)
                }
                SimulationEvent::EntityRemoved { kind, .. } if kind.has(Capabilities::STRUCTURE) => {
                    println!("  your {} was destroyed", kind)
                }
                SimulationEvent::CropRipened { .. } => println!("  a carrot is ripe"),
                SimulationEvent::GameOver { tick } => println!("  *** You died at tick {} ***", tick),
                _ => {}
            }
        }
        if session.is_game_over() {
            break;
        }
    }
}

fn report(outcome: CommandOutcome) {
    match outcome {
        CommandOutcome::Applied => println!("ok"),
        CommandOutcome::Rejected(reason) => println!("rejected: {}", reason),
    }
}

fn print_help() {
    println!();
    println!("Commands:");
    println!("  tick / t              - Advance one frame");
    println!("  run <n>               - Advance n frames");
    println!("  move <dir>            - Hold a direction (up, down-left, ...)");
    println!("  stop                  - Release all directions");
    println!("  interact / e          - Attack, harvest, toggle, build or plant");
    println!("  mode <wall|gate|none> - Select build mode");
    println!("  eat <meat|carrot>     - Eat from inventory");
    println!("  buy <item>            - sword, armor, horse, seeds, wall, gate");
    println!("  sell <res|all>        - wood, stone, meat, carrot");
    println!("  ride                  - Mount or dismount");
    println!("  minions / m           - List minions");
    println!("  task <id> <task>      - Assign a minion task");
    println!("  status / s            - Detailed status");
    println!("  restart               - New world");
    println!("  quit / q              - Exit");
    println!();
}

fn display_status(session: &Session<ManualClock>) {
    let state = session.snapshot();
    let p = &state.player;
    println!();
    println!(
        "--- Tick {} | HP {:.0}/{:.0} | Hunger {:.0}/{:.0} | Gold {} | ({:.0}, {:.0}){} ---",
        state.tick,
        p.health,
        p.max_health,
        p.hunger,
        p.max_hunger,
        p.gold,
        p.position.x,
        p.position.y,
        if state.is_game_over { " | GAME OVER" } else { "" }
    );
}

fn display_detailed_status(session: &Session<ManualClock>) {
    let state = session.snapshot();
    let config = session.config();
    let p = &state.player;
    let inv = &p.inventory;

    println!();
    println!("=== Status (Tick {}, {} ms) ===", state.tick, session.clock().now_ms());
    println!(
        "  Goods: wood {} stone {} meat {} carrots {} seeds {}",
        inv.wood, inv.stone, inv.meat, inv.carrots, inv.seeds
    );
    println!(
        "  Gear: sword {} armor {} horse {} walls {} gates {}",
        inv.sword_level, inv.armor_level, inv.horse, inv.walls, inv.gates
    );
    println!(
        "  Build mode: {}",
        session.build_mode().map_or("none", |k| k.entity_kind().name())
    );

    let mut nearby: Vec<_> = state
        .entities
        .iter()
        .map(|e| (e.position.distance(&p.position), e))
        .filter(|(d, _)| *d < config.view_distance)
        .collect();
    nearby.sort_by(|a, b| a.0.total_cmp(&b.0));

    println!("  Nearby ({}):", nearby.len());
    for (dist, e) in nearby.iter().take(10) {
        println!(
            "    {:<16} {:>5.0} away  hp {:.0}/{:.0}  {:?}",
            e.kind, dist, e.health, e.max_health, e.behavior
        );
    }
    println!();
}

fn display_minions(session: &Session<ManualClock>) {
    let state = session.snapshot();
    let minions = Roster::new(&state).list();
    if minions.is_empty() {
        println!("No minions yet.");
        return;
    }
    for m in minions {
        println!(
            "  {}  hp {:.0}/{:.0}  {}  at ({:.0}, {:.0})",
            m.id.short(),
            m.health,
            m.max_health,
            m.task.name(),
            m.position.x,
            m.position.y
        );
    }
}
