//! Session driver - owns the clock, rng, input and the current snapshot

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use crate::command::{Command, CommandExecutor, CommandOutcome, HeldDirections, InputSnapshot};
use crate::core::clock::Clock;
use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::ecs::world::GameState;
use crate::entity::kind::StructureKind;
use crate::simulation::seeding::seed_world;
use crate::simulation::tick::{run_simulation_tick, SimulationEvent};

/// A running game
///
/// Readers get an `Arc` to the current snapshot; each tick or applied
/// command swaps in a new one and never touches an old one.
pub struct Session<C: Clock> {
    config: SimulationConfig,
    clock: C,
    rng: ChaCha8Rng,
    state: Arc<GameState>,
    held: HeldDirections,
    build_mode: Option<StructureKind>,
}

impl<C: Clock> Session<C> {
    /// Validate `config` and seed a fresh world
    pub fn new(config: SimulationConfig, clock: C) -> Result<Self> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let state = seed_world(&config, clock.now_ms(), &mut rng);
        tracing::info!("Session started with seed {}", config.seed);
        Ok(Self {
            config,
            clock,
            rng,
            state: Arc::new(state),
            held: HeldDirections::empty(),
            build_mode: None,
        })
    }

    /// Resume from an existing snapshot, e.g. one loaded from JSON
    pub fn with_state(config: SimulationConfig, clock: C, state: GameState) -> Result<Self> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(Self {
            config,
            clock,
            rng,
            state: Arc::new(state),
            held: HeldDirections::empty(),
            build_mode: None,
        })
    }

    pub fn snapshot(&self) -> Arc<GameState> {
        Arc::clone(&self.state)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn held(&self) -> HeldDirections {
        self.held
    }

    pub fn hold(&mut self, dirs: HeldDirections) {
        self.held |= dirs;
    }

    pub fn release(&mut self, dirs: HeldDirections) {
        self.held.remove(dirs);
    }

    pub fn set_held(&mut self, dirs: HeldDirections) {
        self.held = dirs;
    }

    pub fn build_mode(&self) -> Option<StructureKind> {
        self.build_mode
    }

    pub fn set_build_mode(&mut self, mode: Option<StructureKind>) {
        self.build_mode = mode;
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over
    }

    /// Run one tick at the clock's current time
    pub fn tick(&mut self) -> Vec<SimulationEvent> {
        let input = InputSnapshot::new(self.held);
        let now = self.clock.now_ms();
        let result = run_simulation_tick(&self.state, &input, now, &self.config, &mut self.rng);
        self.state = Arc::new(result.snapshot);
        result.events
    }

    /// Apply a discrete command
    pub fn execute(&mut self, command: Command) -> CommandOutcome {
        let now = self.clock.now_ms();
        match CommandExecutor::execute(&self.state, command, now, &self.config, &mut self.rng) {
            Ok(next) => {
                self.state = Arc::new(next);
                CommandOutcome::Applied
            }
            Err(reason) => {
                tracing::debug!("{:?} rejected: {}", command, reason);
                CommandOutcome::Rejected(reason)
            }
        }
    }

    /// Interact using the current build mode
    pub fn interact(&mut self) -> CommandOutcome {
        self.execute(Command::Interact { build_mode: self.build_mode })
    }

    /// Start over with a new world; the rng stream carries on
    pub fn restart(&mut self) {
        self.state = Arc::new(seed_world(&self.config, self.clock.now_ms(), &mut self.rng));
        self.held = HeldDirections::empty();
        self.build_mode = None;
        tracing::info!("Session restarted");
    }
}
