pub mod behavior;
pub mod interaction;
pub mod movement;
pub mod mutation;
pub mod seeding;
pub mod session;
pub mod tick;
pub mod vitals;

pub use interaction::{interact, InteractionKind};
pub use mutation::{apply_mutations, Mutation};
pub use seeding::seed_world;
pub use session::Session;
pub use tick::{run_simulation_tick, SimulationEvent, TickResult};
pub use vitals::{eat, update_vitals, Food, VitalsTimers};
