pub mod kind;
pub mod player;
pub mod state;
pub mod stats;
pub mod tasks;

pub use kind::{Capabilities, EntityKind, StructureKind};
pub use player::{Inventory, Player, Resource};
pub use state::{Behavior, Entity};
pub use stats::{stats_for, BaseStats, DEFAULT_STATS};
pub use tasks::{MinionTask, Owner};
