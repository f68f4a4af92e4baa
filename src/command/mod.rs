//! Discrete player commands
//!
//! Commands run between ticks and, like the tick, turn one snapshot into
//! the next. A command whose preconditions fail comes back as a
//! [`Rejection`] and the snapshot is left as it was.

pub mod executor;
pub mod input;
pub mod roster;
pub mod shop;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::core::types::EntityId;
use crate::entity::kind::StructureKind;
use crate::entity::player::Resource;
use crate::entity::tasks::MinionTask;
use crate::simulation::vitals::Food;

pub use executor::CommandExecutor;
pub use input::{HeldDirections, InputSnapshot};
pub use roster::{MinionSummary, Roster};
pub use shop::ShopItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Sweep, or build/plant if nothing in reach responds
    Interact { build_mode: Option<StructureKind> },
    Eat(Food),
    Buy(ShopItem),
    Sell(Resource),
    SellAll,
    ToggleMount,
    SetTask { minion: EntityId, task: MinionTask },
}

/// Why a command left the world unchanged
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("not enough gold: need {need}, have {have}")]
    InsufficientGold { need: u32, have: u32 },

    #[error("no {0} left")]
    OutOfStock(&'static str),

    #[error("already own a {0}")]
    AlreadyOwned(&'static str),

    #[error("no entity {0}")]
    UnknownEntity(EntityId),

    #[error("{0} is not a minion")]
    NotAMinion(EntityId),

    #[error("something already occupies this cell")]
    CellOccupied,

    #[error("the game is over")]
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Rejected(Rejection),
}

impl CommandOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, CommandOutcome::Applied)
    }
}
