//! Minion ownership and task assignment

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Job a minion is assigned from the roster
///
/// Only `Follow` has behavior today. The other tasks are accepted and stored
/// but leave the minion standing in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MinionTask {
    #[default]
    Follow,
    Farm,
    Gather,
    Defend,
}

impl MinionTask {
    pub const ALL: [MinionTask; 4] = [
        MinionTask::Follow,
        MinionTask::Farm,
        MinionTask::Gather,
        MinionTask::Defend,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MinionTask::Follow => "follow",
            MinionTask::Farm => "farm",
            MinionTask::Gather => "gather",
            MinionTask::Defend => "defend",
        }
    }
}

impl FromStr for MinionTask {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MinionTask::ALL
            .into_iter()
            .find(|task| task.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown task: {}", s))
    }
}

/// Who a minion answers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    Player,
}
