//! Entity kinds and the capability sets that drive their behavior
//!
//! Systems never branch on a concrete kind. They ask whether a kind has a
//! capability (movable, hostile, structure...) so a new kind is added by
//! composing flags here rather than by editing every system.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::entity::player::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Tree,
    Rock,
    Chicken,
    Sheep,
    Wolf,
    Bear,
    Bandit,
    MinionCandidate,
    Minion,
    CarrotPlant,
    Wall,
    Gate,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Capabilities: u16 {
        /// Has autonomous movement when nothing more specific applies
        const MOVABLE       = 1 << 0;
        /// Chases and attacks the player
        const HOSTILE       = 1 << 1;
        /// Chipped one point per hit, yields a raw resource
        const RESOURCE_NODE = 1 << 2;
        /// Yields its meat on a lethal hit
        const LIVESTOCK     = 1 << 3;
        /// Grows over time and can be picked when ripe
        const HARVESTABLE   = 1 << 4;
        /// Player-built; blocks movement unless open
        const STRUCTURE     = 1 << 5;
        /// Interact opens or closes it
        const TOGGLEABLE    = 1 << 6;
        /// Converts to a minion instead of dying
        const CONVERTIBLE   = 1 << 7;
        /// Allied to the player, follows tasks
        const ALLY          = 1 << 8;
        /// Pays gold on a lethal hit
        const BOUNTY        = 1 << 9;
    }
}

impl EntityKind {
    /// Kinds scattered across the world at startup
    pub const SEEDABLE: [EntityKind; 8] = [
        EntityKind::Tree,
        EntityKind::Rock,
        EntityKind::Chicken,
        EntityKind::Sheep,
        EntityKind::Wolf,
        EntityKind::Bear,
        EntityKind::Bandit,
        EntityKind::MinionCandidate,
    ];

    pub fn capabilities(self) -> Capabilities {
        use Capabilities as C;
        match self {
            EntityKind::Tree | EntityKind::Rock => C::RESOURCE_NODE,
            EntityKind::Chicken | EntityKind::Sheep => C::MOVABLE | C::LIVESTOCK | C::BOUNTY,
            EntityKind::Wolf | EntityKind::Bear | EntityKind::Bandit => {
                C::MOVABLE | C::HOSTILE | C::BOUNTY
            }
            EntityKind::MinionCandidate => C::MOVABLE | C::CONVERTIBLE | C::BOUNTY,
            EntityKind::Minion => C::MOVABLE | C::ALLY,
            EntityKind::CarrotPlant => C::HARVESTABLE | C::BOUNTY,
            EntityKind::Wall => C::STRUCTURE,
            EntityKind::Gate => C::STRUCTURE | C::TOGGLEABLE,
        }
    }

    #[inline]
    pub fn has(self, capability: Capabilities) -> bool {
        self.capabilities().contains(capability)
    }

    /// Player attacks pass over these without effect
    pub fn is_inert_to_attack(self) -> bool {
        self.has(Capabilities::ALLY)
            || (self.has(Capabilities::STRUCTURE) && !self.has(Capabilities::TOGGLEABLE))
    }

    /// Raw material a resource node yields when destroyed
    pub fn raw_resource(self) -> Option<Resource> {
        match self {
            EntityKind::Tree => Some(Resource::Wood),
            EntityKind::Rock => Some(Resource::Stone),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Tree => "tree",
            EntityKind::Rock => "rock",
            EntityKind::Chicken => "chicken",
            EntityKind::Sheep => "sheep",
            EntityKind::Wolf => "wolf",
            EntityKind::Bear => "bear",
            EntityKind::Bandit => "bandit",
            EntityKind::MinionCandidate => "minion-candidate",
            EntityKind::Minion => "minion",
            EntityKind::CarrotPlant => "carrot-plant",
            EntityKind::Wall => "wall",
            EntityKind::Gate => "gate",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structures the player can place from build mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureKind {
    Wall,
    Gate,
}

impl StructureKind {
    pub fn entity_kind(self) -> EntityKind {
        match self {
            StructureKind::Wall => EntityKind::Wall,
            StructureKind::Gate => EntityKind::Gate,
        }
    }
}

impl FromStr for StructureKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wall" => Ok(StructureKind::Wall),
            "gate" => Ok(StructureKind::Gate),
            other => Err(format!("unknown structure: {}", other)),
        }
    }
}
