//! Base stat table - initial health and speed per kind

use crate::entity::kind::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseStats {
    pub health: f32,
    pub damage: Option<f32>,
    pub speed: f32,
    pub meat_yield: Option<u32>,
}

impl BaseStats {
    const fn new(health: f32, damage: Option<f32>, speed: f32, meat_yield: Option<u32>) -> Self {
        Self { health, damage, speed, meat_yield }
    }
}

/// Profile for kinds with no table entry
pub const DEFAULT_STATS: BaseStats = BaseStats::new(100.0, Some(0.0), 0.5, None);

/// Look up the base stats for a kind
///
/// Minions and carrot plants have no entry and fall back to
/// [`DEFAULT_STATS`]; their constructors override what they need.
pub fn stats_for(kind: EntityKind) -> BaseStats {
    match kind {
        EntityKind::Wolf => BaseStats::new(40.0, Some(5.0), 1.25, None),
        EntityKind::Bear => BaseStats::new(40.0, Some(5.0), 0.75, None),
        EntityKind::Bandit => BaseStats::new(40.0, Some(5.0), 1.1, None),
        EntityKind::MinionCandidate => BaseStats::new(40.0, Some(5.0), 1.0, None),
        EntityKind::Chicken => BaseStats::new(20.0, None, 0.9, Some(2)),
        EntityKind::Sheep => BaseStats::new(40.0, None, 0.6, Some(5)),
        EntityKind::Rock => BaseStats::new(3.0, None, 0.0, None),
        EntityKind::Tree => BaseStats::new(5.0, None, 0.0, None),
        EntityKind::Wall => BaseStats::new(100.0, None, 0.0, None),
        EntityKind::Gate => BaseStats::new(150.0, None, 0.0, None),
        _ => DEFAULT_STATS,
    }
}
