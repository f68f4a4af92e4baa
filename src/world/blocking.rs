//! Structure blocking for player and hostile movement
//!
//! Walls and closed gates block any move that would end strictly inside
//! their radius and not farther from them than the mover already was.
//! The rule is the same for the player and for chasing hostiles: either
//! may always step away from a structure it already stands inside.
//! Structures are bucketed by build-grid cell; since the radius is smaller
//! than a cell, a query only has to look at the 3x3 neighborhood.

use ahash::AHashMap;
use crate::core::types::{EntityId, Vec2};
use crate::entity::state::Entity;
use crate::spatial::grid::{BuildGrid, Cell};

#[derive(Debug, Clone, Copy)]
struct Blocker {
    /// Position in the entity collection, used for deterministic tie-breaks
    order: usize,
    id: EntityId,
    position: Vec2,
}

/// Blocking structures of one snapshot, indexed for proximity queries
#[derive(Debug, Clone)]
pub struct StructureBlockers {
    grid: BuildGrid,
    radius: f32,
    cells: AHashMap<Cell, Vec<Blocker>>,
}

impl StructureBlockers {
    pub fn new(grid: BuildGrid, radius: f32) -> Self {
        Self {
            grid,
            radius,
            cells: AHashMap::new(),
        }
    }

    /// Index every structure in `entities` that currently blocks movement
    pub fn from_entities(entities: &[Entity], grid: BuildGrid, radius: f32) -> Self {
        let mut blockers = Self::new(grid, radius);
        for (order, entity) in entities.iter().enumerate() {
            if entity.blocks_movement() {
                blockers.insert(order, entity.id, entity.position);
            }
        }
        blockers
    }

    fn insert(&mut self, order: usize, id: EntityId, position: Vec2) {
        let cell = self.grid.world_to_cell(position);
        self.cells.entry(cell).or_default().push(Blocker { order, id, position });
    }

    pub fn len(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// First structure (in collection order) that forbids moving from
    /// `current` to `candidate`
    pub fn blocking(&self, current: Vec2, candidate: Vec2) -> Option<EntityId> {
        let (cx, cy) = self.grid.world_to_cell(candidate);
        let mut hit: Option<Blocker> = None;

        for dy in -1..=1 {
            for dx in -1..=1 {
                let Some(bucket) = self.cells.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                for blocker in bucket {
                    let next = blocker.position.distance(&candidate);
                    if next >= self.radius {
                        continue;
                    }
                    // Stepping away is allowed for every mover, player or hostile
                    if next > blocker.position.distance(&current) {
                        continue;
                    }
                    if hit.map_or(true, |h| blocker.order < h.order) {
                        hit = Some(*blocker);
                    }
                }
            }
        }

        hit.map(|b| b.id)
    }

    pub fn is_blocked(&self, current: Vec2, candidate: Vec2) -> bool {
        self.blocking(current, candidate).is_some()
    }
}
