pub mod geometry;
pub mod grid;

pub use geometry::{bearing, lerp, random_position, step_toward};
pub use grid::{BuildGrid, Cell};
