//! Wildhold - top-down survival simulation core

pub mod command;
pub mod core;
pub mod ecs;
pub mod entity;
pub mod simulation;
pub mod spatial;
pub mod world;
